use actix_cors::Cors;
use actix_web::{App, HttpServer, web};
use dotenv::dotenv;
use educonnect_backend::create_pool;
use educonnect_backend::handlers;
use migration::{Migrator, MigratorTrait};
use tracing_subscriber::EnvFilter;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into()))
        .init();

    let db = create_pool().await;
    Migrator::up(&db, None)
        .await
        .expect("Failed to run database migrations");
    let db_data = web::Data::new(db);

    // The frontend dev server by default; sessions ride on cookies, so the
    // exact origin matters and credentials must be allowed.
    let cors_origin =
        std::env::var("CORS_ORIGIN").unwrap_or_else(|_| "http://localhost:5173".to_string());

    let port = std::env::var("PORT").unwrap_or_else(|_| "8080".to_string());
    let bind_addr = format!("0.0.0.0:{port}");
    tracing::info!("Server running at http://{bind_addr}");

    HttpServer::new(move || {
        let cors = Cors::default()
            .allowed_origin(&cors_origin)
            .allowed_methods(vec!["GET", "POST", "PUT", "PATCH", "DELETE", "OPTIONS"])
            .allowed_headers(vec![
                actix_web::http::header::CONTENT_TYPE,
                actix_web::http::header::ACCEPT,
            ])
            .supports_credentials()
            .max_age(3600);

        App::new()
            .wrap(cors)
            .app_data(db_data.clone())
            .app_data(handlers::json_config())
            .app_data(handlers::path_config())
            .service(web::scope("/api").configure(handlers::init_routes))
    })
    .bind(&bind_addr)?
    .run()
    .await
}
