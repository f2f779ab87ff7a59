//! Seeds the database with demo accounts and open training requirements.
//! Safe to run repeatedly: existing usernames and requirement titles are
//! skipped instead of duplicated.

use dotenv::dotenv;
use educonnect_backend::auth::password::hash_password;
use educonnect_backend::create_pool;
use educonnect_backend::db::requirements as requirement_db;
use educonnect_backend::db::users as user_db;
use educonnect_backend::models::requirements::CreateRequirement;
use educonnect_backend::models::users::{NewUser, Role, SkillsInput};
use migration::{Migrator, MigratorTrait};
use sea_orm::DatabaseConnection;
use tracing_subscriber::EnvFilter;

struct SeedUser {
    username: &'static str,
    password: &'static str,
    name: &'static str,
    email: &'static str,
    role: Role,
    bio: Option<&'static str>,
    organization: Option<&'static str>,
    skills: &'static [&'static str],
}

struct SeedRequirement {
    college: &'static str,
    title: &'static str,
    description: &'static str,
    mode: &'static str,
    skills: &'static [&'static str],
    duration_weeks: i32,
}

fn demo_users() -> Vec<SeedUser> {
    vec![
        SeedUser {
            username: "admin",
            password: "Admin@123",
            name: "Platform Admin",
            email: "admin@example.com",
            role: Role::Admin,
            bio: None,
            organization: None,
            skills: &[],
        },
        SeedUser {
            username: "john",
            password: "John@123",
            name: "John Doe",
            email: "john@example.com",
            role: Role::Trainer,
            bio: Some(
                "Experienced finance specialist with over 10 years in corporate training. Specializes in financial literacy, investment strategies, and budgeting workshops.",
            ),
            organization: None,
            skills: &[
                "Finance",
                "Budgeting",
                "Investment",
                "Corporate Finance",
                "Financial Planning",
            ],
        },
        SeedUser {
            username: "sarah",
            password: "Sarah@123",
            name: "Sarah Lee",
            email: "sarah@example.com",
            role: Role::Trainer,
            bio: Some(
                "Tech and AI specialist with expertise in machine learning, data science, and web development. Previously worked at major tech companies before becoming a full-time trainer.",
            ),
            organization: None,
            skills: &[
                "AI",
                "Machine Learning",
                "Web Development",
                "Data Science",
                "Python",
            ],
        },
        SeedUser {
            username: "amit",
            password: "Amit@123",
            name: "Amit Sharma",
            email: "amit@example.com",
            role: Role::Trainer,
            bio: Some(
                "Business strategy expert with a background in consulting. Helps organizations develop effective business models and growth strategies through interactive workshops.",
            ),
            organization: None,
            skills: &[
                "Business Strategy",
                "Leadership",
                "Management",
                "Consulting",
                "Entrepreneurship",
            ],
        },
        SeedUser {
            username: "priya",
            password: "Priya@123",
            name: "Priya Nair",
            email: "priya@example.com",
            role: Role::Trainer,
            bio: Some(
                "HR skills coach specializing in team building, workplace communication, and employee development. Creates customized training programs for organizations of all sizes.",
            ),
            organization: None,
            skills: &[
                "HR",
                "Team Building",
                "Communication",
                "Leadership",
                "Employee Development",
            ],
        },
        SeedUser {
            username: "carlos",
            password: "Carlos@123",
            name: "Carlos Mendez",
            email: "carlos@example.com",
            role: Role::Trainer,
            bio: Some(
                "Digital marketing trainer with expertise in social media, SEO, and content marketing. Helps businesses develop effective digital marketing strategies.",
            ),
            organization: None,
            skills: &[
                "Digital Marketing",
                "Social Media",
                "SEO",
                "Content Marketing",
                "Analytics",
            ],
        },
        SeedUser {
            username: "sunrise",
            password: "Sunrise@123",
            name: "Sunrise University",
            email: "sunrise@example.com",
            role: Role::College,
            bio: None,
            organization: Some("Sunrise Education Group"),
            skills: &[],
        },
        SeedUser {
            username: "greenfield",
            password: "Green@123",
            name: "Greenfield College",
            email: "greenfield@example.com",
            role: Role::College,
            bio: None,
            organization: Some("Greenfield Education Trust"),
            skills: &[],
        },
        SeedUser {
            username: "techbridge",
            password: "Tech@123",
            name: "TechBridge Institute",
            email: "techbridge@example.com",
            role: Role::College,
            bio: None,
            organization: Some("TechBridge Foundation"),
            skills: &[],
        },
        SeedUser {
            username: "blueocean",
            password: "Ocean@123",
            name: "BlueOcean University",
            email: "blueocean@example.com",
            role: Role::College,
            bio: None,
            organization: Some("BlueOcean Educational Society"),
            skills: &[],
        },
        SeedUser {
            username: "zenith",
            password: "Zenith@123",
            name: "Zenith Business School",
            email: "zenith@example.com",
            role: Role::College,
            bio: None,
            organization: Some("Zenith Global Education"),
            skills: &[],
        },
    ]
}

fn demo_requirements() -> Vec<SeedRequirement> {
    vec![
        SeedRequirement {
            college: "sunrise",
            title: "Financial Literacy Program",
            description: "A comprehensive 4-week program to teach students about personal finance, budgeting, and investment fundamentals. Looking for an experienced financial trainer who can make these concepts accessible to undergraduate students.",
            mode: "in-person",
            skills: &["Finance", "Budgeting", "Investment"],
            duration_weeks: 4,
        },
        SeedRequirement {
            college: "sunrise",
            title: "Web Development Bootcamp",
            description: "An intensive 8-week web development bootcamp covering HTML, CSS, JavaScript, and modern frameworks. The ideal trainer should have industry experience and strong teaching skills.",
            mode: "hybrid",
            skills: &["Web Development", "JavaScript", "HTML/CSS", "React"],
            duration_weeks: 8,
        },
        SeedRequirement {
            college: "greenfield",
            title: "Digital Marketing Certificate Program",
            description: "A comprehensive program covering all aspects of digital marketing, including social media, SEO, content marketing, and analytics. The program will run for 10 weeks with both theoretical and practical components.",
            mode: "hybrid",
            skills: &[
                "Digital Marketing",
                "Social Media",
                "SEO",
                "Content Marketing",
            ],
            duration_weeks: 10,
        },
        SeedRequirement {
            college: "greenfield",
            title: "Data Science Fundamentals",
            description: "An introductory course on data science for undergraduate students. The course will cover statistics, Python programming, and basic machine learning concepts. Looking for a trainer with experience in teaching technical concepts to beginners.",
            mode: "in-person",
            skills: &["Data Science", "Python", "Statistics", "Machine Learning"],
            duration_weeks: 8,
        },
        SeedRequirement {
            college: "techbridge",
            title: "Artificial Intelligence and Machine Learning Course",
            description: "An advanced course on AI and ML for computer science students. The course will cover neural networks, deep learning, and practical applications. Looking for a trainer with both academic and industry experience in AI.",
            mode: "hybrid",
            skills: &["AI", "Machine Learning", "Python", "Deep Learning"],
            duration_weeks: 12,
        },
        SeedRequirement {
            college: "techbridge",
            title: "Cybersecurity Fundamentals",
            description: "A comprehensive introduction to cybersecurity principles and practices. Topics include network security, ethical hacking, and security protocols. The trainer should have practical experience in cybersecurity.",
            mode: "online",
            skills: &["Cybersecurity", "Network Security", "Ethical Hacking"],
            duration_weeks: 8,
        },
        SeedRequirement {
            college: "blueocean",
            title: "Strategic Management in Global Markets",
            description: "An executive education program on strategic management for global businesses. Topics include international market entry, competitive analysis, and global business strategy. Seeking a trainer with international business experience.",
            mode: "hybrid",
            skills: &[
                "Business Strategy",
                "Global Markets",
                "Strategic Management",
            ],
            duration_weeks: 8,
        },
        SeedRequirement {
            college: "blueocean",
            title: "Sustainable Business Practices Workshop",
            description: "A workshop series on implementing sustainable business practices and corporate social responsibility. The ideal trainer should have experience in sustainability initiatives within corporate environments.",
            mode: "in-person",
            skills: &["Sustainability", "CSR", "Business Ethics"],
            duration_weeks: 4,
        },
        SeedRequirement {
            college: "zenith",
            title: "Digital Transformation Strategy",
            description: "A course on digital transformation for business leaders. Topics include technology adoption, business model innovation, and change management. Seeking a trainer with experience in leading digital transformation initiatives.",
            mode: "online",
            skills: &["Digital Transformation", "Strategy", "Innovation"],
            duration_weeks: 6,
        },
        SeedRequirement {
            college: "zenith",
            title: "Executive Communication Skills",
            description: "A program for MBA students focusing on persuasive communication, executive presence, and presentation skills. The ideal trainer should have experience in executive coaching or corporate communication training.",
            mode: "in-person",
            skills: &["Communication", "Leadership", "Presentation Skills"],
            duration_weeks: 4,
        },
    ]
}

async fn seed_user(db: &DatabaseConnection, spec: SeedUser) {
    let existing = user_db::get_user_by_username(db, spec.username)
        .await
        .expect("Failed to look up user");
    if existing.is_some() {
        tracing::info!("User {} already exists, skipping", spec.username);
        return;
    }

    let password_hash = hash_password(spec.password).expect("Failed to hash password");
    let user = user_db::insert_user(
        db,
        NewUser {
            username: spec.username.to_string(),
            password_hash,
            name: spec.name.to_string(),
            email: spec.email.to_string(),
            role: spec.role,
            skills: spec.skills.iter().map(|s| s.to_string()).collect(),
            bio: spec.bio.map(str::to_string),
            organization: spec.organization.map(str::to_string),
        },
    )
    .await
    .expect("Failed to create user");

    // Demo accounts skip the admin approval queue.
    user_db::set_verified(db, user.id, true)
        .await
        .expect("Failed to verify user");

    tracing::info!("Created user: {}", user.name);
}

async fn seed_requirement(db: &DatabaseConnection, spec: SeedRequirement) {
    let existing = requirement_db::find_by_title(db, spec.title)
        .await
        .expect("Failed to look up requirement");
    if existing.is_some() {
        tracing::info!("Requirement \"{}\" already exists, skipping", spec.title);
        return;
    }

    let college = user_db::get_user_by_username(db, spec.college)
        .await
        .expect("Failed to look up college")
        .expect("Seed college account is missing");

    let requirement = requirement_db::insert_requirement(
        db,
        CreateRequirement {
            title: spec.title.to_string(),
            description: spec.description.to_string(),
            mode: spec.mode.to_string(),
            skills_required: Some(SkillsInput::Many(
                spec.skills.iter().map(|s| s.to_string()).collect(),
            )),
            duration_weeks: spec.duration_weeks,
        },
        college.id,
    )
    .await
    .expect("Failed to create requirement");

    tracing::info!("Created requirement: {}", requirement.title);
}

#[tokio::main]
async fn main() {
    dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into()))
        .init();

    let db = create_pool().await;
    Migrator::up(&db, None)
        .await
        .expect("Failed to run database migrations");

    tracing::info!("Starting database seeding");
    for user in demo_users() {
        seed_user(&db, user).await;
    }
    for requirement in demo_requirements() {
        seed_requirement(&db, requirement).await;
    }
    tracing::info!("Database seeding completed");
}
