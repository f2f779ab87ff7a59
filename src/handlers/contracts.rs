use actix_web::{HttpResponse, Responder, web};
use sea_orm::DatabaseConnection;
use std::collections::{HashMap, HashSet};
use uuid::Uuid;

use crate::auth::authorization::require_role;
use crate::auth::middleware::AuthenticatedUser;
use crate::db::contracts as contract_db;
use crate::db::notifications as notification_db;
use crate::db::requirements as requirement_db;
use crate::db::users as user_db;
use crate::models::contracts::{
    self, CollegeContact, CollegeSummary, ContractAction, ContractDetail, ContractParty,
    ContractWithParties, PaymentStatus, TrainerContact, TrainerSummary,
};
use crate::models::users::Role;

/// GET /api/contracts — list the caller's contracts with the requirement and
/// both parties attached. Trainers and colleges each see their own side;
/// anyone else gets an empty list.
pub async fn get_contracts(
    user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
) -> impl Responder {
    let result = match user.0.role {
        Role::Trainer => contract_db::get_contracts_by_trainer(db.get_ref(), user.0.id).await,
        Role::College => contract_db::get_contracts_by_college(db.get_ref(), user.0.id).await,
        Role::Admin => Ok(Vec::new()),
    };

    let listed = match result {
        Ok(listed) => listed,
        Err(e) => {
            tracing::error!("Failed to fetch contracts: {e}");
            return HttpResponse::InternalServerError().json(serde_json::json!({
                "message": "Failed to fetch contracts",
            }));
        }
    };

    let requirement_ids: Vec<Uuid> = listed
        .iter()
        .map(|c| c.requirement_id)
        .collect::<HashSet<_>>()
        .into_iter()
        .collect();

    let requirements: HashMap<Uuid, _> =
        match requirement_db::get_requirements_by_ids(db.get_ref(), requirement_ids).await {
            Ok(found) => found.into_iter().map(|r| (r.id, r)).collect(),
            Err(e) => {
                tracing::error!("Failed to fetch requirements: {e}");
                return HttpResponse::InternalServerError().json(serde_json::json!({
                    "message": "Failed to fetch contracts",
                }));
            }
        };

    let party_ids: Vec<Uuid> = listed
        .iter()
        .flat_map(|c| [c.trainer_id, c.college_id])
        .collect::<HashSet<_>>()
        .into_iter()
        .collect();

    let parties: HashMap<Uuid, _> = match user_db::get_users_by_ids(db.get_ref(), party_ids).await
    {
        Ok(found) => found.into_iter().map(|u| (u.id, u)).collect(),
        Err(e) => {
            tracing::error!("Failed to fetch contract parties: {e}");
            return HttpResponse::InternalServerError().json(serde_json::json!({
                "message": "Failed to fetch contracts",
            }));
        }
    };

    let enriched: Vec<ContractWithParties> = listed
        .into_iter()
        .map(|contract| {
            let requirement = requirements.get(&contract.requirement_id).cloned();
            let trainer = parties.get(&contract.trainer_id).map(|u| TrainerSummary {
                id: u.id,
                name: u.name.clone(),
            });
            let college = parties.get(&contract.college_id).map(|u| CollegeSummary {
                id: u.id,
                name: u.name.clone(),
                organization: u.organization.clone(),
            });
            ContractWithParties {
                contract,
                requirement,
                trainer,
                college,
            }
        })
        .collect();

    HttpResponse::Ok().json(enriched)
}

/// GET /api/contracts/{id} — full contract detail. Only the two parties and
/// admins may look.
pub async fn get_contract(
    user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
    path: web::Path<Uuid>,
) -> impl Responder {
    let contract = match contract_db::get_contract_by_id(db.get_ref(), path.into_inner()).await {
        Ok(Some(contract)) => contract,
        Ok(None) => {
            return HttpResponse::NotFound().json(serde_json::json!({
                "message": "Contract not found",
            }));
        }
        Err(e) => {
            tracing::error!("Failed to fetch contract: {e}");
            return HttpResponse::InternalServerError().json(serde_json::json!({
                "message": "Failed to fetch contract",
            }));
        }
    };

    let is_party = user.0.id == contract.trainer_id || user.0.id == contract.college_id;
    if !is_party && user.0.role != Role::Admin {
        return HttpResponse::Forbidden().json(serde_json::json!({
            "message": "You don't have permission to view this contract",
        }));
    }

    let requirement =
        match requirement_db::get_requirement_by_id(db.get_ref(), contract.requirement_id).await {
            Ok(requirement) => requirement,
            Err(e) => {
                tracing::error!("Failed to fetch requirement: {e}");
                return HttpResponse::InternalServerError().json(serde_json::json!({
                    "message": "Failed to fetch contract",
                }));
            }
        };

    let application = match crate::db::applications::get_application_by_id(
        db.get_ref(),
        contract.application_id,
    )
    .await
    {
        Ok(application) => application,
        Err(e) => {
            tracing::error!("Failed to fetch application: {e}");
            return HttpResponse::InternalServerError().json(serde_json::json!({
                "message": "Failed to fetch contract",
            }));
        }
    };

    let parties: HashMap<Uuid, _> = match user_db::get_users_by_ids(
        db.get_ref(),
        vec![contract.trainer_id, contract.college_id],
    )
    .await
    {
        Ok(found) => found.into_iter().map(|u| (u.id, u)).collect(),
        Err(e) => {
            tracing::error!("Failed to fetch contract parties: {e}");
            return HttpResponse::InternalServerError().json(serde_json::json!({
                "message": "Failed to fetch contract",
            }));
        }
    };

    let trainer = parties.get(&contract.trainer_id).map(|u| TrainerContact {
        id: u.id,
        name: u.name.clone(),
        email: u.email.clone(),
    });
    let college = parties.get(&contract.college_id).map(|u| CollegeContact {
        id: u.id,
        name: u.name.clone(),
        organization: u.organization.clone(),
        email: u.email.clone(),
    });

    HttpResponse::Ok().json(ContractDetail {
        contract,
        requirement,
        application,
        trainer,
        college,
    })
}

/// Fetch a contract for the sign and payment endpoints.
async fn load_contract(
    db: &DatabaseConnection,
    contract_id: Uuid,
    failure: &str,
) -> Result<contracts::Model, HttpResponse> {
    contract_db::get_contract_by_id(db, contract_id)
        .await
        .map_err(|e| {
            tracing::error!("Failed to fetch contract: {e}");
            HttpResponse::InternalServerError().json(serde_json::json!({
                "message": failure,
            }))
        })?
        .ok_or_else(|| {
            HttpResponse::NotFound().json(serde_json::json!({
                "message": "Contract not found",
            }))
        })
}

/// POST /api/contract/sign — one party signs. Each side signs exactly once;
/// the other party is notified.
pub async fn sign_contract(
    user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
    body: web::Json<ContractAction>,
) -> impl Responder {
    let contract = match load_contract(
        db.get_ref(),
        body.into_inner().contract_id,
        "Failed to sign contract",
    )
    .await
    {
        Ok(contract) => contract,
        Err(resp) => return resp,
    };

    // Work out which side is signing. A party can only sign once.
    let (party, other_party_id) = if user.0.id == contract.trainer_id {
        if contract.signed_by_trainer {
            return HttpResponse::BadRequest().json(serde_json::json!({
                "message": "You have already signed this contract",
            }));
        }
        (ContractParty::Trainer, contract.college_id)
    } else if user.0.id == contract.college_id {
        if contract.signed_by_college {
            return HttpResponse::BadRequest().json(serde_json::json!({
                "message": "You have already signed this contract",
            }));
        }
        (ContractParty::College, contract.trainer_id)
    } else {
        return HttpResponse::Forbidden().json(serde_json::json!({
            "message": "You don't have permission to sign this contract",
        }));
    };

    if let Err(e) = contract_db::sign_contract(db.get_ref(), contract.id, party).await {
        tracing::error!("Failed to sign contract: {e}");
        return HttpResponse::InternalServerError().json(serde_json::json!({
            "message": "Failed to sign contract",
        }));
    }

    if let Ok(Some(requirement)) =
        requirement_db::get_requirement_by_id(db.get_ref(), contract.requirement_id).await
    {
        notification_db::notify(
            db.get_ref(),
            other_party_id,
            format!(
                "{} has signed the contract for \"{}\"",
                user.0.name, requirement.title
            ),
            Some("contract"),
            Some(contract.id),
        )
        .await;
    }

    HttpResponse::Ok().json(serde_json::json!({
        "message": "Contract signed successfully",
    }))
}

/// POST /api/contract/payment — the college marks payment as completed.
/// Requires both signatures, and can only happen once.
pub async fn mark_payment(
    user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
    body: web::Json<ContractAction>,
) -> impl Responder {
    if let Err(resp) = require_role(&user.0, Role::College) {
        return resp;
    }

    let contract = match load_contract(
        db.get_ref(),
        body.into_inner().contract_id,
        "Failed to update payment status",
    )
    .await
    {
        Ok(contract) => contract,
        Err(resp) => return resp,
    };

    if contract.college_id != user.0.id {
        return HttpResponse::Forbidden().json(serde_json::json!({
            "message": "You can only mark your own contracts as paid",
        }));
    }

    if contract.payment_status == PaymentStatus::Paid {
        return HttpResponse::BadRequest().json(serde_json::json!({
            "message": "Payment has already been marked as completed",
        }));
    }

    if !contract.fully_signed() {
        return HttpResponse::BadRequest().json(serde_json::json!({
            "message": "Both parties must sign the contract before marking payment as complete",
        }));
    }

    if let Err(e) = contract_db::mark_paid(db.get_ref(), contract.id).await {
        tracing::error!("Failed to update payment status: {e}");
        return HttpResponse::InternalServerError().json(serde_json::json!({
            "message": "Failed to update payment status",
        }));
    }

    if let Ok(Some(requirement)) =
        requirement_db::get_requirement_by_id(db.get_ref(), contract.requirement_id).await
    {
        notification_db::notify(
            db.get_ref(),
            contract.trainer_id,
            format!(
                "Payment for \"{}\" has been marked as completed",
                requirement.title
            ),
            Some("contract"),
            Some(contract.id),
        )
        .await;
    }

    HttpResponse::Ok().json(serde_json::json!({
        "message": "Payment marked as completed",
    }))
}
