use sea_orm::*;
use uuid::Uuid;

use crate::models::contracts::{self, ContractParty, PaymentStatus};

/// Fetch a single contract by ID.
pub async fn get_contract_by_id(
    db: &DatabaseConnection,
    id: Uuid,
) -> Result<Option<contracts::Model>, DbErr> {
    contracts::Entity::find_by_id(id).one(db).await
}

/// Fetch a trainer's contracts, newest first.
pub async fn get_contracts_by_trainer(
    db: &DatabaseConnection,
    trainer_id: Uuid,
) -> Result<Vec<contracts::Model>, DbErr> {
    contracts::Entity::find()
        .filter(contracts::Column::TrainerId.eq(trainer_id))
        .order_by_desc(contracts::Column::CreatedAt)
        .all(db)
        .await
}

/// Fetch a college's contracts, newest first.
pub async fn get_contracts_by_college(
    db: &DatabaseConnection,
    college_id: Uuid,
) -> Result<Vec<contracts::Model>, DbErr> {
    contracts::Entity::find()
        .filter(contracts::Column::CollegeId.eq(college_id))
        .order_by_desc(contracts::Column::CreatedAt)
        .all(db)
        .await
}

/// Record one party's signature with its timestamp.
pub async fn sign_contract(
    db: &DatabaseConnection,
    id: Uuid,
    party: ContractParty,
) -> Result<contracts::Model, DbErr> {
    let contract = contracts::Entity::find_by_id(id)
        .one(db)
        .await?
        .ok_or(DbErr::RecordNotFound("Contract not found".to_string()))?;

    let now = chrono::Utc::now();
    let mut active: contracts::ActiveModel = contract.into();
    match party {
        ContractParty::Trainer => {
            active.signed_by_trainer = Set(true);
            active.trainer_signed_at = Set(Some(now));
        }
        ContractParty::College => {
            active.signed_by_college = Set(true);
            active.college_signed_at = Set(Some(now));
        }
    }
    active.updated_at = Set(Some(now));

    active.update(db).await
}

/// Mark a contract's payment as completed.
pub async fn mark_paid(db: &DatabaseConnection, id: Uuid) -> Result<contracts::Model, DbErr> {
    let contract = contracts::Entity::find_by_id(id)
        .one(db)
        .await?
        .ok_or(DbErr::RecordNotFound("Contract not found".to_string()))?;

    let mut active: contracts::ActiveModel = contract.into();
    active.payment_status = Set(PaymentStatus::Paid);
    active.updated_at = Set(Some(chrono::Utc::now()));

    active.update(db).await
}

/// Count all contracts.
pub async fn count_all(db: &DatabaseConnection) -> Result<u64, DbErr> {
    contracts::Entity::find().count(db).await
}

/// Count contracts signed by both parties.
pub async fn count_fully_signed(db: &DatabaseConnection) -> Result<u64, DbErr> {
    contracts::Entity::find()
        .filter(contracts::Column::SignedByTrainer.eq(true))
        .filter(contracts::Column::SignedByCollege.eq(true))
        .count(db)
        .await
}

/// Count contracts whose payment is completed.
pub async fn count_paid(db: &DatabaseConnection) -> Result<u64, DbErr> {
    contracts::Entity::find()
        .filter(contracts::Column::PaymentStatus.eq(PaymentStatus::Paid))
        .count(db)
        .await
}
