use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Flat fee applied to every generated contract.
pub const DEFAULT_FEE: i32 = 1000;

/// Payment status stored as a lowercase string in the database.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, EnumIter, DeriveActiveEnum)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::None)")]
#[serde(rename_all = "snake_case")]
pub enum PaymentStatus {
    #[sea_orm(string_value = "pending")]
    Pending,
    #[sea_orm(string_value = "paid")]
    Paid,
}

/// SeaORM entity for the `contracts` table.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "contracts")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub trainer_id: Uuid,
    pub college_id: Uuid,
    pub requirement_id: Uuid,
    pub application_id: Uuid,
    #[sea_orm(column_type = "Text")]
    pub terms: String,
    pub fee: i32,
    pub signed_by_trainer: bool,
    pub signed_by_college: bool,
    pub payment_status: PaymentStatus,
    pub trainer_signed_at: Option<DateTimeUtc>,
    pub college_signed_at: Option<DateTimeUtc>,
    pub created_at: DateTimeUtc,
    pub updated_at: Option<DateTimeUtc>,
}

impl Model {
    /// True once both parties have signed.
    pub fn fully_signed(&self) -> bool {
        self.signed_by_trainer && self.signed_by_college
    }
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::requirements::Entity",
        from = "Column::RequirementId",
        to = "super::requirements::Column::Id"
    )]
    Requirement,
    #[sea_orm(
        belongs_to = "super::applications::Entity",
        from = "Column::ApplicationId",
        to = "super::applications::Column::Id"
    )]
    Application,
}

impl Related<super::requirements::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Requirement.def()
    }
}

impl Related<super::applications::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Application.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

/// Which side of the contract a signer is on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContractParty {
    Trainer,
    College,
}

// ── DTOs ──

/// Body of the sign and payment endpoints; the client sends camelCase.
#[derive(Debug, Clone, Deserialize)]
pub struct ContractAction {
    #[serde(rename = "contractId")]
    pub contract_id: Uuid,
}

/// Compact trainer info embedded in the contract list.
#[derive(Debug, Clone, Serialize)]
pub struct TrainerSummary {
    pub id: Uuid,
    pub name: String,
}

/// Compact college info embedded in the contract list.
#[derive(Debug, Clone, Serialize)]
pub struct CollegeSummary {
    pub id: Uuid,
    pub name: String,
    pub organization: Option<String>,
}

/// Trainer contact details embedded in the contract detail response.
#[derive(Debug, Clone, Serialize)]
pub struct TrainerContact {
    pub id: Uuid,
    pub name: String,
    pub email: String,
}

/// College contact details embedded in the contract detail response.
#[derive(Debug, Clone, Serialize)]
pub struct CollegeContact {
    pub id: Uuid,
    pub name: String,
    pub organization: Option<String>,
    pub email: String,
}

/// A contract with its related requirement and both parties, as returned
/// by `GET /api/contracts`.
#[derive(Debug, Clone, Serialize)]
pub struct ContractWithParties {
    #[serde(flatten)]
    pub contract: Model,
    pub requirement: Option<super::requirements::Model>,
    pub trainer: Option<TrainerSummary>,
    pub college: Option<CollegeSummary>,
}

/// The full contract detail returned by `GET /api/contracts/{id}`.
#[derive(Debug, Clone, Serialize)]
pub struct ContractDetail {
    #[serde(flatten)]
    pub contract: Model,
    pub requirement: Option<super::requirements::Model>,
    pub application: Option<super::applications::Model>,
    pub trainer: Option<TrainerContact>,
    pub college: Option<CollegeContact>,
}
