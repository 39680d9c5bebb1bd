use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::enums::{MedicalSystem, PlanPriority};

/// A dated clinical progress note in SOAP form. Append-only: there is no
/// update path once a note is written.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Evolution {
    pub id: Uuid,
    pub patient_id: Uuid,
    pub created_by: Uuid,
    pub date: DateTime<Utc>,
    pub subjective: Option<String>,
    pub objective: Option<String>,
    pub assessment: Option<String>,
    pub plan: Option<String>,
    pub full_text: Option<String>,
    pub is_generated: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Per-body-system treatment plan attached to an evolution.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct SystemPlan {
    pub id: Uuid,
    pub evolution_id: Uuid,
    pub system: MedicalSystem,
    pub description: String,
    pub priority: PlanPriority,
    pub is_completed: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EvolutionWithPlans {
    #[serde(flatten)]
    pub evolution: Evolution,
    pub system_plans: Vec<SystemPlan>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateEvolutionRequest {
    pub created_by: Uuid,
    pub subjective: Option<String>,
    pub objective: Option<String>,
    pub assessment: Option<String>,
    pub plan: Option<String>,
    pub full_text: Option<String>,
    #[serde(default)]
    pub is_generated: bool,
    #[serde(default)]
    pub system_plans: Vec<CreateSystemPlanRequest>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateSystemPlanRequest {
    pub system: MedicalSystem,
    pub description: String,
    pub priority: PlanPriority,
}
