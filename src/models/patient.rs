use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::enums::{Gender, PatientStatus};
use super::evolution::Evolution;
use super::hospital::{Bed, Unit};
use super::laboratory::Laboratory;
use super::task::Task;

/// One hospitalization episode, tied to exactly one bed at a time.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Patient {
    pub id: Uuid,
    pub bed_id: Uuid,
    pub rut: Option<String>,
    pub name: String,
    pub last_name: String,
    pub birth_date: Option<NaiveDate>,
    pub gender: Option<Gender>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub emergency: Option<String>,
    pub admission_date: DateTime<Utc>,
    pub discharge_date: Option<DateTime<Utc>>,
    pub status: PatientStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Diagnosis {
    pub id: Uuid,
    pub patient_id: Uuid,
    pub code: Option<String>,
    pub description: String,
    pub is_primary: bool,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Patient bundled with its bed, unit and clinical records, as the patient
/// card and detail views consume it.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PatientWithRelations {
    #[serde(flatten)]
    pub patient: Patient,
    pub bed: Bed,
    pub unit: Unit,
    pub diagnoses: Vec<Diagnosis>,
    pub evolutions: Vec<Evolution>,
    pub tasks: Vec<Task>,
    pub labs: Vec<Laboratory>,
}

/// Admission request: patient demographics plus initial diagnoses. The
/// patient insert and the bed transition to Occupied happen in one
/// transaction.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatePatientRequest {
    pub bed_id: Uuid,
    pub rut: Option<String>,
    pub name: String,
    pub last_name: String,
    pub birth_date: Option<NaiveDate>,
    pub gender: Option<Gender>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub emergency: Option<String>,
    pub status: PatientStatus,
    #[serde(default)]
    pub diagnoses: Vec<CreateDiagnosisRequest>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateDiagnosisRequest {
    pub code: Option<String>,
    pub description: String,
    #[serde(default)]
    pub is_primary: bool,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdatePatientStatusRequest {
    pub status: PatientStatus,
}

/// Query filters for the patient list.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PatientFilters {
    pub unit_id: Option<Uuid>,
    pub status: Option<PatientStatus>,
}
