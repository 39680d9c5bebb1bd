use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use uuid::Uuid;

use super::enums::LabType;

/// A laboratory or imaging result for a patient. The result payload is a
/// closed tagged union keyed by lab type, persisted as JSONB.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Laboratory {
    pub id: Uuid,
    pub patient_id: Uuid,
    pub lab_type: LabType,
    pub date: DateTime<Utc>,
    pub results: Json<LabResults>,
    pub notes: Option<String>,
    pub is_urgent: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Typed result panels, one variant per lab type. A payload whose shape does
/// not match its tag is rejected at deserialization, not stored as an
/// untyped bag.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all_fields = "camelCase")]
pub enum LabResults {
    Hemograma {
        hemoglobin: Option<f64>,
        hematocrit: Option<f64>,
        leukocytes: Option<f64>,
        platelets: Option<f64>,
    },
    QuimicaSanguinea {
        glucose: Option<f64>,
        creatinine: Option<f64>,
        urea: Option<f64>,
    },
    GasesArteriales {
        ph: Option<f64>,
        pao2: Option<f64>,
        paco2: Option<f64>,
        hco3: Option<f64>,
        lactate: Option<f64>,
    },
    Electrolitos {
        sodium: Option<f64>,
        potassium: Option<f64>,
        chloride: Option<f64>,
    },
    Coagulacion {
        inr: Option<f64>,
        pt: Option<f64>,
        ptt: Option<f64>,
    },
    Orina {
        density: Option<f64>,
        ph: Option<f64>,
        findings: Option<String>,
    },
    Cultivos {
        sample: String,
        organism: Option<String>,
        antibiogram: Option<String>,
    },
    Imagenes {
        modality: String,
        region: Option<String>,
        findings: Option<String>,
    },
    Otros {
        description: String,
    },
}

impl LabResults {
    /// The lab type a payload belongs to. Exhaustive by construction: a new
    /// panel variant cannot be added without classifying it.
    pub fn lab_type(&self) -> LabType {
        match self {
            LabResults::Hemograma { .. } => LabType::Hemograma,
            LabResults::QuimicaSanguinea { .. } => LabType::QuimicaSanguinea,
            LabResults::GasesArteriales { .. } => LabType::GasesArteriales,
            LabResults::Electrolitos { .. } => LabType::Electrolitos,
            LabResults::Coagulacion { .. } => LabType::Coagulacion,
            LabResults::Orina { .. } => LabType::Orina,
            LabResults::Cultivos { .. } => LabType::Cultivos,
            LabResults::Imagenes { .. } => LabType::Imagenes,
            LabResults::Otros { .. } => LabType::Otros,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateLaboratoryRequest {
    pub results: LabResults,
    pub date: Option<DateTime<Utc>>,
    pub notes: Option<String>,
    #[serde(default)]
    pub is_urgent: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn results_roundtrip_keeps_the_tag() {
        let results = LabResults::GasesArteriales {
            ph: Some(7.31),
            pao2: Some(68.0),
            paco2: Some(52.0),
            hco3: Some(24.0),
            lactate: None,
        };

        let value = serde_json::to_value(&results).unwrap();
        assert_eq!(value["type"], "GASES_ARTERIALES");
        assert_eq!(value["ph"], 7.31);

        let back: LabResults = serde_json::from_value(value).unwrap();
        assert_eq!(back.lab_type(), LabType::GasesArteriales);
    }

    #[test]
    fn mismatched_payload_is_rejected() {
        // Cultivos requires a sample; a bare tag must not deserialize.
        let raw = serde_json::json!({ "type": "CULTIVOS" });
        assert!(serde_json::from_value::<LabResults>(raw).is_err());
    }

    #[test]
    fn every_variant_maps_to_its_type() {
        let hemograma = LabResults::Hemograma {
            hemoglobin: Some(11.2),
            hematocrit: None,
            leukocytes: Some(14.3),
            platelets: None,
        };
        assert_eq!(hemograma.lab_type(), LabType::Hemograma);

        let otros = LabResults::Otros {
            description: "Panel viral respiratorio".to_string(),
        };
        assert_eq!(otros.lab_type(), LabType::Otros);
    }
}
