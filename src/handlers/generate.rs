use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};

use crate::ai::PatientSnapshot;
use crate::error::ApiError;
use crate::AppState;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateEvolutionRequest {
    pub patient_data: PatientSnapshot,
}

#[derive(Debug, Serialize)]
pub struct GenerateEvolutionResponse {
    pub evolution: String,
}

/// `POST /api/generate-evolution` — render the snapshot into the SOAP
/// instruction template and request one completion from the external
/// service. No partial results: the call either yields the full text or an
/// `{ "error": … }` body with status 500.
pub async fn generate_evolution(
    State(state): State<AppState>,
    Json(req): Json<GenerateEvolutionRequest>,
) -> Result<Json<GenerateEvolutionResponse>, ApiError> {
    let evolution = state.generator.generate(&req.patient_data).await?;
    Ok(Json(GenerateEvolutionResponse { evolution }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_body_uses_patient_data_key() {
        let raw = serde_json::json!({
            "patientData": {
                "name": "Juan Pérez",
                "diagnosis": "Neumonía",
                "vitals": { "bp": "110/70", "hr": "110" }
            }
        });

        let req: GenerateEvolutionRequest = serde_json::from_value(raw).unwrap();
        assert_eq!(req.patient_data.name.as_deref(), Some("Juan Pérez"));
        assert_eq!(req.patient_data.vitals.hr.as_deref(), Some("110"));
        assert!(req.patient_data.subjective.is_none());
    }

    #[test]
    fn response_body_uses_evolution_key() {
        let response = GenerateEvolutionResponse {
            evolution: "SUBJETIVO: …".to_string(),
        };
        let value = serde_json::to_value(&response).unwrap();
        assert!(value.get("evolution").is_some());
    }
}
