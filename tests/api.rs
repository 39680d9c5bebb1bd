//! End-to-end tests against a running server (`cargo run`) with a migrated
//! database. Ignored by default; run with `cargo test -- --ignored`.

use reqwest::Client;
use serde_json::{json, Value};

const BASE_URL: &str = "http://localhost:3000";

#[tokio::test]
#[ignore = "requires a running server and database"]
async fn health_check_responds() {
    let client = Client::new();

    let response = client
        .get(format!("{}/health", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 200);
}

#[tokio::test]
#[ignore = "requires a running server and database"]
async fn units_include_bed_grid_and_occupancy() {
    let client = Client::new();

    let response = client
        .get(format!("{}/api/units", BASE_URL))
        .send()
        .await
        .expect("Failed to list units");

    assert_eq!(response.status(), 200);

    let units: Vec<Value> = response.json().await.expect("Failed to parse response");
    for unit in &units {
        assert!(unit.get("beds").is_some());
        let occupancy = &unit["occupancy"];
        assert!(occupancy["total"].as_u64().is_some());
        assert!(occupancy["available"].as_u64().is_some());
    }
}

#[tokio::test]
#[ignore = "requires a running server and database"]
async fn admission_flow_occupies_and_frees_the_bed() {
    let client = Client::new();

    // Find an available bed in any unit
    let units: Vec<Value> = client
        .get(format!("{}/api/units", BASE_URL))
        .send()
        .await
        .expect("Failed to list units")
        .json()
        .await
        .expect("Failed to parse units");

    let bed_id = units
        .iter()
        .flat_map(|u| u["beds"].as_array().cloned().unwrap_or_default())
        .find(|b| b["status"] == "AVAILABLE")
        .map(|b| b["id"].as_str().unwrap().to_string())
        .expect("No available bed to admit into");

    // Admit
    let response = client
        .post(format!("{}/api/patients", BASE_URL))
        .json(&json!({
            "bedId": bed_id,
            "name": "Juan Carlos",
            "lastName": "Pérez González",
            "gender": "MASCULINO",
            "status": "UCI",
            "diagnoses": [
                { "code": "J18.9", "description": "Neumonía no especificada", "isPrimary": true }
            ]
        }))
        .send()
        .await
        .expect("Failed to admit patient");

    assert_eq!(response.status(), 201);
    let patient: Value = response.json().await.expect("Failed to parse patient");
    let patient_id = patient["id"].as_str().unwrap().to_string();
    assert!(patient["dischargeDate"].is_null());

    // The bed the patient landed in must now read OCCUPIED
    let detail: Value = client
        .get(format!("{}/api/patients/{}", BASE_URL, patient_id))
        .send()
        .await
        .expect("Failed to fetch patient")
        .json()
        .await
        .expect("Failed to parse patient detail");

    assert_eq!(detail["bed"]["status"], "OCCUPIED");
    assert_eq!(detail["diagnoses"][0]["isPrimary"], true);

    // Discharge frees the bed and stamps dischargeDate
    let discharged: Value = client
        .put(format!("{}/api/patients/{}/status", BASE_URL, patient_id))
        .json(&json!({ "status": "ALTA" }))
        .send()
        .await
        .expect("Failed to discharge patient")
        .json()
        .await
        .expect("Failed to parse discharge response");

    assert_eq!(discharged["status"], "ALTA");
    assert!(!discharged["dischargeDate"].is_null());
}

#[tokio::test]
#[ignore = "requires a running server and database"]
async fn admitting_into_an_occupied_bed_is_rejected() {
    let client = Client::new();

    let units: Vec<Value> = client
        .get(format!("{}/api/units", BASE_URL))
        .send()
        .await
        .expect("Failed to list units")
        .json()
        .await
        .expect("Failed to parse units");

    let Some(occupied_bed) = units
        .iter()
        .flat_map(|u| u["beds"].as_array().cloned().unwrap_or_default())
        .find(|b| b["status"] == "OCCUPIED")
    else {
        return; // nothing occupied to collide with
    };

    let response = client
        .post(format!("{}/api/patients", BASE_URL))
        .json(&json!({
            "bedId": occupied_bed["id"],
            "name": "María Elena",
            "lastName": "González",
            "status": "HOSPITALIZADO"
        }))
        .send()
        .await
        .expect("Failed to send admission");

    assert_eq!(response.status(), 400);
    let body: Value = response.json().await.expect("Failed to parse error body");
    assert!(body.get("error").is_some());
}

#[tokio::test]
#[ignore = "requires a running server and database"]
async fn generate_evolution_contract() {
    let client = Client::new();

    let response = client
        .post(format!("{}/api/generate-evolution", BASE_URL))
        .json(&json!({
            "patientData": {
                "name": "Juan Pérez",
                "age": "45",
                "gender": "Masculino",
                "diagnosis": "Neumonía",
                "vitals": {
                    "bp": "110/70", "hr": "110", "rr": "28",
                    "temp": "38.5", "sat": "88"
                },
                "subjective": "Paciente febril, disnea de reposo.",
                "objective": "Crepitaciones en base derecha."
            }
        }))
        .send()
        .await
        .expect("Failed to send generation request");

    let status = response.status();
    let body: Value = response.json().await.expect("Failed to parse body");

    // Success carries the full text; any failure carries a single
    // user-facing error and no partial result.
    if status == 200 {
        let evolution = body["evolution"].as_str().expect("evolution must be text");
        assert!(!evolution.trim().is_empty());
        assert!(body.get("error").is_none());
    } else {
        assert_eq!(status, 500);
        assert!(body["error"].as_str().is_some());
        assert!(body.get("evolution").is_none());
    }
}
