//! # API REST
//!
//! REST API implementation for patientor.
//!
//! Handles:
//! - HTTP endpoints with axum
//! - OpenAPI documentation
//! - REST-specific concerns (JSON bodies, status codes, CORS)
//!
//! Request bodies for new patients and entries are taken as untyped JSON and handed to the
//! core parsers, so rejection messages come from validation rather than from axum.

#![warn(rust_2018_idioms)]

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
    routing::get,
    Router,
};
use entries::EntryParser;
use patientor_core::{
    Diagnosis, Entry, NewPatient, NonSensitivePatient, Patient, PatientError, PatientService,
    RecordId,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tower_http::cors::CorsLayer;
use utoipa::{OpenApi, ToSchema};

type ApiResult<T> = Result<Json<T>, (StatusCode, String)>;

/// Application state shared across REST API handlers.
#[derive(Clone)]
struct AppState {
    patient_service: PatientService,
}

/// Health check response body.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct HealthRes {
    pub ok: bool,
    pub message: String,
}

#[derive(OpenApi)]
#[openapi(
    paths(
        health,
        ping,
        list_diagnoses,
        list_patients,
        get_patient,
        create_patient,
        add_entry,
    ),
    components(schemas(HealthRes))
)]
pub struct ApiDoc;

/// Build the REST router over `patient_service`.
pub fn router(patient_service: PatientService) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/api/ping", get(ping))
        .route("/api/diagnoses", get(list_diagnoses))
        .route("/api/patients", get(list_patients).post(create_patient))
        .route("/api/patients/:id", get(get_patient))
        .route("/api/patients/:id/entries", axum::routing::post(add_entry))
        .route("/api-docs/openapi.json", get(openapi_json))
        .layer(CorsLayer::permissive())
        .with_state(AppState { patient_service })
}

#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Health check response", body = HealthRes)
    )
)]
/// Health check endpoint for the REST API
///
/// Used for monitoring and load balancer health checks.
#[axum::debug_handler]
async fn health(State(_state): State<AppState>) -> Json<HealthRes> {
    Json(HealthRes {
        ok: true,
        message: "Patientor REST API is alive".into(),
    })
}

#[utoipa::path(
    get,
    path = "/api/ping",
    responses(
        (status = 200, description = "Plain-text pong")
    )
)]
async fn ping() -> &'static str {
    "pong"
}

#[utoipa::path(
    get,
    path = "/api/diagnoses",
    responses(
        (status = 200, description = "Diagnosis catalog")
    )
)]
#[axum::debug_handler]
async fn list_diagnoses(State(state): State<AppState>) -> Json<Vec<Diagnosis>> {
    Json(state.patient_service.diagnoses().to_vec())
}

#[utoipa::path(
    get,
    path = "/api/patients",
    responses(
        (status = 200, description = "Patients without ssn or entries"),
        (status = 500, description = "Internal server error")
    )
)]
/// List all patients without sensitive fields.
#[axum::debug_handler]
async fn list_patients(State(state): State<AppState>) -> ApiResult<Vec<NonSensitivePatient>> {
    state
        .patient_service
        .list_non_sensitive()
        .map(Json)
        .map_err(into_response_error)
}

#[utoipa::path(
    get,
    path = "/api/patients/{id}",
    params(("id" = String, Path, description = "Patient identifier")),
    responses(
        (status = 200, description = "Full patient record"),
        (status = 400, description = "Malformed identifier"),
        (status = 404, description = "Patient not found")
    )
)]
/// Fetch one patient with all fields and entries.
#[axum::debug_handler]
async fn get_patient(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Patient> {
    let id = RecordId::parse(&id).map_err(|e| into_response_error(e.into()))?;

    match state.patient_service.patient_by_id(&id) {
        Ok(Some(patient)) => Ok(Json(patient)),
        Ok(None) => Err(into_response_error(PatientError::PatientNotFound(id))),
        Err(e) => Err(into_response_error(e)),
    }
}

#[utoipa::path(
    post,
    path = "/api/patients",
    responses(
        (status = 200, description = "Patient created"),
        (status = 400, description = "Invalid patient data")
    )
)]
/// Create a patient from an untyped JSON body.
#[axum::debug_handler]
async fn create_patient(
    State(state): State<AppState>,
    Json(candidate): Json<Value>,
) -> ApiResult<Patient> {
    let new_patient = NewPatient::parse(&candidate).map_err(into_response_error)?;
    state
        .patient_service
        .add_patient(new_patient)
        .map(Json)
        .map_err(into_response_error)
}

#[utoipa::path(
    post,
    path = "/api/patients/{id}/entries",
    params(("id" = String, Path, description = "Patient identifier")),
    responses(
        (status = 200, description = "Entry stored"),
        (status = 400, description = "Entry rejected by validation"),
        (status = 404, description = "Patient not found")
    )
)]
/// Validate an untyped entry and append it to a patient's record.
#[axum::debug_handler]
async fn add_entry(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(candidate): Json<Value>,
) -> ApiResult<Entry> {
    let id = RecordId::parse(&id).map_err(|e| into_response_error(e.into()))?;
    let new_entry = EntryParser::parse(&candidate).map_err(|e| into_response_error(e.into()))?;

    state
        .patient_service
        .add_entry(&id, new_entry)
        .map(Json)
        .map_err(into_response_error)
}

async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

/// Map a core error onto a status code and response text.
fn into_response_error(err: PatientError) -> (StatusCode, String) {
    let status = match &err {
        PatientError::InvalidInput(_)
        | PatientError::InvalidEntry(_)
        | PatientError::InvalidId(_)
        | PatientError::Translation { .. } => StatusCode::BAD_REQUEST,
        PatientError::PatientNotFound(_) => StatusCode::NOT_FOUND,
        PatientError::SeedRead(_) | PatientError::SeedParse(_) | PatientError::StorePoisoned => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    };

    if status.is_server_error() {
        tracing::error!("request failed: {:?}", err);
        return (status, "Internal error".to_string());
    }

    tracing::warn!("request rejected: {}", err);
    (status, err.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{header, Request};
    use http_body_util::BodyExt;
    use patientor_core::{Gender, SeedData};
    use serde_json::json;
    use tower::ServiceExt;

    const PATIENT_ID: &str = "d2773336-f723-11e9-8f0b-362b9e155667";

    fn seeded_service() -> PatientService {
        let seed = SeedData::from_json(&format!(
            r#"{{ "diagnoses": [ {{ "code": "Z57.1", "name": "Occupational exposure to radiation" }} ],
                 "patients": [ {{ "id": "{PATIENT_ID}", "name": "John McClane",
                   "dateOfBirth": "1986-07-09", "ssn": "090786-122X", "gender": "male",
                   "occupation": "New york city cop" }} ] }}"#
        ))
        .expect("seed");
        PatientService::from_seed(seed)
    }

    async fn send(app: Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Vec<u8>) {
        let mut builder = Request::builder().method(method).uri(uri);
        let body = match body {
            Some(value) => {
                builder = builder.header(header::CONTENT_TYPE, "application/json");
                Body::from(value.to_string())
            }
            None => Body::empty(),
        };

        let response = app
            .oneshot(builder.body(body).expect("request"))
            .await
            .expect("response");
        let status = response.status();
        let bytes = response
            .into_body()
            .collect()
            .await
            .expect("body")
            .to_bytes()
            .to_vec();
        (status, bytes)
    }

    fn health_check_entry() -> Value {
        json!({
            "description": "Well done",
            "date": "2024-01-01",
            "specialist": "Dr. Who",
            "type": "HealthCheck",
            "diagnosisCodes": [],
            "healthCheckRating": 0
        })
    }

    #[tokio::test]
    async fn ping_returns_pong() {
        let (status, body) = send(router(PatientService::new()), "GET", "/api/ping", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, b"pong");
    }

    #[tokio::test]
    async fn health_reports_ok() {
        let (status, body) = send(router(PatientService::new()), "GET", "/health", None).await;
        assert_eq!(status, StatusCode::OK);
        let res: HealthRes = serde_json::from_slice(&body).expect("health json");
        assert!(res.ok);
    }

    #[tokio::test]
    async fn lists_patients_without_sensitive_fields() {
        let (status, body) = send(router(seeded_service()), "GET", "/api/patients", None).await;
        assert_eq!(status, StatusCode::OK);

        let value: Value = serde_json::from_slice(&body).expect("json");
        assert_eq!(value[0]["id"], json!(PATIENT_ID));
        assert!(value[0].get("ssn").is_none());
        assert!(value[0].get("entries").is_none());
    }

    #[tokio::test]
    async fn lists_diagnoses() {
        let (status, body) = send(router(seeded_service()), "GET", "/api/diagnoses", None).await;
        assert_eq!(status, StatusCode::OK);

        let value: Value = serde_json::from_slice(&body).expect("json");
        assert_eq!(value[0]["code"], json!("Z57.1"));
    }

    #[tokio::test]
    async fn get_patient_handles_found_missing_and_malformed_ids() {
        let app = router(seeded_service());

        let (status, body) =
            send(app.clone(), "GET", &format!("/api/patients/{PATIENT_ID}"), None).await;
        assert_eq!(status, StatusCode::OK);
        let patient: Patient = serde_json::from_slice(&body).expect("patient json");
        assert_eq!(patient.gender, Gender::Male);

        let missing = RecordId::new();
        let (status, _) = send(app.clone(), "GET", &format!("/api/patients/{missing}"), None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let (status, _) = send(app, "GET", "/api/patients/not-an-id", None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn creates_patient() {
        let service = PatientService::new();
        let body = json!({
            "name": "Hans Gruber",
            "dateOfBirth": "1970-04-25",
            "ssn": "250470-555L",
            "gender": "other",
            "occupation": "Technician"
        });

        let (status, bytes) = send(router(service.clone()), "POST", "/api/patients", Some(body)).await;
        assert_eq!(status, StatusCode::OK);

        let created: Patient = serde_json::from_slice(&bytes).expect("patient json");
        assert!(service.patient_by_id(&created.id).expect("lookup").is_some());
    }

    #[tokio::test]
    async fn rejects_invalid_patient() {
        let body = json!({ "name": "Hans Gruber" });
        let (status, bytes) =
            send(router(PatientService::new()), "POST", "/api/patients", Some(body)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(String::from_utf8_lossy(&bytes).contains("missing field"));
    }

    #[tokio::test]
    async fn adds_valid_entry() {
        let service = seeded_service();
        let uri = format!("/api/patients/{PATIENT_ID}/entries");

        let (status, bytes) =
            send(router(service.clone()), "POST", &uri, Some(health_check_entry())).await;
        assert_eq!(status, StatusCode::OK);

        let value: Value = serde_json::from_slice(&bytes).expect("entry json");
        assert_eq!(value["type"], json!("HealthCheck"));
        assert_eq!(value["healthCheckRating"], json!(0));
        assert!(value["id"].is_string());

        let id = RecordId::parse(PATIENT_ID).expect("id");
        let patient = service.patient_by_id(&id).expect("lookup").expect("exists");
        assert_eq!(patient.entries.len(), 1);
    }

    #[tokio::test]
    async fn rejected_entry_returns_validation_message() {
        let mut entry = health_check_entry();
        entry["type"] = json!("Hospital");
        let uri = format!("/api/patients/{PATIENT_ID}/entries");

        let (status, bytes) = send(router(seeded_service()), "POST", &uri, Some(entry)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(
            String::from_utf8_lossy(&bytes),
            "Incorrect data: some fields are missing"
        );
    }

    #[tokio::test]
    async fn entry_for_unknown_patient_is_not_found() {
        let uri = format!("/api/patients/{}/entries", RecordId::new());
        let (status, _) =
            send(router(seeded_service()), "POST", &uri, Some(health_check_entry())).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn serves_openapi_document() {
        let (status, body) =
            send(router(PatientService::new()), "GET", "/api-docs/openapi.json", None).await;
        assert_eq!(status, StatusCode::OK);

        let value: Value = serde_json::from_slice(&body).expect("openapi json");
        assert!(value["paths"].get("/api/patients/{id}/entries").is_some());
    }
}
