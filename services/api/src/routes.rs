use crate::infra::{deserialize_date, deserialize_optional_date, AppState, DirectoryStores};
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::Extension;
use axum::Json;
use chrono::{DateTime, NaiveDate, Utc};
use plenum::error::AppError;
use plenum::workflows::assignment::AssignmentWeights;
use plenum::workflows::directory::{
    crud_router, AccessPolicy, CommitteeEntity, ConferenceEntity, DelegationEntity,
    PaperDirectoryEntity, ParticipantEntity,
};
use plenum::workflows::forms::{export_participants, CsvExportSettings, ExportError, ParticipantRow};
use plenum::workflows::papers::{paper_router, PaperRepository, PaperService};
use plenum::workflows::registration::{
    age_at_conference, is_of_age, postal_status, registration_window, waiting_list_pressure,
    ConferenceLifecycle, ConsentSnapshot, ConsentState, RegistrationWindow, SeatCounts,
    WaitingListPressure,
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::sync::Arc;

#[derive(Debug, Deserialize)]
pub(crate) struct RegistrationReportRequest {
    pub(crate) lifecycle: ConferenceLifecycle,
    pub(crate) registration_deadline: DateTime<Utc>,
    #[serde(deserialize_with = "deserialize_date")]
    pub(crate) conference_start: NaiveDate,
    #[serde(default, deserialize_with = "deserialize_optional_date")]
    pub(crate) birth_date: Option<NaiveDate>,
    pub(crate) seats: SeatCounts,
    #[serde(default)]
    pub(crate) consents: Option<ConsentSnapshot>,
    #[serde(default)]
    pub(crate) now: Option<DateTime<Utc>>,
}

#[derive(Debug, Serialize)]
pub(crate) struct RegistrationReportResponse {
    pub(crate) window: RegistrationWindow,
    pub(crate) window_label: &'static str,
    pub(crate) pressure: WaitingListPressure,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) age: Option<i32>,
    pub(crate) of_age: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) postal_status: Option<ConsentState>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ParticipantExportRequest {
    pub(crate) settings: CsvExportSettings,
    pub(crate) rows: Vec<ParticipantRow>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct WeighRequest {
    #[serde(default)]
    pub(crate) rating: Option<u32>,
    #[serde(default)]
    pub(crate) head_delegate: bool,
    #[serde(default)]
    pub(crate) wished: bool,
}

pub(crate) fn with_conference_routes<R>(
    papers: Arc<PaperService<R>>,
    stores: DirectoryStores,
    policy: AccessPolicy,
) -> axum::Router
where
    R: PaperRepository + 'static,
{
    paper_router(papers)
        .merge(crud_router::<ConferenceEntity, _>(stores.conferences, policy))
        .merge(crud_router::<CommitteeEntity, _>(stores.committees, policy))
        .merge(crud_router::<DelegationEntity, _>(stores.delegations, policy))
        .merge(crud_router::<ParticipantEntity, _>(stores.participants, policy))
        .merge(crud_router::<PaperDirectoryEntity, _>(stores.papers, policy))
        .route("/health", axum::routing::get(healthcheck))
        .route("/ready", axum::routing::get(readiness_endpoint))
        .route("/metrics", axum::routing::get(metrics_endpoint))
        .route(
            "/api/v1/registration/report",
            axum::routing::post(registration_report_endpoint),
        )
        .route(
            "/api/v1/participants/export",
            axum::routing::post(participant_export_endpoint),
        )
        .route(
            "/api/v1/assignment/weights",
            axum::routing::get(get_weights_endpoint).put(put_weights_endpoint),
        )
        .route(
            "/api/v1/assignment/preview",
            axum::routing::post(weigh_preview_endpoint),
        )
}

pub(crate) async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

pub(crate) async fn readiness_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(std::sync::atomic::Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

pub(crate) async fn metrics_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}

pub(crate) async fn registration_report_endpoint(
    Json(payload): Json<RegistrationReportRequest>,
) -> Json<RegistrationReportResponse> {
    let RegistrationReportRequest {
        lifecycle,
        registration_deadline,
        conference_start,
        birth_date,
        seats,
        consents,
        now,
    } = payload;

    let now = now.unwrap_or_else(Utc::now);
    let window = registration_window(lifecycle, registration_deadline, now);
    let pressure = waiting_list_pressure(seats);
    let age = birth_date.and_then(|birth| age_at_conference(birth, conference_start));
    let of_age = birth_date
        .map(|birth| is_of_age(birth, conference_start))
        .unwrap_or(false);
    let postal_status = consents
        .as_ref()
        .map(|snapshot| postal_status(snapshot, of_age));

    Json(RegistrationReportResponse {
        window,
        window_label: window.label(),
        pressure,
        age,
        of_age,
        postal_status,
    })
}

pub(crate) async fn participant_export_endpoint(
    Json(payload): Json<ParticipantExportRequest>,
) -> Result<impl IntoResponse, AppError> {
    let csv = export_participants(&payload.settings, &payload.rows).map_err(|err| match err {
        ExportError::Settings(inner) => AppError::Validation(inner),
        other => AppError::Export(other),
    })?;

    Ok((
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/csv")],
        csv,
    ))
}

pub(crate) async fn get_weights_endpoint(
    Extension(state): Extension<AppState>,
) -> Json<AssignmentWeights> {
    let weights = *state.weights.lock().expect("weights mutex poisoned");
    Json(weights)
}

pub(crate) async fn put_weights_endpoint(
    Extension(state): Extension<AppState>,
    Json(updated): Json<AssignmentWeights>,
) -> Json<AssignmentWeights> {
    let mut guard = state.weights.lock().expect("weights mutex poisoned");
    *guard = updated;
    Json(*guard)
}

pub(crate) async fn weigh_preview_endpoint(
    Extension(state): Extension<AppState>,
    Json(payload): Json<WeighRequest>,
) -> Json<serde_json::Value> {
    let weights = *state.weights.lock().expect("weights mutex poisoned");
    let weight = weights.weigh(payload.rating, payload.head_delegate, payload.wished);
    Json(json!({ "weight": weight }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use metrics_exporter_prometheus::PrometheusBuilder;
    use std::sync::atomic::AtomicBool;
    use std::sync::Mutex;

    fn test_state() -> AppState {
        let handle = PrometheusBuilder::new().build_recorder().handle();
        AppState {
            readiness: Arc::new(AtomicBool::new(true)),
            metrics: Arc::new(handle),
            weights: Arc::new(Mutex::new(AssignmentWeights::default())),
        }
    }

    fn report_request() -> RegistrationReportRequest {
        RegistrationReportRequest {
            lifecycle: ConferenceLifecycle::ParticipantRegistration,
            registration_deadline: Utc.with_ymd_and_hms(2026, 8, 1, 12, 0, 0).unwrap(),
            conference_start: NaiveDate::from_ymd_opt(2026, 10, 2).expect("valid date"),
            birth_date: Some(NaiveDate::from_ymd_opt(2009, 10, 3).expect("valid date")),
            seats: SeatCounts {
                total_seats: 200,
                participants: 120,
                waiting_list: 3,
            },
            consents: Some(ConsentSnapshot {
                terms: ConsentState::Done,
                guardian_consent: ConsentState::Pending,
                media_consent: ConsentState::Done,
            }),
            now: Some(Utc.with_ymd_and_hms(2026, 7, 1, 0, 0, 0).unwrap()),
        }
    }

    #[tokio::test]
    async fn registration_report_derives_window_age_and_postal_status() {
        let Json(body) = registration_report_endpoint(Json(report_request())).await;

        assert_eq!(body.window, RegistrationWindow::Open);
        assert_eq!(body.pressure, WaitingListPressure::Vacancies);
        assert_eq!(body.age, Some(16));
        assert!(!body.of_age);
        assert_eq!(body.postal_status, Some(ConsentState::Pending));
    }

    #[tokio::test]
    async fn registration_report_skips_guardian_consent_for_adults() {
        let mut request = report_request();
        request.birth_date = Some(NaiveDate::from_ymd_opt(2000, 1, 1).expect("valid date"));

        let Json(body) = registration_report_endpoint(Json(request)).await;

        assert!(body.of_age);
        assert_eq!(body.postal_status, Some(ConsentState::Done));
    }

    #[tokio::test]
    async fn participant_export_rejects_bad_settings_as_validation() {
        let request = ParticipantExportRequest {
            settings: CsvExportSettings {
                delimiter: '|',
                columns: vec![plenum::workflows::forms::ParticipantColumn::Id],
                include_header: true,
            },
            rows: Vec::new(),
        };

        let result = participant_export_endpoint(Json(request)).await;
        assert!(matches!(result, Err(AppError::Validation(_))));
    }

    #[tokio::test]
    async fn participant_export_renders_csv() {
        let request = ParticipantExportRequest {
            settings: CsvExportSettings {
                delimiter: ';',
                columns: vec![
                    plenum::workflows::forms::ParticipantColumn::Id,
                    plenum::workflows::forms::ParticipantColumn::PostalStatus,
                ],
                include_header: true,
            },
            rows: vec![ParticipantRow {
                id: "p-001".to_string(),
                display_name: "Ada Example".to_string(),
                delegation: "Kingdom of Norway".to_string(),
                birth_date: NaiveDate::from_ymd_opt(2008, 7, 14).expect("valid date"),
                age: Some(18),
                postal_status: ConsentState::Done,
            }],
        };

        let response = participant_export_endpoint(Json(request))
            .await
            .expect("export succeeds")
            .into_response();
        assert_eq!(response.status(), StatusCode::OK);

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("body is readable");
        let csv = String::from_utf8(bytes.to_vec()).expect("body is utf-8");
        assert!(csv.starts_with("id;postal_status"));
        assert!(csv.contains("p-001;Done"));
    }

    #[tokio::test]
    async fn weights_update_feeds_the_preview() {
        let state = test_state();

        let replacement = AssignmentWeights::new(4, 2.0, 1.0, 3.0);
        let Json(stored) =
            put_weights_endpoint(Extension(state.clone()), Json(replacement)).await;
        assert_eq!(stored, replacement);

        let Json(preview) = weigh_preview_endpoint(
            Extension(state),
            Json(WeighRequest {
                rating: None,
                head_delegate: true,
                wished: true,
            }),
        )
        .await;

        let weight = preview
            .get("weight")
            .and_then(serde_json::Value::as_f64)
            .expect("weight present");
        assert!((weight - 9.0).abs() < f64::EPSILON);
    }
}
