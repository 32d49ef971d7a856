use crate::infra::{deserialize_date, deserialize_optional_date, AppState};
use crate::reports::{
    journey_schedule, profile_completeness, variance_view, JourneyScheduleInput,
    JourneyScheduleView, VarianceView,
};
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Extension, Json, Router};
use chrono::NaiveDate;
use onboarding_ai::error::AppError;
use onboarding_ai::workflows::completeness::{
    ExtractedItem, ManualProfile, ProfileCompleteness, ProfileKind,
};
use onboarding_ai::workflows::journey::{PhaseRecord, PhaseType};
use serde::Deserialize;
use serde_json::json;
use tracing::debug;

#[derive(Debug, Deserialize)]
pub(crate) struct JourneyScheduleRequest {
    pub(crate) current_phase: String,
    #[serde(deserialize_with = "deserialize_date")]
    pub(crate) current_phase_start: NaiveDate,
    #[serde(default, deserialize_with = "deserialize_optional_date")]
    pub(crate) journey_start: Option<NaiveDate>,
    #[serde(default)]
    pub(crate) records: Vec<PhaseRecord>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct VarianceRequest {
    pub(crate) planned_days: u32,
    pub(crate) actual_days: u32,
}

#[derive(Debug, Deserialize)]
pub(crate) struct CompletenessRequest {
    pub(crate) profile: String,
    #[serde(default)]
    pub(crate) items: Vec<ExtractedItem>,
    #[serde(default)]
    pub(crate) manual: Option<ManualProfile>,
    #[serde(default)]
    pub(crate) items_csv: Option<String>,
}

pub(crate) fn router() -> Router {
    Router::new()
        .route("/health", get(healthcheck))
        .route("/ready", get(readiness_endpoint))
        .route("/metrics", get(metrics_endpoint))
        .route("/api/v1/journey/schedule", post(journey_schedule_endpoint))
        .route("/api/v1/journey/variance", post(variance_endpoint))
        .route("/api/v1/profiles/completeness", post(completeness_endpoint))
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

pub(crate) async fn journey_schedule_endpoint(
    Json(payload): Json<JourneyScheduleRequest>,
) -> Result<Json<JourneyScheduleView>, AppError> {
    let JourneyScheduleRequest {
        current_phase,
        current_phase_start,
        journey_start,
        records,
    } = payload;

    let current_phase: PhaseType = current_phase.parse()?;
    debug!(%current_phase, %current_phase_start, records = records.len(), "scheduling journey");

    let view = journey_schedule(JourneyScheduleInput {
        current_phase,
        current_phase_start,
        journey_start,
        records,
    })?;
    Ok(Json(view))
}

pub(crate) async fn variance_endpoint(Json(payload): Json<VarianceRequest>) -> Json<VarianceView> {
    Json(variance_view(payload.planned_days, payload.actual_days))
}

pub(crate) async fn completeness_endpoint(
    Json(payload): Json<CompletenessRequest>,
) -> Result<Json<ProfileCompleteness>, AppError> {
    let CompletenessRequest {
        profile,
        items,
        manual,
        items_csv,
    } = payload;

    let profile: ProfileKind = profile.parse()?;
    debug!(?profile, items = items.len(), manual = manual.is_some(), "scoring profile");

    let report = profile_completeness(profile, items, items_csv.as_deref(), manual.as_ref())?;
    Ok(Json(report))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{to_bytes, Body};
    use axum::http::Request;
    use metrics_exporter_prometheus::PrometheusBuilder;
    use std::sync::atomic::AtomicBool;
    use std::sync::Arc;
    use tower::ServiceExt;

    fn test_app(ready: bool) -> Router {
        let handle = PrometheusBuilder::new().build_recorder().handle();
        router().layer(Extension(AppState {
            readiness: Arc::new(AtomicBool::new(ready)),
            metrics: Arc::new(handle),
        }))
    }

    async fn post_json(
        app: Router,
        uri: &str,
        body: serde_json::Value,
    ) -> (StatusCode, serde_json::Value) {
        let request = Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .expect("request builds");

        let response = app.oneshot(request).await.expect("router responds");
        let status = response.status();
        let bytes = to_bytes(response.into_body(), 1024 * 1024)
            .await
            .expect("body reads");
        let value = serde_json::from_slice(&bytes).expect("json body");
        (status, value)
    }

    #[tokio::test]
    async fn readiness_reports_initializing_until_bound() {
        let response = test_app(false)
            .oneshot(
                Request::builder()
                    .uri("/ready")
                    .body(Body::empty())
                    .expect("request builds"),
            )
            .await
            .expect("router responds");
        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);

        let response = test_app(true)
            .oneshot(
                Request::builder()
                    .uri("/ready")
                    .body(Body::empty())
                    .expect("request builds"),
            )
            .await
            .expect("router responds");
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn schedule_endpoint_projects_go_live() {
        let (status, body) = post_json(
            test_app(true),
            "/api/v1/journey/schedule",
            json!({
                "current_phase": "SALES_HANDOVER",
                "current_phase_start": "2026-02-09"
            }),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["planned_phase_end"], "2026-02-11");
        assert_eq!(body["current_phase_label"], "Sales Handover");
        assert_eq!(body["timeline"]["phases"].as_array().map(Vec::len), Some(8));
        assert_eq!(body["timeline"]["phases"][0]["status"], "in_progress");
    }

    #[tokio::test]
    async fn schedule_endpoint_rejects_unknown_phases() {
        let (status, body) = post_json(
            test_app(true),
            "/api/v1/journey/schedule",
            json!({
                "current_phase": "BUILD",
                "current_phase_start": "2026-02-09"
            }),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "invalid request: unknown phase type 'BUILD'");
    }

    #[tokio::test]
    async fn schedule_endpoint_rejects_inverted_records() {
        let (status, _) = post_json(
            test_app(true),
            "/api/v1/journey/schedule",
            json!({
                "current_phase": "KICKOFF",
                "current_phase_start": "2026-02-12",
                "journey_start": "2026-02-09",
                "records": [
                    { "phase": "SALES_HANDOVER", "started_on": "2026-02-11", "completed_on": "2026-02-09" }
                ]
            }),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn schedule_endpoint_rejects_a_record_with_another_start() {
        let (status, body) = post_json(
            test_app(true),
            "/api/v1/journey/schedule",
            json!({
                "current_phase": "DESIGN_WEEK",
                "current_phase_start": "2026-02-23",
                "journey_start": "2026-02-02",
                "records": [
                    { "phase": "DESIGN_WEEK", "started_on": "2026-02-09" }
                ]
            }),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(
            body["error"],
            "invalid request: Design Week record starts on 2026-02-09 but the current phase start is 2026-02-23"
        );
    }

    #[tokio::test]
    async fn schedule_endpoint_rejects_a_completed_current_phase() {
        let (status, body) = post_json(
            test_app(true),
            "/api/v1/journey/schedule",
            json!({
                "current_phase": "KICKOFF",
                "current_phase_start": "2026-02-09",
                "records": [
                    { "phase": "KICKOFF", "started_on": "2026-02-09", "completed_on": "2026-02-10" }
                ]
            }),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(
            body["error"],
            "invalid request: Kickoff completed on 2026-02-10, so it is no longer the current phase"
        );
    }

    #[tokio::test]
    async fn schedule_endpoint_rejects_records_for_later_phases() {
        let (status, body) = post_json(
            test_app(true),
            "/api/v1/journey/schedule",
            json!({
                "current_phase": "KICKOFF",
                "current_phase_start": "2026-02-09",
                "records": [
                    { "phase": "DESIGN_WEEK", "started_on": "2026-02-11" }
                ]
            }),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(
            body["error"],
            "invalid request: a Design Week record puts the journey past the current phase Kickoff"
        );
    }

    #[tokio::test]
    async fn schedule_endpoint_reports_one_current_phase_and_projection() {
        let (status, body) = post_json(
            test_app(true),
            "/api/v1/journey/schedule",
            json!({
                "current_phase": "DESIGN_WEEK",
                "current_phase_start": "2026-02-16",
                "journey_start": "2026-02-09",
                "records": [
                    { "phase": "KICKOFF", "started_on": "2026-02-11", "completed_on": "2026-02-13" },
                    { "phase": "DESIGN_WEEK", "started_on": "2026-02-16" }
                ]
            }),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["current_phase"], "DESIGN_WEEK");
        assert_eq!(body["current_phase"], body["timeline"]["current_phase"]);
        // 21 business days after 2026-02-16
        assert_eq!(body["projected_completion"], "2026-03-17");
        assert_eq!(
            body["projected_completion"],
            body["timeline"]["projected_go_live"]
        );
    }

    #[tokio::test]
    async fn variance_endpoint_labels_the_difference() {
        let Json(body) = variance_endpoint(Json(VarianceRequest {
            planned_days: 10,
            actual_days: 8,
        }))
        .await;

        assert_eq!(body.variance.days, -2);
        assert_eq!(body.variance.percent, -20);
        assert_eq!(body.label, "2 days early");
    }

    #[tokio::test]
    async fn completeness_endpoint_scores_items_and_manual_fields() {
        let (status, body) = post_json(
            test_app(true),
            "/api/v1/profiles/completeness",
            json!({
                "profile": "business",
                "items": [
                    { "id": "a", "type": "HAPPY_PATH_STEP", "status": "APPROVED" },
                    { "id": "b", "type": "EXCEPTION_CASE", "status": "APPROVED" }
                ],
                "manual": {
                    "business": { "channels": [ { "name": "Email" } ] }
                }
            }),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["profile"], "business");
        let sections = body["sections"].as_array().expect("sections");
        let channels = sections
            .iter()
            .find(|entry| entry["section"] == "channels")
            .expect("channels section");
        assert_eq!(channels["percentage"], 100);
        let process = sections
            .iter()
            .find(|entry| entry["section"] == "process")
            .expect("process section");
        assert_eq!(process["percentage"], 40);
        assert_eq!(process["missing_types"], json!(["BUSINESS_RULE"]));
    }

    #[tokio::test]
    async fn completeness_endpoint_rejects_unknown_profiles() {
        let (status, body) = post_json(
            test_app(true),
            "/api/v1/profiles/completeness",
            json!({ "profile": "financial" }),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "invalid request: unknown profile 'financial'");
    }
}
