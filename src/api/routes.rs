use axum::{
    Json, Router,
    body::Bytes,
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post},
};
use serde::Serialize;

use super::{ApiError, AppState};
use crate::domain::{LocationEvent, VehicleStatus};
use crate::engine::Transition;

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/event", post(ingest_event))
        .route("/vehicle/{id}", get(vehicle_status))
        .with_state(state)
}

#[derive(Debug, Serialize)]
pub struct IngestResponse {
    pub transition: Option<Transition>,
}

async fn health() -> StatusCode {
    StatusCode::OK
}

/// Decodes the body as JSON whatever the request's content type says
async fn ingest_event(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<IngestResponse>, ApiError> {
    let event: LocationEvent =
        serde_json::from_slice(&body).map_err(|e| ApiError::InvalidJson(e.to_string()))?;
    event.validate()?;

    let transition = state.engine.process_event(&event);
    if let Some(t) = &transition {
        state.sink.publish(t);
    }

    Ok(Json(IngestResponse { transition }))
}

async fn vehicle_status(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<VehicleStatus>, ApiError> {
    state
        .engine
        .status(&id)
        .map(Json)
        .ok_or(ApiError::VehicleNotFound(id))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::default_zones;
    use crate::domain::ZoneSet;
    use crate::engine::{GeofenceEngine, MemorySink};
    use crate::store::InMemoryStore;
    use axum::body::Body;
    use axum::http::Request;
    use axum::response::Response;
    use http_body_util::BodyExt;
    use serde_json::{Value, json};
    use std::sync::Arc;
    use tower::ServiceExt;

    fn test_app() -> (Router, Arc<MemorySink>) {
        let engine = GeofenceEngine::new(
            ZoneSet::new(default_zones()).unwrap(),
            Arc::new(InMemoryStore::new()),
        );
        let sink = Arc::new(MemorySink::new());
        (router(AppState::new(engine, sink.clone())), sink)
    }

    async fn body_json(resp: Response) -> Value {
        let bytes = resp.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&bytes).unwrap()
    }

    fn post_event(body: &str) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri("/event")
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    fn get(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    #[tokio::test]
    async fn test_health() {
        let (app, _) = test_app();
        let resp = app.oneshot(get("/health")).await.unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_event_then_status() {
        let (app, sink) = test_app();

        let ping = json!({"vehicle_id": "taxi-1", "lat": 15.0, "lon": 15.0, "timestamp": 1700000000});
        let resp = app
            .clone()
            .oneshot(post_event(&ping.to_string()))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
        let body = body_json(resp).await;
        assert_eq!(body["transition"]["kind"], "enter");
        assert_eq!(body["transition"]["zone_id"], "zone_1");
        assert_eq!(sink.len(), 1);

        let resp = app.clone().oneshot(get("/vehicle/taxi-1")).await.unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
        let body = body_json(resp).await;
        assert_eq!(body["vehicle_id"], "taxi-1");
        assert_eq!(body["current_zone_id"], "zone_1");
        assert_eq!(body["last_seen"], "2023-11-14T22:13:20Z");

        let still_inside = json!({"vehicle_id": "taxi-1", "lat": 16.0, "lon": 16.0, "timestamp": 1700000010});
        let resp = app
            .oneshot(post_event(&still_inside.to_string()))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
        assert!(body_json(resp).await["transition"].is_null());
        assert_eq!(sink.len(), 1);
    }

    #[tokio::test]
    async fn test_event_accepted_without_json_content_type() {
        let (app, sink) = test_app();
        let body = r#"{"vehicle_id":"v1","lat":15.0,"lon":15.0,"timestamp":1}"#;

        let bare = Request::builder()
            .method("POST")
            .uri("/event")
            .body(Body::from(body))
            .unwrap();
        let resp = app.clone().oneshot(bare).await.unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(body_json(resp).await["transition"]["kind"], "enter");

        for content_type in ["application/x-www-form-urlencoded", "text/plain"] {
            let req = Request::builder()
                .method("POST")
                .uri("/event")
                .header("content-type", content_type)
                .body(Body::from(body))
                .unwrap();
            let resp = app.clone().oneshot(req).await.unwrap();
            assert_eq!(resp.status(), StatusCode::OK, "content-type: {content_type}");
        }

        assert_eq!(sink.len(), 1);
        let resp = app.oneshot(get("/vehicle/v1")).await.unwrap();
        assert_eq!(body_json(resp).await["current_zone_id"], "zone_1");
    }

    #[tokio::test]
    async fn test_unknown_vehicle_is_404() {
        let (app, _) = test_app();
        let resp = app.oneshot(get("/vehicle/ghost")).await.unwrap();
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
        assert_eq!(body_json(resp).await["code"], "NOT_FOUND");
    }

    #[tokio::test]
    async fn test_outside_vehicle_is_found() {
        let (app, sink) = test_app();
        let ping = json!({"vehicle_id": "v2", "lat": 50.0, "lon": 50.0, "timestamp": 1});
        app.clone()
            .oneshot(post_event(&ping.to_string()))
            .await
            .unwrap();

        let resp = app.oneshot(get("/vehicle/v2")).await.unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(body_json(resp).await["current_zone_id"], "");
        assert!(sink.is_empty());
    }

    #[tokio::test]
    async fn test_malformed_events_rejected() {
        let (app, _) = test_app();

        for body in [
            "not json",
            r#"{"lat": 1.0, "lon": 2.0, "timestamp": 1}"#,
            r#"{"vehicle_id": "v", "lat": "north", "lon": 2.0, "timestamp": 1}"#,
            r#"{"vehicle_id": "", "lat": 1.0, "lon": 2.0, "timestamp": 1}"#,
        ] {
            let resp = app.clone().oneshot(post_event(body)).await.unwrap();
            assert_eq!(resp.status(), StatusCode::BAD_REQUEST, "body: {body}");
        }

        // Nothing reached the store
        let resp = app.oneshot(get("/vehicle/v")).await.unwrap();
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_wrong_method() {
        let (app, _) = test_app();
        let resp = app.clone().oneshot(get("/event")).await.unwrap();
        assert_eq!(resp.status(), StatusCode::METHOD_NOT_ALLOWED);

        let req = Request::builder()
            .method("POST")
            .uri("/vehicle/v1")
            .body(Body::empty())
            .unwrap();
        let resp = app.oneshot(req).await.unwrap();
        assert_eq!(resp.status(), StatusCode::METHOD_NOT_ALLOWED);
    }
}
