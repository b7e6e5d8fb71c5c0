use crate::infra::AppState;
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::Extension;
use axum::Json;
use ideaboard::ideas::{idea_router, IdeaRepository, IdeaReviewService};
use serde_json::json;
use std::sync::Arc;

pub(crate) fn with_idea_routes<R>(service: Arc<IdeaReviewService<R>>) -> axum::Router
where
    R: IdeaRepository + 'static,
{
    idea_router(service)
        .route("/health", axum::routing::get(healthcheck))
        .route("/ready", axum::routing::get(readiness_endpoint))
        .route("/metrics", axum::routing::get(metrics_endpoint))
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

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::Request;
    use ideaboard::ideas::{InMemoryIdeaRepository, ScoringConfig, SimilarityOptions};
    use metrics_exporter_prometheus::PrometheusBuilder;
    use std::sync::atomic::{AtomicBool, Ordering};
    use tower::ServiceExt;

    fn app(ready: bool) -> axum::Router {
        let service = Arc::new(IdeaReviewService::new(
            Arc::new(InMemoryIdeaRepository::default()),
            ScoringConfig::standard(),
            SimilarityOptions::default(),
        ));
        let state = AppState {
            readiness: Arc::new(AtomicBool::new(ready)),
            metrics: Arc::new(PrometheusBuilder::new().build_recorder().handle()),
        };
        with_idea_routes(service).layer(Extension(state))
    }

    async fn get(router: axum::Router, uri: &str) -> axum::response::Response {
        router
            .oneshot(Request::get(uri).body(Body::empty()).unwrap())
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn health_reports_ok() {
        let response = get(app(true), "/health").await;
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn readiness_follows_flag() {
        let response = get(app(false), "/ready").await;
        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);

        let response = get(app(true), "/ready").await;
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn metrics_render_as_prometheus_text() {
        let response = get(app(true), "/metrics").await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers()[header::CONTENT_TYPE],
            "text/plain; version=0.0.4"
        );
    }

    #[tokio::test]
    async fn idea_routes_are_mounted() {
        let response = get(app(true), "/api/leaderboard").await;
        assert_eq!(response.status(), StatusCode::OK);

        let response = get(app(true), "/api/ideas/idea-unknown").await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn readiness_flag_is_shared() {
        let flag = Arc::new(AtomicBool::new(false));
        let state = AppState {
            readiness: flag.clone(),
            metrics: Arc::new(PrometheusBuilder::new().build_recorder().handle()),
        };
        flag.store(true, Ordering::Release);
        assert!(state.readiness.load(Ordering::Acquire));
    }
}
