use super::common::*;
use axum::extract::{Path, State};
use axum::http::{header, Request, StatusCode};
use serde_json::{json, Value};
use std::sync::Arc;
use tower::ServiceExt;

use crate::ideas::domain::IdeaSubmission;
use crate::ideas::router::{approve_handler, leaderboard_handler, submit_handler, SubmitRequest};
use crate::ideas::{IdeaReviewService, ScoringConfig, SimilarityOptions};

fn post_json(uri: &str, payload: Value) -> Request<axum::body::Body> {
    Request::post(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(axum::body::Body::from(serde_json::to_vec(&payload).unwrap()))
        .unwrap()
}

fn get(uri: &str) -> Request<axum::body::Body> {
    Request::get(uri).body(axum::body::Body::empty()).unwrap()
}

fn unavailable_service() -> Arc<IdeaReviewService<UnavailableRepository>> {
    Arc::new(IdeaReviewService::new(
        Arc::new(UnavailableRepository),
        ScoringConfig::standard(),
        SimilarityOptions::default(),
    ))
}

#[tokio::test]
async fn submit_route_accepts_payloads() {
    let (service, _) = build_service();
    let router = router_with_service(service);

    let response = router
        .oneshot(post_json(
            "/api/ideas/submit",
            json!({
                "engineer": { "id": "eng-1", "display_name": "Priya" },
                "submission": automation_submission(),
            }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CREATED);
    let body = read_json_body(response).await;
    assert_eq!(body["idea"]["status"], "pending");
    assert_eq!(body["idea"]["points"], 0);
    assert_eq!(body["idea"]["engineer_name"], "Priya");
}

#[tokio::test]
async fn submit_route_returns_bad_request_for_missing_field() {
    let (service, _) = build_service();
    let router = router_with_service(service);
    let submission = IdeaSubmission {
        service_area: String::new(),
        ..automation_submission()
    };

    let response = router
        .oneshot(post_json(
            "/api/ideas/submit",
            json!({ "engineer": engineer("eng-1"), "submission": submission }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = read_json_body(response).await;
    assert_eq!(body["error"], "service_area is required");
}

#[tokio::test]
async fn submit_route_returns_unprocessable_for_unknown_category() {
    let (service, _) = build_service();
    let router = router_with_service(service);
    let submission = IdeaSubmission {
        category: "Morale".to_string(),
        ..automation_submission()
    };

    let response = router
        .oneshot(post_json(
            "/api/ideas/submit",
            json!({ "engineer": engineer("eng-1"), "submission": submission }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body = read_json_body(response).await;
    assert_eq!(body["error"], "unknown category 'Morale'");
}

#[tokio::test]
async fn approve_route_reports_points() {
    let (service, _) = build_service();
    let idea = service
        .submit(engineer("eng-1"), security_submission())
        .expect("submission succeeds");
    let router = router_with_service(service);

    let response = router
        .oneshot(post_json(
            &format!("/api/ideas/{}/approve", idea.id()),
            json!({ "reviewer_id": REVIEWER }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = read_json_body(response).await;
    assert_eq!(body["points_awarded"], 55);
    assert_eq!(body["breakdown"].as_array().map(Vec::len), Some(3));
}

#[tokio::test]
async fn approve_route_returns_not_found_for_wrong_reviewer() {
    let (service, _) = build_service();
    let idea = service
        .submit(engineer("eng-1"), security_submission())
        .expect("submission succeeds");
    let router = router_with_service(service);

    let response = router
        .oneshot(post_json(
            &format!("/api/ideas/{}/approve", idea.id()),
            json!({ "reviewer_id": "sdm-other" }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn reject_route_requires_reason() {
    let (service, _) = build_service();
    let idea = service
        .submit(engineer("eng-1"), automation_submission())
        .expect("submission succeeds");
    let router = router_with_service(service);

    let response = router
        .oneshot(post_json(
            &format!("/api/ideas/{}/reject", idea.id()),
            json!({ "reviewer_id": REVIEWER }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = read_json_body(response).await;
    assert_eq!(body["error"], "rejection reason is required");
}

#[tokio::test]
async fn idea_route_returns_not_found_for_unknown_id() {
    let (service, _) = build_service();
    let router = router_with_service(service);

    let response = router.oneshot(get("/api/ideas/idea-missing")).await.unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn similarity_route_lists_near_duplicates() {
    let (service, _) = build_service();
    let target = service
        .submit(engineer("eng-1"), automation_submission())
        .expect("submission succeeds");
    let duplicate = service
        .submit(engineer("eng-2"), duplicate_submission())
        .expect("submission succeeds");
    service
        .submit(engineer("eng-3"), security_submission())
        .expect("submission succeeds");
    let router = router_with_service(service);

    let response = router
        .oneshot(get(&format!("/api/ideas/{}/similarity", target.id())))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = read_json_body(response).await;
    let similar = body["similar_ideas"].as_array().expect("array of matches");
    assert_eq!(similar.len(), 1);
    assert_eq!(similar[0]["idea_id"], duplicate.id().0.as_str());
    assert!(similar[0]["similarity_score"].as_f64().unwrap() > 10.0);
}

#[tokio::test]
async fn worklist_and_approved_routes_return_views() {
    let (service, _) = build_service();
    let pending = service
        .submit(engineer("eng-1"), automation_submission())
        .expect("submission succeeds");
    let approved = service
        .submit(engineer("eng-2"), security_submission())
        .expect("submission succeeds");
    service
        .approve(approved.id(), REVIEWER)
        .expect("approval works");
    let router = router_with_service(service);

    let response = router
        .clone()
        .oneshot(get(&format!("/api/ideas/worklist/{REVIEWER}")))
        .await
        .unwrap();
    let body = read_json_body(response).await;
    assert_eq!(body["ideas"].as_array().map(Vec::len), Some(1));
    assert_eq!(body["ideas"][0]["id"], pending.id().0.as_str());

    let response = router.oneshot(get("/api/ideas/approved/all")).await.unwrap();
    let body = read_json_body(response).await;
    assert_eq!(body["ideas"].as_array().map(Vec::len), Some(1));
    assert_eq!(body["ideas"][0]["points"], 55);
}

#[tokio::test]
async fn engineer_route_lists_own_ideas_with_rejection_reason() {
    let (service, _) = build_service();
    let pending = service
        .submit(engineer("eng-1"), automation_submission())
        .expect("submission succeeds");
    let rejected = service
        .submit(engineer("eng-1"), security_submission())
        .expect("submission succeeds");
    service
        .submit(engineer("eng-2"), duplicate_submission())
        .expect("submission succeeds");
    service
        .reject(rejected.id(), REVIEWER, "covered by the SSO rollout")
        .expect("rejection works");
    let router = router_with_service(service);

    let response = router
        .oneshot(get("/api/ideas/engineer/eng-1"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = read_json_body(response).await;
    assert_eq!(body["ideas"].as_array().map(Vec::len), Some(2));
    assert_eq!(body["ideas"][0]["id"], pending.id().0.as_str());
    assert_eq!(body["ideas"][0]["status"], "pending");
    assert!(body["ideas"][0].get("rejection_reason").is_none());
    assert_eq!(body["ideas"][1]["id"], rejected.id().0.as_str());
    assert_eq!(body["ideas"][1]["status"], "rejected");
    assert_eq!(
        body["ideas"][1]["rejection_reason"],
        "covered by the SSO rollout"
    );
}

#[tokio::test]
async fn leaderboard_route_ranks_engineers() {
    let (service, _) = build_service();
    let idea = service
        .submit(engineer("eng-7"), automation_submission())
        .expect("submission succeeds");
    service.approve(idea.id(), REVIEWER).expect("approval works");
    let router = router_with_service(service);

    let response = router.oneshot(get("/api/leaderboard")).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = read_json_body(response).await;
    assert_eq!(body["leaderboard"][0]["engineer_id"], "eng-7");
    assert_eq!(body["leaderboard"][0]["total_points"], 40);
    assert_eq!(body["recent_activities"][0]["category"], "Automation");
}

#[tokio::test]
async fn handlers_return_internal_error_on_repository_failure() {
    let request = SubmitRequest {
        engineer: engineer("eng-1"),
        submission: automation_submission(),
    };
    let response = submit_handler::<UnavailableRepository>(
        State(unavailable_service()),
        axum::Json(request),
    )
    .await;
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let response = approve_handler::<UnavailableRepository>(
        State(unavailable_service()),
        Path("idea-000001".to_string()),
        axum::Json(crate::ideas::router::ApproveRequest {
            reviewer_id: REVIEWER.to_string(),
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let response =
        leaderboard_handler::<UnavailableRepository>(State(unavailable_service())).await;
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body = read_json_body(response).await;
    assert!(body["error"].as_str().unwrap().contains("unavailable"));
}
