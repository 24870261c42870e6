use super::common::*;
use axum::http::StatusCode;
use serde_json::{json, Value};
use tower::ServiceExt;

use crate::workflows::scoring::advisor::AdviceUnavailable;
use crate::workflows::scoring::repository::ScoreRepository;
use crate::workflows::scoring::router::scoring_router;

fn score_payload(category: &str, score: u8) -> Value {
    let scores: Vec<Value> = (1..=7)
        .map(|index| json!({ "index": index, "score": score }))
        .collect();
    json!({ "category": category, "scores": scores })
}

fn json_request(method: &str, uri: &str, payload: &Value) -> axum::http::Request<axum::body::Body> {
    axum::http::Request::builder()
        .method(method)
        .uri(uri)
        .header(axum::http::header::CONTENT_TYPE, "application/json")
        .body(axum::body::Body::from(serde_json::to_vec(payload).unwrap()))
        .unwrap()
}

fn get_request(uri: &str) -> axum::http::Request<axum::body::Body> {
    axum::http::Request::builder()
        .method("GET")
        .uri(uri)
        .body(axum::body::Body::empty())
        .unwrap()
}

#[tokio::test]
async fn create_route_returns_created_with_derived_fields() {
    let (service, _, _, _) = build_service();
    let router = scoring_router(service);

    let response = router
        .oneshot(json_request(
            "POST",
            "/api/v1/cohorts/c-100/score",
            &score_payload("learn_to_swim", 3),
        ))
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::CREATED);
    let payload = read_json_body(response).await;
    assert_eq!(payload.get("total_score").and_then(Value::as_u64), Some(21));
    assert_eq!(
        payload.get("required_grade").and_then(Value::as_str),
        Some("grade_2")
    );
}

#[tokio::test]
async fn create_route_returns_conflict_for_a_rescored_cohort() {
    let (service, _, _, _) = build_service();
    let router = scoring_router(service);

    let first = router
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/v1/cohorts/c-101/score",
            &score_payload("learn_to_swim", 3),
        ))
        .await
        .expect("route executes");
    assert_eq!(first.status(), StatusCode::CREATED);

    let second = router
        .oneshot(json_request(
            "POST",
            "/api/v1/cohorts/c-101/score",
            &score_payload("learn_to_swim", 2),
        ))
        .await
        .expect("route executes");
    assert_eq!(second.status(), StatusCode::CONFLICT);
}

#[tokio::test]
async fn create_route_lists_every_score_issue() {
    let (service, _, _, _) = build_service();
    let router = scoring_router(service);

    let mut payload = score_payload("learn_to_swim", 3);
    payload["scores"][1]["score"] = json!(0);
    payload["scores"][4]["score"] = json!(9);

    let response = router
        .oneshot(json_request("POST", "/api/v1/cohorts/c-102/score", &payload))
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body = read_json_body(response).await;
    let issues = body.get("issues").and_then(Value::as_array).expect("issues listed");
    assert_eq!(issues.len(), 2);
}

#[tokio::test]
async fn create_route_rejects_unknown_categories() {
    let (service, _, _, _) = build_service();
    let router = scoring_router(service);

    let response = router
        .oneshot(json_request(
            "POST",
            "/api/v1/cohorts/c-103/score",
            &score_payload("synchronized_knitting", 3),
        ))
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body = read_json_body(response).await;
    assert!(body
        .get("error")
        .and_then(Value::as_str)
        .unwrap_or_default()
        .contains("synchronized_knitting"));
}

#[tokio::test]
async fn get_route_returns_not_found_for_unscored_cohorts() {
    let (service, _, _, _) = build_service();
    let router = scoring_router(service);

    let response = router
        .oneshot(get_request("/api/v1/cohorts/c-104/score"))
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn update_route_replaces_and_returns_the_new_sheet() {
    let (service, _, _, _) = build_service();
    let router = scoring_router(service);

    let created = router
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/v1/cohorts/c-105/score",
            &score_payload("learn_to_swim", 5),
        ))
        .await
        .expect("route executes");
    assert_eq!(created.status(), StatusCode::CREATED);

    let updated = router
        .clone()
        .oneshot(json_request(
            "PUT",
            "/api/v1/cohorts/c-105/score",
            &score_payload("institutional", 1),
        ))
        .await
        .expect("route executes");
    assert_eq!(updated.status(), StatusCode::OK);
    let body = read_json_body(updated).await;
    assert_eq!(body.get("category").and_then(Value::as_str), Some("institutional"));
    assert_eq!(body.get("total_score").and_then(Value::as_u64), Some(7));

    let fetched = router
        .oneshot(get_request("/api/v1/cohorts/c-105/score"))
        .await
        .expect("route executes");
    let fetched_body = read_json_body(fetched).await;
    assert_eq!(
        fetched_body.get("required_grade").and_then(Value::as_str),
        Some("grade_1")
    );
}

#[tokio::test]
async fn delete_route_removes_the_record() {
    let (service, _, _, _) = build_service();
    let router = scoring_router(service);

    router
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/v1/cohorts/c-106/score",
            &score_payload("learn_to_swim", 3),
        ))
        .await
        .expect("route executes");

    let deleted = router
        .clone()
        .oneshot(
            axum::http::Request::builder()
                .method("DELETE")
                .uri("/api/v1/cohorts/c-106/score")
                .body(axum::body::Body::empty())
                .unwrap(),
        )
        .await
        .expect("route executes");
    assert_eq!(deleted.status(), StatusCode::NO_CONTENT);

    let missing = router
        .oneshot(get_request("/api/v1/cohorts/c-106/score"))
        .await
        .expect("route executes");
    assert_eq!(missing.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn preview_route_derives_without_storing() {
    let (service, repository, _, _) = build_service();
    let router = scoring_router(service);

    let response = router
        .oneshot(json_request(
            "POST",
            "/api/v1/scores/preview",
            &score_payload("competitive_elite", 5),
        ))
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::OK);
    let body = read_json_body(response).await;
    assert_eq!(body.get("total_score").and_then(Value::as_u64), Some(35));
    assert_eq!(
        body.get("required_grade").and_then(Value::as_str),
        Some("grade_3")
    );

    assert!(repository
        .fetch(&cohort("c-preview"))
        .expect("fetch succeeds")
        .is_none());
}

#[tokio::test]
async fn eligible_route_requires_a_committed_score() {
    let (service, _, _, _) = build_service();
    let router = scoring_router(service);

    let response = router
        .oneshot(get_request("/api/v1/cohorts/c-107/eligible-coaches"))
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body = read_json_body(response).await;
    assert!(body
        .get("error")
        .and_then(Value::as_str)
        .unwrap_or_default()
        .contains("not been scored"));
}

#[tokio::test]
async fn eligible_route_lists_qualified_coaches_in_name_order() {
    let (service, _, _, _) = build_service();
    let router = scoring_router(service);

    router
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/v1/cohorts/c-108/score",
            &score_payload("learn_to_swim", 3),
        ))
        .await
        .expect("route executes");

    let response = router
        .oneshot(get_request("/api/v1/cohorts/c-108/eligible-coaches"))
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::OK);
    let body = read_json_body(response).await;
    let coaches = body.as_array().expect("coach array");
    let names: Vec<&str> = coaches
        .iter()
        .filter_map(|coach| coach.get("name").and_then(Value::as_str))
        .collect();
    assert_eq!(names, vec!["Dana Whitfield", "Jordan Li"]);
}

#[tokio::test]
async fn advice_route_degrades_to_service_unavailable() {
    let (service, _, _, advisory) = build_service();
    advisory.script_suggestion(Err(AdviceUnavailable::Timeout));
    let router = scoring_router(service);

    let response = router
        .oneshot(json_request(
            "POST",
            "/api/v1/cohorts/c-109/advice/dimensions",
            &json!({ "category": "learn_to_swim" }),
        ))
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
}

#[tokio::test]
async fn catalog_route_serves_labels_and_rejects_unknowns() {
    let (service, _, _, _) = build_service();
    let router = scoring_router(service);

    let known = router
        .clone()
        .oneshot(get_request("/api/v1/catalog/special_populations/dimensions"))
        .await
        .expect("route executes");
    assert_eq!(known.status(), StatusCode::OK);
    let body = read_json_body(known).await;
    assert_eq!(
        body.get("labels").and_then(Value::as_array).map(Vec::len),
        Some(7)
    );

    let unknown = router
        .oneshot(get_request("/api/v1/catalog/origami/dimensions"))
        .await
        .expect("route executes");
    assert_eq!(unknown.status(), StatusCode::UNPROCESSABLE_ENTITY);
}
