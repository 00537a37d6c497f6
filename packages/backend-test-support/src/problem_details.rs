//! Assertions for the Problem Details error contract.
//!
//! Kept free of backend types so both unit and integration tests can use it.

use actix_web::body::MessageBody;
use actix_web::dev::ServiceResponse;
use actix_web::http::header::HeaderMap;
use actix_web::http::StatusCode;
use serde::Deserialize;

#[derive(Debug, Deserialize)]
struct ProblemDetailsLike {
    #[serde(rename = "type")]
    type_: String,
    title: String,
    status: u16,
    detail: String,
    code: String,
    trace_id: String,
}

/// Assert that a service response is a Problem Details error with the given
/// code and status, and that the body `trace_id` matches `x-trace-id`.
pub async fn assert_problem_details<B: MessageBody>(
    resp: ServiceResponse<B>,
    expected_code: &str,
    expected_status: StatusCode,
) {
    let status = resp.status();
    let headers = resp.headers().clone();
    let body = actix_web::test::read_body(resp).await;
    assert_problem_details_from_parts(status, &headers, &body, expected_code, expected_status);
}

/// Same contract check over raw response parts.
pub fn assert_problem_details_from_parts(
    status: StatusCode,
    headers: &HeaderMap,
    body_bytes: &[u8],
    expected_code: &str,
    expected_status: StatusCode,
) {
    assert_eq!(status, expected_status, "unexpected HTTP status");

    let problem: ProblemDetailsLike = serde_json::from_slice(body_bytes)
        .expect("response body should be Problem Details JSON");

    let trace_id_header = headers
        .get("x-trace-id")
        .expect("x-trace-id header should be present")
        .to_str()
        .expect("x-trace-id header should be valid UTF-8");

    assert_eq!(
        problem.trace_id, trace_id_header,
        "trace_id in body should match x-trace-id header"
    );
    assert_eq!(problem.code, expected_code);
    assert_eq!(problem.status, expected_status.as_u16());
    assert!(
        problem.type_.ends_with(&problem.code.to_lowercase().replace('_', "-")),
        "type URI should end with the kebab-cased code, got {}",
        problem.type_
    );
    assert!(!problem.title.is_empty());
    assert!(!problem.detail.is_empty());
}
