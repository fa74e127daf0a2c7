//! Requests that are answered before any query runs

use axum::http::{Method, StatusCode};
use serde_json::json;

use crate::common::{admin_token, get, offline_app, send, token, u1_token};

#[tokio::test]
async fn test_health() {
    let (status, body) = get(&offline_app(), "/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
}

#[tokio::test]
async fn test_ready_reports_unreachable_database() {
    let (status, body) = get(&offline_app(), "/ready").await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, json!({"error": {"message": "Database error", "status": 500}}));
}

#[tokio::test]
async fn test_unknown_route_is_404_envelope() {
    let (status, body) = get(&offline_app(), "/no-such-page").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({"error": {"message": "Not Found", "status": 404}}));
}

#[tokio::test]
async fn test_unsupported_method_is_404_envelope() {
    let app = offline_app();
    let admin = admin_token();

    let (status, body) = send(&app, Method::PUT, "/authors", None, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({"error": {"message": "Not Found", "status": 404}}));

    let (status, body) = send(
        &app,
        Method::PUT,
        "/lines/1",
        Some(&admin),
        Some(json!({"bookNum": 2})),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"]["status"], 404);

    let (status, _) = send(&app, Method::DELETE, "/languages", Some(&admin), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_openapi_document_served() {
    let (status, body) = get(&offline_app(), "/api-docs/openapi.json").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["paths"]["/lines"].is_object());
}

#[tokio::test]
async fn test_admin_routes_reject_anonymous_and_users() {
    let app = offline_app();
    let u1 = u1_token();
    let create = json!({"shortName": "Vergil", "fullName": "Publius Vergilius Maro"});

    for bearer in [None, Some(u1.as_str()), Some("not.a.jwt")] {
        let (status, body) =
            send(&app, Method::POST, "/authors", bearer, Some(create.clone())).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["error"]["status"], 401);

        let (status, _) =
            send(&app, Method::PATCH, "/works/1", bearer, Some(json!({"fullTitle": "x"}))).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);

        let (status, _) = send(&app, Method::DELETE, "/lines/1", bearer, None).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);

        let (status, _) = send(&app, Method::GET, "/users", bearer, None).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }
}

#[tokio::test]
async fn test_token_signed_with_other_secret_is_anonymous() {
    let now = chrono::Utc::now().timestamp();
    let forged = epic_viewer_server::models::UserClaims {
        sub: "admin".into(),
        is_admin: true,
        exp: now + 3600,
        iat: now,
    }
    .create_token("guessed-secret")
    .unwrap();

    let (status, _) = send(&offline_app(), Method::DELETE, "/authors/1", Some(&forged), None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_auth_checked_before_body() {
    let (status, _) = send(
        &offline_app(),
        Method::POST,
        "/lines",
        Some(&u1_token()),
        Some(json!({"lineText": "Tu es stultus."})),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_users_cannot_reach_other_users() {
    let app = offline_app();
    let u1 = u1_token();

    let (status, _) = send(&app, Method::GET, "/users/u2", Some(&u1), None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _) = send(
        &app,
        Method::PATCH,
        "/users/u2",
        Some(&u1),
        Some(json!({"firstName": "New"})),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _) = send(&app, Method::DELETE, "/users/u2", None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_unknown_filter_key_rejected() {
    let app = offline_app();
    for uri in [
        "/authors?favColor=Tyrian%20Purple",
        "/works?shortName=Primum",
        "/lines?lineNumber=1",
        "/works/1?workId=2",
    ] {
        let (status, body) = get(&app, uri).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{}", uri);
        assert!(body["error"]["message"].is_array(), "{}", uri);
    }
}

#[tokio::test]
async fn test_non_numeric_filter_rejected() {
    let (status, _) = get(&offline_app(), "/lines?minLineNum=three").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = get(&offline_app(), "/lines?fifthFootSpondee=maybe").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_inverted_ranges_fail_before_querying() {
    let app = offline_app();

    let (status, body) = get(&app, "/lines?minLineNum=5&maxLineNum=2").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body["error"]["message"],
        "minLineNum cannot be greater than maxLineNum (5 > 2)"
    );

    let (status, _) = get(&app, "/lines?lineText=arma&workId=1&minBookNum=4&maxBookNum=3").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = get(&app, "/works/1?minBookNum=3&maxBookNum=1").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_invalid_path_id() {
    let (status, body) = get(&offline_app(), "/authors/abc").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["status"], 400);
}

#[tokio::test]
async fn test_admin_payload_validation() {
    let app = offline_app();
    let admin = admin_token();

    // missing required fields
    let (status, body) = send(
        &app,
        Method::POST,
        "/lines",
        Some(&admin),
        Some(json!({"lineText": "Tu es stultus."})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"]["message"].is_array());

    // wrong type
    let (status, _) = send(
        &app,
        Method::POST,
        "/lines",
        Some(&admin),
        Some(json!({
            "lineNum": "Three",
            "lineText": "Nox erat et terris animalia somnus habebat;",
            "fifthFootSpondee": false,
            "bookNum": 3,
            "workId": 3
        })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    // passes deserialization, fails validation
    let (status, body) = send(
        &app,
        Method::POST,
        "/authors",
        Some(&admin),
        Some(json!({"shortName": "", "fullName": "Nobody"})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["message"], json!(["shortName: must be 1-50 characters"]));

    // patching the id is not allowed
    let (status, _) = send(
        &app,
        Method::PATCH,
        "/lines/1",
        Some(&admin),
        Some(json!({"id": 99})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_empty_update_rejected() {
    let app = offline_app();
    let admin = admin_token();
    for uri in ["/authors/1", "/works/1", "/lines/1"] {
        let (status, body) = send(&app, Method::PATCH, uri, Some(&admin), Some(json!({}))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{}", uri);
        assert_eq!(body["error"]["message"], "No data to update");
    }

    let (status, _) = send(
        &app,
        Method::PATCH,
        "/users/u1",
        Some(&token("u1", false)),
        Some(json!({})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}
