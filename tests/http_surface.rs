//! Router behaviour that resolves before any database query.

mod common;

use axum::{
    body::Body,
    http::{Request, StatusCode, header},
};
use marketplace_api::{models::Role, routes::create_app};
use tower::ServiceExt;

use common::{bearer, json_request, offline_state, read_json};

#[tokio::test]
async fn health_is_served_outside_the_api_prefix() {
    let app = create_app(offline_state());
    let response = app
        .oneshot(Request::get("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();

    let (status, body) = read_json(response).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "success");
    assert_eq!(body["statusCode"], 200);
    assert_eq!(body["data"]["status"], "ok");
}

#[tokio::test]
async fn malformed_json_is_a_bad_request() {
    let app = create_app(offline_state());
    let response = app
        .oneshot(json_request("POST", "/api/register", "{not json"))
        .await
        .unwrap();

    let (status, body) = read_json(response).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["status"], "bad request");
    assert_eq!(body["message"], "Invalid request body");
    assert!(body.get("data").is_none());
}

#[tokio::test]
async fn register_validation_lists_field_errors() {
    let app = create_app(offline_state());
    let response = app
        .oneshot(json_request(
            "POST",
            "/api/register",
            r#"{"name":"Toko","email":"bad","phone":"0812","password":"abcdefgh","role":"seller"}"#,
        ))
        .await
        .unwrap();

    let (status, body) = read_json(response).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["statusCode"], 422);
    assert_eq!(body["message"], "Validation failed");
    let errors = body["errors"].as_array().expect("errors array");
    assert_eq!(errors.len(), 2);
    assert_eq!(errors[0]["field"], "email");
    assert_eq!(errors[0]["error_message"], "email must contain email");
    assert_eq!(
        errors[1]["error_message"],
        "password must contain at least one uppercase letter"
    );
}

#[tokio::test]
async fn profile_requires_a_bearer_token() {
    let app = create_app(offline_state());
    let response = app
        .oneshot(Request::get("/api/seller/profile").body(Body::empty()).unwrap())
        .await
        .unwrap();

    let (status, body) = read_json(response).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["status"], "unauthorized");
}

#[tokio::test]
async fn garbage_bearer_token_is_unauthorized() {
    let app = create_app(offline_state());
    let request = Request::get("/api/customer/profile")
        .header(header::AUTHORIZATION, "Bearer nope")
        .body(Body::empty())
        .unwrap();

    let (status, body) = read_json(app.oneshot(request).await.unwrap()).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["message"], "Invalid or expired token");
}

#[tokio::test]
async fn non_numeric_id_is_rejected() {
    let app = create_app(offline_state());
    for uri in ["/api/categories/abc", "/api/products/-3", "/api/products/0"] {
        let response = app
            .clone()
            .oneshot(Request::get(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let (status, body) = read_json(response).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{uri}");
        assert_eq!(body["message"], "Invalid ID format");
    }
}

#[tokio::test]
async fn customers_cannot_create_products() {
    let state = offline_state();
    let token = bearer(&state, 5, "buyer@example.com", Role::Customer);
    let mut request = json_request("POST", "/api/products", r#"{"name":"Mouse","price":10}"#);
    request
        .headers_mut()
        .insert(header::AUTHORIZATION, token.parse().unwrap());

    let (status, body) = read_json(create_app(state).oneshot(request).await.unwrap()).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["message"], "Incorrect role");
}

#[tokio::test]
async fn refresh_token_endpoint_issues_a_new_pair() {
    let state = offline_state();
    let pair = state
        .tokens
        .issue_pair(&marketplace_api::token::Identity {
            id: 9,
            email: "shop@example.com".into(),
            role: Role::Seller,
        })
        .unwrap();
    let app = create_app(state);

    let payload = format!(r#"{{"refresh_token":"{}"}}"#, pair.refresh_token);
    let (status, body) = read_json(
        app.clone()
            .oneshot(json_request("POST", "/api/refreshToken", &payload))
            .await
            .unwrap(),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["message"], "Refresh successfully");
    assert!(body["data"]["token"].as_str().is_some_and(|t| !t.is_empty()));
    assert!(body["data"]["refresh_token"].as_str().is_some());

    let payload = format!(r#"{{"refresh_token":"{}"}}"#, pair.token);
    let (status, _) = read_json(
        app.oneshot(json_request("POST", "/api/refreshToken", &payload))
            .await
            .unwrap(),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

fn multipart_upload(token: &str, bytes: &[u8]) -> Request<Body> {
    let boundary = "X-MARKETPLACE-BOUNDARY";
    let mut body = Vec::new();
    body.extend_from_slice(
        format!(
            "--{boundary}\r\nContent-Disposition: form-data; name=\"file\"; filename=\"a.bin\"\r\nContent-Type: application/octet-stream\r\n\r\n"
        )
        .as_bytes(),
    );
    body.extend_from_slice(bytes);
    body.extend_from_slice(format!("\r\n--{boundary}--\r\n").as_bytes());

    Request::post("/api/upload")
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={boundary}"),
        )
        .header(header::AUTHORIZATION, token)
        .body(Body::from(body))
        .unwrap()
}

#[tokio::test]
async fn upload_rejects_unknown_content_and_oversize_files() {
    let state = offline_state();
    let token = bearer(&state, 1, "shop@example.com", Role::Seller);
    let app = create_app(state);

    let (status, body) = read_json(
        app.clone()
            .oneshot(multipart_upload(&token, b"plain text, not an image"))
            .await
            .unwrap(),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body["message"],
        "type of file invalid. only png, jpg, jpeg, and pdf."
    );

    let mut big = b"%PDF-1.7\n".to_vec();
    big.resize(4096, b'a');
    let (status, body) = read_json(app.oneshot(multipart_upload(&token, &big)).await.unwrap()).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "file too large");
}

#[tokio::test]
async fn upload_far_over_the_limit_is_still_too_large() {
    let state = offline_state();
    let token = bearer(&state, 1, "shop@example.com", Role::Seller);
    let app = create_app(state);

    let mut huge = b"%PDF-1.7\n".to_vec();
    huge.resize(200 * 1024, b'a');
    let (status, body) = read_json(app.oneshot(multipart_upload(&token, &huge)).await.unwrap()).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["status"], "bad request");
    assert_eq!(body["message"], "file too large");
}

#[tokio::test]
async fn upload_stores_a_png() {
    let state = offline_state();
    let token = bearer(&state, 1, "shop@example.com", Role::Seller);
    let dir = state.upload.dir.clone();
    let app = create_app(state);

    let png = [0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A, 0, 0, 0, 0];
    let (status, body) = read_json(app.oneshot(multipart_upload(&token, &png)).await.unwrap()).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["data"]["content_type"], "image/png");
    assert_eq!(body["data"]["size"], png.len());

    let url = body["data"]["url"].as_str().expect("url");
    let name = url.strip_prefix("/uploads/").expect("served under /uploads");
    assert!(name.ends_with(".png"));
    assert!(dir.join(name).exists());
}

#[tokio::test]
async fn unknown_routes_use_the_envelope() {
    let app = create_app(offline_state());
    let response = app
        .oneshot(Request::get("/api/nowhere").body(Body::empty()).unwrap())
        .await
        .unwrap();

    let (status, body) = read_json(response).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["status"], "not found");
    assert_eq!(body["statusCode"], 404);
}
