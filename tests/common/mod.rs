#![allow(dead_code)]

use axum::{
    body::{Body, to_bytes},
    http::{Request, StatusCode, header},
    response::Response,
};
use marketplace_api::{
    config::{JwtConfig, UploadConfig},
    db::{create_orm_conn, create_pool, run_migrations},
    models::Role,
    state::AppState,
    token::{Identity, TokenIssuer},
};
use sea_orm::{ConnectionTrait, DatabaseConnection, Statement};

pub const SECRET: &str = "integration-test-secret";

pub fn jwt_config() -> JwtConfig {
    JwtConfig {
        secret: SECRET.to_string(),
        access_token_expiry_mins: 60,
        refresh_token_expiry_days: 7,
    }
}

pub fn upload_config() -> UploadConfig {
    UploadConfig {
        dir: std::env::temp_dir().join(format!("marketplace-uploads-{}", std::process::id())),
        max_bytes: 1024,
    }
}

/// State with no database behind it; only routes that fail before any query
/// can be exercised with it.
pub fn offline_state() -> AppState {
    AppState::new(
        DatabaseConnection::Disconnected,
        TokenIssuer::new(&jwt_config()),
        upload_config(),
    )
}

pub fn bearer(state: &AppState, id: i32, email: &str, role: Role) -> String {
    let pair = state
        .tokens
        .issue_pair(&Identity {
            id,
            email: email.to_string(),
            role,
        })
        .expect("token pair");
    format!("Bearer {}", pair.token)
}

pub fn json_request(method: &str, uri: &str, body: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .expect("request")
}

pub async fn read_json(response: Response) -> (StatusCode, serde_json::Value) {
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body");
    let value = serde_json::from_slice(&bytes).expect("json body");
    (status, value)
}

/// Migrated state on a real database, emptied before each test. `None` when
/// neither `TEST_DATABASE_URL` nor `DATABASE_URL` is set.
pub async fn database_state() -> anyhow::Result<Option<AppState>> {
    let database_url = match std::env::var("TEST_DATABASE_URL")
        .or_else(|_| std::env::var("DATABASE_URL"))
    {
        Ok(url) => url,
        Err(_) => {
            eprintln!("Skipping test: set TEST_DATABASE_URL or DATABASE_URL to run database tests.");
            return Ok(None);
        }
    };

    let pool = create_pool(&database_url).await?;
    run_migrations(&pool).await?;
    let orm = create_orm_conn(pool);

    let backend = orm.get_database_backend();
    orm.execute(Statement::from_string(
        backend,
        "TRUNCATE TABLE products, categories, customers, sellers, users RESTART IDENTITY CASCADE",
    ))
    .await?;

    Ok(Some(AppState::new(
        orm,
        TokenIssuer::new(&jwt_config()),
        UploadConfig {
            dir: std::env::temp_dir().join("marketplace-db-uploads"),
            max_bytes: 1024,
        },
    )))
}
