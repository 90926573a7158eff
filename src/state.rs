use std::sync::Arc;

use sea_orm::DatabaseConnection;

use crate::{config::UploadConfig, token::TokenIssuer};

#[derive(Clone)]
pub struct AppState {
    pub orm: DatabaseConnection,
    pub tokens: TokenIssuer,
    pub upload: Arc<UploadConfig>,
}

impl AppState {
    pub fn new(orm: DatabaseConnection, tokens: TokenIssuer, upload: UploadConfig) -> Self {
        Self {
            orm,
            tokens,
            upload: Arc::new(upload),
        }
    }
}
