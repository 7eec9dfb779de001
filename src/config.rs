// src/config.rs

use dotenvy::dotenv;
use std::env;

/// Storage backend selector, read from STORAGE_BACKEND.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageBackend {
    Memory,
    File,
}

#[derive(Debug, Clone)]
pub struct Config {
    /// Shared secret expected in the `x-admin-token` header on admin routes.
    pub admin_token: String,
    pub storage_backend: StorageBackend,
    pub data_dir: String,
    pub port: u16,
    pub rust_log: String,
    pub openai_api_key: Option<String>,
    pub openai_base_url: String,
    pub openai_model: String,
}

impl Config {
    pub fn from_env() -> Self {
        dotenv().ok();

        let admin_token = env::var("ADMIN_TOKEN").expect("ADMIN_TOKEN must be set");

        let storage_backend = match env::var("STORAGE_BACKEND").as_deref() {
            Ok("file") => StorageBackend::File,
            Ok("memory") | Err(_) => StorageBackend::Memory,
            Ok(other) => panic!("Unknown STORAGE_BACKEND '{}', expected 'memory' or 'file'", other),
        };

        let data_dir = env::var("DATA_DIR").unwrap_or_else(|_| "data".to_string());

        let port = env::var("PORT")
            .ok()
            .and_then(|p| p.parse().ok())
            .unwrap_or(3000);

        let rust_log = env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string());

        let openai_api_key = env::var("OPENAI_API_KEY").ok();
        let openai_base_url =
            env::var("OPENAI_BASE_URL").unwrap_or_else(|_| "https://api.openai.com".to_string());
        let openai_model =
            env::var("OPENAI_MODEL").unwrap_or_else(|_| "gpt-4o-mini".to_string());

        Self {
            admin_token,
            storage_backend,
            data_dir,
            port,
            rust_log,
            openai_api_key,
            openai_base_url,
            openai_model,
        }
    }
}
