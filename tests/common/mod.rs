// tests/common/mod.rs

#![allow(dead_code)]

use std::sync::Arc;
use std::time::Duration;

use quiz_backend::{
    config::Config, ledger::MemoryLedger, routes, services::ScoreService, state::AppState,
};

pub const JWT_SECRET: &str = "test_secret_for_integration_tests";

pub fn test_config() -> Config {
    Config {
        database_url: String::new(),
        jwt_secret: JWT_SECRET.to_string(),
        jwt_expiration: 600, // 10 minutes for tests
        rust_log: "error".to_string(),
        server_port: 0,
        store_timeout: Duration::from_secs(2),
        db_max_connections: 1,
    }
}

pub fn memory_service() -> ScoreService {
    ScoreService::new(Arc::new(MemoryLedger::new()), Duration::from_secs(2))
}

/// Spawns the app over an in-memory ledger on a random port.
/// Returns the base URL (e.g., "http://127.0.0.1:12345").
pub async fn spawn_app() -> String {
    let state = AppState {
        service: memory_service(),
        config: test_config(),
    };

    let app = routes::create_router(state);

    // Bind to port 0 to get a random available port
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind random port");

    let port = listener.local_addr().unwrap().port();
    let address = format!("http://127.0.0.1:{}", port);

    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    address
}

/// Logs in and returns the bearer token.
pub async fn login(client: &reqwest::Client, address: &str, nick_name: &str) -> String {
    let body = client
        .post(format!("{}/api/user/login", address))
        .json(&serde_json::json!({
            "nickName": nick_name,
            "avatarUrl": format!("https://img.example/{}.png", nick_name)
        }))
        .send()
        .await
        .expect("Login failed")
        .json::<serde_json::Value>()
        .await
        .expect("Failed to parse login json");

    body["data"]["token"]
        .as_str()
        .expect("Token not found")
        .to_string()
}
