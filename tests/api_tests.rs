// tests/api_tests.rs

mod common;

use common::{login, spawn_app};

#[tokio::test]
async fn health_check_404() {
    // Arrange
    let address = spawn_app().await;
    let client = reqwest::Client::new();

    // Act
    let response = client
        .get(format!("{}/random_path_that_does_not_exist", address))
        .send()
        .await
        .expect("Failed to execute request");

    // Assert
    assert_eq!(response.status().as_u16(), 404);
}

#[tokio::test]
async fn health_endpoint_is_public() {
    let address = spawn_app().await;
    let response = reqwest::get(format!("{}/api/health", address))
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status().as_u16(), 200);
}

#[tokio::test]
async fn login_creates_then_reuses_account() {
    // Arrange
    let address = spawn_app().await;
    let client = reqwest::Client::new();
    let payload = serde_json::json!({ "nickName": "alice", "avatarUrl": "a.png" });

    // Act
    let first: serde_json::Value = client
        .post(format!("{}/api/user/login", address))
        .json(&payload)
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    let second: serde_json::Value = client
        .post(format!("{}/api/user/login", address))
        .json(&serde_json::json!({ "nickName": "alice", "avatarUrl": "other.png" }))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    // Assert
    assert_eq!(first["code"], 200);
    assert_eq!(first["data"]["userInfo"]["nickName"], "alice");
    assert_eq!(first["data"]["userInfo"]["id"], second["data"]["userInfo"]["id"]);
    assert_eq!(second["data"]["userInfo"]["avatarUrl"], "a.png");
}

#[tokio::test]
async fn login_fails_validation() {
    let address = spawn_app().await;
    let client = reqwest::Client::new();

    // Act: empty nickname
    let response = client
        .post(format!("{}/api/user/login", address))
        .json(&serde_json::json!({ "nickName": "", "avatarUrl": "" }))
        .send()
        .await
        .unwrap();

    // Assert
    assert_eq!(response.status().as_u16(), 400);
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["kind"], "bad_request");
}

#[tokio::test]
async fn login_without_nickname_gets_json_error() {
    let address = spawn_app().await;
    let client = reqwest::Client::new();

    let response = client
        .post(format!("{}/api/user/login", address))
        .json(&serde_json::json!({ "avatarUrl": "a.png" }))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status().as_u16(), 400);
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["code"], 400);
    assert_eq!(body["kind"], "bad_request");
    assert!(body["data"].is_null());
}

#[tokio::test]
async fn protected_routes_require_token() {
    let address = spawn_app().await;
    let client = reqwest::Client::new();

    for path in ["/api/user/stats", "/api/user/profile", "/api/ranking/list", "/api/quiz/history"] {
        let response = client
            .get(format!("{}{}", address, path))
            .send()
            .await
            .unwrap();
        assert_eq!(response.status().as_u16(), 401, "{} should need a token", path);
    }

    let response = client
        .get(format!("{}/api/user/stats", address))
        .header("Authorization", "Bearer not-a-jwt")
        .send()
        .await
        .unwrap();
    assert_eq!(response.status().as_u16(), 401);
}

#[tokio::test]
async fn submit_and_stats_flow() {
    // Arrange
    let address = spawn_app().await;
    let client = reqwest::Client::new();
    let token = login(&client, &address, "alice").await;

    // Fresh account starts at zero
    let stats: serde_json::Value = client
        .get(format!("{}/api/user/stats", address))
        .bearer_auth(&token)
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(stats["data"]["totalScore"], 0);
    assert_eq!(stats["data"]["accuracy"], 0.0);

    // First submission
    let submit = client
        .post(format!("{}/api/quiz/submit", address))
        .bearer_auth(&token)
        .json(&serde_json::json!({
            "totalQuestions": 10,
            "correctAnswers": 8,
            "score": 80,
            "totalTime": 120
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(submit.status().as_u16(), 200);
    let submit: serde_json::Value = submit.json().await.unwrap();
    assert!(submit["data"]["quizId"].as_str().unwrap().starts_with("quiz_"));
    assert!(submit["data"]["submittedAt"].as_str().unwrap().ends_with('Z'));

    let stats: serde_json::Value = client
        .get(format!("{}/api/user/stats", address))
        .bearer_auth(&token)
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(stats["data"]["totalQuizzes"], 10);
    assert_eq!(stats["data"]["totalScore"], 80);
    assert_eq!(stats["data"]["accuracy"], 80.0);
    assert_eq!(stats["data"]["ranking"], 1);

    // Second submission
    client
        .post(format!("{}/api/quiz/submit", address))
        .bearer_auth(&token)
        .json(&serde_json::json!({
            "totalQuestions": 10,
            "correctAnswers": 10,
            "score": 100,
            "totalTime": 95
        }))
        .send()
        .await
        .unwrap();

    let stats: serde_json::Value = client
        .get(format!("{}/api/user/stats", address))
        .bearer_auth(&token)
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(stats["data"]["totalQuizzes"], 20);
    assert_eq!(stats["data"]["totalScore"], 180);
    assert_eq!(stats["data"]["accuracy"], 90.0);

    let history: serde_json::Value = client
        .get(format!("{}/api/quiz/history?limit=5", address))
        .bearer_auth(&token)
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    let entries = history["data"].as_array().unwrap();
    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0]["score"], 100);
    assert_eq!(entries[1]["totalTime"], 120);
}

#[tokio::test]
async fn invalid_submission_is_rejected_without_write() {
    let address = spawn_app().await;
    let client = reqwest::Client::new();
    let token = login(&client, &address, "mallory").await;

    let response = client
        .post(format!("{}/api/quiz/submit", address))
        .bearer_auth(&token)
        .json(&serde_json::json!({
            "totalQuestions": 5,
            "correctAnswers": 7,
            "score": 70,
            "totalTime": 30
        }))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status().as_u16(), 400);
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["kind"], "invalid_submission");
    assert_eq!(body["code"], 400);

    let stats: serde_json::Value = client
        .get(format!("{}/api/user/stats", address))
        .bearer_auth(&token)
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(stats["data"]["totalQuizzes"], 0);
    assert_eq!(stats["data"]["totalScore"], 0);
}

#[tokio::test]
async fn profile_returns_display_name_and_avatar() {
    let address = spawn_app().await;
    let client = reqwest::Client::new();
    let token = login(&client, &address, "bob").await;

    let profile: serde_json::Value = client
        .get(format!("{}/api/user/profile", address))
        .bearer_auth(&token)
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    assert_eq!(profile["data"]["nickName"], "bob");
    assert_eq!(profile["data"]["avatarUrl"], "https://img.example/bob.png");
}

#[tokio::test]
async fn leaderboard_ranks_and_clamps() {
    let address = spawn_app().await;
    let client = reqwest::Client::new();

    // 30 each for two accounts, 50 for one, 10 for one
    for (name, score) in [("p1", 30), ("p2", 50), ("p3", 30), ("p4", 10)] {
        let token = login(&client, &address, name).await;
        client
            .post(format!("{}/api/quiz/submit", address))
            .bearer_auth(&token)
            .json(&serde_json::json!({
                "totalQuestions": 5,
                "correctAnswers": 3,
                "score": score,
                "totalTime": 10
            }))
            .send()
            .await
            .unwrap();
    }
    let token = login(&client, &address, "p1").await;

    let board: serde_json::Value = client
        .get(format!("{}/api/ranking/list?page=0&limit=500", address))
        .bearer_auth(&token)
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    assert_eq!(board["page"], 1);
    assert_eq!(board["limit"], 20);
    assert_eq!(board["total"], 4);

    let ranks: Vec<(String, i64)> = board["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|e| {
            (
                e["nickName"].as_str().unwrap().to_string(),
                e["rank"].as_i64().unwrap(),
            )
        })
        .collect();
    assert_eq!(
        ranks,
        vec![
            ("p2".to_string(), 1),
            ("p1".to_string(), 2),
            ("p3".to_string(), 2),
            ("p4".to_string(), 4),
        ]
    );
    assert_eq!(board["data"][0]["accuracy"], 60.0);
    assert_eq!(board["data"][0]["correct_answers"], 3);

    // Second page of size 2 continues the global numbering
    let page_two: serde_json::Value = client
        .get(format!("{}/api/ranking/list?page=2&limit=2", address))
        .bearer_auth(&token)
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(page_two["data"][0]["nickName"], "p3");
    assert_eq!(page_two["data"][0]["rank"], 2);
    assert_eq!(page_two["data"][1]["rank"], 4);

    // Garbage paging values fall back to defaults
    let garbage = client
        .get(format!("{}/api/ranking/list?page=abc&limit=xyz", address))
        .bearer_auth(&token)
        .send()
        .await
        .unwrap();
    assert_eq!(garbage.status().as_u16(), 200);
    let garbage: serde_json::Value = garbage.json().await.unwrap();
    assert_eq!(garbage["page"], 1);
    assert_eq!(garbage["limit"], 20);
}

#[tokio::test]
async fn malformed_submission_body_is_an_invalid_submission() {
    let address = spawn_app().await;
    let client = reqwest::Client::new();
    let token = login(&client, &address, "trent").await;

    let bodies = [
        // totalTime missing
        serde_json::json!({ "totalQuestions": 5, "correctAnswers": 2, "score": 10 }),
        // fractional count
        serde_json::json!({
            "totalQuestions": 1.5,
            "correctAnswers": 1,
            "score": 10,
            "totalTime": 30
        }),
    ];

    for payload in bodies {
        let response = client
            .post(format!("{}/api/quiz/submit", address))
            .bearer_auth(&token)
            .json(&payload)
            .send()
            .await
            .unwrap();

        assert_eq!(response.status().as_u16(), 400, "{}", payload);
        let body: serde_json::Value = response.json().await.unwrap();
        assert_eq!(body["code"], 400);
        assert_eq!(body["kind"], "invalid_submission");
        assert!(body["message"].as_str().is_some_and(|m| !m.is_empty()));
    }

    let stats: serde_json::Value = client
        .get(format!("{}/api/user/stats", address))
        .bearer_auth(&token)
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(stats["data"]["totalQuizzes"], 0);
}
