//! HTTP API integration tests
//!
//! Each test boots its own server over the in-memory ledger.
//!
//! Run with: cargo test -p integration-tests --test api_tests

use futures_util::future::join_all;
use integration_tests::{assert_json, assert_status, fixtures::*, TestServer};
use live_core::AccountRole;
use reqwest::StatusCode;

async fn streamer_with_rose(server: &TestServer) -> (String, GiftBody) {
    let token = server.token(STREAMER_ID, AccountRole::Streamer, "sasha").unwrap();
    let response = server.post_auth("/api/gifts", &token, &rose()).await.unwrap();
    let gift: GiftBody = assert_json(response, StatusCode::CREATED).await.unwrap();
    (token, gift)
}

async fn spectator_with_coins(server: &TestServer, coins: i64) -> String {
    let token = server.token(SPECTATOR_ID, AccountRole::Spectator, "bob").unwrap();
    let response = server
        .post_auth("/api/coins/purchase", &token, &purchase(coins))
        .await
        .unwrap();
    assert_status(response, StatusCode::OK).await.unwrap();
    token
}

#[tokio::test]
async fn test_health_check() {
    let server = TestServer::start().await.expect("Failed to start server");

    let response = server.get("/health").await.unwrap();
    assert_status(response, StatusCode::OK).await.unwrap();

    let response = server.get("/health/ready").await.unwrap();
    assert_status(response, StatusCode::OK).await.unwrap();
}

#[tokio::test]
async fn test_missing_token_is_unauthorized() {
    let server = TestServer::start().await.unwrap();
    let response = server
        .client
        .post(format!("{}/api/coins/purchase", server.base_url()))
        .json(&purchase(10))
        .send()
        .await
        .unwrap();

    let body: ErrorEnvelope = assert_json(response, StatusCode::UNAUTHORIZED).await.unwrap();
    assert_eq!(body.error.code, "MISSING_AUTHORIZATION");
}

#[tokio::test]
async fn test_rose_transfer() {
    let server = TestServer::start().await.unwrap();
    let (streamer_token, gift) = streamer_with_rose(&server).await;
    let spectator_token = spectator_with_coins(&server, 12).await;

    assert_eq!(gift.streamer_id, STREAMER_ID);
    assert_eq!((gift.cost, gift.points), (10, 5));

    let response = server
        .post_auth("/api/gifts/send", &spectator_token, &send_gift(STREAMER_ID, gift.id, 1))
        .await
        .unwrap();
    let transfer: TransferBody = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(transfer.sender_coins, 2);
    assert_eq!(transfer.receiver_points, 5);
    assert_eq!(transfer.receiver_level, 1);

    let response = server
        .get_auth(&format!("/api/coins/balance/{SPECTATOR_ID}"), &spectator_token)
        .await
        .unwrap();
    let balance: BalanceBody = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(balance.id, SPECTATOR_ID);
    assert_eq!(balance.coins, 2);

    let response = server
        .get_auth(&format!("/api/gifts/history/{STREAMER_ID}"), &streamer_token)
        .await
        .unwrap();
    let history: Vec<serde_json::Value> = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(history.len(), 1);
    assert_eq!(history[0]["amount"], 10);
    assert_eq!(history[0]["giftName"], "Rose");
    assert_eq!(history[0]["senderName"], "bob");
}

#[tokio::test]
async fn test_insufficient_funds_reports_amounts() {
    let server = TestServer::start().await.unwrap();
    let (_, gift) = streamer_with_rose(&server).await;
    let spectator_token = spectator_with_coins(&server, 12).await;

    let response = server
        .post_auth("/api/gifts/send", &spectator_token, &send_gift(STREAMER_ID, gift.id, 2))
        .await
        .unwrap();
    let body: ErrorEnvelope = assert_json(response, StatusCode::BAD_REQUEST).await.unwrap();
    assert_eq!(body.error.code, "INSUFFICIENT_FUNDS");
    let details = body.error.details.expect("details");
    assert_eq!(details["required"], 20);
    assert_eq!(details["available"], 12);

    let response = server
        .get_auth(&format!("/api/coins/balance/{SPECTATOR_ID}"), &spectator_token)
        .await
        .unwrap();
    let balance: BalanceBody = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(balance.coins, 12);
}

#[tokio::test]
async fn test_concurrent_sends_never_double_spend() {
    let server = TestServer::start().await.unwrap();
    let (_, gift) = streamer_with_rose(&server).await;
    let spectator_token = spectator_with_coins(&server, 12).await;
    let body = send_gift(STREAMER_ID, gift.id, 1);

    let responses = join_all(
        (0..6).map(|_| server.post_auth("/api/gifts/send", &spectator_token, &body)),
    )
    .await;

    let statuses: Vec<StatusCode> = responses
        .into_iter()
        .map(|r| r.unwrap().status())
        .collect();
    let succeeded = statuses.iter().filter(|s| **s == StatusCode::OK).count();
    assert_eq!(succeeded, 1, "statuses: {statuses:?}");
    assert!(statuses
        .iter()
        .all(|s| matches!(*s, StatusCode::OK | StatusCode::BAD_REQUEST | StatusCode::CONFLICT)));

    let response = server
        .get_auth(&format!("/api/coins/balance/{SPECTATOR_ID}"), &spectator_token)
        .await
        .unwrap();
    let balance: BalanceBody = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(balance.coins, 2);

    let response = server
        .get_auth(&format!("/api/coins/balance/{STREAMER_ID}"), &spectator_token)
        .await
        .unwrap();
    let streamer: BalanceBody = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(streamer.points, 5);
}

#[tokio::test]
async fn test_level_tiers_drive_spectator_progress() {
    let server = TestServer::start().await.unwrap();
    let streamer_token = server.token(STREAMER_ID, AccountRole::Streamer, "sasha").unwrap();
    let levels_path = format!("/api/streamers/{STREAMER_ID}/levels");

    for (number, name, required) in [(1, "Newcomer", 0), (2, "Regular", 100), (3, "Superfan", 500)] {
        let response = server
            .post_auth(&levels_path, &streamer_token, &level_tier(number, name, required))
            .await
            .unwrap();
        assert_status(response, StatusCode::CREATED).await.unwrap();
    }

    let spectator_token = server.token(SPECTATOR_ID, AccountRole::Spectator, "bob").unwrap();
    let response = server
        .put_auth(
            "/api/spectators/me/points",
            &spectator_token,
            &serde_json::json!({ "pointsToAdd": 150, "streamerId": STREAMER_ID }),
        )
        .await
        .unwrap();
    let progress: ProgressBody = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(progress.points, 150);
    assert_eq!(progress.level, 2);

    let response = server
        .get_auth(
            &format!("/api/spectators/me/progress/{STREAMER_ID}"),
            &spectator_token,
        )
        .await
        .unwrap();
    let progress: ProgressBody = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!((progress.points, progress.level), (150, 2));
}

#[tokio::test]
async fn test_spectator_cannot_manage_someone_elses_tiers() {
    let server = TestServer::start().await.unwrap();
    let intruder = server
        .token(OTHER_SPECTATOR_ID, AccountRole::Spectator, "eve")
        .unwrap();

    let response = server
        .post_auth(
            &format!("/api/streamers/{STREAMER_ID}/levels"),
            &intruder,
            &level_tier(1, "Mine", 0),
        )
        .await
        .unwrap();
    assert!(response.status().is_client_error());
}

#[tokio::test]
async fn test_gift_catalog_lists_and_deletes() {
    let server = TestServer::start().await.unwrap();
    let (streamer_token, gift) = streamer_with_rose(&server).await;

    let response = server.get(&format!("/api/gifts/{STREAMER_ID}")).await.unwrap();
    let gifts: Vec<GiftBody> = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(gifts.len(), 1);
    assert_eq!(gifts[0].name, "Rose");

    let response = server
        .delete_auth(&format!("/api/gifts/{}", gift.id), &streamer_token)
        .await
        .unwrap();
    assert_status(response, StatusCode::NO_CONTENT).await.unwrap();

    let response = server.get("/api/gifts").await.unwrap();
    let gifts: Vec<GiftBody> = assert_json(response, StatusCode::OK).await.unwrap();
    assert!(gifts.is_empty());
}
