//! WebSocket gateway integration tests
//!
//! Run with: cargo test -p integration-tests --test gateway_tests

use integration_tests::{assert_json, assert_status, eventually, fixtures::*, TestServer};
use live_core::AccountRole;
use reqwest::StatusCode;
use serde_json::json;
use tokio_tungstenite::tungstenite::Message;

#[tokio::test]
async fn test_same_account_on_two_connections() {
    let server = TestServer::start().await.unwrap();
    let mut first = server.connect().await.unwrap();
    let mut second = server.connect().await.unwrap();
    let join = json!({ "streamerId": STREAMER_ID, "userId": SPECTATOR_ID, "userName": "bob" });

    first.emit("join-chat", join.clone()).await.unwrap();
    first.recv_event("viewers-updated").await.unwrap();

    second.emit("join-chat", join).await.unwrap();
    let list = second.recv_event("viewers-updated").await.unwrap();
    assert_eq!(list["count"], 2);
    assert_eq!(list["viewers"][0]["accountId"], list["viewers"][1]["accountId"]);
    let survivor = list["viewers"][1]["connectionId"].clone();

    let update = first.recv_event("viewers-updated").await.unwrap();
    assert_eq!(update["count"], 2);

    first.close().await.unwrap();

    let update = second.recv_event("viewers-updated").await.unwrap();
    assert_eq!(update["count"], 1);
    assert_eq!(update["viewers"][0]["connectionId"], survivor);

    let state = server.state.clone();
    assert!(eventually(|| state.presence().list(STREAMER_ID).len() == 1).await);
}

#[tokio::test]
async fn test_last_viewer_leaving_removes_room() {
    let server = TestServer::start().await.unwrap();
    let mut viewer = server.connect().await.unwrap();

    viewer.emit("join-chat", json!(STREAMER_ID)).await.unwrap();
    let list = viewer.recv_event("viewers-updated").await.unwrap();
    assert_eq!(list["viewers"][0]["displayName"], "Guest");

    viewer.close().await.unwrap();

    let state = server.state.clone();
    assert!(eventually(|| state.presence().room_count() == 0).await);
    assert!(eventually(|| state.connection_manager().connection_count() == 0).await);
}

#[tokio::test]
async fn test_http_gift_reaches_the_room() {
    let server = TestServer::start().await.unwrap();
    let mut watcher = server.connect().await.unwrap();
    let mut elsewhere = server.connect().await.unwrap();

    watcher.emit("join-chat", json!(STREAMER_ID)).await.unwrap();
    watcher.recv_event("viewers-updated").await.unwrap();
    elsewhere.emit("join-chat", json!("999")).await.unwrap();
    elsewhere.recv_event("viewers-updated").await.unwrap();

    let streamer_token = server.token(STREAMER_ID, AccountRole::Streamer, "sasha").unwrap();
    let response = server.post_auth("/api/gifts", &streamer_token, &rose()).await.unwrap();
    let gift: GiftBody = assert_json(response, StatusCode::CREATED).await.unwrap();

    let added = watcher.recv_event("gift-list-updated").await.unwrap();
    assert_eq!(added["name"], "Rose");

    let spectator_token = server.token(SPECTATOR_ID, AccountRole::Spectator, "bob").unwrap();
    let response = server
        .post_auth("/api/coins/purchase", &spectator_token, &purchase(12))
        .await
        .unwrap();
    assert_status(response, StatusCode::OK).await.unwrap();
    let response = server
        .post_auth("/api/gifts/send", &spectator_token, &send_gift(STREAMER_ID, gift.id, 1))
        .await
        .unwrap();
    assert_status(response, StatusCode::OK).await.unwrap();

    let received = watcher.recv_event("gift-received").await.unwrap();
    assert_eq!(received["giftName"], "Rose");
    assert_eq!(received["senderName"], "bob");
    assert_eq!(received["points"], 5);

    // the other room saw neither event; a viewer query is answered next instead
    elsewhere.emit("get-viewers", json!("999")).await.unwrap();
    let (name, _) = elsewhere.recv().await.unwrap();
    assert_eq!(name, "viewers-list");
}

#[tokio::test]
async fn test_chat_relay_is_verbatim() {
    let server = TestServer::start().await.unwrap();
    let mut a = server.connect().await.unwrap();
    let mut b = server.connect().await.unwrap();
    a.emit("join-chat", json!(STREAMER_ID)).await.unwrap();
    a.recv_event("viewers-updated").await.unwrap();
    b.emit("join-chat", json!(STREAMER_ID)).await.unwrap();
    b.recv_event("viewers-updated").await.unwrap();

    let message = json!({ "user": "bob", "text": "hello", "color": "#ff0" });
    b.emit("send-message", json!({ "streamerId": STREAMER_ID, "message": message }))
        .await
        .unwrap();

    assert_eq!(a.recv_event("new-message").await.unwrap(), message);
    assert_eq!(b.recv_event("new-message").await.unwrap(), message);
}

#[tokio::test]
async fn test_status_changes_reach_every_client() {
    let server = TestServer::start().await.unwrap();
    let mut streamer = server.connect().await.unwrap();
    let mut lobby = server.connect().await.unwrap();

    streamer
        .emit("streamer-went-live", json!({ "streamerId": STREAMER_ID, "channelName": "cozy" }))
        .await
        .unwrap();
    let status = lobby.recv_event("streamer-status-changed").await.unwrap();
    assert_eq!(status["isLive"], true);
    assert_eq!(status["channelName"], "cozy");

    streamer
        .emit("streamer-went-offline", json!({ "streamerId": STREAMER_ID }))
        .await
        .unwrap();
    let status = lobby.recv_event("streamer-status-changed").await.unwrap();
    assert_eq!(status["isLive"], false);
    assert!(status["channelName"].is_null());
}

#[tokio::test]
async fn test_switching_rooms_updates_both() {
    let server = TestServer::start().await.unwrap();
    let mut mover = server.connect().await.unwrap();
    let mut stayer = server.connect().await.unwrap();

    stayer.emit("join-chat", json!("1")).await.unwrap();
    stayer.recv_event("viewers-updated").await.unwrap();
    mover.emit("join-chat", json!("1")).await.unwrap();
    mover.recv_event("viewers-updated").await.unwrap();
    stayer.recv_event("viewers-updated").await.unwrap();

    mover.emit("join-chat", json!("2")).await.unwrap();
    let joined = mover.recv_event("viewers-updated").await.unwrap();
    assert_eq!(joined["streamerId"], "2");
    assert_eq!(joined["count"], 1);

    let vacated = stayer.recv_event("viewers-updated").await.unwrap();
    assert_eq!(vacated["streamerId"], "1");
    assert_eq!(vacated["count"], 1);
}

#[tokio::test]
async fn test_malformed_frame_closes_with_decode_error() {
    let server = TestServer::start().await.unwrap();
    let mut client = server.connect().await.unwrap();

    client
        .send_raw(Message::Text("{not json".to_string()))
        .await
        .unwrap();
    assert_eq!(client.recv_close().await.unwrap(), 4002);
}

#[tokio::test]
async fn test_unknown_event_keeps_the_socket_open() {
    let server = TestServer::start().await.unwrap();
    let mut viewer = server.connect().await.unwrap();
    viewer.emit("join-chat", json!(STREAMER_ID)).await.unwrap();
    viewer.recv_event("viewers-updated").await.unwrap();

    viewer.emit("typing", json!({ "streamerId": STREAMER_ID })).await.unwrap();
    viewer.emit("get-viewers", json!(STREAMER_ID)).await.unwrap();

    let (name, list) = viewer.recv().await.unwrap();
    assert_eq!(name, "viewers-list");
    assert_eq!(list["count"], 1);
    assert_eq!(server.state.presence().list(STREAMER_ID).len(), 1);
}

#[tokio::test]
async fn test_binary_frame_is_rejected() {
    let server = TestServer::start().await.unwrap();
    let mut client = server.connect().await.unwrap();

    client.send_raw(Message::Binary(vec![1, 2, 3])).await.unwrap();
    assert_eq!(client.recv_close().await.unwrap(), 4003);
}
