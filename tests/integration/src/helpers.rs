//! Test helpers for integration tests
//!
//! A [`TestServer`] owns one server with a fresh in-memory ledger, so tests never
//! share balances or presence.

use std::collections::HashMap;
use std::net::SocketAddr;
use std::time::Duration;

use anyhow::{Context, Result};
use futures_util::{SinkExt, StreamExt};
use live_common::{AppConfig, JwtService};
use live_core::{AccountRole, Snowflake};
use live_gateway::{create_server, GatewayState};
use reqwest::{Client, Response, StatusCode};
use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value;
use tokio::net::{TcpListener, TcpStream};
use tokio::task::JoinHandle;
use tokio_tungstenite::tungstenite::Message;
use tokio_tungstenite::{connect_async, MaybeTlsStream, WebSocketStream};

pub const TEST_JWT_SECRET: &str = "integration-secret-key-that-is-long-enough";

/// How long a socket read may wait before the test fails
const RECV_TIMEOUT: Duration = Duration::from_secs(5);

/// Memory-backed configuration with limits loose enough for burst tests
pub fn test_config() -> Result<AppConfig> {
    let vars: HashMap<&str, &str> = [
        ("APP_ENV", "development"),
        ("SERVER_HOST", "127.0.0.1"),
        ("SERVER_PORT", "0"),
        ("JWT_SECRET", TEST_JWT_SECRET),
        ("LEDGER_BACKEND", "memory"),
        ("RATE_LIMIT_REQUESTS_PER_SECOND", "1000"),
        ("RATE_LIMIT_BURST", "1000"),
        ("GATEWAY_IDLE_TIMEOUT_SECS", "0"),
    ]
    .into_iter()
    .collect();

    AppConfig::from_lookup(|key| vars.get(key).map(|v| (*v).to_string()))
        .map_err(|e| anyhow::anyhow!("Config error: {e}"))
}

/// Test server instance that manages lifecycle
pub struct TestServer {
    pub addr: SocketAddr,
    pub client: Client,
    pub state: GatewayState,
    jwt: JwtService,
    _handle: JoinHandle<()>,
}

impl TestServer {
    pub async fn start() -> Result<Self> {
        let config = test_config()?;
        let jwt = JwtService::new(&config.jwt.secret, config.jwt.access_token_expiry);

        let (app, state) = create_server(config).await?;

        let listener = TcpListener::bind("127.0.0.1:0").await?;
        let addr = listener.local_addr()?;

        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.ok();
        });

        let client = Client::builder().timeout(Duration::from_secs(10)).build()?;

        Ok(Self {
            addr,
            client,
            state,
            jwt,
            _handle: handle,
        })
    }

    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    pub fn ws_url(&self) -> String {
        format!("ws://{}/ws", self.addr)
    }

    /// Bearer token for an account; the account itself appears lazily on first use
    pub fn token(&self, id: Snowflake, role: AccountRole, name: &str) -> Result<String> {
        Ok(self.jwt.issue_access_token(id, role, Some(name.to_string()))?)
    }

    pub async fn get(&self, path: &str) -> Result<Response> {
        let url = format!("{}{}", self.base_url(), path);
        Ok(self.client.get(&url).send().await?)
    }

    pub async fn get_auth(&self, path: &str, token: &str) -> Result<Response> {
        let url = format!("{}{}", self.base_url(), path);
        Ok(self.client.get(&url).bearer_auth(token).send().await?)
    }

    pub async fn post_auth<T: Serialize>(&self, path: &str, token: &str, body: &T) -> Result<Response> {
        let url = format!("{}{}", self.base_url(), path);
        Ok(self.client.post(&url).bearer_auth(token).json(body).send().await?)
    }

    pub async fn put_auth<T: Serialize>(&self, path: &str, token: &str, body: &T) -> Result<Response> {
        let url = format!("{}{}", self.base_url(), path);
        Ok(self.client.put(&url).bearer_auth(token).json(body).send().await?)
    }

    pub async fn delete_auth(&self, path: &str, token: &str) -> Result<Response> {
        let url = format!("{}{}", self.base_url(), path);
        Ok(self.client.delete(&url).bearer_auth(token).send().await?)
    }

    pub async fn connect(&self) -> Result<WsClient> {
        let (stream, _) = connect_async(self.ws_url()).await?;
        Ok(WsClient { stream })
    }
}

/// Gateway client speaking the `{event, data}` protocol
pub struct WsClient {
    stream: WebSocketStream<MaybeTlsStream<TcpStream>>,
}

impl WsClient {
    pub async fn emit(&mut self, event: &str, data: Value) -> Result<()> {
        let frame = serde_json::json!({ "event": event, "data": data });
        self.stream.send(Message::Text(frame.to_string())).await?;
        Ok(())
    }

    /// Next server event as `(name, data)`
    pub async fn recv(&mut self) -> Result<(String, Value)> {
        loop {
            let msg = tokio::time::timeout(RECV_TIMEOUT, self.stream.next())
                .await
                .context("timed out waiting for a gateway event")?
                .context("gateway stream ended")??;

            match msg {
                Message::Text(text) => {
                    let mut value: Value = serde_json::from_str(&text)?;
                    let name = value["event"]
                        .as_str()
                        .context("event without a name")?
                        .to_string();
                    return Ok((name, value["data"].take()));
                }
                Message::Close(frame) => anyhow::bail!("gateway closed the socket: {frame:?}"),
                _ => {}
            }
        }
    }

    /// Skip events until one named `name` arrives
    pub async fn recv_event(&mut self, name: &str) -> Result<Value> {
        loop {
            let (event, data) = self.recv().await?;
            if event == name {
                return Ok(data);
            }
        }
    }

    /// Wait for the server's close frame and return its code
    pub async fn recv_close(&mut self) -> Result<u16> {
        loop {
            let msg = tokio::time::timeout(RECV_TIMEOUT, self.stream.next())
                .await
                .context("timed out waiting for close")?
                .context("gateway stream ended without a close frame")??;
            if let Message::Close(frame) = msg {
                return frame.map(|f| u16::from(f.code)).context("close frame without a code");
            }
        }
    }

    pub async fn send_raw(&mut self, msg: Message) -> Result<()> {
        self.stream.send(msg).await?;
        Ok(())
    }

    pub async fn close(mut self) -> Result<()> {
        self.stream.close(None).await?;
        Ok(())
    }
}

/// Assert response status and parse JSON body
pub async fn assert_json<T: DeserializeOwned>(response: Response, expected_status: StatusCode) -> Result<T> {
    let status = response.status();
    if status != expected_status {
        let body = response.text().await?;
        anyhow::bail!("Expected status {expected_status}, got {status}. Body: {body}");
    }
    Ok(response.json().await?)
}

/// Assert response status without parsing body
pub async fn assert_status(response: Response, expected_status: StatusCode) -> Result<()> {
    let status = response.status();
    if status != expected_status {
        let body = response.text().await?;
        anyhow::bail!("Expected status {expected_status}, got {status}. Body: {body}");
    }
    Ok(())
}

/// Poll until `check` holds; presence cleanup runs after the socket task ends
pub async fn eventually<F: Fn() -> bool>(check: F) -> bool {
    for _ in 0..50 {
        if check() {
            return true;
        }
        tokio::time::sleep(Duration::from_millis(20)).await;
    }
    check()
}
