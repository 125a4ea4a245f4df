// WebSocket client utilities for testing

use std::time::Duration;

use futures_util::{SinkExt, StreamExt};
use serde_json::Value;
use tokio::net::TcpStream;
use tokio_tungstenite::tungstenite::Message;
use tokio_tungstenite::{connect_async, MaybeTlsStream, WebSocketStream};

/// WebSocket test client
pub struct WebSocketClient {
    stream: WebSocketStream<MaybeTlsStream<TcpStream>>,
}

impl WebSocketClient {
    /// Connect to a WebSocket endpoint
    pub async fn connect(url: &str) -> Result<Self, Box<dyn std::error::Error>> {
        let (stream, _) = connect_async(url).await?;
        Ok(Self { stream })
    }

    /// Receive the next message with a timeout
    pub async fn recv_timeout(
        &mut self,
        timeout: Duration,
    ) -> Result<Option<Message>, Box<dyn std::error::Error>> {
        tokio::time::timeout(timeout, self.stream.next())
            .await
            .map_err(|_| "Timeout waiting for message")?
            .transpose()
            .map_err(|e| e.into())
    }

    /// Send a text message
    pub async fn send(&mut self, text: &str) -> Result<(), Box<dyn std::error::Error>> {
        self.stream.send(Message::Text(text.into())).await?;
        Ok(())
    }

    /// Close the connection
    pub async fn close(&mut self) -> Result<(), Box<dyn std::error::Error>> {
        self.stream.close(None).await?;
        Ok(())
    }

    /// Next *text* message parsed as JSON, skipping control frames
    /// (the server pings periodically).
    pub async fn recv_json_timeout(
        &mut self,
        timeout: Duration,
    ) -> Result<Value, Box<dyn std::error::Error>> {
        let deadline = tokio::time::Instant::now() + timeout;
        loop {
            let remaining = deadline
                .checked_duration_since(tokio::time::Instant::now())
                .ok_or("Timeout waiting for JSON message")?;
            match self.recv_timeout(remaining).await? {
                Some(Message::Text(text)) => {
                    let json: Value = serde_json::from_str(&text)?;
                    return Ok(json);
                }
                Some(_) => continue,
                None => return Err("Connection closed while waiting for JSON".into()),
            }
        }
    }

    /// Assert that no text message arrives within `window`.
    pub async fn expect_silence(
        &mut self,
        window: Duration,
    ) -> Result<(), Box<dyn std::error::Error>> {
        match self.recv_json_timeout(window).await {
            Ok(json) => Err(format!("expected silence, got {json}").into()),
            Err(_) => Ok(()),
        }
    }
}
