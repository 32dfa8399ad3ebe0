//! WebSocket transport for pushes

use super::types::PushFrame;
use crate::broadcast::{PushEvent, Subscription};
use axum::extract::ws::{Message, WebSocket};
use futures::{SinkExt, StreamExt};

/// Forward pushes to one socket until either side closes.
/// Incoming frames other than Close are ignored.
pub async fn handle_socket(socket: WebSocket, mut subscription: Subscription) {
    let (mut sender, mut receiver) = socket.split();
    let subscriber = subscription.id();

    loop {
        tokio::select! {
            event = subscription.recv() => {
                let Some(event) = event else { break };
                let text = match serde_json::to_string(&push_frame(&event)) {
                    Ok(text) => text,
                    Err(e) => {
                        tracing::error!(error = %e, "Failed to encode push frame");
                        continue;
                    }
                };
                if sender.send(Message::Text(text)).await.is_err() {
                    break;
                }
            }
            incoming = receiver.next() => match incoming {
                Some(Ok(Message::Close(_))) | None => break,
                Some(Err(e)) => {
                    tracing::debug!(%subscriber, error = %e, "WebSocket receive failed");
                    break;
                }
                Some(Ok(_)) => {}
            }
        }
    }

    tracing::debug!(%subscriber, "WebSocket closed");
}

fn push_frame(event: &PushEvent) -> PushFrame {
    PushFrame {
        event: event.topic().as_str().to_string(),
        data: event.payload(),
    }
}
