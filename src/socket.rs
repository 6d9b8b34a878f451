//! WebSocket channel: each filter change from the browser is answered with
//! one `Render` message built from a single filtered snapshot.

use axum::{
    extract::{
        ws::{Message, WebSocket, WebSocketUpgrade},
        State,
    },
    response::IntoResponse,
};
use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::dashboard::render;
use crate::types::{AppState, ClientMessage, WsMessage};

pub async fn ws_handler(
    ws: WebSocketUpgrade,
    State(state): State<Arc<AppState>>,
) -> impl IntoResponse {
    ws.on_upgrade(|socket| handle_socket(socket, state))
}

async fn handle_socket(mut socket: WebSocket, state: Arc<AppState>) {
    info!("WebSocket client connected");

    let welcome = encode(&WsMessage::Layout(&state.context.layout));
    if socket.send(Message::Text(welcome.into())).await.is_err() {
        return;
    }

    while let Some(msg) = socket.recv().await {
        let text = match msg {
            Ok(Message::Text(text)) => text,
            Ok(Message::Close(_)) => break,
            Ok(_) => continue,
            Err(e) => {
                warn!("WebSocket error: {}", e);
                break;
            }
        };

        let reply = respond(&state, &text);
        if socket.send(Message::Text(reply.into())).await.is_err() {
            break;
        }
    }

    info!("WebSocket client disconnected");
}

/// Answer one client message with one encoded server message
pub fn respond(state: &AppState, text: &str) -> String {
    let context = &state.context;

    let client_msg = match serde_json::from_str::<ClientMessage>(text) {
        Ok(msg) => msg,
        Err(e) => {
            warn!("Unrecognized client message: {}", e);
            return encode(&WsMessage::Error {
                message: format!("unrecognized message: {e}"),
            });
        }
    };

    match client_msg {
        ClientMessage::Filter(request) => match request.into_criteria() {
            Ok(criteria) => {
                debug!("Filter change: {:?}", criteria);
                encode(&WsMessage::Render(render(&criteria, &context.table)))
            }
            Err(e) => encode(&WsMessage::Error {
                message: e.to_string(),
            }),
        },
        ClientMessage::Layout => encode(&WsMessage::Layout(&context.layout)),
        ClientMessage::Summary => encode(&WsMessage::Summary {
            summary: &context.summary,
        }),
    }
}

fn encode(msg: &WsMessage<'_>) -> String {
    serde_json::to_string(msg).unwrap_or_else(|e| {
        format!(r#"{{"type":"Error","message":"failed to encode response: {e}"}}"#)
    })
}
