//! WebSocket connection of the terminal client.
//!
//! Three parts run side by side: a writer task encoding queued
//! [`ClientMessage`]s, a reader task applying server frames to the shared
//! [`ClientSession`], and the blocking prompt.

use std::{io::Stdout, sync::Arc};

use futures_util::{SinkExt, StreamExt};
use rakugaki_server::infrastructure::dto::websocket::ClientMessage;
use rakugaki_shared::time::get_jst_timestamp;
use tokio::sync::{Mutex, mpsc};
use tokio_tungstenite::{connect_async, tungstenite::Message};

use crate::{
    config::ClientArgs, error::ClientError, prompt::run_prompt, renderer::TextRenderer,
    session::ClientSession,
};

type SharedSession = Arc<Mutex<ClientSession<TextRenderer<Stdout>>>>;

/// Connect, join and run the prompt until the user quits or the server goes away.
pub async fn run_client(args: ClientArgs) -> Result<(), ClientError> {
    let (socket, _) = connect_async(args.url.as_str())
        .await
        .map_err(|source| ClientError::Connect {
            url: args.url.clone(),
            source,
        })?;
    tracing::info!("Connected to {}", args.url);
    let (mut sink, mut stream) = socket.split();

    let session: SharedSession = Arc::new(Mutex::new(ClientSession::new(TextRenderer::stdout())));
    let (tx, mut rx) = mpsc::unbounded_channel::<ClientMessage>();

    let mut send_task = tokio::spawn(async move {
        while let Some(message) = rx.recv().await {
            let text = message.encode().map_err(ClientError::Encode)?;
            tracing::debug!("-> {}", message.message_type());
            if sink.send(Message::Text(text.into())).await.is_err() {
                return Err(ClientError::ConnectionClosed);
            }
        }
        let _ = sink.close().await;
        Ok(())
    });

    let reader_session = Arc::clone(&session);
    let mut recv_task = tokio::spawn(async move {
        while let Some(frame) = stream.next().await {
            match frame {
                Ok(Message::Text(text)) => {
                    let mut session = reader_session.lock().await;
                    if let Err(e) = session.handle_text(text.as_str(), get_jst_timestamp()) {
                        tracing::warn!("Ignoring server frame: {}", e);
                    }
                }
                Ok(Message::Close(_)) => break,
                Ok(_) => {}
                Err(e) => {
                    tracing::warn!("WebSocket error: {}", e);
                    break;
                }
            }
        }
    });

    let name = args.name.clone();
    let mut prompt_task = tokio::task::spawn_blocking(move || run_prompt(name, session, tx));

    // The prompt thread cannot be cancelled; the caller exits the process
    // once this returns.
    let result = tokio::select! {
        joined = &mut prompt_task => match joined {
            Ok(result) => result,
            Err(e) => {
                tracing::error!("Prompt task failed: {}", e);
                Err(ClientError::ConnectionClosed)
            }
        },
        _ = &mut recv_task => Err(ClientError::ConnectionClosed),
        sent = &mut send_task => match sent {
            Ok(Err(e)) => Err(e),
            _ => Err(ClientError::ConnectionClosed),
        },
    };

    recv_task.abort();
    send_task.abort();
    result
}
