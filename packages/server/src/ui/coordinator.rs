//! Session coordinator.
//!
//! One task owns the outbound channel of every connection and handles every
//! inbound message, one at a time. A mutation and the broadcasts it produces
//! are therefore enqueued before the next message is looked at, so all
//! connections observe `canvas:state` and `users:update` in mutation order.

use std::{collections::HashMap, sync::Arc};

use thiserror::Error;
use tokio::sync::{mpsc, oneshot};

use crate::{
    domain::{SessionRepository, UserId},
    infrastructure::dto::websocket::{ClientMessage, ServerMessage, StrokeDto},
    usecase::{
        CommitStrokeUseCase, ConnectError, ConnectParticipantUseCase,
        DisconnectParticipantUseCase, EditHistoryUseCase, JoinSessionUseCase, LiveStrokeRelay,
        MoveCursorUseCase,
    },
};

/// Requests sent from connection handlers to the coordinator
#[derive(Debug)]
pub enum Command {
    /// A socket was upgraded; register it and reply with its identity
    Connect {
        sender: mpsc::UnboundedSender<String>,
        reply: oneshot::Sender<Result<UserId, ConnectError>>,
    },
    /// A decoded frame, with the original text for verbatim relaying
    Inbound {
        user_id: UserId,
        message: ClientMessage,
        raw: String,
    },
    /// The socket closed
    Disconnect { user_id: UserId },
}

#[derive(Debug, Error)]
pub enum CoordinatorError {
    #[error("session coordinator is not running")]
    Unavailable,

    #[error(transparent)]
    Connect(#[from] ConnectError),
}

/// Cloneable handle used by the WebSocket handlers
#[derive(Debug, Clone)]
pub struct CoordinatorHandle {
    tx: mpsc::UnboundedSender<Command>,
}

impl CoordinatorHandle {
    /// Register a new connection and obtain its server-generated identity.
    pub async fn connect(
        &self,
        sender: mpsc::UnboundedSender<String>,
    ) -> Result<UserId, CoordinatorError> {
        let (reply, rx) = oneshot::channel();
        self.tx
            .send(Command::Connect { sender, reply })
            .map_err(|_| CoordinatorError::Unavailable)?;
        let user_id = rx.await.map_err(|_| CoordinatorError::Unavailable)??;
        Ok(user_id)
    }

    pub fn inbound(
        &self,
        user_id: UserId,
        message: ClientMessage,
        raw: String,
    ) -> Result<(), CoordinatorError> {
        self.tx
            .send(Command::Inbound {
                user_id,
                message,
                raw,
            })
            .map_err(|_| CoordinatorError::Unavailable)
    }

    pub fn disconnect(&self, user_id: UserId) -> Result<(), CoordinatorError> {
        self.tx
            .send(Command::Disconnect { user_id })
            .map_err(|_| CoordinatorError::Unavailable)
    }
}

/// Outbound side of one connection
///
/// Join state lives on the registry's participant only.
struct ClientInfo {
    sender: mpsc::UnboundedSender<String>,
}

/// Owns the connection roster and drives the use cases.
pub struct SessionCoordinator {
    connect: ConnectParticipantUseCase,
    join: JoinSessionUseCase,
    disconnect: DisconnectParticipantUseCase,
    commit: CommitStrokeUseCase,
    history: EditHistoryUseCase,
    cursor: MoveCursorUseCase,
    relay: LiveStrokeRelay,
    clients: HashMap<UserId, ClientInfo>,
    require_join: bool,
}

impl SessionCoordinator {
    pub fn new(repository: Arc<dyn SessionRepository>, require_join: bool) -> Self {
        Self {
            connect: ConnectParticipantUseCase::new(repository.clone()),
            join: JoinSessionUseCase::new(repository.clone()),
            disconnect: DisconnectParticipantUseCase::new(repository.clone()),
            commit: CommitStrokeUseCase::new(repository.clone()),
            history: EditHistoryUseCase::new(repository.clone()),
            cursor: MoveCursorUseCase::new(repository),
            relay: LiveStrokeRelay::new(),
            clients: HashMap::new(),
            require_join,
        }
    }

    /// Start the coordinator task and return a handle to it.
    ///
    /// The task ends once every handle has been dropped.
    #[must_use]
    pub fn spawn(self) -> CoordinatorHandle {
        let (tx, rx) = mpsc::unbounded_channel();
        tokio::spawn(self.run(rx));
        CoordinatorHandle { tx }
    }

    async fn run(mut self, mut rx: mpsc::UnboundedReceiver<Command>) {
        tracing::debug!(require_join = self.require_join, "session coordinator started");
        while let Some(command) = rx.recv().await {
            self.handle(command).await;
        }
        tracing::debug!("session coordinator stopped");
    }

    async fn handle(&mut self, command: Command) {
        match command {
            Command::Connect { sender, reply } => self.on_connect(sender, reply).await,
            Command::Inbound {
                user_id,
                message,
                raw,
            } => self.on_message(user_id, message, raw).await,
            Command::Disconnect { user_id } => self.on_disconnect(user_id).await,
        }
    }

    async fn on_connect(
        &mut self,
        sender: mpsc::UnboundedSender<String>,
        reply: oneshot::Sender<Result<UserId, ConnectError>>,
    ) {
        let participant = match self.connect.execute().await {
            Ok(participant) => participant,
            Err(e) => {
                tracing::warn!("Failed to register connection: {}", e);
                let _ = reply.send(Err(e));
                return;
            }
        };

        let user_id = participant.id.clone();
        self.clients.insert(
            user_id.clone(),
            ClientInfo { sender },
        );
        if reply.send(Ok(user_id.clone())).is_err() {
            // The handler went away before the upgrade finished.
            self.on_disconnect(user_id).await;
            return;
        }
        tracing::info!(
            "Participant '{}' connected with color {}",
            user_id,
            participant.color
        );

        let roster = self.connect.build_roster().await;
        self.broadcast_all(&ServerMessage::UsersUpdate { users: roster });
    }

    async fn on_message(&mut self, user_id: UserId, message: ClientMessage, raw: String) {
        if !self.clients.contains_key(&user_id) {
            tracing::debug!(
                "Dropping {} from closed connection '{}'",
                message.message_type(),
                user_id
            );
            return;
        }
        if self.require_join && message.is_drawing() && !self.join.is_joined(&user_id).await {
            tracing::debug!(
                "Dropping {} from '{}' before user:join",
                message.message_type(),
                user_id
            );
            return;
        }

        match message {
            ClientMessage::UserJoin { name } => self.on_join(&user_id, name.as_deref()).await,
            ClientMessage::StrokeStart(payload) => {
                self.relay.start(&user_id, &payload.stroke_id);
                tracing::debug!(
                    "Live stroke '{}' started by '{}' ({} open)",
                    payload.stroke_id,
                    user_id,
                    self.relay.open_count()
                );
                self.broadcast_raw_except(&raw, &user_id);
            }
            ClientMessage::StrokePoint(_) => self.broadcast_raw_except(&raw, &user_id),
            ClientMessage::StrokeEnd { stroke } => self.on_stroke_end(&user_id, stroke, &raw).await,
            ClientMessage::UndoRequest => {
                if let Some(strokes) = self.history.undo().await {
                    self.broadcast_all(&ServerMessage::CanvasState { strokes });
                }
            }
            ClientMessage::RedoRequest => {
                if let Some(strokes) = self.history.redo().await {
                    self.broadcast_all(&ServerMessage::CanvasState { strokes });
                }
            }
            ClientMessage::CanvasClear => {
                let strokes = self.history.clear().await;
                tracing::info!("Canvas cleared by '{}'", user_id);
                self.broadcast_all(&ServerMessage::CanvasState { strokes });
            }
            ClientMessage::CursorMove(request) => {
                if let Some(payload) = self.cursor.execute(&user_id, request).await {
                    self.broadcast_all(&ServerMessage::CursorMove(payload));
                }
            }
        }
    }

    async fn on_join(&mut self, user_id: &UserId, name: Option<&str>) {
        let outcome = match self.join.execute(user_id, name).await {
            Ok(outcome) => outcome,
            Err(e) => {
                tracing::warn!("Failed to join '{}': {}", user_id, e);
                return;
            }
        };
        tracing::info!("Participant '{}' joined as '{}'", user_id, outcome.init.name);

        self.send_to(user_id, &ServerMessage::UserInit(outcome.init));
        self.broadcast_all(&ServerMessage::UsersUpdate {
            users: outcome.roster,
        });
    }

    async fn on_stroke_end(&mut self, user_id: &UserId, stroke: StrokeDto, raw: &str) {
        self.relay.end(user_id, &stroke.id);
        self.broadcast_raw_except(raw, user_id);

        match self.commit.execute(user_id, stroke).await {
            Ok(strokes) => {
                tracing::debug!("Stroke committed by '{}' ({} in history)", user_id, strokes.len());
                self.broadcast_all(&ServerMessage::CanvasState { strokes });
            }
            Err(e) => tracing::warn!("Rejected stroke from '{}': {}", user_id, e),
        }
    }

    async fn on_disconnect(&mut self, user_id: UserId) {
        if self.clients.remove(&user_id).is_none() {
            return;
        }

        for cancel in self.relay.abandon(&user_id) {
            tracing::debug!("Cancelling live stroke '{}' of '{}'", cancel.stroke_id, user_id);
            self.broadcast_all(&ServerMessage::StrokeCancel(cancel));
        }

        match self.disconnect.execute(&user_id).await {
            Ok((_, roster)) => {
                tracing::info!(
                    "Participant '{}' disconnected ({} remaining)",
                    user_id,
                    roster.len()
                );
                self.broadcast_all(&ServerMessage::UsersUpdate { users: roster });
            }
            Err(e) => tracing::warn!("Failed to disconnect '{}': {}", user_id, e),
        }
    }

    fn send_to(&self, user_id: &UserId, message: &ServerMessage) {
        let Some(text) = encode(message) else {
            return;
        };
        if let Some(client) = self.clients.get(user_id) {
            let _ = client.sender.send(text);
        }
    }

    fn broadcast_all(&self, message: &ServerMessage) {
        if let Some(text) = encode(message) {
            self.fan_out(&text, None);
        }
    }

    fn broadcast_raw_except(&self, raw: &str, exclude: &UserId) {
        self.fan_out(raw, Some(exclude));
    }

    /// Best-effort: a closed channel is skipped, its close event cleans it up.
    fn fan_out(&self, text: &str, exclude: Option<&UserId>) {
        for (id, client) in &self.clients {
            if exclude == Some(id) {
                continue;
            }
            if client.sender.send(text.to_string()).is_err() {
                tracing::debug!("Skipping closed connection '{}'", id);
            }
        }
    }
}

fn encode(message: &ServerMessage) -> Option<String> {
    match message.encode() {
        Ok(text) => Some(text),
        Err(e) => {
            tracing::error!("Failed to encode server message: {}", e);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        domain::{DisplayName, Session, Timestamp},
        infrastructure::{
            dto::websocket::{StrokePointPayload, StrokeStartPayload, decode_client_message},
            repository::InMemorySessionRepository,
        },
    };
    use serde_json::{Value, json};
    use tokio::sync::Mutex;

    struct Peer {
        id: UserId,
        rx: mpsc::UnboundedReceiver<String>,
    }

    impl Peer {
        fn drain(&mut self) -> Vec<Value> {
            let mut frames = Vec::new();
            while let Ok(text) = self.rx.try_recv() {
                frames.push(serde_json::from_str(&text).unwrap());
            }
            frames
        }

        fn types(&mut self) -> Vec<String> {
            self.drain()
                .iter()
                .map(|f| f["type"].as_str().unwrap().to_string())
                .collect()
        }
    }

    fn coordinator(require_join: bool) -> (SessionCoordinator, Arc<InMemorySessionRepository>) {
        let session = Arc::new(Mutex::new(Session::new(Timestamp::new(0))));
        let repository = Arc::new(InMemorySessionRepository::new(session));
        (
            SessionCoordinator::new(repository.clone(), require_join),
            repository,
        )
    }

    async fn connect(coordinator: &mut SessionCoordinator) -> Peer {
        let (sender, rx) = mpsc::unbounded_channel();
        let (reply, reply_rx) = oneshot::channel();
        coordinator
            .handle(Command::Connect { sender, reply })
            .await;
        let id = reply_rx.await.unwrap().unwrap();
        Peer { id, rx }
    }

    async fn send(coordinator: &mut SessionCoordinator, peer: &Peer, frame: Value) {
        let raw = frame.to_string();
        let message = decode_client_message(&raw).unwrap();
        coordinator
            .handle(Command::Inbound {
                user_id: peer.id.clone(),
                message,
                raw,
            })
            .await;
    }

    async fn joined(coordinator: &mut SessionCoordinator, name: &str) -> Peer {
        let mut peer = connect(coordinator).await;
        send(coordinator, &peer, json!({"type": "user:join", "name": name})).await;
        peer.drain();
        peer
    }

    fn stroke_end(id: &str, color: &str) -> Value {
        json!({
            "type": "stroke:end",
            "stroke": {
                "id": id,
                "tool": "brush",
                "color": color,
                "width": 4,
                "points": [{"x": 0, "y": 0}, {"x": 10, "y": 10}]
            }
        })
    }

    #[tokio::test]
    async fn test_connect_broadcasts_roster() {
        // テスト項目: 接続すると全員に users:update が届く
        // given (前提条件):
        let (mut coordinator, _) = coordinator(true);
        let mut alice = connect(&mut coordinator).await;

        // when (操作):
        let mut bob = connect(&mut coordinator).await;

        // then (期待する結果):
        let alice_frames = alice.drain();
        assert_eq!(alice_frames.last().unwrap()["type"], "users:update");
        assert_eq!(alice_frames.last().unwrap()["users"].as_array().unwrap().len(), 2);
        assert_eq!(bob.types(), vec!["users:update"]);
    }

    #[tokio::test]
    async fn test_join_sends_init_to_joiner_then_roster_to_all() {
        // テスト項目: user:join で本人に user:init、その後全員に users:update
        // given (前提条件):
        let (mut coordinator, _) = coordinator(true);
        let mut alice = joined(&mut coordinator, "alice").await;
        let mut bob = connect(&mut coordinator).await;
        alice.drain();
        bob.drain();

        // when (操作):
        send(&mut coordinator, &bob, json!({"type": "user:join", "name": "bob"})).await;

        // then (期待する結果):
        let frames = bob.drain();
        assert_eq!(frames[0]["type"], "user:init");
        assert_eq!(frames[0]["userId"], bob.id.as_str());
        assert_eq!(frames[0]["name"], "bob");
        assert_eq!(frames[1]["type"], "users:update");
        assert_eq!(alice.types(), vec!["users:update"]);
    }

    #[tokio::test]
    async fn test_stroke_end_relays_then_broadcasts_enforced_color() {
        // テスト項目: stroke:end は他者へ中継され、登録色で全員に canvas:state が届く
        // given (前提条件):
        let (mut coordinator, repository) = coordinator(true);
        let mut alice = joined(&mut coordinator, "alice").await;
        let mut bob = joined(&mut coordinator, "bob").await;
        alice.drain();
        let alice_color = repository
            .get_participant(&alice.id)
            .await
            .unwrap()
            .color;

        // when (操作):
        send(&mut coordinator, &alice, stroke_end("s1", "#000000")).await;

        // then (期待する結果):
        let bob_frames = bob.drain();
        assert_eq!(bob_frames[0]["type"], "stroke:end");
        assert_eq!(bob_frames[0]["stroke"]["color"], "#000000");
        assert_eq!(bob_frames[1]["type"], "canvas:state");
        assert_eq!(bob_frames[1]["strokes"][0]["color"], alice_color.as_str());

        let alice_frames = alice.drain();
        assert_eq!(alice_frames.len(), 1);
        assert_eq!(alice_frames[0]["type"], "canvas:state");
    }

    #[tokio::test]
    async fn test_live_relay_excludes_sender() {
        // テスト項目: stroke:start / stroke:point は送信者以外にそのまま届く
        let (mut coordinator, _) = coordinator(true);
        let mut alice = joined(&mut coordinator, "alice").await;
        let mut bob = joined(&mut coordinator, "bob").await;
        alice.drain();

        let start = json!({
            "type": "stroke:start", "strokeId": "s1", "color": "#123456",
            "width": "5", "tool": "brush", "point": {"x": 1, "y": 1}
        });
        send(&mut coordinator, &alice, start.clone()).await;
        send(
            &mut coordinator,
            &alice,
            json!({"type": "stroke:point", "strokeId": "s1", "point": {"x": 2, "y": 2}}),
        )
        .await;

        let point = json!({"type": "stroke:point", "strokeId": "s1", "point": {"x": 2, "y": 2}});
        assert_eq!(bob.drain(), vec![start, point]);
        assert!(alice.drain().is_empty());
    }

    #[tokio::test]
    async fn test_undo_redo_scenario() {
        // テスト項目: A, B のストローク → undo → redo で元の順序に戻る
        // given (前提条件):
        let (mut coordinator, repository) = coordinator(true);
        let alice = joined(&mut coordinator, "alice").await;
        let mut bob = joined(&mut coordinator, "bob").await;
        send(&mut coordinator, &alice, stroke_end("a", "#000000")).await;
        send(&mut coordinator, &bob, stroke_end("b", "#000000")).await;
        bob.drain();

        // when (操作):
        send(&mut coordinator, &bob, json!({"type": "undo:request"})).await;
        let after_undo = bob.drain();
        send(&mut coordinator, &alice, json!({"type": "redo:request"})).await;
        let after_redo = bob.drain();

        // then (期待する結果):
        assert_eq!(after_undo[0]["strokes"].as_array().unwrap().len(), 1);
        assert_eq!(after_undo[0]["strokes"][0]["id"], "a");
        let ids: Vec<&str> = after_redo[0]["strokes"]
            .as_array()
            .unwrap()
            .iter()
            .map(|s| s["id"].as_str().unwrap())
            .collect();
        assert_eq!(ids, vec!["a", "b"]);
        assert_eq!(repository.get_strokes().await.len(), 2);
    }

    #[tokio::test]
    async fn test_noop_undo_and_redo_broadcast_nothing() {
        // テスト項目: 空の履歴での undo / redo は何も配信しない
        let (mut coordinator, _) = coordinator(true);
        let mut alice = joined(&mut coordinator, "alice").await;

        send(&mut coordinator, &alice, json!({"type": "undo:request"})).await;
        send(&mut coordinator, &alice, json!({"type": "redo:request"})).await;

        assert!(alice.drain().is_empty());
    }

    #[tokio::test]
    async fn test_clear_then_redo_is_noop() {
        // テスト項目: clear で空の canvas:state が届き、その後の redo は何もしない
        let (mut coordinator, _) = coordinator(true);
        let mut alice = joined(&mut coordinator, "alice").await;
        send(&mut coordinator, &alice, stroke_end("s1", "#000000")).await;
        send(&mut coordinator, &alice, json!({"type": "undo:request"})).await;
        alice.drain();

        send(&mut coordinator, &alice, json!({"type": "canvas:clear"})).await;
        send(&mut coordinator, &alice, json!({"type": "redo:request"})).await;

        let frames = alice.drain();
        assert_eq!(frames.len(), 1);
        assert_eq!(frames[0]["type"], "canvas:state");
        assert!(frames[0]["strokes"].as_array().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_cursor_is_broadcast_to_everyone_with_connection_identity() {
        // テスト項目: cursor:move は送信者を含む全員に、接続の ID・名前・色付きで届く
        let (mut coordinator, _) = coordinator(true);
        let mut alice = joined(&mut coordinator, "alice").await;
        let mut bob = joined(&mut coordinator, "bob").await;
        alice.drain();

        send(
            &mut coordinator,
            &alice,
            json!({"type": "cursor:move", "userId": bob.id.as_str(), "x": 5, "y": 6}),
        )
        .await;

        for frames in [alice.drain(), bob.drain()] {
            assert_eq!(frames.len(), 1);
            assert_eq!(frames[0]["type"], "cursor:move");
            assert_eq!(frames[0]["userId"], alice.id.as_str());
            assert_eq!(frames[0]["name"], "alice");
        }
    }

    #[tokio::test]
    async fn test_drawing_before_join_is_dropped() {
        // テスト項目: 参加前の接続からの描画メッセージは破棄される
        // given (前提条件):
        let (mut coordinator, repository) = coordinator(true);
        let mut watcher = joined(&mut coordinator, "watcher").await;
        let lurker = connect(&mut coordinator).await;
        watcher.drain();

        // when (操作):
        send(&mut coordinator, &lurker, stroke_end("s1", "#000000")).await;
        send(&mut coordinator, &lurker, json!({"type": "canvas:clear"})).await;

        // then (期待する結果):
        assert!(watcher.drain().is_empty());
        assert!(repository.get_strokes().await.is_empty());
    }

    #[tokio::test]
    async fn test_join_gate_reads_registry_state() {
        // テスト項目: 参加判定はレジストリの参加者状態に従う（コーディネーターは状態を持たない）
        // given (前提条件): コーディネーターを経由せずにレジストリ上で参加済みにする
        let (mut coordinator, repository) = coordinator(true);
        let mut watcher = joined(&mut coordinator, "watcher").await;
        let drawer = connect(&mut coordinator).await;
        repository
            .join_participant(&drawer.id, DisplayName::from_raw(Some("drawer")))
            .await
            .unwrap();
        watcher.drain();

        // when (操作):
        send(&mut coordinator, &drawer, stroke_end("s1", "#000000")).await;

        // then (期待する結果):
        assert_eq!(repository.get_strokes().await.len(), 1);
        assert_eq!(watcher.types(), vec!["stroke:end", "canvas:state"]);
    }

    #[tokio::test]
    async fn test_drawing_before_join_allowed_when_not_required() {
        // テスト項目: --require-join=false では参加前でも描画できる
        let (mut coordinator, repository) = coordinator(false);
        let lurker = connect(&mut coordinator).await;

        send(&mut coordinator, &lurker, stroke_end("s1", "#000000")).await;

        assert_eq!(repository.get_strokes().await.len(), 1);
    }

    #[tokio::test]
    async fn test_disconnect_mid_gesture_cancels_live_stroke() {
        // テスト項目: 描画途中の切断で stroke:cancel と users:update が届き、履歴は変わらない
        // given (前提条件):
        let (mut coordinator, repository) = coordinator(true);
        let alice = joined(&mut coordinator, "alice").await;
        let mut bob = joined(&mut coordinator, "bob").await;
        let start = ClientMessage::StrokeStart(StrokeStartPayload {
            stroke_id: "s1".to_string(),
            color: None,
            width: Some(3.0),
            tool: Default::default(),
            user_id: None,
            size: None,
            point: crate::domain::Point::new(0.0, 0.0),
        });
        send(&mut coordinator, &alice, serde_json::to_value(&start).unwrap()).await;
        let point = ClientMessage::StrokePoint(StrokePointPayload {
            stroke_id: "s1".to_string(),
            point: crate::domain::Point::new(1.0, 1.0),
        });
        send(&mut coordinator, &alice, serde_json::to_value(&point).unwrap()).await;
        bob.drain();

        // when (操作):
        coordinator
            .handle(Command::Disconnect {
                user_id: alice.id.clone(),
            })
            .await;

        // then (期待する結果):
        let frames = bob.drain();
        assert_eq!(frames[0]["type"], "stroke:cancel");
        assert_eq!(frames[0]["strokeId"], "s1");
        assert_eq!(frames[0]["userId"], alice.id.as_str());
        assert_eq!(frames[1]["type"], "users:update");
        assert_eq!(frames[1]["users"].as_array().unwrap().len(), 1);
        assert!(repository.get_strokes().await.is_empty());
    }

    #[tokio::test]
    async fn test_closed_channel_is_skipped() {
        // テスト項目: 送信先チャネルが閉じていても他の接続への配信は続く
        let (mut coordinator, _) = coordinator(true);
        let alice = joined(&mut coordinator, "alice").await;
        let mut bob = joined(&mut coordinator, "bob").await;
        drop(alice.rx);
        bob.drain();

        send(&mut coordinator, &bob, json!({"type": "canvas:clear"})).await;

        assert_eq!(bob.types(), vec!["canvas:state"]);
    }
}
