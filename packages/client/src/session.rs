//! Client-side view of the shared session.
//!
//! Applies server messages to the local mirror, live preview and cursor
//! presence, and forwards the result to a [`Renderer`].

use rakugaki_server::{
    domain::Stroke,
    infrastructure::dto::websocket::{ParticipantInfo, ServerMessage, UserInitPayload},
};

use crate::{
    error::ClientError,
    live::LivePreview,
    mirror::CanvasMirror,
    presence::CursorPresence,
    renderer::{LiveEvent, Renderer},
};

/// Identity granted by the server in `user:init`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    pub user_id: String,
    pub name: String,
    pub color: String,
}

pub struct ClientSession<R: Renderer> {
    identity: Option<Identity>,
    roster: Vec<ParticipantInfo>,
    mirror: CanvasMirror,
    live: LivePreview,
    cursors: CursorPresence,
    renderer: R,
}

impl<R: Renderer> ClientSession<R> {
    pub fn new(renderer: R) -> Self {
        Self {
            identity: None,
            roster: Vec::new(),
            mirror: CanvasMirror::new(),
            live: LivePreview::new(),
            cursors: CursorPresence::new(),
            renderer,
        }
    }

    /// Decode and apply one text frame received at `now` (milliseconds).
    pub fn handle_text(&mut self, text: &str, now: i64) -> Result<(), ClientError> {
        let message: ServerMessage = serde_json::from_str(text).map_err(ClientError::Decode)?;
        self.apply(message, now);
        Ok(())
    }

    pub fn apply(&mut self, message: ServerMessage, now: i64) {
        tracing::debug!("<- {}", message.message_type());
        match message {
            ServerMessage::UserInit(init) => self.on_init(init),
            ServerMessage::UsersUpdate { users } => self.on_roster(users),
            ServerMessage::CanvasState { strokes } => self.replace_canvas(strokes),
            ServerMessage::CursorMove(payload) => {
                self.cursors.update(payload, now);
                let visible = self.cursors.visible(now);
                self.renderer.render_cursors(&visible);
            }
            ServerMessage::StrokeStart(payload) => {
                self.live.start(&payload);
                self.renderer.apply_live_event(&LiveEvent::Started(payload));
            }
            ServerMessage::StrokePoint(payload) => {
                let Some(from) = self.live.point(&payload) else {
                    tracing::debug!("Ignoring point for unknown stroke '{}'", payload.stroke_id);
                    return;
                };
                if let Some(stroke) = self.live.get(&payload.stroke_id) {
                    let event = LiveEvent::Extended {
                        stroke: stroke.clone(),
                        from,
                        to: payload.point,
                    };
                    self.renderer.apply_live_event(&event);
                }
            }
            ServerMessage::StrokeEnd { stroke } => {
                self.live.finish(&stroke.id);
                self.renderer.apply_live_event(&LiveEvent::Ended(stroke));
            }
            ServerMessage::StrokeCancel(cancel) => {
                if self.live.finish(&cancel.stroke_id).is_some() {
                    self.renderer.apply_live_event(&LiveEvent::Cancelled(cancel));
                }
            }
        }
    }

    fn on_init(&mut self, init: UserInitPayload) {
        let identity = Identity {
            user_id: init.user_id,
            name: init.name,
            color: init.color,
        };
        self.renderer.notice(&format!(
            "joined as {} ({}) with color {}",
            identity.name, identity.user_id, identity.color
        ));
        self.identity = Some(identity);
        self.roster = init.users;
        self.replace_canvas(init.strokes);
    }

    fn on_roster(&mut self, users: Vec<ParticipantInfo>) {
        for gone in self
            .roster
            .iter()
            .filter(|old| !users.iter().any(|u| u.id == old.id))
        {
            self.cursors.remove(&gone.id);
        }
        self.roster = users;
        self.renderer
            .notice(&format!("{} participant(s) connected", self.roster.len()));
    }

    fn replace_canvas(&mut self, strokes: Vec<Stroke>) {
        self.mirror.replace(strokes);
        self.renderer.render_full_state(self.mirror.strokes());
    }

    /// Render the mirrored history again.
    pub fn redraw(&mut self) {
        self.renderer.render_full_state(self.mirror.strokes());
    }

    /// Print the roster, marking the local participant.
    pub fn list_users(&mut self) {
        let own_id = self.identity.as_ref().map(|i| i.user_id.as_str());
        for user in &self.roster {
            let name = user.name.as_deref().unwrap_or("(joining)");
            let marker = if Some(user.id.as_str()) == own_id { " (you)" } else { "" };
            self.renderer
                .notice(&format!("{name}{marker} {} {}", user.color, user.id));
        }
    }

    pub fn identity(&self) -> Option<&Identity> {
        self.identity.as_ref()
    }

    pub fn roster(&self) -> &[ParticipantInfo] {
        &self.roster
    }

    pub fn mirror(&self) -> &CanvasMirror {
        &self.mirror
    }

    pub fn live(&self) -> &LivePreview {
        &self.live
    }

    pub fn cursors_mut(&mut self) -> &mut CursorPresence {
        &mut self.cursors
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn renderer_mut(&mut self) -> &mut R {
        &mut self.renderer
    }
}
