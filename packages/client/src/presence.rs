//! Remote cursor presence with a staleness timeout.

use std::collections::HashMap;

use rakugaki_server::infrastructure::dto::websocket::CursorPayload;

/// Cursors not updated for this long are hidden.
pub const CURSOR_TTL_MS: i64 = 5000;

/// Last known position of a participant's cursor
#[derive(Debug, Clone, PartialEq)]
pub struct RemoteCursor {
    pub user_id: String,
    pub name: String,
    pub color: String,
    pub x: f64,
    pub y: f64,
    /// Receive time in milliseconds
    pub updated_at: i64,
}

#[derive(Debug)]
pub struct CursorPresence {
    cursors: HashMap<String, RemoteCursor>,
    ttl_ms: i64,
}

impl Default for CursorPresence {
    fn default() -> Self {
        Self::with_ttl(CURSOR_TTL_MS)
    }
}

impl CursorPresence {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_ttl(ttl_ms: i64) -> Self {
        Self {
            cursors: HashMap::new(),
            ttl_ms,
        }
    }

    /// Record a `cursor:move` received at `now`.
    pub fn update(&mut self, payload: CursorPayload, now: i64) {
        self.cursors.insert(
            payload.user_id.clone(),
            RemoteCursor {
                user_id: payload.user_id,
                name: payload.name,
                color: payload.color,
                x: payload.x,
                y: payload.y,
                updated_at: now,
            },
        );
    }

    /// Drop the cursor of a participant who left.
    pub fn remove(&mut self, user_id: &str) {
        self.cursors.remove(user_id);
    }

    /// Prune stale cursors and return the visible ones, sorted by user id.
    pub fn visible(&mut self, now: i64) -> Vec<RemoteCursor> {
        let ttl = self.ttl_ms;
        self.cursors.retain(|_, c| now - c.updated_at <= ttl);

        let mut cursors: Vec<RemoteCursor> = self.cursors.values().cloned().collect();
        cursors.sort_by(|a, b| a.user_id.cmp(&b.user_id));
        cursors
    }

    pub fn len(&self) -> usize {
        self.cursors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cursors.is_empty()
    }
}
