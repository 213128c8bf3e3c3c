//! Recorded input sessions.

use kurbo::Size;
use serde::{Deserialize, Serialize};
use tilegrid_core::input::{KeyEvent, Modifiers, PointerEvent};

/// Which canvas a pointer event targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Pane {
    Sheet,
    Map,
}

/// One recorded input.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum SessionEvent {
    Pointer { pane: Pane, event: PointerEvent },
    /// Keys always go to the map.
    Key(KeyEvent),
    Modifiers(Modifiers),
    Resize { pane: Pane, size: Size },
    /// Switch between the tile and item layers.
    SwitchLayer,
    /// Erase the whole map.
    Clear,
}

/// Parse a JSON array of session events.
pub fn parse_session(json: &str) -> Result<Vec<SessionEvent>, serde_json::Error> {
    serde_json::from_str(json)
}
