//! Selection tools: drag gestures that pick a set of cells.

mod shape;

pub use shape::{ToolShape, compute_affected_cells};

use crate::cell::CellId;
use crate::viewport::Viewport;
use kurbo::Line;
use std::collections::BTreeSet;

/// Available selection tools.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ToolKind {
    Line,
    OutArea,
    FillArea,
    Circle,
}

impl ToolKind {
    /// Tool bound to a number key.
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "1" => Some(ToolKind::Line),
            "2" => Some(ToolKind::OutArea),
            "3" => Some(ToolKind::FillArea),
            "4" => Some(ToolKind::Circle),
            _ => None,
        }
    }

    /// Display name for this tool.
    pub fn name(self) -> &'static str {
        match self {
            ToolKind::Line => "Line",
            ToolKind::OutArea => "Outline area",
            ToolKind::FillArea => "Filled area",
            ToolKind::Circle => "Circle",
        }
    }
}

/// What a finished gesture does to its cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GestureAction {
    Paint,
    Erase,
}

/// A drag in progress.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Gesture {
    /// Cell the drag started on.
    pub anchor: CellId,
    /// Cell currently under the pointer.
    pub current: CellId,
    pub action: GestureAction,
}

/// State of the tool system.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ToolState {
    /// No tool armed; clicks act on single cells.
    #[default]
    Inactive,
    /// A tool is armed and possibly mid-drag.
    Armed {
        kind: ToolKind,
        gesture: Option<Gesture>,
    },
}

/// Cells picked by a released gesture.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection {
    pub action: GestureAction,
    pub cells: BTreeSet<CellId>,
}

/// Manages the armed tool, its gesture and the affected cells.
#[derive(Debug, Clone, Default)]
pub struct ToolManager {
    state: ToolState,
    /// Shape of the current gesture, in screen space.
    shape: Option<ToolShape>,
    affected: BTreeSet<CellId>,
}

impl ToolManager {
    /// Create a new tool manager with no tool armed.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> ToolState {
        self.state
    }

    /// The armed tool, if any.
    pub fn kind(&self) -> Option<ToolKind> {
        match self.state {
            ToolState::Armed { kind, .. } => Some(kind),
            ToolState::Inactive => None,
        }
    }

    pub fn is_armed(&self) -> bool {
        matches!(self.state, ToolState::Armed { .. })
    }

    /// The drag in progress, if any.
    pub fn gesture(&self) -> Option<Gesture> {
        match self.state {
            ToolState::Armed { gesture, .. } => gesture,
            ToolState::Inactive => None,
        }
    }

    /// Check if a drag is in progress.
    pub fn is_active(&self) -> bool {
        self.gesture().is_some()
    }

    /// Screen-space shape of the drag in progress.
    pub fn shape(&self) -> Option<&ToolShape> {
        self.shape.as_ref()
    }

    /// The line tool's raycast, while it is being dragged.
    pub fn raycast(&self) -> Option<Line> {
        match self.shape {
            Some(ToolShape::Line(line)) => Some(line),
            _ => None,
        }
    }

    /// Cells hit by the drag in progress.
    pub fn affected_cells(&self) -> &BTreeSet<CellId> {
        &self.affected
    }

    /// Arm `kind`, or disarm it if it is already armed.
    ///
    /// Any gesture in progress is dropped. Returns the armed tool afterwards.
    pub fn toggle(&mut self, kind: ToolKind) -> Option<ToolKind> {
        self.clear_gesture();
        self.state = match self.state {
            ToolState::Armed { kind: armed, .. } if armed == kind => ToolState::Inactive,
            _ => ToolState::Armed {
                kind,
                gesture: None,
            },
        };
        log::debug!("Tool toggled: {:?}", self.kind());
        self.kind()
    }

    /// Disarm the tool. Cells already painted are left alone.
    pub fn deactivate(&mut self) {
        self.clear_gesture();
        self.state = ToolState::Inactive;
    }

    /// Start a drag on `anchor`. Ignored unless a tool is armed.
    pub fn begin(&mut self, anchor: CellId, action: GestureAction, viewport: &Viewport) {
        if let ToolState::Armed { gesture, .. } = &mut self.state {
            *gesture = Some(Gesture {
                anchor,
                current: anchor,
                action,
            });
            self.refresh(viewport);
        }
    }

    /// Move the drag's live end to `current` and recompute the affected cells.
    pub fn update(&mut self, current: CellId, viewport: &Viewport) {
        if let ToolState::Armed {
            gesture: Some(gesture),
            ..
        } = &mut self.state
        {
            gesture.current = current;
            self.refresh(viewport);
        }
    }

    /// Recompute shape and affected cells for the current camera.
    ///
    /// Call after anything that moves cells on screen (pan, zoom).
    pub fn refresh(&mut self, viewport: &Viewport) {
        let ToolState::Armed {
            kind,
            gesture: Some(gesture),
        } = self.state
        else {
            return;
        };
        let shape = ToolShape::new(
            kind,
            viewport.cell_screen_center(gesture.anchor),
            viewport.cell_screen_center(gesture.current),
        );
        self.affected = compute_affected_cells(&shape, viewport);
        self.shape = Some(shape);
    }

    /// Finish the drag, handing back its cells. The tool stays armed.
    pub fn release(&mut self) -> Option<Selection> {
        let gesture = self.gesture()?;
        let cells = std::mem::take(&mut self.affected);
        self.clear_gesture();
        log::debug!(
            "Gesture {:?} released over {} cells",
            gesture.action,
            cells.len()
        );
        Some(Selection {
            action: gesture.action,
            cells,
        })
    }

    /// Abandon the drag without applying it.
    pub fn cancel(&mut self) {
        self.clear_gesture();
    }

    fn clear_gesture(&mut self) {
        if let ToolState::Armed { gesture, .. } = &mut self.state {
            *gesture = None;
        }
        self.shape = None;
        self.affected.clear();
    }
}
