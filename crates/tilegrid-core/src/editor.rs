//! Editor: routes input through the viewport and tools into the grid and store.

use crate::cell::{CellId, Layer, SpriteCoord};
use crate::config::{ConfigError, EditorConfig};
use crate::input::{InputState, KeyEvent, Modifiers, MouseButton, PointerEvent};
use crate::schema::{Schema, SchemaError};
use crate::storage::{KeyValueStore, StorageError};
use crate::tools::{GestureAction, ToolKind, ToolManager};
use crate::viewport::{Viewport, ZoomDirection};
use kurbo::Size;
use thiserror::Error;

/// Key that deactivates the armed tool.
pub const KEY_DEACTIVATE: &str = "Escape";
/// Key that toggles grid lines.
pub const KEY_TOGGLE_GRID: &str = "²";

/// Editor errors.
#[derive(Debug, Error)]
pub enum EditorError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Schema(#[from] SchemaError),
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Result type for editor operations.
pub type EditorResult<T> = Result<T, EditorError>;

/// What a grid is for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditorRole {
    /// Sprite palette: one cell per sprite, clicked to pick the brush sprite.
    Sheet,
    /// Paintable map, persisted under its storage key.
    Map,
}

/// State shared by the sheet and map editors of one session.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EditorContext {
    /// Sprite that painting assigns.
    pub selected: Option<SpriteCoord>,
    /// Layer that painting and erasing target.
    pub layer: Layer,
}

fn action_for(button: MouseButton) -> Option<GestureAction> {
    match button {
        MouseButton::Left => Some(GestureAction::Paint),
        MouseButton::Right => Some(GestureAction::Erase),
        MouseButton::Middle => None,
    }
}

/// One grid with its camera, tools and backing store.
pub struct Editor<S: KeyValueStore> {
    role: EditorRole,
    viewport: Viewport,
    tools: ToolManager,
    input: InputState,
    store: S,
    storage_key: String,
    /// Action of the plain click-drag in progress, when no tool is armed.
    brush: Option<GestureAction>,
    /// Grid content changed since the last save.
    dirty: bool,
}

impl<S: KeyValueStore> Editor<S> {
    /// Build the grid for `config` and load its content.
    ///
    /// A sheet fills every cell with its own sprite. A map loads the schema
    /// stored under the configured key; when none is stored yet it starts
    /// blank and the blank schema is saved. A corrupt stored schema is an error.
    pub fn open(config: &EditorConfig, role: EditorRole, store: S) -> EditorResult<Self> {
        config.validate()?;
        let mut viewport = Viewport::new(config);
        let key = config.storage_key.clone();

        match role {
            EditorRole::Sheet => viewport.grid_mut().fill_with_own_coords(),
            EditorRole::Map => {
                let len = viewport.grid().len();
                match Schema::load(&store, &key, len)? {
                    Some(schema) => {
                        viewport.grid_mut().apply_schema(&schema)?;
                        log::info!("Loaded map '{}' ({} cells)", key, len);
                    }
                    None => {
                        viewport.grid().to_schema().save(&store, &key)?;
                        log::info!("Initialized blank map '{}' ({} cells)", key, len);
                    }
                }
            }
        }

        Ok(Self {
            role,
            viewport,
            tools: ToolManager::new(),
            input: InputState::new(),
            store,
            storage_key: key,
            brush: None,
            dirty: false,
        })
    }

    pub fn role(&self) -> EditorRole {
        self.role
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub fn viewport_mut(&mut self) -> &mut Viewport {
        &mut self.viewport
    }

    pub fn tools(&self) -> &ToolManager {
        &self.tools
    }

    pub fn input(&self) -> &InputState {
        &self.input
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn storage_key(&self) -> &str {
        &self.storage_key
    }

    /// Current grid content.
    pub fn schema(&self) -> Schema {
        self.viewport.grid().to_schema()
    }

    /// Resize the canvas.
    pub fn resize(&mut self, size: Size) {
        self.viewport.set_size(size);
        self.tools.refresh(&self.viewport);
    }

    pub fn set_modifiers(&mut self, modifiers: Modifiers) {
        self.input.set_modifiers(modifiers);
    }

    /// Process a pointer event. Returns whether the canvas needs a redraw.
    ///
    /// Hover is resolved first, then the camera moves, then tool and brush
    /// effects are computed against the updated camera.
    pub fn handle_pointer(
        &mut self,
        event: &PointerEvent,
        ctx: &mut EditorContext,
    ) -> EditorResult<bool> {
        self.input.handle_pointer_event(event);

        let hover_before = self.viewport.hover_cell();
        if self.input.pointer_inside {
            self.viewport.update_hover(self.input.pointer_position);
        } else {
            self.viewport.clear_hover();
        }
        let mut redraw = self.viewport.hover_cell() != hover_before;

        if self.update_camera(event) {
            self.tools.refresh(&self.viewport);
            redraw = true;
        }

        redraw |= self.update_content(event, ctx)?;
        Ok(redraw)
    }

    fn update_camera(&mut self, event: &PointerEvent) -> bool {
        match *event {
            PointerEvent::Down {
                position,
                button: MouseButton::Middle,
            } => {
                if self.input.modifiers.ctrl {
                    self.viewport.reset_zoom();
                    true
                } else {
                    self.viewport.begin_pan(position);
                    false
                }
            }
            PointerEvent::Up {
                button: MouseButton::Middle,
                ..
            }
            | PointerEvent::Leave => {
                self.viewport.end_pan();
                false
            }
            PointerEvent::Move { position } => self.viewport.pan_to(position),
            PointerEvent::Scroll { delta, .. } => {
                if delta.y < 0.0 {
                    self.viewport.zoom(ZoomDirection::In)
                } else if delta.y > 0.0 {
                    self.viewport.zoom(ZoomDirection::Out)
                } else {
                    false
                }
            }
            _ => false,
        }
    }

    fn update_content(
        &mut self,
        event: &PointerEvent,
        ctx: &mut EditorContext,
    ) -> EditorResult<bool> {
        match *event {
            PointerEvent::Down { button, .. } => {
                let (Some(action), Some(hover)) = (action_for(button), self.viewport.hover_cell())
                else {
                    return Ok(false);
                };
                match self.role {
                    EditorRole::Sheet => {
                        Ok(action == GestureAction::Paint && self.pick_sprite(hover, ctx))
                    }
                    EditorRole::Map if self.tools.is_armed() => {
                        if self.tools.is_active() {
                            return Ok(false);
                        }
                        if action == GestureAction::Erase {
                            self.tools.deactivate();
                            log::info!("Tool: none");
                        } else {
                            self.tools.begin(hover, action, &self.viewport);
                        }
                        Ok(true)
                    }
                    EditorRole::Map => {
                        self.brush = Some(action);
                        Ok(self.apply(hover, action, ctx))
                    }
                }
            }
            PointerEvent::Move { .. } => {
                let Some(hover) = self.viewport.hover_cell() else {
                    return Ok(false);
                };
                if let Some(gesture) = self.tools.gesture() {
                    if gesture.current == hover {
                        return Ok(false);
                    }
                    self.tools.update(hover, &self.viewport);
                    Ok(true)
                } else if let Some(action) = self.brush {
                    Ok(self.apply(hover, action, ctx))
                } else {
                    Ok(false)
                }
            }
            PointerEvent::Up { button, .. } => {
                let Some(action) = action_for(button) else {
                    return Ok(false);
                };
                if self.tools.gesture().is_some_and(|g| g.action == action) {
                    if let Some(selection) = self.tools.release() {
                        for &id in &selection.cells {
                            self.apply(id, selection.action, ctx);
                        }
                    }
                    self.commit()?;
                    return Ok(true);
                }
                if self.brush == Some(action) {
                    self.brush = None;
                    self.commit()?;
                }
                Ok(false)
            }
            PointerEvent::Leave => {
                let had_gesture = self.tools.is_active();
                self.tools.cancel();
                self.brush = None;
                self.commit()?;
                Ok(had_gesture)
            }
            PointerEvent::Scroll { .. } => Ok(false),
        }
    }

    /// Process a key event. Returns whether the canvas needs a redraw.
    pub fn handle_key(&mut self, event: &KeyEvent) -> bool {
        let KeyEvent::Pressed(key) = event else {
            return false;
        };

        match key.as_str() {
            KEY_DEACTIVATE => {
                let was_armed = self.tools.is_armed();
                self.tools.deactivate();
                was_armed
            }
            KEY_TOGGLE_GRID => {
                self.viewport.toggle_grid();
                true
            }
            other => match ToolKind::from_key(other) {
                Some(kind) if self.role == EditorRole::Map => {
                    let armed = self.tools.toggle(kind);
                    log::info!("Tool: {}", armed.map_or("none", ToolKind::name));
                    true
                }
                _ => false,
            },
        }
    }

    /// Erase every cell of the map and save it.
    pub fn clear(&mut self) -> EditorResult<()> {
        if self.role != EditorRole::Map {
            return Ok(());
        }
        self.tools.cancel();
        self.viewport.grid_mut().clear();
        self.dirty = true;
        self.commit()
    }

    /// Store the sprite under `id` as the brush sprite.
    fn pick_sprite(&mut self, id: CellId, ctx: &mut EditorContext) -> bool {
        let tile = self.viewport.grid().get(id).and_then(|cell| cell.tile);
        if tile.is_none() || tile == ctx.selected {
            return false;
        }
        ctx.selected = tile;
        log::debug!("Selected sprite {:?}", tile);
        true
    }

    fn apply(&mut self, id: CellId, action: GestureAction, ctx: &EditorContext) -> bool {
        let slot = match action {
            GestureAction::Paint => match ctx.selected {
                Some(sprite) => Some(sprite),
                None => return false,
            },
            GestureAction::Erase => None,
        };
        let changed = self.viewport.grid_mut().set_slot(id, ctx.layer, slot);
        if changed {
            log::debug!("{:?} {} on {:?} layer", action, id, ctx.layer);
            self.dirty = true;
        }
        changed
    }

    /// Save the grid if it changed since the last save.
    fn commit(&mut self) -> EditorResult<()> {
        if !self.dirty || self.role != EditorRole::Map {
            return Ok(());
        }
        self.schema().save(&self.store, &self.storage_key)?;
        self.dirty = false;
        log::debug!("Saved map '{}'", self.storage_key);
        Ok(())
    }
}
