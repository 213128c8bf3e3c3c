//! Headless application: a sprite palette and a map sharing one selection.

use crate::config::AppConfig;
use crate::session::{Pane, SessionEvent};
use thiserror::Error;
use tilegrid_core::storage::KeyValueStore;
use tilegrid_core::{
    ConfigError, Editor, EditorContext, EditorError, EditorRole, SpriteSheet, StorageError,
};
use tilegrid_render::{RecordingSurface, RenderStyle, render_frame};

/// Application errors.
#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Editor(#[from] EditorError),
    #[error(transparent)]
    Storage(#[from] StorageError),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Session error: {0}")]
    Session(#[from] serde_json::Error),
}

/// Palette and map editors, drawn into recording surfaces.
pub struct App<'a, K: KeyValueStore> {
    sheet_editor: Editor<&'a K>,
    map_editor: Editor<&'a K>,
    sheet: SpriteSheet,
    ctx: EditorContext,
    style: RenderStyle,
    sheet_surface: RecordingSurface,
    map_surface: RecordingSurface,
    frames: usize,
}

impl<'a, K: KeyValueStore> App<'a, K> {
    /// Open both editors against `store` and draw the first frame.
    pub fn new(config: &AppConfig, store: &'a K) -> Result<Self, AppError> {
        config.validate()?;
        let sheet_editor = Editor::open(&config.sheet_editor(), EditorRole::Sheet, store)?;
        let map_editor = Editor::open(&config.map, EditorRole::Map, store)?;

        let mut app = Self {
            sheet_editor,
            map_editor,
            sheet: SpriteSheet::from_settings(&config.sheet),
            ctx: EditorContext::default(),
            style: RenderStyle::default(),
            sheet_surface: RecordingSurface::new(),
            map_surface: RecordingSurface::new(),
            frames: 0,
        };
        app.redraw(Pane::Sheet);
        app.redraw(Pane::Map);
        Ok(app)
    }

    pub fn map(&self) -> &Editor<&'a K> {
        &self.map_editor
    }

    pub fn sheet(&self) -> &Editor<&'a K> {
        &self.sheet_editor
    }

    pub fn context(&self) -> &EditorContext {
        &self.ctx
    }

    /// Number of frames drawn so far.
    pub fn frames(&self) -> usize {
        self.frames
    }

    /// Draw calls of the latest frame of a pane.
    pub fn surface(&self, pane: Pane) -> &RecordingSurface {
        match pane {
            Pane::Sheet => &self.sheet_surface,
            Pane::Map => &self.map_surface,
        }
    }

    fn editor_mut(&mut self, pane: Pane) -> &mut Editor<&'a K> {
        match pane {
            Pane::Sheet => &mut self.sheet_editor,
            Pane::Map => &mut self.map_editor,
        }
    }

    /// Feed one recorded event through the editors, redrawing what changed.
    pub fn apply(&mut self, event: &SessionEvent) -> Result<(), AppError> {
        match event {
            SessionEvent::Pointer { pane, event } => {
                let mut ctx = self.ctx;
                let redraw = self.editor_mut(*pane).handle_pointer(event, &mut ctx)?;
                self.ctx = ctx;
                if redraw {
                    self.redraw(*pane);
                }
            }
            SessionEvent::Key(key) => {
                if self.map_editor.handle_key(key) {
                    self.redraw(Pane::Map);
                }
            }
            SessionEvent::Modifiers(modifiers) => {
                self.sheet_editor.set_modifiers(*modifiers);
                self.map_editor.set_modifiers(*modifiers);
            }
            SessionEvent::Resize { pane, size } => {
                self.editor_mut(*pane).resize(*size);
                self.redraw(*pane);
            }
            SessionEvent::SwitchLayer => {
                self.ctx.layer = self.ctx.layer.next();
                log::info!("Editing layer {:?}", self.ctx.layer);
            }
            SessionEvent::Clear => {
                self.map_editor.clear()?;
                self.redraw(Pane::Map);
            }
        }
        Ok(())
    }

    /// Replay a whole session.
    pub fn replay(&mut self, events: &[SessionEvent]) -> Result<(), AppError> {
        for event in events {
            self.apply(event)?;
        }
        log::info!(
            "Replayed {} events, drew {} frames",
            events.len(),
            self.frames
        );
        Ok(())
    }

    fn redraw(&mut self, pane: Pane) {
        let (editor, surface) = match pane {
            Pane::Sheet => (&self.sheet_editor, &mut self.sheet_surface),
            Pane::Map => (&self.map_editor, &mut self.map_surface),
        };
        surface.take();
        render_frame(surface, editor, &self.sheet, &self.style);
        self.frames += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::parse_session;
    use tilegrid_core::storage::MemoryStorage;
    use tilegrid_core::{EditorConfig, SpriteCoord};
    use tilegrid_render::DrawCommand;

    fn config() -> AppConfig {
        AppConfig {
            map: EditorConfig {
                columns: 4,
                rows: 3,
                canvas_width: 800.0,
                canvas_height: 600.0,
                ..EditorConfig::default()
            },
            ..AppConfig::default()
        }
    }

    #[test]
    fn test_pick_then_paint() {
        let store = MemoryStorage::new();
        let mut app = App::new(&config(), &store).unwrap();
        assert_eq!(app.frames(), 2);

        // Sheet cells are 48px: (100, 10) is sheet cell (2, 0).
        let events = parse_session(
            r#"[
                {"Pointer": {"pane": "Sheet", "event": {"Down": {"position": {"x": 100.0, "y": 10.0}, "button": "Left"}}}},
                {"Pointer": {"pane": "Sheet", "event": {"Up": {"position": {"x": 100.0, "y": 10.0}, "button": "Left"}}}},
                {"Pointer": {"pane": "Map", "event": {"Down": {"position": {"x": 250.0, "y": 150.0}, "button": "Left"}}}},
                {"Pointer": {"pane": "Map", "event": {"Up": {"position": {"x": 250.0, "y": 150.0}, "button": "Left"}}}}
            ]"#,
        )
        .unwrap();
        app.replay(&events).unwrap();

        assert_eq!(app.context().selected, Some(SpriteCoord::new(0, 2)));
        let schema = app.map().schema();
        assert_eq!(schema.tiles[1 * 4 + 2], Some(SpriteCoord::new(0, 2)));

        let dests: Vec<_> = app.surface(Pane::Map).image_dests().collect();
        assert_eq!(dests, vec![kurbo::Rect::new(200.0, 100.0, 300.0, 200.0)]);
    }

    #[test]
    fn test_tool_keys_and_layers() {
        let store = MemoryStorage::new();
        let mut app = App::new(&config(), &store).unwrap();
        app.apply(&SessionEvent::SwitchLayer).unwrap();
        app.apply(&SessionEvent::Key(tilegrid_core::input::KeyEvent::Pressed(
            "2".to_string(),
        )))
        .unwrap();
        assert!(app.map().tools().is_armed());
        assert_eq!(app.context().layer, tilegrid_core::Layer::Items);
    }

    #[test]
    fn test_clear_redraws_map() {
        let store = MemoryStorage::new();
        let mut app = App::new(&config(), &store).unwrap();
        let frames = app.frames();
        app.apply(&SessionEvent::Clear).unwrap();
        assert_eq!(app.frames(), frames + 1);
        assert!(matches!(
            app.surface(Pane::Map).commands()[0],
            DrawCommand::Clear { .. }
        ));
    }
}
