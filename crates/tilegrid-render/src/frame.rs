//! Frame builders: turn grid, camera and tool state into screen-space draw calls.

use crate::style::RenderStyle;
use crate::surface::Surface;
use tilegrid_core::storage::KeyValueStore;
use tilegrid_core::tools::GestureAction;
use tilegrid_core::{Editor, SpriteSheet, ToolManager, ToolShape, Viewport};

/// Draw every visible cell's tile and item sprites, then its outline when
/// grid lines are enabled.
pub fn render_tiles<S: Surface + ?Sized>(
    surface: &mut S,
    viewport: &Viewport,
    sheet: &SpriteSheet,
    style: &RenderStyle,
) {
    surface.clear(viewport.size(), style.background_color);

    for id in viewport.visible_cells() {
        let Some(cell) = viewport.grid().get(id) else {
            continue;
        };
        let dest = viewport.cell_screen_rect(id);

        for sprite in [cell.tile, cell.item].into_iter().flatten() {
            if sheet.contains(sprite) {
                surface.draw_image(sheet.source_rect(sprite), dest);
            } else {
                log::trace!("Cell {} references missing sprite {:?}", id, sprite);
            }
        }

        if viewport.show_grid() {
            surface.stroke_rect(dest, style.grid_color, style.grid_width);
        }
    }
}

/// Draw the selection overlay: affected-cell tints, the tool shape and the
/// hover outline.
pub fn render_selection<S: Surface + ?Sized>(
    surface: &mut S,
    viewport: &Viewport,
    tools: &ToolManager,
    style: &RenderStyle,
) {
    if style.show_colliders {
        for id in viewport.visible_cells() {
            surface.fill_diamond(&viewport.cell_screen_collider(id), style.collider_color);
        }
    }

    let tint = match tools.gesture().map(|gesture| gesture.action) {
        Some(GestureAction::Erase) => style.erase_color,
        _ => style.paint_color,
    };
    for &id in tools.affected_cells() {
        surface.fill_rect(viewport.cell_screen_rect(id), tint);
    }

    match tools.shape() {
        Some(ToolShape::Line(raycast)) => {
            surface.draw_line(*raycast, style.line_color, style.line_width);
            surface.fill_circle(raycast.p0, style.point_size, style.point_color);
            surface.fill_circle(raycast.p1, style.point_size, style.point_color);
        }
        Some(ToolShape::OutArea(area)) | Some(ToolShape::FillArea(area)) => {
            surface.stroke_rect(area.bounding_box(), style.line_color, style.line_width);
        }
        Some(ToolShape::Circle { center, radius }) => {
            surface.fill_circle(*center, *radius, tint);
            surface.fill_circle(*center, style.point_size, style.point_color);
        }
        None => {}
    }

    if let Some(hover) = viewport.hover_cell() {
        surface.stroke_rect(
            viewport.cell_screen_rect(hover),
            style.hover_color,
            style.hover_width,
        );
    }
}

/// Draw a full frame of an editor.
pub fn render_frame<S: Surface + ?Sized, K: KeyValueStore>(
    surface: &mut S,
    editor: &Editor<K>,
    sheet: &SpriteSheet,
    style: &RenderStyle,
) {
    render_tiles(surface, editor.viewport(), sheet, style);
    render_selection(surface, editor.viewport(), editor.tools(), style);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::{DrawCommand, RecordingSurface};
    use kurbo::{Point, Rect, Vec2};
    use tilegrid_core::{CellId, EditorConfig, Layer, SpriteCoord, ToolKind};

    fn viewport(columns: u32, rows: u32, width: f64, height: f64) -> Viewport {
        Viewport::new(&EditorConfig {
            cell_size: 100.0,
            columns,
            rows,
            canvas_width: width,
            canvas_height: height,
            ..EditorConfig::default()
        })
    }

    fn sheet() -> SpriteSheet {
        SpriteSheet::new(32.0, 4, 4)
    }

    fn count(surface: &RecordingSurface, pred: impl Fn(&DrawCommand) -> bool) -> usize {
        surface.commands().iter().filter(|cmd| pred(cmd)).count()
    }

    #[test]
    fn test_tiles_offset_applied_once() {
        let mut vp = viewport(4, 3, 400.0, 300.0);
        vp.grid_mut()
            .set_slot(CellId::new(1, 2), Layer::Tiles, Some(SpriteCoord::new(0, 3)));
        vp.set_offset(Vec2::new(30.0, 10.0));

        let mut surface = RecordingSurface::new();
        render_tiles(&mut surface, &vp, &sheet(), &RenderStyle::default());

        let images: Vec<_> = surface
            .commands()
            .iter()
            .filter_map(|cmd| match cmd {
                DrawCommand::Image { source, dest } => Some((*source, *dest)),
                _ => None,
            })
            .collect();
        assert_eq!(
            images,
            vec![(
                Rect::new(96.0, 0.0, 128.0, 32.0),
                Rect::new(70.0, 190.0, 170.0, 290.0)
            )]
        );
    }

    #[test]
    fn test_tile_then_item() {
        let mut vp = viewport(2, 2, 400.0, 300.0);
        let id = CellId::new(0, 0);
        vp.grid_mut()
            .set_slot(id, Layer::Tiles, Some(SpriteCoord::new(0, 0)));
        vp.grid_mut()
            .set_slot(id, Layer::Items, Some(SpriteCoord::new(1, 1)));
        // Outside the 4x4 sheet: skipped.
        vp.grid_mut()
            .set_slot(CellId::new(1, 0), Layer::Tiles, Some(SpriteCoord::new(9, 9)));

        let mut surface = RecordingSurface::new();
        render_tiles(&mut surface, &vp, &sheet(), &RenderStyle::default());

        let sources: Vec<Rect> = surface
            .commands()
            .iter()
            .filter_map(|cmd| match cmd {
                DrawCommand::Image { source, .. } => Some(*source),
                _ => None,
            })
            .collect();
        assert_eq!(
            sources,
            vec![Rect::new(0.0, 0.0, 32.0, 32.0), Rect::new(32.0, 32.0, 64.0, 64.0)]
        );
    }

    #[test]
    fn test_only_visible_cells_drawn() {
        let vp = viewport(1000, 1000, 400.0, 300.0);
        let mut surface = RecordingSurface::new();
        render_tiles(&mut surface, &vp, &sheet(), &RenderStyle::default());

        assert!(matches!(surface.commands()[0], DrawCommand::Clear { .. }));
        assert_eq!(count(&surface, |c| matches!(c, DrawCommand::StrokeRect { .. })), 12);
    }

    #[test]
    fn test_grid_lines_toggle() {
        let mut vp = viewport(4, 3, 400.0, 300.0);
        vp.toggle_grid();
        let mut surface = RecordingSurface::new();
        render_tiles(&mut surface, &vp, &sheet(), &RenderStyle::default());
        assert_eq!(count(&surface, |c| matches!(c, DrawCommand::StrokeRect { .. })), 0);
    }

    #[test]
    fn test_line_selection_overlay() {
        let vp = viewport(4, 3, 800.0, 600.0);
        let mut tools = ToolManager::new();
        tools.toggle(ToolKind::Line);
        tools.begin(CellId::new(0, 0), GestureAction::Paint, &vp);
        tools.update(CellId::new(3, 0), &vp);

        let style = RenderStyle::default();
        let mut surface = RecordingSurface::new();
        render_selection(&mut surface, &vp, &tools, &style);

        let tints: Vec<_> = surface
            .commands()
            .iter()
            .filter_map(|cmd| match cmd {
                DrawCommand::FillRect { color, .. } => Some(color.to_rgba8()),
                _ => None,
            })
            .collect();
        assert_eq!(tints.len(), 4);
        assert!(tints.iter().all(|c| *c == style.paint_color.to_rgba8()));

        let line = surface.commands().iter().find_map(|cmd| match cmd {
            DrawCommand::Line { line, width, .. } => Some((*line, *width)),
            _ => None,
        });
        let (line, width) = line.unwrap();
        assert_eq!(line.p0, Point::new(50.0, 50.0));
        assert_eq!(line.p1, Point::new(350.0, 50.0));
        assert!((width - 4.0).abs() < f64::EPSILON);
        assert_eq!(count(&surface, |c| matches!(c, DrawCommand::Circle { .. })), 2);
    }

    #[test]
    fn test_erase_overlay_tint_and_hover() {
        let mut vp = viewport(4, 3, 800.0, 600.0);
        vp.update_hover(Point::new(150.0, 150.0));
        let mut tools = ToolManager::new();
        tools.toggle(ToolKind::OutArea);
        tools.begin(CellId::new(0, 0), GestureAction::Erase, &vp);
        tools.update(CellId::new(1, 1), &vp);

        let style = RenderStyle::default();
        let mut surface = RecordingSurface::new();
        render_selection(&mut surface, &vp, &tools, &style);

        let erase = style.erase_color.to_rgba8();
        assert_eq!(
            count(&surface, |c| matches!(c, DrawCommand::FillRect { color, .. } if color.to_rgba8() == erase)),
            4
        );
        let outlines: Vec<Rect> = surface
            .commands()
            .iter()
            .filter_map(|cmd| match cmd {
                DrawCommand::StrokeRect { rect, .. } => Some(*rect),
                _ => None,
            })
            .collect();
        // Area outline, then the hovered cell.
        assert_eq!(
            outlines,
            vec![
                Rect::new(50.0, 50.0, 150.0, 150.0),
                Rect::new(100.0, 100.0, 200.0, 200.0)
            ]
        );
    }

    #[test]
    fn test_colliders_follow_camera() {
        let mut vp = viewport(1, 1, 400.0, 300.0);
        vp.set_offset(Vec2::new(-10.0, -20.0));
        let mut surface = RecordingSurface::new();
        let style = RenderStyle::default().with_colliders(true);
        render_selection(&mut surface, &vp, &ToolManager::new(), &style);

        match &surface.commands()[0] {
            DrawCommand::Diamond { quad, .. } => {
                assert_eq!(quad.top, Point::new(60.0, 20.0));
                assert_eq!(quad.left, Point::new(10.0, 70.0));
            }
            other => panic!("unexpected command {:?}", other),
        }
    }
}
