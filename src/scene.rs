use std::path::PathBuf;

use egui::epaint::CubicBezierShape;
use egui::{pos2, vec2, Align2, Color32, FontId, Pos2, Rect, Rounding, Sense, Shape, Stroke, Ui};

use crate::layout::{EdgeLine, LayoutParams, PositionedNode, TreeLayout};
use crate::viewbox::ViewBox;

const DIRECTORY_FILL: Color32 = Color32::from_rgb(0x4A, 0x90, 0xE2);
const FILE_FILL: Color32 = Color32::from_rgb(0x67, 0xC2, 0x3A);
const OUTLINE: Color32 = Color32::from_rgb(0x2C, 0x3E, 0x50);
const HOME_FILL: Color32 = Color32::from_rgb(0xE7, 0x4C, 0x3C);
const HOME_OUTLINE: Color32 = Color32::from_rgb(0xC0, 0x39, 0x2B);

/// Inset between a node's border and its label, plane units.
const NODE_PADDING: f32 = 400.0;
/// Label size in plane units; on-screen size follows the zoom level.
const LABEL_FONT_SIZE: f32 = 300.0;
/// Average glyph width estimate used to decide label truncation.
const AVG_CHAR_WIDTH: f32 = 120.0;
const ELLIPSIS: &str = "...";

const NODE_ROUNDING: f32 = 20.0;
const NODE_STROKE_WIDTH: f32 = 4.0;
const EDGE_STROKE_WIDTH: f32 = 6.0;
const ARROW_LENGTH: f32 = 300.0;
const ARROW_HALF_WIDTH: f32 = 150.0;

/// Labels smaller than this many pixels are noise; skip them.
const MIN_LABEL_PX: f32 = 3.0;

/// What a click on the scene asks the application to do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeAction {
    ToggleDirectory(PathBuf),
    LaunchFile(PathBuf),
    GoHome,
}

/// Redraw the whole scene under the current view transform and report the
/// action of whichever element was clicked, if any.
///
/// Immediate mode: every shape is recreated each frame, so a rebuild never
/// has stale drawables to tear down.
pub fn draw_scene(
    ui: &mut Ui,
    layout: Option<&TreeLayout>,
    camera: &ViewBox,
    viewport: Rect,
    params: &LayoutParams,
) -> Option<NodeAction> {
    let mut action = None;

    if let Some(layout) = layout {
        for edge in &layout.edges {
            draw_edge(ui, edge, camera, viewport);
        }
        for node in &layout.nodes {
            if let Some(clicked) = draw_node(ui, node, camera, viewport, params) {
                action = Some(clicked);
            }
        }
    }

    // Home stays pinned in screen space, above everything else.
    if draw_home_button(ui, viewport) {
        action = Some(NodeAction::GoHome);
    }

    action
}

fn draw_node(
    ui: &mut Ui,
    node: &PositionedNode,
    camera: &ViewBox,
    viewport: Rect,
    params: &LayoutParams,
) -> Option<NodeAction> {
    let scale = camera.pixels_per_unit(viewport);
    let center = camera.screen_from_plane(node.pos, viewport);
    let rect = Rect::from_center_size(
        center,
        vec2(params.node_width * scale.x, params.node_height * scale.y),
    );

    let fill = if node.entry.is_directory { DIRECTORY_FILL } else { FILE_FILL };
    ui.painter().rect(
        rect,
        Rounding::same(NODE_ROUNDING * scale.x),
        fill,
        Stroke::new(NODE_STROKE_WIDTH * scale.x, OUTLINE),
    );

    let font_px = LABEL_FONT_SIZE * scale.y;
    if font_px >= MIN_LABEL_PX {
        let label = fit_label(&node.entry.name, params.node_width - 2.0 * NODE_PADDING);
        ui.painter().text(
            center,
            Align2::CENTER_CENTER,
            label,
            FontId::proportional(font_px),
            Color32::WHITE,
        );
    }

    let response = ui.interact(rect, ui.id().with(&node.path), Sense::click());
    if response.hovered() {
        ui.ctx().set_cursor_icon(egui::CursorIcon::PointingHand);
    }
    if response.clicked() {
        return Some(if node.entry.is_directory {
            NodeAction::ToggleDirectory(node.path.clone())
        } else {
            NodeAction::LaunchFile(node.path.clone())
        });
    }
    None
}

fn draw_edge(ui: &Ui, edge: &EdgeLine, camera: &ViewBox, viewport: Rect) {
    let scale = camera.pixels_per_unit(viewport);
    let [p0, c1, c2, p3] = edge_curve(edge.from, edge.to);
    let points = [p0, c1, c2, p3].map(|p| camera.screen_from_plane(p, viewport));

    ui.painter().add(Shape::CubicBezier(CubicBezierShape::from_points_stroke(
        points,
        false,
        Color32::TRANSPARENT,
        Stroke::new(EDGE_STROKE_WIDTH * scale.x, OUTLINE),
    )));

    let tip = arrow_head(edge.from, edge.to).map(|p| camera.screen_from_plane(p, viewport));
    ui.painter()
        .add(Shape::convex_polygon(tip.to_vec(), OUTLINE, Stroke::NONE));
}

/// Cubic control points: both pulled to the vertical midpoint, which gives
/// the gentle S-curve between a parent and a vertically offset child.
fn edge_curve(from: Pos2, to: Pos2) -> [Pos2; 4] {
    let mid_y = (from.y + to.y) / 2.0;
    [from, pos2(from.x, mid_y), pos2(to.x, mid_y), to]
}

/// Arrowhead triangle at the child end, oriented along the curve's arrival
/// direction (plane space).
fn arrow_head(from: Pos2, to: Pos2) -> [Pos2; 3] {
    let [_, _, c2, _] = edge_curve(from, to);
    let mut dir = to - c2;
    if dir.length() < 1e-3 {
        dir = to - from;
    }
    let dir = if dir.length() < 1e-3 { vec2(1.0, 0.0) } else { dir.normalized() };
    let perp = vec2(-dir.y, dir.x);

    let base = to - dir * ARROW_LENGTH;
    [to, base + perp * ARROW_HALF_WIDTH, base - perp * ARROW_HALF_WIDTH]
}

fn draw_home_button(ui: &mut Ui, viewport: Rect) -> bool {
    let rect = Rect::from_center_size(pos2(viewport.center().x, viewport.top() + 44.0), vec2(160.0, 48.0));

    ui.painter().rect(
        rect,
        Rounding::same(8.0),
        HOME_FILL,
        Stroke::new(2.0, HOME_OUTLINE),
    );
    ui.painter().text(
        rect.center(),
        Align2::CENTER_CENTER,
        "🏠 Home",
        FontId::proportional(18.0),
        Color32::WHITE,
    );

    let response = ui.interact(rect, ui.id().with("home-button"), Sense::click());
    if response.hovered() {
        ui.ctx().set_cursor_icon(egui::CursorIcon::PointingHand);
    }
    response.clicked()
}

/// Shorten `name` to fit a node interior `interior_width` plane units wide,
/// using the fixed average-character-width estimate. Preserves a trailing
/// extension and marks the cut with an ellipsis; names that fit come back
/// unchanged.
pub fn fit_label(name: &str, interior_width: f32) -> String {
    let max_chars = (interior_width / AVG_CHAR_WIDTH) as usize;
    let chars: Vec<char> = name.chars().collect();
    if chars.len() <= max_chars {
        return name.to_string();
    }

    // A leading dot is a hidden-file marker, not an extension separator.
    let extension = name
        .rfind('.')
        .filter(|&i| i > 0 && i + 1 < name.len())
        .map(|i| &name[i..]);

    match extension {
        Some(ext) if ext.chars().count() + ELLIPSIS.len() < max_chars => {
            let keep = max_chars - ELLIPSIS.len() - ext.chars().count();
            let stem: String = chars[..keep].iter().collect();
            format!("{stem}{ELLIPSIS}{ext}")
        }
        _ => {
            let keep = max_chars.saturating_sub(ELLIPSIS.len()).max(1);
            let stem: String = chars[..keep.min(chars.len())].iter().collect();
            format!("{stem}{ELLIPSIS}")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fit_label_preserves_extension() {
        let label = fit_label("configuration.json", 1_200.0);
        assert!(label.ends_with(".json"), "got {label}");
        assert!(label.contains(ELLIPSIS));
        assert!(label.chars().count() <= 10);
    }

    #[test]
    fn test_fit_label_identity_when_wide_enough() {
        let name = "configuration.json";
        assert_eq!(fit_label(name, name.chars().count() as f32 * AVG_CHAR_WIDTH), name);
        assert_eq!(fit_label(name, 10_000.0), name);
    }

    #[test]
    fn test_fit_label_truncates_stem() {
        // 15-character budget.
        assert_eq!(fit_label("very-long-name.pdf", 15.0 * AVG_CHAR_WIDTH), "very-lon....pdf");
    }

    #[test]
    fn test_fit_label_without_extension() {
        let label = fit_label("averyverylongdirectoryname", 8.0 * AVG_CHAR_WIDTH);
        assert_eq!(label, "avery...");
    }

    #[test]
    fn test_fit_label_tiny_budget_keeps_one_char() {
        let label = fit_label("something", 2.0 * AVG_CHAR_WIDTH);
        assert_eq!(label, "s...");
    }

    #[test]
    fn test_fit_label_short_names_untouched() {
        assert_eq!(fit_label("a.txt", 1_200.0), "a.txt");
        assert_eq!(fit_label("docs", 1_200.0), "docs");
    }

    #[test]
    fn test_edge_curve_controls_at_vertical_midpoint() {
        let [p0, c1, c2, p3] = edge_curve(pos2(0.0, 0.0), pos2(4_000.0, 1_200.0));
        assert_eq!(p0, pos2(0.0, 0.0));
        assert_eq!(p3, pos2(4_000.0, 1_200.0));
        assert_eq!(c1, pos2(0.0, 600.0));
        assert_eq!(c2, pos2(4_000.0, 600.0));
    }

    #[test]
    fn test_arrow_points_along_horizontal_edge() {
        // Same-y edge degenerates to a straight line; the head must fall
        // back to the chord direction and sit left of the tip.
        let [tip, a, b] = arrow_head(pos2(0.0, 0.0), pos2(4_000.0, 0.0));
        assert_eq!(tip, pos2(4_000.0, 0.0));
        assert!(a.x < tip.x && b.x < tip.x);
        assert!((a.y + b.y).abs() < 1e-3);
    }
}
