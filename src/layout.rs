use std::path::{Path, PathBuf};

use egui::{pos2, Pos2};
use serde::{Deserialize, Serialize};

use crate::disclosure::DisclosureState;
use crate::listing::{DirectoryLister, Entry};

/// Which half of the root split a node's subtree belongs to.
///
/// Assigned at depth 1 and propagated unchanged to every descendant; the
/// root itself is `None`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Left,
    Right,
    None,
}

impl Side {
    /// Horizontal growth direction for children of this subtree.
    fn direction(self) -> f32 {
        match self {
            Side::Left => -1.0,
            Side::Right | Side::None => 1.0,
        }
    }
}

/// Placement policy for the root's immediate children.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RootArrangement {
    /// First half of the listing to the left of the root, second half to
    /// the right, each half stacked vertically.
    Split,
    /// Evenly spaced on a circle around the root, starting at twelve
    /// o'clock.
    Radial,
}

/// Spacing and sizing constants, in plane units. Configuration, not derived.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutParams {
    pub node_width: f32,
    pub node_height: f32,
    /// Horizontal (or radial) distance from the root to its children.
    pub root_offset_x: f32,
    /// Damped horizontal step for every deeper level.
    pub branch_offset_x: f32,
    /// Vertical spacing between root-level siblings.
    pub root_spacing_y: f32,
    /// Damped vertical spacing between deeper siblings.
    pub branch_spacing_y: f32,
    pub arrangement: RootArrangement,
}

impl Default for LayoutParams {
    fn default() -> Self {
        Self {
            node_width: 2_000.0,
            node_height: 800.0,
            root_offset_x: 6_000.0,
            branch_offset_x: 4_000.0,
            root_spacing_y: 1_500.0,
            branch_spacing_y: 1_200.0,
            arrangement: RootArrangement::Split,
        }
    }
}

/// One revealed entry with its computed plane position.
#[derive(Debug, Clone)]
pub struct PositionedNode {
    pub path: PathBuf,
    pub entry: Entry,
    pub pos: Pos2,
    pub depth: u32,
    pub side: Side,
}

/// Parent-to-child connector, derivative of two positioned nodes.
#[derive(Debug, Clone, Copy)]
pub struct EdgeLine {
    pub from: Pos2,
    pub to: Pos2,
}

/// Complete output of one layout pass. Recomputed from scratch every time.
#[derive(Debug, Clone, Default)]
pub struct TreeLayout {
    pub nodes: Vec<PositionedNode>,
    pub edges: Vec<EdgeLine>,
}

/// Walk the revealed tree and position every visible node.
///
/// Pure apart from the lister calls: the same root, disclosure snapshot, and
/// listing order always produce the same layout.
pub fn build_layout(
    lister: &dyn DirectoryLister,
    root: &Path,
    origin: Pos2,
    disclosure: &DisclosureState,
    params: &LayoutParams,
) -> TreeLayout {
    let root_name = root
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "/".to_string());

    let mut layout = TreeLayout::default();
    layout.nodes.push(PositionedNode {
        path: root.to_path_buf(),
        entry: Entry { name: root_name, is_directory: true },
        pos: origin,
        depth: 0,
        side: Side::None,
    });

    // The root's children are always revealed; disclosure gates only
    // deeper levels.
    place_children(lister, root, origin, 0, Side::None, disclosure, params, &mut layout);
    layout
}

/// List a directory and drop hidden entries. A failed listing yields no
/// children for this pass; the next rebuild retries naturally.
fn visible_entries(lister: &dyn DirectoryLister, path: &Path) -> Vec<Entry> {
    match lister.list(path) {
        Ok(entries) => entries
            .into_iter()
            .filter(|entry| !entry.name.starts_with('.'))
            .collect(),
        Err(err) => {
            log::warn!("listing {} failed: {}", path.display(), err);
            Vec::new()
        }
    }
}

#[allow(clippy::too_many_arguments)]
fn place_children(
    lister: &dyn DirectoryLister,
    dir: &Path,
    parent_pos: Pos2,
    parent_depth: u32,
    parent_side: Side,
    disclosure: &DisclosureState,
    params: &LayoutParams,
    layout: &mut TreeLayout,
) {
    let entries = visible_entries(lister, dir);
    if entries.is_empty() {
        return;
    }

    let placements = if parent_depth == 0 {
        match params.arrangement {
            RootArrangement::Split => split_placements(entries.len(), parent_pos, params),
            RootArrangement::Radial => radial_placements(entries.len(), parent_pos, params),
        }
    } else {
        branch_placements(entries.len(), parent_pos, parent_side, params)
    };

    for (entry, (pos, side)) in entries.into_iter().zip(placements) {
        let child_path = dir.join(&entry.name);
        let is_directory = entry.is_directory;

        layout.edges.push(EdgeLine { from: parent_pos, to: pos });
        layout.nodes.push(PositionedNode {
            path: child_path.clone(),
            entry,
            pos,
            depth: parent_depth + 1,
            side,
        });

        if is_directory && disclosure.is_expanded(&child_path) {
            place_children(
                lister,
                &child_path,
                pos,
                parent_depth + 1,
                side,
                disclosure,
                params,
                layout,
            );
        }
    }
}

/// Vertical position of sibling `index` out of `count`, centered on `center`.
fn stacked_y(center: f32, index: usize, count: usize, spacing: f32) -> f32 {
    center + (index as f32 - (count as f32 - 1.0) / 2.0) * spacing
}

fn split_placements(count: usize, origin: Pos2, params: &LayoutParams) -> Vec<(Pos2, Side)> {
    // First half goes left; the left half takes the extra on odd counts.
    let left_count = (count + 1) / 2;
    let right_count = count - left_count;

    let mut placements = Vec::with_capacity(count);
    for i in 0..left_count {
        let pos = pos2(
            origin.x - params.root_offset_x,
            stacked_y(origin.y, i, left_count, params.root_spacing_y),
        );
        placements.push((pos, Side::Left));
    }
    for i in 0..right_count {
        let pos = pos2(
            origin.x + params.root_offset_x,
            stacked_y(origin.y, i, right_count, params.root_spacing_y),
        );
        placements.push((pos, Side::Right));
    }
    placements
}

fn radial_placements(count: usize, origin: Pos2, params: &LayoutParams) -> Vec<(Pos2, Side)> {
    let angle_step = std::f32::consts::TAU / count as f32;
    // On-axis nodes carry no side; their subtrees grow rightward.
    let side_threshold = params.root_offset_x * 1e-3;

    (0..count)
        .map(|i| {
            let angle = i as f32 * angle_step - std::f32::consts::FRAC_PI_2;
            let dx = params.root_offset_x * angle.cos();
            let dy = params.root_offset_x * angle.sin();
            let side = if dx < -side_threshold {
                Side::Left
            } else if dx > side_threshold {
                Side::Right
            } else {
                Side::None
            };
            (pos2(origin.x + dx, origin.y + dy), side)
        })
        .collect()
}

fn branch_placements(
    count: usize,
    parent_pos: Pos2,
    parent_side: Side,
    params: &LayoutParams,
) -> Vec<(Pos2, Side)> {
    let x = parent_pos.x + parent_side.direction() * params.branch_offset_x;
    (0..count)
        .map(|i| {
            let y = stacked_y(parent_pos.y, i, count, params.branch_spacing_y);
            (pos2(x, y), parent_side)
        })
        .collect()
}
