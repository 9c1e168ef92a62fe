//! Navigation rules over a generated map.

use super::types::{MapGraph, MapNode};

/// Nodes the player may move to from `current_id`: declared children that
/// have been unlocked.
pub fn selectable_nodes<'a>(map: &'a MapGraph, current_id: &str) -> Vec<&'a MapNode> {
    let Some(current) = map.get(current_id) else {
        return Vec::new();
    };
    current
        .children
        .iter()
        .filter_map(|id| map.get(id))
        .filter(|n| !n.locked)
        .collect()
}

pub fn is_selectable(map: &MapGraph, current_id: &str, target_id: &str) -> bool {
    selectable_nodes(map, current_id)
        .iter()
        .any(|n| n.id == target_id)
}

/// One line per floor, top floor first: `[C] ( E )` with the current node
/// in brackets and completed nodes shown as `.`.
pub fn render_map(map: &MapGraph, current_id: &str) -> String {
    let mut lines = Vec::new();
    for floor in (0..map.floor_count()).rev() {
        let cells: Vec<String> = map
            .floor(floor)
            .map(|n| {
                let icon = if n.completed && n.id != current_id {
                    '.'
                } else {
                    n.category.icon()
                };
                if n.id == current_id {
                    format!("[{icon}]")
                } else {
                    format!(" {icon} ")
                }
            })
            .collect();
        lines.push(format!("{floor:>2} {}", cells.join("")));
    }
    lines.join("\n")
}
