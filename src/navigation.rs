//! Directional traversal over the navigation tree
//!
//! A key press is resolved in three steps: climb up to the nearest container
//! that can act on the direction, step to a sibling inside it, then dig down
//! from that sibling to something focusable.

use crate::config::{EngineConfig, SiblingOrder};
use crate::direction::{is_direction_and_orientation_matching, Direction};
use crate::error::{LrudError, Result};
use crate::node::{NodeKey, Role};
use crate::tree::Tree;

/// Find the nearest node, starting at `start`, that has children and an
/// orientation matching `direction`. `None` means the direction is a dead end.
pub fn climb_up(tree: &Tree, start: NodeKey, direction: Direction) -> Option<NodeKey> {
    let mut current = start;
    loop {
        let node = tree.get(current)?;

        let actionable = node.has_children()
            && node
                .orientation()
                .is_some_and(|o| is_direction_and_orientation_matching(o, direction));
        if actionable {
            log::debug!("climb_up: '{}' handles {}", node.id(), direction);
            return Some(current);
        }

        match node.parent() {
            Some(parent) => current = parent,
            None => {
                log::debug!("climb_up: no ancestor handles {}", direction);
                return None;
            }
        }
    }
}

/// Children of a container in the order siblings are walked
pub fn ordered_children(tree: &Tree, container: NodeKey, order: SiblingOrder) -> Vec<NodeKey> {
    let mut children = tree.children(container).to_vec();
    if order == SiblingOrder::OrderHint {
        // stable sort keeps registration order among ties and unordered nodes
        children.sort_by_key(|&child| match tree.get(child).and_then(|n| n.order()) {
            Some(order) => (0, order),
            None => (1, 0),
        });
    }
    children
}

fn active_position(tree: &Tree, container: NodeKey, children: &[NodeKey]) -> Option<usize> {
    let active = tree.get(container)?.active_child()?;
    children.iter().position(|&child| child == active)
}

/// The child after the active one.
///
/// On the last child this wraps to the first if the container wraps, otherwise
/// the last child is returned. An unknown active child counts as "before the
/// first", so the first child is returned.
pub fn get_next_child(tree: &Tree, container: NodeKey, order: SiblingOrder) -> Option<NodeKey> {
    let children = ordered_children(tree, container, order);
    let wraps = tree.get(container)?.wraps();

    match active_position(tree, container, &children) {
        Some(index) if index + 1 == children.len() => {
            if wraps {
                children.first().copied()
            } else {
                children.last().copied()
            }
        }
        Some(index) => children.get(index + 1).copied(),
        None => children.first().copied(),
    }
}

/// Mirror of [`get_next_child`] walking towards the first child
pub fn get_prev_child(tree: &Tree, container: NodeKey, order: SiblingOrder) -> Option<NodeKey> {
    let children = ordered_children(tree, container, order);
    let wraps = tree.get(container)?.wraps();

    match active_position(tree, container, &children) {
        Some(0) => {
            if wraps {
                children.last().copied()
            } else {
                children.first().copied()
            }
        }
        Some(index) => children.get(index - 1).copied(),
        None => children.first().copied(),
    }
}

/// Sibling step for a key press under the given configuration
pub fn select_sibling(
    tree: &Tree,
    container: NodeKey,
    direction: Direction,
    config: &EngineConfig,
) -> Option<NodeKey> {
    if config.reverse_on_backward && direction.is_backward() {
        get_prev_child(tree, container, config.sibling_order)
    } else {
        get_next_child(tree, container, config.sibling_order)
    }
}

/// Follow `activeChild` links from `start` to the nearest focusable node.
///
/// A container without an active child gets its first child as the active one,
/// and that choice sticks.
pub fn dig_down(tree: &mut Tree, start: NodeKey, order: SiblingOrder) -> Result<NodeKey> {
    let mut current = start;
    loop {
        let node = tree
            .get(current)
            .ok_or_else(|| LrudError::Generic("dig_down reached a removed node".to_string()))?;
        match node.role() {
            Role::FocusableLeaf | Role::FocusableContainer => {
                log::debug!("dig_down: landed on '{}'", node.id());
                return Ok(current);
            }
            Role::Container => {}
        }

        let active = match node.active_child() {
            Some(active) => active,
            None => {
                let first = ordered_children(tree, current, order)
                    .first()
                    .copied()
                    .ok_or_else(|| {
                        LrudError::NoFocusableDescendant(
                            tree.id_of(start).unwrap_or_default().to_string(),
                        )
                    })?;
                tree.set_active_child(current, Some(first));
                first
            }
        };
        current = active;
    }
}
