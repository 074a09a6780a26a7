use crate::engine::Lrud;
use crate::node::NodeSnapshot;

/// Render the tree as indented text.
///
/// `*` marks the focused node, `>` marks each container's active child.
pub fn render_tree(engine: &Lrud) -> String {
    let mut result = String::new();
    if let Some(root) = engine.get_tree() {
        render_node(&root, engine.current_focus(), false, 0, &mut result);
    } else {
        result.push_str("(empty)\n");
    }
    result
}

fn render_node(
    node: &NodeSnapshot,
    focus: Option<&str>,
    is_active: bool,
    depth: usize,
    out: &mut String,
) {
    let focus_marker = if focus == Some(node.id.as_str()) { '*' } else { ' ' };
    let active_marker = if is_active { '>' } else { ' ' };
    out.push_str(&format!("{}{}{}{}", focus_marker, active_marker, "  ".repeat(depth), node.id));

    let mut tags = Vec::new();
    if let Some(orientation) = node.orientation {
        tags.push(orientation.to_string());
    }
    if node.wraps {
        tags.push("wraps".to_string());
    }
    if node.is_focusable_target() {
        tags.push("focusable".to_string());
    }
    if let Some(order) = node.order {
        tags.push(format!("order={}", order));
    }
    if !tags.is_empty() {
        out.push_str(&format!(" [{}]", tags.join(", ")));
    }
    out.push('\n');

    for child in &node.children {
        let active = node.active_child.as_deref() == Some(child.id.as_str());
        render_node(child, focus, active, depth + 1, out);
    }
}

/// Render the location of every node, one per line
pub fn render_paths(engine: &Lrud) -> String {
    let mut result = String::new();
    for path in engine.get_node_path_list() {
        result.push_str(&path);
        result.push('\n');
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::NodeAttrs;

    #[test]
    fn test_render_tree() {
        let mut nav = Lrud::new();
        nav.register_node("root", NodeAttrs::new().vertical()).unwrap();
        nav.register_node("BOX_A", NodeAttrs::new().horizontal().wrapping())
            .unwrap();
        nav.register_node("NODE_1", NodeAttrs::new().with_parent("BOX_A").focusable())
            .unwrap();
        nav.register_node("NODE_2", NodeAttrs::new().with_parent("BOX_A").focusable())
            .unwrap();
        nav.assign_focus("NODE_2").unwrap();

        let expected = concat!(
            "  root [vertical]\n",
            " >  BOX_A [horizontal, wraps]\n",
            "      NODE_1 [focusable]\n",
            "*>    NODE_2 [focusable]\n",
        );
        assert_eq!(render_tree(&nav), expected);
    }

    #[test]
    fn test_render_empty() {
        assert_eq!(render_tree(&Lrud::new()), "(empty)\n");
        assert_eq!(render_paths(&Lrud::new()), "");
    }
}
