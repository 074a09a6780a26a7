use crate::config::EngineConfig;
use crate::engine::Lrud;
use crate::error::Result;
use crate::node::NodeSpec;
use serde::{Deserialize, Serialize};

/// A navigation tree described as JSON: nodes, engine settings and the
/// initially focused node
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Layout {
    #[serde(default)]
    pub config: EngineConfig,
    pub nodes: Vec<NodeSpec>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub focus: Option<String>,
}

impl Layout {
    pub fn load_from_file(path: &str) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    pub fn from_json(content: &str) -> Result<Self> {
        let layout: Layout = serde_json::from_str(content)?;
        Ok(layout)
    }

    pub fn save_to_file(&self, path: &str) -> Result<()> {
        std::fs::write(path, self.to_json()?)?;
        Ok(())
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Register every node in document order, then apply the initial focus
    pub fn build_engine(&self) -> Result<Lrud> {
        let mut engine = Lrud::with_config(self.config.clone());
        for spec in &self.nodes {
            engine.register_spec(spec)?;
        }
        if let Some(focus) = &self.focus {
            engine.assign_focus(focus)?;
        }
        log::debug!(
            "Layout::build_engine: {} nodes, focus {:?}",
            engine.tree().len(),
            engine.current_focus()
        );
        Ok(engine)
    }

    /// Capture an engine's tree, remembered paths and focus
    pub fn from_engine(engine: &Lrud) -> Self {
        Layout {
            config: engine.config().clone(),
            nodes: engine.get_tree().map(|root| root.to_spec()).into_iter().collect(),
            focus: engine.current_focus().map(str::to_string),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::direction::Direction;

    const SAMPLE: &str = r#"{
        "nodes": [
            {"id": "root", "orientation": "vertical"},
            {"id": "BOX_A", "orientation": "horizontal", "children": [
                {"id": "NODE_1", "isFocusable": true},
                {"id": "NODE_2", "selectAction": {"route": "/two"}}
            ]},
            {"id": "BOX_B", "orientation": "horizontal", "children": [
                {"id": "NODE_3", "isFocusable": true, "label": "three"}
            ]}
        ],
        "focus": "NODE_1"
    }"#;

    #[test]
    fn test_build_engine_from_json() {
        let layout = Layout::from_json(SAMPLE).unwrap();
        let engine = layout.build_engine().unwrap();

        assert_eq!(engine.current_focus(), Some("NODE_1"));
        assert_eq!(
            engine.get_node_path_list(),
            vec![
                "root",
                "root.children.BOX_A",
                "root.children.BOX_A.children.NODE_1",
                "root.children.BOX_A.children.NODE_2",
                "root.children.BOX_B",
                "root.children.BOX_B.children.NODE_3",
            ]
        );
        let node = engine.get_node("NODE_3").unwrap();
        assert_eq!(node.extra.get("label"), Some(&serde_json::json!("three")));
    }

    #[test]
    fn test_export_rebuilds_same_state() {
        let mut engine = Layout::from_json(SAMPLE).unwrap().build_engine().unwrap();
        engine.handle_key_event(Direction::Down).unwrap();
        engine.handle_key_event(Direction::Up).unwrap();
        assert_eq!(engine.current_focus(), Some("NODE_3"));

        let exported = Layout::from_engine(&engine);
        let rebuilt = exported.build_engine().unwrap();

        assert_eq!(rebuilt.current_focus(), Some("NODE_3"));
        assert_eq!(rebuilt.get_tree(), engine.get_tree());
        assert_eq!(rebuilt.get_node_path_list(), engine.get_node_path_list());
    }

    #[test]
    fn test_file_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("layout.json");
        let path = path.to_str().unwrap();

        let layout = Layout::from_json(SAMPLE).unwrap();
        layout.save_to_file(path).unwrap();
        let loaded = Layout::load_from_file(path).unwrap();
        assert_eq!(loaded.focus.as_deref(), Some("NODE_1"));
        assert_eq!(loaded.nodes.len(), 3);
    }
}
