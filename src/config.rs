use serde::{Deserialize, Serialize};

/// How siblings are ordered when stepping between them
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SiblingOrder {
    /// Registration order
    #[default]
    Registration,
    /// Ascending `order` value; unordered children follow in registration order
    OrderHint,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EngineConfig {
    pub sibling_order: SiblingOrder,
    /// Step to the previous sibling on UP and LEFT instead of always forward
    pub reverse_on_backward: bool,
}

impl EngineConfig {
    pub fn with_sibling_order(mut self, order: SiblingOrder) -> Self {
        self.sibling_order = order;
        self
    }

    pub fn with_reverse_on_backward(mut self, enabled: bool) -> Self {
        self.reverse_on_backward = enabled;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_baseline_navigation() {
        let config = EngineConfig::default();
        assert_eq!(config.sibling_order, SiblingOrder::Registration);
        assert!(!config.reverse_on_backward);
    }

    #[test]
    fn test_partial_config_deserializes() {
        let config: EngineConfig = serde_json::from_str(r#"{"siblingOrder": "order_hint"}"#).unwrap();
        assert_eq!(config.sibling_order, SiblingOrder::OrderHint);
        assert!(!config.reverse_on_backward);

        let config: EngineConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config, EngineConfig::default());
    }
}
