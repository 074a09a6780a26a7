use crate::error::LrudError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value};
use std::fmt;
use std::str::FromStr;

slotmap::new_key_type! {
    /// Stable arena handle for a registered node
    pub struct NodeKey;
}

/// Axis along which a container's children are navigated
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE", try_from = "String")]
pub enum Orientation {
    Vertical,
    Horizontal,
}

impl fmt::Display for Orientation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Orientation::Vertical => f.write_str("vertical"),
            Orientation::Horizontal => f.write_str("horizontal"),
        }
    }
}

impl FromStr for Orientation {
    type Err = LrudError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "VERTICAL" => Ok(Orientation::Vertical),
            "HORIZONTAL" => Ok(Orientation::Horizontal),
            _ => Err(LrudError::InvalidOrientation(s.to_string())),
        }
    }
}

impl TryFrom<String> for Orientation {
    type Error = LrudError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// What a node is for navigation purposes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    /// Has children and cannot hold focus itself (also used for empty non-focusable nodes)
    Container,
    FocusableLeaf,
    /// Holds focus itself even though it has children; descent stops here
    FocusableContainer,
}

impl Role {
    fn at_registration(focusable: bool) -> Self {
        if focusable {
            Role::FocusableLeaf
        } else {
            Role::Container
        }
    }

    pub fn is_focusable(self) -> bool {
        matches!(self, Role::FocusableLeaf | Role::FocusableContainer)
    }
}

fn is_false(value: &bool) -> bool {
    !*value
}

/// Truthiness of a pass-through `selectAction` or `isFocusable` value
fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().map_or(true, |f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// `isFocusable` accepts any JSON value and keeps only its truthiness
fn truthy_flag<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    Value::deserialize(deserializer).map(|value| is_truthy(&value))
}

/// Attributes accepted when registering a node.
///
/// Unknown keys are kept in `extra` and travel with the node into every
/// snapshot and event payload.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeAttrs {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent: Option<String>,
    /// Nested children, registered in order right after this node
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<NodeSpec>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub active_child: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub orientation: Option<Orientation>,
    #[serde(
        default,
        deserialize_with = "truthy_flag",
        skip_serializing_if = "is_false"
    )]
    pub is_focusable: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub select_action: Option<Value>,
    #[serde(default, skip_serializing_if = "is_false")]
    pub wraps: bool,
    /// Numeric ordering hint, only consulted with `SiblingOrder::OrderHint`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order: Option<i64>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl NodeAttrs {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_parent(mut self, parent: impl Into<String>) -> Self {
        self.parent = Some(parent.into());
        self
    }

    pub fn with_orientation(mut self, orientation: Orientation) -> Self {
        self.orientation = Some(orientation);
        self
    }

    pub fn vertical(self) -> Self {
        self.with_orientation(Orientation::Vertical)
    }

    pub fn horizontal(self) -> Self {
        self.with_orientation(Orientation::Horizontal)
    }

    pub fn focusable(mut self) -> Self {
        self.is_focusable = true;
        self
    }

    pub fn with_select_action(mut self, action: Value) -> Self {
        self.select_action = Some(action);
        self
    }

    pub fn wrapping(mut self) -> Self {
        self.wraps = true;
        self
    }

    pub fn with_order(mut self, order: i64) -> Self {
        self.order = Some(order);
        self
    }

    pub fn with_active_child(mut self, child: impl Into<String>) -> Self {
        self.active_child = Some(child.into());
        self
    }

    pub fn with_child(mut self, child: NodeSpec) -> Self {
        self.children.push(child);
        self
    }

    /// Attach an application field that is carried verbatim
    pub fn with_field(mut self, key: impl Into<String>, value: Value) -> Self {
        self.extra.insert(key.into(), value);
        self
    }

    /// Whether a node built from these attributes can hold focus
    pub fn is_focusable_target(&self) -> bool {
        self.is_focusable || self.select_action.as_ref().is_some_and(is_truthy)
    }
}

/// A node id paired with its attributes, the unit of a layout document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeSpec {
    pub id: String,
    #[serde(flatten)]
    pub attrs: NodeAttrs,
}

impl NodeSpec {
    pub fn new(id: impl Into<String>, attrs: NodeAttrs) -> Self {
        Self {
            id: id.into(),
            attrs,
        }
    }
}

/// A registered node as stored in the arena
#[derive(Debug, Clone)]
pub struct Node {
    pub(crate) id: String,
    pub(crate) parent: Option<NodeKey>,
    pub(crate) children: Vec<NodeKey>,
    pub(crate) active_child: Option<NodeKey>,
    pub(crate) orientation: Option<Orientation>,
    pub(crate) wraps: bool,
    pub(crate) is_focusable: bool,
    pub(crate) select_action: Option<Value>,
    pub(crate) order: Option<i64>,
    pub(crate) extra: Map<String, Value>,
    role: Role,
}

impl Node {
    pub(crate) fn from_attrs(id: String, parent: Option<NodeKey>, attrs: &NodeAttrs) -> Self {
        Self {
            id,
            parent,
            children: Vec::new(),
            active_child: None,
            orientation: attrs.orientation,
            wraps: attrs.wraps,
            is_focusable: attrs.is_focusable,
            select_action: attrs.select_action.clone(),
            order: attrs.order,
            extra: attrs.extra.clone(),
            role: Role::at_registration(attrs.is_focusable_target()),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn parent(&self) -> Option<NodeKey> {
        self.parent
    }

    pub fn children(&self) -> &[NodeKey] {
        &self.children
    }

    pub fn active_child(&self) -> Option<NodeKey> {
        self.active_child
    }

    pub fn orientation(&self) -> Option<Orientation> {
        self.orientation
    }

    pub fn wraps(&self) -> bool {
        self.wraps
    }

    pub fn order(&self) -> Option<i64> {
        self.order
    }

    pub fn extra(&self) -> &Map<String, Value> {
        &self.extra
    }

    pub fn has_children(&self) -> bool {
        !self.children.is_empty()
    }

    /// Focusability is fixed at registration time
    pub fn is_focusable(&self) -> bool {
        self.role.is_focusable()
    }

    pub fn role(&self) -> Role {
        self.role
    }

    /// Append a child; a focusable leaf becomes a focusable container
    pub(crate) fn attach_child(&mut self, child: NodeKey) {
        self.children.push(child);
        if self.role == Role::FocusableLeaf {
            self.role = Role::FocusableContainer;
        }
    }

    /// Drop a child; a focusable container left empty is a leaf again
    pub(crate) fn detach_child(&mut self, child: NodeKey) {
        self.children.retain(|&c| c != child);
        if self.role == Role::FocusableContainer && self.children.is_empty() {
            self.role = Role::FocusableLeaf;
        }
    }
}

fn serialize_children<S>(children: &[NodeSnapshot], serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.collect_map(children.iter().map(|child| (&child.id, child)))
}

/// Owned, id-based copy of a node and its whole subtree.
///
/// This is what lookups return and what events carry. Serialized, children
/// become an object keyed by id in registration order.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeSnapshot {
    pub id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub active_child: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub orientation: Option<Orientation>,
    #[serde(skip_serializing_if = "is_false")]
    pub is_focusable: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub select_action: Option<Value>,
    #[serde(skip_serializing_if = "is_false")]
    pub wraps: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order: Option<i64>,
    #[serde(
        skip_serializing_if = "Vec::is_empty",
        serialize_with = "serialize_children"
    )]
    pub children: Vec<NodeSnapshot>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl NodeSnapshot {
    /// Find a direct child by id
    pub fn child(&self, id: &str) -> Option<&NodeSnapshot> {
        self.children.iter().find(|child| child.id == id)
    }

    /// Find a node anywhere in this subtree, self included
    pub fn find(&self, id: &str) -> Option<&NodeSnapshot> {
        if self.id == id {
            return Some(self);
        }
        self.children.iter().find_map(|child| child.find(id))
    }

    pub fn child_ids(&self) -> Vec<&str> {
        self.children.iter().map(|child| child.id.as_str()).collect()
    }

    pub fn is_focusable_target(&self) -> bool {
        self.is_focusable || self.select_action.as_ref().is_some_and(is_truthy)
    }

    /// Convert back into a registrable spec, nesting children under it.
    ///
    /// The parent link is dropped for nested children since nesting implies it.
    pub fn to_spec(&self) -> NodeSpec {
        let attrs = NodeAttrs {
            parent: None,
            children: self.children.iter().map(NodeSnapshot::to_spec).collect(),
            active_child: self.active_child.clone(),
            orientation: self.orientation,
            is_focusable: self.is_focusable,
            select_action: self.select_action.clone(),
            wraps: self.wraps,
            order: self.order,
            extra: self.extra.clone(),
        };
        NodeSpec::new(self.id.clone(), attrs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_orientation_parsing() {
        assert_eq!("vertical".parse::<Orientation>().unwrap(), Orientation::Vertical);
        assert_eq!("HORIZONTAL".parse::<Orientation>().unwrap(), Orientation::Horizontal);
        assert_eq!("Horizontal".parse::<Orientation>().unwrap(), Orientation::Horizontal);
        assert!("diagonal".parse::<Orientation>().is_err());
    }

    #[test]
    fn test_focusable_markers() {
        assert!(NodeAttrs::new().focusable().is_focusable_target());
        assert!(NodeAttrs::new().with_select_action(json!(1)).is_focusable_target());
        assert!(NodeAttrs::new().with_select_action(json!({"go": "home"})).is_focusable_target());
        assert!(!NodeAttrs::new().is_focusable_target());
        assert!(!NodeAttrs::new().with_select_action(json!(0)).is_focusable_target());
        assert!(!NodeAttrs::new().with_select_action(Value::Null).is_focusable_target());
        assert!(!NodeAttrs::new().with_select_action(json!(false)).is_focusable_target());
    }

    #[test]
    fn test_node_roles() {
        let mut node = Node::from_attrs("a".to_string(), None, &NodeAttrs::new().focusable());
        assert_eq!(node.role(), Role::FocusableLeaf);

        node.attach_child(NodeKey::default());
        assert_eq!(node.role(), Role::FocusableContainer);
        assert!(node.is_focusable());

        node.detach_child(NodeKey::default());
        assert_eq!(node.role(), Role::FocusableLeaf);

        let mut container = Node::from_attrs("b".to_string(), None, &NodeAttrs::new().vertical());
        assert_eq!(container.role(), Role::Container);
        container.attach_child(NodeKey::default());
        assert_eq!(container.role(), Role::Container);
        assert!(!container.is_focusable());
    }

    #[test]
    fn test_attrs_deserialize_keeps_extra_fields() {
        let spec: NodeSpec = serde_json::from_value(json!({
            "id": "NODE_1",
            "parent": "root",
            "orientation": "vertical",
            "isFocusable": true,
            "label": "Home",
            "tracking": {"slot": 3}
        }))
        .unwrap();

        assert_eq!(spec.id, "NODE_1");
        assert_eq!(spec.attrs.parent.as_deref(), Some("root"));
        assert_eq!(spec.attrs.orientation, Some(Orientation::Vertical));
        assert!(spec.attrs.is_focusable);
        assert_eq!(spec.attrs.extra.get("label"), Some(&json!("Home")));
        assert_eq!(spec.attrs.extra.get("tracking"), Some(&json!({"slot": 3})));
        assert!(!spec.attrs.extra.contains_key("id"));
    }

    #[test]
    fn test_is_focusable_accepts_truthy_values() {
        let focusable = |value: Value| {
            serde_json::from_value::<NodeAttrs>(json!({ "isFocusable": value }))
                .unwrap()
                .is_focusable
        };
        assert!(focusable(json!(true)));
        assert!(focusable(json!(1)));
        assert!(focusable(json!("yes")));
        assert!(focusable(json!({})));
        assert!(!focusable(json!(false)));
        assert!(!focusable(json!(0)));
        assert!(!focusable(json!("")));
        assert!(!focusable(Value::Null));

        let spec: NodeSpec =
            serde_json::from_value(json!({"id": "NODE_1", "isFocusable": 1})).unwrap();
        assert!(spec.attrs.is_focusable_target());
    }

    #[test]
    fn test_snapshot_serializes_children_as_map() {
        let leaf = NodeSnapshot {
            id: "NODE_1".to_string(),
            parent: Some("root".to_string()),
            active_child: None,
            orientation: None,
            is_focusable: true,
            select_action: None,
            wraps: false,
            order: None,
            children: Vec::new(),
            extra: Map::new(),
        };
        let root = NodeSnapshot {
            id: "root".to_string(),
            parent: None,
            active_child: Some("NODE_1".to_string()),
            orientation: Some(Orientation::Horizontal),
            is_focusable: false,
            select_action: None,
            wraps: true,
            order: None,
            children: vec![leaf],
            extra: Map::new(),
        };

        let value = serde_json::to_value(&root).unwrap();
        assert_eq!(
            value,
            json!({
                "id": "root",
                "activeChild": "NODE_1",
                "orientation": "HORIZONTAL",
                "wraps": true,
                "children": {
                    "NODE_1": {
                        "id": "NODE_1",
                        "parent": "root",
                        "isFocusable": true
                    }
                }
            })
        );
        assert_eq!(root.find("NODE_1").map(|n| n.id.as_str()), Some("NODE_1"));
        assert_eq!(root.child_ids(), vec!["NODE_1"]);
    }
}
