//! The navigation engine
//!
//! [`Lrud`] owns the tree, the current focus and the subscriber list. Every
//! public operation runs to completion synchronously; notifications go out
//! only after the state change they describe is committed.

use crate::config::EngineConfig;
use crate::direction::Direction;
use crate::error::{LrudError, Result};
use crate::event::{EventKind, FocusEvent, ListenerResult, Subscribers, SubscriptionId};
use crate::navigation;
use crate::node::{NodeAttrs, NodeKey, NodeSnapshot, NodeSpec, Role};
use crate::tree::Tree;

#[derive(Debug, Default)]
pub struct Lrud {
    tree: Tree,
    current_focus: Option<NodeKey>,
    subscribers: Subscribers,
    config: EngineConfig,
}

impl Lrud {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: EngineConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn tree(&self) -> &Tree {
        &self.tree
    }

    pub fn root_node_id(&self) -> Option<&str> {
        self.tree.root_id()
    }

    /// Register a node. The first node registered becomes the root.
    pub fn register_node(&mut self, id: impl Into<String>, attrs: NodeAttrs) -> Result<&mut Self> {
        let id = id.into();
        self.tree.register(&id, &attrs)?;
        Ok(self)
    }

    pub fn register_spec(&mut self, spec: &NodeSpec) -> Result<&mut Self> {
        self.tree.register(&spec.id, &spec.attrs)?;
        Ok(self)
    }

    /// Remove a node and its subtree. Unknown ids are ignored.
    ///
    /// When the node held its parent's active slot, focus is moved to whatever
    /// the parent now digs down to, even if the removed node was not focused.
    pub fn unregister_node(&mut self, id: &str) -> &mut Self {
        let Some(key) = self.tree.key(id) else {
            log::debug!("Lrud::unregister_node: '{}' is not registered", id);
            return self;
        };
        let Some(snapshot) = self.tree.snapshot(key) else {
            return self;
        };
        let focus_was_inside = self
            .current_focus
            .is_some_and(|focus| self.tree.is_within(focus, key));

        let removal = self.tree.remove_subtree(key);
        if focus_was_inside {
            self.current_focus = None;
        }
        log::info!(
            "Lrud::unregister_node: removed '{}' ({} nodes)",
            id,
            removal.as_ref().map_or(0, |r| r.removed)
        );

        if let Some(removal) = removal {
            if let (Some(parent), true) = (removal.parent, removal.held_active_slot) {
                self.retarget_focus(parent);
            }
        }

        self.subscribers.emit(&FocusEvent::Blurred(snapshot));
        self
    }

    fn retarget_focus(&mut self, parent: NodeKey) {
        match navigation::dig_down(&mut self.tree, parent, self.config.sibling_order) {
            Ok(target) => {
                if let Err(e) = self.commit_focus(target) {
                    log::warn!("Lrud::retarget_focus: could not focus replacement: {}", e);
                }
            }
            Err(e) => log::warn!("Lrud::retarget_focus: no replacement focus: {}", e),
        }
    }

    /// Remove a node and hand back what it looked like
    pub fn pick_node(&mut self, id: &str) -> Option<NodeSnapshot> {
        let node = self.get_node(id)?;
        self.unregister_node(id);
        Some(node)
    }

    pub fn get_node(&self, id: &str) -> Option<NodeSnapshot> {
        self.tree.key(id).and_then(|key| self.tree.snapshot(key))
    }

    pub fn get_node_by_path(&self, path: &str) -> Option<NodeSnapshot> {
        self.tree
            .key_by_path(path)
            .and_then(|key| self.tree.snapshot(key))
    }

    pub fn get_path_for_node_id(&self, id: &str) -> Option<String> {
        self.tree.path_for_node_id(id)
    }

    /// The whole hierarchy, starting at the root
    pub fn get_tree(&self) -> Option<NodeSnapshot> {
        self.tree.root().and_then(|root| self.tree.snapshot(root))
    }

    pub fn get_node_path_list(&self) -> Vec<String> {
        self.tree.path_list()
    }

    pub fn current_focus(&self) -> Option<&str> {
        self.current_focus.and_then(|key| self.tree.id_of(key))
    }

    /// Focus a node and make every ancestor remember the path to it
    pub fn assign_focus(&mut self, id: &str) -> Result<()> {
        let key = self
            .tree
            .key(id)
            .ok_or_else(|| LrudError::UnknownNode(id.to_string()))?;
        self.commit_focus(key)
    }

    fn commit_focus(&mut self, key: NodeKey) -> Result<()> {
        let node = self
            .tree
            .get(key)
            .ok_or_else(|| LrudError::Generic("focus target vanished".to_string()))?;
        if node.role() == Role::Container {
            return Err(LrudError::NotFocusable(node.id().to_string()));
        }

        self.current_focus = Some(key);
        self.tree.set_active_path(key);

        if let Some(snapshot) = self.tree.snapshot(key) {
            log::info!("Lrud::assign_focus: focus on '{}'", snapshot.id);
            self.subscribers.emit(&FocusEvent::Focused(snapshot));
        }
        Ok(())
    }

    /// Move focus in `direction` and return the focused node afterwards.
    ///
    /// With nothing focused, or when no ancestor can act on the direction, this
    /// changes nothing and returns the current focus (which may be `None`).
    pub fn handle_key_event(&mut self, direction: Direction) -> Result<Option<NodeSnapshot>> {
        let Some(current) = self.current_focus else {
            log::debug!("Lrud::handle_key_event: nothing focused, ignoring {}", direction);
            return Ok(None);
        };

        let Some(actionable) = navigation::climb_up(&self.tree, current, direction) else {
            return Ok(self.tree.snapshot(current));
        };
        let Some(next) = navigation::select_sibling(&self.tree, actionable, direction, &self.config)
        else {
            return Ok(self.tree.snapshot(current));
        };

        let target = navigation::dig_down(&mut self.tree, next, self.config.sibling_order)?;
        self.commit_focus(target)?;
        Ok(self.tree.snapshot(target))
    }

    /// Nearest ancestor (inclusive) of `id` that can act on `direction`
    pub fn climb_up(&self, id: &str, direction: Direction) -> Option<String> {
        let key = self.tree.key(id)?;
        navigation::climb_up(&self.tree, key, direction)
            .and_then(|found| self.tree.id_of(found))
            .map(str::to_string)
    }

    pub fn get_next_child(&self, id: &str) -> Option<String> {
        let key = self.tree.key(id)?;
        navigation::get_next_child(&self.tree, key, self.config.sibling_order)
            .and_then(|found| self.tree.id_of(found))
            .map(str::to_string)
    }

    pub fn get_node_first_child(&self, id: &str) -> Option<NodeSnapshot> {
        let key = self.tree.key(id)?;
        self.tree
            .first_child(key)
            .and_then(|child| self.tree.snapshot(child))
    }

    /// Resolve `id` down to a focusable node, initialising missing active children
    pub fn dig_down(&mut self, id: &str) -> Result<String> {
        let key = self
            .tree
            .key(id)
            .ok_or_else(|| LrudError::UnknownNode(id.to_string()))?;
        let found = navigation::dig_down(&mut self.tree, key, self.config.sibling_order)?;
        Ok(self.tree.id_of(found).unwrap_or_default().to_string())
    }

    pub fn is_focusable(&self, id: &str) -> bool {
        self.tree
            .key(id)
            .and_then(|key| self.tree.get(key))
            .is_some_and(|node| node.is_focusable())
    }

    pub fn on<F>(&mut self, kind: EventKind, listener: F) -> SubscriptionId
    where
        F: FnMut(&FocusEvent) -> ListenerResult + 'static,
    {
        self.subscribers.subscribe(kind, listener)
    }

    pub fn off(&mut self, id: SubscriptionId) -> bool {
        self.subscribers.unsubscribe(id)
    }
}
