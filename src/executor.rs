use crate::{command::Command, engine::Lrud, error::Result};

/// Result of executing a command
#[derive(Debug, Clone, PartialEq)]
pub struct ExecutionResult {
    pub focused: Option<String>,
    pub status_message: Option<String>,
}

/// Executes commands against a navigation engine
pub struct Executor;

impl Executor {
    /// Apply a command and report where focus ended up.
    ///
    /// Caller errors (focusing a container, an empty subtree) abort the
    /// command and are returned as-is.
    pub fn execute(engine: &mut Lrud, command: &Command) -> Result<ExecutionResult> {
        let mut status_message = None;

        match command {
            Command::Move(direction) => {
                let before = engine.current_focus().map(str::to_string);
                let after = engine.handle_key_event(*direction)?.map(|node| node.id);
                status_message = Some(match (&before, &after) {
                    (_, None) => format!("Nothing focused, {} ignored", direction),
                    (Some(b), Some(a)) if b == a => format!("Focus stays on {}", a),
                    (_, Some(a)) => format!("Moved {} to {}", direction, a),
                });
            }

            Command::Focus(id) => {
                engine.assign_focus(id)?;
                status_message = Some(format!("Focused {}", id));
            }

            Command::Unregister(id) => {
                if engine.get_node(id).is_some() {
                    engine.unregister_node(id);
                    status_message = Some(format!("Unregistered {}", id));
                } else {
                    status_message = Some(format!("{} is not registered", id));
                }
            }

            Command::Pick(id) => {
                status_message = Some(match engine.pick_node(id) {
                    Some(node) => format!("Picked {} ({} children)", node.id, node.children.len()),
                    None => format!("{} is not registered", id),
                });
            }

            Command::Sequence(commands) => {
                for cmd in commands {
                    let result = Self::execute(engine, cmd)?;
                    if result.status_message.is_some() {
                        status_message = result.status_message;
                    }
                }
            }
        }

        Ok(ExecutionResult {
            focused: engine.current_focus().map(str::to_string),
            status_message,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::direction::Direction;
    use crate::node::NodeAttrs;

    fn engine() -> Lrud {
        let mut nav = Lrud::new();
        nav.register_node("root", NodeAttrs::new().horizontal()).unwrap();
        nav.register_node("NODE_1", NodeAttrs::new().focusable()).unwrap();
        nav.register_node("NODE_2", NodeAttrs::new().focusable()).unwrap();
        nav
    }

    #[test]
    fn test_execute_focus_and_move() {
        let mut nav = engine();
        let result = Executor::execute(&mut nav, &Command::Focus("NODE_1".to_string())).unwrap();
        assert_eq!(result.focused.as_deref(), Some("NODE_1"));

        let result = Executor::execute(&mut nav, &Command::Move(Direction::Right)).unwrap();
        assert_eq!(result.focused.as_deref(), Some("NODE_2"));
        assert_eq!(result.status_message.as_deref(), Some("Moved right to NODE_2"));

        let result = Executor::execute(&mut nav, &Command::Move(Direction::Right)).unwrap();
        assert_eq!(result.status_message.as_deref(), Some("Focus stays on NODE_2"));
    }

    #[test]
    fn test_execute_sequence() {
        let mut nav = engine();
        let command = Command::from_string("sequence:[focus:NODE_2,unregister:NODE_2]").unwrap();
        let result = Executor::execute(&mut nav, &command).unwrap();
        assert_eq!(result.focused.as_deref(), Some("NODE_1"));
        assert_eq!(result.status_message.as_deref(), Some("Unregistered NODE_2"));
    }

    #[test]
    fn test_execute_reports_caller_errors() {
        let mut nav = engine();
        assert!(Executor::execute(&mut nav, &Command::Focus("root".to_string())).is_err());

        let result = Executor::execute(&mut nav, &Command::Pick("ghost".to_string())).unwrap();
        assert_eq!(result.status_message.as_deref(), Some("ghost is not registered"));
    }
}
