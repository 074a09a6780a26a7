use crate::direction::Direction;
use serde::{Deserialize, Serialize};

/// Operations that can be applied to a navigation engine from text
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Command {
    Move(Direction),
    Focus(String),
    Unregister(String),
    Pick(String),

    // Multi-step commands for testing
    Sequence(Vec<Command>),
}

impl Command {
    /// Parse a command from a string representation
    pub fn from_string(s: &str) -> Result<Self, String> {
        let s = s.trim();
        if let Ok(direction) = s.parse::<Direction>() {
            return Ok(Command::Move(direction));
        }

        if let Some((name, arg)) = s.split_once(':') {
            let arg = arg.trim();
            match name.to_lowercase().as_str() {
                "focus" | "unregister" | "pick" if arg.is_empty() => {
                    return Err(format!("Command '{}' needs a node id", name));
                }
                "focus" => return Ok(Command::Focus(arg.to_string())),
                "unregister" => return Ok(Command::Unregister(arg.to_string())),
                "pick" => return Ok(Command::Pick(arg.to_string())),
                "sequence" if arg.starts_with('[') && arg.ends_with(']') => {
                    let inner = &arg[1..arg.len() - 1];
                    if inner.trim().is_empty() {
                        return Ok(Command::Sequence(vec![]));
                    }

                    let mut commands = Vec::new();
                    for cmd_str in inner.split(',') {
                        let cmd_str = cmd_str.trim();
                        match Command::from_string(cmd_str) {
                            Ok(cmd) => commands.push(cmd),
                            Err(e) => {
                                return Err(format!(
                                    "Invalid command in sequence '{}': {}",
                                    cmd_str, e
                                ))
                            }
                        }
                    }
                    return Ok(Command::Sequence(commands));
                }
                _ => {}
            }
        }

        Err(format!("Unknown command: {}", s))
    }

    /// Convert command to string representation
    pub fn to_string(&self) -> String {
        match self {
            Command::Move(direction) => direction.to_string(),
            Command::Focus(id) => format!("focus:{}", id),
            Command::Unregister(id) => format!("unregister:{}", id),
            Command::Pick(id) => format!("pick:{}", id),
            Command::Sequence(commands) => {
                format!(
                    "sequence:[{}]",
                    commands
                        .iter()
                        .map(|c| c.to_string())
                        .collect::<Vec<_>>()
                        .join(",")
                )
            }
        }
    }
}
