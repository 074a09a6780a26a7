//! Directional (up/down/left/right) focus navigation over a tree of nested
//! rows and columns.
//!
//! ```
//! use lrud::{Direction, Lrud, NodeAttrs};
//!
//! let mut nav = Lrud::new();
//! nav.register_node("root", NodeAttrs::new().horizontal().wrapping())?
//!     .register_node("NODE_1", NodeAttrs::new().focusable())?
//!     .register_node("NODE_2", NodeAttrs::new().focusable())?;
//!
//! nav.assign_focus("NODE_2")?;
//! let focused = nav.handle_key_event(Direction::Right)?;
//! assert_eq!(focused.map(|n| n.id).as_deref(), Some("NODE_1"));
//! # Ok::<(), lrud::LrudError>(())
//! ```

pub mod cli;
pub mod command;
pub mod config;
pub mod direction;
pub mod dump;
pub mod engine;
pub mod error;
pub mod event;
pub mod executor;
pub mod layout;
pub mod main_lib;
pub mod navigation;
pub mod node;
pub mod test_runner;
pub mod tree;

pub use config::{EngineConfig, SiblingOrder};
pub use direction::Direction;
pub use engine::Lrud;
pub use error::{LrudError, Result};
pub use event::{EventKind, FocusEvent};
pub use layout::Layout;
pub use node::{NodeAttrs, NodeSnapshot, NodeSpec, Orientation};
