//! Checklist tree model and operations
//!
//! Every property owns a variable-depth tree of checklist nodes, embedded
//! whole in the property document. Nodes are addressed by positional path
//! (a sequence of sibling indices); paths are ephemeral locators that stop
//! being valid after any structural mutation of an ancestor list.

pub mod mutate;
pub mod node;
pub mod path;
pub mod resolve;

pub use mutate::NodeChanges;
pub use node::{ChecklistNode, KindTag, NodeKind};
pub use path::NodePath;
pub use resolve::{locate_mut, Located};
