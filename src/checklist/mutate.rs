//! Structural operations on a checklist tree
//!
//! Each operation takes the full in-memory root list, applies one change,
//! and returns the affected node. All validation happens during path
//! resolution, before anything is touched, so a failed call leaves the
//! tree exactly as it was.

use crate::checklist::node::{ChecklistNode, KindTag};
use crate::checklist::resolve::{locate_mut, Located};
use crate::types::{HomesteadError, Result};

/// Field changes for a node update; absent fields are left alone
#[derive(Clone, Debug, Default)]
pub struct NodeChanges {
    pub title: Option<String>,
    pub kind: Option<KindTag>,
}

/// Append `node` under the parent addressed by `parent_path`
///
/// The empty path appends to the root list. Otherwise the path addresses
/// the intended parent itself; an `item` parent is promoted to a folder
/// before the child is attached. Returns the created node.
pub fn insert(
    root: &mut Vec<ChecklistNode>,
    parent_path: &[i64],
    node: ChecklistNode,
) -> Result<ChecklistNode> {
    let created = node.clone();
    match locate_mut(root, parent_path)? {
        Located::Root(list) => list.push(node),
        Located::At { list, index } => list[index].promote_to_folder().push(node),
    }
    Ok(created)
}

/// Apply field changes to the node at `path`
///
/// The path must address a node (`InvalidPath` when empty). A kind change
/// runs the promote/demote transition; repeating the current kind is a
/// structural no-op. Returns the updated node.
pub fn update(
    root: &mut Vec<ChecklistNode>,
    path: &[i64],
    changes: NodeChanges,
) -> Result<ChecklistNode> {
    match locate_mut(root, path)? {
        Located::Root(_) => Err(path_required()),
        Located::At { list, index } => {
            let node = &mut list[index];
            if let Some(title) = changes.title {
                node.title = title;
            }
            if let Some(kind) = changes.kind {
                node.apply_kind(kind);
            }
            Ok(node.clone())
        }
    }
}

/// Remove and return the node at `path`, discarding its whole subtree
///
/// The path must address a node (`InvalidPath` when empty).
pub fn delete(root: &mut Vec<ChecklistNode>, path: &[i64]) -> Result<ChecklistNode> {
    match locate_mut(root, path)? {
        Located::Root(_) => Err(path_required()),
        Located::At { list, index } => Ok(list.remove(index)),
    }
}

fn path_required() -> HomesteadError {
    HomesteadError::InvalidPath("a node path is required".to_string())
}
