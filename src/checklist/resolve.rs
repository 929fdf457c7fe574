//! Positional path resolution
//!
//! Translates a path of sibling indices into the list that contains the
//! addressed node plus the validated index within it. Resolution never
//! mutates the tree; every index is bounds-checked at its own depth before
//! any caller touches the located position.

use crate::checklist::node::ChecklistNode;
use crate::types::{HomesteadError, Result};

/// A located position within the tree
#[derive(Debug)]
pub enum Located<'t> {
    /// The empty path: the root sibling list itself
    Root(&'t mut Vec<ChecklistNode>),
    /// A node position: its containing sibling list and index
    At {
        list: &'t mut Vec<ChecklistNode>,
        index: usize,
    },
}

/// Walk `path` from the root list down to the addressed position
///
/// The walk descends through the first n−1 indices and bounds-checks the
/// final one against the list it lands in. An `item` encountered mid-walk
/// exposes an empty child list, so any index below it is out of range.
pub fn locate_mut<'t>(root: &'t mut Vec<ChecklistNode>, path: &[i64]) -> Result<Located<'t>> {
    let Some((&last, walk)) = path.split_last() else {
        return Ok(Located::Root(root));
    };

    let mut list = root;
    for (depth, &index) in walk.iter().enumerate() {
        let i = check_bounds(index, list.len())?;
        list = match list[i].children_mut() {
            Some(children) => children,
            None => {
                // item mid-path: the next index has no list to land in
                let next = walk.get(depth + 1).copied().unwrap_or(last);
                return Err(HomesteadError::OutOfRange {
                    index: next,
                    len: 0,
                });
            }
        };
    }

    let index = check_bounds(last, list.len())?;
    Ok(Located::At { list, index })
}

fn check_bounds(index: i64, len: usize) -> Result<usize> {
    if index < 0 || index as usize >= len {
        return Err(HomesteadError::OutOfRange { index, len });
    }
    Ok(index as usize)
}
