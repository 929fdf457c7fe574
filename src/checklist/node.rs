//! Checklist node schema
//!
//! A node is either a leaf `item` or a `folder` carrying an ordered child
//! list. The child list exists if and only if the node is a folder; the
//! tagged enum makes the invariant impossible to violate in memory, and the
//! serialized form carries a `children` key only on folders.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Node kind with the folder's child list attached to the variant
///
/// Internally tagged so the wire form is `{"kind": "item"}` or
/// `{"kind": "folder", "children": [...]}`.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum NodeKind {
    Item,
    Folder {
        #[serde(default)]
        children: Vec<ChecklistNode>,
    },
}

/// A single checklist entry
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct ChecklistNode {
    /// Unique node id (uuid), generated at creation and never client-supplied
    pub id: String,
    /// Display title
    pub title: String,
    #[serde(flatten)]
    pub kind: NodeKind,
}

impl ChecklistNode {
    /// Construct a fresh node with a generated id
    ///
    /// Kind strings other than exactly `"folder"` coerce to an item; a new
    /// folder starts with an empty child list.
    pub fn new(title: impl Into<String>, kind: &str) -> Self {
        let kind = match KindTag::parse(kind) {
            Some(KindTag::Folder) => NodeKind::Folder {
                children: Vec::new(),
            },
            _ => NodeKind::Item,
        };
        Self {
            id: Uuid::new_v4().to_string(),
            title: title.into(),
            kind,
        }
    }

    pub fn is_folder(&self) -> bool {
        matches!(self.kind, NodeKind::Folder { .. })
    }

    pub fn children(&self) -> Option<&[ChecklistNode]> {
        match &self.kind {
            NodeKind::Folder { children } => Some(children),
            NodeKind::Item => None,
        }
    }

    pub fn children_mut(&mut self) -> Option<&mut Vec<ChecklistNode>> {
        match &mut self.kind {
            NodeKind::Folder { children } => Some(children),
            NodeKind::Item => None,
        }
    }

    /// Item → folder transition, returning the (possibly fresh) child list
    ///
    /// Already-folder nodes keep their children untouched.
    pub fn promote_to_folder(&mut self) -> &mut Vec<ChecklistNode> {
        if !self.is_folder() {
            self.kind = NodeKind::Folder {
                children: Vec::new(),
            };
        }
        match &mut self.kind {
            NodeKind::Folder { children } => children,
            NodeKind::Item => unreachable!("node was just promoted"),
        }
    }

    /// Folder → item transition
    ///
    /// Drops the child list entirely, discarding any children. Demoting an
    /// item is a no-op.
    pub fn demote_to_item(&mut self) {
        self.kind = NodeKind::Item;
    }

    /// Apply a requested kind change; repeating the current kind leaves the
    /// structure untouched
    pub fn apply_kind(&mut self, kind: KindTag) {
        match kind {
            KindTag::Folder => {
                self.promote_to_folder();
            }
            KindTag::Item => self.demote_to_item(),
        }
    }

    pub fn kind_str(&self) -> &'static str {
        match self.kind {
            NodeKind::Item => "item",
            NodeKind::Folder { .. } => "folder",
        }
    }
}

/// Parsed `kind` value from a request
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum KindTag {
    Item,
    Folder,
}

impl KindTag {
    /// Strict parse: `None` for anything but the two valid kinds
    ///
    /// Node creation coerces unknown kinds to `item`; updates ignore them.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "item" => Some(KindTag::Item),
            "folder" => Some(KindTag::Folder),
            _ => None,
        }
    }
}
