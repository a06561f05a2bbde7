use serde::{Deserialize, Serialize};

/// Identifier of a node in the host's UI tree.
///
/// Widgets own the id of their root node; hosts report pointer events as the
/// chain of node ids from the event target up to the document root.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeId(u32);

impl NodeId {
    pub fn new(n: u32) -> Self {
        NodeId(n)
    }

    pub fn get(self) -> u32 {
        self.0
    }
}

/// Hands out unique node ids, starting at 1 (0 is left for the document root).
#[derive(Debug)]
pub struct NodeIds {
    next: u32,
}

impl NodeIds {
    pub const DOCUMENT: NodeId = NodeId(0);

    pub fn new() -> Self {
        Self { next: 1 }
    }

    pub fn alloc(&mut self) -> NodeId {
        let id = NodeId(self.next);
        self.next += 1;
        id
    }
}

impl Default for NodeIds {
    fn default() -> Self {
        Self::new()
    }
}
