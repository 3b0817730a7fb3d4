//! Linear undo/redo history over node-array snapshots.
//!
//! Every structural edit commits a deep copy of the resulting node array.
//! `undo`/`redo` move a cursor through the snapshots; committing after an
//! undo discards everything beyond the cursor.

use swatch_core::model::GraphNode;

/// Snapshot sequence plus a cursor into it.
#[derive(Debug, Clone)]
pub struct History {
    snapshots: Vec<Vec<GraphNode>>,
    /// `None` until the first push.
    index: Option<usize>,
    /// Maximum number of retained snapshots.
    max_depth: usize,
}

impl Default for History {
    fn default() -> Self {
        Self::new(100)
    }
}

impl History {
    pub fn new(max_depth: usize) -> Self {
        Self {
            snapshots: Vec::new(),
            index: None,
            max_depth: max_depth.max(1),
        }
    }

    /// Truncate any redo states, append `nodes` and move the cursor onto it.
    pub fn push(&mut self, nodes: Vec<GraphNode>) {
        if let Some(i) = self.index {
            self.snapshots.truncate(i + 1);
        } else {
            self.snapshots.clear();
        }
        self.snapshots.push(nodes);
        if self.snapshots.len() > self.max_depth {
            self.snapshots.remove(0);
        }
        self.index = Some(self.snapshots.len() - 1);
    }

    /// Step back one snapshot. `None` at the oldest snapshot.
    pub fn undo(&mut self) -> Option<&[GraphNode]> {
        let i = self.index.filter(|&i| i > 0)? - 1;
        self.index = Some(i);
        Some(&self.snapshots[i])
    }

    /// Step forward one snapshot. `None` at the newest snapshot.
    pub fn redo(&mut self) -> Option<&[GraphNode]> {
        let i = self.index? + 1;
        if i >= self.snapshots.len() {
            return None;
        }
        self.index = Some(i);
        Some(&self.snapshots[i])
    }

    /// The snapshot under the cursor.
    pub fn current(&self) -> Option<&[GraphNode]> {
        self.index.map(|i| self.snapshots[i].as_slice())
    }

    pub fn can_undo(&self) -> bool {
        self.index.is_some_and(|i| i > 0)
    }

    pub fn can_redo(&self) -> bool {
        self.index.is_some_and(|i| i + 1 < self.snapshots.len())
    }

    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    pub fn index(&self) -> Option<usize> {
        self.index
    }
}
