//! Snapshot-based undo/redo history.

use crate::model::{EditorObject, MenuDesign};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

/// A copy of the design contents captured for undo/redo.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DesignSnapshot {
    /// All objects, in insertion order.
    pub objects: Vec<EditorObject>,
    /// The design background.
    pub background: EditorObject,
}

impl DesignSnapshot {
    pub fn capture(design: &MenuDesign) -> Self {
        Self {
            objects: design.objects.clone(),
            background: design.background.clone(),
        }
    }

    /// Restore the snapshot into `design`, leaving id, name and canvas alone.
    pub fn restore(self, design: &mut MenuDesign) {
        design.objects = self.objects;
        design.background = self.background;
    }
}

/// Linear undo/redo over whole-design snapshots.
///
/// `past` holds states in the order they were left; `future` holds undone
/// states with the most recently undone one at the front.
#[derive(Debug, Clone, Default)]
pub struct History {
    past: Vec<DesignSnapshot>,
    future: VecDeque<DesignSnapshot>,
    limit: Option<usize>,
}

impl History {
    /// History with unlimited depth.
    pub fn new() -> Self {
        Self::default()
    }

    /// History keeping at most `limit` undo steps.
    pub fn with_limit(limit: Option<usize>) -> Self {
        Self {
            limit,
            ..Self::default()
        }
    }

    /// Record the pre-mutation state. Discards any redo branch.
    pub fn record(&mut self, snapshot: DesignSnapshot) {
        self.past.push(snapshot);
        self.future.clear();

        if let Some(limit) = self.limit {
            if self.past.len() > limit {
                let excess = self.past.len() - limit;
                self.past.drain(..excess);
            }
        }
    }

    /// Step back. Returns the snapshot to restore, or `None` at the boundary.
    pub fn undo(&mut self, current: DesignSnapshot) -> Option<DesignSnapshot> {
        let previous = self.past.pop()?;
        self.future.push_front(current);
        Some(previous)
    }

    /// Step forward. Returns the snapshot to restore, or `None` at the boundary.
    pub fn redo(&mut self, current: DesignSnapshot) -> Option<DesignSnapshot> {
        let next = self.future.pop_front()?;
        self.past.push(current);
        Some(next)
    }

    pub fn can_undo(&self) -> bool {
        !self.past.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.future.is_empty()
    }

    pub fn past_len(&self) -> usize {
        self.past.len()
    }

    pub fn future_len(&self) -> usize {
        self.future.len()
    }

    pub fn clear(&mut self) {
        self.past.clear();
        self.future.clear();
    }
}
