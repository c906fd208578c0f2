//! Transaction history with undo and redo.
//!
//! [`History`] records every segment-offset change made while a transaction
//! is open. Committing turns the recorded changes into one undo step;
//! rolling back hands them back to the caller to revert.

use log::{debug, warn};

use crate::{geometry::Point, identifier::Id};

/// One recorded change of a label's segment offset.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OffsetChange {
    element: Id,
    old: Point,
    new: Point,
}

impl OffsetChange {
    pub fn new(element: Id, old: Point, new: Point) -> Self {
        Self { element, old, new }
    }

    /// The label whose offset changed
    pub fn element(&self) -> Id {
        self.element
    }

    /// Offset before the change
    pub fn old(&self) -> Point {
        self.old
    }

    /// Offset after the change
    pub fn new_value(&self) -> Point {
        self.new
    }
}

/// A committed transaction: one undo step.
#[derive(Debug, Clone, PartialEq)]
pub struct CommittedTransaction {
    name: String,
    result: String,
    changes: Vec<OffsetChange>,
}

impl CommittedTransaction {
    /// Name the transaction was opened with
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Result name it was committed under
    pub fn result(&self) -> &str {
        &self.result
    }

    /// Changes in the order they were made
    pub fn changes(&self) -> &[OffsetChange] {
        &self.changes
    }
}

#[derive(Debug, Clone)]
struct OpenTransaction {
    name: String,
    depth: usize,
    changes: Vec<OffsetChange>,
}

/// Undo/redo history of committed transactions.
#[derive(Debug, Clone, Default)]
pub struct History {
    open: Option<OpenTransaction>,
    done: Vec<CommittedTransaction>,
    undone: Vec<CommittedTransaction>,
}

impl History {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether a transaction is open
    pub fn is_in_transaction(&self) -> bool {
        self.open.is_some()
    }

    /// Name of the open transaction, if any
    pub fn open_transaction_name(&self) -> Option<&str> {
        self.open.as_ref().map(|open| open.name.as_str())
    }

    /// Committed transactions, oldest first
    pub fn committed(&self) -> &[CommittedTransaction] {
        &self.done
    }

    pub fn can_undo(&self) -> bool {
        self.open.is_none() && !self.done.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        self.open.is_none() && !self.undone.is_empty()
    }

    /// Opens a transaction. Opening while one is open nests into it.
    pub fn begin(&mut self, name: &str) {
        match &mut self.open {
            Some(open) => {
                open.depth += 1;
                debug!(name, outer = open.name, depth = open.depth; "Nested transaction");
            }
            None => {
                self.open = Some(OpenTransaction {
                    name: name.to_string(),
                    depth: 1,
                    changes: Vec::new(),
                });
            }
        }
    }

    /// Records a change if a transaction is open.
    ///
    /// Returns `false` when the change happened outside any transaction and
    /// therefore cannot be undone.
    pub fn record(&mut self, change: OffsetChange) -> bool {
        match &mut self.open {
            Some(open) => {
                open.changes.push(change);
                true
            }
            None => false,
        }
    }

    /// Closes the innermost level of the open transaction.
    ///
    /// Closing the outermost level creates an undo step, unless nothing
    /// changed, and clears the redo stack. Returns `true` when an undo step
    /// was added.
    pub fn commit(&mut self, result: &str) -> bool {
        let Some(open) = &mut self.open else {
            warn!(result; "Commit without an open transaction");
            return false;
        };
        open.depth -= 1;
        if open.depth > 0 {
            return false;
        }

        let Some(open) = self.open.take() else {
            return false;
        };
        if open.changes.is_empty() {
            debug!(name = open.name; "Committed empty transaction");
            return false;
        }

        self.undone.clear();
        self.done.push(CommittedTransaction {
            name: open.name,
            result: result.to_string(),
            changes: open.changes,
        });
        true
    }

    /// Discards the open transaction at every nesting level.
    ///
    /// Returns the discarded changes in the order they must be reverted
    /// (most recent first).
    pub fn rollback(&mut self) -> Vec<OffsetChange> {
        match self.open.take() {
            Some(open) => open.changes.into_iter().rev().collect(),
            None => {
                warn!("Rollback without an open transaction");
                Vec::new()
            }
        }
    }

    /// Moves the latest committed transaction to the redo stack.
    ///
    /// Returns the changes to revert, most recent first.
    pub fn undo(&mut self) -> Option<Vec<OffsetChange>> {
        if !self.can_undo() {
            return None;
        }
        let transaction = self.done.pop()?;
        let changes = transaction.changes.iter().rev().copied().collect();
        self.undone.push(transaction);
        Some(changes)
    }

    /// Moves the latest undone transaction back to the undo stack.
    ///
    /// Returns the changes to reapply, in their original order.
    pub fn redo(&mut self) -> Option<Vec<OffsetChange>> {
        if !self.can_redo() {
            return None;
        }
        let transaction = self.undone.pop()?;
        let changes = transaction.changes.clone();
        self.done.push(transaction);
        Some(changes)
    }
}
