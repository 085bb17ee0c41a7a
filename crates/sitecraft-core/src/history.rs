//! Undo/redo history of element mutations.
//!
//! Actions are recorded by the editor session after it mutates the
//! [`ElementStore`]. Undo and redo replay actions straight against the store,
//! so replaying never records anything and cannot disturb the redo stack.

use crate::clock::now_millis;
use crate::element::{Bounds, Element, ElementId, ElementKind, ElementUpdate};
use crate::store::ElementStore;
use serde::{Deserialize, Serialize};

/// Default number of actions kept in the undo stack.
pub const DEFAULT_HISTORY_LIMIT: usize = 100;

/// Kind of a recorded action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ActionKind {
    #[serde(rename = "ADD_ELEMENT")]
    Add,
    #[serde(rename = "UPDATE_ELEMENT")]
    Update,
    #[serde(rename = "REMOVE_ELEMENT")]
    Remove,
    #[serde(rename = "MOVE_ELEMENT")]
    Move,
    #[serde(rename = "RESIZE_ELEMENT")]
    Resize,
}

/// What an action changed, with enough data to invert it exactly.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all_fields = "camelCase")]
pub enum ActionPayload {
    /// `index` is the paint-order slot the element was inserted at.
    #[serde(rename = "ADD_ELEMENT")]
    Add { element: Element, index: usize },
    /// `index` is the slot the element was removed from.
    #[serde(rename = "REMOVE_ELEMENT")]
    Remove { element: Element, index: usize },
    #[serde(rename = "UPDATE_ELEMENT")]
    Update {
        element_id: ElementId,
        old_values: Box<Element>,
        new_values: ElementUpdate,
    },
    #[serde(rename = "MOVE_ELEMENT")]
    Move {
        element_id: ElementId,
        old_values: Bounds,
        new_values: Bounds,
    },
    #[serde(rename = "RESIZE_ELEMENT")]
    Resize {
        element_id: ElementId,
        old_values: Bounds,
        new_values: Bounds,
    },
}

impl ActionPayload {
    pub fn kind(&self) -> ActionKind {
        match self {
            ActionPayload::Add { .. } => ActionKind::Add,
            ActionPayload::Remove { .. } => ActionKind::Remove,
            ActionPayload::Update { .. } => ActionKind::Update,
            ActionPayload::Move { .. } => ActionKind::Move,
            ActionPayload::Resize { .. } => ActionKind::Resize,
        }
    }

    pub fn element_id(&self) -> ElementId {
        match self {
            ActionPayload::Add { element, .. } | ActionPayload::Remove { element, .. } => element.id,
            ActionPayload::Update { element_id, .. }
            | ActionPayload::Move { element_id, .. }
            | ActionPayload::Resize { element_id, .. } => *element_id,
        }
    }
}

/// One recorded mutation. Immutable once built.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Action {
    #[serde(flatten)]
    payload: ActionPayload,
    /// Milliseconds since the Unix epoch.
    timestamp: u64,
    description: String,
}

impl Action {
    fn new(payload: ActionPayload, kind: ElementKind) -> Self {
        let verb = match payload.kind() {
            ActionKind::Add => "Added",
            ActionKind::Remove => "Removed",
            ActionKind::Update | ActionKind::Move | ActionKind::Resize => "Modified",
        };
        Self {
            payload,
            timestamp: now_millis(),
            description: format!("{verb} {kind} element"),
        }
    }

    /// An element was inserted at `index`.
    pub fn add(element: Element, index: usize) -> Self {
        let kind = element.kind();
        Self::new(ActionPayload::Add { element, index }, kind)
    }

    /// An element was removed from `index`.
    pub fn remove(element: Element, index: usize) -> Self {
        let kind = element.kind();
        Self::new(ActionPayload::Remove { element, index }, kind)
    }

    /// A generic update; `old` is the full element before the change.
    pub fn update(old: Element, new_values: ElementUpdate) -> Self {
        let kind = old.kind();
        Self::new(
            ActionPayload::Update {
                element_id: old.id,
                old_values: Box::new(old),
                new_values,
            },
            kind,
        )
    }

    /// A box change: RESIZE when width or height changed, MOVE otherwise.
    pub fn reposition(element_id: ElementId, kind: ElementKind, old: Bounds, new: Bounds) -> Self {
        let payload = if new.size_differs(&old) {
            ActionPayload::Resize {
                element_id,
                old_values: old,
                new_values: new,
            }
        } else {
            ActionPayload::Move {
                element_id,
                old_values: old,
                new_values: new,
            }
        };
        Self::new(payload, kind)
    }

    /// Override the timestamp (milliseconds since the Unix epoch).
    pub fn with_timestamp(mut self, timestamp: u64) -> Self {
        self.timestamp = timestamp;
        self
    }

    pub fn kind(&self) -> ActionKind {
        self.payload.kind()
    }

    pub fn payload(&self) -> &ActionPayload {
        &self.payload
    }

    pub fn element_id(&self) -> ElementId {
        self.payload.element_id()
    }

    pub fn timestamp(&self) -> u64 {
        self.timestamp
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    /// Apply the inverse of this action to the store.
    fn revert(&self, store: &mut ElementStore) -> bool {
        match &self.payload {
            ActionPayload::Add { element, .. } => store.remove(element.id).is_some(),
            ActionPayload::Remove { element, index } => store.insert_at(*index, element.clone()),
            ActionPayload::Update { old_values, .. } => store.replace(old_values.as_ref().clone()).is_some(),
            ActionPayload::Move { element_id, old_values, .. }
            | ActionPayload::Resize { element_id, old_values, .. } => {
                store.set_bounds(*element_id, *old_values).is_some()
            }
        }
    }

    /// Apply this action's forward effect to the store.
    fn apply(&self, store: &mut ElementStore) -> bool {
        match &self.payload {
            ActionPayload::Add { element, index } => store.insert_at(*index, element.clone()),
            ActionPayload::Remove { element, .. } => store.remove(element.id).is_some(),
            ActionPayload::Update { element_id, new_values, .. } => {
                store.apply_update(*element_id, new_values).is_some()
            }
            ActionPayload::Move { element_id, new_values, .. }
            | ActionPayload::Resize { element_id, new_values, .. } => {
                store.set_bounds(*element_id, *new_values).is_some()
            }
        }
    }
}

/// Past/future action stacks.
#[derive(Debug, Clone)]
pub struct History {
    /// Applied actions, oldest first.
    past: Vec<Action>,
    /// Undone actions; the last entry is the next to redo.
    future: Vec<Action>,
    limit: usize,
}

impl Default for History {
    fn default() -> Self {
        Self::new()
    }
}

impl History {
    pub fn new() -> Self {
        Self {
            past: Vec::new(),
            future: Vec::new(),
            limit: DEFAULT_HISTORY_LIMIT,
        }
    }

    /// Bound the undo stack; the oldest actions are dropped first.
    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = limit.max(1);
        self
    }

    /// Record an applied action. Any redo branch is discarded.
    pub fn record(&mut self, action: Action) {
        if !self.future.is_empty() {
            log::debug!("Discarding {} redo action(s)", self.future.len());
            self.future.clear();
        }
        self.past.push(action);
        if self.past.len() > self.limit {
            let excess = self.past.len() - self.limit;
            self.past.drain(..excess);
        }
    }

    /// Undo the last action.
    /// Returns true if undo was performed, false if nothing to undo.
    pub fn undo(&mut self, store: &mut ElementStore) -> bool {
        let Some(action) = self.past.pop() else {
            return false;
        };
        if !action.revert(store) {
            log::debug!("Undo of {:?} on {} found a stale reference", action.kind(), action.element_id());
        }
        log::debug!("Undid: {}", action.description());
        self.future.push(action);
        true
    }

    /// Redo the last undone action.
    /// Returns true if redo was performed, false if nothing to redo.
    pub fn redo(&mut self, store: &mut ElementStore) -> bool {
        let Some(action) = self.future.pop() else {
            return false;
        };
        if !action.apply(store) {
            log::debug!("Redo of {:?} on {} found a stale reference", action.kind(), action.element_id());
        }
        log::debug!("Redid: {}", action.description());
        self.past.push(action);
        true
    }

    pub fn clear(&mut self) {
        self.past.clear();
        self.future.clear();
    }

    /// Applied actions, oldest first.
    pub fn past(&self) -> &[Action] {
        &self.past
    }

    /// Undone actions, next to redo first.
    pub fn future(&self) -> impl Iterator<Item = &Action> {
        self.future.iter().rev()
    }

    pub fn can_undo(&self) -> bool {
        !self.past.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.future.is_empty()
    }

    pub fn undo_len(&self) -> usize {
        self.past.len()
    }

    pub fn redo_len(&self) -> usize {
        self.future.len()
    }

    /// The action `undo` would revert.
    pub fn last_action(&self) -> Option<&Action> {
        self.past.last()
    }

    /// The action `redo` would reapply.
    pub fn next_redo(&self) -> Option<&Action> {
        self.future.last()
    }
}
