//! Raw element storage.
//!
//! Every mutation here is unrecorded. History replays through this layer,
//! while editor code goes through [`crate::session::EditorSession`], which
//! records an [`crate::history::Action`] for each change.

use crate::element::{Bounds, Element, ElementId, ElementUpdate, MIN_ELEMENT_SIZE};
use crate::project::PageId;

/// Ordered collection of every element of every page.
///
/// Insertion order is paint order: later elements render above earlier ones.
#[derive(Debug, Clone)]
pub struct ElementStore {
    elements: Vec<Element>,
    min_size: f64,
}

impl Default for ElementStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ElementStore {
    pub fn new() -> Self {
        Self {
            elements: Vec::new(),
            min_size: MIN_ELEMENT_SIZE,
        }
    }

    /// Build a store from existing elements, keeping the first of any
    /// duplicate ids.
    pub fn from_elements(elements: impl IntoIterator<Item = Element>) -> Self {
        let mut store = Self::new();
        for element in elements {
            store.push(element);
        }
        store
    }

    /// Set the minimum width/height enforced on every write.
    pub fn with_min_size(mut self, min_size: f64) -> Self {
        self.min_size = min_size;
        self
    }

    pub fn min_size(&self) -> f64 {
        self.min_size
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    pub fn elements(&self) -> &[Element] {
        &self.elements
    }

    pub fn iter(&self) -> impl Iterator<Item = &Element> {
        self.elements.iter()
    }

    pub fn get(&self, id: ElementId) -> Option<&Element> {
        self.elements.iter().find(|el| el.id == id)
    }

    pub fn contains(&self, id: ElementId) -> bool {
        self.index_of(id).is_some()
    }

    pub fn index_of(&self, id: ElementId) -> Option<usize> {
        self.elements.iter().position(|el| el.id == id)
    }

    /// Elements of one page, in paint order.
    pub fn page_elements(&self, page_id: PageId) -> impl Iterator<Item = &Element> {
        self.elements.iter().filter(move |el| el.page_id == page_id)
    }

    /// Insert at `index` (clamped to the end). Returns false if the id is
    /// already present.
    pub fn insert_at(&mut self, index: usize, mut element: Element) -> bool {
        if self.contains(element.id) {
            log::debug!("Element {} already stored, insert ignored", element.id);
            return false;
        }
        element.position = element.position.with_min_size(self.min_size);
        let index = index.min(self.elements.len());
        self.elements.insert(index, element);
        true
    }

    /// Append on top of the paint order.
    pub fn push(&mut self, element: Element) -> bool {
        self.insert_at(self.elements.len(), element)
    }

    /// Remove an element, returning it together with its former index.
    pub fn remove(&mut self, id: ElementId) -> Option<(usize, Element)> {
        let index = self.index_of(id)?;
        Some((index, self.elements.remove(index)))
    }

    /// Merge a partial update. Returns the element as it was before.
    pub fn apply_update(&mut self, id: ElementId, update: &ElementUpdate) -> Option<Element> {
        let min_size = self.min_size;
        let element = self.elements.iter_mut().find(|el| el.id == id)?;
        let previous = element.clone();
        element.apply_update(update, min_size);
        Some(previous)
    }

    /// Swap in a full element with the same id. Returns the replaced one.
    pub fn replace(&mut self, mut element: Element) -> Option<Element> {
        element.position = element.position.with_min_size(self.min_size);
        let slot = self.elements.iter_mut().find(|el| el.id == element.id)?;
        Some(std::mem::replace(slot, element))
    }

    /// Overwrite an element's box. Returns the previous box.
    pub fn set_bounds(&mut self, id: ElementId, bounds: Bounds) -> Option<Bounds> {
        let min_size = self.min_size;
        let element = self.elements.iter_mut().find(|el| el.id == id)?;
        let previous = element.position;
        element.position = bounds.with_min_size(min_size);
        Some(previous)
    }

    pub fn into_elements(self) -> Vec<Element> {
        self.elements
    }
}
