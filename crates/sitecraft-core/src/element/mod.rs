//! Placed page elements.

mod bounds;
mod content;

pub use bounds::{Bounds, BoundsPatch, MIN_ELEMENT_SIZE};
pub use content::{
    ElementContent, ElementKind, Feature, FeaturesContent, FieldKind, FormContent, FormField,
    GalleryContent, HeroContent, ImageContent, TestimonialContent, VideoContent,
};

use crate::project::PageId;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use uuid::Uuid;

/// Unique identifier for elements.
pub type ElementId = Uuid;

/// CSS-like style properties, keyed by camelCase property name.
pub type StyleMap = BTreeMap<String, String>;

/// Style changes: `Some` sets a property, `None` removes it.
pub type StylePatch = BTreeMap<String, Option<String>>;

/// A positioned, styled content unit on a page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Element {
    pub id: ElementId,
    #[serde(flatten)]
    pub content: ElementContent,
    #[serde(default)]
    pub style: StyleMap,
    pub page_id: PageId,
    pub position: Bounds,
}

impl Element {
    /// Create an element with a fresh id.
    pub fn new(page_id: PageId, content: ElementContent, style: StyleMap, position: Bounds) -> Self {
        Self {
            id: Uuid::new_v4(),
            content,
            style,
            page_id,
            position: position.with_min_size(MIN_ELEMENT_SIZE),
        }
    }

    pub fn kind(&self) -> ElementKind {
        self.content.kind()
    }

    /// Merge `update` into this element. Position and style are merged
    /// field by field; content is replaced.
    pub fn apply_update(&mut self, update: &ElementUpdate, min_size: f64) {
        if let Some(content) = &update.content {
            self.content = content.clone();
        }
        if let Some(patch) = &update.style {
            for (property, value) in patch {
                match value {
                    Some(value) => {
                        self.style.insert(property.clone(), value.clone());
                    }
                    None => {
                        self.style.remove(property);
                    }
                }
            }
        }
        if let Some(patch) = &update.position {
            self.position = patch.apply(self.position).with_min_size(min_size);
        }
    }
}

/// Input for adding an element; the store assigns the id.
#[derive(Debug, Clone, PartialEq)]
pub struct NewElement {
    pub content: ElementContent,
    pub style: StyleMap,
    pub page_id: PageId,
    pub position: Bounds,
}

impl NewElement {
    pub fn new(page_id: PageId, content: ElementContent, position: Bounds) -> Self {
        Self {
            content,
            style: StyleMap::new(),
            page_id,
            position,
        }
    }

    pub fn with_style(mut self, style: StyleMap) -> Self {
        self.style = style;
        self
    }

    /// Assign a fresh id.
    pub fn into_element(self) -> Element {
        Element::new(self.page_id, self.content, self.style, self.position)
    }
}

/// Partial update for an [`Element`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ElementUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<ElementContent>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub style: Option<StylePatch>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<BoundsPatch>,
}

impl ElementUpdate {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_content(mut self, content: ElementContent) -> Self {
        self.content = Some(content);
        self
    }

    pub fn with_position(mut self, patch: impl Into<BoundsPatch>) -> Self {
        self.position = Some(patch.into());
        self
    }

    /// Set one style property.
    pub fn set_style(mut self, property: impl Into<String>, value: impl Into<String>) -> Self {
        self.style
            .get_or_insert_with(StylePatch::new)
            .insert(property.into(), Some(value.into()));
        self
    }

    /// Remove one style property.
    pub fn remove_style(mut self, property: impl Into<String>) -> Self {
        self.style
            .get_or_insert_with(StylePatch::new)
            .insert(property.into(), None);
        self
    }

    /// Merge a whole style map (every entry is set).
    pub fn with_styles(mut self, styles: &StyleMap) -> Self {
        let patch = self.style.get_or_insert_with(StylePatch::new);
        for (property, value) in styles {
            patch.insert(property.clone(), Some(value.clone()));
        }
        self
    }

    pub fn is_empty(&self) -> bool {
        self.content.is_none()
            && self.style.as_ref().is_none_or(|s| s.is_empty())
            && self.position.is_none_or(|p| p.is_empty())
    }

    /// Whether the update carries a position and nothing else.
    pub fn is_position_only(&self) -> bool {
        self.position.is_some()
            && self.content.is_none()
            && self.style.as_ref().is_none_or(|s| s.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text_element() -> Element {
        let mut style = StyleMap::new();
        style.insert("color".into(), "#000000".into());
        style.insert("fontSize".into(), "16px".into());
        Element::new(
            Uuid::new_v4(),
            ElementContent::Text("Hello".into()),
            style,
            Bounds::new(50.0, 50.0, 300.0, 200.0),
        )
    }

    #[test]
    fn test_new_element_respects_min_size() {
        let el = Element::new(
            Uuid::new_v4(),
            ElementContent::Container,
            StyleMap::new(),
            Bounds::new(0.0, 0.0, 5.0, 5.0),
        );
        assert_eq!(el.position.width, MIN_ELEMENT_SIZE);
        assert_eq!(el.position.height, MIN_ELEMENT_SIZE);
    }

    #[test]
    fn test_style_patch_sets_and_removes() {
        let mut el = text_element();
        let update = ElementUpdate::new()
            .set_style("color", "#ff0000")
            .remove_style("fontSize")
            .set_style("padding", "8px");
        el.apply_update(&update, MIN_ELEMENT_SIZE);

        assert_eq!(el.style.get("color").map(String::as_str), Some("#ff0000"));
        assert_eq!(el.style.get("padding").map(String::as_str), Some("8px"));
        assert!(!el.style.contains_key("fontSize"));
    }

    #[test]
    fn test_position_is_shallow_merged() {
        let mut el = text_element();
        el.apply_update(
            &ElementUpdate::new().with_position(BoundsPatch::origin(10.0, 12.0)),
            MIN_ELEMENT_SIZE,
        );
        assert_eq!(el.position, Bounds::new(10.0, 12.0, 300.0, 200.0));

        el.apply_update(
            &ElementUpdate::new().with_position(BoundsPatch::size(1.0, 90.0)),
            MIN_ELEMENT_SIZE,
        );
        assert_eq!(el.position, Bounds::new(10.0, 12.0, MIN_ELEMENT_SIZE, 90.0));
    }

    #[test]
    fn test_update_classification_helpers() {
        assert!(ElementUpdate::new().is_empty());
        assert!(ElementUpdate::new().with_position(BoundsPatch::origin(1.0, 1.0)).is_position_only());
        let mixed = ElementUpdate::new()
            .with_position(BoundsPatch::origin(1.0, 1.0))
            .set_style("color", "red");
        assert!(!mixed.is_position_only());
    }

    #[test]
    fn test_element_json_shape() {
        let el = text_element();
        let value = serde_json::to_value(&el).unwrap();
        assert_eq!(value["type"], "texte");
        assert_eq!(value["content"], "Hello");
        assert!(value.get("pageId").is_some());
        assert_eq!(value["position"]["width"], 300.0);

        let back: Element = serde_json::from_value(value).unwrap();
        assert_eq!(back, el);
    }
}
