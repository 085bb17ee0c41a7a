//! Element palette: the templates new elements are created from.

use crate::element::{
    Bounds, ElementContent, ElementKind, Feature, FeaturesContent, FieldKind, FormContent, FormField,
    GalleryContent, HeroContent, ImageContent, NewElement, StyleMap, TestimonialContent, VideoContent,
};
use crate::project::PageId;
use kurbo::Point;

/// Where new elements are dropped on the canvas.
pub const DEFAULT_PLACEMENT: Point = Point::new(50.0, 50.0);

/// Palette section a template is listed under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TemplateCategory {
    Basic,
    Advanced,
    Sections,
}

impl TemplateCategory {
    pub const ALL: [TemplateCategory; 3] = [
        TemplateCategory::Basic,
        TemplateCategory::Advanced,
        TemplateCategory::Sections,
    ];

    pub fn label(self) -> &'static str {
        match self {
            TemplateCategory::Basic => "Basic elements",
            TemplateCategory::Advanced => "Advanced elements",
            TemplateCategory::Sections => "Sections",
        }
    }
}

/// A palette entry.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ElementTemplate {
    pub kind: ElementKind,
    pub label: &'static str,
    pub category: TemplateCategory,
}

impl ElementTemplate {
    const fn new(kind: ElementKind, label: &'static str, category: TemplateCategory) -> Self {
        Self { kind, label, category }
    }
}

/// Every template, in palette order.
pub const TEMPLATES: [ElementTemplate; 10] = [
    ElementTemplate::new(ElementKind::Text, "Text", TemplateCategory::Basic),
    ElementTemplate::new(ElementKind::Image, "Image", TemplateCategory::Basic),
    ElementTemplate::new(ElementKind::Button, "Button", TemplateCategory::Basic),
    ElementTemplate::new(ElementKind::Container, "Container", TemplateCategory::Basic),
    ElementTemplate::new(ElementKind::Form, "Form", TemplateCategory::Basic),
    ElementTemplate::new(ElementKind::Video, "Video", TemplateCategory::Basic),
    ElementTemplate::new(ElementKind::Gallery, "Gallery", TemplateCategory::Advanced),
    ElementTemplate::new(ElementKind::Testimonial, "Testimonial", TemplateCategory::Advanced),
    ElementTemplate::new(ElementKind::Hero, "Hero section", TemplateCategory::Sections),
    ElementTemplate::new(ElementKind::Features, "Features", TemplateCategory::Sections),
];

/// Look up the template for a kind.
pub fn template(kind: ElementKind) -> &'static ElementTemplate {
    // TEMPLATES lists every kind in ElementKind::ALL order.
    &TEMPLATES[ElementKind::ALL.iter().position(|k| *k == kind).unwrap_or(0)]
}

/// Templates of one palette section.
pub fn templates_in(category: TemplateCategory) -> impl Iterator<Item = &'static ElementTemplate> {
    TEMPLATES.iter().filter(move |t| t.category == category)
}

fn style(entries: &[(&str, &str)]) -> StyleMap {
    entries.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect()
}

impl ElementTemplate {
    /// Initial box: sections are wider and taller than plain elements.
    pub fn default_bounds(&self) -> Bounds {
        let (width, height) = match self.kind {
            ElementKind::Hero => (800.0, 400.0),
            ElementKind::Features => (800.0, 500.0),
            _ => (300.0, 200.0),
        };
        Bounds::new(DEFAULT_PLACEMENT.x, DEFAULT_PLACEMENT.y, width, height)
    }

    pub fn default_content(&self) -> ElementContent {
        match self.kind {
            ElementKind::Text => ElementContent::Text("Click to edit this text".into()),
            ElementKind::Image => ElementContent::Image(ImageContent::new(
                "https://via.placeholder.com/300x200",
                "Image placeholder",
            )),
            ElementKind::Button => ElementContent::Button("Button".into()),
            ElementKind::Container => ElementContent::Container,
            ElementKind::Form => ElementContent::Form(FormContent {
                fields: vec![
                    FormField::new(FieldKind::Text, "Name", "Your name", true),
                    FormField::new(FieldKind::Email, "Email", "Your email", true),
                    FormField::new(FieldKind::Textarea, "Message", "Your message", false),
                ],
                submit_label: "Send".into(),
            }),
            ElementKind::Video => ElementContent::Video(VideoContent {
                src: "https://www.youtube.com/embed/dQw4w9WgXcQ".into(),
                title: "YouTube video".into(),
            }),
            ElementKind::Gallery => ElementContent::Gallery(GalleryContent {
                images: (1..=4)
                    .map(|n| {
                        ImageContent::new(
                            format!("https://via.placeholder.com/300x200?text=Image+{n}"),
                            format!("Image {n}"),
                        )
                    })
                    .collect(),
            }),
            ElementKind::Testimonial => ElementContent::Testimonial(TestimonialContent {
                quote: "This product completely changed the way we work. Highly recommended!".into(),
                author: "Jane Doe".into(),
                position: "Director, XYZ Company".into(),
                avatar: Some("https://via.placeholder.com/100?text=JD".into()),
            }),
            ElementKind::Hero => ElementContent::Hero(HeroContent {
                title: "A catchy headline".into(),
                subtitle: "A convincing description of your product or service that makes visitors act."
                    .into(),
                button_text: "Get started".into(),
                image: Some("https://via.placeholder.com/600x400?text=Hero+Image".into()),
            }),
            ElementKind::Features => ElementContent::Features(FeaturesContent {
                title: "Our features".into(),
                features: [
                    ("Feature 1", "first", "✨"),
                    ("Feature 2", "second", "🚀"),
                    ("Feature 3", "third", "🔒"),
                ]
                .into_iter()
                .map(|(title, ordinal, icon)| Feature {
                    title: title.into(),
                    description: format!("Description of the {ordinal} feature."),
                    icon: icon.into(),
                })
                .collect(),
            }),
        }
    }

    pub fn default_style(&self) -> StyleMap {
        match self.kind {
            ElementKind::Text => style(&[
                ("fontSize", "16px"),
                ("fontWeight", "normal"),
                ("color", "#000000"),
                ("textAlign", "left"),
                ("padding", "8px"),
            ]),
            ElementKind::Image => style(&[("width", "100%"), ("height", "auto"), ("objectFit", "cover")]),
            ElementKind::Button => style(&[
                ("backgroundColor", "#3b82f6"),
                ("color", "#ffffff"),
                ("padding", "8px 16px"),
                ("borderRadius", "4px"),
                ("textAlign", "center"),
                ("cursor", "pointer"),
            ]),
            ElementKind::Container => style(&[
                ("width", "100%"),
                ("minHeight", "100px"),
                ("padding", "16px"),
                ("border", "1px dashed #cccccc"),
                ("backgroundColor", "#f9fafb"),
            ]),
            ElementKind::Form => style(&[
                ("width", "100%"),
                ("padding", "16px"),
                ("backgroundColor", "#ffffff"),
                ("border", "1px solid #e5e7eb"),
                ("borderRadius", "8px"),
            ]),
            ElementKind::Video => style(&[("width", "100%"), ("height", "315px")]),
            ElementKind::Gallery => style(&[
                ("display", "grid"),
                ("gridTemplateColumns", "repeat(2, 1fr)"),
                ("gap", "16px"),
                ("padding", "16px"),
            ]),
            ElementKind::Testimonial => style(&[
                ("padding", "24px"),
                ("backgroundColor", "#f9fafb"),
                ("borderRadius", "8px"),
                ("border", "1px solid #e5e7eb"),
            ]),
            ElementKind::Hero => style(&[
                ("display", "flex"),
                ("flexDirection", "column"),
                ("alignItems", "center"),
                ("textAlign", "center"),
                ("padding", "64px 16px"),
                ("backgroundColor", "#f9fafb"),
                ("width", "100%"),
                ("minHeight", "400px"),
            ]),
            ElementKind::Features => style(&[
                ("padding", "48px 16px"),
                ("width", "100%"),
                ("backgroundColor", "#ffffff"),
            ]),
        }
    }

    /// Build the input for a new element of this template on `page_id`.
    pub fn instantiate(&self, page_id: PageId) -> NewElement {
        NewElement::new(page_id, self.default_content(), self.default_bounds())
            .with_style(self.default_style())
    }
}

impl NewElement {
    /// A palette element of `kind`, with default content, style and box.
    pub fn from_template(kind: ElementKind, page_id: PageId) -> Self {
        template(kind).instantiate(page_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    #[test]
    fn test_every_kind_has_a_template() {
        for kind in ElementKind::ALL {
            let t = template(kind);
            assert_eq!(t.kind, kind);
            assert_eq!(t.default_content().kind(), kind);
        }
    }

    #[test]
    fn test_categories() {
        assert_eq!(templates_in(TemplateCategory::Basic).count(), 6);
        assert_eq!(templates_in(TemplateCategory::Advanced).count(), 2);
        let sections: Vec<_> = templates_in(TemplateCategory::Sections).map(|t| t.kind).collect();
        assert_eq!(sections, vec![ElementKind::Hero, ElementKind::Features]);
    }

    #[test]
    fn test_default_bounds() {
        assert_eq!(template(ElementKind::Text).default_bounds(), Bounds::new(50.0, 50.0, 300.0, 200.0));
        assert_eq!(template(ElementKind::Hero).default_bounds(), Bounds::new(50.0, 50.0, 800.0, 400.0));
        assert_eq!(template(ElementKind::Features).default_bounds(), Bounds::new(50.0, 50.0, 800.0, 500.0));
    }

    #[test]
    fn test_from_template() {
        let page = Uuid::new_v4();
        let new = NewElement::from_template(ElementKind::Button, page);
        assert_eq!(new.page_id, page);
        assert_eq!(new.style.get("backgroundColor").map(String::as_str), Some("#3b82f6"));
        assert_eq!(new.content.text(), Some("Button"));
    }
}
