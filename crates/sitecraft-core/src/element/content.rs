//! Type-specific element payloads.

use serde::{Deserialize, Serialize};

/// Element type, as offered by the palette.
///
/// Serialized with the builder's historical type tokens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ElementKind {
    #[serde(rename = "texte")]
    Text,
    #[serde(rename = "image")]
    Image,
    #[serde(rename = "bouton")]
    Button,
    #[serde(rename = "conteneur")]
    Container,
    #[serde(rename = "formulaire")]
    Form,
    #[serde(rename = "video")]
    Video,
    #[serde(rename = "galerie")]
    Gallery,
    #[serde(rename = "temoignage")]
    Testimonial,
    #[serde(rename = "hero")]
    Hero,
    #[serde(rename = "features")]
    Features,
}

impl ElementKind {
    /// All element kinds in palette order.
    pub const ALL: [ElementKind; 10] = [
        ElementKind::Text,
        ElementKind::Image,
        ElementKind::Button,
        ElementKind::Container,
        ElementKind::Form,
        ElementKind::Video,
        ElementKind::Gallery,
        ElementKind::Testimonial,
        ElementKind::Hero,
        ElementKind::Features,
    ];

    /// Wire token for this kind (e.g. `"texte"`).
    pub fn token(self) -> &'static str {
        match self {
            ElementKind::Text => "texte",
            ElementKind::Image => "image",
            ElementKind::Button => "bouton",
            ElementKind::Container => "conteneur",
            ElementKind::Form => "formulaire",
            ElementKind::Video => "video",
            ElementKind::Gallery => "galerie",
            ElementKind::Testimonial => "temoignage",
            ElementKind::Hero => "hero",
            ElementKind::Features => "features",
        }
    }

    /// Parse a wire token.
    pub fn from_token(token: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.token() == token)
    }

    /// Lowercase display name used in history descriptions.
    pub fn name(self) -> &'static str {
        match self {
            ElementKind::Text => "text",
            ElementKind::Image => "image",
            ElementKind::Button => "button",
            ElementKind::Container => "container",
            ElementKind::Form => "form",
            ElementKind::Video => "video",
            ElementKind::Gallery => "gallery",
            ElementKind::Testimonial => "testimonial",
            ElementKind::Hero => "hero",
            ElementKind::Features => "features",
        }
    }
}

impl std::fmt::Display for ElementKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageContent {
    pub src: String,
    pub alt: String,
}

impl ImageContent {
    pub fn new(src: impl Into<String>, alt: impl Into<String>) -> Self {
        Self {
            src: src.into(),
            alt: alt.into(),
        }
    }
}

/// Input type of a form field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldKind {
    #[default]
    Text,
    Email,
    Tel,
    Number,
    Textarea,
}

impl FieldKind {
    /// HTML `type` attribute value (`textarea` has no input type).
    pub fn input_type(self) -> &'static str {
        match self {
            FieldKind::Text | FieldKind::Textarea => "text",
            FieldKind::Email => "email",
            FieldKind::Tel => "tel",
            FieldKind::Number => "number",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormField {
    #[serde(rename = "type")]
    pub kind: FieldKind,
    pub label: String,
    #[serde(default)]
    pub placeholder: String,
    #[serde(default)]
    pub required: bool,
}

impl FormField {
    pub fn new(kind: FieldKind, label: impl Into<String>, placeholder: impl Into<String>, required: bool) -> Self {
        Self {
            kind,
            label: label.into(),
            placeholder: placeholder.into(),
            required,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormContent {
    pub fields: Vec<FormField>,
    pub submit_label: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VideoContent {
    pub src: String,
    pub title: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GalleryContent {
    pub images: Vec<ImageContent>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TestimonialContent {
    pub quote: String,
    pub author: String,
    /// Author's role, e.g. "Director, ACME".
    pub position: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HeroContent {
    pub title: String,
    pub subtitle: String,
    pub button_text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Feature {
    pub title: String,
    pub description: String,
    #[serde(default)]
    pub icon: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeaturesContent {
    pub title: String,
    pub features: Vec<Feature>,
}

/// Content payload, one variant per [`ElementKind`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "content")]
pub enum ElementContent {
    #[serde(rename = "texte")]
    Text(String),
    #[serde(rename = "image")]
    Image(ImageContent),
    #[serde(rename = "bouton")]
    Button(String),
    #[serde(rename = "conteneur")]
    Container,
    #[serde(rename = "formulaire")]
    Form(FormContent),
    #[serde(rename = "video")]
    Video(VideoContent),
    #[serde(rename = "galerie")]
    Gallery(GalleryContent),
    #[serde(rename = "temoignage")]
    Testimonial(TestimonialContent),
    #[serde(rename = "hero")]
    Hero(HeroContent),
    #[serde(rename = "features")]
    Features(FeaturesContent),
}

impl ElementContent {
    pub fn kind(&self) -> ElementKind {
        match self {
            ElementContent::Text(_) => ElementKind::Text,
            ElementContent::Image(_) => ElementKind::Image,
            ElementContent::Button(_) => ElementKind::Button,
            ElementContent::Container => ElementKind::Container,
            ElementContent::Form(_) => ElementKind::Form,
            ElementContent::Video(_) => ElementKind::Video,
            ElementContent::Gallery(_) => ElementKind::Gallery,
            ElementContent::Testimonial(_) => ElementKind::Testimonial,
            ElementContent::Hero(_) => ElementKind::Hero,
            ElementContent::Features(_) => ElementKind::Features,
        }
    }

    /// Plain label text for text-like elements.
    pub fn text(&self) -> Option<&str> {
        match self {
            ElementContent::Text(text) | ElementContent::Button(text) => Some(text),
            _ => None,
        }
    }
}
