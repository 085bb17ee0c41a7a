//! Inspector helpers: color themes, saved style presets and font choices.
//!
//! Each helper produces an [`ElementUpdate`], so applying it goes through the
//! session's tracked update path like any other inspector edit.

use crate::element::{ElementKind, ElementUpdate, StyleMap};

/// A named five-color palette.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColorTheme {
    pub name: &'static str,
    pub primary: &'static str,
    pub secondary: &'static str,
    pub accent: &'static str,
    pub text: &'static str,
    pub background: &'static str,
}

pub const COLOR_THEMES: [ColorTheme; 5] = [
    ColorTheme {
        name: "Classic blue",
        primary: "#3b82f6",
        secondary: "#93c5fd",
        accent: "#1d4ed8",
        text: "#1e293b",
        background: "#ffffff",
    },
    ColorTheme {
        name: "Nature green",
        primary: "#10b981",
        secondary: "#6ee7b7",
        accent: "#047857",
        text: "#1e293b",
        background: "#f0fdf4",
    },
    ColorTheme {
        name: "Creative violet",
        primary: "#8b5cf6",
        secondary: "#c4b5fd",
        accent: "#6d28d9",
        text: "#1e293b",
        background: "#ffffff",
    },
    ColorTheme {
        name: "Warm orange",
        primary: "#f97316",
        secondary: "#fdba74",
        accent: "#c2410c",
        text: "#1e293b",
        background: "#fff7ed",
    },
    ColorTheme {
        name: "Dark mode",
        primary: "#60a5fa",
        secondary: "#1e293b",
        accent: "#3b82f6",
        text: "#f8fafc",
        background: "#0f172a",
    },
];

impl ColorTheme {
    pub fn by_name(name: &str) -> Option<&'static ColorTheme> {
        COLOR_THEMES.iter().find(|theme| theme.name.eq_ignore_ascii_case(name))
    }

    /// Style changes that recolor an element of `kind` with this theme.
    pub fn update_for(&self, kind: ElementKind) -> ElementUpdate {
        let update = ElementUpdate::new();
        match kind {
            ElementKind::Button => update
                .set_style("backgroundColor", self.primary)
                .set_style("color", self.background)
                .set_style("borderColor", self.primary),
            ElementKind::Text => update.set_style("color", self.text),
            ElementKind::Container => update
                .set_style("backgroundColor", self.background)
                .set_style("borderColor", self.secondary),
            _ => update
                .set_style("color", self.text)
                .set_style("borderColor", self.secondary),
        }
    }
}

/// A saved style, intended for one element kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StylePreset {
    pub name: &'static str,
    pub kind: ElementKind,
    pub entries: &'static [(&'static str, &'static str)],
}

pub const STYLE_PRESETS: [StylePreset; 3] = [
    StylePreset {
        name: "Primary button",
        kind: ElementKind::Button,
        entries: &[
            ("backgroundColor", "#3b82f6"),
            ("color", "#ffffff"),
            ("padding", "12px 24px"),
            ("borderRadius", "8px"),
            ("fontWeight", "bold"),
            ("border", "none"),
            ("boxShadow", "0 4px 6px rgba(0, 0, 0, 0.1)"),
        ],
    },
    StylePreset {
        name: "Section title",
        kind: ElementKind::Text,
        entries: &[
            ("fontSize", "32px"),
            ("fontWeight", "bold"),
            ("color", "#1e293b"),
            ("marginBottom", "16px"),
            ("borderBottom", "2px solid #e2e8f0"),
            ("paddingBottom", "8px"),
        ],
    },
    StylePreset {
        name: "Info card",
        kind: ElementKind::Container,
        entries: &[
            ("backgroundColor", "#f8fafc"),
            ("border", "1px solid #e2e8f0"),
            ("borderRadius", "8px"),
            ("padding", "24px"),
            ("boxShadow", "0 2px 4px rgba(0, 0, 0, 0.05)"),
        ],
    },
];

impl StylePreset {
    pub fn style(&self) -> StyleMap {
        self.entries.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect()
    }

    /// Merge the preset into an element's style.
    pub fn update(&self) -> ElementUpdate {
        ElementUpdate::new().with_styles(&self.style())
    }
}

/// Presets meant for `kind`.
pub fn presets_for(kind: ElementKind) -> impl Iterator<Item = &'static StylePreset> {
    STYLE_PRESETS.iter().filter(move |preset| preset.kind == kind)
}

/// Font choices offered by the typography panel: (label, CSS value).
pub const FONT_FAMILIES: [(&str, &str); 8] = [
    ("Sans-serif", "Arial, sans-serif"),
    ("Serif", "Georgia, serif"),
    ("Monospace", "Consolas, monospace"),
    ("Roboto", "'Roboto', sans-serif"),
    ("Open Sans", "'Open Sans', sans-serif"),
    ("Playfair Display", "'Playfair Display', serif"),
    ("Montserrat", "'Montserrat', sans-serif"),
    ("Lato", "'Lato', sans-serif"),
];
