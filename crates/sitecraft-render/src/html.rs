//! HTML renderer: one absolutely positioned box per element.

use crate::renderer::{GridStyle, RenderContext, Renderer};
use peniko::Color;
use sitecraft_core::element::{
    Element, ElementContent, FeaturesContent, FieldKind, FormContent, HeroContent, TestimonialContent,
};
use sitecraft_core::interaction::HANDLE_SIZE;
use sitecraft_core::project::link_target;
use sitecraft_core::{Bounds, StyleMap, resize_handles};

/// Message shown on a page with no elements.
pub const EMPTY_PAGE_MESSAGE: &str = "This page is empty. Add elements in the editor.";

/// Renders the current page of a session to an HTML fragment.
#[derive(Debug, Default)]
pub struct HtmlRenderer {
    output: String,
}

impl HtmlRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Output of the last `build_scene`.
    pub fn output(&self) -> &str {
        &self.output
    }

    /// Take the output, leaving the renderer empty.
    pub fn take_output(&mut self) -> String {
        std::mem::take(&mut self.output)
    }

    /// Wrap a fragment in a standalone HTML page.
    pub fn page_document(title: &str, body: &str) -> String {
        format!(
            "<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n<title>{}</title>\n</head>\n\
             <body style=\"margin: 0; background: #f1f5f9; display: flex; justify-content: center; \
             padding: 24px;\">\n{}\n</body>\n</html>\n",
            escape_html(title),
            body
        )
    }

    fn render_element(&mut self, element: &Element, preview: bool) {
        let mut style = box_style(element.position);
        push_style_map(&mut style, &element.style);

        let mut attrs = format!(
            " class=\"sitecraft-element\" data-id=\"{}\" data-type=\"{}\"",
            element.id,
            element.kind().token()
        );
        if preview {
            if let ElementContent::Button(text) = &element.content {
                if let Some(slug) = link_target(text) {
                    attrs.push_str(&format!(" data-page-link=\"{}\"", escape_html(slug)));
                    style.push_str(" cursor: pointer;");
                }
            }
        }

        self.output
            .push_str(&format!("<div{} style=\"{}\">", attrs, escape_html(&style)));
        self.output.push_str(&render_content(element, preview));
        self.output.push_str("</div>\n");
    }

    fn render_guides(&mut self, ctx: &RenderContext) {
        let color = css_color(ctx.guide_color);
        let guides = ctx.session.interaction().guides();
        for x in &guides.vertical {
            self.output.push_str(&format!(
                "<div class=\"sitecraft-guide\" style=\"position: absolute; left: {}px; top: 0; \
                 width: 1px; height: 100%; background: {}; pointer-events: none;\"></div>\n",
                px(*x),
                color
            ));
        }
        for y in &guides.horizontal {
            self.output.push_str(&format!(
                "<div class=\"sitecraft-guide\" style=\"position: absolute; left: 0; top: {}px; \
                 width: 100%; height: 1px; background: {}; pointer-events: none;\"></div>\n",
                px(*y),
                color
            ));
        }
    }

    fn render_selection(&mut self, bounds: Bounds, color: Color) {
        let color = css_color(color);
        self.output.push_str(&format!(
            "<div class=\"sitecraft-selection\" style=\"{} outline: 2px solid {}; \
             pointer-events: none;\"></div>\n",
            box_style(bounds),
            color
        ));
        let half = HANDLE_SIZE / 2.0;
        for handle in resize_handles(bounds) {
            self.output.push_str(&format!(
                "<div class=\"sitecraft-handle\" data-direction=\"{}\" style=\"position: absolute; \
                 left: {}px; top: {}px; width: {}px; height: {}px; background: #ffffff; \
                 border: 1px solid {}; cursor: {};\"></div>\n",
                handle.direction.token(),
                px(handle.position.x - half),
                px(handle.position.y - half),
                px(HANDLE_SIZE),
                px(HANDLE_SIZE),
                color,
                handle.direction.cursor()
            ));
        }
    }
}

impl Renderer for HtmlRenderer {
    fn build_scene(&mut self, ctx: &RenderContext) {
        self.output.clear();
        let preview = ctx.is_preview();

        let mut surface = format!(
            "position: relative; width: {}px; height: {}px; overflow: auto; background-color: {};",
            px(ctx.viewport_size.width),
            px(ctx.viewport_size.height),
            css_color(self.background_color(ctx))
        );
        if !preview {
            surface.push_str(&grid_background(ctx.grid_style, ctx.grid_size));
        }
        self.output
            .push_str(&format!("<div class=\"sitecraft-canvas\" style=\"{}\">\n", surface));

        let mut empty = true;
        for element in ctx.session.current_page_elements() {
            self.render_element(element, preview);
            empty = false;
        }
        if empty {
            self.output.push_str(&format!(
                "<p class=\"sitecraft-empty\" style=\"text-align: center; color: #64748b; \
                 margin-top: 40px;\">{}</p>\n",
                EMPTY_PAGE_MESSAGE
            ));
        }

        if !preview {
            let interaction = ctx.session.interaction();
            if interaction.is_interacting() {
                self.render_guides(ctx);
            }
            if let Some(selected) = ctx.session.selected_element() {
                self.render_selection(selected.position, ctx.selection_color);
            }
        }

        self.output.push_str("</div>\n");
    }
}

fn render_content(element: &Element, preview: bool) -> String {
    match &element.content {
        ElementContent::Text(text) => format!("<div>{}</div>", escape_html(text)),
        ElementContent::Image(image) => format!(
            "<img src=\"{}\" alt=\"{}\" style=\"width: 100%; height: 100%; object-fit: cover;\">",
            escape_html(&image.src),
            escape_html(&image.alt)
        ),
        ElementContent::Button(text) => format!(
            "<button style=\"width: 100%; height: 100%; cursor: {};\">{}</button>",
            if preview { "pointer" } else { "default" },
            escape_html(text)
        ),
        ElementContent::Container => String::new(),
        ElementContent::Form(form) => render_form(form, preview),
        ElementContent::Video(video) => format!(
            "<iframe src=\"{}\" title=\"{}\" style=\"width: 100%; height: 100%; border: 0;\" \
             allowfullscreen></iframe>",
            escape_html(&video.src),
            escape_html(&video.title)
        ),
        ElementContent::Gallery(gallery) => {
            let mut html = String::from(
                "<div style=\"display: grid; \
                 grid-template-columns: repeat(auto-fill, minmax(150px, 1fr)); gap: 16px;\">",
            );
            for image in &gallery.images {
                html.push_str(&format!(
                    "<img src=\"{}\" alt=\"{}\" style=\"width: 100%; height: 100%; object-fit: cover; \
                     border-radius: 4px;\">",
                    escape_html(&image.src),
                    escape_html(&image.alt)
                ));
            }
            html.push_str("</div>");
            html
        }
        ElementContent::Testimonial(testimonial) => render_testimonial(testimonial),
        ElementContent::Hero(hero) => render_hero(hero),
        ElementContent::Features(features) => render_features(features),
    }
}

fn render_form(form: &FormContent, preview: bool) -> String {
    let disabled = if preview { " disabled" } else { "" };
    let mut html = String::from("<form>");
    for field in &form.fields {
        let required = if field.required { " required" } else { "" };
        html.push_str(&format!(
            "<div style=\"margin-bottom: 16px;\">\
             <label style=\"display: block; margin-bottom: 8px;\">{}</label>",
            escape_html(&field.label)
        ));
        if field.kind == FieldKind::Textarea {
            html.push_str(&format!(
                "<textarea placeholder=\"{}\"{}{}></textarea>",
                escape_html(&field.placeholder),
                required,
                disabled
            ));
        } else {
            html.push_str(&format!(
                "<input type=\"{}\" placeholder=\"{}\"{}{}>",
                field.kind.input_type(),
                escape_html(&field.placeholder),
                required,
                disabled
            ));
        }
        html.push_str("</div>");
    }
    html.push_str(&format!(
        "<button type=\"submit\"{}>{}</button></form>",
        disabled,
        escape_html(&form.submit_label)
    ));
    html
}

fn render_testimonial(testimonial: &TestimonialContent) -> String {
    let avatar = testimonial
        .avatar
        .as_deref()
        .map(|src| {
            format!(
                "<img src=\"{}\" alt=\"{}\" style=\"width: 50px; height: 50px; border-radius: 50%; \
                 margin-right: 1rem;\">",
                escape_html(src),
                escape_html(&testimonial.author)
            )
        })
        .unwrap_or_default();
    format!(
        "<div style=\"display: flex; flex-direction: column; align-items: center; text-align: center;\">\
         <div style=\"font-size: 1.5rem; font-style: italic; margin-bottom: 1.5rem; \
         color: #4b5563;\">&quot;{}&quot;</div>\
         <div style=\"display: flex; align-items: center;\">{}<div><div style=\"font-weight: bold;\">{}</div>\
         <div style=\"font-size: 0.875rem; color: #6b7280;\">{}</div></div></div></div>",
        escape_html(&testimonial.quote),
        avatar,
        escape_html(&testimonial.author),
        escape_html(&testimonial.position)
    )
}

fn render_hero(hero: &HeroContent) -> String {
    let image = hero
        .image
        .as_deref()
        .map(|src| {
            format!(
                "<img src=\"{}\" alt=\"Hero\" style=\"max-width: 100%; height: auto; margin-top: 2rem; \
                 border-radius: 0.5rem;\">",
                escape_html(src)
            )
        })
        .unwrap_or_default();
    format!(
        "<div style=\"display: flex; flex-direction: column; align-items: center; \
         justify-content: center; text-align: center; height: 100%;\">\
         <h1 style=\"font-size: 2.5rem; font-weight: bold; margin-bottom: 1rem;\">{}</h1>\
         <p style=\"font-size: 1.25rem; margin-bottom: 2rem; max-width: 800px;\">{}</p>\
         <button style=\"background-color: #3b82f6; color: white; padding: 0.75rem 1.5rem; \
         border-radius: 0.375rem; font-weight: bold;\">{}</button>{}</div>",
        escape_html(&hero.title),
        escape_html(&hero.subtitle),
        escape_html(&hero.button_text),
        image
    )
}

fn render_features(features: &FeaturesContent) -> String {
    let mut html = format!(
        "<h2 style=\"font-size: 2rem; font-weight: bold; margin-bottom: 2rem; text-align: center;\">{}</h2>\
         <div style=\"display: grid; grid-template-columns: repeat(auto-fit, minmax(250px, 1fr)); \
         gap: 2rem;\">",
        escape_html(&features.title)
    );
    for feature in &features.features {
        html.push_str(&format!(
            "<div style=\"padding: 1.5rem; border-radius: 0.5rem; \
             background-color: rgba(255, 255, 255, 0.8); text-align: center;\">\
             <div style=\"font-size: 2rem; margin-bottom: 1rem;\">{}</div>\
             <h3 style=\"font-size: 1.25rem; font-weight: bold; margin-bottom: 0.5rem;\">{}</h3>\
             <p style=\"color: #6b7280;\">{}</p></div>",
            escape_html(&feature.icon),
            escape_html(&feature.title),
            escape_html(&feature.description)
        ));
    }
    html.push_str("</div>");
    html
}

fn box_style(bounds: Bounds) -> String {
    format!(
        "position: absolute; left: {}px; top: {}px; width: {}px; height: {}px;",
        px(bounds.x),
        px(bounds.y),
        px(bounds.width),
        px(bounds.height)
    )
}

fn push_style_map(style: &mut String, map: &StyleMap) {
    for (property, value) in map {
        style.push_str(&format!(" {}: {};", css_property(property), value));
    }
}

fn grid_background(style: GridStyle, size: f64) -> String {
    let size = px(size);
    match style {
        GridStyle::None => String::new(),
        GridStyle::Lines => format!(
            " background-image: linear-gradient(#e2e8f0 1px, transparent 1px), \
             linear-gradient(90deg, #e2e8f0 1px, transparent 1px); background-size: {size}px {size}px;"
        ),
        GridStyle::Dots => format!(
            " background-image: radial-gradient(#cbd5e1 1px, transparent 1px); \
             background-size: {size}px {size}px;"
        ),
    }
}

/// camelCase style key to its CSS property name (`backgroundColor` ->
/// `background-color`).
pub fn css_property(name: &str) -> String {
    let mut css = String::with_capacity(name.len() + 4);
    for c in name.chars() {
        if c.is_ascii_uppercase() {
            css.push('-');
            css.push(c.to_ascii_lowercase());
        } else {
            css.push(c);
        }
    }
    css
}

/// CSS color literal: `#rrggbb` when opaque, `rgba(...)` otherwise.
pub fn css_color(color: Color) -> String {
    let rgba = color.to_rgba8();
    if rgba.a == 255 {
        format!("#{:02x}{:02x}{:02x}", rgba.r, rgba.g, rgba.b)
    } else {
        format!(
            "rgba({}, {}, {}, {:.3})",
            rgba.r,
            rgba.g,
            rgba.b,
            f64::from(rgba.a) / 255.0
        )
    }
}

/// Escape text for HTML content and attribute values.
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// Format a pixel value without a trailing `.0`.
fn px(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{}", value as i64)
    } else {
        format!("{:.2}", value)
    }
}
