//! Multi-device preview frames.

use crate::html::HtmlRenderer;
use crate::renderer::{RenderContext, RenderMode, RenderResult, Renderer, RendererError};
use kurbo::Size;
use sitecraft_core::EditorSession;

/// Device family a preview is framed as.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DeviceKind {
    Mobile,
    Tablet,
    Laptop,
    #[default]
    Desktop,
}

impl DeviceKind {
    pub const ALL: [DeviceKind; 4] = [DeviceKind::Mobile, DeviceKind::Tablet, DeviceKind::Laptop, DeviceKind::Desktop];

    pub fn name(self) -> &'static str {
        match self {
            DeviceKind::Mobile => "mobile",
            DeviceKind::Tablet => "tablet",
            DeviceKind::Laptop => "laptop",
            DeviceKind::Desktop => "desktop",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.name().eq_ignore_ascii_case(name))
    }

    /// Whether the preview is drawn inside a device bezel.
    pub fn has_bezel(self) -> bool {
        self != DeviceKind::Desktop
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Orientation {
    #[default]
    Portrait,
    Landscape,
}

impl Orientation {
    pub fn toggle(self) -> Self {
        match self {
            Orientation::Portrait => Orientation::Landscape,
            Orientation::Landscape => Orientation::Portrait,
        }
    }
}

/// A named device size.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DevicePreset {
    pub name: &'static str,
    pub width: f64,
    pub height: f64,
    pub kind: DeviceKind,
}

impl DevicePreset {
    const fn new(name: &'static str, width: f64, height: f64, kind: DeviceKind) -> Self {
        Self {
            name,
            width,
            height,
            kind,
        }
    }

    /// Size in the given orientation.
    pub fn size(&self, orientation: Orientation) -> Size {
        match orientation {
            Orientation::Portrait => Size::new(self.width, self.height),
            Orientation::Landscape => Size::new(self.height, self.width),
        }
    }
}

pub const DEVICE_PRESETS: [DevicePreset; 9] = [
    DevicePreset::new("iPhone SE", 375.0, 667.0, DeviceKind::Mobile),
    DevicePreset::new("iPhone 12/13", 390.0, 844.0, DeviceKind::Mobile),
    DevicePreset::new("iPhone 12/13 Pro Max", 428.0, 926.0, DeviceKind::Mobile),
    DevicePreset::new("Samsung Galaxy S20", 360.0, 800.0, DeviceKind::Mobile),
    DevicePreset::new("iPad Mini", 768.0, 1024.0, DeviceKind::Tablet),
    DevicePreset::new("iPad Pro 11\"", 834.0, 1194.0, DeviceKind::Tablet),
    DevicePreset::new("iPad Pro 12.9\"", 1024.0, 1366.0, DeviceKind::Tablet),
    DevicePreset::new("MacBook Air", 1280.0, 800.0, DeviceKind::Laptop),
    DevicePreset::new("Desktop HD", 1920.0, 1080.0, DeviceKind::Desktop),
];

/// Look up a preset by name (case-insensitive).
pub fn device_preset(name: &str) -> Option<&'static DevicePreset> {
    DEVICE_PRESETS.iter().find(|preset| preset.name.eq_ignore_ascii_case(name))
}

/// Default custom dimensions of the desktop frame.
pub const DEFAULT_CUSTOM_SIZE: Size = Size::new(1200.0, 800.0);

/// The device frame a page is previewed in.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PreviewFrame {
    pub kind: DeviceKind,
    pub orientation: Orientation,
    /// Dimensions used by the desktop frame.
    pub custom_size: Size,
}

impl Default for PreviewFrame {
    fn default() -> Self {
        Self::new(DeviceKind::Desktop)
    }
}

impl PreviewFrame {
    pub fn new(kind: DeviceKind) -> Self {
        Self {
            kind,
            orientation: Orientation::Portrait,
            custom_size: DEFAULT_CUSTOM_SIZE,
        }
    }

    pub fn with_orientation(mut self, orientation: Orientation) -> Self {
        self.orientation = orientation;
        self
    }

    /// Switch to a preset's device family and remember its size.
    pub fn apply_preset(&mut self, preset: &DevicePreset) {
        self.kind = preset.kind;
        self.custom_size = preset.size(self.orientation);
    }

    /// Flip the orientation, swapping the custom dimensions with it.
    pub fn toggle_orientation(&mut self) {
        self.orientation = self.orientation.toggle();
        self.custom_size = Size::new(self.custom_size.height, self.custom_size.width);
    }

    /// Inner size of the frame. Mobile, tablet and laptop use fixed
    /// sizes; desktop uses the custom dimensions.
    pub fn viewport(&self) -> Size {
        let landscape = self.orientation == Orientation::Landscape;
        match self.kind {
            DeviceKind::Mobile if landscape => Size::new(667.0, 375.0),
            DeviceKind::Mobile => Size::new(375.0, 667.0),
            DeviceKind::Tablet if landscape => Size::new(1024.0, 768.0),
            DeviceKind::Tablet => Size::new(768.0, 1024.0),
            DeviceKind::Laptop => Size::new(1280.0, 800.0),
            DeviceKind::Desktop => self.custom_size,
        }
    }

    /// CSS of the outer frame.
    pub fn frame_style(&self) -> String {
        let viewport = self.viewport();
        let (border, radius) = if self.kind.has_bezel() {
            ("16px solid #1e293b", "16px")
        } else {
            ("1px solid #e2e8f0", "0")
        };
        format!(
            "width: {}px; height: {}px; border: {}; border-radius: {}; overflow: hidden; background: #ffffff;",
            viewport.width, viewport.height, border, radius
        )
    }

    /// Render the session's current page in preview mode inside this frame.
    pub fn render(&self, renderer: &mut HtmlRenderer, session: &EditorSession) -> RenderResult<String> {
        if session.current_page_id().is_none() {
            return Err(RendererError::NoPage);
        }
        let ctx = RenderContext::new(session, self.viewport()).with_mode(RenderMode::Preview);
        renderer.build_scene(&ctx);
        log::debug!(
            "Rendered {} preview at {}x{}",
            self.kind.name(),
            ctx.viewport_size.width,
            ctx.viewport_size.height
        );
        Ok(format!(
            "<div class=\"sitecraft-device\" data-device=\"{}\" style=\"{}\">\n{}</div>\n",
            self.kind.name(),
            self.frame_style(),
            renderer.take_output()
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixed_viewports() {
        assert_eq!(PreviewFrame::new(DeviceKind::Mobile).viewport(), Size::new(375.0, 667.0));
        assert_eq!(
            PreviewFrame::new(DeviceKind::Tablet)
                .with_orientation(Orientation::Landscape)
                .viewport(),
            Size::new(1024.0, 768.0)
        );
        assert_eq!(
            PreviewFrame::new(DeviceKind::Laptop)
                .with_orientation(Orientation::Landscape)
                .viewport(),
            Size::new(1280.0, 800.0)
        );
        assert_eq!(PreviewFrame::default().viewport(), DEFAULT_CUSTOM_SIZE);
    }

    #[test]
    fn test_preset_and_toggle() {
        let mut frame = PreviewFrame::default();
        frame.apply_preset(device_preset("desktop hd").unwrap());
        assert_eq!(frame.viewport(), Size::new(1920.0, 1080.0));
        frame.toggle_orientation();
        assert_eq!(frame.orientation, Orientation::Landscape);
        assert_eq!(frame.viewport(), Size::new(1080.0, 1920.0));
    }

    #[test]
    fn test_bezel() {
        assert!(PreviewFrame::new(DeviceKind::Mobile).frame_style().contains("16px solid #1e293b"));
        assert!(PreviewFrame::default().frame_style().contains("1px solid #e2e8f0"));
        assert_eq!(DeviceKind::from_name("Tablet"), Some(DeviceKind::Tablet));
    }

    #[test]
    fn test_render_requires_page() {
        let session = EditorSession::default();
        let result = PreviewFrame::default().render(&mut HtmlRenderer::new(), &session);
        assert!(matches!(result, Err(RendererError::NoPage)));
    }

    #[test]
    fn test_render_wraps_page() {
        let mut session = EditorSession::default();
        session.workspace_mut().add_project("Site", "", "owner");
        let html = PreviewFrame::new(DeviceKind::Mobile)
            .render(&mut HtmlRenderer::new(), &session)
            .unwrap();
        assert!(html.starts_with("<div class=\"sitecraft-device\" data-device=\"mobile\""));
        assert!(html.contains("width: 375px; height: 667px;"));
    }
}
