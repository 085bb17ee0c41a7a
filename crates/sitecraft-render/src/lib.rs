//! Sitecraft Render Library
//!
//! Renderer abstraction for the page canvas, an HTML implementation, and
//! device preview frames.

mod device;
mod html;
mod renderer;

pub use device::{DEFAULT_CUSTOM_SIZE, DEVICE_PRESETS, DeviceKind, DevicePreset, Orientation, PreviewFrame, device_preset};
pub use html::{EMPTY_PAGE_MESSAGE, HtmlRenderer, css_color, css_property, escape_html};
pub use renderer::{
    CanvasHit, GridStyle, RenderContext, RenderMode, RenderResult, Renderer, RendererError, dispatch_pointer_down, hit_test,
};
