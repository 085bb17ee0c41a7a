//! Sitecraft Core Library
//!
//! Platform-agnostic data structures and editing logic for the Sitecraft
//! page builder: elements and their store, alignment snapping, the
//! drag/resize controller, undo/redo history and the editor session.

pub mod autosave;
pub mod clock;
pub mod config;
pub mod document;
pub mod element;
pub mod history;
pub mod inspector;
pub mod interaction;
pub mod palette;
pub mod project;
pub mod session;
pub mod shortcuts;
pub mod snap;
pub mod store;

pub use autosave::{AutoSave, format_time_since};
pub use config::{ConfigError, EditorConfig};
pub use document::{DocumentError, SiteDocument};
pub use element::{Bounds, BoundsPatch, Element, ElementContent, ElementId, ElementKind, ElementUpdate, NewElement, StyleMap};
pub use history::{Action, ActionKind, ActionPayload, History};
pub use interaction::{CanvasSurface, InteractionState, ResizeDirection, ResizeHandle, resize_handles};
pub use project::{Page, PageId, Project, ProjectId, Workspace, slugify};
pub use session::EditorSession;
pub use shortcuts::{EditorCommand, Modifiers, Shortcut, ShortcutRegistry};
pub use snap::{AlignmentGuides, GRID_SIZE, SNAP_TOLERANCE, SnapMode, SnapResult, snap_position};
pub use store::ElementStore;
