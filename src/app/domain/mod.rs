//! Domain layer - core data structures and types.
//!
//! This module contains the fundamental domain models:
//! - Page layout settings and derived paper metrics
//! - The fixed document template catalog
//! - Saved project records

pub mod layout;
pub mod project;
pub mod template;

pub use layout::{
    FontFamily, FontSizeKind, MarginSide, Margins, NumberPosition, Orientation,
    PageFormat, PageNumbering, PageSettings, PaperSize,
};
pub use project::SavedProject;
pub use template::{DocumentTemplate, predefined_templates};
