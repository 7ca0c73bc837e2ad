//! Services layer - business operations and utilities.
//!
//! This module contains business logic and operations:
//! - Project persistence
//! - The AI capability and credential boundary
//! - Document export
//! - Text operations

pub mod ai;
pub mod export;
pub mod projects;
pub mod text_ops;
