//! Foundation module - Core utilities and types
//!
//! This module provides fundamental utilities used throughout the engine:
//! - Arena handles for entities and components
//! - Frame timing
//! - Logging utilities

pub mod collections;
pub mod time;
pub mod logging;
