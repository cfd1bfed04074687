//! Resource lookup
//!
//! Asset formats are not handled here; the engine only knows where
//! resources live.

pub mod resource_manager;

pub use resource_manager::ResourceManager;
