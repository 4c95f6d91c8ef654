//! NutriTrack Shared Library
//!
//! Domain models, the metabolic-budget calculator, update payload types,
//! and input validation shared by the engine and WASM crates.

pub mod metabolic;
pub mod models;
pub mod types;
pub mod validation;

// Re-export commonly used items at the crate root
pub use metabolic::*;
pub use models::*;
pub use types::*;
