//! Client side of the catalog: list state, fetch effects and the render model.

pub mod client;
pub mod controller;
pub mod preset;
pub mod render;
pub mod state;

pub use client::*;
pub use controller::ListController;
pub use preset::Preset;
pub use render::*;
pub use state::*;
