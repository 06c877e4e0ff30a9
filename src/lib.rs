pub mod config;
pub mod error;
pub mod gesture;
pub mod layout;
pub mod model;
pub mod picker;
pub mod score;
pub mod shape;
pub mod store;
// cmd and reports belong to the binary (main.rs).
