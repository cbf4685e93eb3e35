pub mod components;
pub mod config;
pub mod error;
pub mod gesture;
pub mod model;
pub mod state;
pub mod util;
