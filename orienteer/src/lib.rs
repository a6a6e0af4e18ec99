//! Orienteer: seasonal route planning over an orienteering map.
//!
//! The binary loads a terrain image, an elevation file and a waypoint list,
//! plans a route with [`orienteer_paths::Planner`] and draws it back onto
//! the image.

pub mod config;
pub mod error;
pub mod io;
pub mod render;

pub use config::AppConfig;
pub use error::LoadError;
