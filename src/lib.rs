//! Orrery - Interactive Planetary System
//!
//! A library crate providing the scene registry, focus and camera state
//! machines, and the Bevy plugins that drive them.

pub mod camera;
pub mod config;
pub mod content;
pub mod data;
pub mod error;
pub mod focus;
pub mod input;
pub mod orrery;
pub mod render;
pub mod scene;
pub mod types;
pub mod ui;

#[cfg(test)]
pub mod test_utils;
