//! Interactive spinning-cube viewer.
//!
//! The core is a small camera/model state machine over column-major 4x4
//! matrices: [`state::Viewer`] takes host-agnostic [`input::InputEvent`]s and
//! produces a [`state::Frame`] of view and model matrices once per rendered
//! frame. The [`graphics`] and [`terminal`] modules draw those frames in a
//! terminal.

pub mod app;
pub mod config;
pub mod error;
pub mod graphics;
pub mod input;
pub mod math;
pub mod mesh;
pub mod model;
pub mod state;
pub mod terminal;
pub mod vertex;
pub mod view;

pub use config::ViewerConfig;
pub use error::{Result, ViewerError};
pub use input::{InputEvent, StateChange};
pub use math::{Axis, Mat4, Vec3};
pub use state::{Frame, Viewer};
