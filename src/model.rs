use crate::config::ViewerConfig;
use crate::math::{Axis, Mat4, Vec3};
use log::debug;
use std::f64::consts::TAU;

/// Cube orientation: a spin clock advanced once per frame, and a spin axis
/// set by drag gestures.
#[derive(Debug, Clone)]
pub struct ModelState {
    spin_step: f32,
    /// Accumulated spin; kept in f64 so small steps still register after
    /// hours of frames
    angle: f64,
    axis: Axis,
    matrix: Mat4,
    /// Press point of the active drag, if any
    pan_anchor: Option<(i32, i32)>,
}

impl ModelState {
    pub fn new(config: &ViewerConfig) -> Self {
        ModelState {
            spin_step: config.spin_step,
            angle: 0.0,
            axis: Axis::Y,
            matrix: Mat4::IDENTITY,
            pan_anchor: None,
        }
    }

    /// Begins a drag at `(x, y)` (bottom-left origin). Ignored while another
    /// drag is active.
    pub fn on_pan_start(&mut self, x: i32, y: i32) -> bool {
        if self.pan_anchor.is_some() {
            return false;
        }
        self.pan_anchor = Some((x, y));
        true
    }

    /// Points the spin axis perpendicular to the drag from the anchor to
    /// `(x, y)`. The anchor stays fixed for the whole gesture.
    ///
    /// A pointer back on the anchor has no direction to offer, so the
    /// previous axis is kept.
    pub fn on_pan_move(&mut self, x: i32, y: i32) -> bool {
        let Some((anchor_x, anchor_y)) = self.pan_anchor else {
            return false;
        };
        let dx = anchor_x.saturating_sub(x) as f32;
        let dy = anchor_y.saturating_sub(y) as f32;

        match Axis::new(Vec3::new(dy, -dx, 0.0)) {
            Some(axis) => {
                self.axis = axis;
                debug!("spin axis now {:?}", axis.direction());
                true
            }
            None => false,
        }
    }

    /// Ends the active drag; the cube keeps spinning around the last axis.
    pub fn on_pan_end(&mut self) -> bool {
        self.pan_anchor.take().is_some()
    }

    /// Advances the spin by one frame and rebuilds the model matrix.
    pub fn tick(&mut self) {
        self.angle += f64::from(self.spin_step);
        self.matrix = Mat4::rotate(self.axis, (self.angle % TAU) as f32);
    }

    /// The rotation matrix computed by the last [`ModelState::tick`]
    pub fn current_matrix(&self) -> Mat4 {
        self.matrix
    }

    /// Total spin since startup, in radians. Not wrapped.
    pub fn angle(&self) -> f64 {
        self.angle
    }

    pub fn axis(&self) -> Axis {
        self.axis
    }

    pub fn is_panning(&self) -> bool {
        self.pan_anchor.is_some()
    }
}
