use crate::config::ViewerConfig;
use crate::error::{Result, ViewerError};
use crate::math::Mat4;
use log::{debug, warn};

/// Camera state: window size and zoom distance, plus the combined
/// projection x view-translation matrix derived from them.
///
/// The matrix is recomputed eagerly on every change, so
/// [`ViewState::current_matrix`] is always a plain read.
#[derive(Debug, Clone)]
pub struct ViewState {
    config: ViewerConfig,
    width: u32,
    height: u32,
    /// Camera distance along the view axis
    z: f32,
    matrix: Mat4,
}

impl ViewState {
    /// Builds the camera for a `width` x `height` window. Fails on a config
    /// that does not pass [`ViewerConfig::validate`] or on a zero dimension.
    pub fn new(config: &ViewerConfig, width: u32, height: u32) -> Result<Self> {
        config.validate()?;
        check_size(width, height)?;
        let mut view = ViewState {
            config: *config,
            width,
            height,
            z: config.start_z(),
            matrix: Mat4::IDENTITY,
        };
        view.recalc();
        Ok(view)
    }

    /// Stores a new window size. A zero dimension is rejected and leaves the
    /// state untouched.
    pub fn set_window_size(&mut self, width: u32, height: u32) -> Result<()> {
        if let Err(err) = check_size(width, height) {
            warn!("ignoring window size {width}x{height}");
            return Err(err);
        }
        self.width = width;
        self.height = height;
        self.recalc();
        Ok(())
    }

    /// Moves the camera one step farther away, up to `zoom_max`.
    /// Returns whether the distance changed.
    pub fn zoom_in(&mut self) -> bool {
        let next = (self.z + self.config.zoom_step).min(self.config.zoom_max);
        self.set_z(next)
    }

    /// Moves the camera one step closer, down to `zoom_min`.
    /// Returns whether the distance changed.
    pub fn zoom_out(&mut self) -> bool {
        let next = (self.z - self.config.zoom_step).max(self.config.zoom_min);
        self.set_z(next)
    }

    fn set_z(&mut self, next: f32) -> bool {
        if next == self.z {
            return false;
        }
        self.z = next;
        debug!("camera distance now {:.2}", self.z);
        self.recalc();
        true
    }

    fn recalc(&mut self) {
        let frustum = Mat4::frustum(
            self.config.fov,
            self.aspect_ratio(),
            self.config.near,
            self.config.far,
        );
        let translate = Mat4::translate(0.0, 0.0, self.z);
        self.matrix = Mat4::multiply(&frustum, &translate);
    }

    /// The most recently computed projection x view matrix
    pub fn current_matrix(&self) -> Mat4 {
        self.matrix
    }

    pub fn z(&self) -> f32 {
        self.z
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn aspect_ratio(&self) -> f32 {
        self.width as f32 / self.height as f32
    }
}

fn check_size(width: u32, height: u32) -> Result<()> {
    if width == 0 || height == 0 {
        return Err(ViewerError::InvalidWindowSize { width, height });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn view() -> ViewState {
        ViewState::new(&ViewerConfig::default(), 800, 600).unwrap()
    }

    #[test]
    fn starts_at_initial_distance() {
        let view = view();
        assert_eq!(view.z(), 2.0);
        assert!((view.aspect_ratio() - 800.0 / 600.0).abs() < 1e-6);
    }

    #[test]
    fn zoom_in_saturates_at_max() {
        let mut view = view();
        for _ in 0..100 {
            view.zoom_in();
        }
        assert_eq!(view.z(), 5.0);
        let before = view.current_matrix();
        assert!(!view.zoom_in());
        assert_eq!(view.z(), 5.0);
        assert_eq!(view.current_matrix(), before);
    }

    #[test]
    fn zoom_out_saturates_at_min() {
        let mut view = view();
        for _ in 0..100 {
            view.zoom_out();
        }
        assert_eq!(view.z(), 1.5);
        assert!(!view.zoom_out());
        assert_eq!(view.z(), 1.5);
    }

    #[test]
    fn zoom_step_moves_by_configured_amount() {
        let mut view = view();
        assert!(view.zoom_in());
        assert!((view.z() - 2.1).abs() < 1e-6);
        assert!(view.zoom_out());
        assert!(view.zoom_out());
        assert!((view.z() - 1.9).abs() < 1e-6);
    }

    #[test]
    fn zoom_recomputes_translation() {
        let mut view = view();
        let before = view.current_matrix();
        view.zoom_in();
        assert_ne!(view.current_matrix(), before);
        // W picks up the camera distance directly
        assert!((view.current_matrix().get(3, 3) - view.z()).abs() < 1e-6);
    }

    #[test]
    fn resize_updates_aspect() {
        let mut view = view();
        view.set_window_size(400, 400).unwrap();
        assert_eq!(view.aspect_ratio(), 1.0);
        let m = view.current_matrix();
        assert!((m.get(0, 0) - m.get(1, 1)).abs() < 1e-6);
    }

    #[test]
    fn zero_size_is_rejected_and_ignored() {
        let mut view = view();
        let before = view.current_matrix();
        assert!(matches!(
            view.set_window_size(800, 0),
            Err(ViewerError::InvalidWindowSize { width: 800, height: 0 })
        ));
        assert!(view.set_window_size(0, 600).is_err());
        assert_eq!(view.current_matrix(), before);
        assert_eq!((view.width(), view.height()), (800, 600));
        assert!(ViewState::new(&ViewerConfig::default(), 0, 0).is_err());
    }

    #[test]
    fn inverted_zoom_range_is_rejected() {
        let config = ViewerConfig {
            zoom_min: 5.0,
            zoom_max: 1.5,
            ..Default::default()
        };
        assert!(matches!(
            ViewState::new(&config, 800, 600),
            Err(ViewerError::Config(_))
        ));
    }

    #[test]
    fn coincident_clip_planes_are_rejected() {
        let config = ViewerConfig {
            far: 0.5,
            ..Default::default()
        };
        assert!(matches!(
            ViewState::new(&config, 800, 600),
            Err(ViewerError::Config(_))
        ));
    }

    #[test]
    fn starts_inside_a_narrowed_zoom_range() {
        let config = ViewerConfig {
            zoom_min: 3.0,
            ..Default::default()
        };
        let view = ViewState::new(&config, 800, 600).unwrap();
        assert_eq!(view.z(), 3.0);
        assert!(view.current_matrix().as_array().iter().all(|c| c.is_finite()));
    }
}
