use crate::config::ViewerConfig;
use crate::error::Result;
use crate::input::{InputEvent, StateChange};
use crate::math::Mat4;
use crate::model::ModelState;
use crate::view::ViewState;

/// The two matrices the render step needs for one frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Frame {
    /// Projection x view translation
    pub view: Mat4,
    /// Cube rotation
    pub model: Mat4,
}

/// Viewer state: camera and cube orientation, driven by input events and
/// the per-frame tick.
#[derive(Debug, Clone)]
pub struct Viewer {
    view: ViewState,
    model: ModelState,
}

impl Viewer {
    /// Creates a viewer for a `width` x `height` drawable area.
    ///
    /// The config is validated first, so every later matrix is built from
    /// usable projection parameters.
    pub fn new(config: ViewerConfig, width: u32, height: u32) -> Result<Self> {
        config.validate()?;
        Ok(Viewer {
            view: ViewState::new(&config, width, height)?,
            model: ModelState::new(&config),
        })
    }

    /// Applies one input event.
    ///
    /// Only a resize can fail; on failure the state is unchanged.
    pub fn dispatch(&mut self, event: InputEvent) -> Result<StateChange> {
        let change = match event {
            InputEvent::PointerDown { x, y } => {
                StateChange::from_flag(self.model.on_pan_start(x, y), StateChange::PanStarted)
            }
            InputEvent::PointerMove { x, y } => {
                StateChange::from_flag(self.model.on_pan_move(x, y), StateChange::AxisChanged)
            }
            InputEvent::PointerUp => {
                StateChange::from_flag(self.model.on_pan_end(), StateChange::PanEnded)
            }
            // Wheel away brings the camera closer
            InputEvent::ScrollUp => {
                StateChange::from_flag(self.view.zoom_out(), StateChange::ViewChanged)
            }
            InputEvent::ScrollDown => {
                StateChange::from_flag(self.view.zoom_in(), StateChange::ViewChanged)
            }
            InputEvent::Resize { width, height } => {
                self.view.set_window_size(width, height)?;
                StateChange::ViewChanged
            }
        };
        Ok(change)
    }

    /// Advances the animation by exactly one step and returns the matrices to
    /// draw with. Call once per rendered frame.
    pub fn frame(&mut self) -> Frame {
        self.model.tick();
        self.current_frame()
    }

    /// The current matrices, without advancing the animation
    pub fn current_frame(&self) -> Frame {
        Frame {
            view: self.view.current_matrix(),
            model: self.model.current_matrix(),
        }
    }

    pub fn view(&self) -> &ViewState {
        &self.view
    }

    pub fn model(&self) -> &ModelState {
        &self.model
    }
}
