use crate::error::{Result, ViewerError};
use crate::graphics::{draw_background, draw_mesh, Framebuffer, RenderMode};
use crate::input::InputEvent;
use crate::math::Vec3;
use crate::mesh;
use crate::state::Viewer;
use crate::terminal::{self, Action};
use crate::vertex::Vertex;
use crossterm::event;
use log::{info, warn};
use std::io::Write;
use std::time::{Duration, Instant};

/// Terminal cube viewer: owns the viewer state and drives the frame loop
pub struct App {
    viewer: Viewer,
    framebuffer: Framebuffer,
    cube: Vec<Vertex>,
    light_dir: Vec3,
    mode: RenderMode,
    debug: bool,
    frame_time: Duration,
    frames_since_last_update: usize,
    last_fps_calculation: Instant,
    fps: f64,
}

impl App {
    pub fn new(viewer: Viewer, light_dir: Vec3, fps: u32, mode: RenderMode) -> Self {
        let width = viewer.view().width() as usize;
        let height = viewer.view().height() as usize;
        App {
            viewer,
            framebuffer: Framebuffer::new(width, height),
            cube: mesh::cube(),
            light_dir,
            mode,
            debug: false,
            frame_time: Duration::from_secs_f64(1.0 / f64::from(fps.max(1))),
            frames_since_last_update: 0,
            last_fps_calculation: Instant::now(),
            fps: 0.0,
        }
    }

    pub fn viewer(&self) -> &Viewer {
        &self.viewer
    }

    /// Runs until the user quits. Input is handled as it arrives; a frame is
    /// drawn whenever one is due, advancing the animation exactly one step.
    pub fn run<W: Write>(&mut self, out: &mut W) -> Result<()> {
        let mut next_frame = Instant::now();

        loop {
            let now = Instant::now();
            if now >= next_frame {
                self.render(out)?;
                next_frame = (next_frame + self.frame_time).max(now);
                continue;
            }

            if event::poll(next_frame - now)? {
                let height = self.viewer.view().height();
                match terminal::translate(&event::read()?, height) {
                    Some(Action::Quit) => break,
                    Some(Action::Input(input)) => self.handle_input(input)?,
                    Some(action) => self.handle_action(action),
                    None => {}
                }
            }
        }

        info!("shutting down after angle {:.2}", self.viewer.model().angle());
        Ok(())
    }

    /// Feeds an input event to the viewer. Unusable window sizes are skipped
    /// (the viewer keeps the previous size); other errors propagate.
    pub fn handle_input(&mut self, input: InputEvent) -> Result<()> {
        match self.viewer.dispatch(input) {
            Ok(_) => Ok(()),
            Err(ViewerError::InvalidWindowSize { width, height }) => {
                warn!("keeping previous size after resize to {width}x{height}");
                Ok(())
            }
            Err(err) => Err(err),
        }
    }

    pub fn handle_action(&mut self, action: Action) {
        match action {
            Action::ToggleDebug => self.debug = !self.debug,
            Action::ToggleWireframe => {
                self.mode = match self.mode {
                    RenderMode::Solid => RenderMode::Wireframe,
                    RenderMode::Wireframe => RenderMode::Solid,
                }
            }
            Action::Input(_) | Action::Quit => {}
        }
    }

    /// Advances one frame and rasterizes it into the framebuffer
    pub fn draw(&mut self) {
        let frame = self.viewer.frame();
        let view = self.viewer.view();
        self.framebuffer
            .resize(view.width() as usize, view.height() as usize);

        draw_background(&mut self.framebuffer);
        draw_mesh(
            &mut self.framebuffer,
            &frame,
            &self.cube,
            self.light_dir,
            self.mode,
        );
    }

    fn render<W: Write>(&mut self, out: &mut W) -> Result<()> {
        // Update FPS calculation
        self.frames_since_last_update += 1;
        let now = Instant::now();
        let duration = now.duration_since(self.last_fps_calculation);
        if duration.as_secs_f64() >= 1.0 {
            self.fps = self.frames_since_last_update as f64 / duration.as_secs_f64();
            self.frames_since_last_update = 0;
            self.last_fps_calculation = now;
        }

        self.draw();
        let overlay = if self.debug { self.debug_lines() } else { Vec::new() };
        terminal::present(out, &self.framebuffer, &overlay)?;
        Ok(())
    }

    fn debug_lines(&self) -> Vec<String> {
        let model = self.viewer.model();
        let axis = model.axis().direction();
        vec![
            format!("{} {}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION")),
            format!("Angle: {:.2}", model.angle()),
            format!("Axis: ({:.2}, {:.2}, {:.2})", axis.x, axis.y, axis.z),
            format!("Zoom: {:.2}", self.viewer.view().z()),
            format!("FPS: {:.2}", self.fps),
        ]
    }

    pub fn framebuffer(&self) -> &Framebuffer {
        &self.framebuffer
    }
}
