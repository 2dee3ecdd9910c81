use clap::Parser;
use cubeview::app::App;
use cubeview::graphics::RenderMode;
use cubeview::terminal::{self, TerminalGuard};
use cubeview::{Result, Vec3, Viewer, ViewerConfig};
use log::info;
use std::io::{self, BufWriter};
use std::path::PathBuf;

/// Spinning cube in the terminal. Drag with the left button to change the
/// spin axis, scroll to zoom, `d` for debug info, `w` for wireframe, `q` to quit.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// TOML file with viewer settings; flags below override it
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Projection angle in radians
    #[arg(long)]
    fov: Option<f32>,

    /// Near clipping plane
    #[arg(long)]
    near: Option<f32>,

    /// Far clipping plane
    #[arg(long)]
    far: Option<f32>,

    /// Closest camera distance
    #[arg(long)]
    zoom_min: Option<f32>,

    /// Farthest camera distance
    #[arg(long)]
    zoom_max: Option<f32>,

    /// Camera distance change per scroll step
    #[arg(long)]
    zoom_step: Option<f32>,

    /// Starting camera distance [default: 2.0, pulled into the zoom range]
    #[arg(long)]
    initial_z: Option<f32>,

    /// Spin per frame, in radians
    #[arg(long)]
    spin_step: Option<f32>,

    /// Frames per second
    #[arg(long, default_value_t = 60, value_parser = clap::value_parser!(u32).range(1..=240))]
    fps: u32,

    /// Direction toward the light, as x,y,z
    #[arg(long, default_value = "-0.4,0.6,-1.0", value_parser = parse_light, allow_hyphen_values = true)]
    light: Vec3,

    /// Start in wireframe mode
    #[arg(short, long)]
    wireframe: bool,
}

impl Args {
    fn viewer_config(&self) -> Result<ViewerConfig> {
        let mut config = match &self.config {
            Some(path) => ViewerConfig::load(path)?,
            None => ViewerConfig::default(),
        };

        let overrides = [
            (self.fov, &mut config.fov),
            (self.near, &mut config.near),
            (self.far, &mut config.far),
            (self.zoom_min, &mut config.zoom_min),
            (self.zoom_max, &mut config.zoom_max),
            (self.zoom_step, &mut config.zoom_step),
            (self.spin_step, &mut config.spin_step),
        ];
        for (value, field) in overrides {
            if let Some(value) = value {
                *field = value;
            }
        }
        if self.initial_z.is_some() {
            config.initial_z = self.initial_z;
        }

        config.validate()?;
        Ok(config)
    }
}

fn parse_light(s: &str) -> std::result::Result<Vec3, String> {
    let parts: Vec<f32> = s
        .split(',')
        .map(|part| part.trim().parse::<f32>().map_err(|e| format!("{part:?}: {e}")))
        .collect::<std::result::Result<_, _>>()?;
    match parts.as_slice() {
        &[x, y, z] => Ok(Vec3::new(x, y, z)),
        _ => Err(format!("expected x,y,z, got {} values", parts.len())),
    }
}

/// Reads flags and settings, sizes the viewer to the terminal, and runs the
/// frame loop until the user quits.
fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let config = args.viewer_config()?;
    info!("starting with {config:?}");

    let (cols, rows) = terminal::terminal_size()?;
    let (width, height) = terminal::pixel_size(cols.max(1), rows.max(1));
    let viewer = Viewer::new(config, width, height)?;

    let mode = if args.wireframe {
        RenderMode::Wireframe
    } else {
        RenderMode::Solid
    };
    let mut app = App::new(viewer, args.light, args.fps, mode);

    let _guard = TerminalGuard::enter()?;
    let mut out = BufWriter::new(io::stdout());
    app.run(&mut out)
}
