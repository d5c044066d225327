use std::{
    fmt::Display,
    path::PathBuf,
    time::{Duration, Instant},
};

use clap::{value_parser, Arg, ArgAction, ArgMatches, Command};

pub mod core;
pub mod error;
pub mod pipeline;
pub mod renderers;

pub use core::geometry::{Shape, ShapeKind};
pub use core::projection::{Projection, ProjectionKind};
pub use error::{RenderError, Result};
pub use pipeline::{Canvas, Pipeline, RenderMode};

pub const DEFAULT_FPS: u32 = 30;
pub const DEFAULT_LOG_FILE: &str = "shape_renderer.log";

/// Everything the command line decides.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderConfig {
    pub shape: ShapeKind,
    pub fps: u32,
    pub projection: ProjectionKind,
    pub mode: RenderMode,
    pub screensaver: bool,
    pub log_file: PathBuf,
    pub verbose: bool,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            shape: ShapeKind::Cube,
            fps: DEFAULT_FPS,
            projection: ProjectionKind::default(),
            mode: RenderMode::default(),
            screensaver: false,
            log_file: PathBuf::from(DEFAULT_LOG_FILE),
            verbose: false,
        }
    }
}

/// Frame timing, summarized roughly once a second.
pub struct Metrics {
    pub frame_time: Duration,
    pub fps_counter: u32,
    pub fps_update_timer: Instant,
    pub current_fps: f32,
    pub frame_times: Vec<f32>,
}

impl Metrics {
    pub fn new(frame_time: Duration) -> Self {
        Self {
            frame_time,
            fps_counter: 0,
            fps_update_timer: Instant::now(),
            current_fps: 0.0,
            frame_times: Vec::with_capacity(120),
        }
    }

    /// Records one frame's work time. Returns a summary line when a second
    /// has passed since the last one, then starts a new window.
    pub fn update(&mut self, frame_delta: Duration, now: Instant) -> Option<String> {
        self.fps_counter += 1;
        self.frame_times.push(frame_delta.as_secs_f32() * 1000.0);

        let elapsed = now.saturating_duration_since(self.fps_update_timer);
        if elapsed < Duration::from_secs(1) {
            return None;
        }
        self.current_fps = self.fps_counter as f32 / elapsed.as_secs_f32();
        let summary = self.to_string();
        self.fps_counter = 0;
        self.frame_times.clear();
        self.fps_update_timer = now;
        Some(summary)
    }

    fn average(&self) -> f32 {
        if self.frame_times.is_empty() {
            return 0.0;
        }
        self.frame_times.iter().sum::<f32>() / self.frame_times.len() as f32
    }
}

impl Display for Metrics {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "FPS: {:.2} (target {:.2}) | Avg: {:.2}ms | Min: {:.2}ms | Max: {:.2}ms",
            self.current_fps,
            1.0 / self.frame_time.as_secs_f32(),
            self.average(),
            self.frame_times
                .iter()
                .copied()
                .reduce(f32::min)
                .unwrap_or(0.0),
            self.frame_times
                .iter()
                .copied()
                .reduce(f32::max)
                .unwrap_or(0.0)
        )
    }
}

pub fn create_clap_command() -> Command {
    Command::new("shape_renderer")
        .about("Spinning 3D shapes drawn with ASCII characters in the terminal")
        .version(env!("CARGO_PKG_VERSION"))
        .arg(
            Arg::new("shape")
                .long("shape")
                .value_name("SHAPE")
                .help("Shape to render")
                .default_value("cube")
                .value_parser(ShapeKind::NAMES),
        )
        .arg(
            Arg::new("fps")
                .long("fps")
                .value_name("FPS")
                .help("Frames per second")
                .default_value("30")
                .value_parser(value_parser!(u32).range(1..)),
        )
        .arg(
            Arg::new("projection")
                .long("projection")
                .value_name("PROJECTION")
                .help("Projection: 'o' for orthographic, 'p' for perspective")
                .default_value("p")
                .value_parser(ProjectionKind::NAMES),
        )
        .arg(
            Arg::new("mode")
                .long("mode")
                .value_name("MODE")
                .help("Draw edges ('wireframe') or shaded faces ('solid')")
                .default_value("wireframe")
                .value_parser(RenderMode::NAMES),
        )
        .arg(
            Arg::new("screensaver")
                .long("screensaver")
                .help("Cycle through every shape, switching every few seconds")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("log-file")
                .long("log-file")
                .value_name("FILE")
                .help("Where log output is written")
                .default_value(DEFAULT_LOG_FILE)
                .value_parser(value_parser!(PathBuf)),
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .help("Log per-frame timing")
                .action(ArgAction::SetTrue),
        )
}

pub fn handle_clap_matches(matches: &ArgMatches) -> Result<RenderConfig> {
    let defaults = RenderConfig::default();

    let shape = match matches.get_one::<String>("shape") {
        Some(name) => name.parse()?,
        None => defaults.shape,
    };
    // `--fps` is range-checked by its value parser.
    let fps = matches.get_one::<u32>("fps").copied().unwrap_or(defaults.fps);
    let projection = match matches.get_one::<String>("projection") {
        Some(name) => name.parse()?,
        None => defaults.projection,
    };
    let mode = match matches.get_one::<String>("mode") {
        Some(name) => name.parse()?,
        None => defaults.mode,
    };
    let log_file = matches
        .get_one::<PathBuf>("log-file")
        .cloned()
        .unwrap_or(defaults.log_file);

    Ok(RenderConfig {
        shape,
        fps,
        projection,
        mode,
        screensaver: matches.get_flag("screensaver"),
        log_file,
        verbose: matches.get_flag("verbose"),
    })
}
