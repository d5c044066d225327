use std::io::Write;
use std::time::{Duration, Instant};

use log::{debug, info};

use crate::core::geometry::{Shape, ShapeKind};
use crate::core::light::ShadingModel;
use crate::core::transform::{RotationState, ROTATION_STEP};
use crate::error::Result;
use crate::pipeline::{Canvas, Pipeline, RenderMode};
use crate::RenderConfig;

pub const CANVAS_WIDTH: usize = 80;
pub const CANVAS_HEIGHT: usize = 40;
pub const BACKGROUND: char = ' ';

/// How long each shape stays on screen in screensaver mode.
pub const SHAPE_DURATION: Duration = Duration::from_secs(5);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DriverState {
    Initializing,
    Running,
    ShapeSwitch,
    ShuttingDown,
}

/// Screensaver rotation through a fixed list of shapes.
#[derive(Debug, Clone)]
pub struct ShapeCycle {
    shapes: Vec<ShapeKind>,
    position: usize,
}

impl ShapeCycle {
    /// Every shape in [`ShapeKind::CYCLE`] that `mode` can draw.
    pub fn for_mode(mode: RenderMode) -> Self {
        let shapes = ShapeKind::CYCLE
            .into_iter()
            .filter(|kind| mode == RenderMode::Wireframe || kind.has_faces())
            .collect();
        Self {
            shapes,
            position: 0,
        }
    }

    pub fn current(&self) -> ShapeKind {
        self.shapes[self.position]
    }

    pub fn advance(&mut self) -> ShapeKind {
        self.position = (self.position + 1) % self.shapes.len();
        self.current()
    }

    pub fn shapes(&self) -> &[ShapeKind] {
        &self.shapes
    }
}

/// Owns everything a frame touches: the canvas, the current shape, the
/// rotation angles and the screensaver timer.
///
/// The engine does no terminal setup and never sleeps; the caller feeds it
/// timestamps and an output sink, which keeps a frame reproducible.
pub struct Engine {
    state: DriverState,
    canvas: Canvas,
    pipeline: Pipeline,
    shape: Shape,
    rotation: RotationState,
    cycle: Option<ShapeCycle>,
    last_switch: Instant,
    frame_time: Duration,
    frames: u64,
}

impl Engine {
    /// Builds the canvas and the first shape. Fails before any frame is drawn
    /// when the configuration cannot be rendered.
    pub fn new(config: &RenderConfig, now: Instant) -> Result<Self> {
        debug!("engine state: {:?}", DriverState::Initializing);

        let canvas = Canvas::new(CANVAS_WIDTH, CANVAS_HEIGHT, BACKGROUND);
        let projection = config
            .projection
            .for_canvas(canvas.width(), canvas.height());
        let pipeline = Pipeline::new(projection, config.mode, ShadingModel::default());

        let cycle = config.screensaver.then(|| ShapeCycle::for_mode(config.mode));
        let kind = cycle.as_ref().map_or(config.shape, ShapeCycle::current);
        let shape = Self::instantiate(kind, &pipeline)?;

        info!(
            "rendering {} ({} projection, {} mode, {} fps{})",
            shape,
            config.projection,
            config.mode,
            config.fps,
            if cycle.is_some() { ", screensaver" } else { "" }
        );

        Ok(Self {
            state: DriverState::Running,
            canvas,
            pipeline,
            shape,
            rotation: RotationState::zero(),
            cycle,
            last_switch: now,
            frame_time: Duration::from_secs_f64(1.0 / f64::from(config.fps)),
            frames: 0,
        })
    }

    fn instantiate(kind: ShapeKind, pipeline: &Pipeline) -> Result<Shape> {
        let shape = kind.build();
        shape.validate()?;
        pipeline.check_shape(&shape)?;
        Ok(shape)
    }

    pub fn state(&self) -> DriverState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        self.state != DriverState::ShuttingDown
    }

    pub fn canvas(&self) -> &Canvas {
        &self.canvas
    }

    pub fn shape(&self) -> &Shape {
        &self.shape
    }

    pub fn rotation(&self) -> RotationState {
        self.rotation
    }

    /// Pause between frames, `1 / fps`.
    pub fn frame_time(&self) -> Duration {
        self.frame_time
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Sets the cancellation flag; the next step does nothing.
    pub fn request_shutdown(&mut self) {
        if self.state != DriverState::ShuttingDown {
            info!("shutdown requested after {} frames", self.frames);
            self.state = DriverState::ShuttingDown;
        }
    }

    /// Clears the canvas, switches shape if the screensaver timer ran out and
    /// draws the current shape at the current angles.
    pub fn update(&mut self, now: Instant) -> Result<()> {
        if !self.is_running() {
            return Ok(());
        }

        self.canvas.clear();

        if self.switch_due(now) {
            self.state = DriverState::ShapeSwitch;
            self.switch_shape(now)?;
        }
        self.state = DriverState::Running;

        self.pipeline
            .render(&self.shape, &self.rotation, &mut self.canvas)
    }

    fn switch_due(&self, now: Instant) -> bool {
        self.cycle.is_some() && now.saturating_duration_since(self.last_switch) >= SHAPE_DURATION
    }

    fn switch_shape(&mut self, now: Instant) -> Result<()> {
        if let Some(cycle) = self.cycle.as_mut() {
            let kind = cycle.advance();
            self.shape = Self::instantiate(kind, &self.pipeline)?;
            info!("screensaver switched to {}", self.shape);
        }
        self.last_switch = now;
        Ok(())
    }

    /// Advances the angles by one frame's step. Rotation speed is tied to the
    /// frame count, not to wall-clock time.
    pub fn advance(&mut self) {
        self.rotation.advance(ROTATION_STEP);
        self.frames += 1;
    }

    /// One full frame: update, present to `out`, advance.
    pub fn step<W: Write>(&mut self, now: Instant, out: &mut W) -> Result<()> {
        if !self.is_running() {
            return Ok(());
        }
        self.update(now)?;
        self.canvas.present(out)?;
        self.advance();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::projection::ProjectionKind;
    use crate::error::RenderError;

    fn config() -> RenderConfig {
        RenderConfig::default()
    }

    #[test]
    fn starts_running_with_requested_shape() {
        let config = RenderConfig {
            shape: ShapeKind::Donut,
            ..config()
        };
        let engine = Engine::new(&config, Instant::now()).unwrap();
        assert_eq!(engine.state(), DriverState::Running);
        assert_eq!(engine.shape().name(), "donut");
        assert_eq!(engine.canvas().width(), 80);
        assert_eq!(engine.canvas().height(), 40);
        assert_eq!(engine.frame_time(), Duration::from_secs_f64(1.0 / 30.0));
    }

    #[test]
    fn solid_faceless_shape_fails_before_first_frame() {
        let config = RenderConfig {
            shape: ShapeKind::Octahedron,
            mode: RenderMode::Solid,
            ..config()
        };
        let err = Engine::new(&config, Instant::now()).err().unwrap();
        assert!(matches!(err, RenderError::MissingFaces { shape: "octahedron" }));
    }

    #[test]
    fn step_draws_presents_and_advances() {
        let mut engine = Engine::new(&config(), Instant::now()).unwrap();
        let mut out = Vec::new();
        engine.step(Instant::now(), &mut out).unwrap();

        assert_eq!(engine.frames(), 1);
        assert_eq!(engine.rotation(), RotationState::new(0.03, 0.02, 0.01));
        assert!(engine.canvas().painted().count() > 0);
        let text = String::from_utf8(out).unwrap();
        assert!(text.starts_with("\x1B[?25l\x1B[2J\x1B[H"));
        assert!(text.contains('&'));
    }

    #[test]
    fn each_frame_starts_from_a_clear_canvas() {
        let config = RenderConfig {
            projection: ProjectionKind::Orthographic,
            ..config()
        };
        let now = Instant::now();
        let mut engine = Engine::new(&config, now).unwrap();
        let mut reference = Engine::new(&config, now).unwrap();

        let mut sink = Vec::new();
        for _ in 0..20 {
            engine.step(now, &mut sink).unwrap();
        }
        // Rotate the reference to the same angles without drawing the
        // intermediate frames.
        for _ in 0..20 {
            reference.advance();
        }
        engine.update(now).unwrap();
        reference.update(now).unwrap();
        assert_eq!(engine.canvas(), reference.canvas());
    }

    #[test]
    fn screensaver_switches_after_duration() {
        let config = RenderConfig {
            screensaver: true,
            shape: ShapeKind::Donut,
            ..config()
        };
        let start = Instant::now();
        let mut engine = Engine::new(&config, start).unwrap();
        assert_eq!(engine.shape().name(), "cube");

        engine.update(start + Duration::from_millis(4999)).unwrap();
        assert_eq!(engine.shape().name(), "cube");

        engine.update(start + SHAPE_DURATION).unwrap();
        assert_eq!(engine.shape().name(), "pyramid");
        assert_eq!(engine.state(), DriverState::Running);

        // Timer restarts at the switch.
        engine.update(start + SHAPE_DURATION + Duration::from_secs(4)).unwrap();
        assert_eq!(engine.shape().name(), "pyramid");
        engine.update(start + SHAPE_DURATION * 2).unwrap();
        assert_eq!(engine.shape().name(), "tetrahedron");
    }

    #[test]
    fn screensaver_keeps_rotation_running() {
        let config = RenderConfig {
            screensaver: true,
            ..config()
        };
        let start = Instant::now();
        let mut engine = Engine::new(&config, start).unwrap();
        let mut sink = Vec::new();
        engine.step(start, &mut sink).unwrap();
        engine.step(start + SHAPE_DURATION, &mut sink).unwrap();
        assert_eq!(engine.shape().name(), "pyramid");
        assert_eq!(engine.frames(), 2);
        assert!((engine.rotation().x - 0.06).abs() < 1e-6);
    }

    #[test]
    fn solid_screensaver_skips_faceless_shapes() {
        let cycle = ShapeCycle::for_mode(RenderMode::Solid);
        assert_eq!(
            cycle.shapes(),
            &[ShapeKind::Cube, ShapeKind::Sphere, ShapeKind::Donut, ShapeKind::Figure8]
        );

        let config = RenderConfig {
            screensaver: true,
            mode: RenderMode::Solid,
            ..config()
        };
        let start = Instant::now();
        let mut engine = Engine::new(&config, start).unwrap();
        for (i, expected) in ["sphere", "donut", "figure8", "cube"].iter().enumerate() {
            engine.update(start + SHAPE_DURATION * (i as u32 + 1)).unwrap();
            assert_eq!(engine.shape().name(), *expected);
        }
    }

    #[test]
    fn wireframe_cycle_visits_every_shape() {
        let mut cycle = ShapeCycle::for_mode(RenderMode::Wireframe);
        assert_eq!(cycle.current(), ShapeKind::Cube);
        let visited: Vec<_> = (0..7).map(|_| cycle.advance()).collect();
        assert_eq!(visited.last(), Some(&ShapeKind::Cube));
        for kind in ShapeKind::CYCLE {
            assert!(visited.contains(&kind));
        }
    }

    #[test]
    fn shutdown_stops_stepping() {
        let mut engine = Engine::new(&config(), Instant::now()).unwrap();
        engine.request_shutdown();
        assert_eq!(engine.state(), DriverState::ShuttingDown);
        assert!(!engine.is_running());

        let mut out = Vec::new();
        engine.step(Instant::now(), &mut out).unwrap();
        assert!(out.is_empty());
        assert_eq!(engine.frames(), 0);
    }
}
