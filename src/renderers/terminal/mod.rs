use crossterm::{
    cursor::{Hide, Show},
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{
        disable_raw_mode, enable_raw_mode, Clear, ClearType, EnterAlternateScreen,
        LeaveAlternateScreen,
    },
};
use log::{debug, error, info};
use signal_hook::{consts::TERM_SIGNALS, flag};
use std::io::{self, stdout, Write};
use std::panic;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

mod engine;
pub use engine::{
    DriverState, Engine, ShapeCycle, BACKGROUND, CANVAS_HEIGHT, CANVAS_WIDTH, SHAPE_DURATION,
};

use crate::error::Result;
use crate::{Metrics, RenderConfig};

/// Set while raw mode and the alternate screen are active. Restoring swaps it
/// back, so the panic hook and `Drop` never restore twice.
static TERMINAL_ACTIVE: AtomicBool = AtomicBool::new(false);

/// Longest the frame wait blocks before looking at the signal flag again.
const SIGNAL_CHECK_INTERVAL: Duration = Duration::from_millis(50);

/// Latches termination signals (SIGINT, SIGTERM, SIGQUIT, and SIGHUP on Unix)
/// into a flag the frame loop polls, so the terminal is restored by the
/// normal shutdown path instead of the process dying mid-frame.
#[derive(Debug, Clone, Default)]
pub struct ShutdownSignal {
    raised: Arc<AtomicBool>,
}

impl ShutdownSignal {
    /// A flag with no signal handlers attached.
    pub fn new() -> Self {
        Self::default()
    }

    /// Installs the handlers. They stay installed for the life of the process.
    pub fn register() -> io::Result<Self> {
        let signal = Self::new();
        for &sig in TERM_SIGNALS {
            flag::register(sig, Arc::clone(&signal.raised))?;
        }
        #[cfg(unix)]
        flag::register(signal_hook::consts::SIGHUP, Arc::clone(&signal.raised))?;
        Ok(signal)
    }

    pub fn raise(&self) {
        self.raised.store(true, Ordering::SeqCst);
    }

    pub fn is_raised(&self) -> bool {
        self.raised.load(Ordering::SeqCst)
    }
}

/// Raw mode, hidden cursor and the alternate screen for as long as the value
/// lives.
pub struct TerminalSession {
    _private: (),
}

impl TerminalSession {
    pub fn start() -> io::Result<Self> {
        install_panic_hook();

        enable_raw_mode()?;
        TERMINAL_ACTIVE.store(true, Ordering::SeqCst);
        let session = Self { _private: () };
        execute!(stdout(), EnterAlternateScreen, Hide, Clear(ClearType::All))?;
        debug!("terminal session started");
        Ok(session)
    }
}

impl Drop for TerminalSession {
    fn drop(&mut self) {
        if let Err(e) = restore_terminal() {
            error!("failed to restore terminal: {e}");
        }
    }
}

fn install_panic_hook() {
    let original_hook = panic::take_hook();
    panic::set_hook(Box::new(move |panic_info| {
        if let Err(e) = restore_terminal() {
            eprintln!("Failed to cleanup terminal: {}", e);
        }
        error!("panic occurred: {panic_info}");
        original_hook(panic_info);
    }));
}

/// Puts the terminal back the way it was found. Does nothing when no session
/// is active.
pub fn restore_terminal() -> io::Result<()> {
    let restored = restore_once(&TERMINAL_ACTIVE, || {
        execute!(stdout(), Clear(ClearType::All), Show, LeaveAlternateScreen)?;
        disable_raw_mode()
    })?;
    if restored {
        debug!("terminal restored");
    }
    Ok(())
}

/// Runs `restore` only if `active` was set, clearing it first. Returns whether
/// `restore` ran.
fn restore_once(active: &AtomicBool, restore: impl FnOnce() -> io::Result<()>) -> io::Result<bool> {
    if !active.swap(false, Ordering::SeqCst) {
        return Ok(false);
    }
    restore()?;
    Ok(true)
}

/// Ctrl+C arrives as a key event in raw mode, so it is handled here along
/// with `q` and `Esc`.
pub fn is_interrupt(key: &KeyEvent) -> bool {
    if key.kind != KeyEventKind::Press {
        return false;
    }
    match key.code {
        KeyCode::Char('c') | KeyCode::Char('C') => key.modifiers.contains(KeyModifiers::CONTROL),
        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => true,
        _ => false,
    }
}

/// Waits until `deadline`, returning early with `true` if an interrupt key
/// was pressed. Also returns early, with `false`, once `signal` is raised.
fn wait_for_interrupt(deadline: Instant, signal: &ShutdownSignal) -> io::Result<bool> {
    loop {
        if signal.is_raised() {
            return Ok(false);
        }
        let remaining = deadline.saturating_duration_since(Instant::now());
        if !event::poll(remaining.min(SIGNAL_CHECK_INTERVAL))? {
            if remaining <= SIGNAL_CHECK_INTERVAL {
                return Ok(false);
            }
            continue;
        }
        if let Event::Key(key) = event::read()? {
            if is_interrupt(&key) {
                return Ok(true);
            }
        }
        if remaining.is_zero() {
            return Ok(false);
        }
    }
}

/// Moves the engine to shutdown if an interrupt key was pressed or a
/// termination signal arrived. Returns whether the loop should stop.
fn check_shutdown(engine: &mut Engine, key_interrupt: bool, signal: &ShutdownSignal) -> bool {
    if key_interrupt {
        info!("interrupt key pressed");
        engine.request_shutdown();
    } else if signal.is_raised() {
        info!("termination signal received");
        engine.request_shutdown();
    }
    !engine.is_running()
}

/// Runs the animation until an interrupt key is pressed or a termination
/// signal arrives.
///
/// The first shape is built before the terminal is touched, so a bad
/// configuration fails on a normal screen.
pub fn run(config: &RenderConfig) -> Result<()> {
    let mut engine = Engine::new(config, Instant::now())?;
    let signal = ShutdownSignal::register()?;
    let session = TerminalSession::start()?;
    let mut out = stdout().lock();
    let mut metrics = Metrics::new(engine.frame_time());

    while engine.is_running() {
        let frame_start = Instant::now();
        engine.step(frame_start, &mut out)?;
        out.flush()?;
        let work_time = frame_start.elapsed();

        let deadline = frame_start + engine.frame_time();
        let key_interrupt = wait_for_interrupt(deadline, &signal)?;
        check_shutdown(&mut engine, key_interrupt, &signal);

        if let Some(summary) = metrics.update(work_time, Instant::now()) {
            debug!("{summary}");
        }
    }

    drop(out);
    drop(session);
    info!("rendered {} frames", engine.frames());
    Ok(())
}
