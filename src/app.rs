//! App: lifecycle, input dispatch and the event loop.
//!
//! [`App`] owns the [`Window`], a [`Renderer`] and the input parser. Input is
//! decoded into events and routed to the window; any invalidation raised
//! while handling a wake-up is drawn by a single coalesced flush.
//! [`App::headless`] drives the same pipeline into a [`BufferRenderer`].

use std::io::{BufWriter, Stdout};
use std::path::PathBuf;
use std::time::Duration;

use tokio::io::{AsyncRead, AsyncReadExt};
use tracing::{debug, info, trace};

use crate::error::Result;
use crate::event::{InputEvent, InputParser, MouseEvent, MouseEventKind};
use crate::geometry::{Position, Size};
use crate::render::{BufferRenderer, Renderer, TerminalRenderer};
use crate::terminal::RawModeGuard;
use crate::tree::Window;

/// End of transmission (Ctrl-D).
const EOT: char = '\u{4}';
/// End of text (Ctrl-C in raw mode).
const ETX: char = '\u{3}';

const READ_BUFFER: usize = 1024;

// ---------------------------------------------------------------------------
// AppConfig
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// How long a lone escape prefix may wait for the rest of a sequence
    /// before it is delivered as literal characters.
    pub escape_timeout: Duration,
    /// Ask the terminal for SGR mouse reports.
    pub mouse_reporting: bool,
    /// Draw on the alternate screen.
    pub alternate_screen: bool,
    /// Where [`App::run_terminal`] writes logs. No logging when unset.
    pub log_file: Option<PathBuf>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            escape_timeout: Duration::from_millis(25),
            mouse_reporting: true,
            alternate_screen: true,
            log_file: None,
        }
    }
}

impl AppConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_escape_timeout(mut self, timeout: Duration) -> Self {
        self.escape_timeout = timeout;
        self
    }

    pub fn with_mouse_reporting(mut self, enabled: bool) -> Self {
        self.mouse_reporting = enabled;
        self
    }

    pub fn with_alternate_screen(mut self, enabled: bool) -> Self {
        self.alternate_screen = enabled;
        self
    }

    pub fn with_log_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.log_file = Some(path.into());
        self
    }
}

// ---------------------------------------------------------------------------
// App
// ---------------------------------------------------------------------------

pub struct App<R: Renderer> {
    window: Window,
    renderer: R,
    parser: InputParser,
    config: AppConfig,
    /// Bytes of an incomplete UTF-8 sequence from the previous read.
    carry: Vec<u8>,
    running: bool,
    started: bool,
    flush_count: usize,
}

impl<R: Renderer> App<R> {
    pub fn new(window: Window, renderer: R, config: AppConfig) -> Self {
        Self {
            window,
            renderer,
            parser: InputParser::new(),
            config,
            carry: Vec::new(),
            running: true,
            started: false,
            flush_count: 0,
        }
    }

    pub fn window(&self) -> &Window {
        &self.window
    }

    pub fn window_mut(&mut self) -> &mut Window {
        &mut self.window
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn renderer_mut(&mut self) -> &mut R {
        &mut self.renderer
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Whether the app should keep running.
    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn request_quit(&mut self) {
        self.running = false;
    }

    /// Number of flushes (layout and draw passes) performed so far.
    pub fn flush_count(&self) -> usize {
        self.flush_count
    }

    // -----------------------------------------------------------------------
    // Lifecycle
    // -----------------------------------------------------------------------

    /// Start the renderer, lay out and draw the first frame.
    pub fn start(&mut self) -> Result<()> {
        info!("starting app");
        self.renderer.start(&mut self.window)?;
        self.started = true;
        self.running = true;
        self.update()
    }

    /// Stop the renderer. Safe to call more than once.
    pub fn stop(&mut self) -> Result<()> {
        self.running = false;
        if !self.started {
            return Ok(());
        }
        info!("stopping app");
        self.started = false;
        self.renderer.stop(&mut self.window)
    }

    /// Lay out the window and draw what has been invalidated.
    pub fn update(&mut self) -> Result<()> {
        self.window.layers_mut().take_update_request();
        self.window.layout_window();
        self.renderer.update(&mut self.window)?;
        // Layout may have invalidated again; that is already drawn.
        self.window.layers_mut().take_update_request();
        self.flush_count += 1;
        trace!(flush = self.flush_count, "flushed");
        Ok(())
    }

    /// Flush once if anything requested an update. Returns whether it did.
    pub fn update_if_needed(&mut self) -> Result<bool> {
        if !self.window.layers().needs_update() {
            return Ok(false);
        }
        self.update()?;
        Ok(true)
    }

    pub fn handle_window_size_change(&mut self) -> Result<()> {
        self.renderer.handle_resize(&mut self.window)?;
        info!(size = %self.window.window_size(), "window size changed");
        self.update()
    }

    // -----------------------------------------------------------------------
    // Input
    // -----------------------------------------------------------------------

    /// Decode and dispatch a chunk of input. Events decoded after a
    /// shutdown request are dropped.
    pub fn handle_input(&mut self, input: &str) {
        for event in self.parser.advance(input) {
            if !self.running {
                break;
            }
            self.dispatch(event);
        }
    }

    /// Decode raw bytes, holding back an incomplete trailing UTF-8 sequence
    /// until the next call. Invalid bytes are skipped.
    pub fn handle_bytes(&mut self, bytes: &[u8]) {
        self.carry.extend_from_slice(bytes);
        let pending = std::mem::take(&mut self.carry);
        let mut rest = pending.as_slice();
        let mut text = String::new();
        while !rest.is_empty() {
            match std::str::from_utf8(rest) {
                Ok(valid) => {
                    text.push_str(valid);
                    break;
                }
                Err(err) => {
                    let (valid, tail) = rest.split_at(err.valid_up_to());
                    text.push_str(&String::from_utf8_lossy(valid));
                    match err.error_len() {
                        Some(len) => {
                            debug!(len, "skipping invalid utf-8");
                            rest = &tail[len..];
                        }
                        None => {
                            self.carry = tail.to_vec();
                            break;
                        }
                    }
                }
            }
        }
        if !text.is_empty() {
            self.handle_input(&text);
        }
    }

    /// Whether a partial escape sequence is waiting for more input.
    pub fn has_pending_input(&self) -> bool {
        self.parser.has_pending()
    }

    /// Deliver a dangling escape prefix as literal characters.
    pub fn flush_pending_input(&mut self) {
        for event in self.parser.flush() {
            if !self.running {
                break;
            }
            self.dispatch(event);
        }
    }

    /// Route one event to the window.
    pub fn dispatch(&mut self, event: InputEvent) {
        trace!(?event, "dispatch");
        match event {
            InputEvent::Char(EOT | ETX) => {
                info!("shutdown requested from input");
                self.request_quit();
            }
            InputEvent::Char(ch) => {
                let ch = if ch == '\r' { '\n' } else { ch };
                match self.window.first_responder() {
                    Some(responder) => self.window.handle_event(responder, ch),
                    None => trace!(?ch, "no first responder, input dropped"),
                }
            }
            InputEvent::Arrow(key) => {
                self.window.move_focus(key.direction());
            }
            InputEvent::Mouse(mouse) => self.dispatch_mouse(mouse),
        }
    }

    fn dispatch_mouse(&mut self, mouse: MouseEvent) {
        let position = Position::new(
            i32::from(mouse.column.saturating_sub(1)),
            i32::from(mouse.row.saturating_sub(1)),
        );
        match mouse.kind {
            MouseEventKind::Press => {
                if let Some(target) = self.window.hit_test(position) {
                    self.window.set_first_responder(Some(target));
                }
            }
            MouseEventKind::Release => {
                if let Some(target) = self.window.hit_test(position) {
                    self.window.set_first_responder(Some(target));
                    self.window.activate(target);
                }
            }
            MouseEventKind::Wheel => {
                let (Some(target), Some(lines)) = (self.window.widget_at(position), mouse.wheel_delta()) else {
                    return;
                };
                self.window.scroll_by(target, lines);
            }
            MouseEventKind::Move => {}
        }
    }

    // -----------------------------------------------------------------------
    // Event loop
    // -----------------------------------------------------------------------

    /// Start, process `input` until shutdown or end of input, then stop.
    ///
    /// Besides input, the loop wakes on `SIGWINCH` (resize), `SIGINT`
    /// (shutdown) and the escape timeout. Each wake-up ends with at most one
    /// flush.
    pub async fn run<I: AsyncRead + Unpin>(&mut self, input: I) -> Result<()> {
        self.start()?;
        let result = self.event_loop(input).await;
        let stopped = self.stop();
        result.and(stopped)
    }

    async fn event_loop<I: AsyncRead + Unpin>(&mut self, mut input: I) -> Result<()> {
        let mut signals = Signals::new()?;
        let mut buffer = [0u8; READ_BUFFER];
        let escape_timeout = self.config.escape_timeout;

        while self.running {
            let waiting_for_escape = self.parser.has_pending();
            tokio::select! {
                read = input.read(&mut buffer) => {
                    let count = read?;
                    if count == 0 {
                        info!("input closed");
                        self.request_quit();
                    } else {
                        self.handle_bytes(&buffer[..count]);
                    }
                }
                Some(()) = signals.resize.recv() => {
                    self.handle_window_size_change()?;
                }
                Some(()) = signals.interrupt.recv() => {
                    info!("interrupted");
                    self.request_quit();
                }
                () = tokio::time::sleep(escape_timeout), if waiting_for_escape => {
                    self.flush_pending_input();
                }
            }
            self.update_if_needed()?;
        }
        Ok(())
    }
}

impl App<BufferRenderer> {
    /// An app drawing into memory at a fixed size.
    pub fn headless(window: Window, size: Size) -> Self {
        Self::new(window, BufferRenderer::new(size), AppConfig::default())
    }

    /// Change the virtual screen size and handle it like a terminal resize.
    pub fn resize(&mut self, size: Size) -> Result<()> {
        self.renderer.set_size(size);
        self.handle_window_size_change()
    }
}

impl App<TerminalRenderer<BufWriter<Stdout>>> {
    /// An app drawing to the controlling terminal.
    pub fn terminal(window: Window, config: AppConfig) -> Self {
        let renderer = TerminalRenderer::stdout()
            .alternate_screen(config.alternate_screen)
            .mouse_reporting(config.mouse_reporting);
        Self::new(window, renderer, config)
    }

    /// Run on the controlling terminal with stdin as input.
    ///
    /// Installs file logging when configured and holds raw mode for the
    /// duration of the loop.
    pub async fn run_terminal(&mut self) -> Result<()> {
        let _log_guard = match &self.config.log_file {
            Some(path) => crate::logging::init(path)?,
            None => None,
        };
        let _raw_mode = RawModeGuard::enable()?;
        self.run(tokio::io::stdin()).await
    }
}

// ---------------------------------------------------------------------------
// Signals
// ---------------------------------------------------------------------------

#[cfg(unix)]
use tokio::signal::unix::Signal;

/// Stand-in for platforms without Unix signals: resize never fires and
/// interrupt waits for Ctrl-C.
#[cfg(not(unix))]
struct Signal {
    interrupt: bool,
}

#[cfg(not(unix))]
impl Signal {
    async fn recv(&mut self) -> Option<()> {
        if self.interrupt {
            tokio::signal::ctrl_c().await.ok()
        } else {
            std::future::pending().await
        }
    }
}

struct Signals {
    resize: Signal,
    interrupt: Signal,
}

impl Signals {
    #[cfg(unix)]
    fn new() -> Result<Self> {
        use tokio::signal::unix::{signal, SignalKind};

        let register = |kind: SignalKind| {
            signal(kind).map_err(|err| {
                tracing::error!(%err, "could not register signal handler");
                crate::error::Error::Signal(err)
            })
        };
        Ok(Self {
            resize: register(SignalKind::window_change())?,
            interrupt: register(SignalKind::interrupt())?,
        })
    }

    #[cfg(not(unix))]
    fn new() -> Result<Self> {
        Ok(Self {
            resize: Signal { interrupt: false },
            interrupt: Signal { interrupt: true },
        })
    }
}

// ===========================================================================
// Tests
// ===========================================================================
