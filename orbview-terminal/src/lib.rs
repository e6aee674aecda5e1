//! Terminal frontend: crossterm event loop driving the viewer
use crossterm::{
    cursor,
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind},
    execute, queue,
    style::{Color, Print, ResetColor, SetForegroundColor},
    terminal,
};
use std::io::{self, stdout, Write};
use orbview_core::{Control, Key, Viewer, ViewerConfig, ViewerHandler, ESCAPE_CODE};

pub mod renderer;

pub use renderer::AsciiRenderer;

/// Character cells are roughly twice as tall as they are wide
const CELL_ASPECT: u32 = 2;

/// Viewer state plus the ASCII renderer that presents it
pub struct TerminalApp {
    viewer: Viewer,
    renderer: AsciiRenderer,
    failure: Option<io::Error>,
}

impl TerminalApp {
    pub fn new(config: &ViewerConfig, width: u16, height: u16) -> io::Result<Self> {
        let viewer = Viewer::new(config)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidInput, e))?;

        let mut app = Self {
            viewer,
            renderer: AsciiRenderer::new(width as usize, height as usize),
            failure: None,
        };
        app.on_resize(width as u32, height as u32);
        Ok(app)
    }

    pub fn viewer(&self) -> &Viewer {
        &self.viewer
    }

    pub fn renderer(&self) -> &AsciiRenderer {
        &self.renderer
    }

    /// Rasterize the current transforms into the character buffer
    fn rasterize(&mut self) {
        self.viewer.on_redraw();
        self.renderer.clear();
        self.renderer.render_mesh(
            self.viewer.mesh(),
            self.viewer.transforms(),
            self.viewer.material(),
        );
    }

    fn present(&self) -> io::Result<()> {
        let mut stdout = stdout();
        queue!(stdout, cursor::MoveTo(0, 0))?;

        self.renderer.draw(&mut stdout)?;

        // Draw UI overlay
        let [x, y, z] = self.viewer.rotation().angles();
        queue!(
            stdout,
            cursor::MoveTo(0, 0),
            SetForegroundColor(Color::Yellow),
            Print(format!(
                "orbview | pitch {x:+.2} yaw {y:+.2} roll {z:+.2} | W/S A/D Q/E=Rotate ESC=Quit"
            )),
            ResetColor
        )?;

        stdout.flush()
    }

    /// Take the I/O error that stopped the loop, if any
    pub fn take_failure(&mut self) -> Option<io::Error> {
        self.failure.take()
    }
}

impl ViewerHandler for TerminalApp {
    fn on_resize(&mut self, width: u32, height: u32) -> Control {
        self.renderer.resize(width as usize, height as usize);
        self.viewer.on_resize(width, height * CELL_ASPECT)
    }

    fn on_redraw(&mut self) -> Control {
        self.rasterize();
        match self.present() {
            Ok(()) => Control::Continue,
            Err(e) => {
                self.failure = Some(e);
                Control::Exit
            }
        }
    }

    fn on_key(&mut self, key: Key) -> Control {
        self.viewer.on_key(key)
    }
}

/// Translate a crossterm key code into a viewer key
pub fn map_key(code: KeyCode) -> Key {
    match code {
        KeyCode::Esc => Key::from_code(ESCAPE_CODE),
        KeyCode::Char(c) => Key::from(c),
        _ => Key::Other,
    }
}

/// Enter raw mode on the alternate screen, dispatch terminal events to
/// `handler` until it asks to exit, then restore the terminal.
pub fn run<H: ViewerHandler>(handler: &mut H) -> io::Result<()> {
    terminal::enable_raw_mode()?;
    execute!(stdout(), terminal::EnterAlternateScreen, cursor::Hide)?;

    let result = event_loop(handler);

    // Cleanup
    terminal::disable_raw_mode()?;
    execute!(stdout(), terminal::LeaveAlternateScreen, cursor::Show)?;

    result
}

fn event_loop<H: ViewerHandler>(handler: &mut H) -> io::Result<()> {
    let mut control = Control::Redraw;

    loop {
        // Coalesce: at most one redraw per dispatched event
        if control == Control::Redraw {
            control = handler.on_redraw();
        }
        if control == Control::Exit {
            return Ok(());
        }

        control = match event::read()? {
            Event::Key(KeyEvent {
                code,
                kind: KeyEventKind::Press | KeyEventKind::Repeat,
                ..
            }) => handler.on_key(map_key(code)),
            Event::Resize(width, height) => handler.on_resize(width as u32, height as u32),
            _ => Control::Continue,
        };
    }
}
