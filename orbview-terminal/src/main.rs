//! orbview terminal viewer - brick-shaded sphere in ASCII
//!
//! Controls:
//!   - W/S: Pitch
//!   - A/D: Yaw
//!   - Q/E: Roll
//!   - ESC: Quit

use std::io;
use crossterm::terminal;
use orbview_core::ViewerConfig;
use orbview_terminal::TerminalApp;
use tracing_subscriber::EnvFilter;

fn main() -> io::Result<()> {
    // Logs go to stderr; keep them quiet while the alternate screen is up
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("orbview=warn")),
        )
        .init();

    let config = ViewerConfig::default();
    let (width, height) = terminal::size()?;
    tracing::info!(width, height, "starting terminal viewer");

    let mut app = TerminalApp::new(&config, width, height)?;
    orbview_terminal::run(&mut app)?;

    match app.take_failure() {
        Some(e) => Err(e),
        None => Ok(()),
    }
}
