//! orbview - brick-shaded sphere viewer
//!
//! Controls:
//!   - W/S: Pitch
//!   - A/D: Yaw
//!   - Q/E: Roll
//!   - ESC: Quit

use std::process::ExitCode;

use orbview_core::ViewerConfig;
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("orbview=info")),
        )
        .init();

    tracing::info!("orbview v{} starting...", env!("CARGO_PKG_VERSION"));

    match orbview_gpu::run(ViewerConfig::default()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{e}");
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}
