//! Interactive pool table viewer.
//!
//! Drag with the left mouse button to rotate, scroll to zoom.
//! `1` stereo (red/cyan), `2` orthographic, `3` perspective, `Tab` cycles,
//! `Escape` quits.

mod app;
mod scene;

use anyhow::Result;

use billiards_engine::device::GpuInit;
use billiards_engine::logging::{init_logging, LoggingConfig};
use billiards_engine::window::{Runtime, RuntimeConfig};

use crate::app::PoolApp;

fn main() -> Result<()> {
    init_logging(LoggingConfig::default());

    let config = RuntimeConfig {
        title: "Billiards".to_string(),
        ..Default::default()
    };

    Runtime::run(config, GpuInit::default(), PoolApp::default())
}
