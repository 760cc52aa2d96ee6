//! Opens the logo viewer with its built-in configuration.

use anyhow::Context as _;
use log::error;
use logo_viewer::{
    logging::{init_logging, LoggingConfig},
    ViewerConfig,
};

fn main() -> anyhow::Result<()> {
    init_logging(LoggingConfig::default());

    logo_viewer::run(ViewerConfig::default())
        .inspect_err(|err| error!("{err}"))
        .context("logo viewer failed to start")
}
