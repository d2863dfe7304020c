//! `ringfield [PARAMS.json] [MASK.png]`
//!
//! Opens the ring viewer. Without arguments, default parameters and the
//! default sprite mask are used. Set `RUST_LOG` to change log verbosity.

use std::process::ExitCode;

use ringfield::params::GenerationParameters;
use ringfield::textures::DEFAULT_MASK_PATH;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let mut args = std::env::args().skip(1);
    let params = match args.next() {
        Some(path) => match GenerationParameters::load(&path) {
            Ok(params) => {
                info!(%path, "loaded parameters");
                params
            }
            Err(e) => {
                error!("{e}");
                return ExitCode::FAILURE;
            }
        },
        None => GenerationParameters::default(),
    };
    let mask_path = args.next().unwrap_or_else(|| DEFAULT_MASK_PATH.to_string());

    match ringfield::viewer::run(params, mask_path) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e}");
            ExitCode::FAILURE
        }
    }
}
