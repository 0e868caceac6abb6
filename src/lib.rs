pub mod cli;
pub mod comb;
pub mod config;
pub mod error;
pub mod extract;
pub mod fs;
pub mod render;
pub mod scan;
pub mod summary;
pub mod telemetry;
pub mod utils;

pub use error::Result;

use crate::cli::Cli;

pub fn run(cli: Cli) -> Result<()> {
    let runtime = config::load(&cli)?;
    telemetry::init(runtime.context.verbosity)?;

    comb::run(&runtime)
}
