//! Runs the canonical Skynet benchmark and prints the elapsed time and result.

use skynet::{config::RunConfig, driver};
use std::{io, panic, process, process::ExitCode};
use tracing::error;

fn main() -> ExitCode {
    tracing_subscriber::fmt().with_writer(io::stderr).init();

    // A panic anywhere, including on an executor worker, is a broken invariant.
    let default_hook = panic::take_hook();
    panic::set_hook(Box::new(move |info| {
        default_hook(info);
        process::abort();
    }));

    match driver::run(&RunConfig::default()) {
        Ok(report) => {
            println!("{report}");
            ExitCode::SUCCESS
        }
        Err(err) => {
            error!(%err, "benchmark did not run");
            ExitCode::FAILURE
        }
    }
}
