//! ranklink entry point
//!
//! Minimal entrypoint: parse CLI arguments, dispatch, print errors to
//! stderr, exit non-zero on failure. All logic lives in the cli module.

use ranklink::cli;

fn main() {
    if let Err(e) = cli::run() {
        eprintln!("{}", e);
        std::process::exit(1);
    }
}
