use urlconv_core::{logging, ConvertError};

mod cli;

use crate::cli::Cli;

fn main() {
    // Logging first; a state dir we cannot write to falls back to stderr.
    if logging::init_logging().is_err() {
        logging::init_logging_stderr();
    }

    if let Err(err) = Cli::run_from_args() {
        let bad_input = err
            .downcast_ref::<ConvertError>()
            .is_some_and(ConvertError::is_malformed_input);
        if bad_input {
            tracing::warn!("rejected input: {:#}", err);
        } else {
            tracing::error!("{:#}", err);
        }
        eprintln!("urlconv error: {:#}", err);
        std::process::exit(1);
    }
}
