//! Input sources: positional arguments or standard input.

mod args;
mod stdin;

pub use args::run_args;
pub use stdin::run_stdin;
