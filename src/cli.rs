//! CLI domain: parse, route, and output only.
//! Orchestration lives in the pipeline; the route only wires configuration to it.

mod output;
mod parse;
mod route;

pub use output::{map_error, write_output};
pub use parse::Cli;
pub use route::{load_config, RunContext};
