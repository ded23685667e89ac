pub mod config;
pub mod error;
pub mod run;

pub use error::{Error, Result};
pub use run::{build_state, main_router, run, run_graceful_with_state, run_with_state};
