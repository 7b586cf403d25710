#![warn(clippy::all, clippy::pedantic)]
#![allow(
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::module_name_repetitions,
    clippy::must_use_candidate,
    clippy::new_without_default,
    clippy::return_self_not_must_use
)]

pub mod app;
pub mod archive;
pub mod classifier;
pub mod cli;
pub mod config;
pub mod error;
pub mod flow;
pub mod geometry;
pub mod model;
pub mod ui;

pub use cli::{Cli, Commands};
pub use config::Config;
pub use error::{ArchiveError, ClassifierError, ConfigError, UntangleError};
pub use model::{AgencyResult, ClassificationScores, Domain};
