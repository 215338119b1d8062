#![warn(clippy::all, clippy::pedantic)]
#![allow(
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::module_name_repetitions,
    clippy::must_use_candidate,
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::cast_precision_loss
)]

pub mod cli;
pub mod compose;
pub mod config;
pub mod content;
pub mod error;
pub mod gate;
pub mod pipeline;
pub mod providers;
pub mod publish;
pub mod state;

pub use config::Config;
pub use error::{BotError, Result};
pub use pipeline::RunOutcome;
