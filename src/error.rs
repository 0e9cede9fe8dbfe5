//! Error types for the event planner.

use std::{io, path::PathBuf};

use thiserror::Error;

#[derive(Error, Debug)]
pub enum CalendarError {
    /// No stored event has this id.
    #[error("Event not found: {id}")]
    EventNotFound { id: String },

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// A TOML file (config or events) could not be parsed.
    #[error("Failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Configuration error: {message}")]
    Config { message: String },

    /// The background notification task misbehaved.
    #[error("Scheduler error: {message}")]
    Scheduler { message: String },
}

pub type Result<T> = std::result::Result<T, CalendarError>;
