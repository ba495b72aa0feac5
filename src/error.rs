#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![forbid(unsafe_code)]

use crate::types::Identifier;
use thiserror::Error;

/// Error code constants for type-safe error handling
pub mod code {
    pub const CLI_ERROR: &str = "CLI_ERROR";
    pub const DUPLICATE: &str = "DUPLICATE";
    pub const NOTFOUND: &str = "NOTFOUND";
    pub const INVALID: &str = "INVALID";
    pub const MISMATCH: &str = "MISMATCH";
    pub const DEPENDENCY: &str = "DEPENDENCY";
    pub const INTERNAL: &str = "INTERNAL";
}

#[derive(Error, Debug)]
pub enum BindingError {
    #[error("Duplicate choice name(s) in {template_id}: {}", .names.join(", "))]
    DuplicateChoice {
        template_id: Identifier,
        names: Vec<String>,
    },

    #[error(
        "Unknown choice {name} on {template_id}{}",
        .suggestion.as_deref().map(|s| format!(" (did you mean {s}?)")).unwrap_or_default()
    )]
    UnknownChoice {
        template_id: Identifier,
        name: String,
        suggestion: Option<String>,
    },

    #[error("Choice {name} is {found}, not {expected}")]
    ChoiceTypeMismatch {
        name: String,
        expected: String,
        found: String,
    },

    #[error("Expected template {expected}, got {found}")]
    TemplateMismatch {
        expected: Identifier,
        found: Identifier,
    },

    #[error("Contract {contract_id} carries no view for interface {interface_id}")]
    MissingInterfaceView {
        interface_id: Identifier,
        contract_id: String,
    },

    #[error("No companion for {0}")]
    UnknownCompanion(Identifier),

    #[error("Companion {0} is declared more than once")]
    DuplicateCompanion(Identifier),

    #[error("Invalid identifier: {0}")]
    InvalidIdentifier(String),

    #[error("Unknown error code: {0}")]
    UnknownErrorCode(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Invalid usage: {0}")]
    UsageError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}

impl BindingError {
    /// Returns the protocol error code for this error
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::DuplicateChoice { .. } | Self::DuplicateCompanion(_) => code::DUPLICATE,
            Self::UnknownChoice { .. }
            | Self::UnknownCompanion(_)
            | Self::UnknownErrorCode(_)
            | Self::MissingInterfaceView { .. } => code::NOTFOUND,
            Self::ChoiceTypeMismatch { .. } | Self::TemplateMismatch { .. } => code::MISMATCH,
            Self::InvalidIdentifier(_) | Self::ConfigError(_) | Self::SerializationError(_) => {
                code::INVALID
            }
            Self::IoError(_) => code::DEPENDENCY,
            Self::UsageError(_) => code::CLI_ERROR,
        }
    }

    /// Returns the exit code for this error
    #[must_use]
    pub const fn exit_code(&self) -> i32 {
        match self {
            Self::UsageError(_) => 1,
            Self::ConfigError(_) => 2,
            Self::DuplicateChoice { .. } => 3,
            Self::UnknownChoice { .. } => 4,
            Self::ChoiceTypeMismatch { .. } => 5,
            Self::TemplateMismatch { .. } => 6,
            Self::MissingInterfaceView { .. } => 7,
            Self::InvalidIdentifier(_) => 8,
            Self::IoError(_) => 9,
            Self::SerializationError(_) => 10,
            Self::DuplicateCompanion(_) => 11,
            Self::UnknownCompanion(_) => 12,
            Self::UnknownErrorCode(_) => 13,
        }
    }
}

/// Error codes as documented in the CLI
pub const ERROR_CODES: &[(&str, &str, &str)] = &[
    (
        code::CLI_ERROR,
        "Invalid CLI usage",
        "Run 'companion-check --help' for valid options",
    ),
    (
        code::DUPLICATE,
        "Two choices, templates or interfaces share a name",
        "Regenerate the bindings and check the package for clashing choice names",
    ),
    (
        code::NOTFOUND,
        "Choice, template or interface view was not found",
        "List the companion's choices and verify the name",
    ),
    (
        code::INVALID,
        "Invalid identifier, configuration or payload",
        "Use <package>:<Module>:<Entity> ids and validate JSON syntax",
    ),
    (
        code::MISMATCH,
        "Value belongs to a different template or choice type",
        "Use the companion generated for that template",
    ),
    (
        code::DEPENDENCY,
        "File could not be read",
        "Check the manifest path and permissions",
    ),
    (
        code::INTERNAL,
        "Unexpected internal failure",
        "Inspect logs and retry command",
    ),
];

/// Get error code details (description and fix) for a given error code
#[must_use]
pub fn get_error_info(error_code: &str) -> Option<(&'static str, &'static str)> {
    ERROR_CODES
        .iter()
        .find(|(code, _, _)| *code == error_code)
        .map(|(_, desc, fix)| (*desc, *fix))
}

pub type Result<T> = std::result::Result<T, BindingError>;
