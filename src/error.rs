use miette::Diagnostic;
use thiserror::Error;

/// Main error type for pokedex operations
#[derive(Error, Diagnostic, Debug)]
pub enum PokedexError {
    #[error("IO error: {0}")]
    #[diagnostic(code(pokedex::io))]
    IoError(#[from] std::io::Error),

    #[error("IO error with {path}: {message}")]
    #[diagnostic(code(pokedex::io))]
    Io {
        path: std::path::PathBuf,
        message: String,
    },

    #[error("Parse error: {message}")]
    #[diagnostic(code(pokedex::parse))]
    Parse {
        message: String,
        #[help]
        help: Option<String>,
    },

    #[error("Validation error: {message}")]
    #[diagnostic(code(pokedex::validate))]
    Validation {
        message: String,
        #[help]
        help: Option<String>,
    },

    #[error("Build error: {message}")]
    #[diagnostic(code(pokedex::build))]
    Build {
        message: String,
        #[help]
        help: Option<String>,
    },
}

impl PokedexError {
    /// Wrap a failed read of a required input file.
    pub fn read(path: &std::path::Path, err: std::io::Error) -> Self {
        PokedexError::Io {
            path: path.to_path_buf(),
            message: format!("Failed to read file: {}", err),
        }
    }
}

pub type Result<T> = std::result::Result<T, PokedexError>;
