//! Error types for the Prism3D engine
//!
//! This module defines the error types used throughout the engine,
//! including backend failures, invalid references and initialization.

use std::fmt;

/// Result type for Prism3D engine operations
pub type Result<T> = std::result::Result<T, Error>;

/// Prism3D engine errors
#[derive(Debug, Clone)]
pub enum Error {
    /// Backend-specific error (OpenGL, driver, lock state, etc.)
    BackendError(String),

    /// Out of GPU memory
    OutOfMemory,

    /// Invalid resource (buffer, texture, shader source, etc.)
    InvalidResource(String),

    /// Initialization failed (shader compilation, framebuffer setup, etc.)
    InitializationFailed(String),

    /// A reference to something that was never registered (shader id, camera key)
    InvalidReference(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::BackendError(msg) => write!(f, "Backend error: {}", msg),
            Error::OutOfMemory => write!(f, "Out of GPU memory"),
            Error::InvalidResource(msg) => write!(f, "Invalid resource: {}", msg),
            Error::InitializationFailed(msg) => write!(f, "Initialization failed: {}", msg),
            Error::InvalidReference(msg) => write!(f, "Invalid reference: {}", msg),
        }
    }
}

impl std::error::Error for Error {}

/// Log an error through the engine logger and hand it back.
///
/// Lets call sites write `return Err(log_error("prism3d::X", Error::...))`
/// so every surfaced error also shows up in the log with its source.
pub fn log_error(source: &str, error: Error) -> Error {
    crate::engine::Engine::log(
        crate::log::LogSeverity::Error,
        source,
        error.to_string(),
    );
    error
}

/// Build a logged `Error::BackendError` from a format string.
///
/// ```ignore
/// let err = engine_err!("prism3d::Scene", "object {} is busy", id);
/// ```
#[macro_export]
macro_rules! engine_err {
    ($source:expr, $($arg:tt)*) => {{
        let message = format!($($arg)*);
        $crate::engine_error!($source, "{}", message);
        $crate::prism3d::Error::BackendError(message)
    }};
}

/// Log and return an `Error::BackendError` from the enclosing function.
#[macro_export]
macro_rules! engine_bail {
    ($source:expr, $($arg:tt)*) => {
        return Err($crate::engine_err!($source, $($arg)*))
    };
}

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
