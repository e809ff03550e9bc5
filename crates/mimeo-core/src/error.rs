//! Error types for fallible value construction.

use thiserror::Error;

/// Errors surfaced while building values.
///
/// Deep cloning itself is total and never returns one of these; they come
/// from the fallible constructors, currently only the pattern kind.
#[derive(Debug, Clone, Error)]
pub enum ValueError {
    /// Pattern flag outside the supported `g i m s` set.
    #[error("unknown pattern flag {flag:?}")]
    UnknownPatternFlag {
        /// The rejected flag character.
        flag: char,
    },

    /// Pattern flag given more than once.
    #[error("duplicate pattern flag {flag:?}")]
    DuplicatePatternFlag {
        /// The repeated flag character.
        flag: char,
    },

    /// Pattern source text rejected by the matcher.
    #[error("invalid pattern /{pattern}/: {message}")]
    PatternSyntax {
        /// The source text that failed to compile.
        pattern: String,
        /// Compiler diagnostic.
        message: String,
    },
}

/// Result type for fallible value operations.
pub type ValueResult<T> = std::result::Result<T, ValueError>;
