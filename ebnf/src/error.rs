use std::io;

use thiserror::Error;

use crate::position::SourcePosition;

pub type Result<T> = std::result::Result<T, Error>;

/// Failures of the machinery around a check. Syntax problems in the checked
/// text are never errors, they are reported as diagnostics.
#[derive(Debug, Error)]
pub enum Error {
    #[error("i/o failure: {0}")]
    Io(#[from] io::Error),
    #[error("character source already closed")]
    Closed,
    #[error("{position}: groups nested deeper than {limit} levels")]
    NestingTooDeep {
        position: SourcePosition,
        limit: usize,
    },
}
