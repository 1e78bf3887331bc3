// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum EngineError {
    /// Rejected input. The caller decides whether to abort or skip.
    #[error("validation: {0}")]
    Validation(String),

    /// Piece-number uniqueness violation surfaced by the persistence
    /// collaborator. The engine itself never raises this; it is defined
    /// here so callers have one error type to propagate.
    #[error("conflict: {0}")]
    Conflict(String),
}

impl EngineError {
    pub fn validation(msg: impl Into<String>) -> Self {
        EngineError::Validation(msg.into())
    }
}

pub type EngineResult<T> = Result<T, EngineError>;
