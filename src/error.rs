// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Error types for checked handle lookups and structural validation

use crate::topology::{FaceId, HalfEdgeId, ValidationError, VertexId};
use thiserror::Error;

/// Result alias for fallible DCEL queries
pub type DcelResult<T> = Result<T, DcelError>;

/// Errors reported by the checked API.
///
/// The editing operators never return these: passing a stale or foreign
/// handle to an operator is a programming error and panics.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DcelError {
    /// Half-edge handle is stale (its edge was deleted) or belongs to another container
    #[error("invalid half-edge handle {0:?}")]
    InvalidHalfEdge(HalfEdgeId),

    /// Vertex handle is stale or belongs to another container
    #[error("invalid vertex handle {0:?}")]
    InvalidVertex(VertexId),

    /// Face handle is stale or belongs to another container
    #[error("invalid face handle {0:?}")]
    InvalidFace(FaceId),

    /// Structural validation found a broken invariant
    #[error("corrupt topology: {0}")]
    Corrupt(#[from] ValidationError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = DcelError::InvalidHalfEdge(HalfEdgeId::default());
        assert!(err.to_string().starts_with("invalid half-edge handle"));
    }

    #[test]
    fn test_validation_error_conversion() {
        let err: DcelError = ValidationError::SymMismatch {
            half_edge: HalfEdgeId::default(),
        }
        .into();
        assert!(matches!(err, DcelError::Corrupt(_)));
        assert!(err.to_string().contains("corrupt topology"));
    }
}
