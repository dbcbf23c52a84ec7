// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Topology module - half-edge records, object rings and editing operators

mod dcel;
mod handle;
mod operators;
mod records;
mod traversal;
mod validate;

pub use dcel::{Dcel, Edges, Faces, Vertices};
pub use handle::{FaceId, HalfEdgeId, VertexId};
pub use records::{Face, HalfEdge, Vertex};
pub use traversal::{FaceRing, VertexRing};
pub use validate::{ValidationError, ValidationReport};
