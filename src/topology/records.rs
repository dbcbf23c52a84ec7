// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Half-edge, vertex and face records
//!
//! Records only hold the stored links. Derived relations (`oprev`, `dnext`,
//! `dest`, ...) need to follow more than one record and live on
//! [`Dcel`](super::Dcel).

use super::handle::{FaceId, HalfEdgeId, VertexId};

/// One directed half of an undirected edge
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HalfEdge {
    /// Link in the global edge ring. For the primary half of a pair this is
    /// the next primary half-edge; for the secondary half it is the sym of
    /// the previous primary half-edge.
    pub(crate) next: HalfEdgeId,
    /// Opposite-direction twin
    pub(crate) sym: HalfEdgeId,
    /// Next half-edge counterclockwise around the origin
    pub(crate) onext: HalfEdgeId,
    /// Next half-edge counterclockwise around the left face
    pub(crate) lnext: HalfEdgeId,
    /// Origin vertex
    pub(crate) org: VertexId,
    /// Left face
    pub(crate) left: FaceId,
}

impl HalfEdge {
    /// Unlinked half-edge: every half-edge link points at `id`, labels are null
    pub(crate) fn detached(id: HalfEdgeId) -> Self {
        Self {
            next: id,
            sym: id,
            onext: id,
            lnext: id,
            org: VertexId::default(),
            left: FaceId::default(),
        }
    }

    #[inline]
    pub fn sym(&self) -> HalfEdgeId {
        self.sym
    }

    #[inline]
    pub fn onext(&self) -> HalfEdgeId {
        self.onext
    }

    #[inline]
    pub fn lnext(&self) -> HalfEdgeId {
        self.lnext
    }

    #[inline]
    pub fn org(&self) -> VertexId {
        self.org
    }

    #[inline]
    pub fn left(&self) -> FaceId {
        self.left
    }
}

/// A vertex: the `onext` ring containing its representative half-edge
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Vertex {
    /// Representative half-edge with this vertex as origin
    pub(crate) edge: HalfEdgeId,
    pub(crate) next: VertexId,
    pub(crate) prev: VertexId,
}

impl Vertex {
    /// Returns a half-edge whose origin is this vertex
    #[inline]
    pub fn edge(&self) -> HalfEdgeId {
        self.edge
    }
}

/// A face: the `lnext` ring containing its representative half-edge
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Face {
    /// Representative half-edge with this face on its left
    pub(crate) edge: HalfEdgeId,
    pub(crate) next: FaceId,
    pub(crate) prev: FaceId,
}

impl Face {
    /// Returns a half-edge whose left face is this face
    #[inline]
    pub fn edge(&self) -> HalfEdgeId {
        self.edge
    }
}
