// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Ring traversal and connectivity queries

use super::dcel::Dcel;
use super::handle::{FaceId, HalfEdgeId, VertexId};
use slotmap::SecondaryMap;
use std::iter::FusedIterator;

// ============================================================================
// Orbit iterators
// ============================================================================

/// Iterates the `onext` orbit of a vertex, starting at its representative
#[derive(Debug, Clone)]
pub struct VertexRing<'a> {
    dcel: &'a Dcel,
    start: HalfEdgeId,
    current: Option<HalfEdgeId>,
}

impl Iterator for VertexRing<'_> {
    type Item = HalfEdgeId;

    fn next(&mut self) -> Option<Self::Item> {
        let result = self.current?;
        let next = self.dcel.onext(result);
        self.current = (next != self.start).then_some(next);
        Some(result)
    }
}

impl FusedIterator for VertexRing<'_> {}

/// Iterates the `lnext` orbit of a face, starting at its representative
#[derive(Debug, Clone)]
pub struct FaceRing<'a> {
    dcel: &'a Dcel,
    start: HalfEdgeId,
    current: Option<HalfEdgeId>,
}

impl Iterator for FaceRing<'_> {
    type Item = HalfEdgeId;

    fn next(&mut self) -> Option<Self::Item> {
        let result = self.current?;
        let next = self.dcel.lnext(result);
        self.current = (next != self.start).then_some(next);
        Some(result)
    }
}

impl FusedIterator for FaceRing<'_> {}

impl Dcel {
    /// Half-edges leaving `v`, counterclockwise
    pub fn vertex_ring(&self, v: VertexId) -> VertexRing<'_> {
        let start = self.vertex_edge(v);
        VertexRing {
            dcel: self,
            start,
            current: Some(start),
        }
    }

    /// Half-edges bounding `f`, counterclockwise
    pub fn face_ring(&self, f: FaceId) -> FaceRing<'_> {
        let start = self.face_edge(f);
        FaceRing {
            dcel: self,
            start,
            current: Some(start),
        }
    }

    /// Number of half-edges leaving `v`
    pub fn degree(&self, v: VertexId) -> usize {
        self.vertex_ring(v).count()
    }

    /// Number of half-edges on the boundary of `f`
    pub fn face_len(&self, f: FaceId) -> usize {
        self.face_ring(f).count()
    }

    // =========================================================================
    // Connectivity
    // =========================================================================

    /// Label every vertex with the index of its connected component.
    /// Components are numbered from 0 in vertex ring order.
    pub fn component_labels(&self) -> SecondaryMap<VertexId, usize> {
        let mut labels = SecondaryMap::with_capacity(self.num_vertices());
        let mut stack = Vec::new();
        let mut next_label = 0;

        for root in self.vertices() {
            if labels.contains_key(root) {
                continue;
            }
            labels.insert(root, next_label);
            stack.push(root);

            while let Some(v) = stack.pop() {
                for e in self.vertex_ring(v) {
                    let w = self.dest(e);
                    if !labels.contains_key(w) {
                        labels.insert(w, next_label);
                        stack.push(w);
                    }
                }
            }
            next_label += 1;
        }

        labels
    }

    /// Number of connected components
    pub fn num_components(&self) -> usize {
        self.component_labels().values().max().map_or(0, |max| max + 1)
    }
}
