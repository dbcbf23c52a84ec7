// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! DCEL container: arenas, object rings and the low-level primitives
//!
//! # Layout
//!
//! ```text
//! Dcel {
//!     half_edges: SlotMap<HalfEdgeId, HalfEdge>,  // pairs + 2 sentinel halves
//!     vertices:   SlotMap<VertexId, Vertex>,      // live vertices + sentinel
//!     faces:      SlotMap<FaceId, Face>,          // live faces + sentinel
//! }
//! ```
//!
//! Each object kind is threaded on a circular list through its sentinel.
//! New objects are linked immediately before the sentinel, so iteration
//! visits them in creation order.
//!
//! The edge ring stores one `next` per half-edge: the primary half links
//! forward to the next primary half, the secondary half links backward to
//! the sym of the previous primary half. Unlinking either half of a pair
//! therefore works the same way.

use super::handle::{FaceId, HalfEdgeId, VertexId};
use super::records::{Face, HalfEdge, Vertex};
use crate::error::{DcelError, DcelResult};
use slotmap::SlotMap;
use std::iter::FusedIterator;

/// Doubly-connected edge list
#[derive(Debug, Clone)]
pub struct Dcel {
    half_edges: SlotMap<HalfEdgeId, HalfEdge>,
    vertices: SlotMap<VertexId, Vertex>,
    faces: SlotMap<FaceId, Face>,
    ehead: HalfEdgeId,
    vhead: VertexId,
    fhead: FaceId,
}

impl Default for Dcel {
    fn default() -> Self {
        Self::new()
    }
}

impl Dcel {
    /// Create an empty DCEL
    pub fn new() -> Self {
        Self::with_capacity(0, 0, 0)
    }

    /// Create an empty DCEL with room for the given number of edges,
    /// vertices and faces
    pub fn with_capacity(edges: usize, vertices: usize, faces: usize) -> Self {
        let mut half_edges = SlotMap::with_capacity_and_key(2 * edges + 2);
        let ehead = half_edges.insert_with_key(HalfEdge::detached);
        let eheadsym = half_edges.insert_with_key(HalfEdge::detached);
        half_edges[ehead].sym = eheadsym;
        half_edges[eheadsym].sym = ehead;

        let mut vertex_arena = SlotMap::with_capacity_and_key(vertices + 1);
        let vhead = vertex_arena.insert_with_key(|k| Vertex {
            edge: HalfEdgeId::default(),
            next: k,
            prev: k,
        });

        let mut face_arena = SlotMap::with_capacity_and_key(faces + 1);
        let fhead = face_arena.insert_with_key(|k| Face {
            edge: HalfEdgeId::default(),
            next: k,
            prev: k,
        });

        Self {
            half_edges,
            vertices: vertex_arena,
            faces: face_arena,
            ehead,
            vhead,
            fhead,
        }
    }

    // =========================================================================
    // Counts
    // =========================================================================

    /// Number of live undirected edges
    #[inline]
    pub fn num_edges(&self) -> usize {
        self.num_half_edges() / 2
    }

    /// Number of live half-edges (twice the edge count)
    #[inline]
    pub fn num_half_edges(&self) -> usize {
        self.half_edges.len() - 2
    }

    #[inline]
    pub fn num_vertices(&self) -> usize {
        self.vertices.len() - 1
    }

    #[inline]
    pub fn num_faces(&self) -> usize {
        self.faces.len() - 1
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.num_edges() == 0
    }

    /// `V - E + F`. Equals twice the number of connected components for a
    /// mesh whose components are all genus 0.
    pub fn euler_characteristic(&self) -> i64 {
        self.num_vertices() as i64 - self.num_edges() as i64 + self.num_faces() as i64
    }

    // =========================================================================
    // Stored relations
    // =========================================================================

    #[inline]
    pub fn sym(&self, e: HalfEdgeId) -> HalfEdgeId {
        self.half_edges[e].sym
    }

    /// Next half-edge counterclockwise with the same origin
    #[inline]
    pub fn onext(&self, e: HalfEdgeId) -> HalfEdgeId {
        self.half_edges[e].onext
    }

    /// Next half-edge counterclockwise with the same left face
    #[inline]
    pub fn lnext(&self, e: HalfEdgeId) -> HalfEdgeId {
        self.half_edges[e].lnext
    }

    #[inline]
    pub fn org(&self, e: HalfEdgeId) -> VertexId {
        self.half_edges[e].org
    }

    #[inline]
    pub fn left(&self, e: HalfEdgeId) -> FaceId {
        self.half_edges[e].left
    }

    /// Representative half-edge of a vertex
    #[inline]
    pub fn vertex_edge(&self, v: VertexId) -> HalfEdgeId {
        self.vertices[v].edge
    }

    /// Representative half-edge of a face
    #[inline]
    pub fn face_edge(&self, f: FaceId) -> HalfEdgeId {
        self.faces[f].edge
    }

    // =========================================================================
    // Derived relations
    // =========================================================================

    /// Previous half-edge counterclockwise with the same origin
    #[inline]
    pub fn oprev(&self, e: HalfEdgeId) -> HalfEdgeId {
        self.lnext(self.sym(e))
    }

    /// Next half-edge counterclockwise with the same destination
    #[inline]
    pub fn dnext(&self, e: HalfEdgeId) -> HalfEdgeId {
        self.sym(self.rprev(e))
    }

    /// Previous half-edge counterclockwise with the same destination
    #[inline]
    pub fn dprev(&self, e: HalfEdgeId) -> HalfEdgeId {
        self.sym(self.lnext(e))
    }

    /// Previous half-edge counterclockwise with the same left face
    #[inline]
    pub fn lprev(&self, e: HalfEdgeId) -> HalfEdgeId {
        self.sym(self.onext(e))
    }

    /// Next half-edge counterclockwise with the same right face
    #[inline]
    pub fn rnext(&self, e: HalfEdgeId) -> HalfEdgeId {
        self.sym(self.oprev(e))
    }

    /// Previous half-edge counterclockwise with the same right face
    #[inline]
    pub fn rprev(&self, e: HalfEdgeId) -> HalfEdgeId {
        self.onext(self.sym(e))
    }

    #[inline]
    pub fn dest(&self, e: HalfEdgeId) -> VertexId {
        self.org(self.sym(e))
    }

    #[inline]
    pub fn right(&self, e: HalfEdgeId) -> FaceId {
        self.left(self.sym(e))
    }

    // =========================================================================
    // Checked access
    // =========================================================================

    /// Get a live half-edge record, `None` for stale handles and sentinels
    pub fn half_edge(&self, e: HalfEdgeId) -> Option<&HalfEdge> {
        if self.is_edge_sentinel(e) {
            return None;
        }
        self.half_edges.get(e)
    }

    pub fn vertex(&self, v: VertexId) -> Option<&Vertex> {
        if v == self.vhead {
            return None;
        }
        self.vertices.get(v)
    }

    pub fn face(&self, f: FaceId) -> Option<&Face> {
        if f == self.fhead {
            return None;
        }
        self.faces.get(f)
    }

    #[inline]
    pub fn contains_half_edge(&self, e: HalfEdgeId) -> bool {
        self.half_edge(e).is_some()
    }

    #[inline]
    pub fn contains_vertex(&self, v: VertexId) -> bool {
        self.vertex(v).is_some()
    }

    #[inline]
    pub fn contains_face(&self, f: FaceId) -> bool {
        self.face(f).is_some()
    }

    pub fn try_half_edge(&self, e: HalfEdgeId) -> DcelResult<&HalfEdge> {
        self.half_edge(e).ok_or(DcelError::InvalidHalfEdge(e))
    }

    pub fn try_vertex(&self, v: VertexId) -> DcelResult<&Vertex> {
        self.vertex(v).ok_or(DcelError::InvalidVertex(v))
    }

    pub fn try_face(&self, f: FaceId) -> DcelResult<&Face> {
        self.face(f).ok_or(DcelError::InvalidFace(f))
    }

    #[inline]
    fn is_edge_sentinel(&self, e: HalfEdgeId) -> bool {
        e == self.ehead || e == self.half_edges[self.ehead].sym
    }

    #[inline]
    pub(crate) fn debug_assert_live(&self, e: HalfEdgeId) {
        debug_assert!(
            self.contains_half_edge(e),
            "stale or foreign half-edge handle {e:?}"
        );
    }

    // =========================================================================
    // Object rings
    // =========================================================================

    /// Iterate over one half-edge per live edge, in creation order
    pub fn edges(&self) -> Edges<'_> {
        Edges {
            dcel: self,
            current: self.half_edges[self.ehead].next,
        }
    }

    /// Iterate over all live vertices, in creation order
    pub fn vertices(&self) -> Vertices<'_> {
        Vertices {
            dcel: self,
            current: self.vertices[self.vhead].next,
        }
    }

    /// Iterate over all live faces, in creation order
    pub fn faces(&self) -> Faces<'_> {
        Faces {
            dcel: self,
            current: self.faces[self.fhead].next,
        }
    }

    // =========================================================================
    // Make/kill primitives
    // =========================================================================

    /// Allocate a twin pair of self-looped half-edges and link it before the
    /// edge sentinel. Labels are left null for the caller to assign.
    pub(crate) fn make_edge_pair(&mut self) -> HalfEdgeId {
        let enew = self.half_edges.insert_with_key(HalfEdge::detached);
        let enewsym = self.half_edges.insert_with_key(HalfEdge::detached);
        {
            let he = &mut self.half_edges[enew];
            he.sym = enewsym;
            he.lnext = enewsym;
        }
        {
            let he = &mut self.half_edges[enewsym];
            he.sym = enew;
            he.lnext = enew;
        }

        let enext = self.ehead;
        let enext_sym = self.sym(enext);
        let eprev = self.half_edges[enext_sym].next;
        self.half_edges[enew].next = enext;
        self.half_edges[enext_sym].next = enewsym;
        self.half_edges[enewsym].next = eprev;
        let eprev_sym = self.sym(eprev);
        self.half_edges[eprev_sym].next = enew;

        enew
    }

    /// Unlink a twin pair from the edge ring and free both halves
    pub(crate) fn kill_edge_pair(&mut self, edel: HalfEdgeId) {
        let edelsym = self.sym(edel);
        let enext = self.half_edges[edel].next;
        let eprev = self.half_edges[edelsym].next;
        let enext_sym = self.sym(enext);
        let eprev_sym = self.sym(eprev);
        self.half_edges[enext_sym].next = eprev;
        self.half_edges[eprev_sym].next = enext;

        self.half_edges.remove(edel);
        self.half_edges.remove(edelsym);
    }

    /// Allocate a vertex rooted at `edge` and label its whole `onext` ring
    pub(crate) fn make_vertex(&mut self, edge: HalfEdgeId) -> VertexId {
        let vnext = self.vhead;
        let vprev = self.vertices[vnext].prev;
        let vnew = self.vertices.insert(Vertex {
            edge,
            next: vnext,
            prev: vprev,
        });
        self.vertices[vnext].prev = vnew;
        self.vertices[vprev].next = vnew;

        self.relabel_origin(edge, vnew);
        vnew
    }

    /// Relabel the ring of `vdel` with `vnew` (null when `None`), then unlink
    /// and free `vdel`
    pub(crate) fn kill_vertex(&mut self, vdel: VertexId, vnew: Option<VertexId>) {
        let edge = self.vertices[vdel].edge;
        self.relabel_origin(edge, vnew.unwrap_or_default());

        if let Some(removed) = self.vertices.remove(vdel) {
            self.vertices[removed.next].prev = removed.prev;
            self.vertices[removed.prev].next = removed.next;
        }
    }

    /// Allocate a face rooted at `edge` and label its whole `lnext` ring
    pub(crate) fn make_face(&mut self, edge: HalfEdgeId) -> FaceId {
        let fnext = self.fhead;
        let fprev = self.faces[fnext].prev;
        let fnew = self.faces.insert(Face {
            edge,
            next: fnext,
            prev: fprev,
        });
        self.faces[fnext].prev = fnew;
        self.faces[fprev].next = fnew;

        self.relabel_left(edge, fnew);
        fnew
    }

    /// Relabel the ring of `fdel` with `fnew` (null when `None`), then unlink
    /// and free `fdel`
    pub(crate) fn kill_face(&mut self, fdel: FaceId, fnew: Option<FaceId>) {
        let edge = self.faces[fdel].edge;
        self.relabel_left(edge, fnew.unwrap_or_default());

        if let Some(removed) = self.faces.remove(fdel) {
            self.faces[removed.next].prev = removed.prev;
            self.faces[removed.prev].next = removed.next;
        }
    }

    fn relabel_origin(&mut self, start: HalfEdgeId, org: VertexId) {
        let mut e = start;
        loop {
            let he = &mut self.half_edges[e];
            he.org = org;
            e = he.onext;
            if e == start {
                break;
            }
        }
    }

    fn relabel_left(&mut self, start: HalfEdgeId, left: FaceId) {
        let mut e = start;
        loop {
            let he = &mut self.half_edges[e];
            he.left = left;
            e = he.lnext;
            if e == start {
                break;
            }
        }
    }

    /// Exchange the `onext` successors of `e1` and `e2`, keeping the stored
    /// `lnext` links equal to `sym(oprev)`. Applying it twice with the same
    /// pair restores the previous rings.
    pub(crate) fn splice_rings(&mut self, e1: HalfEdgeId, e2: HalfEdgeId) {
        let e1_onext = self.onext(e1);
        let e2_onext = self.onext(e2);

        self.half_edges[e1].onext = e2_onext;
        let s = self.sym(e2_onext);
        self.half_edges[s].lnext = e1;

        self.half_edges[e2].onext = e1_onext;
        let s = self.sym(e1_onext);
        self.half_edges[s].lnext = e2;
    }

    // =========================================================================
    // Label and representative writes used by the operators
    // =========================================================================

    #[inline]
    pub(crate) fn set_org(&mut self, e: HalfEdgeId, org: VertexId) {
        self.half_edges[e].org = org;
    }

    #[inline]
    pub(crate) fn set_left(&mut self, e: HalfEdgeId, left: FaceId) {
        self.half_edges[e].left = left;
    }

    #[inline]
    pub(crate) fn set_vertex_edge(&mut self, v: VertexId, e: HalfEdgeId) {
        self.vertices[v].edge = e;
    }

    #[inline]
    pub(crate) fn set_face_edge(&mut self, f: FaceId, e: HalfEdgeId) {
        self.faces[f].edge = e;
    }
}

// ============================================================================
// Ring iterators
// ============================================================================

/// Iterator over one half-edge per live edge
#[derive(Debug, Clone)]
pub struct Edges<'a> {
    dcel: &'a Dcel,
    current: HalfEdgeId,
}

impl Iterator for Edges<'_> {
    type Item = HalfEdgeId;

    fn next(&mut self) -> Option<Self::Item> {
        if self.current == self.dcel.ehead {
            return None;
        }
        let value = self.current;
        self.current = self.dcel.half_edges[value].next;
        Some(value)
    }
}

impl FusedIterator for Edges<'_> {}

/// Iterator over live vertices
#[derive(Debug, Clone)]
pub struct Vertices<'a> {
    dcel: &'a Dcel,
    current: VertexId,
}

impl Iterator for Vertices<'_> {
    type Item = VertexId;

    fn next(&mut self) -> Option<Self::Item> {
        if self.current == self.dcel.vhead {
            return None;
        }
        let value = self.current;
        self.current = self.dcel.vertices[value].next;
        Some(value)
    }
}

impl FusedIterator for Vertices<'_> {}

/// Iterator over live faces
#[derive(Debug, Clone)]
pub struct Faces<'a> {
    dcel: &'a Dcel,
    current: FaceId,
}

impl Iterator for Faces<'_> {
    type Item = FaceId;

    fn next(&mut self) -> Option<Self::Item> {
        if self.current == self.dcel.fhead {
            return None;
        }
        let value = self.current;
        self.current = self.dcel.faces[value].next;
        Some(value)
    }
}

impl FusedIterator for Faces<'_> {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::topology::ValidationError;

    #[test]
    fn test_empty_dcel() {
        let dcel = Dcel::new();
        assert!(dcel.is_empty());
        assert_eq!(dcel.num_edges(), 0);
        assert_eq!(dcel.num_vertices(), 0);
        assert_eq!(dcel.num_faces(), 0);
        assert_eq!(dcel.edges().count(), 0);
        assert_eq!(dcel.vertices().count(), 0);
        assert_eq!(dcel.faces().count(), 0);
    }

    #[test]
    fn test_edge_pair_is_self_looped() {
        let mut dcel = Dcel::new();
        let e = dcel.make_edge_pair();
        let s = dcel.sym(e);

        assert_ne!(e, s);
        assert_eq!(dcel.sym(s), e);
        assert_eq!(dcel.onext(e), e);
        assert_eq!(dcel.onext(s), s);
        assert_eq!(dcel.lnext(e), s);
        assert_eq!(dcel.lnext(s), e);
        assert_eq!(dcel.edges().collect::<Vec<_>>(), vec![e]);
    }

    #[test]
    fn test_edge_ring_unlink_from_middle() {
        let mut dcel = Dcel::new();
        let a = dcel.make_edge_pair();
        let b = dcel.make_edge_pair();
        let c = dcel.make_edge_pair();

        dcel.kill_edge_pair(b);
        assert_eq!(dcel.edges().collect::<Vec<_>>(), vec![a, c]);

        // Unlinking through the secondary half behaves the same
        let a_sym = dcel.sym(a);
        dcel.kill_edge_pair(a_sym);
        assert_eq!(dcel.edges().collect::<Vec<_>>(), vec![c]);
        assert_eq!(dcel.num_edges(), 1);
        assert!(!dcel.contains_half_edge(a));
        assert!(!dcel.contains_half_edge(b));
    }

    #[test]
    fn test_vertex_ring_order_and_kill() {
        let mut dcel = Dcel::new();
        let e = dcel.make_edge_pair();
        let s = dcel.sym(e);
        let v1 = dcel.make_vertex(e);
        let v2 = dcel.make_vertex(s);

        assert_eq!(dcel.vertices().collect::<Vec<_>>(), vec![v1, v2]);
        assert_eq!(dcel.org(e), v1);
        assert_eq!(dcel.dest(e), v2);

        dcel.kill_vertex(v1, Some(v2));
        assert_eq!(dcel.org(e), v2);
        assert_eq!(dcel.vertices().collect::<Vec<_>>(), vec![v2]);
        assert!(dcel.vertex(v1).is_none());
    }

    #[test]
    fn test_kill_face_without_replacement_clears_labels() {
        let mut dcel = Dcel::new();
        let e = dcel.make_edge_pair();
        let f = dcel.make_face(e);
        assert_eq!(dcel.left(e), f);
        assert_eq!(dcel.right(e), f);

        dcel.kill_face(f, None);
        assert_eq!(dcel.left(e), FaceId::default());
        assert_eq!(dcel.num_faces(), 0);
    }

    #[test]
    fn test_splice_rings_is_involution() {
        let mut dcel = Dcel::new();
        let a = dcel.make_edge_pair();
        let b = dcel.make_edge_pair();

        dcel.splice_rings(a, b);
        assert_eq!(dcel.onext(a), b);
        assert_eq!(dcel.onext(b), a);
        assert_eq!(dcel.oprev(a), b);

        dcel.splice_rings(a, b);
        assert_eq!(dcel.onext(a), a);
        assert_eq!(dcel.onext(b), b);
        assert_eq!(dcel.lnext(a), dcel.sym(a));
    }

    #[test]
    fn test_checked_access_rejects_sentinels_and_stale_handles() {
        let mut dcel = Dcel::new();
        let e = dcel.make_edge_pair();
        assert!(dcel.try_half_edge(e).is_ok());
        assert!(dcel.half_edge(dcel.ehead).is_none());
        assert!(dcel.vertex(dcel.vhead).is_none());

        dcel.kill_edge_pair(e);
        assert_eq!(dcel.try_half_edge(e), Err(DcelError::InvalidHalfEdge(e)));
    }

    #[test]
    fn test_validate_stops_on_cyclic_edge_ring() {
        let mut dcel = Dcel::new();
        let a = dcel.make_edge();
        dcel.make_edge();
        dcel.make_edge();
        // Short-circuit the edge ring so it never returns to the sentinel
        dcel.half_edges[a].next = a;

        let report = dcel.validate();
        assert!(report.errors.iter().any(|err| matches!(
            err,
            ValidationError::RingCountMismatch { ring: "edge", .. }
        )));
    }
}
