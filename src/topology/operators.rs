// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Public topology operators
//!
//! Every operator decides up front which vertex and face rings merge or
//! split, adjusts ring membership through the make/kill primitives, and
//! then performs the pointer surgery with the elementary ring splice.
//!
//! Handles passed in must be live half-edges of this container. Stale or
//! foreign handles panic (and trip a debug assertion first in debug builds).

use super::dcel::Dcel;
use super::handle::HalfEdgeId;
use tracing::trace;

impl Dcel {
    /// Add an isolated edge with two new vertices and one new face.
    /// Returns the primary half-edge of the new edge.
    ///
    /// ```text
    ///   org ──e──> dest      onext(e) = e, lnext(e) = sym(e)
    /// ```
    pub fn make_edge(&mut self) -> HalfEdgeId {
        let enew = self.make_edge_pair();
        let enewsym = self.sym(enew);
        self.make_vertex(enew);
        self.make_vertex(enewsym);
        self.make_face(enew);
        trace!(edge = ?enew, "make_edge");
        enew
    }

    /// General ring editor.
    ///
    /// If `e1` and `e2` have different origins the two vertices are joined,
    /// otherwise the shared vertex is split in two. Independently, different
    /// left faces are joined and a shared left face is split. Calling it
    /// again with the same two half-edges undoes the change.
    pub fn splice(&mut self, e1: HalfEdgeId, e2: HalfEdgeId) {
        self.debug_assert_live(e1);
        self.debug_assert_live(e2);
        if e1 == e2 {
            return;
        }

        let join_vertex = self.org(e1) != self.org(e2);
        if join_vertex {
            self.kill_vertex(self.org(e2), Some(self.org(e1)));
        }
        let join_face = self.left(e1) != self.left(e2);
        if join_face {
            self.kill_face(self.left(e2), Some(self.left(e1)));
        }

        self.splice_rings(e1, e2);

        if !join_vertex {
            self.set_vertex_edge(self.org(e1), e1);
            self.make_vertex(e2);
        }
        if !join_face {
            self.set_face_edge(self.left(e1), e1);
            self.make_face(e2);
        }
        trace!(?e1, ?e2, join_vertex, join_face, "splice");
    }

    /// Add an edge from the destination of `e1` to the origin of `e2`.
    ///
    /// Different left faces are joined, a shared left face is split.
    /// Returns the new half-edge, directed `dest(e1) -> org(e2)`.
    pub fn connect(&mut self, e1: HalfEdgeId, e2: HalfEdgeId) -> HalfEdgeId {
        self.debug_assert_live(e1);
        self.debug_assert_live(e2);
        let enew = self.make_edge_pair();
        let enewsym = self.sym(enew);

        let join_face = self.left(e1) != self.left(e2);
        if join_face {
            self.kill_face(self.left(e2), Some(self.left(e1)));
        }

        self.splice_rings(enew, self.lnext(e1));
        self.splice_rings(enewsym, e2);
        self.set_org(enew, self.dest(e1));
        self.set_left(enew, self.left(e1));
        self.set_org(enewsym, self.org(e2));
        self.set_left(enewsym, self.left(e2));

        if !join_face {
            self.set_face_edge(self.left(enew), enew);
            self.make_face(enewsym);
        }
        trace!(?e1, ?e2, edge = ?enew, join_face, "connect");
        enew
    }

    /// Remove the edge of `edel` (both halves).
    ///
    /// A half-edge alone in its origin ring takes its vertex with it.
    /// Otherwise different faces on the two sides are joined, and a shared
    /// face is split. Undoes [`connect`](Self::connect) exactly.
    pub fn delete_edge(&mut self, edel: HalfEdgeId) {
        self.debug_assert_live(edel);
        let edelsym = self.sym(edel);

        let org_isolated = self.onext(edel) == edel;
        if org_isolated {
            self.kill_vertex(self.org(edel), None);
        } else {
            let join_face = self.left(edel) != self.left(edelsym);
            if join_face {
                self.kill_face(self.left(edelsym), Some(self.left(edel)));
            }

            self.set_vertex_edge(self.org(edel), self.onext(edel));
            self.set_face_edge(self.left(edelsym), self.lnext(edelsym));
            self.splice_rings(edel, self.lnext(edelsym));

            if !join_face {
                self.make_face(edel);
            }
            trace!(edge = ?edel, join_face, "delete_edge: detached origin");
        }

        let dest_isolated = self.onext(edelsym) == edelsym;
        if dest_isolated {
            self.kill_vertex(self.org(edelsym), None);
            self.kill_face(self.left(edelsym), None);
        } else {
            self.set_vertex_edge(self.org(edelsym), self.onext(edelsym));
            self.set_face_edge(self.left(edel), self.lnext(edel));
            self.splice_rings(edelsym, self.lnext(edel));
        }

        trace!(edge = ?edel, org_isolated, dest_isolated, "delete_edge");
        self.kill_edge_pair(edel);
    }

    /// Add an edge from the destination of `e` to a new vertex, inside the
    /// left face of `e`. Returns the new half-edge, directed away from
    /// `dest(e)`.
    pub fn add_edge_vertex(&mut self, e: HalfEdgeId) -> HalfEdgeId {
        self.debug_assert_live(e);
        let enew = self.make_edge_pair();
        let enewsym = self.sym(enew);
        self.splice_rings(enew, self.lnext(e));

        self.set_org(enew, self.dest(e));
        self.set_left(enew, self.left(e));
        self.make_vertex(enewsym);
        self.set_left(enewsym, self.left(e));

        trace!(?e, edge = ?enew, "add_edge_vertex");
        enew
    }

    /// Split the edge of `e` at a new vertex.
    ///
    /// ```text
    /// Before:   a ──e──> b
    /// After:    a ──e──> m ──r──> b
    /// ```
    ///
    /// Returns `r`, the half-edge from the new vertex `m` to the original
    /// destination. Faces on both sides keep their labels.
    pub fn split_edge(&mut self, e: HalfEdgeId) -> HalfEdgeId {
        let enew = self.add_edge_vertex(e);
        let enewsym = self.sym(enew);
        let esym = self.sym(e);

        self.splice_rings(esym, self.lnext(e));
        self.splice_rings(esym, enewsym);

        self.set_org(esym, self.org(enewsym));
        self.set_vertex_edge(self.org(enew), enew);
        self.set_left(enew, self.left(esym));

        trace!(?e, edge = ?enewsym, "split_edge");
        enewsym
    }
}
