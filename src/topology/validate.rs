// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Structural validation
//!
//! Walks every live record and checks the ring invariants the operators are
//! supposed to maintain. Intended for tests and debugging; cost is linear in
//! the size of the mesh.

use super::dcel::Dcel;
use super::handle::{FaceId, HalfEdgeId, VertexId};
use crate::error::DcelError;
use slotmap::SecondaryMap;
use thiserror::Error;

/// A broken invariant
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// `sym(sym(e)) != e` or `sym(e) == e`
    #[error("half-edge {half_edge:?} has an inconsistent sym")]
    SymMismatch { half_edge: HalfEdgeId },
    /// A stored half-edge link names a freed record
    #[error("half-edge {half_edge:?} links to a freed half-edge")]
    DanglingLink { half_edge: HalfEdgeId },
    /// `lnext(sym(onext(e))) != e`
    #[error("half-edge {half_edge:?} has onext/lnext links out of step")]
    RingLinkMismatch { half_edge: HalfEdgeId },
    /// `org(e)` names no live vertex
    #[error("half-edge {half_edge:?} has no live origin")]
    InvalidOrigin { half_edge: HalfEdgeId },
    /// `left(e)` names no live face
    #[error("half-edge {half_edge:?} has no live left face")]
    InvalidLeftFace { half_edge: HalfEdgeId },
    /// The representative does not have the vertex as origin
    #[error("vertex {vertex:?} has a representative outside its ring")]
    InvalidVertexEdge { vertex: VertexId },
    /// The representative does not have the face on its left
    #[error("face {face:?} has a representative outside its ring")]
    InvalidFaceEdge { face: FaceId },
    /// A half-edge in the vertex's `onext` orbit carries another origin
    #[error("vertex {vertex:?} ring contains half-edge {half_edge:?} with another origin")]
    MixedVertexRing { vertex: VertexId, half_edge: HalfEdgeId },
    /// A half-edge in the face's `lnext` orbit carries another left face
    #[error("face {face:?} ring contains half-edge {half_edge:?} with another left face")]
    MixedFaceRing { face: FaceId, half_edge: HalfEdgeId },
    /// Object ring and arena disagree on how many objects are live
    #[error("{ring} ring visits {visited} objects but {live} are live")]
    RingCountMismatch {
        ring: &'static str,
        visited: usize,
        live: usize,
    },
    /// Vertex or face rings cover a half-edge more or less than once
    #[error("{ring} rings cover {covered} half-edges but {live} are live")]
    CoverageMismatch {
        ring: &'static str,
        covered: usize,
        live: usize,
    },
}

/// Validation report
#[derive(Debug, Default)]
pub struct ValidationReport {
    /// Errors found, in discovery order
    pub errors: Vec<ValidationError>,
}

impl ValidationReport {
    /// Whether no invariant is broken
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn add_error(&mut self, error: ValidationError) {
        self.errors.push(error);
    }

    /// First error as a [`DcelError`], or `Ok(())`
    pub fn into_result(self) -> Result<(), DcelError> {
        match self.errors.into_iter().next() {
            Some(error) => Err(error.into()),
            None => Ok(()),
        }
    }
}

impl Dcel {
    /// Check all topological invariants
    pub fn validate(&self) -> ValidationReport {
        let mut report = ValidationReport::default();

        let mut half_edges = Vec::with_capacity(self.num_half_edges());
        // A ring that misses the sentinel shows up as one edge too many
        for e in self.edges().take(self.num_edges() + 1) {
            half_edges.push(e);
            half_edges.push(self.sym(e));
        }
        if half_edges.len() != self.num_half_edges() {
            report.add_error(ValidationError::RingCountMismatch {
                ring: "edge",
                visited: half_edges.len() / 2,
                live: self.num_edges(),
            });
        }

        for &e in &half_edges {
            self.validate_half_edge(e, &mut report);
        }
        if !report.is_valid() {
            // Ring walks below assume the links are sound
            return report;
        }

        self.validate_vertices(&mut report);
        self.validate_faces(&mut report);
        report
    }

    fn validate_half_edge(&self, e: HalfEdgeId, report: &mut ValidationReport) {
        let Some(he) = self.half_edge(e) else {
            report.add_error(ValidationError::DanglingLink { half_edge: e });
            return;
        };

        match self.half_edge(he.sym) {
            Some(twin) if twin.sym == e && he.sym != e => {}
            _ => report.add_error(ValidationError::SymMismatch { half_edge: e }),
        }

        if !self.contains_half_edge(he.onext) || !self.contains_half_edge(he.lnext) {
            report.add_error(ValidationError::DanglingLink { half_edge: e });
            return;
        }
        let in_step = self
            .half_edge(he.onext)
            .and_then(|onext| self.half_edge(onext.sym))
            .is_some_and(|twin| twin.lnext == e);
        if !in_step {
            report.add_error(ValidationError::RingLinkMismatch { half_edge: e });
        }

        if !self.contains_vertex(he.org) {
            report.add_error(ValidationError::InvalidOrigin { half_edge: e });
        }
        if !self.contains_face(he.left) {
            report.add_error(ValidationError::InvalidLeftFace { half_edge: e });
        }
    }

    fn validate_vertices(&self, report: &mut ValidationReport) {
        let mut seen: SecondaryMap<HalfEdgeId, ()> = SecondaryMap::new();
        let mut visited = 0;

        for v in self.vertices() {
            visited += 1;
            let start = self.vertex_edge(v);
            if !self.contains_half_edge(start) || self.org(start) != v {
                report.add_error(ValidationError::InvalidVertexEdge { vertex: v });
                continue;
            }
            for e in self.vertex_ring(v).take(self.num_half_edges()) {
                if self.org(e) != v {
                    report.add_error(ValidationError::MixedVertexRing {
                        vertex: v,
                        half_edge: e,
                    });
                }
                seen.insert(e, ());
            }
        }

        if visited != self.num_vertices() {
            report.add_error(ValidationError::RingCountMismatch {
                ring: "vertex",
                visited,
                live: self.num_vertices(),
            });
        }
        if seen.len() != self.num_half_edges() {
            report.add_error(ValidationError::CoverageMismatch {
                ring: "vertex",
                covered: seen.len(),
                live: self.num_half_edges(),
            });
        }
    }

    fn validate_faces(&self, report: &mut ValidationReport) {
        let mut seen: SecondaryMap<HalfEdgeId, ()> = SecondaryMap::new();
        let mut visited = 0;

        for f in self.faces() {
            visited += 1;
            let start = self.face_edge(f);
            if !self.contains_half_edge(start) || self.left(start) != f {
                report.add_error(ValidationError::InvalidFaceEdge { face: f });
                continue;
            }
            for e in self.face_ring(f).take(self.num_half_edges()) {
                if self.left(e) != f {
                    report.add_error(ValidationError::MixedFaceRing { face: f, half_edge: e });
                }
                seen.insert(e, ());
            }
        }

        if visited != self.num_faces() {
            report.add_error(ValidationError::RingCountMismatch {
                ring: "face",
                visited,
                live: self.num_faces(),
            });
        }
        if seen.len() != self.num_half_edges() {
            report.add_error(ValidationError::CoverageMismatch {
                ring: "face",
                covered: seen.len(),
                live: self.num_half_edges(),
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_is_valid() {
        assert!(Dcel::new().validate().is_valid());
        assert_eq!(Dcel::new().validate().into_result(), Ok(()));
    }

    #[test]
    fn test_detects_mislabelled_origin() {
        let mut dcel = Dcel::new();
        let e1 = dcel.make_edge();
        let e2 = dcel.make_edge();
        dcel.set_org(e1, dcel.org(e2));

        let report = dcel.validate();
        assert!(!report.is_valid());
        assert!(report
            .errors
            .iter()
            .any(|err| matches!(err, ValidationError::InvalidVertexEdge { .. })));
    }

    #[test]
    fn test_detects_unlabelled_merge() {
        let mut dcel = Dcel::new();
        let e1 = dcel.make_edge();
        let e2 = dcel.make_edge();
        // Raw ring splice without the label bookkeeping of `splice`
        dcel.splice_rings(e1, e2);

        let report = dcel.validate();
        assert!(report
            .errors
            .iter()
            .any(|err| matches!(err, ValidationError::MixedVertexRing { .. })));
        assert!(report
            .errors
            .iter()
            .any(|err| matches!(err, ValidationError::MixedFaceRing { .. })));
        assert!(matches!(report.into_result(), Err(DcelError::Corrupt(_))));
    }
}
