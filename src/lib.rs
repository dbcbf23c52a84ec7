// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Planar DCEL
//!
//! A topology-only doubly-connected edge list for planar subdivisions.
//! Records live in generation-tagged arenas and are edited through a small
//! set of splice-based operators that keep vertex, face and edge rings
//! consistent after every call.
//!
//! ```
//! use planar_dcel::Dcel;
//!
//! let mut dcel = Dcel::new();
//! let e1 = dcel.make_edge();
//! let e2 = dcel.make_edge();
//! let e3 = dcel.connect(e1, e2);
//!
//! assert_eq!(dcel.org(e3), dcel.dest(e1));
//! assert_eq!(dcel.dest(e3), dcel.org(e2));
//! assert_eq!(dcel.euler_characteristic(), 2);
//! ```

pub mod error;
pub mod stress;
pub mod topology;

pub use error::{DcelError, DcelResult};
pub use stress::{StressConfig, StressReport, StressRunner};
pub use topology::{
    Dcel, Face, FaceId, HalfEdge, HalfEdgeId, ValidationError, ValidationReport, Vertex, VertexId,
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic_connect() {
        let mut dcel = Dcel::new();
        let e1 = dcel.make_edge();
        let e2 = dcel.make_edge();
        let e3 = dcel.connect(e1, e2);

        assert_eq!(dcel.num_edges(), 3);
        assert_eq!(dcel.num_vertices(), 4);
        assert_eq!(dcel.num_faces(), 1);
        assert!(dcel.validate().is_valid());
        assert_eq!(dcel.onext(e3), dcel.sym(e1));
    }
}
