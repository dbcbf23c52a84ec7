// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Generation-tagged handles into the DCEL arenas
//!
//! A handle stays valid until the record it names is freed. Freed slots are
//! recycled with a bumped generation, so a stale handle never resolves to a
//! newer record. The default (null) handle names no record and is used as the
//! placeholder label while an operator is reassigning a ring.

use slotmap::new_key_type;

new_key_type! {
    /// Handle to one directed half of an edge
    pub struct HalfEdgeId;

    /// Handle to a vertex (an `onext` ring)
    pub struct VertexId;

    /// Handle to a face (an `lnext` ring)
    pub struct FaceId;
}
