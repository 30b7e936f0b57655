//! Proof-composition engine for private geospatial predicates.
//!
//! The crate proves statements of the form "a coordinate lies inside (or
//! outside) a polygon", "a coordinate was attested by a trusted oracle",
//! or "metadata is cryptographically bound to a coordinate" without
//! revealing the coordinate itself. Five circuits compose, leaves first:
//!
//! 1. oracle attestation — ECDSA verification binding a trusted key to a
//!    coordinate commitment;
//! 2. coordinate provider — normalizes any accepted authentication source
//!    into one canonical proof shape;
//! 3. point-in-polygon — the core predicate over exact fixed-point integer
//!    coordinates, plus AND/OR combiners over same-coordinate proofs;
//! 4. in-or-out rollup — a two-sided accumulator over inside/outside
//!    polygon sets;
//! 5. exact reveal and metadata binding.
//!
//! [`session::GeoSession`] drives the composition; the SNARK backend sits
//! behind [`ports::prover::Prover`].

pub mod adapters;
pub mod circuits;
pub mod crypto;
pub mod domain;
pub mod ports;
pub mod session;

pub use session::{GeoSession, SessionError};
