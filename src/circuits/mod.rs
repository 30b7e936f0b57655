//! Circuit bodies.
//!
//! Each function here is the constraint system of one circuit, evaluated
//! directly: it takes a witness, checks every constraint, and returns the
//! public output or the violated constraint. A prover backend runs these
//! bodies (or their arithmetized equivalents) and refuses to emit a proof
//! when any constraint fails. Recursive verification of input proofs is
//! the backend's responsibility; the bodies here consume the already
//! verified public outputs.

use alloy_primitives::B256;
use thiserror::Error;

use crate::domain::coordinate::CoordinateError;

pub mod attestation;
pub mod point_in_polygon;
pub mod provider;
pub mod reveal;
pub mod rollup;

/// A violated circuit constraint. Surfaces through the prover as a
/// refusal to produce a proof.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CircuitError {
    #[error(transparent)]
    Coordinate(#[from] CoordinateError),

    #[error("oracle signature does not verify against the supplied key")]
    SignatureInvalid,

    #[error("coordinate opening does not match the attested commitment")]
    CommitmentOpeningMismatch,

    #[error("proofs bind different coordinate commitments: {left} vs {right}")]
    CoordinateMismatch { left: B256, right: B256 },

    #[error("both proofs cover polygon commitment {0}")]
    DuplicatePolygon(B256),

    #[error("conjunction over proofs of opposite polarity")]
    PolarityMismatch,

    #[error("combining identical accumulators is a no-op")]
    DuplicateRollup,
}
