use thiserror::Error;

use crate::circuits::CircuitError;
use crate::domain::proof::{
    AttestationProof, ExactPointProof, InOrOutProof, MetadataProof, PointInPolygonProof,
    ProviderProof,
};
use crate::domain::witness::{
    AttestationWitness, MetadataWitness, PointInPolygonWitness, ProviderWitness,
};

/// Errors that can occur during proof generation.
#[derive(Debug, Error)]
pub enum ProverError {
    #[error("circuit setup failed: {0}")]
    Setup(String),

    #[error("constraint system unsatisfied: {0}")]
    Unsatisfiable(#[from] CircuitError),

    #[error("recursive proof verification failed: {0}")]
    Verification(String),

    #[error("serialization error: {0}")]
    Serialization(String),
}

/// Trait for generating proofs over the geospatial circuit family.
///
/// Proving is the long-running step: a single call may take seconds to
/// minutes on a real backend, so every method is awaitable and callers
/// may run proofs for independent coordinates on separate tasks.
/// Implementations verify every proof embedded in a witness before
/// proving; a tampered input proof yields `Verification`, a witness that
/// cannot satisfy the constraints yields `Unsatisfiable`.
pub trait Prover: Send + Sync {
    /// Prove an oracle attestation.
    ///
    /// The attestation circuit proves:
    /// - The oracle signature verifies over the canonical coordinate
    ///   serialization
    /// - The coordinate lies in the valid geographic domain
    fn prove_attestation(
        &self,
        witness: &AttestationWitness,
    ) -> impl core::future::Future<Output = Result<AttestationProof, ProverError>>;

    /// Normalize an attestation into the canonical provider proof.
    ///
    /// The provider circuit proves:
    /// - The embedded attestation proof verifies
    /// - The coordinate opening matches the attested commitment
    fn prove_provider(
        &self,
        witness: &ProviderWitness,
    ) -> impl core::future::Future<Output = Result<ProviderProof, ProverError>>;

    /// Prove the point-in-polygon predicate.
    ///
    /// The circuit proves:
    /// - The embedded provider proof verifies
    /// - Query point and polygon pass domain validation and share a factor
    /// - The inside bit equals the exact integer containment predicate
    fn prove_point_in_polygon(
        &self,
        witness: &PointInPolygonWitness,
    ) -> impl core::future::Future<Output = Result<PointInPolygonProof, ProverError>>;

    /// Conjoin two point-in-polygon proofs over the same coordinate and
    /// distinct polygons; both inside bits must agree.
    fn combine_and(
        &self,
        left: &PointInPolygonProof,
        right: &PointInPolygonProof,
    ) -> impl core::future::Future<Output = Result<PointInPolygonProof, ProverError>>;

    /// Disjoin two point-in-polygon proofs over the same coordinate and
    /// distinct polygons.
    fn combine_or(
        &self,
        left: &PointInPolygonProof,
        right: &PointInPolygonProof,
    ) -> impl core::future::Future<Output = Result<PointInPolygonProof, ProverError>>;

    /// Lift a point-in-polygon proof into a one-sided accumulator.
    fn lift_rollup(
        &self,
        proof: &PointInPolygonProof,
    ) -> impl core::future::Future<Output = Result<InOrOutProof, ProverError>>;

    /// Combine two accumulators over the same coordinate, folding each
    /// side independently.
    fn combine_rollups(
        &self,
        left: &InOrOutProof,
        right: &InOrOutProof,
    ) -> impl core::future::Future<Output = Result<InOrOutProof, ProverError>>;

    /// Reveal the authenticated coordinate in the clear.
    fn prove_exact_reveal(
        &self,
        provider: &ProviderProof,
    ) -> impl core::future::Future<Output = Result<ExactPointProof, ProverError>>;

    /// Bind a metadata digest commitment to the authenticated coordinate.
    fn prove_metadata(
        &self,
        witness: &MetadataWitness,
    ) -> impl core::future::Future<Output = Result<MetadataProof, ProverError>>;
}
