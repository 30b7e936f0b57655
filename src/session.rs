//! Proof-session driver.
//!
//! A session owns one private coordinate and orchestrates the circuit
//! DAG over it: authenticate against an oracle, accumulate
//! point-in-polygon proofs, and roll them up or attach reveals and
//! metadata. Sessions are single-owner; share one across tasks only
//! behind external mutual exclusion.

use alloy_primitives::{Bytes, B256};
use thiserror::Error;
use tracing::info;

use crate::crypto::signing::{OraclePublicKey, OracleSignature};
use crate::domain::coordinate::{Coordinate, CoordinateError, NoncedCoordinate};
use crate::domain::polygon::Triangle;
use crate::domain::proof::{
    ExactPointProof, InOrOutProof, MetadataProof, PointInPolygonProof, ProviderProof,
};
use crate::domain::witness::{
    AttestationWitness, MetadataWitness, PointInPolygonWitness, ProviderWitness,
};
use crate::ports::prover::{Prover, ProverError};

/// Driver-level failures. Every variant is recoverable: a failed
/// operation leaves the session state exactly as it was.
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("no authenticated coordinate; run an oracle attestation first")]
    Unauthenticated,

    #[error("rollup requires proofs on both sides (inside: {inside}, outside: {outside})")]
    MissingProofSet { inside: usize, outside: usize },

    #[error("combining requires at least two proofs, got {0}")]
    InsufficientProofs(usize),

    #[error("two proofs cover the same polygon commitment {0}")]
    DuplicatePolygon(B256),

    #[error("conjunction over proofs of opposite polarity")]
    PolarityMismatch,

    #[error("oracle signature rejected")]
    SignatureInvalid,

    #[error(transparent)]
    Coordinate(#[from] CoordinateError),

    #[error("prover error: {0}")]
    Prover(#[from] ProverError),
}

/// A proof session over one private coordinate.
pub struct GeoSession<P> {
    prover: P,
    nonced: NoncedCoordinate,
    provider: Option<ProviderProof>,
    /// Point-in-polygon proofs in call order, split by polarity. The
    /// rollup folds each list left-to-right over this insertion order.
    inside: Vec<PointInPolygonProof>,
    outside: Vec<PointInPolygonProof>,
}

impl<P: Prover> GeoSession<P> {
    /// Open a session over a validated coordinate, drawing a fresh
    /// commitment nonce.
    pub fn new(prover: P, coordinate: Coordinate) -> Result<Self, CoordinateError> {
        coordinate.validate()?;
        Ok(Self {
            prover,
            nonced: NoncedCoordinate::new(coordinate),
            provider: None,
            inside: Vec::new(),
            outside: Vec::new(),
        })
    }

    /// The session coordinate's public commitment.
    pub fn coordinate_commitment(&self) -> B256 {
        self.nonced.commitment()
    }

    /// The provider proof, if the coordinate has been authenticated.
    pub fn provider(&self) -> Option<&ProviderProof> {
        self.provider.as_ref()
    }

    pub fn inside_proofs(&self) -> &[PointInPolygonProof] {
        &self.inside
    }

    pub fn outside_proofs(&self) -> &[PointInPolygonProof] {
        &self.outside
    }

    /// Authenticate the session coordinate from an oracle attestation,
    /// producing and storing the provider proof later operations build on.
    ///
    /// The signature is checked before proving so the common failure
    /// reports as `SignatureInvalid` instead of a prover diagnostic.
    pub async fn authenticate_from_oracle(
        &mut self,
        oracle_key: &OraclePublicKey,
        signature: &OracleSignature,
    ) -> Result<&ProviderProof, SessionError> {
        if oracle_key
            .verify(&self.nonced.coordinate, signature)
            .is_err()
        {
            return Err(SessionError::SignatureInvalid);
        }

        let attestation = self
            .prover
            .prove_attestation(&AttestationWitness {
                oracle_key: oracle_key.clone(),
                signature: signature.clone(),
                nonced: self.nonced.clone(),
            })
            .await?;
        let provider = self
            .prover
            .prove_provider(&ProviderWitness {
                attestation,
                nonced: self.nonced.clone(),
            })
            .await?;

        info!(
            coordinate = %provider.public_output.coordinate_commitment,
            "coordinate authenticated from oracle"
        );
        Ok(self.provider.insert(provider))
    }

    /// Prove the session coordinate against one polygon and record the
    /// proof on the side its polarity selects.
    pub async fn prove_in_polygon(
        &mut self,
        triangle: &Triangle,
    ) -> Result<PointInPolygonProof, SessionError> {
        let provider = self.provider.as_ref().ok_or(SessionError::Unauthenticated)?;
        triangle.validate()?;
        if self.nonced.coordinate.factor() != triangle.factor() {
            return Err(CoordinateError::FactorMismatch {
                left: self.nonced.coordinate.factor(),
                right: triangle.factor(),
            }
            .into());
        }

        let proof = self
            .prover
            .prove_point_in_polygon(&PointInPolygonWitness {
                provider: provider.clone(),
                triangle: *triangle,
            })
            .await?;

        info!(
            polygon = %proof.public_output.polygon_commitment,
            inside = proof.public_output.is_inside,
            "recorded point-in-polygon proof"
        );
        if proof.public_output.is_inside {
            self.inside.push(proof.clone());
        } else {
            self.outside.push(proof.clone());
        }
        Ok(proof)
    }

    /// Prove the session coordinate against each polygon in turn.
    pub async fn prove_in_polygons(
        &mut self,
        triangles: &[Triangle],
    ) -> Result<Vec<PointInPolygonProof>, SessionError> {
        let mut proofs = Vec::with_capacity(triangles.len());
        for triangle in triangles {
            proofs.push(self.prove_in_polygon(triangle).await?);
        }
        Ok(proofs)
    }

    /// Fold a list of point-in-polygon proofs into one conjunction,
    /// left to right.
    pub async fn combine_proofs(
        &self,
        proofs: &[PointInPolygonProof],
    ) -> Result<PointInPolygonProof, SessionError> {
        let Some((first, rest)) = proofs.split_first() else {
            return Err(SessionError::InsufficientProofs(0));
        };
        if rest.is_empty() {
            return Err(SessionError::InsufficientProofs(1));
        }
        preflight_conjunction(proofs)?;
        self.fold_conjunction(first, rest).await
    }

    /// Reveal the authenticated coordinate in the clear.
    pub async fn exact_reveal(&self) -> Result<ExactPointProof, SessionError> {
        let provider = self.provider.as_ref().ok_or(SessionError::Unauthenticated)?;
        Ok(self.prover.prove_exact_reveal(provider).await?)
    }

    /// Bind a metadata byte string to the authenticated coordinate.
    pub async fn attach_metadata(&self, metadata: &[u8]) -> Result<MetadataProof, SessionError> {
        let provider = self.provider.as_ref().ok_or(SessionError::Unauthenticated)?;
        let proof = self
            .prover
            .prove_metadata(&MetadataWitness {
                provider: provider.clone(),
                metadata: Bytes::copy_from_slice(metadata),
            })
            .await?;
        info!(
            metadata = %proof.public_output.metadata_commitment,
            "bound metadata to coordinate"
        );
        Ok(proof)
    }

    /// Roll every recorded proof into one two-sided accumulator proof.
    ///
    /// Each side folds left-to-right over insertion order into a single
    /// conjunction, the two conjunctions lift to accumulators, and the
    /// accumulators combine. Both sides must be populated.
    pub async fn combine_point_in_polygon_proofs(&self) -> Result<InOrOutProof, SessionError> {
        let (Some((in_first, in_rest)), Some((out_first, out_rest))) =
            (self.inside.split_first(), self.outside.split_first())
        else {
            return Err(SessionError::MissingProofSet {
                inside: self.inside.len(),
                outside: self.outside.len(),
            });
        };
        preflight_conjunction(&self.inside)?;
        preflight_conjunction(&self.outside)?;

        let rolled_inside = self.fold_conjunction(in_first, in_rest).await?;
        let rolled_outside = self.fold_conjunction(out_first, out_rest).await?;

        let lifted_inside = self.prover.lift_rollup(&rolled_inside).await?;
        let lifted_outside = self.prover.lift_rollup(&rolled_outside).await?;
        let combined = self
            .prover
            .combine_rollups(&lifted_inside, &lifted_outside)
            .await?;

        info!(
            inside = self.inside.len(),
            outside = self.outside.len(),
            "rolled up point-in-polygon proofs"
        );
        Ok(combined)
    }

    async fn fold_conjunction(
        &self,
        first: &PointInPolygonProof,
        rest: &[PointInPolygonProof],
    ) -> Result<PointInPolygonProof, SessionError> {
        let mut folded = first.clone();
        for next in rest {
            folded = self.prover.combine_and(&folded, next).await?;
        }
        Ok(folded)
    }
}

/// Preflight for conjunction folds: pairwise-distinct polygons, one
/// shared polarity. Lists of zero or one proofs pass vacuously.
fn preflight_conjunction(proofs: &[PointInPolygonProof]) -> Result<(), SessionError> {
    for (index, proof) in proofs.iter().enumerate() {
        for other in &proofs[index + 1..] {
            if proof.public_output.polygon_commitment == other.public_output.polygon_commitment {
                return Err(SessionError::DuplicatePolygon(
                    proof.public_output.polygon_commitment,
                ));
            }
        }
        if proof.public_output.is_inside != proofs[0].public_output.is_inside {
            return Err(SessionError::PolarityMismatch);
        }
    }
    Ok(())
}
