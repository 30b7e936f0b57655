//! In-process prover.
//!
//! Executes the circuit bodies natively and seals each public output
//! with a keyed binding digest standing in for the backend's proof blob.
//! Verification recomputes the seal, so a tampered proof blob or public
//! output is rejected exactly where a real recursive verifier would
//! reject it. Swapping in a real SNARK backend replaces this adapter
//! behind the same port.

use std::sync::OnceLock;

use alloy_primitives::{Bytes, B256};
use sha2::{Digest, Sha256};

use crate::circuits;
use crate::crypto::metadata::digest_halves;
use crate::domain::proof::{
    AttestationProof, ExactPointProof, InOrOutProof, MetadataProof, PointInPolygonProof,
    ProviderProof,
};
use crate::domain::witness::{
    AttestationWitness, MetadataWitness, PointInPolygonWitness, ProviderWitness,
};
use crate::ports::prover::{Prover, ProverError};

/// Per-circuit verification keys. Process-wide and immutable: built once
/// at first use, never mutated after.
#[derive(Debug)]
pub struct CircuitSetup {
    attestation: B256,
    provider: B256,
    point_in_polygon: B256,
    rollup: B256,
    exact_point: B256,
    metadata: B256,
}

static SETUP: OnceLock<CircuitSetup> = OnceLock::new();

/// Derive a verification key from a circuit domain tag.
fn verification_key(tag: &str) -> B256 {
    let mut hasher = Sha256::new();
    hasher.update(b"zk-geopoint.vk.v1:");
    hasher.update(tag.as_bytes());
    B256::from_slice(&hasher.finalize())
}

/// The shared circuit compilation artifacts.
pub fn circuit_setup() -> &'static CircuitSetup {
    SETUP.get_or_init(|| {
        tracing::debug!("initializing circuit setup");
        CircuitSetup {
            attestation: verification_key("attestation"),
            provider: verification_key("provider"),
            point_in_polygon: verification_key("point_in_polygon"),
            rollup: verification_key("in_or_out_rollup"),
            exact_point: verification_key("exact_point"),
            metadata: verification_key("metadata"),
        }
    })
}

/// Seal a public output under a circuit key.
fn seal(key: B256, binding_fields: &[B256]) -> Bytes {
    let mut hasher = Sha256::new();
    hasher.update(b"zk-geopoint.proof.v1:");
    hasher.update(key);
    for field in binding_fields {
        hasher.update(field);
    }
    Bytes::copy_from_slice(&hasher.finalize())
}

/// Recheck a seal; the local equivalent of recursive verification.
fn verify_seal(
    key: B256,
    binding_fields: &[B256],
    proof: &Bytes,
    circuit: &'static str,
) -> Result<(), ProverError> {
    if seal(key, binding_fields) != *proof {
        return Err(ProverError::Verification(format!(
            "{circuit} proof does not verify"
        )));
    }
    Ok(())
}

/// In-process prover over the native circuit bodies.
#[derive(Debug, Default, Clone, Copy)]
pub struct LocalProver;

impl LocalProver {
    pub fn new() -> Self {
        Self
    }

    fn verify_provider(&self, proof: &ProviderProof) -> Result<(), ProverError> {
        verify_seal(
            circuit_setup().provider,
            &proof.public_output.binding_fields(),
            &proof.proof,
            "provider",
        )
    }

    fn verify_point_in_polygon(&self, proof: &PointInPolygonProof) -> Result<(), ProverError> {
        verify_seal(
            circuit_setup().point_in_polygon,
            &proof.public_output.binding_fields(),
            &proof.proof,
            "point-in-polygon",
        )
    }

    fn verify_rollup(&self, proof: &InOrOutProof) -> Result<(), ProverError> {
        verify_seal(
            circuit_setup().rollup,
            &proof.public_output.binding_fields(),
            &proof.proof,
            "in-or-out rollup",
        )
    }
}

impl Prover for LocalProver {
    async fn prove_attestation(
        &self,
        witness: &AttestationWitness,
    ) -> Result<AttestationProof, ProverError> {
        // single suspension point per proving call
        tokio::task::yield_now().await;
        let output = circuits::attestation::prove(witness)?;
        Ok(AttestationProof::new(
            seal(circuit_setup().attestation, &output.binding_fields()),
            output,
        ))
    }

    async fn prove_provider(
        &self,
        witness: &ProviderWitness,
    ) -> Result<ProviderProof, ProverError> {
        tokio::task::yield_now().await;
        verify_seal(
            circuit_setup().attestation,
            &witness.attestation.public_output.binding_fields(),
            &witness.attestation.proof,
            "attestation",
        )?;
        let output = circuits::provider::prove(witness)?;
        Ok(ProviderProof::new(
            seal(circuit_setup().provider, &output.binding_fields()),
            output,
        ))
    }

    async fn prove_point_in_polygon(
        &self,
        witness: &PointInPolygonWitness,
    ) -> Result<PointInPolygonProof, ProverError> {
        tokio::task::yield_now().await;
        self.verify_provider(&witness.provider)?;
        let output = circuits::point_in_polygon::prove(witness)?;
        Ok(PointInPolygonProof::new(
            seal(circuit_setup().point_in_polygon, &output.binding_fields()),
            output,
        ))
    }

    async fn combine_and(
        &self,
        left: &PointInPolygonProof,
        right: &PointInPolygonProof,
    ) -> Result<PointInPolygonProof, ProverError> {
        tokio::task::yield_now().await;
        self.verify_point_in_polygon(left)?;
        self.verify_point_in_polygon(right)?;
        let output =
            circuits::point_in_polygon::combine_and(&left.public_output, &right.public_output)?;
        Ok(PointInPolygonProof::new(
            seal(circuit_setup().point_in_polygon, &output.binding_fields()),
            output,
        ))
    }

    async fn combine_or(
        &self,
        left: &PointInPolygonProof,
        right: &PointInPolygonProof,
    ) -> Result<PointInPolygonProof, ProverError> {
        tokio::task::yield_now().await;
        self.verify_point_in_polygon(left)?;
        self.verify_point_in_polygon(right)?;
        let output =
            circuits::point_in_polygon::combine_or(&left.public_output, &right.public_output)?;
        Ok(PointInPolygonProof::new(
            seal(circuit_setup().point_in_polygon, &output.binding_fields()),
            output,
        ))
    }

    async fn lift_rollup(&self, proof: &PointInPolygonProof) -> Result<InOrOutProof, ProverError> {
        tokio::task::yield_now().await;
        self.verify_point_in_polygon(proof)?;
        let output = circuits::rollup::lift(&proof.public_output);
        Ok(InOrOutProof::new(
            seal(circuit_setup().rollup, &output.binding_fields()),
            output,
        ))
    }

    async fn combine_rollups(
        &self,
        left: &InOrOutProof,
        right: &InOrOutProof,
    ) -> Result<InOrOutProof, ProverError> {
        tokio::task::yield_now().await;
        self.verify_rollup(left)?;
        self.verify_rollup(right)?;
        let output = circuits::rollup::combine(&left.public_output, &right.public_output)?;
        Ok(InOrOutProof::new(
            seal(circuit_setup().rollup, &output.binding_fields()),
            output,
        ))
    }

    async fn prove_exact_reveal(
        &self,
        provider: &ProviderProof,
    ) -> Result<ExactPointProof, ProverError> {
        tokio::task::yield_now().await;
        self.verify_provider(provider)?;
        let output = circuits::reveal::reveal_exact(&provider.public_output);
        Ok(ExactPointProof::new(
            seal(circuit_setup().exact_point, &output.binding_fields()),
            output,
        ))
    }

    async fn prove_metadata(&self, witness: &MetadataWitness) -> Result<MetadataProof, ProverError> {
        tokio::task::yield_now().await;
        self.verify_provider(&witness.provider)?;
        // SHA3-512 runs outside the circuit; only the digest commitment
        // is in-circuit
        let (hi, lo) = digest_halves(&witness.metadata);
        let output = circuits::reveal::bind_metadata(&witness.provider.public_output, hi, lo);
        Ok(MetadataProof::new(
            seal(circuit_setup().metadata, &output.binding_fields()),
            output,
        ))
    }
}
