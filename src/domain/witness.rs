use alloy_primitives::Bytes;
use serde::{Deserialize, Serialize};

use super::coordinate::NoncedCoordinate;
use super::polygon::Triangle;
use super::proof::{AttestationProof, ProviderProof};
use crate::crypto::signing::{OraclePublicKey, OracleSignature};

/// Witness for the oracle attestation circuit.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AttestationWitness {
    // === Public Inputs ===
    /// The attesting oracle's public key
    pub oracle_key: OraclePublicKey,

    // === Private Inputs ===
    /// Signature over the canonical coordinate serialization
    pub signature: OracleSignature,
    /// The attested coordinate and its commitment nonce
    pub nonced: NoncedCoordinate,
}

/// Witness for the provider circuit: an attestation proof plus the
/// commitment opening it certifies.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderWitness {
    /// Recursively verified attestation proof
    pub attestation: AttestationProof,
    /// Opening of the attested coordinate commitment
    pub nonced: NoncedCoordinate,
}

/// Witness for the point-in-polygon circuit.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PointInPolygonWitness {
    /// Recursively verified provider proof carrying the query point
    pub provider: ProviderProof,
    /// The polygon under test (private; only its commitment is public)
    pub triangle: Triangle,
}

/// Witness for the metadata-binding circuit. The metadata bytes are
/// digested outside the circuit; the circuit commits to the digest.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MetadataWitness {
    /// Recursively verified provider proof
    pub provider: ProviderProof,
    /// Arbitrary metadata bytes, any length
    pub metadata: Bytes,
}
