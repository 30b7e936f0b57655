//! Proof artifacts.
//!
//! Each proof owns its public output and an opaque proof blob in the
//! backend's serialization. Proofs are immutable once produced; combiners
//! consume them and emit fresh proofs.

use alloy_primitives::Bytes;
use serde::{Deserialize, Serialize};

use super::output::{
    AttestationOutput, ExactPointOutput, InOrOutOutput, MetadataOutput, PointInPolygonOutput,
    ProviderOutput,
};

/// Proof that a trusted oracle signed the committed coordinate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttestationProof {
    /// Opaque proof blob in the backend's serialization
    pub proof: Bytes,
    pub public_output: AttestationOutput,
}

impl AttestationProof {
    pub fn new(proof: Bytes, public_output: AttestationOutput) -> Self {
        Self {
            proof,
            public_output,
        }
    }
}

/// Canonical authenticated-coordinate proof consumed by downstream
/// circuits.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderProof {
    pub proof: Bytes,
    pub public_output: ProviderOutput,
}

impl ProviderProof {
    pub fn new(proof: Bytes, public_output: ProviderOutput) -> Self {
        Self {
            proof,
            public_output,
        }
    }
}

/// Proof that the committed coordinate lies inside (or outside) the
/// committed polygon. Also the output shape of the AND/OR combiners,
/// whose polygon commitment is then a fold over the combined inputs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PointInPolygonProof {
    pub proof: Bytes,
    pub public_output: PointInPolygonOutput,
}

impl PointInPolygonProof {
    pub fn new(proof: Bytes, public_output: PointInPolygonOutput) -> Self {
        Self {
            proof,
            public_output,
        }
    }
}

/// Rolled-up two-sided inside/outside accumulator proof.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InOrOutProof {
    pub proof: Bytes,
    pub public_output: InOrOutOutput,
}

impl InOrOutProof {
    pub fn new(proof: Bytes, public_output: InOrOutOutput) -> Self {
        Self {
            proof,
            public_output,
        }
    }
}

/// Proof revealing the authenticated coordinate in the clear.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExactPointProof {
    pub proof: Bytes,
    pub public_output: ExactPointOutput,
}

impl ExactPointProof {
    pub fn new(proof: Bytes, public_output: ExactPointOutput) -> Self {
        Self {
            proof,
            public_output,
        }
    }
}

/// Proof binding a metadata digest commitment to the committed
/// coordinate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetadataProof {
    pub proof: Bytes,
    pub public_output: MetadataOutput,
}

impl MetadataProof {
    pub fn new(proof: Bytes, public_output: MetadataOutput) -> Self {
        Self {
            proof,
            public_output,
        }
    }
}
