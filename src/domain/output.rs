//! Public outputs of the five circuits.
//!
//! Each struct is the statement a proof certifies. `binding_fields`
//! returns the canonical field-element encoding the verifier checks the
//! proof against; the encodings are pairwise domain-separated by the
//! per-circuit verification keys, so two circuits never share a binding.

use alloy_primitives::B256;
use serde::{Deserialize, Serialize};

use super::coordinate::Coordinate;
use crate::crypto::poseidon::field_from_u64;

/// Accepted coordinate authentication sources. Only the oracle source
/// exists today; additional sources slot in as new variants without
/// changing any downstream circuit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProviderSource {
    Oracle,
}

impl ProviderSource {
    /// Field tag identifying the source in the provider binding.
    pub fn tag(&self) -> B256 {
        match self {
            ProviderSource::Oracle => field_from_u64(1),
        }
    }
}

/// Output of the oracle attestation circuit: the attested coordinate,
/// bound to the oracle key that signed it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttestationOutput {
    /// poseidon2(pk.x, pk.y) of the attesting oracle key
    pub public_key_commitment: B256,
    /// poseidon2(poseidon3(lat, lon, factor), nonce) of the coordinate
    pub coordinate_commitment: B256,
}

impl AttestationOutput {
    pub fn binding_fields(&self) -> Vec<B256> {
        vec![self.public_key_commitment, self.coordinate_commitment]
    }
}

/// Output of the provider circuit: the canonical authenticated-coordinate
/// statement every downstream circuit consumes.
///
/// The coordinate travels in exact form. Provider proofs are only ever
/// composed inside other circuits, never published alone, so carrying the
/// plaintext here does not leak it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderOutput {
    pub source: ProviderSource,
    pub coordinate_commitment: B256,
    pub coordinate: Coordinate,
}

impl ProviderOutput {
    pub fn binding_fields(&self) -> Vec<B256> {
        let (lat, lon, factor) = self.coordinate.fields();
        vec![
            self.source.tag(),
            self.coordinate_commitment,
            lat,
            lon,
            factor,
        ]
    }
}

/// Output of the point-in-polygon circuit and its AND/OR combiners.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PointInPolygonOutput {
    pub polygon_commitment: B256,
    pub coordinate_commitment: B256,
    pub is_inside: bool,
}

impl PointInPolygonOutput {
    pub fn binding_fields(&self) -> Vec<B256> {
        vec![
            self.polygon_commitment,
            self.coordinate_commitment,
            field_from_u64(self.is_inside as u64),
        ]
    }
}

/// Output of the in-or-out rollup: a two-sided accumulator over polygon
/// commitments. A side commitment of zero means that side is empty;
/// otherwise it is a Poseidon fold over the constituent polygons.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct InOrOutOutput {
    pub inside_commitment: B256,
    pub outside_commitment: B256,
    pub coordinate_commitment: B256,
}

impl InOrOutOutput {
    pub fn binding_fields(&self) -> Vec<B256> {
        vec![
            self.inside_commitment,
            self.outside_commitment,
            self.coordinate_commitment,
        ]
    }
}

/// Output of the exact-reveal circuit: the authenticated coordinate in
/// the clear.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExactPointOutput {
    pub coordinate: Coordinate,
}

impl ExactPointOutput {
    pub fn binding_fields(&self) -> Vec<B256> {
        let (lat, lon, factor) = self.coordinate.fields();
        vec![lat, lon, factor]
    }
}

/// Output of the metadata-binding circuit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetadataOutput {
    pub coordinate_commitment: B256,
    /// poseidon2 over the two halves of the out-of-circuit SHA3-512 digest
    pub metadata_commitment: B256,
}

impl MetadataOutput {
    pub fn binding_fields(&self) -> Vec<B256> {
        vec![self.coordinate_commitment, self.metadata_commitment]
    }
}
