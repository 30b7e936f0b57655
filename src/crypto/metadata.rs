//! Metadata digest commitment.
//!
//! Arbitrary metadata bytes are hashed with SHA3-512 outside the circuit,
//! the 64-byte digest is split into two 32-byte halves, each half is
//! reduced into the BN254 field, and the two field elements are
//! Poseidon-hashed together. Only the Poseidon step is provable; the
//! SHA3-512 preimage relation is not. A verifier learns that some pair of
//! field elements was committed, and trusts the out-of-circuit hashing to
//! tie that pair to the metadata bytes.

use alloy_primitives::B256;
use ark_bn254::Fr;
use ark_ff::PrimeField;
use sha3::{Digest, Sha3_512};

use super::poseidon::{fr_to_b256, poseidon2};

/// Split SHA3-512(metadata) into two field elements (big-endian halves,
/// each reduced mod the field prime).
pub fn digest_halves(metadata: &[u8]) -> (B256, B256) {
    let digest = Sha3_512::digest(metadata);
    let hi = Fr::from_be_bytes_mod_order(&digest[..32]);
    let lo = Fr::from_be_bytes_mod_order(&digest[32..]);
    (fr_to_b256(hi), fr_to_b256(lo))
}

/// metadata_commitment = poseidon2(sha3_hi, sha3_lo)
pub fn metadata_commitment(metadata: &[u8]) -> B256 {
    let (hi, lo) = digest_halves(metadata);
    poseidon2(hi, lo)
}
