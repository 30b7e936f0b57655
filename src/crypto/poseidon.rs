use alloy_primitives::B256;
use ark_bn254::Fr;
use ark_ff::{BigInteger, PrimeField};
use light_poseidon::{Poseidon, PoseidonHasher};

/// Convert B256 to BN254 field element.
pub(crate) fn b256_to_fr(value: B256) -> Fr {
    Fr::from_be_bytes_mod_order(value.as_ref())
}

/// Convert BN254 field element to B256.
pub(crate) fn fr_to_b256(value: Fr) -> B256 {
    let big_int = value.into_bigint();
    let bytes = big_int.to_bytes_be();
    B256::from_slice(&bytes)
}

/// Encode an unsigned integer as a field element.
pub fn field_from_u64(value: u64) -> B256 {
    fr_to_b256(Fr::from(value))
}

/// Encode a signed integer as a field element.
///
/// Negative values map to their additive inverse mod p, so the in-field
/// representation of -x is p - x.
pub fn field_from_i64(value: i64) -> B256 {
    let magnitude = Fr::from(value.unsigned_abs());
    if value < 0 {
        fr_to_b256(-magnitude)
    } else {
        fr_to_b256(magnitude)
    }
}

/// Poseidon hash with 2 inputs (commitment nonces, pairwise folds).
pub fn poseidon2(a: B256, b: B256) -> B256 {
    let mut hasher = Poseidon::<Fr>::new_circom(2).expect("Failed to create Poseidon hasher");
    let inputs = [b256_to_fr(a), b256_to_fr(b)];
    let result = hasher
        .hash(&inputs)
        .expect("Failed to compute Poseidon hash");
    fr_to_b256(result)
}

/// Poseidon hash with 3 inputs (coordinate fields, triangle vertices).
pub fn poseidon3(a: B256, b: B256, c: B256) -> B256 {
    let mut hasher = Poseidon::<Fr>::new_circom(3).expect("Failed to create Poseidon hasher");
    let inputs = [b256_to_fr(a), b256_to_fr(b), b256_to_fr(c)];
    let result = hasher
        .hash(&inputs)
        .expect("Failed to compute Poseidon hash");
    fr_to_b256(result)
}
