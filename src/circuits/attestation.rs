//! Oracle attestation circuit.
//!
//! Verifies an ECDSA signature binding a trusted oracle key to a
//! coordinate, and emits the attested-coordinate commitment. Coordinate
//! domain validation is gated inside the circuit: an out-of-range
//! coordinate cannot satisfy the constraints no matter who signed it.

use crate::domain::output::AttestationOutput;
use crate::domain::witness::AttestationWitness;

use super::CircuitError;

pub fn prove(witness: &AttestationWitness) -> Result<AttestationOutput, CircuitError> {
    witness.nonced.coordinate.validate()?;

    witness
        .oracle_key
        .verify(&witness.nonced.coordinate, &witness.signature)
        .map_err(|_| CircuitError::SignatureInvalid)?;

    Ok(AttestationOutput {
        public_key_commitment: witness.oracle_key.commitment(),
        coordinate_commitment: witness.nonced.commitment(),
    })
}
