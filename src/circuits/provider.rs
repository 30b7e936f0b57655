//! Coordinate provider circuit.
//!
//! Normalizes an attestation proof into the canonical provider statement
//! all downstream circuits accept. The witness supplies the commitment
//! opening (coordinate + nonce); the circuit checks the opening against
//! the commitment certified by the attestation and re-exposes the
//! coordinate in exact form for in-circuit consumers.

use crate::domain::output::{ProviderOutput, ProviderSource};
use crate::domain::witness::ProviderWitness;

use super::CircuitError;

pub fn prove(witness: &ProviderWitness) -> Result<ProviderOutput, CircuitError> {
    let attested = witness.attestation.public_output.coordinate_commitment;
    if witness.nonced.commitment() != attested {
        return Err(CircuitError::CommitmentOpeningMismatch);
    }

    Ok(ProviderOutput {
        source: ProviderSource::Oracle,
        coordinate_commitment: attested,
        coordinate: witness.nonced.coordinate,
    })
}

#[cfg(test)]
mod tests {
    use alloy_primitives::{Bytes, B256};

    use super::*;
    use crate::domain::coordinate::{Coordinate, NoncedCoordinate};
    use crate::domain::output::AttestationOutput;
    use crate::domain::proof::AttestationProof;

    fn witness_for(nonced: NoncedCoordinate) -> ProviderWitness {
        ProviderWitness {
            attestation: AttestationProof::new(
                Bytes::new(),
                AttestationOutput {
                    public_key_commitment: B256::repeat_byte(0xAA),
                    coordinate_commitment: nonced.commitment(),
                },
            ),
            nonced,
        }
    }

    #[test]
    fn test_valid_opening_proves() {
        let coordinate = Coordinate::from_degrees("45.5", "-122.7").unwrap();
        let nonced = NoncedCoordinate::new(coordinate);
        let output = prove(&witness_for(nonced.clone())).unwrap();
        assert_eq!(output.source, ProviderSource::Oracle);
        assert_eq!(output.coordinate_commitment, nonced.commitment());
        assert_eq!(output.coordinate, coordinate);
    }

    #[test]
    fn test_wrong_nonce_rejected() {
        let coordinate = Coordinate::from_degrees("45.5", "-122.7").unwrap();
        let mut witness = witness_for(NoncedCoordinate::new(coordinate));
        witness.nonced.nonce = B256::repeat_byte(0x99);
        assert_eq!(
            prove(&witness).unwrap_err(),
            CircuitError::CommitmentOpeningMismatch
        );
    }

    #[test]
    fn test_wrong_coordinate_rejected() {
        let coordinate = Coordinate::from_degrees("45.5", "-122.7").unwrap();
        let mut witness = witness_for(NoncedCoordinate::new(coordinate));
        witness.nonced.coordinate = Coordinate::from_degrees("45.6", "-122.7").unwrap();
        assert_eq!(
            prove(&witness).unwrap_err(),
            CircuitError::CommitmentOpeningMismatch
        );
    }
}
