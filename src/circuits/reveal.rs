//! Exact reveal and metadata binding.
//!
//! Both consume a provider proof. Reveal re-publishes the authenticated
//! coordinate in the clear; metadata binding attaches a digest commitment
//! to the coordinate commitment without revealing either preimage.

use alloy_primitives::B256;

use crate::crypto::poseidon::poseidon2;
use crate::domain::output::{ExactPointOutput, MetadataOutput, ProviderOutput};

/// The recursive verification chain, not this body, is what makes the
/// revealed coordinate trustworthy: the provider proof certifies the
/// coordinate was authenticated.
pub fn reveal_exact(provider: &ProviderOutput) -> ExactPointOutput {
    ExactPointOutput {
        coordinate: provider.coordinate,
    }
}

/// Bind the two field-element halves of an out-of-circuit SHA3-512 digest
/// to the provider's coordinate commitment.
/// metadata_commitment = poseidon2(digest_hi, digest_lo)
pub fn bind_metadata(provider: &ProviderOutput, digest_hi: B256, digest_lo: B256) -> MetadataOutput {
    MetadataOutput {
        coordinate_commitment: provider.coordinate_commitment,
        metadata_commitment: poseidon2(digest_hi, digest_lo),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crypto::metadata::{digest_halves, metadata_commitment};
    use crate::domain::coordinate::Coordinate;
    use crate::domain::output::ProviderSource;

    fn provider_output() -> ProviderOutput {
        ProviderOutput {
            source: ProviderSource::Oracle,
            coordinate_commitment: B256::repeat_byte(0x55),
            coordinate: Coordinate::from_degrees("45.5", "-122.7").unwrap(),
        }
    }

    #[test]
    fn test_reveal_exposes_provider_coordinate() {
        let provider = provider_output();
        assert_eq!(reveal_exact(&provider).coordinate, provider.coordinate);
    }

    #[test]
    fn test_bind_metadata_matches_out_of_circuit_commitment() {
        let provider = provider_output();
        let (hi, lo) = digest_halves(b"hello");
        let output = bind_metadata(&provider, hi, lo);
        assert_eq!(output.metadata_commitment, metadata_commitment(b"hello"));
        assert_eq!(
            output.coordinate_commitment,
            provider.coordinate_commitment
        );
    }

    #[test]
    fn test_different_metadata_different_commitment() {
        let provider = provider_output();
        let (hi_a, lo_a) = digest_halves(b"hello");
        let (hi_b, lo_b) = digest_halves(b"goodbye");
        assert_ne!(
            bind_metadata(&provider, hi_a, lo_a).metadata_commitment,
            bind_metadata(&provider, hi_b, lo_b).metadata_commitment
        );
    }
}
