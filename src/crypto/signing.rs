use alloy_primitives::B256;
use k256::ecdsa::signature::{Signer, Verifier};
use k256::ecdsa::{Signature, SigningKey, VerifyingKey};
use serde::{Deserialize, Serialize};

use crate::crypto::poseidon::poseidon2;
use crate::domain::coordinate::Coordinate;

/// Canonical byte serialization of a coordinate for oracle signing:
/// the three field elements (latitude, longitude, factor) concatenated
/// big-endian, 96 bytes total.
pub fn canonical_message(coordinate: &Coordinate) -> [u8; 96] {
    let (lat, lon, factor) = coordinate.fields();
    let mut message = [0u8; 96];
    message[..32].copy_from_slice(lat.as_slice());
    message[32..64].copy_from_slice(lon.as_slice());
    message[64..].copy_from_slice(factor.as_slice());
    message
}

/// Public key of a trusted location oracle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OraclePublicKey(#[serde(with = "pubkey_serde")] pub k256::PublicKey);

impl OraclePublicKey {
    /// Create from compressed SEC1 bytes (33 bytes).
    pub fn from_sec1_bytes(bytes: &[u8]) -> Result<Self, k256::elliptic_curve::Error> {
        Ok(Self(k256::PublicKey::from_sec1_bytes(bytes)?))
    }

    /// Serialize to compressed SEC1 format (33 bytes).
    pub fn to_sec1_bytes(&self) -> Vec<u8> {
        use k256::elliptic_curve::sec1::ToEncodedPoint;
        self.0.to_encoded_point(true).as_bytes().to_vec()
    }

    /// Commitment to the key: poseidon2 over the affine point coordinates.
    /// key_commitment = poseidon2(pk.x, pk.y)
    pub fn commitment(&self) -> B256 {
        use k256::elliptic_curve::sec1::ToEncodedPoint;
        let point = self.0.to_encoded_point(false);
        let x = B256::from_slice(point.x().expect("affine point has x"));
        let y = B256::from_slice(point.y().expect("affine point has y"));
        poseidon2(x, y)
    }

    /// Verify a coordinate attestation signed by this key.
    pub fn verify(
        &self,
        coordinate: &Coordinate,
        signature: &OracleSignature,
    ) -> Result<(), k256::ecdsa::Error> {
        let message = canonical_message(coordinate);
        VerifyingKey::from(&self.0).verify(&message, &signature.0)
    }
}

/// ECDSA signature over the canonical coordinate serialization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OracleSignature(#[serde(with = "signature_serde")] pub Signature);

impl OracleSignature {
    /// Parse a fixed-size 64-byte (r || s) signature.
    pub fn from_slice(bytes: &[u8]) -> Result<Self, k256::ecdsa::Error> {
        Ok(Self(Signature::from_slice(bytes)?))
    }

    /// Serialize to fixed-size 64-byte (r || s) form.
    pub fn to_bytes(&self) -> [u8; 64] {
        let mut bytes = [0u8; 64];
        bytes.copy_from_slice(self.0.to_bytes().as_slice());
        bytes
    }
}

/// A signing oracle. Production oracles hold their key elsewhere; this
/// keypair exists for provisioning and test fixtures.
#[derive(Debug, Clone)]
pub struct OracleKeypair {
    signing_key: SigningKey,
}

impl OracleKeypair {
    /// Generate a fresh oracle keypair.
    pub fn random() -> Self {
        Self {
            signing_key: SigningKey::random(&mut rand::thread_rng()),
        }
    }

    /// Create from raw scalar bytes (32 bytes).
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, k256::ecdsa::Error> {
        Ok(Self {
            signing_key: SigningKey::from_slice(bytes)?,
        })
    }

    pub fn public_key(&self) -> OraclePublicKey {
        OraclePublicKey(self.signing_key.verifying_key().into())
    }

    /// Attest a coordinate: sign its canonical serialization.
    pub fn attest(&self, coordinate: &Coordinate) -> OracleSignature {
        let message = canonical_message(coordinate);
        OracleSignature(self.signing_key.sign(&message))
    }
}

mod pubkey_serde {
    use k256::elliptic_curve::sec1::ToEncodedPoint;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(key: &k256::PublicKey, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let bytes = key.to_encoded_point(true);
        serializer.serialize_bytes(bytes.as_bytes())
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<k256::PublicKey, D::Error>
    where
        D: Deserializer<'de>,
    {
        let bytes: Vec<u8> = Deserialize::deserialize(deserializer)?;
        k256::PublicKey::from_sec1_bytes(&bytes).map_err(serde::de::Error::custom)
    }
}

mod signature_serde {
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(
        signature: &k256::ecdsa::Signature,
        serializer: S,
    ) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_bytes(signature.to_bytes().as_slice())
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<k256::ecdsa::Signature, D::Error>
    where
        D: Deserializer<'de>,
    {
        let bytes: Vec<u8> = Deserialize::deserialize(deserializer)?;
        k256::ecdsa::Signature::from_slice(&bytes).map_err(serde::de::Error::custom)
    }
}
