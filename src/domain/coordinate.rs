use std::fmt;
use std::str::FromStr;

use alloy_primitives::B256;
use rand::Rng;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::crypto::poseidon::{field_from_i64, field_from_u64, poseidon2, poseidon3};

/// Largest supported decimal scale exponent. A factor of 7 stores
/// coordinates at 10^-7 degree resolution (~1.1 cm at the equator).
pub const MAX_FACTOR: u8 = 7;

/// Validation failures for coordinate and polygon arguments.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CoordinateError {
    #[error("coordinate outside the valid domain: {0}")]
    InvalidCoordinateDomain(String),

    #[error("fixed-point factor mismatch: {left} vs {right}")]
    FactorMismatch { left: u8, right: u8 },

    #[error("triangle vertices are colinear")]
    DegenerateTriangle,
}

/// A signed fixed-point decimal: ±magnitude × 10^-factor.
///
/// All arithmetic downstream is exact signed-integer arithmetic over the
/// scaled magnitudes; no floating point anywhere.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FixedPoint {
    magnitude: u64,
    negative: bool,
    factor: u8,
}

impl FixedPoint {
    /// Create from a scaled integer value and a decimal factor.
    pub fn new(value: i64, factor: u8) -> Result<Self, CoordinateError> {
        if factor > MAX_FACTOR {
            return Err(CoordinateError::InvalidCoordinateDomain(format!(
                "factor {factor} exceeds maximum {MAX_FACTOR}"
            )));
        }
        Ok(Self {
            magnitude: value.unsigned_abs(),
            negative: value < 0,
            factor,
        })
    }

    /// The scaled integer value. Valid for domain-checked values, whose
    /// magnitudes stay well inside i64 range.
    pub fn signed(&self) -> i64 {
        if self.negative {
            -(self.magnitude as i64)
        } else {
            self.magnitude as i64
        }
    }

    pub fn magnitude(&self) -> u64 {
        self.magnitude
    }

    pub fn factor(&self) -> u8 {
        self.factor
    }

    /// Field encoding of the signed value (negatives fold to p - x).
    pub fn field(&self) -> B256 {
        field_from_i64(self.signed())
    }
}

impl FromStr for FixedPoint {
    type Err = CoordinateError;

    /// Parse a decimal string, inferring the factor from the number of
    /// fractional digits. More than `MAX_FACTOR` fractional digits is
    /// rejected rather than rounded.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid =
            |detail: &str| CoordinateError::InvalidCoordinateDomain(format!("{detail}: {s:?}"));

        let (negative, digits) = match s.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, s),
        };
        let (integer_part, fraction_part) = match digits.split_once('.') {
            Some((int, frac)) => (int, frac),
            None => (digits, ""),
        };
        if integer_part.is_empty() && fraction_part.is_empty() {
            return Err(invalid("empty decimal literal"));
        }
        if !integer_part.chars().all(|c| c.is_ascii_digit())
            || !fraction_part.chars().all(|c| c.is_ascii_digit())
        {
            return Err(invalid("non-digit character in decimal literal"));
        }
        let factor = fraction_part.len();
        if factor > MAX_FACTOR as usize {
            return Err(invalid("more than 7 fractional digits"));
        }

        let mut magnitude: u64 = 0;
        for c in integer_part.chars().chain(fraction_part.chars()) {
            magnitude = magnitude
                .checked_mul(10)
                .and_then(|m| m.checked_add(c as u64 - '0' as u64))
                .ok_or_else(|| invalid("magnitude overflow"))?;
        }

        Ok(Self {
            magnitude,
            negative: negative && magnitude != 0,
            factor: factor as u8,
        })
    }
}

impl fmt::Display for FixedPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.negative { "-" } else { "" };
        if self.factor == 0 {
            return write!(f, "{sign}{}", self.magnitude);
        }
        let scale = 10u64.pow(self.factor as u32);
        write!(
            f,
            "{sign}{}.{:0width$}",
            self.magnitude / scale,
            self.magnitude % scale,
            width = self.factor as usize
        )
    }
}

/// A latitude/longitude pair sharing one fixed-point factor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Coordinate {
    pub latitude: FixedPoint,
    pub longitude: FixedPoint,
}

impl Coordinate {
    pub fn new(latitude: FixedPoint, longitude: FixedPoint) -> Result<Self, CoordinateError> {
        let coordinate = Self {
            latitude,
            longitude,
        };
        coordinate.validate()?;
        Ok(coordinate)
    }

    /// Parse from decimal degree strings. Both components must carry the
    /// same number of fractional digits; mixed factors are rejected.
    pub fn from_degrees(latitude: &str, longitude: &str) -> Result<Self, CoordinateError> {
        Self::new(latitude.parse()?, longitude.parse()?)
    }

    /// Domain validation: factor agreement between the components,
    /// |lat| ≤ 90·10^f and |lon| ≤ 180·10^f, factor ≤ 7.
    pub fn validate(&self) -> Result<(), CoordinateError> {
        if self.latitude.factor() != self.longitude.factor() {
            return Err(CoordinateError::FactorMismatch {
                left: self.latitude.factor(),
                right: self.longitude.factor(),
            });
        }
        let factor = self.latitude.factor();
        if factor > MAX_FACTOR {
            return Err(CoordinateError::InvalidCoordinateDomain(format!(
                "factor {factor} exceeds maximum {MAX_FACTOR}"
            )));
        }
        let scale = 10u64.pow(factor as u32);
        if self.latitude.magnitude() > 90 * scale {
            return Err(CoordinateError::InvalidCoordinateDomain(format!(
                "latitude {} exceeds ±90°",
                self.latitude
            )));
        }
        if self.longitude.magnitude() > 180 * scale {
            return Err(CoordinateError::InvalidCoordinateDomain(format!(
                "longitude {} exceeds ±180°",
                self.longitude
            )));
        }
        Ok(())
    }

    pub fn factor(&self) -> u8 {
        self.latitude.factor()
    }

    /// The three field elements (latitude, longitude, factor) consumed by
    /// the circuits and the oracle serialization.
    pub fn fields(&self) -> (B256, B256, B256) {
        (
            self.latitude.field(),
            self.longitude.field(),
            field_from_u64(self.factor() as u64),
        )
    }

    /// hash = poseidon3(latitude, longitude, factor)
    pub fn hash(&self) -> B256 {
        let (lat, lon, factor) = self.fields();
        poseidon3(lat, lon, factor)
    }

    /// The scaled integer pair used by the geometric predicate.
    pub fn scaled(&self) -> (i64, i64) {
        (self.latitude.signed(), self.longitude.signed())
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.latitude, self.longitude)
    }
}

/// A coordinate carrying a single-use commitment nonce.
///
/// The nonce prevents grinding attacks against the coordinate commitment:
/// without it, the commitment of any coordinate could be precomputed from
/// the (small) space of valid fixed-point coordinates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NoncedCoordinate {
    pub coordinate: Coordinate,
    pub nonce: B256,
}

impl NoncedCoordinate {
    /// Wrap a coordinate with a fresh random nonce.
    pub fn new(coordinate: Coordinate) -> Self {
        let mut rng = rand::thread_rng();
        let mut nonce_bytes = [0u8; 32];
        rng.fill(&mut nonce_bytes[5..]); // keep within the field

        Self {
            coordinate,
            nonce: B256::from(nonce_bytes),
        }
    }

    /// Wrap with a specific nonce (for testing or reconstruction).
    pub fn with_nonce(coordinate: Coordinate, nonce: B256) -> Self {
        Self { coordinate, nonce }
    }

    /// commitment = poseidon2(poseidon3(lat, lon, factor), nonce)
    pub fn commitment(&self) -> B256 {
        poseidon2(self.coordinate.hash(), self.nonce)
    }
}
