use alloy_primitives::B256;
use serde::{Deserialize, Serialize};

use super::coordinate::{Coordinate, CoordinateError};
use crate::crypto::poseidon::poseidon3;

/// A triangle over fixed-point coordinates. Larger polygons are composed
/// from triangles by the proof combiners, never proven directly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Triangle {
    pub a: Coordinate,
    pub b: Coordinate,
    pub c: Coordinate,
}

impl Triangle {
    pub fn new(a: Coordinate, b: Coordinate, c: Coordinate) -> Result<Self, CoordinateError> {
        let triangle = Self { a, b, c };
        triangle.validate()?;
        Ok(triangle)
    }

    /// Parse from decimal degree string pairs, one per vertex.
    pub fn from_degrees(
        a: (&str, &str),
        b: (&str, &str),
        c: (&str, &str),
    ) -> Result<Self, CoordinateError> {
        Self::new(
            Coordinate::from_degrees(a.0, a.1)?,
            Coordinate::from_degrees(b.0, b.1)?,
            Coordinate::from_degrees(c.0, c.1)?,
        )
    }

    /// Vertex validation: each vertex in domain, one shared factor, and
    /// nonzero signed area. Vertex orientation (CW vs CCW) is not
    /// constrained; the containment predicate is orientation-independent.
    pub fn validate(&self) -> Result<(), CoordinateError> {
        for vertex in [&self.a, &self.b, &self.c] {
            vertex.validate()?;
        }
        for vertex in [&self.b, &self.c] {
            if vertex.factor() != self.a.factor() {
                return Err(CoordinateError::FactorMismatch {
                    left: self.a.factor(),
                    right: vertex.factor(),
                });
            }
        }
        if self.signed_area_doubled() == 0 {
            return Err(CoordinateError::DegenerateTriangle);
        }
        Ok(())
    }

    pub fn factor(&self) -> u8 {
        self.a.factor()
    }

    /// commitment = poseidon3(hash(a), hash(b), hash(c))
    pub fn commitment(&self) -> B256 {
        poseidon3(self.a.hash(), self.b.hash(), self.c.hash())
    }

    /// The scaled integer vertices consumed by the geometric predicate.
    pub fn vertices(&self) -> [(i64, i64); 3] {
        [self.a.scaled(), self.b.scaled(), self.c.scaled()]
    }

    /// Twice the signed area: (b-a) × (c-a). Exact over i128; zero iff
    /// the vertices are colinear.
    pub fn signed_area_doubled(&self) -> i128 {
        let (ax, ay) = self.a.scaled();
        let (bx, by) = self.b.scaled();
        let (cx, cy) = self.c.scaled();
        (bx - ax) as i128 * (cy - ay) as i128 - (cx - ax) as i128 * (by - ay) as i128
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit_triangle() -> Triangle {
        Triangle::from_degrees(("0", "0"), ("10", "0"), ("0", "10")).unwrap()
    }

    #[test]
    fn test_commitment_matches_formula() {
        let t = unit_triangle();
        assert_eq!(
            t.commitment(),
            poseidon3(t.a.hash(), t.b.hash(), t.c.hash())
        );
    }

    #[test]
    fn test_commitment_depends_on_vertex_order() {
        let t = unit_triangle();
        let swapped = Triangle::new(t.b, t.a, t.c).unwrap();
        assert_ne!(t.commitment(), swapped.commitment());
    }

    #[test]
    fn test_colinear_vertices_rejected() {
        let result = Triangle::from_degrees(("0", "0"), ("5", "5"), ("10", "10"));
        assert_eq!(result.unwrap_err(), CoordinateError::DegenerateTriangle);
    }

    #[test]
    fn test_repeated_vertex_rejected() {
        let result = Triangle::from_degrees(("0", "0"), ("0", "0"), ("10", "10"));
        assert_eq!(result.unwrap_err(), CoordinateError::DegenerateTriangle);
    }

    #[test]
    fn test_mixed_vertex_factors_rejected() {
        let result = Triangle::from_degrees(("0.0", "0.0"), ("10.0", "0.0"), ("0", "10"));
        assert!(matches!(
            result,
            Err(CoordinateError::FactorMismatch { .. })
        ));
    }

    #[test]
    fn test_orientation_both_accepted() {
        // counter-clockwise and clockwise listings of the same vertices
        let ccw = Triangle::from_degrees(("0", "0"), ("10", "0"), ("0", "10"));
        let cw = Triangle::from_degrees(("0", "0"), ("0", "10"), ("10", "0"));
        assert!(ccw.is_ok());
        assert!(cw.is_ok());
    }

    #[test]
    fn test_signed_area_sign_flips_with_orientation() {
        let t = unit_triangle();
        let reversed = Triangle::new(t.a, t.c, t.b).unwrap();
        assert_eq!(t.signed_area_doubled(), -reversed.signed_area_doubled());
    }
}
