//! Point-in-polygon predicate and its AND/OR combiners.
//!
//! The containment test runs entirely over exact signed integers: an
//! edge-membership pass (a point on any edge is INSIDE) followed by a
//! horizontal ray cast whose parity gives interior membership. Products
//! of coordinate differences are taken over i128, which holds them
//! exactly at every supported fixed-point scale.

use crate::crypto::poseidon::poseidon2;
use crate::domain::coordinate::Coordinate;
use crate::domain::output::PointInPolygonOutput;
use crate::domain::polygon::Triangle;
use crate::domain::witness::PointInPolygonWitness;

use super::CircuitError;

/// Argument validation gate. Runs inside the circuit ahead of any
/// geometry so malformed inputs can never satisfy the constraints.
pub fn validate_arguments(point: &Coordinate, triangle: &Triangle) -> Result<(), CircuitError> {
    point.validate()?;
    triangle.validate()?;
    if point.factor() != triangle.factor() {
        return Err(CircuitError::Coordinate(
            crate::domain::coordinate::CoordinateError::FactorMismatch {
                left: point.factor(),
                right: triangle.factor(),
            },
        ));
    }
    Ok(())
}

/// Whether `p` lies on the closed segment `a`..`b`: inside both
/// coordinate intervals and exactly collinear.
fn edge_contains(p: (i64, i64), a: (i64, i64), b: (i64, i64)) -> bool {
    let (x, y) = p;
    let (x1, y1) = a;
    let (x2, y2) = b;

    let within_x = x >= x1.min(x2) && x <= x1.max(x2);
    let within_y = y >= y1.min(y2) && y <= y1.max(y2);
    let collinear = (x2 - x1) as i128 * (y - y1) as i128 == (x - x1) as i128 * (y2 - y1) as i128;

    within_x && within_y && collinear
}

/// Horizontal ray cast from `p` toward +∞ in x. Each edge that straddles
/// the ray's y and crosses strictly to the right of `p` flips the parity.
///
/// The crossing x is computed with truncated signed integer division. For
/// a horizontal edge the denominator is substituted with 1 and the flip is
/// suppressed; such edges contribute no parity and their membership is
/// handled by `edge_contains`. Vertex-on-ray degeneracies are likewise
/// caught by `edge_contains` before parity matters.
fn ray_cast(p: (i64, i64), vertices: [(i64, i64); 3]) -> bool {
    let (x, y) = p;
    let mut inside = false;
    for i in 0..3 {
        let j = (i + 2) % 3;
        let (xi, yi) = vertices[i];
        let (xj, yj) = vertices[j];

        let straddles = (yi > y) != (yj > y);
        let denominator = (yj - yi) as i128;
        let safe_denominator = if denominator == 0 { 1 } else { denominator };
        let crossing_x =
            xi as i128 + (xj - xi) as i128 * (y - yi) as i128 / safe_denominator;
        let flips = straddles && denominator != 0 && (x as i128) < crossing_x;

        if flips {
            inside = !inside;
        }
    }
    inside
}

/// The full containment predicate: on-edge OR strict-interior. Operates
/// on scaled integers; both arguments must share one fixed-point factor.
pub fn contains(point: &Coordinate, triangle: &Triangle) -> bool {
    let p = point.scaled();
    let vertices = triangle.vertices();

    let on_edge = (0..3).any(|i| edge_contains(p, vertices[i], vertices[(i + 1) % 3]));
    on_edge || ray_cast(p, vertices)
}

/// Point-in-polygon circuit body: validate the arguments, evaluate the
/// predicate, and bind the polygon commitment, the coordinate commitment
/// carried by the provider proof, and the inside bit.
pub fn prove(witness: &PointInPolygonWitness) -> Result<PointInPolygonOutput, CircuitError> {
    let point = &witness.provider.public_output.coordinate;
    validate_arguments(point, &witness.triangle)?;

    Ok(PointInPolygonOutput {
        polygon_commitment: witness.triangle.commitment(),
        coordinate_commitment: witness.provider.public_output.coordinate_commitment,
        is_inside: contains(point, &witness.triangle),
    })
}

/// Shared constraints of the AND/OR combiners: same query point,
/// distinct polygons.
fn check_combinable(
    left: &PointInPolygonOutput,
    right: &PointInPolygonOutput,
) -> Result<(), CircuitError> {
    if left.coordinate_commitment != right.coordinate_commitment {
        return Err(CircuitError::CoordinateMismatch {
            left: left.coordinate_commitment,
            right: right.coordinate_commitment,
        });
    }
    if left.polygon_commitment == right.polygon_commitment {
        return Err(CircuitError::DuplicatePolygon(left.polygon_commitment));
    }
    Ok(())
}

/// Conjunction combiner. Requires equal polarity on both sides: an AND
/// over "in A" and "not in B" has no single honest inside bit, so mixed
/// polarity fails the constraint instead of producing one.
/// The combined polygon commitment is poseidon2(left, right).
pub fn combine_and(
    left: &PointInPolygonOutput,
    right: &PointInPolygonOutput,
) -> Result<PointInPolygonOutput, CircuitError> {
    check_combinable(left, right)?;
    if left.is_inside != right.is_inside {
        return Err(CircuitError::PolarityMismatch);
    }
    Ok(PointInPolygonOutput {
        polygon_commitment: poseidon2(left.polygon_commitment, right.polygon_commitment),
        coordinate_commitment: left.coordinate_commitment,
        is_inside: left.is_inside,
    })
}

/// Disjunction combiner: the output bit is the OR of the input bits.
pub fn combine_or(
    left: &PointInPolygonOutput,
    right: &PointInPolygonOutput,
) -> Result<PointInPolygonOutput, CircuitError> {
    check_combinable(left, right)?;
    Ok(PointInPolygonOutput {
        polygon_commitment: poseidon2(left.polygon_commitment, right.polygon_commitment),
        coordinate_commitment: left.coordinate_commitment,
        is_inside: left.is_inside || right.is_inside,
    })
}
