//! End-to-end scenarios driven through the session driver and the
//! in-process prover: attestation → provider → point-in-polygon →
//! combiners → rollup, plus exact reveal and metadata binding.

use alloy_primitives::B256;
use ark_bn254::Fr;
use ark_ff::{BigInteger, PrimeField};
use sha3::{Digest, Sha3_512};

use zk_geopoint::adapters::local::LocalProver;
use zk_geopoint::crypto::poseidon::poseidon2;
use zk_geopoint::crypto::signing::OracleKeypair;
use zk_geopoint::domain::coordinate::Coordinate;
use zk_geopoint::domain::polygon::Triangle;
use zk_geopoint::ports::prover::Prover;
use zk_geopoint::session::{GeoSession, SessionError};

/// Right triangle with legs of 10° on each axis: vertices (0,0),
/// (10,0), (0,10) at factor 7.
fn leg_triangle() -> Triangle {
    Triangle::from_degrees(
        ("0.0000000", "0.0000000"),
        ("10.0000000", "0.0000000"),
        ("0.0000000", "10.0000000"),
    )
    .unwrap()
}

/// A second triangle containing (1, 1): vertices (-1,-1), (-1,4),
/// (4,-1) at factor 7.
fn companion_triangle() -> Triangle {
    Triangle::from_degrees(
        ("-1.0000000", "-1.0000000"),
        ("-1.0000000", "4.0000000"),
        ("4.0000000", "-1.0000000"),
    )
    .unwrap()
}

async fn authenticated_session(lat: &str, lon: &str) -> GeoSession<LocalProver> {
    let coordinate = Coordinate::from_degrees(lat, lon).unwrap();
    let mut session = GeoSession::new(LocalProver::new(), coordinate).unwrap();
    let oracle = OracleKeypair::random();
    let signature = oracle.attest(&coordinate);
    session
        .authenticate_from_oracle(&oracle.public_key(), &signature)
        .await
        .unwrap();
    session
}

#[tokio::test]
async fn interior_point_proves_inside() {
    let mut session = authenticated_session("1.0000000", "1.0000000").await;
    let proof = session.prove_in_polygon(&leg_triangle()).await.unwrap();
    assert!(proof.public_output.is_inside);
    assert_eq!(
        proof.public_output.polygon_commitment,
        leg_triangle().commitment()
    );
    assert_eq!(
        proof.public_output.coordinate_commitment,
        session.coordinate_commitment()
    );
}

#[tokio::test]
async fn exterior_point_proves_outside() {
    let mut session = authenticated_session("10.0000000", "10.0000000").await;
    let proof = session.prove_in_polygon(&leg_triangle()).await.unwrap();
    assert!(!proof.public_output.is_inside);
}

#[tokio::test]
async fn point_on_edge_proves_inside() {
    // on the edge between (0,0) and (0,10)
    let mut session = authenticated_session("0.0000000", "5.0000000").await;
    let proof = session.prove_in_polygon(&leg_triangle()).await.unwrap();
    assert!(proof.public_output.is_inside);
}

#[tokio::test]
async fn conjunction_of_two_inside_proofs() {
    let mut session = authenticated_session("1.0000000", "1.0000000").await;
    let proofs = session
        .prove_in_polygons(&[leg_triangle(), companion_triangle()])
        .await
        .unwrap();
    assert!(proofs.iter().all(|p| p.public_output.is_inside));

    let combined = session.combine_proofs(&proofs).await.unwrap();
    assert!(combined.public_output.is_inside);
    assert_eq!(
        combined.public_output.polygon_commitment,
        poseidon2(
            leg_triangle().commitment(),
            companion_triangle().commitment()
        )
    );
    assert_eq!(
        combined.public_output.coordinate_commitment,
        session.coordinate_commitment()
    );
}

#[tokio::test]
async fn oracle_test_vector_attests_then_proves() {
    // fixed oracle key; ECDSA signing is deterministic, so the whole
    // vector is reproducible
    let oracle = OracleKeypair::from_bytes(&[0x42; 32]).unwrap();
    let coordinate = Coordinate::from_degrees("1.0000000", "1.0000000").unwrap();
    let signature = oracle.attest(&coordinate);

    let mut session = GeoSession::new(LocalProver::new(), coordinate).unwrap();
    let provider_commitment = session
        .authenticate_from_oracle(&oracle.public_key(), &signature)
        .await
        .unwrap()
        .public_output
        .coordinate_commitment;
    assert_eq!(provider_commitment, session.coordinate_commitment());

    let proof = session.prove_in_polygon(&leg_triangle()).await.unwrap();
    assert!(proof.public_output.is_inside);
}

#[tokio::test]
async fn metadata_commitment_matches_digest_chain() {
    let session = authenticated_session("1.0000000", "1.0000000").await;
    let proof = session.attach_metadata(b"hello").await.unwrap();

    // recompute poseidon2 over the two halves of SHA3-512("hello")
    let digest = Sha3_512::digest(b"hello");
    let hi = Fr::from_be_bytes_mod_order(&digest[..32]);
    let lo = Fr::from_be_bytes_mod_order(&digest[32..]);
    let expected = poseidon2(
        B256::from_slice(&hi.into_bigint().to_bytes_be()),
        B256::from_slice(&lo.into_bigint().to_bytes_be()),
    );

    assert_eq!(proof.public_output.metadata_commitment, expected);
    assert_eq!(
        proof.public_output.coordinate_commitment,
        session.coordinate_commitment()
    );
}

#[tokio::test]
async fn exact_reveal_exposes_the_authenticated_coordinate() {
    let session = authenticated_session("45.5000000", "-122.6784000").await;
    let proof = session.exact_reveal().await.unwrap();
    assert_eq!(
        proof.public_output.coordinate,
        Coordinate::from_degrees("45.5000000", "-122.6784000").unwrap()
    );
}

#[tokio::test]
async fn rollup_accumulates_both_sides_in_insertion_order() {
    let far = Triangle::from_degrees(
        ("20.0000000", "20.0000000"),
        ("30.0000000", "20.0000000"),
        ("20.0000000", "30.0000000"),
    )
    .unwrap();
    let farther = Triangle::from_degrees(
        ("40.0000000", "40.0000000"),
        ("50.0000000", "40.0000000"),
        ("40.0000000", "50.0000000"),
    )
    .unwrap();

    let mut session = authenticated_session("1.0000000", "1.0000000").await;
    session
        .prove_in_polygons(&[leg_triangle(), far, companion_triangle(), farther])
        .await
        .unwrap();

    let rollup = session.combine_point_in_polygon_proofs().await.unwrap();
    let output = rollup.public_output;

    // each side folds left-to-right over insertion order
    assert_eq!(
        output.inside_commitment,
        poseidon2(
            leg_triangle().commitment(),
            companion_triangle().commitment()
        )
    );
    assert_eq!(
        output.outside_commitment,
        poseidon2(far.commitment(), farther.commitment())
    );
    assert_eq!(output.coordinate_commitment, session.coordinate_commitment());
}

#[tokio::test]
async fn disjunction_over_mixed_polarity() {
    let far = Triangle::from_degrees(
        ("20.0000000", "20.0000000"),
        ("30.0000000", "20.0000000"),
        ("20.0000000", "30.0000000"),
    )
    .unwrap();

    let mut session = authenticated_session("1.0000000", "1.0000000").await;
    let inside = session.prove_in_polygon(&leg_triangle()).await.unwrap();
    let outside = session.prove_in_polygon(&far).await.unwrap();

    let prover = LocalProver::new();
    let either = prover.combine_or(&inside, &outside).await.unwrap();
    assert!(either.public_output.is_inside);

    let neither = prover.combine_or(&outside, &inside).await.unwrap();
    assert!(neither.public_output.is_inside);
    // order still shows up in the commitment
    assert_ne!(
        either.public_output.polygon_commitment,
        neither.public_output.polygon_commitment
    );
}

#[tokio::test]
async fn cancelled_proof_leaves_session_untouched() {
    let mut session = authenticated_session("1.0000000", "1.0000000").await;
    let triangle = leg_triangle();
    {
        let pending = session.prove_in_polygon(&triangle);
        drop(pending); // cancelled before completion
    }
    assert!(session.inside_proofs().is_empty());
    assert!(session.outside_proofs().is_empty());

    // the session remains fully usable afterwards
    let proof = session.prove_in_polygon(&leg_triangle()).await.unwrap();
    assert!(proof.public_output.is_inside);
}

#[tokio::test]
async fn independent_sessions_prove_concurrently() {
    let mut session_a = authenticated_session("1.0000000", "1.0000000").await;
    let mut session_b = authenticated_session("10.0000000", "10.0000000").await;

    let triangle_a = leg_triangle();
    let triangle_b = leg_triangle();
    let (a, b) = tokio::join!(
        session_a.prove_in_polygon(&triangle_a),
        session_b.prove_in_polygon(&triangle_b),
    );
    assert!(a.unwrap().public_output.is_inside);
    assert!(!b.unwrap().public_output.is_inside);
}

#[tokio::test]
async fn sessions_over_same_point_commit_differently() {
    // fresh nonces keep equal coordinates unlinkable across sessions
    let coordinate = Coordinate::from_degrees("1.0000000", "1.0000000").unwrap();
    let a = GeoSession::new(LocalProver::new(), coordinate).unwrap();
    let b = GeoSession::new(LocalProver::new(), coordinate).unwrap();
    assert_ne!(a.coordinate_commitment(), b.coordinate_commitment());
}

#[tokio::test]
async fn rollup_with_single_sided_proofs_is_rejected() {
    let mut session = authenticated_session("1.0000000", "1.0000000").await;
    session
        .prove_in_polygons(&[leg_triangle(), companion_triangle()])
        .await
        .unwrap();
    let result = session.combine_point_in_polygon_proofs().await;
    assert!(matches!(
        result,
        Err(SessionError::MissingProofSet {
            inside: 2,
            outside: 0
        })
    ));
}
