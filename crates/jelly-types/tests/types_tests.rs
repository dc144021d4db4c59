//! Integration tests for jelly-types.

use jelly_types::constants::{ANCHOR_COUNT, LATTICE_POINT_COUNT, TOTAL_POINT_COUNT};
use jelly_types::{AnchorId, JellyError, LatticeIndex, PointId};

#[test]
fn flat_index_layout() {
    assert_eq!(LatticeIndex::new(0, 0, 0).flat(), 0);
    assert_eq!(LatticeIndex::new(0, 0, 1).flat(), 1);
    assert_eq!(LatticeIndex::new(0, 1, 0).flat(), 4);
    assert_eq!(LatticeIndex::new(1, 0, 0).flat(), 16);
    assert_eq!(LatticeIndex::new(3, 3, 3).flat(), 63);
}

#[test]
fn flat_roundtrip_covers_grid() {
    let all: Vec<LatticeIndex> = LatticeIndex::all().collect();
    assert_eq!(all.len(), LATTICE_POINT_COUNT);
    for (flat, idx) in all.iter().enumerate() {
        assert_eq!(idx.flat(), flat);
    }
}

#[test]
fn corners_map_to_distinct_anchors() {
    let anchors: Vec<u8> = LatticeIndex::all()
        .filter_map(|idx| idx.corner_anchor())
        .map(|a| a.0)
        .collect();
    assert_eq!(anchors, vec![0, 1, 2, 3, 4, 5, 6, 7]);
    assert_eq!(LatticeIndex::new(3, 0, 3).corner_anchor(), Some(AnchorId(5)));
    assert_eq!(LatticeIndex::new(1, 0, 0).corner_anchor(), None);
}

#[test]
fn anchor_slots_follow_lattice() {
    let ids: Vec<PointId> = AnchorId::all().map(PointId::from).collect();
    assert_eq!(ids.len(), ANCHOR_COUNT);
    assert_eq!(ids[0], PointId(LATTICE_POINT_COUNT as u16));
    assert_eq!(ids[7].index(), TOTAL_POINT_COUNT - 1);
    assert!(ids.iter().all(|id| id.is_anchor()));
    assert!(!PointId(63).is_anchor());
}

#[test]
fn error_display() {
    let err = JellyError::InvalidConfig("mass must be positive".into());
    assert_eq!(err.to_string(), "Invalid configuration: mass must be positive");
}

#[test]
fn ids_serialize() {
    let idx = LatticeIndex::new(1, 2, 3);
    let json = serde_json::to_string(&idx).unwrap();
    let back: LatticeIndex = serde_json::from_str(&json).unwrap();
    assert_eq!(back, idx);
}
