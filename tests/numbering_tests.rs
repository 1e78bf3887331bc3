// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use parcelize::defaults::EngineDefaults;
use parcelize::models::{BlueprintNumbering, PieceBlueprint};
use parcelize::numbering::{
    PieceNumber, expand_bulk_range, natural_cmp, next_piece_number, number_pieces,
};
use rust_decimal::Decimal;

fn nums(v: &[&str]) -> Vec<String> {
    v.iter().map(|s| s.to_string()).collect()
}

#[test]
fn parser_splits_prefix_and_digits() {
    let n = PieceNumber::parse("B01").unwrap();
    assert_eq!(n.prefix, "B");
    assert_eq!(n.value, 1);
    assert_eq!(n.width, 2);

    let plain = PieceNumber::parse("42").unwrap();
    assert_eq!(plain.prefix, "");
    assert_eq!(plain.value, 42);

    assert!(PieceNumber::parse("B").is_none());
    assert!(PieceNumber::parse("B1C2").is_none());
    assert!(PieceNumber::parse("1B").is_none());
    assert!(PieceNumber::parse("").is_none());
}

#[test]
fn natural_sort_orders_by_prefix_then_value() {
    let mut v = nums(&["B2", "B10", "B1"]);
    v.sort_by(|a, b| natural_cmp(a, b));
    assert_eq!(v, nums(&["B1", "B2", "B10"]));

    let mut mixed = nums(&["C1", "B10", "B2", "A5"]);
    mixed.sort_by(|a, b| natural_cmp(a, b));
    assert_eq!(mixed, nums(&["A5", "B2", "B10", "C1"]));
}

#[test]
fn next_number_preserves_padding() {
    assert_eq!(next_piece_number(&nums(&["B01", "B02"])), "B03");
    // width 1 original: no forced re-padding
    assert_eq!(next_piece_number(&nums(&["B9"])), "B10");
    assert_eq!(next_piece_number(&nums(&["7"])), "8");
}

#[test]
fn next_number_falls_back_on_unparseable_sequences() {
    assert_eq!(next_piece_number(&[]), "1");
    assert_eq!(next_piece_number(&nums(&["lot-a", "lot-b"])), "3");
}

#[test]
fn auto_start_blueprint_expands_with_padding() {
    let bps = vec![PieceBlueprint {
        count: 3,
        surface: Decimal::from(400),
        cost_share: Decimal::from(4000),
        numbering: BlueprintNumbering::Start {
            start: "B01".to_string(),
        },
    }];
    let pieces = number_pieces(&bps, &[], &EngineDefaults::default()).unwrap();
    let numbers: Vec<_> = pieces.iter().map(|p| p.piece_number.as_str()).collect();
    assert_eq!(numbers, vec!["B01", "B02", "B03"]);
    assert_eq!(pieces[0].surface_area, Decimal::from(400));
    assert_eq!(pieces[0].allocated_purchase_cost, Decimal::from(4000));
}

#[test]
fn invalid_start_number_is_rejected() {
    let bps = vec![PieceBlueprint {
        count: 1,
        surface: Decimal::from(400),
        cost_share: Decimal::ZERO,
        numbering: BlueprintNumbering::Start {
            start: "lot-1".to_string(),
        },
    }];
    assert!(number_pieces(&bps, &[], &EngineDefaults::default()).is_err());
}

#[test]
fn sequential_numbering_continues_past_existing() {
    let bps = vec![
        PieceBlueprint::sequential(2, Decimal::from(400), Decimal::ZERO),
        PieceBlueprint::sequential(1, Decimal::from(250), Decimal::ZERO),
    ];
    let existing = nums(&["P001", "P002", "B07"]);
    let pieces = number_pieces(&bps, &existing, &EngineDefaults::default()).unwrap();
    let numbers: Vec<_> = pieces.iter().map(|p| p.piece_number.as_str()).collect();
    // one counter across both blueprints, past the existing P002
    assert_eq!(numbers, vec!["P003", "P004", "P005"]);
}

#[test]
fn explicit_number_is_used_verbatim() {
    let bps = vec![PieceBlueprint {
        count: 1,
        surface: Decimal::from(333),
        cost_share: Decimal::ZERO,
        numbering: BlueprintNumbering::Explicit {
            number: "VILLA7".to_string(),
        },
    }];
    let pieces = number_pieces(&bps, &[], &EngineDefaults::default()).unwrap();
    assert_eq!(pieces[0].piece_number, "VILLA7");
}

#[test]
fn bulk_range_expands_at_max_literal_width() {
    let pieces =
        expand_bulk_range("A1", "A25", Decimal::from(400), &EngineDefaults::default()).unwrap();
    assert_eq!(pieces.len(), 25);
    // width follows the wider literal
    assert_eq!(pieces[0].piece_number, "A01");
    assert_eq!(pieces[9].piece_number, "A10");
    assert_eq!(pieces[24].piece_number, "A25");
    assert!(pieces.iter().all(|p| p.surface_area == Decimal::from(400)));
}

#[test]
fn bulk_range_rejects_mismatched_prefixes() {
    let err = expand_bulk_range("A1", "B10", Decimal::from(400), &EngineDefaults::default())
        .unwrap_err();
    assert!(err.to_string().contains("prefix"));
}

#[test]
fn bulk_range_rejects_inverted_order() {
    let err = expand_bulk_range("B10", "B2", Decimal::from(400), &EngineDefaults::default())
        .unwrap_err();
    assert!(err.to_string().contains("after"));
}

#[test]
fn bulk_range_rejects_oversized_requests() {
    let err = expand_bulk_range("1", "150", Decimal::from(400), &EngineDefaults::default())
        .unwrap_err();
    assert!(err.to_string().contains("cap"));
    // at the cap is still fine
    let ok = expand_bulk_range("1", "100", Decimal::from(400), &EngineDefaults::default()).unwrap();
    assert_eq!(ok.len(), 100);
}

#[test]
fn bulk_range_rejects_non_positive_surface() {
    assert!(expand_bulk_range("A1", "A5", Decimal::ZERO, &EngineDefaults::default()).is_err());
}
