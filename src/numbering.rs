// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::cmp::Ordering;

use rust_decimal::Decimal;

use crate::defaults::EngineDefaults;
use crate::error::{EngineError, EngineResult};
use crate::models::{BlueprintNumbering, GeneratedPiece, PieceBlueprint};

/// A parsed alphanumeric piece number: an optional ASCII letter prefix
/// followed by digits (`B01`, `C7`, `12`). One parser shared by numbering,
/// natural sorting, and bulk-range expansion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PieceNumber {
    pub prefix: String,
    pub value: u64,
    /// Digit count of the literal, kept so increments can preserve
    /// zero-padding (`B01` -> `B02`).
    pub width: usize,
}

impl PieceNumber {
    pub fn parse(s: &str) -> Option<Self> {
        let s = s.trim();
        if s.is_empty() {
            return None;
        }
        let split = s.find(|c: char| c.is_ascii_digit())?;
        let (prefix, digits) = s.split_at(split);
        if !prefix.chars().all(|c| c.is_ascii_alphabetic()) {
            return None;
        }
        if digits.is_empty() || !digits.chars().all(|c| c.is_ascii_digit()) {
            return None;
        }
        let value = digits.parse::<u64>().ok()?;
        Some(Self {
            prefix: prefix.to_string(),
            value,
            width: digits.len(),
        })
    }

    /// Format `value` in this number's convention: prefixed numbers keep
    /// the original field width via zero-padding (until the value outgrows
    /// it), pure-numeric ones are never padded.
    pub fn render(&self, value: u64) -> String {
        if self.prefix.is_empty() {
            value.to_string()
        } else {
            format!("{}{:0w$}", self.prefix, value, w = self.width)
        }
    }
}

/// Order alphanumeric piece numbers by letter prefix, then numeric value
/// (`B2 < B10`). Unparseable numbers sort after parseable ones, among
/// themselves as plain strings.
pub fn natural_cmp(a: &str, b: &str) -> Ordering {
    match (PieceNumber::parse(a), PieceNumber::parse(b)) {
        (Some(pa), Some(pb)) => pa
            .prefix
            .cmp(&pb.prefix)
            .then(pa.value.cmp(&pb.value))
            .then_with(|| a.cmp(b)),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => a.cmp(b),
    }
}

/// Expand a blueprint list into concrete numbered pieces. Selling prices
/// stay zero here; the price calculator fills them in afterwards.
///
/// Sequentially numbered blueprints share one running counter in plan
/// order, continuing past the highest existing number that already carries
/// the fallback prefix.
pub fn number_pieces(
    blueprints: &[PieceBlueprint],
    existing_numbers: &[String],
    defaults: &EngineDefaults,
) -> EngineResult<Vec<GeneratedPiece>> {
    let mut seq = next_sequential_value(existing_numbers, &defaults.fallback_prefix);
    let mut pieces = Vec::new();
    for bp in blueprints {
        match &bp.numbering {
            BlueprintNumbering::Start { start } => {
                let base = PieceNumber::parse(start).ok_or_else(|| {
                    EngineError::validation(format!(
                        "start number '{}' is not alphanumeric",
                        start
                    ))
                })?;
                for i in 0..bp.count {
                    pieces.push(piece(bp, base.render(base.value + u64::from(i))));
                }
            }
            BlueprintNumbering::Explicit { number } => {
                for _ in 0..bp.count {
                    pieces.push(piece(bp, number.clone()));
                }
            }
            BlueprintNumbering::Sequential => {
                for _ in 0..bp.count {
                    pieces.push(piece(
                        bp,
                        format!(
                            "{}{:0w$}",
                            defaults.fallback_prefix,
                            seq,
                            w = defaults.fallback_pad_width
                        ),
                    ));
                    seq += 1;
                }
            }
        }
    }
    Ok(pieces)
}

fn piece(bp: &PieceBlueprint, number: String) -> GeneratedPiece {
    GeneratedPiece {
        piece_number: number,
        surface_area: bp.surface,
        allocated_purchase_cost: bp.cost_share,
        selling_price_full: Decimal::ZERO,
        selling_price_installment: Decimal::ZERO,
    }
}

fn next_sequential_value(existing: &[String], prefix: &str) -> u64 {
    existing
        .iter()
        .filter_map(|s| PieceNumber::parse(s))
        .filter(|n| n.prefix == prefix)
        .map(|n| n.value)
        .max()
        .map_or(1, |v| v + 1)
}

/// Infer the next number in a batch's existing sequence: increment the
/// naturally-last number, preserving its padding convention. A sequence
/// with no parseable tail falls back to `existing_count + 1`.
pub fn next_piece_number(existing_numbers: &[String]) -> String {
    if existing_numbers.is_empty() {
        return "1".to_string();
    }
    let mut sorted = existing_numbers.to_vec();
    sorted.sort_by(|a, b| natural_cmp(a, b));
    let last = sorted.last().map(String::as_str).unwrap_or_default();
    match PieceNumber::parse(last) {
        Some(n) => n.render(n.value + 1),
        None => (existing_numbers.len() + 1).to_string(),
    }
}

/// Expand an inclusive `from..to` range into pieces of the given surface.
/// Both ends must share one letter prefix; digit width is the wider of the
/// two literals; oversized ranges are rejected whole, never truncated.
pub fn expand_bulk_range(
    from: &str,
    to: &str,
    surface: Decimal,
    defaults: &EngineDefaults,
) -> EngineResult<Vec<GeneratedPiece>> {
    if surface <= Decimal::ZERO {
        return Err(EngineError::validation(format!(
            "piece surface must be positive, got {}",
            surface
        )));
    }
    let f = PieceNumber::parse(from)
        .ok_or_else(|| EngineError::validation(format!("invalid piece number '{}'", from)))?;
    let t = PieceNumber::parse(to)
        .ok_or_else(|| EngineError::validation(format!("invalid piece number '{}'", to)))?;
    if f.prefix != t.prefix {
        return Err(EngineError::validation(format!(
            "bulk range '{}'..'{}' must share one letter prefix",
            from, to
        )));
    }
    if f.value > t.value {
        return Err(EngineError::validation(format!(
            "bulk range start '{}' is after end '{}'",
            from, to
        )));
    }
    let count = t.value - f.value + 1;
    if count > u64::from(defaults.bulk_range_cap) {
        return Err(EngineError::validation(format!(
            "bulk range of {} pieces exceeds the cap of {}",
            count, defaults.bulk_range_cap
        )));
    }
    let width = f.width.max(t.width);
    let pieces = (f.value..=t.value)
        .map(|v| GeneratedPiece {
            piece_number: format!("{}{:0w$}", f.prefix, v, w = width),
            surface_area: surface,
            allocated_purchase_cost: Decimal::ZERO,
            selling_price_full: Decimal::ZERO,
            selling_price_installment: Decimal::ZERO,
        })
        .collect();
    Ok(pieces)
}
