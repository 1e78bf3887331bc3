// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use rust_decimal::Decimal;

use crate::defaults::EngineDefaults;
use crate::models::{Batch, GeneratedPiece};

/// Per-m² rates resolved for one pricing call.
#[derive(Debug, Clone, Copy)]
struct Rates {
    full: Decimal,
    installment: Decimal,
}

/// Resolve a parcel's (full, installment) selling price. Priority: the
/// batch's own per-m² rates when both are set, else the weighted average
/// of already-priced sibling parcels, else the fixed default rates.
/// Prices round to 2 decimal places here and nowhere earlier.
pub fn calculate_piece_price(
    batch: &Batch,
    siblings: &[GeneratedPiece],
    surface: Decimal,
    defaults: &EngineDefaults,
) -> (Decimal, Decimal) {
    let rates = batch_rates(batch)
        .or_else(|| sibling_rates(siblings))
        .unwrap_or(Rates {
            full: defaults.default_rate_full,
            installment: defaults.default_rate_installment,
        });
    (
        (surface * rates.full).round_dp(2),
        (surface * rates.installment).round_dp(2),
    )
}

/// Fill in selling prices for freshly numbered pieces, in place.
pub fn price_pieces(
    batch: &Batch,
    siblings: &[GeneratedPiece],
    pieces: &mut [GeneratedPiece],
    defaults: &EngineDefaults,
) {
    for p in pieces.iter_mut() {
        let (full, installment) = calculate_piece_price(batch, siblings, p.surface_area, defaults);
        p.selling_price_full = full;
        p.selling_price_installment = installment;
    }
}

fn batch_rates(batch: &Batch) -> Option<Rates> {
    match (batch.price_per_m2_full, batch.price_per_m2_installment) {
        (Some(full), Some(installment))
            if full > Decimal::ZERO && installment > Decimal::ZERO =>
        {
            Some(Rates { full, installment })
        }
        _ => None,
    }
}

fn sibling_rates(siblings: &[GeneratedPiece]) -> Option<Rates> {
    if siblings.is_empty() {
        return None;
    }
    let total_surface: Decimal = siblings.iter().map(|p| p.surface_area).sum();
    if total_surface <= Decimal::ZERO {
        return None;
    }
    let total_full: Decimal = siblings.iter().map(|p| p.selling_price_full).sum();
    let total_installment: Decimal = siblings.iter().map(|p| p.selling_price_installment).sum();
    Some(Rates {
        full: total_full / total_surface,
        installment: total_installment / total_surface,
    })
}
