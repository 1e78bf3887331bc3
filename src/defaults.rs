// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use rust_decimal::Decimal;

/// Engine-wide reference sizes, fallback rates, and numbering conventions.
/// Passed explicitly into the planner, numberer, and price calculator so
/// tests can override any of them without touching algorithm code.
#[derive(Debug, Clone)]
pub struct EngineDefaults {
    /// Reference piece size for the `max_pieces` smart strategy (m²).
    pub max_pieces_reference: Decimal,
    /// Reference piece size for the `min_waste` smart strategy (m²).
    pub min_waste_reference: Decimal,
    /// Large piece size for the first `balanced` carve-out (m²).
    pub balanced_large_size: Decimal,
    /// Small piece size for the second `balanced` carve-out (m²).
    pub balanced_small_size: Decimal,
    /// Share of the remaining surface carved at the large size.
    pub balanced_large_share: Decimal,
    /// Share of the then-remaining surface carved at the small size.
    pub balanced_small_share: Decimal,
    /// Minimum remainder worth keeping as its own piece; below this the
    /// `balanced` leftover is waste.
    pub balanced_remainder_floor: Decimal,
    /// Fallback full-payment rate per m² when no batch rate and no
    /// siblings exist.
    pub default_rate_full: Decimal,
    /// Fallback installment rate per m².
    pub default_rate_installment: Decimal,
    /// Letter prefix for sequentially numbered pieces.
    pub fallback_prefix: String,
    /// Zero-pad width of the sequential counter.
    pub fallback_pad_width: usize,
    /// Hard cap on pieces produced by one bulk-range request.
    pub bulk_range_cap: u32,
}

impl Default for EngineDefaults {
    fn default() -> Self {
        Self {
            max_pieces_reference: Decimal::from(300),
            min_waste_reference: Decimal::from(500),
            balanced_large_size: Decimal::from(600),
            balanced_small_size: Decimal::from(400),
            balanced_large_share: Decimal::new(30, 2),
            balanced_small_share: Decimal::new(50, 2),
            balanced_remainder_floor: Decimal::from(200),
            default_rate_full: Decimal::from(100),
            default_rate_installment: Decimal::from(110),
            fallback_prefix: "P".to_string(),
            fallback_pad_width: 3,
            bulk_range_cap: 100,
        }
    }
}
