// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A tract of land with an aggregate surface and acquisition cost.
/// Per-m² selling rates are optional; when absent the price calculator
/// falls back to sibling averages, then to fixed defaults.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Batch {
    pub total_surface: Decimal,
    pub total_cost: Decimal,
    pub price_per_m2_full: Option<Decimal>,
    pub price_per_m2_installment: Option<Decimal>,
}

/// How a blueprint's pieces receive their numbers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum BlueprintNumbering {
    /// Auto-numbered range starting at the given alphanumeric number.
    Start { start: String },
    /// A single user-given piece number, used verbatim.
    Explicit { number: String },
    /// Fallback prefix + running counter, assigned in plan order.
    Sequential,
}

/// A transient (count, surface, cost) template. Produced and consumed
/// within one planning call, never persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PieceBlueprint {
    pub count: u32,
    pub surface: Decimal,
    /// Purchase cost allocated to each unit piece in this blueprint.
    pub cost_share: Decimal,
    pub numbering: BlueprintNumbering,
}

impl PieceBlueprint {
    pub fn sequential(count: u32, surface: Decimal, cost_share: Decimal) -> Self {
        Self {
            count,
            surface,
            cost_share,
            numbering: BlueprintNumbering::Sequential,
        }
    }
}

/// The planner's output: an ordered blueprint list plus the surface it
/// actually consumed. Anything short of the batch total is waste, which
/// is reported rather than hidden.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubdivisionPlan {
    pub blueprints: Vec<PieceBlueprint>,
    pub total_used_surface: Decimal,
}

impl SubdivisionPlan {
    pub fn piece_count(&self) -> u32 {
        self.blueprints.iter().map(|b| b.count).sum()
    }

    pub fn waste(&self, total_surface: Decimal) -> Decimal {
        let w = total_surface - self.total_used_surface;
        if w > Decimal::ZERO { w } else { Decimal::ZERO }
    }
}

/// A concrete, numbered parcel ready for the persistence collaborator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeneratedPiece {
    pub piece_number: String,
    pub surface_area: Decimal,
    pub allocated_purchase_cost: Decimal,
    pub selling_price_full: Decimal,
    pub selling_price_installment: Decimal,
}

/// A `{count, surface}` pair for the `mixed` and `advanced` modes.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CustomConfig {
    pub count: u32,
    pub surface: Decimal,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SmartStrategy {
    /// Carve as many pieces as fit at the reference size, then resize
    /// them equally so the surface is fully consumed.
    MaxPieces,
    /// Full-size pieces at the reference size plus one odd remainder piece.
    MinWaste,
    /// Sequential carve-out: a share at the large size, a share of the rest
    /// at the small size, one remainder piece when it clears the floor.
    Balanced,
}

/// One item of a `custom_flexible` plan. Items are processed strictly in
/// list order, each drawing from the shared remaining-surface pool.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FlexItem {
    Auto {
        count: u32,
        surface: Decimal,
        #[serde(default)]
        start_number: Option<String>,
    },
    Custom {
        piece_number: String,
        surface: Decimal,
    },
    AutoSmart {
        min: Decimal,
        max: Decimal,
        preferred: Decimal,
    },
    Smart {
        strategy: SmartStrategy,
    },
}

/// Tagged subdivision request, one variant per allocation mode.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum GenerationSpec {
    Uniform {
        size: Decimal,
    },
    Mixed {
        custom_configs: Vec<CustomConfig>,
        rest_size: Decimal,
    },
    Auto {
        min: Decimal,
        max: Decimal,
        preferred: Decimal,
    },
    Smart {
        strategy: SmartStrategy,
    },
    CustomFlexible {
        items: Vec<FlexItem>,
    },
    Advanced {
        pattern: String,
    },
}

/// An installment plan template. Exactly one of `monthly_payment` or
/// `number_of_months` is positive at authoring time; the other stays 0
/// until the offer is resolved against a concrete parcel price.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentOffer {
    pub price_per_m2_installment: Option<Decimal>,
    pub company_fee_percentage: Decimal,
    pub advance_amount: Decimal,
    pub advance_is_percentage: bool,
    pub monthly_payment: Decimal,
    pub number_of_months: u32,
}

/// Everything derived from resolving an offer against one parcel.
/// Never stored independently of the sale that produced it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResolvedInstallment {
    pub company_fee_amount: Decimal,
    pub advance_amount_applied: Decimal,
    pub remaining_balance: Decimal,
    pub number_of_months: u32,
    pub monthly_amount: Decimal,
}

/// Sale-wide aggregation over per-parcel resolutions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SaleTerms {
    pub total_company_fee: Decimal,
    pub total_advance: Decimal,
    pub total_remaining: Decimal,
    pub number_of_months: u32,
    pub monthly_installment_amount: Decimal,
}
