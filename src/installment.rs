// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};
use crate::models::{GeneratedPiece, PaymentOffer, ResolvedInstallment, SaleTerms};

const HUNDRED: Decimal = Decimal::ONE_HUNDRED;

/// Resolve a payment offer against one parcel price. `reservation_share`
/// is this parcel's portion of the sale-wide holding payment already made.
///
/// Flat advances are charged in full per parcel; only percentage advances
/// scale with the price. Whichever of monthly payment / term length the
/// offer left at zero is derived from the other.
pub fn resolve_installment(
    piece_price: Decimal,
    offer: &PaymentOffer,
    reservation_share: Decimal,
) -> EngineResult<ResolvedInstallment> {
    if piece_price < Decimal::ZERO {
        return Err(EngineError::validation(format!(
            "piece price must not be negative, got {}",
            piece_price
        )));
    }
    if reservation_share < Decimal::ZERO {
        return Err(EngineError::validation(format!(
            "reservation share must not be negative, got {}",
            reservation_share
        )));
    }
    if offer.company_fee_percentage < Decimal::ZERO || offer.company_fee_percentage > HUNDRED {
        return Err(EngineError::validation(format!(
            "company fee percentage must be within 0-100, got {}",
            offer.company_fee_percentage
        )));
    }
    if offer.advance_amount < Decimal::ZERO {
        return Err(EngineError::validation(format!(
            "advance amount must not be negative, got {}",
            offer.advance_amount
        )));
    }
    if offer.monthly_payment > Decimal::ZERO && offer.number_of_months > 0 {
        return Err(EngineError::validation(
            "offer may fix either the monthly payment or the term length, not both",
        ));
    }

    let company_fee = piece_price * offer.company_fee_percentage / HUNDRED;
    let advance = if offer.advance_is_percentage {
        piece_price * offer.advance_amount / HUNDRED
    } else {
        offer.advance_amount
    };
    let total_payable = piece_price + company_fee;
    let mut remaining = total_payable - reservation_share - advance;
    if remaining < Decimal::ZERO {
        remaining = Decimal::ZERO;
    }

    let (months, monthly_amount) = if offer.monthly_payment > Decimal::ZERO {
        let months = if remaining <= Decimal::ZERO {
            0
        } else {
            (remaining / offer.monthly_payment)
                .ceil()
                .to_u32()
                .unwrap_or(u32::MAX)
        };
        (months, offer.monthly_payment)
    } else if offer.number_of_months > 0 {
        let monthly = remaining / Decimal::from(offer.number_of_months);
        (offer.number_of_months, monthly)
    } else {
        (0, Decimal::ZERO)
    };

    Ok(ResolvedInstallment {
        company_fee_amount: company_fee,
        advance_amount_applied: advance,
        remaining_balance: remaining,
        number_of_months: months,
        monthly_amount,
    })
}

/// The price an offer charges for a parcel: the offer's own installment
/// rate when it carries one, else the parcel's stored installment price.
pub fn offer_piece_price(offer: &PaymentOffer, piece: &GeneratedPiece) -> Decimal {
    match offer.price_per_m2_installment {
        Some(rate) if rate > Decimal::ZERO => (piece.surface_area * rate).round_dp(2),
        _ => piece.selling_price_installment,
    }
}

/// Aggregate per-parcel resolutions into sale-level terms. The term is the
/// longest per-parcel term, and the monthly amount is the largest
/// per-parcel amount rather than the sum; kept as the source system
/// behaves, flagged with the product owner for multi-parcel sales.
pub fn aggregate_sale(resolutions: &[ResolvedInstallment]) -> SaleTerms {
    SaleTerms {
        total_company_fee: resolutions.iter().map(|r| r.company_fee_amount).sum(),
        total_advance: resolutions.iter().map(|r| r.advance_amount_applied).sum(),
        total_remaining: resolutions.iter().map(|r| r.remaining_balance).sum(),
        number_of_months: resolutions.iter().map(|r| r.number_of_months).max().unwrap_or(0),
        monthly_installment_amount: resolutions
            .iter()
            .map(|r| r.monthly_amount)
            .max()
            .unwrap_or(Decimal::ZERO),
    }
}

/// One dated due amount of a resolved plan.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScheduledPayment {
    pub due_date: NaiveDate,
    pub amount: Decimal,
}

/// Expand a resolution into dated monthly due amounts starting at `start`.
/// Each row rounds to 2 decimal places; the final row absorbs the rounding
/// drift (and the ceiling overshoot of a fixed-monthly plan) so the
/// schedule sums exactly to the remaining balance.
pub fn payment_schedule(resolved: &ResolvedInstallment, start: NaiveDate) -> Vec<ScheduledPayment> {
    let n = resolved.number_of_months;
    if n == 0 || resolved.remaining_balance <= Decimal::ZERO {
        return Vec::new();
    }
    let per = resolved.monthly_amount.round_dp(2);
    let mut rows = Vec::with_capacity(n as usize);
    for i in 0..n {
        let amount = if i + 1 == n {
            (resolved.remaining_balance - per * Decimal::from(n - 1)).round_dp(2)
        } else {
            per
        };
        rows.push(ScheduledPayment {
            due_date: start + chrono::Months::new(i),
            amount,
        });
    }
    rows
}
