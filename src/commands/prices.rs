// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Context, Result};
use rust_decimal::Decimal;
use serde_json::json;

use crate::defaults::EngineDefaults;
use crate::models::{Batch, GeneratedPiece};
use crate::pricing;
use crate::utils::{fmt_money, maybe_print_json, parse_decimal};

pub fn handle(m: &clap::ArgMatches) -> Result<()> {
    let surface = parse_decimal(m.get_one::<String>("surface").unwrap().trim())?;
    let rate_full = match m.get_one::<String>("rate-full") {
        Some(raw) => Some(parse_decimal(raw.trim())?),
        None => None,
    };
    let rate_installment = match m.get_one::<String>("rate-installment") {
        Some(raw) => Some(parse_decimal(raw.trim())?),
        None => None,
    };
    let siblings: Vec<GeneratedPiece> = match m.get_one::<String>("siblings") {
        Some(path) => {
            let raw = std::fs::read_to_string(path)
                .with_context(|| format!("Read siblings file '{}'", path))?;
            serde_json::from_str(&raw).with_context(|| format!("Parse siblings '{}'", path))?
        }
        None => Vec::new(),
    };

    let batch = Batch {
        total_surface: Decimal::ZERO,
        total_cost: Decimal::ZERO,
        price_per_m2_full: rate_full,
        price_per_m2_installment: rate_installment,
    };
    let defaults = EngineDefaults::default();
    let (full, installment) =
        pricing::calculate_piece_price(&batch, &siblings, surface, &defaults);

    let out = json!({
        "surface": surface,
        "selling_price_full": full,
        "selling_price_installment": installment,
    });
    if !maybe_print_json(m.get_flag("json"), m.get_flag("jsonl"), &out)? {
        println!("Full: {}  Installment: {}", fmt_money(&full), fmt_money(&installment));
    }
    Ok(())
}
