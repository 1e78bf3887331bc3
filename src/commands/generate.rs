// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;

use crate::defaults::EngineDefaults;
use crate::models::{Batch, GeneratedPiece};
use crate::utils::{fmt_money, maybe_print_json, parse_decimal, parse_number_list, pretty_table};
use crate::{numbering, planner, pricing};

use super::plan::parse_mode;

pub fn handle(m: &clap::ArgMatches) -> Result<()> {
    let Some((mode, sub)) = m.subcommand() else {
        return Ok(());
    };
    let (surface, cost, spec) = parse_mode(mode, sub)?;
    let rate_full = match sub.get_one::<String>("rate-full") {
        Some(raw) => Some(parse_decimal(raw.trim())?),
        None => None,
    };
    let rate_installment = match sub.get_one::<String>("rate-installment") {
        Some(raw) => Some(parse_decimal(raw.trim())?),
        None => None,
    };
    let existing = sub
        .get_one::<String>("existing")
        .map(|s| parse_number_list(s))
        .unwrap_or_default();

    let defaults = EngineDefaults::default();
    let batch = Batch {
        total_surface: surface,
        total_cost: cost,
        price_per_m2_full: rate_full,
        price_per_m2_installment: rate_installment,
    };
    let plan = planner::plan_subdivision(surface, cost, &spec, &defaults)?;
    let mut pieces = numbering::number_pieces(&plan.blueprints, &existing, &defaults)?;
    pricing::price_pieces(&batch, &[], &mut pieces, &defaults);

    if let Some(out) = sub.get_one::<String>("csv") {
        export_csv(&pieces, out)?;
        println!("Exported {} pieces to {}", pieces.len(), out);
        return Ok(());
    }
    if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &pieces)? {
        print_pieces(&pieces);
        println!(
            "Used: {} m²  Waste: {} m²",
            plan.total_used_surface,
            plan.waste(surface)
        );
    }
    Ok(())
}

fn print_pieces(pieces: &[GeneratedPiece]) {
    let rows = pieces
        .iter()
        .map(|p| {
            vec![
                p.piece_number.clone(),
                p.surface_area.to_string(),
                fmt_money(&p.allocated_purchase_cost),
                fmt_money(&p.selling_price_full),
                fmt_money(&p.selling_price_installment),
            ]
        })
        .collect();
    println!(
        "{}",
        pretty_table(
            &["Piece", "Surface (m²)", "Cost", "Price (full)", "Price (installment)"],
            rows
        )
    );
}

fn export_csv(pieces: &[GeneratedPiece], out: &str) -> Result<()> {
    let mut wtr = csv::Writer::from_path(out)?;
    wtr.write_record([
        "piece_number",
        "surface_area",
        "allocated_purchase_cost",
        "selling_price_full",
        "selling_price_installment",
    ])?;
    for p in pieces {
        wtr.write_record([
            p.piece_number.clone(),
            p.surface_area.to_string(),
            fmt_money(&p.allocated_purchase_cost),
            fmt_money(&p.selling_price_full),
            fmt_money(&p.selling_price_installment),
        ])?;
    }
    wtr.flush()?;
    Ok(())
}
