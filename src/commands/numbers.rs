// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;

use crate::defaults::EngineDefaults;
use crate::numbering;
use crate::utils::{maybe_print_json, parse_decimal, parse_number_list, pretty_table};

pub fn handle(m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("next", sub)) => next(sub)?,
        Some(("range", sub)) => range(sub)?,
        _ => {}
    }
    Ok(())
}

fn next(sub: &clap::ArgMatches) -> Result<()> {
    let existing = parse_number_list(sub.get_one::<String>("existing").unwrap());
    println!("{}", numbering::next_piece_number(&existing));
    Ok(())
}

fn range(sub: &clap::ArgMatches) -> Result<()> {
    let from = sub.get_one::<String>("from").unwrap().trim();
    let to = sub.get_one::<String>("to").unwrap().trim();
    let surface = parse_decimal(sub.get_one::<String>("surface").unwrap().trim())?;
    let defaults = EngineDefaults::default();
    let pieces = numbering::expand_bulk_range(from, to, surface, &defaults)?;
    if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &pieces)? {
        let rows = pieces
            .iter()
            .map(|p| vec![p.piece_number.clone(), p.surface_area.to_string()])
            .collect();
        println!("{}", pretty_table(&["Piece", "Surface (m²)"], rows));
        println!("{} pieces", pieces.len());
    }
    Ok(())
}
