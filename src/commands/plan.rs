// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Context, Result, anyhow};
use rust_decimal::Decimal;

use crate::defaults::EngineDefaults;
use crate::models::{
    BlueprintNumbering, CustomConfig, FlexItem, GenerationSpec, SmartStrategy, SubdivisionPlan,
};
use crate::planner;
use crate::utils::{fmt_money, maybe_print_json, parse_decimal, pretty_table};

pub fn handle(m: &clap::ArgMatches) -> Result<()> {
    let Some((mode, sub)) = m.subcommand() else {
        return Ok(());
    };
    let (surface, cost, spec) = parse_mode(mode, sub)?;
    let defaults = EngineDefaults::default();
    let plan = planner::plan_subdivision(surface, cost, &spec, &defaults)?;
    if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &plan)? {
        print_plan(&plan, surface);
    }
    Ok(())
}

pub(crate) fn print_plan(plan: &SubdivisionPlan, total_surface: Decimal) {
    let rows = plan
        .blueprints
        .iter()
        .map(|b| {
            vec![
                b.count.to_string(),
                b.surface.to_string(),
                fmt_money(&b.cost_share),
                match &b.numbering {
                    BlueprintNumbering::Start { start } => format!("from {}", start),
                    BlueprintNumbering::Explicit { number } => number.clone(),
                    BlueprintNumbering::Sequential => "auto".to_string(),
                },
            ]
        })
        .collect();
    println!(
        "{}",
        pretty_table(&["Count", "Surface (m²)", "Unit cost", "Numbering"], rows)
    );
    println!(
        "Pieces: {}  Used: {} m²  Waste: {} m²",
        plan.piece_count(),
        plan.total_used_surface,
        plan.waste(total_surface)
    );
}

/// Parse one planning-mode subcommand into `(surface, cost, spec)`.
/// Shared by `plan` and `generate`.
pub(crate) fn parse_mode(
    mode: &str,
    sub: &clap::ArgMatches,
) -> Result<(Decimal, Decimal, GenerationSpec)> {
    let surface = parse_decimal(sub.get_one::<String>("surface").unwrap().trim())?;
    let cost = parse_decimal(sub.get_one::<String>("cost").unwrap().trim())?;
    let spec = match mode {
        "uniform" => GenerationSpec::Uniform {
            size: parse_decimal(sub.get_one::<String>("size").unwrap().trim())?,
        },
        "mixed" => {
            let mut custom_configs = Vec::new();
            if let Some(raw) = sub.get_many::<String>("config") {
                for c in raw {
                    custom_configs.push(parse_config(c)?);
                }
            }
            GenerationSpec::Mixed {
                custom_configs,
                rest_size: parse_decimal(sub.get_one::<String>("rest").unwrap().trim())?,
            }
        }
        "auto" => GenerationSpec::Auto {
            min: parse_decimal(sub.get_one::<String>("min").unwrap().trim())?,
            max: parse_decimal(sub.get_one::<String>("max").unwrap().trim())?,
            preferred: parse_decimal(sub.get_one::<String>("preferred").unwrap().trim())?,
        },
        "smart" => GenerationSpec::Smart {
            strategy: parse_strategy(sub.get_one::<String>("strategy").unwrap().trim())?,
        },
        "advanced" => GenerationSpec::Advanced {
            pattern: sub.get_one::<String>("pattern").unwrap().clone(),
        },
        "flexible" => {
            let path = sub.get_one::<String>("spec").unwrap();
            let raw = std::fs::read_to_string(path)
                .with_context(|| format!("Read flexible spec '{}'", path))?;
            let items: Vec<FlexItem> = serde_json::from_str(&raw)
                .with_context(|| format!("Parse flexible spec '{}'", path))?;
            GenerationSpec::CustomFlexible { items }
        }
        other => return Err(anyhow!("Unknown planning mode '{}'", other)),
    };
    Ok((surface, cost, spec))
}

fn parse_config(s: &str) -> Result<CustomConfig> {
    let (count, surface) = s
        .split_once(['x', 'X'])
        .ok_or_else(|| anyhow!("Invalid config '{}', expected COUNTxSIZE", s))?;
    Ok(CustomConfig {
        count: count
            .trim()
            .parse::<u32>()
            .with_context(|| format!("Invalid count in config '{}'", s))?,
        surface: parse_decimal(surface.trim())?,
    })
}

fn parse_strategy(s: &str) -> Result<SmartStrategy> {
    match s.to_lowercase().as_str() {
        "max-pieces" | "max_pieces" => Ok(SmartStrategy::MaxPieces),
        "min-waste" | "min_waste" => Ok(SmartStrategy::MinWaste),
        "balanced" => Ok(SmartStrategy::Balanced),
        _ => Err(anyhow!(
            "Unknown strategy '{}' (use max-pieces|min-waste|balanced)",
            s
        )),
    }
}
