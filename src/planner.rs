// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use once_cell::sync::Lazy;
use regex::Regex;
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;

use crate::defaults::EngineDefaults;
use crate::error::{EngineError, EngineResult};
use crate::models::{
    BlueprintNumbering, CustomConfig, FlexItem, GenerationSpec, PieceBlueprint, SmartStrategy,
    SubdivisionPlan,
};

/// Split a batch's total surface/cost into an ordered blueprint list under
/// the requested allocation mode. Cost is allocated proportionally by
/// surface during planning and only rounded at the selling-price stage.
pub fn plan_subdivision(
    total_surface: Decimal,
    total_cost: Decimal,
    spec: &GenerationSpec,
    defaults: &EngineDefaults,
) -> EngineResult<SubdivisionPlan> {
    if total_cost < Decimal::ZERO {
        return Err(EngineError::validation(format!(
            "total cost must not be negative, got {}",
            total_cost
        )));
    }
    if total_surface < Decimal::ZERO {
        return Err(EngineError::validation(format!(
            "total surface must not be negative, got {}",
            total_surface
        )));
    }
    // custom_flexible may infer its effective total from its own items;
    // every other mode needs a positive surface up front.
    if total_surface == Decimal::ZERO && !matches!(spec, GenerationSpec::CustomFlexible { .. }) {
        return Err(EngineError::validation("total surface must be positive"));
    }

    let (blueprints, used) = match spec {
        GenerationSpec::Uniform { size } => plan_uniform(total_surface, total_cost, *size)?,
        GenerationSpec::Mixed {
            custom_configs,
            rest_size,
        } => plan_mixed(total_surface, total_cost, custom_configs, *rest_size)?,
        GenerationSpec::Auto {
            min,
            max,
            preferred,
        } => plan_auto(total_surface, total_cost, *min, *max, *preferred)?,
        GenerationSpec::Smart { strategy } => {
            plan_smart(total_surface, total_cost, *strategy, defaults)
        }
        GenerationSpec::CustomFlexible { items } => {
            plan_custom_flexible(total_surface, total_cost, items, defaults)?
        }
        GenerationSpec::Advanced { pattern } => plan_advanced(total_surface, total_cost, pattern),
    };

    Ok(SubdivisionPlan {
        blueprints,
        total_used_surface: used,
    })
}

fn plan_uniform(
    total_surface: Decimal,
    total_cost: Decimal,
    size: Decimal,
) -> EngineResult<(Vec<PieceBlueprint>, Decimal)> {
    if size <= Decimal::ZERO {
        return Err(EngineError::validation(format!(
            "piece size must be positive, got {}",
            size
        )));
    }
    let count = floor_div(total_surface, size);
    if count == 0 {
        return Ok((Vec::new(), Decimal::ZERO));
    }
    let used = Decimal::from(count) * size;
    let bp = PieceBlueprint::sequential(count, size, unit_cost(size, total_surface, total_cost));
    Ok((vec![bp], used))
}

fn plan_mixed(
    total_surface: Decimal,
    total_cost: Decimal,
    configs: &[CustomConfig],
    rest_size: Decimal,
) -> EngineResult<(Vec<PieceBlueprint>, Decimal)> {
    if rest_size <= Decimal::ZERO {
        return Err(EngineError::validation(format!(
            "rest piece size must be positive, got {}",
            rest_size
        )));
    }
    let mut blueprints = Vec::new();
    let mut used = Decimal::ZERO;
    for cfg in configs {
        // non-positive entries are skipped, not errors
        if cfg.count == 0 || cfg.surface <= Decimal::ZERO {
            continue;
        }
        let need = Decimal::from(cfg.count) * cfg.surface;
        if need > total_surface - used {
            continue;
        }
        blueprints.push(PieceBlueprint::sequential(
            cfg.count,
            cfg.surface,
            unit_cost(cfg.surface, total_surface, total_cost),
        ));
        used += need;
    }
    let remaining = total_surface - used;
    let rest_count = floor_div(remaining, rest_size);
    if rest_count > 0 {
        blueprints.push(PieceBlueprint::sequential(
            rest_count,
            rest_size,
            unit_cost(rest_size, total_surface, total_cost),
        ));
        used += Decimal::from(rest_count) * rest_size;
    }
    Ok((blueprints, used))
}

fn plan_auto(
    total_surface: Decimal,
    total_cost: Decimal,
    min: Decimal,
    max: Decimal,
    preferred: Decimal,
) -> EngineResult<(Vec<PieceBlueprint>, Decimal)> {
    if min <= Decimal::ZERO || preferred <= Decimal::ZERO {
        return Err(EngineError::validation(
            "auto bounds and preferred size must be positive",
        ));
    }
    if max < min {
        return Err(EngineError::validation(format!(
            "auto max {} is below min {}",
            max, min
        )));
    }

    let mut remaining = total_surface;
    let mut preferred_count = floor_div(remaining, preferred);
    remaining -= Decimal::from(preferred_count) * preferred;

    let mut final_piece = None;
    if remaining >= min && remaining <= max {
        final_piece = Some(remaining);
        remaining = Decimal::ZERO;
    } else if remaining > max {
        // leftover still wider than the band: extract more preferred-size
        // pieces, then re-test the new leftover once
        let extra = floor_div(remaining, preferred);
        preferred_count += extra;
        remaining -= Decimal::from(extra) * preferred;
        if remaining >= min && remaining <= max {
            final_piece = Some(remaining);
            remaining = Decimal::ZERO;
        }
    }
    // anything below min at this point is waste

    let mut blueprints = Vec::new();
    if preferred_count > 0 {
        blueprints.push(PieceBlueprint::sequential(
            preferred_count,
            preferred,
            unit_cost(preferred, total_surface, total_cost),
        ));
    }
    if let Some(surface) = final_piece {
        blueprints.push(PieceBlueprint::sequential(
            1,
            surface,
            unit_cost(surface, total_surface, total_cost),
        ));
    }
    Ok((blueprints, total_surface - remaining))
}

fn plan_smart(
    total_surface: Decimal,
    total_cost: Decimal,
    strategy: SmartStrategy,
    defaults: &EngineDefaults,
) -> (Vec<PieceBlueprint>, Decimal) {
    match strategy {
        SmartStrategy::MaxPieces => {
            let count = floor_div(total_surface, defaults.max_pieces_reference);
            if count == 0 {
                return (Vec::new(), Decimal::ZERO);
            }
            // resize equally so the surface is fully consumed
            let size = total_surface / Decimal::from(count);
            let bp = PieceBlueprint::sequential(
                count,
                size,
                unit_cost(size, total_surface, total_cost),
            );
            (vec![bp], total_surface)
        }
        SmartStrategy::MinWaste => {
            let count = floor_div(total_surface, defaults.min_waste_reference);
            let mut blueprints = Vec::new();
            let mut used = Decimal::ZERO;
            if count > 0 {
                used = Decimal::from(count) * defaults.min_waste_reference;
                blueprints.push(PieceBlueprint::sequential(
                    count,
                    defaults.min_waste_reference,
                    unit_cost(defaults.min_waste_reference, total_surface, total_cost),
                ));
            }
            let leftover = total_surface - used;
            if leftover > Decimal::ZERO {
                blueprints.push(PieceBlueprint::sequential(
                    1,
                    leftover,
                    unit_cost(leftover, total_surface, total_cost),
                ));
                used += leftover;
            }
            (blueprints, used)
        }
        SmartStrategy::Balanced => {
            let mut blueprints = Vec::new();
            let mut remaining = total_surface;

            let large_count = floor_div(
                remaining * defaults.balanced_large_share,
                defaults.balanced_large_size,
            );
            if large_count > 0 {
                blueprints.push(PieceBlueprint::sequential(
                    large_count,
                    defaults.balanced_large_size,
                    unit_cost(defaults.balanced_large_size, total_surface, total_cost),
                ));
                remaining -= Decimal::from(large_count) * defaults.balanced_large_size;
            }

            let small_count = floor_div(
                remaining * defaults.balanced_small_share,
                defaults.balanced_small_size,
            );
            if small_count > 0 {
                blueprints.push(PieceBlueprint::sequential(
                    small_count,
                    defaults.balanced_small_size,
                    unit_cost(defaults.balanced_small_size, total_surface, total_cost),
                ));
                remaining -= Decimal::from(small_count) * defaults.balanced_small_size;
            }

            if remaining > defaults.balanced_remainder_floor {
                blueprints.push(PieceBlueprint::sequential(
                    1,
                    remaining,
                    unit_cost(remaining, total_surface, total_cost),
                ));
                remaining = Decimal::ZERO;
            }
            // remainder at or below the floor is waste
            (blueprints, total_surface - remaining)
        }
    }
}

fn plan_custom_flexible(
    total_surface: Decimal,
    total_cost: Decimal,
    items: &[FlexItem],
    defaults: &EngineDefaults,
) -> EngineResult<(Vec<PieceBlueprint>, Decimal)> {
    // first pass: the effective pool is the explicit total when given,
    // else the sum of surfaces the auto/custom items would claim. Smart
    // items cannot contribute here, their size depends on the pool itself.
    let effective = if total_surface > Decimal::ZERO {
        total_surface
    } else {
        items
            .iter()
            .map(|item| match item {
                FlexItem::Auto { count, surface, .. }
                    if *count > 0 && *surface > Decimal::ZERO =>
                {
                    Decimal::from(*count) * *surface
                }
                FlexItem::Custom { surface, .. } if *surface > Decimal::ZERO => *surface,
                _ => Decimal::ZERO,
            })
            .sum()
    };
    if effective <= Decimal::ZERO {
        return Err(EngineError::validation(
            "flexible plan needs an explicit total surface or at least one sized item",
        ));
    }

    let mut blueprints = Vec::new();
    let mut used = Decimal::ZERO;
    for item in items {
        let remaining = effective - used;
        if remaining <= Decimal::ZERO {
            continue;
        }
        match item {
            FlexItem::Auto {
                count,
                surface,
                start_number,
            } if *count > 0 && *surface > Decimal::ZERO => {
                let need = Decimal::from(*count) * *surface;
                // items that would overdraw the pool are skipped whole,
                // never truncated
                if need > remaining {
                    continue;
                }
                let numbering = match start_number {
                    Some(start) => BlueprintNumbering::Start {
                        start: start.clone(),
                    },
                    None => BlueprintNumbering::Sequential,
                };
                blueprints.push(PieceBlueprint {
                    count: *count,
                    surface: *surface,
                    cost_share: unit_cost(*surface, effective, total_cost),
                    numbering,
                });
                used += need;
            }
            FlexItem::Custom {
                piece_number,
                surface,
            } if *surface > Decimal::ZERO => {
                if *surface > remaining {
                    continue;
                }
                blueprints.push(PieceBlueprint {
                    count: 1,
                    surface: *surface,
                    cost_share: unit_cost(*surface, effective, total_cost),
                    numbering: BlueprintNumbering::Explicit {
                        number: piece_number.clone(),
                    },
                });
                used += *surface;
            }
            FlexItem::AutoSmart {
                min,
                max,
                preferred,
            } => {
                let (sub, sub_used) = plan_auto(remaining, total_cost, *min, *max, *preferred)?;
                blueprints.extend(sub);
                used += sub_used;
            }
            FlexItem::Smart { strategy } => {
                let (sub, sub_used) = plan_smart(remaining, total_cost, *strategy, defaults);
                blueprints.extend(sub);
                used += sub_used;
            }
            // non-positive auto/custom entries are skipped silently
            FlexItem::Auto { .. } | FlexItem::Custom { .. } => {}
        }
    }
    Ok((blueprints, used))
}

static PAIR_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\s*(\d+)\s*[xX]\s*(\d+(?:\.\d+)?)\s*$").unwrap()
});

/// Parse an `advanced` pattern: either a JSON array of `{count, surface}`
/// objects or the compact `"5x400,3x250"` form. A malformed pattern is
/// "nothing to generate", never an error.
fn parse_advanced_pattern(pattern: &str) -> Vec<CustomConfig> {
    if let Ok(pairs) = serde_json::from_str::<Vec<CustomConfig>>(pattern) {
        return pairs;
    }
    let mut pairs = Vec::new();
    for segment in pattern.split(',') {
        let Some(caps) = PAIR_RE.captures(segment) else {
            return Vec::new();
        };
        let (Ok(count), Ok(surface)) = (caps[1].parse::<u32>(), caps[2].parse::<Decimal>()) else {
            return Vec::new();
        };
        pairs.push(CustomConfig { count, surface });
    }
    pairs
}

fn plan_advanced(
    total_surface: Decimal,
    total_cost: Decimal,
    pattern: &str,
) -> (Vec<PieceBlueprint>, Decimal) {
    let mut blueprints = Vec::new();
    let mut used = Decimal::ZERO;
    for pair in parse_advanced_pattern(pattern) {
        if pair.count == 0 || pair.surface <= Decimal::ZERO {
            continue;
        }
        let need = Decimal::from(pair.count) * pair.surface;
        if need > total_surface - used {
            continue;
        }
        // cost is apportioned against the grand total, not a recomputed
        // effective total
        blueprints.push(PieceBlueprint::sequential(
            pair.count,
            pair.surface,
            unit_cost(pair.surface, total_surface, total_cost),
        ));
        used += need;
    }
    (blueprints, used)
}

fn floor_div(amount: Decimal, size: Decimal) -> u32 {
    if size <= Decimal::ZERO || amount <= Decimal::ZERO {
        return 0;
    }
    (amount / size).floor().to_u32().unwrap_or(0)
}

fn unit_cost(surface: Decimal, effective_total: Decimal, total_cost: Decimal) -> Decimal {
    if effective_total <= Decimal::ZERO {
        return Decimal::ZERO;
    }
    surface / effective_total * total_cost
}
