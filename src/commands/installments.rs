// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;
use rust_decimal::Decimal;

use crate::installment::{aggregate_sale, payment_schedule, resolve_installment};
use crate::models::PaymentOffer;
use crate::utils::{fmt_money, maybe_print_json, parse_date, parse_decimal, pretty_table};

pub fn handle(m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("resolve", sub)) => resolve(sub)?,
        Some(("schedule", sub)) => schedule(sub)?,
        Some(("sale", sub)) => sale(sub)?,
        _ => {}
    }
    Ok(())
}

fn offer_from_args(sub: &clap::ArgMatches) -> Result<PaymentOffer> {
    let monthly = match sub.get_one::<String>("monthly") {
        Some(raw) => parse_decimal(raw.trim())?,
        None => Decimal::ZERO,
    };
    let months = match sub.get_one::<String>("months") {
        Some(raw) => raw.trim().parse::<u32>()?,
        None => 0,
    };
    Ok(PaymentOffer {
        price_per_m2_installment: None,
        company_fee_percentage: parse_decimal(sub.get_one::<String>("fee-pct").unwrap().trim())?,
        advance_amount: parse_decimal(sub.get_one::<String>("advance").unwrap().trim())?,
        advance_is_percentage: sub.get_flag("advance-pct"),
        monthly_payment: monthly,
        number_of_months: months,
    })
}

fn resolve(sub: &clap::ArgMatches) -> Result<()> {
    let price = parse_decimal(sub.get_one::<String>("price").unwrap().trim())?;
    let reservation = parse_decimal(sub.get_one::<String>("reservation").unwrap().trim())?;
    let offer = offer_from_args(sub)?;
    let resolved = resolve_installment(price, &offer, reservation)?;
    if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &resolved)? {
        let rows = vec![vec![
            fmt_money(&resolved.company_fee_amount),
            fmt_money(&resolved.advance_amount_applied),
            fmt_money(&resolved.remaining_balance),
            resolved.number_of_months.to_string(),
            fmt_money(&resolved.monthly_amount),
        ]];
        println!(
            "{}",
            pretty_table(
                &["Company fee", "Advance", "Remaining", "Months", "Monthly"],
                rows
            )
        );
    }
    Ok(())
}

fn schedule(sub: &clap::ArgMatches) -> Result<()> {
    let price = parse_decimal(sub.get_one::<String>("price").unwrap().trim())?;
    let reservation = parse_decimal(sub.get_one::<String>("reservation").unwrap().trim())?;
    let start = parse_date(sub.get_one::<String>("start").unwrap().trim())?;
    let offer = offer_from_args(sub)?;
    let resolved = resolve_installment(price, &offer, reservation)?;
    let rows = payment_schedule(&resolved, start);
    if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &rows)? {
        let data = rows
            .iter()
            .map(|r| vec![r.due_date.to_string(), fmt_money(&r.amount)])
            .collect();
        println!("{}", pretty_table(&["Due date", "Amount"], data));
        println!(
            "{} payments totalling {}",
            rows.len(),
            fmt_money(&resolved.remaining_balance)
        );
    }
    Ok(())
}

fn sale(sub: &clap::ArgMatches) -> Result<()> {
    let prices: Vec<Decimal> = sub
        .get_one::<String>("price")
        .unwrap()
        .split(',')
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .map(parse_decimal)
        .collect::<Result<_>>()?;
    let reservation = parse_decimal(sub.get_one::<String>("reservation").unwrap().trim())?;
    let offer = offer_from_args(sub)?;

    // the reservation is paid once per sale; each parcel carries an equal share
    let share = if prices.is_empty() {
        Decimal::ZERO
    } else {
        reservation / Decimal::from(prices.len() as u64)
    };
    let mut resolutions = Vec::new();
    for price in &prices {
        resolutions.push(resolve_installment(*price, &offer, share)?);
    }
    let terms = aggregate_sale(&resolutions);
    if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &terms)? {
        let rows = vec![vec![
            prices.len().to_string(),
            fmt_money(&terms.total_company_fee),
            fmt_money(&terms.total_advance),
            fmt_money(&terms.total_remaining),
            terms.number_of_months.to_string(),
            fmt_money(&terms.monthly_installment_amount),
        ]];
        println!(
            "{}",
            pretty_table(
                &["Parcels", "Fees", "Advances", "Remaining", "Months", "Monthly"],
                rows
            )
        );
    }
    Ok(())
}
