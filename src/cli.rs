// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use clap::{Arg, ArgAction, Command, crate_version};

fn json_flags(c: Command) -> Command {
    c.arg(
        Arg::new("json")
            .long("json")
            .help("Print machine-readable JSON")
            .action(ArgAction::SetTrue),
    )
    .arg(
        Arg::new("jsonl")
            .long("jsonl")
            .help("Print one JSON object per line")
            .action(ArgAction::SetTrue),
    )
}

fn batch_args(c: Command) -> Command {
    json_flags(
        c.arg(
            Arg::new("surface")
                .long("surface")
                .help("Batch total surface in m²")
                .required(true),
        )
        .arg(
            Arg::new("cost")
                .long("cost")
                .help("Batch total acquisition cost")
                .required(true),
        ),
    )
}

/// The six planning modes, shared by `plan` and `generate`.
fn mode_commands() -> Vec<Command> {
    vec![
        batch_args(
            Command::new("uniform")
                .about("Equal-size pieces; the leftover surface is reported as waste")
                .arg(Arg::new("size").long("size").required(true)),
        ),
        batch_args(
            Command::new("mixed")
                .about("Explicit count-by-size configs plus rest pieces at a fixed size")
                .arg(
                    Arg::new("config")
                        .long("config")
                        .help("COUNTxSIZE, repeatable (e.g. 5x900)")
                        .action(ArgAction::Append),
                )
                .arg(Arg::new("rest").long("rest").required(true)),
        ),
        batch_args(
            Command::new("auto")
                .about("Greedy fill at the preferred size, remainder kept within [min, max]")
                .arg(Arg::new("min").long("min").required(true))
                .arg(Arg::new("max").long("max").required(true))
                .arg(Arg::new("preferred").long("preferred").required(true)),
        ),
        batch_args(
            Command::new("smart")
                .about("Whole-batch strategy: max-pieces, min-waste, or balanced")
                .arg(Arg::new("strategy").long("strategy").required(true)),
        ),
        batch_args(
            Command::new("advanced")
                .about("Explicit pattern, JSON pairs or compact '5x400,3x250'")
                .arg(Arg::new("pattern").long("pattern").required(true)),
        ),
        batch_args(
            Command::new("flexible")
                .about("Ordered heterogeneous items from a JSON file, sharing one surface pool")
                .arg(
                    Arg::new("spec")
                        .long("spec")
                        .help("Path to a JSON array of flexible items")
                        .required(true),
                ),
        ),
    ]
}

fn generate_mode_commands() -> Vec<Command> {
    mode_commands()
        .into_iter()
        .map(|c| {
            c.arg(
                Arg::new("rate-full")
                    .long("rate-full")
                    .help("Batch full-payment rate per m²"),
            )
            .arg(
                Arg::new("rate-installment")
                    .long("rate-installment")
                    .help("Batch installment rate per m²"),
            )
            .arg(
                Arg::new("existing")
                    .long("existing")
                    .help("Comma-separated piece numbers already in the batch"),
            )
            .arg(
                Arg::new("csv")
                    .long("csv")
                    .help("Write the generated pieces to a CSV file"),
            )
        })
        .collect()
}

fn offer_args(c: Command) -> Command {
    c.arg(Arg::new("price").long("price").required(true))
        .arg(
            Arg::new("fee-pct")
                .long("fee-pct")
                .help("Company fee percentage (0-100)")
                .default_value("0"),
        )
        .arg(
            Arg::new("advance")
                .long("advance")
                .default_value("0"),
        )
        .arg(
            Arg::new("advance-pct")
                .long("advance-pct")
                .help("Treat --advance as a percentage of the price")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("monthly")
                .long("monthly")
                .help("Fixed monthly payment; the term is derived"),
        )
        .arg(
            Arg::new("months")
                .long("months")
                .help("Fixed term length; the monthly amount is derived"),
        )
        .arg(
            Arg::new("reservation")
                .long("reservation")
                .help("Reservation amount already paid for this parcel")
                .default_value("0"),
        )
}

pub fn build_cli() -> Command {
    Command::new("parcelize")
        .about("Land batch subdivision planning, parcel numbering, and installment pricing")
        .version(crate_version!())
        .subcommand(
            Command::new("plan")
                .about("Plan a subdivision without generating pieces")
                .subcommands(mode_commands()),
        )
        .subcommand(
            Command::new("generate")
                .about("Plan, number, and price pieces in one pass")
                .subcommands(generate_mode_commands()),
        )
        .subcommand(
            Command::new("number")
                .about("Piece numbering helpers")
                .subcommand(
                    Command::new("next")
                        .about("Infer the next number in an existing sequence")
                        .arg(Arg::new("existing").long("existing").required(true)),
                )
                .subcommand(json_flags(
                    Command::new("range")
                        .about("Expand an inclusive alphanumeric range into pieces")
                        .arg(Arg::new("from").long("from").required(true))
                        .arg(Arg::new("to").long("to").required(true))
                        .arg(Arg::new("surface").long("surface").required(true)),
                )),
        )
        .subcommand(json_flags(
            Command::new("price")
                .about("Resolve a parcel's full/installment selling price")
                .arg(Arg::new("surface").long("surface").required(true))
                .arg(Arg::new("rate-full").long("rate-full"))
                .arg(Arg::new("rate-installment").long("rate-installment"))
                .arg(
                    Arg::new("siblings")
                        .long("siblings")
                        .help("Path to a JSON array of already-priced sibling pieces"),
                ),
        ))
        .subcommand(
            Command::new("installment")
                .about("Resolve installment offers against parcel prices")
                .subcommand(json_flags(offer_args(Command::new("resolve").about(
                    "Compute fee, advance, remaining balance, and the open term field",
                ))))
                .subcommand(json_flags(
                    offer_args(
                        Command::new("schedule")
                            .about("Expand a resolution into dated monthly due amounts"),
                    )
                    .arg(
                        Arg::new("start")
                            .long("start")
                            .help("First due date, YYYY-MM-DD")
                            .required(true),
                    ),
                ))
                .subcommand(json_flags(
                    offer_args(
                        Command::new("sale")
                            .about("Resolve one offer against several parcel prices and aggregate"),
                    )
                    .mut_arg("price", |a| {
                        a.help("Comma-separated parcel prices; the reservation splits equally")
                    }),
                )),
        )
}
