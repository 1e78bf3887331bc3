// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;

use parcelize::{cli, commands};

fn main() -> Result<()> {
    let cli = cli::build_cli();
    let matches = cli.get_matches();

    match matches.subcommand() {
        Some(("plan", sub)) => commands::plan::handle(sub)?,
        Some(("generate", sub)) => commands::generate::handle(sub)?,
        Some(("number", sub)) => commands::numbers::handle(sub)?,
        Some(("price", sub)) => commands::prices::handle(sub)?,
        Some(("installment", sub)) => commands::installments::handle(sub)?,
        _ => {
            cli::build_cli().print_help()?;
            println!();
        }
    }
    Ok(())
}
