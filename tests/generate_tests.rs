// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use parcelize::{cli, commands};
use tempfile::tempdir;

#[test]
fn generate_uniform_exports_numbered_priced_csv() {
    let dir = tempdir().unwrap();
    let out_path = dir.path().join("pieces.csv");
    let out_str = out_path.to_string_lossy().to_string();

    let cli = cli::build_cli();
    let matches = cli.get_matches_from([
        "parcelize",
        "generate",
        "uniform",
        "--surface",
        "10000",
        "--cost",
        "100000",
        "--size",
        "400",
        "--rate-full",
        "120",
        "--rate-installment",
        "130",
        "--csv",
        &out_str,
    ]);
    if let Some(("generate", gen_m)) = matches.subcommand() {
        commands::generate::handle(gen_m).unwrap();
    } else {
        panic!("no generate subcommand");
    }

    let contents = std::fs::read_to_string(&out_path).unwrap();
    let lines: Vec<&str> = contents.lines().collect();
    assert_eq!(lines.len(), 26); // header + 25 pieces
    assert_eq!(
        lines[0],
        "piece_number,surface_area,allocated_purchase_cost,selling_price_full,selling_price_installment"
    );
    assert_eq!(lines[1], "P001,400,4000.00,48000.00,52000.00");
    assert!(lines[25].starts_with("P025,400,"));
}

#[test]
fn generate_continues_numbering_past_existing_pieces() {
    let dir = tempdir().unwrap();
    let out_path = dir.path().join("pieces.csv");
    let out_str = out_path.to_string_lossy().to_string();

    let cli = cli::build_cli();
    let matches = cli.get_matches_from([
        "parcelize",
        "generate",
        "uniform",
        "--surface",
        "1200",
        "--cost",
        "12000",
        "--size",
        "400",
        "--existing",
        "P001,P002",
        "--csv",
        &out_str,
    ]);
    if let Some(("generate", gen_m)) = matches.subcommand() {
        commands::generate::handle(gen_m).unwrap();
    } else {
        panic!("no generate subcommand");
    }

    let contents = std::fs::read_to_string(&out_path).unwrap();
    let lines: Vec<&str> = contents.lines().collect();
    assert_eq!(lines.len(), 4);
    assert!(lines[1].starts_with("P003,"));
    assert!(lines[3].starts_with("P005,"));
}

#[test]
fn generate_rejects_a_bad_size() {
    let cli = cli::build_cli();
    let matches = cli.get_matches_from([
        "parcelize",
        "generate",
        "uniform",
        "--surface",
        "10000",
        "--cost",
        "100000",
        "--size",
        "0",
    ]);
    if let Some(("generate", gen_m)) = matches.subcommand() {
        assert!(commands::generate::handle(gen_m).is_err());
    } else {
        panic!("no generate subcommand");
    }
}

#[test]
fn flexible_spec_file_round_trips_through_the_cli() {
    let dir = tempdir().unwrap();
    let spec_path = dir.path().join("items.json");
    std::fs::write(
        &spec_path,
        r#"[
            {"kind":"auto","count":2,"surface":"400","start_number":"B01"},
            {"kind":"custom","piece_number":"C1","surface":"200"}
        ]"#,
    )
    .unwrap();
    let out_path = dir.path().join("pieces.csv");
    let spec_str = spec_path.to_string_lossy().to_string();
    let out_str = out_path.to_string_lossy().to_string();

    let cli = cli::build_cli();
    let matches = cli.get_matches_from([
        "parcelize",
        "generate",
        "flexible",
        "--surface",
        "1000",
        "--cost",
        "10000",
        "--spec",
        &spec_str,
        "--csv",
        &out_str,
    ]);
    if let Some(("generate", gen_m)) = matches.subcommand() {
        commands::generate::handle(gen_m).unwrap();
    } else {
        panic!("no generate subcommand");
    }

    let contents = std::fs::read_to_string(&out_path).unwrap();
    let lines: Vec<&str> = contents.lines().collect();
    assert_eq!(lines.len(), 4);
    assert!(lines[1].starts_with("B01,400,"));
    assert!(lines[2].starts_with("B02,400,"));
    assert!(lines[3].starts_with("C1,200,"));
}
