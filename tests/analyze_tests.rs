// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use conceptscan::{
    cli,
    commands::{analyze, concepts, resolve_config},
    config::Config,
    loader::RawTable,
    models::AggregationResult,
    report,
};
use rust_decimal::Decimal;
use std::io::Write;
use tempfile::{Builder, NamedTempFile};

fn statement(contents: &str) -> NamedTempFile {
    let mut file = Builder::new().suffix(".csv").tempfile().unwrap();
    write!(file, "{}", contents).unwrap();
    file.flush().unwrap();
    file
}

fn empty_config() -> (tempfile::TempDir, String) {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.json");
    std::fs::write(&path, "{}").unwrap();
    let arg = path.to_str().unwrap().to_string();
    (dir, arg)
}

fn run(args: &[&str]) -> anyhow::Result<AggregationResult> {
    let matches = cli::build_cli().get_matches_from(args);
    if let Some(("analyze", sub)) = matches.subcommand() {
        analyze::analyze_path(sub)
    } else {
        panic!("no analyze subcommand");
    }
}

#[test]
fn analyze_credicoop_statement_with_defaults() {
    let file = statement(
        "Fecha,Concepto,Débito,Crédito\n\
         2024-01-02,Impuesto Ley 25.413 Ali Gral s/Debitos,\"1.234,56\",\n\
         2024-01-03,Com. mantenimiento cuenta,\"2.000,00\",\n\
         2024-01-04,Debito Automatico Directo FEDERACION PATRO 0001,\"15.000,00\",\n\
         2024-01-05,Transferencia recibida,,\"50.000,00\"\n\
         2024-01-06,IVA - Alicuota No Alcanzado,N/A,\n",
    );
    let path = file.path().to_str().unwrap().to_string();
    let (_dir, cfg_arg) = empty_config();

    let result = run(&["conceptscan", "analyze", "--path", &path, "--config", &cfg_arg]).unwrap();
    assert_eq!(result.matched_total, Decimal::new(323456, 2));
    assert_eq!(result.special_total, Decimal::new(1500000, 2));
    assert_eq!(result.special_rows.len(), 1);
    assert_eq!(result.special_rows[0].date.as_deref(), Some("2024-01-04"));
    assert_eq!(result.excluded.len(), 1);
    assert_eq!(result.excluded[0].row, 6);
}

#[test]
fn analyze_trims_padded_path_and_applies_column_flags() {
    let file = statement("Date;Detalle;Importe\n01/01;Supermarket X;\"100,50\"\n");
    let padded = format!("  {}  ", file.path().to_str().unwrap());
    let cfg_dir = tempfile::tempdir().unwrap();
    let cfg_path = cfg_dir.path().join("config.json");
    std::fs::write(&cfg_path, r#"{ "concepts": ["supermarket"] }"#).unwrap();
    let cfg_arg = cfg_path.to_str().unwrap().to_string();

    let result = run(&[
        "conceptscan",
        "analyze",
        "--path",
        &padded,
        "--concept-col",
        "Detalle",
        "--debit-col",
        "Importe",
        "--config",
        &cfg_arg,
    ])
    .unwrap();
    assert_eq!(result.matched_total, Decimal::new(10050, 2));
    assert_eq!(result.per_concept[0].concept, "supermarket");
}

#[test]
fn analyze_reports_missing_column() {
    let file = statement("Fecha,Descripción,Debitos\n2024-01-01,x,1\n");
    let path = file.path().to_str().unwrap().to_string();
    let (_dir, cfg_arg) = empty_config();
    let err = run(&[
        "conceptscan",
        "analyze",
        "--path",
        &path,
        "--bank",
        "credicoop",
        "--config",
        &cfg_arg,
    ])
    .unwrap_err();
    let msg = format!("{:#}", err);
    assert!(msg.contains("Missing required concept column 'Concepto'"), "{}", msg);
}

#[test]
fn bank_flag_switches_column_layout() {
    let (_dir, cfg_arg) = empty_config();
    let matches = cli::build_cli().get_matches_from([
        "conceptscan",
        "--config",
        cfg_arg.as_str(),
        "analyze",
        "--path",
        "x.csv",
        "--bank",
        "galicia",
        "--date-col",
        "Fecha Valor",
        "--match",
        "prefix",
    ]);
    let Some(("analyze", sub)) = matches.subcommand() else {
        panic!("no analyze subcommand");
    };
    let cfg = resolve_config(sub).unwrap();
    assert_eq!(cfg.columns.concept, "Descripción");
    assert_eq!(cfg.columns.debit, "Debitos");
    assert_eq!(cfg.columns.date.as_deref(), Some("Fecha Valor"));
    assert_eq!(cfg.match_mode.to_string(), "prefix");
}

#[test]
fn empty_statement_is_not_an_error() {
    let table = RawTable::default();
    let result = analyze::analyze_table(&table, &Config::default()).unwrap();
    assert_eq!(result.matched_total, Decimal::ZERO);
    assert_eq!(result.special_total, Decimal::ZERO);
    assert!(result.special_rows.is_empty());
    assert_eq!(result.per_concept.len(), 8);
}

#[test]
fn rendered_report_has_summary_and_detail() {
    let table = RawTable::from_rows(vec![
        vec!["Fecha", "Concepto", "Débito"],
        vec!["2024-01-01", "Com. mantenimiento cuenta", "1.500,00"],
        vec![
            "2024-01-02",
            "Debito Automatico Directo FEDERACION PATRO",
            "1234567,8",
        ],
    ]);
    let result = analyze::analyze_table(&table, &Config::default()).unwrap();
    let mut out = Vec::new();
    report::render(&result, &mut out).unwrap();
    let text = String::from_utf8(out).unwrap();
    assert!(text.contains("Total of listed concepts: 1,500.00"));
    assert!(text.contains("1,234,567.80"));
    assert!(text.contains(report::TOTAL_GENERAL));
    assert!(text.contains("Detail of special concept"));

    let summary = report::summary_rows(&result);
    assert_eq!(summary.len(), 10);
    assert_eq!(summary[8][0], report::TOTAL_GENERAL);
    assert_eq!(summary[8][2], "1,500.00");
}

#[test]
fn rendered_report_notes_missing_special_rows() {
    let table = RawTable::from_rows(vec![vec!["Concepto", "Débito"], vec!["x", "1"]]);
    let result = analyze::analyze_table(&table, &Config::default()).unwrap();
    let mut out = Vec::new();
    report::render(&result, &mut out).unwrap();
    let text = String::from_utf8(out).unwrap();
    assert!(text.contains("No records found for special concept"));
}

#[test]
fn concepts_command_prints_configuration() {
    let (_dir, cfg_arg) = empty_config();
    let matches = cli::build_cli().get_matches_from([
        "conceptscan",
        "concepts",
        "--json",
        "--config",
        cfg_arg.as_str(),
    ]);
    let Some(("concepts", sub)) = matches.subcommand() else {
        panic!("no concepts subcommand");
    };
    concepts::handle(sub).unwrap();
}
