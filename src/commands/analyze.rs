// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Context, Result};
use std::io::{self, Write};
use std::path::Path;
use tracing::info;

use super::resolve_config;
use crate::aggregator::Aggregator;
use crate::config::Config;
use crate::loader::{self, RawTable};
use crate::models::AggregationResult;
use crate::report;
use crate::utils::maybe_print_json;

const PREVIEW_ROWS: usize = 5;

/// Resolve the configuration and read the file named by `--path`.
fn read_input(m: &clap::ArgMatches) -> Result<(&str, Config, RawTable)> {
    let path = m.get_one::<String>("path").unwrap().trim();
    let cfg = resolve_config(m)?;
    let table = loader::read_table(Path::new(path), &cfg.columns)
        .with_context(|| format!("Open {}", path))?;
    info!(path, rows = table.rows.len(), "file read");
    Ok((path, cfg, table))
}

pub fn handle(m: &clap::ArgMatches) -> Result<()> {
    let (path, cfg, table) = read_input(m)?;

    let stdout = io::stdout();
    let mut out = stdout.lock();
    let json_flag = m.get_flag("json");
    let jsonl_flag = m.get_flag("jsonl");

    if m.get_flag("preview") && !json_flag && !jsonl_flag {
        let (headers, rows) = loader::preview(&table, &cfg.columns, PREVIEW_ROWS);
        writeln!(out, "Loaded {}", path)?;
        report::render_preview(&headers, rows, &mut out)?;
        writeln!(out)?;
    }

    let result = analyze_table(&table, &cfg).with_context(|| format!("Analyze {}", path))?;
    if !maybe_print_json(json_flag, jsonl_flag, &result)? {
        report::render(&result, &mut out)?;
    }
    Ok(())
}

/// Load, normalize and aggregate one table under the given configuration.
pub fn analyze_table(table: &RawTable, cfg: &Config) -> Result<AggregationResult> {
    let loaded = loader::load(table, &cfg.columns)?;
    if loaded.is_empty() {
        info!("no data rows; totals are zero");
    }
    let aggregator = Aggregator::new(cfg.rules()?);
    Ok(aggregator.aggregate(&loaded.records)?)
}

/// `handle` without the printing, for callers that want the result value.
pub fn analyze_path(m: &clap::ArgMatches) -> Result<AggregationResult> {
    let (path, cfg, table) = read_input(m)?;
    analyze_table(&table, &cfg).with_context(|| format!("Analyze {}", path))
}
