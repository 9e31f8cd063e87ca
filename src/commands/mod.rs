// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

pub mod analyze;
pub mod concepts;

use anyhow::{Context, Result, anyhow};
use std::path::PathBuf;

use crate::aggregator::MatchMode;
use crate::config::{Bank, Config};

/// Config file values overridden by whatever flags this subcommand carries.
pub fn resolve_config(m: &clap::ArgMatches) -> Result<Config> {
    let explicit = m
        .try_get_one::<String>("config")
        .ok()
        .flatten()
        .map(|s| PathBuf::from(s.trim()));
    let mut cfg = Config::load(explicit.as_deref()).with_context(|| match &explicit {
        Some(p) => format!("Load config {}", p.display()),
        None => "Load user config".to_string(),
    })?;

    let flag = |id: &str| {
        m.try_get_one::<String>(id)
            .ok()
            .flatten()
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
    };
    if let Some(b) = flag("bank") {
        let bank = Bank::from_key(&b).ok_or_else(|| anyhow!("Unknown bank '{}'", b))?;
        let date = cfg.columns.date.take();
        cfg.columns = bank.columns();
        cfg.columns.date = date;
    }
    if let Some(c) = flag("concept_col") {
        cfg.columns.concept = c;
    }
    if let Some(d) = flag("debit_col") {
        cfg.columns.debit = d;
    }
    if let Some(d) = flag("date_col") {
        cfg.columns.date = Some(d);
    }
    if let Some(mode) = flag("match") {
        cfg.match_mode =
            MatchMode::from_key(&mode).ok_or_else(|| anyhow!("Unknown match mode '{}'", mode))?;
    }
    cfg.validate()?;
    Ok(cfg)
}
