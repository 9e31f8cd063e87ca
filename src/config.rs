// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use directories::ProjectDirs;
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::aggregator::{CategoryRules, MatchMode};
use crate::error::{ConceptError, Result};

static APP: Lazy<(&str, &str, &str)> =
    Lazy::new(|| ("com.alphavelocity", "Conceptscan", "conceptscan"));

pub const DEFAULT_CONCEPTS: &[&str] = &[
    "IVA - Alicuota No Alcanzado",
    "Impuesto Ley 25.413 Ali Gral s/Debitos",
    "Percep Ing Brutos No incl en padron PBA",
    "Com. mantenimiento cuenta",
    "Impuesto Ley 25.413 Ali Gral s/Creditos",
    "Comision por Transferencia B. INTERNET COM.",
    "Suscripcion al Periodico Accion",
    "Contracargos a comercios First Data MASTER CONTRACARGO",
];

pub const DEFAULT_SPECIAL: &str = "Debito Automatico Directo FEDERACION PATRO";

/// Header names of the columns the loader looks for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ColumnNames {
    pub concept: String,
    pub debit: String,
    /// `None` auto-detects a header containing "fecha" or "date".
    pub date: Option<String>,
}

impl Default for ColumnNames {
    fn default() -> Self {
        Bank::Credicoop.columns()
    }
}

/// Column layouts of the statement exports we know about.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Bank {
    Credicoop,
    Galicia,
}

impl Bank {
    pub fn from_key(key: &str) -> Option<Self> {
        match key.trim().to_ascii_lowercase().as_str() {
            "credicoop" => Some(Self::Credicoop),
            "galicia" => Some(Self::Galicia),
            _ => None,
        }
    }

    pub fn columns(&self) -> ColumnNames {
        let (concept, debit) = match self {
            Self::Credicoop => ("Concepto", "Débito"),
            Self::Galicia => ("Descripción", "Debitos"),
        };
        ColumnNames {
            concept: concept.to_string(),
            debit: debit.to_string(),
            date: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub concepts: Vec<String>,
    pub special: String,
    pub match_mode: MatchMode,
    pub columns: ColumnNames,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            concepts: DEFAULT_CONCEPTS.iter().map(|s| s.to_string()).collect(),
            special: DEFAULT_SPECIAL.to_string(),
            match_mode: MatchMode::default(),
            columns: ColumnNames::default(),
        }
    }
}

/// Location of the per-user config file, if the platform has a config dir.
pub fn default_config_path() -> Option<PathBuf> {
    ProjectDirs::from(APP.0, APP.1, APP.2).map(|p| p.config_dir().join("config.json"))
}

impl Config {
    pub fn from_json(s: &str) -> Result<Self> {
        let cfg: Config = serde_json::from_str(s)?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn from_path(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)?;
        Self::from_json(&text)
    }

    /// An explicit path must exist; otherwise the user config file is used when present,
    /// and built-in defaults when not.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        if let Some(p) = explicit {
            debug!(path = %p.display(), "loading config");
            return Self::from_path(p);
        }
        match default_config_path() {
            Some(p) if p.is_file() => {
                debug!(path = %p.display(), "loading user config");
                Self::from_path(&p)
            }
            _ => Ok(Self::default()),
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.concepts.iter().any(|c| c.trim().is_empty()) {
            return Err(ConceptError::Config("concept patterns must not be empty".into()));
        }
        if self.special.trim().is_empty() {
            return Err(ConceptError::Config("special concept must not be empty".into()));
        }
        if self.columns.concept.trim().is_empty() || self.columns.debit.trim().is_empty() {
            return Err(ConceptError::Config("column names must not be empty".into()));
        }
        Ok(())
    }

    pub fn rules(&self) -> Result<CategoryRules> {
        CategoryRules::new(&self.concepts, &self.special, self.match_mode)
    }
}
