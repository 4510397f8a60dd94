// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;
use std::path::{Path, PathBuf};

use crate::store;

pub const DEFAULT_CURRENCY: &str = "₹";
pub const CHARTS_DIR_NAME: &str = "charts";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub file: PathBuf,
    pub charts_dir: PathBuf,
    pub currency: String,
}

impl Settings {
    pub fn for_file(file: impl Into<PathBuf>) -> Self {
        let file = file.into();
        let charts_dir = sibling_charts_dir(&file);
        Settings {
            file,
            charts_dir,
            currency: DEFAULT_CURRENCY.to_string(),
        }
    }

    /// Flags (or their env vars) win; otherwise fall back to the platform
    /// data directory.
    pub fn from_matches(m: &clap::ArgMatches) -> Result<Self> {
        let file = match m.get_one::<String>("file") {
            Some(f) => PathBuf::from(f.trim()),
            None => store::default_file_path()?,
        };
        let mut settings = Settings::for_file(file);
        if let Some(dir) = m.get_one::<String>("charts_dir") {
            settings.charts_dir = PathBuf::from(dir.trim());
        }
        if let Some(ccy) = m.get_one::<String>("currency") {
            settings.currency = ccy.clone();
        }
        Ok(settings)
    }
}

fn sibling_charts_dir(file: &Path) -> PathBuf {
    match file.parent() {
        Some(p) if !p.as_os_str().is_empty() => p.join(CHARTS_DIR_NAME),
        _ => PathBuf::from(CHARTS_DIR_NAME),
    }
}
