//! Store configuration loading.

use std::time::Duration;

use anyhow::Context;

use crate::in_memory::InMemoryCatalogStore;
use crate::latency::Latency;

pub const LATENCY_ENV: &str = "CATALOG_STORE_LATENCY_MS";
pub const BULK_LATENCY_ENV: &str = "CATALOG_STORE_BULK_LATENCY_MS";
pub const SEED_ENV: &str = "CATALOG_STORE_SEED";

/// How to build the development store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    /// Delay before each single-record operation.
    pub latency: Duration,
    /// Delay before bulk operations.
    pub bulk_latency: Duration,
    /// Pre-populate with the demo catalog.
    pub seed: bool,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            latency: Duration::from_millis(300),
            bulk_latency: Duration::from_millis(500),
            seed: true,
        }
    }
}

impl StoreConfig {
    /// Configuration without artificial delay (tests).
    pub fn instant() -> Self {
        Self {
            latency: Duration::ZERO,
            bulk_latency: Duration::ZERO,
            ..Self::default()
        }
    }

    /// Read overrides from the process environment; unset variables keep defaults.
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`StoreConfig::from_env`] with an injectable variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let defaults = Self::default();
        let latency = match lookup(LATENCY_ENV) {
            Some(raw) => parse_millis(LATENCY_ENV, &raw)?,
            None => defaults.latency,
        };
        let bulk_latency = match lookup(BULK_LATENCY_ENV) {
            Some(raw) => parse_millis(BULK_LATENCY_ENV, &raw)?,
            None => defaults.bulk_latency,
        };
        let seed = match lookup(SEED_ENV) {
            Some(raw) => parse_flag(SEED_ENV, &raw)?,
            None => defaults.seed,
        };

        Ok(Self {
            latency,
            bulk_latency,
            seed,
        })
    }

    pub fn latency_profile(&self) -> Latency {
        Latency::fixed(self.latency).with_bulk(self.bulk_latency)
    }

    pub fn build(&self) -> InMemoryCatalogStore {
        tracing::info!(
            latency_ms = self.latency.as_millis() as u64,
            bulk_latency_ms = self.bulk_latency.as_millis() as u64,
            seed = self.seed,
            "building in-memory catalog store"
        );
        if self.seed {
            InMemoryCatalogStore::seeded(self.latency_profile())
        } else {
            InMemoryCatalogStore::with_latency(self.latency_profile())
        }
    }
}

fn parse_millis(key: &str, raw: &str) -> anyhow::Result<Duration> {
    let ms: u64 = raw
        .trim()
        .parse()
        .with_context(|| format!("{key} must be a whole number of milliseconds, got {raw:?}"))?;
    Ok(Duration::from_millis(ms))
}

fn parse_flag(key: &str, raw: &str) -> anyhow::Result<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => anyhow::bail!("{key} must be a boolean flag, got {raw:?}"),
    }
}
