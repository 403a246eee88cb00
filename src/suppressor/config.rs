//! Suppression configuration
//!
//! Parses the `deactivated-events` section of the host-managed TOML config:
//! nested by priority tier, then by owning-extension name, listing
//! event-type names. Shape problems are logged and the offending entry is
//! skipped; a parse never fails the surrounding reload.

use crate::host::api::EventPriority;
use crate::suppressor::error::{SuppressorError, SuppressorResult};
use std::path::Path;

/// Config key holding the suppression section
pub const DEACTIVATED_EVENTS_KEY: &str = "deactivated-events";

/// Default config written when none exists yet
pub const DEFAULT_CONFIG: &str = "\
# listenercontrol configuration
#
# deactivated-events lists listener registrations to suppress, nested by
# priority tier (lowest, low, normal, high, highest, monitor), then by the
# owning extension's name, as arrays of event-type names. Names are resolved
# against the runtime::event namespace first, then taken literally.
#
# [deactivated-events.normal]
# \"ExampleExt\" = [\"SessionStartEvent\"]

[deactivated-events]
";

/// One declared suppression: suppress listeners of `extension` registered
/// for `event_name` at `priority`
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SuppressionRule {
    pub priority: EventPriority,
    pub extension: String,
    pub event_name: String,
}

/// The parsed suppression section
#[derive(Debug, Default)]
pub struct SuppressionConfig {
    rules: Vec<SuppressionRule>,
}

impl SuppressionConfig {
    /// Parse the suppression section out of a raw TOML table
    ///
    /// Rules come out in priority-tier order, extensions sorted within a
    /// tier, so reload logs are deterministic.
    pub fn from_table(table: &toml::Table) -> Self {
        let mut rules = Vec::new();

        let section = match table.get(DEACTIVATED_EVENTS_KEY) {
            Some(value) => match value.as_table() {
                Some(section) => section,
                None => {
                    log::warn!("'{}' is not a table, ignoring it", DEACTIVATED_EVENTS_KEY);
                    return Self { rules };
                }
            },
            None => return Self { rules },
        };

        for key in section.keys() {
            if EventPriority::parse(key).is_none() {
                log::warn!(
                    "Unknown priority tier '{}' in {}, ignoring it",
                    key,
                    DEACTIVATED_EVENTS_KEY
                );
            }
        }

        for priority in EventPriority::values() {
            let tier = match section.get(priority.name()).and_then(|v| v.as_table()) {
                Some(tier) => tier,
                None => continue,
            };

            let mut entries: Vec<(&String, &toml::Value)> = tier.iter().collect();
            entries.sort_by(|(a, _), (b, _)| a.cmp(b));

            for (extension, value) in entries {
                let mut event_names = Vec::new();

                // Single string and array forms are both accepted
                if let Some(name) = value.as_str() {
                    event_names.push(name.to_string());
                } else if let Some(array) = value.as_array() {
                    for item in array {
                        if let Some(name) = item.as_str() {
                            event_names.push(name.to_string());
                        } else {
                            log::warn!(
                                "Non-string event entry under {}.{}.{}, ignoring it",
                                DEACTIVATED_EVENTS_KEY,
                                priority.name(),
                                extension
                            );
                        }
                    }
                } else {
                    log::warn!(
                        "Entry {}.{}.{} is neither a string nor an array, ignoring it",
                        DEACTIVATED_EVENTS_KEY,
                        priority.name(),
                        extension
                    );
                }

                for event_name in event_names {
                    rules.push(SuppressionRule {
                        priority,
                        extension: extension.to_string(),
                        event_name,
                    });
                }
            }
        }

        Self { rules }
    }

    /// Read and parse a config file
    pub async fn load(path: &Path) -> SuppressorResult<Self> {
        let contents = tokio::fs::read_to_string(path).await.map_err(|e| {
            SuppressorError::ConfigRead {
                path: path.display().to_string(),
                cause: e.to_string(),
            }
        })?;

        let table: toml::Table =
            toml::from_str(&contents).map_err(|e| SuppressorError::ConfigParse {
                path: path.display().to_string(),
                cause: e.to_string(),
            })?;

        Ok(Self::from_table(&table))
    }

    /// Read and parse a config file, writing the default config first if the
    /// file does not exist yet
    pub async fn load_or_default(path: &Path) -> SuppressorResult<Self> {
        if tokio::fs::metadata(path).await.is_err() {
            match tokio::fs::write(path, DEFAULT_CONFIG).await {
                Ok(()) => log::info!("Created default configuration at {}", path.display()),
                Err(e) => log::warn!(
                    "Could not write default configuration to {}: {}",
                    path.display(),
                    e
                ),
            }
        }
        Self::load(path).await
    }

    /// Declared rules, priority tiers in dispatch order
    pub fn rules(&self) -> &[SuppressionRule] {
        &self.rules
    }

    pub fn rule_count(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}
