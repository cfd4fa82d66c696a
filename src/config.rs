use crate::error::{EngineError, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EngineConfig {
    pub classification: ClassificationConfig,
    pub slot_mapping: SlotMappingConfig,
    pub suppression: SuppressionConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ClassificationConfig {
    /// Results below this are reported as unclassified.
    pub min_confidence: f64,
    /// Next-best candidates listed on an unclassified result.
    pub candidate_limit: usize,
}

impl Default for ClassificationConfig {
    fn default() -> Self {
        Self {
            min_confidence: 0.3,
            candidate_limit: 3,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SlotMappingConfig {
    /// Minimum candidate score for a slot binding.
    pub bind_threshold: f64,
    /// Width of the band below the threshold that yields suggestions.
    pub near_miss_margin: f64,
    pub required_weight: f64,
    pub optional_weight: f64,
    /// A matched slot under this fraction of the mean matched confidence is flagged.
    pub weak_match_ratio: f64,
    /// Overall confidence when a schema has slots but none of them found a node.
    pub unfilled_confidence: f64,
}

impl Default for SlotMappingConfig {
    fn default() -> Self {
        Self {
            bind_threshold: 0.4,
            near_miss_margin: 0.15,
            required_weight: 2.0,
            optional_weight: 1.0,
            weak_match_ratio: 0.75,
            unfilled_confidence: 0.5,
        }
    }
}

/// Damping factor overrides, keyed by the built-in damper name. Keys left
/// out keep their built-in factor.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SuppressionConfig {
    pub damping: BTreeMap<String, f64>,
}

fn check_unit(name: &str, value: f64) -> Result<()> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(EngineError::InvalidConfig(format!(
            "{} must be within [0, 1], got {}",
            name, value
        )))
    }
}

fn check_positive(name: &str, value: f64) -> Result<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(EngineError::InvalidConfig(format!(
            "{} must be a positive number, got {}",
            name, value
        )))
    }
}

impl EngineConfig {
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| EngineError::ConfigRead {
            path: path.display().to_string(),
            source,
        })?;
        let config = Self::from_yaml_str(&content)?;
        log::info!("Loaded engine configuration from {}", path.display());
        Ok(config)
    }

    pub fn from_yaml_str(content: &str) -> Result<Self> {
        let config: EngineConfig = serde_yaml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_yaml_string(&self) -> Result<String> {
        Ok(serde_yaml::to_string(self)?)
    }

    pub fn validate(&self) -> Result<()> {
        check_unit(
            "classification.min_confidence",
            self.classification.min_confidence,
        )?;

        let mapping = &self.slot_mapping;
        check_unit("slot_mapping.bind_threshold", mapping.bind_threshold)?;
        check_unit("slot_mapping.near_miss_margin", mapping.near_miss_margin)?;
        check_unit("slot_mapping.weak_match_ratio", mapping.weak_match_ratio)?;
        check_unit("slot_mapping.unfilled_confidence", mapping.unfilled_confidence)?;
        check_positive("slot_mapping.required_weight", mapping.required_weight)?;
        check_positive("slot_mapping.optional_weight", mapping.optional_weight)?;
        if mapping.required_weight < mapping.optional_weight {
            return Err(EngineError::InvalidConfig(format!(
                "slot_mapping.required_weight ({}) must not be below optional_weight ({})",
                mapping.required_weight, mapping.optional_weight
            )));
        }

        let known = crate::classifiers::builtin_damper_keys();
        for (key, factor) in &self.suppression.damping {
            if !known.contains(&key.as_str()) {
                return Err(EngineError::InvalidConfig(format!(
                    "unknown suppression key '{}' (known: {})",
                    key,
                    known.join(", ")
                )));
            }
            if !(*factor > 0.0 && *factor < 1.0) {
                return Err(EngineError::InvalidConfig(format!(
                    "damping factor for '{}' must be within (0, 1), got {}",
                    key, factor
                )));
            }
        }
        Ok(())
    }
}
