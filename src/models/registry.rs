//! Field classification registry.
//!
//! Names listed here override type inference for leaf values. The registry
//! is built once and handed to the parser; it is never mutated afterwards.

use std::collections::HashSet;
use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::error::{PchrError, Result};

/// Block name that repeats at one depth without an index suffix (soft handovers)
pub const SHO_INFO_NAME: &str = "ShoInfo";

// Several of these values are hexadecimal in practice; keeping them as text
// avoids lossy numeric interpretation.
const STANDARD_STRING_FIELDS: &[&str] =
    &["IMSI", "SysHoPlmnMcc", "PeerISDN", "IMEI_SNR", "IMEI_TAC", "RrcMsgKeyIe"];

const STANDARD_INT_FIELDS: &[&str] = &[
    "CellId",
    "Act1ACellId",
    "Mon1ACellId",
    "ConnNCellId",
    "RrcActCellId",
    "RrcRFCellId",
    "ShoActCellId",
    "ShoMonCellId",
    "ShoTarCellId",
    "Act1CCellId",
    "Mon1CCellId",
    "RrcRFRscp",
    "SigSetRscp",
    "ShoActCelRscp",
    "ShoMonCelRscp",
    "ActCel1CRscp",
    "MonCel1CRscp",
    "ActCel1ARscp",
    "MonCel1ARscp",
    "ConnNCellRscp",
];

const STANDARD_FLOAT_FIELDS: &[&str] = &[
    "SigSetEc_N0",
    "ConnNCellEc_N0",
    "RrcRFEc_N0",
    "ShoMonCelEc_N0",
    "ShoActCelEc_N0",
    "HhoTarCelEc_N0",
    "ActCel1CEc_N0",
    "MonCel1CEc_N0",
    "ActCel1AEc_N0",
    "MonCel1AEc_N0",
];

/// On-disk shape of a registry file. Every key is optional.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RegistryConfig {
    pub int_fields: Vec<String>,
    pub float_fields: Vec<String>,
    pub string_fields: Vec<String>,
    pub repeated_blocks: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldRegistry {
    int_fields: HashSet<String>,
    float_fields: HashSet<String>,
    string_fields: HashSet<String>,
    repeated_blocks: HashSet<String>,
}

impl FieldRegistry {
    /// Registry with no forced fields and no repeated blocks
    pub fn empty() -> Self {
        Self::default()
    }

    /// The built-in tables for UMTS call history records
    pub fn standard() -> Self {
        let owned =
            |names: &[&str]| -> HashSet<String> { names.iter().map(|s| s.to_string()).collect() };
        Self {
            int_fields: owned(STANDARD_INT_FIELDS),
            float_fields: owned(STANDARD_FLOAT_FIELDS),
            string_fields: owned(STANDARD_STRING_FIELDS),
            repeated_blocks: owned(&[SHO_INFO_NAME]),
        }
    }

    /// Build a registry, rejecting a name classified under more than one type
    pub fn from_config(config: RegistryConfig) -> Result<Self> {
        let registry = Self {
            int_fields: config.int_fields.into_iter().collect(),
            float_fields: config.float_fields.into_iter().collect(),
            string_fields: config.string_fields.into_iter().collect(),
            repeated_blocks: config.repeated_blocks.into_iter().collect(),
        };
        registry.validate()?;
        Ok(registry)
    }

    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: RegistryConfig = serde_json::from_str(json)
            .map_err(|e| PchrError::InvalidRegistry(format!("malformed registry JSON: {}", e)))?;
        Self::from_config(config)
    }

    pub fn from_path(path: &Path) -> Result<Self> {
        let json = fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    fn validate(&self) -> Result<()> {
        let sets = [
            ("int", &self.int_fields),
            ("float", &self.float_fields),
            ("string", &self.string_fields),
        ];
        for (i, (name_a, a)) in sets.iter().enumerate() {
            for (name_b, b) in &sets[i + 1..] {
                let mut overlap: Vec<&String> = a.intersection(b).collect();
                if !overlap.is_empty() {
                    overlap.sort();
                    return Err(PchrError::InvalidRegistry(format!(
                        "fields classified as both {} and {}: {:?}",
                        name_a, name_b, overlap
                    )));
                }
            }
        }
        Ok(())
    }

    pub fn is_int_field(&self, key: &str) -> bool {
        self.int_fields.contains(key)
    }

    pub fn is_float_field(&self, key: &str) -> bool {
        self.float_fields.contains(key)
    }

    pub fn is_string_field(&self, key: &str) -> bool {
        self.string_fields.contains(key)
    }

    /// Whether blocks with this name accumulate into a list under `<name>s`
    pub fn is_repeated_block(&self, name: &str) -> bool {
        self.repeated_blocks.contains(name)
    }
}
