use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CopyError;

/// A `(region, name)` handle to a remote parameter group.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupRef {
    pub region: String,
    pub name: String,
}

impl FromStr for GroupRef {
    type Err = CopyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || CopyError::InvalidGroupRef(s.to_owned());
        let (region, name) = s.split_once(':').ok_or_else(invalid)?;
        if region.is_empty() || name.is_empty() || name.contains(':') {
            return Err(invalid());
        }

        Ok(GroupRef {
            region: region.to_owned(),
            name: name.to_owned(),
        })
    }
}

impl fmt::Display for GroupRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.region, self.name)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GroupSummary {
    pub family: String,
    pub description: String,
}

/// One engine setting of a parameter group, with the provider's metadata
/// carried along untouched so it can be written back and compared.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Parameter {
    pub parameter_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parameter_value: Option<String>,
    #[serde(default)]
    pub is_modifiable: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub allowed_values: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub apply_method: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub apply_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub minimum_engine_version: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub supported_engine_modes: Option<Vec<String>>,
}

impl Parameter {
    #[cfg(test)]
    pub fn new(name: impl Into<String>, value: Option<&str>, is_modifiable: bool) -> Self {
        Parameter {
            parameter_name: name.into(),
            parameter_value: value.map(str::to_owned),
            is_modifiable,
            ..Default::default()
        }
    }

    /// Modifiable and explicitly set, i.e. worth copying.
    pub fn is_copyable(&self) -> bool {
        self.is_modifiable && self.parameter_value.is_some()
    }
}
