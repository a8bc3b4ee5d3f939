use std::collections::BTreeSet;
use std::str::FromStr;

use async_trait::async_trait;
use rusoto_core::{HttpClient, Region};
use rusoto_credential::DefaultCredentialsProvider;
use rusoto_rds::{
    CreateDBParameterGroupMessage, DescribeDBParameterGroupsMessage, DescribeDBParametersMessage,
    ModifyDBParameterGroupMessage, Parameter as RdsParameter, Rds, RdsClient,
};
use tracing::debug;

use crate::error::{CopyError, Result};
use crate::group::{GroupSummary, Parameter};

/// One page of a `describe-parameters` listing.
#[derive(Debug, Clone, Default)]
pub struct ParameterPage {
    pub parameters: Vec<Parameter>,
    pub marker: Option<String>,
}

/// The slice of the RDS parameter group API the copy needs, bound to one region.
#[async_trait]
pub trait ParameterGroupApi: Send + Sync {
    fn region(&self) -> &str;

    async fn describe_group(&self, name: &str) -> Result<GroupSummary>;

    async fn describe_parameters(
        &self,
        group: &str,
        marker: Option<String>,
        max_records: i64,
    ) -> Result<ParameterPage>;

    async fn list_group_names(&self) -> Result<BTreeSet<String>>;

    async fn create_group(&self, name: &str, summary: &GroupSummary) -> Result<()>;

    async fn modify_parameters(&self, group: &str, parameters: &[Parameter]) -> Result<()>;
}

pub struct RdsApi {
    region: String,
    client: RdsClient,
}

impl RdsApi {
    /// Client for `region`, credentials resolved from the default provider chain.
    pub fn new(region: &str, endpoint: Option<String>) -> Result<Self> {
        let rusoto_region = match endpoint {
            Some(endpoint) => Region::Custom {
                name: region.to_owned(),
                endpoint,
            },
            None => Region::from_str(region)
                .map_err(|_| CopyError::InvalidRegion(region.to_owned()))?,
        };

        let dispatcher = HttpClient::new().map_err(|e| CopyError::client(region, e))?;
        let credentials_provider =
            DefaultCredentialsProvider::new().map_err(|e| CopyError::client(region, e))?;

        debug!("created RDS client for {:?}", rusoto_region);
        Ok(Self::with_client(
            region,
            RdsClient::new_with(dispatcher, credentials_provider, rusoto_region),
        ))
    }

    pub fn with_client(region: &str, client: RdsClient) -> Self {
        RdsApi {
            region: region.to_owned(),
            client,
        }
    }
}

#[async_trait]
impl ParameterGroupApi for RdsApi {
    fn region(&self) -> &str {
        &self.region
    }

    async fn describe_group(&self, name: &str) -> Result<GroupSummary> {
        let output = self
            .client
            .describe_db_parameter_groups(DescribeDBParameterGroupsMessage {
                db_parameter_group_name: Some(name.to_owned()),
                ..Default::default()
            })
            .await
            .map_err(|e| CopyError::api("DescribeDBParameterGroups", e))?;

        let group = output
            .db_parameter_groups
            .unwrap_or_default()
            .into_iter()
            .next()
            .ok_or_else(|| CopyError::GroupNotFound {
                region: self.region.clone(),
                name: name.to_owned(),
            })?;

        Ok(GroupSummary {
            family: group.db_parameter_group_family.unwrap_or_default(),
            description: group.description.unwrap_or_default(),
        })
    }

    async fn describe_parameters(
        &self,
        group: &str,
        marker: Option<String>,
        max_records: i64,
    ) -> Result<ParameterPage> {
        let output = self
            .client
            .describe_db_parameters(DescribeDBParametersMessage {
                db_parameter_group_name: group.to_owned(),
                marker,
                max_records: Some(max_records),
                ..Default::default()
            })
            .await
            .map_err(|e| CopyError::api("DescribeDBParameters", e))?;

        Ok(ParameterPage {
            parameters: output
                .parameters
                .unwrap_or_default()
                .into_iter()
                .map(Parameter::from)
                .collect(),
            marker: output.marker,
        })
    }

    async fn list_group_names(&self) -> Result<BTreeSet<String>> {
        let mut names = BTreeSet::new();
        let mut marker = None;
        loop {
            let output = self
                .client
                .describe_db_parameter_groups(DescribeDBParameterGroupsMessage {
                    marker: marker.clone(),
                    ..Default::default()
                })
                .await
                .map_err(|e| CopyError::api("DescribeDBParameterGroups", e))?;

            names.extend(
                output
                    .db_parameter_groups
                    .unwrap_or_default()
                    .into_iter()
                    .filter_map(|g| g.db_parameter_group_name),
            );

            match output.marker {
                Some(next) => marker = Some(next),
                None => break,
            }
        }

        Ok(names)
    }

    async fn create_group(&self, name: &str, summary: &GroupSummary) -> Result<()> {
        self.client
            .create_db_parameter_group(CreateDBParameterGroupMessage {
                db_parameter_group_name: name.to_owned(),
                db_parameter_group_family: summary.family.clone(),
                description: summary.description.clone(),
                ..Default::default()
            })
            .await
            .map_err(|e| CopyError::api("CreateDBParameterGroup", e))?;

        Ok(())
    }

    async fn modify_parameters(&self, group: &str, parameters: &[Parameter]) -> Result<()> {
        self.client
            .modify_db_parameter_group(ModifyDBParameterGroupMessage {
                db_parameter_group_name: group.to_owned(),
                parameters: parameters.iter().map(RdsParameter::from).collect(),
            })
            .await
            .map_err(|e| CopyError::api("ModifyDBParameterGroup", e))?;

        Ok(())
    }
}

impl From<RdsParameter> for Parameter {
    fn from(p: RdsParameter) -> Self {
        Parameter {
            parameter_name: p.parameter_name.unwrap_or_default(),
            parameter_value: p.parameter_value,
            is_modifiable: p.is_modifiable.unwrap_or_default(),
            allowed_values: p.allowed_values,
            apply_method: p.apply_method,
            apply_type: p.apply_type,
            data_type: p.data_type,
            description: p.description,
            minimum_engine_version: p.minimum_engine_version,
            source: p.source,
            supported_engine_modes: p.supported_engine_modes,
        }
    }
}

impl From<&Parameter> for RdsParameter {
    fn from(p: &Parameter) -> Self {
        RdsParameter {
            parameter_name: Some(p.parameter_name.clone()),
            parameter_value: p.parameter_value.clone(),
            is_modifiable: Some(p.is_modifiable),
            allowed_values: p.allowed_values.clone(),
            apply_method: p.apply_method.clone(),
            apply_type: p.apply_type.clone(),
            data_type: p.data_type.clone(),
            description: p.description.clone(),
            minimum_engine_version: p.minimum_engine_version.clone(),
            source: p.source.clone(),
            supported_engine_modes: p.supported_engine_modes.clone(),
        }
    }
}
