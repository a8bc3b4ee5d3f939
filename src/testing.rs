//! In-memory stand-in for the RDS parameter group API.

use std::collections::{BTreeMap, BTreeSet};
use std::sync::Mutex;

use async_trait::async_trait;

use crate::api::{ParameterGroupApi, ParameterPage};
use crate::error::{CopyError, Result};
use crate::group::{GroupSummary, Parameter};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    DescribeGroup(String),
    DescribeParameters { group: String, marker: Option<String> },
    ListGroups,
    CreateGroup { name: String, family: String, description: String },
    Modify { group: String, names: Vec<String> },
}

#[derive(Default)]
struct FakeGroup {
    summary: GroupSummary,
    parameters: Vec<Parameter>,
}

#[derive(Default)]
pub struct FakeRds {
    region: String,
    groups: Mutex<BTreeMap<String, FakeGroup>>,
    family_defaults: BTreeMap<String, Vec<Parameter>>,
    page_size: Option<usize>,
    fail_modify_call: Option<usize>,
    calls: Mutex<Vec<Call>>,
}

impl FakeRds {
    pub fn new(region: &str) -> Self {
        FakeRds {
            region: region.to_owned(),
            ..Default::default()
        }
    }

    pub fn with_group(self, name: &str, family: &str, parameters: Vec<Parameter>) -> Self {
        self.groups.lock().unwrap().insert(
            name.to_owned(),
            FakeGroup {
                summary: GroupSummary {
                    family: family.to_owned(),
                    description: format!("{name} parameters"),
                },
                parameters,
            },
        );
        self
    }

    /// Parameters a freshly created group of `family` starts out with.
    pub fn with_family_defaults(mut self, family: &str, parameters: Vec<Parameter>) -> Self {
        self.family_defaults.insert(family.to_owned(), parameters);
        self
    }

    /// Serve listings in pages of `size` instead of the requested page size.
    pub fn with_page_size(mut self, size: usize) -> Self {
        self.page_size = Some(size);
        self
    }

    /// Fail the `n`-th (1-based) modify request.
    pub fn failing_modify_call(mut self, n: usize) -> Self {
        self.fail_modify_call = Some(n);
        self
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub fn modify_calls(&self) -> Vec<Vec<String>> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                Call::Modify { names, .. } => Some(names),
                _ => None,
            })
            .collect()
    }

    pub fn parameters(&self, group: &str) -> Vec<Parameter> {
        self.groups.lock().unwrap()[group].parameters.clone()
    }

    fn record(&self, call: Call) {
        self.calls.lock().unwrap().push(call);
    }

    fn not_found(&self, operation: &str, group: &str) -> CopyError {
        CopyError::api(operation, format!("DBParameterGroupNotFound: {group}"))
    }
}

#[async_trait]
impl ParameterGroupApi for FakeRds {
    fn region(&self) -> &str {
        &self.region
    }

    async fn describe_group(&self, name: &str) -> Result<GroupSummary> {
        self.record(Call::DescribeGroup(name.to_owned()));
        self.groups
            .lock()
            .unwrap()
            .get(name)
            .map(|g| g.summary.clone())
            .ok_or_else(|| self.not_found("DescribeDBParameterGroups", name))
    }

    async fn describe_parameters(
        &self,
        group: &str,
        marker: Option<String>,
        max_records: i64,
    ) -> Result<ParameterPage> {
        self.record(Call::DescribeParameters {
            group: group.to_owned(),
            marker: marker.clone(),
        });

        let groups = self.groups.lock().unwrap();
        let parameters = &groups
            .get(group)
            .ok_or_else(|| self.not_found("DescribeDBParameters", group))?
            .parameters;

        let page_size = self.page_size.unwrap_or(max_records as usize);
        let start = match marker {
            Some(marker) => marker
                .parse::<usize>()
                .map_err(|_| CopyError::api("DescribeDBParameters", "InvalidMarker"))?,
            None => 0,
        };
        let end = (start + page_size).min(parameters.len());

        Ok(ParameterPage {
            parameters: parameters[start..end].to_vec(),
            marker: (end < parameters.len()).then(|| end.to_string()),
        })
    }

    async fn list_group_names(&self) -> Result<BTreeSet<String>> {
        self.record(Call::ListGroups);
        Ok(self.groups.lock().unwrap().keys().cloned().collect())
    }

    async fn create_group(&self, name: &str, summary: &GroupSummary) -> Result<()> {
        self.record(Call::CreateGroup {
            name: name.to_owned(),
            family: summary.family.clone(),
            description: summary.description.clone(),
        });

        let mut groups = self.groups.lock().unwrap();
        if groups.contains_key(name) {
            return Err(CopyError::api(
                "CreateDBParameterGroup",
                format!("DBParameterGroupAlreadyExists: {name}"),
            ));
        }
        groups.insert(
            name.to_owned(),
            FakeGroup {
                summary: summary.clone(),
                parameters: self
                    .family_defaults
                    .get(&summary.family)
                    .cloned()
                    .unwrap_or_default(),
            },
        );
        Ok(())
    }

    async fn modify_parameters(&self, group: &str, parameters: &[Parameter]) -> Result<()> {
        self.record(Call::Modify {
            group: group.to_owned(),
            names: parameters.iter().map(|p| p.parameter_name.clone()).collect(),
        });

        if parameters.len() > 20 {
            return Err(CopyError::api(
                "ModifyDBParameterGroup",
                "InvalidParameterValue: too many parameters",
            ));
        }

        let modify_count = self
            .calls()
            .iter()
            .filter(|c| matches!(c, Call::Modify { .. }))
            .count();
        if self.fail_modify_call == Some(modify_count) {
            return Err(CopyError::api(
                "ModifyDBParameterGroup",
                "InvalidParameterValue: rejected by fake",
            ));
        }

        let mut groups = self.groups.lock().unwrap();
        let target = &mut groups
            .get_mut(group)
            .ok_or_else(|| self.not_found("ModifyDBParameterGroup", group))?
            .parameters;
        for parameter in parameters {
            match target
                .iter_mut()
                .find(|p| p.parameter_name == parameter.parameter_name)
            {
                Some(existing) => *existing = parameter.clone(),
                None => target.push(parameter.clone()),
            }
        }
        Ok(())
    }
}
