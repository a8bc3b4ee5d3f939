use std::collections::BTreeSet;
use std::io::Write;

use tracing::{debug, info};

use crate::api::ParameterGroupApi;
use crate::error::{CopyError, Result};
use crate::group::{GroupRef, Parameter};
use crate::paginate::get_params;
use crate::utils::{chunks, MODIFY_BATCH_SIZE};
use crate::verify::diff_snapshots;

#[derive(Debug, Clone)]
pub struct CopyJob {
    pub source: GroupRef,
    pub target: GroupRef,
    /// Parameter names left out of every fetch.
    pub ignore: BTreeSet<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CopyReport {
    pub created_target: bool,
    pub copied: usize,
}

/// Copies every explicitly set, modifiable parameter of `job.source` onto
/// `job.target`, creating the target group if needed, then checks the two
/// groups' full parameter lists are identical.
///
/// Stops at the first failure. Batches applied before a failed modify stay
/// applied.
pub async fn copy_parameter_group<S, T>(
    source_api: &S,
    target_api: &T,
    job: &CopyJob,
    out: &mut dyn Write,
) -> Result<CopyReport>
where
    S: ParameterGroupApi + ?Sized,
    T: ParameterGroupApi + ?Sized,
{
    let mut report = CopyReport::default();

    let summary = source_api.describe_group(&job.source.name).await?;
    debug!(family = %summary.family, "described source group {}", job.source);

    let copyable = |p: &Parameter| p.is_copyable();
    let source_parameters = get_params(
        source_api,
        &job.source.name,
        &job.ignore,
        Some(&copyable),
        out,
    )
    .await?;

    let existing = target_api.list_group_names().await?;
    if !existing.contains(&job.target.name) {
        target_api.create_group(&job.target.name, &summary).await?;
        writeln!(
            out,
            "Created param group {} in region {}",
            job.target.name,
            target_api.region()
        )?;
        report.created_target = true;
    }

    for batch in chunks(&source_parameters, MODIFY_BATCH_SIZE) {
        debug!(size = batch.len(), "modifying {}", job.target);
        if let Err(err) = target_api.modify_parameters(&job.target.name, batch).await {
            writeln!(out, "{:?}", batch)?;
            debug!("modify rejected for {}: {}", job.target, err);
            return Err(err);
        }

        for parameter in batch {
            writeln!(
                out,
                "{} = {}",
                parameter.parameter_name,
                parameter.parameter_value.as_deref().unwrap_or_default()
            )?;
        }
        report.copied += batch.len();
    }

    let all_source = get_params(source_api, &job.source.name, &job.ignore, None, out).await?;
    let all_target = get_params(target_api, &job.target.name, &job.ignore, None, out).await?;

    let lines = diff_snapshots(&all_source, &all_target)?;
    if !lines.is_empty() {
        for line in &lines {
            writeln!(out, "{}", line)?;
        }
        return Err(CopyError::Verification { lines });
    }

    info!(
        copied = report.copied,
        created = report.created_target,
        "copied {} to {}",
        job.source,
        job.target
    );
    writeln!(out, "Complete.")?;
    Ok(report)
}
