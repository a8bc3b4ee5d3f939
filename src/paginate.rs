use std::collections::BTreeSet;
use std::io::Write;

use futures_util::stream::{self, Stream};
use futures_util::{pin_mut, TryStreamExt};
use tracing::debug;

use crate::api::ParameterGroupApi;
use crate::error::{CopyError, Result};
use crate::group::Parameter;

/// Records requested per `describe-parameters` page.
pub const PAGE_SIZE: i64 = 100;

/// Lazily walks the pages of `group`, following the marker until the API stops
/// returning one.
pub fn parameter_pages<'a, A>(
    api: &'a A,
    group: &'a str,
) -> impl Stream<Item = Result<Vec<Parameter>>> + 'a
where
    A: ParameterGroupApi + ?Sized,
{
    // `None` once the last page has been handed out.
    let start: Option<Option<String>> = Some(None);
    stream::try_unfold(start, move |cursor| async move {
        let Some(marker) = cursor else {
            return Ok::<_, CopyError>(None);
        };
        debug!(group, ?marker, "describing parameters");
        let page = api.describe_parameters(group, marker, PAGE_SIZE).await?;
        Ok(Some((page.parameters, page.marker.map(Some))))
    })
}

/// Every parameter of `group` in page order, minus `ignore`d names and anything
/// `filter` rejects. Reports the count on `out`.
pub async fn get_params<A>(
    api: &A,
    group: &str,
    ignore: &BTreeSet<String>,
    filter: Option<&dyn Fn(&Parameter) -> bool>,
    out: &mut dyn Write,
) -> Result<Vec<Parameter>>
where
    A: ParameterGroupApi + ?Sized,
{
    let pages = parameter_pages(api, group);
    pin_mut!(pages);

    let mut parameters = Vec::new();
    while let Some(page) = pages.try_next().await? {
        parameters.extend(page.into_iter().filter(|p| {
            filter.map_or(true, |keep| keep(p)) && !ignore.contains(&p.parameter_name)
        }));
    }

    writeln!(out, "found {} params", parameters.len())?;
    Ok(parameters)
}
