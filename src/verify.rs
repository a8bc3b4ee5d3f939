use serde::Serialize;
use similar::{ChangeTag, TextDiff};

use crate::error::Result;
use crate::group::Parameter;

/// Key-sorted JSON with a four-space indent, so equal snapshots render
/// byte-identically.
pub fn render_snapshot(parameters: &[Parameter]) -> Result<String> {
    // serde_json::Map is a BTreeMap, so going through Value sorts object keys.
    let value = serde_json::to_value(parameters)?;

    let mut buf = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
    let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
    value.serialize(&mut ser)?;

    Ok(String::from_utf8_lossy(&buf).into_owned())
}

/// Lines present in only one of the two snapshots, `- ` for source and `+ `
/// for target.
pub fn diff_snapshots(source: &[Parameter], target: &[Parameter]) -> Result<Vec<String>> {
    let source = render_snapshot(source)?;
    let target = render_snapshot(target)?;

    let diff = TextDiff::from_lines(&source, &target);
    let lines = diff
        .iter_all_changes()
        .filter_map(|change| {
            let sign = match change.tag() {
                ChangeTag::Equal => return None,
                ChangeTag::Delete => "- ",
                ChangeTag::Insert => "+ ",
            };
            Some(format!("{sign}{}", change.value().trim_end_matches('\n')))
        })
        .collect();

    Ok(lines)
}
