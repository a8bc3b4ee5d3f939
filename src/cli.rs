use clap::Parser;

use crate::copy::CopyJob;
use crate::group::GroupRef;

/// Copy the modifiable parameters of an RDS parameter group to another region
/// or name.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Group to copy from
    #[arg(value_name = "REGION:GROUP_NAME")]
    pub source: GroupRef,

    /// Group to copy to, created if it does not exist
    #[arg(value_name = "REGION:GROUP_NAME")]
    pub target: GroupRef,

    /// Parameter name to leave out of the copy and the comparison
    #[arg(long = "ignore", value_name = "NAME")]
    pub ignore: Vec<String>,

    #[arg(long)]
    pub source_endpoint: Option<String>,

    #[arg(long)]
    pub target_endpoint: Option<String>,

    /// Log filter for diagnostics on stderr; RUST_LOG takes precedence
    #[arg(long, default_value = "warn")]
    pub verbosity: String,
}

impl Args {
    pub fn job(&self) -> CopyJob {
        CopyJob {
            source: self.source.clone(),
            target: self.target.clone(),
            ignore: self.ignore.iter().cloned().collect(),
        }
    }
}
