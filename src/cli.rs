//! Command-line interface definition using clap.

use std::path::PathBuf;

use clap::Parser;

/// Flatten a Slack export directory into a single CSV.
///
/// Writes `output.csv` into DIRECTORY with one row per message:
/// timestamp, user, channel, message.
#[derive(Parser, Debug, Clone)]
#[command(name = "slackpack")]
#[command(version, about, long_about = None)]
#[command(after_help = "EXAMPLES:
    slackpack ./slack_export
    RUST_LOG=debug slackpack ./slack_export")]
pub struct Args {
    /// The export directory to process
    pub directory: PathBuf,
}
