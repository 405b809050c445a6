//! # slackpack CLI
//!
//! Command-line interface for the slackpack library.

use std::process;
use std::time::Instant;

use clap::Parser as ClapParser;
use tracing_subscriber::EnvFilter;

use slackpack::SlackpackError;
use slackpack::cli::Args;
use slackpack::config::ExportConfig;
use slackpack::core::Exporter;
use slackpack::progress::stderr_progress;

fn main() {
    init_tracing();

    if let Err(e) = run() {
        if e.is_usage() {
            // Not a directory: report and leave with a clean exit status.
            println!("{}", e);
            return;
        }
        eprintln!("❌ Error: {}", e);
        process::exit(1);
    }
}

/// Diagnostics go to stderr, filtered by `RUST_LOG` (default: warnings only).
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn run() -> Result<(), SlackpackError> {
    let total_start = Instant::now();
    let args = <Args as ClapParser>::parse();

    if !args.directory.is_dir() {
        return Err(SlackpackError::not_a_directory(&args.directory));
    }

    let exporter = Exporter::new(ExportConfig::default()).with_progress(stderr_progress());
    let output_path = exporter.output_path(&args.directory);

    // Print header
    println!("📦 slackpack v{}", env!("CARGO_PKG_VERSION"));
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    println!("📂 Input:   {}", args.directory.display());
    println!("💾 Output:  {}", output_path.display());
    println!("📄 Schema:  {}", exporter.config().schema);
    println!();

    println!("⏳ Exporting...");
    let stats = exporter.run(&args.directory)?;
    let total_time = total_start.elapsed();

    println!();
    println!("✅ Done! Output saved to {}", stats.output_path.display());

    // Summary
    println!();
    println!("📊 Summary:");
    println!("   User files:    {}", stats.user_files);
    println!("   Users:         {}", stats.users);
    println!("   Channels:      {}", stats.channels);
    println!("   Message files: {}", stats.message_files);
    println!("   Rows:          {}", stats.rows);

    // Performance stats
    println!();
    println!("⚡ Performance:");
    println!("   Total time:  {:.2}s", total_time.as_secs_f64());
    let msgs_per_sec = stats.rows as f64 / total_time.as_secs_f64().max(f64::EPSILON);
    println!("   Throughput:  {:.0} messages/sec", msgs_per_sec);

    Ok(())
}
