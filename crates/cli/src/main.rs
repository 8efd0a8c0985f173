mod report;

use anatomist::{Ifc, MappedFile};
use anyhow::Context;
use clap::Parser;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "ifc-inspect")]
#[command(about = "Validate an IFC module interface file and summarise its contents", long_about = None)]
struct Cli {
    /// IFC file to inspect.
    path: PathBuf,
    /// Print the summary as JSON.
    #[arg(long, conflicts_with = "quiet")]
    json: bool,
    /// Validate only; print nothing on success.
    #[arg(long, short)]
    quiet: bool,
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();
    cmd_inspect(&cli.path, cli.json, cli.quiet)
}

// ---------------------------------------------------------------------------
// inspect
// ---------------------------------------------------------------------------

fn cmd_inspect(path: &Path, json: bool, quiet: bool) -> anyhow::Result<()> {
    // The mapping is released when `mapped` drops, on success and on every error path.
    let mapped =
        MappedFile::open(path).with_context(|| format!("cannot open {}", path.display()))?;

    let ifc = Ifc::load(mapped.bytes())
        .with_context(|| format!("{} rejected", path.display()))?;
    log::info!(
        "{}: accepted ({} partitions)",
        path.display(),
        ifc.partitions().len()
    );

    if quiet {
        return Ok(());
    }

    let summary = report::Report::build(path, &ifc)
        .with_context(|| format!("{}: unreadable string table entry", path.display()))?;

    let stdout = io::stdout();
    let mut out = stdout.lock();
    if json {
        report::render_json(&summary, &mut out)?;
    } else {
        report::render_text(&summary, &mut out)?;
    }
    out.flush()?;
    Ok(())
}
