mod config;
mod flags;

use std::fs::File;
use std::io::{self, BufRead, BufReader, BufWriter, Write};

use anyhow::{Context, Result, bail};
use datasift_activity::convert;
use datasift_activity::datasift::Datasift;
use serde_json::json;
use tracing::{Level, info, warn};

use crate::config::{Config, LogConfig, OutputConfig};

fn main() -> Result<()> {
    let flags = flags::DatasiftActivity::from_env_or_exit();
    let config = match &flags.config {
        Some(path) => Config::load(path)?,
        None => Config::default(),
    }
    .with_flags(&flags);
    init_tracing(&config.log)?;

    let input: Box<dyn BufRead> = match &flags.input {
        Some(path) => Box::new(BufReader::new(
            File::open(path).with_context(|| format!("unable to open {}", path.display()))?,
        )),
        None => Box::new(BufReader::new(io::stdin())),
    };
    let mut output = BufWriter::new(io::stdout().lock());
    let mut diagnostics = io::stderr().lock();

    let summary = run(input, &mut output, &mut diagnostics, &config.output)?;
    output.flush()?;
    info!(
        target: "cli",
        converted = summary.converted,
        skipped = summary.skipped,
        issues = summary.issues,
        "finished"
    );
    Ok(())
}

fn init_tracing(log: &LogConfig) -> Result<()> {
    let level: Level = log
        .level
        .parse()
        .with_context(|| format!("invalid log level {:?}", log.level))?;
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(io::stderr)
        .init();
    Ok(())
}

#[derive(Debug, Default, PartialEq, Eq)]
struct Summary {
    converted: usize,
    skipped: usize,
    issues: usize,
}

/// Convert every non-blank input line, writing one activity per line.
fn run(
    input: impl BufRead,
    output: &mut impl Write,
    diagnostics: &mut impl Write,
    config: &OutputConfig,
) -> Result<Summary> {
    let mut summary = Summary::default();

    for (index, line) in input.lines().enumerate() {
        let line_no = index + 1;
        let line = line.with_context(|| format!("unable to read line {line_no}"))?;
        if line.trim().is_empty() {
            continue;
        }

        let conversion = serde_json::from_str::<Datasift>(&line)
            .map_err(anyhow::Error::from)
            .and_then(|event| convert(&event).map_err(anyhow::Error::from));
        let conversion = match conversion {
            Ok(conversion) => conversion,
            Err(error) if config.skip_invalid => {
                warn!(target: "cli", line = line_no, "skipping record: {error:#}");
                summary.skipped += 1;
                continue;
            }
            Err(error) => bail!("line {line_no}: {error:#}"),
        };

        if config.pretty {
            serde_json::to_writer_pretty(&mut *output, &conversion.activity)?;
        } else {
            serde_json::to_writer(&mut *output, &conversion.activity)?;
        }
        writeln!(output)?;

        if config.report_issues && !conversion.issues.is_empty() {
            let report = json!({
                "line": line_no,
                "id": conversion.activity.id,
                "issues": conversion.issues,
            });
            writeln!(diagnostics, "{report}")?;
        }
        summary.converted += 1;
        summary.issues += conversion.issues.len();
    }

    Ok(summary)
}
