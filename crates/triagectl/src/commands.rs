//! triagectl command implementations.

use crate::output;
use anyhow::{bail, Context, Result};
use serde::Serialize;
use std::fs::File;
use std::io::{self, BufRead, BufReader, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, info, warn};
use triage_engine::{ClassificationInput, RuleTable, TriageConfig, TriageEngine, TriageError};

/// Output format for the rules listing
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum RulesFormat {
    Human,
    Json,
    Toml,
}

/// Load config and build the engine with the active rule table
pub fn build_engine(config: &TriageConfig, rules_override: Option<&Path>) -> Result<TriageEngine> {
    let table: Arc<RuleTable> = match rules_override {
        Some(path) => RuleTable::load(path)
            .with_context(|| format!("Failed to load rule table {}", path.display()))?
            .into(),
        None => config.rule_table().context("Failed to load configured rule table")?,
    };
    debug!("Active rule table has {} rules", table.len());
    Ok(TriageEngine::new(table))
}

pub fn load_config(path: Option<&Path>) -> Result<TriageConfig> {
    let config = match path {
        Some(path) => TriageConfig::load_from(path)
            .with_context(|| format!("Failed to read config {}", path.display()))?,
        None => TriageConfig::load().context("Failed to read config")?,
    };
    Ok(config)
}

pub struct ClassifyArgs {
    pub description: String,
    pub images: Vec<String>,
    pub location: Option<String>,
    pub trusted: bool,
    pub explain: bool,
    pub json: bool,
}

impl ClassifyArgs {
    fn to_input(&self) -> ClassificationInput {
        let mut input = ClassificationInput::new(self.description.as_str())
            .with_images(self.images.iter().cloned());
        if let Some(location) = &self.location {
            input = input.with_location(location.as_str());
        }
        if self.trusted {
            input = input.trusted();
        }
        input
    }
}

pub fn classify(engine: &TriageEngine, args: &ClassifyArgs, out: &mut impl Write) -> Result<()> {
    let input = args.to_input();
    input.validate()?;

    let explanation = engine.explain(&input);
    info!(
        "Classified as {}/{} priority={} agent={}",
        explanation.result.category,
        explanation.result.subcategory,
        explanation.result.priority,
        explanation.result.agent
    );

    if args.json {
        let json = if args.explain {
            serde_json::to_string_pretty(&explanation)?
        } else {
            serde_json::to_string_pretty(&explanation.result)?
        };
        writeln!(out, "{}", json)?;
        return Ok(());
    }

    let color = output::use_color();
    writeln!(out, "{}", output::render_result(&explanation.result, color))?;
    if args.explain {
        writeln!(out)?;
        writeln!(out, "{}", output::render_trace(&explanation.trace, color))?;
    }
    Ok(())
}

/// Per-line failure record in batch output
#[derive(Debug, Serialize)]
struct BatchError {
    line: usize,
    error: ErrorDetails,
}

#[derive(Debug, Serialize)]
struct ErrorDetails {
    code: String,
    message: String,
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct BatchSummary {
    pub classified: usize,
    /// Parsed but failed input validation
    pub rejected: usize,
    /// Not a readable complaint record
    pub malformed: usize,
}

impl BatchSummary {
    pub fn failed(&self) -> usize {
        self.rejected + self.malformed
    }
}

fn parse_line(line: &str) -> std::result::Result<ClassificationInput, TriageError> {
    let input: ClassificationInput = serde_json::from_str(line)?;
    input.validate()?;
    Ok(input)
}

/// JSON Lines in, JSON Lines out. Bad lines become error records.
pub fn batch(
    engine: &TriageEngine,
    reader: impl BufRead,
    out: &mut impl Write,
    explain: bool,
) -> Result<BatchSummary> {
    let mut summary = BatchSummary::default();

    for (idx, line) in reader.lines().enumerate() {
        let line_num = idx + 1;
        let line = line.with_context(|| format!("Failed to read input line {}", line_num))?;
        if line.trim().is_empty() {
            continue;
        }

        match parse_line(&line) {
            Ok(input) => {
                let json = if explain {
                    serde_json::to_string(&engine.explain(&input))?
                } else {
                    serde_json::to_string(&engine.classify(&input))?
                };
                writeln!(out, "{}", json)?;
                summary.classified += 1;
            }
            Err(err) => {
                if err.is_validation() {
                    warn!("Batch line {} rejected: {}", line_num, err);
                    summary.rejected += 1;
                } else {
                    warn!("Batch line {} malformed: {}", line_num, err);
                    summary.malformed += 1;
                }
                let record = BatchError {
                    line: line_num,
                    error: ErrorDetails {
                        code: err.code().to_string(),
                        message: err.to_string(),
                    },
                };
                writeln!(out, "{}", serde_json::to_string(&record)?)?;
            }
        }
    }

    info!(
        "Batch complete: {} classified, {} rejected, {} malformed",
        summary.classified, summary.rejected, summary.malformed
    );
    Ok(summary)
}

/// Open batch input: a file path, or stdin for "-"/absent
pub fn open_input(path: Option<&PathBuf>) -> Result<Box<dyn BufRead>> {
    match path {
        Some(p) if p.as_os_str() != "-" => {
            let file = File::open(p).with_context(|| format!("Failed to open {}", p.display()))?;
            Ok(Box::new(BufReader::new(file)))
        }
        _ => Ok(Box::new(BufReader::new(io::stdin()))),
    }
}

pub fn rules(engine: &TriageEngine, format: RulesFormat, out: &mut impl Write) -> Result<()> {
    let table = engine.rules();
    match format {
        RulesFormat::Human => {
            writeln!(out, "{}", output::render_rules(table, output::use_color()))?
        }
        RulesFormat::Json => writeln!(out, "{}", serde_json::to_string_pretty(table)?)?,
        RulesFormat::Toml => write!(out, "{}", table.to_toml_string()?)?,
    }
    Ok(())
}

/// Fail early with a readable message instead of a validation error code
pub fn require_description(description: &str) -> Result<()> {
    if description.trim().is_empty() {
        bail!("A complaint description is required");
    }
    Ok(())
}
