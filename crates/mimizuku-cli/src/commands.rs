//! CLI command definitions and handlers

use anyhow::{anyhow, Context as _, Result};
use clap::{Parser, Subcommand, ValueEnum};
use mimizuku_ontology::{normalize, parse_obo, parse_owl, InputFormat, OntologyDocument};
use mimizuku_reasoner::{saturate, ClassificationStats, ClassifiedHierarchy, Taxonomy};
use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::time::Instant;

/// Main CLI structure
#[derive(Parser)]
#[command(name = "mimizuku")]
#[command(about = "EL ontology classifier")]
#[command(version = env!("CARGO_PKG_VERSION"))]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

/// Available CLI commands
#[derive(Subcommand)]
pub enum Commands {
    /// Classify an ontology and emit the inferred hierarchy as JSON
    Classify {
        /// Path to the ontology file (.obo or .owl)
        #[arg(short, long)]
        input: PathBuf,

        /// Output file (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Input format
        #[arg(short, long, default_value = "auto")]
        format: FormatArg,

        /// Pretty-print the JSON output
        #[arg(short, long)]
        pretty: bool,
    },

    /// Show tool information
    Info,
}

/// Input format selection
#[derive(Clone, Copy, Debug, PartialEq, ValueEnum)]
pub enum FormatArg {
    /// Detect from the file extension
    Auto,
    Obo,
    Owl,
}

/// Execute a CLI command
pub fn execute(command: Commands) -> Result<()> {
    match command {
        Commands::Classify {
            input,
            output,
            format,
            pretty,
        } => classify(&input, output.as_deref(), format, pretty),
        Commands::Info => {
            println!("mimizuku {}", env!("CARGO_PKG_VERSION"));
            println!("EL ontology classifier (OBO / OWL RDF-XML input)");
            Ok(())
        }
    }
}

fn resolve_format(path: &Path, arg: FormatArg) -> Result<InputFormat> {
    match arg {
        FormatArg::Obo => Ok(InputFormat::Obo),
        FormatArg::Owl => Ok(InputFormat::Owl),
        FormatArg::Auto => InputFormat::detect(path).ok_or_else(|| {
            anyhow!(
                "cannot detect format for {}; pass --format obo or --format owl",
                path.display()
            )
        }),
    }
}

fn classify(input: &Path, output: Option<&Path>, format: FormatArg, pretty: bool) -> Result<()> {
    let format = resolve_format(input, format)?;

    let file = File::open(input).with_context(|| format!("opening {}", input.display()))?;
    let reader = BufReader::with_capacity(1 << 20, file);

    tracing::info!(input = %input.display(), ?format, "parsing ontology");
    let parse_start = Instant::now();
    let doc: OntologyDocument = match format {
        InputFormat::Obo => parse_obo(reader),
        InputFormat::Owl => parse_owl(reader),
    }
    .with_context(|| format!("parsing {}", input.display()))?;
    let parse_time = parse_start.elapsed();
    tracing::info!(terms = doc.terms.len(), elapsed = ?parse_time, "parsed");

    let normalize_start = Instant::now();
    let (symbols, store) = normalize(&doc).context("normalizing axioms")?;
    let normalize_time = normalize_start.elapsed();
    tracing::info!(
        concepts = symbols.concept_count(),
        roles = symbols.role_count(),
        elapsed = ?normalize_time,
        "normalized"
    );

    let saturate_start = Instant::now();
    let contexts = saturate(&store, symbols.concept_count(), symbols.role_count());
    let saturate_time = saturate_start.elapsed();
    tracing::info!(elapsed = ?saturate_time, "saturated");

    let reduce_start = Instant::now();
    let taxonomy = Taxonomy::build(&contexts, &symbols);
    let reduce_time = reduce_start.elapsed();
    tracing::info!(elapsed = ?reduce_time, "reduced to direct hierarchy");

    let stats = ClassificationStats::new(
        &symbols,
        parse_time,
        normalize_time,
        saturate_time,
        reduce_time,
    );
    let hierarchy = ClassifiedHierarchy::new(&taxonomy, &contexts, &symbols, stats);
    tracing::info!(
        inferred = hierarchy.stats.inferred_subsumptions,
        total_ms = hierarchy.stats.total_time_ms,
        "classification complete"
    );

    match output {
        Some(path) => {
            let file =
                File::create(path).with_context(|| format!("creating {}", path.display()))?;
            let mut writer = BufWriter::new(file);
            hierarchy.write_json(&mut writer, pretty)?;
            writer.flush()?;
        }
        None => {
            let stdout = std::io::stdout();
            let mut writer = BufWriter::new(stdout.lock());
            hierarchy.write_json(&mut writer, pretty)?;
            writer.write_all(b"\n")?;
            writer.flush()?;
        }
    }

    Ok(())
}
