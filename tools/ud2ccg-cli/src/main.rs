use std::fs;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{bail, Context, Result};
use clap::Parser;
use rayon::prelude::*;
use serde::Serialize;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;
use ud2ccg_category::IdentityAllocator;
use ud2ccg_converter::{export, ConversionOptions, ConversionStats, Converter, ObliquenessTable, DEFAULT_MAX_HEIGHT};
use ud2ccg_reader::{read_conllu, read_conllup, ArgumentIndex};

mod discover;

use discover::{discover, Job};

#[derive(Parser)]
#[command(name = "ud2ccg", version, about = "Converts Universal Dependencies treebanks into CCG derivations")]
struct Cli {
    /// A single .conllu file.
    #[arg(long, value_name = "FILE", conflicts_with = "ud_path", required_unless_present = "ud_path")]
    conllu_path: Option<PathBuf>,

    /// A directory holding UD_<Language>-<Treebank> directories.
    #[arg(long, value_name = "DIR")]
    ud_path: Option<PathBuf>,

    /// Semantic-role layer (.conllup) of --conllu-path.
    #[arg(long, value_name = "FILE", requires = "conllu_path")]
    up_conllup_path: Option<PathBuf>,

    /// A directory holding UP_<Language>-<Treebank> directories.
    #[arg(long, value_name = "DIR", requires = "ud_path")]
    up_path: Option<PathBuf>,

    /// Where .auto and .lexicon files are written.
    #[arg(long, value_name = "DIR")]
    export_path: PathBuf,

    /// Convert non-projective trees too.
    #[arg(long)]
    convert_crossing_dependencies: bool,

    /// Only export trees whose every category is fully resolved.
    #[arg(long)]
    complete_output_only: bool,

    /// JSON obliqueness table replacing the built-in one.
    #[arg(long, value_name = "FILE")]
    obliqueness: Option<PathBuf>,

    /// Seed of the coordination tags.
    #[arg(long, default_value_t = 0)]
    seed: u64,

    #[arg(long, default_value_t = DEFAULT_MAX_HEIGHT)]
    max_height: usize,

    /// Write per-file statistics as JSON.
    #[arg(long, value_name = "FILE")]
    report: Option<PathBuf>,

    /// Log per-sentence skips.
    #[arg(long)]
    debug: bool,
}

#[derive(Debug, Serialize)]
struct FileReport {
    input: PathBuf,
    derivations: PathBuf,
    /// Sentences the reader could not parse.
    rejected: usize,
    stats: ConversionStats,
}

fn convert_file(job: &Job, converter: &Converter) -> Result<FileReport> {
    info!(input = %job.conllu.display(), "converting");
    let treebank = read_conllu(&job.conllu).with_context(|| format!("reading {}", job.conllu.display()))?;
    let arguments = match &job.conllup {
        Some(path) => read_conllup(path, &treebank.remaps).with_context(|| format!("reading {}", path.display()))?,
        None => ArgumentIndex::new(),
    };

    let conversion = converter.convert(&treebank.sentences, &arguments);
    let stem = job
        .conllu
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_else(|| "converted".to_string());
    let paths = export(&conversion, &job.export_dir, &stem)?;

    Ok(FileReport {
        input: job.conllu.clone(),
        derivations: paths.derivations,
        rejected: treebank.rejected.len(),
        stats: conversion.stats,
    })
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let fallback = if cli.debug { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback)))
        .init();

    let table = match &cli.obliqueness {
        Some(path) => ObliquenessTable::load(path).with_context(|| format!("loading {}", path.display()))?,
        None => ObliquenessTable::default(),
    };
    let options = ConversionOptions {
        convert_crossing: cli.convert_crossing_dependencies,
        complete_only: cli.complete_output_only,
        max_height: cli.max_height,
        seed: cli.seed,
    };
    info!(
        export = %cli.export_path.display(),
        convert_crossing = options.convert_crossing,
        complete_only = options.complete_only,
        "options"
    );

    let jobs = match (&cli.conllu_path, &cli.ud_path) {
        (Some(conllu), None) => vec![Job {
            conllu: conllu.clone(),
            conllup: cli.up_conllup_path.clone(),
            export_dir: cli.export_path.clone(),
        }],
        (None, Some(ud_path)) => discover(ud_path, cli.up_path.as_deref(), &cli.export_path)?,
        _ => bail!("pass exactly one of --conllu-path and --ud-path"),
    };
    if jobs.is_empty() {
        bail!("no .conllu files found");
    }

    // One numbering for the whole run
    let converter = Converter::new(table, options).with_allocator(Arc::new(IdentityAllocator::new()));
    let results: Vec<(&Job, Result<FileReport>)> = jobs
        .par_iter()
        .map(|job| (job, convert_file(job, &converter)))
        .collect();

    let mut reports = Vec::with_capacity(results.len());
    let mut failed = 0;
    for (job, result) in results {
        match result {
            Ok(report) => reports.push(report),
            Err(err) => {
                warn!(input = %job.conllu.display(), "conversion failed: {err:#}");
                failed += 1;
            }
        }
    }
    info!(files = reports.len(), failed, "done");

    if let Some(path) = &cli.report {
        let json = serde_json::to_string_pretty(&reports)?;
        fs::write(path, json).with_context(|| format!("writing {}", path.display()))?;
    }
    if reports.is_empty() {
        bail!("no file could be converted");
    }
    Ok(())
}
