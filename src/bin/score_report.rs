use std::fs;
use std::path::{Path, PathBuf};

use clap::{Parser, ValueEnum};
use indicatif::{ProgressBar, ProgressStyle};

use detscore::inputs::{load_class_map, load_event_lists, load_grouping};
use detscore::{
    accumulate, build_report, format_score_line, AccumulationMode, ScoringConfig, ScoringEngine,
    ScoringEngineBuilder, ScoringMode,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum ModeChoice {
    /// Detection error (threshold-gated event counts).
    Der,
    /// Identification error (detection with threshold 0).
    Ier,
    /// Segmentation error (duration-weighted seconds).
    Ser,
    /// Run all three protocols.
    All,
}

impl ModeChoice {
    fn modes(self) -> Vec<ScoringMode> {
        match self {
            Self::Der => vec![ScoringMode::Detection],
            Self::Ier => vec![ScoringMode::Identification],
            Self::Ser => vec![ScoringMode::Segmentation],
            Self::All => vec![
                ScoringMode::Segmentation,
                ScoringMode::Identification,
                ScoringMode::Detection,
            ],
        }
    }
}

#[derive(Debug, Parser)]
#[command(name = "score_report")]
#[command(about = "Score detector output against reference annotations")]
struct Args {
    /// Reference event lists, JSON {recording_id: [events]}.
    #[arg(long = "ref", env = "DETSCORE_REF")]
    ref_path: PathBuf,
    /// Hypothesis event lists, JSON {recording_id: [events]}.
    #[arg(long = "hyp", env = "DETSCORE_HYP")]
    hyp_path: PathBuf,
    /// Label-to-class map, JSON {label: class_id}.
    #[arg(long, env = "DETSCORE_EVENTS")]
    events: PathBuf,
    /// Subject grouping, JSON {subject_id: [recording_ids]}; enables per-subject files.
    #[arg(long, env = "DETSCORE_SUB2REC")]
    sub2rec: Option<PathBuf>,
    #[arg(long, env = "DETSCORE_MODE", value_enum, default_value_t = ModeChoice::All)]
    mode: ModeChoice,
    #[arg(long, env = "DETSCORE_THRESHOLD", default_value_t = ScoringConfig::DEFAULT_THRESHOLD)]
    threshold: f64,
    /// Score null/background events instead of filtering them out.
    #[arg(long, default_value_t = false)]
    keep_null: bool,
    #[arg(long, env = "DETSCORE_OUT_DIR", default_value = "scoring")]
    out_dir: PathBuf,
}

fn main() {
    if run().is_err() {
        std::process::exit(1);
    }
}

fn run() -> Result<(), String> {
    let args = Args::parse();

    let refs = load_event_lists(&args.ref_path)
        .map_err(|err| fail(format!("failed to load reference '{}': {err}", args.ref_path.display())))?;
    let hyps = load_event_lists(&args.hyp_path)
        .map_err(|err| fail(format!("failed to load hypothesis '{}': {err}", args.hyp_path.display())))?;
    let classes = load_class_map(&args.events)
        .map_err(|err| fail(format!("failed to load class map '{}': {err}", args.events.display())))?;
    let grouping = match &args.sub2rec {
        Some(path) => Some(
            load_grouping(path)
                .map_err(|err| fail(format!("failed to load grouping '{}': {err}", path.display())))?,
        ),
        None => None,
    };

    let config = ScoringConfig {
        threshold: args.threshold,
        filter_null: !args.keep_null,
    };
    let engine = ScoringEngineBuilder::new(classes, config)
        .build()
        .map_err(|err| fail(format!("failed to build scoring engine: {err}")))?;

    fs::create_dir_all(&args.out_dir)
        .map_err(|err| fail(format!("failed to create '{}': {err}", args.out_dir.display())))?;

    let modes = args.mode.modes();
    let progress = ProgressBar::new(modes.len() as u64);
    progress.set_style(
        ProgressStyle::with_template("[{elapsed_precise}] [{wide_bar:.cyan/blue}] {pos}/{len} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("=>-"),
    );

    for mode in modes {
        progress.set_message(mode.as_str().to_string());
        score_one_mode(&engine, mode, &refs, &hyps, grouping.as_ref(), &args.out_dir)
            .map_err(|err| fail(format!("{} scoring failed: {err}", mode.as_str())))?;
        progress.inc(1);
    }
    progress.finish_and_clear();

    println!("Wrote scoring results to {}", args.out_dir.display());
    Ok(())
}

fn score_one_mode(
    engine: &ScoringEngine,
    mode: ScoringMode,
    refs: &detscore::EventListMap,
    hyps: &detscore::EventListMap,
    grouping: Option<&detscore::GroupingMap>,
    out_dir: &Path,
) -> Result<(), String> {
    let per_rec = engine
        .score_corpus(mode, refs, hyps)
        .map_err(|err| err.to_string())?;

    let total = accumulate(&per_rec, AccumulationMode::Total, None).map_err(|err| err.to_string())?;
    let per_group = match grouping {
        Some(grouping) => Some(
            accumulate(&per_rec, AccumulationMode::PerGroup, Some(grouping))
                .map_err(|err| err.to_string())?,
        ),
        None => None,
    };
    let total_score = total
        .values()
        .next()
        .copied()
        .ok_or_else(|| "empty total accumulation".to_string())?;

    // Identification always runs with threshold 0; the report records the
    // threshold that was actually applied.
    let threshold = match mode {
        ScoringMode::Identification => 0.0,
        _ => engine.config().threshold,
    };
    let report = build_report(mode, threshold, &per_rec, per_group.as_ref(), total_score);

    let name = mode.as_str();
    write_lines(&out_dir.join(format!("{name}_per_rec")), &report.per_recording)?;
    if let Some(per_group) = &report.per_group {
        write_lines(&out_dir.join(format!("{name}_per_sub")), per_group)?;
    }
    let total_entry = std::iter::once(("total".to_string(), report.total.clone())).collect();
    write_lines(&out_dir.join(format!("{name}_total")), &total_entry)?;

    let json = serde_json::to_string_pretty(&report)
        .map_err(|err| format!("failed to serialize report: {err}"))?;
    let json_path = out_dir.join(format!("{name}_report.json"));
    fs::write(&json_path, json).map_err(|err| format!("failed to write '{}': {err}", json_path.display()))
}

fn write_lines(
    path: &Path,
    entries: &std::collections::BTreeMap<String, detscore::report::ReportEntry>,
) -> Result<(), String> {
    let mut out = String::new();
    for (id, entry) in entries {
        out.push_str(&format_score_line(id, entry));
        out.push('\n');
    }
    fs::write(path, out).map_err(|err| format!("failed to write '{}': {err}", path.display()))
}

fn fail(message: String) -> String {
    eprintln!("{message}");
    message
}
