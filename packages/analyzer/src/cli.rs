//! Command-line interface for the contract risk analyzer.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use clap::{Parser, Subcommand, ValueEnum};
use console::{style, StyledObject};
use contract_risk_segmentation::{segment_document, SegmentOptions, DEFAULT_MIN_CHARS};
use indicatif::{ProgressBar, ProgressStyle};

use crate::classifier::{
    load_model, load_or_train_model, save_model, ClassifierKind, ClauseClassifier,
};
use crate::config::{resolve_training_csv, ProjectConfig, DEFAULT_TEST_SIZE, TEXT_WRAP_WIDTH};
use crate::dataset::{into_columns, load_training_dataset};
use crate::error::{AnalyzerError, Result};
use crate::evaluation::{compare_baseline_models, evaluate_classifier, train_test_split};
use crate::ingestion::extract_text_from_path;
use crate::review::{analyze_text, highlighted, to_csv, to_json, ClauseRisk, ReviewFilter};
use crate::risk::Severity;

/// Contract Risk Analyzer - Segment contracts and flag risky clauses.
#[derive(Parser)]
#[command(name = "contract-risk")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

/// Export format for `analyze`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Table,
    Csv,
    Json,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Train the logistic regression clause classifier.
    Train {
        /// Training CSV (default: bundled dataset)
        #[arg(long)]
        csv: Option<PathBuf>,

        /// Where to save the model (default: models/model.json)
        #[arg(long)]
        model_out: Option<PathBuf>,
    },

    /// Evaluate the trained model and compare baseline classifiers.
    Eval {
        /// Evaluation CSV (default: bundled dataset)
        #[arg(long)]
        csv: Option<PathBuf>,

        /// Trained model file (default: models/model.json)
        #[arg(long)]
        model_path: Option<PathBuf>,

        /// Report output directory (default: reports/)
        #[arg(long)]
        reports_dir: Option<PathBuf>,

        /// Fraction of examples held out for testing
        #[arg(long, default_value_t = DEFAULT_TEST_SIZE)]
        test_size: f64,
    },

    /// Split a contract into clauses and print them.
    Segment {
        /// Contract file (.txt or .pdf)
        file: PathBuf,

        /// Minimum clause length in characters
        #[arg(long, default_value_t = DEFAULT_MIN_CHARS)]
        min_chars: usize,
    },

    /// Classify every clause of a contract and report its risk.
    Analyze {
        /// Contract file (.txt or .pdf)
        file: PathBuf,

        /// Trained model file; trained on first use if missing
        #[arg(long)]
        model_path: Option<PathBuf>,

        /// Minimum clause length in characters
        #[arg(long, default_value_t = DEFAULT_MIN_CHARS)]
        min_chars: usize,

        /// Only show clauses of this severity (repeatable)
        #[arg(long = "severity")]
        severities: Vec<Severity>,

        /// Only show clauses of this predicted type (repeatable)
        #[arg(long = "clause-type")]
        clause_types: Vec<String>,

        /// Output format
        #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
        format: OutputFormat,

        /// Write the CSV or JSON export to this file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

/// Run the CLI.
pub fn run() -> Result<()> {
    let cli = Cli::parse();
    let config = ProjectConfig::from_env();

    match cli.command {
        Commands::Train { csv, model_out } => {
            train_command(&config, csv.as_deref(), model_out.as_deref())
        }
        Commands::Eval {
            csv,
            model_path,
            reports_dir,
            test_size,
        } => eval_command(
            &config,
            csv.as_deref(),
            model_path.as_deref(),
            reports_dir.as_deref(),
            test_size,
        ),
        Commands::Segment { file, min_chars } => segment_command(&file, min_chars),
        Commands::Analyze {
            file,
            model_path,
            min_chars,
            severities,
            clause_types,
            format,
            output,
        } => {
            let filter = ReviewFilter {
                severities: severities.into_iter().collect(),
                clause_types: clause_types.into_iter().collect(),
            };
            analyze_command(
                &config,
                &file,
                model_path.as_deref(),
                min_chars,
                &filter,
                format,
                output.as_deref(),
            )
        }
    }
}

/// Run `task` behind a spinner that is cleared whether it succeeds or not.
fn with_spinner<T>(message: &str, task: impl FnOnce() -> Result<T>) -> Result<T> {
    let pb = ProgressBar::new_spinner();
    #[allow(clippy::expect_used)] // Static template string that is guaranteed to be valid
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg}")
            .expect("valid template"),
    );
    pb.set_message(message.to_string());
    pb.enable_steady_tick(Duration::from_millis(100));

    let result = task();
    pb.finish_and_clear();
    result
}

/// Read a contract and reject documents without any text.
fn read_document(file: &Path) -> Result<String> {
    let text = extract_text_from_path(file)?;
    if text.trim().is_empty() {
        return Err(AnalyzerError::EmptyDocument(
            "No text could be extracted from the document.".to_string(),
        ));
    }
    Ok(text)
}

/// Execute the train command.
fn train_command(
    config: &ProjectConfig,
    csv: Option<&Path>,
    model_out: Option<&Path>,
) -> Result<()> {
    let csv_path = resolve_training_csv(csv, config);
    let (texts, labels) = into_columns(load_training_dataset(&csv_path)?);

    println!(
        "{} on {} rows from {}",
        style("Training").bold(),
        style(texts.len()).cyan(),
        style(csv_path.display()).green()
    );

    let model = with_spinner("Training model...", || {
        ClauseClassifier::train(ClassifierKind::LogisticRegression, &texts, &labels)
    })?;
    let destination = save_model(&model, model_out.unwrap_or(&config.model_path))?;

    println!(
        "{} {}",
        style("Saved to:").green().bold(),
        destination.display()
    );
    Ok(())
}

/// Execute the eval command.
fn eval_command(
    config: &ProjectConfig,
    csv: Option<&Path>,
    model_path: Option<&Path>,
    reports_dir: Option<&Path>,
    test_size: f64,
) -> Result<()> {
    let csv_path = resolve_training_csv(csv, config);
    let (texts, labels) = into_columns(load_training_dataset(&csv_path)?);
    let split = train_test_split(&texts, &labels, test_size)?;
    let model = load_model(model_path.unwrap_or(&config.model_path))?;
    let reports_dir = reports_dir.unwrap_or(&config.reports_dir);

    let metrics = evaluate_classifier(
        &model,
        &split.test_texts,
        &split.test_labels,
        reports_dir,
        "logreg",
    )?;
    let comparison = with_spinner("Comparing baseline models...", || {
        compare_baseline_models(&split, reports_dir)
    })?;

    println!("{}", style("Evaluation complete.").green().bold());
    println!("  Weighted precision: {:.4}", metrics.precision_weighted);
    println!("  Weighted recall: {:.4}", metrics.recall_weighted);
    println!("  Weighted F1: {:.4}", metrics.f1_weighted);
    println!();
    println!("{}", style("Model comparison:").bold());
    println!(
        "  {:<22} {:>9} {:>9} {:>9}",
        "model", "precision", "recall", "f1"
    );
    for row in &comparison {
        println!(
            "  {:<22} {:>9.4} {:>9.4} {:>9.4}",
            row.model.to_string(),
            row.precision_weighted,
            row.recall_weighted,
            row.f1_weighted
        );
    }
    println!();
    println!(
        "{} {}",
        style("Reports in:").green().bold(),
        reports_dir.display()
    );
    Ok(())
}

/// Execute the segment command.
fn segment_command(file: &Path, min_chars: usize) -> Result<()> {
    let text = read_document(file)?;
    let segmentation = segment_document(&text, &SegmentOptions::new().with_min_chars(min_chars));

    println!(
        "{} {} clauses ({} clause starts, {} path)",
        style("Found").bold(),
        style(segmentation.clauses.len()).cyan(),
        segmentation.clause_starts,
        segmentation.path.as_str()
    );
    println!();

    for (index, clause) in segmentation.clauses.iter().enumerate() {
        println!("{}", style(format!("[{}]", index + 1)).dim());
        print_wrapped(clause);
    }
    Ok(())
}

/// Execute the analyze command.
fn analyze_command(
    config: &ProjectConfig,
    file: &Path,
    model_path: Option<&Path>,
    min_chars: usize,
    filter: &ReviewFilter,
    format: OutputFormat,
    output: Option<&Path>,
) -> Result<()> {
    let text = read_document(file)?;
    let model = with_spinner("Loading model...", || {
        load_or_train_model(config, model_path)
    })?;

    let rows = analyze_text(&text, &model, &SegmentOptions::new().with_min_chars(min_chars));
    if rows.is_empty() {
        return Err(AnalyzerError::EmptyDocument(
            "Could not segment clauses from the document.".to_string(),
        ));
    }
    let rows = filter.apply(&rows);

    let export = match format {
        OutputFormat::Table => {
            print_table(&rows);
            return Ok(());
        }
        OutputFormat::Csv => to_csv(&rows)?,
        OutputFormat::Json => to_json(&rows)?,
    };

    match output {
        Some(path) => {
            fs::write(path, export)?;
            println!("{} {}", style("Saved to:").green().bold(), path.display());
        }
        None => print!("{export}"),
    }
    Ok(())
}

fn severity_style(severity: Severity) -> StyledObject<String> {
    let styled = style(severity.to_string()).bold();
    match severity {
        Severity::High => styled.red(),
        Severity::Medium => styled.yellow(),
        Severity::Low => styled.green(),
    }
}

fn print_wrapped(text: &str) {
    let options = textwrap::Options::new(TEXT_WRAP_WIDTH)
        .initial_indent("    ")
        .subsequent_indent("    ");
    println!("{}", textwrap::fill(text, options));
}

fn print_row(row: &ClauseRisk) {
    println!(
        "{}  {}  {}  {}",
        style(&row.clause_id).cyan(),
        style(&row.predicted_type).bold(),
        severity_style(row.severity),
        style(format!("risk {}", row.risk_score)).dim()
    );
    print_wrapped(&row.clause_text);
}

fn print_table(rows: &[ClauseRisk]) {
    println!("{}", style("Clause Risk Table").bold().underlined());
    if rows.is_empty() {
        println!("  No clauses match the selected filters.");
    }
    for row in rows {
        print_row(row);
    }

    println!();
    println!("{}", style("Highlighted Clauses").bold().underlined());
    let risky = highlighted(rows);
    if risky.is_empty() {
        println!(
            "  {}",
            style("No medium/high risk clauses in the selected filters.").green()
        );
    }
    for row in risky {
        print_row(row);
    }
}
