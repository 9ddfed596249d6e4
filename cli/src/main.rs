//! unstyle CLI - paragraph style and numbering report for Word documents
//!
//! Prints, for every heading and list item of a DOCX file, its level,
//! numbering identifiers and the label Word would render.

use clap::{Args, Parser, Subcommand};
use colored::*;
use indicatif::{ProgressBar, ProgressStyle};
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use unstyle::docx::StyleKind;
use unstyle::render::{JsonFormat, RenderOptions};
use unstyle::{EvaluatorOptions, StyleEvaluator};

/// Word paragraph style and numbering evaluator
#[derive(Parser)]
#[command(
    name = "unstyle",
    author = "iyulab",
    version,
    about = "Evaluate heading levels and list labels of Word documents",
    long_about = "unstyle - Effective paragraph style and numbering evaluation.\n\n\
                  Resolves style inheritance and numbering counters in DOCX files and \
                  reports headings, list items and their rendered labels."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the heading and list report
    Report {
        /// Input file path
        input: PathBuf,

        /// Output file path (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Include plain paragraphs
        #[arg(short, long)]
        all: bool,

        /// Show each paragraph's style id
        #[arg(long)]
        show_style: bool,

        #[command(flatten)]
        eval: EvalArgs,
    },

    /// Write evaluated paragraphs as JSON
    Json {
        /// Input file path
        input: PathBuf,

        /// Output file path (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Output compact JSON (no indentation)
        #[arg(long)]
        compact: bool,

        #[command(flatten)]
        eval: EvalArgs,
    },

    /// List paragraph styles with their resolved outline level and numbering
    Styles {
        /// Input file path
        input: PathBuf,
    },

    /// Show version information
    Version,
}

/// Evaluation switches shared by the report commands
#[derive(Args, Clone, Copy)]
struct EvalArgs {
    /// Do not apply the default paragraph style to unstyled paragraphs
    #[arg(long)]
    no_default_style: bool,

    /// Render levels flagged as legal numbering in their own formats
    #[arg(long)]
    no_legal: bool,

    /// Keep Symbol-font bullet characters as they are stored
    #[arg(long)]
    raw_bullets: bool,

    /// NFC-normalize paragraph text
    #[arg(long)]
    nfc: bool,
}

impl From<EvalArgs> for EvaluatorOptions {
    fn from(args: EvalArgs) -> Self {
        EvaluatorOptions::new()
            .with_default_paragraph_style(!args.no_default_style)
            .with_legal_numbering(!args.no_legal)
            .with_symbol_bullets(!args.raw_bullets)
            .with_normalized_text(args.nfc)
    }
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("{}: {}", "Error".red().bold(), e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command {
        Commands::Report {
            input,
            output,
            all,
            show_style,
            eval,
        } => {
            let pb = create_spinner("Reading document...");

            let evaluator = open(&pb, &input, eval.into())?;
            pb.set_message("Evaluating paragraphs...");
            let paragraphs = evaluator.evaluate();

            let options = RenderOptions::new()
                .with_plain(all)
                .with_style(show_style);
            let report = unstyle::render::to_text(&paragraphs, &options);

            pb.finish_and_clear();
            write_output(output.as_deref(), report.trim_end())?;

            if let Some(path) = output {
                println!("{} Report written: {}", "✓".green().bold(), path.display());
            }
        }

        Commands::Json {
            input,
            output,
            compact,
            eval,
        } => {
            let pb = create_spinner("Reading document...");

            let evaluator = open(&pb, &input, eval.into())?;
            pb.set_message("Evaluating paragraphs...");
            let paragraphs = evaluator.evaluate();

            let format = if compact {
                JsonFormat::Compact
            } else {
                JsonFormat::Pretty
            };
            let json = unstyle::render::to_json(&paragraphs, format)?;

            pb.finish_and_clear();
            write_output(output.as_deref(), &json)?;

            if let Some(path) = output {
                println!("{} JSON written: {}", "✓".green().bold(), path.display());
            }
        }

        Commands::Styles { input } => {
            let pb = create_spinner("Reading styles...");
            let evaluator = open(&pb, &input, EvaluatorOptions::default())?;
            pb.finish_and_clear();
            print_styles(&evaluator);
        }

        Commands::Version => {
            print_version();
        }
    }

    Ok(())
}

/// Load a document; the spinner is cleared when loading fails.
fn open(
    pb: &ProgressBar,
    input: &Path,
    options: EvaluatorOptions,
) -> unstyle::Result<StyleEvaluator> {
    log::debug!("Opening {}", input.display());
    StyleEvaluator::open_with_options(input, options).inspect_err(|_| pb.finish_and_clear())
}

fn print_styles(evaluator: &StyleEvaluator) {
    let catalog = evaluator.styles();
    let mut ids: Vec<&String> = catalog
        .styles
        .iter()
        .filter(|(_, style)| style.kind == StyleKind::Paragraph)
        .map(|(id, _)| id)
        .collect();
    ids.sort();

    println!("{}", "Paragraph Styles".cyan().bold());
    println!("{}", "─".repeat(40));

    for id in ids {
        let marker = if catalog.default_paragraph.as_ref() == Some(id) {
            " (default)"
        } else {
            ""
        };
        match catalog.resolve_style(id) {
            Ok(props) => {
                let outline = props
                    .outline_level
                    .map_or_else(|| "-".to_string(), |l| l.to_string());
                let numbering = match props.numbering.num_id {
                    Some(num_id) => format!(
                        "{}/{}",
                        num_id,
                        props
                            .numbering
                            .ilvl
                            .map_or_else(|| "-".to_string(), |l| l.to_string())
                    ),
                    None => "-".to_string(),
                };
                println!(
                    "{}{}: outline {}, numbering {}",
                    id.bold(),
                    marker,
                    outline,
                    numbering
                );
            }
            Err(e) => {
                println!("{}{}: {}", id.bold(), marker, e.to_string().yellow());
            }
        }
    }

    println!("\n{}", "Numbering".cyan().bold());
    println!("{}", "─".repeat(40));
    println!(
        "{}: {}",
        "Abstract definitions".bold(),
        evaluator.numbering().abstracts.len()
    );
    println!(
        "{}: {}",
        "Instances".bold(),
        evaluator.numbering().instances.len()
    );
    println!("{}: {}", "Paragraphs".bold(), evaluator.paragraphs().len());
}

fn print_version() {
    println!("{} {}", "unstyle".green().bold(), env!("CARGO_PKG_VERSION"));
    println!("Paragraph style and numbering evaluation for Word documents");
    println!();
    println!("Supported formats: DOCX");
    println!("Repository: https://github.com/iyulab/unstyle");
}

fn create_spinner(message: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    let style = ProgressStyle::default_spinner()
        .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"])
        .template("{spinner:.blue} {msg}")
        .unwrap_or_else(|_| ProgressStyle::default_spinner());
    pb.set_style(style);
    pb.set_message(message.to_string());
    pb.enable_steady_tick(std::time::Duration::from_millis(100));
    pb
}

fn write_output(path: Option<&Path>, content: &str) -> Result<(), Box<dyn std::error::Error>> {
    match path {
        Some(p) => {
            fs::write(p, content)?;
        }
        None => {
            let stdout = io::stdout();
            let mut handle = stdout.lock();
            writeln!(handle, "{}", content)?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parse() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn test_eval_args_map_to_options() {
        let cli = Cli::parse_from(["unstyle", "report", "a.docx", "--all", "--no-legal"]);
        match cli.command {
            Commands::Report { all, eval, .. } => {
                assert!(all);
                let options: EvaluatorOptions = eval.into();
                assert!(!options.honor_legal_numbering);
                assert!(options.use_default_paragraph_style);
                assert!(options.normalize_symbol_bullets);
            }
            _ => panic!("expected report command"),
        }
    }

    #[test]
    fn test_failed_open_clears_spinner() {
        let pb = ProgressBar::hidden();
        let input = Path::new("no-such-dir/missing.docx");

        let result = open(&pb, input, EvaluatorOptions::default());
        assert!(result.is_err());
        assert!(pb.is_finished());
    }
}
