use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use std::process;

use clap::{Parser, Subcommand, ValueEnum};
use faqtext::{Block, Config, Highlighter, Mode, html};
use tracing::{debug, info};

#[derive(Parser)]
#[command(name = "faqtext")]
#[command(about = "Render plain-text FAQ answers and highlight search terms")]
struct Cli {
    /// Config file (TOML)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Increase log verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Render an answer file
    Render {
        /// Input text file
        input: PathBuf,

        #[arg(short, long, value_enum, default_value_t = Format::Html)]
        format: Format,

        /// Render every line verbatim, without lists or titles
        #[arg(long)]
        plain: bool,

        /// Output file (defaults to stdout, or the input name with .pdf for PDF)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Highlight a search term in a file or stdin
    Highlight {
        /// Search term
        term: String,

        /// Input text file (reads stdin when omitted)
        input: Option<PathBuf>,

        #[arg(short, long, value_enum, default_value_t = TextFormat::Html)]
        format: TextFormat,
    },
    /// Print the blocks an answer file parses into
    Inspect {
        /// Input text file
        input: PathBuf,

        /// Inspect the verbatim line split instead
        #[arg(long)]
        plain: bool,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum Format {
    Html,
    Typst,
    Pdf,
}

#[derive(Clone, Copy, ValueEnum)]
enum TextFormat {
    Html,
    Typst,
}

fn main() {
    let cli = Cli::parse();

    if let Err(e) = faqtext::logging::init(cli.verbose) {
        eprintln!("Warning: {}", e);
    }

    // An explicitly requested config must load
    let config = match &cli.config {
        Some(path) => match Config::try_load(path) {
            Ok(config) => config,
            Err(e) => {
                eprintln!("Error: {}", e);
                process::exit(1);
            }
        },
        None => Config::compiled_default(),
    };

    if let Err(e) = run(cli.command, config) {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

fn run(command: Command, mut config: Config) -> Result<(), String> {
    match command {
        Command::Render {
            input,
            format,
            plain,
            output,
        } => {
            if plain {
                config.text.markdown = false;
            }
            let text = read_input(Some(&input))?;
            debug!(path = %input.display(), bytes = text.len(), "read answer");

            match format {
                Format::Html => write_output(
                    output.as_deref(),
                    faqtext::answer_to_html_with_config(&text, &config).as_bytes(),
                ),
                Format::Typst => write_output(
                    output.as_deref(),
                    faqtext::answer_to_typst_with_config(&text, &config).as_bytes(),
                ),
                Format::Pdf => {
                    let pdf_bytes = faqtext::answer_to_pdf_with_config(&text, &config)
                        .map_err(|e| e.to_string())?;
                    let output = output.unwrap_or_else(|| input.with_extension("pdf"));
                    write_output(Some(&output), &pdf_bytes)?;
                    println!("Created {}", output.display());
                    Ok(())
                }
            }
        }
        Command::Highlight {
            term,
            input,
            format,
        } => {
            let text = read_input(input.as_deref())?;
            let highlighter = Highlighter::new(&term, config.search.mode);
            let segments = highlighter.segments(&text);
            info!(
                matches = segments.iter().filter(|s| s.is_match).count(),
                "highlighted"
            );

            let rendered = match format {
                TextFormat::Html => html::render_segments(&segments, &config.html),
                TextFormat::Typst => faqtext::segments_to_typst(&segments),
            };
            write_output(None, rendered.as_bytes())
        }
        Command::Inspect { input, plain } => {
            let text = read_input(Some(&input))?;
            let mode = if plain {
                Mode::Plain
            } else {
                config.text.mode()
            };

            for source in faqtext::parse_with_mode(Some(&text), mode) {
                println!(
                    "L{} {} {}",
                    source.line + 1,
                    source.block.kind(),
                    summary(&source.block)
                );
            }
            Ok(())
        }
    }
}

fn summary(block: &Block) -> String {
    let text = match block {
        Block::Paragraph { text } | Block::Title { text } => format!("{:?}", text),
        Block::Spacer => String::new(),
        Block::List(list) => format!("{} items: {:?}", list.items.len(), list.items),
    };
    text.chars().take(60).collect()
}

fn read_input(path: Option<&Path>) -> Result<String, String> {
    match path {
        Some(path) => fs::read_to_string(path)
            .map_err(|e| format!("reading {}: {}", path.display(), e)),
        None => {
            let mut text = String::new();
            io::stdin()
                .read_to_string(&mut text)
                .map_err(|e| format!("reading stdin: {}", e))?;
            Ok(text)
        }
    }
}

fn write_output(path: Option<&Path>, bytes: &[u8]) -> Result<(), String> {
    match path {
        Some(path) => {
            fs::write(path, bytes).map_err(|e| format!("writing {}: {}", path.display(), e))
        }
        None => {
            use std::io::Write;
            io::stdout()
                .write_all(bytes)
                .map_err(|e| format!("writing stdout: {}", e))
        }
    }
}
