//! notion-blocks CLI - Markdown and Notion block conversion tool

use std::fs;
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};

use notion_blocks::model::MAX_CHILDREN_PER_REQUEST;
use notion_blocks::parser::MAX_TEXT_LENGTH;
use notion_blocks::render::{self, JsonFormat};
use notion_blocks::{ConversionResult, ListMode, MarkdownToBlocks, ParseOptions};

#[derive(Parser)]
#[command(name = "notion-blocks")]
#[command(version)]
#[command(about = "Convert between Markdown and Notion block JSON", long_about = None)]
struct Cli {
    /// Input Markdown file
    #[arg(value_name = "FILE")]
    input: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert Markdown files to Notion block JSON
    Blocks {
        /// Input Markdown files
        #[arg(value_name = "FILE", required = true)]
        inputs: Vec<PathBuf>,

        /// Output file for a single input (stdout if not specified)
        #[arg(short, long, value_name = "FILE", conflicts_with = "output_dir")]
        output: Option<PathBuf>,

        /// Output directory; one .json file per input
        #[arg(long, value_name = "DIR")]
        output_dir: Option<PathBuf>,

        /// Output compact JSON
        #[arg(long)]
        compact: bool,

        /// Wrap blocks in append-children request bodies
        #[arg(long)]
        payload: bool,

        /// How lists map to blocks
        #[arg(long, value_enum, env = "NOTION_BLOCKS_LIST_MODE", default_value = "first-item")]
        list_mode: ListModeArg,

        /// Apply Unicode NFC normalization to the input
        #[arg(long)]
        normalize: bool,

        /// Split text runs longer than this many characters (0 disables splitting)
        #[arg(long, default_value_t = MAX_TEXT_LENGTH)]
        max_text_length: usize,
    },

    /// Convert Notion block JSON to Markdown
    #[command(alias = "md")]
    Markdown {
        /// Input block JSON (array or list response)
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Page JSON whose properties are rendered before the blocks
        #[arg(long, value_name = "FILE")]
        page: Option<PathBuf>,
    },

    /// Render page properties as Markdown
    Properties {
        /// Input page JSON
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,
    },

    /// Show block statistics for a Markdown file
    Info {
        /// Input Markdown file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// How lists map to blocks
        #[arg(long, value_enum, env = "NOTION_BLOCKS_LIST_MODE", default_value = "first-item")]
        list_mode: ListModeArg,
    },

    /// Show version information
    Version,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
enum ListModeArg {
    /// Only the first item of each list becomes a block
    FirstItem,
    /// Every list item becomes a block
    EachItem,
}

impl From<ListModeArg> for ListMode {
    fn from(mode: ListModeArg) -> Self {
        match mode {
            ListModeArg::FirstItem => ListMode::FirstItem,
            ListModeArg::EachItem => ListMode::EachItem,
        }
    }
}

/// Settings of the `blocks` command.
struct BlocksArgs {
    compact: bool,
    payload: bool,
    options: ParseOptions,
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();

    let result = match cli.command {
        Some(Commands::Blocks {
            inputs,
            output,
            output_dir,
            compact,
            payload,
            list_mode,
            normalize,
            max_text_length,
        }) => {
            let args = BlocksArgs {
                compact,
                payload,
                options: ParseOptions::new()
                    .with_list_mode(list_mode.into())
                    .with_unicode_normalization(normalize)
                    .with_max_text_length((max_text_length > 0).then_some(max_text_length)),
            };
            cmd_blocks(&inputs, output.as_deref(), output_dir.as_deref(), &args)
        }
        Some(Commands::Markdown {
            input,
            output,
            page,
        }) => cmd_markdown(&input, output.as_deref(), page.as_deref()),
        Some(Commands::Properties { input, output }) => cmd_properties(&input, output.as_deref()),
        Some(Commands::Info { input, list_mode }) => cmd_info(&input, list_mode.into()),
        Some(Commands::Version) => {
            cmd_version();
            Ok(())
        }
        None => {
            // Default behavior: convert if input is provided
            if let Some(input) = cli.input {
                let args = BlocksArgs {
                    compact: false,
                    payload: false,
                    options: ParseOptions::default(),
                };
                cmd_blocks(&[input], None, None, &args)
            } else {
                println!("{}", "Usage: notion-blocks <FILE>".yellow());
                println!("       notion-blocks --help for more information");
                Ok(())
            }
        }
    };

    if let Err(e) = result {
        eprintln!("{}: {}", "Error".red().bold(), e);
        std::process::exit(1);
    }
}

fn cmd_blocks(
    inputs: &[PathBuf],
    output: Option<&Path>,
    output_dir: Option<&Path>,
    args: &BlocksArgs,
) -> Result<(), Box<dyn std::error::Error>> {
    if inputs.len() > 1 && output_dir.is_none() {
        return Err("--output-dir is required when converting several files".into());
    }

    let contents = inputs
        .iter()
        .map(fs::read_to_string)
        .collect::<Result<Vec<_>, _>>()?;

    let converter = MarkdownToBlocks::with_options(args.options.clone());
    log::debug!("Converting {} files with {:?}", inputs.len(), args.options);

    let pb = if inputs.len() > 1 {
        let pb = ProgressBar::new(inputs.len() as u64 + 1);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.green} [{bar:40.cyan/blue}] {msg}")?
                .progress_chars("#>-"),
        );
        pb.set_message("Converting Markdown...");
        Some(pb)
    } else {
        None
    };

    let results = converter.convert_batch(&contents);
    if let Some(ref pb) = pb {
        pb.inc(1);
    }

    for (input, result) in inputs.iter().zip(&results) {
        report_errors(input, result);
        let json = blocks_json(result, args)?;

        match (output_dir, output) {
            (Some(dir), _) => {
                fs::create_dir_all(dir)?;
                let stem = input.file_stem().unwrap_or_default().to_string_lossy();
                let path = dir.join(format!("{}.json", stem));
                if let Some(ref pb) = pb {
                    pb.set_message(format!("Writing {}", path.display()));
                    pb.inc(1);
                }
                fs::write(&path, &json)?;
                if pb.is_none() {
                    println!("{} {}", "Saved to".green(), path.display());
                }
            }
            (None, Some(path)) => {
                fs::write(path, &json)?;
                println!("{} {}", "Saved to".green(), path.display());
            }
            (None, None) => println!("{}", json),
        }
    }

    if let Some(pb) = pb {
        pb.finish_with_message("Done!");
        println!(
            "\n{} {} files converted",
            "Done!".green().bold(),
            inputs.len()
        );
    }

    Ok(())
}

fn blocks_json(
    result: &ConversionResult,
    args: &BlocksArgs,
) -> Result<String, Box<dyn std::error::Error>> {
    let format = if args.compact {
        JsonFormat::Compact
    } else {
        JsonFormat::Pretty
    };

    let json = if args.payload {
        render::to_children_json(&result.blocks, MAX_CHILDREN_PER_REQUEST, format)?
    } else {
        render::to_json(&result.blocks, format)?
    };
    Ok(json)
}

fn report_errors(input: &Path, result: &ConversionResult) {
    for message in result.error_messages() {
        eprintln!(
            "{} {}: {}",
            "Warning".yellow().bold(),
            input.display(),
            message
        );
    }
}

fn cmd_markdown(
    input: &Path,
    output: Option<&Path>,
    page: Option<&Path>,
) -> Result<(), Box<dyn std::error::Error>> {
    let blocks = notion_blocks::read_blocks_file(input)?;

    let markdown = match page {
        Some(page_path) => {
            let page = notion_blocks::read_page_file(page_path)?;
            render::page_to_markdown(&page, &blocks)
        }
        None => render::to_markdown(&blocks),
    };

    write_output(output, &markdown)
}

fn cmd_properties(input: &Path, output: Option<&Path>) -> Result<(), Box<dyn std::error::Error>> {
    let page = notion_blocks::read_page_file(input)?;
    let markdown = render::properties_to_markdown(&page.properties);
    write_output(output, &markdown)
}

fn write_output(output: Option<&Path>, content: &str) -> Result<(), Box<dyn std::error::Error>> {
    if let Some(path) = output {
        fs::write(path, content)?;
        println!("{} {}", "Saved to".green(), path.display());
    } else {
        print!("{}", content);
    }
    Ok(())
}

fn cmd_info(input: &Path, list_mode: ListMode) -> Result<(), Box<dyn std::error::Error>> {
    let options = ParseOptions::new().with_list_mode(list_mode);
    let result = notion_blocks::convert_file(input, options)?;
    let stats = result.stats();

    println!("{}", "Document Information".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());

    println!("{}: {}", "File".bold(), input.display());
    println!("{}: {}", "Blocks".bold(), stats.block_count());
    println!(
        "{}: {}",
        "Request batches".bold(),
        result.blocks.len().div_ceil(MAX_CHILDREN_PER_REQUEST)
    );

    println!();
    println!("{}", "Content Statistics".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());

    println!("{}: {}", "Headings".bold(), stats.heading_count);
    println!("{}: {}", "Paragraphs".bold(), stats.paragraph_count);
    println!("{}: {}", "List items".bold(), stats.list_item_count);
    println!("{}: {}", "Code blocks".bold(), stats.code_count);
    println!("{}: {}", "Quotes".bold(), stats.quote_count);
    println!("{}: {}", "Images".bold(), stats.image_count);
    println!("{}: {}", "Words".bold(), stats.word_count);
    println!("{}: {}", "Characters".bold(), stats.char_count);

    if stats.error_count > 0 {
        println!(
            "{}: {}",
            "Conversion errors".yellow().bold(),
            stats.error_count
        );
        report_errors(input, &result);
    }

    Ok(())
}

fn cmd_version() {
    println!(
        "{} {}",
        "notion-blocks".cyan().bold(),
        env!("CARGO_PKG_VERSION")
    );
    println!("Markdown and Notion block conversion tool");
    println!();
    println!("License: MIT");
}
