//! Command-line interface for webquiz.

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use console::style;

use crate::config::{setting_help, Defaults};
use crate::error::{QuizError, Result};
use crate::types::QuizDocument;
use crate::xml::read_quiz_file;
use crate::yaml::save_yaml;

/// WebQuiz - Build quiz documents from TeX4ht XML.
#[derive(Parser)]
#[command(name = "webquiz")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Build the quiz model from an XML file and write it as YAML.
    Parse {
        /// Quiz XML produced by TeX4ht
        file: PathBuf,

        /// Settings file to read on top of the builtin defaults (repeatable)
        #[arg(long = "rc", value_name = "FILE")]
        rc_files: Vec<PathBuf>,

        /// Output directory (default: next to the input file)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Only validate, do not write YAML
        #[arg(short, long)]
        quiet: bool,
    },

    /// Show the effective default settings.
    Settings {
        /// Settings file to read on top of the builtin defaults (repeatable)
        #[arg(long = "rc", value_name = "FILE")]
        rc_files: Vec<PathBuf>,

        /// Write the non-builtin settings to this rc file
        #[arg(short, long, value_name = "FILE")]
        write: Option<PathBuf>,
    },
}

/// Run the CLI.
pub fn run() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Parse {
            file,
            rc_files,
            output,
            quiet,
        } => parse_command(&file, &rc_files, output.as_deref(), quiet),
        Commands::Settings { rc_files, write } => settings_command(&rc_files, write.as_deref()),
    }
}

/// Builtin defaults overridden by each rc file in turn.
fn load_defaults(rc_files: &[PathBuf]) -> Result<Defaults> {
    let mut defaults = Defaults::builtin();
    for path in rc_files {
        defaults.read_rc(path, true)?;
    }
    Ok(defaults)
}

/// Execute the parse command.
fn parse_command(
    file: &Path,
    rc_files: &[PathBuf],
    output: Option<&Path>,
    quiet: bool,
) -> Result<()> {
    // Check the output directory before doing any work
    if let Some(output_dir) = output {
        if !output_dir.is_dir() {
            return Err(QuizError::Io(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                format!("Output directory does not exist: {}", output_dir.display()),
            )));
        }
    }

    let defaults = load_defaults(rc_files)?;

    println!(
        "{} {}",
        style("Parsing").bold(),
        style(file.display()).cyan()
    );

    let document = read_quiz_file(file, &defaults)?;
    print_summary(&document);

    if quiet {
        return Ok(());
    }

    let output_path = save_yaml(&document, file, output)?;
    println!();
    println!(
        "{} {}",
        style("Saved to:").green().bold(),
        output_path.display()
    );

    Ok(())
}

fn print_summary(document: &QuizDocument) {
    println!("  Title: {}", style(&document.title).green());
    if !document.unit_code.is_empty() {
        println!("  Unit: {} {}", document.unit_code, document.unit_name);
    }
    println!("  Questions: {}", document.questions.len());
    println!("  Discussions: {}", document.discussions.len());
    if !document.quiz_index.is_empty() {
        println!("  Index entries: {}", document.quiz_index.len());
    }
    if document.needs_mathjs {
        println!("  Needs math.js: {}", style("yes").yellow().bold());
    }
}

/// Execute the settings command.
fn settings_command(rc_files: &[PathBuf], write: Option<&Path>) -> Result<()> {
    let defaults = load_defaults(rc_files)?;

    for (key, value) in defaults.iter() {
        let help = setting_help(key).unwrap_or_default();
        println!("{:<16} = {:<24} {}", style(key).cyan(), value, style(help).dim());
    }

    if let Some(path) = write {
        defaults.write_rc(path)?;
        println!();
        println!("{} {}", style("Saved to:").green().bold(), path.display());
    }

    Ok(())
}
