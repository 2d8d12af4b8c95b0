//! data-chapter CLI
//!
//! Read "The World of Data" interactively, or print its outline and prompts.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing::info;

use data_chapter::content::PROMPTS;
use data_chapter::error::ChapterError;
use data_chapter::logging::{self, LogTarget};
use data_chapter::outline::{format_outline, format_prompts};
use data_chapter::page::Page;
use data_chapter::tui;
use data_chapter::types::OutputFormat;
use data_chapter::widgets::copy::{Clipboard, Osc52Clipboard};

#[derive(Parser)]
#[command(name = "data-chapter")]
#[command(about = "Chapter 1: The World of Data, in your terminal")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Write logs here (the reader defaults to a file in the cache directory)
    #[arg(long, global = true)]
    log_file: Option<PathBuf>,

    /// More log output (-v info, -vv debug, -vvv trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[derive(Subcommand)]
enum Commands {
    /// Open the interactive chapter (default)
    Read,

    /// Print the section outline with its interactive widgets
    Outline {
        /// Output format
        #[arg(long, value_enum, default_value = "human")]
        format: OutputFormatArg,
    },

    /// Print the vibe-coding prompts
    Prompts {
        /// Output format
        #[arg(long, value_enum, default_value = "human")]
        format: OutputFormatArg,
    },

    /// Copy prompt N (1-based) to the clipboard via OSC 52
    Copy {
        index: usize,
    },
}

#[derive(Clone, Copy, clap::ValueEnum)]
enum OutputFormatArg {
    Human,
    Json,
}

impl From<OutputFormatArg> for OutputFormat {
    fn from(arg: OutputFormatArg) -> Self {
        match arg {
            OutputFormatArg::Human => OutputFormat::Human,
            OutputFormatArg::Json => OutputFormat::Json,
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    let command = cli.command.unwrap_or(Commands::Read);

    let result = init_logging(&command, cli.log_file, cli.verbose).and_then(|()| match command {
        Commands::Read => tui::run::run(),
        Commands::Outline { format } => cmd_outline(format.into()),
        Commands::Prompts { format } => cmd_prompts(format.into()),
        Commands::Copy { index } => cmd_copy(index, &mut Osc52Clipboard::stdout()),
    });

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

/// The reader owns the terminal, so it logs to a file; everything else
/// logs to stderr unless told otherwise.
fn init_logging(command: &Commands, log_file: Option<PathBuf>, verbose: u8) -> Result<(), ChapterError> {
    let target = match (command, log_file) {
        (_, Some(path)) => LogTarget::File(path),
        (Commands::Read, None) => LogTarget::File(logging::default_log_path()?),
        (_, None) => LogTarget::Stderr,
    };
    logging::init(&target, verbose)
}

// ============================================================================
// COMMANDS
// ============================================================================

fn cmd_outline(format: OutputFormat) -> Result<(), ChapterError> {
    let page = Page::mount();
    print!("{}", format_outline(&page, format)?);
    Ok(())
}

fn cmd_prompts(format: OutputFormat) -> Result<(), ChapterError> {
    print!("{}", format_prompts(&PROMPTS, format)?);
    Ok(())
}

/// Copy a prompt outside the reader. Unlike the in-reader button, a
/// failure here is reported, since nothing else would tell the user.
fn cmd_copy(index: usize, clipboard: &mut impl Clipboard) -> Result<(), ChapterError> {
    let prompt = index
        .checked_sub(1)
        .and_then(|i| PROMPTS.get(i))
        .ok_or(ChapterError::UnknownPrompt {
            index,
            count: PROMPTS.len(),
        })?;

    clipboard
        .write_text(prompt.text)
        .map_err(ChapterError::Clipboard)?;
    info!(index, title = prompt.title, "prompt copied");
    eprintln!("Copied \"{}\" to the clipboard.", prompt.title);
    Ok(())
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use std::io;

    struct Recording(Vec<String>);

    impl Clipboard for Recording {
        fn write_text(&mut self, text: &str) -> io::Result<()> {
            self.0.push(text.to_string());
            Ok(())
        }
    }

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn no_subcommand_means_read() {
        let cli = Cli::try_parse_from(["data-chapter"]).unwrap();
        assert!(cli.command.is_none());
        assert_eq!(cli.verbose, 0);
    }

    #[test]
    fn verbosity_counts_and_is_global() {
        let cli = Cli::try_parse_from(["data-chapter", "outline", "-vv"]).unwrap();
        assert_eq!(cli.verbose, 2);
    }

    #[test]
    fn copy_rejects_index_zero_and_out_of_range() {
        let mut clipboard = Recording(Vec::new());
        assert!(matches!(
            cmd_copy(0, &mut clipboard),
            Err(ChapterError::UnknownPrompt { index: 0, count: 4 })
        ));
        assert!(matches!(
            cmd_copy(5, &mut clipboard),
            Err(ChapterError::UnknownPrompt { index: 5, count: 4 })
        ));
        assert!(clipboard.0.is_empty());
    }

    #[test]
    fn copy_writes_the_prompt_text() {
        let mut clipboard = Recording(Vec::new());
        cmd_copy(2, &mut clipboard).unwrap();
        assert_eq!(clipboard.0, vec![PROMPTS[1].text.to_string()]);
    }
}
