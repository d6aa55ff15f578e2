//! Interactive prompts for values missing from the command line.

use crate::cli::OutputFormat;
use crate::error::{CliError, CliResult};
use crate::output;
use crate::types::CidrBlock;
use console::{style, Term};
use std::io::{self, BufRead};
use std::path::{Path, PathBuf};

/// Source of answers to interactive questions.
pub trait Prompt {
    /// Ask `question` and return the trimmed answer.
    ///
    /// Fails with `UnexpectedEof` once input is exhausted.
    fn ask(&mut self, question: &str) -> io::Result<String>;
}

/// Prompts on stderr and reads answers from stdin.
pub struct TermPrompt {
    term: Term,
}

impl TermPrompt {
    pub fn new() -> Self {
        Self {
            term: Term::stderr(),
        }
    }
}

impl Default for TermPrompt {
    fn default() -> Self {
        Self::new()
    }
}

impl Prompt for TermPrompt {
    fn ask(&mut self, question: &str) -> io::Result<String> {
        self.term
            .write_str(&format!("{} ", style(question).bold()))?;
        self.term.flush()?;

        let mut line = String::new();
        if io::stdin().lock().read_line(&mut line)? == 0 {
            return Err(io::Error::new(
                io::ErrorKind::UnexpectedEof,
                "no more input on stdin",
            ));
        }
        Ok(line.trim().to_string())
    }
}

/// Ask for a CIDR range until a valid one is entered.
pub fn ask_target<P: Prompt + ?Sized>(prompt: &mut P) -> CliResult<CidrBlock> {
    loop {
        let answer = prompt
            .ask("Please enter the CIDR range (e.g., 192.168.1.0/24):")
            .map_err(CliError::Prompt)?;

        match CidrBlock::validate(&answer) {
            Ok(block) => return Ok(block),
            Err(e) => output::print_error(&CliError::from(e).to_string()),
        }
    }
}

/// Ask for an output format. Empty or unknown answers fall back to `default`.
pub fn ask_format<P: Prompt + ?Sized>(
    prompt: &mut P,
    default: OutputFormat,
) -> CliResult<OutputFormat> {
    let answer = prompt
        .ask(&format!(
            "Enter output format (plain/csv/json/grepable/xml) [{}]:",
            default
        ))
        .map_err(CliError::Prompt)?;

    if answer.is_empty() {
        return Ok(default);
    }

    Ok(OutputFormat::parse_loose(&answer).unwrap_or_else(|| {
        output::print_warning(&format!(
            "Invalid output format '{}'. Using default '{}'.",
            answer, default
        ));
        default
    }))
}

/// Ask for the output path, offering `suggested` as the default.
pub fn ask_destination<P: Prompt + ?Sized>(prompt: &mut P, suggested: &Path) -> CliResult<PathBuf> {
    let answer = prompt
        .ask(&format!("Output file [{}]:", suggested.display()))
        .map_err(CliError::Prompt)?;

    if answer.is_empty() {
        Ok(suggested.to_path_buf())
    } else {
        Ok(PathBuf::from(answer))
    }
}
