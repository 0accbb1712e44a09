//! Bridge to the external fatigue classifier process.
//!
//! Classification is delegated to an external command (by default Weka's
//! `AddClassification` filter) that reads the exported ARFF file and writes a
//! result file. The score sits on a fixed line of that file, after the last
//! comma.

use crate::{Error, Result};
use std::path::{Path, PathBuf};
use std::process::Command;

/// External classifier invocation settings
#[derive(Debug, Clone)]
pub struct ClassifierCommand {
    /// Program to execute
    pub program: String,
    /// Arguments passed verbatim, including the input/output file names
    pub args: Vec<String>,
    /// Result file written by the classifier
    pub result_path: PathBuf,
    /// 1-based line of the result file carrying the score
    pub result_line: usize,
}

/// Blocking client for the external classifier process
pub struct FatigueClassifier {
    command: ClassifierCommand,
}

impl FatigueClassifier {
    #[must_use]
    pub fn new(command: ClassifierCommand) -> Self {
        Self { command }
    }

    /// Result file the classifier writes to
    #[must_use]
    pub fn result_path(&self) -> &Path {
        &self.command.result_path
    }

    /// Run the classifier over the current ARFF file and parse the score.
    ///
    /// Blocks until the subprocess exits.
    ///
    /// # Errors
    ///
    /// Returns an error if the process cannot be spawned, exits with a
    /// nonzero status, or the result file is missing or malformed.
    pub fn score(&self) -> Result<f64> {
        log::debug!(
            "Invoking classifier: {} {}",
            self.command.program,
            self.command.args.join(" ")
        );

        let status = Command::new(&self.command.program)
            .args(&self.command.args)
            .status()
            .map_err(|e| {
                Error::ClassifierError(format!(
                    "Failed to spawn '{}': {e}",
                    self.command.program
                ))
            })?;

        if !status.success() {
            return Err(Error::ClassifierError(format!(
                "Classifier exited with status {status}"
            )));
        }

        let text = std::fs::read_to_string(&self.command.result_path).map_err(|e| {
            Error::ClassifierError(format!(
                "Cannot read result file {}: {e}",
                self.command.result_path.display()
            ))
        })?;

        parse_score(&text, self.command.result_line)
    }
}

/// Extract the score from the classifier result text.
///
/// Takes the 1-based `line` of the text and parses the field after the last
/// comma as the score.
///
/// # Errors
///
/// Returns an error if the line is absent, carries no comma, or the trailing
/// field is not a number.
pub fn parse_score(text: &str, line: usize) -> Result<f64> {
    if line == 0 {
        return Err(Error::ClassifierError(
            "Result line number must be 1-based".to_string(),
        ));
    }

    let row = text.lines().nth(line - 1).ok_or_else(|| {
        Error::ClassifierError(format!(
            "Result file has fewer than {line} lines"
        ))
    })?;

    let (_, field) = row.rsplit_once(',').ok_or_else(|| {
        Error::ClassifierError(format!("Result line {line} has no comma-delimited field"))
    })?;

    field.trim().parse::<f64>().map_err(|e| {
        Error::ClassifierError(format!("Cannot parse score from '{field}': {e}"))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_score_trailing_field() {
        let text = "header\n1,2,3\n0.5,0.25,8.25\n";
        assert_eq!(parse_score(text, 3).unwrap(), 8.25);
    }

    #[test]
    fn test_parse_score_uses_last_comma() {
        // Only the field after the last comma counts
        let text = "4,garbage,not a number,6.5";
        assert_eq!(parse_score(text, 1).unwrap(), 6.5);
    }

    #[test]
    fn test_parse_score_short_file() {
        let text = "only one line";
        assert!(parse_score(text, 143).is_err());
    }

    #[test]
    fn test_parse_score_no_comma() {
        assert!(parse_score("3.5", 1).is_err());
    }

    #[test]
    fn test_parse_score_malformed_field() {
        assert!(parse_score("a,b,c", 1).is_err());
    }

    #[test]
    fn test_parse_score_zero_line() {
        assert!(parse_score("1,2", 0).is_err());
    }
}
