use dashboard_core::{ParseStanceError, Stance};
use thiserror::Error;

/// One line typed by the operator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConsoleCommand {
    SetUrl(String),
    SetStance(Stance),
    Submit,
    Refresh,
    /// Job id, or a 1-based row number in the rendered list.
    Toggle(String),
    Show,
    Help,
    Quit,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InputError {
    #[error("unknown command {0:?}; type `help` for a list")]
    Unknown(String),
    #[error("`{0}` needs an argument")]
    MissingArgument(&'static str),
    #[error(transparent)]
    Stance(#[from] ParseStanceError),
}

/// Parses a console line. Blank lines yield `Ok(None)`.
pub fn parse_command(line: &str) -> Result<Option<ConsoleCommand>, InputError> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(None);
    }
    let (word, rest) = match line.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim()),
        None => (line, ""),
    };

    let command = match word.to_ascii_lowercase().as_str() {
        "url" => ConsoleCommand::SetUrl(rest.to_string()),
        "stance" => {
            if rest.is_empty() {
                return Err(InputError::MissingArgument("stance"));
            }
            ConsoleCommand::SetStance(rest.parse()?)
        }
        "submit" | "generate" => ConsoleCommand::Submit,
        "refresh" => ConsoleCommand::Refresh,
        "toggle" | "t" => {
            if rest.is_empty() {
                return Err(InputError::MissingArgument("toggle"));
            }
            ConsoleCommand::Toggle(rest.to_string())
        }
        "show" => ConsoleCommand::Show,
        "help" | "?" => ConsoleCommand::Help,
        "quit" | "exit" | "q" => ConsoleCommand::Quit,
        _ => return Err(InputError::Unknown(word.to_string())),
    };
    Ok(Some(command))
}

/// Maps a toggle argument to a job id. A number within the list picks that
/// row; anything else is taken as the job id itself.
pub fn resolve_toggle_target(arg: &str, row_ids: &[String]) -> String {
    if row_ids.iter().any(|id| id == arg) {
        return arg.to_string();
    }
    match arg.parse::<usize>() {
        Ok(row) if (1..=row_ids.len()).contains(&row) => row_ids[row - 1].clone(),
        _ => arg.to_string(),
    }
}
