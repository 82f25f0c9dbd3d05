//! Line grammar for user commands.

use mockable::Clock;

use super::{Command, CommandResult, ParseError};
use crate::task::domain::{Task, TaskKind};

/// Standalone argument token that marks a task as recurring.
pub const RECURRING_FLAG: &str = "/recurring";

/// A parsed input line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParsedInput {
    /// A command to execute against the repository.
    Run(Command),
    /// A request to reverse the most recent undoable command.
    Undo,
}

/// Parses one input line into a command.
///
/// The keyword is matched case-insensitively. Task numbers are 1-based in
/// the input and converted to 0-based indices. Add commands build their
/// task immediately, so date errors surface here before any state changes.
///
/// # Errors
///
/// Returns [`super::CommandError::Parse`] for unknown keywords, missing or
/// unexpected arguments, and bad task numbers, and
/// [`super::CommandError::Task`] when the task text is rejected.
pub fn parse_input(line: &str, clock: &impl Clock) -> CommandResult<ParsedInput> {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        return Err(ParseError::EmptyInput.into());
    }

    let (keyword, arguments) = trimmed
        .split_once(char::is_whitespace)
        .map_or((trimmed, ""), |(keyword, rest)| (keyword, rest.trim()));

    let command = match keyword.to_ascii_lowercase().as_str() {
        "todo" => add(TaskKind::ToDo, "todo", arguments, clock)?,
        "deadline" => add(TaskKind::Deadline, "deadline", arguments, clock)?,
        "after" | "doafter" => add(TaskKind::DoAfter, "after", arguments, clock)?,
        "event" => add(TaskKind::Event, "event", arguments, clock)?,
        "done" => Command::MarkDone {
            index: parse_index("done", arguments)?,
        },
        "delete" => Command::Delete {
            index: parse_index("delete", arguments)?,
        },
        "edit" => parse_edit(arguments)?,
        "find" | "search" => Command::Search {
            query: required("find", "a search term", arguments)?.to_owned(),
        },
        "list" => no_arguments("list", arguments, Command::List)?,
        "clear" => no_arguments("clear", arguments, Command::Clear)?,
        "sort" => no_arguments("sort", arguments, Command::Sort)?,
        "bye" | "exit" => no_arguments("bye", arguments, Command::Exit)?,
        "undo" => {
            no_arguments("undo", arguments, ())?;
            return Ok(ParsedInput::Undo);
        }
        _ => return Err(ParseError::UnknownCommand(keyword.to_owned()).into()),
    };

    Ok(ParsedInput::Run(command))
}

fn add(
    kind: TaskKind,
    command: &'static str,
    arguments: &str,
    clock: &impl Clock,
) -> CommandResult<Command> {
    let text = required(command, "a description", arguments)?;
    let (details, recurring) = split_recurring_flag(text);
    let task = Task::create(kind, &details, clock)?.with_recurring(recurring);
    Ok(Command::Add(task))
}

fn parse_edit(arguments: &str) -> CommandResult<Command> {
    let input = required("edit", "a task number", arguments)?;
    let (number, rest) = input.split_once(char::is_whitespace).unwrap_or((input, ""));
    let index = parse_index("edit", number)?;
    let text = required("edit", "a new description", rest.trim())?;
    let (details, recurring) = split_recurring_flag(text);

    Ok(Command::Update {
        index,
        text: details,
        recurring,
    })
}

fn parse_index(command: &'static str, arguments: &str) -> CommandResult<usize> {
    let value = required(command, "a task number", arguments)?;
    value
        .parse::<usize>()
        .ok()
        .and_then(|number| number.checked_sub(1))
        .ok_or_else(|| ParseError::InvalidIndex(value.to_owned()).into())
}

fn required<'a>(
    command: &'static str,
    argument: &'static str,
    arguments: &'a str,
) -> Result<&'a str, ParseError> {
    if arguments.is_empty() {
        Err(ParseError::MissingArgument { command, argument })
    } else {
        Ok(arguments)
    }
}

fn no_arguments<T>(command: &'static str, arguments: &str, value: T) -> Result<T, ParseError> {
    if arguments.is_empty() {
        Ok(value)
    } else {
        Err(ParseError::UnexpectedArgument { command })
    }
}

/// Removes every standalone recurring flag and reports whether one was seen.
fn split_recurring_flag(text: &str) -> (String, bool) {
    let mut recurring = false;
    let words: Vec<&str> = text
        .split_whitespace()
        .filter(|word| {
            let is_flag = word.eq_ignore_ascii_case(RECURRING_FLAG);
            recurring |= is_flag;
            !is_flag
        })
        .collect();
    (words.join(" "), recurring)
}
