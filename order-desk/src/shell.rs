//! 终端命令解析
//!
//! One command per line; the binary maps each command to a desk call.

use thiserror::Error;

pub const HELP: &str = "\
Commands:
  search <term>      suggest up to 5 matching items
  add <id>           add one unit of an item
  inc <id> [n]       increase quantity (default 1)
  dec <id> [n]       decrease quantity (default 1)
  rm <id>            remove an item
  clear              empty the cart
  cart               show the cart
  submit             record, export and relay the order
  history            list recorded orders
  export [order_id]  export one order, or the whole history
  toasts             show active notifications
  dismiss <id>       dismiss a notification
  reset              start a new session
  quit               exit";

/// Shell command
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Search(String),
    Add(String),
    Adjust { id: String, delta: i64 },
    Remove(String),
    Clear,
    ShowCart,
    Submit,
    ShowHistory,
    /// `None` exports the whole history
    Export(Option<String>),
    ShowNotifications,
    Dismiss(String),
    Reset,
    Help,
    Quit,
}

/// Parse errors
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ShellError {
    #[error("Empty command")]
    Empty,

    #[error("Unknown command: {0} (try `help`)")]
    Unknown(String),

    #[error("Missing argument: {0}")]
    MissingArgument(&'static str),

    #[error("Invalid number: {0}")]
    InvalidNumber(String),
}

/// Parse one input line
pub fn parse(line: &str) -> Result<Command, ShellError> {
    let line = line.trim();
    let (verb, rest) = match line.split_once(char::is_whitespace) {
        Some((verb, rest)) => (verb, rest.trim()),
        None => (line, ""),
    };
    if verb.is_empty() {
        return Err(ShellError::Empty);
    }

    let mut args = rest.split_whitespace();
    let command = match verb.to_lowercase().as_str() {
        // Search terms may contain spaces
        "search" | "s" => Command::Search(rest.to_string()),
        "add" | "a" => Command::Add(required(args.next(), "item id")?),
        "inc" | "+" => {
            let id = required(args.next(), "item id")?;
            Command::Adjust {
                id,
                delta: amount(args.next())?,
            }
        }
        "dec" | "-" => {
            let id = required(args.next(), "item id")?;
            Command::Adjust {
                id,
                delta: -amount(args.next())?,
            }
        }
        "rm" | "remove" => Command::Remove(required(args.next(), "item id")?),
        "clear" => Command::Clear,
        "cart" => Command::ShowCart,
        "submit" | "send" => Command::Submit,
        "history" => Command::ShowHistory,
        "export" => Command::Export(args.next().map(str::to_string)),
        "toasts" | "notifications" => Command::ShowNotifications,
        "dismiss" => Command::Dismiss(required(args.next(), "notification id")?),
        "reset" => Command::Reset,
        "help" | "?" => Command::Help,
        "quit" | "exit" | "q" => Command::Quit,
        other => return Err(ShellError::Unknown(other.to_string())),
    };
    Ok(command)
}

fn required(arg: Option<&str>, name: &'static str) -> Result<String, ShellError> {
    arg.map(str::to_string)
        .ok_or(ShellError::MissingArgument(name))
}

fn amount(arg: Option<&str>) -> Result<i64, ShellError> {
    match arg {
        None => Ok(1),
        Some(raw) => match raw.parse::<i64>() {
            Ok(n) if n > 0 => Ok(n),
            _ => Err(ShellError::InvalidNumber(raw.to_string())),
        },
    }
}
