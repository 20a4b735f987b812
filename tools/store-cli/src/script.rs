//! Cart operation scripts.
//!
//! One operation per line, e.g. `add 1`, `inc 1`, `clear`. Blank lines and
//! anything after `#` are ignored.

use store_core::cart::{CartController, CartSnapshot};
use store_core::{ProductId, StoreError};
use thiserror::Error;

/// A single cart operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScriptOp {
    Add(ProductId),
    Increment(ProductId),
    Decrement(ProductId),
    Remove(ProductId),
    Clear,
    Detail(ProductId),
    Open(ProductId),
    Close,
    Show,
}

/// An operation with the line it came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScriptLine {
    /// 1-based line number.
    pub number: usize,
    pub op: ScriptOp,
}

/// Script parse errors.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ScriptError {
    #[error("line {line}: unknown command `{command}`")]
    UnknownCommand { line: usize, command: String },

    #[error("line {line}: `{command}` needs a product id")]
    MissingId { line: usize, command: String },

    #[error("line {line}: unexpected argument `{argument}`")]
    UnexpectedArgument { line: usize, argument: String },
}

/// Parse a whole script.
pub fn parse_script(source: &str) -> Result<Vec<ScriptLine>, ScriptError> {
    let mut lines = Vec::new();
    for (idx, raw) in source.lines().enumerate() {
        let number = idx + 1;
        let text = raw.split('#').next().unwrap_or("").trim();
        if text.is_empty() {
            continue;
        }
        lines.push(ScriptLine {
            number,
            op: parse_line(number, text)?,
        });
    }
    Ok(lines)
}

fn parse_line(line: usize, text: &str) -> Result<ScriptOp, ScriptError> {
    let mut words = text.split_whitespace();
    let command = words.next().unwrap_or_default().to_lowercase();
    let argument = words.next().map(ProductId::from);

    if let Some(extra) = words.next() {
        return Err(ScriptError::UnexpectedArgument {
            line,
            argument: extra.to_string(),
        });
    }

    let with_id = |make: fn(ProductId) -> ScriptOp| {
        argument.clone().map(make).ok_or_else(|| ScriptError::MissingId {
            line,
            command: command.clone(),
        })
    };

    let op = match command.as_str() {
        "add" => with_id(ScriptOp::Add)?,
        "inc" | "increment" => with_id(ScriptOp::Increment)?,
        "dec" | "decrement" => with_id(ScriptOp::Decrement)?,
        "remove" | "rm" => with_id(ScriptOp::Remove)?,
        "detail" => with_id(ScriptOp::Detail)?,
        "open" => with_id(ScriptOp::Open)?,
        "clear" | "close" | "show" => {
            if let Some(id) = argument {
                return Err(ScriptError::UnexpectedArgument {
                    line,
                    argument: id.into_inner(),
                });
            }
            match command.as_str() {
                "clear" => ScriptOp::Clear,
                "close" => ScriptOp::Close,
                _ => ScriptOp::Show,
            }
        }
        _ => {
            return Err(ScriptError::UnknownCommand {
                line,
                command: command.clone(),
            })
        }
    };
    Ok(op)
}

impl ScriptOp {
    /// Apply to a controller, returning the resulting snapshot.
    pub fn apply(&self, cart: &mut CartController) -> Result<CartSnapshot, StoreError> {
        match self {
            ScriptOp::Add(id) => cart.add_to_cart(id),
            ScriptOp::Increment(id) => cart.increment(id),
            ScriptOp::Decrement(id) => cart.decrement(id),
            ScriptOp::Remove(id) => cart.remove_item(id),
            ScriptOp::Clear => Ok(cart.clear_cart()),
            ScriptOp::Detail(id) => cart.select_detail(id),
            ScriptOp::Open(id) => cart.open_modal(id),
            ScriptOp::Close => Ok(cart.close_modal()),
            ScriptOp::Show => Ok(cart.snapshot()),
        }
    }

    /// True for operations that only read.
    pub fn is_read_only(&self) -> bool {
        matches!(self, ScriptOp::Show)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_script() {
        let script = "# demo\nadd 1\n\ninc 1   # twice\nDEC 2\nclear\nshow\n";
        let lines = parse_script(script).unwrap();
        assert_eq!(
            lines,
            vec![
                ScriptLine { number: 2, op: ScriptOp::Add(ProductId::from(1)) },
                ScriptLine { number: 4, op: ScriptOp::Increment(ProductId::from(1)) },
                ScriptLine { number: 5, op: ScriptOp::Decrement(ProductId::from(2)) },
                ScriptLine { number: 6, op: ScriptOp::Clear },
                ScriptLine { number: 7, op: ScriptOp::Show },
            ]
        );
    }

    #[test]
    fn test_missing_id() {
        let err = parse_script("add").unwrap_err();
        assert_eq!(
            err,
            ScriptError::MissingId { line: 1, command: "add".to_string() }
        );
    }

    #[test]
    fn test_unknown_command() {
        let err = parse_script("add 1\nbuy 2").unwrap_err();
        assert!(matches!(err, ScriptError::UnknownCommand { line: 2, .. }));
    }

    #[test]
    fn test_extra_arguments() {
        assert!(matches!(
            parse_script("clear 1").unwrap_err(),
            ScriptError::UnexpectedArgument { line: 1, .. }
        ));
        assert!(matches!(
            parse_script("add 1 2").unwrap_err(),
            ScriptError::UnexpectedArgument { line: 1, .. }
        ));
    }
}
