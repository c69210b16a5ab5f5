use std::error;
use std::fmt;

/// Everything that can go wrong while turning an expression into automata.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// The expression (or a postfix form built from it) has no operands at all.
    EmptyExpression,
    /// A character outside the alphabet and the operator set.
    UnsupportedSymbol { symbol: char, position: usize },
    /// A `)` with no `(` before it.
    UnmatchedClose { position: usize },
    /// A `(` that is never closed.
    UnclosedGroup { position: usize },
    /// An operator popped the operand stack while it was short of automata.
    MissingOperand { operator: char },
    /// More than one automaton was left once the postfix form was consumed.
    DanglingOperands { count: usize },
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            Error::EmptyExpression => write!(f, "empty expression"),
            Error::UnsupportedSymbol { symbol, position } => {
                write!(f, "symbol `{}` not allowed at position {}", symbol, position)
            }
            Error::UnmatchedClose { position } => {
                write!(f, "unmatched `)` at position {}", position)
            }
            Error::UnclosedGroup { position } => {
                write!(f, "`(` at position {} is never closed", position)
            }
            Error::MissingOperand { operator } => {
                write!(f, "operator `{}` is missing an operand", operator)
            }
            Error::DanglingOperands { count } => {
                write!(f, "{} operands left without an operator to join them", count)
            }
        }
    }
}

impl error::Error for Error {}

pub type Result<T> = std::result::Result<T, Error>;
