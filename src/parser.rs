//! Infix expression to postfix form.
//!
//! Two passes: make concatenation explicit, then reduce with the
//! shunting-yard algorithm so the NFA builder can consume the result with a
//! single operand stack.

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use lazy_static::lazy_static;

use crate::error::{Error, Result};
use crate::stack::Stack;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Token {
    Symbol(char),
    Union,
    Concat,
    Star,
    Open,
    Close,
}

lazy_static! {
    static ref OPERATORS: HashMap<char, Token> = {
        let mut m = HashMap::new();
        m.insert('|', Token::Union);
        m.insert('+', Token::Union);
        m.insert('.', Token::Concat);
        m.insert('*', Token::Star);
        m.insert('(', Token::Open);
        m.insert(')', Token::Close);
        m
    };
}

/// Lowercase ASCII letters and decimal digits.
pub fn is_alphabet(c: char) -> bool {
    c.is_ascii_lowercase() || c.is_ascii_digit()
}

impl Token {
    fn precedence(self) -> u8 {
        match self {
            Token::Open => 1,
            Token::Union => 2,
            Token::Concat => 3,
            Token::Star => 4,
            Token::Symbol(_) | Token::Close => 0,
        }
    }

    /// Whether a concatenation must be inserted between this token and a
    /// following symbol or `(`.
    fn ends_operand(self) -> bool {
        matches!(self, Token::Symbol(_) | Token::Close | Token::Star)
    }

    fn starts_operand(self) -> bool {
        matches!(self, Token::Symbol(_) | Token::Open)
    }

    /// The character this token is written as in postfix notation.
    pub fn as_char(self) -> char {
        match self {
            Token::Symbol(c) => c,
            Token::Union => '+',
            Token::Concat => '.',
            Token::Star => '*',
            Token::Open => '(',
            Token::Close => ')',
        }
    }
}

/// A token sequence in reverse Polish order. Never contains parentheses.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Postfix(Vec<Token>);

impl Postfix {
    pub fn tokens(&self) -> &[Token] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for Postfix {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for token in &self.0 {
            write!(f, "{}", token.as_char())?;
        }
        Ok(())
    }
}

impl FromStr for Postfix {
    type Err = Error;

    /// Reads an expression that is already in postfix notation.
    fn from_str(s: &str) -> Result<Postfix> {
        s.chars()
            .enumerate()
            .map(|(position, c)| match lookup(c) {
                Some(Token::Open) | Some(Token::Close) | None => {
                    Err(Error::UnsupportedSymbol { symbol: c, position })
                }
                Some(token) => Ok(token),
            })
            .collect::<Result<Vec<_>>>()
            .map(Postfix)
    }
}

fn lookup(c: char) -> Option<Token> {
    if is_alphabet(c) {
        Some(Token::Symbol(c))
    } else {
        OPERATORS.get(&c).copied()
    }
}

/// Splits the expression into tokens, keeping each token's character position.
pub fn tokenize(regex: &str) -> Result<Vec<(usize, Token)>> {
    if regex.is_empty() {
        return Err(Error::EmptyExpression);
    }
    regex
        .chars()
        .enumerate()
        .map(|(position, c)| match lookup(c) {
            Some(token) => Ok((position, token)),
            None => Err(Error::UnsupportedSymbol { symbol: c, position }),
        })
        .collect()
}

/// Makes juxtaposition explicit: `ab` becomes `a.b`, `a(b)` becomes `a.(b)`.
pub fn insert_concat(tokens: &[(usize, Token)]) -> Vec<(usize, Token)> {
    let mut out = Vec::with_capacity(tokens.len() * 2);
    let mut prev: Option<Token> = None;
    for &(position, token) in tokens {
        if token.starts_operand() && prev.map_or(false, Token::ends_operand) {
            out.push((position, Token::Concat));
        }
        out.push((position, token));
        prev = Some(token);
    }
    out
}

/// Operator-precedence reduction of an explicit-concatenation token stream.
pub fn to_postfix(tokens: &[(usize, Token)]) -> Result<Postfix> {
    let mut output = Vec::with_capacity(tokens.len());
    let mut operators: Stack<(usize, Token)> = Stack::new();

    for &(position, token) in tokens {
        match token {
            Token::Symbol(_) => output.push(token),
            Token::Open => operators.push((position, token)),
            Token::Close => loop {
                match operators.pop() {
                    Some((_, Token::Open)) => break,
                    Some((_, op)) => output.push(op),
                    None => return Err(Error::UnmatchedClose { position }),
                }
            },
            Token::Union | Token::Concat | Token::Star => {
                while let Some(&(_, top)) = operators.peek() {
                    if token.precedence() > top.precedence() {
                        break;
                    }
                    output.push(top);
                    operators.pop();
                }
                operators.push((position, token));
            }
        }
    }

    while let Some((position, op)) = operators.pop() {
        if op == Token::Open {
            return Err(Error::UnclosedGroup { position });
        }
        output.push(op);
    }

    Ok(Postfix(output))
}

/// Runs every parsing pass over `regex`.
pub fn parse(regex: &str) -> Result<Postfix> {
    let tokens = tokenize(regex)?;
    let postfix = to_postfix(&insert_concat(&tokens))?;
    log::debug!("postfix of {:?} is {}", regex, postfix);
    Ok(postfix)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn explicit(regex: &str) -> String {
        let tokens = tokenize(regex).unwrap();
        insert_concat(&tokens)
            .into_iter()
            .map(|(_, t)| t.as_char())
            .collect()
    }

    #[test]
    fn concatenation_is_made_explicit() {
        assert_eq!(explicit("ab"), "a.b");
        assert_eq!(explicit("a(b)"), "a.(b)");
        assert_eq!(explicit("(a)(b)"), "(a).(b)");
        assert_eq!(explicit("a*b"), "a*.b");
        assert_eq!(explicit("a.b"), "a.b");
        assert_eq!(explicit("a|b"), "a+b");
    }

    #[test]
    fn postfix_respects_precedence() {
        assert_eq!(parse("a").unwrap().to_string(), "a");
        assert_eq!(parse("ab").unwrap().to_string(), "ab.");
        assert_eq!(parse("a|b").unwrap().to_string(), "ab+");
        assert_eq!(parse("a+b").unwrap().to_string(), "ab+");
        assert_eq!(parse("a|bc").unwrap().to_string(), "abc.+");
        assert_eq!(parse("a|b*").unwrap().to_string(), "ab*+");
        assert_eq!(parse("(a|b)*").unwrap().to_string(), "ab+*");
        assert_eq!(parse("a(b|c)*").unwrap().to_string(), "abc+*.");
        assert_eq!(parse("1(0+1)*0").unwrap().to_string(), "101+*.0.");
        assert_eq!(parse("abc").unwrap().to_string(), "ab.c.");
    }

    #[test]
    fn rejects_symbols_outside_the_alphabet() {
        assert_eq!(
            parse("aB").unwrap_err(),
            Error::UnsupportedSymbol { symbol: 'B', position: 1 }
        );
        assert_eq!(
            parse("a b").unwrap_err(),
            Error::UnsupportedSymbol { symbol: ' ', position: 1 }
        );
        assert_eq!(parse("").unwrap_err(), Error::EmptyExpression);
    }

    #[test]
    fn rejects_unbalanced_parentheses() {
        assert_eq!(parse("a)").unwrap_err(), Error::UnmatchedClose { position: 1 });
        assert_eq!(parse("(ab").unwrap_err(), Error::UnclosedGroup { position: 0 });
        assert_eq!(parse("((a)").unwrap_err(), Error::UnclosedGroup { position: 0 });
    }

    #[test]
    fn postfix_from_str() {
        let p: Postfix = "ab.*".parse().unwrap();
        assert_eq!(
            p.tokens(),
            &[Token::Symbol('a'), Token::Symbol('b'), Token::Concat, Token::Star]
        );
        assert!("a(".parse::<Postfix>().is_err());
    }
}
