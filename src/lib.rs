//! Compiles regular expressions over lowercase letters and digits into
//! minimized deterministic automata.
//!
//! ```
//! let dfa = regex2dfa::compile("1(0+1)*0").unwrap();
//! assert!(dfa.accepts("100"));
//! assert!(!dfa.accepts("101"));
//! ```

pub mod dfa;
mod dot;
pub mod error;
pub mod minimize;
pub mod nfa;
pub mod parser;
pub mod set;
pub mod stack;

pub use dfa::{Dfa, DfaState};
pub use error::{Error, Result};
pub use minimize::Partition;
pub use nfa::Nfa;
pub use parser::Postfix;
pub use set::{OrderedSet, StateSet, Vocabulary};

/// Every intermediate automaton of one compilation.
#[derive(Debug, Clone)]
pub struct Stages {
    pub postfix: Postfix,
    pub nfa: Nfa,
    pub dfa: Dfa,
    pub min: Dfa,
}

pub fn compile(regex: &str) -> Result<Dfa> {
    let dfa = Dfa::nfa2dfa(&Nfa::re2nfa(regex)?);
    Ok(dfa.minimize())
}

pub fn compile_stages(regex: &str) -> Result<Stages> {
    let postfix = parser::parse(regex)?;
    let nfa = Nfa::from_postfix(&postfix)?;
    let dfa = Dfa::nfa2dfa(&nfa);
    let min = dfa.minimize();
    Ok(Stages { postfix, nfa, dfa, min })
}
