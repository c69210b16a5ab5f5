use std::collections::HashMap;
use std::fmt;
use std::io;
use std::path::Path;

use log::debug;

use crate::dot;
use crate::minimize;
use crate::nfa::Nfa;
use crate::set::StateSet;
use crate::stack::Stack;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DfaState {
    pub accepting: bool,
    pub initial: bool,
    /// The NFA states this state stands for. Minimized automata carry `None`.
    pub label: Option<StateSet>,
}

/// A complete DFA: every `(state, symbol)` cell of the grid has a target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dfa {
    sigma: Vec<char>,
    states: Vec<DfaState>,
    transitions: Vec<usize>,
}

struct Pending {
    index: usize,
    label: StateSet,
}

impl Dfa {
    pub(crate) fn from_parts(sigma: Vec<char>, states: Vec<DfaState>, transitions: Vec<usize>) -> Dfa {
        debug_assert_eq!(states.len() * sigma.len(), transitions.len());
        Dfa { sigma, states, transitions }
    }

    pub fn nfa2dfa(nfa: &Nfa) -> Dfa {
        let sigma: Vec<char> = nfa.vocabulary().as_slice().to_vec();
        let nsym = sigma.len();
        let nfa_accept = nfa.accepting();

        let mut states = Vec::new();
        let mut transitions = Vec::new();
        let mut state_set_to_id: HashMap<StateSet, usize> = HashMap::new();
        let mut worklist = Stack::new();

        let start = nfa.epsilon_closure(nfa.initial());
        states.push(DfaState {
            accepting: start.contains(nfa_accept),
            initial: true,
            label: Some(start.clone()),
        });
        transitions.resize(nsym, 0);
        state_set_to_id.insert(start.clone(), 0);
        debug!("dfa state 0 = {}", start);
        worklist.push(Pending { index: 0, label: start });

        while let Some(Pending { index, label }) = worklist.pop() {
            for (j, &symbol) in sigma.iter().enumerate() {
                let target = nfa.epsilon_expand(&nfa.delta(&label, symbol));
                let id = match state_set_to_id.get(&target) {
                    Some(&id) => id,
                    None => {
                        let id = states.len();
                        debug!("dfa state {} = {} via ({}, {})", id, target, index, symbol);
                        states.push(DfaState {
                            accepting: target.contains(nfa_accept),
                            initial: false,
                            label: Some(target.clone()),
                        });
                        transitions.resize(transitions.len() + nsym, 0);
                        state_set_to_id.insert(target.clone(), id);
                        worklist.push(Pending { index: id, label: target });
                        id
                    }
                };
                transitions[index * nsym + j] = id;
            }
        }

        Dfa { sigma, states, transitions }
    }

    pub fn minimize(&self) -> Dfa {
        minimize::minimize(self)
    }

    pub fn sigma(&self) -> &[char] {
        &self.sigma
    }

    pub fn sigma_string(&self) -> String {
        self.sigma.iter().collect()
    }

    pub fn len(&self) -> usize {
        self.states.len()
    }

    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    pub fn states(&self) -> &[DfaState] {
        &self.states
    }

    pub fn initial(&self) -> usize {
        self.states.iter().position(|s| s.initial).unwrap_or(0)
    }

    pub fn is_accepting(&self, state: usize) -> bool {
        self.states[state].accepting
    }

    /// The whole grid, row-major: `transitions()[state * sigma().len() + j]`.
    pub fn transitions(&self) -> &[usize] {
        &self.transitions
    }

    pub fn transition(&self, state: usize, j: usize) -> usize {
        self.transitions[state * self.sigma.len() + j]
    }

    pub(crate) fn row(&self, state: usize) -> &[usize] {
        let nsym = self.sigma.len();
        &self.transitions[state * nsym..(state + 1) * nsym]
    }

    /// `None` if `symbol` is not part of the vocabulary.
    pub fn next(&self, state: usize, symbol: char) -> Option<usize> {
        self.sigma
            .binary_search(&symbol)
            .ok()
            .map(|j| self.transition(state, j))
    }

    pub fn accepts(&self, s: &str) -> bool {
        let mut state = self.initial();
        for c in s.chars() {
            match self.next(state, c) {
                Some(next_state) => state = next_state,
                None => return false,
            }
        }
        self.states[state].accepting
    }

    /// A rejecting state with no way out.
    pub fn is_sink(&self, state: usize) -> bool {
        !self.states[state].accepting && self.row(state).iter().all(|&t| t == state)
    }

    pub fn live_len(&self) -> usize {
        (0..self.len()).filter(|&s| !self.is_sink(s)).count()
    }

    pub fn dot(&self) -> String {
        let mut dot = String::from("digraph DFA {\n\trankdir=LR\n\tinitial [shape=point]\n");
        for (id, state) in self.states.iter().enumerate() {
            let shape = if state.accepting { "doublecircle" } else { "circle" };
            dot.push_str(&format!("\ts{} [shape={}]\n", id, shape));
        }
        dot.push_str(&format!("\tinitial -> s{}\n", self.initial()));
        for id in 0..self.len() {
            for (j, &symbol) in self.sigma.iter().enumerate() {
                dot.push_str(&format!(
                    "\ts{} -> s{} [label = {}]\n",
                    id,
                    self.transition(id, j),
                    symbol
                ));
            }
        }
        dot.push_str("}\n");
        dot
    }

    pub fn write<P: AsRef<Path>>(&self, path: P) -> io::Result<()> {
        dot::write_file(path.as_ref(), &self.dot())
    }
}

impl fmt::Display for Dfa {
    /// The alternate form `{:#}` also lists each state's subset label.
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "nSymbols = {}", self.sigma.len())?;
        writeln!(f, "Symbols  = \"{}\"", self.sigma_string())?;
        writeln!(f, "nStates  = {}", self.len())?;
        if f.alternate() {
            write!(f, "States   = [")?;
            for (id, state) in self.states.iter().enumerate() {
                if id > 0 {
                    write!(f, ",")?;
                }
                match state.label {
                    Some(ref label) => write!(f, "{}", label)?,
                    None => write!(f, "-")?,
                }
            }
            writeln!(f, "]")?;
        }
        writeln!(f, "Transitions:")?;
        write!(f, "{:>4} ", ' ')?;
        for symbol in &self.sigma {
            write!(f, "{:>4}", symbol)?;
        }
        writeln!(f)?;
        for id in 0..self.len() {
            let marker = if self.states[id].accepting { '*' } else { ' ' };
            write!(f, "{:>4}:", id)?;
            for &target in self.row(id) {
                write!(f, "{:>4}", target)?;
            }
            writeln!(f, " {}", marker)?;
        }
        Ok(())
    }
}
