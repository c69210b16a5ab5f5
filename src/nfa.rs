use std::fmt;
use std::io;
use std::path::Path;

use log::trace;

use crate::dot;
use crate::error::{Error, Result};
use crate::parser::{self, Postfix, Token};
use crate::set::{StateSet, Vocabulary};
use crate::stack::Stack;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Label {
    Epsilon,
    Input(char),
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            Label::Epsilon => write!(f, "ε"),
            Label::Input(c) => write!(f, "{}", c),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Edge {
    pub label: Label,
    pub target: usize,
}

#[derive(Debug, Clone, Default)]
pub struct State {
    edges: Vec<Edge>,
}

impl State {
    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }
}

/// A Thompson NFA. State `0` is the only initial state and state `len() - 1`
/// the only accepting one; every constructor below preserves that.
#[derive(Debug, Clone)]
pub struct Nfa {
    states: Vec<State>,
}

impl Nfa {
    pub fn re2nfa(regex: &str) -> Result<Nfa> {
        Nfa::from_postfix(&parser::parse(regex)?)
    }

    /// Builds the automaton bottom-up with an operand stack. Each operator
    /// consumes the automata it pops.
    pub fn from_postfix(postfix: &Postfix) -> Result<Nfa> {
        let mut operands: Stack<Nfa> = Stack::new();
        for &token in postfix.tokens() {
            let built = match token {
                Token::Symbol(c) => Nfa::symbol(c),
                Token::Star => pop_operand(&mut operands, token)?.star(),
                Token::Concat | Token::Union => {
                    let rhs = pop_operand(&mut operands, token)?;
                    let lhs = pop_operand(&mut operands, token)?;
                    if token == Token::Concat {
                        lhs.concat(rhs)
                    } else {
                        lhs.union(rhs)
                    }
                }
                Token::Open | Token::Close => {
                    unreachable!("parentheses never reach postfix form")
                }
            };
            operands.push(built);
        }

        let nfa = operands.pop().ok_or(Error::EmptyExpression)?;
        if !operands.is_empty() {
            return Err(Error::DanglingOperands { count: operands.len() + 1 });
        }
        Ok(nfa)
    }

    fn with_states(n: usize) -> Nfa {
        Nfa { states: vec![State::default(); n] }
    }

    fn add_edge(&mut self, from: usize, label: Label, to: usize) {
        self.states[from].edges.push(Edge { label, target: to });
    }

    /// Moves every edge of `other` into `self`, renumbering its states by `offset`.
    fn absorb(&mut self, other: Nfa, offset: usize) {
        for (id, state) in other.states.into_iter().enumerate() {
            for edge in state.edges {
                self.add_edge(id + offset, edge.label, edge.target + offset);
            }
        }
    }

    pub fn symbol(c: char) -> Nfa {
        let mut nfa = Nfa::with_states(2);
        nfa.add_edge(0, Label::Input(c), 1);
        nfa
    }

    pub fn star(self) -> Nfa {
        let inner_accept = self.len();
        let mut nfa = Nfa::with_states(self.len() + 2);
        let last = nfa.accepting();
        nfa.add_edge(0, Label::Epsilon, 1);
        nfa.add_edge(0, Label::Epsilon, last);
        nfa.absorb(self, 1);
        nfa.add_edge(inner_accept, Label::Epsilon, last);
        nfa.add_edge(last, Label::Epsilon, 0);
        trace!("star: {} states", nfa.len());
        nfa
    }

    pub fn concat(self, other: Nfa) -> Nfa {
        let (a, b) = (self.len(), other.len());
        let mut nfa = Nfa::with_states(a + b + 2);
        let last = nfa.accepting();
        nfa.add_edge(0, Label::Epsilon, 1);
        nfa.absorb(self, 1);
        nfa.add_edge(a, Label::Epsilon, a + 1);
        nfa.absorb(other, a + 1);
        nfa.add_edge(a + b, Label::Epsilon, last);
        trace!("concat: {} + {} -> {} states", a, b, nfa.len());
        nfa
    }

    pub fn union(self, other: Nfa) -> Nfa {
        let (a, b) = (self.len(), other.len());
        let mut nfa = Nfa::with_states(a + b + 2);
        let last = nfa.accepting();
        nfa.add_edge(0, Label::Epsilon, 1);
        nfa.add_edge(0, Label::Epsilon, a + 1);
        nfa.absorb(self, 1);
        nfa.absorb(other, a + 1);
        nfa.add_edge(a, Label::Epsilon, last);
        nfa.add_edge(a + b, Label::Epsilon, last);
        trace!("union: {} | {} -> {} states", a, b, nfa.len());
        nfa
    }

    pub fn len(&self) -> usize {
        self.states.len()
    }

    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    pub fn initial(&self) -> usize {
        0
    }

    pub fn accepting(&self) -> usize {
        self.states.len() - 1
    }

    pub fn states(&self) -> &[State] {
        &self.states
    }

    pub fn edges(&self, state: usize) -> &[Edge] {
        &self.states[state].edges
    }

    pub fn edge_count(&self) -> usize {
        self.states.iter().map(|s| s.edges.len()).sum()
    }

    /// Sorted distinct input symbols, epsilon excluded.
    pub fn vocabulary(&self) -> Vocabulary {
        self.states
            .iter()
            .flat_map(|s| s.edges.iter())
            .filter_map(|e| match e.label {
                Label::Input(c) => Some(c),
                Label::Epsilon => None,
            })
            .collect()
    }

    /// States reachable from `state` through epsilon edges alone, `state`
    /// included. The result set doubles as the visited set, so epsilon
    /// cycles terminate.
    pub fn epsilon_closure(&self, state: usize) -> StateSet {
        let mut closure = StateSet::singleton(state);
        let mut pending = Stack::new();
        pending.push(state);
        while let Some(current) = pending.pop() {
            for edge in &self.states[current].edges {
                if edge.label == Label::Epsilon && closure.insert(edge.target) {
                    pending.push(edge.target);
                }
            }
        }
        trace!("epsilon-closure({}) = {}", state, closure);
        closure
    }

    /// Union of the epsilon-closures of every state in `states`.
    pub fn epsilon_expand(&self, states: &StateSet) -> StateSet {
        let mut expanded = StateSet::new();
        for &state in states {
            if !expanded.contains(state) {
                expanded.union_with(&self.epsilon_closure(state));
            }
        }
        expanded
    }

    /// Direct successors of `states` on `symbol`, without closing over epsilon.
    pub fn delta(&self, states: &StateSet, symbol: char) -> StateSet {
        let mut reached = StateSet::new();
        for &state in states {
            for edge in &self.states[state].edges {
                if edge.label == Label::Input(symbol) {
                    reached.insert(edge.target);
                }
            }
        }
        reached
    }

    pub fn dot(&self) -> String {
        let mut dot = String::from("digraph NFA {\n\trankdir=LR\n\tinitial [shape=point]\n");
        for id in 0..self.accepting() {
            dot.push_str(&format!("\ts{} [shape=circle]\n", id));
        }
        dot.push_str(&format!("\ts{} [shape=doublecircle]\n", self.accepting()));
        dot.push_str("\tinitial -> s0\n");
        for (id, state) in self.states.iter().enumerate() {
            for edge in &state.edges {
                match edge.label {
                    Label::Epsilon => dot.push_str(&format!(
                        "\ts{} -> s{} [label = <&#949;>]\n",
                        id, edge.target
                    )),
                    Label::Input(c) => dot.push_str(&format!(
                        "\ts{} -> s{} [label = {}]\n",
                        id, edge.target, c
                    )),
                }
            }
        }
        dot.push_str("}\n");
        dot
    }

    pub fn write<P: AsRef<Path>>(&self, path: P) -> io::Result<()> {
        dot::write_file(path.as_ref(), &self.dot())
    }
}

fn pop_operand(operands: &mut Stack<Nfa>, operator: Token) -> Result<Nfa> {
    operands.pop().ok_or(Error::MissingOperand { operator: operator.as_char() })
}

impl fmt::Display for Nfa {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "nStates = {}", self.len())?;
        writeln!(f, "Transitions:")?;
        for (id, state) in self.states.iter().enumerate() {
            write!(f, "\tState {} : ", id)?;
            for edge in &state.edges {
                write!(f, "[{}|{}] ", edge.label, edge.target)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
