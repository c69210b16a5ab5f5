//! Partition-refinement minimization.
//!
//! States start split by acceptance and are refined until every group agrees
//! on the group it reaches for each symbol. Group ids are dense and numbered
//! by first appearance in state order, so the group of state `0` is always `0`.

use std::collections::HashMap;

use log::debug;

use crate::dfa::{Dfa, DfaState};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Partition {
    /// `groups[state]` is the equivalence class of `state`.
    pub groups: Vec<usize>,
    pub count: usize,
    /// Refinement passes run before the fixed point was reached.
    pub passes: usize,
}

pub fn partition(dfa: &Dfa) -> Partition {
    let n = dfa.len();
    if dfa.states().iter().all(|s| s.accepting) {
        return Partition { groups: vec![0; n], count: if n == 0 { 0 } else { 1 }, passes: 0 };
    }

    let initial = (0..n).map(|s| (dfa.is_accepting(s), Vec::<usize>::new()));
    let (mut groups, mut count) = renumber(initial);
    let mut passes = 0;

    while count < n {
        passes += 1;
        let signatures = (0..n).map(|s| {
            let signature: Vec<usize> = dfa.row(s).iter().map(|&t| groups[t]).collect();
            (groups[s], signature)
        });
        let (next, next_count) = renumber(signatures);
        debug!("minimize pass {}: {} -> {} groups", passes, count, next_count);
        groups = next;
        if next_count == count {
            break;
        }
        count = next_count;
    }

    Partition { groups, count, passes }
}

/// Dense ids for each distinct key, by first appearance.
fn renumber<K, I>(keys: I) -> (Vec<usize>, usize)
where
    K: std::hash::Hash + Eq,
    I: Iterator<Item = K>,
{
    let mut ids: HashMap<K, usize> = HashMap::new();
    let groups = keys
        .map(|key| {
            let next = ids.len();
            *ids.entry(key).or_insert(next)
        })
        .collect();
    (groups, ids.len())
}

pub fn minimize(dfa: &Dfa) -> Dfa {
    let Partition { groups, count, .. } = partition(dfa);
    let nsym = dfa.sigma().len();

    let mut states = vec![DfaState { accepting: false, initial: false, label: None }; count];
    let mut transitions = vec![0; count * nsym];
    let mut seen = vec![false; count];

    for (s, &g) in groups.iter().enumerate() {
        let state = &dfa.states()[s];
        states[g].accepting |= state.accepting;
        states[g].initial |= state.initial;
        if !seen[g] {
            seen[g] = true;
            for (j, &t) in dfa.row(s).iter().enumerate() {
                transitions[g * nsym + j] = groups[t];
            }
        }
    }

    Dfa::from_parts(dfa.sigma().to_vec(), states, transitions)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::nfa::Nfa;

    fn dfa_of(regex: &str) -> Dfa {
        let _ = env_logger::try_init();
        Dfa::nfa2dfa(&Nfa::re2nfa(regex).unwrap())
    }

    /// Every word over `alphabet` of length `0..=max`.
    fn words(alphabet: &[char], max: usize) -> Vec<String> {
        let mut all = vec![String::new()];
        let mut frontier = vec![String::new()];
        for _ in 0..max {
            frontier = frontier
                .iter()
                .flat_map(|w| alphabet.iter().map(move |&c| format!("{}{}", w, c)))
                .collect();
            all.extend(frontier.iter().cloned());
        }
        all
    }

    #[test]
    fn fully_accepting_collapses_to_one_state() {
        let dfa = dfa_of("(a|b)*");
        let p = partition(&dfa);
        assert_eq!(p.count, 1);
        assert_eq!(p.passes, 0);

        let min = minimize(&dfa);
        assert_eq!(min.len(), 1);
        assert!(min.states()[0].accepting);
        assert!(min.states()[0].initial);
        assert_eq!(min.transitions(), &[0, 0]);
    }

    #[test]
    fn single_symbol_keeps_three_classes() {
        let dfa = dfa_of("a");
        let min = minimize(&dfa);
        assert_eq!(min.len(), 3);
        assert_eq!(min.live_len(), 2);
        assert!(min.accepts("a"));
        assert!(!min.accepts("aa"));
    }

    #[test]
    fn redundant_states_are_merged() {
        // (a|b)*abb has the classic 4 live states once minimized.
        let dfa = dfa_of("(a|b)*abb");
        let min = minimize(&dfa);
        assert!(min.len() <= dfa.len());
        assert_eq!(min.len(), 4);
        assert!(min.accepts("abb"));
        assert!(min.accepts("babababb"));
        assert!(!min.accepts("abba"));
    }

    #[test]
    fn groups_are_dense_and_start_at_zero() {
        let dfa = dfa_of("1(0+1)*0");
        let p = partition(&dfa);
        assert_eq!(p.groups[0], 0);
        let max = *p.groups.iter().max().unwrap();
        assert_eq!(max + 1, p.count);
        assert!(p.passes <= dfa.len());
        for g in 0..p.count {
            assert!(p.groups.contains(&g));
        }
    }

    #[test]
    fn minimized_states_have_no_labels() {
        let min = dfa_of("ab").minimize();
        assert!(min.states().iter().all(|s| s.label.is_none()));
        assert_eq!(min.initial(), 0);
        assert_eq!(min.live_len(), 3);
    }

    #[test]
    fn more_than_ten_groups_stay_distinct() {
        let dfa = dfa_of("abcdefghijkl");
        assert_eq!(dfa.len(), 14);
        let p = partition(&dfa);
        assert_eq!(p.count, 14);
        assert!(p.passes <= dfa.len());

        let min = minimize(&dfa);
        assert_eq!(min.len(), 14);
        for word in &["abcdefghijkl", "abcdefghijk", "abcdefghijkla", "bcdefghijkl", "", "l"] {
            assert_eq!(min.accepts(word), dfa.accepts(word), "{:?}", word);
        }
        assert!(min.accepts("abcdefghijkl"));
    }

    #[test]
    fn fifth_symbol_from_the_end() {
        let dfa = dfa_of("(a|b)*a(a|b)(a|b)(a|b)(a|b)");
        let min = minimize(&dfa);
        assert_eq!(min.len(), 32);
        assert_eq!(partition(&dfa).count, 32);
        for word in words(&['a', 'b'], 8) {
            assert_eq!(min.accepts(&word), dfa.accepts(&word), "{:?}", word);
        }
        assert!(min.accepts("abbbb"));
        assert!(!min.accepts("abbbbb"));
    }
}
