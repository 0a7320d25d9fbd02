use crate::registry::{State, StateId, StateRegistry};
use std::collections::{HashMap, HashSet};
use std::error::Error;
use std::fmt;
use tracing::{debug, info};

/// Errors surfaced by construction and query operations on a [Dfa].
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum DfaError {
    /// A transition referenced a state name that was never declared.
    UnknownState { name: String },
    /// Simulation reached a (state, symbol) pair with no destination.
    UndefinedTransition { state: String, symbol: char },
    /// Complement requires the transition function to be total over Q x Sigma.
    IncompleteAutomaton { state: String, symbol: char },
    /// A query ran before any start state was declared.
    MissingStartState,
}

impl fmt::Display for DfaError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DfaError::UnknownState { name } => write!(f, "unknown state {}", name),
            DfaError::UndefinedTransition { state, symbol } => {
                write!(f, "no transition from {} on {}", state, symbol)
            }
            DfaError::IncompleteAutomaton { state, symbol } => write!(
                f,
                "transition function is not total, missing ({}, {})",
                state, symbol
            ),
            DfaError::MissingStartState => write!(f, "no start state declared"),
        }
    }
}

impl Error for DfaError {}

/// Describes a DFA as the five-tuple (Q, Sigma, delta, q0, F).
///
/// States are declared by name through [add_start_state](Dfa::add_start_state),
/// [add_state](Dfa::add_state) and [add_final_state](Dfa::add_final_state); the
/// transition function is filled in with [add_transition](Dfa::add_transition). Once
/// built, the automaton is queried through `&self` methods only.
///
/// # Examples
///
/// ```
/// use rust_dfa::machine::Dfa;
///
/// // Accepts strings over {a, b} that end in b.
/// let mut dfa = Dfa::new();
/// dfa.add_start_state("s0");
/// dfa.add_final_state("s1");
/// dfa.add_transition("s0", 'a', "s0").unwrap();
/// dfa.add_transition("s0", 'b', "s1").unwrap();
/// dfa.add_transition("s1", 'a', "s0").unwrap();
/// dfa.add_transition("s1", 'b', "s1").unwrap();
///
/// assert!(dfa.accepts("ab").unwrap());
/// assert!(!dfa.accepts("ba").unwrap());
/// ```
#[derive(Clone, Debug, Default)]
pub struct Dfa {
    registry: StateRegistry,

    // Alphabet symbols in first-use order. Order only matters for rendering.
    alphabet: Vec<char>,

    // The transition function delta, kept outside the states themselves so that state
    // identity stays immutable while the table is filled in.
    delta: HashMap<(StateId, char), StateId>,

    start: Option<StateId>,
    finals: HashSet<StateId>,
}

impl Dfa {
    /// Creates an automaton with no states, an empty alphabet and no transitions.
    pub fn new() -> Self {
        Dfa::default()
    }

    /// Declares `name` and makes it the start state.
    ///
    /// Calling this again replaces the start state; the previous one stays in Q.
    pub fn add_start_state(&mut self, name: &str) {
        info!("set start state {}", name);
        let id = self.registry.declare(name);
        self.start = Some(id);
    }

    /// Declares `name` as an ordinary member of Q.
    pub fn add_state(&mut self, name: &str) {
        info!("add state {}", name);
        self.registry.declare(name);
    }

    /// Declares `name` and marks it as accepting.
    pub fn add_final_state(&mut self, name: &str) {
        info!("mark state {} as accepting", name);
        let id = self.registry.declare(name);
        self.finals.insert(id);
    }

    /// Records delta(`from_state`, `on_symb`) = `to_state`, adding `on_symb` to the
    /// alphabet if it is new. A repeated call for the same (state, symbol) pair
    /// overwrites the earlier destination.
    ///
    /// Both endpoints must have been declared; otherwise the call fails with
    /// [DfaError::UnknownState] and the automaton is left untouched.
    pub fn add_transition(
        &mut self,
        from_state: &str,
        on_symb: char,
        to_state: &str,
    ) -> Result<(), DfaError> {
        let from = self
            .registry
            .lookup(from_state)
            .ok_or_else(|| DfaError::UnknownState {
                name: from_state.into(),
            })?;
        let to = self
            .registry
            .lookup(to_state)
            .ok_or_else(|| DfaError::UnknownState {
                name: to_state.into(),
            })?;

        // Sigma must not grow before both endpoints have resolved.
        if !self.alphabet.contains(&on_symb) {
            self.alphabet.push(on_symb);
        }

        info!("add transition {} --{}--> {}", from_state, on_symb, to_state);
        self.delta.insert((from, on_symb), to);
        Ok(())
    }

    /// All states Q, in declaration order.
    pub fn get_states(&self) -> &[State] {
        self.registry.states()
    }

    /// The accepting states F, in declaration order.
    pub fn get_final_states(&self) -> Vec<&State> {
        self.registry
            .ids()
            .filter(|id| self.finals.contains(id))
            .map(|id| self.registry.get(id))
            .collect()
    }

    /// The alphabet Sigma, in first-use order.
    pub fn get_alphabet(&self) -> &[char] {
        &self.alphabet
    }

    /// The start state q0, if one was declared.
    pub fn get_start_state(&self) -> Option<&State> {
        self.start.map(|id| self.registry.get(id))
    }

    /// Resolves delta(`from_state`, `on_symb`).
    pub fn get_to_state(&self, from_state: &str, on_symb: char) -> Option<&State> {
        let from = self.registry.lookup(from_state)?;
        self.delta
            .get(&(from, on_symb))
            .map(|&id| self.registry.get(id))
    }

    /// Checks whether `input` belongs to the language of this automaton.
    ///
    /// The empty string is accepted iff the start state is accepting. Reaching a
    /// (state, symbol) pair with no destination aborts the run with
    /// [DfaError::UndefinedTransition]; a symbol outside the alphabet is reported the
    /// same way, since the run cannot continue in either case.
    pub fn accepts(&self, input: &str) -> Result<bool, DfaError> {
        let mut current = self.start.ok_or(DfaError::MissingStartState)?;
        info!("run input {:?} from {}", input, self.registry.get(current));

        for symbol in input.chars() {
            let next = self.delta.get(&(current, symbol)).copied().ok_or_else(|| {
                DfaError::UndefinedTransition {
                    state: self.registry.get(current).name().into(),
                    symbol,
                }
            })?;

            debug!(
                "{} --{}--> {}",
                self.registry.get(current),
                symbol,
                self.registry.get(next)
            );
            current = next;
        }

        let accepted = self.finals.contains(&current);
        debug!("halted in {}, accepted: {}", self.registry.get(current), accepted);
        Ok(accepted)
    }

    /// True iff delta is defined for every (state, symbol) pair in Q x Sigma.
    pub fn is_total(&self) -> bool {
        self.first_missing_pair().is_none()
    }

    // First hole in the transition table, scanning states in declaration order and
    // symbols in alphabet order.
    fn first_missing_pair(&self) -> Option<(StateId, char)> {
        for id in self.registry.ids() {
            for &symbol in &self.alphabet {
                if !self.delta.contains_key(&(id, symbol)) {
                    return Some((id, symbol));
                }
            }
        }

        None
    }

    /// Returns a new automaton accepting the complement language.
    ///
    /// The result shares Q, Sigma, delta and q0 with `self`; only the accepting set is
    /// inverted to Q \ F. The transition function must be total, otherwise swapping the
    /// accepting set would not flip the language and the call fails with
    /// [DfaError::IncompleteAutomaton].
    pub fn complement(&self) -> Result<Dfa, DfaError> {
        let start = self.start.ok_or(DfaError::MissingStartState)?;

        if let Some((id, symbol)) = self.first_missing_pair() {
            return Err(DfaError::IncompleteAutomaton {
                state: self.registry.get(id).name().into(),
                symbol,
            });
        }

        info!("complement automaton with {} states", self.registry.len());
        let finals = self
            .registry
            .ids()
            .filter(|id| !self.finals.contains(id))
            .collect();

        Ok(Dfa {
            registry: self.registry.clone(),
            alphabet: self.alphabet.clone(),
            delta: self.delta.clone(),
            start: Some(start),
            finals,
        })
    }
}

/// Renders the five-tuple as a labeled report: the state set, the alphabet, the
/// transition table as a grid (rows are states, columns are alphabet symbols, `-` marks
/// an undefined pair), the start state and the accepting set.
impl fmt::Display for Dfa {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Q = {{ ")?;
        for state in self.registry.states() {
            write!(f, "{} ", state)?;
        }
        writeln!(f, "}}")?;

        write!(f, "Sigma = {{ ")?;
        for symbol in &self.alphabet {
            write!(f, "{} ", symbol)?;
        }
        writeln!(f, "}}")?;

        writeln!(f, "delta =")?;
        write!(f, "\t")?;
        for symbol in &self.alphabet {
            write!(f, "\t{}", symbol)?;
        }
        writeln!(f)?;

        for id in self.registry.ids() {
            write!(f, "\t{}", self.registry.get(id))?;
            for &symbol in &self.alphabet {
                match self.delta.get(&(id, symbol)) {
                    Some(&to) => write!(f, "\t{}", self.registry.get(to))?,
                    None => write!(f, "\t-")?,
                }
            }
            writeln!(f)?;
        }

        write!(f, "q0 = {{ ")?;
        if let Some(start) = self.start {
            write!(f, "{} ", self.registry.get(start))?;
        }
        writeln!(f, "}}")?;

        write!(f, "F = {{ ")?;
        for state in self.get_final_states() {
            write!(f, "{} ", state)?;
        }
        write!(f, "}}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // The parity automaton over {0, 1}: accepts words with an odd number of 1s.
    fn parity_dfa() -> Dfa {
        let mut dfa = Dfa::new();
        dfa.add_start_state("q0");
        dfa.add_final_state("q1");
        dfa.add_transition("q0", '0', "q0").unwrap();
        dfa.add_transition("q0", '1', "q1").unwrap();
        dfa.add_transition("q1", '0', "q1").unwrap();
        dfa.add_transition("q1", '1', "q0").unwrap();
        dfa
    }

    #[test_log::test]
    fn accepts_odd_number_of_ones() {
        let dfa = parity_dfa();

        assert!(dfa.accepts("1").unwrap());
        assert!(!dfa.accepts("11").unwrap());
        assert!(!dfa.accepts("").unwrap());
        assert!(dfa.accepts("010").unwrap());
        assert!(!dfa.accepts("0110").unwrap());
    }

    #[test]
    fn empty_word_follows_start_state_membership() {
        let mut dfa = parity_dfa();
        assert!(!dfa.accepts("").unwrap());

        // Last declaration wins; q1 is accepting.
        dfa.add_start_state("q1");
        assert!(dfa.accepts("").unwrap());
    }

    #[test]
    fn unknown_state_is_rejected_without_mutation() {
        let mut dfa = Dfa::new();
        dfa.add_start_state("q0");

        let err = dfa.add_transition("q0", '0', "qX").unwrap_err();
        assert_eq!(err, DfaError::UnknownState { name: "qX".into() });

        let err = dfa.add_transition("qY", '0', "q0").unwrap_err();
        assert_eq!(err, DfaError::UnknownState { name: "qY".into() });

        // The failed calls must not have grown Sigma or delta.
        assert!(dfa.get_alphabet().is_empty());
        assert!(dfa.get_to_state("q0", '0').is_none());
        assert_eq!(dfa.get_states().len(), 1);
    }

    #[test_log::test]
    fn partial_automaton_fails_simulation_and_complement() {
        let mut dfa = Dfa::new();
        dfa.add_start_state("q0");
        dfa.add_final_state("q1");
        dfa.add_transition("q0", '1', "q1").unwrap();
        dfa.add_transition("q0", '0', "q0").unwrap();
        dfa.add_transition("q1", '0', "q1").unwrap();

        // delta(q1, 1) is missing.
        assert!(!dfa.is_total());
        assert_eq!(
            dfa.accepts("11").unwrap_err(),
            DfaError::UndefinedTransition {
                state: "q1".into(),
                symbol: '1'
            }
        );
        assert_eq!(
            dfa.complement().unwrap_err(),
            DfaError::IncompleteAutomaton {
                state: "q1".into(),
                symbol: '1'
            }
        );

        dfa.add_transition("q1", '1', "q0").unwrap();
        assert!(dfa.is_total());
        assert!(dfa.complement().is_ok());
    }

    #[test]
    fn out_of_alphabet_symbol_is_an_undefined_transition() {
        let dfa = parity_dfa();

        assert_eq!(
            dfa.accepts("2").unwrap_err(),
            DfaError::UndefinedTransition {
                state: "q0".into(),
                symbol: '2'
            }
        );
    }

    #[test]
    fn complement_flips_every_verdict() {
        let dfa = parity_dfa();
        let complement = dfa.complement().unwrap();

        for word in ["", "0", "1", "01", "11", "010", "0110", "111"] {
            assert_ne!(
                dfa.accepts(word).unwrap(),
                complement.accepts(word).unwrap(),
                "word {:?}",
                word
            );
        }

        assert!(!complement.accepts("1").unwrap());
        assert!(complement.accepts("").unwrap());
    }

    #[test]
    fn complement_is_an_involution() {
        let dfa = parity_dfa();
        let back = dfa.complement().unwrap().complement().unwrap();

        for word in ["", "0", "1", "10", "110", "1001"] {
            assert_eq!(dfa.accepts(word).unwrap(), back.accepts(word).unwrap());
        }
    }

    #[test]
    fn complement_preserves_states_alphabet_and_start() {
        let dfa = parity_dfa();
        let complement = dfa.complement().unwrap();

        assert_eq!(dfa.get_states(), complement.get_states());
        assert_eq!(dfa.get_alphabet(), complement.get_alphabet());
        assert_eq!(dfa.get_start_state(), complement.get_start_state());

        let names: Vec<_> = complement
            .get_final_states()
            .iter()
            .map(|state| state.name())
            .collect();
        assert_eq!(names, ["q0"]);

        // The original is untouched.
        assert_eq!(
            dfa.get_final_states()
                .iter()
                .map(|state| state.name())
                .collect::<Vec<_>>(),
            ["q1"]
        );
    }

    #[test]
    fn state_collections_are_consistent() {
        let dfa = parity_dfa();
        let states = dfa.get_states();

        assert!(dfa
            .get_final_states()
            .iter()
            .all(|state| states.contains(*state)));
        assert!(states.contains(dfa.get_start_state().unwrap()));
    }

    #[test]
    fn repeated_transition_overwrites() {
        let mut dfa = Dfa::new();
        dfa.add_start_state("q0");
        dfa.add_state("q1");
        dfa.add_transition("q0", 'a', "q0").unwrap();
        dfa.add_transition("q0", 'a', "q1").unwrap();

        assert_eq!(dfa.get_to_state("q0", 'a').unwrap().name(), "q1");
        assert_eq!(dfa.get_to_state("q0", 'a').unwrap().name(), "q1");
        assert_eq!(dfa.get_alphabet(), &['a']);
    }

    #[test]
    fn missing_start_state_is_reported() {
        let mut dfa = Dfa::new();
        dfa.add_state("q0");

        assert!(dfa.get_start_state().is_none());
        assert_eq!(dfa.accepts("").unwrap_err(), DfaError::MissingStartState);
        assert_eq!(dfa.complement().unwrap_err(), DfaError::MissingStartState);
    }

    #[test]
    fn renders_the_five_tuple() {
        let dfa = parity_dfa();

        let expected = "Q = { q0 q1 }\n\
                        Sigma = { 0 1 }\n\
                        delta =\n\
                        \t\t0\t1\n\
                        \tq0\tq0\tq1\n\
                        \tq1\tq1\tq0\n\
                        q0 = { q0 }\n\
                        F = { q1 }";
        assert_eq!(dfa.to_string(), expected);
    }

    #[test]
    fn renders_undefined_transitions_with_a_marker() {
        let mut dfa = Dfa::new();
        dfa.add_start_state("q0");
        dfa.add_state("q1");
        dfa.add_transition("q0", 'a', "q1").unwrap();

        let report = dfa.to_string();
        assert!(report.contains("\tq1\t-"));
        assert!(report.contains("F = { }"));
    }
}
