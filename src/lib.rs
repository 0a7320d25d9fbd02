//! # Deterministic Finite Automaton (DFA)
//!
//! `rust_dfa` provides a Rust implementation of the DFA as defined in \[1\]. A DFA
//! defines a language by __accepting__ and __rejecting__ different input strings called
//! words. Automata are assembled incrementally through the mutators on
//! [Dfa](machine::Dfa) and then queried with [accepts](machine::Dfa::accepts) and
//! [complement](machine::Dfa::complement).
//!
//! # References
//!
//! \[1\] Sipser, M. Introduction to the Theory of Computation.

pub mod gviz;
pub mod machine;
pub mod registry;
