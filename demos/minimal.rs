use rust_dfa::machine::Dfa;

fn main() {
    // Prints INFO events to STDOUT.
    tracing_subscriber::fmt::init();

    // A DFA over {0, 1} accepting every string with an odd number of 1s.
    let mut dfa = Dfa::new();
    dfa.add_start_state("q0");
    dfa.add_final_state("q1");
    dfa.add_transition("q0", '0', "q0").unwrap();
    dfa.add_transition("q0", '1', "q1").unwrap();
    dfa.add_transition("q1", '0', "q1").unwrap();
    dfa.add_transition("q1", '1', "q0").unwrap();

    assert!(dfa.accepts("1").unwrap());
    assert!(!dfa.accepts("11").unwrap());
    assert!(!dfa.accepts("").unwrap());

    println!("{}", dfa);

    // The complement accepts exactly the strings the original rejects.
    let complement = dfa.complement().unwrap();
    assert!(!complement.accepts("1").unwrap());
    assert!(complement.accepts("").unwrap());

    println!("{}", complement);
}
