use rust_dfa::gviz::GvGraph;
use rust_dfa::machine::Dfa;
use std::fs::write;

fn main() {
    tracing_subscriber::fmt::init();

    // A DFA over {0, 1} accepting every string with an even number of 0s.
    let mut dfa = Dfa::new();
    dfa.add_start_state("even");
    dfa.add_final_state("even");
    dfa.add_state("odd");
    dfa.add_transition("even", '0', "odd").unwrap();
    dfa.add_transition("even", '1', "even").unwrap();
    dfa.add_transition("odd", '0', "even").unwrap();
    dfa.add_transition("odd", '1', "odd").unwrap();

    write("out.gv", String::from(GvGraph::from(&dfa))).unwrap();
}
