use crate::machine::Dfa;

pub struct GvGraph {
    nodes: Vec<GvNode>,
    edges: Vec<GvEdge>,
}

impl GvGraph {
    fn new() -> Self {
        GvGraph {
            nodes: Vec::new(),
            edges: Vec::new(),
        }
    }
}

struct GvNode {
    label: String,
    peripheries: u8,
}

struct GvEdge {
    label: String,
    head: String,
    tail: String,
}

impl From<GvGraph> for String {
    fn from(graph: GvGraph) -> Self {
        let mut spec = String::new();

        // Begin a new graph definition.
        spec.push_str("digraph dfa {\n");
        spec.push_str("graph [center=true pad=.5];\n");
        spec.push_str("rankdir=LR;\n");

        for node in graph.nodes {
            spec.push_str(&format!(
                "{}[shape=circle,peripheries={}];\n",
                node.label, node.peripheries
            ));
        }

        for edge in graph.edges {
            spec.push_str(&format!(
                "{} -> {} [label=\"{}\"];\n",
                edge.head, edge.tail, edge.label
            ));
        }

        // Close the graph definition block.
        spec.push_str("}\n");

        spec
    }
}

impl From<&Dfa> for GvGraph {
    fn from(dfa: &Dfa) -> Self {
        let mut gv = GvGraph::new();
        let finals = dfa.get_final_states();

        for state in dfa.get_states() {
            // Double line for accepting states.
            let peripheries = match finals.contains(&state) {
                true => 2,
                false => 1,
            };

            // Each state gets a GvNode.
            gv.nodes.push(GvNode {
                label: state.name().into(),
                peripheries,
            });

            // Each defined transition gets a GvEdge, in alphabet order so that the
            // emitted buffer is deterministic.
            for &symbol in dfa.get_alphabet() {
                if let Some(to) = dfa.get_to_state(state.name(), symbol) {
                    gv.edges.push(GvEdge {
                        label: symbol.to_string(),
                        head: state.name().into(),
                        tail: to.name().into(),
                    });
                }
            }
        }

        gv
    }
}
