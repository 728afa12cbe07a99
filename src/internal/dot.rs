//! Graphviz output of pattern automata, used for debugging.

use std::io::Write;

use dot_writer::{Attributes, Color, DotWriter, RankDirection, Shape};

use super::{nfa::Nfa, StateID, TokenTestRegistry};

/// Writes the NFA of one pattern in graphviz dot format.
/// The start state is drawn blue, the end state red. Negated token tests are prefixed with `!`.
pub(crate) fn nfa_render<W: Write>(
    nfa: &Nfa,
    label: &str,
    token_test_registry: &TokenTestRegistry,
    output: &mut W,
) {
    let mut writer = DotWriter::from(output);
    writer.set_pretty_print(true);
    let mut digraph = writer.digraph();
    digraph
        .set_label(label)
        .set_rank_direction(RankDirection::LeftRight);
    let node_name = |state: StateID| format!("node_{}", state.as_usize());

    for state in nfa.states() {
        let source = {
            let mut node = digraph.node_auto();
            node.set_label(&state.id().to_string());
            let highlight = if state.id() == nfa.start_state() {
                Some(Color::Blue)
            } else if state.id() == nfa.end_state() {
                Some(Color::Red)
            } else {
                None
            };
            if let Some(color) = highlight {
                node.set_shape(Shape::Circle)
                    .set_color(color)
                    .set_pen_width(3.0);
            }
            node.id()
        };

        for transition in state.transitions() {
            let test = token_test_registry
                .get_token_test(transition.test())
                .map_or_else(|| "-".to_string(), ToString::to_string);
            let prefix = if transition.negated() { "!" } else { "" };
            digraph
                .edge(source.clone(), &node_name(transition.target_state()))
                .attributes()
                .set_label(&format!("{prefix}{}", test.escape_default()));
        }
        for epsilon in state.epsilon_transitions() {
            digraph
                .edge(source.clone(), &node_name(epsilon.target_state()))
                .attributes()
                .set_label("ε");
        }
    }
}
