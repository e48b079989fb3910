use std::collections::HashSet;

// Quantifier tag carried by a node; absence means "exactly once".
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Quantifier {
    OneOrMore,
    ZeroOrOne,
}

// The closed set of pattern elements the matcher dispatches over.
#[derive(Clone, Debug, PartialEq)]
pub enum NodeKind {
    Literal(char),
    Wildcard,
    CharClass {
        members: HashSet<char>,
        negated: bool,
    },
    // Each inner vec is one '|'-alternative, in declared order.
    Group(Vec<Vec<PatternNode>>),
    AnchorStart,
    AnchorEnd,
}

impl NodeKind {
    /// Predefined class for the `\d` escape.
    pub fn digit_class() -> NodeKind {
        NodeKind::CharClass {
            members: ('0'..='9').collect(),
            negated: false,
        }
    }

    /// Predefined class for the `\w` escape: ASCII alphanumerics plus underscore.
    pub fn word_class() -> NodeKind {
        let members = ('0'..='9')
            .chain('a'..='z')
            .chain('A'..='Z')
            .chain(std::iter::once('_'))
            .collect();
        NodeKind::CharClass {
            members,
            negated: false,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct PatternNode {
    pub kind: NodeKind,
    pub quantifier: Option<Quantifier>,
}

impl PatternNode {
    pub fn new(kind: NodeKind) -> PatternNode {
        PatternNode {
            kind,
            quantifier: None,
        }
    }
}

/// A compiled pattern: the top-level node sequence. Built once per
/// invocation and immutable afterwards; an empty sequence matches
/// everything.
#[derive(Clone, Debug, PartialEq)]
pub struct Pattern {
    pub nodes: Vec<PatternNode>,
}
