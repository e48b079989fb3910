//! Backtracking matcher over a parsed [`Pattern`].
//!
//! Matching is a recursive search returning the set of byte offsets a
//! match can end at; the empty set is "no match", never an error. Greedy
//! quantifiers consume as much as they can and give input back one unit
//! at a time when the remainder fails. A `+` nested inside a
//! `+`-quantified group can make this search exponential on pathological
//! inputs; the restricted grammar keeps that out of ordinary use and no
//! artificial bound is applied.

use crate::pattern::{NodeKind, Pattern, PatternNode, Quantifier};
use std::collections::BTreeSet;

pub struct Matcher;

impl Matcher {
    /// True iff any line of `input` matches. Empty input is one empty line.
    pub fn match_str(pattern: &Pattern, input: &str) -> bool {
        if input.is_empty() {
            return Self::match_line(pattern, "");
        }
        input.lines().any(|line| {
            let matched = Self::match_line(pattern, line);
            log::trace!("line {:?}: {}", line, matched);
            matched
        })
    }

    /// Tries every start offset, or only offset 0 for a `^`-anchored
    /// pattern. An `$` anchor needs no handling here: as the last node it
    /// restricts the end sets computed by [`Matcher::match_at`].
    pub fn match_line(pattern: &Pattern, line: &str) -> bool {
        let nodes = pattern.nodes.as_slice();
        let anchored = matches!(
            nodes.first(),
            Some(PatternNode {
                kind: NodeKind::AnchorStart,
                ..
            })
        );
        if anchored {
            return !Self::match_at(nodes, line, 0).is_empty();
        }
        Self::start_offsets(line).any(|start| !Self::match_at(nodes, line, start).is_empty())
    }

    /// Offsets in `text` where a match of `nodes` beginning at `start`
    /// can end; empty means no match from that start. Offsets are always
    /// char boundaries.
    pub fn match_at(nodes: &[PatternNode], text: &str, start: usize) -> BTreeSet<usize> {
        let Some((node, rest)) = nodes.split_first() else {
            return BTreeSet::from([start]);
        };

        match (&node.kind, node.quantifier) {
            (NodeKind::AnchorStart, _) => {
                if start == 0 {
                    Self::match_at(rest, text, start)
                } else {
                    BTreeSet::new()
                }
            }
            (NodeKind::AnchorEnd, _) => {
                if start == text.len() {
                    Self::match_at(rest, text, start)
                } else {
                    BTreeSet::new()
                }
            }
            (NodeKind::Group(alternatives), quantifier) => match quantifier {
                None => Self::match_group_once(alternatives, rest, text, start),
                Some(Quantifier::ZeroOrOne) => {
                    let consumed = Self::match_group_once(alternatives, rest, text, start);
                    if !consumed.is_empty() {
                        consumed
                    } else {
                        Self::match_at(rest, text, start)
                    }
                }
                Some(Quantifier::OneOrMore) => {
                    Self::match_group_repeated(alternatives, rest, text, start)
                }
            },
            (kind, None) => match Self::consume_char(kind, text, start) {
                Some(next) => Self::match_at(rest, text, next),
                None => BTreeSet::new(),
            },
            (kind, Some(Quantifier::ZeroOrOne)) => {
                // One occurrence first (greedy bias), zero as the fallback.
                if let Some(next) = Self::consume_char(kind, text, start) {
                    let ends = Self::match_at(rest, text, next);
                    if !ends.is_empty() {
                        return ends;
                    }
                }
                Self::match_at(rest, text, start)
            }
            (kind, Some(Quantifier::OneOrMore)) => {
                // Take the longest consecutive run, then release one
                // character at a time until the remainder matches. The
                // run may not shrink below one occurrence.
                let mut stops = Vec::new();
                let mut pos = start;
                while let Some(next) = Self::consume_char(kind, text, pos) {
                    stops.push(next);
                    pos = next;
                }
                for stop in stops.into_iter().rev() {
                    let ends = Self::match_at(rest, text, stop);
                    if !ends.is_empty() {
                        return ends;
                    }
                }
                BTreeSet::new()
            }
        }
    }

    // Alternatives in declared order; the first one that still lets the
    // remainder match wins. The remainder is threaded through each
    // alternative's end offsets, never matched in isolation.
    fn match_group_once(
        alternatives: &[Vec<PatternNode>],
        rest: &[PatternNode],
        text: &str,
        start: usize,
    ) -> BTreeSet<usize> {
        for alternative in alternatives {
            let stops = Self::match_at(alternative, text, start);
            let mut ends = BTreeSet::new();
            for &stop in stops.iter().rev() {
                ends.extend(Self::match_at(rest, text, stop));
            }
            if !ends.is_empty() {
                return ends;
            }
        }
        BTreeSet::new()
    }

    // One-or-more passes through the group. The repetition unit is a full
    // pass through one alternative: collect every offset reachable by at
    // least one pass, then retry the remainder at those offsets longest
    // first, keeping the greedy-then-backtrack order of single tokens.
    fn match_group_repeated(
        alternatives: &[Vec<PatternNode>],
        rest: &[PatternNode],
        text: &str,
        start: usize,
    ) -> BTreeSet<usize> {
        let mut reachable = BTreeSet::new();
        let mut frontier: Vec<usize> = Vec::new();
        for alternative in alternatives {
            for stop in Self::match_at(alternative, text, start) {
                if reachable.insert(stop) {
                    frontier.push(stop);
                }
            }
        }
        while let Some(pos) = frontier.pop() {
            for alternative in alternatives {
                for stop in Self::match_at(alternative, text, pos) {
                    if reachable.insert(stop) {
                        frontier.push(stop);
                    }
                }
            }
        }
        for &stop in reachable.iter().rev() {
            let ends = Self::match_at(rest, text, stop);
            if !ends.is_empty() {
                return ends;
            }
        }
        BTreeSet::new()
    }

    fn consume_char(kind: &NodeKind, text: &str, pos: usize) -> Option<usize> {
        let c = text[pos..].chars().next()?;
        Self::matches_char(kind, c).then(|| pos + c.len_utf8())
    }

    fn matches_char(kind: &NodeKind, c: char) -> bool {
        match kind {
            NodeKind::Literal(l) => c == *l,
            NodeKind::Wildcard => c != '\n',
            NodeKind::CharClass { members, negated } => members.contains(&c) != *negated,
            // Groups and anchors never consume a single character here.
            NodeKind::Group(_) | NodeKind::AnchorStart | NodeKind::AnchorEnd => false,
        }
    }

    fn start_offsets(line: &str) -> impl Iterator<Item = usize> + '_ {
        line.char_indices()
            .map(|(i, _)| i)
            .chain(std::iter::once(line.len()))
    }
}
