use crate::pattern::{NodeKind, Pattern, PatternNode, Quantifier};
use std::collections::HashSet;
use std::iter::Peekable;
use std::str::{Chars, FromStr};
use thiserror::Error;

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum PatternSyntaxError {
    #[error("unmatched '(' in pattern")]
    UnmatchedOpenParen,
    #[error("unexpected ')' in pattern")]
    UnexpectedCloseParen,
    #[error("unterminated '[' character class")]
    UnterminatedClass,
    #[error("empty character class")]
    EmptyClass,
    #[error("unterminated escape at end of pattern")]
    UnterminatedEscape,
    #[error("quantifier '{0}' has nothing to repeat")]
    DanglingQuantifier(char),
    #[error("quantifier '{0}' follows another quantifier")]
    DuplicateQuantifier(char),
    #[error("'|' outside a group is not supported")]
    TopLevelAlternation,
}

pub fn parse_pattern(s: &str) -> Result<Pattern, PatternSyntaxError> {
    Pattern::from_str(s)
}

impl FromStr for Pattern {
    type Err = PatternSyntaxError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.chars().peekable();
        let mut alternatives = parse_alternation(&mut chars, false)?;
        // '|' is rejected outside groups, so the top level holds exactly
        // one alternative.
        let nodes = alternatives.pop().unwrap_or_default();
        Ok(Pattern { nodes })
    }
}

// Parses a run of '|'-separated sequences up to the matching ')' (inside
// a group) or the end of the pattern (top level). One forward cursor, no
// parse-time backtracking; groups recurse through this same routine.
fn parse_alternation(
    chars: &mut Peekable<Chars>,
    in_group: bool,
) -> Result<Vec<Vec<PatternNode>>, PatternSyntaxError> {
    let mut alternatives = Vec::new();
    let mut current: Vec<PatternNode> = Vec::new();

    while let Some(c) = chars.next() {
        match c {
            ')' => {
                if !in_group {
                    return Err(PatternSyntaxError::UnexpectedCloseParen);
                }
                alternatives.push(current);
                return Ok(alternatives);
            }
            '|' => {
                if !in_group {
                    return Err(PatternSyntaxError::TopLevelAlternation);
                }
                alternatives.push(std::mem::take(&mut current));
            }
            '(' => {
                let inner = parse_alternation(chars, true)?;
                current.push(PatternNode::new(NodeKind::Group(inner)));
            }
            '[' => current.push(PatternNode::new(parse_class(chars)?)),
            '\\' => {
                let kind = match chars.next() {
                    Some('d') => NodeKind::digit_class(),
                    Some('w') => NodeKind::word_class(),
                    // Unsupported escapes fall back to the escaped literal.
                    Some(escaped) => NodeKind::Literal(escaped),
                    None => return Err(PatternSyntaxError::UnterminatedEscape),
                };
                current.push(PatternNode::new(kind));
            }
            '.' => current.push(PatternNode::new(NodeKind::Wildcard)),
            '^' => {
                // Start anchor only at the head of the sequence being
                // parsed; a '^' later on is an ordinary literal.
                if current.is_empty() {
                    current.push(PatternNode::new(NodeKind::AnchorStart));
                } else {
                    current.push(PatternNode::new(NodeKind::Literal('^')));
                }
            }
            '$' => {
                // End anchor only when it terminates the current sequence.
                let kind = match chars.peek() {
                    None | Some(&')') | Some(&'|') => NodeKind::AnchorEnd,
                    Some(_) => NodeKind::Literal('$'),
                };
                current.push(PatternNode::new(kind));
            }
            '+' => attach_quantifier(&mut current, Quantifier::OneOrMore, '+')?,
            '?' => attach_quantifier(&mut current, Quantifier::ZeroOrOne, '?')?,
            other => current.push(PatternNode::new(NodeKind::Literal(other))),
        }
    }

    if in_group {
        return Err(PatternSyntaxError::UnmatchedOpenParen);
    }
    alternatives.push(current);
    Ok(alternatives)
}

fn parse_class(chars: &mut Peekable<Chars>) -> Result<NodeKind, PatternSyntaxError> {
    let negated = chars.peek() == Some(&'^');
    if negated {
        chars.next();
    }
    let mut members = HashSet::new();
    loop {
        match chars.next() {
            Some(']') => break,
            Some(member) => {
                members.insert(member);
            }
            None => return Err(PatternSyntaxError::UnterminatedClass),
        }
    }
    if members.is_empty() {
        return Err(PatternSyntaxError::EmptyClass);
    }
    Ok(NodeKind::CharClass { members, negated })
}

fn attach_quantifier(
    current: &mut Vec<PatternNode>,
    quantifier: Quantifier,
    symbol: char,
) -> Result<(), PatternSyntaxError> {
    let node = current
        .last_mut()
        .ok_or(PatternSyntaxError::DanglingQuantifier(symbol))?;
    if node.quantifier.is_some() {
        return Err(PatternSyntaxError::DuplicateQuantifier(symbol));
    }
    // Quantifiers never attach to anchors; '^+' means a repeated literal
    // caret. A '$' followed by anything is already parsed as a literal.
    if node.kind == NodeKind::AnchorStart {
        node.kind = NodeKind::Literal('^');
    }
    node.quantifier = Some(quantifier);
    Ok(())
}
