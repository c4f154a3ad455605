//! T-unit segmentation
//!
//! A T-unit (minimal terminable unit, Hunt 1970) is one main clause plus every
//! clause subordinate to it. Main clauses are sentence roots and verbs
//! coordinated with a main clause through `conj`. Each coordinated main clause
//! opens a new T-unit at the leftmost token of its subtree; the previous unit
//! ends just before it (so a coordinator like "and" stays with the first unit).

use super::syntax::{DepEdge, DepRelation, Sentence};
use super::token::Token;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashMap, HashSet};
use std::ops::Range;

/// Kind of dependent clause counted against a T-unit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClauseKind {
    Adverbial,
    Relative,
    Complement,
    OpenComplement,
    Adnominal,
}

impl ClauseKind {
    pub fn from_relation(relation: &DepRelation) -> Option<Self> {
        match relation {
            DepRelation::Advcl => Some(Self::Adverbial),
            DepRelation::Relcl => Some(Self::Relative),
            DepRelation::Ccomp => Some(Self::Complement),
            DepRelation::Xcomp => Some(Self::OpenComplement),
            DepRelation::Acl => Some(Self::Adnominal),
            _ => None,
        }
    }
}

/// One T-unit of a document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TUnit {
    /// Token index range, always inside one sentence
    pub tokens: Range<usize>,
    /// Index of the sentence this unit belongs to
    pub sentence: usize,
    /// Word tokens in the unit
    pub word_count: usize,
    /// Dependent clauses attached inside the unit, in token order
    pub clauses: Vec<ClauseKind>,
}

impl TUnit {
    pub fn dependent_clause_count(&self) -> usize {
        self.clauses.len()
    }
}

/// Segment every sentence into T-units.
///
/// Sentences without any word token yield no T-unit. A sentence whose
/// backend produced no root arc is treated as a single T-unit.
pub fn derive_t_units(tokens: &[Token], sentences: &[Sentence], edges: &[DepEdge]) -> Vec<TUnit> {
    let mut incoming: HashMap<usize, &DepEdge> = HashMap::new();
    let mut graph = Arcs::default();
    for edge in edges {
        incoming.entry(edge.dependent).or_insert(edge);
        if edge.relation == DepRelation::Root {
            graph.roots.insert(edge.dependent);
        }
        if edge.head != edge.dependent {
            graph.children.entry(edge.head).or_default().push(edge.dependent);
            if edge.relation == DepRelation::Conj {
                graph.conjuncts.entry(edge.head).or_default().push(edge.dependent);
            }
        }
    }

    let mut units = Vec::new();
    for (sentence_idx, sentence) in sentences.iter().enumerate() {
        let range = sentence.tokens.clone();
        let boundaries = unit_boundaries(tokens, &range, &graph);

        for (i, &start) in boundaries.iter().enumerate() {
            let end = boundaries.get(i + 1).copied().unwrap_or(range.end);
            let span = start..end;

            let word_count = tokens[span.clone()].iter().filter(|t| t.is_word()).count();
            if word_count == 0 {
                continue;
            }

            let clauses = span
                .clone()
                .filter_map(|idx| incoming.get(&idx))
                .filter(|edge| edge.head != edge.dependent)
                .filter_map(|edge| ClauseKind::from_relation(&edge.relation))
                .collect();

            units.push(TUnit {
                tokens: span,
                sentence: sentence_idx,
                word_count,
                clauses,
            });
        }
    }
    units
}

/// Document arcs indexed by head
#[derive(Default)]
struct Arcs {
    roots: HashSet<usize>,
    children: HashMap<usize, Vec<usize>>,
    conjuncts: HashMap<usize, Vec<usize>>,
}

/// Start indices of the T-units of one sentence, ascending, first = sentence start.
fn unit_boundaries(tokens: &[Token], range: &Range<usize>, graph: &Arcs) -> Vec<usize> {
    let mut main_heads: BTreeSet<usize> = range.clone().filter(|i| graph.roots.contains(i)).collect();

    // Close over verbal conjuncts of main clauses
    let mut frontier: Vec<usize> = main_heads.iter().copied().collect();
    while let Some(head) = frontier.pop() {
        if !tokens[head].pos.is_verbal() {
            continue;
        }
        for &conjunct in graph.conjuncts.get(&head).into_iter().flatten() {
            if range.contains(&conjunct)
                && tokens[conjunct].pos.is_verbal()
                && main_heads.insert(conjunct)
            {
                frontier.push(conjunct);
            }
        }
    }

    let leftmost = leftmost_descendants(range, &graph.children);
    let mut boundaries = vec![range.start];
    for &head in main_heads.iter().skip(1) {
        let start = leftmost.get(&head).copied().unwrap_or(head);
        let last = boundaries.last().copied().unwrap_or(range.start);
        if start > last && start <= head {
            boundaries.push(start);
        }
    }
    boundaries
}

/// Leftmost token in the subtree of every token of the sentence, in one
/// post-order pass. Arcs leaving the sentence are ignored; an arc back into a
/// subtree still being walked is skipped.
fn leftmost_descendants(range: &Range<usize>, children: &HashMap<usize, Vec<usize>>) -> HashMap<usize, usize> {
    let kids = move |node: usize| {
        children
            .get(&node)
            .into_iter()
            .flatten()
            .copied()
            .filter(move |k| range.contains(k))
    };

    let mut leftmost: HashMap<usize, usize> = HashMap::new();
    let mut entered = HashSet::new();
    for start in range.clone() {
        let mut stack = vec![(start, false)];
        while let Some((node, expanded)) = stack.pop() {
            if expanded {
                let left = kids(node)
                    .filter_map(|k| leftmost.get(&k).copied())
                    .fold(node, usize::min);
                leftmost.insert(node, left);
            } else if entered.insert(node) {
                stack.push((node, true));
                stack.extend(kids(node).map(|k| (k, false)));
            }
        }
    }
    leftmost
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::syntax::SentenceType;
    use crate::document::token::Pos;

    fn tok(text: &str, pos: Pos) -> Token {
        Token::new(text, text, pos, 0..text.len())
    }

    fn sentence(range: Range<usize>) -> Sentence {
        Sentence {
            tokens: range,
            kind: SentenceType::Declarative,
        }
    }

    #[test]
    fn coordinated_clauses_split_after_the_coordinator() {
        // I ran and she walked .
        let tokens = vec![
            tok("I", Pos::Pron),
            tok("ran", Pos::Verb),
            tok("and", Pos::Cconj),
            tok("she", Pos::Pron),
            tok("walked", Pos::Verb),
            tok(".", Pos::Punct),
        ];
        let edges = vec![
            DepEdge::root(1),
            DepEdge::new(1, 0, DepRelation::Nsubj),
            DepEdge::new(1, 2, DepRelation::Cc),
            DepEdge::new(4, 3, DepRelation::Nsubj),
            DepEdge::new(1, 4, DepRelation::Conj),
            DepEdge::new(1, 5, DepRelation::Punct),
        ];
        let units = derive_t_units(&tokens, &[sentence(0..6)], &edges);
        assert_eq!(units.len(), 2);
        assert_eq!(units[0].tokens, 0..3);
        assert_eq!(units[0].word_count, 3);
        assert_eq!(units[1].tokens, 3..6);
        assert_eq!(units[1].word_count, 2);
    }

    #[test]
    fn long_chain_of_coordinated_clauses() {
        // I ran and I ran and ... I ran, each clause a conjunct of the previous one
        let n = 2000;
        let mut tokens = Vec::new();
        let mut edges = vec![DepEdge::root(1)];
        for k in 0..n {
            let base = 3 * k;
            tokens.push(tok("I", Pos::Pron));
            tokens.push(tok("ran", Pos::Verb));
            edges.push(DepEdge::new(base + 1, base, DepRelation::Nsubj));
            if k > 0 {
                edges.push(DepEdge::new(base - 2, base + 1, DepRelation::Conj));
            }
            if k + 1 < n {
                tokens.push(tok("and", Pos::Cconj));
                edges.push(DepEdge::new(base + 1, base + 2, DepRelation::Cc));
            }
        }

        let units = derive_t_units(&tokens, &[sentence(0..tokens.len())], &edges);
        assert_eq!(units.len(), n);
        assert_eq!(units[1].tokens, 3..6);
        assert_eq!(units[n - 1].word_count, 2);
        assert!(units.iter().all(|u| u.clauses.is_empty()));
    }

    #[test]
    fn subordinate_clauses_stay_in_their_unit() {
        // I left because it rained .
        let tokens = vec![
            tok("I", Pos::Pron),
            tok("left", Pos::Verb),
            tok("because", Pos::Sconj),
            tok("it", Pos::Pron),
            tok("rained", Pos::Verb),
            tok(".", Pos::Punct),
        ];
        let edges = vec![
            DepEdge::root(1),
            DepEdge::new(1, 0, DepRelation::Nsubj),
            DepEdge::new(4, 2, DepRelation::Mark),
            DepEdge::new(4, 3, DepRelation::Nsubj),
            DepEdge::new(1, 4, DepRelation::Advcl),
            DepEdge::new(1, 5, DepRelation::Punct),
        ];
        let units = derive_t_units(&tokens, &[sentence(0..6)], &edges);
        assert_eq!(units.len(), 1);
        assert_eq!(units[0].clauses, vec![ClauseKind::Adverbial]);
    }

    #[test]
    fn coordinated_nouns_do_not_split() {
        // cats and dogs sleep .
        let tokens = vec![
            tok("cats", Pos::Noun),
            tok("and", Pos::Cconj),
            tok("dogs", Pos::Noun),
            tok("sleep", Pos::Verb),
            tok(".", Pos::Punct),
        ];
        let edges = vec![
            DepEdge::root(3),
            DepEdge::new(3, 0, DepRelation::Nsubj),
            DepEdge::new(0, 1, DepRelation::Cc),
            DepEdge::new(0, 2, DepRelation::Conj),
        ];
        let units = derive_t_units(&tokens, &[sentence(0..5)], &edges);
        assert_eq!(units.len(), 1);
        assert_eq!(units[0].word_count, 4);
    }

    #[test]
    fn sentence_without_root_is_one_unit() {
        let tokens = vec![tok("Hello", Pos::Intj), tok("there", Pos::Adv)];
        let units = derive_t_units(&tokens, &[sentence(0..2)], &[]);
        assert_eq!(units.len(), 1);
        assert_eq!(units[0].tokens, 0..2);
    }

    #[test]
    fn punctuation_only_sentence_has_no_unit() {
        let tokens = vec![tok("...", Pos::Punct)];
        let units = derive_t_units(&tokens, &[sentence(0..1)], &[]);
        assert!(units.is_empty());
    }
}
