//! Dependency relations and sentence classification

use super::token::{Pos, Token};
use serde::{Deserialize, Serialize};
use std::ops::Range;

/// Dependency relation label (ClearNLP / spaCy English label set)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DepRelation {
    Root,
    Nsubj,
    Nsubjpass,
    Csubj,
    Dobj,
    Iobj,
    Det,
    Amod,
    Advmod,
    Aux,
    Auxpass,
    Neg,
    Cc,
    Conj,
    Mark,
    Advcl,
    Relcl,
    Acl,
    Ccomp,
    Xcomp,
    Prep,
    Pobj,
    Compound,
    Poss,
    Attr,
    Acomp,
    Punct,
    Other(String),
}

impl DepRelation {
    pub fn from_label(label: &str) -> Self {
        match label.to_ascii_lowercase().as_str() {
            "root" | "root:root" => Self::Root,
            "nsubj" => Self::Nsubj,
            "nsubjpass" | "nsubj:pass" => Self::Nsubjpass,
            "csubj" => Self::Csubj,
            "dobj" | "obj" => Self::Dobj,
            "iobj" | "dative" => Self::Iobj,
            "det" => Self::Det,
            "amod" => Self::Amod,
            "advmod" => Self::Advmod,
            "aux" => Self::Aux,
            "auxpass" | "aux:pass" => Self::Auxpass,
            "neg" => Self::Neg,
            "cc" => Self::Cc,
            "conj" => Self::Conj,
            "mark" => Self::Mark,
            "advcl" => Self::Advcl,
            "relcl" | "acl:relcl" => Self::Relcl,
            "acl" => Self::Acl,
            "ccomp" => Self::Ccomp,
            "xcomp" => Self::Xcomp,
            "prep" | "case" => Self::Prep,
            "pobj" | "obl" => Self::Pobj,
            "compound" => Self::Compound,
            "poss" | "nmod:poss" => Self::Poss,
            "attr" => Self::Attr,
            "acomp" => Self::Acomp,
            "punct" => Self::Punct,
            other => Self::Other(other.to_string()),
        }
    }

    /// Relations that introduce a dependent (subordinate) clause
    pub fn is_dependent_clause(&self) -> bool {
        matches!(
            self,
            Self::Advcl | Self::Relcl | Self::Ccomp | Self::Xcomp | Self::Acl
        )
    }
}

/// A labelled arc from governor to dependent, both token indices
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DepEdge {
    pub head: usize,
    pub dependent: usize,
    pub relation: DepRelation,
}

impl DepEdge {
    pub fn new(head: usize, dependent: usize, relation: DepRelation) -> Self {
        Self {
            head,
            dependent,
            relation,
        }
    }

    /// Root arcs point a token at itself
    pub fn root(token: usize) -> Self {
        Self::new(token, token, DepRelation::Root)
    }
}

/// Five-way sentence classification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SentenceType {
    Declarative,
    Interrogative,
    Exclamatory,
    Complex,
    Compound,
}

impl SentenceType {
    pub const ALL: [SentenceType; 5] = [
        Self::Declarative,
        Self::Interrogative,
        Self::Exclamatory,
        Self::Complex,
        Self::Compound,
    ];
}

/// A sentence: a half-open range of token indices plus its classified type
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sentence {
    pub tokens: Range<usize>,
    pub kind: SentenceType,
}

impl Sentence {
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    pub fn contains(&self, token: usize) -> bool {
        self.tokens.contains(&token)
    }
}

/// Classify a sentence from its terminal punctuation and dependency structure.
///
/// Punctuation wins: `?` is interrogative, `!` exclamatory. Otherwise a
/// sentence with a subordinate clause is complex, one with a coordinated
/// verbal clause is compound, and anything else declarative.
pub fn classify_sentence(tokens: &[Token], range: &Range<usize>, edges: &[DepEdge]) -> SentenceType {
    // Trailing punctuation run, e.g. `?"` or `!)`
    let trailing = tokens[range.clone()]
        .iter()
        .rev()
        .take_while(|t| t.pos == Pos::Punct);
    for punct in trailing {
        if punct.text.contains('?') {
            return SentenceType::Interrogative;
        }
        if punct.text.contains('!') {
            return SentenceType::Exclamatory;
        }
    }

    let inside = |i: usize| range.contains(&i);
    let arcs = edges
        .iter()
        .filter(|e| inside(e.dependent) && inside(e.head) && e.head != e.dependent);

    let mut compound = false;
    for edge in arcs {
        if edge.relation.is_dependent_clause() && edge.relation != DepRelation::Xcomp {
            return SentenceType::Complex;
        }
        if edge.relation == DepRelation::Conj
            && tokens[edge.head].pos.is_verbal()
            && tokens[edge.dependent].pos.is_verbal()
        {
            compound = true;
        }
    }

    if compound {
        SentenceType::Compound
    } else {
        SentenceType::Declarative
    }
}
