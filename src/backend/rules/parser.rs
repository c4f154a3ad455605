//! Heuristic dependency parsing
//!
//! Each sentence is first cut into clauses (main, adverbial, complement,
//! relative, coordinate) from its markers: subordinators, relative pronouns,
//! coordinators before a new predicate, commas and semicolons. Every clause
//! gets a head (its first finite verb, else its copula, else its first
//! nominal) linked to its governing clause; the remaining tokens attach inside
//! their clause through noun chunks and a few positional rules.

use super::tagger::{Tagged, VerbForm};
use crate::document::{DepEdge, DepRelation, Pos};

const RELATIVE_PRONOUNS: &[&str] = &["who", "whom", "whose", "which", "that"];

const POSSESSIVES: &[&str] = &["my", "your", "his", "her", "its", "our", "their"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Link {
    Main,
    Adverbial { marker: usize },
    Complement { marker: usize },
    Relative { antecedent: usize, pronoun: usize },
    Coordinate { cc: Option<usize> },
}

#[derive(Debug)]
struct Clause {
    link: Link,
    parent: Option<usize>,
    tokens: Vec<usize>,
    has_verb: bool,
    head: Option<usize>,
}

impl Clause {
    fn new(link: Link, parent: Option<usize>) -> Self {
        Self {
            link,
            parent,
            tokens: Vec::new(),
            has_verb: false,
            head: None,
        }
    }
}

#[derive(Debug)]
struct Chunk {
    start: usize,
    head: usize,
    members: Vec<usize>,
    possessor: bool,
}

/// Parse one tagged sentence; `offset` is the index of its first token in
/// the document. Every token receives exactly one incoming arc.
pub(crate) fn parse_sentence(tags: &[Tagged], offset: usize) -> Vec<DepEdge> {
    let mut parse = Parse {
        tags,
        heads: vec![None; tags.len()],
    };
    parse.run();

    parse
        .heads
        .into_iter()
        .enumerate()
        .filter_map(|(i, head)| head.map(|(h, rel)| DepEdge::new(h + offset, i + offset, rel)))
        .collect()
}

struct Parse<'a> {
    tags: &'a [Tagged],
    heads: Vec<Option<(usize, DepRelation)>>,
}

impl<'a> Parse<'a> {
    fn run(&mut self) {
        let mut clauses = segment(self.tags);
        for clause in &mut clauses {
            clause.tokens.sort_unstable();
            clause.head = clause_head(self.tags, &clause.tokens);
        }

        let root_clause = clauses
            .iter()
            .position(|c| c.link == Link::Main && c.head.is_some())
            .or_else(|| clauses.iter().position(|c| c.head.is_some()));
        let Some(root_clause) = root_clause else {
            return;
        };
        let Some(root) = clauses[root_clause].head else {
            return;
        };
        self.heads[root] = Some((root, DepRelation::Root));

        for index in 0..clauses.len() {
            if index != root_clause {
                self.link_clause(&clauses, index, root);
            }
        }
        for clause in &clauses {
            if let Some(head) = clause.head {
                self.attach_inside(&clause.tokens, head);
            }
        }

        // Punctuation hangs off the root; anything left over off its clause head
        for i in 0..self.tags.len() {
            if self.tags[i].pos == Pos::Punct {
                self.attach(i, root, DepRelation::Punct);
            }
        }
        for clause in &clauses {
            let head = clause.head.unwrap_or(root);
            for &i in &clause.tokens {
                self.attach(i, head, DepRelation::Other("dep".to_string()));
                self.attach(i, root, DepRelation::Other("dep".to_string()));
            }
        }
    }

    /// Record `dependent -> head` unless the dependent already has a head
    fn attach(&mut self, dependent: usize, head: usize, relation: DepRelation) {
        if dependent != head && self.heads[dependent].is_none() {
            self.heads[dependent] = Some((head, relation));
        }
    }

    fn link_clause(&mut self, clauses: &[Clause], index: usize, root: usize) {
        let clause = &clauses[index];
        let Some(head) = clause.head else {
            return;
        };
        let governor = governing_head(clauses, index).unwrap_or(root);
        if governor == head {
            return;
        }

        match clause.link {
            Link::Main => self.attach(head, governor, DepRelation::Conj),
            Link::Adverbial { marker } => {
                self.attach(marker, head, DepRelation::Mark);
                self.attach(head, governor, DepRelation::Advcl);
            }
            Link::Complement { marker } => {
                self.attach(marker, head, DepRelation::Mark);
                self.attach(head, governor, DepRelation::Ccomp);
            }
            Link::Relative { antecedent, pronoun } => {
                self.attach(head, antecedent, DepRelation::Relcl);
                let relation = if self.tags[pronoun].lemma == "whose" {
                    DepRelation::Poss
                } else if self
                    .tags
                    .get(pronoun + 1)
                    .is_some_and(|t| matches!(t.pos, Pos::Verb | Pos::Aux | Pos::Adv))
                {
                    DepRelation::Nsubj
                } else {
                    DepRelation::Dobj
                };
                self.attach(pronoun, head, relation);
            }
            Link::Coordinate { cc } => {
                if let Some(cc) = cc {
                    self.attach(cc, head, DepRelation::Cc);
                }
                self.attach(head, governor, DepRelation::Conj);
            }
        }
    }

    /// Attach the tokens of one clause to each other and to its head
    fn attach_inside(&mut self, tokens: &[usize], head: usize) {
        let tags = self.tags;
        let chunks = noun_chunks(tags, tokens);

        for chunk in &chunks {
            for &member in &chunk.members {
                if member == chunk.head {
                    continue;
                }
                match tags[member].pos {
                    Pos::Det => self.attach(member, chunk.head, DepRelation::Det),
                    Pos::Adj => self.attach(member, chunk.head, DepRelation::Amod),
                    Pos::Num => self.attach(member, chunk.head, DepRelation::Other("nummod".to_string())),
                    Pos::Noun | Pos::Propn => self.attach(member, chunk.head, DepRelation::Compound),
                    Pos::Pron => self.attach(member, chunk.head, DepRelation::Poss),
                    Pos::Adv => self.attach(member, member + 1, DepRelation::Advmod),
                    _ => self.attach(member, chunk.head, DepRelation::Other("dep".to_string())),
                }
            }
        }

        let mut subjects = Vec::new();
        let mut objects = Vec::new();
        for (k, chunk) in chunks.iter().enumerate() {
            let c = chunk.head;
            if c == head || self.heads[c].is_some() {
                continue;
            }

            if chunk.possessor {
                if let Some(owner) = chunks.get(k + 1).filter(|next| next.start == c + 2) {
                    self.attach(c + 1, c, DepRelation::Other("case".to_string()));
                    self.attach(c, owner.head, DepRelation::Poss);
                    continue;
                }
            }

            if let Some(prep) = chunk.start.checked_sub(1).filter(|&p| {
                owns(tokens, p) && tags[p].pos == Pos::Adp
            }) {
                self.attach(c, prep, DepRelation::Pobj);
                let noun_before = prep.checked_sub(1).filter(|&n| {
                    tags[prep].lemma == "of" && chunks.binary_search_by_key(&n, |ch| ch.head).is_ok()
                });
                self.attach(prep, noun_before.unwrap_or(head), DepRelation::Prep);
                continue;
            }

            if k > 0 {
                let previous = &chunks[k - 1];
                let between: Vec<usize> = (previous.head + 1..chunk.start).collect();
                let coordinated = !between.is_empty()
                    && between.iter().all(|&b| owns(tokens, b))
                    && between
                        .iter()
                        .all(|&b| tags[b].pos == Pos::Cconj || tags[b].lemma == ",")
                    && between.iter().any(|&b| tags[b].pos == Pos::Cconj);
                if coordinated {
                    self.attach(c, previous.head, DepRelation::Conj);
                    for &b in &between {
                        if tags[b].pos == Pos::Cconj {
                            self.attach(b, c, DepRelation::Cc);
                        }
                    }
                    continue;
                }
            }

            if c < head {
                subjects.push(c);
            } else {
                objects.push((c, chunk.start));
            }
        }

        let passive = is_passive(tags, tokens, head);
        if let Some((&subject, rest)) = subjects.split_last() {
            let relation = if passive {
                DepRelation::Nsubjpass
            } else {
                DepRelation::Nsubj
            };
            self.attach(subject, head, relation);
            for &other in rest {
                self.attach(other, head, DepRelation::Other("npadvmod".to_string()));
            }
        }

        let copular = tags[head].pos == Pos::Aux;
        match objects.as_slice() {
            [] => {}
            [(first, _), (second, second_start), ..] if !copular && *second_start == first + 1 => {
                self.attach(*first, head, DepRelation::Iobj);
                self.attach(*second, head, DepRelation::Dobj);
            }
            [(first, _), ..] => {
                let relation = if copular { DepRelation::Attr } else { DepRelation::Dobj };
                self.attach(*first, head, relation);
            }
        }

        for &i in tokens {
            if i == head || self.heads[i].is_some() {
                continue;
            }
            let tag = &tags[i];
            let next_in_clause = Some(i + 1).filter(|&n| owns(tokens, n));
            match tag.pos {
                Pos::Punct => {}
                Pos::Aux => {
                    let relation = if tag.lemma == "be" && passive {
                        DepRelation::Auxpass
                    } else {
                        DepRelation::Aux
                    };
                    self.attach(i, head, relation);
                }
                Pos::Part if tag.lemma == "not" => self.attach(i, head, DepRelation::Neg),
                Pos::Part if tag.lemma == "to" => match next_in_clause {
                    Some(n) if tags[n].pos.is_verbal() => self.attach(i, n, DepRelation::Aux),
                    _ => self.attach(i, head, DepRelation::Other("dep".to_string())),
                },
                Pos::Part if tag.lemma == "'s" && i > 0 => {
                    self.attach(i, i - 1, DepRelation::Other("case".to_string()))
                }
                Pos::Verb => {
                    let after_to = i > 0 && tags[i - 1].pos == Pos::Part && tags[i - 1].lemma == "to";
                    if after_to {
                        let before_to = tokens.partition_point(|&g| g < i - 1);
                        let governor = tokens[..before_to]
                            .iter()
                            .rev()
                            .find(|&&g| matches!(tags[g].pos, Pos::Verb | Pos::Aux | Pos::Adj))
                            .copied()
                            .unwrap_or(head);
                        self.attach(i, governor, DepRelation::Xcomp);
                    } else if tag.form == Some(VerbForm::Gerund) && i == head + 1 {
                        self.attach(i, head, DepRelation::Xcomp);
                    } else {
                        self.attach(i, head, DepRelation::Other("dep".to_string()));
                    }
                }
                Pos::Adv => match next_in_clause {
                    Some(n) if matches!(tags[n].pos, Pos::Adj | Pos::Adv) => {
                        self.attach(i, n, DepRelation::Advmod)
                    }
                    _ => self.attach(i, head, DepRelation::Advmod),
                },
                Pos::Adj => self.attach(i, head, DepRelation::Acomp),
                Pos::Cconj => self.attach(i, head, DepRelation::Cc),
                Pos::Sconj => self.attach(i, head, DepRelation::Mark),
                Pos::Adp => self.attach(i, head, DepRelation::Prep),
                Pos::Intj => self.attach(i, head, DepRelation::Other("intj".to_string())),
                Pos::Num => self.attach(i, head, DepRelation::Other("nummod".to_string())),
                _ => self.attach(i, head, DepRelation::Other("dep".to_string())),
            }
        }
    }
}

/// Nearest ancestor clause with a head
fn governing_head(clauses: &[Clause], index: usize) -> Option<usize> {
    let mut parent = clauses[index].parent;
    while let Some(p) = parent {
        if let Some(head) = clauses[p].head {
            return Some(head);
        }
        parent = clauses[p].parent;
    }
    None
}

/// Cut a sentence into clauses; every token is owned by exactly one clause
fn segment(tags: &[Tagged]) -> Vec<Clause> {
    let mut clauses = vec![Clause::new(Link::Main, None)];
    let mut stack: Vec<usize> = vec![0];

    for i in 0..tags.len() {
        let tag = &tags[i];
        let after_comma = i > 0 && tags[i - 1].lemma == ",";
        let after_semicolon = i > 0 && tags[i - 1].lemma == ";";

        // Leave a finished subordinate clause at a comma or a second predicate
        let mut current = stack.last().copied().unwrap_or(0);
        let subordinate = !matches!(clauses[current].link, Link::Main | Link::Coordinate { .. });
        if subordinate && clauses[current].has_verb && stack.len() > 1 {
            let outer = stack[stack.len() - 2];
            let comma_break = after_comma && clause_follows(tags, i - 1);
            let new_predicate = starts_predicate(tags, i);
            if comma_break || new_predicate {
                stack.pop();
                if clauses[outer].has_verb {
                    if comma_break {
                        clauses.push(Clause::new(Link::Coordinate { cc: None }, Some(outer)));
                        stack.push(clauses.len() - 1);
                    }
                } else if new_predicate && matches!(clauses[current].link, Link::Adverbial { .. }) {
                    move_subject(tags, &mut clauses, current, outer, i);
                }
                current = stack.last().copied().unwrap_or(0);
            }
        }

        let link = if tag.pos == Pos::Sconj && tag.lemma == "that" {
            // Without a following subject and verb it is a demonstrative ("Stop that.")
            match antecedent(tags, i) {
                Some(antecedent) => Some(Link::Relative { antecedent, pronoun: i }),
                None if clause_follows(tags, i) => Some(Link::Complement { marker: i }),
                None => None,
            }
        } else if tag.pos == Pos::Sconj
            && matches!(tag.lemma.as_str(), "if" | "whether")
            && i > 0
            && tags[i - 1].pos == Pos::Verb
        {
            Some(Link::Complement { marker: i })
        } else if tag.pos == Pos::Sconj {
            Some(Link::Adverbial { marker: i })
        } else if tag.pos == Pos::Pron && RELATIVE_PRONOUNS.contains(&tag.lemma.as_str()) {
            antecedent(tags, i).map(|antecedent| Link::Relative { antecedent, pronoun: i })
        } else if tag.pos == Pos::Cconj && clauses[current].has_verb && predicate_follows(tags, i) {
            Some(Link::Coordinate { cc: Some(i) })
        } else if after_semicolon && clauses[current].has_verb {
            Some(Link::Coordinate { cc: None })
        } else {
            None
        };

        if let Some(link) = link {
            clauses.push(Clause::new(link, Some(current)));
            stack.push(clauses.len() - 1);
            current = clauses.len() - 1;
        }

        clauses[current].tokens.push(i);
        if tag.pos.is_verbal() {
            clauses[current].has_verb = true;
        }
    }
    clauses
}

/// Move the subject run just before `at` from one clause to another
fn move_subject(tags: &[Tagged], clauses: &mut [Clause], from: usize, to: usize, at: usize) {
    let owned = |t: usize| owns(&clauses[from].tokens, t);
    let mut start = at;
    if at > 0 && tags[at - 1].pos == Pos::Pron && !is_possessive(&tags[at - 1]) {
        start = at - 1;
    } else {
        while start > 0
            && owned(start - 1)
            && (matches!(tags[start - 1].pos, Pos::Noun | Pos::Propn | Pos::Adj | Pos::Num)
                || is_possessive(&tags[start - 1]))
        {
            start -= 1;
        }
        if start > 0 && owned(start - 1) && tags[start - 1].pos == Pos::Det {
            start -= 1;
        }
        if !(start..at).any(|i| tags[i].pos.is_nominal()) {
            return;
        }
    }

    clauses[from].tokens.retain(|i| !(start..at).contains(i));
    clauses[to].tokens.extend(start..at);
}

/// Noun or pronoun a relative clause at `i` modifies
fn antecedent(tags: &[Tagged], i: usize) -> Option<usize> {
    let mut p = i.checked_sub(1)?;
    if tags[p].lemma == "," {
        p = p.checked_sub(1)?;
    }
    matches!(tags[p].pos, Pos::Noun | Pos::Propn).then_some(p)
}

/// A finite verb at `i` that does not continue a verb group
fn starts_predicate(tags: &[Tagged], i: usize) -> bool {
    if !tags[i].pos.is_verbal() || tags[i].form == Some(VerbForm::Gerund) {
        return false;
    }
    let previous = tags[..i]
        .iter()
        .rev()
        .find(|t| !matches!(t.pos, Pos::Adv) && !(t.pos == Pos::Part && t.lemma == "not"));
    !previous.is_some_and(|p| p.pos == Pos::Aux || (p.pos == Pos::Part && p.lemma == "to"))
}

/// A verb follows directly, or a subject and then a verb
fn predicate_follows(tags: &[Tagged], i: usize) -> bool {
    tags.get(i + 1).is_some_and(|t| t.pos.is_verbal()) || clause_follows(tags, i)
}

/// A subject then a verb follow `i`, before any other punctuation
fn clause_follows(tags: &[Tagged], i: usize) -> bool {
    let mut saw_subject = false;
    for tag in tags.iter().skip(i + 1).take(6) {
        match tag.pos {
            Pos::Pron | Pos::Noun | Pos::Propn => saw_subject = true,
            Pos::Det | Pos::Adj | Pos::Num | Pos::Adv => {}
            Pos::Verb | Pos::Aux => return saw_subject,
            _ => return false,
        }
    }
    false
}

/// Membership in a clause's token list, which is kept in ascending order
fn owns(tokens: &[usize], i: usize) -> bool {
    tokens.binary_search(&i).is_ok()
}

fn is_possessive(tag: &Tagged) -> bool {
    tag.pos == Pos::Pron && POSSESSIVES.contains(&tag.lemma.as_str())
}

/// First finite verb, else copula, else nominal, else any word
fn clause_head(tags: &[Tagged], tokens: &[usize]) -> Option<usize> {
    let after_to = |i: usize| i > 0 && tags[i - 1].pos == Pos::Part && tags[i - 1].lemma == "to";
    let find = |pred: &dyn Fn(usize) -> bool| tokens.iter().copied().find(|&i| pred(i));

    find(&|i| tags[i].pos == Pos::Verb && !after_to(i))
        .or_else(|| find(&|i| tags[i].pos == Pos::Aux))
        .or_else(|| find(&|i| matches!(tags[i].pos, Pos::Noun | Pos::Propn | Pos::Pron | Pos::Adj)))
        .or_else(|| find(&|i| tags[i].pos != Pos::Punct))
        .or_else(|| tokens.first().copied())
}

/// `be` followed by a participle head
fn is_passive(tags: &[Tagged], tokens: &[usize], head: usize) -> bool {
    let participle = tags[head].pos == Pos::Verb
        && matches!(tags[head].form, Some(VerbForm::Participle | VerbForm::PastOrParticiple))
        && tags[head].tense.is_none();
    participle
        && tokens
            .iter()
            .any(|&i| i < head && tags[i].pos == Pos::Aux && tags[i].lemma == "be")
}

/// Noun chunks: optional determiner, possessive, numerals and (adverb-modified)
/// adjectives, ending in a noun; or a lone pronoun or determiner.
fn noun_chunks(tags: &[Tagged], tokens: &[usize]) -> Vec<Chunk> {
    let mut chunks = Vec::new();
    let mut pending: Vec<usize> = Vec::new();
    let mut last: Option<usize> = None;

    let flush = |pending: &mut Vec<usize>, chunks: &mut Vec<Chunk>| {
        // A bare determiner or numeral stands in for a noun phrase ("I like this")
        if let Some(&only) = pending.first().filter(|_| pending.len() == 1) {
            if matches!(tags[only].pos, Pos::Det | Pos::Num) {
                chunks.push(Chunk {
                    start: only,
                    head: only,
                    members: vec![only],
                    possessor: false,
                });
            }
        }
        pending.clear();
    };

    for (k, &i) in tokens.iter().enumerate() {
        if last.is_some_and(|l| l + 1 != i) {
            flush(&mut pending, &mut chunks);
        }
        last = Some(i);

        let tag = &tags[i];
        let next = tokens.get(k + 1).filter(|&&n| n == i + 1).map(|&n| &tags[n]);
        match tag.pos {
            Pos::Det | Pos::Num | Pos::Adj => pending.push(i),
            Pos::Adv if next.is_some_and(|n| n.pos == Pos::Adj) && !pending.is_empty() => pending.push(i),
            Pos::Pron if is_possessive(tag) && next.is_some_and(|n| {
                matches!(n.pos, Pos::Noun | Pos::Propn | Pos::Adj | Pos::Num)
            }) =>
            {
                pending.push(i)
            }
            Pos::Pron => {
                pending.clear();
                chunks.push(Chunk {
                    start: i,
                    head: i,
                    members: vec![i],
                    possessor: false,
                });
            }
            Pos::Noun | Pos::Propn => {
                pending.push(i);
                if !next.is_some_and(|n| n.pos.is_nominal()) {
                    let possessor = tags
                        .get(i + 1)
                        .is_some_and(|n| n.pos == Pos::Part && n.lemma == "'s");
                    chunks.push(Chunk {
                        start: pending[0],
                        head: i,
                        members: std::mem::take(&mut pending),
                        possessor,
                    });
                }
            }
            _ => flush(&mut pending, &mut chunks),
        }
    }
    flush(&mut pending, &mut chunks);
    chunks
}
