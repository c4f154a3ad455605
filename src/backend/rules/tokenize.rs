//! Tokenization and sentence segmentation

use std::ops::Range;

/// Surface class of a raw token
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Shape {
    Word,
    /// Split-off contraction: `n't`, `'s`, `'re`, ...
    Clitic,
    /// Dotted abbreviation such as `e.g.`
    Abbreviation,
    Number,
    /// Run of `.`, `!`, `?`
    Terminal,
    Punct,
    Symbol,
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct RawToken {
    pub text: String,
    pub span: Range<usize>,
    pub shape: Shape,
    /// A terminal that closes an abbreviation (`Mr.`) and ends no sentence
    pub abbreviation_dot: bool,
}

impl RawToken {
    fn new(text: &str, span: Range<usize>, shape: Shape) -> Self {
        Self {
            text: text.to_string(),
            span,
            shape,
            abbreviation_dot: false,
        }
    }
}

/// Words whose trailing period is part of the word
const ABBREVIATIONS: &[&str] = &[
    "mr", "mrs", "ms", "dr", "prof", "st", "jr", "sr", "vs", "etc", "inc", "ltd", "fig", "approx",
    "dept",
];

const CLITICS: &[&str] = &["n't", "'s", "'m", "'re", "'ve", "'ll", "'d"];

const CLOSERS: &[char] = &['"', '\'', ')', ']', '}', '\u{201d}', '\u{2019}'];

fn is_apostrophe(c: char) -> bool {
    c == '\'' || c == '\u{2019}'
}

fn is_symbol(c: char) -> bool {
    matches!(
        c,
        '$' | '%' | '&' | '@' | '#' | '+' | '=' | '<' | '>' | '*' | '/' | '\\' | '|' | '^' | '~'
            | '\u{20ac}' | '\u{a3}' | '\u{a5}' | '\u{b0}'
    )
}

/// Split text into word, number, punctuation and symbol tokens.
///
/// Hyphenated compounds are split at the hyphen. Contractions are split
/// into a host and a clitic (`don't` -> `do` + `n't`).
pub(crate) fn tokenize(text: &str) -> Vec<RawToken> {
    let chars: Vec<(usize, char)> = text.char_indices().collect();
    let byte_at = |i: usize| chars.get(i).map_or(text.len(), |&(b, _)| b);
    let char_at = |i: usize| chars.get(i).map(|&(_, c)| c);

    let mut tokens = Vec::new();
    let mut i = 0;
    while let Some(c) = char_at(i) {
        if c.is_whitespace() {
            i += 1;
            continue;
        }

        let start = i;
        if c.is_alphabetic() {
            if let Some(end) = dotted_abbreviation(&chars, i) {
                let span = byte_at(start)..byte_at(end);
                tokens.push(RawToken::new(&text[span.clone()], span, Shape::Abbreviation));
                i = end;
                continue;
            }

            i += 1;
            while let Some(next) = char_at(i) {
                let joins = is_apostrophe(next) && char_at(i + 1).is_some_and(char::is_alphabetic);
                if next.is_alphabetic() {
                    i += 1;
                } else if joins {
                    i += 2;
                } else {
                    break;
                }
            }
            let span = byte_at(start)..byte_at(i);
            push_word(&text[span.clone()], span, &mut tokens);

            let word = tokens.last().map(|t| t.text.to_lowercase()).unwrap_or_default();
            if char_at(i) == Some('.') && ABBREVIATIONS.contains(&word.as_str()) {
                let mut dot = RawToken::new(".", byte_at(i)..byte_at(i + 1), Shape::Terminal);
                dot.abbreviation_dot = true;
                tokens.push(dot);
                i += 1;
            }
            continue;
        }

        if c.is_ascii_digit() {
            i += 1;
            while let Some(next) = char_at(i) {
                let separator = matches!(next, '.' | ',') && char_at(i + 1).is_some_and(|d| d.is_ascii_digit());
                if next.is_ascii_digit() {
                    i += 1;
                } else if separator {
                    i += 2;
                } else {
                    break;
                }
            }
            let span = byte_at(start)..byte_at(i);
            tokens.push(RawToken::new(&text[span.clone()], span, Shape::Number));
            continue;
        }

        if is_terminal(c) {
            i += 1;
            while char_at(i).is_some_and(is_terminal) {
                i += 1;
            }
            let span = byte_at(start)..byte_at(i);
            tokens.push(RawToken::new(&text[span.clone()], span, Shape::Terminal));
            continue;
        }

        i += 1;
        let span = byte_at(start)..byte_at(i);
        let shape = if is_symbol(c) { Shape::Symbol } else { Shape::Punct };
        tokens.push(RawToken::new(&text[span.clone()], span, shape));
    }
    tokens
}

fn is_terminal(c: char) -> bool {
    matches!(c, '.' | '!' | '?' | '\u{2026}')
}

/// End (char index) of an `x.y.` style abbreviation starting at `i`
fn dotted_abbreviation(chars: &[(usize, char)], i: usize) -> Option<usize> {
    let mut end = i;
    let mut letters = 0;
    while end + 1 < chars.len() && chars[end].1.is_alphabetic() && chars[end + 1].1 == '.' {
        letters += 1;
        end += 2;
    }
    let continues = chars.get(end).is_some_and(|&(_, c)| c.is_alphabetic());
    (letters >= 2 && !continues).then_some(end)
}

/// Push a word, splitting off a trailing contraction clitic
fn push_word(word: &str, span: Range<usize>, tokens: &mut Vec<RawToken>) {
    let normalized = word.replace('\u{2019}', "'").to_lowercase();
    let clitic = CLITICS
        .iter()
        .find(|c| normalized.ends_with(*c) && normalized.len() > c.len());

    match clitic {
        Some(clitic) => {
            // Count chars, not bytes: the apostrophe may be `’`
            let tail_chars = clitic.chars().count();
            let split = word
                .char_indices()
                .rev()
                .nth(tail_chars - 1)
                .map_or(0, |(b, _)| b);
            let host = &word[..split];
            let tail = &word[split..];
            tokens.push(RawToken::new(host, span.start..span.start + split, Shape::Word));
            tokens.push(RawToken::new(tail, span.start + split..span.end, Shape::Clitic));
        }
        None => tokens.push(RawToken::new(word, span, Shape::Word)),
    }
}

/// Group tokens into sentences.
///
/// A sentence ends after a terminal run (plus any closing quotes or
/// brackets) that does not close an abbreviation, or at a blank line.
pub(crate) fn split_sentences(text: &str, tokens: &[RawToken]) -> Vec<Range<usize>> {
    let mut sentences = Vec::new();
    let mut start = 0;
    let mut i = 0;

    while i < tokens.len() {
        if i > start && paragraph_break(&text[tokens[i - 1].span.end..tokens[i].span.start]) {
            sentences.push(start..i);
            start = i;
        }

        let token = &tokens[i];
        i += 1;
        if token.shape == Shape::Terminal && !token.abbreviation_dot {
            while i < tokens.len()
                && tokens[i].text.chars().all(|c| CLOSERS.contains(&c))
                && tokens[i - 1].span.end == tokens[i].span.start
            {
                i += 1;
            }
            sentences.push(start..i);
            start = i;
        }
    }

    if start < tokens.len() {
        sentences.push(start..tokens.len());
    }
    sentences
}

fn paragraph_break(gap: &str) -> bool {
    gap.chars().filter(|&c| c == '\n').count() >= 2
}
