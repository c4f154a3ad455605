//! Pattern-based grammar and style checker

use super::{run_blocking, AnnotationError, ErrorChecker};
use crate::config::{SetupError, SetupResult};
use crate::document::{DetectedError, ErrorCategory, RawText};
use async_trait::async_trait;
use regex_lite::Regex;

/// Texts shorter than this (in characters, after trimming) are not checked
pub const MIN_CHECKED_CHARS: usize = 10;

/// Words that legitimately repeat ("had had", "that that")
const ALLOWED_REPEATS: &[&str] = &["had", "that"];

/// Abbreviations whose period does not end a sentence
const ABBREVIATIONS: &[&str] = &["etc", "vs", "cf", "approx", "mr", "mrs", "ms", "dr", "st"];

/// Vowel-initial prefixes pronounced with a consonant sound
const CONSONANT_SOUND_PREFIXES: &[&str] = &["uni", "use", "usu", "ure", "one", "onc", "eu"];

/// Consonant-initial words pronounced with a vowel sound
const VOWEL_SOUND_WORDS: &[&str] = &["hour", "hourly", "honest", "honestly", "honor", "honour", "heir"];

/// Deterministic checker built from a handful of surface rules:
/// repeated words, sentence-initial case, lower-case "i", a/an agreement,
/// doubled spaces, space before punctuation and a missing final terminator.
#[derive(Debug, Clone)]
pub struct RuleErrorChecker {
    word: Regex,
    sentence_start: Regex,
    pronoun_i: Regex,
    article: Regex,
    space_run: Regex,
    space_before_punct: Regex,
}

fn compile(pattern: &str) -> SetupResult<Regex> {
    Regex::new(pattern).map_err(|e| SetupError::Invalid {
        what: format!("error-checker pattern {}", pattern),
        reason: e.to_string(),
    })
}

impl RuleErrorChecker {
    pub fn new() -> SetupResult<Self> {
        Ok(Self {
            word: compile(r"[A-Za-z]+(?:'[A-Za-z]+)?")?,
            sentence_start: compile(r"(?:^\s*|([A-Za-z.]*)[.!?]\s+)([a-z])")?,
            pronoun_i: compile(r"\bi\b")?,
            article: compile(r"\b([Aa]n?)\s+([A-Za-z]+)")?,
            space_run: compile(r" {2,}")?,
            space_before_punct: compile(r" +[,;:]")?,
        })
    }

    /// Run every rule over `text`, ordered by position
    pub fn check_str(&self, text: &str) -> Vec<DetectedError> {
        if text.trim().chars().count() < MIN_CHECKED_CHARS {
            return Vec::new();
        }

        let mut errors = Vec::new();
        self.repeated_words(text, &mut errors);
        self.lowercase_sentence_starts(text, &mut errors);
        self.lowercase_pronoun(text, &mut errors);
        self.article_agreement(text, &mut errors);
        self.whitespace(text, &mut errors);
        missing_terminal(text, &mut errors);

        errors.sort_by_key(|e| (e.span.start, e.span.end));
        errors
    }

    fn repeated_words(&self, text: &str, errors: &mut Vec<DetectedError>) {
        let mut previous: Option<regex_lite::Match<'_>> = None;
        for current in self.word.find_iter(text) {
            if let Some(prev) = previous {
                let between = &text[prev.end()..current.start()];
                let word = current.as_str().to_lowercase();
                if !between.is_empty()
                    && between.chars().all(char::is_whitespace)
                    && prev.as_str().to_lowercase() == word
                    && !ALLOWED_REPEATS.contains(&word.as_str())
                {
                    errors.push(DetectedError::new(
                        prev.start()..current.end(),
                        ErrorCategory::Grammar,
                        format!("repeated word '{}'", current.as_str()),
                    ));
                }
            }
            previous = Some(current);
        }
    }

    fn lowercase_sentence_starts(&self, text: &str, errors: &mut Vec<DetectedError>) {
        for caps in self.sentence_start.captures_iter(text) {
            let previous = caps.get(1).map(|m| m.as_str().to_lowercase()).unwrap_or_default();
            if previous.contains('.') || ABBREVIATIONS.contains(&previous.as_str()) {
                continue;
            }
            if let Some(letter) = caps.get(2) {
                errors.push(DetectedError::new(
                    letter.start()..letter.end(),
                    ErrorCategory::Typography,
                    "sentence does not start with an upper-case letter",
                ));
            }
        }
    }

    fn lowercase_pronoun(&self, text: &str, errors: &mut Vec<DetectedError>) {
        for m in self.pronoun_i.find_iter(text) {
            let before = text[..m.start()].chars().next_back();
            let mut after = text[m.end()..].chars();
            // "i.e." and "'i'" are not the pronoun
            let abbreviation = after.next() == Some('.') && after.next().is_some_and(char::is_alphabetic);
            if abbreviation || matches!(before, Some('\'' | '-' | '.')) {
                continue;
            }
            errors.push(DetectedError::new(
                m.start()..m.end(),
                ErrorCategory::Spelling,
                "the pronoun 'I' is written in upper case",
            ));
        }
    }

    fn article_agreement(&self, text: &str, errors: &mut Vec<DetectedError>) {
        for caps in self.article.captures_iter(text) {
            let (Some(article), Some(next)) = (caps.get(1), caps.get(2)) else {
                continue;
            };
            let next_word = next.as_str().to_lowercase();
            let wants_an = wants_an(&next_word);
            let is_an = article.as_str().len() == 2;
            if wants_an != is_an {
                let expected = if wants_an { "an" } else { "a" };
                errors.push(DetectedError::new(
                    article.start()..next.end(),
                    ErrorCategory::Grammar,
                    format!("use '{}' before '{}'", expected, next.as_str()),
                ));
            }
        }
    }

    fn whitespace(&self, text: &str, errors: &mut Vec<DetectedError>) {
        for m in self.space_run.find_iter(text) {
            let before = text[..m.start()].chars().next_back();
            let after = text[m.end()..].chars().next();
            let inline = before.is_some_and(|c| !c.is_whitespace()) && after.is_some_and(|c| !c.is_whitespace());
            if inline {
                errors.push(DetectedError::new(
                    m.start()..m.end(),
                    ErrorCategory::Typography,
                    "repeated whitespace",
                ));
            }
        }
        for m in self.space_before_punct.find_iter(text) {
            errors.push(DetectedError::new(
                m.start()..m.end(),
                ErrorCategory::Punctuation,
                "space before punctuation",
            ));
        }
    }
}

/// Whether the indefinite article before `word` should be "an"
fn wants_an(word: &str) -> bool {
    if VOWEL_SOUND_WORDS.contains(&word) {
        return true;
    }
    if CONSONANT_SOUND_PREFIXES.iter().any(|p| word.starts_with(p)) {
        return false;
    }
    word.starts_with(['a', 'e', 'i', 'o', 'u'])
}

fn missing_terminal(text: &str, errors: &mut Vec<DetectedError>) {
    let trimmed = text.trim_end();
    let body = trimmed.trim_end_matches(['"', '\'', ')', '\u{201d}', '\u{2019}']);
    let Some((index, last)) = body.char_indices().next_back() else {
        return;
    };
    if !matches!(last, '.' | '!' | '?' | '\u{2026}') {
        errors.push(DetectedError::new(
            index..index + last.len_utf8(),
            ErrorCategory::Punctuation,
            "text does not end with terminal punctuation",
        ));
    }
}

#[async_trait]
impl ErrorChecker for RuleErrorChecker {
    fn id(&self) -> &str {
        "rule-error-checker"
    }

    async fn check(&self, text: &RawText) -> Result<Vec<DetectedError>, AnnotationError> {
        let checker = self.clone();
        let text = text.as_str().to_string();
        run_blocking(self.id(), move || Ok(checker.check_str(&text))).await
    }
}
