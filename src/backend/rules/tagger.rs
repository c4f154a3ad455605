//! Part-of-speech tagging, lemmatization and tense marking
//!
//! A closed-class lexicon and a list of common verbs give each token its
//! lexical tag; a second left-to-right pass resolves the usual ambiguities
//! (noun/verb homographs, auxiliary `have`/`do`, `to`, `that`, `'s`).

use super::tokenize::{RawToken, Shape};
use crate::document::{Pos, Tense};
use std::collections::{HashMap, HashSet};

const DETERMINERS: &str = "the a an this these those every each some any no all both either neither \
    another such";

const PRONOUNS: &str = "i me myself you yourself yourselves he him himself she herself it itself we us \
    ourselves they them themselves who whom whose which what whoever whatever mine yours hers ours \
    theirs someone somebody something anyone anybody anything everyone everybody everything nobody \
    nothing none";

const POSSESSIVES: &str = "my your his her its our their";

const ADPOSITIONS: &str = "of in on at by for with about against between into through during before \
    after above below from up down off over under around among without within across behind beyond \
    near toward towards upon despite per via except onto along beside inside outside throughout \
    unlike amid like as since until";

const COORDINATORS: &str = "and or but nor yet";

const SUBORDINATORS: &str = "because although though while if unless whereas whether once whenever \
    wherever when where";

const MODALS: &str = "can could will would shall should may might must";

const INTERJECTIONS: &str = "oh wow hey hello hi ouch alas oops yeah ok okay";

const NUMBER_WORDS: &str = "zero one two three four five six seven eight nine ten eleven twelve \
    thirteen fourteen fifteen sixteen seventeen eighteen nineteen twenty thirty forty fifty sixty \
    seventy eighty ninety hundred thousand million billion";

const ADVERBS: &str = "very really quite too also just only even still already always never often \
    sometimes usually here there now then soon again almost rather so however therefore thus \
    moreover furthermore consequently nevertheless finally perhaps maybe certainly clearly actually \
    instead ever today tomorrow yesterday away back together well meanwhile afterwards hence besides \
    additionally indeed otherwise later earlier much more most less least enough how why not \
    probably especially simply definitely obviously else";

const ADJECTIVES: &str = "good bad big small large little new old great high low long short young \
    happy sad important different same other many few several own hard easy clear possible able \
    true whole free right wrong real sure full early late strong weak hot cold warm cool dark bright \
    fast slow rich poor deep wide narrow heavy light clean dirty quiet loud nice fine main major \
    simple complex certain common general public private special recent final local social human \
    natural national political economic personal likely friendly lovely lonely ugly silly daily \
    first second third last next best better worse worst black white red blue green yellow brown \
    beautiful interesting difficult necessary available tired angry afraid alone alive safe busy \
    ready fair huge tiny empty open";

/// Base forms of common regular verbs (irregular verbs are added from `IRREGULAR_VERBS`)
const VERBS: &str = "want need like love use work call try ask help play move live believe happen \
    include continue change turn start seem look walk talk open close follow stop create add allow \
    appear offer remember consider expect suggest raise pass require report decide return explain \
    develop carry reach remain argue prove claim support improve increase reduce provide agree enjoy \
    study learn finish answer jump laugh cry smile watch wait visit plan hope rain travel listen kill \
    die save share stay cause affect produce describe discuss achieve receive notice form kick chase \
    climb cook clean paint dance shout push pull fix fill miss pick drop check count order point \
    mark test act end cover accept apply arrive attack avoid belong borrow compare complete contain \
    control decrease depend deserve destroy disagree encourage enter escape exist fail fear hate \
    imagine intend introduce invite join kiss last limit manage matter mention mind need obtain \
    occur own pay prefer prepare present prevent promise protect publish question realize refuse \
    relax rely remove repeat replace rest result roll score search seem serve shop sign solve \
    suffer suppose surprise talk thank touch train treat trust underline vote wash wonder worry \
    yell collect deliver demonstrate measure observe predict recommend review identify indicate \
    focus respond walk wish";

/// `base past participle`, one verb per line
const IRREGULAR_VERBS: &str = "\
arise arose arisen
awake awoke awoken
bear bore borne
beat beat beaten
become became become
begin began begun
bend bent bent
bind bound bound
bite bit bitten
bleed bled bled
blow blew blown
break broke broken
bring brought brought
build built built
burn burnt burnt
buy bought bought
catch caught caught
choose chose chosen
come came come
cost cost cost
creep crept crept
cut cut cut
deal dealt dealt
dig dug dug
draw drew drawn
dream dreamt dreamt
drink drank drunk
drive drove driven
eat ate eaten
fall fell fallen
feed fed fed
feel felt felt
fight fought fought
find found found
flee fled fled
fly flew flown
forbid forbade forbidden
forget forgot forgotten
forgive forgave forgiven
freeze froze frozen
get got got
give gave given
go went gone
grow grew grown
hang hung hung
hear heard heard
hide hid hidden
hit hit hit
hold held held
hurt hurt hurt
keep kept kept
know knew known
lay laid laid
lead led led
leave left left
lend lent lent
let let let
light lit lit
lose lost lost
make made made
mean meant meant
meet met met
pay paid paid
put put put
quit quit quit
read read read
ride rode ridden
ring rang rung
rise rose risen
run ran run
say said said
see saw seen
seek sought sought
sell sold sold
send sent sent
set set set
shake shook shaken
shine shone shone
shoot shot shot
show showed shown
shut shut shut
sing sang sung
sink sank sunk
sit sat sat
sleep slept slept
slide slid slid
speak spoke spoken
spend spent spent
spread spread spread
stand stood stood
steal stole stolen
stick stuck stuck
sting stung stung
strike struck struck
swear swore sworn
sweep swept swept
swim swam swum
swing swung swung
take took taken
teach taught taught
tear tore torn
tell told told
think thought thought
throw threw thrown
understand understood understood
wake woke woken
wear wore worn
win won won
write wrote written";

const IRREGULAR_NOUNS: &[(&str, &str)] = &[
    ("children", "child"),
    ("people", "person"),
    ("men", "man"),
    ("women", "woman"),
    ("mice", "mouse"),
    ("feet", "foot"),
    ("teeth", "tooth"),
    ("geese", "goose"),
    ("lives", "life"),
    ("wives", "wife"),
    ("knives", "knife"),
    ("leaves", "leaf"),
    ("data", "data"),
    ("criteria", "criterion"),
    ("phenomena", "phenomenon"),
];

const OBJECT_PRONOUNS: &[(&str, &str)] = &[
    ("me", "i"),
    ("us", "we"),
    ("him", "he"),
    ("them", "they"),
];

/// Words with a subordinating reading when a clause follows
const CLAUSAL_ADPOSITIONS: &[&str] = &["after", "before", "since", "until", "as"];

/// Inflectional form of a verb or auxiliary
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum VerbForm {
    Base,
    Present,
    Past,
    Participle,
    PastOrParticiple,
    Gerund,
}

const BE_FORMS: &[(&str, VerbForm)] = &[
    ("be", VerbForm::Base),
    ("am", VerbForm::Present),
    ("is", VerbForm::Present),
    ("are", VerbForm::Present),
    ("was", VerbForm::Past),
    ("were", VerbForm::Past),
    ("been", VerbForm::Participle),
    ("being", VerbForm::Gerund),
];

const HAVE_DO_FORMS: &[(&str, &str, VerbForm)] = &[
    ("have", "have", VerbForm::Base),
    ("has", "have", VerbForm::Present),
    ("had", "have", VerbForm::PastOrParticiple),
    ("having", "have", VerbForm::Gerund),
    ("do", "do", VerbForm::Base),
    ("does", "do", VerbForm::Present),
    ("did", "do", VerbForm::Past),
    ("done", "do", VerbForm::Participle),
    ("doing", "do", VerbForm::Gerund),
];

/// Tag, lemma and tense of one token
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Tagged {
    pub pos: Pos,
    pub lemma: String,
    pub form: Option<VerbForm>,
    pub tense: Option<Tense>,
}

impl Tagged {
    fn new(pos: Pos, lemma: impl Into<String>) -> Self {
        Self {
            pos,
            lemma: lemma.into(),
            form: None,
            tense: None,
        }
    }

    fn verbal(pos: Pos, lemma: impl Into<String>, form: VerbForm) -> Self {
        Self {
            pos,
            lemma: lemma.into(),
            form: Some(form),
            tense: None,
        }
    }
}

/// Word lists behind the tagger, built once per annotator
#[derive(Debug, Clone)]
pub(crate) struct Vocabulary {
    closed: HashMap<&'static str, Pos>,
    verbs: HashSet<&'static str>,
    irregular_verbs: HashMap<&'static str, (&'static str, VerbForm)>,
    adjectives: HashSet<&'static str>,
    adverbs: HashSet<&'static str>,
    irregular_nouns: HashMap<&'static str, &'static str>,
}

impl Default for Vocabulary {
    fn default() -> Self {
        Self::new()
    }
}

impl Vocabulary {
    pub(crate) fn new() -> Self {
        let mut closed = HashMap::new();
        let lists = [
            (MODALS, Pos::Aux),
            (DETERMINERS, Pos::Det),
            (PRONOUNS, Pos::Pron),
            (POSSESSIVES, Pos::Pron),
            (COORDINATORS, Pos::Cconj),
            (SUBORDINATORS, Pos::Sconj),
            (ADPOSITIONS, Pos::Adp),
            (INTERJECTIONS, Pos::Intj),
            (NUMBER_WORDS, Pos::Num),
        ];
        for (list, pos) in lists {
            for word in list.split_whitespace() {
                closed.entry(word).or_insert(pos);
            }
        }

        let mut verbs: HashSet<&'static str> = VERBS.split_whitespace().collect();
        let mut irregular_verbs = HashMap::new();
        for line in IRREGULAR_VERBS.lines() {
            let parts: Vec<&'static str> = line.split_whitespace().collect();
            let [base, past, participle] = parts.as_slice() else {
                continue;
            };
            verbs.insert(*base);
            if past != base {
                let form = if past == participle {
                    VerbForm::PastOrParticiple
                } else {
                    VerbForm::Past
                };
                irregular_verbs.insert(*past, (*base, form));
            }
            if participle != base && participle != past {
                irregular_verbs.insert(*participle, (*base, VerbForm::Participle));
            }
        }

        Self {
            closed,
            verbs,
            irregular_verbs,
            adjectives: ADJECTIVES.split_whitespace().collect(),
            adverbs: ADVERBS.split_whitespace().collect(),
            irregular_nouns: IRREGULAR_NOUNS.iter().copied().collect(),
        }
    }

    /// Tag one sentence worth of tokens
    pub(crate) fn tag_sentence(&self, tokens: &[RawToken]) -> Vec<Tagged> {
        let first_word = tokens.iter().position(|t| t.shape == Shape::Word);
        let mut tagged: Vec<Tagged> = tokens
            .iter()
            .enumerate()
            .map(|(i, token)| self.lexical(token, Some(i) == first_word))
            .collect();

        self.resolve(tokens, &mut tagged);
        mark_tense(&mut tagged);
        tagged
    }

    /// Context-free tag from the word lists and suffixes
    fn lexical(&self, token: &RawToken, sentence_initial: bool) -> Tagged {
        let lower = token.text.replace('\u{2019}', "'").to_lowercase();
        match token.shape {
            Shape::Terminal | Shape::Punct => return Tagged::new(Pos::Punct, lower),
            Shape::Symbol => return Tagged::new(Pos::Sym, lower),
            Shape::Number => return Tagged::new(Pos::Num, lower),
            Shape::Abbreviation => return Tagged::new(Pos::X, lower),
            Shape::Clitic => return clitic(&lower),
            Shape::Word => {}
        }

        match lower.as_str() {
            "ca" => return Tagged::verbal(Pos::Aux, "can", VerbForm::Base),
            "wo" => return Tagged::verbal(Pos::Aux, "will", VerbForm::Base),
            "sha" => return Tagged::verbal(Pos::Aux, "shall", VerbForm::Base),
            "not" => return Tagged::new(Pos::Part, "not"),
            "to" => return Tagged::new(Pos::Adp, "to"),
            "that" => return Tagged::new(Pos::Sconj, "that"),
            _ => {}
        }

        if let Some(&(_, form)) = BE_FORMS.iter().find(|(w, _)| *w == lower) {
            return Tagged::verbal(Pos::Aux, "be", form);
        }
        if let Some(&(_, lemma, form)) = HAVE_DO_FORMS.iter().find(|(w, _, _)| *w == lower) {
            return Tagged::verbal(Pos::Verb, lemma, form);
        }
        if let Some(&pos) = self.closed.get(lower.as_str()) {
            let lemma = OBJECT_PRONOUNS
                .iter()
                .find(|(w, _)| *w == lower)
                .map_or(lower.as_str(), |(_, l)| *l);
            return if pos == Pos::Aux {
                Tagged::verbal(pos, lemma, VerbForm::Base)
            } else {
                Tagged::new(pos, lemma)
            };
        }
        if self.adverbs.contains(lower.as_str()) {
            return Tagged::new(Pos::Adv, lower);
        }
        if let Some(lemma) = self.adjective_lemma(&lower) {
            return Tagged::new(Pos::Adj, lemma);
        }
        if let Some((lemma, form)) = self.verb_lemma(&lower) {
            return Tagged::verbal(Pos::Verb, lemma, form);
        }

        let capitalized = token.text.chars().next().is_some_and(char::is_uppercase);
        if capitalized && !sentence_initial {
            return Tagged::new(Pos::Propn, lower);
        }
        self.by_suffix(&lower)
    }

    fn by_suffix(&self, word: &str) -> Tagged {
        let long = word.chars().count() > 4;
        if long && word.ends_with("ly") {
            return Tagged::new(Pos::Adv, word);
        }
        if long && word.ends_with("ing") {
            return Tagged::verbal(Pos::Verb, fallback_stem(word, "ing"), VerbForm::Gerund);
        }
        if word.len() > 3 && word.ends_with("ed") {
            return Tagged::verbal(Pos::Verb, fallback_stem(word, "ed"), VerbForm::PastOrParticiple);
        }
        const ADJECTIVE_SUFFIXES: &[&str] = &[
            "ous", "ful", "ive", "able", "ible", "less", "ish", "ical", "tial", "cial", "ual", "onal",
            "ntal", "ural", "ic",
        ];
        if long && ADJECTIVE_SUFFIXES.iter().any(|s| word.ends_with(s)) {
            return Tagged::new(Pos::Adj, word);
        }
        if long && ["ize", "ise", "ify"].iter().any(|s| word.ends_with(s)) {
            return Tagged::verbal(Pos::Verb, word, VerbForm::Base);
        }
        Tagged::new(Pos::Noun, self.noun_lemma(word))
    }

    /// Resolve ambiguous tags using already-resolved left context
    fn resolve(&self, tokens: &[RawToken], tagged: &mut [Tagged]) {
        for i in 0..tagged.len() {
            let lower = tokens[i].text.replace('\u{2019}', "'").to_lowercase();
            let prev = i.checked_sub(1).map(|p| tagged[p].clone());
            let prev_pos = prev.as_ref().map(|t| t.pos);
            let next_pos = tagged.get(i + 1).map(|t| t.pos);

            match lower.as_str() {
                "to" => {
                    if self.next_is_verb_base(tokens, i) {
                        tagged[i] = Tagged::new(Pos::Part, "to");
                    }
                    continue;
                }
                "that" => {
                    tagged[i] = match (prev_pos, next_pos) {
                        (Some(Pos::Noun | Pos::Propn), Some(Pos::Verb | Pos::Aux | Pos::Adv)) => {
                            Tagged::new(Pos::Pron, "that")
                        }
                        (Some(Pos::Verb | Pos::Adj), _) | (Some(Pos::Aux), Some(Pos::Pron | Pos::Det)) => {
                            Tagged::new(Pos::Sconj, "that")
                        }
                        (_, Some(Pos::Noun | Pos::Adj)) => Tagged::new(Pos::Det, "that"),
                        (_, Some(Pos::Punct) | None) | (Some(Pos::Adp), _) => Tagged::new(Pos::Pron, "that"),
                        _ => Tagged::new(Pos::Sconj, "that"),
                    };
                    continue;
                }
                "'s" => {
                    tagged[i] = match (prev_pos, next_pos) {
                        (Some(Pos::Pron), _) | (_, Some(Pos::Verb | Pos::Aux | Pos::Det | Pos::Adv | Pos::Adp)) => {
                            Tagged::verbal(Pos::Aux, "be", VerbForm::Present)
                        }
                        _ => Tagged::new(Pos::Part, "'s"),
                    };
                    continue;
                }
                "so" if prev.as_ref().is_some_and(|p| p.lemma == ",") => {
                    tagged[i] = Tagged::new(Pos::Cconj, "so");
                    continue;
                }
                "like" if matches!(prev_pos, Some(Pos::Pron | Pos::Noun | Pos::Propn | Pos::Aux | Pos::Part | Pos::Adv)) => {
                    if !matches!(prev.as_ref().map(|p| p.lemma.as_str()), Some("be")) {
                        tagged[i] = Tagged::verbal(Pos::Verb, "like", VerbForm::Base);
                    }
                    continue;
                }
                _ => {}
            }

            if CLAUSAL_ADPOSITIONS.contains(&lower.as_str()) && clause_follows(tagged, i) {
                tagged[i] = Tagged::new(Pos::Sconj, lower);
                continue;
            }

            let current = tagged[i].clone();
            match (current.pos, current.form) {
                // have/do before a verb is an auxiliary
                (Pos::Verb, Some(_)) if is_have_or_do(&current.lemma) && verb_ahead(tagged, i) => {
                    if !matches!(current.form, Some(VerbForm::Participle | VerbForm::Gerund)) {
                        tagged[i].pos = Pos::Aux;
                    }
                }
                (Pos::Verb, Some(form)) if nominal_context(prev_pos, prev.as_ref()) => match form {
                    VerbForm::Base | VerbForm::Present | VerbForm::Gerund => {
                        tagged[i] = Tagged::new(Pos::Noun, self.noun_lemma(&lower));
                    }
                    VerbForm::PastOrParticiple | VerbForm::Participle
                        if matches!(prev_pos, Some(Pos::Det | Pos::Adj)) =>
                    {
                        tagged[i] = Tagged::new(Pos::Adj, lower);
                    }
                    _ => {}
                },
                _ => {}
            }
        }
    }

    fn next_is_verb_base(&self, tokens: &[RawToken], i: usize) -> bool {
        let Some(next) = tokens.get(i + 1) else {
            return false;
        };
        let word = next.text.to_lowercase();
        self.verbs.contains(word.as_str()) || matches!(word.as_str(), "be" | "have" | "do")
    }

    /// Lemma of `word` when it is a form of a known verb
    pub(crate) fn verb_lemma(&self, word: &str) -> Option<(String, VerbForm)> {
        if let Some(&(lemma, form)) = self.irregular_verbs.get(word) {
            return Some((lemma.to_string(), form));
        }
        if self.verbs.contains(word) {
            return Some((word.to_string(), VerbForm::Base));
        }

        let known = |stem: &str| self.verbs.contains(stem);
        let inflections: [(&str, &str, VerbForm); 6] = [
            ("ies", "y", VerbForm::Present),
            ("es", "", VerbForm::Present),
            ("s", "", VerbForm::Present),
            ("ied", "y", VerbForm::PastOrParticiple),
            ("ed", "", VerbForm::PastOrParticiple),
            ("ing", "", VerbForm::Gerund),
        ];
        for (suffix, replacement, form) in inflections {
            let Some(stem) = word.strip_suffix(suffix) else {
                continue;
            };
            if stem.len() < 2 {
                continue;
            }
            let mut candidates = vec![format!("{}{}", stem, replacement)];
            if replacement.is_empty() && matches!(form, VerbForm::PastOrParticiple | VerbForm::Gerund) {
                candidates.push(format!("{}e", stem));
                if let Some(undoubled) = undouble(stem) {
                    candidates.push(undoubled);
                }
            }
            if let Some(lemma) = candidates.into_iter().find(|c| known(c)) {
                return Some((lemma, form));
            }
        }
        None
    }

    /// Base form of a known adjective, including comparatives
    pub(crate) fn adjective_lemma(&self, word: &str) -> Option<String> {
        match word {
            "better" | "best" => return Some("good".to_string()),
            "worse" | "worst" => return Some("bad".to_string()),
            _ => {}
        }
        if self.adjectives.contains(word) {
            return Some(word.to_string());
        }
        for suffix in ["est", "er"] {
            let Some(stem) = word.strip_suffix(suffix) else {
                continue;
            };
            let mut candidates = vec![stem.to_string(), format!("{}e", stem)];
            if let Some(undoubled) = undouble(stem) {
                candidates.push(undoubled);
            }
            if let Some(base) = stem.strip_suffix('i') {
                candidates.push(format!("{}y", base));
            }
            if let Some(lemma) = candidates.into_iter().find(|c| self.adjectives.contains(c.as_str())) {
                return Some(lemma);
            }
        }
        None
    }

    /// Singular form of a (possibly plural) noun
    pub(crate) fn noun_lemma(&self, word: &str) -> String {
        if let Some(lemma) = self.irregular_nouns.get(word) {
            return lemma.to_string();
        }
        if word.len() > 4 {
            if let Some(stem) = word.strip_suffix("ies") {
                return format!("{}y", stem);
            }
        }
        for suffix in ["sses", "shes", "ches", "xes", "zes"] {
            if word.ends_with(suffix) {
                return word[..word.len() - 2].to_string();
            }
        }
        let keeps_s = ["ss", "us", "is"].iter().any(|s| word.ends_with(s));
        if word.len() > 3 && !keeps_s {
            if let Some(stem) = word.strip_suffix('s') {
                return stem.to_string();
            }
        }
        word.to_string()
    }
}

fn clitic(lower: &str) -> Tagged {
    match lower {
        "n't" => Tagged::new(Pos::Part, "not"),
        "'m" | "'re" => Tagged::verbal(Pos::Aux, "be", VerbForm::Present),
        "'ve" => Tagged::verbal(Pos::Aux, "have", VerbForm::Present),
        "'ll" => Tagged::verbal(Pos::Aux, "will", VerbForm::Base),
        "'d" => Tagged::verbal(Pos::Aux, "would", VerbForm::Base),
        _ => Tagged::new(Pos::Part, lower),
    }
}

fn is_have_or_do(lemma: &str) -> bool {
    lemma == "have" || lemma == "do"
}

/// A verb follows within three tokens, skipping adverbs, negation and subjects
fn verb_ahead(tagged: &[Tagged], i: usize) -> bool {
    for next in tagged.iter().skip(i + 1).take(3) {
        match next.pos {
            Pos::Verb | Pos::Aux => return true,
            Pos::Adv | Pos::Part | Pos::Pron => continue,
            _ => return false,
        }
    }
    false
}

/// A subject and a verb follow before any punctuation
fn clause_follows(tagged: &[Tagged], i: usize) -> bool {
    let mut saw_subject = false;
    for next in tagged.iter().skip(i + 1).take(5) {
        match next.pos {
            Pos::Pron | Pos::Noun | Pos::Propn => saw_subject = true,
            Pos::Det | Pos::Adj | Pos::Num => {}
            Pos::Verb | Pos::Aux => return saw_subject,
            _ => return false,
        }
    }
    false
}

/// Left context in which a verb-looking word is really nominal
fn nominal_context(prev_pos: Option<Pos>, prev: Option<&Tagged>) -> bool {
    match prev_pos {
        Some(Pos::Det | Pos::Adj | Pos::Num) => true,
        Some(Pos::Pron) => prev.is_some_and(|p| POSSESSIVES.split_whitespace().any(|w| w == p.lemma)),
        Some(Pos::Part) => prev.is_some_and(|p| p.lemma == "'s"),
        Some(Pos::Adp) => true,
        _ => false,
    }
}

/// Past tense for finite past forms; participles after `have`/`be` are untensed
fn mark_tense(tagged: &mut [Tagged]) {
    for i in 0..tagged.len() {
        if !tagged[i].pos.is_verbal() {
            continue;
        }
        let tense = match tagged[i].form {
            Some(VerbForm::Past) => Some(Tense::Past),
            Some(VerbForm::Present) => Some(Tense::Present),
            Some(VerbForm::PastOrParticiple) if !after_perfect_or_passive(tagged, i) => Some(Tense::Past),
            _ => None,
        };
        tagged[i].tense = tense;
    }
}

fn after_perfect_or_passive(tagged: &[Tagged], i: usize) -> bool {
    for prev in tagged[..i].iter().rev().take(3) {
        match prev.pos {
            Pos::Aux if prev.lemma == "be" || prev.lemma == "have" => return true,
            Pos::Adv | Pos::Part | Pos::Pron => continue,
            _ => return false,
        }
    }
    false
}

/// Drop a doubled final consonant (`stopp` -> `stop`)
fn undouble(stem: &str) -> Option<String> {
    let bytes = stem.as_bytes();
    let n = bytes.len();
    let doubled = n >= 3
        && bytes[n - 1] == bytes[n - 2]
        && bytes[n - 1].is_ascii_alphabetic()
        && !b"aeioulsz".contains(&bytes[n - 1]);
    doubled.then(|| stem[..n - 1].to_string())
}

/// Best-effort stem for an unknown inflected word
fn fallback_stem(word: &str, suffix: &str) -> String {
    if suffix == "ed" {
        if let Some(stem) = word.strip_suffix("ied") {
            return format!("{}y", stem);
        }
    }
    let stem = word.strip_suffix(suffix).unwrap_or(word);
    undouble(stem).unwrap_or_else(|| stem.to_string())
}
