use std::collections::HashMap;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Serialize, Serializer};

// ---------------------------------------------------------------------------
// Tag set
// ---------------------------------------------------------------------------

#[allow(clippy::upper_case_acronyms)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum PosTag {
    CC,
    CD,
    DT,
    EX,
    IN,
    JJ,
    JJR,
    JJS,
    MD,
    NN,
    NNS,
    POS,
    PRP,
    PRPS,
    RB,
    RBR,
    RBS,
    SYM,
    TO,
    UH,
    VB,
    VBD,
    VBG,
    VBN,
    VBP,
    VBZ,
    WDT,
    WP,
    WPS,
    WRB,
}

impl PosTag {
    pub fn as_str(self) -> &'static str {
        match self {
            PosTag::CC => "CC",
            PosTag::CD => "CD",
            PosTag::DT => "DT",
            PosTag::EX => "EX",
            PosTag::IN => "IN",
            PosTag::JJ => "JJ",
            PosTag::JJR => "JJR",
            PosTag::JJS => "JJS",
            PosTag::MD => "MD",
            PosTag::NN => "NN",
            PosTag::NNS => "NNS",
            PosTag::POS => "POS",
            PosTag::PRP => "PRP",
            PosTag::PRPS => "PRP$",
            PosTag::RB => "RB",
            PosTag::RBR => "RBR",
            PosTag::RBS => "RBS",
            PosTag::SYM => "SYM",
            PosTag::TO => "TO",
            PosTag::UH => "UH",
            PosTag::VB => "VB",
            PosTag::VBD => "VBD",
            PosTag::VBG => "VBG",
            PosTag::VBN => "VBN",
            PosTag::VBP => "VBP",
            PosTag::VBZ => "VBZ",
            PosTag::WDT => "WDT",
            PosTag::WP => "WP",
            PosTag::WPS => "WP$",
            PosTag::WRB => "WRB",
        }
    }
}

impl std::fmt::Display for PosTag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for PosTag {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Closed-class lexicon
// ---------------------------------------------------------------------------

const LEXICON: &[(&str, PosTag)] = &[
    // Determiners
    ("the", PosTag::DT),
    ("a", PosTag::DT),
    ("an", PosTag::DT),
    ("this", PosTag::DT),
    ("that", PosTag::DT),
    ("these", PosTag::DT),
    ("those", PosTag::DT),
    ("every", PosTag::DT),
    ("each", PosTag::DT),
    ("some", PosTag::DT),
    ("any", PosTag::DT),
    ("no", PosTag::DT),
    ("another", PosTag::DT),
    ("all", PosTag::DT),
    ("both", PosTag::DT),
    ("either", PosTag::DT),
    ("neither", PosTag::DT),
    // Pronouns
    ("i", PosTag::PRP),
    ("me", PosTag::PRP),
    ("you", PosTag::PRP),
    ("he", PosTag::PRP),
    ("him", PosTag::PRP),
    ("she", PosTag::PRP),
    ("it", PosTag::PRP),
    ("we", PosTag::PRP),
    ("us", PosTag::PRP),
    ("they", PosTag::PRP),
    ("them", PosTag::PRP),
    ("myself", PosTag::PRP),
    ("yourself", PosTag::PRP),
    ("himself", PosTag::PRP),
    ("herself", PosTag::PRP),
    ("itself", PosTag::PRP),
    ("ourselves", PosTag::PRP),
    ("themselves", PosTag::PRP),
    ("my", PosTag::PRPS),
    ("your", PosTag::PRPS),
    ("his", PosTag::PRPS),
    ("her", PosTag::PRPS),
    ("its", PosTag::PRPS),
    ("our", PosTag::PRPS),
    ("their", PosTag::PRPS),
    ("who", PosTag::WP),
    ("whom", PosTag::WP),
    ("what", PosTag::WP),
    ("whose", PosTag::WPS),
    ("which", PosTag::WDT),
    ("when", PosTag::WRB),
    ("where", PosTag::WRB),
    ("why", PosTag::WRB),
    ("how", PosTag::WRB),
    ("there", PosTag::EX),
    // Prepositions and subordinators
    ("of", PosTag::IN),
    ("in", PosTag::IN),
    ("on", PosTag::IN),
    ("at", PosTag::IN),
    ("by", PosTag::IN),
    ("for", PosTag::IN),
    ("with", PosTag::IN),
    ("from", PosTag::IN),
    ("about", PosTag::IN),
    ("into", PosTag::IN),
    ("onto", PosTag::IN),
    ("over", PosTag::IN),
    ("after", PosTag::IN),
    ("before", PosTag::IN),
    ("between", PosTag::IN),
    ("through", PosTag::IN),
    ("during", PosTag::IN),
    ("without", PosTag::IN),
    ("under", PosTag::IN),
    ("against", PosTag::IN),
    ("among", PosTag::IN),
    ("within", PosTag::IN),
    ("upon", PosTag::IN),
    ("since", PosTag::IN),
    ("until", PosTag::IN),
    ("because", PosTag::IN),
    ("although", PosTag::IN),
    ("though", PosTag::IN),
    ("while", PosTag::IN),
    ("if", PosTag::IN),
    ("than", PosTag::IN),
    ("as", PosTag::IN),
    ("like", PosTag::IN),
    ("near", PosTag::IN),
    ("across", PosTag::IN),
    ("behind", PosTag::IN),
    ("beyond", PosTag::IN),
    ("toward", PosTag::IN),
    ("towards", PosTag::IN),
    ("around", PosTag::IN),
    ("per", PosTag::IN),
    ("via", PosTag::IN),
    ("whether", PosTag::IN),
    ("unless", PosTag::IN),
    // Conjunctions
    ("and", PosTag::CC),
    ("or", PosTag::CC),
    ("but", PosTag::CC),
    ("nor", PosTag::CC),
    ("yet", PosTag::CC),
    ("plus", PosTag::CC),
    ("to", PosTag::TO),
    // Modals, including the stems left by splitting "can't" and "won't"
    ("can", PosTag::MD),
    ("ca", PosTag::MD),
    ("could", PosTag::MD),
    ("will", PosTag::MD),
    ("wo", PosTag::MD),
    ("would", PosTag::MD),
    ("shall", PosTag::MD),
    ("should", PosTag::MD),
    ("may", PosTag::MD),
    ("might", PosTag::MD),
    ("must", PosTag::MD),
    ("'ll", PosTag::MD),
    ("'d", PosTag::MD),
    // Auxiliaries
    ("be", PosTag::VB),
    ("am", PosTag::VBP),
    ("'m", PosTag::VBP),
    ("is", PosTag::VBZ),
    ("are", PosTag::VBP),
    ("'re", PosTag::VBP),
    ("was", PosTag::VBD),
    ("were", PosTag::VBD),
    ("been", PosTag::VBN),
    ("being", PosTag::VBG),
    ("have", PosTag::VBP),
    ("'ve", PosTag::VBP),
    ("has", PosTag::VBZ),
    ("had", PosTag::VBD),
    ("having", PosTag::VBG),
    ("do", PosTag::VBP),
    ("does", PosTag::VBZ),
    ("did", PosTag::VBD),
    ("done", PosTag::VBN),
    ("doing", PosTag::VBG),
    // Frequent irregular verb forms
    ("said", PosTag::VBD),
    ("says", PosTag::VBZ),
    ("made", PosTag::VBD),
    ("went", PosTag::VBD),
    ("gone", PosTag::VBN),
    ("got", PosTag::VBD),
    ("took", PosTag::VBD),
    ("taken", PosTag::VBN),
    ("came", PosTag::VBD),
    ("saw", PosTag::VBD),
    ("seen", PosTag::VBN),
    ("knew", PosTag::VBD),
    ("known", PosTag::VBN),
    ("thought", PosTag::VBD),
    ("told", PosTag::VBD),
    ("found", PosTag::VBD),
    ("gave", PosTag::VBD),
    ("given", PosTag::VBN),
    ("sat", PosTag::VBD),
    ("ran", PosTag::VBD),
    ("began", PosTag::VBD),
    ("begun", PosTag::VBN),
    ("felt", PosTag::VBD),
    ("left", PosTag::VBD),
    ("kept", PosTag::VBD),
    ("stood", PosTag::VBD),
    ("brought", PosTag::VBD),
    ("heard", PosTag::VBD),
    ("meant", PosTag::VBD),
    ("became", PosTag::VBD),
    ("wrote", PosTag::VBD),
    ("written", PosTag::VBN),
    ("spoke", PosTag::VBD),
    ("spoken", PosTag::VBN),
    ("get", PosTag::VB),
    ("go", PosTag::VB),
    ("make", PosTag::VB),
    ("know", PosTag::VB),
    ("think", PosTag::VB),
    ("see", PosTag::VB),
    ("come", PosTag::VB),
    ("want", PosTag::VB),
    ("use", PosTag::VB),
    ("say", PosTag::VB),
    // Adverbs
    ("not", PosTag::RB),
    ("n't", PosTag::RB),
    ("very", PosTag::RB),
    ("also", PosTag::RB),
    ("just", PosTag::RB),
    ("only", PosTag::RB),
    ("too", PosTag::RB),
    ("even", PosTag::RB),
    ("never", PosTag::RB),
    ("always", PosTag::RB),
    ("often", PosTag::RB),
    ("now", PosTag::RB),
    ("then", PosTag::RB),
    ("here", PosTag::RB),
    ("still", PosTag::RB),
    ("already", PosTag::RB),
    ("again", PosTag::RB),
    ("ever", PosTag::RB),
    ("soon", PosTag::RB),
    ("perhaps", PosTag::RB),
    ("quite", PosTag::RB),
    ("rather", PosTag::RB),
    ("almost", PosTag::RB),
    ("so", PosTag::RB),
    ("well", PosTag::RB),
    ("however", PosTag::RB),
    ("therefore", PosTag::RB),
    ("thus", PosTag::RB),
    ("away", PosTag::RB),
    ("together", PosTag::RB),
    ("more", PosTag::RBR),
    ("less", PosTag::RBR),
    ("most", PosTag::RBS),
    ("least", PosTag::RBS),
    // Adjectives
    ("good", PosTag::JJ),
    ("new", PosTag::JJ),
    ("first", PosTag::JJ),
    ("last", PosTag::JJ),
    ("long", PosTag::JJ),
    ("great", PosTag::JJ),
    ("little", PosTag::JJ),
    ("own", PosTag::JJ),
    ("other", PosTag::JJ),
    ("old", PosTag::JJ),
    ("right", PosTag::JJ),
    ("big", PosTag::JJ),
    ("high", PosTag::JJ),
    ("small", PosTag::JJ),
    ("large", PosTag::JJ),
    ("next", PosTag::JJ),
    ("early", PosTag::JJ),
    ("young", PosTag::JJ),
    ("few", PosTag::JJ),
    ("bad", PosTag::JJ),
    ("same", PosTag::JJ),
    ("such", PosTag::JJ),
    ("many", PosTag::JJ),
    ("much", PosTag::JJ),
    ("better", PosTag::JJR),
    ("worse", PosTag::JJR),
    ("best", PosTag::JJS),
    ("worst", PosTag::JJS),
    // Numbers
    ("zero", PosTag::CD),
    ("one", PosTag::CD),
    ("two", PosTag::CD),
    ("three", PosTag::CD),
    ("four", PosTag::CD),
    ("five", PosTag::CD),
    ("six", PosTag::CD),
    ("seven", PosTag::CD),
    ("eight", PosTag::CD),
    ("nine", PosTag::CD),
    ("ten", PosTag::CD),
    ("hundred", PosTag::CD),
    ("thousand", PosTag::CD),
    ("million", PosTag::CD),
    // Interjections
    ("oh", PosTag::UH),
    ("yes", PosTag::UH),
    ("hello", PosTag::UH),
    ("ok", PosTag::UH),
    ("okay", PosTag::UH),
    ("please", PosTag::UH),
];

static NUMBER_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[+-]?\d[\d,.]*%?$").unwrap());

const ADJECTIVE_SUFFIXES: &[&str] = &["ous", "ful", "ive", "able", "ible", "less", "ical", "ish"];
const NOUN_SUFFIXES: &[&str] = &[
    "tion", "sion", "ment", "ness", "ity", "ance", "ence", "ship", "ism", "ist",
];

// ---------------------------------------------------------------------------
// Tagger
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct Tagger {
    lexicon: HashMap<&'static str, PosTag>,
}

impl Default for Tagger {
    fn default() -> Self {
        Self::new()
    }
}

impl Tagger {
    pub fn new() -> Self {
        Self {
            lexicon: LEXICON.iter().copied().collect(),
        }
    }

    pub fn tag(&self, words: &[String]) -> Vec<(String, PosTag)> {
        let mut tags: Vec<PosTag> = Vec::with_capacity(words.len());
        let mut known: Vec<bool> = Vec::with_capacity(words.len());

        for (i, word) in words.iter().enumerate() {
            let prev = i.checked_sub(1).map(|p| tags[p]);
            match self.lexicon.get(word.as_str()) {
                Some(&tag) => {
                    tags.push(tag);
                    known.push(true);
                }
                None => {
                    tags.push(guess(word, prev));
                    known.push(false);
                }
            }
        }

        // Contextual corrections only touch guessed tags.
        for i in 1..tags.len() {
            if known[i] {
                continue;
            }
            let prev_word = words[i - 1].as_str();
            tags[i] = match (tags[i - 1], tags[i]) {
                (PosTag::MD, PosTag::NN | PosTag::VBP) => PosTag::VB,
                (PosTag::TO, PosTag::VBP) => PosTag::VB,
                (PosTag::DT | PosTag::PRPS, PosTag::VB | PosTag::VBP) => PosTag::NN,
                (PosTag::DT | PosTag::PRPS, PosTag::VBD) => PosTag::VBN,
                (_, PosTag::VBD) if is_perfect_or_passive_aux(prev_word) => PosTag::VBN,
                (_, tag) => tag,
            };
        }

        words.iter().cloned().zip(tags).collect()
    }
}

fn is_perfect_or_passive_aux(word: &str) -> bool {
    matches!(
        word,
        "have" | "has" | "had" | "'ve" | "be" | "is" | "are" | "was" | "were" | "been" | "being"
    )
}

fn guess(word: &str, prev: Option<PosTag>) -> PosTag {
    if NUMBER_RE.is_match(word) {
        return PosTag::CD;
    }
    if !word.chars().any(char::is_alphanumeric) {
        return PosTag::SYM;
    }
    if word == "'s" {
        return match prev {
            Some(PosTag::PRP | PosTag::WP | PosTag::EX | PosTag::DT) => PosTag::VBZ,
            _ => PosTag::POS,
        };
    }

    let len = word.chars().count();
    if len > 4 && word.ends_with("ing") {
        return PosTag::VBG;
    }
    if len > 3 && word.ends_with("ed") {
        return PosTag::VBD;
    }
    if len > 3 && word.ends_with("ly") {
        return PosTag::RB;
    }
    if ADJECTIVE_SUFFIXES.iter().any(|s| word.ends_with(s)) && len > 4 {
        return PosTag::JJ;
    }
    if NOUN_SUFFIXES.iter().any(|s| word.ends_with(s)) && len > 4 {
        return PosTag::NN;
    }
    if len > 3
        && word.ends_with('s')
        && !(word.ends_with("ss") || word.ends_with("us") || word.ends_with("is"))
    {
        return PosTag::NNS;
    }
    PosTag::NN
}
