// 词性标注：Tagger 是外部标注器的接口，HeuristicTagger 是内置的规则标注器
// 两者都输出 Penn Treebank 标签

use crate::inflection::{Family, InflectionResolver};
use crate::tokenizer::{is_word, tokenize};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaggedToken {
    pub text: String,
    pub tag: String,
}

impl TaggedToken {
    pub fn new(text: impl Into<String>, tag: impl Into<String>) -> Self {
        TaggedToken {
            text: text.into(),
            tag: tag.into(),
        }
    }
}

pub trait Tagger {
    // 对一个句子分词并标注，按原文顺序返回
    fn tag(&self, sentence: &str) -> Vec<TaggedToken>;
}

const CLOSED_CLASS: &[(&str, &str)] = &[
    ("the", "DT"),
    ("a", "DT"),
    ("an", "DT"),
    ("this", "DT"),
    ("that", "DT"),
    ("these", "DT"),
    ("those", "DT"),
    ("every", "DT"),
    ("each", "DT"),
    ("some", "DT"),
    ("any", "DT"),
    ("no", "DT"),
    ("another", "DT"),
    ("all", "PDT"),
    ("both", "PDT"),
    ("in", "IN"),
    ("on", "IN"),
    ("at", "IN"),
    ("of", "IN"),
    ("for", "IN"),
    ("with", "IN"),
    ("by", "IN"),
    ("from", "IN"),
    ("about", "IN"),
    ("into", "IN"),
    ("over", "IN"),
    ("under", "IN"),
    ("after", "IN"),
    ("before", "IN"),
    ("through", "IN"),
    ("during", "IN"),
    ("without", "IN"),
    ("between", "IN"),
    ("against", "IN"),
    ("among", "IN"),
    ("around", "IN"),
    ("behind", "IN"),
    ("near", "IN"),
    ("because", "IN"),
    ("if", "IN"),
    ("while", "IN"),
    ("until", "IN"),
    ("than", "IN"),
    ("since", "IN"),
    ("though", "IN"),
    ("although", "IN"),
    ("unless", "IN"),
    ("to", "TO"),
    ("and", "CC"),
    ("or", "CC"),
    ("but", "CC"),
    ("nor", "CC"),
    ("yet", "CC"),
    ("i", "PRP"),
    ("you", "PRP"),
    ("he", "PRP"),
    ("she", "PRP"),
    ("it", "PRP"),
    ("we", "PRP"),
    ("they", "PRP"),
    ("me", "PRP"),
    ("him", "PRP"),
    ("us", "PRP"),
    ("them", "PRP"),
    ("myself", "PRP"),
    ("yourself", "PRP"),
    ("himself", "PRP"),
    ("herself", "PRP"),
    ("itself", "PRP"),
    ("ourselves", "PRP"),
    ("themselves", "PRP"),
    ("my", "PRP$"),
    ("your", "PRP$"),
    ("his", "PRP$"),
    ("its", "PRP$"),
    ("our", "PRP$"),
    ("their", "PRP$"),
    ("can", "MD"),
    ("could", "MD"),
    ("will", "MD"),
    ("would", "MD"),
    ("shall", "MD"),
    ("should", "MD"),
    ("may", "MD"),
    ("might", "MD"),
    ("must", "MD"),
    ("ca", "MD"),
    ("wo", "MD"),
    ("who", "WP"),
    ("whom", "WP"),
    ("what", "WP"),
    ("whose", "WP$"),
    ("which", "WDT"),
    ("where", "WRB"),
    ("when", "WRB"),
    ("why", "WRB"),
    ("how", "WRB"),
    ("not", "RB"),
    ("very", "RB"),
    ("too", "RB"),
    ("also", "RB"),
    ("just", "RB"),
    ("really", "RB"),
    ("always", "RB"),
    ("never", "RB"),
    ("often", "RB"),
    ("sometimes", "RB"),
    ("quite", "RB"),
    ("again", "RB"),
    ("already", "RB"),
    ("still", "RB"),
    ("here", "RB"),
    ("now", "RB"),
    ("then", "RB"),
    ("soon", "RB"),
    ("only", "RB"),
    ("so", "RB"),
    ("together", "RB"),
    ("away", "RB"),
    ("up", "RP"),
    ("down", "RP"),
    ("out", "RP"),
    ("off", "RP"),
    ("oh", "UH"),
    ("wow", "UH"),
    ("yes", "UH"),
    ("hello", "UH"),
    ("please", "UH"),
    ("one", "CD"),
    ("two", "CD"),
    ("three", "CD"),
    ("four", "CD"),
    ("five", "CD"),
    ("six", "CD"),
    ("seven", "CD"),
    ("eight", "CD"),
    ("nine", "CD"),
    ("ten", "CD"),
    ("be", "VB"),
    ("am", "VBP"),
    ("are", "VBP"),
    ("is", "VBZ"),
    ("was", "VBD"),
    ("were", "VBD"),
    ("been", "VBN"),
    ("being", "VBG"),
    ("has", "VBZ"),
    ("does", "VBZ"),
    ("did", "VBD"),
    ("more", "JJR"),
    ("less", "JJR"),
    ("better", "JJR"),
    ("worse", "JJR"),
    ("most", "JJS"),
    ("least", "JJS"),
    ("best", "JJS"),
    ("worst", "JJS"),
];

const HAVE_FORMS: &[&str] = &["have", "has", "had", "having", "'ve", "'d"];
const BE_FORMS: &[&str] = &[
    "be", "am", "is", "are", "was", "were", "been", "being", "'m", "'re", "'s",
];
const PLURAL_SUBJECTS: &[&str] = &["i", "you", "we", "they"];
const SINGULAR_SUBJECTS: &[&str] = &["he", "she", "it"];

// 常见的规则动词原形（不规则动词由屈折表提供）
const VERB_BASES: &[&str] = &[
    "play", "walk", "talk", "want", "like", "love", "look", "watch", "work", "help", "need",
    "start", "try", "ask", "call", "move", "live", "believe", "open", "close", "turn", "jump",
    "dance", "cook", "clean", "study", "learn", "visit", "wait", "stay", "enjoy", "finish",
    "listen", "answer", "carry", "hope", "use", "change", "decide", "face", "smile", "laugh",
    "cry", "travel", "arrive", "climb", "return", "remember", "show", "seem", "happen",
    "follow", "pick", "push", "pull", "touch", "kick", "wash", "wish", "worry", "agree",
];

const ADJECTIVES: &[&str] = &[
    "good", "bad", "big", "small", "happy", "sad", "soft", "hard", "new", "old", "young", "long",
    "short", "tall", "high", "low", "hot", "cold", "warm", "cool", "nice", "great", "little",
    "large", "fast", "slow", "quick", "easy", "difficult", "beautiful", "pretty", "kind", "dark",
    "bright", "dirty", "rich", "poor", "strong", "weak", "heavy", "busy", "free", "full", "empty",
    "early", "late", "real", "true", "wrong", "sure", "ready", "quiet", "loud", "safe", "funny",
    "ugly", "friendly", "lovely", "lonely", "silly", "red", "blue", "green", "yellow", "white",
    "black", "brown", "wet", "dry", "wide", "deep", "simple", "important", "different", "same",
    "favorite", "special", "strange", "famous", "tired", "hungry", "angry", "clever", "brave",
    "gentle", "proud", "wild", "thin", "fat", "sweet", "fine", "able",
];

// -ly 结尾但不是副词的词
const NOT_ADVERB_LY: &[&str] = &[
    "family", "fly", "reply", "supply", "apply", "july", "italy", "lily", "belly", "jelly",
    "holy", "rely", "ally", "bully",
];

const NOT_GERUND_ING: &[&str] = &[
    "thing", "something", "anything", "nothing", "everything", "king", "ring", "spring",
    "string", "morning", "evening", "ceiling", "wedding", "pudding", "sing", "bring", "wing",
    "swing", "sting", "ping",
];

const NOT_PAST_ED: &[&str] = &[
    "bed", "red", "need", "seed", "feed", "speed", "weed", "shed", "sled", "hundred", "sacred",
    "naked", "wicked", "breed", "bleed",
];

const ADJECTIVE_SUFFIXES: &[&str] = &["ous", "ful", "able", "ible", "less", "ical"];

// 没有配置外部标注器时使用
#[derive(Debug, Clone, Copy, Default)]
pub struct HeuristicTagger {
    resolver: InflectionResolver,
}

impl HeuristicTagger {
    pub fn new() -> Self {
        HeuristicTagger {
            resolver: InflectionResolver::new(),
        }
    }

    fn is_verb_base(&self, word: &str) -> bool {
        VERB_BASES.contains(&word) || self.resolver.irregular_verb(word).is_some()
    }

    fn is_adjective(&self, word: &str) -> bool {
        ADJECTIVES.contains(&word)
    }

    fn inflects_from(&self, word: &str, family: Family, known: impl Fn(&str) -> bool) -> bool {
        self.resolver
            .family_candidates(word, family)
            .iter()
            .any(|candidate| known(candidate))
    }

    fn tag_token(&self, tokens: &[String], i: usize, prev_tag: Option<&str>) -> String {
        let token = tokens[i].as_str();
        let lower = token.to_lowercase();
        let prev_lower = i
            .checked_sub(1)
            .map(|p| tokens[p].to_lowercase())
            .unwrap_or_default();
        let next_lower = tokens.get(i + 1).map(|t| t.to_lowercase()).unwrap_or_default();

        if !token.chars().any(char::is_alphanumeric) {
            return punctuation_tag(token).to_string();
        }
        if token.chars().all(|c| c.is_ascii_digit() || c == ',' || c == '.') {
            return "CD".to_string();
        }
        if let Some(tag) = contraction_tag(&lower, prev_tag) {
            return tag.to_string();
        }

        // 需要上下文判断的封闭词
        match lower.as_str() {
            "there" => {
                return if BE_FORMS.contains(&next_lower.as_str()) { "EX" } else { "RB" }.to_string();
            }
            "her" => {
                let before_noun = tokens.get(i + 1).is_some_and(|t| is_word(t))
                    && !CLOSED_CLASS.iter().any(|(w, _)| *w == next_lower);
                return if before_noun { "PRP$" } else { "PRP" }.to_string();
            }
            "have" | "do" => {
                return match prev_tag {
                    Some("MD") | Some("TO") => "VB",
                    _ => "VBP",
                }
                .to_string();
            }
            "had" => return "VBD".to_string(),
            _ => {}
        }
        if let Some((_, tag)) = CLOSED_CLASS.iter().find(|(w, _)| *w == lower) {
            return tag.to_string();
        }

        let sentence_initial = tokens[..i].iter().all(|t| !is_word(t));
        let capitalized = token.chars().next().is_some_and(char::is_uppercase)
            && token.chars().any(char::is_lowercase);
        if capitalized && !sentence_initial {
            return "NNP".to_string();
        }

        let after_determiner = matches!(prev_tag, Some("DT") | Some("PRP$") | Some("JJ") | Some("POS"));
        let after_have = HAVE_FORMS.contains(&prev_lower.as_str());
        let after_be = BE_FORMS.contains(&prev_lower.as_str());

        if !after_determiner {
            if matches!(prev_tag, Some("MD")) && self.is_verb_base(&lower) {
                return "VB".to_string();
            }
            if matches!(prev_tag, Some("TO")) && self.is_verb_base(&lower) {
                return "VB".to_string();
            }
            if self.resolver.irregular_past_base(&lower).is_some() && !self.is_verb_base(&lower) {
                return if after_have || after_be { "VBN" } else { "VBD" }.to_string();
            }
            if PLURAL_SUBJECTS.contains(&prev_lower.as_str()) && self.is_verb_base(&lower) {
                return "VBP".to_string();
            }
            if SINGULAR_SUBJECTS.contains(&prev_lower.as_str())
                && self.inflects_from(&lower, Family::VerbThirdPerson, |w| self.is_verb_base(w))
            {
                return "VBZ".to_string();
            }
        }

        // 不规则复数、比较级、最高级 (mice, children, further, eldest)
        if self
            .resolver
            .irregular_base(&lower, Family::NounPlural)
            .is_some_and(|base| base != lower)
        {
            return "NNS".to_string();
        }
        if self.resolver.irregular_base(&lower, Family::Comparative).is_some() {
            return "JJR".to_string();
        }
        if self.resolver.irregular_base(&lower, Family::Superlative).is_some() {
            return "JJS".to_string();
        }

        if self.is_adjective(&lower) {
            return "JJ".to_string();
        }
        suffix_tag(self, &lower, after_have || after_be).to_string()
    }
}

fn suffix_tag(tagger: &HeuristicTagger, lower: &str, after_auxiliary: bool) -> &'static str {
    let len = lower.chars().count();

    if lower.ends_with("ly") && len > 3 && !NOT_ADVERB_LY.contains(&lower) {
        return "RB";
    }
    if lower.ends_with("ing") && len > 4 && !NOT_GERUND_ING.contains(&lower) {
        return "VBG";
    }
    if lower.ends_with("ed") && len > 3 && !NOT_PAST_ED.contains(&lower) {
        return if after_auxiliary { "VBN" } else { "VBD" };
    }
    if lower.ends_with("est")
        && len > 4
        && tagger.inflects_from(lower, Family::Superlative, |w| tagger.is_adjective(w))
    {
        return "JJS";
    }
    if lower.ends_with("er")
        && len > 3
        && tagger.inflects_from(lower, Family::Comparative, |w| tagger.is_adjective(w))
    {
        return "JJR";
    }
    if ADJECTIVE_SUFFIXES.iter().any(|suffix| lower.ends_with(suffix)) && len > 5 {
        return "JJ";
    }
    if lower.ends_with('s') && len > 3 && !lower.ends_with("ss") {
        return "NNS";
    }
    "NN"
}

fn punctuation_tag(token: &str) -> &'static str {
    match token {
        "." | "!" | "?" => ".",
        "," => ",",
        ";" | ":" | "-" | "—" | "–" => ":",
        "\"" | "“" | "``" => "``",
        "”" | "''" | "'" => "''",
        "(" | "[" | "{" => "(",
        ")" | "]" | "}" => ")",
        "$" => "$",
        "#" => "#",
        _ => "SYM",
    }
}

fn contraction_tag(lower: &str, prev_tag: Option<&str>) -> Option<&'static str> {
    let tag = match lower {
        "n't" => "RB",
        "'m" | "'re" | "'ve" => "VBP",
        "'ll" | "'d" => "MD",
        "'s" => match prev_tag {
            Some("PRP") | Some("WP") | Some("EX") => "VBZ",
            _ => "POS",
        },
        _ => return None,
    };
    Some(tag)
}

impl Tagger for HeuristicTagger {
    fn tag(&self, sentence: &str) -> Vec<TaggedToken> {
        self.tag_tokens(&tokenize(sentence))
    }
}

impl HeuristicTagger {
    // 对已经分好的词标注
    pub fn tag_tokens(&self, tokens: &[String]) -> Vec<TaggedToken> {
        let mut tagged: Vec<TaggedToken> = Vec::with_capacity(tokens.len());
        for i in 0..tokens.len() {
            let prev_tag = tagged.last().map(|t| t.tag.as_str());
            let tag = self.tag_token(tokens, i, prev_tag);
            tagged.push(TaggedToken::new(tokens[i].clone(), tag));
        }
        tagged
    }
}
