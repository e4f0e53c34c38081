// 屈折形还原：每个规则族是有序的后缀规则表，第一条匹配的规则生效
// 不规则表总是先于后缀规则

use crate::models::VerbForms;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Family {
    NounPlural,
    VerbPast,
    VerbGerund,
    VerbThirdPerson,
    Comparative,
    Superlative,
}

impl Family {
    pub const ALL: [Family; 6] = [
        Family::NounPlural,
        Family::VerbPast,
        Family::VerbGerund,
        Family::VerbThirdPerson,
        Family::Comparative,
        Family::Superlative,
    ];

    // 根据 Penn 词性标签选择规则族
    pub fn for_tag(tag: &str) -> Option<Family> {
        match tag {
            "NNS" | "NNPS" => Some(Family::NounPlural),
            "VBD" | "VBN" => Some(Family::VerbPast),
            "VBG" => Some(Family::VerbGerund),
            "VBZ" => Some(Family::VerbThirdPerson),
            "JJR" | "RBR" => Some(Family::Comparative),
            "JJS" | "RBS" => Some(Family::Superlative),
            _ => None,
        }
    }

    fn rules(self) -> &'static [SuffixRule] {
        match self {
            Family::NounPlural => NOUN_PLURAL_RULES,
            Family::VerbPast => VERB_PAST_RULES,
            Family::VerbGerund => VERB_GERUND_RULES,
            Family::VerbThirdPerson => VERB_THIRD_PERSON_RULES,
            Family::Comparative => COMPARATIVE_RULES,
            Family::Superlative => SUPERLATIVE_RULES,
        }
    }

    fn irregular(self, word: &str) -> Vec<&'static str> {
        let table: &'static [(&'static str, &'static str)] = match self {
            Family::NounPlural => IRREGULAR_PLURALS,
            Family::VerbGerund => IRREGULAR_GERUNDS,
            Family::VerbThirdPerson => IRREGULAR_THIRD_PERSON,
            Family::Comparative => IRREGULAR_COMPARATIVES,
            Family::Superlative => IRREGULAR_SUPERLATIVES,
            Family::VerbPast => {
                let mut bases: Vec<&'static str> = IRREGULAR_VERBS
                    .iter()
                    .filter(|v| v.past == word || v.participle == word)
                    .map(|v| v.base)
                    .collect();
                bases.extend(lookup(IRREGULAR_PAST_VARIANTS, word));
                return bases;
            }
        };
        lookup(table, word).collect()
    }
}

#[derive(Debug, Clone, Copy)]
enum Transform {
    Replace(&'static str),
    // 每个结尾各生成一个候选
    Alternatives(&'static [&'static str]),
    // running -> run
    Undouble,
    // 词干加 e 与不加 e 两个候选
    RestoreE,
    // 后缀匹配但不是屈折形 (glass)
    Keep,
}

#[derive(Debug, Clone, Copy)]
struct SuffixRule {
    suffix: &'static str,
    min_stem: usize,
    transform: Transform,
}

const fn rule(suffix: &'static str, min_stem: usize, transform: Transform) -> SuffixRule {
    SuffixRule {
        suffix,
        min_stem,
        transform,
    }
}

impl SuffixRule {
    // None 表示规则不适用，继续下一条
    fn apply(&self, word: &str) -> Option<Vec<String>> {
        let stem = word.strip_suffix(self.suffix)?;
        if stem.chars().count() < self.min_stem {
            return None;
        }

        match self.transform {
            Transform::Replace(with) => Some(vec![format!("{stem}{with}")]),
            Transform::Alternatives(endings) => Some(
                endings
                    .iter()
                    .map(|ending| format!("{stem}{ending}"))
                    .collect(),
            ),
            Transform::Undouble => {
                let undoubled = undouble(stem)?;
                // 以 l/s/z 结尾的双写通常是原形的一部分 (call, pass, buzz)
                if stem.ends_with(['l', 's', 'z']) {
                    Some(vec![stem.to_string(), undoubled.to_string()])
                } else {
                    Some(vec![undoubled.to_string(), stem.to_string()])
                }
            }
            Transform::RestoreE => {
                let with_e = format!("{stem}e");
                if ends_short_cvc(stem) {
                    Some(vec![with_e, stem.to_string()])
                } else {
                    Some(vec![stem.to_string(), with_e])
                }
            }
            Transform::Keep => Some(Vec::new()),
        }
    }
}

const NOUN_PLURAL_RULES: &[SuffixRule] = &[
    rule("ies", 1, Transform::Alternatives(&["y", "ie"])),
    rule("ves", 1, Transform::Alternatives(&["f", "fe", "ve"])),
    rule("sses", 1, Transform::Replace("ss")),
    rule("shes", 1, Transform::Replace("sh")),
    rule("ches", 1, Transform::Replace("ch")),
    rule("xes", 1, Transform::Replace("x")),
    rule("zes", 1, Transform::Alternatives(&["ze", "z"])),
    rule("oes", 1, Transform::Alternatives(&["o", "oe"])),
    rule("ses", 1, Transform::Alternatives(&["se", "s"])),
    rule("ss", 0, Transform::Keep),
    // virus 和 menus、crisis 和 skis 都可能，原形优先
    rule("us", 1, Transform::Alternatives(&["us", "u"])),
    rule("is", 1, Transform::Alternatives(&["is", "i"])),
    rule("s", 1, Transform::Replace("")),
];

const VERB_THIRD_PERSON_RULES: &[SuffixRule] = &[
    rule("ies", 1, Transform::Alternatives(&["y", "ie"])),
    rule("sses", 1, Transform::Replace("ss")),
    rule("shes", 1, Transform::Replace("sh")),
    rule("ches", 1, Transform::Replace("ch")),
    rule("xes", 1, Transform::Replace("x")),
    rule("zzes", 1, Transform::Replace("zz")),
    rule("zes", 1, Transform::Alternatives(&["ze", "z"])),
    rule("oes", 1, Transform::Alternatives(&["o", "oe"])),
    rule("ses", 1, Transform::Alternatives(&["se", "s"])),
    rule("ss", 0, Transform::Keep),
    rule("s", 1, Transform::Replace("")),
];

const VERB_PAST_RULES: &[SuffixRule] = &[
    rule("ied", 1, Transform::Alternatives(&["y", "ie"])),
    rule("eed", 1, Transform::Replace("ee")),
    rule("ed", 3, Transform::Undouble),
    rule("ed", 2, Transform::RestoreE),
];

const VERB_GERUND_RULES: &[SuffixRule] = &[
    rule("ying", 1, Transform::Alternatives(&["y", "ie"])),
    rule("ing", 3, Transform::Undouble),
    rule("ing", 2, Transform::RestoreE),
];

const COMPARATIVE_RULES: &[SuffixRule] = &[
    rule("ier", 1, Transform::Replace("y")),
    rule("er", 3, Transform::Undouble),
    rule("er", 2, Transform::RestoreE),
];

const SUPERLATIVE_RULES: &[SuffixRule] = &[
    rule("iest", 1, Transform::Replace("y")),
    rule("est", 3, Transform::Undouble),
    rule("est", 2, Transform::RestoreE),
];

const IRREGULAR_PLURALS: &[(&str, &str)] = &[
    ("men", "man"),
    ("women", "woman"),
    ("children", "child"),
    ("people", "person"),
    ("mice", "mouse"),
    ("lice", "louse"),
    ("feet", "foot"),
    ("teeth", "tooth"),
    ("geese", "goose"),
    ("oxen", "ox"),
    ("leaves", "leaf"),
    ("lives", "life"),
    ("knives", "knife"),
    ("wives", "wife"),
    ("wolves", "wolf"),
    ("shelves", "shelf"),
    ("thieves", "thief"),
    ("halves", "half"),
    ("calves", "calf"),
    ("loaves", "loaf"),
    ("potatoes", "potato"),
    ("tomatoes", "tomato"),
    ("heroes", "hero"),
    ("echoes", "echo"),
    ("data", "datum"),
    ("criteria", "criterion"),
    ("phenomena", "phenomenon"),
    ("cacti", "cactus"),
    ("fungi", "fungus"),
    ("analyses", "analysis"),
    ("crises", "crisis"),
    ("theses", "thesis"),
    ("series", "series"),
    ("species", "species"),
    ("sheep", "sheep"),
    ("fish", "fish"),
    ("deer", "deer"),
];

const fn verb(base: &'static str, past: &'static str, participle: &'static str) -> VerbForms {
    VerbForms {
        base,
        past,
        participle,
    }
}

// 不规则动词表：原形 / 过去式 / 过去分词
pub const IRREGULAR_VERBS: &[VerbForms] = &[
    verb("arise", "arose", "arisen"),
    verb("awake", "awoke", "awoken"),
    verb("be", "was", "been"),
    verb("bear", "bore", "born"),
    verb("beat", "beat", "beaten"),
    verb("become", "became", "become"),
    verb("begin", "began", "begun"),
    verb("bend", "bent", "bent"),
    verb("bet", "bet", "bet"),
    verb("bind", "bound", "bound"),
    verb("bite", "bit", "bitten"),
    verb("bleed", "bled", "bled"),
    verb("blow", "blew", "blown"),
    verb("break", "broke", "broken"),
    verb("breed", "bred", "bred"),
    verb("bring", "brought", "brought"),
    verb("build", "built", "built"),
    verb("buy", "bought", "bought"),
    verb("catch", "caught", "caught"),
    verb("choose", "chose", "chosen"),
    verb("come", "came", "come"),
    verb("cost", "cost", "cost"),
    verb("cut", "cut", "cut"),
    verb("deal", "dealt", "dealt"),
    verb("dig", "dug", "dug"),
    verb("do", "did", "done"),
    verb("draw", "drew", "drawn"),
    verb("drink", "drank", "drunk"),
    verb("drive", "drove", "driven"),
    verb("eat", "ate", "eaten"),
    verb("fall", "fell", "fallen"),
    verb("feed", "fed", "fed"),
    verb("feel", "felt", "felt"),
    verb("fight", "fought", "fought"),
    verb("find", "found", "found"),
    verb("fly", "flew", "flown"),
    verb("forget", "forgot", "forgotten"),
    verb("forgive", "forgave", "forgiven"),
    verb("freeze", "froze", "frozen"),
    verb("get", "got", "gotten"),
    verb("give", "gave", "given"),
    verb("go", "went", "gone"),
    verb("grow", "grew", "grown"),
    verb("hang", "hung", "hung"),
    verb("have", "had", "had"),
    verb("hear", "heard", "heard"),
    verb("hide", "hid", "hidden"),
    verb("hit", "hit", "hit"),
    verb("hold", "held", "held"),
    verb("hurt", "hurt", "hurt"),
    verb("keep", "kept", "kept"),
    verb("know", "knew", "known"),
    verb("lay", "laid", "laid"),
    verb("lead", "led", "led"),
    verb("leave", "left", "left"),
    verb("lend", "lent", "lent"),
    verb("let", "let", "let"),
    verb("lie", "lay", "lain"),
    verb("lose", "lost", "lost"),
    verb("make", "made", "made"),
    verb("mean", "meant", "meant"),
    verb("meet", "met", "met"),
    verb("pay", "paid", "paid"),
    verb("put", "put", "put"),
    verb("quit", "quit", "quit"),
    verb("read", "read", "read"),
    verb("ride", "rode", "ridden"),
    verb("ring", "rang", "rung"),
    verb("rise", "rose", "risen"),
    verb("run", "ran", "run"),
    verb("say", "said", "said"),
    verb("see", "saw", "seen"),
    verb("seek", "sought", "sought"),
    verb("sell", "sold", "sold"),
    verb("send", "sent", "sent"),
    verb("set", "set", "set"),
    verb("shake", "shook", "shaken"),
    verb("shine", "shone", "shone"),
    verb("shoot", "shot", "shot"),
    verb("show", "showed", "shown"),
    verb("shut", "shut", "shut"),
    verb("sing", "sang", "sung"),
    verb("sink", "sank", "sunk"),
    verb("sit", "sat", "sat"),
    verb("sleep", "slept", "slept"),
    verb("slide", "slid", "slid"),
    verb("speak", "spoke", "spoken"),
    verb("spend", "spent", "spent"),
    verb("stand", "stood", "stood"),
    verb("steal", "stole", "stolen"),
    verb("stick", "stuck", "stuck"),
    verb("strike", "struck", "struck"),
    verb("swim", "swam", "swum"),
    verb("swing", "swung", "swung"),
    verb("take", "took", "taken"),
    verb("teach", "taught", "taught"),
    verb("tear", "tore", "torn"),
    verb("tell", "told", "told"),
    verb("think", "thought", "thought"),
    verb("throw", "threw", "thrown"),
    verb("understand", "understood", "understood"),
    verb("wake", "woke", "woken"),
    verb("wear", "wore", "worn"),
    verb("win", "won", "won"),
    verb("write", "wrote", "written"),
];

const IRREGULAR_PAST_VARIANTS: &[(&str, &str)] = &[
    ("were", "be"),
    ("got", "get"),
    ("learnt", "learn"),
    ("dreamt", "dream"),
    ("burnt", "burn"),
    ("spelt", "spell"),
    ("lit", "light"),
];

const IRREGULAR_GERUNDS: &[(&str, &str)] = &[
    ("being", "be"),
    ("dying", "die"),
    ("lying", "lie"),
    ("tying", "tie"),
    ("vying", "vie"),
];

const IRREGULAR_THIRD_PERSON: &[(&str, &str)] = &[
    ("is", "be"),
    ("has", "have"),
    ("does", "do"),
    ("goes", "go"),
];

const IRREGULAR_COMPARATIVES: &[(&str, &str)] = &[
    ("better", "good"),
    ("better", "well"),
    ("worse", "bad"),
    ("more", "many"),
    ("more", "much"),
    ("less", "little"),
    ("further", "far"),
    ("farther", "far"),
    ("elder", "old"),
];

const IRREGULAR_SUPERLATIVES: &[(&str, &str)] = &[
    ("best", "good"),
    ("best", "well"),
    ("worst", "bad"),
    ("most", "many"),
    ("most", "much"),
    ("least", "little"),
    ("furthest", "far"),
    ("farthest", "far"),
    ("eldest", "old"),
];

fn lookup<'t>(
    table: &'t [(&'static str, &'static str)],
    word: &'t str,
) -> impl Iterator<Item = &'static str> + 't {
    table
        .iter()
        .filter(move |(form, _)| *form == word)
        .map(|(_, base)| *base)
}

fn is_vowel(c: char) -> bool {
    matches!(c, 'a' | 'e' | 'i' | 'o' | 'u')
}

// stopp -> stop，去掉一个字母后至少还要剩三个字母
fn undouble(stem: &str) -> Option<&str> {
    let mut chars = stem.chars().rev();
    let last = chars.next()?;
    let before = chars.next()?;
    if last != before || is_vowel(last) || !last.is_ascii_alphabetic() {
        return None;
    }
    let shortened = &stem[..stem.len() - last.len_utf8()];
    (shortened.chars().count() >= 3).then_some(shortened)
}

// 辅音-元音-辅音结尾 (mak, hop)，原形多半去掉了 e
fn ends_short_cvc(stem: &str) -> bool {
    let chars: Vec<char> = stem.chars().collect();
    let n = chars.len();
    if n < 2 {
        return false;
    }
    let last = chars[n - 1];
    let middle = chars[n - 2];
    let consonant_last = !is_vowel(last) && !matches!(last, 'w' | 'x' | 'y');
    let third_ok = n < 3 || !is_vowel(chars[n - 3]);
    consonant_last && is_vowel(middle) && third_ok
}

// 按顺序收集候选词，去掉重复和空串
#[derive(Debug, Default)]
struct Candidates(Vec<String>);

impl Candidates {
    fn push(&mut self, candidate: impl Into<String>) {
        let candidate = candidate.into();
        if !candidate.is_empty() && !self.0.contains(&candidate) {
            self.0.push(candidate);
        }
    }

    fn extend<I, S>(&mut self, candidates: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        for candidate in candidates {
            self.push(candidate);
        }
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct InflectionResolver;

impl InflectionResolver {
    pub fn new() -> Self {
        InflectionResolver
    }

    // 候选原形，可能性高的在前；小写的原词一定包含在内
    // 有规则族时原词排最后，没有标签或标签为 JJ 时排最前
    pub fn resolve(&self, word: &str, pos: Option<&str>) -> Vec<String> {
        let surface = word.to_lowercase();
        let mut candidates = Candidates::default();

        match pos {
            None => {
                candidates.push(surface.as_str());
                for family in Family::ALL {
                    candidates.extend(self.family_candidates(&surface, family));
                }
            }
            // 形容词位置上的名词复数 (sports car 等)
            Some("JJ") => {
                candidates.push(surface.as_str());
                candidates.extend(self.family_candidates(&surface, Family::NounPlural));
            }
            Some(tag) => {
                if let Some(family) = Family::for_tag(tag) {
                    candidates.extend(self.family_candidates(&surface, family));
                }
                candidates.push(surface.as_str());
            }
        }

        if candidates.0.is_empty() {
            candidates.0.push(surface);
        }
        tracing::trace!(word, ?pos, candidates = ?candidates.0, "resolved base forms");
        candidates.0
    }

    pub fn family_candidates(&self, word: &str, family: Family) -> Vec<String> {
        let mut candidates = Candidates::default();
        candidates.extend(family.irregular(word));

        if let Some(regular) = family.rules().iter().find_map(|rule| rule.apply(word)) {
            candidates.extend(regular);
        }
        candidates.0
    }

    // 不规则动词的三种形式（按原形查找）
    pub fn irregular_verb(&self, base: &str) -> Option<VerbForms> {
        IRREGULAR_VERBS.iter().find(|v| v.base == base).copied()
    }

    // 不规则动词过去式或过去分词的原形
    pub fn irregular_past_base(&self, word: &str) -> Option<&'static str> {
        self.irregular_base(word, Family::VerbPast)
    }

    // 只查不规则表
    pub fn irregular_base(&self, word: &str, family: Family) -> Option<&'static str> {
        family.irregular(word).into_iter().next()
    }
}
