use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::{Error, Result};

pub const DEFAULT_CONFIG_PATH: &str = "config/settings.json";
pub const DEFAULT_DICTIONARY_PATH: &str = "data/ejdict.sqlite3";

// 否定缩写被拆开后剩下的残片
const CONTRACTION_FRAGMENTS: &[&str] = &[
    "wasn", "isn", "doesn", "didn", "haven", "hadn", "won", "wouldn", "couldn", "shouldn",
    "mightn", "mustn",
];

const DEFAULT_EXCLUDE_POS: &[&str] = &[
    "CC", "CD", "DT", "EX", "IN", "LS", "MD", "NNP", "NNPS", "PDT", "POS", "PRP", "PRP$", "RP",
    "SYM", "TO", "UH", "VB", "WDT", "WP", "WP$", "WRB",
];

const DEFAULT_BE_VERBS: &[&str] = &["be", "am", "is", "are", "was", "were", "been", "being"];

const DEFAULT_POS_TRANSLATIONS: &[(&str, &str)] = &[
    ("CC", "等位接続詞"),
    ("CD", "基数"),
    ("DT", "限定詞"),
    ("EX", "存在のthere"),
    ("FW", "外来語"),
    ("IN", "前置詞・従属接続詞"),
    ("JJ", "形容詞"),
    ("JJR", "形容詞（比較級）"),
    ("JJS", "形容詞（最上級）"),
    ("LS", "リスト項目"),
    ("MD", "助動詞"),
    ("NN", "名詞"),
    ("NNS", "名詞（複数形）"),
    ("NNP", "固有名詞"),
    ("NNPS", "固有名詞（複数形）"),
    ("PDT", "前限定詞"),
    ("POS", "所有格"),
    ("PRP", "人称代名詞"),
    ("PRP$", "所有代名詞"),
    ("RB", "副詞"),
    ("RBR", "副詞（比較級）"),
    ("RBS", "副詞（最上級）"),
    ("RP", "不変化詞"),
    ("SYM", "記号"),
    ("TO", "to"),
    ("UH", "間投詞"),
    ("VB", "動詞（原形）"),
    ("VBD", "動詞（過去形）"),
    ("VBG", "動詞（現在分詞・動名詞）"),
    ("VBN", "動詞（過去分詞）"),
    ("VBP", "動詞（現在形）"),
    ("VBZ", "動詞（三人称単数現在）"),
    ("WDT", "wh限定詞"),
    ("WP", "wh代名詞"),
    ("WP$", "所有wh代名詞"),
    ("WRB", "wh副詞"),
];

// 运行时使用的配置（加载后只读）
#[derive(Debug, Clone)]
pub struct Config {
    pub exclude_pos: HashSet<String>,
    pub be_verbs: HashSet<String>,
    pub pos_translations: HashMap<String, String>,
    pub word_translations: HashMap<String, String>,
    pub dictionary: DictionaryConfig,
    pub min_word_length: usize,
    // nlprule 的 tokenizer 模型 (en_tokenizer.bin)，未设置时使用内置规则标注
    pub tagger_path: Option<PathBuf>,
}

#[derive(Debug, Clone)]
pub struct DictionaryConfig {
    pub max_translations: i64,
    pub path: PathBuf,
}

impl Default for DictionaryConfig {
    fn default() -> Self {
        DictionaryConfig {
            max_translations: 3,
            path: PathBuf::from(DEFAULT_DICTIONARY_PATH),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            exclude_pos: to_set(DEFAULT_EXCLUDE_POS),
            be_verbs: to_set(DEFAULT_BE_VERBS),
            pos_translations: DEFAULT_POS_TRANSLATIONS
                .iter()
                .map(|(tag, label)| (tag.to_string(), label.to_string()))
                .collect(),
            word_translations: HashMap::new(),
            dictionary: DictionaryConfig::default(),
            min_word_length: 3,
            tagger_path: None,
        }
    }
}

// 配置文件结构，所有字段都可以省略
#[derive(Debug, Default, Deserialize)]
pub struct ConfigFile {
    pub exclude_pos: Option<Vec<String>>,
    pub be_verbs: Option<Vec<String>>,
    pub pos_translations: Option<HashMap<String, String>>,
    pub word_translations: Option<HashMap<String, String>>,
    pub dictionary: Option<DictionaryFile>,
    pub min_word_length: Option<usize>,
    pub tagger_path: Option<PathBuf>,
}

#[derive(Debug, Default, Deserialize)]
pub struct DictionaryFile {
    pub max_translations: Option<i64>,
    pub path: Option<PathBuf>,
}

impl Config {
    // 指定的路径必须存在；未指定时依次尝试 config/settings.json 和内置默认值
    pub fn load(path: Option<&Path>) -> Result<Config> {
        match path {
            Some(path) => Config::from_file(path),
            None => {
                let default_path = Path::new(DEFAULT_CONFIG_PATH);
                if default_path.is_file() {
                    Config::from_file(default_path)
                } else {
                    tracing::debug!("no config file found, using built-in defaults");
                    Ok(Config::default())
                }
            }
        }
    }

    pub fn from_file(path: &Path) -> Result<Config> {
        let content = std::fs::read_to_string(path).map_err(|source| Error::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;
        let file: ConfigFile =
            serde_json::from_str(&content).map_err(|source| Error::ConfigParse {
                path: path.to_path_buf(),
                source,
            })?;
        tracing::info!(path = %path.display(), "loaded config");
        Ok(Config::default().merge(file))
    }

    // 文件里出现的字段逐个覆盖默认值
    pub fn merge(mut self, file: ConfigFile) -> Config {
        if let Some(exclude_pos) = file.exclude_pos {
            self.exclude_pos = exclude_pos.into_iter().collect();
        }
        if let Some(be_verbs) = file.be_verbs {
            self.be_verbs = be_verbs.into_iter().map(|v| v.to_lowercase()).collect();
        }
        if let Some(pos_translations) = file.pos_translations {
            self.pos_translations = pos_translations;
        }
        if let Some(word_translations) = file.word_translations {
            self.word_translations = word_translations
                .into_iter()
                .map(|(word, translation)| (word.to_lowercase(), translation))
                .collect();
        }
        if let Some(dictionary) = file.dictionary {
            if let Some(max_translations) = dictionary.max_translations {
                self.dictionary.max_translations = max_translations;
            }
            if let Some(path) = dictionary.path {
                self.dictionary.path = path;
            }
        }
        if let Some(min_word_length) = file.min_word_length {
            self.min_word_length = min_word_length;
        }
        if let Some(tagger_path) = file.tagger_path {
            self.tagger_path = Some(tagger_path);
        }
        self
    }

    // 词性标签的日文名称，没有登记时返回原标签
    pub fn pos_label<'a>(&'a self, pos: &'a str) -> &'a str {
        self.pos_translations
            .get(pos)
            .map(String::as_str)
            .unwrap_or(pos)
    }

    // 判断单词是否应该从结果中排除
    pub fn should_exclude_word(&self, word: &str, pos: &str) -> bool {
        let lower = word.to_lowercase();

        if lower.chars().count() < self.min_word_length {
            return true;
        }
        if self.exclude_pos.contains(pos) {
            return true;
        }
        if self.be_verbs.contains(&lower) {
            return true;
        }
        CONTRACTION_FRAGMENTS.contains(&lower.as_str())
    }
}

fn to_set(items: &[&str]) -> HashSet<String> {
    items.iter().map(|s| s.to_string()).collect()
}
