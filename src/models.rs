use serde::Deserialize;

// 分析结果中的单词记录（按 小写形式 + 词性 区分）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Word {
    pub text: String,
    pub pos: String,
    pub count: usize,
    pub example: String,
}

impl Word {
    pub fn new(text: impl Into<String>, pos: impl Into<String>, example: impl Into<String>) -> Self {
        Word {
            text: text.into(),
            pos: pos.into(),
            count: 0,
            example: example.into(),
        }
    }

    pub fn increment_count(&mut self) {
        self.count += 1;
    }
}

// 词典表 items 的一行
#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct DictionaryEntry {
    pub item_id: i64,
    pub word: String,
    pub mean: String,
    pub level: i64,
}

impl DictionaryEntry {
    pub fn new(word: impl Into<String>, mean: impl Into<String>) -> Self {
        DictionaryEntry {
            item_id: 0,
            word: word.into(),
            mean: mean.into(),
            level: 0,
        }
    }
}

// 伴随 JSON 文件中的语法点
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct GrammarPoint {
    pub no: u32,
    pub title: String,
    pub eng: String,
    pub form: String,
    #[serde(default)]
    pub exp: Vec<String>,
    pub jpn: String,
}

// 不规则动词的三种形式
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VerbForms {
    pub base: &'static str,
    pub past: &'static str,
    pub participle: &'static str,
}
