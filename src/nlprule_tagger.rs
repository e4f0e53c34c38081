use std::path::Path;

use nlprule::Tokenizer;

use crate::error::{Error, Result};
use crate::tagger::{TaggedToken, Tagger};

// 使用 nlprule 的统计模型标注 (en_tokenizer.bin)
pub struct NlpruleTagger {
    tokenizer: Tokenizer,
}

impl NlpruleTagger {
    pub fn open(path: &Path) -> Result<Self> {
        let tokenizer = Tokenizer::new(path).map_err(|source| Error::TaggerLoad {
            path: path.to_path_buf(),
            source,
        })?;
        tracing::info!(path = %path.display(), "loaded nlprule tokenizer");
        Ok(NlpruleTagger { tokenizer })
    }
}

impl Tagger for NlpruleTagger {
    fn tag(&self, sentence: &str) -> Vec<TaggedToken> {
        let mut tagged = Vec::new();
        for analyzed in self.tokenizer.pipe(sentence) {
            for token in analyzed.tokens() {
                let word = token.word();
                let text = word.text().as_str();
                if text.trim().is_empty() {
                    continue;
                }
                let tag = pos_tag(text, word.tags().iter().map(|data| data.pos().as_str()));
                tagged.push(TaggedToken::new(text, tag));
            }
        }
        tagged
    }
}

// 取第一个 Penn 标签，跳过句首句尾的标记
fn pos_tag<'a>(text: &str, mut tags: impl Iterator<Item = &'a str>) -> String {
    match tags.find(|pos| !pos.is_empty() && !matches!(*pos, "SENT_START" | "SENT_END")) {
        Some(tag) => tag.to_string(),
        None if text.chars().any(char::is_alphabetic) => "NN".to_string(),
        None => "SYM".to_string(),
    }
}
