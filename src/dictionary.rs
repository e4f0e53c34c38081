// 翻译查询：先查用户覆盖表，再按候选原形依次查词典

use std::collections::HashMap;

use crate::config::Config;
use crate::database::DictionaryStore;
use crate::error::Result;
use crate::inflection::InflectionResolver;

pub struct Dictionary {
    store: DictionaryStore,
    resolver: InflectionResolver,
    overrides: HashMap<String, String>,
    max_translations: i64,
}

impl Dictionary {
    pub fn new(store: DictionaryStore, config: &Config) -> Self {
        Dictionary {
            store,
            resolver: InflectionResolver::new(),
            overrides: config.word_translations.clone(),
            max_translations: config.dictionary.max_translations,
        }
    }

    pub async fn open(config: &Config) -> Result<Self> {
        let store = DictionaryStore::open(&config.dictionary.path).await?;
        Ok(Dictionary::new(store, config))
    }

    pub fn resolver(&self) -> &InflectionResolver {
        &self.resolver
    }

    pub async fn get_word_translation(&self, word: &str, pos: Option<&str>) -> Result<Option<String>> {
        self.get_word_translation_with_limit(word, pos, self.max_translations)
            .await
    }

    // 覆盖表的译文原样返回；词典命中时只保留前 max_translations 个义项
    pub async fn get_word_translation_with_limit(
        &self,
        word: &str,
        pos: Option<&str>,
        max_translations: i64,
    ) -> Result<Option<String>> {
        let lower = word.to_lowercase();
        if let Some(translation) = self.overrides.get(&lower) {
            return Ok(Some(translation.clone()));
        }

        for candidate in self.resolver.resolve(&lower, pos) {
            if let Some(meaning) = self.store.lookup(&candidate).await? {
                tracing::debug!(word, candidate = %candidate, "translation found");
                return Ok(Some(limit_translations(&meaning, max_translations)));
            }
        }
        Ok(None)
    }

    pub async fn close(self) {
        self.store.close().await;
    }
}

// 义项以 / 分隔，空义项不计
pub fn limit_translations(meaning: &str, max: i64) -> String {
    if max <= 0 {
        return String::new();
    }
    meaning
        .split('/')
        .map(str::trim)
        .filter(|sense| !sense.is_empty())
        .take(max as usize)
        .collect::<Vec<_>>()
        .join("/")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::DictionaryEntry;

    async fn dictionary(config: &Config) -> Dictionary {
        let store = DictionaryStore::from_entries(&[
            DictionaryEntry::new("mouse", "ハツカネズミ/(コンピュータの)マウス"),
            DictionaryEntry::new("book", "本/書物/帳簿/予約する"),
            DictionaryEntry::new("test", "試験/検査"),
            DictionaryEntry::new("run", "走る/経営する"),
            DictionaryEntry::new("good", "よい/上手な"),
            DictionaryEntry::new("city", "都市/市"),
        ])
        .await
        .unwrap();
        Dictionary::new(store, config)
    }

    #[tokio::test]
    async fn irregular_plural_resolves_to_the_singular_entry() {
        let dict = dictionary(&Config::default()).await;

        let mice = dict.get_word_translation("mice", Some("NNS")).await.unwrap();
        assert_eq!(mice.as_deref(), Some("ハツカネズミ/(コンピュータの)マウス"));
        let cities = dict.get_word_translation("Cities", Some("NNS")).await.unwrap();
        assert_eq!(cities.as_deref(), Some("都市/市"));
    }

    #[tokio::test]
    async fn inflected_verbs_and_adjectives_find_their_base() {
        let dict = dictionary(&Config::default()).await;

        for (word, pos) in [("running", "VBG"), ("ran", "VBD"), ("runs", "VBZ")] {
            let translation = dict.get_word_translation(word, Some(pos)).await.unwrap();
            assert_eq!(translation.as_deref(), Some("走る/経営する"), "{word}");
        }
        let better = dict.get_word_translation("better", Some("JJR")).await.unwrap();
        assert_eq!(better.as_deref(), Some("よい/上手な"));
        let books = dict.get_word_translation("books", None).await.unwrap();
        assert_eq!(books.as_deref(), Some("本/書物/帳簿"));
    }

    #[tokio::test]
    async fn limit_caps_the_number_of_senses() {
        let dict = dictionary(&Config::default()).await;

        let two = dict
            .get_word_translation_with_limit("book", None, 2)
            .await
            .unwrap();
        assert_eq!(two.as_deref(), Some("本/書物"));

        let default = dict.get_word_translation("book", None).await.unwrap().unwrap();
        assert_eq!(default.split('/').count(), 3);
    }

    #[tokio::test]
    async fn non_positive_limit_is_an_empty_hit_and_misses_stay_none() {
        let dict = dictionary(&Config::default()).await;

        let zero = dict
            .get_word_translation_with_limit("book", None, 0)
            .await
            .unwrap();
        assert_eq!(zero.as_deref(), Some(""));
        assert_eq!(
            dict.get_word_translation_with_limit("zyzzyva", None, 0)
                .await
                .unwrap(),
            None
        );
    }

    #[tokio::test]
    async fn override_wins_over_the_store() {
        let mut config = Config::default();
        config
            .word_translations
            .insert("test".to_string(), "テスト".to_string());
        let dict = dictionary(&config).await;

        assert_eq!(
            dict.get_word_translation("Test", None).await.unwrap().as_deref(),
            Some("テスト")
        );
    }

    #[test]
    fn limit_translations_trims_and_skips_empty_senses() {
        assert_eq!(limit_translations(" 本 / 書物 //帳簿", 5), "本/書物/帳簿");
        assert_eq!(limit_translations("本/書物", -1), "");
    }
}
