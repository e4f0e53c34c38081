use std::collections::HashMap;

use crate::config::Config;
use crate::models::Word;
use crate::tagger::Tagger;
use crate::tokenizer::{clean_text, is_word, split_sentences};

// 单个文本的词频统计
pub struct Analyzer<'a, T: Tagger + ?Sized> {
    config: &'a Config,
    tagger: &'a T,
}

impl<'a, T: Tagger + ?Sized> Analyzer<'a, T> {
    pub fn new(config: &'a Config, tagger: &'a T) -> Self {
        Analyzer { config, tagger }
    }

    // 以 小写形式 + 词性 为键计数，显示形式和例句取第一次出现的
    pub fn analyze(&self, text: &str) -> Vec<Word> {
        let cleaned = clean_text(text);
        let mut words: Vec<Word> = Vec::new();
        let mut index: HashMap<(String, String), usize> = HashMap::new();

        for sentence in split_sentences(&cleaned) {
            for tagged in self.tagger.tag(&sentence) {
                if !is_word(&tagged.text) || self.config.should_exclude_word(&tagged.text, &tagged.tag) {
                    continue;
                }

                let key = (tagged.text.to_lowercase(), tagged.tag.clone());
                let slot = *index.entry(key).or_insert_with(|| {
                    words.push(Word::new(tagged.text.as_str(), tagged.tag.as_str(), sentence.as_str()));
                    words.len() - 1
                });
                words[slot].increment_count();
            }
        }

        // sort_by 是稳定排序，计数相同时保持首次出现的顺序
        words.sort_by(|a, b| b.count.cmp(&a.count));
        tracing::debug!(records = words.len(), "analyzed text");
        words
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tagger::{HeuristicTagger, TaggedToken};
    use crate::tokenizer::tokenize;

    // 按词表给出固定词性，其余一律 NN
    struct FixedTagger(&'static [(&'static str, &'static str)]);

    impl Tagger for FixedTagger {
        fn tag(&self, sentence: &str) -> Vec<TaggedToken> {
            tokenize(sentence)
                .into_iter()
                .map(|token| {
                    let tag = self
                        .0
                        .iter()
                        .find(|(word, _)| word.eq_ignore_ascii_case(&token))
                        .map(|(_, tag)| *tag)
                        .unwrap_or(if is_word(&token) { "NN" } else { "." });
                    TaggedToken::new(token, tag)
                })
                .collect()
        }
    }

    #[test]
    fn counts_case_insensitively_and_keeps_first_casing() {
        let config = Config::default();
        let tagger = FixedTagger(&[("ran", "VBD")]);
        let words = Analyzer::new(&config, &tagger).analyze("Rabbit rabbit RABBIT ran.");

        assert_eq!(words[0].text, "Rabbit");
        assert_eq!(words[0].pos, "NN");
        assert_eq!(words[0].count, 3);
        assert_eq!(words[0].example, "Rabbit rabbit RABBIT ran.");
        assert_eq!(words[1].text, "ran");
        assert_eq!(words[1].count, 1);
        assert_eq!(words.len(), 2);
    }

    #[test]
    fn excluded_tags_and_be_verbs_never_appear() {
        let config = Config::default();
        let tagger = FixedTagger(&[
            ("the", "DT"),
            ("was", "VBD"),
            ("quickly", "RB"),
            ("run", "VB"),
            ("to", "TO"),
        ]);
        let words = Analyzer::new(&config, &tagger).analyze("The dog was quickly going to run.");
        let texts: Vec<&str> = words.iter().map(|w| w.text.as_str()).collect();

        assert_eq!(texts, vec!["dog", "quickly", "going"]);
    }

    #[test]
    fn same_spelling_with_two_tags_makes_two_records() {
        let config = Config::default();
        let tagger = FixedTagger(&[]);
        let words = Analyzer::new(&config, &tagger).analyze("Books are fun. I like books.");
        assert_eq!(words.iter().filter(|w| w.text.eq_ignore_ascii_case("books")).count(), 1);

        let heuristic = HeuristicTagger::new();
        let words = Analyzer::new(&config, &heuristic).analyze("We watched a play. They play games.");
        let plays: Vec<&str> = words
            .iter()
            .filter(|w| w.text == "play")
            .map(|w| w.pos.as_str())
            .collect();
        assert_eq!(plays, vec!["NN", "VBP"]);
    }

    #[test]
    fn ties_keep_first_seen_order_and_example() {
        let config = Config::default();
        let tagger = FixedTagger(&[]);
        let words = Analyzer::new(&config, &tagger)
            .analyze("Apple banana. Cherry apple! Banana cherry date?");

        let texts: Vec<&str> = words.iter().map(|w| w.text.as_str()).collect();
        assert_eq!(texts, vec!["Apple", "banana", "Cherry", "date"]);
        assert_eq!(words[1].example, "Apple banana.");
        assert_eq!(words[3].count, 1);
    }

    #[test]
    fn analysis_is_deterministic() {
        let config = Config::default();
        let tagger = HeuristicTagger::new();
        let analyzer = Analyzer::new(&config, &tagger);
        let text = "Biff and Chip went to the park. They played with a ball. The ball was red.";

        assert_eq!(analyzer.analyze(text), analyzer.analyze(text));
    }

    #[test]
    fn irregular_forms_are_counted_with_their_inflected_tags() {
        let config = Config::default();
        let tagger: Box<dyn Tagger> = Box::new(HeuristicTagger::new());
        let words = Analyzer::new(&config, tagger.as_ref())
            .analyze("The mice and the children ran. The mice hid.");

        let records: Vec<(&str, &str, usize)> = words
            .iter()
            .map(|w| (w.text.as_str(), w.pos.as_str(), w.count))
            .collect();
        assert_eq!(
            records,
            vec![("mice", "NNS", 2), ("children", "NNS", 1), ("ran", "VBD", 1), ("hid", "VBD", 1)]
        );
    }
}
