use std::path::Path;

use crate::config::Config;
use crate::dictionary::Dictionary;
use crate::error::{Error, Result};
use crate::models::{GrammarPoint, VerbForms, Word};

pub const MISSING_TRANSLATION: &str = "未登録";
const EXAMPLE_WIDTH: usize = 60;
const SHORTEN_MARKER: &str = "...";

const TABLE_HEADER: &str = "| 語句 | 出現回数 | 意味・説明 | 品詞 | 例文 |\n|------|----------|------------|------|------|";
const VERB_TABLE_HEADER: &str = "| 原型 | 過去形 | 過去分詞形 | 意味・説明 |\n|------|--------|------------|------------|";

#[derive(Debug, Clone, Copy, Default)]
pub struct ReportOptions {
    // 只输出词典中查不到的单词
    pub untranslated_only: bool,
    // 追加不规则动词表
    pub irregular_verbs: bool,
}

pub struct Reporter<'a> {
    config: &'a Config,
    dictionary: &'a Dictionary,
    options: ReportOptions,
}

impl<'a> Reporter<'a> {
    pub fn new(config: &'a Config, dictionary: &'a Dictionary, options: ReportOptions) -> Self {
        Reporter {
            config,
            dictionary,
            options,
        }
    }

    // 单词按传入顺序各占一行（untranslated_only 时跳过查到的）
    pub async fn render(
        &self,
        title: &str,
        words: &[Word],
        grammar: Option<&[GrammarPoint]>,
    ) -> Result<String> {
        let mut lines = vec![format!("# {title}"), String::new(), TABLE_HEADER.to_string()];

        for word in words {
            let translation = self
                .dictionary
                .get_word_translation(&word.text, Some(word.pos.as_str()))
                .await?;
            if self.options.untranslated_only && translation.is_some() {
                continue;
            }
            lines.push(format_table_row(
                word,
                translation.as_deref(),
                self.config.pos_label(&word.pos),
            ));
        }

        if self.options.irregular_verbs {
            let verbs = self.irregular_verbs(words);
            if !verbs.is_empty() {
                lines.push(String::new());
                lines.push("## 不規則動詞".to_string());
                lines.push(String::new());
                lines.push(VERB_TABLE_HEADER.to_string());
                for forms in verbs {
                    let meaning = self
                        .dictionary
                        .get_word_translation(forms.base, Some("VB"))
                        .await?;
                    lines.push(format_verb_row(&forms, meaning.as_deref()));
                }
            }
        }

        if let Some(points) = grammar.filter(|points| !points.is_empty()) {
            lines.push(String::new());
            lines.push("## 文法ポイント".to_string());
            for point in points {
                lines.push(String::new());
                lines.extend(format_grammar_point(point));
            }
        }

        lines.push(String::new());
        Ok(lines.join("\n"))
    }

    // 文中出现的不规则动词（按首次出现顺序，去重）
    fn irregular_verbs(&self, words: &[Word]) -> Vec<VerbForms> {
        let resolver = self.dictionary.resolver();
        let mut verbs: Vec<VerbForms> = Vec::new();

        for word in words.iter().filter(|w| w.pos.starts_with("VB")) {
            let forms = resolver
                .resolve(&word.text, Some(word.pos.as_str()))
                .iter()
                .find_map(|candidate| resolver.irregular_verb(candidate));
            if let Some(forms) = forms {
                if !verbs.iter().any(|v| v.base == forms.base) {
                    verbs.push(forms);
                }
            }
        }
        verbs
    }
}

pub fn format_table_row(word: &Word, translation: Option<&str>, pos_label: &str) -> String {
    format!(
        "| {} | {} | {} | {} | {} |",
        escape_cell(&word.text),
        word.count,
        escape_cell(translation.unwrap_or(MISSING_TRANSLATION)),
        escape_cell(pos_label),
        escape_cell(&shorten(&word.example, EXAMPLE_WIDTH)),
    )
}

fn format_verb_row(forms: &VerbForms, meaning: Option<&str>) -> String {
    format!(
        "| {} | {} | {} | {} |",
        forms.base,
        forms.past,
        forms.participle,
        escape_cell(meaning.unwrap_or(MISSING_TRANSLATION)),
    )
}

fn format_grammar_point(point: &GrammarPoint) -> Vec<String> {
    let mut lines = vec![
        format!("### {}. {}", point.no, point.title),
        String::new(),
        format!("- 例文: {}", point.eng),
        format!("- 形: {}", point.form),
    ];
    if !point.exp.is_empty() {
        lines.push("- 説明:".to_string());
        lines.extend(point.exp.iter().map(|line| format!("  - {line}")));
    }
    lines.push(format!("- 訳: {}", point.jpn));
    lines
}

// 压缩空白后在词边界截断，加上省略号不超过 width 个字符
pub fn shorten(text: &str, width: usize) -> String {
    let collapsed = text.split_whitespace().collect::<Vec<_>>().join(" ");
    if collapsed.chars().count() <= width {
        return collapsed;
    }

    let budget = width.saturating_sub(SHORTEN_MARKER.len());
    let mut shortened = String::new();
    let mut length = 0;
    for word in collapsed.split(' ') {
        let word_length = word.chars().count();
        let needed = if shortened.is_empty() {
            word_length
        } else {
            length + 1 + word_length
        };
        if needed > budget {
            break;
        }
        if !shortened.is_empty() {
            shortened.push(' ');
        }
        shortened.push_str(word);
        length = needed;
    }
    shortened.push_str(SHORTEN_MARKER);
    shortened
}

fn escape_cell(text: &str) -> String {
    text.replace('|', "\\|").replace(['\n', '\r'], " ")
}

// 一次性写入完整报告，必要时创建输出目录
pub async fn write_report(path: &Path, content: &str) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        tokio::fs::create_dir_all(parent)
            .await
            .map_err(|e| Error::io(parent, e))?;
    }
    tokio::fs::write(path, content)
        .await
        .map_err(|e| Error::io(path, e))?;
    tracing::info!(path = %path.display(), bytes = content.len(), "wrote report");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::DictionaryStore;
    use crate::models::DictionaryEntry;

    async fn dictionary(config: &Config) -> Dictionary {
        let store = DictionaryStore::from_entries(&[
            DictionaryEntry::new("rabbit", "(動物)ウサギ/(ウサギの)毛皮"),
            DictionaryEntry::new("run", "走る/経営する/走ること/得点"),
            DictionaryEntry::new("go", "行く/進む"),
        ])
        .await
        .unwrap();
        Dictionary::new(store, config)
    }

    fn word(text: &str, pos: &str, count: usize, example: &str) -> Word {
        let mut word = Word::new(text, pos, example);
        for _ in 0..count {
            word.increment_count();
        }
        word
    }

    fn sample_words() -> Vec<Word> {
        vec![
            word("Rabbit", "NN", 3, "Rabbit rabbit RABBIT ran."),
            word("ran", "VBD", 1, "Rabbit rabbit RABBIT ran."),
            word("zebra", "NN", 1, "A zebra | stripes."),
        ]
    }

    fn table_rows(report: &str) -> Vec<&str> {
        report
            .lines()
            .skip_while(|line| !line.starts_with("| 語句"))
            .skip(2)
            .take_while(|line| line.starts_with('|'))
            .collect()
    }

    #[tokio::test]
    async fn one_row_per_word_in_the_given_order() {
        let config = Config::default();
        let dict = dictionary(&config).await;
        let reporter = Reporter::new(&config, &dict, ReportOptions::default());

        let report = reporter.render("story", &sample_words(), None).await.unwrap();
        let rows = table_rows(&report);

        assert!(report.starts_with("# story\n"));
        assert_eq!(rows.len(), 3);
        assert_eq!(
            rows[0],
            "| Rabbit | 3 | (動物)ウサギ/(ウサギの)毛皮 | 名詞 | Rabbit rabbit RABBIT ran. |"
        );
        assert_eq!(
            rows[1],
            "| ran | 1 | 走る/経営する/走ること | 動詞（過去形） | Rabbit rabbit RABBIT ran. |"
        );
        assert_eq!(rows[2], "| zebra | 1 | 未登録 | 名詞 | A zebra \\| stripes. |");
        assert!(!report.contains("## 文法ポイント"));
        assert!(!report.contains("## 不規則動詞"));
    }

    #[tokio::test]
    async fn untranslated_only_keeps_dictionary_misses() {
        let config = Config::default();
        let dict = dictionary(&config).await;
        let options = ReportOptions {
            untranslated_only: true,
            ..ReportOptions::default()
        };
        let report = Reporter::new(&config, &dict, options)
            .render("story", &sample_words(), None)
            .await
            .unwrap();

        let rows = table_rows(&report);
        assert_eq!(rows.len(), 1);
        assert!(rows[0].starts_with("| zebra |"));
    }

    #[tokio::test]
    async fn irregular_verb_section_lists_each_base_once() {
        let config = Config::default();
        let dict = dictionary(&config).await;
        let options = ReportOptions {
            irregular_verbs: true,
            ..ReportOptions::default()
        };
        let mut words = sample_words();
        words.push(word("went", "VBD", 1, "He went home."));
        words.push(word("running", "VBG", 1, "The rabbit kept running."));

        let report = Reporter::new(&config, &dict, options)
            .render("story", &words, None)
            .await
            .unwrap();
        let section = report.split("## 不規則動詞").nth(1).unwrap();

        assert!(section.contains("| run | ran | run | 走る/経営する/走ること |"));
        assert!(section.contains("| go | went | gone | 行く/進む |"));
        assert_eq!(section.matches("| run | ran |").count(), 1);
    }

    #[tokio::test]
    async fn grammar_points_render_fields_in_order() {
        let config = Config::default();
        let dict = dictionary(&config).await;
        let grammar = vec![GrammarPoint {
            no: 1,
            title: "過去形".to_string(),
            eng: "The rabbit ran.".to_string(),
            form: "動詞の過去形".to_string(),
            exp: vec!["過去の出来事".to_string(), "run は不規則動詞".to_string()],
            jpn: "ウサギが走った。".to_string(),
        }];

        let report = Reporter::new(&config, &dict, ReportOptions::default())
            .render("story", &sample_words(), Some(grammar.as_slice()))
            .await
            .unwrap();
        let section = report.split("## 文法ポイント").nth(1).unwrap();

        let order = [
            "### 1. 過去形",
            "- 例文: The rabbit ran.",
            "- 形: 動詞の過去形",
            "  - 過去の出来事",
            "  - run は不規則動詞",
            "- 訳: ウサギが走った。",
        ];
        let positions: Vec<usize> = order.iter().map(|line| section.find(line).unwrap()).collect();
        assert!(positions.windows(2).all(|pair| pair[0] < pair[1]));
    }

    #[test]
    fn shorten_cuts_at_a_word_boundary() {
        assert_eq!(shorten("short  sentence", 60), "short sentence");

        let long = "The quick brown fox jumps over the lazy dog and keeps running far away.";
        let short = shorten(long, 60);
        assert!(short.ends_with("..."));
        assert!(short.chars().count() <= 60);
        assert_eq!(short, "The quick brown fox jumps over the lazy dog and keeps...");
    }

    #[tokio::test]
    async fn write_report_creates_the_output_directory() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out").join("story_report.md");

        write_report(&path, "# story\n").await.unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "# story\n");
    }
}
