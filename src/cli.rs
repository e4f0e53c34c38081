use std::collections::HashMap;
use std::path::{Path, PathBuf};

use clap::Parser;

use crate::analyzer::Analyzer;
use crate::config::Config;
use crate::dictionary::Dictionary;
use crate::error::{Error, Result};
use crate::grammar::{companion_path, load_grammar_points};
use crate::models::GrammarPoint;
use crate::nlprule_tagger::NlpruleTagger;
use crate::reporter::{ReportOptions, Reporter, write_report};
use crate::tagger::{HeuristicTagger, Tagger};

const INPUT_EXTENSIONS: &[&str] = &["md", "txt"];

#[derive(Debug, Clone, Parser)]
#[command(
    name = "english-study-helper",
    version,
    about = "英語学習者向けのテキスト分析ツール"
)]
pub struct Cli {
    #[arg(short = 'i', long, help = "分析対象: ディレクトリまたは単一ファイル (.md / .txt)")]
    pub input: PathBuf,

    #[arg(short = 'o', long, default_value = "output", help = "出力ディレクトリ")]
    pub output: PathBuf,

    #[arg(short = 'c', long, help = "設定ファイルのパス")]
    pub config: Option<PathBuf>,

    #[arg(
        short = 'd',
        long,
        help = "辞書データベースのパス (設定ファイルの dictionary.path より優先)"
    )]
    pub dictionary: Option<PathBuf>,

    #[arg(
        short = 't',
        long,
        help = "nlprule の en_tokenizer.bin (設定ファイルの tagger_path より優先)"
    )]
    pub tagger: Option<PathBuf>,

    #[arg(long, help = "辞書に登録されていない単語だけを出力する")]
    pub no_translation: bool,

    #[arg(long, help = "不規則動詞の活用表を追加する")]
    pub verbs: bool,
}

impl Cli {
    fn report_options(&self) -> ReportOptions {
        ReportOptions {
            untranslated_only: self.no_translation,
            irregular_verbs: self.verbs,
        }
    }
}

// 单个文件直接返回；目录只取第一层的 .md / .txt，按路径排序
// 文件名（不含扩展名）相同的两个文件会写到同一份报告，直接报错
pub fn collect_inputs(input: &Path) -> Result<Vec<PathBuf>> {
    if !input.exists() {
        return Err(Error::InputNotFound(input.to_path_buf()));
    }

    if input.is_dir() {
        let entries = std::fs::read_dir(input).map_err(|e| Error::io(input, e))?;
        let mut files = Vec::new();
        for entry in entries {
            let path = entry.map_err(|e| Error::io(input, e))?.path();
            if path.is_file() && has_input_extension(&path) {
                files.push(path);
            }
        }
        if files.is_empty() {
            return Err(Error::NoInputFiles(input.to_path_buf()));
        }
        files.sort();
        reject_duplicate_stems(&files)?;
        Ok(files)
    } else if has_input_extension(input) {
        Ok(vec![input.to_path_buf()])
    } else {
        Err(Error::UnsupportedInput(input.to_path_buf()))
    }
}

fn reject_duplicate_stems(files: &[PathBuf]) -> Result<()> {
    let mut seen: HashMap<String, &PathBuf> = HashMap::new();
    for file in files {
        let stem = file
            .file_stem()
            .map(|stem| stem.to_string_lossy().into_owned())
            .unwrap_or_default();
        if let Some(first) = seen.insert(stem, file) {
            return Err(Error::DuplicateInputStem {
                first: first.clone(),
                second: file.clone(),
            });
        }
    }
    Ok(())
}

fn has_input_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| INPUT_EXTENSIONS.iter().any(|allowed| ext.eq_ignore_ascii_case(allowed)))
}

// 处理一批输入，按输入顺序返回写出的报告路径
// 配置和输入错误在写任何文件之前返回；伴随语法文件出错只会去掉该报告的语法部分
pub async fn run(cli: &Cli) -> Result<Vec<PathBuf>> {
    let mut config = Config::load(cli.config.as_deref())?;
    if let Some(path) = &cli.dictionary {
        config.dictionary.path = path.clone();
    }
    if let Some(path) = &cli.tagger {
        config.tagger_path = Some(path.clone());
    }

    let inputs = collect_inputs(&cli.input)?;
    println!("📚 找到 {} 个文本文件", inputs.len());

    let tagger = open_tagger(&config)?;
    let dictionary = Dictionary::open(&config).await?;
    let result = process_inputs(cli, &config, tagger.as_ref(), &dictionary, &inputs).await;
    dictionary.close().await;

    let written = result?;
    println!("🎉 完成！共生成 {} 份报告", written.len());
    Ok(written)
}

// 配置了模型文件时用 nlprule，否则用内置规则
fn open_tagger(config: &Config) -> Result<Box<dyn Tagger>> {
    match &config.tagger_path {
        Some(path) => {
            println!("🏷️ 加载词性标注模型: {}", path.display());
            Ok(Box::new(NlpruleTagger::open(path)?))
        }
        None => {
            tracing::debug!("no tagger model configured, using heuristic tagger");
            Ok(Box::new(HeuristicTagger::new()))
        }
    }
}

async fn process_inputs(
    cli: &Cli,
    config: &Config,
    tagger: &dyn Tagger,
    dictionary: &Dictionary,
    inputs: &[PathBuf],
) -> Result<Vec<PathBuf>> {
    let analyzer = Analyzer::new(config, tagger);
    let reporter = Reporter::new(config, dictionary, cli.report_options());
    let mut written = Vec::with_capacity(inputs.len());

    for (i, input) in inputs.iter().enumerate() {
        println!("🔍 分析文本 {}/{}: {}", i + 1, inputs.len(), input.display());

        let text = tokio::fs::read_to_string(input)
            .await
            .map_err(|e| Error::io(input, e))?;
        let words = analyzer.analyze(&text);
        let grammar = load_companion(input).await;

        let title = input
            .file_stem()
            .map(|stem| stem.to_string_lossy().into_owned())
            .unwrap_or_default();
        // 先生成完整内容再写文件，避免留下不完整的报告
        let report = reporter.render(&title, &words, grammar.as_deref()).await?;
        let output = cli.output.join(format!("{title}_report.md"));
        write_report(&output, &report).await?;

        println!("  ✅ {} 个单词，报告已保存: {}", words.len(), output.display());
        written.push(output);
    }

    Ok(written)
}

async fn load_companion(input: &Path) -> Option<Vec<GrammarPoint>> {
    let path = companion_path(input);
    if !path.is_file() {
        tracing::debug!(path = %path.display(), "no companion grammar file");
        return None;
    }

    match load_grammar_points(&path).await {
        Ok(points) => Some(points),
        Err(e) => {
            tracing::warn!(error = %e, "skipping grammar section");
            println!("  ⚠️  跳过语法点: {e}");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_short_flags_and_defaults() {
        let cli = Cli::parse_from(["english-study-helper", "-i", "input", "-c", "my.json", "--verbs"]);

        assert_eq!(cli.input, PathBuf::from("input"));
        assert_eq!(cli.output, PathBuf::from("output"));
        assert_eq!(cli.config, Some(PathBuf::from("my.json")));
        assert!(cli.verbs);
        assert!(!cli.no_translation);
        assert_eq!(cli.tagger, None);

        let cli = Cli::parse_from(["english-study-helper", "-i", "input", "-t", "en_tokenizer.bin"]);
        assert_eq!(cli.tagger, Some(PathBuf::from("en_tokenizer.bin")));
    }

    #[test]
    fn input_is_required() {
        assert!(Cli::try_parse_from(["english-study-helper", "-o", "out"]).is_err());
    }

    #[test]
    fn directory_inputs_are_filtered_and_sorted() {
        let dir = tempfile::tempdir().unwrap();
        for name in ["b.md", "a.TXT", "c.json", "notes.pdf"] {
            std::fs::write(dir.path().join(name), "text").unwrap();
        }
        std::fs::create_dir(dir.path().join("nested.md")).unwrap();

        let inputs = collect_inputs(dir.path()).unwrap();
        let names: Vec<_> = inputs
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, vec!["a.TXT", "b.md"]);
    }

    #[test]
    fn input_errors() {
        let dir = tempfile::tempdir().unwrap();
        assert!(matches!(
            collect_inputs(&dir.path().join("missing.md")),
            Err(Error::InputNotFound(_))
        ));
        assert!(matches!(collect_inputs(dir.path()), Err(Error::NoInputFiles(_))));

        let pdf = dir.path().join("story.pdf");
        std::fs::write(&pdf, "text").unwrap();
        assert!(matches!(collect_inputs(&pdf), Err(Error::UnsupportedInput(_))));
    }

    #[test]
    fn same_stem_with_two_extensions_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        for name in ["a.md", "a.txt", "b.md"] {
            std::fs::write(dir.path().join(name), "text").unwrap();
        }

        match collect_inputs(dir.path()) {
            Err(Error::DuplicateInputStem { first, second }) => {
                assert_eq!(first, dir.path().join("a.md"));
                assert_eq!(second, dir.path().join("a.txt"));
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn tagger_follows_the_config() {
        let config = Config::default();
        let tagger = open_tagger(&config).unwrap();
        let tags: Vec<String> = tagger.tag("The mice ran.").into_iter().map(|t| t.tag).collect();
        assert_eq!(tags, vec!["DT", "NNS", "VBD", "."]);

        let dir = tempfile::tempdir().unwrap();
        let config = Config {
            tagger_path: Some(dir.path().join("missing.bin")),
            ..Config::default()
        };
        assert!(matches!(open_tagger(&config), Err(Error::TaggerLoad { .. })));
    }
}
