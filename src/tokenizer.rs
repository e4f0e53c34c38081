use unicode_segmentation::UnicodeSegmentation;

// 文本清洗、分句和分词

// 句号后面不断句的缩写
const ABBREVIATIONS: &[&str] = &["mr", "mrs", "ms", "dr", "prof", "sr", "jr", "st", "vs", "e.g", "i.e"];

// 删除反斜杠，并把连续空白压缩成一个空格
pub fn clean_text(text: &str) -> String {
    text.replace('\\', "")
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

// 按 UAX #29 分句，再把以缩写或姓名首字母结尾的片段接到下一句；只有标点的句子丢弃
pub fn split_sentences(text: &str) -> Vec<String> {
    let mut sentences = Vec::new();
    let mut current = String::new();

    for segment in text.unicode_sentences() {
        current.push_str(segment);
        if !ends_with_abbreviation(current.trim_end()) {
            push_sentence(&mut sentences, &current);
            current.clear();
        }
    }
    push_sentence(&mut sentences, &current);

    sentences
}

fn push_sentence(sentences: &mut Vec<String>, sentence: &str) {
    let sentence = sentence.trim();
    if sentence.chars().any(char::is_alphanumeric) {
        sentences.push(sentence.to_string());
    }
}

fn ends_with_abbreviation(sentence: &str) -> bool {
    if !sentence.ends_with('.') {
        return false;
    }
    let Some(last) = sentence.split_whitespace().last() else {
        return false;
    };
    let word = last
        .trim_start_matches(|c: char| !c.is_alphanumeric())
        .trim_end_matches('.')
        .to_lowercase();

    // 单个大写字母的姓名缩写 (J. K. Rowling)
    let is_initial = word.chars().count() == 1
        && last.chars().next().is_some_and(char::is_uppercase);

    is_initial || ABBREVIATIONS.contains(&word.as_str())
}

// 按 UAX #29 词边界切分，再按 Penn 的方式拆开缩写: don't -> do n't, it's -> it 's
pub fn tokenize(sentence: &str) -> Vec<String> {
    let mut tokens = Vec::new();
    for segment in sentence.split_word_bounds() {
        if segment.trim().is_empty() {
            continue;
        }
        split_contraction(&mut tokens, &segment.replace('’', "'"));
    }
    tokens
}

fn split_contraction(tokens: &mut Vec<String>, word: &str) {
    let lower = word.to_lowercase();

    if lower.ends_with("n't") && word.len() > 3 {
        let split = word.len() - 3;
        tokens.push(word[..split].to_string());
        tokens.push(word[split..].to_string());
    } else if let Some(pos) = word.find('\'').filter(|&pos| pos > 0 && pos + 1 < word.len()) {
        tokens.push(word[..pos].to_string());
        tokens.push(word[pos..].to_string());
    } else {
        tokens.push(word.to_string());
    }
}

// 只统计纯字母的词
pub fn is_word(token: &str) -> bool {
    !token.is_empty() && token.chars().all(char::is_alphabetic)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clean_text_removes_backslashes_and_spaces() {
        assert_eq!(
            clean_text("This is a test.\\ It has backslashes.\\"),
            "This is a test. It has backslashes."
        );
        assert_eq!(clean_text("This   has \n multiple    spaces."), "This has multiple spaces.");
    }

    #[test]
    fn splits_sentences_on_terminal_punctuation() {
        let sentences =
            split_sentences("This is the first sentence. This is the second. And this is the third!");
        assert_eq!(
            sentences,
            vec![
                "This is the first sentence.",
                "This is the second.",
                "And this is the third!"
            ]
        );
    }

    #[test]
    fn drops_punctuation_only_sentences() {
        assert_eq!(split_sentences("... First. Second."), vec!["First.", "Second."]);
    }

    #[test]
    fn keeps_abbreviations_and_quotes_inside_sentences() {
        let sentences = split_sentences("Mr. Smith said \"Hello.\" Then he left. J. K. Rowling wrote it.");
        assert_eq!(
            sentences,
            vec![
                "Mr. Smith said \"Hello.\"",
                "Then he left.",
                "J. K. Rowling wrote it."
            ]
        );
    }

    #[test]
    fn tokenizes_words_punctuation_and_contractions() {
        assert_eq!(
            tokenize("The cat sat on the mat."),
            vec!["The", "cat", "sat", "on", "the", "mat", "."]
        );
        assert_eq!(tokenize("I don't know."), vec!["I", "do", "n't", "know", "."]);
        assert_eq!(tokenize("It’s Anna's book"), vec!["It", "'s", "Anna", "'s", "book"]);
        assert_eq!(tokenize("Let's go"), vec!["Let", "'s", "go"]);
        assert_eq!(tokenize("a well-known 'word'"), vec!["a", "well", "-", "known", "'", "word", "'"]);
    }

    #[test]
    fn only_alphabetic_tokens_are_words() {
        assert!(is_word("rabbit"));
        assert!(!is_word("n't"));
        assert!(!is_word("42"));
        assert!(!is_word("well-known"));
        assert!(!is_word(""));
    }
}
