use std::path::{Path, PathBuf};

use crate::error::{Error, Result};
use crate::models::GrammarPoint;

// 与输入文件同名的语法 JSON 文件路径 (text.md -> text.json)
pub fn companion_path(input: &Path) -> PathBuf {
    input.with_extension("json")
}

// 读取语法点列表
pub async fn load_grammar_points(path: &Path) -> Result<Vec<GrammarPoint>> {
    let content = tokio::fs::read_to_string(path)
        .await
        .map_err(|source| Error::GrammarRead {
            path: path.to_path_buf(),
            source,
        })?;

    let points: Vec<GrammarPoint> =
        serde_json::from_str(&content).map_err(|source| Error::GrammarParse {
            path: path.to_path_buf(),
            source,
        })?;

    tracing::info!(path = %path.display(), count = points.len(), "loaded grammar points");
    Ok(points)
}
