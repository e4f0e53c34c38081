use std::io;
use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

// 运行过程中可能出现的错误
#[derive(Debug, Error)]
pub enum Error {
    #[error("配置文件不存在或无法读取: {path}: {source}")]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("配置文件解析失败: {path}: {source}")]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("输入路径不存在: {0}")]
    InputNotFound(PathBuf),

    #[error("目录中没有找到文本文件 (.md / .txt): {0}")]
    NoInputFiles(PathBuf),

    #[error("输入文件必须是 .md 或 .txt: {0}")]
    UnsupportedInput(PathBuf),

    #[error("文件名重复，报告会互相覆盖: {first} 和 {second}")]
    DuplicateInputStem { first: PathBuf, second: PathBuf },

    #[error("词性标注模型加载失败 {path}: {source}")]
    TaggerLoad {
        path: PathBuf,
        #[source]
        source: nlprule::Error,
    },

    #[error("文件读写失败 {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("词典数据库错误: {0}")]
    Database(#[from] sqlx::Error),

    #[error("语法文件无法读取 {path}: {source}")]
    GrammarRead {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("语法文件解析失败 {path}: {source}")]
    GrammarParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

impl Error {
    pub(crate) fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Error::Io {
            path: path.into(),
            source,
        }
    }
}
