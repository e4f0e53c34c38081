use std::path::Path;

use sqlx::SqlitePool;
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions};

use crate::error::{Error, Result};
use crate::models::DictionaryEntry;

// 英和词典表结构（与 ejdict 相同）
const SCHEMA: &str = r#"
CREATE TABLE IF NOT EXISTS items (
    item_id INTEGER PRIMARY KEY,
    word TEXT NOT NULL UNIQUE,
    mean TEXT NOT NULL,
    level INTEGER NOT NULL DEFAULT 0
);
CREATE INDEX IF NOT EXISTS items_word_nocase ON items (word COLLATE NOCASE);
"#;

// 随程序一起分发的初始词条
const SEED: &str = include_str!("../data/ejdict_seed.sql");

// 只读的英和词典
pub struct DictionaryStore {
    pool: SqlitePool,
}

impl DictionaryStore {
    // 文件不存在时先用内置词条创建
    pub async fn open(path: &Path) -> Result<Self> {
        if !path.exists() {
            create_from_seed(path).await?;
        }

        let options = SqliteConnectOptions::new()
            .filename(path)
            .read_only(true);
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect_with(options)
            .await?;

        tracing::info!(path = %path.display(), "opened dictionary store");
        Ok(DictionaryStore { pool })
    }

    // 只含给定词条的内存词典，item_id 为 0 的按插入顺序分配
    pub async fn from_entries(entries: &[DictionaryEntry]) -> Result<Self> {
        let options: SqliteConnectOptions = "sqlite::memory:".parse()?;
        // 内存数据库随连接关闭而消失，所以连接必须一直保留
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect_with(options)
            .await?;

        sqlx::raw_sql(SCHEMA).execute(&pool).await?;
        for entry in entries {
            let item_id = (entry.item_id != 0).then_some(entry.item_id);
            sqlx::query("INSERT INTO items (item_id, word, mean, level) VALUES (?, ?, ?, ?)")
                .bind(item_id)
                .bind(&entry.word)
                .bind(&entry.mean)
                .bind(entry.level)
                .execute(&pool)
                .await?;
        }

        Ok(DictionaryStore { pool })
    }

    // 不区分大小写，多条只差大小写时取 item_id 最小的
    pub async fn lookup(&self, headword: &str) -> Result<Option<String>> {
        let mean: Option<Option<String>> = sqlx::query_scalar(
            "SELECT mean FROM items WHERE word = ? COLLATE NOCASE ORDER BY item_id LIMIT 1",
        )
        .bind(headword)
        .fetch_optional(&self.pool)
        .await?;

        tracing::debug!(headword, hit = mean.is_some(), "dictionary lookup");
        Ok(mean.flatten())
    }

    pub async fn close(self) {
        self.pool.close().await;
    }
}

async fn create_from_seed(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|e| Error::io(parent, e))?;
    }
    println!("✨ 创建词典数据库: {}", path.display());

    let options = SqliteConnectOptions::new()
        .filename(path)
        .create_if_missing(true)
        .journal_mode(SqliteJournalMode::Delete);
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect_with(options)
        .await?;

    sqlx::raw_sql(SCHEMA).execute(&pool).await?;
    sqlx::raw_sql(SEED).execute(&pool).await?;
    pool.close().await;
    Ok(())
}
