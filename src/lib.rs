pub mod analyzer;
pub mod cli;
pub mod config;
pub mod database;
pub mod dictionary;
pub mod error;
pub mod grammar;
pub mod inflection;
pub mod models;
pub mod nlprule_tagger;
pub mod reporter;
pub mod tagger;
pub mod tokenizer;

pub use analyzer::Analyzer;
pub use config::Config;
pub use dictionary::Dictionary;
pub use error::{Error, Result};
pub use models::*;
pub use nlprule_tagger::NlpruleTagger;
pub use reporter::{ReportOptions, Reporter};
pub use tagger::{HeuristicTagger, TaggedToken, Tagger};
