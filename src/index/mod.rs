pub mod document;
pub mod page;
pub mod types;

pub use document::DocumentIndex;
pub use page::{Page, TextForm};
pub use types::{EngineConfig, MatchMethod, MatchResult, PageNumber};
