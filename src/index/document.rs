use crate::index::page::Page;
use crate::index::types::{EngineConfig, PageNumber};
use rayon::prelude::*;

/// The per-document index cache: owns every [`Page`] and the engine
/// configuration.
///
/// This is the one long-lived object of the crate. Build it once per
/// document, then run any number of fragment batches against it; page
/// indices are built lazily and never invalidated within its lifetime.
#[derive(Debug)]
pub struct DocumentIndex {
    pages: Vec<Page>,
    config: EngineConfig,
}

impl DocumentIndex {
    /// Build from per-page extracted text, in reading order. Page numbers
    /// are assigned 1-based from the input order.
    pub fn new<I, S>(page_texts: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::with_config(page_texts, EngineConfig::default())
    }

    pub fn with_config<I, S>(page_texts: I, config: EngineConfig) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let pages = page_texts
            .into_iter()
            .enumerate()
            .map(|(i, text)| Page::new(i as PageNumber + 1, text))
            .collect();
        Self { pages, config }
    }

    pub fn pages(&self) -> &[Page] {
        &self.pages
    }

    /// Look up a page by its 1-based number.
    pub fn page(&self, number: PageNumber) -> Option<&Page> {
        self.pages.get(number.checked_sub(1)? as usize)
    }

    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Build every page's indices up front, in parallel. Useful before
    /// fanning a fragment batch out over threads.
    pub fn warm(&self) {
        self.pages.par_iter().for_each(Page::warm);
    }
}
