//! Remote corpus sources.

mod fetcher;

pub use fetcher::HttpCorpusFetcher;
