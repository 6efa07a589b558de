//! Selection engine: narrows a corpus to one quote for a query.
//!
//! The rules, in order:
//!
//! 1. Explicit categories: concatenate the requested categories that exist
//!    (request order, per-category order kept). If nothing matched, use the
//!    default category.
//! 2. No categories: pick one category uniformly at random.
//! 3. Explicit length bounds: an empty working set is widened to the whole
//!    corpus first, then filtered to the inclusive window.
//! 4. Pick one quote uniformly at random.
//!
//! The random source is injected so callers decide between an OS-seeded
//! generator and a seeded one.

use crate::core::error::DomainError;
use crate::query::Query;
use crate::quote::{Corpus, QuoteRecord};
use rand::Rng;
use rand::seq::IndexedRandom;

pub const NO_LENGTH_MATCH: &str = "no quote matches length constraints";
pub const NO_QUOTE_AVAILABLE: &str = "no quote available";

/// Select one quote for `query`
///
/// `default_category` is the fallback used when explicit category filtering
/// matches nothing.
pub fn select_quote<R: Rng + ?Sized>(
    corpus: &Corpus,
    query: &Query,
    default_category: &str,
    rng: &mut R,
) -> Result<QuoteRecord, DomainError> {
    let mut candidates = candidates_by_category(corpus, &query.categories, default_category, rng);

    if query.length.explicit {
        if candidates.is_empty() {
            candidates = corpus.flatten();
        }
        candidates.retain(|quote| query.length.contains(quote.length));
        if candidates.is_empty() {
            return Err(DomainError::not_found(NO_LENGTH_MATCH));
        }
    }

    candidates
        .choose(rng)
        .map(|quote| (*quote).clone())
        .ok_or_else(|| DomainError::not_found(NO_QUOTE_AVAILABLE))
}

/// Working set before length filtering (steps 1 and 2)
pub fn candidates_by_category<'a, R: Rng + ?Sized>(
    corpus: &'a Corpus,
    categories: &[String],
    default_category: &str,
    rng: &mut R,
) -> Vec<&'a QuoteRecord> {
    if !categories.is_empty() {
        let matched: Vec<&QuoteRecord> = categories
            .iter()
            .filter_map(|key| corpus.get(key))
            .flatten()
            .collect();
        if !matched.is_empty() {
            return matched;
        }
        return corpus
            .get(default_category)
            .map(|quotes| quotes.iter().collect())
            .unwrap_or_default();
    }

    let keys: Vec<&str> = corpus.keys().collect();
    keys.choose(rng)
        .and_then(|key| corpus.get(key))
        .map(|quotes| quotes.iter().collect())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query::LengthBounds;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use std::collections::HashSet;

    fn quote(id: u64, kind: &str, text: &str) -> QuoteRecord {
        QuoteRecord::new(id, format!("{}-{}", kind, id), text).with_kind(kind)
    }

    fn corpus() -> Corpus {
        Corpus::new()
            .with_category(
                "a",
                vec![quote(1, "a", "short"), quote(2, "a", "a somewhat longer quote")],
            )
            .with_category("b", vec![quote(1, "b", "bb"), quote(2, "b", "bbbbbbbbbb")])
            .with_category("c", vec![])
    }

    fn rng() -> StdRng {
        StdRng::seed_from_u64(7)
    }

    #[test]
    fn test_requested_categories_concatenate_in_order() {
        let corpus = corpus();
        let picked = candidates_by_category(
            &corpus,
            &["b".to_string(), "a".to_string()],
            "a",
            &mut rng(),
        );
        let ids: Vec<_> = picked.iter().map(|q| q.uuid.as_str()).collect();
        assert_eq!(ids, vec!["b-1", "b-2", "a-1", "a-2"]);
    }

    #[test]
    fn test_unknown_categories_fall_back_to_default() {
        let corpus = corpus();
        let query = Query::new().with_categories(["zzz"]);
        let mut rng = rng();
        for _ in 0..20 {
            let quote = select_quote(&corpus, &query, "a", &mut rng).unwrap();
            assert_eq!(quote.kind, "a");
        }
    }

    #[test]
    fn test_empty_requested_category_falls_back_to_default() {
        let corpus = corpus();
        let query = Query::new().with_categories(["c"]);
        let quote = select_quote(&corpus, &query, "b", &mut rng()).unwrap();
        assert_eq!(quote.kind, "b");
    }

    #[test]
    fn test_missing_default_category_is_not_found() {
        let corpus = Corpus::new().with_category("b", vec![quote(1, "b", "x")]);
        let query = Query::new().with_categories(["q"]);
        let err = select_quote(&corpus, &query, "a", &mut rng()).unwrap_err();
        assert_eq!(err, DomainError::not_found(NO_QUOTE_AVAILABLE));
    }

    #[test]
    fn test_random_category_covers_all_keys() {
        let corpus = corpus();
        let query = Query::new();
        let mut rng = rng();
        let mut seen = HashSet::new();
        for _ in 0..200 {
            if let Ok(quote) = select_quote(&corpus, &query, "a", &mut rng) {
                seen.insert(quote.kind);
            }
        }
        assert!(seen.contains("a"));
        assert!(seen.contains("b"));
    }

    #[test]
    fn test_empty_random_category_without_bounds_is_not_found() {
        let corpus = Corpus::new().with_category("c", vec![]);
        let err = select_quote(&corpus, &Query::new(), "a", &mut rng()).unwrap_err();
        assert_eq!(err.message(), NO_QUOTE_AVAILABLE);
    }

    #[test]
    fn test_empty_corpus_is_not_found() {
        let err = select_quote(&Corpus::new(), &Query::new(), "a", &mut rng()).unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn test_length_filter_respects_bounds() {
        let corpus = corpus();
        let query = Query::new()
            .with_categories(["a", "b"])
            .with_length(LengthBounds::explicit(3, 10));
        let mut rng = rng();
        for _ in 0..50 {
            let quote = select_quote(&corpus, &query, "a", &mut rng).unwrap();
            assert!((3..=10).contains(&quote.length), "length {}", quote.length);
        }
    }

    #[test]
    fn test_length_filter_widens_empty_working_set() {
        let corpus = Corpus::new()
            .with_category("a", vec![])
            .with_category("b", vec![quote(1, "b", "hello")]);
        let query = Query::new()
            .with_categories(["missing"])
            .with_length(LengthBounds::explicit(1, 10));
        let quote = select_quote(&corpus, &query, "a", &mut rng()).unwrap();
        assert_eq!(quote.uuid, "b-1");
    }

    #[test]
    fn test_length_filter_without_match_is_not_found() {
        let corpus = corpus();
        let query = Query::new()
            .with_categories(["b"])
            .with_length(LengthBounds::explicit(100, 200));
        let err = select_quote(&corpus, &query, "a", &mut rng()).unwrap_err();
        assert_eq!(err, DomainError::not_found(NO_LENGTH_MATCH));
    }

    #[test]
    fn test_default_bounds_do_not_filter() {
        let long = "x".repeat(80);
        let corpus = Corpus::new().with_category("a", vec![quote(1, "a", &long)]);
        let quote = select_quote(&corpus, &Query::new(), "a", &mut rng()).unwrap();
        assert_eq!(quote.length, 80);
    }

    #[test]
    fn test_filter_uses_stored_length() {
        let corpus = Corpus::new().with_category(
            "a",
            vec![quote(1, "a", "abc").with_length(50)],
        );
        let query = Query::new().with_length(LengthBounds::explicit(1, 10));
        let err = select_quote(&corpus, &query, "a", &mut rng()).unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn test_seeded_selection_is_reproducible() {
        let corpus = corpus();
        let query = Query::new().with_categories(["a", "b"]);
        let first = select_quote(&corpus, &query, "a", &mut StdRng::seed_from_u64(42)).unwrap();
        let second = select_quote(&corpus, &query, "a", &mut StdRng::seed_from_u64(42)).unwrap();
        assert_eq!(first, second);
    }
}
