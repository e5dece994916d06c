//! Search query construction for a ticker symbol.

use chrono::NaiveDate;

use crate::error::NewsError;

/// Company-name synonyms for well-known tickers. The search variant ORs the
/// synonym with the raw symbol so articles that never mention the ticker
/// still match. Unknown symbols search on the quoted symbol alone.
const COMPANY_SYNONYMS: &[(&str, &str)] = &[
    ("AAPL", "Apple Inc."),
    ("AMZN", "Amazon.com Inc."),
    ("GOOGL", "Alphabet Inc."),
    ("META", "Meta Platforms Inc."),
    ("MSFT", "Microsoft Corporation"),
    ("NVDA", "NVIDIA Corporation"),
    ("TSLA", "Tesla Inc."),
];

const TOPIC_KEYWORDS: &str = "stock news earnings financial analysis";

const EXCLUDED_SITES: &[&str] = &["youtube.com", "reddit.com"];

const ALLOWED_SITES: &[&str] = &["finance.yahoo.com", "reuters.com", "bloomberg.com"];

/// One summarization request: a ticker symbol plus an optional date
/// lower-bound. Symbols are passed through unvalidated beyond being
/// non-blank; a malformed symbol simply yields zero results downstream.
#[derive(Debug, Clone)]
pub struct NewsQuery {
    symbol: String,
    since: Option<NaiveDate>,
}

impl NewsQuery {
    /// Build a query for `symbol`, trimming surrounding whitespace.
    ///
    /// # Errors
    ///
    /// Returns [`NewsError::InvalidQuery`] when the symbol is blank.
    pub fn new(symbol: &str, since: Option<NaiveDate>) -> Result<Self, NewsError> {
        let symbol = symbol.trim();
        if symbol.is_empty() {
            return Err(NewsError::InvalidQuery(
                "symbol must not be empty".to_string(),
            ));
        }
        Ok(Self {
            symbol: symbol.to_string(),
            since,
        })
    }

    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    pub fn since(&self) -> Option<NaiveDate> {
        self.since
    }

    /// Render the free-text search query used by the search-engine source:
    /// quoted symbol (OR'd with its company-name synonym when known), topic
    /// keywords, site exclusions, an allow-site clause, an `after:` date
    /// filter when a lower-bound is set, and a filetype filter.
    pub fn search_query(&self) -> String {
        let upper = self.symbol.to_uppercase();
        let subject = match COMPANY_SYNONYMS
            .iter()
            .find(|(ticker, _)| *ticker == upper)
        {
            Some((_, company)) => format!("(\"{}\" OR \"{}\")", self.symbol, company),
            None => format!("\"{}\"", self.symbol),
        };

        let mut query = format!("{subject} {TOPIC_KEYWORDS}");

        for site in EXCLUDED_SITES {
            query.push_str(&format!(" -site:{site}"));
        }

        let allow = ALLOWED_SITES
            .iter()
            .map(|site| format!("site:{site}"))
            .collect::<Vec<_>>()
            .join(" OR ");
        query.push_str(&format!(" ({allow})"));

        if let Some(date) = self.since {
            query.push_str(&format!(" after: {}", date.format("%Y-%m-%d")));
        }

        query.push_str(" filetype:html");
        query
    }
}
