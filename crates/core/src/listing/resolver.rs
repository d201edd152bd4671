//! Search-results resolution: table rows to candidates to one listing URL.

use scraper::{ElementRef, Html, Selector};
use tracing::{debug, warn};

use crate::catalog::CatalogEntry;
use crate::matcher::{MatchFallback, MatcherConfig, TitleMatcher};

use super::types::{Resolution, ResolveError, SearchCandidate};

/// Resolves a catalog entry to a listing URL from a search results page.
///
/// Candidates are filtered to the entry's system (exact match on the trimmed
/// source string) before any similarity scoring. Deterministic for a given
/// entry and document.
pub struct ListingResolver {
    matcher: TitleMatcher,
    fallback: MatchFallback,
    table: Selector,
    row: Selector,
    system_cell: Selector,
    title_link: Selector,
    link: Selector,
}

impl ListingResolver {
    pub fn new(config: &MatcherConfig) -> Self {
        Self {
            matcher: TitleMatcher::new(config),
            fallback: config.fallback,
            table: Selector::parse("table#games_table").expect("valid selector"),
            row: Selector::parse("tbody tr").expect("valid selector"),
            system_cell: Selector::parse("td.console").expect("valid selector"),
            title_link: Selector::parse("td.title a").expect("valid selector"),
            link: Selector::parse("a[href]").expect("valid selector"),
        }
    }

    /// Resolve `entry` against a search results page body.
    ///
    /// A page without the results table is an error; a table whose rows all
    /// filter away, or whose best title is rejected by the matcher under
    /// the configured fallback, is `NotFound`.
    pub fn resolve(&self, entry: &CatalogEntry, html: &str) -> Result<Resolution, ResolveError> {
        let candidates = self.extract_candidates(html)?;

        let filtered: Vec<&SearchCandidate> = candidates
            .iter()
            .filter(|c| c.system == entry.system)
            .collect();

        if filtered.is_empty() {
            debug!(name = %entry.name, system = %entry.system, "No candidates for system");
            return Ok(Resolution::NotFound);
        }

        let titles: Vec<&str> = filtered.iter().map(|c| c.title.as_str()).collect();

        match self.matcher.best_match(&entry.name, &titles) {
            Some(idx) => Ok(Resolution::Listing(filtered[idx].url.clone())),
            None => match self.fallback {
                MatchFallback::First => {
                    debug!(
                        name = %entry.name,
                        fallback = %filtered[0].title,
                        "No candidate above threshold, falling back to first"
                    );
                    Ok(Resolution::Listing(filtered[0].url.clone()))
                }
                MatchFallback::None => Ok(Resolution::NotFound),
            },
        }
    }

    /// Extract all rows of the results table into candidates. Malformed
    /// rows are skipped; a missing table is an error.
    pub fn extract_candidates(&self, html: &str) -> Result<Vec<SearchCandidate>, ResolveError> {
        let document = Html::parse_document(html);
        let table = document
            .select(&self.table)
            .next()
            .ok_or(ResolveError::MissingResultsTable)?;

        let mut candidates = Vec::new();
        for row in table.select(&self.row) {
            match self.extract_candidate(row) {
                Some(candidate) => candidates.push(candidate),
                None => warn!("Skipping malformed search result row"),
            }
        }

        Ok(candidates)
    }

    fn extract_candidate(&self, row: ElementRef<'_>) -> Option<SearchCandidate> {
        let system = row.select(&self.system_cell).next()?;
        let title = row.select(&self.title_link).next()?;
        let url = row
            .select(&self.link)
            .next()?
            .value()
            .attr("href")?
            .to_string();

        Some(SearchCandidate {
            system: system.text().collect::<String>().trim().to_string(),
            title: title.text().collect::<String>().trim().to_string(),
            url,
        })
    }
}

/// URL path segment for a name the way the source slugs them: lowercased,
/// whitespace runs joined with hyphens.
pub fn slug(name: &str) -> String {
    name.to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("-")
}
