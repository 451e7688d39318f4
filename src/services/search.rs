// src/services/search.rs

//! Keyword search over the site catalogue.
//!
//! Matching is case-insensitive substring containment. Results are ranked
//! by relevance (stable, so ties keep discovery order: services, navigation,
//! testimonials, keyword table), deduplicated on `(type, href)` and capped.
//!
//! A keyword-table hit is skipped only when its destination is already
//! ranked at keyword relevance; otherwise it is added and the dedup pass
//! keeps it over the lower-ranked page for the same href.

use std::collections::HashSet;

use crate::models::{Catalog, ResultKind, SearchResult};

/// Maximum number of results returned per query.
pub const MAX_RESULTS: usize = 10;

/// Keyword-table hits outrank every catalogue match but testimonial names.
const KEYWORD_RELEVANCE: u8 = 3;

/// Characters of testimonial text kept in a result description.
const EXCERPT_CHARS: usize = 100;

/// Search over a borrowed catalogue.
pub struct SearchIndex<'a> {
    catalog: &'a Catalog,
}

impl<'a> SearchIndex<'a> {
    pub fn new(catalog: &'a Catalog) -> Self {
        Self { catalog }
    }

    /// Rank catalogue entries matching `query`.
    ///
    /// A blank query yields no results.
    pub fn search(&self, query: &str) -> Vec<SearchResult> {
        let query = query.trim().to_lowercase();
        if query.is_empty() {
            return Vec::new();
        }

        let mut results = Vec::new();
        self.collect_services(&query, &mut results);
        self.collect_pages(&query, &mut results);
        self.collect_testimonials(&query, &mut results);
        self.collect_keywords(&query, &mut results);

        // Vec::sort_by is stable
        results.sort_by(|a, b| b.relevance.cmp(&a.relevance));

        let mut seen = HashSet::new();
        results
            .into_iter()
            .filter(|r| seen.insert((r.kind, r.href.clone())))
            .take(MAX_RESULTS)
            .collect()
    }

    fn collect_services(&self, query: &str, results: &mut Vec<SearchResult>) {
        for service in &self.catalog.services {
            let title_match = contains(&service.title, query);
            let desc_match = contains(&service.description, query);
            if !(title_match || desc_match) {
                continue;
            }
            results.push(SearchResult {
                kind: ResultKind::Service,
                title: service.title.clone(),
                description: service.description.clone(),
                href: service.href.clone(),
                icon: service.icon.clone(),
                relevance: if title_match { 2 } else { 1 },
            });
        }
    }

    fn collect_pages(&self, query: &str, results: &mut Vec<SearchResult>) {
        for link in &self.catalog.nav_links {
            if link.href != "#" && contains(&link.name, query) {
                results.push(page_result(&link.name, &link.href));
            }
            for item in &link.dropdown {
                if contains(&item.name, query) {
                    results.push(page_result(&item.name, &item.href));
                }
            }
        }
    }

    fn collect_testimonials(&self, query: &str, results: &mut Vec<SearchResult>) {
        for testimonial in &self.catalog.testimonials {
            let relevance = if contains(&testimonial.name, query) {
                3
            } else if contains(&testimonial.country, query) {
                2
            } else if contains(&testimonial.testimonial, query) {
                1
            } else {
                continue;
            };

            let excerpt: String = testimonial.testimonial.chars().take(EXCERPT_CHARS).collect();
            results.push(SearchResult {
                kind: ResultKind::Testimonial,
                title: format!("{} - {}", testimonial.name, testimonial.country),
                description: format!("{excerpt}..."),
                href: "/testimonials".to_string(),
                icon: "users".to_string(),
                relevance,
            });
        }
    }

    fn collect_keywords(&self, query: &str, results: &mut Vec<SearchResult>) {
        for route in &self.catalog.keywords {
            if !query.contains(route.keyword.as_str()) {
                continue;
            }
            if results
                .iter()
                .any(|r| r.href == route.href && r.relevance >= KEYWORD_RELEVANCE)
            {
                continue;
            }
            results.push(SearchResult {
                kind: ResultKind::Page,
                title: route.title.clone(),
                description: format!("Go to {} page", route.title),
                href: route.href.clone(),
                icon: route.icon.clone(),
                relevance: KEYWORD_RELEVANCE,
            });
        }
    }
}

fn page_result(name: &str, href: &str) -> SearchResult {
    SearchResult {
        kind: ResultKind::Page,
        title: name.to_string(),
        description: format!("Navigate to {name} page"),
        href: href.to_string(),
        icon: "file-text".to_string(),
        relevance: 2,
    }
}

fn contains(haystack: &str, lowered_query: &str) -> bool {
    haystack.to_lowercase().contains(lowered_query)
}

/// Query box state: holds the text, exposes results, and resets on selection.
#[derive(Debug, Default, Clone)]
pub struct SearchSession {
    query: String,
}

impl SearchSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn set_query(&mut self, query: impl Into<String>) {
        self.query = query.into();
    }

    pub fn results(&self, index: &SearchIndex<'_>) -> Vec<SearchResult> {
        index.search(&self.query)
    }

    /// Pick result `position`; returns the destination and clears the query.
    pub fn select(&mut self, index: &SearchIndex<'_>, position: usize) -> Option<String> {
        let href = self.results(index).into_iter().nth(position)?.href;
        log::debug!("Search '{}' -> {}", self.query, href);
        self.query.clear();
        Some(href)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{NavItem, NavLink, ServiceEntry, Testimonial, TestimonialKind};

    fn hrefs(results: &[SearchResult]) -> Vec<&str> {
        results.iter().map(|r| r.href.as_str()).collect()
    }

    #[test]
    fn test_blank_query_is_empty() {
        let catalog = Catalog::default();
        let index = SearchIndex::new(&catalog);
        assert!(index.search("").is_empty());
        assert!(index.search("   \t\n").is_empty());
    }

    #[test]
    fn test_visa_query() {
        let catalog = Catalog::default();
        let index = SearchIndex::new(&catalog);
        let results = index.search("visa");

        let visa_pages: Vec<_> = results.iter().filter(|r| r.href == "/visa").collect();
        assert_eq!(visa_pages.len(), 1);
        assert_eq!(visa_pages[0].relevance, 3);
        assert_eq!(visa_pages[0].title, "Visa Services");
        assert_eq!(visa_pages[0].kind, ResultKind::Page);
        assert_eq!(results[0].href, "/visa");

        let student = results
            .iter()
            .find(|r| r.href == "/services/student-visa")
            .unwrap();
        assert_eq!(student.kind, ResultKind::Service);
        assert_eq!(student.relevance, 2);

        // Description-only match
        let documents = results
            .iter()
            .find(|r| r.href == "/services/document-preparation")
            .unwrap();
        assert_eq!(documents.relevance, 1);
    }

    #[test]
    fn test_keyword_not_repeated_for_same_destination() {
        let catalog = Catalog::default();
        let index = SearchIndex::new(&catalog);
        // "appointment" and "book" both route to /appointment
        let results = index.search("book appointment");
        assert_eq!(hrefs(&results), vec!["/appointment"]);
        assert_eq!(results[0].title, "Book Appointment");
        assert_eq!(results[0].description, "Go to Book Appointment page");
    }

    #[test]
    fn test_results_sorted_capped_and_unique() {
        let catalog = Catalog::default();
        let index = SearchIndex::new(&catalog);
        for query in ["a", "e", "visa", "canada", "service", "book"] {
            let results = index.search(query);
            assert!(results.len() <= MAX_RESULTS, "{query}");
            assert!(
                results.windows(2).all(|w| w[0].relevance >= w[1].relevance),
                "{query}"
            );
            let unique: HashSet<_> = results.iter().map(|r| (r.kind, r.href.clone())).collect();
            assert_eq!(unique.len(), results.len(), "{query}");
        }
    }

    #[test]
    fn test_case_insensitive() {
        let catalog = Catalog::default();
        let index = SearchIndex::new(&catalog);
        assert_eq!(index.search("IELTS"), index.search("ielts"));
        assert_eq!(hrefs(&index.search("  Ielts ")), vec!["/services/language-tests"]);
    }

    #[test]
    fn test_description_match_ranks_below_title_match() {
        let catalog = Catalog::default();
        let index = SearchIndex::new(&catalog);
        let results = index.search("immigration");

        let consultation = results
            .iter()
            .find(|r| r.href == "/services/immigration-consultation")
            .unwrap();
        let express = results
            .iter()
            .find(|r| r.href == "/services/express-entry")
            .unwrap();
        assert_eq!(consultation.relevance, 2);
        assert_eq!(express.relevance, 1);
    }

    #[test]
    fn test_testimonial_tiers() {
        let catalog = Catalog::default();
        let index = SearchIndex::new(&catalog);

        let by_name = index.search("lisa");
        assert_eq!(by_name[0].kind, ResultKind::Testimonial);
        assert_eq!(by_name[0].relevance, 3);
        assert_eq!(by_name[0].title, "Lisa K. - Germany");
        assert!(by_name[0].description.ends_with("..."));
        assert_eq!(by_name[0].description.chars().count(), 103);

        let by_country = index.search("israel");
        let testimonial = by_country
            .iter()
            .find(|r| r.kind == ResultKind::Testimonial)
            .unwrap();
        assert_eq!(testimonial.relevance, 2);

        let by_body = index.search("algonquin");
        assert_eq!(by_body.len(), 1);
        assert_eq!(by_body[0].relevance, 1);
    }

    #[test]
    fn test_testimonials_dedupe_on_shared_href() {
        let catalog = Catalog::default();
        let index = SearchIndex::new(&catalog);
        let results = index.search("canada");
        let testimonials: Vec<_> = results
            .iter()
            .filter(|r| r.kind == ResultKind::Testimonial)
            .collect();
        // Both Canadian testimonials share /testimonials; the first discovered wins
        assert_eq!(testimonials.len(), 1);
        assert_eq!(testimonials[0].title, "Salomon Niyitanga - Canada");
    }

    #[test]
    fn test_stable_order_for_equal_relevance() {
        let catalog = Catalog {
            services: vec![
                ServiceEntry {
                    id: 1,
                    title: "Alpha tour".into(),
                    description: String::new(),
                    href: "/a".into(),
                    icon: "plane".into(),
                },
                ServiceEntry {
                    id: 2,
                    title: "Beta tour".into(),
                    description: String::new(),
                    href: "/b".into(),
                    icon: "plane".into(),
                },
            ],
            nav_links: vec![NavLink {
                name: "Tours".into(),
                href: "#".into(),
                dropdown: vec![NavItem {
                    name: "Gamma tour".into(),
                    href: "/c".into(),
                }],
            }],
            testimonials: vec![Testimonial {
                id: 1,
                country: "Tourland".into(),
                name: "Zed".into(),
                testimonial: "ok".into(),
                kind: TestimonialKind::Text,
                image: None,
                video: None,
                scholarship: false,
            }],
            keywords: Vec::new(),
            contact: Default::default(),
        };
        let index = SearchIndex::new(&catalog);
        let results = index.search("tour");

        // Testimonial country match (2) ties with the services and page, and comes last
        assert_eq!(hrefs(&results), vec!["/a", "/b", "/c", "/testimonials"]);
        // "#" parents are not results, their dropdown items are
        assert!(results.iter().all(|r| r.href != "#"));
    }

    #[test]
    fn test_keyword_suppressed_by_existing_href_of_any_type() {
        let catalog = Catalog::default();
        let index = SearchIndex::new(&catalog);
        let results = index.search("testimonials");
        let at_testimonials: Vec<_> = results.iter().filter(|r| r.href == "/testimonials").collect();
        assert_eq!(at_testimonials.len(), 1);
    }

    #[test]
    fn test_result_cap() {
        let catalog = Catalog::default();
        let index = SearchIndex::new(&catalog);
        // Every service description contains an "e"
        assert_eq!(index.search("e").len(), MAX_RESULTS);
    }

    #[test]
    fn test_session_select_clears_query() {
        let catalog = Catalog::default();
        let index = SearchIndex::new(&catalog);
        let mut session = SearchSession::new();
        session.set_query("appointment");

        let href = session.select(&index, 0).unwrap();
        assert_eq!(href, "/appointment");
        assert!(session.query().is_empty());
        assert!(session.results(&index).is_empty());
    }

    #[test]
    fn test_session_select_out_of_range_keeps_query() {
        let catalog = Catalog::default();
        let index = SearchIndex::new(&catalog);
        let mut session = SearchSession::new();
        session.set_query("ielts");
        assert!(session.select(&index, 5).is_none());
        assert_eq!(session.query(), "ielts");
    }
}
