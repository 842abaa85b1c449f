//! The ProjectsCatalog: the authoritative record store and the derived
//! view the UI renders.
//!
//! The catalog owns two lists. `projects` is the full catalog, replaced
//! wholesale by `load`/`from_json` and never mutated in between.
//! `results` is the working view: every filter, search, or technology
//! predicate re-derives it from the full catalog (last predicate wins),
//! and sorting reorders it in place. Records are shared via `Arc`, so
//! deriving a view selects and orders references without copying.

use std::collections::{BTreeMap, HashSet};
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use chrono::Utc;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::record::ProjectRecord;

/// Sentinel category that selects the whole catalog.
pub const ALL_CATEGORIES: &str = "all";

/// Version written into the export envelope. Imports accept this version
/// or the bare record array produced by older exports.
const CATALOG_FORMAT_VERSION: u32 = 1;

/// Errors produced by catalog mutation. Query operations are total and
/// never fail.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CatalogError {
    /// Input records violate a catalog invariant (duplicate or zero id,
    /// empty title). The offending load is rejected as a whole.
    #[error("invalid catalog: {0}")]
    Validation(String),
    /// Imported text is not a well-formed catalog document. The previous
    /// catalog state is retained.
    #[error("failed to parse catalog: {0}")]
    Parse(String),
}

/// The five supported orderings of the working view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortKey {
    /// Descending by id
    Newest,
    /// Ascending by id
    Oldest,
    /// Descending by view count
    Popular,
    /// Featured projects first, stable within each group
    Featured,
    /// Ascending by title, case-insensitive
    Alphabetical,
}

impl SortKey {
    /// All keys, in the order the sort dropdown offers them.
    pub const ALL: [SortKey; 5] = [
        SortKey::Newest,
        SortKey::Oldest,
        SortKey::Popular,
        SortKey::Featured,
        SortKey::Alphabetical,
    ];

    /// Canonical lowercase name, matching the wire/UI key strings.
    pub fn as_str(&self) -> &'static str {
        match self {
            SortKey::Newest => "newest",
            SortKey::Oldest => "oldest",
            SortKey::Popular => "popular",
            SortKey::Featured => "featured",
            SortKey::Alphabetical => "alphabetical",
        }
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            SortKey::Newest => "Newest",
            SortKey::Oldest => "Oldest",
            SortKey::Popular => "Popular",
            SortKey::Featured => "Featured",
            SortKey::Alphabetical => "Alphabetical",
        };
        f.write_str(label)
    }
}

/// Raised when a sort-key string is not one of the five documented keys.
/// Callers treat this as a no-op: the current order is left unchanged.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown sort key: {0}")]
pub struct UnknownSortKey(pub String);

impl FromStr for SortKey {
    type Err = UnknownSortKey;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "newest" => Ok(SortKey::Newest),
            "oldest" => Ok(SortKey::Oldest),
            "popular" => Ok(SortKey::Popular),
            "featured" => Ok(SortKey::Featured),
            "alphabetical" => Ok(SortKey::Alphabetical),
            other => Err(UnknownSortKey(other.to_string())),
        }
    }
}

/// Sizes of the full catalog and the current working view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Summary {
    pub total: usize,
    pub filtered: usize,
}

impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.filtered == self.total {
            write!(f, "Showing all {} projects", self.total)
        } else {
            write!(f, "Showing {} of {} projects", self.filtered, self.total)
        }
    }
}

/// Full-catalog aggregates, independent of the current view state.
/// BTreeMaps keep the breakdowns in a deterministic order for display.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CatalogStatistics {
    pub total: usize,
    pub by_category: BTreeMap<String, usize>,
    pub by_technology: BTreeMap<String, usize>,
    pub featured: usize,
}

/// Export envelope. The `version` field is a forward-compatible
/// extension; older exports were a bare top-level array.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ExportEnvelope<'a> {
    version: u32,
    exported_at: String,
    projects: &'a [Arc<ProjectRecord>],
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ImportEnvelope {
    version: u32,
    projects: Vec<ProjectRecord>,
}

/// Either a versioned envelope or a legacy bare record array.
#[derive(Deserialize)]
#[serde(untagged)]
enum ImportDocument {
    Envelope(ImportEnvelope),
    Records(Vec<ProjectRecord>),
}

/// The projects catalog and its derived view.
#[derive(Debug, Clone)]
pub struct ProjectsCatalog {
    /// The full catalog, in load order. Replaced wholesale, never edited.
    projects: Vec<Arc<ProjectRecord>>,
    /// The working view: the result of the last predicate, in the order
    /// of the last sort (or load order).
    results: Vec<Arc<ProjectRecord>>,
    /// Last category the caller selected ("all" or a category value)
    filter: String,
    /// Last search text the caller entered (may be blank)
    query: String,
    /// Last sort the caller applied, if any
    sort: Option<SortKey>,
}

impl Default for ProjectsCatalog {
    fn default() -> Self {
        Self::new()
    }
}

impl ProjectsCatalog {
    /// Create an empty catalog showing an empty view.
    pub fn new() -> Self {
        ProjectsCatalog {
            projects: Vec::new(),
            results: Vec::new(),
            filter: ALL_CATEGORIES.to_string(),
            query: String::new(),
            sort: None,
        }
    }

    /// Replace the catalog wholesale.
    ///
    /// Records are validated first: every id must be positive and unique
    /// and every title non-empty. On any violation the whole load is
    /// rejected and the previous catalog (and view) stays in place.
    /// On success the view resets to all records in load order, with the
    /// "all" filter, a blank query, and no active sort.
    pub fn load(&mut self, records: Vec<ProjectRecord>) -> Result<(), CatalogError> {
        Self::validate(&records)?;

        self.projects = records.into_iter().map(Arc::new).collect();
        self.filter = ALL_CATEGORIES.to_string();
        self.query.clear();
        self.sort = None;
        self.results = self.projects.clone();

        tracing::info!(projects = self.projects.len(), "catalog loaded");
        Ok(())
    }

    fn validate(records: &[ProjectRecord]) -> Result<(), CatalogError> {
        let mut seen = HashSet::with_capacity(records.len());
        for record in records {
            if record.id == 0 {
                return Err(CatalogError::Validation(format!(
                    "project \"{}\" has id 0; ids must be positive",
                    record.title
                )));
            }
            if !seen.insert(record.id) {
                return Err(CatalogError::Validation(format!(
                    "duplicate project id {}",
                    record.id
                )));
            }
            if record.title.trim().is_empty() {
                return Err(CatalogError::Validation(format!(
                    "project {} has an empty title",
                    record.id
                )));
            }
        }
        Ok(())
    }

    /// Select by category. "all" restores the full catalog in load
    /// order; anything else keeps the records whose category matches
    /// exactly (case-sensitive). An unknown category is an empty result,
    /// not an error. The stored search text and sort key are untouched.
    pub fn set_category_filter(&mut self, category: &str) -> &[Arc<ProjectRecord>] {
        self.filter = category.to_string();

        if category == ALL_CATEGORIES {
            self.results = self.projects.clone();
        } else {
            self.results = self
                .projects
                .iter()
                .filter(|p| p.category == category)
                .cloned()
                .collect();
        }

        tracing::debug!(category, matches = self.results.len(), "category filter");
        &self.results
    }

    /// Select by free-text search. Blank (or whitespace-only) text
    /// restores the full catalog; otherwise a record matches when the
    /// text is a case-insensitive substring of its title, description,
    /// or any technology tag.
    pub fn set_search_query(&mut self, query: &str) -> &[Arc<ProjectRecord>] {
        self.query = query.to_string();

        let needle = query.trim().to_lowercase();
        if needle.is_empty() {
            self.results = self.projects.clone();
        } else {
            self.results = self
                .projects
                .iter()
                .filter(|p| p.matches_query(&needle))
                .cloned()
                .collect();
        }

        tracing::debug!(query, matches = self.results.len(), "search");
        &self.results
    }

    /// Select the records using a technology whose tag contains `tech`
    /// (case-insensitive). Like the other predicates, this replaces the
    /// working view.
    pub fn filter_by_technology(&mut self, tech: &str) -> &[Arc<ProjectRecord>] {
        let needle = tech.to_lowercase();
        self.results = self
            .projects
            .iter()
            .filter(|p| p.matches_technology(&needle))
            .cloned()
            .collect();

        tracing::debug!(tech, matches = self.results.len(), "technology filter");
        &self.results
    }

    /// Stable-sort the CURRENT working view in place. Never re-derives
    /// from the full catalog, so a sort composes with whatever predicate
    /// produced the view. Applying the same key twice yields the same
    /// order.
    pub fn set_sort(&mut self, key: SortKey) -> &[Arc<ProjectRecord>] {
        self.sort = Some(key);

        match key {
            SortKey::Newest => self.results.sort_by(|a, b| b.id.cmp(&a.id)),
            SortKey::Oldest => self.results.sort_by_key(|p| p.id),
            SortKey::Popular => self
                .results
                .sort_by(|a, b| b.stats.views.cmp(&a.stats.views)),
            SortKey::Featured => self.results.sort_by_key(|p| !p.featured),
            SortKey::Alphabetical => self.results.sort_by(|a, b| {
                a.title
                    .to_lowercase()
                    .cmp(&b.title.to_lowercase())
                    .then_with(|| a.title.cmp(&b.title))
            }),
        }

        &self.results
    }

    /// The current working view.
    pub fn results(&self) -> &[Arc<ProjectRecord>] {
        &self.results
    }

    /// Look up a record by id in the full catalog.
    pub fn get(&self, id: u32) -> Option<&Arc<ProjectRecord>> {
        self.projects.iter().find(|p| p.id == id)
    }

    /// The category the caller last selected ("all" initially).
    pub fn category_filter(&self) -> &str {
        &self.filter
    }

    /// The search text the caller last entered.
    pub fn search_query(&self) -> &str {
        &self.query
    }

    /// The sort the caller last applied, if any.
    pub fn sort_key(&self) -> Option<SortKey> {
        self.sort
    }

    /// Distinct categories in first-appearance order, for the filter
    /// buttons. The "all" sentinel is not included.
    pub fn categories(&self) -> Vec<String> {
        let mut categories: Vec<String> = Vec::new();
        for project in &self.projects {
            if !categories.contains(&project.category) {
                categories.push(project.category.clone());
            }
        }
        categories
    }

    /// Sizes of the full catalog and the working view.
    pub fn summary(&self) -> Summary {
        Summary {
            total: self.projects.len(),
            filtered: self.results.len(),
        }
    }

    /// Aggregate the FULL catalog: totals, per-category and
    /// per-technology counts, and the featured count. Independent of
    /// whatever the working view currently shows.
    pub fn statistics(&self) -> CatalogStatistics {
        let mut stats = CatalogStatistics {
            total: self.projects.len(),
            ..CatalogStatistics::default()
        };

        for project in &self.projects {
            *stats.by_category.entry(project.category.clone()).or_insert(0) += 1;
            for tech in &project.technologies {
                *stats.by_technology.entry(tech.clone()).or_insert(0) += 1;
            }
            if project.featured {
                stats.featured += 1;
            }
        }

        stats
    }

    /// Serialize the full catalog to pretty JSON, wrapped in a versioned
    /// envelope. Round-trips exactly through `from_json`.
    pub fn to_json(&self) -> Result<String, CatalogError> {
        let envelope = ExportEnvelope {
            version: CATALOG_FORMAT_VERSION,
            exported_at: Utc::now().to_rfc3339(),
            projects: &self.projects,
        };

        serde_json::to_string_pretty(&envelope).map_err(|e| CatalogError::Parse(e.to_string()))
    }

    /// Parse catalog JSON (versioned envelope or bare record array) and
    /// replace the catalog as `load` does. Atomic: malformed text or
    /// invalid records leave the previous catalog untouched.
    pub fn from_json(&mut self, text: &str) -> Result<(), CatalogError> {
        let document: ImportDocument =
            serde_json::from_str(text).map_err(|e| CatalogError::Parse(e.to_string()))?;

        let records = match document {
            ImportDocument::Envelope(envelope) => {
                if envelope.version > CATALOG_FORMAT_VERSION {
                    return Err(CatalogError::Parse(format!(
                        "unsupported catalog version {}",
                        envelope.version
                    )));
                }
                envelope.projects
            }
            ImportDocument::Records(records) => records,
        };

        self.load(records)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::record::ProjectStats;

    fn record(
        id: u32,
        title: &str,
        category: &str,
        technologies: &[&str],
        views: u64,
        featured: bool,
    ) -> ProjectRecord {
        ProjectRecord {
            id,
            title: title.to_string(),
            description: format!("{title} description"),
            image_path: format!("assets/{id}.png"),
            category: category.to_string(),
            technologies: technologies.iter().map(|t| t.to_string()).collect(),
            live_url: "#".to_string(),
            code_url: "#".to_string(),
            stats: ProjectStats { views, likes: views / 10 },
            featured,
        }
    }

    fn sample_catalog() -> ProjectsCatalog {
        let mut catalog = ProjectsCatalog::new();
        catalog
            .load(vec![
                record(1, "Alpha", "web", &["React", "Node.js"], 10, false),
                record(2, "Beta", "app", &["Vue"], 50, true),
                record(3, "Gamma", "web", &["Rust", "WebAssembly"], 30, false),
                record(4, "delta", "cms", &["Node.js", "PostgreSQL"], 20, true),
            ])
            .unwrap();
        catalog
    }

    fn titles(results: &[Arc<ProjectRecord>]) -> Vec<&str> {
        results.iter().map(|p| p.title.as_str()).collect()
    }

    #[test]
    fn test_summary_tracks_most_recent_load() {
        let mut catalog = sample_catalog();
        assert_eq!(catalog.summary().total, 4);

        catalog.load(vec![record(9, "Solo", "web", &[], 1, false)]).unwrap();
        let summary = catalog.summary();
        assert_eq!(summary.total, 1);
        assert_eq!(summary.filtered, 1);
    }

    #[test]
    fn test_all_filter_restores_load_order() {
        let mut catalog = sample_catalog();

        // Scramble the view first: restrict it, then reorder it.
        catalog.set_category_filter("web");
        catalog.set_sort(SortKey::Popular);

        let results = catalog.set_category_filter(ALL_CATEGORIES);
        assert_eq!(titles(results), ["Alpha", "Beta", "Gamma", "delta"]);
    }

    #[test]
    fn test_category_filter_is_exact_and_case_sensitive() {
        let mut catalog = sample_catalog();

        assert_eq!(titles(catalog.set_category_filter("web")), ["Alpha", "Gamma"]);
        assert!(catalog.set_category_filter("Web").is_empty());
        assert!(catalog.set_category_filter("nope").is_empty());
    }

    #[test]
    fn test_search_matches_title_description_or_technology() {
        let mut catalog = sample_catalog();

        // Title, case-insensitive
        assert_eq!(titles(catalog.set_search_query("ALPHA")), ["Alpha"]);
        // Description ("Beta description")
        assert_eq!(titles(catalog.set_search_query("beta desc")), ["Beta"]);
        // Technology substring
        assert_eq!(titles(catalog.set_search_query("node")), ["Alpha", "delta"]);
        // No match
        assert!(catalog.set_search_query("zzz").is_empty());
    }

    #[test]
    fn test_blank_search_restores_everything() {
        let mut catalog = sample_catalog();
        catalog.set_search_query("rust");
        assert_eq!(catalog.summary().filtered, 1);

        let results = catalog.set_search_query("   ");
        assert_eq!(results.len(), 4);
    }

    #[test]
    fn test_technology_filter_replaces_working_view() {
        let mut catalog = sample_catalog();

        // A prior category restriction does not constrain the tech filter.
        catalog.set_category_filter("cms");
        let results = catalog.filter_by_technology("node");
        assert_eq!(titles(results), ["Alpha", "delta"]);
    }

    #[test]
    fn test_featured_sort_is_stable() {
        let mut catalog = sample_catalog();
        let results = catalog.set_sort(SortKey::Featured);

        // Featured (Beta, delta) keep their relative order, as do the rest.
        assert_eq!(titles(results), ["Beta", "delta", "Alpha", "Gamma"]);

        // Idempotent: sorting again changes nothing.
        let again = catalog.set_sort(SortKey::Featured).to_vec();
        assert_eq!(titles(&again), ["Beta", "delta", "Alpha", "Gamma"]);
    }

    #[test]
    fn test_sort_orders() {
        let mut catalog = sample_catalog();

        assert_eq!(titles(catalog.set_sort(SortKey::Newest)), ["delta", "Gamma", "Beta", "Alpha"]);
        assert_eq!(titles(catalog.set_sort(SortKey::Oldest)), ["Alpha", "Beta", "Gamma", "delta"]);
        assert_eq!(titles(catalog.set_sort(SortKey::Popular)), ["Beta", "Gamma", "delta", "Alpha"]);
        // Case-insensitive: "delta" sorts with the d's, not after "Gamma".
        assert_eq!(
            titles(catalog.set_sort(SortKey::Alphabetical)),
            ["Alpha", "Beta", "delta", "Gamma"]
        );
    }

    #[test]
    fn test_sort_applies_to_current_view_only() {
        let mut catalog = sample_catalog();
        catalog.set_category_filter("web");

        let results = catalog.set_sort(SortKey::Popular);
        assert_eq!(titles(results), ["Gamma", "Alpha"]);
    }

    #[test]
    fn test_round_trip_preserves_records_and_order() {
        let catalog = sample_catalog();
        let json = catalog.to_json().unwrap();

        let mut restored = ProjectsCatalog::new();
        restored.from_json(&json).unwrap();

        assert_eq!(restored.summary().total, 4);
        assert_eq!(
            titles(restored.results()),
            ["Alpha", "Beta", "Gamma", "delta"]
        );
        for (a, b) in catalog.results().iter().zip(restored.results()) {
            assert_eq!(**a, **b);
        }
    }

    #[test]
    fn test_import_accepts_bare_record_array() {
        let envelope_json = sample_catalog().to_json().unwrap();
        let bare_json = serde_json::to_string(
            &serde_json::from_str::<serde_json::Value>(&envelope_json).unwrap()["projects"],
        )
        .unwrap();

        let mut from_envelope = ProjectsCatalog::new();
        from_envelope.from_json(&envelope_json).unwrap();
        let mut from_bare = ProjectsCatalog::new();
        from_bare.from_json(&bare_json).unwrap();

        assert_eq!(titles(from_envelope.results()), titles(from_bare.results()));
    }

    #[test]
    fn test_duplicate_id_rejects_load_and_keeps_state() {
        let mut catalog = sample_catalog();

        let err = catalog
            .load(vec![
                record(7, "Seven", "web", &[], 1, false),
                record(7, "Seven again", "app", &[], 2, false),
            ])
            .unwrap_err();

        assert!(matches!(err, CatalogError::Validation(_)));
        // Previous catalog still fully observable.
        assert_eq!(catalog.summary().total, 4);
        assert!(catalog.get(1).is_some());
    }

    #[test]
    fn test_zero_id_rejected() {
        let mut catalog = ProjectsCatalog::new();
        let err = catalog
            .load(vec![record(0, "Zero", "web", &[], 1, false)])
            .unwrap_err();
        assert!(matches!(err, CatalogError::Validation(_)));
    }

    #[test]
    fn test_failed_import_keeps_previous_catalog() {
        let mut catalog = sample_catalog();

        // Malformed text
        let err = catalog.from_json("{not json").unwrap_err();
        assert!(matches!(err, CatalogError::Parse(_)));
        assert_eq!(catalog.summary().total, 4);

        // Well-formed text, invalid records
        let dup = serde_json::json!([
            {"id": 1, "title": "A", "description": "", "imagePath": "", "category": "web",
             "technologies": [], "liveUrl": "#", "codeUrl": "#",
             "stats": {"views": 0, "likes": 0}, "featured": false},
            {"id": 1, "title": "B", "description": "", "imagePath": "", "category": "web",
             "technologies": [], "liveUrl": "#", "codeUrl": "#",
             "stats": {"views": 0, "likes": 0}, "featured": false}
        ]);
        let err = catalog.from_json(&dup.to_string()).unwrap_err();
        assert!(matches!(err, CatalogError::Validation(_)));
        assert_eq!(catalog.summary().total, 4);
        assert_eq!(catalog.results().len(), 4);
    }

    #[test]
    fn test_unsupported_version_rejected() {
        let mut catalog = ProjectsCatalog::new();
        let err = catalog
            .from_json(r#"{"version": 99, "projects": []}"#)
            .unwrap_err();
        assert!(matches!(err, CatalogError::Parse(_)));
    }

    #[test]
    fn test_statistics_ignore_view_state() {
        let mut catalog = sample_catalog();
        catalog.set_category_filter("app");

        let stats = catalog.statistics();
        assert_eq!(stats.total, 4);
        assert_eq!(stats.by_category.get("web"), Some(&2));
        assert_eq!(stats.by_category.get("app"), Some(&1));
        assert_eq!(stats.by_technology.get("Node.js"), Some(&2));
        assert_eq!(stats.featured, 2);
    }

    #[test]
    fn test_filter_then_sort_walkthrough() {
        let mut catalog = ProjectsCatalog::new();
        catalog
            .load(vec![
                record(1, "Alpha", "web", &["React"], 10, false),
                record(2, "Beta", "app", &["Vue"], 50, true),
            ])
            .unwrap();

        assert_eq!(titles(catalog.set_category_filter("web")), ["Alpha"]);

        catalog.set_category_filter(ALL_CATEGORIES);
        assert_eq!(titles(catalog.set_sort(SortKey::Popular)), ["Beta", "Alpha"]);

        assert_eq!(catalog.statistics().featured, 1);
    }

    #[test]
    fn test_empty_catalog_is_total() {
        let mut catalog = ProjectsCatalog::new();
        catalog.load(Vec::new()).unwrap();

        let summary = catalog.summary();
        assert_eq!((summary.total, summary.filtered), (0, 0));

        assert!(catalog.set_category_filter("web").is_empty());
        assert!(catalog.set_search_query("x").is_empty());
        assert!(catalog.filter_by_technology("x").is_empty());
        assert!(catalog.set_sort(SortKey::Popular).is_empty());
        assert_eq!(catalog.statistics(), CatalogStatistics::default());
    }

    #[test]
    fn test_sort_key_parsing() {
        assert_eq!("newest".parse::<SortKey>().unwrap(), SortKey::Newest);
        assert_eq!(" Popular ".parse::<SortKey>().unwrap(), SortKey::Popular);
        for key in SortKey::ALL {
            assert_eq!(key.as_str().parse::<SortKey>().unwrap(), key);
        }
        assert!("trending".parse::<SortKey>().is_err());
    }

    #[test]
    fn test_summary_display() {
        let mut catalog = sample_catalog();
        assert_eq!(catalog.summary().to_string(), "Showing all 4 projects");

        catalog.set_category_filter("web");
        assert_eq!(catalog.summary().to_string(), "Showing 2 of 4 projects");
    }
}
