//! Shared data structures for the project catalog
//!
//! These structs represent the data model that flows between
//! the catalog layer and the UI layer. Records are immutable once
//! loaded; all filtering and sorting selects and orders shared
//! references, it never copies or mutates records.

use serde::{Deserialize, Serialize};

/// Engagement counters attached to a project.
///
/// Both counters are unsigned: a negative count is unrepresentable,
/// and negative values in imported JSON fail parsing.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ProjectStats {
    pub views: u64,
    pub likes: u64,
}

/// A single portfolio project.
///
/// `id` is the stable identity and the default "newest/oldest" ordering
/// key. `category` is an open set of tag strings, not a closed enum, so
/// new categories need no schema change. The wire format uses camelCase
/// field names (`imagePath`, `liveUrl`, `codeUrl`).
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ProjectRecord {
    /// Unique positive ID, assigned in publication order
    pub id: u32,
    /// Display title (non-empty)
    pub title: String,
    /// Longer description shown on the card and the detail view
    pub description: String,
    /// Opaque reference to a display asset; not resolved by the catalog
    pub image_path: String,
    /// Category tag used for exact-match filtering (e.g. "web", "app")
    pub category: String,
    /// Technology tags in display order; used for substring filtering
    pub technologies: Vec<String>,
    /// Opaque link to the live deployment
    pub live_url: String,
    /// Opaque link to the source code
    pub code_url: String,
    pub stats: ProjectStats,
    /// Featured projects sort ahead of the rest under the featured sort
    pub featured: bool,
}

impl ProjectRecord {
    /// Case-insensitive substring match against title, description,
    /// or any technology tag. `needle` must already be lowercased.
    pub(crate) fn matches_query(&self, needle: &str) -> bool {
        self.title.to_lowercase().contains(needle)
            || self.description.to_lowercase().contains(needle)
            || self.matches_technology(needle)
    }

    /// Case-insensitive substring match against technology tags only.
    /// `needle` must already be lowercased.
    pub(crate) fn matches_technology(&self, needle: &str) -> bool {
        self.technologies
            .iter()
            .any(|tech| tech.to_lowercase().contains(needle))
    }
}

/// The catalog shipped on first run, before the user imports their own.
pub fn seed_projects() -> Vec<ProjectRecord> {
    vec![
        ProjectRecord {
            id: 1,
            title: "E-Commerce Platform".into(),
            description: "A full-stack e-commerce platform with user accounts, \
                          product management, a shopping cart, and payment integration."
                .into(),
            image_path: "assets/images/project1.png".into(),
            category: "web".into(),
            technologies: vec![
                "React".into(),
                "Node.js".into(),
                "MongoDB".into(),
                "Express".into(),
                "Stripe".into(),
            ],
            live_url: "#".into(),
            code_url: "#".into(),
            stats: ProjectStats { views: 1250, likes: 89 },
            featured: true,
        },
        ProjectRecord {
            id: 2,
            title: "Task Management App".into(),
            description: "A collaborative task manager with real-time updates, \
                          drag-and-drop boards, and team workspaces."
                .into(),
            image_path: "assets/images/project2.png".into(),
            category: "app".into(),
            technologies: vec![
                "Vue.js".into(),
                "Firebase".into(),
                "Vuex".into(),
                "Vuetify".into(),
            ],
            live_url: "#".into(),
            code_url: "#".into(),
            stats: ProjectStats { views: 890, likes: 67 },
            featured: false,
        },
        ProjectRecord {
            id: 3,
            title: "Portfolio Website".into(),
            description: "A responsive portfolio site showcasing creative work with \
                          smooth animations and interactive elements."
                .into(),
            image_path: "assets/images/project3.png".into(),
            category: "web".into(),
            technologies: vec![
                "HTML5".into(),
                "CSS3".into(),
                "JavaScript".into(),
                "GSAP".into(),
            ],
            live_url: "#".into(),
            code_url: "#".into(),
            stats: ProjectStats { views: 2100, likes: 156 },
            featured: true,
        },
        ProjectRecord {
            id: 4,
            title: "Weather Dashboard".into(),
            description: "A weather app with real-time data, forecasts, and \
                          interactive maps with location-based services."
                .into(),
            image_path: "assets/images/project1.png".into(),
            category: "app".into(),
            technologies: vec![
                "React Native".into(),
                "OpenWeather API".into(),
                "Redux".into(),
                "Expo".into(),
            ],
            live_url: "#".into(),
            code_url: "#".into(),
            stats: ProjectStats { views: 750, likes: 45 },
            featured: false,
        },
        ProjectRecord {
            id: 5,
            title: "Blog CMS".into(),
            description: "A content management system for blogs with rich text \
                          editing, SEO tooling, and an analytics dashboard."
                .into(),
            image_path: "assets/images/project2.png".into(),
            category: "cms".into(),
            technologies: vec![
                "Next.js".into(),
                "Prisma".into(),
                "PostgreSQL".into(),
                "Tailwind CSS".into(),
            ],
            live_url: "#".into(),
            code_url: "#".into(),
            stats: ProjectStats { views: 1100, likes: 78 },
            featured: true,
        },
        ProjectRecord {
            id: 6,
            title: "Social Media Dashboard".into(),
            description: "A dashboard for managing multiple social media accounts \
                          with analytics and post scheduling."
                .into(),
            image_path: "assets/images/project3.png".into(),
            category: "dashboard".into(),
            technologies: vec![
                "Angular".into(),
                "Node.js".into(),
                "Socket.io".into(),
                "Chart.js".into(),
            ],
            live_url: "#".into(),
            code_url: "#".into(),
            stats: ProjectStats { views: 950, likes: 62 },
            featured: false,
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wire_format_uses_camel_case() {
        let record = &seed_projects()[0];
        let json = serde_json::to_string(record).unwrap();

        assert!(json.contains("\"imagePath\""));
        assert!(json.contains("\"liveUrl\""));
        assert!(json.contains("\"codeUrl\""));
        assert!(!json.contains("image_path"));
    }

    #[test]
    fn test_record_round_trip() {
        for record in seed_projects() {
            let json = serde_json::to_string(&record).unwrap();
            let restored: ProjectRecord = serde_json::from_str(&json).unwrap();
            assert_eq!(record, restored);
        }
    }

    #[test]
    fn test_negative_stats_fail_to_parse() {
        let json = r#"{"views": -3, "likes": 1}"#;
        assert!(serde_json::from_str::<ProjectStats>(json).is_err());
    }

    #[test]
    fn test_seed_ids_are_unique_and_positive() {
        let seeds = seed_projects();
        let mut ids: Vec<u32> = seeds.iter().map(|p| p.id).collect();
        ids.sort_unstable();
        ids.dedup();

        assert_eq!(ids.len(), seeds.len());
        assert!(ids.iter().all(|&id| id > 0));
    }
}
