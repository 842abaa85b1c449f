/// Presentation widgets
///
/// This module owns the visual pieces of the gallery:
/// - The project card grid and technology tag pills (card.rs)
/// - The per-category statistics bar chart (chart.rs)
/// - The detail overlay for a pressed card (detail.rs)
///
/// All event wiring stays in the application shell; these are pure
/// view functions over catalog data.
pub mod card;
pub mod chart;
pub mod detail;
