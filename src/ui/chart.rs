//! Category statistics chart
//!
//! A canvas bar chart of per-category project counts, fed from the
//! full-catalog statistics (never the filtered view).

use iced::widget::canvas::{self, Text};
use iced::{Pixels, Point, Rectangle, Size};

use crate::catalog::CatalogStatistics;
use crate::Message;

const LABEL_BAND: f32 = 22.0;
const BAR_GAP: f32 = 12.0;

/// Chart data: one (category, count) bar per catalog category, in the
/// statistics' deterministic order.
#[derive(Debug, Clone)]
pub struct CategoryChart {
    bars: Vec<(String, usize)>,
}

impl CategoryChart {
    pub fn new(statistics: &CatalogStatistics) -> Self {
        CategoryChart {
            bars: statistics
                .by_category
                .iter()
                .map(|(category, count)| (category.clone(), *count))
                .collect(),
        }
    }
}

impl canvas::Program<Message> for CategoryChart {
    type State = ();

    fn draw(
        &self,
        _state: &Self::State,
        renderer: &iced::Renderer,
        theme: &iced::Theme,
        bounds: Rectangle,
        _cursor: iced::mouse::Cursor,
    ) -> Vec<canvas::Geometry> {
        let mut frame = canvas::Frame::new(renderer, bounds.size());

        // Normalize bar heights to the largest category.
        let max_count = self.bars.iter().map(|(_, count)| *count).max().unwrap_or(0);
        if max_count == 0 {
            return vec![frame.into_geometry()];
        }

        let palette = theme.palette();
        let chart_height = bounds.height - LABEL_BAND;
        let bar_width = (bounds.width - BAR_GAP * (self.bars.len() + 1) as f32)
            / self.bars.len() as f32;

        for (i, (category, count)) in self.bars.iter().enumerate() {
            let normalized = *count as f32 / max_count as f32;
            let bar_height = normalized * (chart_height - 18.0);
            let x = BAR_GAP + i as f32 * (bar_width + BAR_GAP);
            let y = chart_height - bar_height;

            frame.fill_rectangle(
                Point::new(x, y),
                Size::new(bar_width, bar_height),
                palette.primary,
            );

            // Count above the bar, category name below it
            frame.fill_text(Text {
                content: count.to_string(),
                position: Point::new(x, y - 16.0),
                color: palette.text,
                size: Pixels(12.0),
                ..Text::default()
            });
            frame.fill_text(Text {
                content: category.clone(),
                position: Point::new(x, chart_height + 4.0),
                color: palette.text,
                size: Pixels(12.0),
                ..Text::default()
            });
        }

        vec![frame.into_geometry()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{seed_projects, ProjectsCatalog};

    #[test]
    fn test_chart_bars_follow_statistics_order() {
        let mut catalog = ProjectsCatalog::new();
        catalog.load(seed_projects()).unwrap();

        let chart = CategoryChart::new(&catalog.statistics());
        let categories: Vec<&str> = chart.bars.iter().map(|(c, _)| c.as_str()).collect();

        // BTreeMap order: deterministic, alphabetical
        assert_eq!(categories, ["app", "cms", "dashboard", "web"]);
        assert_eq!(chart.bars.iter().map(|(_, n)| n).sum::<usize>(), 6);
    }
}
