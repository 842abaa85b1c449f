//! Project card grid
//!
//! Renders the working view as a wrapped grid of cards. Each card shows
//! the project image, title, description, technology tags, links, and
//! engagement counters. Pressing a card opens the detail overlay;
//! pressing a technology tag filters the catalog by that technology.

use std::sync::Arc;

use iced::widget::{button, column, container, image, mouse_area, row, text};
use iced::{Alignment, Element, Length};
use iced_aw::Wrap;

use crate::catalog::ProjectRecord;
use crate::Message;

const CARD_WIDTH: f32 = 320.0;
const CARD_IMAGE_HEIGHT: f32 = 150.0;

/// The grid of cards for the current results, or the empty-state pane
/// when nothing matches.
pub fn project_grid(results: &[Arc<ProjectRecord>]) -> Element<'_, Message> {
    if results.is_empty() {
        return empty_state();
    }

    let cards: Vec<Element<'_, Message>> =
        results.iter().map(|record| project_card(record)).collect();

    Wrap::with_elements(cards)
        .spacing(16.0)
        .line_spacing(16.0)
        .into()
}

fn empty_state() -> Element<'static, Message> {
    container(
        column![
            text("🔍").size(40),
            text("No projects found").size(22),
            text("Try adjusting your filters or search terms.").size(14),
        ]
        .spacing(8)
        .align_x(Alignment::Center),
    )
    .width(Length::Fill)
    .padding(40)
    .center_x(Length::Fill)
    .into()
}

fn project_card(record: &ProjectRecord) -> Element<'_, Message> {
    let preview = image(image::Handle::from_path(&record.image_path))
        .width(Length::Fill)
        .height(CARD_IMAGE_HEIGHT);

    let mut header = row![text(&record.title).size(18)].spacing(8);
    if record.featured {
        header = header.push(text("★").size(18));
    }

    let body = column![
        header,
        text(&record.description).size(13),
        technology_tags(&record.technologies),
        row![
            link_button("Live Demo", &record.live_url),
            link_button("Source Code", &record.code_url),
        ]
        .spacing(8),
        row![
            stat(record.stats.views, "views"),
            stat(record.stats.likes, "likes"),
        ]
        .spacing(20),
    ]
    .spacing(10)
    .padding(12);

    let card = container(column![preview, body])
        .width(CARD_WIDTH)
        .style(container::rounded_box);

    // The whole card opens the detail view; inner buttons capture their
    // own presses first.
    mouse_area(card)
        .on_press(Message::ProjectPressed(record.id))
        .into()
}

/// One pressable pill per technology tag, wrapped across lines.
pub fn technology_tags(technologies: &[String]) -> Element<'_, Message> {
    let tags: Vec<Element<'_, Message>> = technologies
        .iter()
        .map(|tech| {
            button(text(tech.as_str()).size(12))
                .padding([2.0, 8.0])
                .style(button::secondary)
                .on_press(Message::TechTagPressed(tech.clone()))
                .into()
        })
        .collect();

    Wrap::with_elements(tags).spacing(6.0).line_spacing(6.0).into()
}

fn link_button<'a>(label: &'a str, url: &str) -> Element<'a, Message> {
    button(text(label).size(13))
        .padding([4.0, 10.0])
        .style(button::text)
        .on_press(Message::OpenLink(url.to_string()))
        .into()
}

fn stat(value: u64, label: &str) -> Element<'static, Message> {
    row![
        text(value.to_string()).size(14),
        text(label.to_string()).size(12),
    ]
    .spacing(4)
    .align_y(Alignment::Center)
    .into()
}
