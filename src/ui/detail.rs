//! Project detail overlay
//!
//! Shown over the gallery when a card is pressed. Mirrors the card
//! content at full width, with sections for technologies, stats, and
//! links. Pressing the backdrop (or Esc, handled by the app
//! subscription) closes it.

use iced::widget::{button, center, column, container, image, mouse_area, opaque, row, stack, text};
use iced::{Element, Length};

use crate::catalog::ProjectRecord;
use crate::ui::card::technology_tags;
use crate::Message;

const DETAIL_WIDTH: f32 = 540.0;

/// Stack the detail view for `record` over `base`.
pub fn detail_overlay<'a>(
    base: Element<'a, Message>,
    record: &'a ProjectRecord,
) -> Element<'a, Message> {
    let content = container(detail_card(record))
        .width(DETAIL_WIDTH)
        .padding(24)
        .style(container::rounded_box);

    stack![
        base,
        opaque(
            mouse_area(center(opaque(content)))
                .on_press(Message::CloseDetails)
        )
    ]
    .into()
}

fn detail_card(record: &ProjectRecord) -> Element<'_, Message> {
    let header = row![
        image(image::Handle::from_path(&record.image_path))
            .width(140)
            .height(90),
        column![
            text(&record.title).size(24),
            text(&record.description).size(14),
        ]
        .spacing(8),
    ]
    .spacing(16);

    let stats = row![
        text(format!("{} views", record.stats.views)).size(14),
        text(format!("{} likes", record.stats.likes)).size(14),
    ]
    .spacing(24);

    let links = row![
        button(text("View Live Demo").size(14))
            .on_press(Message::OpenLink(record.live_url.clone()))
            .style(button::primary),
        button(text("View Source Code").size(14))
            .on_press(Message::OpenLink(record.code_url.clone()))
            .style(button::secondary),
    ]
    .spacing(12);

    column![
        header,
        section("Technologies Used", technology_tags(&record.technologies)),
        section("Project Stats", stats.into()),
        section("Project Links", links.into()),
        button(text("Close").size(13))
            .on_press(Message::CloseDetails)
            .style(button::text),
    ]
    .spacing(18)
    .width(Length::Fill)
    .into()
}

fn section<'a>(title: &'a str, content: Element<'a, Message>) -> Element<'a, Message> {
    column![text(title).size(16), content].spacing(8).into()
}
