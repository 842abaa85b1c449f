use iced::keyboard;
use iced::widget::{
    button, canvas, column, container, horizontal_space, pick_list, row, scrollable, text,
    text_input,
};
use iced::{Alignment, Element, Length, Subscription, Task, Theme};
use rfd::FileDialog;
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

mod catalog;
mod prefs;
mod ui;

use catalog::{seed_projects, ProjectRecord, ProjectsCatalog, SortKey, ALL_CATEGORIES};
use prefs::{Preferences, ThemeChoice};
use ui::chart::CategoryChart;

/// Main application state
struct Folio {
    /// The projects catalog and its derived view
    catalog: ProjectsCatalog,
    /// Persisted preferences (theme)
    prefs: Preferences,
    prefs_path: PathBuf,
    /// Record shown in the detail overlay, if any
    selected: Option<Arc<ProjectRecord>>,
    /// Status message to display to the user
    status: String,
}

/// Application messages (events)
#[derive(Debug, Clone)]
pub enum Message {
    /// User pressed a category filter button ("all" or a category)
    FilterSelected(String),
    /// User edited the search box
    SearchChanged(String),
    /// User picked a sort order
    SortSelected(SortKey),
    /// User pressed a technology tag on a card
    TechTagPressed(String),
    /// User pressed a project card
    ProjectPressed(u32),
    /// User dismissed the detail overlay
    CloseDetails,
    /// User pressed a project link
    OpenLink(String),
    /// User toggled the color scheme
    ToggleTheme,
    /// User clicked the "Import" button
    ImportRequested,
    /// Background read of the chosen catalog file completed
    ImportLoaded(Result<String, String>),
    /// User clicked the "Export" button
    ExportRequested,
    /// Background write of the exported catalog completed
    ExportFinished(Result<PathBuf, String>),
}

impl Folio {
    /// Create a new instance of the application
    fn new() -> (Self, Task<Message>) {
        let prefs_path = Preferences::default_path();
        let prefs = Preferences::load(&prefs_path);

        let mut catalog = ProjectsCatalog::new();
        // The seed catalog has unique positive ids; covered by tests.
        catalog
            .load(seed_projects())
            .expect("seed catalog is valid");

        let summary = catalog.summary();
        tracing::info!(projects = summary.total, "Folio initialized");

        let status = summary.to_string();
        (
            Folio {
                catalog,
                prefs,
                prefs_path,
                selected: None,
                status,
            },
            Task::none(),
        )
    }

    /// Handle application messages and update state
    fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::FilterSelected(category) => {
                self.catalog.set_category_filter(&category);
                self.status = self.catalog.summary().to_string();
                Task::none()
            }
            Message::SearchChanged(query) => {
                self.catalog.set_search_query(&query);
                self.status = self.catalog.summary().to_string();
                Task::none()
            }
            Message::SortSelected(key) => {
                self.catalog.set_sort(key);
                Task::none()
            }
            Message::TechTagPressed(tech) => {
                self.catalog.filter_by_technology(&tech);
                self.status = format!("{} using {}", self.catalog.summary(), tech);
                Task::none()
            }
            Message::ProjectPressed(id) => {
                self.selected = self.catalog.get(id).cloned();
                Task::none()
            }
            Message::CloseDetails => {
                self.selected = None;
                Task::none()
            }
            Message::OpenLink(url) => {
                tracing::info!(%url, "project link pressed");
                self.status = format!("Link: {url}");
                Task::none()
            }
            Message::ToggleTheme => {
                self.prefs.theme = self.prefs.theme.toggled();
                if let Err(e) = self.prefs.save(&self.prefs_path) {
                    tracing::warn!(error = %e, "failed to save preferences");
                }
                Task::none()
            }
            Message::ImportRequested => {
                // Show the native file picker dialog
                let file = FileDialog::new()
                    .add_filter("JSON catalog", &["json"])
                    .set_title("Import Projects Catalog")
                    .pick_file();

                if let Some(path) = file {
                    self.status = format!("Importing from {}...", path.display());
                    return Task::perform(read_catalog_file(path), Message::ImportLoaded);
                }
                Task::none()
            }
            Message::ImportLoaded(Ok(contents)) => {
                match self.catalog.from_json(&contents) {
                    Ok(()) => {
                        self.selected = None;
                        self.status = format!("✅ Import complete! {}", self.catalog.summary());
                    }
                    Err(e) => {
                        tracing::warn!(error = %e, "catalog import rejected");
                        self.status = format!("⚠️  Import failed: {e}");
                    }
                }
                Task::none()
            }
            Message::ImportLoaded(Err(e)) => {
                tracing::warn!(error = %e, "catalog file unreadable");
                self.status = format!("⚠️  Import failed: {e}");
                Task::none()
            }
            Message::ExportRequested => {
                let json = match self.catalog.to_json() {
                    Ok(json) => json,
                    Err(e) => {
                        tracing::warn!(error = %e, "catalog export failed");
                        self.status = format!("⚠️  Export failed: {e}");
                        return Task::none();
                    }
                };

                let file = FileDialog::new()
                    .add_filter("JSON catalog", &["json"])
                    .set_title("Export Projects Catalog")
                    .set_file_name("projects.json")
                    .save_file();

                if let Some(path) = file {
                    return Task::perform(write_catalog_file(path, json), Message::ExportFinished);
                }
                Task::none()
            }
            Message::ExportFinished(Ok(path)) => {
                tracing::info!(path = %path.display(), "catalog exported");
                self.status = format!("✅ Exported catalog to {}", path.display());
                Task::none()
            }
            Message::ExportFinished(Err(e)) => {
                tracing::warn!(error = %e, "catalog export failed");
                self.status = format!("⚠️  Export failed: {e}");
                Task::none()
            }
        }
    }

    /// Build the user interface
    fn view(&self) -> Element<Message> {
        let summary = self.catalog.summary();
        let statistics = self.catalog.statistics();

        let theme_icon = match self.prefs.theme {
            ThemeChoice::Dark => "☀",
            ThemeChoice::Light => "🌙",
        };
        let header = row![
            text("Folio").size(32),
            horizontal_space(),
            button(text(theme_icon).size(18))
                .style(button::text)
                .on_press(Message::ToggleTheme),
        ]
        .align_y(Alignment::Center);

        let mut filters = row![].spacing(8);
        filters = filters.push(self.filter_button("All", ALL_CATEGORIES));
        for category in self.catalog.categories() {
            filters = filters.push(self.filter_button(&category, &category));
        }

        let controls = row![
            text_input("Search projects...", self.catalog.search_query())
                .on_input(Message::SearchChanged)
                .padding(8)
                .width(260),
            pick_list(SortKey::ALL, self.catalog.sort_key(), Message::SortSelected)
                .placeholder("Sort by..."),
            horizontal_space(),
            button(text("Import").size(14))
                .style(button::secondary)
                .on_press(Message::ImportRequested),
            button(text("Export").size(14))
                .style(button::secondary)
                .on_press(Message::ExportRequested),
        ]
        .spacing(12)
        .align_y(Alignment::Center);

        let stats_section = column![
            text("Catalog statistics").size(20),
            text(format!(
                "{} featured of {} projects",
                statistics.featured, statistics.total
            ))
            .size(13),
            canvas(CategoryChart::new(&statistics))
                .width(Length::Fill)
                .height(180),
        ]
        .spacing(10);

        let content = scrollable(
            column![
                ui::card::project_grid(self.catalog.results()),
                stats_section,
            ]
            .spacing(28),
        )
        .height(Length::Fill);

        let base: Element<Message> = container(
            column![
                header,
                filters,
                controls,
                text(summary.to_string()).size(14),
                content,
                text(&self.status).size(13),
            ]
            .spacing(14),
        )
        .padding(20)
        .into();

        match &self.selected {
            Some(record) => ui::detail::detail_overlay(base, record),
            None => base,
        }
    }

    fn filter_button(&self, label: &str, value: &str) -> Element<'static, Message> {
        let active = self.catalog.category_filter() == value;
        button(text(label.to_string()).size(14))
            .padding([6.0, 14.0])
            .style(if active {
                button::primary
            } else {
                button::secondary
            })
            .on_press(Message::FilterSelected(value.to_string()))
            .into()
    }

    /// Set the application theme
    fn theme(&self) -> Theme {
        match self.prefs.theme {
            ThemeChoice::Dark => Theme::Dark,
            ThemeChoice::Light => Theme::Light,
        }
    }

    /// Esc closes the detail overlay
    fn subscription(&self) -> Subscription<Message> {
        keyboard::on_key_press(|key, _modifiers| match key {
            keyboard::Key::Named(keyboard::key::Named::Escape) => Some(Message::CloseDetails),
            _ => None,
        })
    }
}

fn main() -> iced::Result {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    iced::application("Folio", Folio::update, Folio::view)
        .theme(Folio::theme)
        .subscription(Folio::subscription)
        .centered()
        .run_with(Folio::new)
}

/// Read the chosen catalog file in the background to keep the UI live.
async fn read_catalog_file(path: PathBuf) -> Result<String, String> {
    tokio::fs::read_to_string(&path)
        .await
        .map_err(|e| format!("could not read {}: {e}", path.display()))
}

/// Write the exported catalog in the background.
async fn write_catalog_file(path: PathBuf, json: String) -> Result<PathBuf, String> {
    tokio::fs::write(&path, json)
        .await
        .map(|_| path.clone())
        .map_err(|e| format!("could not write {}: {e}", path.display()))
}
