//! Core application state and Iced Application implementation
//!
//! One page: a research question, the backend's answer with its references,
//! and an inline chat panel for whichever reference is open.

use std::time::Duration;

use iced::keyboard::{self, Key};
use iced::widget::{button, column, container, horizontal_rule, row, scrollable, text, Space};
use iced::{
    event, time, window, Alignment, Background, Border, Element, Event, Length, Padding,
    Subscription, Task, Theme,
};
use serde_json::Value;

use crate::backend::api::BackendClient;
use crate::backend::types::{ChatRequest, ChatResponse, Reference, SearchResponse};
use crate::config::Settings;
use crate::ui::layout::{self, BackendStatus};
use crate::ui::theme::{self, LightTheme};
use crate::ui::{reference_card, search_bar};

// ============================================================================
// UI State Types
// ============================================================================

/// Chat thread scoped to one reference
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ChatPanel {
    pub reference_index: usize,
    pub url: String,
    pub question: String,
    pub answer: Option<String>,
    pub error: Option<String>,
    /// Id of the chat request in flight, if any
    pending: Option<u64>,
}

impl ChatPanel {
    fn new(reference_index: usize, url: String) -> Self {
        Self {
            reference_index,
            url,
            ..Self::default()
        }
    }

    pub fn is_loading(&self) -> bool {
        self.pending.is_some()
    }
}

// ============================================================================
// Application State
// ============================================================================

pub struct ArxivAgent {
    query: String,
    answer: String,
    references: Vec<Reference>,
    arxiv_results: Value,
    searching: bool,
    error: Option<String>,
    panel: Option<ChatPanel>,
    /// Bumped on every search or reset; late responses from older ones are dropped.
    search_generation: u64,
    next_chat_id: u64,
    backend_status: BackendStatus,
    frame: usize,
    backend: BackendClient,
}

#[derive(Debug, Clone)]
pub enum Message {
    QueryChanged(String),
    SearchSubmitted,
    SearchCompleted(u64, Result<SearchResponse, String>),
    ReferenceToggled(usize),
    ChatQuestionChanged(String),
    ChatSubmitted,
    ChatCompleted(u64, Result<ChatResponse, String>),
    HealthChecked(Result<String, String>),
    DismissError,
    Escape,
    Tick,
}

impl ArxivAgent {
    /// Build the app and kick off a backend health check
    pub fn new(settings: &Settings) -> (Self, Task<Message>) {
        let backend = BackendClient::with_timeout(&settings.backend.url, settings.backend.timeout);
        let agent = Self::with_backend(backend);

        let client = agent.backend.clone();
        let check = Task::perform(
            async move {
                client
                    .health_check()
                    .await
                    .map(|h| h.message)
                    .map_err(|e| e.to_string())
            },
            Message::HealthChecked,
        );
        (agent, check)
    }

    pub fn with_backend(backend: BackendClient) -> Self {
        Self {
            query: String::new(),
            answer: String::new(),
            references: Vec::new(),
            arxiv_results: Value::Null,
            searching: false,
            error: None,
            panel: None,
            search_generation: 0,
            next_chat_id: 0,
            backend_status: BackendStatus::Unknown,
            frame: 0,
            backend,
        }
    }

    pub fn title(&self) -> String {
        String::from("ArXiv Agent")
    }

    fn is_busy(&self) -> bool {
        self.searching || self.panel.as_ref().is_some_and(ChatPanel::is_loading)
    }

    pub fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::QueryChanged(query) => {
                self.query = query;
                Task::none()
            }

            Message::SearchSubmitted => self.start_search(),

            Message::SearchCompleted(generation, result) => {
                if generation != self.search_generation {
                    tracing::debug!("Dropping stale search response #{}", generation);
                    return Task::none();
                }
                self.searching = false;
                match result {
                    Ok(response) => {
                        self.answer = response.answer;
                        self.references = response.references;
                        self.arxiv_results = response.arxiv_results;
                    }
                    Err(err) => {
                        tracing::error!("Search failed: {}", err);
                        self.error = Some(format!("Search failed: {}", err));
                    }
                }
                Task::none()
            }

            Message::ReferenceToggled(index) => {
                let Some(reference) = self.references.get(index) else {
                    return Task::none();
                };
                let already_open = self
                    .panel
                    .as_ref()
                    .is_some_and(|p| p.reference_index == index);
                self.panel = if already_open {
                    None
                } else {
                    Some(ChatPanel::new(index, reference.url.clone()))
                };
                Task::none()
            }

            Message::ChatQuestionChanged(question) => {
                if let Some(panel) = self.panel.as_mut() {
                    panel.question = question;
                }
                Task::none()
            }

            Message::ChatSubmitted => self.start_chat(),

            Message::ChatCompleted(id, result) => {
                let Some(panel) = self.panel.as_mut().filter(|p| p.pending == Some(id)) else {
                    tracing::debug!("Dropping chat response #{} for a closed panel", id);
                    return Task::none();
                };
                panel.pending = None;
                match result {
                    Ok(response) => panel.answer = Some(response.answer),
                    Err(err) => {
                        tracing::error!("Chat failed: {}", err);
                        panel.error = Some(format!("Chat failed: {}", err));
                    }
                }
                Task::none()
            }

            Message::HealthChecked(result) => {
                self.backend_status = match result {
                    Ok(message) => {
                        tracing::info!("Backend reachable at {}: {}", self.backend.base_url(), message);
                        BackendStatus::Online
                    }
                    Err(err) => {
                        tracing::warn!("Backend not reachable: {}", err);
                        BackendStatus::Offline
                    }
                };
                Task::none()
            }

            Message::DismissError => {
                self.error = None;
                Task::none()
            }

            Message::Escape => {
                if self.panel.is_some() {
                    self.panel = None;
                } else if self.error.is_some() {
                    self.error = None;
                } else {
                    self.reset();
                }
                Task::none()
            }

            Message::Tick => {
                self.frame = self.frame.wrapping_add(1);
                Task::none()
            }
        }
    }

    pub fn view(&self) -> Element<'_, Message> {
        let mut body = column![
            text("Get insights from research papers in seconds")
                .size(36)
                .color(LightTheme::TEXT),
            search_bar::view(
                &self.query,
                Message::QueryChanged,
                Message::SearchSubmitted,
                self.searching,
                self.frame,
            ),
        ]
        .spacing(24)
        .max_width(760.0)
        .align_x(Alignment::Center);

        if let Some(error) = &self.error {
            body = body.push(self.view_error(error));
        }
        if !self.answer.is_empty() {
            body = body.push(horizontal_rule(1));
            body = body.push(self.view_answer());
        }
        if !self.references.is_empty() {
            body = body.push(self.view_references());
        }

        let page = column![
            layout::header(self.backend_status, self.backend.base_url()),
            scrollable(
                container(body)
                    .padding(Padding::from([32.0, 24.0]))
                    .center_x(Length::Fill)
            )
            .height(Length::Fill),
            layout::footer(),
        ];

        container(page)
            .width(Length::Fill)
            .height(Length::Fill)
            .style(|_theme| container::Style {
                background: Some(Background::Color(LightTheme::BACKGROUND)),
                ..Default::default()
            })
            .into()
    }

    fn view_error<'a>(&self, error: &'a str) -> Element<'a, Message> {
        container(
            row![
                text(error).size(14).color(LightTheme::ERROR),
                Space::with_width(Length::Fill),
                button(text("Dismiss").size(13))
                    .on_press(Message::DismissError)
                    .style(button::text),
            ]
            .spacing(12)
            .align_y(Alignment::Center),
        )
        .padding(Padding::from([10.0, 14.0]))
        .width(Length::Fill)
        .style(|_theme| container::Style {
            background: Some(Background::Color(LightTheme::ERROR_SURFACE)),
            border: Border {
                color: LightTheme::ERROR,
                width: 1.0,
                radius: 8.0.into(),
            },
            ..Default::default()
        })
        .into()
    }

    fn view_answer(&self) -> Element<'_, Message> {
        column![
            text("Answer").size(28).color(LightTheme::TEXT),
            container(text(&self.answer).size(16).color(LightTheme::TEXT))
                .padding(16)
                .width(Length::Fill)
                .style(|_theme| container::Style {
                    background: Some(Background::Color(LightTheme::SURFACE)),
                    border: Border {
                        color: LightTheme::BORDER,
                        width: 1.0,
                        radius: 12.0.into(),
                    },
                    ..Default::default()
                }),
        ]
        .spacing(12)
        .width(Length::Fill)
        .into()
    }

    fn view_references(&self) -> Element<'_, Message> {
        let cards: Vec<Element<'_, Message>> = self
            .references
            .iter()
            .enumerate()
            .map(|(i, reference)| {
                let panel = self.panel.as_ref().filter(|p| p.reference_index == i);
                reference_card::view(i, reference, panel, self.frame)
            })
            .collect();

        column![
            text("References").size(24).color(LightTheme::TEXT),
            column(cards).spacing(12),
        ]
        .spacing(12)
        .width(Length::Fill)
        .into()
    }

    pub fn subscription(&self) -> Subscription<Message> {
        let events = iced::event::listen_with(escape_pressed);
        if self.is_busy() {
            Subscription::batch([
                events,
                time::every(Duration::from_millis(350)).map(|_| Message::Tick),
            ])
        } else {
            events
        }
    }

    pub fn theme(&self) -> Theme {
        theme::theme()
    }

    // ========================================================================
    // Business Logic
    // ========================================================================

    fn start_search(&mut self) -> Task<Message> {
        let term = self.query.trim().to_string();
        if term.is_empty() || self.searching {
            return Task::none();
        }

        self.search_generation += 1;
        let generation = self.search_generation;
        self.clear_results();
        self.searching = true;

        let client = self.backend.clone();
        Task::perform(
            async move { client.search(&term).await.map_err(|e| e.to_string()) },
            move |result| Message::SearchCompleted(generation, result),
        )
    }

    /// Request for the open panel's question, scoped to its paper and the
    /// `arxiv_results` of the current search.
    fn chat_request(&self) -> Option<ChatRequest> {
        let panel = self.panel.as_ref()?;
        let question = panel.question.trim();
        if question.is_empty() || panel.is_loading() {
            return None;
        }
        Some(ChatRequest {
            question: question.to_string(),
            url: panel.url.clone(),
            parsed_arxiv_results: self.arxiv_results.clone(),
        })
    }

    fn start_chat(&mut self) -> Task<Message> {
        let Some(request) = self.chat_request() else {
            return Task::none();
        };
        let Some(panel) = self.panel.as_mut() else {
            return Task::none();
        };

        self.next_chat_id += 1;
        let id = self.next_chat_id;
        panel.pending = Some(id);
        panel.answer = None;
        panel.error = None;

        let client = self.backend.clone();
        Task::perform(
            async move { client.chat(request).await.map_err(|e| e.to_string()) },
            move |result| Message::ChatCompleted(id, result),
        )
    }

    fn clear_results(&mut self) {
        self.answer.clear();
        self.references.clear();
        self.arxiv_results = Value::Null;
        self.panel = None;
        self.error = None;
    }

    /// Start over; an in-flight search is abandoned.
    fn reset(&mut self) {
        self.search_generation += 1;
        self.searching = false;
        self.query.clear();
        self.clear_results();
    }
}

/// Escape is taken even when a focused text input already captured it, so a
/// single press closes the chat panel while typing.
fn escape_pressed(event: Event, _status: event::Status, _window: window::Id) -> Option<Message> {
    match event {
        Event::Keyboard(keyboard::Event::KeyPressed {
            key: Key::Named(keyboard::key::Named::Escape),
            ..
        }) => Some(Message::Escape),
        _ => None,
    }
}
