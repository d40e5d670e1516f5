use ratatui::layout::Rect;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::advice::AdviceClient;
use crate::provider::Provider;
use crate::session::ChatSession;

pub struct App {
    // Core state
    pub should_quit: bool,
    pub chat_open: bool,

    // Site state
    pub site_scroll: u16,
    pub site_line_count: u16, // Wrapped height of the page, recorded at render
    pub site_height: u16,     // Height of the page body area

    // Advisor chat state
    pub session: ChatSession,
    pub query_input: String,
    pub query_cursor: usize, // cursor position in query_input, in chars
    pub query_scroll: u16,
    pub query_chat_height: u16, // Height of chat area for scroll calculations
    pub query_chat_width: u16,  // Width of chat area for wrap calculations
    pub advice_task: Option<JoinHandle<String>>,

    // Animation state
    pub animation_frame: u8, // 0-2 for ellipsis animation

    // Layout areas for mouse hit-testing
    pub chat_area: Option<Rect>,

    pub advice: AdviceClient,
    pub provider: Provider,
    pub model: String,
}

impl App {
    pub fn new(advice: AdviceClient, greeting: &str, provider: Provider, model: String) -> Self {
        Self {
            should_quit: false,
            chat_open: false,

            site_scroll: 0,
            site_line_count: 0,
            site_height: 0,

            session: ChatSession::new(greeting),
            query_input: String::new(),
            query_cursor: 0,
            query_scroll: 0,
            query_chat_height: 0,
            query_chat_width: 0,
            advice_task: None,

            animation_frame: 0,

            chat_area: None,

            advice,
            provider,
            model,
        }
    }

    pub fn open_chat(&mut self) {
        self.chat_open = true;
        self.scroll_chat_to_bottom();
    }

    /// Hide the chat panel. The conversation and any pending reply survive.
    pub fn close_chat(&mut self) {
        self.chat_open = false;
        self.chat_area = None;
    }

    pub fn is_pending(&self) -> bool {
        self.session.is_pending()
    }

    /// Whether Enter would currently be accepted
    pub fn can_submit(&self) -> bool {
        !self.query_input.trim().is_empty() && !self.session.is_pending()
    }

    /// Submit the input box contents to the advisor.
    ///
    /// On acceptance the input is cleared and the request runs in the
    /// background; rejected submissions leave the input as typed.
    pub fn submit_query(&mut self) {
        match self.session.submit(&self.query_input) {
            Ok(query) => {
                info!(
                    backend = self.advice.backend_name(),
                    model = %self.model,
                    "dispatching advice request"
                );
                self.query_input.clear();
                self.query_cursor = 0;
                self.animation_frame = 0;
                self.advice_task = Some(self.advice.spawn_request(query));
                self.scroll_chat_to_bottom();
            }
            Err(reason) => {
                debug!(%reason, "submission ignored");
            }
        }
    }

    /// Record the advisor's reply once the background request has finished
    pub async fn poll_advice(&mut self) {
        let finished = self
            .advice_task
            .as_ref()
            .is_some_and(|task| task.is_finished());
        if !finished {
            return;
        }

        if let Some(task) = self.advice_task.take() {
            let reply = match task.await {
                Ok(reply) => reply,
                Err(e) => {
                    warn!(error = %e, "advice task did not complete");
                    self.advice.fallback().to_string()
                }
            };
            self.session.resolve(reply);
            self.scroll_chat_to_bottom();
        }
    }

    /// Tick animation frame (called by Tick event)
    pub fn tick_animation(&mut self) {
        if self.session.is_pending() {
            self.animation_frame = (self.animation_frame + 1) % 3;
        }
    }

    /// Number of wrapped lines the chat transcript occupies
    pub fn chat_line_count(&self) -> u16 {
        let wrap_width = if self.query_chat_width > 0 {
            self.query_chat_width as usize
        } else {
            50
        };

        let mut total_lines: u16 = 0;
        for turn in self.session.transcript() {
            total_lines = total_lines.saturating_add(1); // Role line
            for line in turn.text().lines() {
                let char_count = line.chars().count();
                let wrapped = if char_count == 0 {
                    1
                } else {
                    (char_count / wrap_width) + 1
                };
                total_lines = total_lines.saturating_add(wrapped as u16);
            }
            total_lines = total_lines.saturating_add(1); // Blank line after message
        }

        if self.session.is_pending() {
            total_lines = total_lines.saturating_add(2);
        }

        total_lines
    }

    /// Scroll chat so the newest turn (or the typing indicator) is visible
    pub fn scroll_chat_to_bottom(&mut self) {
        let visible_height = if self.query_chat_height > 0 {
            self.query_chat_height
        } else {
            20
        };

        self.query_scroll = self.chat_line_count().saturating_sub(visible_height);
    }

    pub fn scroll_chat_up(&mut self, lines: u16) {
        self.query_scroll = self.query_scroll.saturating_sub(lines);
    }

    pub fn scroll_chat_down(&mut self, lines: u16) {
        let max = self.chat_line_count().saturating_sub(1);
        self.query_scroll = self.query_scroll.saturating_add(lines).min(max);
    }

    pub fn scroll_site_up(&mut self, lines: u16) {
        self.site_scroll = self.site_scroll.saturating_sub(lines);
    }

    /// Scroll the page, stopping once its last line reaches the bottom
    pub fn scroll_site_down(&mut self, lines: u16) {
        let max = self.site_line_count.saturating_sub(self.site_height);
        self.site_scroll = self.site_scroll.saturating_add(lines).min(max);
    }
}
