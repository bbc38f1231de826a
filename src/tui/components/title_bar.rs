//! # TitleBar Component
//!
//! Top line: route and container counts, the selected destination and the
//! last status message.
//!
//! Purely presentational. It receives all data as props and has no internal
//! state:
//!
//! ```rust,ignore
//! let mut title_bar = TitleBar::new(3, 2, "library".to_string(), String::new());
//! title_bar.render(frame, area);
//! ```
//!
//! The status message is dropped entirely when empty so narrow terminals
//! still show the counts.

use crate::tui::component::Component;
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::text::Span;

pub struct TitleBar {
    pub route_count: usize,
    pub container_count: usize,
    /// Target of push/present/popTo key commands
    pub selected: String,
    pub status_message: String,
}

impl TitleBar {
    pub fn new(
        route_count: usize,
        container_count: usize,
        selected: String,
        status_message: String,
    ) -> Self {
        Self {
            route_count,
            container_count,
            selected,
            status_message,
        }
    }
}

impl Component for TitleBar {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let base = format!(
            "navkit playground | routes: {} | containers: {} | selected: {}",
            self.route_count, self.container_count, self.selected
        );
        let title_text = if self.status_message.is_empty() {
            base
        } else {
            format!("{} | {}", base, self.status_message)
        };

        frame.render_widget(Span::raw(title_text), area);
    }
}
