//! # RouteList Component
//!
//! The logical route list, one numbered line per entry, tagged with the
//! container its screen lives in. The last entry is the visible one and is
//! highlighted.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, List, ListItem};

use crate::core::platform::ContainerId;
use crate::tui::component::Component;

pub struct RouteList {
    /// (destination, container) in route order
    pub routes: Vec<(String, ContainerId)>,
}

impl RouteList {
    pub fn new(routes: Vec<(String, ContainerId)>) -> Self {
        Self { routes }
    }
}

impl Component for RouteList {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let last = self.routes.len().saturating_sub(1);
        let items: Vec<ListItem> = self
            .routes
            .iter()
            .enumerate()
            .map(|(index, (destination, container))| {
                let style = if index == last {
                    Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)
                } else {
                    Style::default()
                };
                ListItem::new(Line::from(vec![
                    Span::styled(format!("{:>2} ", index), Style::default().fg(Color::DarkGray)),
                    Span::styled(destination.clone(), style),
                    Span::styled(format!(" [{}]", container), Style::default().fg(Color::DarkGray)),
                ]))
            })
            .collect();

        let block = Block::bordered().title(format!("Routes ({})", self.routes.len()));
        frame.render_widget(List::new(items).block(block), area);
    }
}
