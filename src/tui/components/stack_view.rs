//! # StackView Component
//!
//! One bordered column per active container, root on the left. Each column
//! lists its screens with the top of the stack first, so the visible screen
//! sits right under the title.
//!
//! Column titles carry the container id, its role (`root`, `sheet`,
//! `full screen`) and a `●` once its transitions are observed. An unobserved
//! presented container is the window in which back gestures go unnoticed.

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, List, ListItem};

use crate::core::platform::{ContainerId, PresentationStyle};
use crate::tui::component::Component;

/// Snapshot of a single container for display.
#[derive(Debug, Clone, PartialEq)]
pub struct ContainerColumn {
    pub id: ContainerId,
    /// `None` for the root container
    pub style: Option<PresentationStyle>,
    pub observed: bool,
    /// Screen labels, bottom of the stack first
    pub screens: Vec<String>,
}

impl ContainerColumn {
    fn title(&self) -> String {
        let role = match self.style {
            None => "root",
            Some(PresentationStyle::Automatic) => "sheet",
            Some(PresentationStyle::FullScreen) => "full screen",
        };
        let marker = if self.observed { " ●" } else { "" };
        format!("{} {}{}", self.id, role, marker)
    }
}

pub struct StackView {
    pub columns: Vec<ContainerColumn>,
}

impl StackView {
    pub fn new(columns: Vec<ContainerColumn>) -> Self {
        Self { columns }
    }
}

impl Component for StackView {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        if self.columns.is_empty() {
            return;
        }
        let constraints = vec![Constraint::Fill(1); self.columns.len()];
        let areas = Layout::horizontal(constraints).split(area);
        let last = self.columns.len() - 1;

        for (index, (column, column_area)) in self.columns.iter().zip(areas.iter()).enumerate() {
            let border_style = if index == last {
                Style::default().fg(Color::Cyan)
            } else {
                Style::default().fg(Color::DarkGray)
            };
            let block = Block::bordered()
                .title(column.title())
                .border_style(border_style);

            let items: Vec<ListItem> = column
                .screens
                .iter()
                .rev()
                .enumerate()
                .map(|(depth, label)| {
                    let style = if depth == 0 {
                        Style::default().add_modifier(Modifier::BOLD)
                    } else {
                        Style::default().fg(Color::Gray)
                    };
                    ListItem::new(Line::styled(label.clone(), style))
                })
                .collect();

            frame.render_widget(List::new(items).block(block), *column_area);
        }
    }
}
