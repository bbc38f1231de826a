//! # MutationLog Component
//!
//! Scrolls the mutation history, newest line at the bottom. Only the tail
//! that fits the area is rendered.

use std::fmt::Debug;

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::text::Line;
use ratatui::widgets::{Block, Paragraph};

use crate::core::action::{Mutation, ReconcileCause};
use crate::tui::component::Component;

/// One-line human readable form of a mutation.
pub fn describe_mutation<D: Debug>(mutation: &Mutation<D>) -> String {
    match mutation {
        Mutation::Appended {
            destination,
            container,
            screen,
        } => format!("+ {:?} as {} in {}", destination, screen, container),
        Mutation::Replaced { routes } => format!("= {:?}", routes),
        Mutation::Truncated { removed } => format!("- {:?}", removed),
        Mutation::ContainerPresented { container, style } => {
            format!("presented {} ({:?})", container, style)
        }
        Mutation::ContainersClosed { containers } => {
            let ids: Vec<String> = containers.iter().map(ToString::to_string).collect();
            format!("closed {}", ids.join(", "))
        }
        Mutation::ContainerObserved { container } => format!("observing {}", container),
        Mutation::Reconciled { cause, removed } => match cause {
            ReconcileCause::GesturePop { container } => {
                format!("~ back gesture in {}: -{:?}", container, removed)
            }
            ReconcileCause::GestureDismissal { container } => {
                format!("~ {} swiped away: -{:?}", container, removed)
            }
        },
    }
}

pub struct MutationLog<'a> {
    pub lines: &'a [String],
}

impl<'a> MutationLog<'a> {
    pub fn new(lines: &'a [String]) -> Self {
        Self { lines }
    }
}

impl Component for MutationLog<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let visible = area.height.saturating_sub(2) as usize;
        let start = self.lines.len().saturating_sub(visible);
        let lines: Vec<Line> = self.lines[start..]
            .iter()
            .map(|line| Line::raw(line.as_str()))
            .collect();

        let paragraph = Paragraph::new(lines).block(Block::bordered().title("Mutations"));
        frame.render_widget(paragraph, area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::platform::{ContainerId, PresentationStyle, ScreenHandle};
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    #[test]
    fn test_describe_mutations() {
        let appended: Mutation<&str> = Mutation::Appended {
            destination: "home",
            container: ContainerId(0),
            screen: ScreenHandle(1),
        };
        assert_eq!(describe_mutation(&appended), "+ \"home\" as s1 in c0");

        let closed: Mutation<&str> = Mutation::ContainersClosed {
            containers: vec![ContainerId(1), ContainerId(2)],
        };
        assert_eq!(describe_mutation(&closed), "closed c1, c2");

        let presented: Mutation<&str> = Mutation::ContainerPresented {
            container: ContainerId(1),
            style: PresentationStyle::FullScreen,
        };
        assert_eq!(describe_mutation(&presented), "presented c1 (FullScreen)");

        let reconciled: Mutation<&str> = Mutation::Reconciled {
            cause: ReconcileCause::GesturePop {
                container: ContainerId(1),
            },
            removed: vec!["library"],
        };
        assert_eq!(
            describe_mutation(&reconciled),
            "~ back gesture in c1: -[\"library\"]"
        );
    }

    #[test]
    fn test_log_shows_newest_lines() {
        let backend = TestBackend::new(30, 4);
        let mut terminal = Terminal::new(backend).unwrap();
        let lines: Vec<String> = (0..5).map(|i| format!("line {i}")).collect();

        let mut log = MutationLog::new(&lines);
        terminal
            .draw(|f| {
                log.render(f, f.area());
            })
            .unwrap();

        let buffer = terminal.backend().buffer();
        let text = buffer
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect::<String>();

        assert!(text.contains("Mutations"));
        assert!(text.contains("line 3"));
        assert!(text.contains("line 4"));
        assert!(!text.contains("line 2"));
    }
}
