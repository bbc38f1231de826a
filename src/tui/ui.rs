use ratatui::Frame;
use ratatui::layout::{Constraint, Layout};
use ratatui::style::{Color, Style};
use ratatui::text::Span;

use crate::core::platform::ContainerPlatform;
use crate::tui::component::Component;
use crate::tui::components::{ContainerColumn, MutationLog, RouteList, StackView, TitleBar};
use crate::tui::{PlaygroundNavigator, TuiState};

const HELP: &str = "tab/←→ select  p push  m/M present  b back  o pop  d dismiss  a dismiss all  \
r root  n nav root  t pop to  s start  g swipe back  x swipe away  h status bar  q quit";

pub fn draw_ui(frame: &mut Frame, nav: &PlaygroundNavigator, tui: &TuiState) {
    use Constraint::{Fill, Length, Min, Percentage};
    let layout = Layout::vertical([Length(1), Min(0), Length(8), Length(1)]);
    let [title_area, main_area, log_area, help_area] = layout.areas(frame.area());
    let [stack_area, routes_area] =
        Layout::horizontal([Fill(1), Percentage(30)]).areas(main_area);

    TitleBar::new(
        nav.route_count(),
        nav.containers().len(),
        tui.selected_destination().to_string(),
        tui.status_message.clone(),
    )
    .render(frame, title_area);

    StackView::new(container_columns(nav)).render(frame, stack_area);

    let routes = nav
        .entries()
        .iter()
        .map(|entry| (entry.destination.clone(), entry.container))
        .collect();
    RouteList::new(routes).render(frame, routes_area);

    let lines: Vec<String> = tui.log.iter().cloned().collect();
    MutationLog::new(&lines).render(frame, log_area);

    frame.render_widget(
        Span::styled(HELP, Style::default().fg(Color::DarkGray)),
        help_area,
    );
}

fn container_columns(nav: &PlaygroundNavigator) -> Vec<ContainerColumn> {
    let platform = nav.platform();
    nav.containers()
        .iter()
        .enumerate()
        .map(|(index, &id)| ContainerColumn {
            id,
            style: if index == 0 { None } else { platform.style(id) },
            observed: nav.reconciler().is_observed(id),
            screens: platform
                .screens(id)
                .iter()
                .map(|&screen| platform.label(screen).unwrap_or("?").to_string())
                .collect(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::ResolvedConfig;
    use crate::core::navigator::Navigator;
    use crate::core::platform::PresentationStyle;
    use crate::platform::InMemoryPlatform;
    use log::LevelFilter;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;
    use std::path::PathBuf;

    #[test]
    fn test_draw_ui_shows_hierarchy_and_routes() {
        let config = ResolvedConfig {
            log_level: LevelFilter::Off,
            log_file: PathBuf::from("navkit.log"),
            animated: false,
            destinations: vec!["home".to_string(), "library".to_string()],
            start: "home".to_string(),
            full_screen_modals: false,
        };
        let tui = TuiState::new(&config);
        let mut nav: PlaygroundNavigator =
            Navigator::new(InMemoryPlatform::new(), |d: &String| d.clone());
        nav.start("home".to_string());
        nav.present("library".to_string(), PresentationStyle::Automatic, false);
        nav.pump_platform_events();

        let backend = TestBackend::new(120, 24);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal.draw(|f| draw_ui(f, &nav, &tui)).unwrap();

        let buffer = terminal.backend().buffer();
        let text = buffer
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect::<String>();

        assert!(text.contains("routes: 2"));
        assert!(text.contains("c0 root ●"));
        assert!(text.contains("c1 sheet ●"));
        assert!(text.contains("Routes (2)"));
        assert!(text.contains("library [c1]"));
        assert!(text.contains("Mutations"));
    }
}
