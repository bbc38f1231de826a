//! # TUI Adapter
//!
//! The ratatui-specific layer. Drives a `Navigator<String, InMemoryPlatform>`
//! from the keyboard and renders the container hierarchy next to the route
//! list, so every command and its mutations can be watched live.
//!
//! This is the only module that knows about ratatui and crossterm.
//!
//! ## Frame Loop
//!
//! Each iteration:
//!
//! 1. Draw (only when something changed).
//! 2. Wait up to 100ms for input, then drain all pending input.
//! 3. Complete the animations started since the last frame and pump platform
//!    events through the navigator. A swipe issued in the same frame as the
//!    present that created its container is therefore seen before the
//!    completion, which is how the observation race shows up here.
//! 4. Drain the route subscription into the status message.

mod component;
mod components;
pub mod event;
mod ui;

use std::collections::VecDeque;
use std::io::stdout;
use std::time::Duration;

use crossterm::event::{
    KeyboardEnhancementFlags, PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
};
use crossterm::execute;
use log::{debug, info};

use crate::core::action::{Command, Mutation};
use crate::core::config::ResolvedConfig;
use crate::core::navigator::Navigator;
use crate::core::platform::PresentationStyle;
use crate::platform::InMemoryPlatform;
use crate::tui::components::mutation_log::describe_mutation;
use crate::tui::event::{TuiEvent, poll_event_immediate, poll_event_timeout};

pub type PlaygroundNavigator = Navigator<String, InMemoryPlatform>;

/// Oldest lines fall off the mutation log past this.
const LOG_CAPACITY: usize = 200;

/// TUI-specific presentation state (not part of the navigation model)
pub struct TuiState {
    pub destinations: Vec<String>,
    pub selected: usize,
    pub animated: bool,
    pub full_screen_modals: bool,
    pub status_bar_hidden: bool,
    pub status_message: String,
    pub log: VecDeque<String>,
}

impl TuiState {
    pub fn new(config: &ResolvedConfig) -> Self {
        let selected = config
            .destinations
            .iter()
            .position(|d| *d == config.start)
            .unwrap_or(0);
        Self {
            destinations: config.destinations.clone(),
            selected,
            animated: config.animated,
            full_screen_modals: config.full_screen_modals,
            status_bar_hidden: false,
            status_message: String::new(),
            log: VecDeque::new(),
        }
    }

    pub fn selected_destination(&self) -> &str {
        self.destinations
            .get(self.selected)
            .map(String::as_str)
            .unwrap_or_default()
    }

    fn select_next(&mut self) {
        if !self.destinations.is_empty() {
            self.selected = (self.selected + 1) % self.destinations.len();
        }
    }

    fn select_previous(&mut self) {
        if !self.destinations.is_empty() {
            self.selected = (self.selected + self.destinations.len() - 1) % self.destinations.len();
        }
    }

    pub fn record(&mut self, line: String) {
        if self.log.len() == LOG_CAPACITY {
            self.log.pop_front();
        }
        self.log.push_back(line);
    }
}

/// What a key press asks the playground to do.
#[derive(Debug, Clone, PartialEq)]
pub enum PlaygroundAction {
    Navigate(Command<String>),
    NextDestination,
    PreviousDestination,
    /// Simulated back gesture on the top container.
    SwipeBack,
    /// Simulated swipe-down on the top container.
    SwipeDismiss,
    ToggleStatusBar,
    Quit,
}

/// Translates an input event into a playground action, using the current
/// selection as the command target.
pub fn map_event(event: TuiEvent, tui: &TuiState) -> Option<PlaygroundAction> {
    let animated = tui.animated;
    let selected = tui.selected_destination().to_string();
    let action = match event {
        TuiEvent::Quit | TuiEvent::ForceQuit => PlaygroundAction::Quit,
        TuiEvent::NextDestination => PlaygroundAction::NextDestination,
        TuiEvent::PreviousDestination => PlaygroundAction::PreviousDestination,
        TuiEvent::Back => PlaygroundAction::Navigate(Command::PopOrDismiss { animated }),
        TuiEvent::Resize => return None,
        TuiEvent::Key(c) => match c {
            'p' => PlaygroundAction::Navigate(Command::Push {
                destination: selected,
                animated,
            }),
            'm' => PlaygroundAction::Navigate(Command::Present {
                destination: selected,
                style: PresentationStyle::from_full_screen(tui.full_screen_modals),
                animated,
            }),
            'M' => PlaygroundAction::Navigate(Command::Present {
                destination: selected,
                style: PresentationStyle::FullScreen,
                animated,
            }),
            'b' => PlaygroundAction::Navigate(Command::PopOrDismiss { animated }),
            'o' => PlaygroundAction::Navigate(Command::Pop { animated }),
            'd' => PlaygroundAction::Navigate(Command::Dismiss { animated }),
            'a' => PlaygroundAction::Navigate(Command::DismissAll { animated }),
            'r' => PlaygroundAction::Navigate(Command::PopToRoot { animated }),
            'n' => PlaygroundAction::Navigate(Command::PopToRootInCurrentNav { animated }),
            't' => PlaygroundAction::Navigate(Command::PopTo {
                destination: selected,
                animated,
            }),
            's' => PlaygroundAction::Navigate(Command::Start(selected)),
            'g' => PlaygroundAction::SwipeBack,
            'x' => PlaygroundAction::SwipeDismiss,
            'h' => PlaygroundAction::ToggleStatusBar,
            _ => return None,
        },
    };
    Some(action)
}

/// Applies an action. Returns true when the playground should exit.
pub fn handle_action(
    nav: &mut PlaygroundNavigator,
    tui: &mut TuiState,
    action: PlaygroundAction,
) -> bool {
    match action {
        PlaygroundAction::Quit => return true,
        PlaygroundAction::NextDestination => tui.select_next(),
        PlaygroundAction::PreviousDestination => tui.select_previous(),
        PlaygroundAction::Navigate(command) => {
            let label = format!("{:?}", command);
            let mutations = nav.apply(command);
            if mutations.is_empty() {
                tui.status_message = format!("{} (no-op)", label);
            }
            record_mutations(tui, &mutations);
        }
        PlaygroundAction::SwipeBack => {
            let top = nav.top_container();
            if nav.platform_mut().swipe_back(top) {
                tui.status_message = format!("Swiped back in {}", top);
            } else {
                tui.status_message = format!("{} has nothing to swipe back to", top);
            }
        }
        PlaygroundAction::SwipeDismiss => {
            let top = nav.top_container();
            if nav.platform_mut().swipe_dismiss(top) {
                tui.status_message = format!("Swiped {} away", top);
            } else {
                tui.status_message = format!("{} can't be swiped away", top);
            }
        }
        PlaygroundAction::ToggleStatusBar => {
            tui.status_bar_hidden = !tui.status_bar_hidden;
            let mutations = nav.apply(Command::SetStatusBarHidden(tui.status_bar_hidden));
            record_mutations(tui, &mutations);
        }
    }
    false
}

/// Per-frame platform work: finish animations, then reconcile.
pub fn tick(nav: &mut PlaygroundNavigator, tui: &mut TuiState) -> bool {
    let finished = nav.platform_mut().finish_animations();
    if finished > 0 {
        debug!("Finished {} animation(s)", finished);
    }
    let mutations = nav.pump_platform_events();
    record_mutations(tui, &mutations);
    finished > 0 || !mutations.is_empty()
}

fn record_mutations(tui: &mut TuiState, mutations: &[Mutation<String>]) {
    for mutation in mutations {
        tui.record(describe_mutation(mutation));
    }
}

struct TerminalModeGuard;

impl TerminalModeGuard {
    fn new() -> std::io::Result<Self> {
        // Release events let us ignore key repeats; terminals without the
        // protocol ignore the request
        execute!(
            stdout(),
            PushKeyboardEnhancementFlags(
                KeyboardEnhancementFlags::DISAMBIGUATE_ESCAPE_CODES
                    | KeyboardEnhancementFlags::REPORT_EVENT_TYPES
            )
        )?;
        info!("Terminal modes enabled (keyboard enhancement)");
        Ok(Self)
    }
}

impl Drop for TerminalModeGuard {
    fn drop(&mut self) {
        let _ = execute!(stdout(), PopKeyboardEnhancementFlags);
    }
}

pub fn run(config: ResolvedConfig) -> std::io::Result<()> {
    let mut nav: PlaygroundNavigator =
        Navigator::new(InMemoryPlatform::new(), |destination: &String| destination.clone());
    let mut routes_rx = nav.subscribe();
    let mut tui = TuiState::new(&config);

    handle_action(
        &mut nav,
        &mut tui,
        PlaygroundAction::Navigate(Command::Start(config.start.clone())),
    );

    let mut terminal = ratatui::init();
    let _terminal_mode_guard = TerminalModeGuard::new();
    let mut needs_redraw = true; // Force first frame

    loop {
        if needs_redraw {
            terminal.draw(|f| ui::draw_ui(f, &nav, &tui))?;
            needs_redraw = false;
        }

        let first_event = poll_event_timeout(Duration::from_millis(100));

        // Process first event + drain ALL pending events before next frame
        let mut should_quit = false;
        if first_event.is_some() {
            needs_redraw = true;
        }
        for event in first_event
            .into_iter()
            .chain(std::iter::from_fn(poll_event_immediate))
        {
            if let Some(action) = map_event(event, &tui)
                && handle_action(&mut nav, &mut tui, action)
            {
                should_quit = true;
                break;
            }
        }

        if should_quit {
            break;
        }

        if tick(&mut nav, &mut tui) {
            needs_redraw = true;
        }

        while let Ok(routes) = routes_rx.try_recv() {
            tui.status_message = format!("{} route(s)", routes.len());
            needs_redraw = true;
        }
    }

    ratatui::restore();
    info!("Playground closed");
    Ok(())
}
