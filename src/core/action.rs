//! # Commands
//!
//! Everything that can happen to the navigation stack becomes a `Command`.
//! Caller asks to push? That's `Command::Push`. The user swipes a sheet away?
//! That's `Command::Platform(PlatformEvent::PresentationDismissed { .. })`.
//!
//! `update()` applies a command to the navigator and returns the list of
//! mutations it caused. Notification and logging are post-processing over that
//! list; nothing observes the route list implicitly.
//!
//! ```text
//! Navigator + Command  →  update()  →  Vec<Mutation>  →  publish / log
//! ```
//!
//! An empty mutation list means the command was a no-op.

use std::fmt::Debug;

use log::debug;

use crate::core::navigator::Navigator;
use crate::core::platform::{ContainerId, ContainerPlatform, PlatformEvent, PresentationStyle, ScreenHandle};
use crate::core::reconcile;

#[derive(Debug, Clone, PartialEq)]
pub enum Command<D> {
    Start(D),
    Push {
        destination: D,
        animated: bool,
    },
    Present {
        destination: D,
        style: PresentationStyle,
        animated: bool,
    },
    ReplaceStack {
        destinations: Vec<D>,
        animated: bool,
    },
    Dismiss {
        animated: bool,
    },
    DismissAll {
        animated: bool,
    },
    Pop {
        animated: bool,
    },
    PopOrDismiss {
        animated: bool,
    },
    PopToRoot {
        animated: bool,
    },
    PopToRootInCurrentNav {
        animated: bool,
    },
    PopTo {
        destination: D,
        animated: bool,
    },
    SetStatusBarHidden(bool),
    /// Out-of-band change reported by the platform.
    Platform(PlatformEvent),
}

/// Why the reconciliation listener dropped routes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReconcileCause {
    /// A back gesture settled inside `container`.
    GesturePop { container: ContainerId },
    /// The user dismissed `container` (and whatever it presented).
    GestureDismissal { container: ContainerId },
}

#[derive(Debug, Clone, PartialEq)]
pub enum Mutation<D> {
    Appended {
        destination: D,
        container: ContainerId,
        screen: ScreenHandle,
    },
    Replaced {
        routes: Vec<D>,
    },
    /// Tail entries removed by a navigator-initiated command.
    Truncated {
        removed: Vec<D>,
    },
    ContainerPresented {
        container: ContainerId,
        style: PresentationStyle,
    },
    ContainersClosed {
        containers: Vec<ContainerId>,
    },
    /// The container's presentation finished; its transitions are now observed.
    ContainerObserved {
        container: ContainerId,
    },
    Reconciled {
        cause: ReconcileCause,
        removed: Vec<D>,
    },
}

impl<D> Mutation<D> {
    /// True when the route list is different afterwards.
    pub fn changes_routes(&self) -> bool {
        matches!(
            self,
            Mutation::Appended { .. }
                | Mutation::Replaced { .. }
                | Mutation::Truncated { .. }
                | Mutation::Reconciled { .. }
        )
    }
}

pub fn update<D, P>(nav: &mut Navigator<D, P>, command: Command<D>) -> Vec<Mutation<D>>
where
    D: Clone + PartialEq + Debug,
    P: ContainerPlatform,
{
    match command {
        Command::Start(destination) => replace_stack(nav, vec![destination], false),
        Command::Push {
            destination,
            animated,
        } => push(nav, destination, animated),
        Command::Present {
            destination,
            style,
            animated,
        } => present(nav, destination, style, animated),
        Command::ReplaceStack {
            destinations,
            animated,
        } => replace_stack(nav, destinations, animated),
        Command::Dismiss { animated } => dismiss(nav, animated),
        Command::DismissAll { animated } => dismiss_all(nav, animated),
        Command::Pop { animated } => pop(nav, animated),
        Command::PopOrDismiss { animated } => {
            if nav.stack.depth(nav.stack.top()) > 1 {
                pop(nav, animated)
            } else if nav.stack.is_top_presented() {
                dismiss(nav, animated)
            } else {
                Vec::new()
            }
        }
        Command::PopToRoot { animated } => {
            if nav.registry.is_empty() {
                return Vec::new();
            }
            pop_to_entry(nav, 0, animated)
        }
        Command::PopToRootInCurrentNav { animated } => {
            let popped = nav.stack.pop_top_to_root(animated);
            truncate(nav, popped).into_iter().collect()
        }
        Command::PopTo {
            destination,
            animated,
        } => pop_to(nav, &destination, animated),
        Command::SetStatusBarHidden(hidden) => {
            nav.stack.set_status_bar_hidden(hidden);
            Vec::new()
        }
        Command::Platform(event) => reconcile::reconcile(nav, event),
    }
}

fn push<D, P>(nav: &mut Navigator<D, P>, destination: D, animated: bool) -> Vec<Mutation<D>>
where
    D: Clone + PartialEq + Debug,
    P: ContainerPlatform,
{
    let screen = nav.render(&destination);
    let container = nav.stack.push(screen, animated);
    nav.registry.record(destination.clone(), container, screen);
    vec![Mutation::Appended {
        destination,
        container,
        screen,
    }]
}

fn present<D, P>(
    nav: &mut Navigator<D, P>,
    destination: D,
    style: PresentationStyle,
    animated: bool,
) -> Vec<Mutation<D>>
where
    D: Clone + PartialEq + Debug,
    P: ContainerPlatform,
{
    let screen = nav.render(&destination);
    let container = nav.stack.present(screen, style, animated);
    nav.registry.record(destination.clone(), container, screen);
    vec![
        Mutation::ContainerPresented { container, style },
        Mutation::Appended {
            destination,
            container,
            screen,
        },
    ]
}

fn replace_stack<D, P>(nav: &mut Navigator<D, P>, destinations: Vec<D>, animated: bool) -> Vec<Mutation<D>>
where
    D: Clone + PartialEq + Debug,
    P: ContainerPlatform,
{
    if destinations.is_empty() {
        debug!("replace_stack ignored: no destinations");
        return Vec::new();
    }

    let screens: Vec<ScreenHandle> = destinations.iter().map(|d| nav.render(d)).collect();
    let closed = nav.stack.reset_root(screens.clone(), animated);
    for container in &closed {
        nav.reconciler.forget(*container);
    }

    let root = nav.stack.root();
    nav.registry.replace_all(
        destinations
            .iter()
            .cloned()
            .zip(screens)
            .map(|(destination, screen)| (destination, root, screen)),
    );

    let mut mutations = Vec::new();
    if !closed.is_empty() {
        mutations.push(Mutation::ContainersClosed { containers: closed });
    }
    mutations.push(Mutation::Replaced {
        routes: destinations,
    });
    mutations
}

fn dismiss<D, P>(nav: &mut Navigator<D, P>, animated: bool) -> Vec<Mutation<D>>
where
    D: Clone + PartialEq + Debug,
    P: ContainerPlatform,
{
    let Some(container) = nav.stack.dismiss_top(animated) else {
        debug!("dismiss ignored: top container is not presented");
        return Vec::new();
    };
    let routes = nav.registry.count_in(container);

    let mut mutations: Vec<Mutation<D>> = forget_closed(nav, vec![container]).into_iter().collect();
    mutations.extend(truncate(nav, routes));
    mutations
}

fn dismiss_all<D, P>(nav: &mut Navigator<D, P>, animated: bool) -> Vec<Mutation<D>>
where
    D: Clone + PartialEq + Debug,
    P: ContainerPlatform,
{
    // The lowest presenting container is where the modal chain started.
    let Some(index) = nav.stack.first_presenting() else {
        debug!("dismiss_all ignored: nothing is presented");
        return Vec::new();
    };
    let container = nav.stack.ids()[index];
    let entry = nav
        .stack
        .screens(container)
        .last()
        .and_then(|screen| nav.registry.position_of(container, *screen));

    match entry {
        Some(entry) => pop_to_entry(nav, entry, animated),
        // Presenting container without a tracked screen: close the chain only.
        None => close_above(nav, index, animated),
    }
}

fn pop<D, P>(nav: &mut Navigator<D, P>, animated: bool) -> Vec<Mutation<D>>
where
    D: Clone + PartialEq + Debug,
    P: ContainerPlatform,
{
    if nav.registry.len() <= 1 {
        return Vec::new();
    }
    let popped = nav.stack.pop_top(animated);
    truncate(nav, popped).into_iter().collect()
}

fn pop_to<D, P>(nav: &mut Navigator<D, P>, destination: &D, animated: bool) -> Vec<Mutation<D>>
where
    D: Clone + PartialEq + Debug,
    P: ContainerPlatform,
{
    let stack = &nav.stack;
    let target = nav.registry.most_recent_where(|entry| {
        entry.destination == *destination && stack.contains_screen(entry.container, entry.screen)
    });
    match target {
        Some(index) => pop_to_entry(nav, index, animated),
        None => {
            debug!("pop_to ignored: {:?} is not on the stack", destination);
            Vec::new()
        }
    }
}

/// Pops the entry's container back to its screen, closes every container
/// above it and drops every entry after it.
fn pop_to_entry<D, P>(nav: &mut Navigator<D, P>, index: usize, animated: bool) -> Vec<Mutation<D>>
where
    D: Clone + PartialEq + Debug,
    P: ContainerPlatform,
{
    let Some((container, screen)) = nav
        .registry
        .get(index)
        .map(|entry| (entry.container, entry.screen))
    else {
        return Vec::new();
    };
    let Some(position) = nav.stack.index_of(container) else {
        debug!("pop_to ignored: {} is no longer active", container);
        return Vec::new();
    };

    nav.stack.pop_to_screen(position, screen, animated);
    let closed = nav.stack.close_above(position, animated);

    // Entries after the target include any whose screen a gesture already
    // removed without the platform reporting it yet.
    let excess = nav.registry.len().saturating_sub(index + 1);
    let mut mutations: Vec<Mutation<D>> = forget_closed(nav, closed).into_iter().collect();
    mutations.extend(truncate(nav, excess));
    mutations
}

/// Closes everything above `position` and drops the closed containers' entries.
fn close_above<D, P>(nav: &mut Navigator<D, P>, position: usize, animated: bool) -> Vec<Mutation<D>>
where
    D: Clone + PartialEq + Debug,
    P: ContainerPlatform,
{
    let closed = nav.stack.close_above(position, animated);
    let routes = closed.iter().map(|c| nav.registry.count_in(*c)).sum();

    let mut mutations: Vec<Mutation<D>> = forget_closed(nav, closed).into_iter().collect();
    mutations.extend(truncate(nav, routes));
    mutations
}

fn forget_closed<D, P>(nav: &mut Navigator<D, P>, closed: Vec<ContainerId>) -> Option<Mutation<D>>
where
    D: Clone + PartialEq + Debug,
    P: ContainerPlatform,
{
    if closed.is_empty() {
        return None;
    }
    for container in &closed {
        nav.reconciler.forget(*container);
    }
    Some(Mutation::ContainersClosed { containers: closed })
}

fn truncate<D, P>(nav: &mut Navigator<D, P>, count: usize) -> Option<Mutation<D>>
where
    D: Clone + PartialEq + Debug,
    P: ContainerPlatform,
{
    let removed: Vec<D> = nav
        .registry
        .truncate_tail(count)
        .into_iter()
        .map(|entry| entry.destination)
        .collect();
    if removed.is_empty() {
        None
    } else {
        Some(Mutation::Truncated { removed })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{AppDestination, AppDestination::*, assert_in_sync, test_navigator};

    #[test]
    fn test_push_reports_appended() {
        let mut nav = test_navigator();
        nav.start(Home);
        let mutations = update(
            &mut nav,
            Command::Push {
                destination: Library,
                animated: false,
            },
        );
        assert!(matches!(
            mutations.as_slice(),
            [Mutation::Appended { destination: Library, .. }]
        ));
        assert_in_sync(&nav);
    }

    #[test]
    fn test_present_reports_container_then_entry() {
        let mut nav = test_navigator();
        nav.start(Home);
        let mutations = update(
            &mut nav,
            Command::Present {
                destination: Library,
                style: PresentationStyle::FullScreen,
                animated: false,
            },
        );
        assert_eq!(mutations.len(), 2);
        assert!(matches!(
            mutations[0],
            Mutation::ContainerPresented {
                style: PresentationStyle::FullScreen,
                ..
            }
        ));
        assert!(mutations[1].changes_routes());
    }

    #[test]
    fn test_noops_return_no_mutations() {
        let mut nav = test_navigator();
        nav.start(Home);
        for command in [
            Command::Dismiss { animated: true },
            Command::DismissAll { animated: true },
            Command::Pop { animated: true },
            Command::PopOrDismiss { animated: true },
            Command::PopToRootInCurrentNav { animated: true },
            Command::PopTo {
                destination: Messaging,
                animated: true,
            },
            Command::ReplaceStack {
                destinations: Vec::new(),
                animated: true,
            },
        ] {
            assert!(update(&mut nav, command).is_empty());
        }
        assert_eq!(nav.routes(), vec![Home]);
    }

    #[test]
    fn test_pop_to_truncates_across_containers() {
        let mut nav = test_navigator();
        nav.start(Home);
        nav.push(Library, false);
        nav.present(MessageReorder, PresentationStyle::Automatic, false);
        nav.push(Messaging, false);

        let mutations = update(
            &mut nav,
            Command::PopTo {
                destination: Library,
                animated: false,
            },
        );
        assert_eq!(
            mutations.last(),
            Some(&Mutation::Truncated {
                removed: vec![MessageReorder, Messaging]
            })
        );
        assert!(matches!(mutations[0], Mutation::ContainersClosed { .. }));
        assert_in_sync(&nav);
    }

    #[test]
    fn test_changes_routes_classification() {
        let closed: Mutation<AppDestination> = Mutation::ContainersClosed {
            containers: vec![ContainerId(1)],
        };
        let observed: Mutation<AppDestination> = Mutation::ContainerObserved {
            container: ContainerId(1),
        };
        assert!(!closed.changes_routes());
        assert!(!observed.changes_routes());
        assert!(
            Mutation::Reconciled {
                cause: ReconcileCause::GesturePop {
                    container: ContainerId(0)
                },
                removed: vec![Home],
            }
            .changes_routes()
        );
    }
}
