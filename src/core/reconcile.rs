//! # Reconciliation Listener
//!
//! Folds platform-originated changes back into the registry so the route list
//! never drifts from what is actually on screen.
//!
//! ```text
//! PresentationCompleted(c) ──▶ start observing c's transitions
//! PresentationDismissed(c) ──▶ drop c and everything above it,
//!                              along with their entries
//! DidShow { c, from, .. }  ──▶ if `from` left c and c now holds fewer
//!                              screens than it has entries: drop one,
//!                              the entry for `from` when still tracked
//! ```
//!
//! Did-show is reconciled one settled transition at a time. A multi-screen
//! gesture produces one event per screen and each one removes a single entry.
//!
//! A presented container is only observed once its presentation completes. A
//! back gesture that settles inside it before then is not folded in.

use std::collections::HashSet;
use std::fmt::Debug;

use log::{debug, info};

use crate::core::action::{Mutation, ReconcileCause};
use crate::core::navigator::Navigator;
use crate::core::platform::{ContainerId, ContainerPlatform, PlatformEvent, ScreenHandle};

#[derive(Debug)]
pub struct Reconciler {
    observed: HashSet<ContainerId>,
}

impl Reconciler {
    pub fn new(root: ContainerId) -> Self {
        Self {
            observed: HashSet::from([root]),
        }
    }

    /// True once the container's did-show notifications are reconciled.
    pub fn is_observed(&self, container: ContainerId) -> bool {
        self.observed.contains(&container)
    }

    pub(crate) fn observe(&mut self, container: ContainerId) {
        self.observed.insert(container);
    }

    pub(crate) fn forget(&mut self, container: ContainerId) {
        self.observed.remove(&container);
    }
}

pub(crate) fn reconcile<D, P>(nav: &mut Navigator<D, P>, event: PlatformEvent) -> Vec<Mutation<D>>
where
    D: Clone + PartialEq + Debug,
    P: ContainerPlatform,
{
    match event {
        PlatformEvent::PresentationCompleted { container } => {
            if nav.stack.index_of(container).is_none() {
                debug!("Completion for inactive container {} ignored", container);
                return Vec::new();
            }
            nav.reconciler.observe(container);
            vec![Mutation::ContainerObserved { container }]
        }
        PlatformEvent::PresentationDismissed { container } => gesture_dismissal(nav, container),
        PlatformEvent::DidShow {
            container, from, ..
        } => {
            if !nav.reconciler.is_observed(container) {
                return Vec::new();
            }
            match from {
                Some(from) if !nav.stack.contains_screen(container, from) => {
                    gesture_pop(nav, container, from)
                }
                // Push or first show: nothing left the container.
                _ => Vec::new(),
            }
        }
    }
}

fn gesture_dismissal<D, P>(nav: &mut Navigator<D, P>, container: ContainerId) -> Vec<Mutation<D>>
where
    D: Clone + PartialEq + Debug,
    P: ContainerPlatform,
{
    let Some(index) = nav.stack.index_of(container) else {
        debug!("Dismissal of inactive container {} ignored", container);
        return Vec::new();
    };
    let closed = nav.stack.forget_from(index);
    if closed.is_empty() {
        return Vec::new();
    }
    let routes = closed.iter().map(|c| nav.registry.count_in(*c)).sum();
    for closed_container in &closed {
        nav.reconciler.forget(*closed_container);
    }

    let removed: Vec<D> = nav
        .registry
        .truncate_tail(routes)
        .into_iter()
        .map(|entry| entry.destination)
        .collect();
    info!(
        "Gesture dismissed {} ({} containers, {} routes)",
        container,
        closed.len(),
        removed.len()
    );

    vec![
        Mutation::ContainersClosed { containers: closed },
        Mutation::Reconciled {
            cause: ReconcileCause::GestureDismissal { container },
            removed,
        },
    ]
}

fn gesture_pop<D, P>(
    nav: &mut Navigator<D, P>,
    container: ContainerId,
    from: ScreenHandle,
) -> Vec<Mutation<D>>
where
    D: Clone + PartialEq + Debug,
    P: ContainerPlatform,
{
    if nav.stack.index_of(container).is_none() {
        return Vec::new();
    }
    let expected = nav.registry.count_in(container);
    let actual = nav.stack.depth(container);
    if actual >= expected {
        // Already accounted for by the command that caused it.
        return Vec::new();
    }

    // A push may have landed on top before this event was pumped, so the
    // departed screen's own entry is not necessarily the last one.
    let removed = match nav.registry.position_of(container, from) {
        Some(index) => nav.registry.remove(index),
        None => nav.registry.remove_last_in(container),
    };
    match removed {
        Some(entry) => {
            info!("Gesture pop in {}: dropped {:?}", container, entry.destination);
            vec![Mutation::Reconciled {
                cause: ReconcileCause::GesturePop { container },
                removed: vec![entry.destination],
            }]
        }
        None => Vec::new(),
    }
}
