//! # Navigator
//!
//! Public entry point. Owns the container stack, the route entry registry and
//! the reconciliation listener, and keeps them in lockstep:
//!
//! ```text
//! Navigator<D, P>
//! ├── stack: ContainerStack<P>     // active containers + the platform
//! ├── registry: Registry<D>        // live entries, route list projection
//! ├── reconciler: Reconciler       // which containers are observed
//! ├── mapper: Fn(&D) -> P::Screen  // renders a destination
//! └── publisher: RoutesPublisher   // route change notifications
//! ```
//!
//! Every operation is a [`Command`] applied through [`update`]. The convenience
//! methods (`push`, `pop_to`, ...) only build the command.
//!
//! Invalid requests (pop at the root, dismiss with nothing presented, pop to a
//! destination that is not on the stack) are silent no-ops.

use std::fmt::Debug;

use log::debug;

use crate::core::action::{Command, Mutation, update};
use crate::core::containers::ContainerStack;
use crate::core::platform::{ContainerId, ContainerPlatform, PresentationStyle, ScreenHandle};
use crate::core::publisher::{RoutesPublisher, RoutesReceiver};
use crate::core::reconcile::Reconciler;
use crate::core::registry::{Registry, RouteEntry};

type Mapper<D, S> = Box<dyn Fn(&D) -> S>;

pub struct Navigator<D, P: ContainerPlatform> {
    pub(crate) stack: ContainerStack<P>,
    pub(crate) registry: Registry<D>,
    pub(crate) reconciler: Reconciler,
    mapper: Mapper<D, P::Screen>,
    publisher: RoutesPublisher<D>,
}

impl<D, P> Navigator<D, P>
where
    D: Clone + PartialEq + Debug,
    P: ContainerPlatform,
{
    /// Creates a navigator with an empty root container and no routes.
    pub fn new(platform: P, mapper: impl Fn(&D) -> P::Screen + 'static) -> Self {
        let stack = ContainerStack::new(platform);
        let reconciler = Reconciler::new(stack.root());
        Self {
            stack,
            registry: Registry::new(),
            reconciler,
            mapper: Box::new(mapper),
            publisher: RoutesPublisher::new(),
        }
    }

    /// Applies a command and notifies subscribers if the route list changed.
    pub fn apply(&mut self, command: Command<D>) -> Vec<Mutation<D>> {
        debug!("Applying {:?}", command);
        let mutations = update(self, command);
        if mutations.iter().any(Mutation::changes_routes) {
            let routes = self.routes();
            debug!("Current route: {:?}", routes);
            self.publisher.publish(&routes);
        }
        mutations
    }

    /// Feeds every queued platform notification through the reconciliation
    /// listener. Returns the combined mutations.
    pub fn pump_platform_events(&mut self) -> Vec<Mutation<D>> {
        let mut mutations = Vec::new();
        while let Some(event) = self.stack.platform_mut().poll_event() {
            mutations.extend(self.apply(Command::Platform(event)));
        }
        mutations
    }

    pub(crate) fn render(&mut self, destination: &D) -> ScreenHandle {
        let screen = (self.mapper)(destination);
        self.stack.host(screen)
    }

    // ------------------------------------------------------------------------
    // Operations
    // ------------------------------------------------------------------------

    /// Resets everything to a single root entry.
    pub fn start(&mut self, destination: D) {
        self.apply(Command::Start(destination));
    }

    pub fn push(&mut self, destination: D, animated: bool) {
        self.apply(Command::Push {
            destination,
            animated,
        });
    }

    /// Presents `destination` as the only screen of a new container on top.
    pub fn present(&mut self, destination: D, style: PresentationStyle, animated: bool) {
        self.apply(Command::Present {
            destination,
            style,
            animated,
        });
    }

    /// Rebuilds the root container from `destinations` and drops every
    /// presentation. Empty input is ignored.
    pub fn replace_stack(&mut self, destinations: Vec<D>, animated: bool) {
        self.apply(Command::ReplaceStack {
            destinations,
            animated,
        });
    }

    /// Dismisses the topmost container if it is presented and nothing is
    /// presented over it.
    pub fn dismiss(&mut self, animated: bool) {
        self.apply(Command::Dismiss { animated });
    }

    /// Collapses the modal chain back to the container that started it.
    pub fn dismiss_all(&mut self, animated: bool) {
        self.apply(Command::DismissAll { animated });
    }

    /// Pops one screen off the topmost container. Never closes a container.
    pub fn pop(&mut self, animated: bool) {
        self.apply(Command::Pop { animated });
    }

    /// Back button: pop within the top container, or dismiss it when it is
    /// down to one screen.
    pub fn pop_or_dismiss(&mut self, animated: bool) {
        self.apply(Command::PopOrDismiss { animated });
    }

    pub fn pop_to_root(&mut self, animated: bool) {
        self.apply(Command::PopToRoot { animated });
    }

    /// Pops the topmost container to its own first screen.
    pub fn pop_to_root_in_current_nav(&mut self, animated: bool) {
        self.apply(Command::PopToRootInCurrentNav { animated });
    }

    /// Collapses to the most recent live occurrence of `destination`.
    pub fn pop_to(&mut self, destination: D, animated: bool) {
        self.apply(Command::PopTo {
            destination,
            animated,
        });
    }

    pub fn set_status_bar_hidden(&mut self, hidden: bool) {
        self.apply(Command::SetStatusBarHidden(hidden));
    }

    // ------------------------------------------------------------------------
    // Queries
    // ------------------------------------------------------------------------

    /// The logical route list.
    pub fn routes(&self) -> Vec<D> {
        self.registry.routes()
    }

    pub fn route_count(&self) -> usize {
        self.registry.len()
    }

    pub fn entries(&self) -> &[RouteEntry<D>] {
        self.registry.entries()
    }

    /// Active containers, root first.
    pub fn containers(&self) -> &[ContainerId] {
        self.stack.ids()
    }

    /// Physical screen count of every active container, root first.
    pub fn container_depths(&self) -> Vec<usize> {
        self.stack.depths()
    }

    /// The permanent root container, for embedding into a host view.
    pub fn root_container(&self) -> ContainerId {
        self.stack.root()
    }

    pub fn top_container(&self) -> ContainerId {
        self.stack.top()
    }

    /// True when the topmost container is a live presentation with nothing
    /// presented over it.
    pub fn is_top_presented(&self) -> bool {
        self.stack.is_top_presented()
    }

    pub fn reconciler(&self) -> &Reconciler {
        &self.reconciler
    }

    pub fn platform(&self) -> &P {
        self.stack.platform()
    }

    /// Direct platform access, e.g. to simulate gestures. Follow with
    /// [`pump_platform_events`](Self::pump_platform_events).
    pub fn platform_mut(&mut self) -> &mut P {
        self.stack.platform_mut()
    }

    /// Subscribes to route list changes. Drop the receiver to unsubscribe.
    pub fn subscribe(&mut self) -> RoutesReceiver<D> {
        self.publisher.subscribe()
    }
}
