//! # Container Stack Manager
//!
//! Owns the platform and the ordered list of active containers:
//!
//! ```text
//! containers[0]  root (permanent, never presented)
//! containers[1]  presented over containers[0]
//! containers[2]  presented over containers[1]
//! ...
//! ```
//!
//! Pop-like primitives return the number of screens the platform removed.
//! Closing primitives return the closed container ids; the navigator drops
//! their entries from the registry, which may still hold screens a gesture
//! removed but the platform has not reported yet.

use log::debug;

use crate::core::platform::{ContainerId, ContainerPlatform, PresentationStyle, ScreenHandle};

/// The container list is never empty: index 0 is the root, created in
/// [`new`](Self::new) and kept by every closing primitive (`reset_root`
/// splits at 1, `close_above` above an existing index, `forget_from` refuses
/// index 0).
pub struct ContainerStack<P: ContainerPlatform> {
    platform: P,
    containers: Vec<ContainerId>,
}

impl<P: ContainerPlatform> ContainerStack<P> {
    /// Creates the permanent, empty root container.
    pub fn new(mut platform: P) -> Self {
        let root = platform.create_container(Vec::new(), PresentationStyle::Automatic);
        debug!("Root container created: {}", root);
        Self {
            platform,
            containers: vec![root],
        }
    }

    pub fn platform(&self) -> &P {
        &self.platform
    }

    pub fn platform_mut(&mut self) -> &mut P {
        &mut self.platform
    }

    pub fn ids(&self) -> &[ContainerId] {
        &self.containers
    }

    pub fn len(&self) -> usize {
        self.containers.len()
    }

    pub fn root(&self) -> ContainerId {
        self.containers[0]
    }

    pub fn top(&self) -> ContainerId {
        self.containers[self.containers.len() - 1]
    }

    pub fn index_of(&self, container: ContainerId) -> Option<usize> {
        self.containers.iter().position(|c| *c == container)
    }

    pub fn screens(&self, container: ContainerId) -> &[ScreenHandle] {
        self.platform.screens(container)
    }

    pub fn depth(&self, container: ContainerId) -> usize {
        self.platform.screens(container).len()
    }

    pub fn depths(&self) -> Vec<usize> {
        self.containers.iter().map(|c| self.depth(*c)).collect()
    }

    pub fn total_screens(&self) -> usize {
        self.containers.iter().map(|c| self.depth(*c)).sum()
    }

    pub fn contains_screen(&self, container: ContainerId, screen: ScreenHandle) -> bool {
        self.platform.screens(container).contains(&screen)
    }

    /// True when the topmost container is presented and nothing sits above it.
    pub fn is_top_presented(&self) -> bool {
        let top = self.top();
        self.containers.len() > 1
            && self.platform.is_presented(top)
            && self.platform.presented_over(top).is_none()
    }

    /// First active container (from the root) with something presented over it.
    pub fn first_presenting(&self) -> Option<usize> {
        self.containers
            .iter()
            .position(|c| self.platform.presented_over(*c).is_some())
    }

    pub fn host(&mut self, screen: P::Screen) -> ScreenHandle {
        self.platform.host(screen)
    }

    /// Pushes onto the topmost container and returns it.
    pub fn push(&mut self, screen: ScreenHandle, animated: bool) -> ContainerId {
        let top = self.top();
        self.platform.push(top, screen, animated);
        top
    }

    pub fn pop_top(&mut self, animated: bool) -> usize {
        let top = self.top();
        self.platform.pop(top, animated)
    }

    pub fn pop_top_to_root(&mut self, animated: bool) -> usize {
        let top = self.top();
        self.platform.pop_to_root_screen(top, animated)
    }

    pub fn pop_to_screen(&mut self, index: usize, screen: ScreenHandle, animated: bool) -> usize {
        match self.containers.get(index) {
            Some(container) => self.platform.pop_to_screen(*container, screen, animated),
            None => 0,
        }
    }

    /// Wraps `screen` in a new container and presents it over the topmost one.
    pub fn present(
        &mut self,
        screen: ScreenHandle,
        style: PresentationStyle,
        animated: bool,
    ) -> ContainerId {
        let presenter = self.top();
        let container = self.platform.create_container(vec![screen], style);
        self.platform.present(presenter, container, animated);
        self.containers.push(container);
        debug!("Presented {} over {} ({:?})", container, presenter, style);
        container
    }

    /// Drops every presented container and rebuilds the root's stack.
    /// Returns the ids of the containers that were closed.
    pub fn reset_root(&mut self, screens: Vec<ScreenHandle>, animated: bool) -> Vec<ContainerId> {
        let closed = self.containers.split_off(1);
        let root = self.root();
        self.platform.set_screens(root, screens, animated);
        self.platform.dismiss(root, animated);
        for container in &closed {
            self.platform.release(*container);
        }
        closed
    }

    /// Dismisses the topmost container and returns it, or `None` when the top
    /// is not a dismissable presentation.
    pub fn dismiss_top(&mut self, animated: bool) -> Option<ContainerId> {
        if !self.is_top_presented() {
            return None;
        }
        let top = self.top();
        self.platform.dismiss(top, animated);
        self.containers.pop();
        self.platform.release(top);
        Some(top)
    }

    /// Closes every container above `index` and dismisses whatever the
    /// container at `index` presents. Returns the closed containers.
    pub fn close_above(&mut self, index: usize, animated: bool) -> Vec<ContainerId> {
        let Some(&owner) = self.containers.get(index) else {
            return Vec::new();
        };
        let closed = self.containers.split_off(index + 1);
        if self.platform.presented_over(owner).is_some() {
            self.platform.dismiss(owner, animated);
        }
        for container in &closed {
            self.platform.release(*container);
        }
        closed
    }

    /// Forgets containers the platform already dismissed on its own, from
    /// `index` upward.
    pub fn forget_from(&mut self, index: usize) -> Vec<ContainerId> {
        if index == 0 || index >= self.containers.len() {
            return Vec::new();
        }
        let closed = self.containers.split_off(index);
        for container in &closed {
            self.platform.release(*container);
        }
        closed
    }

    pub fn set_status_bar_hidden(&mut self, hidden: bool) {
        let top = self.top();
        self.platform.set_status_bar_hidden(top, hidden);
    }
}
