//! # Platform Capability
//!
//! The navigator never touches real windows or view controllers. Everything
//! physical goes through [`ContainerPlatform`]: hosting a rendered screen,
//! creating containers, pushing and popping screens, presenting one container
//! over another and dismissing it again.
//!
//! ```text
//!   Navigator ──commands──▶ ContainerPlatform
//!       ▲                         │
//!       └──── PlatformEvent ◀─────┘   (did-show, gesture dismissal,
//!                                       presentation completed)
//! ```
//!
//! Pop-like primitives report how many screens were *actually* removed. The
//! platform may refuse (a container never pops its own first screen), and the
//! navigator always trusts that count over its own arithmetic.

use std::fmt;

/// Identifies a container (one push-stack of screens) owned by the platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ContainerId(pub u64);

impl fmt::Display for ContainerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "c{}", self.0)
    }
}

/// Identifies a hosted screen inside some container.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ScreenHandle(pub u64);

impl fmt::Display for ScreenHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "s{}", self.0)
    }
}

/// How a presented container covers the one below it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PresentationStyle {
    /// Platform default. Usually a sheet the user can swipe away.
    #[default]
    Automatic,
    /// Covers the whole window; no dismissal gesture.
    FullScreen,
}

impl PresentationStyle {
    pub fn from_full_screen(full_screen: bool) -> Self {
        if full_screen {
            PresentationStyle::FullScreen
        } else {
            PresentationStyle::Automatic
        }
    }
}

/// Out-of-band notifications delivered by the platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlatformEvent {
    /// A container finished a transition and now shows `to`.
    /// `from` is the screen that was on top before the transition, if any.
    DidShow {
        container: ContainerId,
        from: Option<ScreenHandle>,
        to: ScreenHandle,
    },
    /// The user dismissed a presented container without the navigator asking.
    /// Everything that container presented went away with it.
    PresentationDismissed { container: ContainerId },
    /// A `present` call finished animating in.
    PresentationCompleted { container: ContainerId },
}

/// Container primitives the navigator depends on.
///
/// Implementations are expected to service one call at a time on the UI
/// thread and to queue [`PlatformEvent`]s for [`poll_event`](Self::poll_event)
/// instead of calling back into the navigator.
pub trait ContainerPlatform {
    /// Whatever the destination mapper produces (a view, a widget, a label).
    type Screen;

    /// Wraps a rendered screen so it can live inside a container.
    fn host(&mut self, screen: Self::Screen) -> ScreenHandle;

    /// Creates a detached container holding `screens`.
    fn create_container(
        &mut self,
        screens: Vec<ScreenHandle>,
        style: PresentationStyle,
    ) -> ContainerId;

    /// Current physical stack of a container, bottom first. Unknown
    /// containers report an empty stack.
    fn screens(&self, container: ContainerId) -> &[ScreenHandle];

    fn push(&mut self, container: ContainerId, screen: ScreenHandle, animated: bool);

    /// Pops the top screen. Returns how many screens were removed (0 or 1).
    fn pop(&mut self, container: ContainerId, animated: bool) -> usize;

    fn set_screens(&mut self, container: ContainerId, screens: Vec<ScreenHandle>, animated: bool);

    /// Pops everything above `screen`. Returns how many screens were removed.
    fn pop_to_screen(&mut self, container: ContainerId, screen: ScreenHandle, animated: bool)
    -> usize;

    /// Pops everything above the container's first screen.
    fn pop_to_root_screen(&mut self, container: ContainerId, animated: bool) -> usize;

    /// Presents `presented` over `presenter`. Completion is reported later as
    /// [`PlatformEvent::PresentationCompleted`].
    fn present(&mut self, presenter: ContainerId, presented: ContainerId, animated: bool);

    /// Dismisses whatever `container` presents. When nothing is presented over
    /// it and it is itself presented, dismisses `container`.
    fn dismiss(&mut self, container: ContainerId, animated: bool);

    /// The container presented directly over `container`, if any.
    fn presented_over(&self, container: ContainerId) -> Option<ContainerId>;

    /// True when `container` is currently presented by another container.
    fn is_presented(&self, container: ContainerId) -> bool;

    /// The navigator no longer tracks `container`; the platform may free it.
    fn release(&mut self, container: ContainerId);

    /// Next queued out-of-band notification.
    fn poll_event(&mut self) -> Option<PlatformEvent>;

    /// Status bar preference for a container. Platforms without a status bar
    /// ignore it.
    fn set_status_bar_hidden(&mut self, _container: ContainerId, _hidden: bool) {}
}
