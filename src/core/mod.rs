//! # Core Navigation Logic
//!
//! This module contains the navigation-stack coordinator.
//! It knows nothing about any specific UI technology.
//!
//! ```text
//!                    ┌─────────────────────────┐
//!                    │         CORE            │
//!                    │  (this module)          │
//!                    │                         │
//!                    │  • Navigator (facade)   │
//!                    │  • Command (input)      │
//!                    │  • update() (reducer)   │
//!                    │  • Registry / Stack     │
//!                    │  • Reconciler           │
//!                    └───────────┬─────────────┘
//!                                │ ContainerPlatform
//!            ┌───────────────────┼───────────────────┐
//!            ▼                   ▼                   ▼
//!     ┌────────────┐      ┌────────────┐      ┌────────────┐
//!     │ In-memory  │      │   Native   │      │    Web     │
//!     │  platform  │      │  toolkit   │      │  (future)  │
//!     │ (tests,TUI)│      │  (future)  │      │            │
//!     └────────────┘      └────────────┘      └────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`platform`]: the `ContainerPlatform` capability and its id types
//! - [`registry`]: `RouteEntry` records, the route list projection
//! - [`containers`]: `ContainerStack`, the ordered list of active containers
//! - [`navigator`]: the `Navigator` facade
//! - [`action`]: `Command`, `Mutation` and `update()`
//! - [`reconcile`]: folds platform-originated changes back in
//! - [`publisher`]: route change notifications
//! - [`config`]: playground settings

pub mod action;
pub mod config;
pub mod containers;
pub mod navigator;
pub mod platform;
pub mod publisher;
pub mod reconcile;
pub mod registry;

pub use action::{Command, Mutation, ReconcileCause};
pub use navigator::Navigator;
pub use platform::{ContainerId, ContainerPlatform, PlatformEvent, PresentationStyle, ScreenHandle};
pub use registry::RouteEntry;
