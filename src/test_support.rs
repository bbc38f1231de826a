//! Test utilities shared across the crate.
//!
//! This module is only compiled during tests (`#[cfg(test)]`).

use crate::core::navigator::Navigator;
use crate::platform::InMemoryPlatform;

/// Destinations of a small reading app, enough to build every hierarchy the
/// tests need.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppDestination {
    Onboarding,
    Calibration,
    PostCalibration,
    Home,
    Library,
    Messaging,
    Configuration,
    MessageReorder,
}

/// A navigator over the in-memory platform whose screens are labelled with
/// the destination name.
pub fn test_navigator() -> Navigator<AppDestination, InMemoryPlatform> {
    Navigator::new(InMemoryPlatform::new(), |destination: &AppDestination| {
        format!("{destination:?}")
    })
}

/// Asserts the central invariant: one route per physical screen.
pub fn assert_in_sync(nav: &Navigator<AppDestination, InMemoryPlatform>) {
    let physical: usize = nav.container_depths().iter().sum();
    assert_eq!(
        nav.route_count(),
        physical,
        "routes {:?} out of sync with container depths {:?}",
        nav.routes(),
        nav.container_depths()
    );
}
