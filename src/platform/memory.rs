//! # In-Memory Platform
//!
//! A deterministic stand-in for a real windowing toolkit. It keeps every
//! container's screen stack in memory, links presenters to presented
//! containers, and queues the same notifications a real platform would
//! deliver: did-show after every settled transition, presentation completion,
//! and gesture dismissal.
//!
//! Two gestures the navigator never initiates are available for simulation:
//!
//! - [`swipe_back`](InMemoryPlatform::swipe_back): interactive pop inside a container
//! - [`swipe_dismiss`](InMemoryPlatform::swipe_dismiss): pull a presented sheet away
//!
//! Animated presentations hold their completion until
//! [`finish_animations`](InMemoryPlatform::finish_animations), which makes the
//! window between `present` and completion observable in tests.

use std::collections::{HashMap, VecDeque};

use log::{debug, warn};

use crate::core::platform::{
    ContainerId, ContainerPlatform, PlatformEvent, PresentationStyle, ScreenHandle,
};

#[derive(Debug)]
struct Slot {
    screens: Vec<ScreenHandle>,
    style: PresentationStyle,
    presenting: Option<ContainerId>,
    presented: Option<ContainerId>,
    status_bar_hidden: bool,
}

impl Slot {
    fn new(screens: Vec<ScreenHandle>, style: PresentationStyle) -> Self {
        Self {
            screens,
            style,
            presenting: None,
            presented: None,
            status_bar_hidden: false,
        }
    }
}

#[derive(Debug, Default)]
pub struct InMemoryPlatform {
    slots: HashMap<ContainerId, Slot>,
    labels: HashMap<ScreenHandle, String>,
    events: VecDeque<PlatformEvent>,
    /// Completions waiting for `finish_animations`.
    pending: Vec<PlatformEvent>,
    next_container: u64,
    next_screen: u64,
}

impl InMemoryPlatform {
    pub fn new() -> Self {
        Self::default()
    }

    /// Label a hosted screen was created from.
    pub fn label(&self, screen: ScreenHandle) -> Option<&str> {
        self.labels.get(&screen).map(String::as_str)
    }

    pub fn style(&self, container: ContainerId) -> Option<PresentationStyle> {
        self.slots.get(&container).map(|slot| slot.style)
    }

    pub fn is_status_bar_hidden(&self, container: ContainerId) -> bool {
        self.slots
            .get(&container)
            .is_some_and(|slot| slot.status_bar_hidden)
    }

    /// Number of containers the platform still holds.
    pub fn live_containers(&self) -> usize {
        self.slots.len()
    }

    /// Events queued and not yet polled.
    pub fn queued_events(&self) -> usize {
        self.events.len()
    }

    /// Releases every held presentation completion into the event queue.
    pub fn finish_animations(&mut self) -> usize {
        let count = self.pending.len();
        self.events.extend(self.pending.drain(..));
        count
    }

    /// Simulates an interactive back gesture. Returns false when the
    /// container has nothing to pop.
    pub fn swipe_back(&mut self, container: ContainerId) -> bool {
        let Some(slot) = self.slots.get_mut(&container) else {
            return false;
        };
        if slot.screens.len() <= 1 {
            return false;
        }
        let from = slot.screens.pop();
        let to = slot.screens[slot.screens.len() - 1];
        debug!("Gesture pop in {}: {:?} -> {}", container, from, to);
        self.events.push_back(PlatformEvent::DidShow {
            container,
            from,
            to,
        });
        true
    }

    /// Simulates the user pulling a presented container away. Full-screen
    /// presentations and containers that are not presented refuse.
    pub fn swipe_dismiss(&mut self, container: ContainerId) -> bool {
        let Some(slot) = self.slots.get(&container) else {
            return false;
        };
        if slot.presenting.is_none() || slot.style == PresentationStyle::FullScreen {
            return false;
        }
        debug!("Gesture dismissal of {}", container);
        self.detach_chain(container);
        self.events
            .push_back(PlatformEvent::PresentationDismissed { container });
        true
    }

    fn queue_did_show(&mut self, container: ContainerId, from: Option<ScreenHandle>) {
        let to = self
            .slots
            .get(&container)
            .and_then(|slot| slot.screens.last().copied());
        if let Some(to) = to
            && from != Some(to)
        {
            self.events.push_back(PlatformEvent::DidShow {
                container,
                from,
                to,
            });
        }
    }

    fn top_of(&self, container: ContainerId) -> Option<ScreenHandle> {
        self.slots
            .get(&container)
            .and_then(|slot| slot.screens.last().copied())
    }

    /// Unlinks `container` from its presenter, along with everything it
    /// presents. Screens stay in place, like a dismissed view hierarchy.
    fn detach_chain(&mut self, container: ContainerId) {
        if let Some(presenter) = self
            .slots
            .get_mut(&container)
            .and_then(|slot| slot.presenting.take())
            && let Some(parent) = self.slots.get_mut(&presenter)
        {
            parent.presented = None;
        }

        let mut next = Some(container);
        while let Some(current) = next {
            next = self
                .slots
                .get_mut(&current)
                .and_then(|slot| slot.presented.take());
            if let Some(child) = next
                && let Some(slot) = self.slots.get_mut(&child)
            {
                slot.presenting = None;
            }
        }
    }
}

impl ContainerPlatform for InMemoryPlatform {
    type Screen = String;

    fn host(&mut self, screen: String) -> ScreenHandle {
        self.next_screen += 1;
        let handle = ScreenHandle(self.next_screen);
        self.labels.insert(handle, screen);
        handle
    }

    fn create_container(
        &mut self,
        screens: Vec<ScreenHandle>,
        style: PresentationStyle,
    ) -> ContainerId {
        let id = ContainerId(self.next_container);
        self.next_container += 1;
        self.slots.insert(id, Slot::new(screens, style));
        id
    }

    fn screens(&self, container: ContainerId) -> &[ScreenHandle] {
        self.slots
            .get(&container)
            .map(|slot| slot.screens.as_slice())
            .unwrap_or(&[])
    }

    fn push(&mut self, container: ContainerId, screen: ScreenHandle, _animated: bool) {
        let from = self.top_of(container);
        match self.slots.get_mut(&container) {
            Some(slot) => slot.screens.push(screen),
            None => {
                warn!("Push into unknown container {}", container);
                return;
            }
        }
        self.queue_did_show(container, from);
    }

    fn pop(&mut self, container: ContainerId, _animated: bool) -> usize {
        let Some(slot) = self.slots.get_mut(&container) else {
            return 0;
        };
        if slot.screens.len() <= 1 {
            return 0;
        }
        let from = slot.screens.pop();
        self.queue_did_show(container, from);
        1
    }

    fn set_screens(&mut self, container: ContainerId, screens: Vec<ScreenHandle>, _animated: bool) {
        let from = self.top_of(container);
        if let Some(slot) = self.slots.get_mut(&container) {
            slot.screens = screens;
        }
        self.queue_did_show(container, from);
    }

    fn pop_to_screen(
        &mut self,
        container: ContainerId,
        screen: ScreenHandle,
        _animated: bool,
    ) -> usize {
        let Some(slot) = self.slots.get_mut(&container) else {
            return 0;
        };
        let Some(index) = slot.screens.iter().position(|s| *s == screen) else {
            return 0;
        };
        let from = slot.screens.last().copied();
        let removed = slot.screens.split_off(index + 1).len();
        if removed > 0 {
            self.queue_did_show(container, from);
        }
        removed
    }

    fn pop_to_root_screen(&mut self, container: ContainerId, animated: bool) -> usize {
        match self.screens(container).first().copied() {
            Some(first) => self.pop_to_screen(container, first, animated),
            None => 0,
        }
    }

    fn present(&mut self, presenter: ContainerId, presented: ContainerId, animated: bool) {
        let busy = self
            .slots
            .get(&presenter)
            .is_none_or(|slot| slot.presented.is_some());
        if busy || !self.slots.contains_key(&presented) {
            warn!("Refusing to present {} over {}", presented, presenter);
            return;
        }
        if let Some(slot) = self.slots.get_mut(&presenter) {
            slot.presented = Some(presented);
        }
        if let Some(slot) = self.slots.get_mut(&presented) {
            slot.presenting = Some(presenter);
        }

        let completion = PlatformEvent::PresentationCompleted {
            container: presented,
        };
        if animated {
            self.pending.push(completion);
        } else {
            self.events.push_back(completion);
        }
    }

    fn dismiss(&mut self, container: ContainerId, _animated: bool) {
        let Some((presented, presenting)) = self
            .slots
            .get(&container)
            .map(|slot| (slot.presented, slot.presenting))
        else {
            return;
        };
        match (presented, presenting) {
            (Some(presented), _) => self.detach_chain(presented),
            (None, Some(_)) => self.detach_chain(container),
            (None, None) => {}
        }
    }

    fn presented_over(&self, container: ContainerId) -> Option<ContainerId> {
        self.slots.get(&container).and_then(|slot| slot.presented)
    }

    fn is_presented(&self, container: ContainerId) -> bool {
        self.slots
            .get(&container)
            .is_some_and(|slot| slot.presenting.is_some())
    }

    fn release(&mut self, container: ContainerId) {
        if let Some(slot) = self.slots.remove(&container) {
            for screen in slot.screens {
                self.labels.remove(&screen);
            }
        }
        self.pending.retain(|event| {
            !matches!(event, PlatformEvent::PresentationCompleted { container: c } if *c == container)
        });
    }

    fn poll_event(&mut self) -> Option<PlatformEvent> {
        self.events.pop_front()
    }

    fn set_status_bar_hidden(&mut self, container: ContainerId, hidden: bool) {
        if let Some(slot) = self.slots.get_mut(&container) {
            slot.status_bar_hidden = hidden;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn drain(platform: &mut InMemoryPlatform) -> Vec<PlatformEvent> {
        std::iter::from_fn(|| platform.poll_event()).collect()
    }

    fn root_with(platform: &mut InMemoryPlatform, labels: &[&str]) -> ContainerId {
        let root = platform.create_container(Vec::new(), PresentationStyle::Automatic);
        for label in labels {
            let screen = platform.host(label.to_string());
            platform.push(root, screen, false);
        }
        drain(platform);
        root
    }

    #[test]
    fn test_push_queues_did_show_with_previous_top() {
        let mut platform = InMemoryPlatform::new();
        let root = root_with(&mut platform, &["home"]);
        let home = platform.screens(root)[0];
        let next = platform.host("library".to_string());
        platform.push(root, next, true);

        assert_eq!(
            drain(&mut platform),
            vec![PlatformEvent::DidShow {
                container: root,
                from: Some(home),
                to: next,
            }]
        );
    }

    #[test]
    fn test_pop_keeps_first_screen() {
        let mut platform = InMemoryPlatform::new();
        let root = root_with(&mut platform, &["home", "library"]);
        assert_eq!(platform.pop(root, false), 1);
        assert_eq!(platform.pop(root, false), 0);
        assert_eq!(platform.screens(root).len(), 1);
    }

    #[test]
    fn test_pop_to_screen_counts_removed() {
        let mut platform = InMemoryPlatform::new();
        let root = root_with(&mut platform, &["a", "b", "c", "d"]);
        let b = platform.screens(root)[1];
        assert_eq!(platform.pop_to_screen(root, b, false), 2);
        assert_eq!(platform.pop_to_screen(root, b, false), 0);
        assert_eq!(platform.pop_to_screen(root, ScreenHandle(999), false), 0);
        assert_eq!(platform.pop_to_root_screen(root, false), 1);
    }

    #[test]
    fn test_animated_present_holds_completion() {
        let mut platform = InMemoryPlatform::new();
        let root = root_with(&mut platform, &["home"]);
        let screen = platform.host("sheet".to_string());
        let sheet = platform.create_container(vec![screen], PresentationStyle::Automatic);
        platform.present(root, sheet, true);

        assert!(drain(&mut platform).is_empty());
        assert_eq!(platform.finish_animations(), 1);
        assert_eq!(
            drain(&mut platform),
            vec![PlatformEvent::PresentationCompleted { container: sheet }]
        );
    }

    #[test]
    fn test_dismiss_closes_presented_chain() {
        let mut platform = InMemoryPlatform::new();
        let root = root_with(&mut platform, &["home"]);
        let mut previous = root;
        let mut chain = Vec::new();
        for label in ["a", "b", "c"] {
            let screen = platform.host(label.to_string());
            let sheet = platform.create_container(vec![screen], PresentationStyle::Automatic);
            platform.present(previous, sheet, false);
            chain.push(sheet);
            previous = sheet;
        }

        platform.dismiss(root, false);
        assert_eq!(platform.presented_over(root), None);
        for sheet in chain {
            assert!(!platform.is_presented(sheet));
            assert_eq!(platform.presented_over(sheet), None);
        }
    }

    #[test]
    fn test_dismiss_without_presentation_dismisses_self() {
        let mut platform = InMemoryPlatform::new();
        let root = root_with(&mut platform, &["home"]);
        let screen = platform.host("sheet".to_string());
        let sheet = platform.create_container(vec![screen], PresentationStyle::Automatic);
        platform.present(root, sheet, false);

        platform.dismiss(sheet, false);
        assert!(!platform.is_presented(sheet));
        // Programmatic dismissal is not reported as a gesture.
        assert!(
            !drain(&mut platform)
                .iter()
                .any(|e| matches!(e, PlatformEvent::PresentationDismissed { .. }))
        );
    }

    #[test]
    fn test_swipe_gestures() {
        let mut platform = InMemoryPlatform::new();
        let root = root_with(&mut platform, &["home"]);
        assert!(!platform.swipe_back(root));
        assert!(!platform.swipe_dismiss(root));

        let screen = platform.host("cover".to_string());
        let cover = platform.create_container(vec![screen], PresentationStyle::FullScreen);
        platform.present(root, cover, false);
        assert!(!platform.swipe_dismiss(cover));

        let sheet_screen = platform.host("sheet".to_string());
        let sheet = platform.create_container(vec![sheet_screen], PresentationStyle::Automatic);
        platform.present(cover, sheet, false);
        drain(&mut platform);

        assert!(platform.swipe_dismiss(sheet));
        assert_eq!(
            drain(&mut platform),
            vec![PlatformEvent::PresentationDismissed { container: sheet }]
        );
        assert_eq!(platform.presented_over(cover), None);
    }

    #[test]
    fn test_release_forgets_labels() {
        let mut platform = InMemoryPlatform::new();
        let root = root_with(&mut platform, &["home"]);
        let home = platform.screens(root)[0];
        assert_eq!(platform.label(home), Some("home"));
        platform.release(root);
        assert_eq!(platform.label(home), None);
        assert_eq!(platform.live_containers(), 0);
    }
}
