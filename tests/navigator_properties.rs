//! Randomized command sequences mixed with gestures, animation completions
//! and event pumps. Once everything settles, the route list must account for
//! exactly the screens on the platform.
//!
//! Back gestures are only issued on containers that are already observed: a
//! swipe inside a presentation that has not completed yet is not reconciled.

use navkit::core::{Command, ContainerPlatform, Navigator, PresentationStyle};
use navkit::platform::InMemoryPlatform;
use proptest::prelude::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Screen {
    Home,
    Library,
    Messaging,
    Configuration,
}

#[derive(Debug, Clone)]
enum Step {
    Command(Command<Screen>),
    SwipeBack,
    SwipeDismiss,
    FinishAnimations,
    Pump,
}

fn screen() -> impl Strategy<Value = Screen> {
    prop_oneof![
        Just(Screen::Home),
        Just(Screen::Library),
        Just(Screen::Messaging),
        Just(Screen::Configuration),
    ]
}

fn command() -> impl Strategy<Value = Command<Screen>> {
    prop_oneof![
        3 => (screen(), any::<bool>())
            .prop_map(|(destination, animated)| Command::Push { destination, animated }),
        2 => (screen(), any::<bool>(), any::<bool>()).prop_map(|(destination, full_screen, animated)| {
            Command::Present {
                destination,
                style: PresentationStyle::from_full_screen(full_screen),
                animated,
            }
        }),
        1 => (prop::collection::vec(screen(), 0..4), any::<bool>())
            .prop_map(|(destinations, animated)| Command::ReplaceStack { destinations, animated }),
        1 => any::<bool>().prop_map(|animated| Command::Dismiss { animated }),
        1 => any::<bool>().prop_map(|animated| Command::DismissAll { animated }),
        2 => any::<bool>().prop_map(|animated| Command::Pop { animated }),
        1 => any::<bool>().prop_map(|animated| Command::PopOrDismiss { animated }),
        1 => any::<bool>().prop_map(|animated| Command::PopToRoot { animated }),
        1 => any::<bool>().prop_map(|animated| Command::PopToRootInCurrentNav { animated }),
        2 => (screen(), any::<bool>())
            .prop_map(|(destination, animated)| Command::PopTo { destination, animated }),
    ]
}

fn step() -> impl Strategy<Value = Step> {
    prop_oneof![
        6 => command().prop_map(Step::Command),
        3 => Just(Step::SwipeBack),
        1 => Just(Step::SwipeDismiss),
        2 => Just(Step::FinishAnimations),
        2 => Just(Step::Pump),
    ]
}

fn run(nav: &mut Navigator<Screen, InMemoryPlatform>, step: Step) {
    match step {
        Step::Command(command) => {
            nav.apply(command);
        }
        Step::SwipeBack => {
            let top = nav.top_container();
            if nav.reconciler().is_observed(top) {
                nav.platform_mut().swipe_back(top);
            }
        }
        Step::SwipeDismiss => {
            let top = nav.top_container();
            nav.platform_mut().swipe_dismiss(top);
        }
        Step::FinishAnimations => {
            nav.platform_mut().finish_animations();
        }
        Step::Pump => {
            nav.pump_platform_events();
        }
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(512))]

    #[test]
    fn settled_routes_match_physical_screens(steps in prop::collection::vec(step(), 1..60)) {
        let mut nav = Navigator::new(InMemoryPlatform::new(), |screen: &Screen| format!("{screen:?}"));
        nav.start(Screen::Home);

        for step in steps {
            run(&mut nav, step);
        }
        nav.platform_mut().finish_animations();
        nav.pump_platform_events();

        let physical: usize = nav.container_depths().iter().sum();
        prop_assert_eq!(nav.route_count(), physical, "routes {:?}", nav.routes());
        prop_assert!(nav.route_count() >= 1);
    }

    #[test]
    fn every_entry_points_at_a_live_screen(steps in prop::collection::vec(step(), 1..60)) {
        let mut nav = Navigator::new(InMemoryPlatform::new(), |screen: &Screen| format!("{screen:?}"));
        nav.start(Screen::Home);

        for step in steps {
            run(&mut nav, step);
        }
        nav.platform_mut().finish_animations();
        nav.pump_platform_events();

        for entry in nav.entries() {
            prop_assert!(nav.containers().contains(&entry.container));
            prop_assert!(nav.platform().screens(entry.container).contains(&entry.screen));
            let expected_label = format!("{:?}", entry.destination);
            prop_assert_eq!(
                nav.platform().label(entry.screen),
                Some(expected_label.as_str())
            );
        }
    }
}
