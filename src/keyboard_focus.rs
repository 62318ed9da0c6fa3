use std::rc::Rc;

use crate::{
    app_types::{EnvironmentFlag, InputSignal},
    host::{FlagSink, InputEvents},
    TAB_KEY,
};

pub fn apply_input_signal(flags: &dyn FlagSink, signal: &InputSignal) {
    match signal {
        InputSignal::KeyDown(key) if key == TAB_KEY => flags.set(EnvironmentFlag::KeyboardNavigation),
        InputSignal::KeyDown(_) => {}
        InputSignal::MouseDown => flags.clear(EnvironmentFlag::KeyboardNavigation),
    }
}

pub fn install_keyboard_focus_listeners(input: &dyn InputEvents, flags: Rc<dyn FlagSink>) {
    let keydown_flags = flags.clone();
    input.on_keydown(Box::new(move |key| {
        apply_input_signal(keydown_flags.as_ref(), &InputSignal::KeyDown(key.to_string()));
    }));
    input.on_mousedown(Box::new(move || {
        apply_input_signal(flags.as_ref(), &InputSignal::MouseDown);
    }));
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;
    use crate::host::testing::{RecordingFlags, RecordingInput};

    fn installed() -> (Rc<RecordingFlags>, RecordingInput) {
        let flags = Rc::new(RecordingFlags::default());
        let input = RecordingInput::default();
        install_keyboard_focus_listeners(&input, flags.clone());
        (flags, input)
    }

    #[test]
    fn tab_sets_and_mousedown_clears_keyboard_flag() {
        let (flags, input) = installed();
        assert_eq!(input.listener_counts(), (1, 1));
        assert!(!flags.is_set(EnvironmentFlag::KeyboardNavigation));

        input.key_down("Tab");
        assert!(flags.is_set(EnvironmentFlag::KeyboardNavigation));

        input.mouse_down();
        assert!(!flags.is_set(EnvironmentFlag::KeyboardNavigation));

        input.key_down("Tab");
        assert!(flags.is_set(EnvironmentFlag::KeyboardNavigation));
    }

    #[test]
    fn other_keys_leave_keyboard_flag_alone() {
        let (flags, input) = installed();
        input.key_down("Enter");
        input.key_down("tab");
        assert!(!flags.is_set(EnvironmentFlag::KeyboardNavigation));
        assert!(flags.history.borrow().is_empty());

        input.key_down("Tab");
        input.key_down("Escape");
        assert!(flags.is_set(EnvironmentFlag::KeyboardNavigation));
    }

    #[test]
    fn keyboard_listeners_never_touch_preference_flags() {
        let (flags, input) = installed();
        input.key_down("Tab");
        input.mouse_down();
        assert!(flags
            .history
            .borrow()
            .iter()
            .all(|(flag, _)| *flag == EnvironmentFlag::KeyboardNavigation));
    }

    fn arb_signal() -> impl Strategy<Value = InputSignal> {
        prop_oneof![
            Just(InputSignal::KeyDown("Tab".to_string())),
            Just(InputSignal::MouseDown),
            "[A-Za-z]{1,8}".prop_map(InputSignal::KeyDown),
        ]
    }

    proptest! {
        #[test]
        fn keyboard_flag_tracks_most_recent_relevant_event(signals in proptest::collection::vec(arb_signal(), 0..64)) {
            let (flags, input) = installed();
            for signal in &signals {
                match signal {
                    InputSignal::KeyDown(key) => input.key_down(key),
                    InputSignal::MouseDown => input.mouse_down(),
                }
            }

            let expected = signals
                .iter()
                .rev()
                .find_map(|signal| match signal {
                    InputSignal::KeyDown(key) if key == "Tab" => Some(true),
                    InputSignal::MouseDown => Some(false),
                    InputSignal::KeyDown(_) => None,
                })
                .unwrap_or(false);
            prop_assert_eq!(flags.is_set(EnvironmentFlag::KeyboardNavigation), expected);
        }
    }
}
