use crate::{
    app_types::{EnvironmentFlag, EnvironmentPreference},
    host::{FlagSink, PreferenceQueries},
};

/// Later preference changes are not observed.
pub fn evaluate_static_preferences(
    queries: &dyn PreferenceQueries,
    flags: &dyn FlagSink,
) -> Vec<EnvironmentFlag> {
    let mut applied = Vec::new();
    for preference in EnvironmentPreference::ALL {
        if queries.matches(preference) {
            flags.set(preference.flag());
            applied.push(preference.flag());
        }
    }
    applied
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;
    use crate::host::testing::{FixedPreferences, RecordingFlags};

    #[test]
    fn no_preferences_sets_no_flags() {
        let flags = RecordingFlags::default();
        let applied = evaluate_static_preferences(&FixedPreferences::default(), &flags);
        assert!(applied.is_empty());
        assert!(flags.active().is_empty());
    }

    #[test]
    fn each_preference_sets_its_own_flag() {
        let flags = RecordingFlags::default();
        let queries = FixedPreferences {
            reduced_motion: true,
            ..FixedPreferences::default()
        };
        let applied = evaluate_static_preferences(&queries, &flags);
        assert_eq!(applied, vec![EnvironmentFlag::ReducedMotion]);
        assert!(flags.is_set(EnvironmentFlag::ReducedMotion));
        assert!(!flags.is_set(EnvironmentFlag::HighContrast));
        assert_eq!(queries.queries.get(), 2);
    }

    proptest! {
        #[test]
        fn evaluating_twice_is_idempotent(high_contrast in any::<bool>(), reduced_motion in any::<bool>()) {
            let flags = RecordingFlags::default();
            let queries = FixedPreferences { high_contrast, reduced_motion, ..FixedPreferences::default() };

            evaluate_static_preferences(&queries, &flags);
            let first = flags.active();
            evaluate_static_preferences(&queries, &flags);

            prop_assert_eq!(flags.active(), first);
            prop_assert_eq!(flags.is_set(EnvironmentFlag::HighContrast), high_contrast);
            prop_assert_eq!(flags.is_set(EnvironmentFlag::ReducedMotion), reduced_motion);
            prop_assert!(flags.history.borrow().iter().all(|(_, set)| *set));
        }
    }
}
