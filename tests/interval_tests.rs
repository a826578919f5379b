use autotheme::core::mode::{evaluate, is_earlier, next_switch};
use autotheme::config::PeriodConfig;
use autotheme::{Mode, TimeBoundary};
use proptest::prelude::*;

fn t(s: &str) -> TimeBoundary {
    s.parse().unwrap()
}

/// Minutes since midnight, for comparing against the evaluator independently.
fn minutes(b: TimeBoundary) -> u32 {
    u32::from(b.hour()) * 60 + u32::from(b.minute())
}

/// Generate any valid wall-clock boundary
fn boundary_strategy() -> impl Strategy<Value = TimeBoundary> {
    (0u8..24, 0u8..60).prop_map(|(h, m)| TimeBoundary::new(h, m).unwrap())
}

/// Generate a (start, end) pair with start strictly earlier than end
fn same_day_window_strategy() -> impl Strategy<Value = (TimeBoundary, TimeBoundary)> {
    (boundary_strategy(), boundary_strategy())
        .prop_filter("start must be earlier than end", |(s, e)| minutes(*s) < minutes(*e))
}

/// Generate a (start, end) pair with start strictly later than end
fn wrapping_window_strategy() -> impl Strategy<Value = (TimeBoundary, TimeBoundary)> {
    (boundary_strategy(), boundary_strategy())
        .prop_filter("start must be later than end", |(s, e)| minutes(*s) > minutes(*e))
}

#[cfg(test)]
mod evaluator_properties {
    use super::*;

    proptest! {
        /// Same-day window: dark exactly when start <= now < end
        #[test]
        fn test_same_day_window(
            now in boundary_strategy(),
            (start, end) in same_day_window_strategy()
        ) {
            let expected = if minutes(start) <= minutes(now) && minutes(now) < minutes(end) {
                Mode::Dark
            } else {
                Mode::Light
            };
            prop_assert_eq!(evaluate(now, start, end), expected,
                "now={} start={} end={}", now, start, end);
        }

        /// Wrapping window: dark exactly when now >= start or now < end
        #[test]
        fn test_wrapping_window(
            now in boundary_strategy(),
            (start, end) in wrapping_window_strategy()
        ) {
            let expected = if minutes(now) >= minutes(start) || minutes(now) < minutes(end) {
                Mode::Dark
            } else {
                Mode::Light
            };
            prop_assert_eq!(evaluate(now, start, end), expected,
                "now={} start={} end={}", now, start, end);
        }

        /// now == start always lands in the "not earlier than start" branch
        #[test]
        fn test_now_equal_to_start_is_dark(
            start in boundary_strategy(),
            end in boundary_strategy()
        ) {
            prop_assert_eq!(evaluate(start, start, end), Mode::Dark);
        }

        /// now == end is never dark, except when start == end covers the whole day
        #[test]
        fn test_now_equal_to_end(
            start in boundary_strategy(),
            end in boundary_strategy()
        ) {
            let expected = if start == end { Mode::Dark } else { Mode::Light };
            prop_assert_eq!(evaluate(end, start, end), expected);
        }

        /// start == end means dark all day
        #[test]
        fn test_equal_boundaries_are_dark(
            now in boundary_strategy(),
            boundary in boundary_strategy()
        ) {
            prop_assert_eq!(evaluate(now, boundary, boundary), Mode::Dark);
        }

        /// is_earlier agrees with minute ordering and is irreflexive
        #[test]
        fn test_is_earlier_matches_minutes(a in boundary_strategy(), b in boundary_strategy()) {
            prop_assert_eq!(is_earlier(a, b), minutes(a) < minutes(b));
            prop_assert!(!is_earlier(a, a));
        }

        /// The announced next switch flips the mode when reached
        #[test]
        fn test_next_switch_flips_mode(
            now in boundary_strategy(),
            start in boundary_strategy(),
            end in boundary_strategy()
        ) {
            let period = PeriodConfig { start, end };
            let mode = evaluate(now, start, end);
            match next_switch(mode, &period) {
                Some(at) => prop_assert_eq!(evaluate(at, start, end), mode.opposite()),
                None => prop_assert_eq!(start, end),
            }
        }
    }
}

#[test]
fn test_wrapping_window_late_evening_is_dark() {
    assert_eq!(evaluate(t("23:30"), t("22:00"), t("09:00")), Mode::Dark);
}

#[test]
fn test_wrapping_window_morning_is_light() {
    assert_eq!(evaluate(t("10:00"), t("22:00"), t("09:00")), Mode::Light);
}

#[test]
fn test_wrapping_window_end_tie_is_light() {
    assert_eq!(evaluate(t("09:00"), t("22:00"), t("09:00")), Mode::Light);
    assert_eq!(evaluate(t("08:59"), t("22:00"), t("09:00")), Mode::Dark);
}

#[test]
fn test_same_day_window_inside_is_dark() {
    assert_eq!(evaluate(t("05:00"), t("03:00"), t("08:00")), Mode::Dark);
}

#[test]
fn test_same_day_window_outside_is_light() {
    assert_eq!(evaluate(t("20:00"), t("03:00"), t("08:00")), Mode::Light);
    assert_eq!(evaluate(t("02:59"), t("03:00"), t("08:00")), Mode::Light);
}

#[test]
fn test_wrapping_window_start_tie_is_dark() {
    assert_eq!(evaluate(t("22:00"), t("22:00"), t("09:00")), Mode::Dark);
    assert_eq!(evaluate(t("21:59"), t("22:00"), t("09:00")), Mode::Light);
}
