//! Property tests for the d12 resolution engine.

use proptest::prelude::*;

use dk_mechanics::{BonusDie, CheckNature, EntropyDraw, RollSpec, resolve_draw};

fn drawn(values: Vec<u32>) -> EntropyDraw<()> {
    EntropyDraw {
        values,
        context: (),
    }
}

fn die() -> impl Strategy<Value = u32> {
    1_u32..=12
}

proptest! {
    #[test]
    fn double_ones_always_fail_active_checks(
        modifier in -10_i32..=30,
        dc in -5_i32..=40,
        extra_value in die(),
        extra_threshold in 0_i32..=12,
    ) {
        let spec = RollSpec::new(modifier, CheckNature::Active)
            .with_target(dc)
            .with_extra(BonusDie::new("STR", extra_threshold));
        let outcome = resolve_draw(&spec, drawn(vec![1, 1, extra_value])).unwrap();
        prop_assert!(outcome.auto_fail);
        prop_assert_eq!(outcome.success, Some(false));
        prop_assert_eq!(outcome.shifts, 0);
    }

    #[test]
    fn crit_modifiers_are_zero_six_or_twelve(
        values in proptest::collection::vec(die(), 2..=2),
        extra_value in die(),
        luck_value in die(),
    ) {
        let spec = RollSpec::new(0, CheckNature::Active)
            .with_extra(BonusDie::new("STR", 6))
            .with_luck(BonusDie::new("FOR", 6));
        let all = vec![values[0], values[1], extra_value, luck_value];
        let outcome = resolve_draw(&spec, drawn(all.clone())).unwrap();

        prop_assert!([0, 6, 12].contains(&outcome.crit_modifiers));
        let has_max = all.contains(&12);
        let has_pair = all
            .iter()
            .enumerate()
            .any(|(idx, v)| all[..idx].contains(v));
        let expected = 6 * i32::from(has_max) + 6 * i32::from(has_pair);
        prop_assert_eq!(outcome.crit_modifiers, expected);
    }

    #[test]
    fn total_is_selected_plus_modifier_plus_crit(
        values in proptest::collection::vec(die(), 2..=2),
        modifier in -10_i32..=30,
    ) {
        let spec = RollSpec::new(modifier, CheckNature::Active);
        let outcome = resolve_draw(&spec, drawn(values)).unwrap();
        let selected_sum = (outcome.selected[0] + outcome.selected[1]) as i32;
        prop_assert_eq!(outcome.total, selected_sum + modifier + outcome.crit_modifiers);
        prop_assert!(outcome.selected[0] >= outcome.selected[1]);
    }

    #[test]
    fn success_is_monotone_in_difficulty(
        values in proptest::collection::vec(die(), 2..=2),
        modifier in -5_i32..=10,
        dc in 0_i32..=30,
        nature in prop_oneof![Just(CheckNature::Active), Just(CheckNature::Resisted)],
    ) {
        let at = |target: i32| {
            let spec = RollSpec::new(modifier, nature).with_target(target);
            resolve_draw(&spec, drawn(values.clone())).unwrap().success.unwrap()
        };
        if at(dc) {
            prop_assert!(at(dc - 1), "success at {dc} but not at {}", dc - 1);
        }
    }

    #[test]
    fn shifts_require_success_and_grow_with_margin(
        values in proptest::collection::vec(die(), 2..=2),
        modifier in -5_i32..=20,
        dc in 0_i32..=30,
    ) {
        let spec = RollSpec::new(modifier, CheckNature::Active).with_target(dc);
        let outcome = resolve_draw(&spec, drawn(values)).unwrap();
        match outcome.success {
            Some(true) => {
                let excess = outcome.total - dc;
                if excess < 6 {
                    prop_assert_eq!(outcome.shifts, 0);
                }
                if excess >= 6 {
                    prop_assert!(outcome.shifts >= 1);
                }
                if excess < 18 {
                    prop_assert!(outcome.shifts <= 1);
                }
            }
            _ => prop_assert_eq!(outcome.shifts, 0),
        }
    }

    #[test]
    fn selected_dice_are_the_two_highest_valid(
        values in proptest::collection::vec(die(), 2..=2),
        extra_value in die(),
        extra_threshold in 0_i32..=12,
    ) {
        let spec = RollSpec::new(0, CheckNature::Active)
            .with_extra(BonusDie::new("STR", extra_threshold));
        let all = vec![values[0], values[1], extra_value];
        let outcome = resolve_draw(&spec, drawn(all)).unwrap();

        let mut valid: Vec<u32> = outcome
            .dice
            .iter()
            .filter(|d| d.valid)
            .map(|d| d.value)
            .collect();
        valid.sort_unstable_by(|a, b| b.cmp(a));
        prop_assert_eq!(outcome.selected, [valid[0], valid[1]]);
        // Base dice are always valid.
        prop_assert!(outcome.dice[0].valid);
        prop_assert!(outcome.dice[1].valid);
    }
}
