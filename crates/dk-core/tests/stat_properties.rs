//! Property tests for the stat tree, formulas, and resources.

use std::collections::HashMap;

use proptest::prelude::*;

use dk_core::{
    CircumstanceModifier, Formula, InherentModifier, ModifierSource, Resource, Rounding, StatTree,
    Tier, catalog, parse_share_string, to_share_string,
};

fn props_of(entries: &[(&str, i32)]) -> HashMap<String, String> {
    entries
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

/// A strategy producing arbitrary (possibly illegal) point allocations
/// over a handful of catalog stats.
fn allocation_strategy() -> impl Strategy<Value = HashMap<String, String>> {
    (
        0_i32..20,
        0_i32..10,
        0_i32..10,
        0_i32..6,
        0_i32..6,
        0_i32..6,
    )
        .prop_map(|(level, body, mind, str_pts, int_pts, muscles)| {
            props_of(&[
                ("Level", level),
                ("Body", body),
                ("Mind", mind),
                ("STR", str_pts),
                ("INT", int_pts),
                ("Muscles", muscles),
            ])
        })
}

proptest! {
    #[test]
    fn value_is_base_plus_applied_for_every_stat(
        props in allocation_strategy(),
        bonus in -5_i32..=5,
    ) {
        let tree = StatTree::from_props(&props).with_inherent(vec![
            InherentModifier::new("Trinket", ModifierSource::Equipment, "Body", bonus),
        ]);
        let situational =
            CircumstanceModifier::new("Weather", ModifierSource::Circumstance, -1);
        for stat in catalog().iter() {
            let m = tree
                .modifier_with(stat.name, std::slice::from_ref(&situational))
                .unwrap();
            let sum: i32 = m.applied.iter().map(|a| a.value).sum();
            prop_assert_eq!(m.value, m.base + sum);
            prop_assert!(m.applied.iter().all(|a| a.value != 0));
        }
    }

    #[test]
    fn level_cap_bounds_every_middle_tier_stat(props in allocation_strategy()) {
        let tree = StatTree::from_props(&props);
        let level = tree.level();
        for stat in catalog().iter() {
            if stat.tier == Tier::Realm || stat.tier == Tier::Attribute {
                let m = tree.modifier(stat.name).unwrap();
                prop_assert!(m.base <= level, "{}: base {} exceeds {level}", stat.name, m.base);
                prop_assert_eq!(m.level_capped, m.base_pre_cap > level);
            }
        }
    }

    #[test]
    fn deallocation_legality_respects_children(props in allocation_strategy()) {
        let tree = StatTree::from_props(&props);
        for stat in catalog().iter() {
            if tree.can_deallocate_point(stat.name).unwrap() {
                let mut reduced: HashMap<String, String> = props.clone();
                let points = tree.points(stat.name).unwrap();
                reduced.insert(stat.name.to_string(), (points - 1).to_string());
                let after = StatTree::from_props(&reduced);
                prop_assert!(
                    after.allocated_points(stat.name).unwrap()
                        <= after.allocatable_points(stat.name).unwrap()
                );
            }
        }
    }

    #[test]
    fn resource_update_stays_in_bounds(
        level in 0_i32..20,
        stored in -10_i32..30,
        delta in -50_i32..50,
    ) {
        let mut props = props_of(&[("Level", level), ("Heroism", stored)]);
        let tree = StatTree::from_props(&props);
        let new = Resource::Heroism.update(&tree, &mut props, delta).unwrap();
        let max = Resource::Heroism.maximum(&tree).unwrap().value;
        prop_assert!(new >= 0);
        prop_assert!(new <= max);
        // The state read back agrees with what update returned.
        let state = Resource::Heroism.state(&tree, &props).unwrap();
        prop_assert_eq!(state.current, new);
    }

    #[test]
    fn share_string_round_trips_non_default_entries(
        level in 1_i32..20,
        body in 1_i32..10,
        muscles in 1_i32..6,
        action in 0_i32..4,
    ) {
        let props = props_of(&[
            ("Level", level),
            ("Body", body),
            ("Muscles", muscles),
            ("Action", action),
        ]);
        let decoded = parse_share_string(&to_share_string(&props)).unwrap();
        prop_assert_eq!(decoded, props);
    }

    #[test]
    fn formula_value_ignores_factor_order(
        constant in -10_i32..10,
        coefficient in 0.25_f64..3.0,
        props in allocation_strategy(),
    ) {
        let tree = StatTree::from_props(&props);
        let a = Formula::new()
            .with_constant(constant)
            .with_scaled_stat("STR", coefficient, Rounding::Floor);
        let b = Formula::new().with_level().with_stat("Mind");
        let ab = (a.clone() + b.clone()).compute(&tree).unwrap();
        let ba = (b + a).compute(&tree).unwrap();
        prop_assert_eq!(ab.value, ba.value);
    }
}
