//! Property-based tests for scene isolation using proptest.

use proptest::prelude::*;

use super::FocusManager;
use crate::scene::{Decoration, SceneRegistry};
use crate::test_utils::fixtures;

/// Visibility of every object in the registry, in a comparable form.
fn snapshot(registry: &SceneRegistry) -> Vec<(String, bool, Vec<bool>)> {
    let mut state: Vec<_> = registry
        .bodies()
        .iter()
        .map(|body| {
            (
                body.name().to_string(),
                body.is_visible(),
                body.decorations().map(|d| d.is_visible()).collect(),
            )
        })
        .collect();
    state.push((
        "<asteroids>".to_string(),
        registry.asteroid_field().is_some_and(|f| f.is_visible()),
        vec![registry.click_plane().is_some_and(|p| p.is_active())],
    ));
    state
}

#[derive(Clone, Debug)]
enum Op {
    Focus(usize),
    ShowAll,
    Orbits(bool),
}

fn op() -> impl Strategy<Value = Op> {
    prop_oneof![
        (0usize..4).prop_map(Op::Focus),
        Just(Op::ShowAll),
        any::<bool>().prop_map(Op::Orbits),
    ]
}

fn run(focus: &mut FocusManager, registry: &mut SceneRegistry, ops: &[Op]) {
    let names: Vec<String> = registry.bodies().iter().map(|b| b.name().to_string()).collect();
    for op in ops {
        match op {
            Op::Focus(index) => {
                if let Some(name) = names.get(*index % names.len()) {
                    let _ = focus.focus_on(registry, name);
                }
            }
            Op::ShowAll => focus.show_all(registry),
            Op::Orbits(flag) => focus.set_orbits_visible(registry, *flag),
        }
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// Focusing the same body twice equals focusing it once, whatever came before.
    #[test]
    fn prop_focus_is_idempotent(
        history in prop::collection::vec(op(), 0..20),
        target in 0usize..4,
    ) {
        let mut registry = fixtures::ringed_registry();
        let mut focus = FocusManager::default();
        run(&mut focus, &mut registry, &history);

        let name = registry.bodies()[target % registry.bodies().len()].name().to_string();
        let _ = focus.focus_on(&mut registry, &name);
        let once = snapshot(&registry);
        let _ = focus.focus_on(&mut registry, &name);

        prop_assert_eq!(snapshot(&registry), once);
    }

    /// Any sequence ending in `show_all` yields the unfocused scene.
    #[test]
    fn prop_show_all_restores_initial_state(
        history in prop::collection::vec(op(), 0..20),
        orbits in any::<bool>(),
    ) {
        let mut fresh = fixtures::ringed_registry();
        let mut reference = FocusManager::with_orbits(orbits);
        reference.show_all(&mut fresh);

        let mut registry = fixtures::ringed_registry();
        let mut focus = FocusManager::default();
        run(&mut focus, &mut registry, &history);
        focus.set_orbits_visible(&mut registry, orbits);
        focus.show_all(&mut registry);

        prop_assert!(!focus.is_focused());
        prop_assert_eq!(snapshot(&registry), snapshot(&fresh));
    }

    /// The primary body stays visible through any sequence.
    #[test]
    fn prop_primary_always_visible(history in prop::collection::vec(op(), 0..30)) {
        let mut registry = fixtures::ringed_registry();
        let mut focus = FocusManager::default();
        run(&mut focus, &mut registry, &history);

        prop_assert!(registry.bodies().iter().filter(|b| b.is_primary()).all(|b| b.is_visible()));
    }
}
