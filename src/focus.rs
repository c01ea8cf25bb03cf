//! Scene isolation around a single focused body.
//!
//! Every operation re-derives visibility for the whole registry from the
//! focus state and the global orbit toggle, so repeated calls converge to
//! the same scene regardless of what came before.

#[cfg(test)]
mod proptest_focus;

use bevy::prelude::*;

use crate::error::OrreryError;
use crate::scene::{BodyProxy, DecorationKind, SceneRegistry};
use crate::types::FocusState;

/// Tracks the focused body and the global orbit-ring toggle.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FocusManager {
    state: FocusState,
    orbits_visible: bool,
}

impl FocusManager {
    /// Manager with nothing focused and the given orbit toggle.
    pub fn with_orbits(orbits_visible: bool) -> Self {
        Self {
            state: FocusState::None,
            orbits_visible,
        }
    }

    pub fn state(&self) -> &FocusState {
        &self.state
    }

    pub fn is_focused(&self) -> bool {
        self.state.is_active()
    }

    pub fn focused_name(&self) -> Option<&str> {
        self.state.name()
    }

    pub fn orbits_visible(&self) -> bool {
        self.orbits_visible
    }

    /// Isolate `name`: hide every other non-primary body and the asteroid
    /// field, and activate the click-plane.
    pub fn focus_on(&mut self, registry: &mut SceneRegistry, name: &str) -> Result<(), OrreryError> {
        if registry.find_by_name(name).is_none() {
            return Err(OrreryError::UnknownBody(name.to_string()));
        }

        self.state = FocusState::FocusedOn(name.to_string());
        self.apply(registry);
        info!("Focused on {name}");
        Ok(())
    }

    /// Clear the focus and restore every object.
    pub fn show_all(&mut self, registry: &mut SceneRegistry) {
        let was_focused = self.is_focused();
        self.state = FocusState::None;
        self.apply(registry);
        if was_focused {
            info!("Focus cleared");
        }
    }

    /// Store the orbit toggle and apply it to rings of visible bodies.
    pub fn set_orbits_visible(&mut self, registry: &mut SceneRegistry, visible: bool) {
        self.orbits_visible = visible;
        self.apply(registry);
    }

    /// Re-apply the current state to `registry`.
    pub fn apply(&self, registry: &mut SceneRegistry) {
        let focused = self.state.name();

        for body in registry.bodies_mut() {
            let shown = match focused {
                None => true,
                Some(name) => body.is_primary() || body.name() == name,
            };
            if !body.is_primary() {
                body.set_visible(shown);
            }
            self.apply_decorations(body, shown);
        }

        let focus_active = focused.is_some();
        if let Some(field) = registry.asteroid_field_mut() {
            field.set_visible(!focus_active);
        }
        if let Some(plane) = registry.click_plane_mut() {
            plane.set_active(focus_active);
        }
    }

    fn apply_decorations(&self, body: &mut BodyProxy, shown: bool) {
        let orbits_visible = self.orbits_visible;
        for decoration in body.decorations_mut() {
            let visible = match decoration.kind() {
                DecorationKind::OrbitRing => shown && orbits_visible,
                DecorationKind::PlanetaryRing => shown,
            };
            decoration.set_visible(visible);
        }
    }
}
