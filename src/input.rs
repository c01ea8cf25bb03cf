//! Pointer gesture classification and keyboard shortcuts.
//!
//! A press that travels less than the drag threshold before release is a
//! click and selects whatever is under the pointer; anything further is an
//! orbit drag and never changes the selection.

use bevy::input::mouse::AccumulatedMouseScroll;
use bevy::prelude::*;
use bevy::window::PrimaryWindow;

use crate::camera::MainCamera;
use crate::orrery::Orrery;
use crate::scene::{HitTarget, RayHit};
use crate::types::{FrameSet, ViewMode};

/// Pointer tuning.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct InputSettings {
    /// Screen distance in pixels at which a press becomes a drag.
    pub drag_threshold: f32,
}

impl Default for InputSettings {
    fn default() -> Self {
        Self {
            drag_threshold: 5.0,
        }
    }
}

/// Classified pointer release.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Gesture {
    Click,
    Drag,
}

/// What a pointer move asks of the caller.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct PointerMotion {
    /// Screen delta to feed the orbit controller while the button is held.
    pub orbit_delta: Option<Vec2>,
    /// Whether a hover ray-cast should run for this position.
    pub hover_probe: bool,
}

/// Tooltip shown next to a hovered body.
#[derive(Clone, Debug, PartialEq)]
pub struct HoverTooltip {
    pub body: String,
    pub screen_position: Vec2,
}

/// Selection change requested by a click.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ClickAction {
    /// Nothing to change: a miss while nothing is focused.
    None,
    ExitFocus,
    Focus(String),
}

/// Click-versus-drag state for a single pointer.
#[derive(Clone, Debug, Default)]
pub struct InputDisambiguator {
    settings: InputSettings,
    pointer_down: Option<Vec2>,
    last_position: Option<Vec2>,
    dragging: bool,
}

impl InputDisambiguator {
    pub fn new(settings: InputSettings) -> Self {
        Self {
            settings,
            ..Self::default()
        }
    }

    pub fn settings(&self) -> InputSettings {
        self.settings
    }

    pub fn is_dragging(&self) -> bool {
        self.dragging
    }

    pub fn is_pressed(&self) -> bool {
        self.pointer_down.is_some()
    }

    pub fn on_pointer_down(&mut self, position: Vec2) {
        self.pointer_down = Some(position);
        self.last_position = Some(position);
        self.dragging = false;
    }

    pub fn on_pointer_move(&mut self, position: Vec2) -> PointerMotion {
        let Some(down) = self.pointer_down else {
            self.last_position = Some(position);
            return PointerMotion {
                orbit_delta: None,
                hover_probe: true,
            };
        };

        if down.distance(position) >= self.settings.drag_threshold {
            self.dragging = true;
        }
        let delta = self.last_position.map(|last| position - last);
        self.last_position = Some(position);

        PointerMotion {
            orbit_delta: delta.filter(|d| *d != Vec2::ZERO),
            hover_probe: !self.dragging,
        }
    }

    /// Classify the release. `None` when no press was tracked.
    pub fn on_pointer_up(&mut self, position: Vec2) -> Option<Gesture> {
        let down = self.pointer_down.take()?;
        let dragged = self.dragging || down.distance(position) >= self.settings.drag_threshold;
        self.dragging = false;
        self.last_position = Some(position);
        Some(if dragged { Gesture::Drag } else { Gesture::Click })
    }

    pub fn on_pointer_leave(&mut self) {
        self.pointer_down = None;
        self.last_position = None;
        self.dragging = false;
    }
}

/// Map a click hit to a selection change.
///
/// While focused, the click-plane, the focused body and empty space all exit
/// focus. With nothing focused, a click that hits no body changes nothing.
pub fn resolve_click(hit: Option<&RayHit>, focused: Option<&str>) -> ClickAction {
    match (hit.map(|hit| &hit.target), focused) {
        (Some(HitTarget::Body(name)), _) if focused != Some(name.as_str()) => {
            ClickAction::Focus(name.clone())
        }
        (_, None) => ClickAction::None,
        _ => ClickAction::ExitFocus,
    }
}

/// Body name to show in a hover tooltip; the click-plane never qualifies.
pub fn hover_target(hit: Option<&RayHit>) -> Option<&str> {
    hit.and_then(RayHit::body_name)
}

/// Set by the UI when egui owns the pointer this frame.
#[derive(Resource, Default)]
pub struct PointerCapture {
    pub over_ui: bool,
}

/// Plugin routing window input into the orrery.
pub struct InputPlugin;

impl Plugin for InputPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<PointerCapture>().add_systems(
            Update,
            (pointer_input, scroll_zoom, keyboard_shortcuts).in_set(FrameSet::Input),
        );
    }
}

/// Feed cursor position and left-button state to the disambiguator.
fn pointer_input(
    mouse: Res<ButtonInput<MouseButton>>,
    time: Res<Time>,
    capture: Res<PointerCapture>,
    window_query: Query<&Window, With<PrimaryWindow>>,
    camera_query: Query<(&Camera, &GlobalTransform), With<MainCamera>>,
    mut orrery: ResMut<Orrery>,
    mut last_cursor: Local<Option<Vec2>>,
) {
    let Ok(window) = window_query.single() else {
        return;
    };

    let Some(cursor) = window.cursor_position() else {
        if last_cursor.take().is_some() {
            orrery.pointer_leave();
        }
        return;
    };

    let ray = camera_query
        .single()
        .ok()
        .and_then(|(camera, transform)| camera.viewport_to_world(transform, cursor).ok());

    if capture.over_ui && !orrery.pointer_pressed() {
        orrery.clear_hover();
    } else {
        if mouse.just_pressed(MouseButton::Left) {
            orrery.pointer_down(cursor);
        }
        if *last_cursor != Some(cursor) {
            orrery.pointer_move(cursor, ray);
        }
    }

    // Press first, so a press and release in one frame resolve as a click.
    // Releases are always delivered so a drag that ends over a panel still completes.
    if mouse.just_released(MouseButton::Left) {
        orrery.pointer_up(cursor, ray, time.elapsed_secs_f64());
    }
    *last_cursor = Some(cursor);
}

/// Mouse wheel dolly.
fn scroll_zoom(
    mouse_scroll: Res<AccumulatedMouseScroll>,
    capture: Res<PointerCapture>,
    mut orrery: ResMut<Orrery>,
) {
    if mouse_scroll.delta.y == 0.0 || capture.over_ui {
        return;
    }
    orrery.wheel(mouse_scroll.delta.y);
}

/// Handle keyboard shortcuts for playback, view and focus.
fn keyboard_shortcuts(keys: Res<ButtonInput<KeyCode>>, time: Res<Time>, mut orrery: ResMut<Orrery>) {
    let now = time.elapsed_secs_f64();

    // Space: toggle rotation
    if keys.just_pressed(KeyCode::Space) {
        let running = !orrery.animation_running();
        orrery.set_animation_running(running);
    }

    // [ and ]: halve or double the speed multiplier
    if keys.just_pressed(KeyCode::BracketLeft) {
        let speed = orrery.speed() * 0.5;
        orrery.set_speed(speed);
    }
    if keys.just_pressed(KeyCode::BracketRight) {
        let speed = orrery.speed() * 2.0;
        orrery.set_speed(speed);
    }

    if keys.just_pressed(KeyCode::Digit2) {
        let _ = orrery.switch_view(ViewMode::TwoD, now);
    }
    if keys.just_pressed(KeyCode::Digit3) {
        let _ = orrery.switch_view(ViewMode::ThreeD, now);
    }

    // O: orbit rings
    if keys.just_pressed(KeyCode::KeyO) {
        let visible = !orrery.orbits_visible();
        orrery.set_orbits_visible(visible);
    }

    if keys.just_pressed(KeyCode::Escape) && orrery.focus_state().is_active() {
        orrery.exit_focus(now);
    }
}
