//! The orrery facade: scene registry, focus, camera and pointer input behind
//! one resource.
//!
//! Host UI reaches it either directly through `ResMut<Orrery>` or by writing
//! [`OrreryCommand`] messages, which are applied once per frame before the
//! scene advances.

use bevy::app::AppExit;
use bevy::math::Ray3d;
use bevy::prelude::*;

use crate::camera::{BodyLocator, CameraController, FocusTarget, MoveOptions, MoveOutcome, Viewpoints};
use crate::config::{OrreryConfig, PlaybackSettings};
use crate::error::OrreryError;
use crate::focus::FocusManager;
use crate::input::{ClickAction, Gesture, HoverTooltip, InputDisambiguator, hover_target, resolve_click};
use crate::scene::SceneRegistry;
use crate::types::{FocusState, FrameSet, ViewMode};

/// Requests from host UI, applied in [`FrameSet::Commands`].
#[derive(Message, Clone, Debug, PartialEq)]
pub enum OrreryCommand {
    SwitchView(ViewMode),
    /// View by key, e.g. `"3d"`.
    SwitchViewKey(String),
    FocusOn(String),
    ExitFocus,
    SetOrbitsVisible(bool),
    SetSpeed(f32),
    SetAnimationRunning(bool),
    SetFocusPanelOpen(bool),
}

/// Interactive planetary system state.
#[derive(Resource, Debug)]
pub struct Orrery {
    registry: SceneRegistry,
    focus: FocusManager,
    camera: CameraController,
    viewpoints: Viewpoints,
    input: InputDisambiguator,
    playback: PlaybackSettings,
    speed: f32,
    running: bool,
    /// Rotation was stopped by a focus and should resume when it ends.
    paused_by_focus: bool,
    focus_panel_open: bool,
    hover: Option<HoverTooltip>,
}

impl Orrery {
    /// Build the scene and park the camera at the 2D viewpoint.
    pub fn new(config: OrreryConfig) -> Result<Self, OrreryError> {
        let OrreryConfig {
            bodies,
            asteroid_field,
            seed,
            camera,
            viewpoints,
            input,
            playback,
            show_orbits,
        } = config;

        let start = *viewpoints
            .get(ViewMode::TwoD)
            .ok_or(OrreryError::MissingViewpoint(ViewMode::TwoD))?;

        let mut registry = SceneRegistry::with_seed(seed);
        registry.build(bodies, asteroid_field)?;

        let mut focus = FocusManager::with_orbits(show_orbits);
        focus.show_all(&mut registry);

        Ok(Self {
            registry,
            focus,
            camera: CameraController::new(camera, start),
            viewpoints,
            input: InputDisambiguator::new(input),
            speed: playback.clamp_speed(playback.speed),
            running: playback.running,
            playback,
            paused_by_focus: false,
            focus_panel_open: true,
            hover: None,
        })
    }

    pub fn registry(&self) -> &SceneRegistry {
        &self.registry
    }

    pub fn camera(&self) -> &CameraController {
        &self.camera
    }

    pub fn viewpoints(&self) -> &Viewpoints {
        &self.viewpoints
    }

    pub fn focus_state(&self) -> &FocusState {
        self.focus.state()
    }

    pub fn view_mode(&self) -> ViewMode {
        self.camera.view_mode()
    }

    pub fn hover(&self) -> Option<&HoverTooltip> {
        self.hover.as_ref()
    }

    pub fn orbits_visible(&self) -> bool {
        self.focus.orbits_visible()
    }

    pub fn speed(&self) -> f32 {
        self.speed
    }

    pub fn playback(&self) -> &PlaybackSettings {
        &self.playback
    }

    pub fn animation_running(&self) -> bool {
        self.running
    }

    pub fn focus_panel_open(&self) -> bool {
        self.focus_panel_open
    }

    pub fn is_disposed(&self) -> bool {
        self.registry.is_disposed()
    }

    /// Whether the focus side panel is shown; biases framing to the left.
    pub fn set_focus_panel_open(&mut self, open: bool) {
        self.focus_panel_open = open;
    }

    /// Animate to the registered pose for `mode`.
    pub fn switch_view(&mut self, mode: ViewMode, now: f64) -> Result<(), OrreryError> {
        if self.is_disposed() {
            return Err(OrreryError::Disposed);
        }
        self.camera
            .switch_view(mode, &self.viewpoints, now)
            .inspect_err(|err| warn!("View switch skipped: {err}"))
    }

    /// [`switch_view`](Self::switch_view) by key (`"2d"` or `"3d"`).
    pub fn switch_view_key(&mut self, key: &str, now: f64) -> Result<(), OrreryError> {
        let mode = key
            .parse::<ViewMode>()
            .inspect_err(|err| warn!("View switch skipped: {err}"))?;
        self.switch_view(mode, now)
    }

    /// Isolate `name` and fly to it, replacing any camera motion in flight.
    pub fn focus_on(&mut self, name: &str, now: f64) -> Result<(), OrreryError> {
        if self.is_disposed() {
            return Err(OrreryError::Disposed);
        }
        self.focus
            .focus_on(&mut self.registry, name)
            .inspect_err(|err| warn!("Focus skipped: {err}"))?;
        self.camera.cancel_transition();
        self.frame_focused(name, now);
        Ok(())
    }

    /// Leave focus, restore the scene and return to the 2D view.
    pub fn exit_focus(&mut self, now: f64) {
        if self.is_disposed() {
            return;
        }
        self.focus.show_all(&mut self.registry);
        if self.paused_by_focus {
            self.paused_by_focus = false;
            self.running = true;
        }
        // The 2D viewpoint is checked at construction, but may since have been removed.
        let _ = self.switch_view(ViewMode::TwoD, now);
    }

    pub fn set_orbits_visible(&mut self, visible: bool) {
        if self.is_disposed() {
            return;
        }
        self.focus.set_orbits_visible(&mut self.registry, visible);
        info!("Orbit rings {}", if visible { "shown" } else { "hidden" });
    }

    /// Set the rotation speed multiplier, clamped to the playback range.
    pub fn set_speed(&mut self, multiplier: f32) {
        self.speed = self.playback.clamp_speed(multiplier);
        info!("Speed: {}x", self.speed);
    }

    pub fn set_animation_running(&mut self, running: bool) {
        self.running = running;
        self.paused_by_focus = false;
        info!("Rotation {}", if running { "running" } else { "paused" });
    }

    pub fn pointer_pressed(&self) -> bool {
        self.input.is_pressed()
    }

    pub fn pointer_down(&mut self, screen: Vec2) {
        self.input.on_pointer_down(screen);
    }

    /// Track the pointer: orbit while held, hover-probe otherwise.
    pub fn pointer_move(&mut self, screen: Vec2, ray: Option<Ray3d>) {
        let motion = self.input.on_pointer_move(screen);

        if let Some(delta) = motion.orbit_delta {
            self.camera.rotate(delta);
        }

        self.hover = if motion.hover_probe {
            let hit = ray.and_then(|ray| self.registry.ray_cast(ray, self.focus.is_focused()));
            hover_target(hit.as_ref()).map(|body| HoverTooltip {
                body: body.to_string(),
                screen_position: screen,
            })
        } else {
            None
        };
    }

    /// Finish a press; a click selects whatever `ray` hits.
    pub fn pointer_up(&mut self, screen: Vec2, ray: Option<Ray3d>, now: f64) -> Option<Gesture> {
        let gesture = self.input.on_pointer_up(screen)?;
        if gesture == Gesture::Click && !self.is_disposed() {
            let hit = ray.and_then(|ray| self.registry.ray_cast(ray, self.focus.is_focused()));
            match resolve_click(hit.as_ref(), self.focus.focused_name()) {
                ClickAction::None => {}
                ClickAction::ExitFocus => self.exit_focus(now),
                ClickAction::Focus(name) => self.select_body(&name, now),
            }
        }
        Some(gesture)
    }

    pub fn pointer_leave(&mut self) {
        self.input.on_pointer_leave();
        self.hover = None;
    }

    pub fn clear_hover(&mut self) {
        self.hover = None;
    }

    /// One wheel notch; positive `delta` dollies toward the target.
    pub fn wheel(&mut self, delta: f32) {
        if delta > 0.0 {
            self.camera.zoom_in();
        } else if delta < 0.0 {
            self.camera.zoom_out();
        }
    }

    /// Advance one frame: rotate bodies, then move the camera.
    pub fn frame(&mut self, now: f64) {
        if self.is_disposed() {
            return;
        }
        if self.running {
            self.registry.rotate_all(self.speed);
        }

        self.camera.update(now, &self.registry);

        if let Some(anchor) = self
            .focus
            .focused_name()
            .and_then(|name| self.registry.locate(name))
        {
            self.registry
                .orient_click_plane(self.camera.pose().position, anchor);
        }
    }

    /// Release the scene. Further calls are no-ops.
    pub fn dispose(&mut self) {
        if self.is_disposed() {
            return;
        }
        self.registry.dispose();
        self.camera.cancel_transition();
        self.camera.enable_pointer_orbit(false);
        self.input.on_pointer_leave();
        self.hover = None;
    }

    /// Click selection. A click during a camera transition stops the camera
    /// where it is instead of starting a new flight.
    fn select_body(&mut self, name: &str, now: f64) {
        if let Err(err) = self.focus.focus_on(&mut self.registry, name) {
            warn!("Focus skipped: {err}");
            return;
        }
        self.frame_focused(name, now);
    }

    fn frame_focused(&mut self, name: &str, now: f64) {
        let Some(body) = self.registry.find_by_name(name) else {
            return;
        };
        let target = FocusTarget {
            name: name.to_string(),
            position: body.world_position(),
            radius: body.radius(),
        };
        let options = MoveOptions {
            stop_ambient_motion: self.playback.pause_on_focus,
            focus_panel_open: self.focus_panel_open,
        };

        if options.stop_ambient_motion && self.running {
            self.running = false;
            self.paused_by_focus = true;
        }

        if self.camera.move_to_object(target, options, now) == MoveOutcome::Cancelled {
            debug!("Camera transition cancelled by selection of {name}");
        }
    }

    fn apply(&mut self, command: OrreryCommand, now: f64) {
        match command {
            OrreryCommand::SwitchView(mode) => {
                let _ = self.switch_view(mode, now);
            }
            OrreryCommand::SwitchViewKey(key) => {
                let _ = self.switch_view_key(&key, now);
            }
            OrreryCommand::FocusOn(name) => {
                let _ = self.focus_on(&name, now);
            }
            OrreryCommand::ExitFocus => self.exit_focus(now),
            OrreryCommand::SetOrbitsVisible(visible) => self.set_orbits_visible(visible),
            OrreryCommand::SetSpeed(speed) => self.set_speed(speed),
            OrreryCommand::SetAnimationRunning(running) => self.set_animation_running(running),
            OrreryCommand::SetFocusPanelOpen(open) => self.set_focus_panel_open(open),
        }
    }
}

/// Plugin wiring the [`Orrery`] resource into the frame schedule.
///
/// The resource itself is inserted by the caller so construction errors can
/// be reported before the app starts.
pub struct OrreryPlugin;

impl Plugin for OrreryPlugin {
    fn build(&self, app: &mut App) {
        app.add_message::<OrreryCommand>()
            .configure_sets(
                Update,
                (
                    FrameSet::Input,
                    FrameSet::Commands,
                    FrameSet::Advance,
                    FrameSet::Sync,
                )
                    .chain(),
            )
            .add_systems(
                Update,
                (
                    apply_commands.in_set(FrameSet::Commands),
                    advance_frame.in_set(FrameSet::Advance),
                ),
            )
            .add_systems(Last, dispose_on_exit);
    }
}

/// Apply queued UI commands in order.
pub fn apply_commands(
    mut commands: MessageReader<OrreryCommand>,
    time: Res<Time>,
    mut orrery: ResMut<Orrery>,
) {
    let now = time.elapsed_secs_f64();
    for command in commands.read() {
        orrery.apply(command.clone(), now);
    }
}

/// Rotate bodies and update the camera.
pub fn advance_frame(time: Res<Time>, mut orrery: ResMut<Orrery>) {
    orrery.frame(time.elapsed_secs_f64());
}

/// Tear the scene down when the app is exiting.
pub fn dispose_on_exit(mut exits: MessageReader<AppExit>, mut orrery: ResMut<Orrery>) {
    if exits.read().next().is_some() {
        orrery.dispose();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::{BodyProxy, Decoration};
    use crate::test_utils::fixtures;
    use approx::assert_relative_eq;

    fn orbit_visible(orrery: &Orrery, name: &str) -> Option<bool> {
        orrery
            .registry()
            .find_by_name(name)
            .and_then(BodyProxy::orbit_ring)
            .map(|ring| ring.is_visible())
    }

    fn body_visible(orrery: &Orrery, name: &str) -> Option<bool> {
        orrery.registry().find_by_name(name).map(BodyProxy::is_visible)
    }

    fn click(orrery: &mut Orrery, target: Vec3, now: f64) {
        let screen = Vec2::new(400.0, 300.0);
        orrery.pointer_down(screen);
        orrery.pointer_up(screen, Some(fixtures::ray_toward(target)), now);
    }

    #[test]
    fn test_click_on_body_focuses_it() {
        let mut orrery = fixtures::three_body_orrery();
        click(&mut orrery, Vec3::new(42.0, 0.0, 0.0), 0.0);

        assert_eq!(orrery.focus_state(), &FocusState::FocusedOn("Earth".to_string()));
        assert_eq!(body_visible(&orrery, "Mars"), Some(false));
        assert_eq!(orbit_visible(&orrery, "Earth"), Some(false));
        assert!(orrery.registry().asteroid_field().is_some_and(|f| !f.is_visible()));
        assert!(orrery.registry().click_plane().is_some_and(|p| p.is_active()));
        assert!(orrery.camera().is_transitioning());
        assert_eq!(orrery.view_mode(), ViewMode::ThreeD);
    }

    #[test]
    fn test_click_on_click_plane_exits_focus() {
        let mut orrery = fixtures::three_body_orrery();
        let _ = orrery.focus_on("Earth", 0.0);
        orrery.frame(5.0);

        // Below the line of sight, clear of every body.
        let eye = orrery.camera().pose().position;
        let below = orrery.camera().pose().orientation() * Vec3::new(0.0, -0.4, -1.0);
        let ray = Ray3d::new(eye, Dir3::new(below).unwrap_or(Dir3::NEG_Y));
        assert_eq!(
            orrery.registry().ray_cast(ray, true).map(|h| h.target),
            Some(crate::scene::HitTarget::ClickPlane)
        );

        let screen = Vec2::new(10.0, 10.0);
        orrery.pointer_down(screen);
        orrery.pointer_up(screen, Some(ray), 6.0);

        assert_eq!(orrery.focus_state(), &FocusState::None);
        assert!(orrery.registry().bodies().iter().all(BodyProxy::is_visible));
        assert_eq!(orrery.view_mode(), ViewMode::TwoD);
    }

    #[test]
    fn test_unfocused_miss_keeps_view() {
        let mut orrery = fixtures::three_body_orrery();
        let _ = orrery.switch_view(ViewMode::ThreeD, 0.0);
        orrery.frame(2.0);
        assert!(orrery.camera().is_idle());
        assert!(orrery.camera().pointer_orbit_enabled());

        // Straight up from the 3D viewpoint, away from every body.
        let eye = orrery.camera().pose().position;
        let screen = Vec2::new(400.0, 20.0);
        orrery.pointer_down(screen);
        let gesture = orrery.pointer_up(screen, Some(Ray3d::new(eye, Dir3::Y)), 3.0);

        assert_eq!(gesture, Some(Gesture::Click));
        assert_eq!(orrery.focus_state(), &FocusState::None);
        assert_eq!(orrery.view_mode(), ViewMode::ThreeD);
        assert!(orrery.camera().is_idle());
        assert!(orrery.camera().pointer_orbit_enabled());
    }

    #[test]
    fn test_orbit_toggle_scenario() {
        let mut orrery = fixtures::three_body_orrery();
        orrery.set_orbits_visible(true);
        orrery.set_orbits_visible(false);
        assert_eq!(orbit_visible(&orrery, "Earth"), Some(false));
        assert_eq!(orbit_visible(&orrery, "Mars"), Some(false));

        let _ = orrery.focus_on("Mars", 0.0);
        assert_eq!(orbit_visible(&orrery, "Mars"), Some(false));

        orrery.set_orbits_visible(true);
        assert_eq!(orbit_visible(&orrery, "Mars"), Some(true));
        assert_eq!(orbit_visible(&orrery, "Earth"), Some(false));
    }

    #[test]
    fn test_drag_does_not_select() {
        let mut orrery = fixtures::three_body_orrery();
        orrery.pointer_down(Vec2::new(100.0, 100.0));
        orrery.pointer_move(Vec2::new(140.0, 100.0), None);
        let gesture = orrery.pointer_up(
            Vec2::new(140.0, 100.0),
            Some(fixtures::ray_toward(Vec3::new(42.0, 0.0, 0.0))),
            0.0,
        );
        assert_eq!(gesture, Some(Gesture::Drag));
        assert_eq!(orrery.focus_state(), &FocusState::None);
    }

    #[test]
    fn test_clicking_focused_body_exits() {
        let mut orrery = fixtures::three_body_orrery();
        let _ = orrery.focus_on("Earth", 0.0);
        orrery.frame(5.0);
        let earth = orrery.registry().locate("Earth").unwrap_or_default();
        click(&mut orrery, earth, 6.0);
        assert_eq!(orrery.focus_state(), &FocusState::None);
    }

    #[test]
    fn test_scripted_refocus_starts_fresh_transition() {
        let mut orrery = fixtures::three_body_orrery();
        orrery.set_focus_panel_open(false);
        let _ = orrery.focus_on("Earth", 0.0);
        orrery.frame(0.5);
        let _ = orrery.focus_on("Mars", 0.6);

        assert!(orrery.camera().is_transitioning());
        orrery.frame(3.0);
        let mars = orrery.registry().locate("Mars").unwrap_or_default();
        assert_relative_eq!(orrery.camera().target().x, mars.x, epsilon = 1e-3);
    }

    #[test]
    fn test_focus_unknown_body_is_error() {
        let mut orrery = fixtures::three_body_orrery();
        assert_eq!(
            orrery.focus_on("Pluto", 0.0),
            Err(OrreryError::UnknownBody("Pluto".to_string()))
        );
        assert!(orrery.camera().is_idle());
    }

    #[test]
    fn test_unknown_view_key_leaves_camera() {
        let mut orrery = fixtures::three_body_orrery();
        let result = orrery.switch_view_key("4d", 0.0);
        assert_eq!(result, Err(OrreryError::UnknownViewMode("4d".to_string())));
        assert!(orrery.camera().is_idle());
    }

    #[test]
    fn test_hover_reports_bodies_only() {
        let mut orrery = fixtures::three_body_orrery();
        let screen = Vec2::new(50.0, 60.0);
        orrery.pointer_move(screen, Some(fixtures::ray_toward(Vec3::new(55.0, 0.0, 0.0))));
        assert_eq!(
            orrery.hover(),
            Some(&HoverTooltip {
                body: "Mars".to_string(),
                screen_position: screen,
            })
        );

        orrery.pointer_move(screen, Some(fixtures::ray_toward(Vec3::new(0.0, 0.0, 300.0))));
        assert_eq!(orrery.hover(), None);

        orrery.pointer_move(screen, Some(fixtures::ray_toward(Vec3::new(55.0, 0.0, 0.0))));
        orrery.pointer_leave();
        assert_eq!(orrery.hover(), None);
    }

    #[test]
    fn test_frame_rotates_only_when_running() {
        let mut orrery = fixtures::three_body_orrery();
        orrery.set_animation_running(false);
        orrery.frame(0.0);
        let angle = orrery.registry().find_by_name("Earth").map(BodyProxy::orbit_angle);
        assert_eq!(angle, Some(0.0));

        orrery.set_animation_running(true);
        orrery.set_speed(2.0);
        orrery.frame(0.1);
        let angle = orrery.registry().find_by_name("Earth").map(BodyProxy::orbit_angle);
        assert_relative_eq!(angle.unwrap_or_default(), 0.02, epsilon = 1e-6);
    }

    #[test]
    fn test_pause_on_focus_resumes_on_exit() {
        let mut config = fixtures::three_body_config();
        config.playback.pause_on_focus = true;
        let mut orrery = Orrery::new(config).expect("valid config");

        let _ = orrery.focus_on("Earth", 0.0);
        assert!(!orrery.animation_running());
        orrery.exit_focus(1.0);
        assert!(orrery.animation_running());
    }

    #[test]
    fn test_manual_pause_survives_exit() {
        let mut config = fixtures::three_body_config();
        config.playback.pause_on_focus = true;
        config.playback.running = false;
        let mut orrery = Orrery::new(config).expect("valid config");

        let _ = orrery.focus_on("Earth", 0.0);
        orrery.exit_focus(1.0);
        assert!(!orrery.animation_running());
    }

    #[test]
    fn test_commands_apply() {
        let mut orrery = fixtures::three_body_orrery();
        orrery.apply(OrreryCommand::SetSpeed(4.0), 0.0);
        orrery.apply(OrreryCommand::FocusOn("Mars".to_string()), 0.0);
        orrery.apply(OrreryCommand::SwitchViewKey("3d".to_string()), 0.1);
        assert_eq!(orrery.speed(), 4.0);
        assert_eq!(orrery.focus_state().name(), Some("Mars"));
        assert!(
            orrery
                .camera()
                .transition()
                .is_some_and(|t| t.target_mode() == ViewMode::ThreeD)
        );
    }

    #[test]
    fn test_dispose_is_final() {
        let mut orrery = fixtures::three_body_orrery();
        orrery.dispose();
        orrery.dispose();
        assert!(orrery.is_disposed());
        orrery.frame(1.0);
        assert_eq!(orrery.focus_on("Earth", 1.0), Err(OrreryError::Disposed));
        assert_eq!(orrery.switch_view(ViewMode::ThreeD, 1.0), Err(OrreryError::Disposed));
        assert_eq!(orrery.focus_state(), &FocusState::None);
        assert!(orrery.camera().is_idle());
        assert!(orrery.registry().bodies().iter().all(|b| !b.decorations().any(|d| d.is_visible())));
    }
}
