//! Camera state machine: idle, scripted transitions and pointer orbiting.
//!
//! The controller never schedules itself. The host calls [`CameraController::update`]
//! once per frame with the current time; every transition is wall-clock based so
//! variable frame rates only change smoothness, not duration.

use std::collections::HashMap;
use std::f32::consts::FRAC_PI_2;

use bevy::prelude::*;

use super::orbit::SphericalState;
use super::transition::{CameraPose, CameraTransition, FocusFraming, TransitionKind, ease_out_quad};
use crate::error::OrreryError;
use crate::types::{SYSTEM_CENTER, ViewMode};

/// Resolves a body name to its current world position.
pub trait BodyLocator {
    fn locate(&self, name: &str) -> Option<Vec3>;
}

/// Tuning for pointer orbiting and scripted motion.
#[derive(Clone, Debug, PartialEq)]
pub struct CameraSettings {
    /// Radians of orbit per pixel of drag.
    pub rotate_gain: f32,
    pub min_distance: f32,
    pub max_distance: f32,
    /// Radius factor for one wheel step toward the target.
    pub zoom_in_factor: f32,
    /// Radius factor for one wheel step away from the target.
    pub zoom_out_factor: f32,
    /// Seconds for a named-viewpoint transition.
    pub view_duration: f64,
    /// Seconds for a "frame this body" transition.
    pub focus_duration: f64,
    /// Camera distance from a framed body, in body radii.
    pub focus_distance_factor: f32,
    /// Sideways aim offset, in body radii, while the focus panel is open.
    pub focus_look_bias: f32,
}

impl Default for CameraSettings {
    fn default() -> Self {
        Self {
            rotate_gain: 0.01,
            min_distance: 2.0,
            max_distance: 500.0,
            zoom_in_factor: 0.9,
            zoom_out_factor: 1.1,
            view_duration: 1.0,
            focus_duration: 1.5,
            focus_distance_factor: 8.0,
            focus_look_bias: 1.5,
        }
    }
}

/// Fixed poses keyed by view mode.
#[derive(Clone, Debug, PartialEq)]
pub struct Viewpoints {
    poses: HashMap<ViewMode, CameraPose>,
}

impl Viewpoints {
    pub fn empty() -> Self {
        Self {
            poses: HashMap::new(),
        }
    }

    pub fn get(&self, mode: ViewMode) -> Option<&CameraPose> {
        self.poses.get(&mode)
    }

    pub fn insert(&mut self, mode: ViewMode, pose: CameraPose) {
        self.poses.insert(mode, pose);
    }

    pub fn remove(&mut self, mode: ViewMode) -> Option<CameraPose> {
        self.poses.remove(&mode)
    }
}

impl Default for Viewpoints {
    fn default() -> Self {
        let mut viewpoints = Self::empty();
        viewpoints.insert(
            ViewMode::TwoD,
            CameraPose::new(Vec3::new(0.0, 380.0, 0.0), Vec3::new(-FRAC_PI_2, 0.0, 0.0)),
        );
        viewpoints.insert(
            ViewMode::ThreeD,
            CameraPose::looking_at(Vec3::new(0.0, 140.0, 260.0), SYSTEM_CENTER),
        );
        viewpoints
    }
}

/// Body to frame with [`CameraController::move_to_object`].
#[derive(Clone, Debug, PartialEq)]
pub struct FocusTarget {
    pub name: String,
    pub position: Vec3,
    pub radius: f32,
}

/// Options for [`CameraController::move_to_object`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct MoveOptions {
    /// The host should pause ambient rotation while framing.
    pub stop_ambient_motion: bool,
    /// A side panel covers the right of the viewport.
    pub focus_panel_open: bool,
}

/// Result of a [`CameraController::move_to_object`] call.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MoveOutcome {
    Started,
    /// A transition was in flight; it was stopped and nothing new started.
    Cancelled,
}

/// What the camera is doing. Exactly one variant is active.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum CameraAnimationState {
    #[default]
    Idle,
    Transitioning(CameraTransition),
    PointerOrbiting(SphericalState),
}

/// Owner of the camera pose.
#[derive(Clone, Debug)]
pub struct CameraController {
    settings: CameraSettings,
    pose: CameraPose,
    state: CameraAnimationState,
    orbit_enabled: bool,
    target: Vec3,
    view_mode: ViewMode,
    pending_rotate: Vec2,
    pending_zoom: f32,
}

impl CameraController {
    /// Controller resting at `pose` in 2D mode.
    pub fn new(settings: CameraSettings, pose: CameraPose) -> Self {
        Self {
            settings,
            pose,
            state: CameraAnimationState::Idle,
            orbit_enabled: false,
            target: SYSTEM_CENTER,
            view_mode: ViewMode::TwoD,
            pending_rotate: Vec2::ZERO,
            pending_zoom: 1.0,
        }
    }

    pub fn settings(&self) -> &CameraSettings {
        &self.settings
    }

    pub fn pose(&self) -> CameraPose {
        self.pose
    }

    pub fn state(&self) -> &CameraAnimationState {
        &self.state
    }

    /// Point the pointer orbit revolves around.
    pub fn target(&self) -> Vec3 {
        self.target
    }

    /// Mode of the last view switch or framing request.
    pub fn view_mode(&self) -> ViewMode {
        self.view_mode
    }

    pub fn pointer_orbit_enabled(&self) -> bool {
        self.orbit_enabled
    }

    pub fn transition(&self) -> Option<&CameraTransition> {
        match &self.state {
            CameraAnimationState::Transitioning(transition) => Some(transition),
            _ => None,
        }
    }

    pub fn is_transitioning(&self) -> bool {
        matches!(self.state, CameraAnimationState::Transitioning(_))
    }

    pub fn is_idle(&self) -> bool {
        matches!(self.state, CameraAnimationState::Idle)
    }

    /// Gate pointer-drag and wheel input.
    pub fn enable_pointer_orbit(&mut self, enabled: bool) {
        self.orbit_enabled = enabled;
        if !enabled {
            if matches!(self.state, CameraAnimationState::PointerOrbiting(_)) {
                self.state = CameraAnimationState::Idle;
            }
            self.clear_pending();
        }
    }

    /// Queue a drag delta in pixels. Ignored unless pointer orbit is enabled.
    pub fn rotate(&mut self, delta: Vec2) -> bool {
        if !self.accepts_pointer_input() {
            return false;
        }
        self.enter_pointer_orbit();
        self.pending_rotate += delta;
        true
    }

    /// Queue a multiplicative radius change. Ignored unless pointer orbit is enabled.
    pub fn zoom(&mut self, factor: f32) -> bool {
        if !self.accepts_pointer_input() || !factor.is_finite() || factor <= 0.0 {
            return false;
        }
        self.enter_pointer_orbit();
        self.pending_zoom *= factor;
        true
    }

    /// One wheel step away from the target.
    pub fn zoom_out(&mut self) -> bool {
        self.zoom(self.settings.zoom_out_factor)
    }

    /// One wheel step toward the target.
    pub fn zoom_in(&mut self) -> bool {
        self.zoom(self.settings.zoom_in_factor)
    }

    /// Start a transition to the registered pose for `mode`.
    ///
    /// Any in-flight transition is dropped where it stands; the new one
    /// starts from the current, possibly half-interpolated, pose.
    pub fn switch_view(
        &mut self,
        mode: ViewMode,
        viewpoints: &Viewpoints,
        now: f64,
    ) -> Result<(), OrreryError> {
        let target = *viewpoints
            .get(mode)
            .ok_or(OrreryError::MissingViewpoint(mode))?;

        self.state = CameraAnimationState::Transitioning(CameraTransition {
            start: self.pose,
            started_at: now,
            duration: self.settings.view_duration,
            kind: TransitionKind::View { mode, target },
        });
        self.orbit_enabled = false;
        self.clear_pending();
        self.view_mode = mode;
        debug!("Camera transition to {mode} view");
        Ok(())
    }

    /// Fly to frame `body`, or stop the in-flight transition if there is one.
    pub fn move_to_object(
        &mut self,
        body: FocusTarget,
        options: MoveOptions,
        now: f64,
    ) -> MoveOutcome {
        if self.cancel_transition() {
            return MoveOutcome::Cancelled;
        }

        let distance = body.radius * self.settings.focus_distance_factor;
        let offset = Vec3::new(distance, distance * 0.5, distance);
        let look_bias = if options.focus_panel_open {
            let forward = -offset.normalize_or_zero();
            let right = forward.cross(Vec3::Y).normalize_or_zero();
            right * body.radius * self.settings.focus_look_bias
        } else {
            Vec3::ZERO
        };

        self.state = CameraAnimationState::Transitioning(CameraTransition {
            start: self.pose,
            started_at: now,
            duration: self.settings.focus_duration,
            kind: TransitionKind::Focus(FocusFraming {
                body: body.name,
                offset,
                look_bias,
                last_known: body.position,
            }),
        });
        self.orbit_enabled = false;
        self.clear_pending();
        self.view_mode = ViewMode::ThreeD;
        MoveOutcome::Started
    }

    /// Stop any in-flight transition where it stands.
    ///
    /// Pointer orbit is re-enabled when the current view mode allows it.
    pub fn cancel_transition(&mut self) -> bool {
        if !self.is_transitioning() {
            return false;
        }
        self.state = CameraAnimationState::Idle;
        self.orbit_enabled = self.view_mode.allows_pointer_orbit();
        true
    }

    /// Advance the active mode. No-op while idle.
    pub fn update(&mut self, now: f64, locator: &impl BodyLocator) {
        match std::mem::take(&mut self.state) {
            CameraAnimationState::Idle => {}
            CameraAnimationState::PointerOrbiting(mut spherical) => {
                self.apply_pointer_input(&mut spherical);
                self.state = CameraAnimationState::PointerOrbiting(spherical);
            }
            CameraAnimationState::Transitioning(mut transition) => {
                if !self.advance_transition(&mut transition, now, locator) {
                    self.state = CameraAnimationState::Transitioning(transition);
                }
            }
        }
    }

    fn accepts_pointer_input(&self) -> bool {
        self.orbit_enabled && !self.is_transitioning()
    }

    fn enter_pointer_orbit(&mut self) {
        if self.is_idle() {
            self.state = CameraAnimationState::PointerOrbiting(SphericalState::from_offset(
                self.pose.position - self.target,
            ));
        }
    }

    fn clear_pending(&mut self) {
        self.pending_rotate = Vec2::ZERO;
        self.pending_zoom = 1.0;
    }

    fn apply_pointer_input(&mut self, spherical: &mut SphericalState) {
        spherical.rotate(self.pending_rotate, self.settings.rotate_gain);
        spherical.scale(self.pending_zoom);
        spherical.clamp_radius(self.settings.min_distance, self.settings.max_distance);
        self.clear_pending();

        let position = self.target + spherical.to_offset();
        self.pose = CameraPose::looking_at(position, self.target);
    }

    /// Returns `true` once the transition has completed.
    fn advance_transition(
        &mut self,
        transition: &mut CameraTransition,
        now: f64,
        locator: &impl BodyLocator,
    ) -> bool {
        let progress = transition.progress(now);
        let ease = ease_out_quad(progress);
        let start = transition.start;
        let done = progress >= 1.0;

        match &mut transition.kind {
            TransitionKind::View { mode, target } => {
                self.pose = start.lerp(target, ease);
                if done {
                    self.pose = *target;
                    self.target = SYSTEM_CENTER;
                    self.orbit_enabled = mode.allows_pointer_orbit();
                    info!("Camera reached {mode} view");
                }
            }
            TransitionKind::Focus(framing) => {
                if let Some(position) = locator.locate(&framing.body) {
                    framing.last_known = position;
                }
                let body = framing.last_known;
                let aim = body + framing.look_bias;
                let position = start.position.lerp(body + framing.offset, ease);
                self.pose = CameraPose::looking_at(position, aim);
                if done {
                    self.target = aim;
                    self.orbit_enabled = true;
                    info!("Camera framed {}", framing.body);
                }
            }
        }

        done
    }
}
