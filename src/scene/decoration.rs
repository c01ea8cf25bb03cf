//! Decorations attached to bodies: orbit rings and planetary rings.
//!
//! The two kinds are distinct types so visibility decisions switch on the
//! declared [`DecorationKind`] rather than on how a decoration is drawn.

use crate::data::RingData;

/// Half the width of an orbit ring annulus, in render units.
pub const ORBIT_RING_HALF_WIDTH: f32 = 0.25;

/// Declared kind of a decoration.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum DecorationKind {
    /// Untextured annulus marking a body's circular path.
    OrbitRing,
    /// Textured annulus physically attached to a body.
    PlanetaryRing,
}

/// Common capability of everything drawn around a body.
pub trait Decoration {
    fn kind(&self) -> DecorationKind;

    /// Name of the body this decoration belongs to.
    fn attached_body(&self) -> &str;

    fn is_visible(&self) -> bool;

    fn show(&mut self);

    fn hide(&mut self);

    fn set_visible(&mut self, visible: bool) {
        if visible {
            self.show();
        } else {
            self.hide();
        }
    }
}

/// Annulus centred on the system origin at a body's orbital distance.
#[derive(Clone, Debug, PartialEq)]
pub struct OrbitRing {
    body: String,
    radius: f32,
    visible: bool,
}

impl OrbitRing {
    pub fn new(body: &str, radius: f32) -> Self {
        Self {
            body: body.to_string(),
            radius,
            visible: true,
        }
    }

    pub fn radius(&self) -> f32 {
        self.radius
    }

    pub fn inner_radius(&self) -> f32 {
        (self.radius - ORBIT_RING_HALF_WIDTH).max(0.0)
    }

    pub fn outer_radius(&self) -> f32 {
        self.radius + ORBIT_RING_HALF_WIDTH
    }
}

impl Decoration for OrbitRing {
    fn kind(&self) -> DecorationKind {
        DecorationKind::OrbitRing
    }

    fn attached_body(&self) -> &str {
        &self.body
    }

    fn is_visible(&self) -> bool {
        self.visible
    }

    fn show(&mut self) {
        self.visible = true;
    }

    fn hide(&mut self) {
        self.visible = false;
    }
}

/// Textured ring travelling with its body.
#[derive(Clone, Debug, PartialEq)]
pub struct PlanetaryRing {
    body: String,
    ring: RingData,
    visible: bool,
}

impl PlanetaryRing {
    pub fn new(body: &str, ring: RingData) -> Self {
        Self {
            body: body.to_string(),
            ring,
            visible: true,
        }
    }

    pub fn data(&self) -> &RingData {
        &self.ring
    }
}

impl Decoration for PlanetaryRing {
    fn kind(&self) -> DecorationKind {
        DecorationKind::PlanetaryRing
    }

    fn attached_body(&self) -> &str {
        &self.body
    }

    fn is_visible(&self) -> bool {
        self.visible
    }

    fn show(&mut self) {
        self.visible = true;
    }

    fn hide(&mut self) {
        self.visible = false;
    }
}
