//! Controller state and state marker components.
//!
//! [`ControllerState`] carries the runtime state the systems compute each
//! tick. [`Grounded`] and [`Airborne`] mirror its contact flag as marker
//! components for convenient query filtering.

use bevy::prelude::*;

/// Runtime state of a platformer controller.
///
/// Updated by the controller systems every physics tick. Reading it is
/// always fine; writing is normally left to the controller, though tests and
/// scripted sequences may override fields directly.
#[derive(Component, Reflect, Debug, Clone)]
#[reflect(Component)]
pub struct ControllerState {
    /// Whether the ground probe currently overlaps ground.
    pub grounded: bool,

    /// Which way the character faces. Starts facing right; flips with a
    /// half-turn yaw when the movement direction crosses the dead zone in
    /// the opposite direction.
    pub facing_right: bool,

    /// Jump charges left. Refilled to `jump_count` while grounded.
    pub jumps_remaining: u32,

    // === Internal (used by systems, kept pub(crate)) ===
    /// Whether one-time setup (gravity scale, budget seed) has run.
    pub(crate) initialized: bool,
}

impl Default for ControllerState {
    fn default() -> Self {
        Self {
            grounded: false,
            facing_right: true,
            jumps_remaining: 0,
            initialized: false,
        }
    }
}

impl ControllerState {
    /// Create a fresh state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Facing as a sign: `1.0` when facing right, `-1.0` when facing left.
    #[inline]
    pub fn facing_direction(&self) -> f32 {
        if self.facing_right {
            1.0
        } else {
            -1.0
        }
    }
}

/// Marker component indicating the character is grounded.
///
/// Added automatically when the ground probe overlaps ground. Removed when
/// the character becomes airborne.
///
/// This is a marker component - it has no data, just indicates state.
///
/// # Example
///
/// ```rust
/// use bevy::prelude::*;
/// use simple_platformer_controller::prelude::*;
///
/// // Grounded is a marker component - just use it in queries
/// fn check_grounded(grounded: Option<&Grounded>) -> bool {
///     grounded.is_some()
/// }
/// ```
#[derive(Component, Reflect, Debug, Clone, Copy, Default)]
#[reflect(Component)]
pub struct Grounded;

/// Marker component indicating the character is airborne.
///
/// Added automatically when the ground probe loses contact.
/// Mutually exclusive with [`Grounded`].
#[derive(Component, Reflect, Debug, Clone, Copy, Default)]
#[reflect(Component)]
pub struct Airborne;
