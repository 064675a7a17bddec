//! Controller configuration.
//!
//! This module defines the tunable parameters for a platformer controller:
//! movement speed, the jump budget, fall gravity, and the shape of the
//! circular ground probe.

use bevy::prelude::*;

/// Tunable parameters for a platformer controller.
///
/// Insert this next to [`ControllerState`](crate::state::ControllerState) and
/// [`MovementIntent`](crate::intent::MovementIntent) on the character entity.
/// Values are read every physics tick, so they can be edited live (from an
/// inspector or a tuning UI) and take effect immediately. The one exception
/// is `gravity_scale`, which is pushed to the physics body once during
/// initialization.
///
/// Distances and speeds are in world units. With the common
/// `pixels_per_meter(100.0)` Rapier setup that means pixels and
/// pixels/second.
#[derive(Component, Reflect, Debug, Clone, Copy)]
#[reflect(Component)]
pub struct ControllerConfig {
    // === Movement Settings ===
    /// Horizontal speed (units/second).
    ///
    /// The controller writes `direction * movement_speed` straight into the
    /// body's horizontal velocity each physics tick. There is no
    /// acceleration ramp; this is a hard speed, not a target.
    pub movement_speed: f32,

    // === Jump Settings ===
    /// Upward velocity applied when a jump fires (units/second).
    ///
    /// A firing jump replaces the whole velocity with `(0, jump_force)`;
    /// the horizontal drive reasserts the x component later in the same
    /// tick.
    pub jump_force: f32,

    /// Size of the jump budget, refilled while grounded.
    ///
    /// The last charge behaves differently from the rest: it fires only
    /// while grounded and is never spent. See
    /// [`apply_jump`](crate::systems::apply_jump) for the exact rules.
    pub jump_count: u32,

    /// Extra gravity stacked on top of the physics step while falling
    /// (vertical velocity below zero). `0.0` disables the boost; `2.5`
    /// gives the snappy descent most platformers use. Ascent is left at
    /// normal gravity.
    pub fall_multiplier: f32,

    // === Gravity Settings ===
    /// Gravity scale pushed to the physics body during initialization.
    pub gravity_scale: f32,

    // === Ground Probe Settings ===
    /// Radius of the circular ground probe.
    pub probe_radius: f32,

    /// Offset of the ground probe center from the character's position.
    ///
    /// Typically just below the feet. The offset is applied in world axes
    /// and deliberately ignores the character's rotation, so the facing
    /// flip and any physics-driven tilt leave ground detection unaffected.
    pub probe_offset: Vec2,

    /// Collision group bits the probe tests against.
    ///
    /// Only colliders whose group membership intersects this mask count as
    /// ground. Defaults to all bits, i.e. everything is ground.
    pub ground_mask: u32,
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self {
            // Movement settings
            movement_speed: 200.0,

            // Jump settings
            jump_force: 400.0,
            jump_count: 2,
            fall_multiplier: 2.5,

            // Gravity settings
            gravity_scale: 1.0,

            // Ground probe settings (sized for a roughly 24 unit tall capsule)
            probe_radius: 4.0,
            probe_offset: Vec2::new(0.0, -12.0),
            ground_mask: u32::MAX,
        }
    }
}

impl ControllerConfig {
    /// Create a config with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// World-space center of the ground probe for the given transform.
    ///
    /// The offset is added to the translation without applying the
    /// character's rotation. The facing flip is a visual operation and must
    /// not move the probe.
    ///
    /// # Example
    ///
    /// ```rust
    /// use bevy::prelude::*;
    /// use simple_platformer_controller::prelude::*;
    ///
    /// let config = ControllerConfig::default().with_probe_offset(Vec2::new(3.0, -12.0));
    /// let transform = GlobalTransform::from(Transform::from_xyz(10.0, 50.0, 0.0));
    /// assert_eq!(config.probe_center(&transform), Vec2::new(13.0, 38.0));
    /// ```
    pub fn probe_center(&self, transform: &GlobalTransform) -> Vec2 {
        transform.translation().truncate() + self.probe_offset
    }

    /// Create a config tuned for responsive keyboard play.
    pub fn player() -> Self {
        Self {
            movement_speed: 220.0,
            jump_force: 420.0,
            fall_multiplier: 3.0,
            ..default()
        }
    }

    /// Create a heavy character: one hard jump, fast descent.
    pub fn heavy() -> Self {
        Self {
            movement_speed: 140.0,
            jump_force: 480.0,
            jump_count: 1,
            fall_multiplier: 4.0,
            gravity_scale: 1.5,
            ..default()
        }
    }

    /// Create a floaty character with an extra air jump.
    pub fn floaty() -> Self {
        Self {
            jump_count: 3,
            fall_multiplier: 1.5,
            gravity_scale: 0.8,
            ..default()
        }
    }

    /// Builder: set movement speed.
    pub fn with_movement_speed(mut self, speed: f32) -> Self {
        self.movement_speed = speed;
        self
    }

    /// Builder: set jump force.
    pub fn with_jump_force(mut self, force: f32) -> Self {
        self.jump_force = force;
        self
    }

    /// Builder: set the jump budget size.
    pub fn with_jump_count(mut self, count: u32) -> Self {
        self.jump_count = count;
        self
    }

    /// Builder: set the falling gravity multiplier.
    pub fn with_fall_multiplier(mut self, multiplier: f32) -> Self {
        self.fall_multiplier = multiplier;
        self
    }

    /// Builder: set the body gravity scale.
    pub fn with_gravity_scale(mut self, scale: f32) -> Self {
        self.gravity_scale = scale;
        self
    }

    /// Builder: set probe radius and offset together.
    pub fn with_probe(mut self, radius: f32, offset: Vec2) -> Self {
        self.probe_radius = radius;
        self.probe_offset = offset;
        self
    }

    /// Builder: set the probe radius.
    pub fn with_probe_radius(mut self, radius: f32) -> Self {
        self.probe_radius = radius;
        self
    }

    /// Builder: set the probe's offset from the character position.
    pub fn with_probe_offset(mut self, offset: Vec2) -> Self {
        self.probe_offset = offset;
        self
    }

    /// Builder: set the ground collision mask.
    pub fn with_ground_mask(mut self, mask: u32) -> Self {
        self.ground_mask = mask;
        self
    }
}
