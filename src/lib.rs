//! # `simple_platformer_controller`
//!
//! A minimal 2D platformer character controller with physics backend
//! abstraction.
//!
//! This crate provides a small, predictable controller that:
//! - Drives horizontal velocity directly from a movement intent
//! - Supports multi-jump with a budget that refills on ground contact
//! - Boosts gravity while falling for a snappy descent arc
//! - Checks ground contact with a circular overlap probe
//! - Flips facing with a visual half-turn yaw, tracked in state
//! - Abstracts the physics backend for easy swapping (Rapier2D included)
//!
//! ## Architecture
//!
//! A character is described by three components:
//! [`ControllerConfig`](config::ControllerConfig) for tuning,
//! [`MovementIntent`](intent::MovementIntent) for input, and
//! [`ControllerState`](state::ControllerState) for results. Input latching
//! and the facing flip run in `Update`; everything that touches the physics
//! body runs in `FixedUpdate`, ordered by [`PlatformerSet`]. A jump press is
//! latched on its rising edge and consumed by exactly one evaluation on the
//! next physics tick.
//!
//! ## Usage
//!
//! ```rust
//! use bevy::prelude::*;
//! use simple_platformer_controller::prelude::*;
//!
//! // Controller components for a character entity
//! let config = ControllerConfig::player();
//! let state = ControllerState::new();
//! let intent = MovementIntent::default();
//!
//! // These are spawned together with the backend's physics components
//! ```
//!
//! With the Rapier2D backend:
//!
//! ```rust,no_run
//! use bevy::prelude::*;
//! use bevy_rapier2d::prelude::*;
//! use simple_platformer_controller::prelude::*;
//!
//! App::new()
//!     .add_plugins(DefaultPlugins)
//!     .add_plugins(RapierPhysicsPlugin::<NoUserData>::pixels_per_meter(100.0))
//!     .add_plugins(PlatformerControllerPlugin::<Rapier2dBackend>::default())
//!     .run();
//! ```

use bevy::prelude::*;

pub mod backend;
pub mod config;
pub mod intent;
pub mod state;
pub mod systems;

#[cfg(feature = "rapier2d")]
pub mod rapier;

pub mod prelude {
    //! Convenient re-exports for common usage.

    pub use crate::backend::{NoOpBackend, NoOpBackendPlugin, PlatformerPhysicsBackend};
    pub use crate::config::ControllerConfig;
    pub use crate::intent::MovementIntent;
    pub use crate::state::{Airborne, ControllerState, Grounded};
    pub use crate::{PlatformerControllerPlugin, PlatformerSet};

    #[cfg(feature = "rapier2d")]
    pub use crate::rapier::{Rapier2dBackend, Rapier2dPlatformerBundle};
}

/// System sets for the platformer controller, in execution order.
///
/// [`Input`](PlatformerSet::Input) runs in `Update`; the rest run in
/// `FixedUpdate` and are chained by the plugin. Backend probe systems
/// belong in [`GroundProbe`](PlatformerSet::GroundProbe). Use these sets to
/// order your own systems relative to the controller, e.g. an input reader
/// with `.before(PlatformerSet::Input)`.
#[derive(SystemSet, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PlatformerSet {
    /// `Update`: latch jump presses and apply the facing flip.
    Input,
    /// `FixedUpdate`: one-time body setup for new controllers.
    Init,
    /// `FixedUpdate`: the backend ground probe writes
    /// `ControllerState::grounded`.
    GroundProbe,
    /// `FixedUpdate`: refill the jump budget from ground contact.
    Contact,
    /// `FixedUpdate`: fall boost, jump evaluation, horizontal drive.
    Motion,
    /// `FixedUpdate`: sync the `Grounded`/`Airborne` markers.
    Markers,
}

/// Main plugin for the platformer controller system.
///
/// This plugin is generic over a physics backend `B` which provides the
/// actual physics operations (velocity access, gravity scale, the ground
/// probe).
///
/// # Type Parameters
/// - `B`: The physics backend implementation (e.g., `Rapier2dBackend`)
///
/// # Examples
///
/// With Rapier2D backend:
/// ```rust,no_run
/// use bevy::prelude::*;
/// use bevy_rapier2d::prelude::*;
/// use simple_platformer_controller::prelude::*;
///
/// App::new()
///     .add_plugins(DefaultPlugins)
///     .add_plugins(RapierPhysicsPlugin::<NoUserData>::pixels_per_meter(100.0))
///     .add_plugins(PlatformerControllerPlugin::<Rapier2dBackend>::default())
///     .run();
/// ```
pub struct PlatformerControllerPlugin<B: backend::PlatformerPhysicsBackend> {
    _marker: std::marker::PhantomData<B>,
}

impl<B: backend::PlatformerPhysicsBackend> Default for PlatformerControllerPlugin<B> {
    fn default() -> Self {
        Self {
            _marker: std::marker::PhantomData,
        }
    }
}

impl<B: backend::PlatformerPhysicsBackend> Plugin for PlatformerControllerPlugin<B> {
    fn build(&self, app: &mut App) {
        // Register core types
        app.register_type::<config::ControllerConfig>();
        app.register_type::<intent::MovementIntent>();
        app.register_type::<state::ControllerState>();
        app.register_type::<state::Grounded>();
        app.register_type::<state::Airborne>();

        // Add the physics backend plugin (brings the ground probe)
        app.add_plugins(B::plugin());

        app.configure_sets(
            FixedUpdate,
            (
                PlatformerSet::Init,
                PlatformerSet::GroundProbe,
                PlatformerSet::Contact,
                PlatformerSet::Motion,
                PlatformerSet::Markers,
            )
                .chain(),
        );

        app.add_systems(
            Update,
            (systems::queue_jump_presses, systems::apply_facing_flip)
                .chain()
                .in_set(PlatformerSet::Input),
        );

        app.add_systems(
            FixedUpdate,
            (
                systems::initialize_bodies::<B>.in_set(PlatformerSet::Init),
                systems::restore_jump_budget.in_set(PlatformerSet::Contact),
                (
                    systems::apply_fall_multiplier::<B>,
                    systems::apply_jump::<B>,
                    systems::apply_horizontal_motion::<B>,
                )
                    .chain()
                    .in_set(PlatformerSet::Motion),
                systems::sync_state_markers.in_set(PlatformerSet::Markers),
            ),
        );

        #[cfg(feature = "debug-draw")]
        app.add_systems(
            Update,
            systems::draw_ground_probes.after(PlatformerSet::Input),
        );
    }
}
