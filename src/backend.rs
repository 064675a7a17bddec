//! Physics backend abstraction.
//!
//! This module defines the trait that physics backends must implement to
//! work with the platformer controller. This allows easy swapping between
//! physics engines (Rapier2D, XPBD, custom, etc.).

use bevy::prelude::*;

/// Trait for physics backend implementations.
///
/// Body access goes through static methods on `&World` / `&mut World`, which
/// keeps the controller systems engine-agnostic. The ground probe is the one
/// concern that cannot be expressed this way (engines keep spatial query
/// state in their own resources), so each backend registers its own probe
/// system from [`plugin`](Self::plugin), placed in the
/// [`PlatformerSet::GroundProbe`](crate::PlatformerSet::GroundProbe) set.
///
/// All body methods must tolerate entities without a body: return `None` or
/// do nothing rather than panic.
///
/// For an example implementation, see the `rapier` module's
/// `Rapier2dBackend` which implements this trait for Bevy Rapier2D.
pub trait PlatformerPhysicsBackend: 'static + Send + Sync {
    /// Returns the plugin that sets up this backend.
    ///
    /// Added automatically by
    /// [`PlatformerControllerPlugin`](crate::PlatformerControllerPlugin).
    fn plugin() -> impl Plugin;

    /// Get the linear velocity of an entity's body, or `None` if it has
    /// none.
    fn get_velocity(world: &World, entity: Entity) -> Option<Vec2>;

    /// Set the linear velocity of an entity's body. Does nothing if the
    /// entity has no body.
    fn set_velocity(world: &mut World, entity: Entity, velocity: Vec2);

    /// Set the gravity scale of an entity's body.
    fn set_gravity_scale(world: &mut World, entity: Entity, scale: f32);

    /// Get the global gravity vector of the physics world.
    fn get_world_gravity(world: &World) -> Vec2;

    /// Get the fixed timestep delta time.
    ///
    /// Falls back to 1/60 when `Time<Fixed>` is absent or reports a zero
    /// delta, which happens when the fixed schedule is driven by hand in
    /// tests.
    fn get_fixed_timestep(world: &World) -> f32 {
        world
            .get_resource::<Time<Fixed>>()
            .map(|time| time.delta_secs())
            .filter(|&dt| dt > 0.0)
            .unwrap_or(1.0 / 60.0)
    }
}

/// Backend that performs no physics access at all.
///
/// Velocity reads return `Vec2::ZERO` and writes are dropped, so the
/// controller runs its full schedule without moving anything. Useful for
/// headless wiring tests and server builds that only need input latching and
/// facing state.
pub struct NoOpBackend;

/// Empty plugin for backends that don't need additional setup.
///
/// Registering no probe system also means `grounded` stays wherever other
/// code puts it.
pub struct NoOpBackendPlugin;

impl Plugin for NoOpBackendPlugin {
    fn build(&self, _app: &mut App) {}
}

impl PlatformerPhysicsBackend for NoOpBackend {
    fn plugin() -> impl Plugin {
        NoOpBackendPlugin
    }

    fn get_velocity(_world: &World, _entity: Entity) -> Option<Vec2> {
        Some(Vec2::ZERO)
    }

    fn set_velocity(_world: &mut World, _entity: Entity, _velocity: Vec2) {}

    fn set_gravity_scale(_world: &mut World, _entity: Entity, _scale: f32) {}

    fn get_world_gravity(_world: &World) -> Vec2 {
        Vec2::new(0.0, -9.81)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixed_timestep_falls_back_without_time() {
        let world = World::new();
        assert_eq!(NoOpBackend::get_fixed_timestep(&world), 1.0 / 60.0);
    }

    #[test]
    fn fixed_timestep_falls_back_on_zero_delta() {
        let mut world = World::new();
        // A fresh fixed clock has not accumulated a delta yet.
        world.insert_resource(Time::<Fixed>::default());
        assert_eq!(NoOpBackend::get_fixed_timestep(&world), 1.0 / 60.0);
    }

    #[test]
    fn noop_backend_drops_writes() {
        let mut world = World::new();
        let entity = world.spawn_empty().id();
        NoOpBackend::set_velocity(&mut world, entity, Vec2::new(5.0, 5.0));
        assert_eq!(NoOpBackend::get_velocity(&world, entity), Some(Vec2::ZERO));
    }
}
