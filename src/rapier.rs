//! Rapier2D physics backend implementation.
//!
//! This module provides the physics backend for Bevy Rapier2D.
//! Enable with the `rapier2d` feature.

use bevy::prelude::*;
use bevy_rapier2d::geometry::Group;
use bevy_rapier2d::prelude::*;

use crate::backend::PlatformerPhysicsBackend;
use crate::config::ControllerConfig;
use crate::state::ControllerState;

/// Rapier2D physics backend for the platformer controller.
///
/// Velocity and gravity scale go through the `Velocity` and `GravityScale`
/// components. The ground probe runs as a dedicated system that receives
/// the Rapier context as a system parameter, registered by
/// [`Rapier2dBackendPlugin`].
pub struct Rapier2dBackend;

impl PlatformerPhysicsBackend for Rapier2dBackend {
    fn plugin() -> impl Plugin {
        Rapier2dBackendPlugin
    }

    fn get_velocity(world: &World, entity: Entity) -> Option<Vec2> {
        world.get::<Velocity>(entity).map(|v| v.linvel)
    }

    fn set_velocity(world: &mut World, entity: Entity, velocity: Vec2) {
        if let Some(mut vel) = world.get_mut::<Velocity>(entity) {
            vel.linvel = velocity;
        }
    }

    fn set_gravity_scale(world: &mut World, entity: Entity, scale: f32) {
        if let Some(mut gravity_scale) = world.get_mut::<GravityScale>(entity) {
            gravity_scale.0 = scale;
        } else if let Ok(mut entity_mut) = world.get_entity_mut(entity) {
            entity_mut.insert(GravityScale(scale));
        }
    }

    fn get_world_gravity(world: &World) -> Vec2 {
        // The configuration lives on the Rapier context entity.
        world
            .iter_entities()
            .find_map(|entity| entity.get::<RapierConfiguration>())
            .map(|configuration| configuration.gravity)
            .unwrap_or(Vec2::new(0.0, -9.81))
    }
}

/// Plugin that sets up Rapier2D-specific systems for the platformer
/// controller.
pub struct Rapier2dBackendPlugin;

impl Plugin for Rapier2dBackendPlugin {
    fn build(&self, app: &mut App) {
        use crate::PlatformerSet;

        app.add_systems(
            FixedUpdate,
            rapier_ground_overlap.in_set(PlatformerSet::GroundProbe),
        );
    }
}

/// Ground probe: a circular overlap test just below the feet.
///
/// The probe center comes from [`ControllerConfig::probe_center`], which
/// follows the character's translation and ignores its rotation. The
/// character's own body and any sensors are excluded from the test;
/// `ground_mask` narrows it to matching collision groups. Whatever remains
/// within `probe_radius` counts as ground.
pub fn rapier_ground_overlap(
    rapier_context: ReadRapierContext,
    mut q_controllers: Query<(
        Entity,
        &ControllerConfig,
        &mut ControllerState,
        &GlobalTransform,
    )>,
) {
    let Ok(context) = rapier_context.single() else {
        return;
    };

    for (entity, config, mut state, transform) in &mut q_controllers {
        let shape = Collider::ball(config.probe_radius);
        let filter = QueryFilter::default()
            .exclude_rigid_body(entity)
            .exclude_sensors()
            .groups(CollisionGroups::new(
                Group::ALL,
                Group::from_bits_truncate(config.ground_mask),
            ));

        state.grounded = context
            .intersection_with_shape(config.probe_center(transform), 0.0, &shape, filter)
            .is_some();
    }
}

/// Bundle for creating a platformer character with Rapier2D physics.
///
/// Provides the Rapier components the controller needs on a character
/// entity: the rigid body, velocity tracking, gravity scale, and axis
/// locking. Spawn it together with the controller components and a collider
/// of your choice.
///
/// # Example
///
/// ```ignore
/// use bevy::prelude::*;
/// use bevy_rapier2d::prelude::*;
/// use simple_platformer_controller::prelude::*;
///
/// fn spawn_player(mut commands: Commands) {
///     commands.spawn((
///         Transform::from_xyz(0.0, 100.0, 0.0),
///         ControllerConfig::player(),
///         ControllerState::new(),
///         MovementIntent::default(),
///         Rapier2dPlatformerBundle::new(),
///         Collider::capsule_y(8.0, 4.0),
///     ));
/// }
/// ```
///
/// # Defaults
///
/// - `rigid_body`: [`RigidBody::Dynamic`]
/// - `velocity`: Zero velocity
/// - `gravity_scale`: `1.0` (overwritten from the config during
///   initialization)
/// - `locked_axes`: [`LockedAxes::ROTATION_LOCKED`], the usual platformer
///   setup. The facing flip is a yaw rotation and does not interact with
///   the physics rotation, which stays locked around Z.
#[derive(Bundle)]
pub struct Rapier2dPlatformerBundle {
    /// The rigid body type. Should typically be [`RigidBody::Dynamic`].
    pub rigid_body: RigidBody,
    /// Current linear and angular velocity. Updated by Rapier each step.
    pub velocity: Velocity,
    /// Gravity scale for this body. Initialization overwrites it with
    /// `ControllerConfig::gravity_scale`.
    pub gravity_scale: GravityScale,
    /// Which axes are locked. Rotation is locked by default so the
    /// character cannot tip over.
    pub locked_axes: LockedAxes,
}

impl Default for Rapier2dPlatformerBundle {
    fn default() -> Self {
        Self::new()
    }
}

impl Rapier2dPlatformerBundle {
    /// Create a character bundle with rotation locked.
    pub fn new() -> Self {
        Self {
            rigid_body: RigidBody::Dynamic,
            velocity: Velocity::zero(),
            gravity_scale: GravityScale(1.0),
            locked_axes: LockedAxes::ROTATION_LOCKED,
        }
    }

    /// Create a character bundle with rotation enabled.
    ///
    /// There is no self-righting in this controller, so an unlocked
    /// character can tip over and stay there. Useful mostly for ragdoll
    /// moments and physics toys.
    pub fn rotation_unlocked() -> Self {
        Self {
            locked_axes: LockedAxes::empty(),
            ..Self::new()
        }
    }

    /// Set the rigid body type for the character.
    ///
    /// [`RigidBody::Dynamic`] (the default) is right for most characters.
    /// `KinematicVelocityBased` also works with this controller since
    /// motion is driven through velocity writes.
    pub fn with_body(mut self, body: RigidBody) -> Self {
        self.rigid_body = body;
        self
    }

    /// Set the initial gravity scale.
    ///
    /// Initialization overwrites this with the config value; setting it
    /// here only matters for bodies spawned without a controller.
    pub fn with_gravity_scale(mut self, scale: f32) -> Self {
        self.gravity_scale = GravityScale(scale);
        self
    }

    /// Set which axes should be locked for the rigid body.
    pub fn with_locked_axes(mut self, axes: LockedAxes) -> Self {
        self.locked_axes = axes;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_app() -> App {
        let mut app = App::new();
        app.add_plugins(MinimalPlugins);
        app.add_plugins(RapierPhysicsPlugin::<NoUserData>::default());
        app.insert_resource(Time::<Fixed>::from_hz(60.0));
        app
    }

    #[test]
    fn rapier_backend_velocity_roundtrip() {
        let mut app = create_test_app();

        let entity = app
            .world_mut()
            .spawn((
                Transform::default(),
                RigidBody::Dynamic,
                Velocity::linear(Vec2::new(50.0, 30.0)),
            ))
            .id();

        app.update();

        let vel = Rapier2dBackend::get_velocity(app.world(), entity).unwrap();
        assert!((vel.x - 50.0).abs() < 0.01);
        assert!((vel.y - 30.0).abs() < 0.01);

        Rapier2dBackend::set_velocity(app.world_mut(), entity, Vec2::new(100.0, 0.0));

        let vel = Rapier2dBackend::get_velocity(app.world(), entity).unwrap();
        assert!((vel.x - 100.0).abs() < 0.01);
        assert!(vel.y.abs() < 0.01);
    }

    #[test]
    fn velocity_is_none_without_body() {
        let mut app = create_test_app();
        let entity = app.world_mut().spawn(Transform::default()).id();
        assert!(Rapier2dBackend::get_velocity(app.world(), entity).is_none());
    }

    #[test]
    fn gravity_scale_inserted_when_missing() {
        let mut app = create_test_app();
        let entity = app
            .world_mut()
            .spawn((Transform::default(), RigidBody::Dynamic))
            .id();

        Rapier2dBackend::set_gravity_scale(app.world_mut(), entity, 2.5);

        let scale = app.world().get::<GravityScale>(entity).unwrap();
        assert_eq!(scale.0, 2.5);
    }

    #[test]
    fn gravity_scale_updated_in_place() {
        let mut app = create_test_app();
        let entity = app
            .world_mut()
            .spawn((Transform::default(), RigidBody::Dynamic, GravityScale(1.0)))
            .id();

        Rapier2dBackend::set_gravity_scale(app.world_mut(), entity, 3.0);

        let scale = app.world().get::<GravityScale>(entity).unwrap();
        assert_eq!(scale.0, 3.0);
    }

    #[test]
    fn world_gravity_reads_rapier_configuration() {
        let mut app = create_test_app();
        app.update();

        let gravity = Rapier2dBackend::get_world_gravity(app.world());
        assert!((gravity.y + 9.81).abs() < 0.01);
        assert!(gravity.x.abs() < 0.01);
    }

    #[test]
    fn platformer_bundle_creates_valid_entity() {
        let mut app = create_test_app();

        let entity = app
            .world_mut()
            .spawn((
                Transform::default(),
                Rapier2dPlatformerBundle::new(),
                Collider::capsule_y(8.0, 4.0),
            ))
            .id();

        app.update();

        assert!(app.world().get::<RigidBody>(entity).is_some());
        assert!(app.world().get::<Velocity>(entity).is_some());
        assert!(app.world().get::<GravityScale>(entity).is_some());
        assert_eq!(
            app.world().get::<LockedAxes>(entity),
            Some(&LockedAxes::ROTATION_LOCKED)
        );
    }
}
