//! Core controller systems.
//!
//! These systems implement the platformer controller behavior. Systems that
//! touch the physics body are generic over the backend and run as exclusive
//! systems in `FixedUpdate`, collecting a snapshot first and applying
//! changes through the backend afterwards. Input latching and the facing
//! flip run as ordinary query systems in `Update`.
//!
//! Execution order is fixed by [`PlatformerSet`](crate::PlatformerSet).

use std::f32::consts;

use bevy::prelude::*;

use crate::backend::PlatformerPhysicsBackend;
use crate::config::ControllerConfig;
use crate::intent::MovementIntent;
use crate::state::{Airborne, ControllerState, Grounded};

/// Input magnitude below which the facing flip ignores movement direction.
pub const FACING_DEAD_ZONE: f32 = 0.1;

/// One-time setup for newly added controllers.
///
/// Pushes `gravity_scale` to the physics body and seeds the jump budget.
/// Runs once per controller, tracked by an internal flag, so editing the
/// config later does not re-seed the budget mid-flight.
pub fn initialize_bodies<B: PlatformerPhysicsBackend>(world: &mut World) {
    let pending: Vec<(Entity, ControllerConfig)> = world
        .query::<(Entity, &ControllerConfig, &ControllerState)>()
        .iter(world)
        .filter(|(_, _, state)| !state.initialized)
        .map(|(e, config, _)| (e, *config))
        .collect();

    for (entity, config) in pending {
        if B::get_velocity(world, entity).is_none() {
            warn!(
                "platformer controller on {:?} has no physics body, motion systems will skip it",
                entity
            );
        }
        B::set_gravity_scale(world, entity, config.gravity_scale);
        if let Some(mut state) = world.get_mut::<ControllerState>(entity) {
            state.jumps_remaining = config.jump_count;
            state.initialized = true;
        }
        debug!(
            "initialized platformer controller on {:?} with {} jump charges",
            entity, config.jump_count
        );
    }
}

/// Refill the jump budget while grounded.
///
/// Runs after the ground probe so the budget reflects this tick's contact
/// state. Refilling is a plain overwrite; staying grounded keeps the budget
/// pinned at `jump_count`.
pub fn restore_jump_budget(world: &mut World) {
    let mut q_controllers = world.query::<(&ControllerConfig, &mut ControllerState)>();
    for (config, mut state) in q_controllers.iter_mut(world) {
        if state.grounded {
            state.jumps_remaining = config.jump_count;
        }
    }
}

/// Strengthen gravity while falling.
///
/// Adds `gravity.y * fall_multiplier * dt` to the vertical velocity
/// whenever it is negative. Rising and hovering bodies are left alone, so
/// ascent keeps normal gravity and only the descent gets snappier. A
/// multiplier of `0.0` turns the boost off entirely.
pub fn apply_fall_multiplier<B: PlatformerPhysicsBackend>(world: &mut World) {
    let dt = B::get_fixed_timestep(world);
    let gravity = B::get_world_gravity(world);

    let entities: Vec<(Entity, ControllerConfig)> = world
        .query::<(Entity, &ControllerConfig, &ControllerState)>()
        .iter(world)
        .filter(|(_, _, state)| state.initialized)
        .map(|(e, config, _)| (e, *config))
        .collect();

    for (entity, config) in entities {
        let Some(velocity) = B::get_velocity(world, entity) else {
            continue;
        };
        if velocity.y >= 0.0 {
            continue;
        }

        let boost = gravity.y * config.fall_multiplier * dt;
        B::set_velocity(world, entity, Vec2::new(velocity.x, velocity.y + boost));
    }
}

/// Evaluate latched jump presses.
///
/// Every latched press is consumed by exactly one evaluation, whether or
/// not a jump fires. Two rules, checked in order:
///
/// 1. Air rule: with more than one charge left, jump from anywhere and
///    spend a charge. No ground contact required.
/// 2. Ground rule: with exactly one charge left, jump only while grounded.
///    The last charge is not spent, so a grounded character can keep
///    jumping on it.
///
/// A firing jump replaces the whole velocity with `(0, jump_force)`. The
/// horizontal component is reasserted by [`apply_horizontal_motion`] later
/// in the same tick, so only the vertical kick is observable from outside.
pub fn apply_jump<B: PlatformerPhysicsBackend>(world: &mut World) {
    // Consume latches up front so presses that cannot fire are still spent.
    let mut requests: Vec<Entity> = Vec::new();
    let mut q_intents = world.query::<(Entity, &mut MovementIntent)>();
    for (entity, mut intent) in q_intents.iter_mut(world) {
        if intent.take_queued_jump() {
            requests.push(entity);
        }
    }

    for entity in requests {
        let Some((jump_force, grounded, jumps_remaining, initialized)) = world
            .get::<ControllerState>(entity)
            .zip(world.get::<ControllerConfig>(entity))
            .map(|(state, config)| {
                (
                    config.jump_force,
                    state.grounded,
                    state.jumps_remaining,
                    state.initialized,
                )
            })
        else {
            continue;
        };
        if !initialized {
            continue;
        }

        if jumps_remaining > 1 {
            B::set_velocity(world, entity, Vec2::new(0.0, jump_force));
            if let Some(mut state) = world.get_mut::<ControllerState>(entity) {
                state.jumps_remaining -= 1;
            }
        } else if grounded && jumps_remaining == 1 {
            // The last charge fires only from the ground and is not spent.
            B::set_velocity(world, entity, Vec2::new(0.0, jump_force));
        }
    }
}

/// Drive horizontal velocity from the movement intent.
///
/// Writes `direction * movement_speed` into the horizontal component every
/// physics tick while preserving vertical velocity. There is no
/// acceleration ramp; releasing input stops horizontal motion on the next
/// tick.
pub fn apply_horizontal_motion<B: PlatformerPhysicsBackend>(world: &mut World) {
    let entities: Vec<(Entity, ControllerConfig, f32)> = world
        .query::<(Entity, &ControllerConfig, &ControllerState, &MovementIntent)>()
        .iter(world)
        .filter(|(_, _, state, _)| state.initialized)
        .map(|(e, config, _, intent)| (e, *config, intent.direction))
        .collect();

    for (entity, config, direction) in entities {
        let Some(velocity) = B::get_velocity(world, entity) else {
            continue;
        };
        B::set_velocity(
            world,
            entity,
            Vec2::new(direction * config.movement_speed, velocity.y),
        );
    }
}

/// Latch jump presses on their rising edge.
///
/// Runs every `Update` so no press lands between physics ticks unseen. The
/// latch holds until the next `FixedUpdate` jump evaluation consumes it.
pub fn queue_jump_presses(mut q_intents: Query<&mut MovementIntent>) {
    for mut intent in &mut q_intents {
        intent.latch_press_edge();
    }
}

/// Turn the character to face its movement direction.
///
/// Issues a half-turn yaw on the transform and toggles
/// `ControllerState::facing_right`. The rotation is presentation only:
/// ground detection and motion ignore it, and `facing_right` stays
/// authoritative even when a physics backend owns the transform rotation.
/// Directions within [`FACING_DEAD_ZONE`] of zero leave the current facing
/// unchanged.
pub fn apply_facing_flip(
    mut q_controllers: Query<(&MovementIntent, &mut ControllerState, &mut Transform)>,
) {
    for (intent, mut state, mut transform) in &mut q_controllers {
        let turn_left = state.facing_right && intent.direction < -FACING_DEAD_ZONE;
        let turn_right = !state.facing_right && intent.direction > FACING_DEAD_ZONE;
        if turn_left || turn_right {
            state.facing_right = !state.facing_right;
            transform.rotate_y(consts::PI);
        }
    }
}

/// Sync the [`Grounded`] / [`Airborne`] marker pair from `ControllerState`.
pub fn sync_state_markers(
    mut commands: Commands,
    q_controllers: Query<(Entity, &ControllerState, Has<Grounded>, Has<Airborne>)>,
) {
    for (entity, state, has_grounded, has_airborne) in &q_controllers {
        if state.grounded && !has_grounded {
            commands.entity(entity).insert(Grounded);
            commands.entity(entity).remove::<Airborne>();
        } else if !state.grounded && has_grounded {
            commands.entity(entity).remove::<Grounded>();
            commands.entity(entity).insert(Airborne);
        } else if !state.grounded && !has_airborne && !has_grounded {
            commands.entity(entity).insert(Airborne);
        }
    }
}

/// Draw each controller's ground probe as a gizmo circle, green while
/// grounded and red while airborne.
#[cfg(feature = "debug-draw")]
pub fn draw_ground_probes(
    mut gizmos: Gizmos,
    q_probes: Query<(&ControllerConfig, &ControllerState, &GlobalTransform)>,
) {
    use bevy::color::palettes::css::{GREEN, RED};

    for (config, state, transform) in &q_probes {
        let color = if state.grounded { GREEN } else { RED };
        let center = bevy::math::Isometry2d::from_translation(config.probe_center(transform));
        gizmos.circle_2d(center, config.probe_radius, color);
    }
}
