//! Platform Box Example
//!
//! A playable example with a character in a box environment featuring:
//! - A floor and walls on all sides
//! - A low platform reachable with a single jump
//! - Higher platforms that need the double jump
//!
//! ## Controls
//! - **A/D** or **Left/Right**: Move horizontally
//! - **Space** or **W/Up**: Jump (press again in the air for the double jump)
//! - **R**: Respawn (also re-applies the configured gravity scale)
//! - **Tab**: Toggle the tuning panels
//!
//! The camera follows the player. A small dot hovers on the side the
//! character is facing. Run with `--features debug-draw` to see the ground
//! probe circles.

use bevy::prelude::*;
use bevy::sprite::ColorMaterial;
use bevy_egui::input::EguiWantsInput;
use bevy_egui::{egui, EguiContexts, EguiPlugin, EguiPrimaryContextPass};
use bevy_rapier2d::prelude::*;
use simple_platformer_controller::prelude::*;

// ==================== Constants ====================

const PLAYER_HALF_HEIGHT: f32 = 8.0;
const PLAYER_RADIUS: f32 = 4.0;

const BOX_WIDTH: f32 = 800.0;
const BOX_HEIGHT: f32 = 600.0;
const WALL_THICKNESS: f32 = 20.0;

const PX_PER_M: f32 = 100.0; // Pixels per meter for Rapier

// ==================== Main ====================

fn spawn_position() -> Vec2 {
    Vec2::new(-250.0, -BOX_HEIGHT / 2.0 + 30.0)
}

fn main() {
    App::new()
        .add_plugins(DefaultPlugins.set(WindowPlugin {
            primary_window: Some(Window {
                title: "Platform Box - Simple Platformer Controller".into(),
                resolution: (1280.0, 720.0).into(),
                ..default()
            }),
            ..default()
        }))
        // Physics
        .add_plugins(RapierPhysicsPlugin::<NoUserData>::pixels_per_meter(
            PX_PER_M,
        ))
        .add_plugins(RapierDebugRenderPlugin::default())
        // Platformer controller
        .add_plugins(PlatformerControllerPlugin::<Rapier2dBackend>::default())
        // Egui for the tuning panels
        .add_plugins(EguiPlugin::default())
        .init_resource::<PanelState>()
        .add_systems(Startup, setup)
        .add_systems(
            Update,
            (
                handle_input,
                respawn_player,
                camera_follow,
                facing_indicator_follow,
            ),
        )
        .add_systems(EguiPrimaryContextPass, (settings_panel, state_panel))
        .run();
}

// ==================== Setup ====================

/// Marker component for the player entity.
#[derive(Component)]
struct Player;

/// Marker for the dot that hovers on the facing side of the player.
#[derive(Component)]
struct FacingIndicator;

fn setup(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<ColorMaterial>>,
) {
    commands.spawn(Camera2d);

    spawn_box(&mut commands, &mut meshes, &mut materials);
    spawn_platforms(&mut commands, &mut meshes, &mut materials);
    spawn_player(&mut commands, &mut meshes, &mut materials);

    // UI instructions - use Pickable::IGNORE to prevent blocking mouse events
    commands.spawn((
        Text::new("A/D: Move | Space/W: Jump (twice for double jump) | R: Respawn | Tab: Panels"),
        TextFont {
            font_size: 20.0,
            ..default()
        },
        TextColor(Color::WHITE),
        Node {
            position_type: PositionType::Absolute,
            top: Val::Px(10.0),
            left: Val::Px(10.0),
            ..default()
        },
        Pickable::IGNORE,
    ));
}

fn spawn_box(
    commands: &mut Commands,
    meshes: &mut ResMut<Assets<Mesh>>,
    materials: &mut ResMut<Assets<ColorMaterial>>,
) {
    let half_width = BOX_WIDTH / 2.0;
    let half_height = BOX_HEIGHT / 2.0;
    let half_wall = WALL_THICKNESS / 2.0;
    let wall_color = Color::srgb(0.3, 0.3, 0.3);

    // Floor
    spawn_static_box(
        commands,
        meshes,
        materials,
        Vec2::new(0.0, -half_height - half_wall),
        Vec2::new(half_width + WALL_THICKNESS, half_wall),
        wall_color,
    );

    // Ceiling
    spawn_static_box(
        commands,
        meshes,
        materials,
        Vec2::new(0.0, half_height + half_wall),
        Vec2::new(half_width + WALL_THICKNESS, half_wall),
        wall_color,
    );

    // Left wall
    spawn_static_box(
        commands,
        meshes,
        materials,
        Vec2::new(-half_width - half_wall, 0.0),
        Vec2::new(half_wall, half_height),
        wall_color,
    );

    // Right wall
    spawn_static_box(
        commands,
        meshes,
        materials,
        Vec2::new(half_width + half_wall, 0.0),
        Vec2::new(half_wall, half_height),
        wall_color,
    );
}

/// Three platforms at increasing heights.
///
/// With the default config a single jump clears about 80 units, so the
/// first platform takes one jump, the second one takes a jump off the first
/// or a double jump from the floor, and the top one needs a double jump off
/// the second.
fn spawn_platforms(
    commands: &mut Commands,
    meshes: &mut ResMut<Assets<Mesh>>,
    materials: &mut ResMut<Assets<ColorMaterial>>,
) {
    let platform_color = Color::srgb(0.4, 0.5, 0.3);

    spawn_static_box(
        commands,
        meshes,
        materials,
        Vec2::new(-150.0, -250.0),
        Vec2::new(80.0, 10.0),
        platform_color,
    );
    spawn_static_box(
        commands,
        meshes,
        materials,
        Vec2::new(120.0, -180.0),
        Vec2::new(80.0, 10.0),
        platform_color,
    );
    spawn_static_box(
        commands,
        meshes,
        materials,
        Vec2::new(-80.0, -50.0),
        Vec2::new(70.0, 10.0),
        platform_color,
    );
}

fn spawn_static_box(
    commands: &mut Commands,
    meshes: &mut ResMut<Assets<Mesh>>,
    materials: &mut ResMut<Assets<ColorMaterial>>,
    position: Vec2,
    half_size: Vec2,
    color: Color,
) {
    let mesh = meshes.add(Rectangle::new(half_size.x * 2.0, half_size.y * 2.0));
    let material = materials.add(ColorMaterial::from_color(color));

    commands.spawn((
        Transform::from_translation(position.extend(0.0)),
        GlobalTransform::default(),
        RigidBody::Fixed,
        Collider::cuboid(half_size.x, half_size.y),
        Mesh2d(mesh),
        MeshMaterial2d(material),
    ));
}

fn spawn_player(
    commands: &mut Commands,
    meshes: &mut ResMut<Assets<Mesh>>,
    materials: &mut ResMut<Assets<ColorMaterial>>,
) {
    let spawn_pos = spawn_position();

    let mesh = meshes.add(Capsule2d::new(PLAYER_RADIUS, PLAYER_HALF_HEIGHT * 2.0));
    let material = materials.add(ColorMaterial::from_color(Color::srgb(0.2, 0.6, 0.9)));

    commands
        .spawn((
            Player,
            Transform::from_translation(spawn_pos.extend(1.0)),
            GlobalTransform::default(),
            Mesh2d(mesh),
            MeshMaterial2d(material),
        ))
        .insert((
            // Platformer controller
            ControllerConfig::player(),
            ControllerState::new(),
            MovementIntent::default(),
        ))
        .insert((
            // Physics
            Rapier2dPlatformerBundle::new(),
            Collider::capsule_y(PLAYER_HALF_HEIGHT, PLAYER_RADIUS),
        ));

    // Facing indicator, driven from ControllerState rather than the
    // transform so it stays readable whatever the physics backend does with
    // the body rotation.
    let dot_mesh = meshes.add(Circle::new(2.0));
    let dot_material = materials.add(ColorMaterial::from_color(Color::srgb(0.95, 0.9, 0.3)));
    commands.spawn((
        FacingIndicator,
        Transform::from_translation(spawn_pos.extend(2.0)),
        GlobalTransform::default(),
        Mesh2d(dot_mesh),
        MeshMaterial2d(dot_material),
    ));
}

// ==================== Input ====================

/// Handles keyboard input for movement and jumping.
///
/// Input is disabled when egui wants keyboard focus (e.g., when typing in a
/// panel field).
fn handle_input(
    keyboard: Res<ButtonInput<KeyCode>>,
    egui_wants_input: Res<EguiWantsInput>,
    mut query: Query<&mut MovementIntent, With<Player>>,
) {
    if egui_wants_input.wants_any_keyboard_input() {
        for mut intent in &mut query {
            intent.clear();
        }
        return;
    }

    for mut intent in &mut query {
        // Horizontal input (A/D or Left/Right)
        let mut horizontal = 0.0;
        if keyboard.pressed(KeyCode::KeyA) || keyboard.pressed(KeyCode::ArrowLeft) {
            horizontal -= 1.0;
        }
        if keyboard.pressed(KeyCode::KeyD) || keyboard.pressed(KeyCode::ArrowRight) {
            horizontal += 1.0;
        }
        intent.set_direction(horizontal);

        // Jump on Space, W or Up - pass the held state, the controller
        // latches the rising edge itself
        let jump_held = keyboard.pressed(KeyCode::Space)
            || keyboard.pressed(KeyCode::KeyW)
            || keyboard.pressed(KeyCode::ArrowUp);
        intent.set_jump_pressed(jump_held);
    }
}

/// Respawns the player at the spawn point on R.
///
/// Replacing the controller state also re-runs body initialization on the
/// next physics tick, which is how an edited gravity scale from the panel
/// gets applied.
fn respawn_player(
    keyboard: Res<ButtonInput<KeyCode>>,
    mut query: Query<
        (
            &mut Transform,
            &mut Velocity,
            &mut ControllerState,
            &mut MovementIntent,
        ),
        With<Player>,
    >,
) {
    if !keyboard.just_pressed(KeyCode::KeyR) {
        return;
    }

    for (mut transform, mut velocity, mut state, mut intent) in &mut query {
        transform.translation = spawn_position().extend(1.0);
        transform.rotation = Quat::IDENTITY;
        velocity.linvel = Vec2::ZERO;
        velocity.angvel = 0.0;
        *state = ControllerState::new();
        intent.clear();
    }
}

// ==================== Camera and Indicator ====================

/// Smoothly follows the player with the camera.
fn camera_follow(
    player_query: Query<&Transform, (With<Player>, Without<Camera2d>)>,
    mut camera_query: Query<&mut Transform, With<Camera2d>>,
) {
    let Ok(player_transform) = player_query.single() else {
        return;
    };
    let Ok(mut camera_transform) = camera_query.single_mut() else {
        return;
    };

    let target = player_transform.translation.xy();
    let current = camera_transform.translation.xy();
    let smoothed = current.lerp(target, 0.1);
    camera_transform.translation.x = smoothed.x;
    camera_transform.translation.y = smoothed.y;
}

/// Keeps the facing dot hovering on the side the character faces.
fn facing_indicator_follow(
    player_query: Query<(&Transform, &ControllerState), (With<Player>, Without<FacingIndicator>)>,
    mut indicator_query: Query<&mut Transform, With<FacingIndicator>>,
) {
    let Ok((player_transform, state)) = player_query.single() else {
        return;
    };
    let Ok(mut transform) = indicator_query.single_mut() else {
        return;
    };

    let offset = Vec2::new(
        (PLAYER_RADIUS + 4.0) * state.facing_direction(),
        PLAYER_HALF_HEIGHT,
    );
    transform.translation = (player_transform.translation.xy() + offset).extend(2.0);
}

// ==================== Panels ====================

/// Shared panel state.
#[derive(Resource)]
struct PanelState {
    /// Number of frames since startup (used to skip initial frames).
    frame_count: u32,
    /// Whether the panels are currently visible.
    show_panels: bool,
}

impl Default for PanelState {
    fn default() -> Self {
        Self {
            frame_count: 0,
            show_panels: true,
        }
    }
}

/// Renders the controller settings window.
fn settings_panel(
    mut contexts: EguiContexts,
    mut config_query: Query<&mut ControllerConfig, With<Player>>,
    keyboard: Res<ButtonInput<KeyCode>>,
    mut panel_state: ResMut<PanelState>,
) {
    // Skip the first few frames to ensure egui is fully initialized
    panel_state.frame_count += 1;
    if panel_state.frame_count <= 2 {
        return;
    }

    let Ok(ctx) = contexts.ctx_mut() else {
        return;
    };

    if keyboard.just_pressed(KeyCode::Tab) {
        panel_state.show_panels = !panel_state.show_panels;
    }

    egui::Area::new(egui::Id::new("panel_hint_area"))
        .fixed_pos(egui::pos2(10.0, 40.0))
        .show(ctx, |ui| {
            ui.colored_label(
                egui::Color32::from_rgb(200, 200, 200),
                if panel_state.show_panels {
                    "Press Tab to hide panels"
                } else {
                    "Press Tab to show panels"
                },
            );
        });

    if !panel_state.show_panels {
        return;
    }

    let Ok(mut config) = config_query.single_mut() else {
        return;
    };

    egui::Window::new("Controller Settings")
        .default_pos([10.0, 80.0])
        .default_width(300.0)
        .collapsible(true)
        .resizable(true)
        .show(ctx, |ui| {
            egui::ScrollArea::vertical().show(ui, |ui| {
                movement_settings_ui(ui, &mut config);
                jump_settings_ui(ui, &mut config);
                probe_settings_ui(ui, &mut config);
            });
        });
}

/// Renders the movement settings collapsible section.
fn movement_settings_ui(ui: &mut egui::Ui, config: &mut ControllerConfig) {
    ui.collapsing("Movement Settings", |ui| {
        ui.horizontal(|ui| {
            ui.label("Move Speed:");
            ui.add(
                egui::DragValue::new(&mut config.movement_speed)
                    .speed(1.0)
                    .range(0.0..=2000.0),
            );
        });
    });
}

/// Renders the jump settings collapsible section.
fn jump_settings_ui(ui: &mut egui::Ui, config: &mut ControllerConfig) {
    ui.collapsing("Jump Settings", |ui| {
        ui.horizontal(|ui| {
            ui.label("Jump Force:");
            ui.add(
                egui::DragValue::new(&mut config.jump_force)
                    .speed(5.0)
                    .range(0.0..=2000.0),
            );
        });
        ui.horizontal(|ui| {
            ui.label("Jump Count:");
            ui.add(
                egui::DragValue::new(&mut config.jump_count)
                    .speed(0.05)
                    .range(0..=10),
            );
        });
        ui.horizontal(|ui| {
            ui.label("Fall Multiplier:");
            ui.add(
                egui::DragValue::new(&mut config.fall_multiplier)
                    .speed(0.05)
                    .range(0.0..=10.0),
            );
        });
        ui.horizontal(|ui| {
            ui.label("Gravity Scale:");
            ui.add(
                egui::DragValue::new(&mut config.gravity_scale)
                    .speed(0.05)
                    .range(-2.0..=10.0),
            );
        });
        ui.label("(gravity scale is applied on respawn, press R)");
    });
}

/// Renders the ground probe settings collapsible section.
fn probe_settings_ui(ui: &mut egui::Ui, config: &mut ControllerConfig) {
    ui.collapsing("Ground Probe Settings", |ui| {
        ui.horizontal(|ui| {
            ui.label("Probe Radius:");
            ui.add(
                egui::DragValue::new(&mut config.probe_radius)
                    .speed(0.1)
                    .range(0.0..=50.0),
            );
        });
        ui.horizontal(|ui| {
            ui.label("Probe Offset X:");
            ui.add(
                egui::DragValue::new(&mut config.probe_offset.x)
                    .speed(0.1)
                    .range(-50.0..=50.0),
            );
        });
        ui.horizontal(|ui| {
            ui.label("Probe Offset Y:");
            ui.add(
                egui::DragValue::new(&mut config.probe_offset.y)
                    .speed(0.1)
                    .range(-50.0..=50.0),
            );
        });
    });
}

/// Renders the live state window.
fn state_panel(
    mut contexts: EguiContexts,
    state_query: Query<(&ControllerState, &MovementIntent, &Transform, &Velocity), With<Player>>,
    panel_state: Res<PanelState>,
) {
    if panel_state.frame_count <= 2 || !panel_state.show_panels {
        return;
    }

    let Ok(ctx) = contexts.ctx_mut() else {
        return;
    };
    let Ok((state, intent, transform, velocity)) = state_query.single() else {
        return;
    };

    egui::Window::new("Controller State")
        .default_pos([320.0, 80.0])
        .default_width(260.0)
        .collapsible(true)
        .resizable(true)
        .show(ctx, |ui| {
            ui.label(format!(
                "Position: ({:.1}, {:.1})",
                transform.translation.x, transform.translation.y
            ));
            ui.label(format!(
                "Velocity: ({:.1}, {:.1})",
                velocity.linvel.x, velocity.linvel.y
            ));
            ui.separator();

            ui.horizontal(|ui| {
                ui.label("Contact:");
                if state.grounded {
                    ui.colored_label(egui::Color32::from_rgb(100, 220, 100), "GROUNDED");
                } else {
                    ui.colored_label(egui::Color32::from_rgb(230, 160, 80), "AIRBORNE");
                }
            });
            ui.label(format!("Jumps Remaining: {}", state.jumps_remaining));
            ui.label(format!(
                "Facing: {}",
                if state.facing_right { "RIGHT" } else { "LEFT" }
            ));
            ui.separator();

            ui.label(format!("Intent Direction: {:+.2}", intent.direction));
            ui.label(format!("Jump Held: {}", intent.jump_pressed));
        });
}
