// Interactive cloth demo: drag the left mouse button to cut constraints,
// hold the right button to push the cloth around, tap W for a gust of
// wind. Arrow keys pan the camera, `,` and `.` zoom, Q quits.
use std::time::Duration;

use bevy::app::AppExit;
use bevy::diagnostic::{DiagnosticsStore, FrameTimeDiagnosticsPlugin};
use bevy::prelude::*;
use cloth2d::config::constants::{SIM_HEIGHT, SIM_WIDTH};
use cloth2d::solver::integrate_particles;
use cloth2d::{ClothPlugin, ClothState, CutRequests};
use rand::Rng;

const PARTICLE_RADIUS: f32 = 2.0;
const PUSH_RADIUS: f32 = 60.0;
const PUSH_STRENGTH: f32 = 400.0;
const WIND_BASE: f32 = 120.0;

#[derive(Component)]
struct ParticleVisual {
    index: usize,
}

#[derive(Component)]
struct DiagnosticsText;

/// Simulation space is y-down with the origin at the top-left corner;
/// Bevy world space is y-up and centered.
fn sim_to_world(position: Vec2) -> Vec3 {
    Vec3::new(
        position.x - SIM_WIDTH / 2.0,
        SIM_HEIGHT / 2.0 - position.y,
        0.0,
    )
}

fn world_to_sim(position: Vec2) -> Vec2 {
    Vec2::new(
        position.x + SIM_WIDTH / 2.0,
        SIM_HEIGHT / 2.0 - position.y,
    )
}

fn init_camera(mut commands: Commands) {
    commands.spawn(Camera2d);
}

fn init_cloth_visuals(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<ColorMaterial>>,
    state: Res<ClothState>,
) {
    let circle = meshes.add(Circle::new(PARTICLE_RADIUS));
    let free = materials.add(Color::hsl(0.0, 0.85, 0.55));
    let anchored = materials.add(Color::hsl(0.0, 0.85, 0.3));

    for (index, particle) in state.particles().iter().enumerate() {
        commands.spawn((
            ParticleVisual { index },
            Mesh2d(circle.clone()),
            MeshMaterial2d(if particle.fixed {
                anchored.clone()
            } else {
                free.clone()
            }),
            Transform::from_translation(sim_to_world(particle.position)),
        ));
    }

    info!(
        "cloth ready: {} particles, {} constraints",
        state.particle_count(),
        state.constraint_count()
    );
}

/// Maps the cursor into simulation space and feeds the solver: left
/// button queues cut requests, right button pushes the cloth radially.
fn pointer_interaction(
    windows: Query<&Window>,
    camera_query: Query<(&Camera, &GlobalTransform)>,
    mouse: Res<ButtonInput<MouseButton>>,
    time: Res<Time>,
    mut cuts: ResMut<CutRequests>,
    mut state: ResMut<ClothState>,
) {
    let Ok(window) = windows.single() else {
        return;
    };
    let Some(cursor_pos) = window.cursor_position() else {
        return;
    };
    let Ok((camera, camera_transform)) = camera_query.single() else {
        return;
    };
    let Ok(world_pos) = camera.viewport_to_world_2d(camera_transform, cursor_pos) else {
        return;
    };

    let sim_pos = world_to_sim(world_pos);

    if mouse.pressed(MouseButton::Left) {
        cuts.points.push(sim_pos);
    }

    if mouse.pressed(MouseButton::Right) {
        state.apply_impulse(sim_pos, PUSH_RADIUS, PUSH_STRENGTH, time.delta_secs());
    }
}

/// W leans a randomized gust on the whole cloth. The force only lives
/// for the next integration step, so holding the key sustains the wind.
fn wind_gusts(input: Res<ButtonInput<KeyCode>>, mut state: ResMut<ClothState>) {
    if input.pressed(KeyCode::KeyW) {
        let mut rand = rand::rng();
        let gust = Vec2::new(
            WIND_BASE + rand.random_range(-40.0..=40.0),
            rand.random_range(-20.0..=20.0),
        );
        state.apply_force_to_all(gust);
    }
}

fn update_particle_transforms(
    state: Res<ClothState>,
    mut query: Query<(&ParticleVisual, &mut Transform)>,
) {
    let particles = state.particles();
    for (visual, mut transform) in query.iter_mut() {
        if let Some(particle) = particles.get(visual.index) {
            transform.translation = sim_to_world(particle.position);
        }
    }
}

/// Active constraints render as lines; cut ones simply disappear.
fn draw_constraints(state: Res<ClothState>, mut gizmos: Gizmos) {
    let particles = state.particles();
    for constraint in state.constraints().iter() {
        if !constraint.active {
            continue;
        }
        gizmos.line_2d(
            sim_to_world(particles[constraint.a].position).truncate(),
            sim_to_world(particles[constraint.b].position).truncate(),
            Color::hsl(210.0, 0.7, 0.5),
        );
    }
}

fn controls(
    mut camera_query: Query<(&mut Transform, &mut Projection), With<Camera2d>>,
    input: Res<ButtonInput<KeyCode>>,
    time: Res<Time>,
) {
    let Ok((mut transform, mut projection)) = camera_query.single_mut() else {
        return;
    };
    let fspeed = 600.0 * time.delta_secs();

    if input.pressed(KeyCode::ArrowUp) {
        transform.translation.y += fspeed;
    }
    if input.pressed(KeyCode::ArrowDown) {
        transform.translation.y -= fspeed;
    }
    if input.pressed(KeyCode::ArrowLeft) {
        transform.translation.x -= fspeed;
    }
    if input.pressed(KeyCode::ArrowRight) {
        transform.translation.x += fspeed;
    }

    if let Projection::Orthographic(projection2d) = &mut *projection {
        if input.pressed(KeyCode::Comma) {
            projection2d.scale *= 4.0f32.powf(time.delta_secs());
        }
        if input.pressed(KeyCode::Period) {
            projection2d.scale *= 0.25f32.powf(time.delta_secs());
        }
    }
}

fn quit_on_q(input: Res<ButtonInput<KeyCode>>, mut exit: MessageWriter<AppExit>) {
    if input.just_pressed(KeyCode::KeyQ) {
        exit.write(AppExit::Success);
    }
}

fn setup_diagnostics(mut commands: Commands) {
    commands.spawn((
        Text::default(),
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
        DiagnosticsText,
    ));
}

fn update_diagnostics(
    diagnostics: Res<DiagnosticsStore>,
    state: Res<ClothState>,
    mut query: Query<&mut Text, With<DiagnosticsText>>,
) {
    for mut text in &mut query {
        let fps = diagnostics
            .get(&FrameTimeDiagnosticsPlugin::FPS)
            .and_then(|fps| fps.smoothed())
            .unwrap_or(0.0);

        let frame_time = diagnostics
            .get(&FrameTimeDiagnosticsPlugin::FRAME_TIME)
            .and_then(|ft| ft.smoothed())
            .unwrap_or(0.0);

        text.0 = format!(
            "FPS: {:.1}\nFrame: {:.2}ms\nParticles: {}\nConstraints: {} / {}",
            fps,
            frame_time,
            state.particle_count(),
            state.active_constraint_count(),
            state.constraint_count(),
        );
    }
}

fn main() {
    App::new()
        .add_plugins(DefaultPlugins.set(WindowPlugin {
            primary_window: Some(Window {
                title: "Cloth Simulation".into(),
                ..default()
            }),
            ..default()
        }))
        .add_plugins(FrameTimeDiagnosticsPlugin::default())
        .add_plugins(ClothPlugin)
        .insert_resource(Time::<Fixed>::from_duration(Duration::from_secs_f64(
            1.0 / 30.0,
        )))
        .add_systems(Startup, (init_camera, init_cloth_visuals, setup_diagnostics))
        .add_systems(
            FixedUpdate,
            (pointer_interaction, wind_gusts).before(integrate_particles),
        )
        .add_systems(
            Update,
            (
                update_particle_transforms,
                draw_constraints,
                controls,
                quit_on_q,
                update_diagnostics,
            ),
        )
        .run();
}
