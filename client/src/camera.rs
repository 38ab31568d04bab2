use bevy::{
    camera::Exposure,
    core_pipeline::tonemapping::Tonemapping,
    light::{CascadeShadowConfigBuilder, DirectionalLightShadowMap},
    prelude::*,
};
use shared::CAMERA_START;
use std::f32::consts::FRAC_PI_2;

/// 1.2x brighter than Bevy's default exposure.
const EXPOSURE_GAIN: f32 = 1.2;

/// Faint helper grid through the origin: 20 m across, 40 cells.
const GRID_CELLS: u32 = 40;
const GRID_SPACING: f32 = 0.5;

pub(super) fn plugin(app: &mut App) {
    app.insert_resource(ClearColor(Color::srgb_u8(0xfa, 0xfa, 0xfa)));
    app.insert_resource(AmbientLight {
        color: Color::WHITE,
        brightness: 160.0,
        ..default()
    });
    app.insert_resource(DirectionalLightShadowMap { size: 2048 });
    app.add_systems(Startup, (add_camera, add_lights));
    app.add_systems(Update, draw_floor_grid);
}

fn add_camera(mut commands: Commands) {
    let [x, y, z] = CAMERA_START;
    commands.spawn((
        Exposure {
            ev100: Exposure::EV100_BLENDER - EXPOSURE_GAIN.log2(),
        },
        Tonemapping::AcesFitted,
        Camera3d::default(),
        Projection::from(PerspectiveProjection {
            fov: 75.0_f32.to_radians(),
            near: 0.1,
            far: 1000.0,
            ..default()
        }),
        // The frame sync moves it from here on.
        Transform::from_xyz(x, y, z).looking_at(Vec3::ZERO, Vec3::Y),
    ));
}

fn add_lights(mut commands: Commands) {
    // Ceiling light, straight down.
    commands.spawn((
        Name::new("CeilingLight"),
        DirectionalLight {
            illuminance: 7_000.0,
            shadows_enabled: true,
            ..default()
        },
        // One cascade covering the whole box, like a 20 m deep shadow camera.
        CascadeShadowConfigBuilder {
            num_cascades: 1,
            minimum_distance: 0.1,
            maximum_distance: 20.0,
            first_cascade_far_bound: 20.0,
            ..default()
        }
        .build(),
        Transform::from_xyz(0.0, 10.0, 0.0).looking_at(Vec3::ZERO, Vec3::Z),
    ));

    commands.spawn((
        Name::new("FillLight"),
        PointLight {
            intensity: 300_000.0,
            range: 20.0,
            shadows_enabled: false,
            ..default()
        },
        Transform::from_xyz(3.0, 5.0, 3.0),
    ));

    // Hemisphere stand-in: the sky half comes from the ambient light, the
    // ground half is a dim grey light bouncing up from below.
    commands.spawn((
        Name::new("GroundBounce"),
        DirectionalLight {
            color: Color::srgb_u8(0x44, 0x44, 0x44),
            illuminance: 2_000.0,
            shadows_enabled: false,
            ..default()
        },
        Transform::from_xyz(0.0, -10.0, 0.0).looking_at(Vec3::ZERO, Vec3::Z),
    ));
}

fn draw_floor_grid(mut gizmos: Gizmos) {
    gizmos.grid(
        Isometry3d::from_rotation(Quat::from_rotation_x(FRAC_PI_2)),
        UVec2::splat(GRID_CELLS),
        Vec2::splat(GRID_SPACING),
        Color::srgba_u8(0xcc, 0xcc, 0xcc, 26),
    );
}
