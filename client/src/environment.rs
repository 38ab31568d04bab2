use crate::{
    convert::{quat, vec3},
    simulation::{BodyEntityMapping, EnvironmentRebuilt, FrameSet, SimulationResource},
};
use bevy::{
    asset::RenderAssetUsages,
    mesh::{Indices, PrimitiveTopology},
    prelude::*,
};
use shared::{
    EnvironmentParams, GROUND_SUBDIVISIONS, StaticBodyDef, StaticRole, ground_grid,
    rapier3d::prelude::RigidBodyHandle,
};

/// Translucent materials shared by the box pieces.
#[derive(Resource)]
struct EnvironmentMaterials {
    wall: Handle<StandardMaterial>,
    ground: Handle<StandardMaterial>,
}

/// Marks a render entity mirroring a fixed body.
#[derive(Component, Debug)]
pub struct EnvironmentPiece(pub StaticRole);

pub(super) fn plugin(app: &mut App) {
    app.add_systems(
        Startup,
        (create_environment_materials, spawn_initial_environment).chain(),
    );
    app.add_systems(Update, on_environment_rebuilt.in_set(FrameSet::Mirror));
}

fn create_environment_materials(
    mut commands: Commands,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    let wall = materials.add(StandardMaterial {
        base_color: Color::srgba(1.0, 1.0, 1.0, 0.1),
        alpha_mode: AlphaMode::Blend,
        double_sided: true,
        cull_mode: None,
        perceptual_roughness: 0.1,
        metallic: 0.0,
        ..default()
    });
    let ground = materials.add(StandardMaterial {
        base_color: Color::srgba_u8(0xf0, 0xf0, 0xf0, 26),
        alpha_mode: AlphaMode::Blend,
        double_sided: true,
        cull_mode: None,
        perceptual_roughness: 0.8,
        metallic: 0.1,
        ..default()
    });
    commands.insert_resource(EnvironmentMaterials { wall, ground });
}

/// Curved visual ground. The collision ground stays flat.
fn ground_mesh(params: EnvironmentParams) -> Mesh {
    let grid = ground_grid(params, GROUND_SUBDIVISIONS);
    Mesh::new(PrimitiveTopology::TriangleList, RenderAssetUsages::default())
        .with_inserted_attribute(Mesh::ATTRIBUTE_POSITION, grid.positions)
        .with_inserted_attribute(Mesh::ATTRIBUTE_UV_0, grid.uvs)
        .with_inserted_indices(Indices::U32(grid.indices))
        .with_computed_normals()
}

fn spawn_piece(
    commands: &mut Commands,
    meshes: &mut Assets<Mesh>,
    materials: &EnvironmentMaterials,
    def: &StaticBodyDef,
    params: EnvironmentParams,
) -> Entity {
    match def.role {
        StaticRole::Ground => commands
            .spawn((
                Name::new("Ground"),
                EnvironmentPiece(def.role),
                Mesh3d(meshes.add(ground_mesh(params))),
                MeshMaterial3d(materials.ground.clone()),
                // Sits on the floor's inner face.
                Transform::from_xyz(0.0, -params.box_size / 2.0, 0.0),
            ))
            .id(),
        StaticRole::Wall(side) => {
            let size = vec3(&def.shape.extents());
            commands
                .spawn((
                    Name::new(format!("Wall {side:?}")),
                    EnvironmentPiece(def.role),
                    Mesh3d(meshes.add(Cuboid::from_size(size))),
                    MeshMaterial3d(materials.wall.clone()),
                    Transform {
                        translation: vec3(&def.translation),
                        rotation: quat(&def.rotation),
                        ..default()
                    },
                ))
                .id()
        }
    }
}

fn spawn_pieces<'a>(
    commands: &mut Commands,
    meshes: &mut Assets<Mesh>,
    materials: &EnvironmentMaterials,
    mapping: &mut BodyEntityMapping,
    added: impl IntoIterator<Item = &'a (RigidBodyHandle, StaticBodyDef)>,
    params: EnvironmentParams,
) {
    for (handle, def) in added {
        let entity = spawn_piece(commands, meshes, materials, def, params);
        mapping.0.insert(*handle, entity);
    }
}

fn spawn_initial_environment(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    materials: Res<EnvironmentMaterials>,
    sim: Res<SimulationResource>,
    mut mapping: ResMut<BodyEntityMapping>,
) {
    spawn_pieces(
        &mut commands,
        &mut meshes,
        &materials,
        &mut mapping,
        sim.world().environment(),
        sim.settings().environment(),
    );
}

/// Despawn every old piece before spawning the new set, mirroring the physics rebuild.
fn on_environment_rebuilt(
    mut commands: Commands,
    mut msgs: MessageReader<EnvironmentRebuilt>,
    mut meshes: ResMut<Assets<Mesh>>,
    materials: Res<EnvironmentMaterials>,
    mut mapping: ResMut<BodyEntityMapping>,
) {
    for msg in msgs.read() {
        for handle in &msg.rebuild.removed {
            match mapping.0.remove(handle) {
                Some(entity) => commands.entity(entity).despawn(),
                None => warn!("No render entity for removed body {handle:?}"),
            }
        }
        spawn_pieces(
            &mut commands,
            &mut meshes,
            &materials,
            &mut mapping,
            &msg.rebuild.added,
            msg.params,
        );
    }
}
