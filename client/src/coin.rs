use crate::{
    convert::pose_transform,
    simulation::{BodyEntityMapping, CoinRespawned, FrameSet, SimulationResource},
};
use bevy::{
    asset::RenderAssetUsages,
    prelude::*,
    render::render_resource::{Extent3d, TextureDimension, TextureFormat},
};
use shared::{COIN_RADIUS, COIN_THICKNESS, FACE_TEXTURE_SIZE, Face, render_face};

/// Marks the render entity mirroring the coin body.
#[derive(Component)]
pub struct Coin;

/// Meshes and face textures shared by every coin entity.
#[derive(Resource)]
pub struct CoinAssets {
    mesh: Handle<Mesh>,
    heads: Handle<Image>,
    tails: Handle<Image>,
}

impl CoinAssets {
    pub fn texture(&self, face: Face) -> Handle<Image> {
        match face {
            Face::Heads => self.heads.clone(),
            Face::Tails => self.tails.clone(),
        }
    }
}

pub(super) fn plugin(app: &mut App) {
    app.add_systems(Startup, (load_coin_assets, spawn_initial_coin).chain());
    app.add_systems(Update, on_coin_respawned.in_set(FrameSet::Mirror));
}

fn face_image(face: Face) -> Image {
    let face_image = render_face(face.label(), face, FACE_TEXTURE_SIZE);
    Image::new(
        Extent3d {
            width: face_image.size,
            height: face_image.size,
            depth_or_array_layers: 1,
        },
        TextureDimension::D2,
        face_image.rgba,
        TextureFormat::Rgba8UnormSrgb,
        RenderAssetUsages::RENDER_WORLD,
    )
}

fn load_coin_assets(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut images: ResMut<Assets<Image>>,
) {
    commands.insert_resource(CoinAssets {
        mesh: meshes.add(Cylinder::new(COIN_RADIUS, COIN_THICKNESS).mesh().resolution(32)),
        heads: images.add(face_image(Face::Heads)),
        tails: images.add(face_image(Face::Tails)),
    });
}

fn spawn_coin_entity(
    commands: &mut Commands,
    materials: &mut Assets<StandardMaterial>,
    assets: &CoinAssets,
    sim: &SimulationResource,
) -> Option<Entity> {
    let pose = sim.world().coin_pose()?;
    let material = materials.add(StandardMaterial {
        base_color: Color::WHITE,
        base_color_texture: Some(assets.texture(sim.bound_face())),
        metallic: 0.4,
        perceptual_roughness: 0.3,
        ..default()
    });

    let entity = commands
        .spawn((
            Name::new("Coin"),
            Coin,
            Mesh3d(assets.mesh.clone()),
            MeshMaterial3d(material),
            pose_transform(&pose),
        ))
        .id();
    Some(entity)
}

fn spawn_initial_coin(
    mut commands: Commands,
    mut materials: ResMut<Assets<StandardMaterial>>,
    assets: Res<CoinAssets>,
    sim: Res<SimulationResource>,
    mut mapping: ResMut<BodyEntityMapping>,
) {
    let Some(handle) = sim.world().coin_handle() else {
        return;
    };
    if let Some(entity) = spawn_coin_entity(&mut commands, &mut materials, &assets, &sim) {
        mapping.0.insert(handle, entity);
    }
}

fn on_coin_respawned(
    mut commands: Commands,
    mut msgs: MessageReader<CoinRespawned>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    assets: Res<CoinAssets>,
    sim: Res<SimulationResource>,
    mut mapping: ResMut<BodyEntityMapping>,
) {
    for CoinRespawned(respawn) in msgs.read() {
        if let Some(old) = respawn.removed.and_then(|h| mapping.0.remove(&h)) {
            commands.entity(old).despawn();
        }
        if let Some(entity) = spawn_coin_entity(&mut commands, &mut materials, &assets, &sim) {
            mapping.0.insert(respawn.added, entity);
        }
    }
}
