//! Demonstrates screen-anchored callout lines using `bevy_screen_line`.
//!
//! - Each mesh is connected to a fixed callout anchor by a line drawn at a constant depth
//! - Orbit the camera with the middle mouse button; the lines stay glued to the screen
//! - Drag a mesh to move it
//! - Press 'S' to switch between right-angled and straight lines
//! - Press 'C' to switch between half-space and view-frustum culling
//! - Press 'D' to toggle debug visualization of the frustum plane

use std::f32::consts::PI;

use bevy::color::palettes::basic::SILVER;
use bevy::color::palettes::css::DEEP_SKY_BLUE;
use bevy::color::palettes::css::GOLD;
use bevy::color::palettes::css::TOMATO;
use bevy::prelude::*;
use bevy_brp_extras::BrpExtrasPlugin;
use bevy_panorbit_camera::PanOrbitCamera;
use bevy_panorbit_camera::PanOrbitCameraPlugin;
use bevy_panorbit_camera::TrackpadBehavior;
use bevy_screen_line::CullMode;
use bevy_screen_line::LineStyle;
use bevy_screen_line::ScreenLine;
use bevy_screen_line::ScreenLineColor;
use bevy_screen_line::ScreenLineDebugGizmo;
use bevy_screen_line::ScreenLineHidden;
use bevy_screen_line::ScreenLinePlugin;
use bevy_screen_line::ScreenLineShown;
use bevy_screen_line::ScreenLineTarget;
use bevy_screen_line::ScreenLineVisualizationPlugin;

const LINE_DISTANCE: f32 = 1.5;
const DRAG_SENSITIVITY: f32 = 0.01;
const MESH_CENTER_Y: f32 = 1.0;

fn main() {
    App::new()
        .add_plugins((
            DefaultPlugins,
            PanOrbitCameraPlugin,
            ScreenLinePlugin,
            ScreenLineVisualizationPlugin,
            MeshPickingPlugin,
            BrpExtrasPlugin::default(),
        ))
        .add_systems(Startup, setup)
        .add_systems(
            Update,
            (
                toggle_line_style,
                toggle_cull_mode,
                toggle_debug_visualization,
            ),
        )
        .add_observer(log_line_shown)
        .add_observer(log_line_hidden)
        .run();
}

fn setup(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    // Ground plane
    commands.spawn((
        Mesh3d(meshes.add(Plane3d::default().mesh().size(50.0, 50.0))),
        MeshMaterial3d(materials.add(Color::from(SILVER))),
        Pickable::IGNORE,
    ));

    // Directional light
    commands.spawn((
        DirectionalLight {
            illuminance: 1500.0,
            shadows_enabled: true,
            ..default()
        },
        Transform::from_rotation(Quat::from_euler(EulerRot::ZYX, 0.0, PI / 4.0, -PI / 4.0)),
    ));

    // Camera (middle-click orbit, shift+middle pan, trackpad support)
    let camera = commands
        .spawn(PanOrbitCamera {
            button_orbit: MouseButton::Middle,
            button_pan: MouseButton::Middle,
            modifier_pan: Some(KeyCode::ShiftLeft),
            trackpad_behavior: TrackpadBehavior::BlenderLike {
                modifier_pan:  Some(KeyCode::ShiftLeft),
                modifier_zoom: Some(KeyCode::ControlLeft),
            },
            trackpad_pinch_to_zoom_enabled: true,
            radius: Some(9.0),
            pitch: Some(0.3),
            ..default()
        })
        .id();

    let cuboid = commands
        .spawn((
            Mesh3d(meshes.add(Cuboid::new(1.0, 1.0, 1.0))),
            MeshMaterial3d(materials.add(Color::srgb(0.5, 0.5, 0.9))),
            Transform::from_xyz(-2.5, MESH_CENTER_Y, 0.0),
        ))
        .observe(on_mesh_dragged)
        .id();

    let sphere = commands
        .spawn((
            Mesh3d(meshes.add(Sphere::new(0.5))),
            MeshMaterial3d(materials.add(Color::srgb(0.9, 0.3, 0.2))),
            Transform::from_xyz(0.0, MESH_CENTER_Y, -1.5),
        ))
        .observe(on_mesh_dragged)
        .id();

    let torus = commands
        .spawn((
            Mesh3d(meshes.add(Torus::new(0.25, 0.75))),
            MeshMaterial3d(materials.add(Color::srgb(0.3, 0.8, 0.4))),
            Transform::from_xyz(2.5, MESH_CENTER_Y, 0.5),
        ))
        .observe(on_mesh_dragged)
        .id();

    // Callouts: one per mesh, each to its own anchor floating above the scene
    let callouts = [
        (ScreenLineTarget::Object(Some(cuboid)), Vec3::new(-4.0, 4.0, 0.0), DEEP_SKY_BLUE),
        (ScreenLineTarget::Transform(Some(sphere)), Vec3::new(0.0, 5.0, -2.0), GOLD),
        (ScreenLineTarget::Object(Some(torus)), Vec3::new(4.0, 4.0, 0.0), TOMATO),
    ];
    for (target, anchor, color) in callouts {
        commands.spawn((
            Name::new("Callout"),
            ScreenLine::new(target, anchor)
                .with_camera(camera)
                .with_distance(LINE_DISTANCE),
            ScreenLineColor(Color::from(color)),
        ));
    }

    // Instructions
    commands.spawn((
        Text::new(
            "Drag a mesh to move it\n\nPress:\n'S' toggle line style\n'C' toggle culling\n'D' debug visualization",
        ),
        TextFont {
            font_size: 13.0,
            ..default()
        },
        Node {
            position_type: PositionType::Absolute,
            top: Val::Px(12.0),
            left: Val::Px(12.0),
            ..default()
        },
    ));
}

fn on_mesh_dragged(drag: On<Pointer<Drag>>, mut transforms: Query<&mut Transform>) {
    if let Ok(mut transform) = transforms.get_mut(drag.entity) {
        transform.translation.x += drag.delta.x * DRAG_SENSITIVITY;
        transform.translation.z += drag.delta.y * DRAG_SENSITIVITY;
    }
}

fn toggle_line_style(keyboard: Res<ButtonInput<KeyCode>>, mut lines: Query<&mut ScreenLine>) {
    if !keyboard.just_pressed(KeyCode::KeyS) {
        return;
    }
    for mut line in &mut lines {
        line.style = match line.style {
            LineStyle::RightAngled => LineStyle::SingleLine,
            LineStyle::SingleLine => LineStyle::RightAngled,
        };
    }
}

fn toggle_cull_mode(keyboard: Res<ButtonInput<KeyCode>>, mut lines: Query<&mut ScreenLine>) {
    if !keyboard.just_pressed(KeyCode::KeyC) {
        return;
    }
    for mut line in &mut lines {
        line.cull_mode = match line.cull_mode {
            CullMode::ForwardHalfSpace => CullMode::ViewFrustum,
            CullMode::ViewFrustum => CullMode::ForwardHalfSpace,
        };
        info!("Cull mode: {:?}", line.cull_mode);
    }
}

fn toggle_debug_visualization(
    keyboard: Res<ButtonInput<KeyCode>>,
    mut config_store: ResMut<GizmoConfigStore>,
) {
    if keyboard.just_pressed(KeyCode::KeyD) {
        let (config, _) = config_store.config_mut::<ScreenLineDebugGizmo>();
        config.enabled = !config.enabled;
    }
}

fn log_line_shown(shown: On<ScreenLineShown>) {
    info!("Callout {} shown", shown.entity);
}

fn log_line_hidden(hidden: On<ScreenLineHidden>) {
    info!("Callout {} hidden", hidden.entity);
}
