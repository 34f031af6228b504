//! Per-frame update and lifecycle observers for screen lines.

use bevy::prelude::*;

use crate::camera::CameraState;
use crate::components::ScreenLine;
use crate::components::ScreenLineDiagnostics;
use crate::components::ScreenLinePoints;
use crate::compose::RenderedLine;
use crate::compose::compose_line;
use crate::error::Endpoint;
use crate::error::ScreenLineError;
use crate::events::ScreenLineHidden;
use crate::events::ScreenLineShown;

/// Recomposes every active screen line against the current camera and target transforms.
pub fn update_screen_lines(
    mut commands: Commands,
    mut lines: Query<(
        Entity,
        &ScreenLine,
        &mut ScreenLinePoints,
        &mut ScreenLineDiagnostics,
    )>,
    cameras: Query<(&GlobalTransform, &Projection, Option<&Camera>)>,
    transforms: Query<&GlobalTransform>,
) {
    let lookup = |entity: Entity| transforms.get(entity).ok().map(GlobalTransform::translation);

    for (entity, line, mut points, mut diagnostics) in &mut lines {
        let camera = line
            .camera
            .and_then(|camera_entity| cameras.get(camera_entity).ok())
            .ok_or(ScreenLineError::NoCameraBound)
            .and_then(|(global_transform, projection, camera)| {
                CameraState::from_camera(global_transform, projection, camera)
            });
        let camera_position = camera.as_ref().ok().map(|camera| camera.position);

        let a = line.target_a.resolve(Endpoint::A, lookup);
        let b = line.target_b.resolve(Endpoint::B, lookup);

        let outcome = compose_line(camera, a, b, &line.settings());

        report_error_transition(entity, diagnostics.last_error, outcome.error);

        match (diagnostics.visible, outcome.visible) {
            (false, true) => {
                commands.trigger(ScreenLineShown { entity });
            },
            (true, false) => {
                commands.trigger(ScreenLineHidden { entity });
            },
            _ => {},
        }

        points.set_if_neq(ScreenLinePoints(outcome.line));
        diagnostics.set_if_neq(ScreenLineDiagnostics {
            visible: outcome.visible,
            endpoints: outcome.endpoints,
            remapped: outcome.remapped,
            plane_corners: outcome.plane.map(|plane| plane.corners()),
            camera_position,
            last_error: outcome.error,
        });
    }
}

/// Logs only when a line's error state changes, so a persistent failure is reported once.
fn report_error_transition(
    entity: Entity,
    previous: Option<ScreenLineError>,
    current: Option<ScreenLineError>,
) {
    if previous == current {
        return;
    }
    match current {
        Some(error) => warn!("ScreenLine {entity}: {error}; drawing nothing"),
        None => info!("ScreenLine {entity}: recovered"),
    }
}

pub fn on_screen_line_added(add: On<Add, ScreenLine>, lines: Query<&ScreenLine>) {
    let Ok(line) = lines.get(add.entity) else {
        return;
    };
    debug!(
        "ScreenLine {} added: a={:?} b={:?} style={:?} distance={:.2} camera={:?}",
        add.entity, line.target_a, line.target_b, line.style, line.distance_from_camera, line.camera
    );
}

/// Clears the sink when a line is deactivated so stale points are never drawn.
pub fn on_screen_line_removed(
    remove: On<Remove, ScreenLine>,
    mut commands: Commands,
    mut lines: Query<(&mut ScreenLinePoints, &mut ScreenLineDiagnostics)>,
) {
    let entity = remove.entity;
    debug!("ScreenLine {entity} removed");

    let Ok((mut points, mut diagnostics)) = lines.get_mut(entity) else {
        return;
    };

    if diagnostics.visible {
        commands.trigger(ScreenLineHidden { entity });
    }
    points.0 = RenderedLine::DEGENERATE;
    *diagnostics = ScreenLineDiagnostics::default();
}

#[cfg(test)]
mod tests {
    use bevy::ecs::entity_disabling::Disabled;

    use super::*;
    use crate::ScreenLinePlugin;
    use crate::compose::LineStyle;
    use crate::target::ScreenLineTarget;

    const EPSILON: f32 = 1e-4;

    #[derive(Resource, Default)]
    struct VisibilityLog(Vec<(Entity, bool)>);

    fn app() -> App {
        let mut app = App::new();
        app.add_plugins(ScreenLinePlugin)
            .init_resource::<VisibilityLog>()
            .add_observer(|shown: On<ScreenLineShown>, mut log: ResMut<VisibilityLog>| {
                log.0.push((shown.entity, true));
            })
            .add_observer(|hidden: On<ScreenLineHidden>, mut log: ResMut<VisibilityLog>| {
                log.0.push((hidden.entity, false));
            });
        app
    }

    /// Camera at the origin looking down +Z, spawned with its transform already propagated.
    fn spawn_camera(app: &mut App) -> Entity {
        let transform = Transform::IDENTITY.looking_at(Vec3::Z, Vec3::Y);
        app.world_mut()
            .spawn((
                transform,
                GlobalTransform::from(transform),
                Projection::Perspective(PerspectiveProjection {
                    fov: 60_f32.to_radians(),
                    aspect_ratio: 1.0,
                    ..default()
                }),
            ))
            .id()
    }

    fn spawn_point(app: &mut App, position: Vec3) -> Entity {
        let transform = Transform::from_translation(position);
        app.world_mut()
            .spawn((transform, GlobalTransform::from(transform)))
            .id()
    }

    fn points(app: &App, entity: Entity) -> RenderedLine {
        app.world()
            .get::<ScreenLinePoints>(entity)
            .map_or(RenderedLine::DEGENERATE, |points| points.0)
    }

    fn diagnostics(app: &App, entity: Entity) -> ScreenLineDiagnostics {
        app.world()
            .get::<ScreenLineDiagnostics>(entity)
            .cloned()
            .unwrap_or_default()
    }

    #[test]
    fn visible_line_is_written_to_sink() {
        let mut app = app();
        let camera = spawn_camera(&mut app);
        let target = spawn_point(&mut app, Vec3::new(1.0, 1.0, 8.0));

        let line = app
            .world_mut()
            .spawn(
                ScreenLine::new(target, Vec3::new(-1.0, -0.5, 4.0))
                    .with_camera(camera)
                    .with_distance(3.0),
            )
            .id();
        app.update();

        let rendered = points(&app, line);
        assert!(!rendered.is_degenerate());
        for point in rendered.points() {
            assert!(
                (point.z - 3.0).abs() < EPSILON,
                "{point:?} should lie on the plane at z = 3"
            );
        }

        let diagnostics = diagnostics(&app, line);
        assert!(diagnostics.visible);
        assert_eq!(diagnostics.last_error, None);
        assert_eq!(app.world().resource::<VisibilityLog>().0, vec![(line, true)]);
    }

    #[test]
    fn line_follows_moving_target() {
        let mut app = app();
        let camera = spawn_camera(&mut app);
        let target = spawn_point(&mut app, Vec3::new(0.0, 0.0, 5.0));
        let line = app
            .world_mut()
            .spawn(
                ScreenLine::new(target, Vec3::new(0.0, 0.0, 5.0))
                    .with_camera(camera)
                    .with_style(LineStyle::SingleLine),
            )
            .id();
        app.update();
        let before = points(&app, line);

        let moved = Transform::from_xyz(1.0, 0.0, 5.0);
        app.world_mut()
            .entity_mut(target)
            .insert((moved, GlobalTransform::from(moved)));
        app.update();
        let after = points(&app, line);

        assert!(after.start().x > before.start().x, "start should follow A toward +X");
        assert!(after.end().abs_diff_eq(before.end(), EPSILON));
    }

    #[test]
    fn unbound_camera_draws_nothing() {
        let mut app = app();
        let line = app
            .world_mut()
            .spawn(ScreenLine::new(Vec3::new(0.0, 0.0, 5.0), Vec3::new(1.0, 0.0, 5.0)))
            .id();
        app.update();

        assert_eq!(points(&app, line), RenderedLine([Vec3::ZERO; 3]));
        assert_eq!(
            diagnostics(&app, line).last_error,
            Some(ScreenLineError::NoCameraBound)
        );
    }

    #[test]
    fn unresolved_handle_draws_nothing() {
        let mut app = app();
        let camera = spawn_camera(&mut app);
        let despawned = spawn_point(&mut app, Vec3::new(0.0, 0.0, 5.0));
        app.world_mut().despawn(despawned);

        let unbound = app
            .world_mut()
            .spawn(
                ScreenLine {
                    target_a: ScreenLineTarget::Transform(None),
                    target_b: Vec3::new(0.0, 0.0, 5.0).into(),
                    ..default()
                }
                .with_camera(camera),
            )
            .id();
        let dangling = app
            .world_mut()
            .spawn(ScreenLine::new(Vec3::new(0.0, 0.0, 5.0), despawned).with_camera(camera))
            .id();
        app.update();

        assert!(points(&app, unbound).is_degenerate());
        assert_eq!(
            diagnostics(&app, unbound).last_error,
            Some(ScreenLineError::UnresolvedHandle {
                endpoint: Endpoint::A,
            })
        );
        assert!(points(&app, dangling).is_degenerate());
        assert_eq!(
            diagnostics(&app, dangling).last_error,
            Some(ScreenLineError::UnresolvedHandle {
                endpoint: Endpoint::B,
            })
        );
    }

    #[test]
    fn target_behind_camera_hides_line() {
        let mut app = app();
        let camera = spawn_camera(&mut app);
        let target = spawn_point(&mut app, Vec3::new(0.0, 0.0, 5.0));
        let line = app
            .world_mut()
            .spawn(ScreenLine::new(Vec3::new(0.0, 0.0, 3.0), target).with_camera(camera))
            .id();
        app.update();
        assert!(!points(&app, line).is_degenerate());

        let behind = Transform::from_xyz(0.0, 0.0, -5.0);
        app.world_mut()
            .entity_mut(target)
            .insert((behind, GlobalTransform::from(behind)));
        app.update();

        assert!(points(&app, line).is_degenerate());
        assert_eq!(diagnostics(&app, line).last_error, None);
        assert_eq!(
            app.world().resource::<VisibilityLog>().0,
            vec![(line, true), (line, false)]
        );
    }

    #[test]
    fn removing_screen_line_clears_sink() {
        let mut app = app();
        let camera = spawn_camera(&mut app);
        let line = app
            .world_mut()
            .spawn(
                ScreenLine::new(Vec3::new(0.0, 0.0, 3.0), Vec3::new(1.0, 0.0, 6.0))
                    .with_camera(camera),
            )
            .id();
        app.update();
        assert!(!points(&app, line).is_degenerate());

        app.world_mut().entity_mut(line).remove::<ScreenLine>();
        app.update();

        assert!(points(&app, line).is_degenerate());
        assert_eq!(
            app.world().resource::<VisibilityLog>().0,
            vec![(line, true), (line, false)]
        );
    }

    #[test]
    fn disabled_line_is_not_updated() {
        let mut app = app();
        let camera = spawn_camera(&mut app);
        let line = app
            .world_mut()
            .spawn((
                ScreenLine::new(Vec3::new(0.0, 0.0, 3.0), Vec3::new(1.0, 0.0, 6.0))
                    .with_camera(camera),
                Disabled,
            ))
            .id();
        app.update();

        assert!(points(&app, line).is_degenerate());
        assert!(app.world().resource::<VisibilityLog>().0.is_empty());
    }
}
