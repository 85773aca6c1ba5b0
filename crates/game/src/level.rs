//! Level layout and the vertex data behind each prop's hitbox.

use std::collections::HashMap;

use engine_core::Transform;
use glam::Vec3;
use hecs::EntityBuilder;
use physics::{BoundingVolume, Collider, CollisionShape};
use serde::{Deserialize, Serialize};

use crate::error::SetupError;
use crate::scene::{MemberKind, SceneRegistry};

/// Supplies raw vertex positions per mesh. One inner list per sub-box.
pub trait MeshSource {
    fn vertex_sets(&self, mesh: &str) -> Option<Vec<Vec<Vec3>>>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PropRole {
    /// Collidable and counted for the win condition.
    Target,
    /// Collidable, not scored.
    Obstacle,
    /// Scenery with no hitbox.
    Decoration,
}

impl PropRole {
    fn kind(self) -> MemberKind {
        match self {
            PropRole::Target => MemberKind::Target,
            PropRole::Obstacle => MemberKind::Obstacle,
            PropRole::Decoration => MemberKind::Decoration,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PropSpec {
    pub name: String,
    pub mesh: String,
    pub position: Vec3,
    pub role: PropRole,
}

impl PropSpec {
    fn new(name: &str, mesh: &str, position: Vec3, role: PropRole) -> Self {
        Self {
            name: name.to_string(),
            mesh: mesh.to_string(),
            position,
            role,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LevelLayout {
    pub props: Vec<PropSpec>,
}

impl Default for LevelLayout {
    fn default() -> Self {
        Self {
            props: vec![
                PropSpec::new("ground", "ground", Vec3::ZERO, PropRole::Decoration),
                PropSpec::new("slingshot", "slingshot", Vec3::ZERO, PropRole::Decoration),
                PropSpec::new("pig_front", "pig", Vec3::new(0.0, 0.0, 19.0), PropRole::Target),
                PropSpec::new("crate_front", "block", Vec3::new(3.0, 0.0, 21.0), PropRole::Obstacle),
                PropSpec::new("tower", "tower", Vec3::new(-2.0, 0.0, 27.0), PropRole::Obstacle),
                PropSpec::new("pig_tower", "pig", Vec3::new(-2.0, 3.6, 27.0), PropRole::Target),
                PropSpec::new("pig_far", "pig", Vec3::new(6.0, 0.0, 36.0), PropRole::Target),
                PropSpec::new("pig_left", "pig", Vec3::new(-9.0, 0.0, 31.0), PropRole::Target),
            ],
        }
    }
}

/// What [`spawn_props`] registered.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LevelSummary {
    pub targets: usize,
    pub obstacles: usize,
    pub decorations: usize,
}

/// Collision shape for `mesh`. Missing or malformed data is fatal.
pub fn load_shape(meshes: &dyn MeshSource, mesh: &str) -> Result<CollisionShape, SetupError> {
    let sets = meshes
        .vertex_sets(mesh)
        .ok_or_else(|| SetupError::MissingMesh(mesh.to_string()))?;
    CollisionShape::from_vertex_sets(&sets).map_err(|source| SetupError::Bounds {
        mesh: mesh.to_string(),
        source,
    })
}

/// Single box for a moving object; compound meshes collapse to their envelope.
pub fn load_hitbox(meshes: &dyn MeshSource, mesh: &str) -> Result<BoundingVolume, SetupError> {
    Ok(match load_shape(meshes, mesh)? {
        CollisionShape::Single(volume) => volume,
        CollisionShape::Compound(compound) => compound.envelope(),
    })
}

/// Register every prop in `layout`. Targets and obstacles get colliders.
pub fn spawn_props(
    layout: &LevelLayout,
    meshes: &dyn MeshSource,
    registry: &mut SceneRegistry,
) -> Result<LevelSummary, SetupError> {
    let mut summary = LevelSummary::default();
    let mut components = EntityBuilder::new();

    for prop in &layout.props {
        match prop.role {
            PropRole::Target | PropRole::Obstacle => {
                let shape = load_shape(meshes, &prop.mesh)?;
                log::debug!(
                    "Prop `{}` ({:?}) uses {} box(es) from `{}`",
                    prop.name,
                    prop.role,
                    shape.part_count(),
                    prop.mesh
                );
                components.add(Collider::new(shape));
                if prop.role == PropRole::Target {
                    summary.targets += 1;
                } else {
                    summary.obstacles += 1;
                }
            }
            PropRole::Decoration => summary.decorations += 1,
        }
        registry.register(
            prop.role.kind(),
            Transform::from_position(prop.position),
            true,
            &mut components,
        );
    }

    log::info!(
        "Level loaded: {} targets, {} obstacles, {} decorations",
        summary.targets,
        summary.obstacles,
        summary.decorations
    );
    Ok(summary)
}

/// The eight corners of an axis-aligned box.
pub fn box_vertices(min: Vec3, max: Vec3) -> Vec<Vec3> {
    let mut out = Vec::with_capacity(8);
    for &x in &[min.x, max.x] {
        for &y in &[min.y, max.y] {
            for &z in &[min.z, max.z] {
                out.push(Vec3::new(x, y, z));
            }
        }
    }
    out
}

/// Built-in vertex data for the stock props, standing in for loaded models.
#[derive(Debug, Clone, Default)]
pub struct PrimitiveMeshes {
    meshes: HashMap<String, Vec<Vec<Vec3>>>,
}

impl PrimitiveMeshes {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn builtin() -> Self {
        let mut meshes = Self::empty();

        let mut bird = box_vertices(Vec3::splat(-0.3), Vec3::splat(0.3));
        bird.push(Vec3::new(0.0, 0.0, 0.45)); // beak
        meshes.insert("bird", vec![bird]);

        meshes.insert(
            "pig",
            vec![box_vertices(Vec3::new(-0.6, 0.0, -0.6), Vec3::new(0.6, 1.2, 0.6))],
        );
        meshes.insert(
            "block",
            vec![box_vertices(Vec3::new(-1.0, 0.0, -1.0), Vec3::new(1.0, 2.0, 1.0))],
        );
        meshes.insert(
            "tower",
            vec![
                box_vertices(Vec3::new(-0.6, 0.0, -0.6), Vec3::new(0.6, 3.0, 0.6)),
                box_vertices(Vec3::new(-2.0, 3.0, -0.6), Vec3::new(2.0, 3.6, 0.6)),
            ],
        );
        meshes.insert(
            "slingshot",
            vec![box_vertices(Vec3::new(-0.5, 0.0, -0.5), Vec3::new(0.5, 9.0, 0.5))],
        );
        meshes.insert(
            "ground",
            vec![box_vertices(Vec3::new(-60.0, -0.1, -10.0), Vec3::new(60.0, 0.0, 80.0))],
        );
        meshes
    }

    pub fn insert(&mut self, name: &str, sets: Vec<Vec<Vec3>>) {
        self.meshes.insert(name.to_string(), sets);
    }
}

impl MeshSource for PrimitiveMeshes {
    fn vertex_sets(&self, mesh: &str) -> Option<Vec<Vec<Vec3>>> {
        self.meshes.get(mesh).cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use physics::BoundsError;

    #[test]
    fn default_layout_spawns_with_builtin_meshes() {
        let mut registry = SceneRegistry::new();
        let summary =
            spawn_props(&LevelLayout::default(), &PrimitiveMeshes::builtin(), &mut registry)
                .unwrap();
        assert_eq!(summary.targets, 4);
        assert_eq!(summary.obstacles, 2);
        assert_eq!(summary.decorations, 2);
        assert_eq!(registry.count_visible(MemberKind::Target), 4);
        let colliders = registry
            .members()
            .iter()
            .filter(|&&e| registry.collider(e).is_some())
            .count();
        assert_eq!(colliders, 6);
    }

    #[test]
    fn missing_mesh_aborts_setup() {
        let layout = LevelLayout {
            props: vec![PropSpec::new("ghost", "ghost", Vec3::ZERO, PropRole::Target)],
        };
        let mut registry = SceneRegistry::new();
        let err = spawn_props(&layout, &PrimitiveMeshes::builtin(), &mut registry).unwrap_err();
        assert!(matches!(err, SetupError::MissingMesh(ref name) if name == "ghost"));
    }

    #[test]
    fn decorations_need_no_vertex_data() {
        let layout = LevelLayout {
            props: vec![PropSpec::new("tree", "tree", Vec3::ZERO, PropRole::Decoration)],
        };
        let mut registry = SceneRegistry::new();
        let summary = spawn_props(&layout, &PrimitiveMeshes::empty(), &mut registry).unwrap();
        assert_eq!(summary.decorations, 1);
    }

    #[test]
    fn malformed_vertices_are_reported_with_mesh_name() {
        let mut meshes = PrimitiveMeshes::empty();
        meshes.insert("broken", vec![vec![Vec3::new(0.0, f32::INFINITY, 0.0)]]);
        let err = load_shape(&meshes, "broken").unwrap_err();
        match err {
            SetupError::Bounds { mesh, source } => {
                assert_eq!(mesh, "broken");
                assert!(matches!(source, BoundsError::NonFiniteVertex { index: 0, .. }));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn compound_hitbox_collapses_to_envelope() {
        let hitbox = load_hitbox(&PrimitiveMeshes::builtin(), "tower").unwrap();
        assert_eq!(hitbox.min, Vec3::new(-2.0, 0.0, -0.6));
        assert_eq!(hitbox.max, Vec3::new(2.0, 3.6, 0.6));
    }

    #[test]
    fn bird_hitbox_includes_beak() {
        let hitbox = load_hitbox(&PrimitiveMeshes::builtin(), "bird").unwrap();
        assert_eq!(hitbox.max.z, 0.45);
        assert_eq!(hitbox.min, Vec3::splat(-0.3));
    }
}
