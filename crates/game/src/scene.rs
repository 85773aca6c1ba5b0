//! Scene registry: every member of the playfield, its visibility, and its per-frame transform.

use engine_core::{Clock, Transform, TransformRaw};
use glam::Vec3;
use hecs::{Entity, EntityBuilder, Ref, RefMut, World};
use physics::Collider;

use crate::effect::FeedbackEffect;
use crate::projectile::Projectile;

/// What a member is, for presentation and scoring.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MemberKind {
    Projectile,
    Target,
    Obstacle,
    Decoration,
    PreviewMarker,
    Effect,
}

/// Visibility flag. Hidden members still update but never collide or render.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Visibility {
    visible: bool,
}

impl Visibility {
    pub fn new(visible: bool) -> Self {
        Self { visible }
    }

    pub fn show(&mut self) {
        self.visible = true;
    }

    pub fn hide(&mut self) {
        self.visible = false;
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }
}

/// One model matrix for the render collaborator.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderInstance {
    pub entity: Entity,
    pub kind: MemberKind,
    pub model: TransformRaw,
}

/// Side effects of one transform-production pass.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct FrameUpdate {
    /// Projectiles that touched the ground this frame.
    pub landed: Vec<Entity>,
    /// Effects whose animation finished (and hid themselves) this frame.
    pub effects_finished: Vec<Entity>,
}

/// Owns every scene member. Iteration follows registration order.
pub struct SceneRegistry {
    world: World,
    order: Vec<Entity>,
}

impl Default for SceneRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl SceneRegistry {
    pub fn new() -> Self {
        Self {
            world: World::new(),
            order: Vec::new(),
        }
    }

    /// Add a member. `components` carries its capabilities (collider, projectile state, ...).
    ///
    /// Every call creates a new member; members live until the registry is dropped.
    pub fn register(
        &mut self,
        kind: MemberKind,
        transform: Transform,
        visible: bool,
        components: &mut EntityBuilder,
    ) -> Entity {
        components
            .add(kind)
            .add(Visibility::new(visible))
            .add(transform);
        let entity = self.world.spawn(components.build());
        self.order.push(entity);
        log::trace!("Registered {:?} as {:?}", kind, entity);
        entity
    }

    /// Members in registration order.
    pub fn members(&self) -> &[Entity] {
        &self.order
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    pub fn kind(&self, entity: Entity) -> Option<MemberKind> {
        self.world.get::<&MemberKind>(entity).ok().map(|kind| *kind)
    }

    pub fn is_visible(&self, entity: Entity) -> bool {
        self.world
            .get::<&Visibility>(entity)
            .map(|v| v.is_visible())
            .unwrap_or(false)
    }

    pub fn show(&mut self, entity: Entity) {
        if let Ok(mut visibility) = self.world.get::<&mut Visibility>(entity) {
            visibility.show();
        }
    }

    pub fn hide(&mut self, entity: Entity) {
        if let Ok(mut visibility) = self.world.get::<&mut Visibility>(entity) {
            visibility.hide();
        }
    }

    /// Transform produced for the member on the last update.
    pub fn transform(&self, entity: Entity) -> Option<Transform> {
        self.world.get::<&Transform>(entity).ok().map(|t| *t)
    }

    /// Move a member that has no behaviour of its own (markers, props).
    pub fn place(&mut self, entity: Entity, position: Vec3) {
        if let Ok(mut transform) = self.world.get::<&mut Transform>(entity) {
            transform.position = position;
        }
    }

    pub fn collider(&self, entity: Entity) -> Option<Ref<'_, Collider>> {
        self.world.get::<&Collider>(entity).ok()
    }

    pub fn projectile(&self, entity: Entity) -> Option<Ref<'_, Projectile>> {
        self.world.get::<&Projectile>(entity).ok()
    }

    pub fn projectile_mut(&mut self, entity: Entity) -> Option<RefMut<'_, Projectile>> {
        self.world.get::<&mut Projectile>(entity).ok()
    }

    pub fn effect(&self, entity: Entity) -> Option<Ref<'_, FeedbackEffect>> {
        self.world.get::<&FeedbackEffect>(entity).ok()
    }

    /// Re-arm a projectile at `origin` and keep it hidden until it is launched.
    pub fn arm_projectile(&mut self, entity: Entity, origin: Vec3) {
        let Ok((projectile, visibility, transform)) = self
            .world
            .query_one_mut::<(&mut Projectile, &mut Visibility, &mut Transform)>(entity)
        else {
            return;
        };
        projectile.arm(origin);
        visibility.hide();
        *transform = projectile.transform();
    }

    /// Launch a ready projectile and show it. Returns false when it was not ready.
    pub fn launch_projectile(
        &mut self,
        entity: Entity,
        speed: f32,
        pitch_deg: f32,
        yaw_deg: f32,
        clock: &Clock,
    ) -> bool {
        let Ok((projectile, visibility)) = self
            .world
            .query_one_mut::<(&mut Projectile, &mut Visibility)>(entity)
        else {
            return false;
        };
        if !projectile.launch(speed, pitch_deg, yaw_deg, clock.now()) {
            return false;
        }
        visibility.show();
        true
    }

    /// Stop a projectile mid-flight and hide it. Returns where it was when struck.
    pub fn strike_projectile(&mut self, entity: Entity) -> Option<Vec3> {
        let (projectile, visibility, transform) = self
            .world
            .query_one_mut::<(&mut Projectile, &mut Visibility, &mut Transform)>(entity)
            .ok()?;
        let struck_at = projectile.position();
        projectile.hit_externally();
        visibility.hide();
        *transform = projectile.transform();
        Some(struck_at)
    }

    /// Start an effect's animation at `position` and show it.
    pub fn trigger_effect(&mut self, entity: Entity, position: Vec3) {
        let Ok((effect, visibility, transform)) = self
            .world
            .query_one_mut::<(&mut FeedbackEffect, &mut Visibility, &mut Transform)>(entity)
        else {
            return;
        };
        effect.trigger(position);
        visibility.show();
        *transform = effect.transform();
    }

    /// Ask every member, hidden or not, to produce this frame's transform.
    pub fn update(&mut self, clock: &Clock) -> FrameUpdate {
        let now = clock.now();
        let dt = clock.delta_seconds();
        let mut report = FrameUpdate::default();

        for (entity, (projectile, transform)) in self
            .world
            .query_mut::<(&mut Projectile, &mut Transform)>()
        {
            if projectile.step(now) {
                report.landed.push(entity);
            }
            *transform = projectile.transform();
        }

        for (entity, (effect, visibility, transform)) in self
            .world
            .query_mut::<(&mut FeedbackEffect, &mut Visibility, &mut Transform)>()
        {
            if effect.step(dt) {
                visibility.hide();
                report.effects_finished.push(entity);
            }
            *transform = effect.transform();
        }

        report
    }

    /// Model matrices of every visible member, in registration order.
    pub fn render_list(&self) -> Vec<RenderInstance> {
        self.order
            .iter()
            .filter(|&&entity| self.is_visible(entity))
            .filter_map(|&entity| {
                let kind = self.kind(entity)?;
                let transform = self.transform(entity)?;
                Some(RenderInstance {
                    entity,
                    kind,
                    model: TransformRaw::from(transform),
                })
            })
            .collect()
    }

    /// Visible members of one kind.
    pub fn count_visible(&self, kind: MemberKind) -> usize {
        self.order
            .iter()
            .filter(|&&entity| self.kind(entity) == Some(kind) && self.is_visible(entity))
            .count()
    }
}
