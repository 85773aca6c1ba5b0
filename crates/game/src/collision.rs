//! Projectile-versus-scene hit detection and the hit transaction.

use engine_core::Clock;
use glam::Vec3;
use hecs::Entity;

use crate::launcher::Launcher;
use crate::scene::{MemberKind, SceneRegistry};

/// First member overlapping the projectile this frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Contact {
    pub member: Entity,
    /// Projectile position at the moment of contact.
    pub point: Vec3,
}

/// A resolved hit.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Impact {
    pub projectile: Entity,
    pub member: Entity,
    pub kind: MemberKind,
    pub point: Vec3,
    /// Active pool index after the turn advanced.
    pub next_index: usize,
}

/// Test `projectile`'s current box against every visible collidable member, in
/// registration order. The first overlap wins; there is no nearest-first ordering.
pub fn scan(registry: &SceneRegistry, projectile: Entity) -> Option<Contact> {
    if !registry.is_visible(projectile) {
        return None;
    }
    let (moving_box, point) = {
        let mover = registry.projectile(projectile)?;
        (mover.world_box(), mover.position())
    };

    registry
        .members()
        .iter()
        .copied()
        .filter(|&member| member != projectile && registry.is_visible(member))
        .find(|&member| {
            let Some(collider) = registry.collider(member) else {
                return false;
            };
            let Some(transform) = registry.transform(member) else {
                return false;
            };
            collider.shape.overlaps_at(transform.position, &moving_box)
        })
        .map(|member| Contact { member, point })
}

/// Applies hits: hides both parties, fires the feedback effect, and passes the turn.
pub struct CollisionResolver {
    effect: Entity,
}

impl CollisionResolver {
    pub fn new(effect: Entity) -> Self {
        Self { effect }
    }

    pub fn effect(&self) -> Entity {
        self.effect
    }

    /// Check the launcher's airborne projectile and apply the first hit, all at once.
    ///
    /// A projectile that touched the ground during this frame's step still counts, so a
    /// landing inside a target is a hit rather than a miss.
    pub fn resolve(
        &self,
        registry: &mut SceneRegistry,
        launcher: &mut Launcher,
        clock: &Clock,
    ) -> Option<Impact> {
        let projectile = launcher.active_projectile();
        let in_play = {
            let state = registry.projectile(projectile)?;
            state.is_flying() || state.landed_at() == Some(clock.now())
        };
        if !in_play {
            return None;
        }
        let contact = scan(registry, projectile)?;
        let kind = registry.kind(contact.member)?;

        registry.strike_projectile(projectile);
        registry.hide(contact.member);
        registry.trigger_effect(self.effect, contact.point);
        let next_index = launcher.advance_turn(registry);

        log::info!(
            "Hit {:?} {:?} at ({:.2}, {:.2}, {:.2})",
            kind,
            contact.member,
            contact.point.x,
            contact.point.y,
            contact.point.z
        );
        Some(Impact {
            projectile,
            member: contact.member,
            kind,
            point: contact.point,
            next_index,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::effect::{EffectSettings, FeedbackEffect};
    use crate::launcher::LauncherSettings;
    use crate::projectile::Projectile;
    use engine_core::Transform;
    use hecs::EntityBuilder;
    use physics::{BoundingVolume, Collider, CollisionShape, CompoundBoundingVolume};

    fn bird_template() -> Projectile {
        Projectile::new(
            BoundingVolume::from_center_half_extents(Vec3::ZERO, Vec3::splat(0.3)),
            1.0,
        )
    }

    fn add_block(
        registry: &mut SceneRegistry,
        kind: MemberKind,
        position: Vec3,
        half: f32,
        visible: bool,
    ) -> Entity {
        let mut components = EntityBuilder::new();
        components.add(Collider::new(CollisionShape::Single(
            BoundingVolume::from_center_half_extents(Vec3::ZERO, Vec3::splat(half)),
        )));
        registry.register(kind, Transform::from_position(position), visible, &mut components)
    }

    fn add_effect(registry: &mut SceneRegistry) -> Entity {
        let mut components = EntityBuilder::new();
        components.add(FeedbackEffect::new(EffectSettings::default()));
        registry.register(MemberKind::Effect, Transform::default(), false, &mut components)
    }

    fn lone_projectile(registry: &mut SceneRegistry, at: Vec3) -> Entity {
        let mut components = EntityBuilder::new();
        components.add(bird_template());
        let bird = registry.register(MemberKind::Projectile, Transform::default(), true, &mut components);
        registry.arm_projectile(bird, at);
        registry.show(bird);
        bird
    }

    #[test]
    fn hidden_member_never_collides() {
        let mut registry = SceneRegistry::new();
        let center = Vec3::new(0.0, 2.0, 10.0);
        let crate_box = add_block(&mut registry, MemberKind::Target, center, 2.0, false);
        let bird = lone_projectile(&mut registry, center);

        assert_eq!(scan(&registry, bird), None);

        registry.show(crate_box);
        assert_eq!(
            scan(&registry, bird),
            Some(Contact {
                member: crate_box,
                point: center
            })
        );
    }

    #[test]
    fn hidden_projectile_never_collides() {
        let mut registry = SceneRegistry::new();
        let center = Vec3::new(0.0, 2.0, 10.0);
        add_block(&mut registry, MemberKind::Target, center, 2.0, true);
        let bird = lone_projectile(&mut registry, center);
        registry.hide(bird);
        assert_eq!(scan(&registry, bird), None);
    }

    #[test]
    fn first_registered_match_wins() {
        let mut registry = SceneRegistry::new();
        let center = Vec3::new(0.0, 2.0, 10.0);
        // The farther box is registered first; it still wins.
        let far = add_block(&mut registry, MemberKind::Obstacle, center + Vec3::X * 0.5, 1.0, true);
        let near = add_block(&mut registry, MemberKind::Target, center, 1.0, true);
        let bird = lone_projectile(&mut registry, center);
        assert_eq!(scan(&registry, bird).map(|c| c.member), Some(far));

        registry.hide(far);
        assert_eq!(scan(&registry, bird).map(|c| c.member), Some(near));
    }

    #[test]
    fn members_without_collider_are_skipped() {
        let mut registry = SceneRegistry::new();
        let center = Vec3::new(0.0, 2.0, 10.0);
        registry.register(
            MemberKind::Decoration,
            Transform::from_position(center),
            true,
            &mut EntityBuilder::new(),
        );
        let bird = lone_projectile(&mut registry, center);
        assert_eq!(scan(&registry, bird), None);
    }

    #[test]
    fn compound_member_is_hit_through_any_part() {
        let mut registry = SceneRegistry::new();
        let parts = vec![
            BoundingVolume::new(Vec3::new(-0.5, 0.0, -0.5), Vec3::new(0.5, 1.0, 0.5)),
            BoundingVolume::new(Vec3::new(-0.5, 3.0, -0.5), Vec3::new(0.5, 4.0, 0.5)),
        ];
        let mut components = EntityBuilder::new();
        components.add(Collider::new(CollisionShape::Compound(
            CompoundBoundingVolume::new(parts).unwrap(),
        )));
        let tower = registry.register(
            MemberKind::Obstacle,
            Transform::from_position(Vec3::new(0.0, 0.0, 20.0)),
            true,
            &mut components,
        );

        let bird = lone_projectile(&mut registry, Vec3::new(0.0, 2.0, 20.0));
        assert_eq!(scan(&registry, bird), None, "gap between parts");

        registry.arm_projectile(bird, Vec3::new(0.0, 3.5, 20.0));
        registry.show(bird);
        assert_eq!(scan(&registry, bird).map(|c| c.member), Some(tower));
    }

    #[test]
    fn resolve_applies_the_whole_hit_transaction() {
        let mut registry = SceneRegistry::new();
        let settings = LauncherSettings {
            origin: Vec3::new(0.0, 2.0, 0.0),
            initial_pitch: 0.0,
            initial_power: 10.0,
            ..Default::default()
        };
        // Straight ahead, one metre out: in the box on the first frame of flight.
        let pig = add_block(&mut registry, MemberKind::Target, Vec3::new(0.0, 2.0, 1.0), 0.5, true);
        let effect = add_effect(&mut registry);
        let mut launcher = Launcher::install(settings, 4, &bird_template(), &mut registry).unwrap();
        let resolver = CollisionResolver::new(effect);

        let mut clock = Clock::new();
        assert!(launcher.shoot(&mut registry, &clock));
        let bird = launcher.active_projectile();
        clock.advance(0.1);
        registry.update(&clock);

        let impact = resolver.resolve(&mut registry, &mut launcher, &clock).unwrap();
        assert_eq!(impact.member, pig);
        assert_eq!(impact.kind, MemberKind::Target);
        assert_eq!(impact.projectile, bird);
        assert_eq!(impact.next_index, 1);
        assert!(!registry.is_visible(pig));
        assert!(!registry.is_visible(bird));
        assert!(!registry.projectile(bird).unwrap().is_flying());
        assert_eq!(registry.projectile(bird).unwrap().position().y, 0.0);
        assert!(registry.is_visible(effect));
        assert_eq!(registry.effect(effect).unwrap().position(), impact.point);
        assert_eq!(launcher.active_index(), 1);
        assert!(registry.projectile(launcher.active_projectile()).unwrap().is_ready());

        // Nothing left to hit and nothing in the air.
        assert_eq!(resolver.resolve(&mut registry, &mut launcher, &clock), None);
    }

    #[test]
    fn ready_projectile_is_not_resolved() {
        let mut registry = SceneRegistry::new();
        let settings = LauncherSettings::default();
        add_block(&mut registry, MemberKind::Target, settings.origin, 5.0, true);
        let effect = add_effect(&mut registry);
        let mut launcher = Launcher::install(settings, 2, &bird_template(), &mut registry).unwrap();
        registry.show(launcher.active_projectile());
        let resolver = CollisionResolver::new(effect);
        let clock = Clock::new();
        assert_eq!(resolver.resolve(&mut registry, &mut launcher, &clock), None);
        assert_eq!(launcher.active_index(), 0);
    }

    fn flat_shot_launcher(registry: &mut SceneRegistry) -> Launcher {
        let settings = LauncherSettings {
            origin: Vec3::new(0.0, 2.0, 0.0),
            initial_pitch: 0.0,
            initial_power: 10.0,
            ..Default::default()
        };
        Launcher::install(settings, 2, &bird_template(), registry).unwrap()
    }

    #[test]
    fn landing_inside_a_target_is_a_hit() {
        let mut registry = SceneRegistry::new();
        // One long step takes the bird from the launcher straight to the ground at z = 10.
        let pig = add_block(&mut registry, MemberKind::Target, Vec3::new(0.0, 0.0, 10.0), 0.5, true);
        let effect = add_effect(&mut registry);
        let mut launcher = flat_shot_launcher(&mut registry);
        let resolver = CollisionResolver::new(effect);

        let mut clock = Clock::new();
        assert!(launcher.shoot(&mut registry, &clock));
        let bird = launcher.active_projectile();
        clock.advance(1.0);
        let update = registry.update(&clock);
        assert_eq!(update.landed, vec![bird]);

        let impact = resolver.resolve(&mut registry, &mut launcher, &clock).unwrap();
        assert_eq!(impact.member, pig);
        assert_eq!(impact.point, Vec3::new(0.0, 0.0, 10.0));
        assert!(!registry.is_visible(pig));
        assert!(!registry.is_visible(bird));
        assert_eq!(launcher.active_index(), 1);
    }

    #[test]
    fn bird_that_landed_on_an_earlier_frame_is_not_resolved() {
        let mut registry = SceneRegistry::new();
        let pig = add_block(&mut registry, MemberKind::Target, Vec3::new(0.0, 0.0, 10.0), 0.5, false);
        let effect = add_effect(&mut registry);
        let mut launcher = flat_shot_launcher(&mut registry);
        let resolver = CollisionResolver::new(effect);

        let mut clock = Clock::new();
        launcher.shoot(&mut registry, &clock);
        clock.advance(1.0);
        registry.update(&clock);
        assert_eq!(resolver.resolve(&mut registry, &mut launcher, &clock), None);

        registry.show(pig);
        clock.advance(0.1);
        registry.update(&clock);
        assert_eq!(resolver.resolve(&mut registry, &mut launcher, &clock), None);
        assert!(registry.is_visible(pig));
        assert_eq!(launcher.active_index(), 0);
    }
}
