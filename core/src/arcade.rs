//! Deterministic arcade-style world: box bodies, velocity integration,
//! world-bound bounce, tweens and overlap watching. No gravity, no collision
//! response between bodies.

use crate::geometry::Aabb;
use crate::substrate::{
    BodyId, BodySpec, Easing, Overlap, Substrate, TweenHandle, TweenProperty,
};
use crate::vec2::Vec2;

#[derive(Debug, Clone)]
struct Body {
    position: Vec2,
    velocity: Vec2,
    half_extents: Vec2,
    bounce: f64,
    collide_world_bounds: bool,
}

#[derive(Debug, Clone)]
struct ActiveTween {
    handle: TweenHandle,
    body: BodyId,
    property: TweenProperty,
    from: f64,
    to: f64,
    duration_ms: f64,
    elapsed_ms: f64,
    easing: Easing,
}

impl ActiveTween {
    fn value(&self) -> f64 {
        let t = if self.duration_ms <= 0.0 {
            1.0
        } else {
            self.elapsed_ms / self.duration_ms
        };
        self.from + (self.to - self.from) * self.easing.apply(t)
    }

    fn finished(&self) -> bool {
        self.elapsed_ms >= self.duration_ms
    }
}

#[derive(Debug, Clone)]
pub struct ArcadeWorld {
    bounds: Aabb,
    bodies: Vec<Body>,
    tweens: Vec<ActiveTween>,
    watched: Vec<(BodyId, BodyId)>,
    next_tween: u64,
}

impl ArcadeWorld {
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            bounds: Aabb::new(Vec2::ZERO, Vec2::new(width, height)),
            bodies: Vec::new(),
            tweens: Vec::new(),
            watched: Vec::new(),
            next_tween: 1,
        }
    }

    pub fn active_tweens(&self) -> usize {
        self.tweens.len()
    }

    fn set_property(&mut self, body: BodyId, property: TweenProperty, value: f64) {
        let b = &mut self.bodies[body.0];
        match property {
            TweenProperty::X => b.position.x = value,
            TweenProperty::Y => b.position.y = value,
        }
    }

    fn property(&self, body: BodyId, property: TweenProperty) -> f64 {
        let b = &self.bodies[body.0];
        match property {
            TweenProperty::X => b.position.x,
            TweenProperty::Y => b.position.y,
        }
    }

    fn integrate(&mut self, dt: f64) {
        let world = self.bounds;
        for body in &mut self.bodies {
            body.position = body.position + body.velocity * dt;
            if !body.collide_world_bounds {
                continue;
            }

            let h = body.half_extents;
            if body.position.x - h.x < world.min.x {
                body.position.x = world.min.x + h.x;
                body.velocity.x = -body.velocity.x * body.bounce;
            } else if body.position.x + h.x > world.max.x {
                body.position.x = world.max.x - h.x;
                body.velocity.x = -body.velocity.x * body.bounce;
            }
            if body.position.y - h.y < world.min.y {
                body.position.y = world.min.y + h.y;
                body.velocity.y = -body.velocity.y * body.bounce;
            } else if body.position.y + h.y > world.max.y {
                body.position.y = world.max.y - h.y;
                body.velocity.y = -body.velocity.y * body.bounce;
            }
        }
    }

    fn advance_tweens(&mut self, dt_ms: f64) {
        let mut updates = Vec::with_capacity(self.tweens.len());
        for tween in &mut self.tweens {
            tween.elapsed_ms += dt_ms;
            updates.push((tween.body, tween.property, tween.value()));
        }
        for (body, property, value) in updates {
            self.set_property(body, property, value);
        }
        self.tweens.retain(|t| !t.finished());
    }
}

impl Substrate for ArcadeWorld {
    fn spawn(&mut self, spec: BodySpec) -> BodyId {
        self.bodies.push(Body {
            position: spec.position,
            velocity: Vec2::ZERO,
            half_extents: spec.half_extents,
            bounce: spec.bounce,
            collide_world_bounds: spec.collide_world_bounds,
        });
        BodyId(self.bodies.len() - 1)
    }

    fn set_velocity(&mut self, body: BodyId, velocity: Vec2) {
        self.bodies[body.0].velocity = velocity;
    }

    fn set_position(&mut self, body: BodyId, position: Vec2) {
        self.bodies[body.0].position = position;
    }

    fn position(&self, body: BodyId) -> Vec2 {
        self.bodies[body.0].position
    }

    fn velocity(&self, body: BodyId) -> Vec2 {
        self.bodies[body.0].velocity
    }

    fn bounds(&self, body: BodyId) -> Aabb {
        let b = &self.bodies[body.0];
        Aabb::from_center(b.position, b.half_extents)
    }

    fn watch_overlap(&mut self, a: BodyId, b: BodyId) {
        if !self.watched.iter().any(|&(x, y)| (x, y) == (a, b) || (x, y) == (b, a)) {
            self.watched.push((a, b));
        }
    }

    fn tween(
        &mut self,
        body: BodyId,
        property: TweenProperty,
        to: f64,
        duration_ms: f64,
        easing: Easing,
    ) -> TweenHandle {
        self.tweens
            .retain(|t| !(t.body == body && t.property == property));

        let handle = TweenHandle(self.next_tween);
        self.next_tween += 1;
        self.tweens.push(ActiveTween {
            handle,
            body,
            property,
            from: self.property(body, property),
            to,
            duration_ms: duration_ms.max(0.0),
            elapsed_ms: 0.0,
            easing,
        });
        handle
    }

    fn cancel(&mut self, handle: TweenHandle) {
        self.tweens.retain(|t| t.handle != handle);
    }

    fn is_tweening(&self, handle: TweenHandle) -> bool {
        self.tweens.iter().any(|t| t.handle == handle)
    }

    fn step(&mut self, dt: f64) -> Vec<Overlap> {
        self.integrate(dt);
        self.advance_tweens(dt * 1000.0);

        self.watched
            .iter()
            .filter(|(a, b)| self.bounds(*a).intersects(&self.bounds(*b)))
            .map(|&(a, b)| Overlap { a, b })
            .collect()
    }
}
