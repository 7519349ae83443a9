use glam::Vec3;

/// Initial attributes for a new particle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpawnParams {
    pub lifetime: f32,
    pub color: Vec3,
    pub size: f32,
    pub position: Vec3,
    pub velocity: Vec3,
}

/// A live sparkle. Only `age` and `position` change after spawn.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Particle {
    pub lifetime: f32,
    pub age: f32,
    pub position: Vec3,
    pub velocity: Vec3,
    pub color: Vec3,
    pub size: f32,
}

impl Particle {
    pub fn spawn(params: SpawnParams) -> Self {
        Self {
            lifetime: params.lifetime,
            age: 0.0,
            position: params.position,
            velocity: params.velocity,
            color: params.color,
            size: params.size,
        }
    }

    /// Explicit Euler step: age and move.
    #[inline]
    pub fn step(&mut self, dt: f32) {
        self.age += dt;
        self.position += self.velocity * dt;
    }

    #[inline]
    pub fn is_live(&self) -> bool {
        self.age <= self.lifetime
    }
}
