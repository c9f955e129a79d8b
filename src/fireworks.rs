//! Celebration fireworks
//!
//! A burst is a ring of sparks launched from one point. Each spark eases
//! out toward its endpoint while fading, and the burst is dropped as soon
//! as its last spark has faded.

use std::f32::consts::TAU;

use rand::Rng;

use crate::constants::SPARK_MAX_LAUNCH_DELAY_MS;
use crate::platform::{Rgba, Surface};

const SPARK_COLORS: [Rgba; 6] = [
    Rgba::new(255, 0, 0, 1.0),
    Rgba::new(0, 255, 0, 1.0),
    Rgba::new(0, 0, 255, 1.0),
    Rgba::new(255, 255, 0, 1.0),
    Rgba::new(255, 0, 255, 1.0),
    Rgba::new(0, 255, 255, 1.0),
];

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Spark {
    pub angle: f32,
    pub speed: f32,
    pub size: f32,
    pub color: Rgba,
    pub delay_ms: f64,
}

impl Spark {
    /// Offset from the origin and opacity at `elapsed` ms into the burst, or
    /// `None` before launch and after fading out.
    pub fn state_at(&self, elapsed: f64, lifetime_ms: f64, distance: f32) -> Option<(f32, f32, f32)> {
        let t = elapsed - self.delay_ms;
        if t < 0.0 || t >= lifetime_ms {
            return None;
        }
        let progress = (t / lifetime_ms) as f32;
        let eased = 1.0 - (1.0 - progress) * (1.0 - progress);
        let reach = self.speed * distance * eased;
        Some((
            self.angle.cos() * reach,
            self.angle.sin() * reach,
            1.0 - progress,
        ))
    }
}

#[derive(Clone, Debug)]
pub struct Burst {
    pub x: f32,
    pub y: f32,
    pub started_at: f64,
    pub sparks: Vec<Spark>,
}

impl Burst {
    pub fn new(x: f32, y: f32, now: f64, count: usize, rng: &mut impl Rng) -> Self {
        let sparks = (0..count)
            .map(|i| Spark {
                angle: TAU * i as f32 / count as f32,
                speed: rng.gen::<f32>() * 2.0 + 1.0,
                size: rng.gen::<f32>() * 4.0 + 2.0,
                color: SPARK_COLORS[rng.gen_range(0..SPARK_COLORS.len())],
                delay_ms: rng.gen::<f64>() * SPARK_MAX_LAUNCH_DELAY_MS,
            })
            .collect();
        Self {
            x,
            y,
            started_at: now,
            sparks,
        }
    }

    pub fn ends_at(&self, lifetime_ms: f64) -> f64 {
        let last_launch = self
            .sparks
            .iter()
            .map(|s| s.delay_ms)
            .fold(0.0, f64::max);
        self.started_at + last_launch + lifetime_ms
    }
}

#[derive(Debug)]
pub struct Fireworks {
    bursts: Vec<Burst>,
    sparks_per_burst: usize,
    lifetime_ms: f64,
    distance: f32,
    dirty: bool,
}

impl Fireworks {
    pub fn new(sparks_per_burst: u32, lifetime_ms: u32, distance: f32) -> Self {
        Self {
            bursts: Vec::new(),
            sparks_per_burst: sparks_per_burst.max(1) as usize,
            lifetime_ms: lifetime_ms.max(1) as f64,
            distance,
            dirty: false,
        }
    }

    /// Launches one burst at the given point. Returns the spark count.
    pub fn trigger(&mut self, x: f32, y: f32, now: f64, rng: &mut impl Rng) -> usize {
        let burst = Burst::new(x, y, now, self.sparks_per_burst, rng);
        let count = burst.sparks.len();
        self.bursts.push(burst);
        count
    }

    /// A random launch point in the upper-middle band of the surface.
    pub fn random_origin(width: f32, height: f32, rng: &mut impl Rng) -> (f32, f32) {
        (
            rng.gen::<f32>() * width * 0.8 + width * 0.1,
            rng.gen::<f32>() * height * 0.4 + height * 0.2,
        )
    }

    pub fn bursts(&self) -> usize {
        self.bursts.len()
    }

    pub fn live_sparks(&self) -> usize {
        self.bursts.iter().map(|b| b.sparks.len()).sum()
    }

    /// Drops bursts whose every spark has faded.
    pub fn prune(&mut self, now: f64) -> usize {
        let lifetime = self.lifetime_ms;
        let before = self.bursts.len();
        self.bursts.retain(|b| b.ends_at(lifetime) > now);
        before - self.bursts.len()
    }

    /// Repaints every live spark. The surface is cleared once more after
    /// the last burst is gone so no faded sparks linger.
    pub fn step(&mut self, now: f64, surface: &mut impl Surface) {
        self.prune(now);
        if self.bursts.is_empty() {
            if self.dirty {
                surface.clear();
                self.dirty = false;
            }
            return;
        }

        surface.clear();
        self.dirty = true;
        for burst in &self.bursts {
            let elapsed = now - burst.started_at;
            for spark in &burst.sparks {
                if let Some((dx, dy, alpha)) = spark.state_at(elapsed, self.lifetime_ms, self.distance) {
                    surface.fill_circle(
                        burst.x + dx,
                        burst.y + dy,
                        spark.size / 2.0,
                        spark.color.with_alpha(alpha),
                    );
                }
            }
        }
    }
}
