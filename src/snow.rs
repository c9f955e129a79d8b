//! Canvas snowfall simulation

use rand::Rng;

use crate::constants::SNOW_MARGIN;
use crate::platform::{Rgba, Surface};

const TRAIL_FADE: Rgba = Rgba::new(10, 10, 30, 0.1);
const FLAKE_COLOR: Rgba = Rgba::new(255, 255, 255, 0.9);

/// Gates a display-refresh callback down to a target frame rate.
#[derive(Clone, Copy, Debug)]
pub struct FrameGate {
    interval: f64,
    last: f64,
}

impl FrameGate {
    pub fn new(frame_rate: u32) -> Self {
        Self {
            interval: 1000.0 / frame_rate.max(1) as f64,
            last: 0.0,
        }
    }

    /// True when enough time has passed since the last admitted frame.
    /// Keeps the phase of the frame grid instead of drifting with late frames.
    pub fn admit(&mut self, timestamp: f64) -> bool {
        let delta = timestamp - self.last;
        if delta > self.interval {
            self.last = timestamp - (delta % self.interval);
            true
        } else {
            false
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Snowflake {
    pub x: f32,
    pub y: f32,
    pub radius: f32,
    pub speed: f32,
    pub wind: f32,
    pub opacity: f32,
    pub wobble: f32,
    pub wobble_speed: f32,
}

impl Snowflake {
    pub fn random(rng: &mut impl Rng, width: f32, height: f32) -> Self {
        Self {
            x: rng.gen::<f32>() * width,
            y: rng.gen::<f32>() * height,
            radius: rng.gen::<f32>() * 3.0 + 1.0,
            speed: rng.gen::<f32>() * 0.8 + 0.3,
            wind: rng.gen::<f32>() * 0.3 - 0.15,
            opacity: rng.gen::<f32>() * 0.4 + 0.3,
            wobble: rng.gen::<f32>() * 0.5,
            wobble_speed: rng.gen::<f32>() * 0.05 + 0.02,
        }
    }

    /// Horizontal sway at `now` milliseconds.
    pub fn wobble_offset(&self, now: f64) -> f32 {
        ((now * self.wobble_speed as f64).sin() as f32) * self.wobble
    }

    /// Moves one frame and recycles the flake when it leaves the surface.
    pub fn advance(&mut self, rng: &mut impl Rng, width: f32, height: f32) {
        self.y += self.speed;
        self.x += self.wind;

        if self.y > height + SNOW_MARGIN {
            self.y = -SNOW_MARGIN;
            self.x = rng.gen::<f32>() * width;
        }
        if self.x > width + SNOW_MARGIN {
            self.x = -SNOW_MARGIN;
        }
        if self.x < -SNOW_MARGIN {
            self.x = width + SNOW_MARGIN;
        }
    }
}

#[derive(Debug, Default)]
pub struct SnowField {
    flakes: Vec<Snowflake>,
    width: f32,
    height: f32,
    max_flakes: u32,
    area_per_flake: f32,
}

impl SnowField {
    pub fn new(max_flakes: u32, area_per_flake: f32) -> Self {
        Self {
            flakes: Vec::new(),
            width: 0.0,
            height: 0.0,
            max_flakes,
            area_per_flake: area_per_flake.max(1.0),
        }
    }

    /// Population for a surface: proportional to its area, capped.
    pub fn population_for(&self, width: f32, height: f32) -> usize {
        let by_area = (width.max(0.0) * height.max(0.0) / self.area_per_flake).floor() as usize;
        by_area.min(self.max_flakes as usize)
    }

    /// Replaces the population for a surface of the given size.
    pub fn seed(&mut self, width: f32, height: f32, rng: &mut impl Rng) {
        self.width = width;
        self.height = height;
        let count = self.population_for(width, height);
        self.flakes = (0..count)
            .map(|_| Snowflake::random(rng, width, height))
            .collect();
        log::debug!("snow seeded with {count} flakes for {width}x{height}");
    }

    pub fn set_density(&mut self, max_flakes: u32, area_per_flake: f32, rng: &mut impl Rng) {
        self.max_flakes = max_flakes;
        self.area_per_flake = area_per_flake.max(1.0);
        self.seed(self.width, self.height, rng);
    }

    pub fn flakes(&self) -> &[Snowflake] {
        &self.flakes
    }

    pub fn len(&self) -> usize {
        self.flakes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.flakes.is_empty()
    }

    pub fn size(&self) -> (f32, f32) {
        (self.width, self.height)
    }

    /// Draws every flake at its swayed position, then advances it.
    pub fn step(&mut self, now: f64, surface: &mut impl Surface, rng: &mut impl Rng) {
        surface.fade(TRAIL_FADE);
        let (width, height) = (self.width, self.height);
        for flake in &mut self.flakes {
            let sway = flake.wobble_offset(now);
            surface.fill_circle(
                flake.x + sway,
                flake.y,
                flake.radius,
                FLAKE_COLOR.with_alpha(flake.opacity),
            );
            flake.advance(rng, width, height);
        }
    }
}
