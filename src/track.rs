//! Demo environment: a vehicle with three distance sensors driving a ring
//! track. This is the collaborator side of the core contract; the genetic
//! controller only ever sees sensor triples, action pairs, and fitness
//! reports.

use std::f32::consts::FRAC_PI_4;

/// Fixed tick length, matching a 50 Hz physics step.
const DT: f32 = 0.02;
const MAX_SPEED: f32 = 11.4;
const TURN_RATE_DEGREES: f32 = 90.0;
/// Sensor readings are raw ray distances divided by this.
const SENSOR_NORMALIZATION: f32 = 15.0;

const DISTANCE_MULTIPLIER: f32 = 1.4;
const SPEED_MULTIPLIER: f32 = 0.2;
const SENSOR_MULTIPLIER: f32 = 0.1;

/// A run that is still this unfit after the grace period is stuck.
const STALL_SECONDS: f32 = 20.0;
const STALL_FITNESS: f32 = 40.0;
/// A run at this fitness has made it around the track.
const SUCCESS_FITNESS: f32 = 1000.0;

const INNER_RADIUS: f32 = 6.0;
const OUTER_RADIUS: f32 = 10.0;
const SPAWN_X: f32 = 8.0;
const SPAWN_Y: f32 = 0.0;
/// Spawn heading: tangent to the ring, counterclockwise.
const SPAWN_HEADING: f32 = std::f32::consts::FRAC_PI_2;

/// Why an agent's run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunOutcome {
    /// Left the track surface.
    Crashed,
    /// Too little fitness after the grace period.
    Stalled,
    /// Reached the success fitness threshold.
    Completed,
}

/// One vehicle on the ring track.
pub struct Vehicle {
    x: f32,
    y: f32,
    heading: f32,
    total_distance: f32,
    elapsed: f32,
    fitness: f32,
}

impl Vehicle {
    pub fn new() -> Self {
        Self {
            x: SPAWN_X,
            y: SPAWN_Y,
            heading: SPAWN_HEADING,
            total_distance: 0.0,
            elapsed: 0.0,
            fitness: 0.0,
        }
    }

    /// Back to the spawn point for the next genome's run.
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    /// Normalized ray distances (diagonal right, forward, diagonal left).
    pub fn sensors(&self) -> (f32, f32, f32) {
        (
            self.ray_distance(self.heading - FRAC_PI_4) / SENSOR_NORMALIZATION,
            self.ray_distance(self.heading) / SENSOR_NORMALIZATION,
            self.ray_distance(self.heading + FRAC_PI_4) / SENSOR_NORMALIZATION,
        )
    }

    /// Advance one tick under the given controls. Acceleration is expected
    /// in [0, 1] and turning in [-1, 1]. Returns the outcome once the run
    /// has ended; the caller then reports fitness and resets.
    pub fn step(&mut self, acceleration: f32, turning: f32) -> Option<RunOutcome> {
        self.heading += turning * TURN_RATE_DEGREES.to_radians() * DT;
        let speed = acceleration * MAX_SPEED * DT;
        self.x += self.heading.cos() * speed;
        self.y += self.heading.sin() * speed;

        self.total_distance += speed;
        self.elapsed += DT;

        let radius = (self.x * self.x + self.y * self.y).sqrt();
        if radius > OUTER_RADIUS || radius < INNER_RADIUS {
            return Some(RunOutcome::Crashed);
        }

        let average_speed = self.total_distance / self.elapsed;
        let (a, b, c) = self.sensors();
        self.fitness = self.total_distance * DISTANCE_MULTIPLIER
            + average_speed * SPEED_MULTIPLIER
            + (a + b + c) / 3.0 * SENSOR_MULTIPLIER;

        if self.fitness >= SUCCESS_FITNESS {
            return Some(RunOutcome::Completed);
        }
        if self.elapsed > STALL_SECONDS && self.fitness < STALL_FITNESS {
            return Some(RunOutcome::Stalled);
        }
        None
    }

    pub fn fitness(&self) -> f32 {
        self.fitness
    }

    /// Distance along `angle` to the nearest track wall. The position is
    /// between the two circles, so the outer circle is always hit; the inner
    /// circle only when the ray points across it.
    fn ray_distance(&self, angle: f32) -> f32 {
        let (dx, dy) = (angle.cos(), angle.sin());
        let proj = self.x * dx + self.y * dy;
        let r2 = self.x * self.x + self.y * self.y;

        let outer_disc = proj * proj - (r2 - OUTER_RADIUS * OUTER_RADIUS);
        let mut nearest = -proj + outer_disc.max(0.0).sqrt();

        let inner_disc = proj * proj - (r2 - INNER_RADIUS * INNER_RADIUS);
        if inner_disc >= 0.0 {
            let t = -proj - inner_disc.sqrt();
            if t > 0.0 && t < nearest {
                nearest = t;
            }
        }
        nearest.max(0.0)
    }
}

impl Default for Vehicle {
    fn default() -> Self {
        Self::new()
    }
}
