// ABOUTME: Damped spring integrator used to settle the wheel picker onto a snapped offset
// ABOUTME: Semi-implicit Euler with bounded sub-steps and a rest threshold on distance and speed
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Dreamband Contributors

use std::time::Duration;

use dreamband_core::constants::picker;
use serde::{Deserialize, Serialize};

/// Spring parameters
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpringConfig {
    /// Restoring force per pixel of displacement
    pub stiffness: f64,
    /// Damping force per px/s of velocity
    pub damping: f64,
    /// Mass of the moving body
    pub mass: f64,
    /// Distance from target under which the spring may rest (px)
    pub rest_delta: f64,
    /// Speed under which the spring may rest (px/s)
    pub rest_speed: f64,
}

impl Default for SpringConfig {
    fn default() -> Self {
        Self {
            stiffness: picker::SPRING_STIFFNESS,
            damping: picker::SPRING_DAMPING,
            mass: picker::SPRING_MASS,
            rest_delta: picker::REST_DELTA,
            rest_speed: picker::REST_SPEED,
        }
    }
}

impl SpringConfig {
    /// Damping ratio; 1.0 is critical damping
    #[must_use]
    pub fn damping_ratio(&self) -> f64 {
        self.damping / (2.0 * (self.stiffness * self.mass).sqrt())
    }
}

/// One spring animation toward a fixed target
///
/// The target is fixed at construction; nothing can move it mid-flight.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct SpringIntegrator {
    config: SpringConfig,
    position: f64,
    velocity: f64,
    target: f64,
    at_rest: bool,
}

impl SpringIntegrator {
    /// Start a spring at `position` moving with `velocity` toward `target`
    #[must_use]
    pub const fn new(config: SpringConfig, position: f64, velocity: f64, target: f64) -> Self {
        Self {
            config,
            position,
            velocity,
            target,
            at_rest: false,
        }
    }

    /// Current position
    #[must_use]
    pub const fn position(&self) -> f64 {
        self.position
    }

    /// Current velocity (px/s)
    #[must_use]
    pub const fn velocity(&self) -> f64 {
        self.velocity
    }

    /// Fixed target
    #[must_use]
    pub const fn target(&self) -> f64 {
        self.target
    }

    /// Whether the spring has settled
    #[must_use]
    pub const fn is_at_rest(&self) -> bool {
        self.at_rest
    }

    /// Advance by `dt`, returning `true` once the spring is at rest
    ///
    /// On reaching rest the position is set exactly to the target.
    pub fn step(&mut self, dt: Duration) -> bool {
        if self.at_rest {
            return true;
        }
        let mut remaining = dt.as_secs_f64();
        while remaining > 0.0 {
            let h = remaining.min(picker::MAX_SUBSTEP_SECS);
            let displacement = self.position - self.target;
            let force = -self.config.stiffness * displacement - self.config.damping * self.velocity;
            self.velocity += force / self.config.mass * h;
            self.position += self.velocity * h;
            remaining -= h;

            if (self.position - self.target).abs() < self.config.rest_delta
                && self.velocity.abs() < self.config.rest_speed
            {
                self.position = self.target;
                self.velocity = 0.0;
                self.at_rest = true;
                return true;
            }
        }
        false
    }
}
