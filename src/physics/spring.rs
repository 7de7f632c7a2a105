//! Analytical spring-damper on a single axis.
//!
//! Springs are solved in closed form, so a large `dt` never makes them
//! explode the way an explicit Euler step would.

use serde::{Deserialize, Serialize};

use crate::error::PhysicsError;

/// Tuning for a [`Spring`].
///
/// `damping_ratio == 1.0` is critically damped (fastest return without
/// overshoot), below is bouncy, above is sluggish.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct SpringConfig {
    /// Natural frequency in Hz.
    pub frequency: f64,

    /// Damping ratio (zeta).
    pub damping_ratio: f64,
}

impl SpringConfig {
    /// Create a spring configuration.
    pub fn new(frequency: f64, damping_ratio: f64) -> Result<Self, PhysicsError> {
        let config = Self {
            frequency,
            damping_ratio,
        };
        config.validate()?;
        Ok(config)
    }

    /// Critically damped spring at the given frequency.
    pub fn critically_damped(frequency: f64) -> Result<Self, PhysicsError> {
        Self::new(frequency, 1.0)
    }

    /// Check that both parameters are usable.
    pub fn validate(&self) -> Result<(), PhysicsError> {
        if !(self.frequency.is_finite() && self.frequency > 0.0) {
            return Err(PhysicsError::InvalidFrequency(self.frequency));
        }
        if !(self.damping_ratio.is_finite() && self.damping_ratio > 0.0) {
            return Err(PhysicsError::InvalidDampingRatio(self.damping_ratio));
        }
        Ok(())
    }

    fn mode(&self) -> DampingMode {
        const EPS: f64 = 1e-6;
        if (self.damping_ratio - 1.0).abs() < EPS {
            DampingMode::CriticallyDamped
        } else if self.damping_ratio < 1.0 {
            DampingMode::Underdamped
        } else {
            DampingMode::Overdamped
        }
    }
}

impl Default for SpringConfig {
    /// A snappy, critically damped return spring.
    fn default() -> Self {
        Self {
            frequency: 2.0,
            damping_ratio: 1.0,
        }
    }
}

/// Damping regime derived from the damping ratio.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum DampingMode {
    CriticallyDamped,
    Underdamped,
    Overdamped,
}

/// A damped spring pulling `current` towards `end_value`.
#[derive(Clone, Debug, PartialEq)]
pub struct Spring {
    current: f64,
    velocity: f64,
    end_value: f64,
    angular_freq: f64,
    damping_ratio: f64,
    mode: DampingMode,
}

impl Spring {
    /// Create a spring at rest at `initial`.
    pub fn new(config: SpringConfig, initial: f64) -> Result<Self, PhysicsError> {
        config.validate()?;
        Ok(Self {
            current: initial,
            velocity: 0.0,
            end_value: initial,
            angular_freq: std::f64::consts::TAU * config.frequency,
            damping_ratio: config.damping_ratio,
            mode: config.mode(),
        })
    }

    /// Advance the spring by `dt` seconds.
    pub fn update(&mut self, dt: f64) {
        let x0 = self.current - self.end_value;
        let v0 = self.velocity;
        let w = self.angular_freq;

        let (x, v) = match self.mode {
            DampingMode::CriticallyDamped => {
                let exp_term = (-w * dt).exp();
                let c2 = v0 + x0 * w;
                ((x0 + c2 * dt) * exp_term, (v0 - c2 * w * dt) * exp_term)
            }
            DampingMode::Underdamped => {
                let zeta = self.damping_ratio;
                let wd = w * (1.0 - zeta * zeta).sqrt();
                let exp_term = (-zeta * w * dt).exp();
                let (sin_term, cos_term) = (wd * dt).sin_cos();

                let a = x0;
                let b = (v0 + x0 * zeta * w) / wd;

                let x = (a * cos_term + b * sin_term) * exp_term;
                let v = ((b * wd - a * zeta * w) * cos_term - (a * wd + b * zeta * w) * sin_term)
                    * exp_term;
                (x, v)
            }
            DampingMode::Overdamped => {
                let zeta = self.damping_ratio;
                let s = (zeta * zeta - 1.0).sqrt();
                let r1 = -w * (zeta - s);
                let r2 = -w * (zeta + s);

                let c1 = (x0 * r2 - v0) / (r2 - r1);
                let c2 = (v0 - x0 * r1) / (r2 - r1);

                let exp1 = (r1 * dt).exp();
                let exp2 = (r2 * dt).exp();
                (c1 * exp1 + c2 * exp2, c1 * r1 * exp1 + c2 * r2 * exp2)
            }
        };

        self.current = self.end_value + x;
        self.velocity = v;
    }

    /// Current position.
    #[must_use]
    pub fn value(&self) -> f64 {
        self.current
    }

    /// Current velocity.
    #[must_use]
    pub fn velocity(&self) -> f64 {
        self.velocity
    }

    /// Position the spring is pulling towards.
    #[must_use]
    pub fn end_value(&self) -> f64 {
        self.end_value
    }

    #[must_use]
    pub fn mode(&self) -> DampingMode {
        self.mode
    }

    pub fn set_end_value(&mut self, end_value: f64) {
        self.end_value = end_value;
    }

    /// Teleport to `value` and stop. Used when a drag hands the card back
    /// to the spring.
    pub fn set_current_value(&mut self, value: f64) {
        self.current = value;
        self.velocity = 0.0;
    }

    /// Give the spring an initial kick, e.g. the release velocity of a drag.
    pub fn set_velocity(&mut self, velocity: f64) {
        self.velocity = velocity;
    }

    /// Jump straight to the end value.
    pub fn snap_to_end(&mut self) {
        self.current = self.end_value;
        self.velocity = 0.0;
    }

    /// Check if both displacement and velocity are within tolerance.
    #[must_use]
    pub fn is_at_rest(&self, eps_pos: f64, eps_vel: f64) -> bool {
        (self.current - self.end_value).abs() < eps_pos && self.velocity.abs() < eps_vel
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settle(spring: &mut Spring, steps: usize) {
        for _ in 0..steps {
            spring.update(1.0 / 60.0);
        }
    }

    #[test]
    fn test_config_validation() {
        assert!(SpringConfig::new(2.0, 0.5).is_ok());
        assert_eq!(
            SpringConfig::new(0.0, 1.0),
            Err(PhysicsError::InvalidFrequency(0.0))
        );
        assert!(matches!(
            SpringConfig::new(2.0, f64::NAN),
            Err(PhysicsError::InvalidDampingRatio(_))
        ));
    }

    #[test]
    fn test_mode_from_ratio() {
        let spring = |ratio| Spring::new(SpringConfig::new(2.0, ratio).unwrap(), 0.0).unwrap();
        assert_eq!(spring(1.0).mode(), DampingMode::CriticallyDamped);
        assert_eq!(spring(0.3).mode(), DampingMode::Underdamped);
        assert_eq!(spring(2.5).mode(), DampingMode::Overdamped);
    }

    #[test]
    fn test_new_spring_is_at_rest() {
        let spring = Spring::new(SpringConfig::default(), 5.0).unwrap();
        assert_eq!(spring.value(), 5.0);
        assert_eq!(spring.end_value(), 5.0);
        assert!(spring.is_at_rest(1e-9, 1e-9));
    }

    #[test]
    fn test_critically_damped_converges_without_overshoot() {
        let mut spring = Spring::new(SpringConfig::default(), 0.0).unwrap();
        spring.set_end_value(10.0);
        for _ in 0..600 {
            spring.update(1.0 / 60.0);
            assert!(spring.value() <= 10.0 + 1e-9);
        }
        assert!(spring.is_at_rest(1e-3, 1e-3));
    }

    #[test]
    fn test_underdamped_overshoots() {
        let mut spring = Spring::new(SpringConfig::new(2.0, 0.2).unwrap(), 0.0).unwrap();
        spring.set_end_value(10.0);
        let mut crossed = false;
        for _ in 0..600 {
            spring.update(1.0 / 60.0);
            if spring.value() > 10.0 {
                crossed = true;
                break;
            }
        }
        assert!(crossed, "underdamped spring should overshoot its end value");
    }

    #[test]
    fn test_overdamped_converges() {
        let mut spring = Spring::new(SpringConfig::new(2.0, 3.0).unwrap(), 0.0).unwrap();
        spring.set_end_value(-4.0);
        settle(&mut spring, 2000);
        assert!((spring.value() + 4.0).abs() < 1e-2);
    }

    #[test]
    fn test_snap_and_set_current() {
        let mut spring = Spring::new(SpringConfig::default(), 0.0).unwrap();
        spring.set_end_value(3.0);
        spring.set_velocity(12.0);
        spring.snap_to_end();
        assert_eq!(spring.value(), 3.0);
        assert_eq!(spring.velocity(), 0.0);

        spring.set_current_value(-1.0);
        assert_eq!(spring.value(), -1.0);
        assert!(!spring.is_at_rest(1e-3, 1e-3));
    }
}
