/**
 * Command State
 * 
 * Thrust and steering setpoints for the left and right thruster units.
 * Thrust is bounded by a configurable ceiling, angle by +-MAX_ANGLE rad.
 */

/// Steering limit in radians (about 90 degrees)
pub const MAX_ANGLE: f64 = 1.571;

/// Thrust ceiling used when none is configured
pub const DEFAULT_MAX_SPEED: f64 = 10000.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    Left,
    Right,
}

/// Setpoints published to the actuation layer every keystroke
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CommandState {
    pub left_thrust: f64,
    pub left_angle: f64,
    pub right_thrust: f64,
    pub right_angle: f64,
    pub max_speed: f64,
}

impl Default for CommandState {
    fn default() -> Self {
        Self::zeroed(DEFAULT_MAX_SPEED)
    }
}

impl CommandState {
    pub fn zeroed(max_speed: f64) -> Self {
        Self {
            left_thrust: 0.0,
            left_angle: 0.0,
            right_thrust: 0.0,
            right_angle: 0.0,
            max_speed,
        }
    }

    /// Same ceiling, all four setpoints at zero
    pub fn stopped(&self) -> Self {
        Self::zeroed(self.max_speed)
    }

    pub fn is_stopped(&self) -> bool {
        self.channels().iter().all(|&v| v == 0.0)
    }

    pub fn thrust(&self, side: Side) -> f64 {
        match side {
            Side::Left => self.left_thrust,
            Side::Right => self.right_thrust,
        }
    }

    pub fn angle(&self, side: Side) -> f64 {
        match side {
            Side::Left => self.left_angle,
            Side::Right => self.right_angle,
        }
    }

    /// Add `delta` to one side's thrust, saturating at +-max_speed
    pub fn step_thrust(&mut self, side: Side, delta: f64) {
        let limit = self.max_speed;
        let thrust = match side {
            Side::Left => &mut self.left_thrust,
            Side::Right => &mut self.right_thrust,
        };
        *thrust = (*thrust + delta).clamp(-limit, limit);
    }

    /// Add `delta` to one side's angle, saturating at +-MAX_ANGLE
    pub fn step_angle(&mut self, side: Side, delta: f64) {
        let angle = match side {
            Side::Left => &mut self.left_angle,
            Side::Right => &mut self.right_angle,
        };
        *angle = (*angle + delta).clamp(-MAX_ANGLE, MAX_ANGLE);
    }

    /// Channel order: left thrust, left angle, right thrust, right angle
    pub fn channels(&self) -> [f64; 4] {
        [self.left_thrust, self.left_angle, self.right_thrust, self.right_angle]
    }

    /// One-line readout: thrust as percent of the ceiling, angle in degrees
    pub fn status_line(&self) -> String {
        format!(
            "Left: speed {:6.1} [%]  angle {:6.1} [deg]  |  Right: speed {:6.1} [%]  angle {:6.1} [deg]",
            self.thrust_percent(Side::Left),
            self.left_angle.to_degrees(),
            self.thrust_percent(Side::Right),
            self.right_angle.to_degrees(),
        )
    }

    fn thrust_percent(&self, side: Side) -> f64 {
        if self.max_speed > 0.0 {
            self.thrust(side) / self.max_speed * 100.0
        } else {
            0.0
        }
    }
}
