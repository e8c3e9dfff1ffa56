/**
 * Command Mapper
 * 
 * Pure keystroke -> command transition plus the RUNNING / STOPPED
 * lifecycle around it. STOPPED is terminal and always reports a
 * zeroed command.
 */

use tracing::debug;

use super::command::CommandState;
use super::keymap::{self, BindingKind, QUIT_KEY};

/// Result of applying one keystroke
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Step {
    pub state: CommandState,
    pub quit: bool,
}

/// Total over every byte: bound keys step and clamp, the quit key
/// leaves the state alone, anything else zeroes all four setpoints.
pub fn apply(key: u8, state: CommandState) -> Step {
    let mut next = state;

    if let Some(binding) = keymap::lookup(key) {
        match binding.kind {
            BindingKind::Angle => next.step_angle(binding.side, binding.delta),
            BindingKind::Thrust => next.step_thrust(binding.side, binding.delta),
        }
        return Step { state: next, quit: false };
    }

    if key == QUIT_KEY {
        return Step { state, quit: true };
    }

    Step { state: state.stopped(), quit: false }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunState {
    Running,
    Stopped,
}

/// Owns the single command state for the lifetime of a session
#[derive(Debug, Clone)]
pub struct CommandMapper {
    state: CommandState,
    run_state: RunState,
}

impl CommandMapper {
    pub fn new(max_speed: f64) -> Self {
        Self {
            state: CommandState::zeroed(max_speed),
            run_state: RunState::Running,
        }
    }

    pub fn state(&self) -> &CommandState {
        &self.state
    }

    pub fn run_state(&self) -> RunState {
        self.run_state
    }

    pub fn is_running(&self) -> bool {
        self.run_state == RunState::Running
    }

    /// Apply one key. Returns the command to publish, or `None` once the
    /// mapper is stopped (the quit key stops it).
    pub fn handle_key(&mut self, key: u8) -> Option<CommandState> {
        if !self.is_running() {
            return None;
        }

        let step = apply(key, self.state);
        if step.quit {
            debug!("quit key received");
            self.stop();
            return None;
        }

        debug!(key = key, left_thrust = step.state.left_thrust, left_angle = step.state.left_angle,
            right_thrust = step.state.right_thrust, right_angle = step.state.right_angle, "key applied");
        self.state = step.state;
        Some(self.state)
    }

    /// Enter STOPPED and return the zeroed command to send on the way out
    pub fn stop(&mut self) -> CommandState {
        self.run_state = RunState::Stopped;
        self.state = self.state.stopped();
        self.state
    }
}
