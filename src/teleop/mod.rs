/**
 * Teleop Module
 * 
 * Keyboard teleoperation for a two-thruster surface vessel:
 * - Command state and clamping
 * - Key bindings (one table for both sides)
 * - Command mapper (RUNNING / STOPPED)
 * - Session loop with guaranteed zeroing on exit
 */

pub mod command;
pub mod keymap;
pub mod mapper;
pub mod session;

pub use command::{CommandState, Side, MAX_ANGLE, DEFAULT_MAX_SPEED};
pub use keymap::{Binding, BindingKind, QUIT_KEY};
pub use mapper::{apply, CommandMapper, RunState, Step};
pub use session::TeleopSession;
