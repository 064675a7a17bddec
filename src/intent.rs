//! Movement intent component.
//!
//! [`MovementIntent`] is the input surface of the controller. Player input,
//! AI, or network code writes the desired direction and jump button state;
//! the controller systems read the component and never touch input devices
//! themselves.

use bevy::prelude::*;

/// Desired movement for a platformer controller.
///
/// Write to this component from your own input system every frame. Jump
/// presses go through edge detection: when `jump_pressed` goes from `false`
/// to `true`, one jump evaluation is latched for the next physics tick.
/// Holding the button does not latch again until it has been released, and a
/// latched press is consumed by exactly one evaluation whether or not a jump
/// actually fires.
///
/// # Example
///
/// ```rust
/// use simple_platformer_controller::prelude::*;
///
/// let mut intent = MovementIntent::new();
/// intent.set_direction(1.0);
/// assert_eq!(intent.direction, 1.0);
///
/// // Values outside the unit range are clamped by the setter.
/// intent.set_direction(-3.0);
/// assert_eq!(intent.direction, -1.0);
/// ```
#[derive(Component, Reflect, Debug, Clone, Default)]
#[reflect(Component)]
pub struct MovementIntent {
    /// Horizontal movement direction (-1.0 = left, 1.0 = right).
    ///
    /// The controller multiplies this by `movement_speed`, so magnitudes
    /// between 0 and 1 give analog speed control. Direct writes are not
    /// clamped; use [`set_direction`](Self::set_direction) for that.
    pub direction: f32,

    /// Whether the jump button is currently held.
    ///
    /// Set this every frame with the current state from any input source:
    /// keyboard, gamepad, touch, AI, network. The controller detects rising
    /// edges itself.
    pub jump_pressed: bool,

    /// Previous frame's jump_pressed state (for edge detection).
    pub(crate) jump_pressed_prev: bool,

    /// One pending jump evaluation, latched on a rising edge and consumed by
    /// the next physics tick.
    pub(crate) jump_queued: bool,
}

impl MovementIntent {
    /// Create a new empty intent.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the movement direction, clamped to `[-1.0, 1.0]`.
    pub fn set_direction(&mut self, direction: f32) {
        self.direction = direction.clamp(-1.0, 1.0);
    }

    /// Set the jump button state.
    ///
    /// Pass the raw held state every frame; edge detection happens in the
    /// controller.
    ///
    /// # Example
    /// ```rust,ignore
    /// intent.set_jump_pressed(keyboard.pressed(KeyCode::Space));
    /// ```
    pub fn set_jump_pressed(&mut self, pressed: bool) {
        self.jump_pressed = pressed;
    }

    /// Latch one jump evaluation directly, bypassing edge detection.
    ///
    /// Useful for AI and scripted sequences that think in discrete actions
    /// rather than button states.
    pub fn press_jump(&mut self) {
        self.jump_queued = true;
    }

    /// Check whether a jump evaluation is pending.
    pub fn has_queued_jump(&self) -> bool {
        self.jump_queued
    }

    /// Clear direction and button state, dropping any pending jump.
    pub fn clear(&mut self) {
        self.direction = 0.0;
        self.jump_pressed = false;
        self.jump_queued = false;
    }

    /// Record the current button state, latching on a rising edge.
    pub(crate) fn latch_press_edge(&mut self) {
        if self.jump_pressed && !self.jump_pressed_prev {
            self.jump_queued = true;
        }
        self.jump_pressed_prev = self.jump_pressed;
    }

    /// Take and consume the pending jump evaluation, if any.
    pub(crate) fn take_queued_jump(&mut self) -> bool {
        std::mem::take(&mut self.jump_queued)
    }
}
