//! Player input controls

use serde::{Deserialize, Serialize};

/// The fixed control set
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Control {
    MoveForward,
    MoveBack,
    MoveLeft,
    MoveRight,
    Jump,
    CrouchToggle,
}

impl Control {
    pub const ALL: [Control; 6] = [
        Control::MoveForward,
        Control::MoveBack,
        Control::MoveLeft,
        Control::MoveRight,
        Control::Jump,
        Control::CrouchToggle,
    ];

    #[inline]
    const fn bit(self) -> u8 {
        1 << self as u8
    }
}

/// Current and edge-triggered control state
pub trait InputSource {
    /// Control is held this frame
    fn is_down(&self, control: Control) -> bool;
    /// Control went down this frame
    fn just_pressed(&self, control: Control) -> bool;
}

/// Edge-tracking input state fed by press/release events
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InputState {
    down: u8,
    pressed: u8,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn press(&mut self, control: Control) {
        if self.down & control.bit() == 0 {
            self.pressed |= control.bit();
        }
        self.down |= control.bit();
    }

    pub fn release(&mut self, control: Control) {
        self.down &= !control.bit();
    }

    /// Clear edges once the frame has consumed them
    pub fn end_frame(&mut self) {
        self.pressed = 0;
    }
}

impl InputSource for InputState {
    fn is_down(&self, control: Control) -> bool {
        self.down & control.bit() != 0
    }

    fn just_pressed(&self, control: Control) -> bool {
        self.pressed & control.bit() != 0
    }
}
