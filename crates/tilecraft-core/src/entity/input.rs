//! Per-frame control input

/// Tracks current input state for actor control
#[derive(Debug, Clone, Default)]
pub struct InputState {
    // Movement keys
    pub left_pressed: bool,
    pub right_pressed: bool,
    pub jump_pressed: bool,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Horizontal direction in -1.0..=1.0 (both keys cancel out)
    pub fn horizontal(&self) -> f32 {
        let mut direction = 0.0;
        if self.left_pressed {
            direction -= 1.0;
        }
        if self.right_pressed {
            direction += 1.0;
        }
        direction
    }
}
