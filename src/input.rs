/// Keyboard snapshot for one frame.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct InputState {
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
    /// Space / Enter: lock the answer of the lane the bird is in.
    pub lock: bool,
}

impl InputState {
    /// Apply a `keydown` (`pressed = true`) or `keyup` event by `KeyboardEvent.key`.
    /// Returns false for keys the game ignores.
    pub fn set_key(&mut self, key: &str, pressed: bool) -> bool {
        let slot = match key {
            "ArrowUp" | "w" | "W" => &mut self.up,
            "ArrowDown" | "s" | "S" => &mut self.down,
            "ArrowLeft" | "a" | "A" => &mut self.left,
            "ArrowRight" | "d" | "D" => &mut self.right,
            " " | "Spacebar" | "Enter" => &mut self.lock,
            _ => return false,
        };
        *slot = pressed;
        true
    }

    /// Unit direction from the held arrow keys (-1, 0 or 1 on each axis).
    pub fn direction(&self) -> (f64, f64) {
        let dx = (self.right as i8 - self.left as i8) as f64;
        let dy = (self.down as i8 - self.up as i8) as f64;
        (dx, dy)
    }
}
