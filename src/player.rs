//! The HZ bird: the sprite the player flies between answer lanes.

use crate::input::InputState;
use crate::render::{Canvas, Sprite};

pub const PLAYER_SIZE: f64 = 64.0;
const TRAIL_SECONDS: f64 = 0.05;
const TRAIL_COLOR: &str = "rgba(244,163,0,0.25)";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PlayerStatus {
    Alive,
    Dead,
}

impl PlayerStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            PlayerStatus::Alive => "alive",
            PlayerStatus::Dead => "dead",
        }
    }
}

#[derive(Clone, Debug)]
pub struct Player {
    x: f64,
    y: f64,
    vx: f64,
    vy: f64,
    speed: f64, // px per second
    hp: u32,
    status: PlayerStatus,
    // Lock key edge detection: a press arms `lock_pending` once until released.
    lock_held: bool,
    lock_pending: bool,
}

impl Player {
    /// Spawn near the left edge, vertically centered in a `width` x `height` canvas.
    pub fn new(width: f64, height: f64, hp: u32, speed: f64) -> Self {
        let x = (width / 8.0).min((width - PLAYER_SIZE).max(0.0));
        let y = ((height - PLAYER_SIZE) / 2.0).max(0.0);
        Self {
            x,
            y,
            vx: 0.0,
            vy: 0.0,
            speed,
            hp,
            status: if hp == 0 { PlayerStatus::Dead } else { PlayerStatus::Alive },
            lock_held: false,
            lock_pending: false,
        }
    }

    /// Apply this frame's input and keep the sprite inside `(width, height)`.
    pub fn move_within(&mut self, bounds: (f64, f64), input: &InputState, dt_ms: f64) {
        if self.status == PlayerStatus::Dead {
            self.vx = 0.0;
            self.vy = 0.0;
            return;
        }
        let (dx, dy) = input.direction();
        self.vx = dx * self.speed;
        self.vy = dy * self.speed;
        let dt = dt_ms.max(0.0) / 1000.0;
        let (w, h) = bounds;
        self.x = (self.x + self.vx * dt).clamp(0.0, (w - PLAYER_SIZE).max(0.0));
        self.y = (self.y + self.vy * dt).clamp(0.0, (h - PLAYER_SIZE).max(0.0));

        if input.lock && !self.lock_held {
            self.lock_pending = true;
        }
        self.lock_held = input.lock;
    }

    /// Track the lock key without arming an answer, for frames where the bird
    /// is frozen. A press that started then is not a fresh press later.
    pub fn observe_lock(&mut self, input: &InputState) {
        self.lock_held = input.lock;
    }

    /// Sprite plus a short trail behind it while flying.
    pub fn draw(&self, canvas: &mut dyn Canvas) {
        if self.vx != 0.0 || self.vy != 0.0 {
            let tx = self.x - self.vx * TRAIL_SECONDS;
            let ty = self.y - self.vy * TRAIL_SECONDS;
            canvas.fill_rect(tx, ty, PLAYER_SIZE, PLAYER_SIZE, TRAIL_COLOR);
        }
        canvas.draw_sprite(Sprite::Player, self.x, self.y, PLAYER_SIZE, PLAYER_SIZE);
    }

    /// True once per lock key press; reading it consumes the signal.
    pub fn lock_answer(&mut self) -> bool {
        std::mem::take(&mut self.lock_pending)
    }

    /// Lose one HP; at zero the bird is dead for good.
    pub fn take_hit(&mut self) {
        self.hp = self.hp.saturating_sub(1);
        if self.hp == 0 {
            self.status = PlayerStatus::Dead;
            self.lock_pending = false;
        }
    }

    pub fn status(&self) -> PlayerStatus {
        self.status
    }

    pub fn hp(&self) -> u32 {
        self.hp
    }

    pub fn position(&self) -> (f64, f64) {
        (self.x, self.y)
    }

    pub fn center(&self) -> (f64, f64) {
        (self.x + PLAYER_SIZE / 2.0, self.y + PLAYER_SIZE / 2.0)
    }

    /// Teleport; the next `move_within` clamps it back inside the canvas.
    pub fn set_position(&mut self, x: f64, y: f64) {
        self.x = x;
        self.y = y;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::{DrawCall, RecordingCanvas};

    fn held(lock: bool) -> InputState {
        InputState { lock, ..Default::default() }
    }

    #[test]
    fn moves_at_speed_and_clamps_to_bounds() {
        let mut p = Player::new(800.0, 600.0, 3, 100.0);
        let (x0, y0) = p.position();
        let right = InputState { right: true, ..Default::default() };
        p.move_within((800.0, 600.0), &right, 500.0);
        assert_eq!(p.position(), (x0 + 50.0, y0));

        let up = InputState { up: true, ..Default::default() };
        p.move_within((800.0, 600.0), &up, 60_000.0);
        assert_eq!(p.position().1, 0.0);

        let down_right = InputState { down: true, right: true, ..Default::default() };
        p.move_within((800.0, 600.0), &down_right, 60_000.0);
        assert_eq!(p.position(), (800.0 - PLAYER_SIZE, 600.0 - PLAYER_SIZE));
    }

    #[test]
    fn lock_signals_once_per_press() {
        let mut p = Player::new(800.0, 600.0, 3, 100.0);
        p.move_within((800.0, 600.0), &held(true), 16.0);
        assert!(p.lock_answer());
        assert!(!p.lock_answer());
        // Still held: no new signal.
        p.move_within((800.0, 600.0), &held(true), 16.0);
        assert!(!p.lock_answer());
        p.move_within((800.0, 600.0), &held(false), 16.0);
        p.move_within((800.0, 600.0), &held(true), 16.0);
        assert!(p.lock_answer());
    }

    #[test]
    fn hits_kill_at_zero_hp() {
        let mut p = Player::new(800.0, 600.0, 2, 100.0);
        p.take_hit();
        assert_eq!((p.hp(), p.status()), (1, PlayerStatus::Alive));
        p.take_hit();
        assert_eq!((p.hp(), p.status()), (0, PlayerStatus::Dead));
        p.take_hit();
        assert_eq!(p.hp(), 0);
        assert_eq!(p.status().as_str(), "dead");
    }

    #[test]
    fn dead_bird_does_not_move() {
        let mut p = Player::new(800.0, 600.0, 1, 100.0);
        p.take_hit();
        let before = p.position();
        p.move_within((800.0, 600.0), &InputState { up: true, lock: true, ..Default::default() }, 500.0);
        assert_eq!(p.position(), before);
        assert!(!p.lock_answer());
    }

    #[test]
    fn held_lock_observed_while_frozen_does_not_fire_later() {
        let mut p = Player::new(800.0, 600.0, 3, 100.0);
        p.observe_lock(&held(true));
        p.move_within((800.0, 600.0), &held(true), 16.0);
        assert!(!p.lock_answer());

        // Released while frozen, pressed again afterwards: a fresh press.
        p.observe_lock(&held(false));
        p.move_within((800.0, 600.0), &held(true), 16.0);
        assert!(p.lock_answer());
        p.observe_lock(&held(false));
        assert!(!p.lock_answer());
    }

    #[test]
    fn flying_draws_a_trail_behind_the_sprite() {
        let mut p = Player::new(800.0, 600.0, 3, 100.0);
        let right = InputState { right: true, ..Default::default() };
        p.move_within((800.0, 600.0), &right, 100.0);
        let (x, y) = p.position();
        let mut c = RecordingCanvas::new(800.0, 600.0);
        p.draw(&mut c);
        assert_eq!(
            c.calls[0],
            DrawCall::FillRect { x: x - 100.0 * TRAIL_SECONDS, y, w: PLAYER_SIZE, h: PLAYER_SIZE, color: TRAIL_COLOR.into() }
        );
        assert!(matches!(c.calls[1], DrawCall::Sprite { sprite: Sprite::Player, .. }));
    }

    #[test]
    fn draw_places_sprite_at_position() {
        let p = Player::new(800.0, 600.0, 3, 100.0);
        let mut c = RecordingCanvas::new(800.0, 600.0);
        p.draw(&mut c);
        let (x, y) = p.position();
        assert_eq!(
            c.calls,
            vec![DrawCall::Sprite { sprite: Sprite::Player, x, y, w: PLAYER_SIZE, h: PLAYER_SIZE }]
        );
    }
}
