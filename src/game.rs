//! Game orchestration: one frame at a time.
//!
//! The host calls [`Game::tick`] once per animation frame with the polled
//! input and the elapsed milliseconds, then [`Game::draw`]. `tick` never
//! schedules anything itself; it reports whether the loop should keep running,
//! is waiting out a transition, or is over. Delayed transitions (the win pause
//! before the next boss, the death screen before the hand-off) run on the
//! simulated time fed in through `dt_ms`, so tests can step them exactly.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::bossfight::{AnswerResult, Bossfight};
use crate::config::GameConfig;
use crate::input::InputState;
use crate::player::{Player, PlayerStatus};
use crate::render::{Canvas, overlay, write_text};

/// Inclusive random integer in `[min, max]`: a uniform draw scaled to the
/// range and rounded.
pub fn random_number<R: Rng + ?Sized>(rng: &mut R, min: u32, max: u32) -> u32 {
    let (lo, hi) = (min.min(max) as f64, min.max(max) as f64);
    let draw: f64 = rng.gen_range(0.0..1.0);
    (draw * (hi - lo) + lo).round() as u32
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Sound {
    BossTheme,
    Win,
    Lose,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TransitionKind {
    /// Boss beaten: show the win screen, then bring in the next boss.
    NextEncounter,
    /// Bird died: show the death screen, then hand the outcome to the host.
    Death,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PendingTransition {
    pub kind: TransitionKind,
    pub remaining_ms: f64,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameOutcome {
    Died { score: u64, vis_bucks: u64, encounters_won: u32 },
}

/// Loop control returned by every tick.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FrameOutcome {
    Running,
    Suspended(TransitionKind),
    Over(GameOutcome),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FrameEvent {
    Answered(AnswerResult),
    ScoreCredited { points: u32, score: u64 },
    EncounterCompleted { encounter: u32, money: u32, vis_bucks: u64 },
    EncounterStarted { encounter: u32 },
    PlayerDied,
    Play(Sound),
    Stop(Sound),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Frame {
    pub outcome: FrameOutcome,
    pub events: Vec<FrameEvent>,
}

pub struct Game {
    config: GameConfig,
    width: f64,
    height: f64,
    score: u64,
    vis_bucks: u64,
    encounters_won: u32,
    player: Player,
    bossfight: Bossfight,
    pending: Option<PendingTransition>,
    outcome: Option<GameOutcome>,
    started: bool,
    rng: StdRng,
}

impl Game {
    /// New game on a `width` x `height` canvas. Expects a validated config.
    pub fn new(config: GameConfig, width: f64, height: f64) -> Self {
        let mut rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let player = Player::new(width, height, config.starting_hp, config.player_speed);
        let bossfight = Bossfight::new(1, (width, height), &config, &mut rng);
        log::info!("game created on {width}x{height} canvas, hp {}", config.starting_hp);
        Self {
            config,
            width,
            height,
            score: 0,
            vis_bucks: 0,
            encounters_won: 0,
            player,
            bossfight,
            pending: None,
            outcome: None,
            started: false,
            rng,
        }
    }

    /// Advance one frame.
    pub fn tick(&mut self, input: &InputState, dt_ms: f64) -> Frame {
        let mut events = Vec::new();
        if let Some(outcome) = self.outcome {
            return Frame { outcome: FrameOutcome::Over(outcome), events };
        }
        if !self.started {
            self.started = true;
            events.push(FrameEvent::Play(Sound::BossTheme));
            events.push(FrameEvent::EncounterStarted { encounter: self.bossfight.encounter() });
        }
        if let Some(pending) = self.pending.as_mut() {
            self.player.observe_lock(input);
            pending.remaining_ms -= dt_ms.max(0.0);
            if pending.remaining_ms > 0.0 {
                let kind = pending.kind;
                return Frame { outcome: FrameOutcome::Suspended(kind), events };
            }
            let kind = pending.kind;
            self.pending = None;
            let outcome = self.finish_transition(kind, &mut events);
            return Frame { outcome, events };
        }

        self.player.move_within((self.width, self.height), input, dt_ms);
        if self.player.lock_answer() {
            if let Some(result) = self.bossfight.answer_select(&mut self.player) {
                events.push(FrameEvent::Answered(result));
            }
        }

        if self.bossfight.is_completed() {
            let money = self.bossfight.money();
            self.vis_bucks += u64::from(money);
            self.encounters_won += 1;
            log::info!(
                "encounter {} won: +{money} visbucks ({} total)",
                self.bossfight.encounter(),
                self.vis_bucks
            );
            if self.bossfight.stop_music() {
                events.push(FrameEvent::Stop(Sound::BossTheme));
            }
            events.push(FrameEvent::Play(Sound::Win));
            events.push(FrameEvent::EncounterCompleted {
                encounter: self.bossfight.encounter(),
                money,
                vis_bucks: self.vis_bucks,
            });
            self.schedule(TransitionKind::NextEncounter);
        }

        if let Some(points) = self.bossfight.take_round_points() {
            self.score += u64::from(points);
            events.push(FrameEvent::ScoreCredited { points, score: self.score });
        }

        if self.player.status() == PlayerStatus::Dead && self.pending.is_none() {
            log::info!("player died with score {} and {} visbucks", self.score, self.vis_bucks);
            if self.bossfight.stop_music() {
                events.push(FrameEvent::Stop(Sound::BossTheme));
            }
            events.push(FrameEvent::Play(Sound::Lose));
            events.push(FrameEvent::PlayerDied);
            self.schedule(TransitionKind::Death);
        }

        let outcome = match self.pending {
            None => FrameOutcome::Running,
            Some(p) => FrameOutcome::Suspended(p.kind),
        };
        Frame { outcome, events }
    }

    fn schedule(&mut self, kind: TransitionKind) {
        debug_assert!(self.pending.is_none(), "transition already pending");
        self.pending = Some(PendingTransition { kind, remaining_ms: self.config.transition_delay_ms });
    }

    fn finish_transition(&mut self, kind: TransitionKind, events: &mut Vec<FrameEvent>) -> FrameOutcome {
        match kind {
            TransitionKind::NextEncounter => {
                events.push(FrameEvent::Stop(Sound::Win));
                self.bossfight.reset_completion();
                let next = self.bossfight.encounter() + 1;
                self.bossfight =
                    Bossfight::new(next, (self.width, self.height), &self.config, &mut self.rng);
                log::info!("encounter {next} started");
                events.push(FrameEvent::Play(Sound::BossTheme));
                events.push(FrameEvent::EncounterStarted { encounter: next });
                FrameOutcome::Running
            }
            TransitionKind::Death => {
                let outcome = GameOutcome::Died {
                    score: self.score,
                    vis_bucks: self.vis_bucks,
                    encounters_won: self.encounters_won,
                };
                self.outcome = Some(outcome);
                FrameOutcome::Over(outcome)
            }
        }
    }

    /// Redraw the whole scene.
    pub fn draw(&self, canvas: &mut dyn Canvas) {
        let (w, _) = canvas.size();
        canvas.clear();
        self.player.draw(canvas);
        if !self.bossfight.is_completed() {
            self.bossfight.draw(canvas, Some(self.player.center().1));
        }

        write_text(canvas, &format!("Score: {}", self.score), 40.0, w / 2.0, 50.0);
        write_text(canvas, &format!("VisBuck: {}", self.vis_bucks), 40.0, w / 4.0, 50.0);
        write_text(canvas, &format!("HP: {}", self.player.hp()), 40.0, w / 1.40, 50.0);

        if self.player.status() == PlayerStatus::Dead {
            overlay(canvas, "red", "You died");
        } else if self.bossfight.is_completed() {
            overlay(canvas, "lightblue", "Level Complete");
        }
    }

    pub fn score(&self) -> u64 {
        self.score
    }

    pub fn vis_bucks(&self) -> u64 {
        self.vis_bucks
    }

    pub fn encounters_won(&self) -> u32 {
        self.encounters_won
    }

    pub fn player(&self) -> &Player {
        &self.player
    }

    pub fn player_mut(&mut self) -> &mut Player {
        &mut self.player
    }

    pub fn bossfight(&self) -> &Bossfight {
        &self.bossfight
    }

    pub fn pending(&self) -> Option<PendingTransition> {
        self.pending
    }

}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::player::PLAYER_SIZE;
    use crate::render::RecordingCanvas;

    fn seeded(seed: u64) -> Game {
        let cfg = GameConfig { seed: Some(seed), ..GameConfig::default() };
        Game::new(cfg, 1000.0, 800.0)
    }

    fn press_lane(game: &mut Game, lane: usize) -> Frame {
        let y = game.bossfight().lane_center(lane) - PLAYER_SIZE / 2.0;
        let x = game.player().position().0;
        game.player_mut().set_position(x, y);
        game.tick(&InputState::default(), 16.0);
        game.tick(&InputState { lock: true, ..Default::default() }, 16.0)
    }

    #[test]
    fn random_number_is_inclusive_and_bounded() {
        let mut rng = StdRng::seed_from_u64(3);
        let mut seen = [false; 3];
        for _ in 0..500 {
            let n = random_number(&mut rng, 4, 6);
            assert!((4..=6).contains(&n));
            seen[(n - 4) as usize] = true;
        }
        assert_eq!(seen, [true; 3]);
        assert_eq!(random_number(&mut rng, 9, 9), 9);
    }

    #[test]
    fn first_tick_starts_the_encounter_music() {
        let mut g = seeded(1);
        let f = g.tick(&InputState::default(), 16.0);
        assert_eq!(f.outcome, FrameOutcome::Running);
        assert_eq!(
            f.events,
            vec![FrameEvent::Play(Sound::BossTheme), FrameEvent::EncounterStarted { encounter: 1 }]
        );
        assert!(g.tick(&InputState::default(), 16.0).events.is_empty());
    }

    #[test]
    fn correct_answer_credits_score_once() {
        let mut g = seeded(2);
        let correct = g.bossfight().question().correct;
        let f = press_lane(&mut g, correct);
        assert!(f.events.contains(&FrameEvent::ScoreCredited { points: 100, score: 100 }));
        let f = g.tick(&InputState { lock: true, ..Default::default() }, 16.0);
        assert!(f.events.is_empty());
        assert_eq!(g.score(), 100);
    }

    #[test]
    fn pending_transition_freezes_input() {
        let cfg = GameConfig { seed: Some(5), answers_to_win: 1, ..GameConfig::default() };
        let mut g = Game::new(cfg, 1000.0, 800.0);
        let correct = g.bossfight().question().correct;
        let f = press_lane(&mut g, correct);
        assert_eq!(f.outcome, FrameOutcome::Suspended(TransitionKind::NextEncounter));
        let before = g.player().position();
        let f = g.tick(&InputState { down: true, ..Default::default() }, 1000.0);
        assert_eq!(f.outcome, FrameOutcome::Suspended(TransitionKind::NextEncounter));
        assert_eq!(g.player().position(), before);
        assert_eq!(g.pending().map(|p| p.remaining_ms), Some(4000.0));
    }

    #[test]
    fn draw_shows_hud_and_overlays() {
        let mut g = seeded(4);
        let mut c = RecordingCanvas::new(1000.0, 800.0);
        g.draw(&mut c);
        assert!(c.has_text("Score: 0"));
        assert!(c.has_text("VisBuck: 0"));
        assert!(c.has_text("HP: 3"));
        assert!(!c.has_text("You died"));

        for _ in 0..3 {
            let wrong = (g.bossfight().question().correct + 1) % 4;
            press_lane(&mut g, wrong);
        }
        g.draw(&mut c);
        assert!(c.has_text("You died"));
        assert!(c.has_text("HP: 0"));
    }
}
