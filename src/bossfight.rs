//! One boss encounter: a run of multiple-choice questions answered by flying
//! into an answer lane and locking it.
//!
//! Lanes are horizontal bands stacked below the HUD. The bird's vertical center
//! decides which answer it is "in". Each correct answer knocks one HP off the
//! boss; the encounter is complete when the boss runs out.

use rand::Rng;
use rand::seq::SliceRandom;

use crate::config::GameConfig;
use crate::game::random_number;
use crate::player::Player;
use crate::questions::{QUESTIONS, Question};
use crate::render::{Canvas, Sprite, TextAlign, TextStyle};

/// First lane starts below the HUD and the question prompt.
pub const LANE_TOP: f64 = 140.0;
const LANE_BOTTOM_MARGIN: f64 = 20.0;
const BOSS_SIZE: f64 = 160.0;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MusicState {
    Playing,
    Stopped,
}

/// What one locked answer did.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AnswerResult {
    Correct { lane: usize, points: u32, boss_hp: u32 },
    Wrong { lane: usize, player_hp: u32 },
}

#[derive(Debug)]
pub struct Bossfight {
    encounter: u32,
    width: f64,
    height: f64,
    order: Vec<usize>,
    cursor: usize,
    boss_hp: u32,
    boss_max_hp: u32,
    points_per_answer: u32,
    points: u32,
    round_points: Option<u32>,
    money: u32,
    completed: bool,
    music: MusicState,
}

impl Bossfight {
    /// Fresh in-progress encounter for a `width` x `height` canvas. The money
    /// reward is rolled here so it is fixed for the whole encounter.
    pub fn new<R: Rng + ?Sized>(
        encounter: u32,
        bounds: (f64, f64),
        config: &GameConfig,
        rng: &mut R,
    ) -> Self {
        let mut order: Vec<usize> = (0..QUESTIONS.len()).collect();
        order.shuffle(rng);
        Self {
            encounter,
            width: bounds.0,
            height: bounds.1,
            order,
            cursor: 0,
            boss_hp: config.answers_to_win,
            boss_max_hp: config.answers_to_win,
            points_per_answer: config.points_per_answer,
            points: 0,
            round_points: None,
            money: random_number(rng, config.money_min, config.money_max),
            completed: false,
            music: MusicState::Playing,
        }
    }

    pub fn encounter(&self) -> u32 {
        self.encounter
    }

    pub fn question(&self) -> &'static Question {
        let idx = self.order[self.cursor % self.order.len()];
        &QUESTIONS[idx]
    }

    pub fn lane_height(&self) -> f64 {
        let usable = (self.height - LANE_TOP - LANE_BOTTOM_MARGIN).max(0.0);
        usable / self.question().answers.len() as f64
    }

    /// Lane index under vertical coordinate `y`, if any.
    pub fn lane_at(&self, y: f64) -> Option<usize> {
        let lane_h = self.lane_height();
        if lane_h <= 0.0 || y < LANE_TOP {
            return None;
        }
        let lane = ((y - LANE_TOP) / lane_h).floor() as usize;
        (lane < self.question().answers.len()).then_some(lane)
    }

    /// Vertical center of `lane`.
    pub fn lane_center(&self, lane: usize) -> f64 {
        LANE_TOP + self.lane_height() * (lane as f64 + 0.5)
    }

    /// Resolve the answer in the lane the bird is in. Outside every lane, or
    /// once the boss is beaten, nothing happens.
    pub fn answer_select(&mut self, player: &mut Player) -> Option<AnswerResult> {
        if self.completed {
            return None;
        }
        let lane = self.lane_at(player.center().1)?;
        let correct = lane == self.question().correct;
        self.cursor += 1;
        if correct {
            self.boss_hp = self.boss_hp.saturating_sub(1);
            self.points = self.points.saturating_add(self.points_per_answer);
            self.round_points = Some(self.points_per_answer);
            if self.boss_hp == 0 {
                self.completed = true;
            }
            log::debug!("encounter {}: lane {lane} correct, boss hp {}", self.encounter, self.boss_hp);
            Some(AnswerResult::Correct { lane, points: self.points_per_answer, boss_hp: self.boss_hp })
        } else {
            player.take_hit();
            log::debug!("encounter {}: lane {lane} wrong, player hp {}", self.encounter, player.hp());
            Some(AnswerResult::Wrong { lane, player_hp: player.hp() })
        }
    }

    pub fn is_completed(&self) -> bool {
        self.completed
    }

    /// Points of the round that just resolved; `Some` once per correct answer.
    pub fn take_round_points(&mut self) -> Option<u32> {
        self.round_points.take()
    }

    pub fn points(&self) -> u32 {
        self.points
    }

    pub fn money(&self) -> u32 {
        self.money
    }

    pub fn boss_hp(&self) -> u32 {
        self.boss_hp
    }

    pub fn reset_completion(&mut self) {
        self.completed = false;
    }

    pub fn music(&self) -> MusicState {
        self.music
    }

    /// Returns true if the music was still playing.
    pub fn stop_music(&mut self) -> bool {
        std::mem::replace(&mut self.music, MusicState::Stopped) == MusicState::Playing
    }

    /// Question, answer lanes (highlighting the one at `highlight_y`) and the boss.
    pub fn draw(&self, canvas: &mut dyn Canvas, highlight_y: Option<f64>) {
        let (w, _) = canvas.size();
        let question = self.question();
        canvas.fill_text(question.prompt, w / 2.0, 110.0, &TextStyle::sized(28.0));

        let lane_h = self.lane_height();
        let lane_x = w * 0.3;
        let lane_w = w * 0.45;
        let highlighted = highlight_y.and_then(|y| self.lane_at(y));
        for (i, answer) in question.answers.iter().enumerate() {
            let top = LANE_TOP + lane_h * i as f64;
            let fill = if highlighted == Some(i) { "#ffe08a" } else { "#e8eef5" };
            canvas.fill_rect(lane_x, top + 4.0, lane_w, lane_h - 8.0, fill);
            canvas.stroke_rect(lane_x, top + 4.0, lane_w, lane_h - 8.0, "#34495e");
            let label = format!("{}. {}", i + 1, answer);
            canvas.fill_text(
                &label,
                lane_x + 16.0,
                self.lane_center(i) + 8.0,
                &TextStyle::sized(24.0).align(TextAlign::Left),
            );
        }

        let boss_x = (w - BOSS_SIZE - 24.0).max(0.0);
        let boss_y = LANE_TOP;
        canvas.draw_sprite(Sprite::Boss, boss_x, boss_y, BOSS_SIZE, BOSS_SIZE);
        let bar_y = boss_y + BOSS_SIZE + 12.0;
        canvas.fill_rect(boss_x, bar_y, BOSS_SIZE, 12.0, "#555");
        let frac = self.boss_hp as f64 / self.boss_max_hp.max(1) as f64;
        canvas.fill_rect(boss_x, bar_y, BOSS_SIZE * frac, 12.0, "crimson");
        canvas.fill_text(
            &format!("Boss {}", self.encounter),
            boss_x + BOSS_SIZE / 2.0,
            bar_y + 36.0,
            &TextStyle::sized(20.0),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::player::{PLAYER_SIZE, PlayerStatus};
    use crate::render::{DrawCall, RecordingCanvas};
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    const BOUNDS: (f64, f64) = (1000.0, 800.0);

    fn fight(cfg: &GameConfig) -> Bossfight {
        Bossfight::new(1, BOUNDS, cfg, &mut StdRng::seed_from_u64(42))
    }

    fn bird_in_lane(fight: &Bossfight, lane: usize, hp: u32) -> Player {
        let mut p = Player::new(BOUNDS.0, BOUNDS.1, hp, 300.0);
        p.set_position(100.0, fight.lane_center(lane) - PLAYER_SIZE / 2.0);
        p
    }

    fn wrong_lane(fight: &Bossfight) -> usize {
        (fight.question().correct + 1) % 4
    }

    #[test]
    fn lanes_split_the_area_below_the_hud() {
        let f = fight(&GameConfig::default());
        assert_eq!(f.lane_height(), (800.0 - LANE_TOP - LANE_BOTTOM_MARGIN) / 4.0);
        assert_eq!(f.lane_at(LANE_TOP - 1.0), None);
        assert_eq!(f.lane_at(LANE_TOP), Some(0));
        assert_eq!(f.lane_at(f.lane_center(3)), Some(3));
        assert_eq!(f.lane_at(799.0), None);
    }

    #[test]
    fn correct_answers_complete_the_encounter() {
        let cfg = GameConfig { answers_to_win: 2, points_per_answer: 50, ..GameConfig::default() };
        let mut f = fight(&cfg);
        for expected_hp in [1, 0] {
            let mut p = bird_in_lane(&f, f.question().correct, 3);
            let res = f.answer_select(&mut p);
            assert!(matches!(res, Some(AnswerResult::Correct { points: 50, boss_hp, .. }) if boss_hp == expected_hp));
            assert_eq!(f.take_round_points(), Some(50));
            assert_eq!(f.take_round_points(), None);
        }
        assert!(f.is_completed());
        assert_eq!(f.points(), 100);
        // A beaten boss ignores further answers.
        let mut p = bird_in_lane(&f, 0, 3);
        assert_eq!(f.answer_select(&mut p), None);
        f.reset_completion();
        assert!(!f.is_completed());
    }

    #[test]
    fn wrong_answer_costs_hp_and_no_points() {
        let mut f = fight(&GameConfig::default());
        let lane = wrong_lane(&f);
        let mut p = bird_in_lane(&f, lane, 1);
        assert_eq!(f.answer_select(&mut p), Some(AnswerResult::Wrong { lane, player_hp: 0 }));
        assert_eq!(p.status(), PlayerStatus::Dead);
        assert_eq!(f.take_round_points(), None);
        assert_eq!(f.points(), 0);
        assert!(!f.is_completed());
    }

    #[test]
    fn outside_lanes_is_ignored() {
        let mut f = fight(&GameConfig::default());
        let mut p = Player::new(BOUNDS.0, BOUNDS.1, 3, 300.0);
        p.set_position(100.0, 0.0);
        let before = f.question();
        assert_eq!(f.answer_select(&mut p), None);
        assert_eq!(f.question(), before);
        assert_eq!(p.hp(), 3);
    }

    #[test]
    fn money_is_rolled_inside_the_configured_range() {
        let cfg = GameConfig { money_min: 7, money_max: 9, ..GameConfig::default() };
        for seed in 0..32 {
            let f = Bossfight::new(1, BOUNDS, &cfg, &mut StdRng::seed_from_u64(seed));
            assert!((7..=9).contains(&f.money()));
        }
    }

    #[test]
    fn huge_point_values_saturate_instead_of_overflowing() {
        let cfg = GameConfig {
            points_per_answer: 3_000_000_000,
            answers_to_win: 2,
            ..GameConfig::default()
        };
        let mut f = fight(&cfg);
        for _ in 0..2 {
            let mut p = bird_in_lane(&f, f.question().correct, 3);
            assert!(matches!(f.answer_select(&mut p), Some(AnswerResult::Correct { .. })));
        }
        assert!(f.is_completed());
        assert_eq!(f.points(), u32::MAX);
    }

    #[test]
    fn stop_music_reports_only_the_first_stop() {
        let mut f = fight(&GameConfig::default());
        assert_eq!(f.music(), MusicState::Playing);
        assert!(f.stop_music());
        assert!(!f.stop_music());
        assert_eq!(f.music(), MusicState::Stopped);
    }

    #[test]
    fn draw_shows_prompt_answers_and_boss() {
        let f = fight(&GameConfig::default());
        let mut c = RecordingCanvas::new(BOUNDS.0, BOUNDS.1);
        f.draw(&mut c, Some(f.lane_center(0)));
        assert!(c.has_text(f.question().prompt));
        assert!(c.has_text(&format!("1. {}", f.question().answers[0])));
        assert!(c.has_text("Boss 1"));
        assert!(c.calls.iter().any(|call| matches!(call, DrawCall::Sprite { sprite: Sprite::Boss, .. })));

        // Only the lane the bird is in gets the highlight fill.
        let lane_fills: Vec<(f64, &str)> = c
            .calls
            .iter()
            .filter_map(|call| match call {
                DrawCall::FillRect { y, color, .. } if color == "#ffe08a" || color == "#e8eef5" => {
                    Some((*y, color.as_str()))
                }
                _ => None,
            })
            .collect();
        assert_eq!(lane_fills.len(), 4);
        assert_eq!(lane_fills[0], (LANE_TOP + 4.0, "#ffe08a"));
        assert!(lane_fills[1..].iter().all(|(_, color)| *color == "#e8eef5"));

        let mut c = RecordingCanvas::new(BOUNDS.0, BOUNDS.1);
        f.draw(&mut c, Some(f.lane_center(2)));
        let highlighted: Vec<f64> = c
            .calls
            .iter()
            .filter_map(|call| match call {
                DrawCall::FillRect { y, color, .. } if color == "#ffe08a" => Some(*y),
                _ => None,
            })
            .collect();
        assert_eq!(highlighted, vec![LANE_TOP + f.lane_height() * 2.0 + 4.0]);
    }
}
