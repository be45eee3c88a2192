//! Tea contest (dou cha) mini-game
//!
//! Best-of-N rounds between the player and a scholar opponent. Each round
//! compares one category of the tea; the category decides how the random
//! points lean.

use serde::{Deserialize, Serialize};

use super::random::RandomSource;
use crate::consts::*;

/// Contest category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    /// Colour of the liquor - leans toward the player
    Color,
    /// Foam - balanced
    Foam,
    /// Aroma - leans toward the opponent
    Aroma,
}

impl Category {
    pub const ALL: [Category; 3] = [Category::Color, Category::Foam, Category::Aroma];

    pub fn name(self) -> &'static str {
        match self {
            Category::Color => "汤色",
            Category::Foam => "汤花",
            Category::Aroma => "香气",
        }
    }

    /// (player, opponent) weights
    pub fn weights(self) -> (f32, f32) {
        match self {
            Category::Color => (0.6, 0.4),
            Category::Foam => (0.5, 0.5),
            Category::Aroma => (0.4, 0.6),
        }
    }

    /// Expected point lead of the player over the opponent
    pub fn expected_bias(self) -> f32 {
        let (player, opponent) = self.weights();
        CONTEST_WEIGHT_SCALE * (player - opponent)
    }

    /// Button id used by the contest panel
    pub fn button_id(self) -> &'static str {
        match self {
            Category::Color => "colorBtn",
            Category::Foam => "foamBtn",
            Category::Aroma => "aromaBtn",
        }
    }

    /// Category bound to a 1-based digit key
    pub fn from_digit(digit: u8) -> Option<Self> {
        match digit {
            1 => Some(Category::Color),
            2 => Some(Category::Foam),
            3 => Some(Category::Aroma),
            _ => None,
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "color" => Some(Category::Color),
            "foam" => Some(Category::Foam),
            "aroma" => Some(Category::Aroma),
            _ => None,
        }
    }
}

/// Which side took something
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Side {
    Player,
    Opponent,
}

impl Side {
    /// DOM id prefix of the side's tea display
    pub fn dom_prefix(self) -> &'static str {
        match self {
            Side::Player => "player",
            Side::Opponent => "ai",
        }
    }
}

/// Overall result of a finished contest
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome {
    PlayerWins,
    OpponentWins,
    Tie,
}

impl Outcome {
    pub fn message(self) -> &'static str {
        match self {
            Outcome::PlayerWins => "🎊 恭喜！你赢得了斗茶比赛！",
            Outcome::OpponentWins => "📚 文人技艺高超，还需多加练习。",
            Outcome::Tie => "🤝 平局！茶逢对手，不分伯仲。",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ContestPhase {
    #[default]
    Idle,
    Active,
    Ended(Outcome),
}

/// Log line flavour, mapped to a CSS class by the view
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LogKind {
    Info,
    Player,
    Opponent,
}

impl LogKind {
    pub fn css_class(self) -> &'static str {
        match self {
            LogKind::Info => "log-info",
            LogKind::Player => "log-player",
            LogKind::Opponent => "log-ai",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogEntry {
    pub kind: LogKind,
    pub message: String,
}

/// Result of one played round
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundReport {
    /// Round number that was just played (1-based)
    pub round: u32,
    pub category: Category,
    pub player_points: u32,
    pub opponent_points: u32,
    /// None on a tie
    pub winner: Option<Side>,
    /// The last round was played; `end_game` is due
    pub final_round: bool,
}

/// Contest state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContestGame {
    pub player_wins: u32,
    pub ai_wins: u32,
    pub ties: u32,
    /// Next round to play (1-based); max_rounds + 1 once all were played
    pub round: u32,
    pub max_rounds: u32,
    pub phase: ContestPhase,
    pub log: Vec<LogEntry>,
}

impl Default for ContestGame {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_ROUNDS)
    }
}

impl ContestGame {
    pub fn new(max_rounds: u32) -> Self {
        Self {
            player_wins: 0,
            ai_wins: 0,
            ties: 0,
            round: 1,
            max_rounds: max_rounds.max(1),
            phase: ContestPhase::Idle,
            log: Vec::new(),
        }
    }

    pub fn is_active(&self) -> bool {
        self.phase == ContestPhase::Active
    }

    /// Whether a category may be chosen right now
    pub fn can_play(&self) -> bool {
        self.is_active() && self.round <= self.max_rounds
    }

    pub fn outcome(&self) -> Option<Outcome> {
        match self.phase {
            ContestPhase::Ended(outcome) => Some(outcome),
            _ => None,
        }
    }

    pub fn start_game(&mut self) {
        self.reset_game();
        self.phase = ContestPhase::Active;
        let intro = format!(
            "🎮 斗茶开始！{}，比拼汤色、汤花和香气。",
            match_format(self.max_rounds)
        );
        self.push_log(LogKind::Info, intro);
        self.push_log(LogKind::Info, "请选择比拼项目开始第一回合。".into());
        log::info!("Tea contest started ({} rounds)", self.max_rounds);
    }

    pub fn reset_game(&mut self) {
        self.player_wins = 0;
        self.ai_wins = 0;
        self.ties = 0;
        self.round = 1;
        self.phase = ContestPhase::Idle;
        self.log.clear();
    }

    /// Play one round; None when no round may be played
    pub fn play_round(
        &mut self,
        category: Category,
        rng: &mut impl RandomSource,
    ) -> Option<RoundReport> {
        if !self.can_play() {
            log::debug!("round rejected: {:?} round {}", self.phase, self.round);
            return None;
        }

        let (player_weight, opponent_weight) = category.weights();
        let player_points = draw_points(player_weight, rng);
        let opponent_points = draw_points(opponent_weight, rng);
        let name = category.name();

        let winner = match player_points.cmp(&opponent_points) {
            std::cmp::Ordering::Greater => {
                self.player_wins += 1;
                self.push_log(
                    LogKind::Player,
                    format!("🎉 你赢得了「{name}」比拼！得分: {player_points} vs {opponent_points}"),
                );
                Some(Side::Player)
            }
            std::cmp::Ordering::Less => {
                self.ai_wins += 1;
                self.push_log(
                    LogKind::Opponent,
                    format!("😔 文人赢得了「{name}」比拼。得分: {player_points} vs {opponent_points}"),
                );
                Some(Side::Opponent)
            }
            std::cmp::Ordering::Equal => {
                self.ties += 1;
                self.push_log(
                    LogKind::Info,
                    format!("🤝 「{name}」比拼平局！得分: {player_points}"),
                );
                None
            }
        };

        let round = self.round;
        self.round += 1;
        let final_round = self.round > self.max_rounds;
        log::debug!(
            "round {} {:?}: {} vs {} -> {:?}",
            round,
            category,
            player_points,
            opponent_points,
            winner
        );

        Some(RoundReport {
            round,
            category,
            player_points,
            opponent_points,
            winner,
            final_round,
        })
    }

    /// Decide the overall outcome; only an active game can end
    pub fn end_game(&mut self) -> Option<Outcome> {
        if !self.is_active() {
            return None;
        }
        let outcome = match self.player_wins.cmp(&self.ai_wins) {
            std::cmp::Ordering::Greater => Outcome::PlayerWins,
            std::cmp::Ordering::Less => Outcome::OpponentWins,
            std::cmp::Ordering::Equal => Outcome::Tie,
        };
        self.phase = ContestPhase::Ended(outcome);
        self.push_log(
            LogKind::Info,
            format!("🏁 比赛结束！最终比分: {} - {}", self.player_wins, self.ai_wins),
        );
        self.push_log(LogKind::Info, outcome.message().into());
        log::info!("Tea contest ended: {:?}", outcome);
        Some(outcome)
    }

    fn push_log(&mut self, kind: LogKind, message: String) {
        self.log.push(LogEntry { kind, message });
    }
}

/// Match length in the usual phrasing, e.g. 三局两胜 for three rounds
fn match_format(max_rounds: u32) -> String {
    const NUMERALS: [&str; 10] = ["零", "一", "两", "三", "四", "五", "六", "七", "八", "九"];
    let wins = max_rounds / 2 + 1;
    match max_rounds {
        0 | 1 => "一局定胜负".to_string(),
        2 => "二局比拼".to_string(),
        3..=9 => format!(
            "{}局{}胜",
            NUMERALS[max_rounds as usize],
            NUMERALS[wins as usize]
        ),
        n => format!("{n}局{wins}胜"),
    }
}

/// Points for one side: floor(u * SPREAD + WEIGHT_SCALE * weight)
pub fn draw_points(weight: f32, rng: &mut impl RandomSource) -> u32 {
    (rng.next_unit() * CONTEST_POINT_SPREAD + CONTEST_WEIGHT_SCALE * weight).floor() as u32
}

/// Liquor and foam layer heights (percent) for a side's tea display
pub fn tea_display_heights(points: u32) -> (f32, f32) {
    let p = points as f32 / 100.0;
    (40.0 + p * 30.0, 30.0 + p * 40.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::random::{ScriptedRandom, SeededRandom};
    use proptest::prelude::*;

    #[test]
    fn test_start_game_resets() {
        let mut game = ContestGame::default();
        game.player_wins = 2;
        game.round = 4;
        game.start_game();
        assert_eq!(game.round, 1);
        assert_eq!(game.player_wins, 0);
        assert!(game.is_active());
        assert_eq!(game.log.len(), 2);
        assert!(game.log[0].message.contains("三局两胜"));
    }

    #[test]
    fn test_intro_follows_round_count() {
        let mut game = ContestGame::new(5);
        game.start_game();
        assert!(game.log[0].message.contains("五局三胜"));

        let mut game = ContestGame::new(1);
        game.start_game();
        assert!(game.log[0].message.contains("一局定胜负"));
        assert_eq!(match_format(7), "七局四胜");
        assert_eq!(match_format(12), "12局7胜");
    }

    #[test]
    fn test_play_round_rejected_when_idle() {
        let mut game = ContestGame::default();
        let mut rng = ScriptedRandom::new([0.5]);
        assert!(game.play_round(Category::Color, &mut rng).is_none());
        assert_eq!(game.round, 1);
    }

    #[test]
    fn test_scripted_rounds_exact() {
        let mut game = ContestGame::default();
        game.start_game();
        // color: player floor(0.9*30+42)=69, opponent floor(0.1*30+28)=31
        // foam:  player floor(0.0+35)=35,   opponent floor(0.0+35)=35
        // aroma: player floor(0.0+28)=28,   opponent floor(0.5*30+42)=57
        let mut rng = ScriptedRandom::new([0.9, 0.1, 0.0, 0.0, 0.0, 0.5]);

        let r1 = game.play_round(Category::Color, &mut rng).unwrap();
        assert_eq!((r1.player_points, r1.opponent_points), (69, 31));
        assert_eq!(r1.winner, Some(Side::Player));
        assert!(!r1.final_round);

        let r2 = game.play_round(Category::Foam, &mut rng).unwrap();
        assert_eq!(r2.winner, None);

        let r3 = game.play_round(Category::Aroma, &mut rng).unwrap();
        assert_eq!(r3.winner, Some(Side::Opponent));
        assert!(r3.final_round);

        assert_eq!((game.player_wins, game.ai_wins, game.ties), (1, 1, 1));
        assert_eq!(game.round, 4);
        assert!(!game.can_play());
        assert_eq!(game.end_game(), Some(Outcome::Tie));
        assert_eq!(game.outcome(), Some(Outcome::Tie));
    }

    #[test]
    fn test_three_round_scenario_any_seed() {
        for seed in 0..50 {
            let mut game = ContestGame::new(3);
            let mut rng = SeededRandom::new(seed);
            game.start_game();
            for category in [Category::Color, Category::Foam, Category::Aroma] {
                assert!(game.play_round(category, &mut rng).is_some());
            }
            assert_eq!(game.player_wins + game.ai_wins + game.ties, 3);
            assert_eq!(game.round, 4);
        }
    }

    #[test]
    fn test_end_game_blocks_further_rounds() {
        let mut game = ContestGame::default();
        let mut rng = SeededRandom::new(7);
        game.start_game();
        for _ in 0..3 {
            game.play_round(Category::Foam, &mut rng);
        }
        let outcome = game.end_game().unwrap();
        let (p, a, t) = (game.player_wins, game.ai_wins, game.ties);
        assert!(game.play_round(Category::Color, &mut rng).is_none());
        assert_eq!((game.player_wins, game.ai_wins, game.ties), (p, a, t));
        assert_eq!(game.end_game(), None);
        assert_eq!(game.phase, ContestPhase::Ended(outcome));

        game.reset_game();
        assert_eq!(game.phase, ContestPhase::Idle);
        assert!(game.log.is_empty());
    }

    #[test]
    fn test_category_bias_ordering() {
        let bias: Vec<f32> = Category::ALL.iter().map(|c| c.expected_bias()).collect();
        assert!(bias[0] > bias[1]);
        assert!(bias[1] > bias[2]);
        assert_eq!(Category::Foam.expected_bias(), 0.0);
    }

    #[test]
    fn test_category_lookup() {
        assert_eq!(Category::from_digit(2), Some(Category::Foam));
        assert_eq!(Category::from_digit(4), None);
        assert_eq!(Category::from_key("aroma"), Some(Category::Aroma));
        assert_eq!(Category::from_key("taste"), None);
    }

    #[test]
    fn test_tea_display_heights() {
        assert_eq!(tea_display_heights(0), (40.0, 30.0));
        assert_eq!(tea_display_heights(100), (70.0, 70.0));
    }

    proptest! {
        #[test]
        fn prop_rounds_exhaust_after_max(seed in any::<u64>(), max_rounds in 1u32..8, picks in prop::collection::vec(0usize..3, 8..16)) {
            let mut game = ContestGame::new(max_rounds);
            let mut rng = SeededRandom::new(seed);
            game.start_game();

            let mut played = 0;
            for pick in picks {
                let before = (game.player_wins, game.ai_wins, game.ties, game.round);
                match game.play_round(Category::ALL[pick], &mut rng) {
                    Some(report) => {
                        played += 1;
                        prop_assert_eq!(report.final_round, played == max_rounds);
                    }
                    None => {
                        prop_assert_eq!(before, (game.player_wins, game.ai_wins, game.ties, game.round));
                    }
                }
            }
            prop_assert_eq!(played, max_rounds);
            prop_assert_eq!(game.player_wins + game.ai_wins + game.ties, max_rounds);
            prop_assert!(game.end_game().is_some());
            prop_assert!(game.play_round(Category::Foam, &mut rng).is_none());
        }
    }
}
