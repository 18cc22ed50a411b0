//! Cumulative player score, coins and achievements.
//!
//! `add_points` is the sole mutation entry point — no other code path writes
//! these fields, which is what makes the aggregation safe under the
//! single-active-scene invariant.

use serde::{Deserialize, Serialize};

/// Recognized `add_points` source tags.
pub mod source {
    /// Coin pickup: +1 coin and +1 coinsCollected per call.
    pub const COIN: &str = "coin";
    /// A minigame round started: +1 minigamesPlayed.
    pub const MINIGAME: &str = "minigame";
    /// A chess move was made: +1 chessMoves.
    pub const CHESS: &str = "chess";
    /// Maze finished: flips mazeCompleted.
    pub const MAZE: &str = "maze";
    /// Shooter round score: shooterHighscore = max(current, amount).
    pub const SHOOTER: &str = "shooter";
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Achievements {
    pub coins_collected: u32,
    pub minigames_played: u32,
    pub chess_moves: u32,
    pub maze_completed: bool,
    pub shooter_highscore: i64,
}

/// Player-progress record for the life of the session, seeded from the
/// persistence collaborator at startup when a snapshot exists.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PlayerProgress {
    score: i64,
    coins: u32,
    achievements: Achievements,
    parental_control: bool,
}

/// Serializable snapshot exchanged with the persistence collaborator.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerSnapshot {
    pub score: i64,
    pub coins: u32,
    pub achievements: Achievements,
    pub parental_control: bool,
}

impl PlayerProgress {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn score(&self) -> i64 {
        self.score
    }

    pub fn coins(&self) -> u32 {
        self.coins
    }

    pub fn achievements(&self) -> &Achievements {
        &self.achievements
    }

    pub fn parental_control(&self) -> bool {
        self.parental_control
    }

    /// Add `amount` to the cumulative score and update the achievement
    /// bucket matching `source`. Tags without a dedicated bucket only add to
    /// the score.
    pub fn add_points(&mut self, amount: i64, src: &str) {
        self.score += amount;
        match src {
            source::COIN => {
                self.coins += 1;
                self.achievements.coins_collected += 1;
            }
            source::MINIGAME => {
                self.achievements.minigames_played += 1;
            }
            source::CHESS => {
                self.achievements.chess_moves += 1;
            }
            source::MAZE => {
                self.achievements.maze_completed = true;
            }
            source::SHOOTER => {
                self.achievements.shooter_highscore =
                    self.achievements.shooter_highscore.max(amount);
            }
            _ => {}
        }
    }

    pub fn snapshot(&self) -> PlayerSnapshot {
        PlayerSnapshot {
            score: self.score,
            coins: self.coins,
            achievements: self.achievements.clone(),
            parental_control: self.parental_control,
        }
    }

    /// Seed from a loaded snapshot. A failed load is "no prior state" — the
    /// caller simply never calls this.
    pub fn restore(&mut self, snapshot: PlayerSnapshot) {
        self.score = snapshot.score;
        self.coins = snapshot.coins;
        self.achievements = snapshot.achievements;
        self.parental_control = snapshot.parental_control;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn coin_increments_score_coins_and_achievement() {
        let mut p = PlayerProgress::new();
        for _ in 0..3 {
            p.add_points(10, source::COIN);
        }
        assert_eq!(p.score(), 30);
        assert_eq!(p.coins(), 3);
        assert_eq!(p.achievements().coins_collected, 3);
    }

    #[test]
    fn shooter_highscore_is_monotonic_max() {
        let mut p = PlayerProgress::new();
        p.add_points(120, source::SHOOTER);
        p.add_points(80, source::SHOOTER);
        assert_eq!(p.achievements().shooter_highscore, 120);
        assert_eq!(p.score(), 200);
        p.add_points(150, source::SHOOTER);
        assert_eq!(p.achievements().shooter_highscore, 150);
    }

    #[test]
    fn maze_flips_completion_flag() {
        let mut p = PlayerProgress::new();
        assert!(!p.achievements().maze_completed);
        p.add_points(150, source::MAZE);
        assert!(p.achievements().maze_completed);
        assert_eq!(p.score(), 150);
    }

    #[test]
    fn minigame_counts_plays() {
        let mut p = PlayerProgress::new();
        p.add_points(0, source::MINIGAME);
        p.add_points(0, source::MINIGAME);
        assert_eq!(p.achievements().minigames_played, 2);
        assert_eq!(p.score(), 0);
    }

    #[test]
    fn chess_counts_moves() {
        let mut p = PlayerProgress::new();
        p.add_points(1, source::CHESS);
        p.add_points(1, source::CHESS);
        p.add_points(1, source::CHESS);
        assert_eq!(p.achievements().chess_moves, 3);
    }

    #[test]
    fn unrecognized_tag_only_adds_score() {
        let mut p = PlayerProgress::new();
        p.add_points(25, "rhythm");
        assert_eq!(p.score(), 25);
        assert_eq!(p.coins(), 0);
        assert_eq!(p.achievements(), &Achievements::default());
    }

    #[test]
    fn penalties_reduce_score() {
        let mut p = PlayerProgress::new();
        p.add_points(100, "roulette");
        p.add_points(-40, "roulette");
        assert_eq!(p.score(), 60);
    }

    #[test]
    fn snapshot_restore_round_trip() {
        let mut p = PlayerProgress::new();
        p.add_points(10, source::COIN);
        p.add_points(99, source::SHOOTER);
        let json = serde_json::to_string(&p.snapshot()).unwrap();
        let snap: PlayerSnapshot = serde_json::from_str(&json).unwrap();

        let mut restored = PlayerProgress::new();
        restored.restore(snap);
        assert_eq!(restored, p);
    }
}
