//! Best-score leaderboard
//!
//! Keeps the ten best finished sessions, best first.

use serde::{Deserialize, Serialize};

use crate::storage;

/// Number of sessions kept on the board
pub const BOARD_SIZE: usize = 10;

const STORAGE_KEY: &str = "flappy_sim_highscores";

/// One finished session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionRecord {
    /// Obstacles passed
    pub score: u32,
    /// Ticks survived
    pub ticks: u64,
    /// Milliseconds since the Unix epoch
    pub recorded_at: f64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HighScores {
    records: Vec<SessionRecord>,
}

impl HighScores {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn records(&self) -> &[SessionRecord] {
        &self.records
    }

    /// Insertion index for `score`; ties go after existing records
    fn slot_for(&self, score: u32) -> usize {
        self.records.partition_point(|r| r.score >= score)
    }

    /// 1-based rank `score` would take, if it makes the board at all.
    /// A session that passed nothing is never recorded.
    pub fn potential_rank(&self, score: u32) -> Option<usize> {
        if score == 0 {
            return None;
        }
        let slot = self.slot_for(score);
        (slot < BOARD_SIZE).then_some(slot + 1)
    }

    pub fn qualifies(&self, score: u32) -> bool {
        self.potential_rank(score).is_some()
    }

    /// Record a finished session and return its rank
    pub fn add_score(&mut self, score: u32, ticks: u64, recorded_at: f64) -> Option<usize> {
        let rank = self.potential_rank(score)?;
        self.records.insert(
            rank - 1,
            SessionRecord {
                score,
                ticks,
                recorded_at,
            },
        );
        self.records.truncate(BOARD_SIZE);
        log::debug!("Score {} entered the board at #{}", score, rank);
        Some(rank)
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn top_score(&self) -> Option<u32> {
        self.records.first().map(|r| r.score)
    }

    pub fn load() -> Self {
        let mut board: Self = storage::load(STORAGE_KEY).unwrap_or_default();
        // Stored data may predate a size change or have been edited by hand
        board.records.sort_by(|a, b| b.score.cmp(&a.score));
        board.records.truncate(BOARD_SIZE);
        log::info!("Leaderboard has {} records", board.records.len());
        board
    }

    pub fn save(&self) {
        if storage::save(STORAGE_KEY, self) {
            log::debug!("Leaderboard saved");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_never_qualifies() {
        let mut scores = HighScores::new();
        assert!(!scores.qualifies(0));
        assert_eq!(scores.add_score(0, 500, 1.0), None);
        assert!(scores.is_empty());
    }

    #[test]
    fn test_sorted_descending() {
        let mut scores = HighScores::new();
        assert_eq!(scores.add_score(5, 900, 1.0), Some(1));
        assert_eq!(scores.add_score(9, 1500, 2.0), Some(1));
        assert_eq!(scores.add_score(7, 1200, 3.0), Some(2));
        let ordered: Vec<u32> = scores.records().iter().map(|r| r.score).collect();
        assert_eq!(ordered, vec![9, 7, 5]);
        assert_eq!(scores.top_score(), Some(9));
    }

    #[test]
    fn test_ties_rank_below_existing() {
        let mut scores = HighScores::new();
        scores.add_score(4, 100, 1.0);
        assert_eq!(scores.add_score(4, 200, 2.0), Some(2));
        assert_eq!(scores.records()[0].recorded_at, 1.0);
    }

    #[test]
    fn test_full_board_keeps_top_ten() {
        let mut scores = HighScores::new();
        for s in 1..=BOARD_SIZE as u32 {
            scores.add_score(s, 0, 0.0);
        }
        assert!(!scores.qualifies(1));
        assert_eq!(scores.potential_rank(5), Some(7));
        assert_eq!(scores.add_score(20, 0, 0.0), Some(1));
        assert_eq!(scores.records().len(), BOARD_SIZE);
        assert_eq!(scores.records().last().map(|r| r.score), Some(2));
    }

    #[test]
    fn test_round_trips_through_json() {
        let mut scores = HighScores::new();
        scores.add_score(3, 360, 42.0);
        let json = serde_json::to_string(&scores).unwrap();
        let back: HighScores = serde_json::from_str(&json).unwrap();
        assert_eq!(back.records(), scores.records());
    }
}
