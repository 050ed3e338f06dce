use crate::settings::Settings;

/// Session statistics. The high score survives `reset_stats`.
#[derive(Clone, Debug, PartialEq)]
pub struct GameStats {
    pub ships_left: u32,
    pub score: u32,
    pub level: u32,
    pub high_score: u32,
}

impl GameStats {
    pub fn new(settings: &Settings, high_score: u32) -> Self {
        let mut stats = GameStats {
            ships_left: 0,
            score: 0,
            level: 1,
            high_score,
        };
        stats.reset_stats(settings);
        stats
    }

    pub fn reset_stats(&mut self, settings: &Settings) {
        self.ships_left = settings.ship_limit;
        self.score = 0;
        self.level = 1;
    }

    pub fn add_points(&mut self, points: u32) {
        self.score = self.score.saturating_add(points);
    }

    /// Raise the high score to the current score. Returns true on a new best.
    pub fn check_high_score(&mut self) -> bool {
        if self.score > self.high_score {
            self.high_score = self.score;
            true
        } else {
            false
        }
    }

    pub fn lose_ship(&mut self) {
        self.ships_left = self.ships_left.saturating_sub(1);
    }
}
