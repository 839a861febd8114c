//! Shot model - in-memory basketball shot records

use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use validator::Validate;

/// One shot attempt. Missing fields deserialize to their zero values.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct Shot {
    #[validate(length(min = 1))]
    pub id: String,
    #[validate(length(min = 1))]
    pub player_id: String,
    pub player: String,
    pub team: String,
    pub game_date: String,
    pub quarter: i32,
    pub time_left: String,
    pub x: f64,
    pub y: f64,
    pub shot_type: String,
    pub outcome: String,
}

/// Process-local shot collection, seeded at startup
#[derive(Debug, Default)]
pub struct ShotStore {
    shots: RwLock<Vec<Shot>>,
}

impl ShotStore {
    pub fn new(shots: Vec<Shot>) -> Self {
        Self {
            shots: RwLock::new(shots),
        }
    }

    /// Store populated with the seed records
    pub fn seeded() -> Self {
        Self::new(seed_shots())
    }

    pub fn all(&self) -> Vec<Shot> {
        self.shots.read().clone()
    }

    pub fn by_player(&self, player_id: &str) -> Vec<Shot> {
        self.shots
            .read()
            .iter()
            .filter(|s| s.player_id == player_id)
            .cloned()
            .collect()
    }

    /// Append a shot; ids are not deduplicated
    pub fn insert(&self, shot: Shot) -> Shot {
        self.shots.write().push(shot.clone());
        shot
    }

    pub fn len(&self) -> usize {
        self.shots.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.shots.read().is_empty()
    }
}

#[allow(clippy::too_many_arguments)]
fn shot(
    id: &str,
    player_id: &str,
    player: &str,
    team: &str,
    quarter: i32,
    time_left: &str,
    x: f64,
    y: f64,
    shot_type: &str,
    outcome: &str,
) -> Shot {
    Shot {
        id: id.to_string(),
        player_id: player_id.to_string(),
        player: player.to_string(),
        team: team.to_string(),
        game_date: "2024-02-10".to_string(),
        quarter,
        time_left: time_left.to_string(),
        x,
        y,
        shot_type: shot_type.to_string(),
        outcome: outcome.to_string(),
    }
}

pub fn seed_shots() -> Vec<Shot> {
    vec![
        shot("1", "23", "LeBron James", "Lakers", 1, "10:30", 25.5, 15.2, "3PT", "Made"),
        shot("2", "30", "Stephen Curry", "Warriors", 2, "05:45", 27.3, 14.8, "3PT", "Missed"),
        shot("3", "34", "Giannis Antetokounmpo", "Bucks", 3, "07:20", 10.2, 5.6, "2PT", "Made"),
    ]
}
