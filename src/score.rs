use std::collections::BTreeMap;
use std::fmt;

pub const MIN_PLAYERS: u8 = 2;
pub const MAX_PLAYERS: u8 = 4;

/// Number of players taking turns, always within `MIN_PLAYERS..=MAX_PLAYERS`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PlayerCount(u8);

#[derive(Debug, Clone, Copy, thiserror::Error, PartialEq, Eq)]
#[error("player count must be between {min} and {max}, got {0}", min = MIN_PLAYERS, max = MAX_PLAYERS)]
pub struct InvalidPlayerCount(pub u8);

impl PlayerCount {
    pub fn new(count: u8) -> Result<Self, InvalidPlayerCount> {
        if (MIN_PLAYERS..=MAX_PLAYERS).contains(&count) {
            Ok(Self(count))
        } else {
            Err(InvalidPlayerCount(count))
        }
    }

    pub fn get(self) -> u8 {
        self.0
    }

    pub fn players(self) -> impl Iterator<Item = PlayerId> {
        (1..=self.0).map(PlayerId)
    }
}

impl Default for PlayerCount {
    fn default() -> Self {
        Self(MIN_PLAYERS)
    }
}

/// 1-based player number. Displays as `player1`, `player2`, ...
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PlayerId(u8);

impl PlayerId {
    pub const FIRST: PlayerId = PlayerId(1);

    pub fn number(self) -> u8 {
        self.0
    }

    /// The player whose turn follows this one, wrapping back to player 1.
    pub fn next(self, count: PlayerCount) -> Self {
        Self((self.0 % count.get()) + 1)
    }
}

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "player{}", self.0)
    }
}

/// Per-player scores for one game.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Scoreboard {
    scores: BTreeMap<PlayerId, u32>,
}

impl Scoreboard {
    pub fn new(count: PlayerCount) -> Self {
        let mut scoreboard = Self::default();
        scoreboard.reset(count);
        scoreboard
    }

    /// Zeroes every score and sizes the board for `count` players.
    pub fn reset(&mut self, count: PlayerCount) {
        self.scores = count.players().map(|player| (player, 0)).collect();
    }

    pub fn award(&mut self, player: PlayerId) {
        *self.scores.entry(player).or_insert(0) += 1;
    }

    pub fn score(&self, player: PlayerId) -> u32 {
        self.scores.get(&player).copied().unwrap_or(0)
    }

    /// Scores in player order.
    pub fn standings(&self) -> Vec<(PlayerId, u32)> {
        self.scores
            .iter()
            .map(|(player, score)| (*player, *score))
            .collect()
    }

    /// Players holding the top score. Empty when nobody has scored yet.
    pub fn leaders(&self) -> Vec<PlayerId> {
        let best = self.scores.values().copied().max().unwrap_or(0);
        if best == 0 {
            return Vec::new();
        }

        self.scores
            .iter()
            .filter(|(_, score)| **score == best)
            .map(|(player, _)| *player)
            .collect()
    }
}
