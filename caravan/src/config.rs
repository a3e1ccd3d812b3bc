/// Number of cards each player is dealt at the start of a round.
pub const DEFAULT_HAND_SIZE: usize = 8;

/// Number of turns during which the opening rule applies.
pub const OPENING_TURNS: u32 = 3;

/// Settings for a [`RoundManager`](crate::RoundManager).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RoundConfig {
    pub hand_size: usize,
    /// During the first [`OPENING_TURNS`] turns, only allow value cards on
    /// the active player's own empty caravans, and no discarding.
    pub opening_rule: bool,
}

impl Default for RoundConfig {
    fn default() -> Self {
        Self {
            hand_size: DEFAULT_HAND_SIZE,
            opening_rule: false,
        }
    }
}
