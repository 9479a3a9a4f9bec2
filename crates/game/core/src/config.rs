/// Game configuration constants and tunable parameters.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GameConfig {
    /// Base seed for every random roll made while replaying delayed actions.
    ///
    /// Combined with the log position and level identity so a replay of the
    /// same entry on the same level always shuffles decks identically.
    pub game_seed: u64,
}

impl GameConfig {
    // ===== compile-time constants used as type parameters =====
    /// Maximum number of monsters alive on a single level.
    pub const MAX_MONSTERS: usize = 700;
    /// Size of the per-level item table.
    pub const MAX_ITEMS: usize = 1000;
    /// Maximum number of cards held by a single deck.
    pub const MAX_DECK_CARDS: usize = 32;

    // ===== content constants =====
    /// Name given to Pikel's band once released.
    pub const FREED_SLAVE_NAME: &'static str = "freed slave";
    /// Property marking a monster as a member of Pikel's band.
    pub const PIKEL_BAND_PROP: &'static str = "pikel_band";
    /// Tomb depth on which regaining teleport control is announced.
    pub const TOMB_CTELE_DEPTH: u8 = 3;
    /// Width of the permanent rock border around every level map.
    pub const MAP_BORDER: i32 = 1;

    // ===== runtime-tunable defaults =====
    pub const DEFAULT_GAME_SEED: u64 = 0;

    pub fn new() -> Self {
        Self {
            game_seed: Self::DEFAULT_GAME_SEED,
        }
    }

    pub fn with_game_seed(game_seed: u64) -> Self {
        Self { game_seed }
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::new()
    }
}
