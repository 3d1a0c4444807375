/// Game configuration constants and tunable parameters.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct GameConfig {
    /// Initiative points an actor must accumulate before it may act.
    pub turn_threshold: u32,
    /// Points gained per tick by actors whose sheet carries no SPD stat.
    pub default_speed: u32,
    /// Movement range for actors whose sheet carries no MOV stat.
    pub default_movement: u32,
}

impl GameConfig {
    // ===== runtime-tunable defaults =====
    pub const DEFAULT_TURN_THRESHOLD: u32 = 1000;
    pub const DEFAULT_SPEED: u32 = 10;
    pub const DEFAULT_MOVEMENT: u32 = 0;

    pub fn new() -> Self {
        Self {
            turn_threshold: Self::DEFAULT_TURN_THRESHOLD,
            default_speed: Self::DEFAULT_SPEED,
            default_movement: Self::DEFAULT_MOVEMENT,
        }
    }

    pub fn with_turn_threshold(mut self, turn_threshold: u32) -> Self {
        self.turn_threshold = turn_threshold;
        self
    }

    pub fn with_default_speed(mut self, default_speed: u32) -> Self {
        self.default_speed = default_speed;
        self
    }

    pub fn with_default_movement(mut self, default_movement: u32) -> Self {
        self.default_movement = default_movement;
        self
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::new()
    }
}
