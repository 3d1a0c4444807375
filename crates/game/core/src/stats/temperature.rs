/// Temperature state carried by items such as ice cubes or hot coffee.
///
/// Temperatures never become a numeric stat. On a sheet they collapse into a
/// single attribute by pairwise mixing, which is why fold order matters:
/// `HOT, HOT, COLD` ends LUKEWARM while `HOT, COLD, HOT` ends HOT.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::EnumString)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Temperature {
    Cold,
    Lukewarm,
    Hot,
}

impl Temperature {
    /// Mixes `incoming` into `self`.
    ///
    /// Equal values are idempotent, LUKEWARM yields the other value, and HOT
    /// with COLD (either order) yields LUKEWARM.
    pub fn mix(self, incoming: Temperature) -> Temperature {
        match (self, incoming) {
            (a, b) if a == b => a,
            (Temperature::Lukewarm, other) | (other, Temperature::Lukewarm) => other,
            _ => Temperature::Lukewarm,
        }
    }

    /// Scales incoming damage: COLD halves, HOT doubles, LUKEWARM passes.
    pub fn modify_incoming_damage(self, amount: f64) -> f64 {
        match self {
            Temperature::Cold => amount / 2.0,
            Temperature::Hot => amount * 2.0,
            Temperature::Lukewarm => amount,
        }
    }
}
