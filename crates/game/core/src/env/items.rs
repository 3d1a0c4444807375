use crate::stats::Modifier;

/// Spawn template for an item: display data plus the modifiers every spawned
/// copy starts with.
///
/// Templates carry no identity. [`World::spawn`](crate::state::World::spawn)
/// clones the modifier list into fresh arena slots per copy.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ItemTemplate {
    pub name: String,
    pub description: String,
    pub glyph: char,
    #[cfg_attr(feature = "serde", serde(default))]
    pub modifiers: Vec<Modifier>,
}

impl ItemTemplate {
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        glyph: char,
        modifiers: Vec<Modifier>,
    ) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            glyph,
            modifiers,
        }
    }
}
