//! Read-only inspect view of an entity for the presentation layer.

use std::fmt;

use super::{EntityId, Position, StateError, World};
use crate::stats::StatSheet;

/// Structured summary of an entity's state.
///
/// The `Display` form is the plain-text inspect panel:
///
/// ```text
/// foo
/// "A very simple dood."
/// HP: 10/10
/// COLD
/// holding: health potion, ice cube
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct EntitySummary {
    pub id: EntityId,
    pub name: Option<String>,
    pub description: Option<String>,
    pub glyph: Option<char>,
    pub position: Option<Position>,
    /// Aggregated sheet, present for actors only.
    pub sheet: Option<StatSheet>,
    /// Effect lines of the modifiers attached directly to the entity.
    pub modifiers: Vec<String>,
    /// Names of owned entities, in child-list order.
    pub inventory: Vec<String>,
}

impl World {
    /// Assembles the inspect summary for `id`.
    pub fn summary(&self, id: EntityId) -> Result<EntitySummary, StateError> {
        let entity = self.entity(id)?;

        let sheet = if entity.has_stats() {
            Some(self.build_sheet(id)?)
        } else {
            None
        };

        let modifiers = self
            .modifiers_of(id)?
            .map(|(_, modifier)| modifier.to_string())
            .collect();

        let inventory = entity
            .children()
            .iter()
            .filter_map(|child| self.entity(*child).ok())
            .map(|child| child.name().unwrap_or("something").to_string())
            .collect();

        Ok(EntitySummary {
            id,
            name: entity.name().map(str::to_string),
            description: entity.description().map(str::to_string),
            glyph: entity.glyph(),
            position: entity.position(),
            sheet,
            modifiers,
            inventory,
        })
    }
}

impl fmt::Display for EntitySummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut lines: Vec<String> = Vec::new();

        if let Some(name) = &self.name {
            lines.push(name.clone());
        }
        if let Some(description) = &self.description {
            lines.push(format!("\"{description}\""));
        }
        if let Some(sheet) = &self.sheet {
            let rendered = sheet.to_string();
            if !rendered.is_empty() {
                lines.push(rendered);
            }
        }
        lines.extend(self.modifiers.iter().cloned());
        if !self.inventory.is_empty() {
            lines.push(format!("holding: {}", self.inventory.join(", ")));
        }

        write!(f, "{}", lines.join("\n"))
    }
}

#[cfg(test)]
mod tests {
    use crate::state::World;
    use crate::stats::{Modifier, Temperature};

    #[test]
    fn inspect_text_lists_sheet_and_inventory() {
        let mut world = World::new();
        let actor = world.create_actor("foo");
        let potion = world.create_item("health potion", "It's practically SWAG.", '!');
        world.attach_modifier(potion, Modifier::hp(5, 5)).unwrap();
        let ice = world.create_item("ice cube", "Brr.", '*');
        world
            .attach_modifier(ice, Modifier::temperature(Temperature::Cold))
            .unwrap();
        world.pick_up(actor, potion).unwrap();
        world.pick_up(actor, ice).unwrap();

        let text = world.summary(actor).unwrap().to_string();
        assert_eq!(text, "foo\nHP: 5/5\nCOLD\nholding: health potion, ice cube");
    }

    #[test]
    fn item_summary_shows_modifier_reasons() {
        let mut world = World::new();
        let donut = world.create_item("donut", "Glazed.", 'o');
        world
            .attach_modifier(donut, Modifier::hp(5, 5).with_reason("tasty"))
            .unwrap();

        let summary = world.summary(donut).unwrap();
        assert!(summary.sheet.is_none());
        assert_eq!(summary.to_string(), "donut\n\"Glazed.\"\nHP: 5/5 (tasty)");
    }
}
