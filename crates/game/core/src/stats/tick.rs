//! Periodic regeneration.

use super::{Capabilities, StatsError};
use crate::state::{EntityId, ModifierId, StateError, World};

impl World {
    /// Runs the PERIODIC_TICK capability of one modifier.
    ///
    /// The regenerated amount is offered to every REFUND modifier on the
    /// item's siblings (the item included) in child-list order, carrying the
    /// remainder forward. Siblings that cannot refund are skipped. Returns
    /// the amount that found no room.
    pub fn periodic_tick(&mut self, modifier: ModifierId) -> Result<u32, StateError> {
        let attached = self.modifier(modifier)?;
        let item = attached.item();
        let regen = attached
            .modifier()
            .regen_effect()
            .cloned()
            .ok_or_else(|| StatsError::UnsupportedCapability {
                capability: Capabilities::PERIODIC_TICK,
                modifier: attached.modifier().to_string(),
            })?;

        let mut remaining = regen.amount;
        for sibling in self.siblings(item)? {
            let targets: Vec<ModifierId> = self
                .modifiers_of(sibling)?
                .filter(|(_, m)| m.supports(Capabilities::REFUND))
                .map(|(id, _)| id)
                .collect();
            for target in targets {
                remaining = self.modifier_mut(target)?.refund(&regen.stat, remaining)?;
            }
        }

        tracing::debug!(%item, stat = %regen.stat, amount = regen.amount, remaining, "regenerated");
        Ok(remaining)
    }

    /// Ticks every PERIODIC_TICK modifier in `actor`'s subtree, depth-first.
    /// Returns how many were ticked.
    pub fn tick_all(&mut self, actor: EntityId) -> Result<usize, StateError> {
        let mut tickers = Vec::new();
        for item in self.descendants(actor)? {
            tickers.extend(
                self.modifiers_of(item)?
                    .filter(|(_, m)| m.supports(Capabilities::PERIODIC_TICK))
                    .map(|(id, _)| id),
            );
        }
        for ticker in &tickers {
            self.periodic_tick(*ticker)?;
        }
        Ok(tickers.len())
    }
}
