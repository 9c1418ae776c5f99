use crate::config::Claims;
use crate::core_types::{KeyValue, Position};
use crate::error::ConfigError;
use crate::layout::Layout;
use crate::prng::Prng;
use crate::sampler::CyclingSampler;

/// A set of key values that may only be permuted among a set of positions.
///
/// Values are kept sorted; randomness comes from shuffling the positions
/// alone, which is enough for a uniform pairing. The same shuffled position
/// list feeds the swap cursor used by `mutate`.
#[derive(Debug, Clone)]
pub struct Area {
    values: Vec<KeyValue>,
    positions: CyclingSampler<Position>,
}

impl Area {
    /// Builds a standalone area, validated like a `[[mutable_area]]` entry.
    pub fn new(values: &[KeyValue], positions: &[Position]) -> Result<Self, ConfigError> {
        let (values, positions) = Claims::new().claim_area(0, values, positions)?;
        Ok(Self::from_parts(values, positions))
    }

    /// Builds a standalone area from one `[[mutable_area]]` table.
    pub fn from_table(table: &toml::Table) -> Result<Self, ConfigError> {
        let (values, positions) = Claims::new().parse_area(0, table)?;
        Ok(Self::from_parts(values, positions))
    }

    /// Trusts its input: equal lengths, no repeats, legal keys.
    pub(crate) fn from_parts(mut values: Vec<KeyValue>, positions: Vec<Position>) -> Self {
        debug_assert_eq!(values.len(), positions.len());
        debug_assert!(values.len() >= 2);
        values.sort_unstable();
        // An odd area leaves one position out of every swap cycle.
        let limit = positions.len() - positions.len() % 2;
        Self {
            values,
            positions: CyclingSampler::new(positions, limit),
        }
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Key values in ascending order.
    pub fn values(&self) -> &[KeyValue] {
        &self.values
    }

    /// Positions in their current shuffled order.
    pub fn positions(&self) -> &[Position] {
        self.positions.items()
    }

    pub fn cycle_limit(&self) -> usize {
        self.positions.limit()
    }

    pub fn contains_position(&self, pos: Position) -> bool {
        self.positions().contains(&pos)
    }

    /// Writes a uniformly random arrangement of this area into `layout`.
    ///
    /// Restarts the swap cycle, since the position list is reshuffled.
    pub fn assign(&mut self, layout: &mut Layout, prng: &mut Prng) {
        self.positions.reshuffle(prng);
        for (&val, &pos) in self.values.iter().zip(self.positions.items()) {
            layout.set(val, pos);
        }
    }

    /// Swaps the values at the next two positions of the cycle.
    ///
    /// `layout` must already hold this area's values at its positions.
    #[inline(always)]
    pub fn mutate(&mut self, layout: &mut Layout, prng: &mut Prng) {
        let [pos1, pos2] = self.positions.draw::<2>(prng);
        layout.swap(pos1, pos2);
    }

    /// Drops the current swap cycle without touching any randomness.
    pub(crate) fn exhaust(&mut self) {
        self.positions.exhaust();
    }

    pub fn reset(&mut self, prng: &mut Prng) {
        self.positions.reshuffle(prng);
    }

    /// True iff `layout` holds exactly this area's values at its positions,
    /// in any order.
    pub fn is_compatible(&self, layout: &Layout) -> bool {
        let mut observed: Vec<KeyValue> = self
            .positions()
            .iter()
            .map(|&pos| layout.get_value(pos))
            .collect();
        observed.sort_unstable();
        observed == self.values
    }
}
