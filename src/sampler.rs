use crate::prng::Prng;

/// Exhaustive-without-repeat sampling over an owned sequence.
///
/// The sequence is walked in shuffled order, `K` elements per draw, and only
/// reshuffled once the cursor reaches `limit`. Within one cycle every element
/// before `limit` is handed out exactly once.
#[derive(Debug, Clone)]
pub struct CyclingSampler<T> {
    items: Vec<T>,
    limit: usize,
    cursor: usize,
}

impl<T: Copy> CyclingSampler<T> {
    /// Starts exhausted, so the first draw shuffles.
    pub fn new(items: Vec<T>, limit: usize) -> Self {
        debug_assert!(limit <= items.len());
        Self {
            items,
            limit,
            cursor: limit,
        }
    }

    /// Sampler whose cycle spans every element.
    pub fn full(items: Vec<T>) -> Self {
        let limit = items.len();
        Self::new(items, limit)
    }

    /// Ends the current cycle, so the next draw reshuffles.
    pub(crate) fn exhaust(&mut self) {
        self.cursor = self.limit;
    }

    pub fn reshuffle(&mut self, prng: &mut Prng) {
        prng.shuffle(&mut self.items);
        self.cursor = 0;
    }

    /// Reshuffles if fewer than `K` elements remain in the cycle, then hands
    /// out the next `K`.
    #[inline(always)]
    pub fn draw<const K: usize>(&mut self, prng: &mut Prng) -> [T; K] {
        debug_assert!(K > 0 && K <= self.limit);
        if self.cursor + K > self.limit {
            self.reshuffle(prng);
        }
        let start = self.cursor;
        self.cursor += K;
        std::array::from_fn(|i| self.items[start + i])
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn limit(&self) -> usize {
        self.limit
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_draw_reshuffles() {
        let mut prng = Prng::new(1);
        let mut sampler = CyclingSampler::full(vec![1u8, 2, 3, 4]);
        assert_eq!(sampler.cursor(), 4);
        let [_] = sampler.draw::<1>(&mut prng);
        assert_eq!(sampler.cursor(), 1);
    }

    #[test]
    fn test_exhaust_forces_reshuffle() {
        let mut prng = Prng::new(2);
        let mut sampler = CyclingSampler::full((0..6u8).collect());
        sampler.draw::<2>(&mut prng);
        sampler.exhaust();
        assert_eq!(sampler.cursor(), sampler.limit());
        sampler.draw::<2>(&mut prng);
        assert_eq!(sampler.cursor(), 2);
    }

    #[test]
    fn test_cycle_visits_each_once() {
        let mut prng = Prng::new(5);
        let mut sampler = CyclingSampler::full((0..10u8).collect());
        for _ in 0..4 {
            let mut seen: Vec<u8> = (0..10).map(|_| sampler.draw::<1>(&mut prng)[0]).collect();
            seen.sort_unstable();
            assert_eq!(seen, (0..10).collect::<Vec<u8>>());
        }
    }

    #[test]
    fn test_odd_limit_skips_tail() {
        let mut prng = Prng::new(9);
        let mut sampler = CyclingSampler::new((0..5u8).collect(), 4);
        let [a, b] = sampler.draw::<2>(&mut prng);
        let [c, d] = sampler.draw::<2>(&mut prng);
        let mut drawn = vec![a, b, c, d];
        drawn.sort_unstable();
        drawn.dedup();
        assert_eq!(drawn.len(), 4);
        let skipped = sampler.items()[4];
        assert!(!drawn.contains(&skipped));
    }
}
