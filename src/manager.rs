use crate::area::Area;
use crate::config::Config;
use crate::consts::DEFAULT_SEED;
use crate::layout::Layout;
use crate::prng::Prng;
use crate::sampler::CyclingSampler;

/// Creates and perturbs layouts within one compiled `Config`.
///
/// Each call advances internal cursors, so a `Manager` belongs to a single
/// worker. Use `fork` to give every parallel worker its own instance.
#[derive(Debug, Clone)]
pub struct Manager {
    config: Config,
    prng: Prng,
    /// `None` when there is only one area to pick from.
    selector: Option<CyclingSampler<usize>>,
}

impl Manager {
    pub fn new(config: Config, seed: u64) -> Self {
        Self::with_prng(config, Prng::new(seed))
    }

    pub fn with_prng(config: Config, prng: Prng) -> Self {
        let selector = if config.area_count() > 1 {
            Some(CyclingSampler::full(config.area_weights().to_vec()))
        } else {
            None
        };
        Self {
            config,
            prng,
            selector,
        }
    }

    /// An independent manager over the same partition.
    ///
    /// Swap cycles in progress are not inherited: the fork's first draw in
    /// every area reshuffles with its own PRNG.
    pub fn fork(&self, seed: u64) -> Self {
        let mut config = self.config.clone();
        for area in config.areas_mut() {
            area.exhaust();
        }
        Self::new(config, seed)
    }

    pub fn reseed(&mut self, seed: u64) {
        self.prng.seed(seed);
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// A fresh random layout: fixed keys in place, every area shuffled.
    pub fn create(&mut self) -> Layout {
        let mut layout = Layout::blank();
        for key in self.config.fixed_keys() {
            layout.set(key.val, key.pos);
        }
        self.assign_mutable_keys(&mut layout);
        debug_assert!(layout.valid());
        layout
    }

    /// Re-randomizes every area of `layout` in place; fixed keys stay.
    ///
    /// `layout` must be valid and manageable. This is not re-checked.
    pub fn reinit(&mut self, layout: &mut Layout) {
        debug_assert!(layout.valid() && self.can_manage(layout));
        self.assign_mutable_keys(layout);
        debug_assert!(layout.valid());
    }

    /// Overwrites `target` with `parent` plus a single swap inside one area.
    ///
    /// Areas are picked in proportion to their size. `parent` must be valid
    /// and manageable; `target` may hold anything.
    pub fn mutate(&mut self, target: &mut Layout, parent: &Layout) {
        debug_assert!(parent.valid() && self.can_manage(parent));
        *target = *parent;
        let id = self.select_area();
        self.config.areas_mut()[id].mutate(target, &mut self.prng);
        debug_assert!(target.valid());
        debug_assert_eq!(target.diff(parent).count(), 2);
    }

    pub fn can_manage(&self, layout: &Layout) -> bool {
        self.config
            .areas()
            .iter()
            .all(|area| area.is_compatible(layout))
    }

    fn assign_mutable_keys(&mut self, layout: &mut Layout) {
        let Self { config, prng, .. } = self;
        for area in config.areas_mut() {
            area.assign(layout, prng);
        }
    }

    #[inline(always)]
    fn select_area(&mut self) -> usize {
        match self.selector.as_mut() {
            Some(selector) => selector.draw::<1>(&mut self.prng)[0],
            None => 0,
        }
    }

    pub fn areas(&self) -> &[Area] {
        self.config.areas()
    }
}

impl Default for Manager {
    fn default() -> Self {
        Self::new(Config::builtin(), DEFAULT_SEED)
    }
}
