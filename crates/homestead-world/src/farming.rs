//! Farm plots: planting, growth timers, watering, withering, and harvest.
//!
//! Growth is measured in simulation seconds:
//!
//! - A fresh crop is a `Seed` until `sprout_secs` have passed, then
//!   `Growing` until `growth_secs`, then `Mature`.
//! - A growing crop left dry for `drought_secs` withers.
//! - A mature crop left unharvested for `wither_after_secs` withers.
//!
//! Watering lasts until the next day rollover.

use std::collections::BTreeMap;

use serde::Deserialize;
use tracing::debug;

use homestead_agents::{CropView, Farmland, PlotView};
use homestead_types::{CropStage, ItemId, ItemStack, PlotId};

use crate::error::WorldError;

// ---------------------------------------------------------------------------
// Configuration
// ---------------------------------------------------------------------------

/// Farm growth parameters.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct FarmConfig {
    /// Number of plots in the field (default: 6).
    pub plots: u32,
    /// Seconds until a seed sprouts (default: 30).
    pub sprout_secs: f64,
    /// Seconds from planting to maturity (default: 240).
    pub growth_secs: f64,
    /// Seconds a growing crop survives without water (default: 300).
    pub drought_secs: f64,
    /// Seconds a mature crop survives unharvested (default: 600).
    pub wither_after_secs: f64,
    /// Units yielded per harvest (default: 3).
    pub harvest_yield: u32,
}

impl Default for FarmConfig {
    fn default() -> Self {
        Self {
            plots: 6,
            sprout_secs: 30.0,
            growth_secs: 240.0,
            drought_secs: 300.0,
            wither_after_secs: 600.0,
            harvest_yield: 3,
        }
    }
}

// ---------------------------------------------------------------------------
// Crop
// ---------------------------------------------------------------------------

/// A crop growing on one plot.
#[derive(Debug, Clone, PartialEq)]
pub struct Crop {
    /// What the harvest yields.
    pub produce: ItemId,
    /// Current stage.
    pub stage: CropStage,
    /// Whether the crop has been watered since the last rollover.
    pub watered: bool,
    /// Seconds since planting.
    age_secs: f64,
    /// Seconds spent dry while growing.
    dry_secs: f64,
    /// Seconds spent ripe.
    ripe_secs: f64,
}

impl Crop {
    fn planted(produce: ItemId) -> Self {
        Self {
            produce,
            stage: CropStage::Seed,
            watered: false,
            age_secs: 0.0,
            dry_secs: 0.0,
            ripe_secs: 0.0,
        }
    }

    fn advance(&mut self, dt: f64, cfg: &FarmConfig) {
        match self.stage {
            CropStage::Withered => return,
            CropStage::Mature => {
                self.ripe_secs += dt;
                if self.ripe_secs >= cfg.wither_after_secs {
                    self.stage = CropStage::Withered;
                }
                return;
            }
            CropStage::Growing if !self.watered => {
                self.dry_secs += dt;
                if self.dry_secs >= cfg.drought_secs {
                    self.stage = CropStage::Withered;
                    return;
                }
            }
            CropStage::Seed | CropStage::Growing => {}
        }

        self.age_secs += dt;
        self.stage = if self.age_secs >= cfg.growth_secs {
            CropStage::Mature
        } else if self.age_secs >= cfg.sprout_secs {
            CropStage::Growing
        } else {
            CropStage::Seed
        };
    }
}

// ---------------------------------------------------------------------------
// FarmField
// ---------------------------------------------------------------------------

/// A field of numbered plots.
#[derive(Debug, Clone, PartialEq)]
pub struct FarmField {
    config: FarmConfig,
    plots: BTreeMap<PlotId, Option<Crop>>,
}

impl FarmField {
    /// A field of empty plots numbered from zero.
    pub fn new(config: FarmConfig) -> Self {
        Self {
            config,
            plots: (0..config.plots).map(|n| (PlotId(n), None)).collect(),
        }
    }

    /// Plant a crop on an empty plot.
    ///
    /// # Errors
    ///
    /// Returns [`WorldError::PlotNotFound`] for an unknown plot or
    /// [`WorldError::PlotOccupied`] if something already grows there.
    pub fn plant(&mut self, plot: PlotId, produce: impl Into<ItemId>) -> Result<(), WorldError> {
        let slot = self.plots.get_mut(&plot).ok_or(WorldError::PlotNotFound(plot))?;
        if slot.is_some() {
            return Err(WorldError::PlotOccupied(plot));
        }
        *slot = Some(Crop::planted(produce.into()));
        Ok(())
    }

    /// Crop on a plot, if any.
    pub fn crop(&self, plot: PlotId) -> Option<&Crop> {
        self.plots.get(&plot).and_then(Option::as_ref)
    }

    /// Grow every crop by `dt` seconds.
    pub fn advance(&mut self, dt: f64) {
        if !dt.is_finite() || dt <= 0.0 {
            return;
        }
        let cfg = self.config;
        for crop in self.plots.values_mut().flatten() {
            crop.advance(dt, &cfg);
        }
    }

    /// Dry every crop out at day rollover.
    pub fn new_day(&mut self) {
        for crop in self.plots.values_mut().flatten() {
            crop.watered = false;
        }
    }

    /// Count of plots per stage, ignoring empty plots.
    pub fn census(&self) -> BTreeMap<CropStage, usize> {
        let mut counts = BTreeMap::new();
        for crop in self.plots.values().flatten() {
            let entry = counts.entry(crop.stage).or_insert(0_usize);
            *entry = entry.saturating_add(1);
        }
        counts
    }
}

impl Farmland for FarmField {
    fn plots(&self) -> Vec<PlotView> {
        self.plots
            .iter()
            .map(|(id, crop)| PlotView {
                id: *id,
                crop: crop.as_ref().map(|crop| CropView {
                    stage: crop.stage,
                    watered: crop.watered,
                }),
            })
            .collect()
    }

    fn harvest(&mut self, plot: PlotId) -> Option<Vec<ItemStack>> {
        let slot = self.plots.get_mut(&plot)?;
        if slot.as_ref().is_none_or(|crop| crop.stage != CropStage::Mature) {
            return None;
        }
        let crop = slot.take()?;
        debug!(%plot, produce = %crop.produce, "crop harvested");
        Some(vec![ItemStack {
            item: crop.produce,
            count: self.config.harvest_yield,
        }])
    }

    fn water(&mut self, plot: PlotId) -> bool {
        match self.plots.get_mut(&plot) {
            Some(Some(crop)) if crop.stage != CropStage::Withered && !crop.watered => {
                crop.watered = true;
                crop.dry_secs = 0.0;
                true
            }
            _ => false,
        }
    }

    fn clear(&mut self, plot: PlotId) -> bool {
        self.plots
            .get_mut(&plot)
            .and_then(Option::take)
            .is_some()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn field() -> FarmField {
        FarmField::new(FarmConfig::default())
    }

    #[test]
    fn seed_sprouts_then_matures() {
        let mut farm = field();
        farm.plant(PlotId(0), "turnip").unwrap();
        assert_eq!(farm.crop(PlotId(0)).unwrap().stage, CropStage::Seed);

        farm.advance(31.0);
        assert_eq!(farm.crop(PlotId(0)).unwrap().stage, CropStage::Growing);
        assert!(farm.water(PlotId(0)));
        farm.advance(210.0);
        assert_eq!(farm.crop(PlotId(0)).unwrap().stage, CropStage::Mature);
    }

    #[test]
    fn double_planting_is_refused() {
        let mut farm = field();
        farm.plant(PlotId(1), "pea").unwrap();
        assert!(matches!(farm.plant(PlotId(1), "pea"), Err(WorldError::PlotOccupied(_))));
        assert!(matches!(farm.plant(PlotId(99), "pea"), Err(WorldError::PlotNotFound(_))));
    }

    #[test]
    fn dry_growing_crop_withers() {
        let mut farm = field();
        farm.plant(PlotId(0), "turnip").unwrap();
        farm.advance(31.0);
        farm.advance(300.0);
        assert_eq!(farm.crop(PlotId(0)).unwrap().stage, CropStage::Withered);
        assert!(!farm.water(PlotId(0)));
        assert!(farm.clear(PlotId(0)));
        assert!(farm.crop(PlotId(0)).is_none());
    }

    #[test]
    fn harvest_only_takes_mature_crops() {
        let mut farm = field();
        farm.plant(PlotId(2), "melon").unwrap();
        assert_eq!(farm.harvest(PlotId(2)), None);

        farm.advance(31.0);
        farm.water(PlotId(2));
        farm.advance(220.0);
        let yielded = farm.harvest(PlotId(2)).unwrap();
        assert_eq!(yielded, vec![ItemStack::new("melon", 3)]);
        assert!(farm.crop(PlotId(2)).is_none());
    }

    #[test]
    fn watering_wears_off_at_rollover() {
        let mut farm = field();
        farm.plant(PlotId(0), "turnip").unwrap();
        assert!(farm.water(PlotId(0)));
        assert!(!farm.water(PlotId(0)));
        farm.new_day();
        assert!(farm.water(PlotId(0)));
    }

    #[test]
    fn census_counts_stages() {
        let mut farm = field();
        farm.plant(PlotId(0), "turnip").unwrap();
        farm.plant(PlotId(1), "turnip").unwrap();
        farm.advance(31.0);
        let census = farm.census();
        assert_eq!(census.get(&CropStage::Growing), Some(&2));
        assert_eq!(farm.plots().len(), 6);
    }
}
