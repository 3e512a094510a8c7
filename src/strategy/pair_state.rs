//! Pair State Machine
//!
//! Owns every indicator for one traded pair and the current regime.
//!
//! Per tick:
//! 1. A snapshot missing either leg is rejected before anything mutates.
//! 2. Spread, band and both leg volatilities are updated.
//! 3. Until all indicators are warm the tick ends with `NotReady`.
//! 4. Transitions, in priority order:
//!    - Flat, spread < lower  -> Long  (+w1 leg 1, -w2 leg 2)
//!    - Flat, spread > upper  -> Short (-w1 leg 1, +w2 leg 2)
//!    - Long, spread > middle -> Flat  (liquidate)
//!    - Short, spread < middle -> Flat (liquidate)

use crate::domain::{Bar, IndicatorSnapshot, MarketSnapshot, PairAction, PositionRegime};
use crate::strategy::error::SignalError;
use crate::strategy::indicators::{BandLevels, RollingStat, VolatilityBand};
use crate::strategy::params::{ConfigError, PairConfig};
use crate::strategy::sizer::PositionSizer;
use crate::strategy::spread::SpreadSeries;

#[derive(Debug, Clone, PartialEq)]
pub struct PairState {
    config: PairConfig,
    id: String,
    spread: SpreadSeries,
    band: VolatilityBand,
    volatility_1: RollingStat,
    volatility_2: RollingStat,
    regime: PositionRegime,
    last_snapshot: Option<IndicatorSnapshot>,
}

impl PairState {
    pub fn new(config: PairConfig) -> Result<Self, ConfigError> {
        config.validate()?;

        let band = VolatilityBand::new(
            config.band_window,
            config.band_multiplier,
            config.moving_average,
        )?;
        let volatility_1 = RollingStat::new(config.volatility_window)?;
        let volatility_2 = RollingStat::new(config.volatility_window)?;

        Ok(Self {
            id: config.id(),
            spread: SpreadSeries::new(config.hedge_ratio),
            band,
            volatility_1,
            volatility_2,
            regime: PositionRegime::Flat,
            last_snapshot: None,
            config,
        })
    }

    /// Process one market snapshot.
    ///
    /// `Ok(None)` is a ready tick with no regime change. Expected errors
    /// (`MissingData`, `NotReady`) mean the tick was skipped; `InvalidVolatility`
    /// means an entry was blocked and the pair stays flat.
    pub fn on_bars(&mut self, snapshot: &MarketSnapshot) -> Result<Option<PairAction>, SignalError> {
        let bar_1 = *snapshot
            .bar(&self.config.leg_1)
            .ok_or_else(|| SignalError::MissingData {
                instrument: self.config.leg_1.clone(),
            })?;
        let bar_2 = *snapshot
            .bar(&self.config.leg_2)
            .ok_or_else(|| SignalError::MissingData {
                instrument: self.config.leg_2.clone(),
            })?;

        self.update_indicators(&bar_1, &bar_2);

        let spread = self.spread.current()?;
        let band = self.band.levels()?;
        let vol_1 = self
            .volatility_1
            .stdev()
            .map_err(|_| SignalError::NotReady("leg 1 volatility"))?;
        let vol_2 = self
            .volatility_2
            .stdev()
            .map_err(|_| SignalError::NotReady("leg 2 volatility"))?;

        let decision = self.evaluate(spread, &band, vol_1, vol_2);

        self.last_snapshot = Some(IndicatorSnapshot {
            timestamp: snapshot.timestamp,
            pair: self.id.clone(),
            spread,
            lower: band.lower,
            middle: band.middle,
            upper: band.upper,
            leg_1: bar_1,
            leg_2: bar_2,
            volatility_1: vol_1,
            volatility_2: vol_2,
            regime: self.regime,
        });

        decision
    }

    fn update_indicators(&mut self, bar_1: &Bar, bar_2: &Bar) {
        self.spread.update(bar_1.close, bar_2.close);
        if let Ok(value) = self.spread.current() {
            self.band.update(value);
        }
        self.volatility_1.update(bar_1.close);
        self.volatility_2.update(bar_2.close);
    }

    fn evaluate(
        &mut self,
        spread: f64,
        band: &BandLevels,
        vol_1: f64,
        vol_2: f64,
    ) -> Result<Option<PairAction>, SignalError> {
        match self.regime {
            PositionRegime::Flat => {
                let target = if band.is_below(spread) {
                    PositionRegime::Long
                } else if band.is_above(spread) {
                    PositionRegime::Short
                } else {
                    return Ok(None);
                };

                let allocation = match PositionSizer::allocation(
                    target,
                    &self.config.leg_1,
                    &self.config.leg_2,
                    vol_1,
                    vol_2,
                )? {
                    Some(allocation) => allocation,
                    None => return Ok(None),
                };

                self.regime = target;
                tracing::info!(
                    "{} entering {} | spread {:.4} outside [{:.4}, {:.4}] | weights {}",
                    self.id,
                    target,
                    spread,
                    band.lower,
                    band.upper,
                    allocation
                        .iter()
                        .map(|t| format!("{}={:+.4}", t.instrument, t.weight))
                        .collect::<Vec<_>>()
                        .join(" ")
                );

                Ok(Some(PairAction::Allocate {
                    pair: self.id.clone(),
                    allocation,
                }))
            }
            PositionRegime::Long if spread > band.middle => Ok(Some(self.exit(spread, band))),
            PositionRegime::Short if spread < band.middle => Ok(Some(self.exit(spread, band))),
            PositionRegime::Long | PositionRegime::Short => Ok(None),
        }
    }

    fn exit(&mut self, spread: f64, band: &BandLevels) -> PairAction {
        tracing::info!(
            "{} exiting {} | spread {:.4} crossed middle {:.4}",
            self.id,
            self.regime,
            spread,
            band.middle
        );
        self.regime = PositionRegime::Flat;
        PairAction::Liquidate {
            pair: self.id.clone(),
            instruments: vec![self.config.leg_1.clone(), self.config.leg_2.clone()],
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn config(&self) -> &PairConfig {
        &self.config
    }

    pub fn regime(&self) -> PositionRegime {
        self.regime
    }

    /// True once the band and both volatility windows are full
    pub fn is_ready(&self) -> bool {
        self.band.is_ready() && self.volatility_1.is_ready() && self.volatility_2.is_ready()
    }

    pub fn spread(&self) -> &SpreadSeries {
        &self.spread
    }

    pub fn band(&self) -> &VolatilityBand {
        &self.band
    }

    /// Price standard deviation of each leg
    pub fn volatilities(&self) -> Result<(f64, f64), SignalError> {
        Ok((self.volatility_1.stdev()?, self.volatility_2.stdev()?))
    }

    /// Indicator readings from the most recent ready tick
    pub fn last_snapshot(&self) -> Option<&IndicatorSnapshot> {
        self.last_snapshot.as_ref()
    }
}
