use time::Date;

use crate::{Symbol, ValidationError};

/// Tracked feature columns, in the order the sequence model was trained on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Feature {
    Close,
    Open,
    High,
    Low,
    Volume,
}

impl Feature {
    /// Fixed column order shared by scaling, windowing and inverse transforms.
    pub const ORDER: [Self; 5] = [Self::Close, Self::Open, Self::High, Self::Low, Self::Volume];

    pub const COUNT: usize = Self::ORDER.len();

    /// Column index of this feature inside a feature row.
    pub const fn index(self) -> usize {
        match self {
            Self::Close => 0,
            Self::Open => 1,
            Self::High => 2,
            Self::Low => 3,
            Self::Volume => 4,
        }
    }
}

/// One trading day of OHLCV data.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DailyBar {
    pub date: Date,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: f64,
}

impl DailyBar {
    pub fn new(
        date: Date,
        open: f64,
        high: f64,
        low: f64,
        close: f64,
        volume: f64,
    ) -> Result<Self, ValidationError> {
        validate_non_negative("open", open)?;
        validate_non_negative("high", high)?;
        validate_non_negative("low", low)?;
        validate_non_negative("close", close)?;
        validate_non_negative("volume", volume)?;

        if high < low {
            return Err(ValidationError::InvalidBarRange);
        }

        Ok(Self {
            date,
            open,
            high,
            low,
            close,
            volume,
        })
    }

    pub const fn feature(&self, feature: Feature) -> f64 {
        match feature {
            Feature::Close => self.close,
            Feature::Open => self.open,
            Feature::High => self.high,
            Feature::Low => self.low,
            Feature::Volume => self.volume,
        }
    }

    /// Feature vector in [`Feature::ORDER`].
    pub const fn feature_row(&self) -> [f64; Feature::COUNT] {
        [self.close, self.open, self.high, self.low, self.volume]
    }
}

/// Date-ordered daily history for one symbol.
#[derive(Debug, Clone, PartialEq)]
pub struct PriceHistory {
    symbol: Symbol,
    bars: Vec<DailyBar>,
}

impl PriceHistory {
    /// Builds a history, rejecting duplicate or out-of-order dates.
    pub fn new(symbol: Symbol, bars: Vec<DailyBar>) -> Result<Self, ValidationError> {
        for pair in bars.windows(2) {
            if pair[1].date <= pair[0].date {
                return Err(ValidationError::UnorderedDates {
                    previous: pair[0].date.to_string(),
                    next: pair[1].date.to_string(),
                });
            }
        }

        Ok(Self { symbol, bars })
    }

    pub fn symbol(&self) -> &Symbol {
        &self.symbol
    }

    pub fn bars(&self) -> &[DailyBar] {
        &self.bars
    }

    pub fn len(&self) -> usize {
        self.bars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bars.is_empty()
    }

    pub fn last(&self) -> Option<&DailyBar> {
        self.bars.last()
    }

    /// The trailing `n` bars, or all of them when fewer are available.
    pub fn tail(&self, n: usize) -> &[DailyBar] {
        let start = self.bars.len().saturating_sub(n);
        &self.bars[start..]
    }

    pub fn feature_rows(&self) -> impl Iterator<Item = [f64; Feature::COUNT]> + '_ {
        self.bars.iter().map(DailyBar::feature_row)
    }
}

fn validate_non_negative(field: &'static str, value: f64) -> Result<(), ValidationError> {
    if !value.is_finite() {
        return Err(ValidationError::NonFiniteValue { field });
    }
    if value < 0.0 {
        return Err(ValidationError::NegativeValue { field });
    }
    Ok(())
}
