//! Historical data provider adapters.

mod yahoo;

pub use yahoo::YahooAdapter;
