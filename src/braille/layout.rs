//! Margin calculation for embossers.

use crate::error::{Error, Result};
use rust_decimal::Decimal;

/// Converts requested physical margins into margins the hardware can produce.
pub trait LayoutHelper {
    /// Extra line spacing, in dots, added between braille lines.
    fn line_spacing(&self) -> u32;

    /// Actual margin produced for a requested margin in millimetres.
    fn calculate_margin(&self, desired: Decimal) -> Result<Decimal>;
}

/// Layout helper for embossers which honour margins exactly.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultLayoutHelper;

impl DefaultLayoutHelper {
    /// Create a new default layout helper.
    pub fn new() -> Self {
        Self
    }
}

impl LayoutHelper for DefaultLayoutHelper {
    fn line_spacing(&self) -> u32 {
        0
    }

    fn calculate_margin(&self, desired: Decimal) -> Result<Decimal> {
        if desired.is_sign_negative() && !desired.is_zero() {
            return Err(Error::Configuration(
                "Desired width must not be negative.".to_string(),
            ));
        }
        Ok(desired)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_margin_passes_through() {
        let helper = DefaultLayoutHelper::new();
        assert_eq!(helper.calculate_margin(Decimal::new(254, 1)).unwrap(), Decimal::new(254, 1));
        assert_eq!(helper.calculate_margin(Decimal::ZERO).unwrap(), Decimal::ZERO);
        assert_eq!(helper.line_spacing(), 0);
    }

    #[test]
    fn test_negative_margin_rejected() {
        let helper = DefaultLayoutHelper::new();
        let result = helper.calculate_margin(Decimal::new(-1, 2));
        assert!(matches!(result, Err(Error::Configuration(_))));
    }
}
