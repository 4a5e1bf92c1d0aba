/// Tax percent applied when a variation carries none.
pub const DEFAULT_TAX_PERCENT: f64 = 19.0;

/// Rounds to two decimal places, half away from zero.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinePricing {
    pub unit_price_exc_tax: f64,
    pub unit_price_inc_tax: f64,
    /// Tax for the whole line (unit difference times quantity).
    pub tax_amount: f64,
}

/// Derives the tax-exclusive unit price and per-line tax amount from a
/// tax-inclusive unit price.
///
/// `exclusive = round2(P / (1 + t/100))`, `tax = round2((P - exclusive) * qty)`.
pub fn price_from_inclusive(
    unit_price_inc_tax: f64,
    tax_percent: Option<f64>,
    quantity: f64,
) -> LinePricing {
    let percent = tax_percent.unwrap_or(DEFAULT_TAX_PERCENT);
    let unit_price_exc_tax = round2(unit_price_inc_tax / (1.0 + percent / 100.0));
    let tax_amount = round2((unit_price_inc_tax - unit_price_exc_tax) * quantity);

    LinePricing {
        unit_price_exc_tax,
        unit_price_inc_tax,
        tax_amount,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round2() {
        assert_eq!(round2(4201.6806), 4201.68);
        assert_eq!(round2(0.005), 0.01);
        assert_eq!(round2(10.0), 10.0);
    }

    #[test]
    fn test_exclusive_price_default_percent() {
        // 5000 inc. tax at the default 19% -> 4201.68 exc. tax
        let p = price_from_inclusive(5000.0, None, 1.0);
        assert_eq!(p.unit_price_exc_tax, 4201.68);
        assert_eq!(p.tax_amount, 798.32);
    }

    #[test]
    fn test_exclusive_price_explicit_percent() {
        let p = price_from_inclusive(1000.0, Some(10.0), 2.0);
        assert_eq!(p.unit_price_exc_tax, 909.09);
        assert_eq!(p.tax_amount, 181.82);
    }

    #[test]
    fn test_zero_percent() {
        let p = price_from_inclusive(1500.0, Some(0.0), 3.0);
        assert_eq!(p.unit_price_exc_tax, 1500.0);
        assert_eq!(p.tax_amount, 0.0);
    }

    // exclusive*qty + tax must reconstruct the inclusive line total within
    // rounding tolerance.
    #[test]
    fn test_inclusive_total_identity() {
        let cases = [
            (5000.0, Some(19.0), 1.0),
            (1000.0, None, 2.0),
            (333.33, Some(8.0), 7.0),
            (129.99, Some(19.0), 13.0),
            (0.01, Some(19.0), 1.0),
        ];
        for (price, percent, qty) in cases {
            let p = price_from_inclusive(price, percent, qty);
            let rebuilt = round2(p.unit_price_exc_tax * qty + p.tax_amount);
            let expected = round2(price * qty);
            assert!(
                (rebuilt - expected).abs() < 0.02,
                "price={price} qty={qty}: {rebuilt} vs {expected}"
            );
        }
    }
}
