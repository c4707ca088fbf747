//! Native-to-USD conversion — a pure function of (amount, price, decimals).

use crate::{OracleError, PriceQuote};
use fundpool_types::{NativeAmount, UsdValue};

/// Convert a native-currency amount to its USD value using a price quote.
///
/// The quote carries the price scaled by `10^decimals`; the result keeps the
/// amount's own 18-decimal precision:
///
/// `usd = amount × price / 10^decimals`
///
/// All arithmetic is unsigned and overflow-checked. The final division
/// truncates (floor), which loses at most one raw unit of USD value.
pub fn native_to_usd(amount: NativeAmount, quote: &PriceQuote) -> Result<UsdValue, OracleError> {
    if !quote.is_positive() {
        return Err(OracleError::InvalidPrice(quote.price));
    }
    let price = quote.price as u128;
    let scale = 10u128
        .checked_pow(quote.decimals)
        .ok_or(OracleError::InvalidDecimals(quote.decimals))?;
    let product = amount
        .raw()
        .checked_mul(price)
        .ok_or(OracleError::Overflow)?;
    Ok(UsdValue::new(product / scale))
}

#[cfg(test)]
mod tests {
    use super::*;
    use fundpool_types::{NATIVE_UNIT, USD_UNIT};

    fn quote_2000_usd() -> PriceQuote {
        // 2000 USD per native unit at 8 decimals.
        PriceQuote {
            price: 2000_00000000,
            decimals: 8,
        }
    }

    #[test]
    fn converts_fractional_amount() {
        // 0.03 native at 2000 USD/unit = 60 USD.
        let amount = NativeAmount::new(3 * NATIVE_UNIT / 100);
        let usd = native_to_usd(amount, &quote_2000_usd()).unwrap();
        assert_eq!(usd, UsdValue::from_usd(60));
    }

    #[test]
    fn converts_small_amount_below_threshold_values() {
        // 0.01 native at 2000 USD/unit = 20 USD.
        let amount = NativeAmount::new(NATIVE_UNIT / 100);
        let usd = native_to_usd(amount, &quote_2000_usd()).unwrap();
        assert_eq!(usd, UsdValue::from_usd(20));
    }

    #[test]
    fn converts_whole_unit() {
        let usd = native_to_usd(NativeAmount::from_native(1), &quote_2000_usd()).unwrap();
        assert_eq!(usd, UsdValue::from_usd(2000));
    }

    #[test]
    fn zero_amount_converts_to_zero() {
        let usd = native_to_usd(NativeAmount::ZERO, &quote_2000_usd()).unwrap();
        assert_eq!(usd, UsdValue::ZERO);
    }

    #[test]
    fn respects_declared_decimals() {
        // Same 2000 USD price expressed at 2 decimals.
        let quote = PriceQuote {
            price: 2000_00,
            decimals: 2,
        };
        let usd = native_to_usd(NativeAmount::from_native(1), &quote).unwrap();
        assert_eq!(usd, UsdValue::from_usd(2000));
    }

    #[test]
    fn division_truncates() {
        // 1 raw unit at a price of 0.5 USD (5 * 10^-1) floors to 0.
        let quote = PriceQuote {
            price: 5,
            decimals: 1,
        };
        let usd = native_to_usd(NativeAmount::new(1), &quote).unwrap();
        assert_eq!(usd, UsdValue::ZERO);
    }

    #[test]
    fn rejects_zero_price() {
        let quote = PriceQuote {
            price: 0,
            decimals: 8,
        };
        let err = native_to_usd(NativeAmount::from_native(1), &quote).unwrap_err();
        assert!(matches!(err, OracleError::InvalidPrice(0)));
    }

    #[test]
    fn rejects_negative_price() {
        let quote = PriceQuote {
            price: -1,
            decimals: 8,
        };
        let err = native_to_usd(NativeAmount::from_native(1), &quote).unwrap_err();
        assert!(matches!(err, OracleError::InvalidPrice(-1)));
    }

    #[test]
    fn rejects_unusable_decimals() {
        // 10^39 does not fit in u128.
        let quote = PriceQuote {
            price: 1,
            decimals: 39,
        };
        let err = native_to_usd(NativeAmount::from_native(1), &quote).unwrap_err();
        assert!(matches!(err, OracleError::InvalidDecimals(39)));
    }

    #[test]
    fn detects_multiplication_overflow() {
        let quote = quote_2000_usd();
        let err = native_to_usd(NativeAmount::new(u128::MAX), &quote).unwrap_err();
        assert!(matches!(err, OracleError::Overflow));
    }

    #[test]
    fn five_whole_units_stay_in_range() {
        // The headroom case: summing typical whole-unit contributions must
        // not overflow the intermediate product.
        let usd = native_to_usd(NativeAmount::from_native(5), &quote_2000_usd()).unwrap();
        assert_eq!(usd.raw(), 10_000 * USD_UNIT);
    }
}
