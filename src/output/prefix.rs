//! SI metric-prefix selection for human-scaled display.

/// A metric prefix: multiply a value by `factor` to express it in the
/// prefix's range.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MetricPrefix {
    /// The prefix symbol, possibly empty.
    pub symbol: &'static str,

    /// Scale factor `10^-power`.
    pub factor: f64,

    /// The power of ten the symbol stands for.
    pub power: i32,
}

/// Prefix symbols from 10^24 (yotta) down to 10^-24 (yocto), step 3.
const SYMBOLS: [&str; 17] = [
    "Y", "Z", "E", "P", "T", "G", "M", "k", "", "m", "u", "n", "p", "f", "a", "z", "y",
];

const HIGHEST_POWER: i32 = 24;

/// Pick the largest prefix whose power of ten `value` exceeds.
///
/// `2.5e-9` selects `n` with power -9; values in `[1, 1000)` select the
/// empty prefix with power 0. Values at or below 10^-24 fall through to an
/// empty prefix with factor 1.
pub fn metric_prefix(value: f64) -> MetricPrefix {
    for (i, symbol) in SYMBOLS.iter().enumerate() {
        let power = HIGHEST_POWER - 3 * i as i32;
        if value > 10f64.powi(power) {
            return MetricPrefix {
                symbol,
                factor: 10f64.powi(-power),
                power,
            };
        }
    }

    MetricPrefix {
        symbol: "",
        factor: 1.0,
        power: 1,
    }
}
