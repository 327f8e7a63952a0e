//! # Dimension Strings
//!
//! Converts floating point inch measurements into the fractional notation
//! used on a cabinet shop floor. Values are reported to the nearest nth of an
//! inch (sixteenths by default), in lowest terms, with a suffix when the true
//! value is not an exact number of nths:
//!
//! - `+` (**strong**): a little over the mark
//! - `-` (**shy**): a little under the mark
//!
//! | `x`          | `dimstr(x)` |
//! |--------------|-------------|
//! | 11.375       | `11 3/8`    |
//! | 17.2683      | `17 1/4+`   |
//! | 34.285714... | `34 5/16-`  |
//!
//! Within a quarter of an nth of a mark (1/64" for sixteenths) the suffix is
//! dropped. An exact midpoint between two marks goes to the even nth.
//!
//! ## Example
//!
//! ```rust
//! use cabinet_core::dimension::{dimstr, dimstr_col};
//!
//! assert_eq!(dimstr(11.0 + 2.0 / 7.0).unwrap(), "11 5/16-");
//! assert_eq!(dimstr_col(4.0).unwrap(), " 4");
//! ```

use std::fmt;

use crate::errors::{CabError, CabResult};

/// Default denominator: measurements are reported in sixteenths.
pub const DEFAULT_DENOMINATOR: u32 = 16;

/// Panel stock is specified to the nearest quarter inch.
pub const THICKNESS_DENOMINATOR: u32 = 4;

/// Largest count of 1/n" units an `f64` still holds exactly (2^53).
const MAX_EXACT_NTHS: f64 = 9_007_199_254_740_992.0;

/// A non-negative mixed number `whole numerator/denominator` in lowest terms.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MixedNumber {
    whole: u64,
    numerator: u64,
    denominator: u64,
}

impl MixedNumber {
    /// Build `whole + numerator/denominator`, reducing the fraction.
    ///
    /// A numerator of at least the denominator carries into the whole part,
    /// so `MixedNumber::new(2, 16, 16)` is `3`.
    pub fn new(whole: u64, numerator: u64, denominator: u64) -> Self {
        let carry = numerator / denominator;
        let numerator = numerator % denominator;
        let divisor = gcd(numerator, denominator);
        MixedNumber {
            whole: whole + carry,
            numerator: numerator / divisor,
            denominator: denominator / divisor,
        }
    }

    pub fn whole(&self) -> u64 {
        self.whole
    }

    pub fn numerator(&self) -> u64 {
        self.numerator
    }

    pub fn denominator(&self) -> u64 {
        self.denominator
    }
}

impl fmt::Display for MixedNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.numerator == 0 {
            write!(f, "{}", self.whole)
        } else if self.whole == 0 {
            write!(f, "{}/{}", self.numerator, self.denominator)
        } else {
            write!(f, "{} {}/{}", self.whole, self.numerator, self.denominator)
        }
    }
}

/// How a rendered value relates to the true measurement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mark {
    /// Close enough to the mark to cut on it
    Exact,
    /// Slightly over the mark
    Strong,
    /// Slightly under the mark
    Shy,
}

impl Mark {
    /// Shop suffix for this mark
    pub fn suffix(self) -> &'static str {
        match self {
            Mark::Exact => "",
            Mark::Strong => "+",
            Mark::Shy => "-",
        }
    }
}

/// Nearest nth of `x` in shop notation, with strong/shy indication.
///
/// # Errors
///
/// * `CabError::InvalidMeasurement` if `x` is negative, NaN or infinite
/// * `CabError::InvalidInput` if `n` is zero
///
/// # Example
///
/// ```rust
/// use cabinet_core::dimension::dimstr_nths;
///
/// assert_eq!(dimstr_nths(0.3, 8).unwrap(), "1/4+");
/// assert_eq!(dimstr_nths(17.2683, 16).unwrap(), "17 1/4+");
/// ```
pub fn dimstr_nths(x: f64, n: u32) -> CabResult<String> {
    let (value, mark) = classify(x, n)?;
    Ok(format!("{}{}", value, mark.suffix()))
}

/// [`dimstr_nths`] in sixteenths.
pub fn dimstr(x: f64) -> CabResult<String> {
    dimstr_nths(x, DEFAULT_DENOMINATOR)
}

/// Like [`dimstr`], padded so whole-number parts line up in columns.
pub fn dimstr_col(x: f64) -> CabResult<String> {
    Ok(sdalign(&dimstr(x)?))
}

/// Split `x` into its nearest lower/upper nth and choose one, with a mark.
pub fn classify(x: f64, n: u32) -> CabResult<(MixedNumber, Mark)> {
    let (nths_int, frac) = split_nths(x, n)?;
    let n = u64::from(n);
    let (i, r) = (nths_int / n, nths_int % n);
    let lower = MixedNumber::new(i, r, n);
    let upper = MixedNumber::new(i, r + 1, n);

    let choice = if frac < 0.25 {
        (lower, Mark::Exact)
    } else if frac < 0.5 {
        (lower, Mark::Strong)
    } else if frac == 0.5 {
        if nths_int % 2 == 0 {
            (lower, Mark::Strong)
        } else {
            (upper, Mark::Shy)
        }
    } else if frac <= 0.75 {
        (upper, Mark::Shy)
    } else {
        (upper, Mark::Exact)
    };
    Ok(choice)
}

/// Nominal stock thickness of `x`: nearest quarter inch, no strong/shy mark.
///
/// A value exactly halfway between two quarters goes to the even one.
///
/// ```rust
/// use cabinet_core::dimension::thickness_str;
///
/// assert_eq!(thickness_str(0.74).unwrap(), "3/4");
/// assert_eq!(thickness_str(1.48).unwrap(), "1 1/2");
/// ```
pub fn thickness_str(x: f64) -> CabResult<String> {
    let n = THICKNESS_DENOMINATOR;
    let (nths_int, frac) = split_nths(x, n)?;
    let n = u64::from(n);
    let (i, r) = (nths_int / n, nths_int % n);
    let rounded_up = frac > 0.5 || (frac == 0.5 && nths_int % 2 != 0);
    let value = if rounded_up {
        MixedNumber::new(i, r + 1, n)
    } else {
        MixedNumber::new(i, r, n)
    };
    Ok(value.to_string())
}

/// Indent a single-digit measurement so it lines up under double digits.
///
/// ```text
/// 22 3/8                   22 3/8
///  8 3/4    rather than    8 3/4
///  4                       4
/// ```
pub fn sdalign(s: &str) -> String {
    let mut chars = s.chars();
    let first = chars.next();
    let second = chars.next();
    if first.is_some() && (second.is_none() || second == Some(' ')) {
        format!(" {}", s)
    } else {
        s.to_string()
    }
}

/// Whole nths in `x * n` and the fractional remainder in `[0, 1)`.
fn split_nths(x: f64, n: u32) -> CabResult<(u64, f64)> {
    if n == 0 {
        return Err(CabError::invalid_input(
            "n",
            "0",
            "Denominator must be at least 1",
        ));
    }
    if !x.is_finite() {
        return Err(CabError::invalid_measurement(x, "value is not finite"));
    }
    if x < 0.0 {
        return Err(CabError::invalid_measurement(
            x,
            "negative measurements have no shop notation",
        ));
    }
    let nths = x * f64::from(n);
    if nths >= MAX_EXACT_NTHS {
        return Err(CabError::invalid_measurement(
            x,
            format!("too large to express in 1/{}\" units", n),
        ));
    }
    let whole = nths.floor();
    Ok((whole as u64, nths - whole))
}

fn gcd(mut a: u64, mut b: u64) -> u64 {
    while b != 0 {
        let t = a % b;
        a = b;
        b = t;
    }
    a
}
