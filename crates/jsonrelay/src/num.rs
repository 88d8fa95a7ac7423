//! Number scan records and their materialization.

use std::fmt;

use bigdecimal::BigDecimal;
use num_bigint::BigInt;
use num_traits::ToPrimitive;

/// Digits of significance the native accumulators are trusted with.
pub(crate) const DEC_MAX: u32 = 14;
/// Decimal exponent magnitude beyond which the big path is taken.
pub(crate) const EXP_MAX: i32 = 1023;

/// Accumulators filled by the number scanner.
///
/// `i` holds the integer digits, `num` over `div` the fraction, and `exp`
/// the signed decimal exponent. `big` is sticky: once precision or magnitude
/// exceeds native limits the number is committed to the arbitrary-precision
/// path and the accumulators stop being authoritative — materialization then
/// works from the original text instead.
#[derive(Debug, Clone, Copy)]
pub struct NumInfo {
    pub i: i64,
    pub num: i64,
    pub div: i64,
    pub exp: i32,
    /// Significant digit count, excluding trailing zeros.
    pub dec_cnt: u32,
    pub big: bool,
    pub infinity: bool,
    pub nan: bool,
    pub neg: bool,
    /// Client preference: render escalated decimals as native floats.
    pub no_big: bool,
}

impl NumInfo {
    pub(crate) fn new(no_big: bool) -> Self {
        Self {
            i: 0,
            num: 0,
            div: 1,
            exp: 0,
            dec_cnt: 0,
            big: false,
            infinity: false,
            nan: false,
            neg: false,
            no_big,
        }
    }
}

/// A scanned number: the accumulators plus the original textual form.
///
/// `text` aliases the reader's protected window for the duration of the
/// delivery callback, so the big paths can parse the source digits directly
/// without re-lexing.
#[derive(Debug, Clone, Copy)]
pub struct Num<'a> {
    pub info: NumInfo,
    pub text: &'a str,
}

impl Num<'_> {
    /// Maps the scan record to a domain number: non-finite flags first, then
    /// integer against decimal, native against arbitrary precision.
    pub fn as_number(&self) -> Number {
        let ni = &self.info;
        if ni.infinity {
            return Number::Float(if ni.neg {
                f64::NEG_INFINITY
            } else {
                f64::INFINITY
            });
        }
        if ni.nan {
            return Number::Float(f64::NAN);
        }
        let text = self.text.strip_prefix('+').unwrap_or(self.text);
        if ni.div == 1 && ni.exp == 0 {
            if ni.big {
                let end = text.find(['.', 'e', 'E']).unwrap_or(text.len());
                if let Ok(b) = text[..end].parse() {
                    return Number::BigInt(b);
                }
            }
            return Number::Integer(if ni.neg { -ni.i } else { ni.i });
        }
        if ni.big {
            if let Some(dec) = parse_big_decimal(text) {
                return if ni.no_big {
                    Number::Float(dec.to_f64().unwrap_or(f64::NAN))
                } else {
                    Number::BigDecimal(dec)
                };
            }
        }
        let mut d = ni.i as f64 + ni.num as f64 / ni.div as f64;
        if ni.neg {
            d = -d;
        }
        if ni.exp != 0 {
            d *= 10f64.powi(ni.exp);
        }
        Number::Float(d)
    }
}

/// Degenerate lenient forms with no digits at all fall back to the native
/// accumulators in the caller.
fn parse_big_decimal(text: &str) -> Option<BigDecimal> {
    if let Ok(dec) = text.parse() {
        return Some(dec);
    }
    // forms such as "1.e5" leave a dot with no fraction digits behind it
    let bytes = text.as_bytes();
    let cleaned: String = bytes
        .iter()
        .enumerate()
        .filter(|&(idx, &b)| {
            !(b == b'.' && bytes.get(idx + 1).is_none_or(|n| !n.is_ascii_digit()))
        })
        .map(|(_, &b)| b as char)
        .collect();
    cleaned.parse().ok()
}

/// A materialized numeric value.
#[derive(Debug, Clone, PartialEq)]
pub enum Number {
    Integer(i64),
    Float(f64),
    BigInt(BigInt),
    BigDecimal(BigDecimal),
}

impl Number {
    /// Numeric value as `f64`, lossy for the big variants.
    pub fn as_f64(&self) -> f64 {
        match self {
            Number::Integer(i) => *i as f64,
            Number::Float(v) => *v,
            Number::BigInt(b) => b.to_f64().unwrap_or(f64::NAN),
            Number::BigDecimal(d) => d.to_f64().unwrap_or(f64::NAN),
        }
    }
}

impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Number::Integer(i) => write!(f, "{i}"),
            Number::Float(v) => {
                if v.is_nan() {
                    f.write_str("NaN")
                } else if v.is_infinite() {
                    f.write_str(if *v < 0.0 { "-Infinity" } else { "Infinity" })
                } else {
                    write!(f, "{v}")
                }
            }
            Number::BigInt(b) => write!(f, "{b}"),
            Number::BigDecimal(d) => write!(f, "{d}"),
        }
    }
}
