//! Fixed-point JSON numbers.
//!
//! Digits are folded into an unsigned mantissa as they arrive. The position of
//! the decimal point and the exponent are kept as separate counters so no
//! floating-point work happens while parsing; [`Number::to_f64`] performs the
//! conversion only when asked.
//!
//! Fraction digits use a zero-run deferral: a run of `0` digits only bumps a
//! counter, and is folded into the mantissa once a non-zero digit follows.
//! Trailing zeros therefore never cost mantissa capacity, and once the
//! mantissa is saturated further fraction digits are dropped rather than
//! reported as an overflow.

use core::fmt;

use crate::{ParseError, ParserOptions};

/// A JSON number as `mantissa × sign × 10^(exponent − decimals)`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(any(test, feature = "serde"), derive(serde::Serialize))]
pub struct Number {
    mantissa: u64,
    decimals: u16,
    #[cfg_attr(any(test, feature = "serde"), serde(skip))]
    zeros: u16,
    exponent: u16,
    negative: bool,
    exponent_negative: bool,
}

impl Number {
    /// The unsigned significant digits.
    #[must_use]
    pub const fn mantissa(&self) -> u64 {
        self.mantissa
    }

    /// How many of the mantissa digits sit after the decimal point.
    #[must_use]
    pub const fn decimals(&self) -> u16 {
        self.decimals
    }

    /// The signed decimal exponent written after `e`/`E` (`0` if absent).
    #[must_use]
    pub const fn exponent(&self) -> i32 {
        if self.exponent_negative {
            -(self.exponent as i32)
        } else {
            self.exponent as i32
        }
    }

    /// Whether the number carried a leading `-`.
    #[must_use]
    pub const fn is_negative(&self) -> bool {
        self.negative
    }

    /// The power of ten the mantissa is scaled by.
    #[must_use]
    pub const fn scale(&self) -> i32 {
        self.exponent() - self.decimals as i32
    }

    /// Converts to the nearest `f64`.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn to_f64(&self) -> f64 {
        let magnitude = self.mantissa as f64;
        let scale = self.scale();
        let value = if self.mantissa == 0 {
            0.0
        } else if scale >= 0 {
            magnitude * pow10(scale.unsigned_abs())
        } else {
            // A single divisor past 1e308 is infinite and would flush
            // subnormal results to zero.
            let scale = scale.unsigned_abs();
            let first = scale.min(MAX_F64_POW10);
            magnitude / pow10(first) / pow10(scale - first)
        };
        if self.negative { -value } else { value }
    }

    /// The exact integer value, if the number is integral and fits an `i64`.
    #[must_use]
    pub fn to_i64(&self) -> Option<i64> {
        let scale = self.scale();
        let magnitude = if scale >= 0 {
            let factor = 10u64.checked_pow(scale.unsigned_abs())?;
            self.mantissa.checked_mul(factor)?
        } else {
            let Some(divisor) = 10u64.checked_pow(scale.unsigned_abs()) else {
                return (self.mantissa == 0).then_some(0);
            };
            if self.mantissa % divisor != 0 {
                return None;
            }
            self.mantissa / divisor
        };
        if self.negative {
            0i64.checked_sub_unsigned(magnitude)
        } else {
            i64::try_from(magnitude).ok()
        }
    }

    fn push_fraction_digit(&mut self, digit: u8, max: u64) -> Result<(), ParseError> {
        if self.mantissa > max / 10 {
            // Saturated: nothing after this point can be represented.
            return Ok(());
        }
        self.zeros = self
            .zeros
            .checked_add(1)
            .ok_or(ParseError::NumberOverflow)?;
        if digit == 0 {
            return Ok(());
        }
        while self.zeros > 0 {
            if self.mantissa > max / 10 {
                return Ok(());
            }
            self.decimals = self
                .decimals
                .checked_add(1)
                .ok_or(ParseError::NumberOverflow)?;
            self.mantissa *= 10;
            self.zeros -= 1;
        }
        if let Some(mantissa) = self
            .mantissa
            .checked_add(u64::from(digit))
            .filter(|m| *m <= max)
        {
            self.mantissa = mantissa;
        }
        Ok(())
    }

    fn push_exponent_digit(&mut self, digit: u8, max: u16) -> Result<(), ParseError> {
        let exponent = accumulate(u64::from(self.exponent), digit, u64::from(max))?;
        self.exponent = u16::try_from(exponent).map_err(|_| ParseError::NumberOverflow)?;
        Ok(())
    }
}

impl fmt::Display for Number {
    /// Renders the exact fixed-point value, e.g. `-1230004567e-7`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.negative {
            f.write_str("-")?;
        }
        write!(f, "{}", self.mantissa)?;
        match self.scale() {
            0 => Ok(()),
            scale => write!(f, "e{scale}"),
        }
    }
}

/// Largest power of ten representable as a finite `f64`.
const MAX_F64_POW10: u32 = 308;

fn pow10(mut exp: u32) -> f64 {
    let mut base = 10.0_f64;
    let mut acc = 1.0_f64;
    while exp > 0 {
        if exp & 1 == 1 {
            acc *= base;
        }
        base *= base;
        exp >>= 1;
    }
    acc
}

/// `acc * 10 + digit`, failing once the result would exceed `max`.
fn accumulate(acc: u64, digit: u8, max: u64) -> Result<u64, ParseError> {
    if acc > max / 10 {
        return Err(ParseError::NumberOverflow);
    }
    match (acc * 10).checked_add(u64::from(digit)) {
        Some(value) if value <= max => Ok(value),
        _ => Err(ParseError::NumberOverflow),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum NumberState {
    Sign,
    FirstDigit,
    Integer,
    Zero,
    FractionFirst,
    Fraction,
    ExponentFirst,
    ExponentSign,
    Exponent,
}

/// What the lexer should do after handing one octet to the number decoder.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum NumberStep {
    /// Octet consumed.
    Continue,
    /// Octet not consumed yet; dispatch it again.
    Replay,
    /// Octet terminates the number and belongs to whatever follows it.
    Complete,
}

/// Octet-driven sub-machine recognizing one JSON number.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct NumberDecoder {
    state: NumberState,
    value: Number,
}

impl NumberDecoder {
    pub(crate) const fn new() -> Self {
        Self {
            state: NumberState::Sign,
            value: Number {
                mantissa: 0,
                decimals: 0,
                zeros: 0,
                exponent: 0,
                negative: false,
                exponent_negative: false,
            },
        }
    }

    /// The decoded number. A pending zero run is trailing and does not belong
    /// to the value.
    pub(crate) const fn value(&self) -> Number {
        let mut value = self.value;
        value.zeros = 0;
        value
    }

    pub(crate) fn step(
        &mut self,
        octet: u8,
        options: &ParserOptions,
    ) -> Result<NumberStep, ParseError> {
        use NumberState as S;

        let digit = octet.is_ascii_digit().then(|| octet - b'0');
        match (self.state, digit) {
            (S::Sign, None) if octet == b'-' => {
                self.value.negative = true;
                self.state = S::FirstDigit;
            }
            (S::Sign, Some(_)) => {
                self.state = S::FirstDigit;
                return Ok(NumberStep::Replay);
            }
            (S::FirstDigit, Some(0)) => self.state = S::Zero,
            (S::FirstDigit, Some(d)) => {
                self.value.mantissa = accumulate(0, d, options.max_mantissa)?;
                self.state = S::Integer;
            }
            (S::Integer, Some(d)) => {
                self.value.mantissa = accumulate(self.value.mantissa, d, options.max_mantissa)?;
            }
            (S::FractionFirst | S::Fraction, Some(d)) => {
                self.value.push_fraction_digit(d, options.max_mantissa)?;
                self.state = S::Fraction;
            }
            (S::ExponentFirst, None) if matches!(octet, b'+' | b'-') => {
                self.value.exponent_negative = octet == b'-';
                self.state = S::ExponentSign;
            }
            (S::ExponentFirst | S::ExponentSign | S::Exponent, Some(d)) => {
                self.value.push_exponent_digit(d, options.max_exponent)?;
                self.state = S::Exponent;
            }
            (S::Integer | S::Zero, _) if octet == b'.' => self.state = S::FractionFirst,
            (S::Integer | S::Zero | S::Fraction, _) if matches!(octet, b'e' | b'E') => {
                self.state = S::ExponentFirst;
            }
            // A digit after a leading zero starts a separate token.
            (S::Integer | S::Zero | S::Fraction | S::Exponent, _) => {
                return Ok(NumberStep::Complete);
            }
            (
                S::Sign | S::FirstDigit | S::FractionFirst | S::ExponentFirst | S::ExponentSign,
                _,
            ) => return Err(ParseError::MalformedNumber),
        }
        Ok(NumberStep::Continue)
    }
}
