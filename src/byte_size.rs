use std::{fmt, str::FromStr};

use serde::Deserialize;
use thiserror::Error;

const BINARY_BASE: u64 = 1024;
const DECIMAL_BASE: u64 = 1000;

#[derive(Debug, Error, PartialEq)]
pub enum ByteSizeError {
    #[error("size must be a non-negative number, got {0}")]
    InvalidArgument(f64),

    #[error("{0} bytes does not fit in 64 bits")]
    OutOfRange(f64),

    #[error("{0} is not a valid unit. Use one of the following values: B, kB, MB, GB, TB, PB.")]
    UnknownUnit(String),
}

/// Display units, ordered so that the ordinal is the power of the base.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Deserialize)]
#[serde(try_from = "String")]
pub enum ByteUnit {
    #[default]
    B,
    KB,
    MB,
    GB,
    TB,
    PB,
}

impl ByteUnit {
    pub const ALL: [ByteUnit; 6] = [
        ByteUnit::B,
        ByteUnit::KB,
        ByteUnit::MB,
        ByteUnit::GB,
        ByteUnit::TB,
        ByteUnit::PB,
    ];

    pub fn ordinal(self) -> u32 {
        self as u32
    }

    /// Ordinals past `PB` clamp to `PB`.
    pub fn from_ordinal(ordinal: u32) -> Self {
        let idx = (ordinal as usize).min(Self::ALL.len() - 1);
        Self::ALL[idx]
    }

    pub fn symbol(self) -> &'static str {
        match self {
            ByteUnit::B => "B",
            ByteUnit::KB => "kB",
            ByteUnit::MB => "MB",
            ByteUnit::GB => "GB",
            ByteUnit::TB => "TB",
            ByteUnit::PB => "PB",
        }
    }
}

impl fmt::Display for ByteUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.symbol())
    }
}

impl FromStr for ByteUnit {
    type Err = ByteSizeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "b" => Ok(ByteUnit::B),
            "kb" => Ok(ByteUnit::KB),
            "mb" => Ok(ByteUnit::MB),
            "gb" => Ok(ByteUnit::GB),
            "tb" => Ok(ByteUnit::TB),
            "pb" => Ok(ByteUnit::PB),
            _ => Err(ByteSizeError::UnknownUnit(s.to_string())),
        }
    }
}

impl TryFrom<String> for ByteUnit {
    type Error = ByteSizeError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// A byte count plus the unit it was expressed in.
///
/// The count is always stored as whole bytes. `unit` only records how the
/// value was handed in; formatting picks the largest unit that keeps the
/// integer part non-zero. `binary` selects a base of 1024 over 1000 and is
/// fixed for the lifetime of the value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ByteSize {
    raw_bytes: u64,
    unit: ByteUnit,
    binary: bool,
}

impl ByteSize {
    pub fn new(raw_bytes: u64, unit: ByteUnit, binary: bool) -> Self {
        Self {
            raw_bytes,
            unit,
            binary,
        }
    }

    /// Raw bytes with 1024-based scaling.
    pub fn from_bytes(raw_bytes: u64) -> Self {
        Self::new(raw_bytes, ByteUnit::B, true)
    }

    /// Raw bytes with 1000-based scaling.
    pub fn decimal(raw_bytes: u64) -> Self {
        Self::new(raw_bytes, ByteUnit::B, false)
    }

    /// Builds a size from a value expressed in `unit`, e.g. `1.5` MB.
    ///
    /// The byte count is `round(value * base^unit)`. Negative, non-finite or
    /// too large values are rejected rather than clamped.
    pub fn from_display(value: f64, unit: ByteUnit, binary: bool) -> Result<Self, ByteSizeError> {
        if !value.is_finite() || value < 0.0 {
            return Err(ByteSizeError::InvalidArgument(value));
        }
        let base = if binary { BINARY_BASE } else { DECIMAL_BASE };
        let bytes = (value * scale(base, unit)).round();
        // u64::MAX as f64 rounds up to 2^64, the first value that doesn't fit
        if bytes >= u64::MAX as f64 {
            return Err(ByteSizeError::OutOfRange(bytes));
        }
        Ok(Self::new(bytes as u64, unit, binary))
    }

    pub fn raw_bytes(&self) -> u64 {
        self.raw_bytes
    }

    pub fn unit(&self) -> ByteUnit {
        self.unit
    }

    pub fn is_binary(&self) -> bool {
        self.binary
    }

    pub fn base(&self) -> u64 {
        if self.binary {
            BINARY_BASE
        } else {
            DECIMAL_BASE
        }
    }

    /// `floor(log_base(raw_bytes))` clamped to `[B, PB]`.
    pub fn largest_unit(&self) -> ByteUnit {
        // log(0) is undefined
        if self.raw_bytes == 0 {
            return ByteUnit::B;
        }

        let base = self.base();
        let mut scaled = self.raw_bytes;
        let mut ordinal = 0;
        while scaled >= base && ordinal < ByteUnit::PB.ordinal() {
            scaled /= base;
            ordinal += 1;
        }
        ByteUnit::from_ordinal(ordinal)
    }

    /// Size in `target` units, rounded to two decimals.
    pub fn converted_value(&self, target: ByteUnit) -> f64 {
        if target == ByteUnit::B {
            return self.raw_bytes as f64;
        }
        let value = self.raw_bytes as f64 / scale(self.base(), target);
        (value * 100.0).round() / 100.0
    }

    pub fn display_value(&self) -> f64 {
        self.converted_value(self.largest_unit())
    }
}

impl fmt::Display for ByteSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.display_value(), self.largest_unit())
    }
}

fn scale(base: u64, unit: ByteUnit) -> f64 {
    (base as f64).powi(unit.ordinal() as i32)
}
