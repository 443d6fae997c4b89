//! Missing-value placeholder and per-type sentinels
//!
//! A cell whose entire text is [`MISSING_PLACEHOLDER`] is stored as the
//! sentinel of its column's type rather than parsed.

/// Cell text denoting a missing value (as in NetCDF CDL)
pub const MISSING_PLACEHOLDER: &str = "_";

/// Sentinel stored for a missing integer
pub const MISSING_INT: i64 = -2_147_483_647;

/// Sentinel stored for a missing floating-point value
pub const MISSING_FLOAT: f64 = -3.368_795_3e38;

/// Sentinel stored for a missing string or datetime
pub const MISSING_STRING: &str = "MISSING*";

/// Types that have a reserved missing-value sentinel
pub trait MissingValue: Sized {
    /// The sentinel for this type
    fn missing() -> Self;

    /// Whether `self` is the sentinel
    fn is_missing(&self) -> bool;
}

impl MissingValue for i64 {
    fn missing() -> Self {
        MISSING_INT
    }

    fn is_missing(&self) -> bool {
        *self == MISSING_INT
    }
}

impl MissingValue for f64 {
    fn missing() -> Self {
        MISSING_FLOAT
    }

    fn is_missing(&self) -> bool {
        *self == MISSING_FLOAT
    }
}

impl MissingValue for String {
    fn missing() -> Self {
        MISSING_STRING.to_string()
    }

    fn is_missing(&self) -> bool {
        self == MISSING_STRING
    }
}

/// Whether a raw cell is the missing placeholder (full-cell match only)
pub fn is_placeholder(cell: &str) -> bool {
    cell == MISSING_PLACEHOLDER
}
