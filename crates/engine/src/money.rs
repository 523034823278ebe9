use std::fmt;

/// Signed money amount represented as **integer minor units**.
///
/// Ledger rows store plain `i64` minor units; this wrapper exists to render
/// them as major units wherever an amount ends up in human-readable text,
/// such as the prompts sent to the advisor.
///
/// # Examples
///
/// ```rust
/// use engine::MoneyMinor;
///
/// let amount = MoneyMinor::new(12_34);
/// assert_eq!(amount.minor(), 1234);
/// assert_eq!(amount.to_string(), "12.34");
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(transparent)]
pub struct MoneyMinor(i64);

impl MoneyMinor {
    /// Creates a new amount from integer minor units.
    #[must_use]
    pub const fn new(minor: i64) -> Self {
        Self(minor)
    }

    /// Returns the raw value in minor units.
    #[must_use]
    pub const fn minor(self) -> i64 {
        self.0
    }
}

impl fmt::Display for MoneyMinor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let abs = self.0.unsigned_abs();
        let major = abs / 100;
        let minor = abs % 100;
        write!(f, "{sign}{major}.{minor:02}")
    }
}

impl From<i64> for MoneyMinor {
    fn from(value: i64) -> Self {
        Self(value)
    }
}

impl From<MoneyMinor> for i64 {
    fn from(value: MoneyMinor) -> Self {
        value.0
    }
}
