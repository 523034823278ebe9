//! Internal helpers for model validation and conversion.
//!
//! These utilities are **not** part of the public API. They centralize
//! validation and mapping logic so the engine enforces consistent invariants.

use unicode_normalization::UnicodeNormalization;

use crate::{EngineError, ResultEngine};

/// Validate a ledger amount. Signs live on the kind, so stored amounts
/// must be strictly positive.
pub(crate) fn validate_amount_minor(amount_minor: i64) -> ResultEngine<()> {
    if amount_minor <= 0 {
        return Err(EngineError::InvalidInput(
            "amount_minor must be > 0".to_string(),
        ));
    }
    Ok(())
}

/// Normalize a category label: trim whitespace and apply Unicode NFC so
/// visually identical labels aggregate together.
pub(crate) fn normalize_category(value: &str) -> ResultEngine<String> {
    let normalized: String = value.trim().nfc().collect();
    if normalized.is_empty() {
        return Err(EngineError::InvalidInput(
            "category must not be empty".to_string(),
        ));
    }
    Ok(normalized)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_non_positive_amounts() {
        assert!(validate_amount_minor(0).is_err());
        assert!(validate_amount_minor(-5).is_err());
        assert!(validate_amount_minor(1).is_ok());
    }

    #[test]
    fn category_is_trimmed_and_composed() {
        assert_eq!(normalize_category("  Groceries ").unwrap(), "Groceries");
        // "é" as 'e' + combining acute composes to a single code point.
        assert_eq!(normalize_category("Cafe\u{0301}").unwrap(), "Caf\u{00e9}");
        assert!(normalize_category("   ").is_err());
    }
}
