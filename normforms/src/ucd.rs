//! Assigned code point oracle backed by the general category property.

use unicode_general_category::{get_general_category, GeneralCategory};

/// The general category of `c`.
pub fn category(c: char) -> GeneralCategory {
    get_general_category(c)
}

/// True unless `c` is unassigned, private use or a surrogate.
pub fn is_assigned(c: char) -> bool {
    !matches!(
        get_general_category(c),
        GeneralCategory::Unassigned | GeneralCategory::PrivateUse | GeneralCategory::Surrogate
    )
}

/// Every assigned character in ascending code point order.
pub fn assigned_chars() -> impl Iterator<Item = char> {
    // `char` ranges skip the surrogate block on their own
    ('\0'..=char::MAX).filter(|c| is_assigned(*c))
}
