//! Reserved query keywords
//!
//! None of these may be used as a tag name on an idea.

pub const WITHOUT: &str = "WITHOUT";

pub const CONTAINS: &str = "CONTAINS";
pub const CONTAINS_CI: &str = "CONTAINS-CI";
pub const NO_CONTAINS: &str = "NO-CONTAINS";
pub const NO_CONTAINS_CI: &str = "NO-CONTAINS-CI";

pub const DATE: &str = "DATE";
pub const DATES: &str = "DATES";
pub const YEAR: &str = "YEAR";
pub const EDIT_DATE: &str = "EDIT-DATE";
pub const EDIT_DATES: &str = "EDIT-DATES";
pub const CONSUMED_DATE: &str = "CONSUMED-DATE";
pub const CONSUMED_DATES: &str = "CONSUMED-DATES";

pub const ALL: &str = "ALL";
pub const ALL_CONSUMED: &str = "ALL-CONSUMED";
pub const ALL_ZOMBIE: &str = "ALL-ZOMBIE";

pub const RESERVED: &[&str] = &[
    WITHOUT,
    CONTAINS,
    CONTAINS_CI,
    NO_CONTAINS,
    NO_CONTAINS_CI,
    DATE,
    DATES,
    YEAR,
    EDIT_DATE,
    EDIT_DATES,
    CONSUMED_DATE,
    CONSUMED_DATES,
    ALL,
    ALL_CONSUMED,
    ALL_ZOMBIE,
];

pub fn is_reserved(name: &str) -> bool {
    RESERVED.contains(&name)
}
