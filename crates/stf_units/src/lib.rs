//! # STF Unit Suffixes
//!
//! Numeric values in STF files may carry a unit suffix glued to the number, e.g. `60mph`,
//! `2.5bar` or `220kN#est`. This crate splits such a literal into its number and suffix and
//! looks the suffix up in a closed table per **quantity family**, yielding the conversion
//! into the family's canonical unit.
//!
//! ## Families
//!
//! | Family                 | Canonical unit | Example suffixes                   |
//! |------------------------|----------------|------------------------------------|
//! | `MASS`                 | kg             | `kg`, `lb`, `t`, `t-uk`, `t-us`    |
//! | `DISTANCE`             | m              | `m`, `cm`, `mm`, `km`, `ft`, `in`  |
//! | `SPEED`                | m/s            | `mph`, `kph`, `km/h`, `ft/s`       |
//! | `PRESSURE_DEFAULT_PSI` | psi            | `psi`, `bar`, `inhg`, `kpa`        |
//! | `POWER`                | W              | `w`, `kw`, `hp`                    |
//! | `FORCE`                | N              | `n`, `kn`, `lbf`                   |
//! | `TIME`                 | s              | `s`, `m`, `h`                      |
//! | `TEMPERATURE`          | °C             | `degc`, `degf`                     |
//!
//! Families named `*_DEFAULT_*` use the same canonical unit, but assume a different unit
//! for values written without any suffix. See [`Units`] for the full list.
//!
//! ## Lookup rules
//!
//! - Families are bit flags; a caller may accept several at once.
//! - Families are probed in bit order and the first one that knows the suffix wins.
//! - A missing suffix uses the family default and is only a problem when
//!   [`Units::COMPULSORY`] is set.
//! - Suffixes are matched case-insensitively, anything after a `#` is ignored.
//!

pub mod error;
pub mod family;
pub mod parse;
mod table;

#[cfg(feature = "serde")]
mod serde_impl;

pub use family::Units;
pub use parse::{parse_unit_suffix, Conversion, UnitIssue, UnitParse};
