pub mod common;
pub mod create;
pub mod inspect_abi;

pub use self::common::*;
pub use self::create::*;
pub use self::inspect_abi::*;

/// Drops anything forge prints after the JSON document
fn strip_non_json(s: &str) -> &str {
    if let Some(last_closing_brace) = s.rfind(['}', ']']) {
        &s[..=last_closing_brace]
    } else {
        s
    }
}
