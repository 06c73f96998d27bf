//! Localization overlay
//!
//! When a translation exists for the exact source string, rendering
//! switches from atlas quads to an external pre-rendered font engine at a
//! discrete scale tier. This module holds the translation table, the tier
//! classification, and the traits the external engines are reached
//! through.

pub mod font_engine;
pub mod scale_tier;
pub mod translations;

pub use font_engine::{FontEngine, FontEngineBank};
pub use scale_tier::ScaleTier;
pub use translations::TranslationTable;

/// Borrowed localization services threaded through text mutation
///
/// Passing the services explicitly keeps the lifetime and visibility of
/// the consumable override set in the caller's hands; there is no ambient
/// global dictionary.
pub struct LocaleContext<'a> {
    /// Translation dictionary plus one-shot overrides
    pub translations: &'a mut TranslationTable,
    /// External font engines indexed by scale tier
    pub fonts: &'a mut dyn FontEngineBank,
}
