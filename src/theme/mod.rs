/*!
 * Branded themes and the rule engine that applies them.
 *
 * - `catalog`: theme data and lookup with default fallback
 * - `template`: override-fragment templates for synthetic cards
 * - `transformer`: resolution, style installation, rules and overlay
 */

pub mod catalog;
pub mod template;
pub mod transformer;

pub use self::catalog::{Resolution, RuleDescriptor, Theme, ThemeCatalog, DEFAULT_THEME};
pub use self::template::OverrideTemplate;
pub use self::transformer::transform;
