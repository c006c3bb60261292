//! Heuristic classification
//!
//! Rules are evaluated in a fixed order and the first one that matches decides
//! the category. Nothing here touches the filesystem.

mod category;
mod classifier;
mod rules;

pub use category::Category;
pub use classifier::{Classification, Classifier};
pub use rules::{canonical_rules, Matcher, Rule, Subject};
