use std::collections::BTreeMap;

/// Dishes served on a given day. Keys are dish names, values are always empty
/// and are kept so callers can attach their own annotations (votes, notes).
pub type Menu = BTreeMap<String, String>;
