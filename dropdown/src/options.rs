//! Option lists and the disabled set.

use std::collections::HashSet;

/// Options that are shown but cannot be selected.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DisabledSet(HashSet<String>);

impl DisabledSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, option: &str) -> bool {
        self.0.contains(option)
    }

    pub fn insert(&mut self, option: impl Into<String>) -> bool {
        self.0.insert(option.into())
    }

    pub fn remove(&mut self, option: &str) -> bool {
        self.0.remove(option)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<S: Into<String>> FromIterator<S> for DisabledSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self(iter.into_iter().map(Into::into).collect())
    }
}

/// Candidate rows for the search variant: the options with the current
/// value left out, in host order.
///
/// Every entry equal to `value` is removed, so duplicates of the selected
/// value disappear together.
pub fn candidates<'a>(options: &'a [String], value: Option<&str>) -> Vec<&'a str> {
    options
        .iter()
        .map(String::as_str)
        .filter(|option| Some(*option) != value)
        .collect()
}

/// Whether `value` is one of `options`.
pub fn is_offered(options: &[String], value: &str) -> bool {
    options.iter().any(|option| option == value)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn opts(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn candidates_exclude_selected() {
        let options = opts(&["A", "B", "C"]);
        assert_eq!(candidates(&options, Some("B")), vec!["A", "C"]);
        assert_eq!(candidates(&options, None), vec!["A", "B", "C"]);
        assert_eq!(candidates(&options, Some("Z")), vec!["A", "B", "C"]);
    }

    #[test]
    fn disabled_set_from_strs() {
        let set: DisabledSet = ["x", "y"].into_iter().collect();
        assert!(set.contains("x"));
        assert!(!set.contains("z"));
        assert_eq!(set.len(), 2);
    }
}
