/*
 * The filter specification a view controller owns: a named, ordered set of
 * filter predicates produced by the filter dialog. The specification is a
 * value; once produced it is never mutated, only replaced wholesale.
 */
use super::filter::Filter;
use serde::{Deserialize, Serialize};

/*
 * The filter categories a dialog can offer. Each concrete view declares
 * which of these its dialog should present; a call-tree view may support all
 * of them while a thread-summary view only supports `Thread`.
 */
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FilterType {
    Method,
    Thread,
    TimeShare,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FilterSpecification {
    name: Option<String>,
    filters: Vec<Filter>,
}

impl FilterSpecification {
    pub fn new(filters: Vec<Filter>) -> Self {
        FilterSpecification {
            name: None,
            filters,
        }
    }

    pub fn named(name: impl Into<String>, filters: Vec<Filter>) -> Self {
        FilterSpecification {
            name: Some(name.into()),
            filters,
        }
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn filters(&self) -> &[Filter] {
        &self.filters
    }

    // True iff the specification actually constrains anything.
    pub fn is_filtering(&self) -> bool {
        !self.filters.is_empty()
    }

    /*
     * Returns a copy of this specification carrying the given name. Used by
     * the preset manager so a specification loaded from disk always reports
     * the preset name it was stored under.
     */
    pub fn with_name(&self, name: impl Into<String>) -> Self {
        FilterSpecification {
            name: Some(name.into()),
            filters: self.filters.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::filter::{ComparisonMode, FrameField, StringFilter};

    #[test]
    fn test_default_specification_is_not_filtering() {
        let spec = FilterSpecification::default();
        assert!(!spec.is_filtering());
        assert!(spec.filters().is_empty());
        assert!(spec.name().is_none());
    }

    #[test]
    fn test_specification_with_filters_is_filtering() {
        let spec = FilterSpecification::new(vec![Filter::String(StringFilter::new(
            ComparisonMode::Contains,
            FrameField::MethodName,
            "run",
        ))]);
        assert!(spec.is_filtering());
        assert_eq!(spec.filters().len(), 1);
    }

    #[test]
    fn test_with_name_keeps_filters() {
        let spec = FilterSpecification::new(vec![Filter::String(StringFilter::new(
            ComparisonMode::Equals,
            FrameField::ThreadName,
            "main",
        ))]);
        let named = spec.with_name("hot-threads");
        assert_eq!(named.name(), Some("hot-threads"));
        assert_eq!(named.filters(), spec.filters());
    }
}
