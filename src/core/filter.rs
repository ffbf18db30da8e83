/*
 * The filter predicates applied to profiling frames. A `Filter` is a single
 * predicate; a `ProfileFilter` is an ordered conjunction of them. Filters
 * serialize to JSON because named filter sets are persisted as presets (see
 * `core::presets`).
 */
use super::frame::FrameInfo;
use serde::{Deserialize, Serialize};

// Selects which string attribute of a frame a `StringFilter` reads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FrameField {
    FullName,
    ClassName,
    MethodName,
    ThreadName,
}

impl FrameField {
    /*
     * Extracts the selected attribute from a frame. A frame sampled without
     * thread information yields the empty string for `ThreadName`, so string
     * filters over it simply never match such frames.
     */
    pub fn extract<'a>(&self, frame: &'a FrameInfo) -> &'a str {
        match self {
            FrameField::FullName => frame.full_name(),
            FrameField::ClassName => frame.class_name(),
            FrameField::MethodName => frame.method_name(),
            FrameField::ThreadName => frame.thread_name().unwrap_or(""),
        }
    }
}

// How a `StringFilter` compares the extracted attribute to its value.
// Comparisons are case-sensitive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ComparisonMode {
    Contains,
    StartsWith,
    EndsWith,
    Equals,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StringFilter {
    mode: ComparisonMode,
    field: FrameField,
    value: String,
}

impl StringFilter {
    pub fn new(mode: ComparisonMode, field: FrameField, value: impl Into<String>) -> Self {
        StringFilter {
            mode,
            field,
            value: value.into(),
        }
    }

    pub fn mode(&self) -> ComparisonMode {
        self.mode
    }

    pub fn field(&self) -> FrameField {
        self.field
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn accepts(&self, frame: &FrameInfo) -> bool {
        let target = self.field.extract(frame);
        match self.mode {
            ComparisonMode::Contains => target.contains(&self.value),
            ComparisonMode::StartsWith => target.starts_with(&self.value),
            ComparisonMode::EndsWith => target.ends_with(&self.value),
            ComparisonMode::Equals => target == self.value,
        }
    }
}

// Which time share a `TimeShareFilter` inspects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TimeShareScope {
    TotalTime,
    SelfTime,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ShareComparison {
    AtLeast,
    AtMost,
}

/*
 * Keeps or drops frames based on how large their time share is. Typically
 * used to hide frames below a noise threshold, e.g. "self time at least 1%".
 */
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimeShareFilter {
    scope: TimeShareScope,
    comparison: ShareComparison,
    threshold: f64,
}

impl TimeShareFilter {
    pub fn new(scope: TimeShareScope, comparison: ShareComparison, threshold: f64) -> Self {
        TimeShareFilter {
            scope,
            comparison,
            threshold,
        }
    }

    pub fn accepts(&self, frame: &FrameInfo) -> bool {
        let share = match self.scope {
            TimeShareScope::TotalTime => frame.total_share(),
            TimeShareScope::SelfTime => frame.self_share(),
        };
        match self.comparison {
            ShareComparison::AtLeast => share >= self.threshold,
            ShareComparison::AtMost => share <= self.threshold,
        }
    }
}

// A single filter predicate over a profiling frame.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Filter {
    String(StringFilter),
    TimeShare(TimeShareFilter),
}

impl Filter {
    pub fn accepts(&self, frame: &FrameInfo) -> bool {
        match self {
            Filter::String(f) => f.accepts(frame),
            Filter::TimeShare(f) => f.accepts(frame),
        }
    }
}

/*
 * An ordered conjunction of filters. A frame is accepted only if every child
 * filter accepts it; the empty conjunction accepts every frame, so a default
 * `ProfileFilter` is a match-all.
 */
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProfileFilter {
    filters: Vec<Filter>,
}

impl ProfileFilter {
    pub fn new(filters: Vec<Filter>) -> Self {
        ProfileFilter { filters }
    }

    pub fn filters(&self) -> &[Filter] {
        &self.filters
    }

    pub fn accepts(&self, frame: &FrameInfo) -> bool {
        self.filters.iter().all(|f| f.accepts(frame))
    }
}
