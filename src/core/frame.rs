/*
 * Defines the frame model the filter predicates operate on. A `FrameInfo` is
 * one aggregated stack-frame entry from a CPU profile: the class and method
 * that identify it, the thread it was sampled on (when the profile retains
 * that), and its total/self time shares.
 */

#[derive(Debug, Clone, PartialEq)]
pub struct FrameInfo {
    class_name: String,
    method_name: String,
    // Precomputed "<class>.<method>" so string filters over the full name
    // do not allocate per frame.
    full_name: String,
    thread_name: Option<String>,
    total_share: f64,
    self_share: f64,
}

impl FrameInfo {
    pub fn new(
        class_name: impl Into<String>,
        method_name: impl Into<String>,
        thread_name: Option<String>,
    ) -> Self {
        let class_name = class_name.into();
        let method_name = method_name.into();
        let full_name = format!("{class_name}.{method_name}");
        FrameInfo {
            class_name,
            method_name,
            full_name,
            thread_name,
            total_share: 0.0,
            self_share: 0.0,
        }
    }

    /*
     * Sets the total and self time shares, expressed as fractions in [0, 1].
     * Builder-style so profile construction reads naturally.
     */
    pub fn with_shares(mut self, total_share: f64, self_share: f64) -> Self {
        self.total_share = total_share;
        self.self_share = self_share;
        self
    }

    pub fn class_name(&self) -> &str {
        &self.class_name
    }

    pub fn method_name(&self) -> &str {
        &self.method_name
    }

    // The fully qualified name, "<class>.<method>".
    pub fn full_name(&self) -> &str {
        &self.full_name
    }

    pub fn thread_name(&self) -> Option<&str> {
        self.thread_name.as_deref()
    }

    pub fn total_share(&self) -> f64 {
        self.total_share
    }

    pub fn self_share(&self) -> f64 {
        self.self_share
    }
}

#[cfg(test)]
mod tests {
    use super::FrameInfo;

    #[test]
    fn test_frame_info_full_name_is_precomputed() {
        let frame = FrameInfo::new("com.foo.Widget", "render", None);
        assert_eq!(frame.full_name(), "com.foo.Widget.render");
        assert_eq!(frame.class_name(), "com.foo.Widget");
        assert_eq!(frame.method_name(), "render");
        assert!(frame.thread_name().is_none());
    }

    #[test]
    fn test_frame_info_shares_default_to_zero() {
        let frame = FrameInfo::new("A", "b", Some("main".to_string()));
        assert_eq!(frame.total_share(), 0.0);
        assert_eq!(frame.self_share(), 0.0);

        let frame = frame.with_shares(0.5, 0.25);
        assert_eq!(frame.total_share(), 0.5);
        assert_eq!(frame.self_share(), 0.25);
        assert_eq!(frame.thread_name(), Some("main"));
    }
}
