/// Default number of hex digits shown after the `g` marker.
pub const DEFAULT_ABBREV: usize = 7;
/// Default ceiling on the number of tags considered.
pub const DEFAULT_CANDIDATES: usize = 10;

/// Options for the describe search, modelled on `git describe`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DescribeOptions {
    /// Accept lightweight tags as well as annotated ones.
    pub tags: bool,
    /// Write the search trace to the diagnostics sink.
    pub debug: bool,
    /// Hex digits of the head hash to display; 0 means the default.
    pub abbrev: usize,
    /// Stop after finding more than this many tags; 0 means the default.
    pub candidates: usize,
    /// Mark appended when the working tree has uncommitted changes.
    pub dirty: String,
}

impl DescribeOptions {
    /// Replace unset (zero) fields with their defaults.
    pub fn validate(&mut self) {
        if self.abbrev == 0 {
            self.abbrev = DEFAULT_ABBREV;
        }
        if self.candidates == 0 {
            self.candidates = DEFAULT_CANDIDATES;
        }
    }

    pub fn validated(mut self) -> Self {
        self.validate();
        self
    }
}
