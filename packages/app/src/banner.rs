// ABOUTME: Single error and info banners; most recent message wins, no queue

/// The two user-visible message slots.
///
/// Exactly one error and one informational banner exist at a time. A
/// successful mutation clears the error and sets the info message; a failure
/// overwrites the error. There is no retry affordance and no history.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Banners {
    error: Option<String>,
    info: Option<String>,
}

impl Banners {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a failure; overwrites any previous error
    pub fn fail(&mut self, message: impl Into<String>) {
        self.error = Some(message.into());
    }

    /// Record a success; clears the error and overwrites any previous info
    pub fn succeed(&mut self, message: impl Into<String>) {
        self.error = None;
        self.info = Some(message.into());
    }

    /// Record a non-fatal note without touching the error slot
    pub fn note(&mut self, message: impl Into<String>) {
        self.info = Some(message.into());
    }

    /// Reset both slots, e.g. when starting a new form submission
    pub fn clear(&mut self) {
        self.error = None;
        self.info = None;
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn info(&self) -> Option<&str> {
        self.info.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn most_recent_error_wins() {
        let mut banners = Banners::new();
        banners.fail("first");
        banners.fail("second");
        assert_eq!(banners.error(), Some("second"));
    }

    #[test]
    fn success_clears_error_and_sets_info() {
        let mut banners = Banners::new();
        banners.fail("boom");
        banners.succeed("Task created");
        assert_eq!(banners.error(), None);
        assert_eq!(banners.info(), Some("Task created"));
    }

    #[test]
    fn note_leaves_error_in_place() {
        let mut banners = Banners::new();
        banners.fail("boom");
        banners.note("Only owner or senior can load users.");
        assert_eq!(banners.error(), Some("boom"));
        assert_eq!(banners.info(), Some("Only owner or senior can load users."));
    }
}
