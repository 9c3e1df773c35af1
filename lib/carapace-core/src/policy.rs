//! Status classification policy.
//!
//! Decides whether a received response's status code should raise. The
//! default raises on everything outside 2xx; wrap it with [`AllowStatuses`]
//! to treat selected codes (a 404 "not found", say) as ordinary outcomes.

/// Decides whether a response status should raise an error.
pub trait StatusPolicy: Send + Sync {
    /// Returns `true` if a response with this status is exception-worthy.
    fn is_error(&self, status: u16) -> bool;
}

/// Default policy: every non-2xx status is an error.
#[derive(Debug, Clone, Copy, Default)]
pub struct ErrorOnNonSuccess;

impl StatusPolicy for ErrorOnNonSuccess {
    fn is_error(&self, status: u16) -> bool {
        !(200..300).contains(&status)
    }
}

/// Policy that exempts an explicit list of statuses from the default rule.
///
/// # Example
///
/// ```
/// use carapace_core::{AllowStatuses, StatusPolicy};
///
/// let policy = AllowStatuses::new([404]);
/// assert!(!policy.is_error(404));
/// assert!(policy.is_error(500));
/// ```
#[derive(Debug, Clone, Default)]
pub struct AllowStatuses {
    allowed: Vec<u16>,
}

impl AllowStatuses {
    /// Create a policy exempting the given statuses.
    #[must_use]
    pub fn new(allowed: impl IntoIterator<Item = u16>) -> Self {
        Self {
            allowed: allowed.into_iter().collect(),
        }
    }

    /// Exempt one more status.
    #[must_use]
    pub fn allow(mut self, status: u16) -> Self {
        self.allowed.push(status);
        self
    }
}

impl StatusPolicy for AllowStatuses {
    fn is_error(&self, status: u16) -> bool {
        ErrorOnNonSuccess.is_error(status) && !self.allowed.contains(&status)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn non_success_is_error() {
        let policy = ErrorOnNonSuccess;
        assert!(!policy.is_error(200));
        assert!(!policy.is_error(204));
        assert!(!policy.is_error(299));
        assert!(policy.is_error(301));
        assert!(policy.is_error(404));
        assert!(policy.is_error(500));
    }

    #[test]
    fn redirection_is_classified_once_as_error() {
        // The bundled transport does not resolve redirects, so a 3xx reaches
        // the policy exactly once and raises under the default rule.
        let policy = ErrorOnNonSuccess;
        assert!(policy.is_error(302));
        assert!(policy.is_error(304));
    }

    #[test]
    fn allow_statuses_exempts_listed() {
        let policy = AllowStatuses::new([404]).allow(410);
        assert!(!policy.is_error(404));
        assert!(!policy.is_error(410));
        assert!(policy.is_error(400));
        assert!(policy.is_error(500));
        // Success stays non-error regardless of the list
        assert!(!policy.is_error(200));
    }
}
