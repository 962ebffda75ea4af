//! Monotonic request tokens for derived-field fetches.

/// Issues monotonically increasing sequence numbers for outbound requests.
///
/// Each outgoing derived-field request captures a token from [`issue`];
/// when the response arrives, it is applied only if the token still matches
/// the latest issued sequence number. Responses from superseded requests
/// are dropped, so rapid input changes follow a "last request started wins"
/// discipline instead of racing.
///
/// # Example
///
/// ```
/// use leave_engine::sync::Generation;
///
/// let mut generation = Generation::new();
/// let first = generation.issue();
/// let second = generation.issue();
///
/// assert!(!generation.is_latest(first));
/// assert!(generation.is_latest(second));
/// ```
///
/// [`issue`]: Generation::issue
#[derive(Debug, Default)]
pub struct Generation {
    issued: u64,
}

impl Generation {
    /// Creates a counter with no requests issued.
    pub fn new() -> Self {
        Self::default()
    }

    /// Issues a token for a new outbound request, superseding all earlier
    /// tokens.
    pub fn issue(&mut self) -> u64 {
        self.issued += 1;
        self.issued
    }

    /// Returns true when `token` belongs to the most recently issued
    /// request.
    pub fn is_latest(&self, token: u64) -> bool {
        token == self.issued
    }
}
