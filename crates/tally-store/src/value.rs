use std::time::{Duration, Instant};

/// A stored payload with an optional absolute expiry instant.
///
/// Expiry is measured on the monotonic clock. A value without an expiry
/// never expires; a value whose expiry instant has been reached is expired.
/// Checking expiry has no side effects: erasing expired values is the
/// owning collection's job.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExpirableValue {
    payload: String,
    expiry: Option<Instant>,
}

impl ExpirableValue {
    /// A value that never expires.
    pub fn new(payload: impl Into<String>) -> Self {
        Self {
            payload: payload.into(),
            expiry: None,
        }
    }

    /// The stored payload.
    pub fn payload(&self) -> &str {
        &self.payload
    }

    /// Replace the payload, keeping the expiry setting.
    pub fn set_payload(&mut self, payload: impl Into<String>) {
        self.payload = payload.into();
    }

    /// The expiry instant, if one is set.
    pub fn expires_at(&self) -> Option<Instant> {
        self.expiry
    }

    /// Set (or replace) the expiry to `seconds` from now.
    ///
    /// Zero or negative values place the expiry at or before now, so the
    /// value is already expired on its next access.
    pub fn set_expiry(&mut self, seconds: i32) {
        self.expiry = expiry_from(Instant::now(), seconds);
    }

    /// Returns `true` once the expiry instant has been reached.
    pub fn is_expired(&self) -> bool {
        self.is_expired_at(Instant::now())
    }

    /// Expiry check against an explicit instant.
    pub fn is_expired_at(&self, now: Instant) -> bool {
        match self.expiry {
            Some(expiry) => now >= expiry,
            None => false,
        }
    }
}

/// Compute `now + seconds`.
///
/// A positive offset past the clock's range means "never"; a negative one
/// past the start of the clock clamps to `now`, which still reads as expired.
fn expiry_from(now: Instant, seconds: i32) -> Option<Instant> {
    let offset = Duration::from_secs(u64::from(seconds.unsigned_abs()));
    if seconds >= 0 {
        now.checked_add(offset)
    } else {
        Some(now.checked_sub(offset).unwrap_or(now))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_value_never_expires() {
        let v = ExpirableValue::new("1");
        assert_eq!(v.payload(), "1");
        assert!(v.expires_at().is_none());
        assert!(!v.is_expired());
        assert!(!v.is_expired_at(Instant::now() + Duration::from_secs(86_400)));
    }

    #[test]
    fn negative_expiry_is_immediately_expired() {
        let mut v = ExpirableValue::new("x");
        v.set_expiry(-1);
        assert!(v.is_expired());
    }

    #[test]
    fn zero_expiry_is_expired_on_next_access() {
        let mut v = ExpirableValue::new("x");
        v.set_expiry(0);
        assert!(v.is_expired());
    }

    #[test]
    fn positive_expiry_is_in_the_future() {
        let mut v = ExpirableValue::new("x");
        v.set_expiry(60);
        assert!(!v.is_expired());
        let at = v.expires_at().unwrap();
        assert!(v.is_expired_at(at));
        assert!(!v.is_expired_at(at - Duration::from_secs(1)));
    }

    #[test]
    fn set_payload_keeps_expiry() {
        let mut v = ExpirableValue::new("old");
        v.set_expiry(30);
        let at = v.expires_at();
        v.set_payload("new");
        assert_eq!(v.payload(), "new");
        assert_eq!(v.expires_at(), at);
    }

    #[test]
    fn set_expiry_replaces_previous() {
        let mut v = ExpirableValue::new("x");
        v.set_expiry(-5);
        assert!(v.is_expired());
        v.set_expiry(3600);
        assert!(!v.is_expired());
    }

    #[test]
    fn extreme_offsets_do_not_panic() {
        let now = Instant::now();
        assert!(expiry_from(now, i32::MIN).is_some_and(|at| at <= now));
        if let Some(at) = expiry_from(now, i32::MAX) {
            assert!(at > now);
        }
    }
}
