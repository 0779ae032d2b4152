//! Request sequencing for responses that may arrive out of order.
//!
//! Every request takes a monotonic token. A response is applied only when
//! its token is the latest one issued and newer than the last one applied,
//! so the last-issued request wins.

/// Token handed out when a request is issued.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RequestToken(u64);

impl RequestToken {
    pub fn value(self) -> u64 {
        self.0
    }
}

#[derive(Debug, Default)]
pub struct RequestSequencer {
    issued: u64,
    applied: u64,
}

impl RequestSequencer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn issue(&mut self) -> RequestToken {
        self.issued += 1;
        RequestToken(self.issued)
    }

    /// True when no newer request has been issued since `token`.
    pub fn is_current(&self, token: RequestToken) -> bool {
        token.0 == self.issued
    }

    /// Marks `token` as applied if its response should be used.
    pub fn accept(&mut self, token: RequestToken) -> bool {
        if token.0 == self.issued && token.0 > self.applied {
            self.applied = token.0;
            true
        } else {
            false
        }
    }

    pub fn last_applied(&self) -> Option<RequestToken> {
        (self.applied > 0).then_some(RequestToken(self.applied))
    }
}

/// A value slot that only takes responses accepted by its sequencer.
#[derive(Debug)]
pub struct Latest<T> {
    sequencer: RequestSequencer,
    value: Option<T>,
}

impl<T> Default for Latest<T> {
    fn default() -> Self {
        Self {
            sequencer: RequestSequencer::default(),
            value: None,
        }
    }
}

impl<T> Latest<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn issue(&mut self) -> RequestToken {
        self.sequencer.issue()
    }

    /// Stores `value` if `token` is accepted; returns whether it was.
    pub fn offer(&mut self, token: RequestToken, value: T) -> bool {
        let accepted = self.sequencer.accept(token);
        if accepted {
            self.value = Some(value);
        }
        accepted
    }

    pub fn get(&self) -> Option<&T> {
        self.value.as_ref()
    }

    pub fn take(&mut self) -> Option<T> {
        self.value.take()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stale_response_is_dropped() {
        let mut latest = Latest::new();
        let first = latest.issue();
        let second = latest.issue();
        assert!(!latest.offer(first, "old"));
        assert!(latest.offer(second, "new"));
        assert_eq!(latest.get(), Some(&"new"));
    }

    #[test]
    fn a_token_applies_once() {
        let mut sequencer = RequestSequencer::new();
        let token = sequencer.issue();
        assert!(sequencer.accept(token));
        assert!(!sequencer.accept(token));
        assert_eq!(sequencer.last_applied(), Some(token));
    }

    #[test]
    fn late_reply_after_newer_issue_is_rejected() {
        let mut sequencer = RequestSequencer::new();
        let first = sequencer.issue();
        assert!(sequencer.is_current(first));
        let _second = sequencer.issue();
        assert!(!sequencer.is_current(first));
        assert!(!sequencer.accept(first));
        assert_eq!(sequencer.last_applied(), None);
    }
}
