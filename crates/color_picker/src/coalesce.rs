/// Identifies one scheduled next-frame flush.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FrameTicket(u64);

/// Collapses bursts of pointer updates into one update per frame.
///
/// `push` keeps only the latest value. It hands out a [`FrameTicket`] the
/// first time a value arrives with no frame scheduled, and the caller is
/// expected to schedule exactly one next-frame callback that calls
/// [`FrameCoalescer::flush`] with that ticket.
#[derive(Debug)]
pub struct FrameCoalescer<T> {
    pending: Option<T>,
    scheduled: Option<FrameTicket>,
    generation: u64,
}

impl<T> Default for FrameCoalescer<T> {
    fn default() -> Self {
        Self {
            pending: None,
            scheduled: None,
            generation: 0,
        }
    }
}

impl<T> FrameCoalescer<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, value: T) -> Option<FrameTicket> {
        self.pending = Some(value);
        if self.scheduled.is_some() {
            return None;
        }

        self.generation = self.generation.wrapping_add(1);
        let ticket = FrameTicket(self.generation);
        self.scheduled = Some(ticket);
        Some(ticket)
    }

    /// Takes the pending value, `None` when `ticket` is no longer current.
    pub fn flush(&mut self, ticket: FrameTicket) -> Option<T> {
        if self.scheduled != Some(ticket) {
            return None;
        }
        self.scheduled = None;
        self.pending.take()
    }

    pub fn cancel(&mut self) {
        self.pending = None;
        self.scheduled = None;
    }

    pub fn is_scheduled(&self) -> bool {
        self.scheduled.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn many_pushes_share_one_ticket_and_keep_the_last_value() {
        let mut coalescer = FrameCoalescer::new();
        let ticket = coalescer.push(1).unwrap();
        assert_eq!(coalescer.push(2), None);
        assert_eq!(coalescer.push(3), None);
        assert!(coalescer.is_scheduled());

        assert_eq!(coalescer.flush(ticket), Some(3));
        assert!(!coalescer.is_scheduled());
        assert_eq!(coalescer.flush(ticket), None);
    }

    #[test]
    fn next_push_after_flush_schedules_again() {
        let mut coalescer = FrameCoalescer::new();
        let first = coalescer.push("a").unwrap();
        coalescer.flush(first);

        let second = coalescer.push("b").unwrap();
        assert_ne!(first, second);
        assert_eq!(coalescer.flush(second), Some("b"));
    }

    #[test]
    fn cancel_invalidates_outstanding_ticket() {
        let mut coalescer = FrameCoalescer::new();
        let stale = coalescer.push(10).unwrap();
        coalescer.cancel();
        assert!(!coalescer.is_scheduled());
        assert_eq!(coalescer.flush(stale), None);

        // A frame scheduled before the cancel must not consume a newer value.
        let fresh = coalescer.push(20).unwrap();
        assert_eq!(coalescer.flush(stale), None);
        assert_eq!(coalescer.flush(fresh), Some(20));
    }
}
