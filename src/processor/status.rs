//! Per-parse status
//!
//! Mutable state threaded through one parse: whether markup parsing is
//! suspended inside a CDATA-bodied element, and the structural adjustments
//! planned for the element start being processed.

/// A structural change required before an element start can be reported
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Adjustment {
    /// Auto-close every stack entry at this depth and above
    CloseTo(usize),
    /// Auto-open a missing ancestor
    Open(&'static str),
}

#[derive(Debug, Default)]
pub struct ParseStatus {
    /// `</name` that ends the body of the open CDATA-bodied element
    disabled_until: Option<Vec<u8>>,
    /// Plan for the current element start; empty between events
    adjustments: Vec<Adjustment>,
}

impl ParseStatus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Treat everything up to `</name` as text
    pub fn disable_parsing_until(&mut self, name: &[u8]) {
        let mut limit = Vec::with_capacity(name.len() + 2);
        limit.extend_from_slice(b"</");
        limit.extend_from_slice(name);
        self.disabled_until = Some(limit);
    }

    pub fn enable_parsing(&mut self) {
        self.disabled_until = None;
    }

    /// The sequence that re-enables parsing, while parsing is disabled
    #[inline]
    pub fn parsing_disabled_until(&self) -> Option<&[u8]> {
        self.disabled_until.as_deref()
    }

    pub fn plan(&mut self, adjustment: Adjustment) {
        self.adjustments.push(adjustment);
    }

    /// Hand the planned adjustments over, leaving the plan empty
    pub fn take_plan(&mut self) -> Vec<Adjustment> {
        std::mem::take(&mut self.adjustments)
    }

    /// Give the (drained) plan storage back for reuse
    pub fn recycle_plan(&mut self, mut storage: Vec<Adjustment>) {
        storage.clear();
        self.adjustments = storage;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_disable_and_enable() {
        let mut status = ParseStatus::new();
        assert!(status.parsing_disabled_until().is_none());
        status.disable_parsing_until(b"script");
        assert_eq!(status.parsing_disabled_until(), Some(&b"</script"[..]));
        status.enable_parsing();
        assert!(status.parsing_disabled_until().is_none());
    }

    #[test]
    fn test_plan_is_consumed_once() {
        let mut status = ParseStatus::new();
        status.plan(Adjustment::Open("html"));
        status.plan(Adjustment::CloseTo(1));
        let plan = status.take_plan();
        assert_eq!(plan, vec![Adjustment::Open("html"), Adjustment::CloseTo(1)]);
        assert!(status.take_plan().is_empty());
        status.recycle_plan(plan);
        assert!(status.take_plan().is_empty());
    }
}
