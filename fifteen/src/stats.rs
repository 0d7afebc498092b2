use std::ops::AddAssign;

/// Observer of IDA* search progress.
///
/// The solver reports every state it touches: [`expanded`](Self::expanded) for
/// states whose children are generated, [`leaf`](Self::leaf) for goal hits and
/// threshold cutoffs. `leaf` may return `false` to abandon the search early;
/// an abandoned search finishes as if its space were exhausted. This is the
/// cooperative cancellation hook — the plain solve entry point never cancels.
pub trait SearchObserver {
    /// Called at each goal or cutoff state; return `false` to abandon the search.
    #[inline(always)]
    fn leaf(&mut self) -> bool {
        true
    }

    /// Called for each state whose children are generated.
    #[inline(always)]
    fn expanded(&mut self) {}
}

/// Observer that ignores all events.
impl SearchObserver for () {}

/// Plain visit counter.
impl SearchObserver for u64 {
    #[inline(always)]
    fn leaf(&mut self) -> bool {
        *self += 1;
        true
    }

    #[inline(always)]
    fn expanded(&mut self) {
        *self += 1;
    }
}

/// Separate counts of expanded and leaf states.
#[derive(Default, Copy, Clone, Debug)]
pub struct SearchCounts {
    pub expanded: u64,
    pub leaves: u64,
}

impl SearchCounts {
    pub fn visits(&self) -> u64 {
        self.expanded + self.leaves
    }
}

impl AddAssign for SearchCounts {
    fn add_assign(&mut self, rhs: Self) {
        self.expanded += rhs.expanded;
        self.leaves += rhs.leaves;
    }
}

impl SearchObserver for SearchCounts {
    #[inline(always)]
    fn leaf(&mut self) -> bool {
        self.leaves += 1;
        true
    }

    #[inline(always)]
    fn expanded(&mut self) {
        self.expanded += 1;
    }
}

/// Counting observer that abandons the search once `limit` states were visited.
pub struct NodeBudget {
    pub counts: SearchCounts,
    pub limit: u64,
}

impl NodeBudget {
    pub fn with_limit(limit: u64) -> Self {
        Self {
            counts: SearchCounts::default(),
            limit,
        }
    }

    pub fn visits(&self) -> u64 {
        self.counts.visits()
    }

    pub fn reset(&mut self, limit: u64) {
        self.counts = SearchCounts::default();
        self.limit = limit;
    }
}

impl SearchObserver for NodeBudget {
    #[inline(always)]
    fn leaf(&mut self) -> bool {
        if self.visits() >= self.limit {
            return false;
        }
        self.counts.leaves += 1;
        true
    }

    #[inline(always)]
    fn expanded(&mut self) {
        self.counts.expanded += 1;
    }
}
