/// Options controlling a single engine run.
#[derive(Debug, Clone, Default)]
pub struct ExecutionOpts {
    /// Upper bound on simultaneously running tasks within one group.
    /// `None` dispatches a whole parallel group at once.
    pub max_parallel: Option<usize>,
}
