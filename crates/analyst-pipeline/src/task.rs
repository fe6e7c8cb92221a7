//! Task descriptor and execution ordering

use crate::error::{PipelineError, Result};

/// A unit of work for one agent
///
/// `upstream` holds indices of tasks whose outputs become this task's prompt
/// context. Upstream edges must form a DAG; the report pipeline uses a plain
/// two-task chain.
#[derive(Debug, Clone)]
pub struct TaskSpec {
    /// Instruction for the agent
    pub description: String,

    /// Index of the responsible agent in the pipeline's agent list
    pub agent: usize,

    /// Description of the expected output (descriptor metadata; logged, not
    /// injected into the prompt)
    pub expected_output: String,

    /// Indices of upstream tasks whose results feed this task
    pub upstream: Vec<usize>,
}

impl TaskSpec {
    /// Create a task assigned to the agent at `agent` index
    pub fn new(description: impl Into<String>, agent: usize) -> Self {
        Self {
            description: description.into(),
            agent,
            expected_output: String::new(),
            upstream: Vec::new(),
        }
    }

    /// Describe the expected output
    pub fn expected_output(mut self, expected: impl Into<String>) -> Self {
        self.expected_output = expected.into();
        self
    }

    /// Declare upstream tasks whose outputs become context
    pub fn upstream(mut self, upstream: Vec<usize>) -> Self {
        self.upstream = upstream;
        self
    }
}

/// Compute a topological execution order over the upstream DAG
///
/// Ties are broken by list position so a plain chain executes in its given
/// order. Fails on out-of-range upstream references and on cycles.
pub(crate) fn topological_order(tasks: &[TaskSpec]) -> Result<Vec<usize>> {
    let n = tasks.len();

    for (idx, task) in tasks.iter().enumerate() {
        for &up in &task.upstream {
            if up >= n || up == idx {
                return Err(PipelineError::InvalidUpstream {
                    task: idx,
                    upstream: up,
                });
            }
        }
    }

    // Kahn's algorithm with list order as the tie-breaker
    let mut in_degree = vec![0_usize; n];
    let mut downstream: Vec<Vec<usize>> = vec![Vec::new(); n];
    for (idx, task) in tasks.iter().enumerate() {
        in_degree[idx] = task.upstream.len();
        for &up in &task.upstream {
            downstream[up].push(idx);
        }
    }

    let mut ready: Vec<usize> = (0..n).filter(|&i| in_degree[i] == 0).collect();
    let mut order = Vec::with_capacity(n);

    while let Some(&next) = ready.iter().min() {
        ready.retain(|&i| i != next);
        order.push(next);
        for &down in &downstream[next] {
            in_degree[down] -= 1;
            if in_degree[down] == 0 {
                ready.push(down);
            }
        }
    }

    if order.len() != n {
        return Err(PipelineError::CyclicTasks);
    }

    Ok(order)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chain_order_preserved() {
        let tasks = vec![
            TaskSpec::new("analyze", 0),
            TaskSpec::new("report", 1).upstream(vec![0]),
        ];
        assert_eq!(topological_order(&tasks).unwrap(), vec![0, 1]);
    }

    #[test]
    fn test_no_upstream_keeps_list_order() {
        let tasks = vec![TaskSpec::new("a", 0), TaskSpec::new("b", 0), TaskSpec::new("c", 0)];
        assert_eq!(topological_order(&tasks).unwrap(), vec![0, 1, 2]);
    }

    #[test]
    fn test_dependency_reorders() {
        // Task 0 depends on task 1, so 1 must run first.
        let tasks = vec![
            TaskSpec::new("summary", 0).upstream(vec![1]),
            TaskSpec::new("facts", 0),
        ];
        assert_eq!(topological_order(&tasks).unwrap(), vec![1, 0]);
    }

    #[test]
    fn test_cycle_detected() {
        let tasks = vec![
            TaskSpec::new("a", 0).upstream(vec![1]),
            TaskSpec::new("b", 0).upstream(vec![0]),
        ];
        assert!(matches!(topological_order(&tasks), Err(PipelineError::CyclicTasks)));
    }

    #[test]
    fn test_self_reference_rejected() {
        let tasks = vec![TaskSpec::new("a", 0).upstream(vec![0])];
        assert!(matches!(
            topological_order(&tasks),
            Err(PipelineError::InvalidUpstream { task: 0, upstream: 0 })
        ));
    }

    #[test]
    fn test_out_of_range_upstream_rejected() {
        let tasks = vec![TaskSpec::new("a", 0).upstream(vec![7])];
        assert!(matches!(
            topological_order(&tasks),
            Err(PipelineError::InvalidUpstream { task: 0, upstream: 7 })
        ));
    }
}
