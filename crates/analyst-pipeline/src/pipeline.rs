//! Pipeline runner
//!
//! Executes tasks strictly in sequence: one non-streaming chat call per
//! task, with each task's result threaded into the prompt of the tasks that
//! depend on it. There is no parallelism and no retry; a failing call fails
//! the whole run.

use crate::error::{PipelineError, Result};
use crate::task::topological_order;
use crate::{AgentSpec, TaskSpec};
use analyst_llm::{ChatProvider, ChatRequest, Message};
use std::sync::Arc;
use tracing::{debug, info, instrument};

/// Fixed sampling parameters for every task in a run
///
/// All tasks use the same high-capability model tier; there is no per-agent
/// model selection.
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// Model identifier
    pub model: String,

    /// Sampling temperature
    pub temperature: f32,

    /// Max tokens per completion
    pub max_tokens: usize,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            model: "deepseek-reasoner".to_string(),
            temperature: 0.7,
            max_tokens: 4000,
        }
    }
}

/// Sequences tasks against their agents and returns the final task's output
pub struct Pipeline {
    provider: Arc<dyn ChatProvider>,
    config: PipelineConfig,
}

impl Pipeline {
    /// Create a pipeline with default sampling parameters
    pub fn new(provider: Arc<dyn ChatProvider>) -> Self {
        Self::with_config(provider, PipelineConfig::default())
    }

    /// Create a pipeline with explicit sampling parameters
    pub fn with_config(provider: Arc<dyn ChatProvider>, config: PipelineConfig) -> Self {
        Self { provider, config }
    }

    /// Render the run's system message from the agent descriptors
    ///
    /// The role, goal and backstory of each agent are concatenated in
    /// agent-list order. This fixed template is the only prompt scaffolding
    /// and is reused unchanged across every task of a run.
    pub fn system_prompt(agents: &[AgentSpec]) -> String {
        let mut prompt = String::from("You are a multi-agent system.\n\n");
        for agent in agents {
            prompt.push_str(&format!(
                "Agent role: {}\nGoal: {}\nBackstory: {}\n\n",
                agent.role, agent.goal, agent.backstory
            ));
        }
        prompt
    }

    /// Execute all tasks and return the final task's result text
    ///
    /// Tasks run one at a time in topological order over their upstream
    /// edges; a task with no declared upstream chains off the previous task
    /// in list order. A single-task run returns the completion content
    /// exactly, untransformed.
    #[instrument(skip_all, fields(agents = agents.len(), tasks = tasks.len()))]
    pub async fn run(&self, agents: &[AgentSpec], tasks: &[TaskSpec]) -> Result<String> {
        if tasks.is_empty() {
            return Err(PipelineError::EmptyPipeline);
        }
        for (idx, task) in tasks.iter().enumerate() {
            if task.agent >= agents.len() {
                return Err(PipelineError::UnknownAgent {
                    task: idx,
                    agent: task.agent,
                });
            }
        }

        let system = Self::system_prompt(agents);
        let order = topological_order(tasks)?;
        let mut outputs: Vec<Option<String>> = vec![None; tasks.len()];

        for idx in order {
            let task = &tasks[idx];
            let agent = &agents[task.agent];
            info!(task = idx, agent = %agent.role, "executing task");
            debug!(expected = %task.expected_output, "task expectation");

            let context = self.task_context(task, idx, &outputs);
            let user = match context {
                Some(context) => format!(
                    "Based on the following analysis:\n\n{context}\n\n\
                     Please complete the following task:\n{}",
                    task.description
                ),
                None => format!("Please complete the following task:\n{}", task.description),
            };

            let request = ChatRequest::builder(&self.config.model)
                .add_message(Message::system(&system))
                .add_message(Message::user(user))
                .temperature(self.config.temperature)
                .max_tokens(self.config.max_tokens)
                .build();

            let completion = self.provider.complete(request).await?;
            debug!(task = idx, chars = completion.content.len(), "task completed");
            outputs[idx] = Some(completion.content);
        }

        // Final output is the last task in list order
        let last = outputs
            .pop()
            .flatten()
            .ok_or(PipelineError::EmptyPipeline)?;
        Ok(last)
    }

    /// Collect the prompt context for a task from its upstream results
    fn task_context(&self, task: &TaskSpec, idx: usize, outputs: &[Option<String>]) -> Option<String> {
        if task.upstream.is_empty() {
            // Implicit chaining: a task without declared upstream reads the
            // previous task's result when one exists.
            return idx
                .checked_sub(1)
                .and_then(|prev| outputs[prev].clone());
        }

        let parts: Vec<&str> = task
            .upstream
            .iter()
            .filter_map(|&up| outputs[up].as_deref())
            .collect();
        if parts.is_empty() {
            None
        } else {
            Some(parts.join("\n\n"))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use analyst_llm::{Completion, LlmError};
    use async_trait::async_trait;
    use std::sync::Mutex;

    /// Scripted provider: returns canned results in order and records every
    /// request it receives.
    struct ScriptedProvider {
        script: Mutex<Vec<std::result::Result<String, (u16, String)>>>,
        requests: Mutex<Vec<ChatRequest>>,
    }

    impl ScriptedProvider {
        fn new(script: Vec<std::result::Result<String, (u16, String)>>) -> Self {
            Self {
                script: Mutex::new(script),
                requests: Mutex::new(Vec::new()),
            }
        }

        fn calls(&self) -> usize {
            self.requests.lock().unwrap().len()
        }

        fn request(&self, idx: usize) -> ChatRequest {
            self.requests.lock().unwrap()[idx].clone()
        }
    }

    #[async_trait]
    impl ChatProvider for ScriptedProvider {
        async fn complete(&self, request: ChatRequest) -> analyst_llm::Result<Completion> {
            self.requests.lock().unwrap().push(request);
            let mut script = self.script.lock().unwrap();
            assert!(!script.is_empty(), "provider called more times than scripted");
            match script.remove(0) {
                Ok(content) => Ok(Completion {
                    content,
                    usage: None,
                }),
                Err((status, body)) => Err(LlmError::Upstream { status, body }),
            }
        }

        fn name(&self) -> &'static str {
            "scripted"
        }
    }

    fn two_agents() -> Vec<AgentSpec> {
        vec![
            AgentSpec::new("R", "G", "B"),
            AgentSpec::new("R2", "G2", "B2"),
        ]
    }

    #[test]
    fn test_system_prompt_contains_each_field_once_in_order() {
        let prompt = Pipeline::system_prompt(&two_agents());

        for needle in ["R", "G", "B", "R2", "G2", "B2"] {
            assert_eq!(
                prompt.matches(&format!(": {needle}\n")).count(),
                1,
                "expected exactly one occurrence of {needle}"
            );
        }

        // Agent-list order is preserved
        let first = prompt.find("Agent role: R\n").unwrap();
        let second = prompt.find("Agent role: R2\n").unwrap();
        assert!(first < second);
    }

    #[tokio::test]
    async fn test_single_task_returns_content_exactly() {
        let provider = Arc::new(ScriptedProvider::new(vec![Ok("the analysis".to_string())]));
        let pipeline = Pipeline::new(provider.clone());

        let agents = vec![AgentSpec::new("Analyst", "Analyze", "Experienced")];
        let tasks = vec![TaskSpec::new("analyze AAPL", 0)];

        let result = pipeline.run(&agents, &tasks).await.unwrap();
        assert_eq!(result, "the analysis");
        assert_eq!(provider.calls(), 1);

        // First task's user message is the description alone
        let request = provider.request(0);
        assert_eq!(
            request.messages[1].content,
            "Please complete the following task:\nanalyze AAPL"
        );
    }

    #[tokio::test]
    async fn test_two_task_chain_threads_context() {
        let provider = Arc::new(ScriptedProvider::new(vec![
            Ok("FACT_A".to_string()),
            Ok("REPORT_B".to_string()),
        ]));
        let pipeline = Pipeline::new(provider.clone());

        let agents = two_agents();
        let tasks = vec![
            TaskSpec::new("analyze AAPL", 0).expected_output("analysis"),
            TaskSpec::new("write the report", 1)
                .expected_output("markdown report")
                .upstream(vec![0]),
        ];

        let result = pipeline.run(&agents, &tasks).await.unwrap();
        assert_eq!(result, "REPORT_B");
        assert_eq!(provider.calls(), 2);

        // The second prompt must contain the first task's full result text
        let second = provider.request(1);
        assert!(second.messages[1].content.contains("FACT_A"));
        assert!(second.messages[1].content.contains("write the report"));
    }

    #[tokio::test]
    async fn test_implicit_chaining_without_declared_upstream() {
        let provider = Arc::new(ScriptedProvider::new(vec![
            Ok("first out".to_string()),
            Ok("second out".to_string()),
        ]));
        let pipeline = Pipeline::new(provider.clone());

        let agents = two_agents();
        let tasks = vec![TaskSpec::new("analyze", 0), TaskSpec::new("report", 1)];

        let result = pipeline.run(&agents, &tasks).await.unwrap();
        assert_eq!(result, "second out");
        assert!(provider.request(1).messages[1].content.contains("first out"));
    }

    #[tokio::test]
    async fn test_upstream_failure_stops_the_run() {
        let provider = Arc::new(ScriptedProvider::new(vec![
            Err((500, "internal error".to_string())),
            Ok("never reached".to_string()),
        ]));
        let pipeline = Pipeline::new(provider.clone());

        let agents = two_agents();
        let tasks = vec![
            TaskSpec::new("analyze", 0),
            TaskSpec::new("report", 1).upstream(vec![0]),
        ];

        let err = pipeline.run(&agents, &tasks).await.unwrap_err();
        assert!(matches!(
            err,
            PipelineError::Execution(LlmError::Upstream { status: 500, .. })
        ));
        // The client must not be invoked a second time
        assert_eq!(provider.calls(), 1);
    }

    #[tokio::test]
    async fn test_fixed_sampling_parameters() {
        let provider = Arc::new(ScriptedProvider::new(vec![Ok("out".to_string())]));
        let pipeline = Pipeline::new(provider.clone());

        let agents = vec![AgentSpec::new("A", "G", "B")];
        let tasks = vec![TaskSpec::new("task", 0)];
        pipeline.run(&agents, &tasks).await.unwrap();

        let request = provider.request(0);
        assert_eq!(request.model, "deepseek-reasoner");
        assert!((request.temperature - 0.7).abs() < f32::EPSILON);
        assert_eq!(request.max_tokens, 4000);
        assert!(!request.stream);
    }

    #[tokio::test]
    async fn test_system_message_reused_across_tasks() {
        let provider = Arc::new(ScriptedProvider::new(vec![
            Ok("one".to_string()),
            Ok("two".to_string()),
        ]));
        let pipeline = Pipeline::new(provider.clone());

        let agents = two_agents();
        let tasks = vec![
            TaskSpec::new("analyze", 0),
            TaskSpec::new("report", 1).upstream(vec![0]),
        ];
        pipeline.run(&agents, &tasks).await.unwrap();

        assert_eq!(
            provider.request(0).messages[0].content,
            provider.request(1).messages[0].content
        );
    }

    #[tokio::test]
    async fn test_empty_pipeline_rejected() {
        let provider = Arc::new(ScriptedProvider::new(vec![]));
        let pipeline = Pipeline::new(provider);
        let err = pipeline.run(&[AgentSpec::new("A", "G", "B")], &[]).await.unwrap_err();
        assert!(matches!(err, PipelineError::EmptyPipeline));
    }

    #[tokio::test]
    async fn test_unknown_agent_rejected() {
        let provider = Arc::new(ScriptedProvider::new(vec![]));
        let pipeline = Pipeline::new(provider.clone());
        let agents = vec![AgentSpec::new("A", "G", "B")];
        let tasks = vec![TaskSpec::new("task", 3)];

        let err = pipeline.run(&agents, &tasks).await.unwrap_err();
        assert!(matches!(err, PipelineError::UnknownAgent { task: 0, agent: 3 }));
        // Validation failures never reach the provider
        assert_eq!(provider.calls(), 0);
    }
}
