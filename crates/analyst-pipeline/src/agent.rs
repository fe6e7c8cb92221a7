//! Agent descriptor

use crate::tool::TickerTool;
use std::sync::Arc;

/// A named role with a goal and persona description
///
/// Immutable once constructed; owned by the pipeline for the duration of one
/// report generation. The descriptor's role/goal/backstory are rendered into
/// the run's system message in agent-list order.
#[derive(Clone)]
pub struct AgentSpec {
    /// Short role name (e.g. "Stock Analyst")
    pub role: String,

    /// What the agent is trying to achieve
    pub goal: String,

    /// Persona description guiding the model's behavior
    pub backstory: String,

    /// Tools this agent may draw data from
    pub tools: Vec<Arc<dyn TickerTool>>,

    /// Whether the agent may delegate work to other agents
    pub allow_delegation: bool,
}

impl AgentSpec {
    /// Create an agent descriptor with no tools and delegation disabled
    pub fn new(
        role: impl Into<String>,
        goal: impl Into<String>,
        backstory: impl Into<String>,
    ) -> Self {
        Self {
            role: role.into(),
            goal: goal.into(),
            backstory: backstory.into(),
            tools: Vec::new(),
            allow_delegation: false,
        }
    }

    /// Bind tools to this agent
    pub fn with_tools(mut self, tools: Vec<Arc<dyn TickerTool>>) -> Self {
        self.tools = tools;
        self
    }

    /// Allow or forbid delegation
    pub fn with_delegation(mut self, allow: bool) -> Self {
        self.allow_delegation = allow;
        self
    }
}

impl std::fmt::Debug for AgentSpec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AgentSpec")
            .field("role", &self.role)
            .field("goal", &self.goal)
            .field("backstory", &self.backstory)
            .field("tools", &self.tools.iter().map(|t| t.name()).collect::<Vec<_>>())
            .field("allow_delegation", &self.allow_delegation)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_agent_construction() {
        let agent = AgentSpec::new("Analyst", "Analyze stocks", "An experienced analyst");
        assert_eq!(agent.role, "Analyst");
        assert_eq!(agent.goal, "Analyze stocks");
        assert_eq!(agent.backstory, "An experienced analyst");
        assert!(agent.tools.is_empty());
        assert!(!agent.allow_delegation);
    }

    #[test]
    fn test_delegation_flag() {
        let agent = AgentSpec::new("Lead", "Coordinate", "A lead analyst").with_delegation(true);
        assert!(agent.allow_delegation);
    }
}
