use serde::{Deserialize, Serialize};

/// The only action variant the executor recognizes today.
pub const ACTION_AGENT: &str = "Agent";

/// Required parameter of the `Agent` action.
pub const PARAM_QUERY: &str = "query";

/// Single name/value parameter of a task.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskParam {
    pub name: String,
    pub value: String,
}

/// A declared unit of work with a step id, action, parameters and
/// dependencies on earlier steps. Immutable once constructed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    /// Positive step id, unique across the task set.
    pub step: u32,

    /// Tag identifying the kind of work.
    pub action: String,

    /// Ordered name/value parameters.
    #[serde(default)]
    pub param: Vec<TaskParam>,

    /// Step ids this task depends on, in declared order.
    #[serde(default)]
    pub dependencies: Option<Vec<u32>>,
}

impl Task {
    pub fn new(step: u32, action: impl Into<String>) -> Self {
        Self {
            step,
            action: action.into(),
            param: Vec::new(),
            dependencies: None,
        }
    }

    pub fn with_param(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.param.push(TaskParam {
            name: name.into(),
            value: value.into(),
        });
        self
    }

    pub fn with_dependencies(mut self, deps: Vec<u32>) -> Self {
        self.dependencies = Some(deps);
        self
    }

    /// Declared dependency ids; an absent set reads as empty.
    pub fn dependency_ids(&self) -> &[u32] {
        self.dependencies.as_deref().unwrap_or(&[])
    }

    /// Value of the first parameter with the given name.
    pub fn find_param(&self, name: &str) -> Option<&str> {
        self.param
            .iter()
            .find(|p| p.name == name)
            .map(|p| p.value.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_task_deserializes_contract_fields() {
        let json = r#"{
            "step": 2,
            "action": "Agent",
            "param": [{"name": "query", "value": "find flour"}],
            "dependencies": [1]
        }"#;

        let task: Task = serde_json::from_str(json).unwrap();
        assert_eq!(task.step, 2);
        assert_eq!(task.action, ACTION_AGENT);
        assert_eq!(task.find_param(PARAM_QUERY), Some("find flour"));
        assert_eq!(task.dependency_ids(), &[1]);
    }

    #[test]
    fn test_task_defaults_for_missing_fields() {
        let json = r#"{"step": 1, "action": "Agent"}"#;
        let task: Task = serde_json::from_str(json).unwrap();
        assert!(task.param.is_empty());
        assert!(task.dependencies.is_none());
        assert!(task.dependency_ids().is_empty());
    }
}
