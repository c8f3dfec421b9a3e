//! Plan data model

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// A learning plan as returned in the `plan` field of the backend responses
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Plan {
    /// Backend-assigned identifier, usable with `get_plan`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// The goal the user typed
    #[serde(default)]
    pub goal: String,
    /// Root of the subject tree
    pub subject: Subject,
}

impl Plan {
    /// Parse a plan from its JSON representation
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Serialize the plan as pretty-printed JSON
    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// One node of the plan tree
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Subject {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Label of this subject
    pub subject: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Why this subject matters for the goal
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    /// Nested subjects, in learning order
    #[serde(default)]
    pub subjects: Vec<Subject>,
    #[serde(default)]
    pub resources: Vec<Resource>,
    #[serde(default)]
    pub exercises: Vec<Exercise>,
}

/// A titled reference attached to a subject
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Resource {
    pub title: String,
    #[serde(default)]
    pub description: String,
}

/// A practice item attached to a subject
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Exercise {
    pub description: String,
}

impl Subject {
    /// Create a leaf subject with only a label
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            id: None,
            subject: label.into(),
            description: None,
            reason: None,
            subjects: Vec::new(),
            resources: Vec::new(),
            exercises: Vec::new(),
        }
    }

    /// Description, treating an empty string like an absent one
    pub fn description(&self) -> Option<&str> {
        non_empty(self.description.as_deref())
    }

    /// Reason, treating an empty string like an absent one
    pub fn reason(&self) -> Option<&str> {
        non_empty(self.reason.as_deref())
    }

    /// Total number of subjects in this tree, including `self`
    pub fn node_count(&self) -> usize {
        1 + self.subjects.iter().map(Subject::node_count).sum::<usize>()
    }

    /// Depth of this tree; a leaf has depth 1
    pub fn depth(&self) -> usize {
        1 + self.subjects.iter().map(Subject::depth).max().unwrap_or(0)
    }

    /// Look up a nested subject by path
    pub fn get(&self, path: &NodePath) -> Option<&Subject> {
        path.indices()
            .iter()
            .try_fold(self, |node, &idx| node.subjects.get(idx))
    }
}

fn non_empty(s: Option<&str>) -> Option<&str> {
    s.map(str::trim).filter(|s| !s.is_empty())
}

/// Address of a node in the plan tree
///
/// Written as dot-separated, 1-based child indices (`1.2` is the second
/// child of the first child). The root is `root`, or the empty string.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct NodePath(Vec<usize>);

impl NodePath {
    /// Path of the root node
    pub fn root() -> Self {
        Self::default()
    }

    /// Path of the `index`-th (0-based) child of this node
    pub fn child(&self, index: usize) -> Self {
        let mut indices = self.0.clone();
        indices.push(index);
        Self(indices)
    }

    /// 0-based child indices from the root
    pub fn indices(&self) -> &[usize] {
        &self.0
    }

    pub fn is_root(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for NodePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            return write!(f, "root");
        }
        let parts: Vec<String> = self.0.iter().map(|i| (i + 1).to_string()).collect();
        write!(f, "{}", parts.join("."))
    }
}

impl FromStr for NodePath {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        if s.is_empty() || s.eq_ignore_ascii_case("root") {
            return Ok(Self::root());
        }

        s.split('.')
            .map(|part| match part.parse::<usize>() {
                Ok(n) if n > 0 => Ok(n - 1),
                _ => Err(Error::InvalidPath(format!(
                    "{}: expected dot-separated numbers starting at 1",
                    s
                ))),
            })
            .collect::<Result<Vec<_>>>()
            .map(Self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"{
        "id": "abc",
        "goal": "learn rust",
        "subject": {
            "subject": "Rust",
            "description": "A systems language",
            "reason": "",
            "subjects": [
                {"subject": "Ownership", "resources": [{"title": "The Book", "description": "ch. 4"}]},
                {"subject": "Traits", "exercises": [{"description": "Implement Display"}],
                 "subjects": [{"subject": "Generics"}]}
            ]
        }
    }"#;

    #[test]
    fn test_parse_plan() {
        let plan = Plan::from_json(SAMPLE).unwrap();
        assert_eq!(plan.id.as_deref(), Some("abc"));
        assert_eq!(plan.goal, "learn rust");
        assert_eq!(plan.subject.subject, "Rust");
        assert_eq!(plan.subject.subjects.len(), 2);
        assert_eq!(plan.subject.subjects[0].resources[0].title, "The Book");
        assert!(plan.subject.subjects[0].exercises.is_empty());
    }

    #[test]
    fn test_empty_reason_is_absent() {
        let plan = Plan::from_json(SAMPLE).unwrap();
        assert_eq!(plan.subject.description(), Some("A systems language"));
        assert_eq!(plan.subject.reason(), None);
    }

    #[test]
    fn test_missing_label_is_rejected() {
        let result = Plan::from_json(r#"{"goal": "x", "subject": {"description": "no label"}}"#);
        assert!(matches!(result, Err(Error::Json(_))));
    }

    #[test]
    fn test_tree_metrics() {
        let plan = Plan::from_json(SAMPLE).unwrap();
        assert_eq!(plan.subject.node_count(), 4);
        assert_eq!(plan.subject.depth(), 3);
    }

    #[test]
    fn test_identical_nodes_stay_distinct() {
        let mut root = Subject::new("root");
        root.subjects.push(Subject::new("same"));
        root.subjects.push(Subject::new("same"));
        assert_eq!(root.node_count(), 3);
    }

    #[test]
    fn test_get_by_path() {
        let plan = Plan::from_json(SAMPLE).unwrap();
        let path: NodePath = "2.1".parse().unwrap();
        assert_eq!(plan.subject.get(&path).unwrap().subject, "Generics");
        assert_eq!(plan.subject.get(&NodePath::root()).unwrap().subject, "Rust");
        assert!(plan.subject.get(&"3".parse().unwrap()).is_none());
    }

    #[test]
    fn test_node_path_parse_and_display() {
        assert!("root".parse::<NodePath>().unwrap().is_root());
        assert!("".parse::<NodePath>().unwrap().is_root());

        let path: NodePath = "1.3.2".parse().unwrap();
        assert_eq!(path.indices(), &[0, 2, 1]);
        assert_eq!(path.to_string(), "1.3.2");
        assert_eq!(NodePath::root().child(0).child(4).to_string(), "1.5");
        assert_eq!(NodePath::root().to_string(), "root");
    }

    #[test]
    fn test_node_path_rejects_garbage() {
        assert!("0".parse::<NodePath>().is_err());
        assert!("1..2".parse::<NodePath>().is_err());
        assert!("a.b".parse::<NodePath>().is_err());
    }

    #[test]
    fn test_json_round_trip_keeps_order() {
        let plan = Plan::from_json(SAMPLE).unwrap();
        let json = plan.to_json_pretty().unwrap();
        let again = Plan::from_json(&json).unwrap();
        assert_eq!(plan, again);
        let labels: Vec<&str> = again
            .subject
            .subjects
            .iter()
            .map(|s| s.subject.as_str())
            .collect();
        assert_eq!(labels, vec!["Ownership", "Traits"]);
    }
}
