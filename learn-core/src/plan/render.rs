//! Recursive plan renderer
//!
//! Rendering walks the subject tree in array order. Each rendered node
//! has its own [`NodeView`] holding the show/hide state of its resources
//! and exercises; both start hidden.

use std::fmt::Write as _;

use crate::{Error, Result};

use super::model::{NodePath, Subject};

/// Show/hide state for one rendered subject
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NodeView {
    pub show_resources: bool,
    pub show_exercises: bool,
    /// Views of the nested subjects, same order as `Subject::subjects`
    pub children: Vec<NodeView>,
}

impl NodeView {
    /// Build a hidden view mirroring the shape of `subject`
    pub fn for_subject(subject: &Subject) -> Self {
        Self {
            show_resources: false,
            show_exercises: false,
            children: subject.subjects.iter().map(NodeView::for_subject).collect(),
        }
    }

    fn set_all(&mut self, visible: bool) {
        self.show_resources = visible;
        self.show_exercises = visible;
        for child in &mut self.children {
            child.set_all(visible);
        }
    }
}

/// View state for a whole plan tree
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PlanView {
    root: NodeView,
}

impl PlanView {
    pub fn new(subject: &Subject) -> Self {
        Self {
            root: NodeView::for_subject(subject),
        }
    }

    pub fn root(&self) -> &NodeView {
        &self.root
    }

    /// View of the node at `path`, if it exists
    pub fn node(&self, path: &NodePath) -> Option<&NodeView> {
        path.indices()
            .iter()
            .try_fold(&self.root, |node, &idx| node.children.get(idx))
    }

    fn node_mut(&mut self, path: &NodePath) -> Result<&mut NodeView> {
        let mut node = &mut self.root;
        for &idx in path.indices() {
            node = node
                .children
                .get_mut(idx)
                .ok_or_else(|| Error::InvalidPath(path.to_string()))?;
        }
        Ok(node)
    }

    /// Flip the resources list of the node at `path`, returning the new state
    pub fn toggle_resources(&mut self, path: &NodePath) -> Result<bool> {
        let node = self.node_mut(path)?;
        node.show_resources = !node.show_resources;
        Ok(node.show_resources)
    }

    /// Flip the exercises list of the node at `path`, returning the new state
    pub fn toggle_exercises(&mut self, path: &NodePath) -> Result<bool> {
        let node = self.node_mut(path)?;
        node.show_exercises = !node.show_exercises;
        Ok(node.show_exercises)
    }

    pub fn expand_all(&mut self) {
        self.root.set_all(true);
    }

    pub fn collapse_all(&mut self) {
        self.root.set_all(false);
    }
}

/// What a rendered line represents
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind {
    /// Subject label
    Heading,
    Description,
    Reason,
    /// Show/hide control for the resources list
    ResourcesControl,
    Resource,
    /// Show/hide control for the exercises list
    ExercisesControl,
    Exercise,
    /// Placeholder for subjects below the depth cap
    Truncated,
}

/// One line of rendered output
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedLine {
    /// Nesting level of the subject this line belongs to (root is 0)
    pub depth: usize,
    /// Path of the subject this line belongs to
    pub path: NodePath,
    pub kind: LineKind,
    pub text: String,
}

/// Renders a subject tree as indented text
#[derive(Debug, Clone)]
pub struct Renderer {
    /// Spaces per nesting level
    pub indent: usize,
    /// Subjects nested deeper than this are summarized instead of rendered
    pub max_depth: usize,
}

impl Default for Renderer {
    fn default() -> Self {
        Self {
            indent: 2,
            max_depth: 32,
        }
    }
}

impl Renderer {
    pub fn new(indent: usize, max_depth: usize) -> Self {
        Self { indent, max_depth }
    }

    /// Render `subject` into structured lines using the toggles in `view`
    pub fn render(&self, subject: &Subject, view: &PlanView) -> Vec<RenderedLine> {
        let mut lines = Vec::new();
        self.render_node(subject, Some(view.root()), &NodePath::root(), 0, &mut lines);
        lines
    }

    /// Render `subject` as indented text
    pub fn render_text(&self, subject: &Subject, view: &PlanView) -> String {
        let mut out = String::new();
        for line in self.render(subject, view) {
            let mut pad = line.depth * self.indent;
            match line.kind {
                LineKind::Heading | LineKind::Truncated => {}
                LineKind::Resource | LineKind::Exercise => pad += 4,
                _ => pad += 2,
            }
            let _ = writeln!(out, "{:pad$}{}", "", line.text, pad = pad);
        }
        out
    }

    fn render_node(
        &self,
        subject: &Subject,
        view: Option<&NodeView>,
        path: &NodePath,
        depth: usize,
        out: &mut Vec<RenderedLine>,
    ) {
        let mut push = |kind: LineKind, text: String| {
            out.push(RenderedLine {
                depth,
                path: path.clone(),
                kind,
                text,
            })
        };

        let heading = if path.is_root() {
            subject.subject.clone()
        } else {
            format!("{} {}", path, subject.subject)
        };
        push(LineKind::Heading, heading);

        if let Some(description) = subject.description() {
            push(LineKind::Description, description.to_string());
        }
        if let Some(reason) = subject.reason() {
            push(LineKind::Reason, reason.to_string());
        }

        let show_resources = view.is_some_and(|v| v.show_resources);
        let show_exercises = view.is_some_and(|v| v.show_exercises);

        if !subject.resources.is_empty() {
            push(
                LineKind::ResourcesControl,
                control_text("Resources", subject.resources.len(), show_resources),
            );
            if show_resources {
                for resource in &subject.resources {
                    let text = if resource.description.trim().is_empty() {
                        format!("- {}", resource.title)
                    } else {
                        format!("- {}: {}", resource.title, resource.description)
                    };
                    push(LineKind::Resource, text);
                }
            }
        }

        if !subject.exercises.is_empty() {
            push(
                LineKind::ExercisesControl,
                control_text("Exercises", subject.exercises.len(), show_exercises),
            );
            if show_exercises {
                for exercise in &subject.exercises {
                    push(LineKind::Exercise, format!("- {}", exercise.description));
                }
            }
        }

        if subject.subjects.is_empty() {
            return;
        }

        if depth >= self.max_depth {
            let hidden: usize = subject.subjects.iter().map(Subject::node_count).sum();
            tracing::debug!(path = %path, hidden, "Plan deeper than render depth cap");
            out.push(RenderedLine {
                depth: depth + 1,
                path: path.clone(),
                kind: LineKind::Truncated,
                text: format!("... {} nested subject(s) not shown", hidden),
            });
            return;
        }

        for (idx, child) in subject.subjects.iter().enumerate() {
            let child_view = view.and_then(|v| v.children.get(idx));
            self.render_node(child, child_view, &path.child(idx), depth + 1, out);
        }
    }
}

fn control_text(label: &str, count: usize, visible: bool) -> String {
    if visible {
        format!("[-] {} ({})", label, count)
    } else {
        format!("[+] {} ({})", label, count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plan::{Exercise, Resource};

    fn sample() -> Subject {
        let mut child = Subject::new("Ownership");
        child.description = Some("Moves and borrows".to_string());
        child.exercises.push(Exercise {
            description: "Fix the borrow checker error".to_string(),
        });

        let mut root = Subject::new("Rust");
        root.reason = Some("Fast and safe".to_string());
        root.resources.push(Resource {
            title: "The Book".to_string(),
            description: "Official guide".to_string(),
        });
        root.resources.push(Resource {
            title: "Rustlings".to_string(),
            description: String::new(),
        });
        root.subjects.push(child);
        root
    }

    fn kinds(lines: &[RenderedLine]) -> Vec<LineKind> {
        lines.iter().map(|l| l.kind).collect()
    }

    #[test]
    fn test_parent_then_indented_child() {
        let subject = sample();
        let view = PlanView::new(&subject);
        let lines = Renderer::default().render(&subject, &view);

        let headings: Vec<&RenderedLine> =
            lines.iter().filter(|l| l.kind == LineKind::Heading).collect();
        assert_eq!(headings.len(), 2);
        assert_eq!(headings[0].text, "Rust");
        assert_eq!(headings[0].depth, 0);
        assert_eq!(headings[1].text, "1 Ownership");
        assert_eq!(headings[1].depth, 1);

        let text = Renderer::default().render_text(&subject, &view);
        let parent = text.find("Rust\n").unwrap();
        let child = text.find("  1 Ownership\n").unwrap();
        assert!(parent < child);
    }

    #[test]
    fn test_lists_hidden_by_default() {
        let subject = sample();
        let view = PlanView::new(&subject);
        let lines = Renderer::default().render(&subject, &view);

        assert_eq!(
            kinds(&lines),
            vec![
                LineKind::Heading,
                LineKind::Reason,
                LineKind::ResourcesControl,
                LineKind::Heading,
                LineKind::Description,
                LineKind::ExercisesControl,
            ]
        );
        assert_eq!(lines[2].text, "[+] Resources (2)");
    }

    #[test]
    fn test_toggle_resources_shows_all_and_back() {
        let subject = sample();
        let mut view = PlanView::new(&subject);
        let renderer = Renderer::default();

        assert!(view.toggle_resources(&NodePath::root()).unwrap());
        let lines = renderer.render(&subject, &view);
        let resources: Vec<&str> = lines
            .iter()
            .filter(|l| l.kind == LineKind::Resource)
            .map(|l| l.text.as_str())
            .collect();
        assert_eq!(resources, vec!["- The Book: Official guide", "- Rustlings"]);

        assert!(!view.toggle_resources(&NodePath::root()).unwrap());
        let lines = renderer.render(&subject, &view);
        assert!(lines.iter().all(|l| l.kind != LineKind::Resource));
    }

    #[test]
    fn test_toggle_exercises_shows_all_and_back() {
        let subject = sample();
        let mut view = PlanView::new(&subject);
        let renderer = Renderer::default();
        let child: NodePath = "1".parse().unwrap();
        let exercises = |view: &PlanView| -> Vec<String> {
            renderer
                .render(&subject, view)
                .into_iter()
                .filter(|l| l.kind == LineKind::Exercise)
                .map(|l| l.text)
                .collect()
        };

        assert!(exercises(&view).is_empty());

        assert!(view.toggle_exercises(&child).unwrap());
        assert_eq!(exercises(&view), vec!["- Fix the borrow checker error"]);

        assert!(!view.toggle_exercises(&child).unwrap());
        assert!(exercises(&view).is_empty());
    }

    #[test]
    fn test_toggles_are_per_node() {
        let subject = sample();
        let mut view = PlanView::new(&subject);
        let child: NodePath = "1".parse().unwrap();

        assert!(view.toggle_exercises(&child).unwrap());
        assert!(!view.root().show_exercises);

        let text = Renderer::default().render_text(&subject, &view);
        assert!(text.contains("    [-] Exercises (1)\n"));
        assert!(text.contains("      - Fix the borrow checker error\n"));
        assert!(text.contains("  [+] Resources (2)\n"));
    }

    #[test]
    fn test_toggle_unknown_path_fails() {
        let subject = sample();
        let mut view = PlanView::new(&subject);
        let result = view.toggle_resources(&"4.1".parse().unwrap());
        assert!(matches!(result, Err(Error::InvalidPath(_))));
    }

    #[test]
    fn test_expand_and_collapse_all() {
        let subject = sample();
        let mut view = PlanView::new(&subject);
        view.expand_all();
        let lines = Renderer::default().render(&subject, &view);
        assert_eq!(lines.iter().filter(|l| l.kind == LineKind::Resource).count(), 2);
        assert_eq!(lines.iter().filter(|l| l.kind == LineKind::Exercise).count(), 1);

        view.collapse_all();
        assert_eq!(view, PlanView::new(&subject));
    }

    #[test]
    fn test_depth_cap_truncates() {
        let mut leaf = Subject::new("level 3");
        leaf.subjects.push(Subject::new("level 4"));
        let mut mid = Subject::new("level 2");
        mid.subjects.push(leaf);
        let mut root = Subject::new("level 1");
        root.subjects.push(mid);

        let view = PlanView::new(&root);
        let lines = Renderer::new(2, 1).render(&root, &view);
        let last = lines.last().unwrap();
        assert_eq!(last.kind, LineKind::Truncated);
        assert_eq!(last.text, "... 2 nested subject(s) not shown");
        assert_eq!(
            lines.iter().filter(|l| l.kind == LineKind::Heading).count(),
            2
        );
    }

    #[test]
    fn test_view_from_other_plan_renders_hidden() {
        let subject = sample();
        let view = PlanView::default();
        let lines = Renderer::default().render(&subject, &view);
        assert!(lines
            .iter()
            .all(|l| l.kind != LineKind::Resource && l.kind != LineKind::Exercise));
    }
}
