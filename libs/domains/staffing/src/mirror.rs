//! Client-side snapshot of the three collections.
//!
//! A [`Mirror`] is loaded wholesale and replaced after every mutation. Each
//! transition consumes nothing and returns a fresh value.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::models::{Assignment, Engineer, EngineerFilter, Project};
use crate::relations::{self, EngineerStats};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Mirror {
    pub projects: Vec<Project>,
    pub engineers: Vec<Engineer>,
    pub assignments: Vec<Assignment>,
}

impl Mirror {
    pub fn new(
        projects: Vec<Project>,
        engineers: Vec<Engineer>,
        assignments: Vec<Assignment>,
    ) -> Self {
        Self {
            projects,
            engineers,
            assignments,
        }
    }

    /// Inserts `project`, or replaces the record with the same id in place.
    pub fn with_project(&self, project: Project) -> Self {
        let mut next = self.clone();
        match next.projects.iter_mut().find(|p| p.id == project.id) {
            Some(slot) => *slot = project,
            None => next.projects.push(project),
        }
        next
    }

    pub fn with_engineer(&self, engineer: Engineer) -> Self {
        let mut next = self.clone();
        match next.engineers.iter_mut().find(|e| e.id == engineer.id) {
            Some(slot) => *slot = engineer,
            None => next.engineers.push(engineer),
        }
        next
    }

    /// Drops the project and every link that references it.
    pub fn without_project(&self, id: Uuid) -> Self {
        Self {
            projects: self.projects.iter().filter(|p| p.id != id).cloned().collect(),
            engineers: self.engineers.clone(),
            assignments: self
                .assignments
                .iter()
                .filter(|a| a.project_id != id)
                .cloned()
                .collect(),
        }
    }

    /// Drops the engineer and every link that references it.
    pub fn without_engineer(&self, id: Uuid) -> Self {
        Self {
            projects: self.projects.clone(),
            engineers: self.engineers.iter().filter(|e| e.id != id).cloned().collect(),
            assignments: self
                .assignments
                .iter()
                .filter(|a| a.engineer_id != id)
                .cloned()
                .collect(),
        }
    }

    /// Applies the outcome of a membership sync.
    pub fn with_links(&self, removed: &[Uuid], added: &[Assignment]) -> Self {
        let removed: HashSet<&Uuid> = removed.iter().collect();
        let mut next = self.clone();
        next.assignments.retain(|a| !removed.contains(&a.id));
        next.assignments.extend_from_slice(added);
        next
    }

    pub fn engineers_for_project(&self, project_id: Uuid) -> Vec<&Engineer> {
        relations::engineers_for_project(project_id, &self.assignments, &self.engineers)
    }

    pub fn projects_for_engineer(&self, engineer_id: Uuid) -> Vec<&Project> {
        relations::projects_for_engineer(engineer_id, &self.assignments, &self.projects)
    }

    pub fn filtered_engineers(&self, filter: EngineerFilter) -> Vec<&Engineer> {
        relations::filtered_engineers(&self.engineers, &self.assignments, filter)
    }

    pub fn engineer_stats(&self) -> EngineerStats {
        relations::engineer_stats(&self.engineers, &self.assignments)
    }

    pub fn projects_by_priority(&self) -> Vec<&Project> {
        relations::projects_by_priority(&self.projects)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{
        EngineerDraft, NewAssignment, ProjectDraft, ProjectPriority, ProjectStatus,
    };
    use crate::reconcile::{Anchor, reconcile};

    fn project(name: &str) -> Project {
        Project::new(ProjectDraft {
            name: name.to_string(),
            status: ProjectStatus::Planning,
            priority: ProjectPriority::P3,
            description: None,
        })
    }

    fn engineer(name: &str) -> Engineer {
        Engineer::new(EngineerDraft {
            name: name.to_string(),
            role: "QA Engineer".to_string(),
        })
    }

    fn apply(mirror: &Mirror, anchor: Anchor, desired: &[Uuid]) -> Mirror {
        let plan = reconcile(anchor, &mirror.assignments, desired);
        let removed: Vec<Uuid> = plan.to_remove.iter().map(|l| l.id).collect();
        let added: Vec<Assignment> = plan.to_add.into_iter().map(Assignment::new).collect();
        mirror.with_links(&removed, &added)
    }

    #[test]
    fn test_transitions_leave_the_original_untouched() {
        let before = Mirror::default();
        let after = before.with_project(project("Portal"));

        assert!(before.projects.is_empty());
        assert_eq!(after.projects.len(), 1);
    }

    #[test]
    fn test_with_project_replaces_by_id() {
        let p = project("Portal");
        let mut renamed = p.clone();
        renamed.name = "Portal v2".to_string();

        let mirror = Mirror::default()
            .with_project(project("Other"))
            .with_project(p)
            .with_project(renamed);

        assert_eq!(mirror.projects.len(), 2);
        assert_eq!(mirror.projects[1].name, "Portal v2");
    }

    #[test]
    fn test_create_then_reassign_scenario() {
        let p = project("Portal");
        let (e1, e2) = (engineer("Ana"), engineer("Ben"));
        let mirror = Mirror::default()
            .with_project(p.clone())
            .with_engineer(e1.clone())
            .with_engineer(e2.clone());

        let assigned = apply(&mirror, Anchor::Project(p.id), &[e1.id, e2.id]);
        assert_eq!(assigned.engineers_for_project(p.id).len(), 2);

        let reassigned = apply(&assigned, Anchor::Project(p.id), &[e2.id]);
        let members = reassigned.engineers_for_project(p.id);
        assert_eq!(members.len(), 1);
        assert_eq!(members[0].id, e2.id);
        assert_eq!(reassigned.assignments.len(), 1);
    }

    #[test]
    fn test_without_project_cascades_links() {
        let (p, other) = (project("Portal"), project("Gateway"));
        let (e1, e2) = (engineer("Ana"), engineer("Ben"));
        let mirror = Mirror::new(
            vec![p.clone(), other.clone()],
            vec![e1.clone(), e2.clone()],
            vec![
                Assignment::new(NewAssignment {
                    project_id: p.id,
                    engineer_id: e1.id,
                }),
                Assignment::new(NewAssignment {
                    project_id: p.id,
                    engineer_id: e2.id,
                }),
                Assignment::new(NewAssignment {
                    project_id: other.id,
                    engineer_id: e2.id,
                }),
            ],
        );

        let next = mirror.without_project(p.id);

        assert!(next.engineers_for_project(p.id).is_empty());
        assert!(next.projects_for_engineer(e1.id).is_empty());
        assert_eq!(next.projects_for_engineer(e2.id)[0].id, other.id);
        assert_eq!(next.engineer_stats().available, 1);
    }

    #[test]
    fn test_without_engineer_cascades_links() {
        let p = project("Portal");
        let e = engineer("Ana");
        let mirror = Mirror::new(
            vec![p.clone()],
            vec![e.clone()],
            vec![Assignment::new(NewAssignment {
                project_id: p.id,
                engineer_id: e.id,
            })],
        );

        let next = mirror.without_engineer(e.id);

        assert!(next.engineers.is_empty());
        assert!(next.assignments.is_empty());
        assert_eq!(mirror.assignments.len(), 1);
    }
}
