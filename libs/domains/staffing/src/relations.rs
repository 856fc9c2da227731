//! Read-only queries over the flat project, engineer and assignment lists.
//!
//! None of these functions mutate their inputs or fail. Empty inputs produce
//! empty outputs.

use serde::Serialize;
use std::collections::HashSet;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::models::{Assignment, Engineer, EngineerFilter, Project};

/// Text shown when an engineer has no projects.
pub const NO_PROJECTS: &str = "No projects assigned";

/// Headcount summary
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, ToSchema)]
pub struct EngineerStats {
    pub total: usize,
    pub assigned: usize,
    pub available: usize,
}

/// Engineers linked to `project_id`, in `engineers` order.
pub fn engineers_for_project<'a>(
    project_id: Uuid,
    assignments: &[Assignment],
    engineers: &'a [Engineer],
) -> Vec<&'a Engineer> {
    let ids: HashSet<Uuid> = assignments
        .iter()
        .filter(|a| a.project_id == project_id)
        .map(|a| a.engineer_id)
        .collect();

    engineers.iter().filter(|e| ids.contains(&e.id)).collect()
}

/// Projects linked to `engineer_id`, in `projects` order.
pub fn projects_for_engineer<'a>(
    engineer_id: Uuid,
    assignments: &[Assignment],
    projects: &'a [Project],
) -> Vec<&'a Project> {
    let ids: HashSet<Uuid> = assignments
        .iter()
        .filter(|a| a.engineer_id == engineer_id)
        .map(|a| a.project_id)
        .collect();

    projects.iter().filter(|p| ids.contains(&p.id)).collect()
}

pub fn is_engineer_available(engineer_id: Uuid, assignments: &[Assignment]) -> bool {
    !assignments.iter().any(|a| a.engineer_id == engineer_id)
}

fn assigned_ids(assignments: &[Assignment]) -> HashSet<Uuid> {
    assignments.iter().map(|a| a.engineer_id).collect()
}

pub fn filtered_engineers<'a>(
    engineers: &'a [Engineer],
    assignments: &[Assignment],
    filter: EngineerFilter,
) -> Vec<&'a Engineer> {
    let assigned = assigned_ids(assignments);

    engineers
        .iter()
        .filter(|e| match filter {
            EngineerFilter::All => true,
            EngineerFilter::Available => !assigned.contains(&e.id),
            EngineerFilter::Assigned => assigned.contains(&e.id),
        })
        .collect()
}

/// Counts each engineer once, however many links it has. Links to engineers
/// missing from `engineers` are not counted.
pub fn engineer_stats(engineers: &[Engineer], assignments: &[Assignment]) -> EngineerStats {
    let linked = assigned_ids(assignments);
    let known: HashSet<Uuid> = engineers.iter().map(|e| e.id).collect();

    let total = known.len();
    let assigned = known.intersection(&linked).count();

    EngineerStats {
        total,
        assigned,
        available: total - assigned,
    }
}

/// Stable sort by priority rank: P1, P2, P3, then everything else.
pub fn projects_by_priority(projects: &[Project]) -> Vec<&Project> {
    let mut sorted: Vec<&Project> = projects.iter().collect();
    sorted.sort_by_key(|p| p.priority.rank());
    sorted
}

/// Comma-separated project names, or `empty_text` when there are none.
pub fn format_project_list(projects: &[&Project], empty_text: &str) -> String {
    if projects.is_empty() {
        return empty_text.to_string();
    }

    projects
        .iter()
        .map(|p| p.name.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}
