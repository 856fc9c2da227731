use serde::Serialize;
use utoipa::ToSchema;

use crate::mirror::Mirror;
use crate::models::{Engineer, EngineerFilter, Project};
use crate::relations::{self, EngineerStats, NO_PROJECTS};

/// A project with its team, as the dashboard shows it
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProjectCard {
    #[serde(flatten)]
    pub project: Project,
    /// e.g. `status-on-hold`
    pub status_class: String,
    /// e.g. `priority-p1`
    pub priority_class: String,
    pub engineers: Vec<Engineer>,
}

/// An engineer with the projects they work on
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EngineerCard {
    #[serde(flatten)]
    pub engineer: Engineer,
    pub available: bool,
    pub projects: Vec<Project>,
    /// Comma-separated project names, or "No projects assigned"
    pub project_list: String,
}

/// Dashboard payload served by `GET /overview`
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct Overview {
    pub filter: EngineerFilter,
    pub projects: Vec<ProjectCard>,
    pub engineers: Vec<EngineerCard>,
    pub stats: EngineerStats,
}

impl Overview {
    pub fn from_mirror(mirror: &Mirror, filter: EngineerFilter) -> Self {
        let projects = mirror
            .projects_by_priority()
            .into_iter()
            .map(|project| ProjectCard {
                status_class: project.status.css_class(),
                priority_class: project.priority.css_class(),
                engineers: mirror
                    .engineers_for_project(project.id)
                    .into_iter()
                    .cloned()
                    .collect(),
                project: project.clone(),
            })
            .collect();

        let engineers = mirror
            .filtered_engineers(filter)
            .into_iter()
            .map(|engineer| {
                let projects = mirror.projects_for_engineer(engineer.id);
                EngineerCard {
                    available: projects.is_empty(),
                    project_list: relations::format_project_list(&projects, NO_PROJECTS),
                    projects: projects.into_iter().cloned().collect(),
                    engineer: engineer.clone(),
                }
            })
            .collect();

        Self {
            filter,
            projects,
            engineers,
            stats: mirror.engineer_stats(),
        }
    }
}
