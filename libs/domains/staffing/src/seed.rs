//! Demo data set: ten projects, twenty engineers, twenty-three assignments.

use crate::error::StaffingResult;
use crate::models::{
    EngineerDraft, NewAssignment, ProjectDraft, ProjectPriority, ProjectStatus,
};
use crate::repository::{AssignmentRepository, EngineerRepository, ProjectRepository};

const ENGINEERS: [(&str, &str); 20] = [
    ("Sarah Johnson", "Senior Frontend Developer"),
    ("Mike Chen", "Full Stack Engineer"),
    ("Emily Rodriguez", "Mobile Developer"),
    ("David Kim", "Backend Engineer"),
    ("Jessica Wu", "Data Engineer"),
    ("Alex Thompson", "DevOps Engineer"),
    ("Maria Gonzalez", "UI/UX Designer"),
    ("James Wilson", "Senior Backend Developer"),
    ("Lisa Chang", "Frontend Developer"),
    ("Robert Davis", "Security Engineer"),
    ("Amanda Foster", "Machine Learning Engineer"),
    ("Carlos Martinez", "Database Administrator"),
    ("Nina Patel", "QA Engineer"),
    ("Thomas Anderson", "Senior Full Stack Developer"),
    ("Rachel Green", "Frontend Developer"),
    ("Kevin Liu", "Cloud Architect"),
    ("Sophie Turner", "Product Manager"),
    ("Marcus Johnson", "Backend Engineer"),
    ("Isabella Chen", "Data Scientist"),
    ("Jordan Wright", "Site Reliability Engineer"),
];

struct SeedProject {
    name: &'static str,
    status: ProjectStatus,
    priority: ProjectPriority,
    description: &'static str,
    /// Indexes into `ENGINEERS`
    team: &'static [usize],
}

const PROJECTS: [SeedProject; 10] = [
    SeedProject {
        name: "E-commerce Platform Redesign",
        status: ProjectStatus::Active,
        priority: ProjectPriority::P1,
        description: "Complete overhaul of the customer-facing shopping experience",
        team: &[0, 1, 6, 8],
    },
    SeedProject {
        name: "Mobile App Development",
        status: ProjectStatus::Active,
        priority: ProjectPriority::P1,
        description: "Native iOS and Android apps for the core product",
        team: &[2, 14, 12, 3],
    },
    SeedProject {
        name: "Data Analytics Dashboard",
        status: ProjectStatus::Planning,
        priority: ProjectPriority::P2,
        description: "Self-service reporting on sales and usage data",
        team: &[],
    },
    SeedProject {
        name: "API Gateway Migration",
        status: ProjectStatus::Active,
        priority: ProjectPriority::P2,
        description: "Move public APIs behind a managed gateway",
        team: &[7, 5, 15, 19],
    },
    SeedProject {
        name: "Security Audit & Compliance",
        status: ProjectStatus::OnHold,
        priority: ProjectPriority::P3,
        description: "Prepare for the annual external security audit",
        team: &[],
    },
    SeedProject {
        name: "Customer Support Portal",
        status: ProjectStatus::Active,
        priority: ProjectPriority::P2,
        description: "Ticketing and knowledge base for support staff",
        team: &[13, 17, 0, 12],
    },
    SeedProject {
        name: "Machine Learning Pipeline",
        status: ProjectStatus::Planning,
        priority: ProjectPriority::P3,
        description: "Training and serving infrastructure for recommendation models",
        team: &[10, 18, 4],
    },
    SeedProject {
        name: "Legacy System Modernization",
        status: ProjectStatus::Active,
        priority: ProjectPriority::P1,
        description: "Replace the monolithic order system with services",
        team: &[11, 3, 7, 1],
    },
    SeedProject {
        name: "Performance Optimization",
        status: ProjectStatus::Planning,
        priority: ProjectPriority::Unprioritized,
        description: "Reduce page load times across the web storefront",
        team: &[],
    },
    SeedProject {
        name: "Multi-tenant Architecture",
        status: ProjectStatus::OnHold,
        priority: ProjectPriority::Unprioritized,
        description: "Isolate customer data for enterprise tenants",
        team: &[],
    },
];

/// Counts of inserted rows
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SeedSummary {
    pub projects: usize,
    pub engineers: usize,
    pub assignments: usize,
}

/// Inserts the demo data set through the repositories.
///
/// Nothing is checked for existing rows, so calling it twice duplicates
/// the data.
pub async fn seed_demo_data<P, E, A>(
    projects: &P,
    engineers: &E,
    assignments: &A,
) -> StaffingResult<SeedSummary>
where
    P: ProjectRepository,
    E: EngineerRepository,
    A: AssignmentRepository,
{
    let mut summary = SeedSummary::default();

    let mut engineer_ids = Vec::with_capacity(ENGINEERS.len());
    for (name, role) in ENGINEERS {
        let engineer = engineers
            .create(EngineerDraft {
                name: name.to_string(),
                role: role.to_string(),
            })
            .await?;
        engineer_ids.push(engineer.id);
        summary.engineers += 1;
    }

    for seed in &PROJECTS {
        let project = projects
            .create(ProjectDraft {
                name: seed.name.to_string(),
                status: seed.status,
                priority: seed.priority,
                description: Some(seed.description.to_string()),
            })
            .await?;
        summary.projects += 1;

        for &member in seed.team {
            assignments
                .create(NewAssignment {
                    project_id: project.id,
                    engineer_id: engineer_ids[member],
                })
                .await?;
            summary.assignments += 1;
        }
    }

    tracing::info!(
        projects = summary.projects,
        engineers = summary.engineers,
        assignments = summary.assignments,
        "Seeded demo data"
    );
    Ok(summary)
}
