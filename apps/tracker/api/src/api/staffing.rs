use axum::Router;
use database::postgres::DatabaseConnection;
use domain_staffing::{
    AssignmentRepository, AssignmentService, DashboardService, EngineerRepository,
    EngineerService, PgAssignmentRepository, PgEngineerRepository, PgProjectRepository,
    ProjectRepository, ProjectService, handlers,
};

/// Wires the staffing services over one set of repositories.
pub fn router<P, E, A>(projects: P, engineers: E, assignments: A) -> Router
where
    P: ProjectRepository + 'static,
    E: EngineerRepository + 'static,
    A: AssignmentRepository + 'static,
{
    let links = AssignmentService::new(assignments);
    let projects = ProjectService::new(projects, links.clone());
    let engineers = EngineerService::new(engineers, links.clone());
    let dashboard = DashboardService::new(projects.clone(), engineers.clone(), links.clone());

    Router::new()
        .nest(
            "/projects",
            handlers::projects_router(projects, dashboard.clone()),
        )
        .nest(
            "/engineers",
            handlers::engineers_router(engineers, dashboard.clone()),
        )
        .nest("/assignments", handlers::assignments_router(links))
        .nest("/overview", handlers::overview_router(dashboard))
}

pub fn postgres_router(db: &DatabaseConnection) -> Router {
    router(
        PgProjectRepository::new(db.clone()),
        PgEngineerRepository::new(db.clone()),
        PgAssignmentRepository::new(db.clone()),
    )
}
