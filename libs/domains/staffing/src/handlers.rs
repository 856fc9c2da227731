use axum::{
    Json, Router,
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
};
use axum_helpers::{AppError, ErrorResponse, UuidPath, ValidatedJson, method_not_allowed, preflight};
use std::sync::Arc;
use utoipa::OpenApi;
use uuid::Uuid;

use crate::error::{Resource, StaffingResult};
use crate::models::{
    Assignment, CreateAssignment, CreateEngineer, CreateProject, DeleteQuery, Deleted, Engineer,
    EngineerFilter, EngineerProjects, EngineerQuery, NewAssignment, Project, ProjectEngineers,
    ProjectPriority, ProjectQuery, ProjectStatus, UpdateEngineer, UpdateProject,
};
use crate::overview::{EngineerCard, Overview, ProjectCard};
use crate::relations::EngineerStats;
use crate::repository::{AssignmentRepository, EngineerRepository, ProjectRepository};
use crate::service::{
    AssignmentService, DashboardService, EngineerService, ProjectService, SyncOutcome,
};

pub const PROJECTS_TAG: &str = "projects";
pub const ENGINEERS_TAG: &str = "engineers";
pub const ASSIGNMENTS_TAG: &str = "assignments";
pub const OVERVIEW_TAG: &str = "overview";

/// OpenAPI documentation for the Projects API
#[derive(OpenApi)]
#[openapi(
    paths(
        list_projects,
        create_project,
        update_project,
        delete_project,
        get_project,
        project_engineers,
        assign_engineers,
    ),
    components(schemas(
        Project,
        ProjectStatus,
        ProjectPriority,
        CreateProject,
        UpdateProject,
        ProjectEngineers,
        SyncOutcome,
        Deleted
    )),
    tags((name = PROJECTS_TAG, description = "Project management endpoints"))
)]
pub struct ProjectsApiDoc;

/// OpenAPI documentation for the Engineers API
#[derive(OpenApi)]
#[openapi(
    paths(
        list_engineers,
        create_engineer,
        update_engineer,
        delete_engineer,
        engineer_stats,
        get_engineer,
        engineer_projects,
        assign_projects,
    ),
    components(schemas(
        Engineer,
        EngineerFilter,
        CreateEngineer,
        UpdateEngineer,
        EngineerProjects,
        EngineerStats,
        SyncOutcome,
        Deleted
    )),
    tags((name = ENGINEERS_TAG, description = "Engineer management endpoints"))
)]
pub struct EngineersApiDoc;

/// OpenAPI documentation for the Assignments API
#[derive(OpenApi)]
#[openapi(
    paths(list_assignments, create_assignment, delete_assignment),
    components(schemas(Assignment, NewAssignment, CreateAssignment, Deleted)),
    tags((name = ASSIGNMENTS_TAG, description = "Project/engineer assignment endpoints"))
)]
pub struct AssignmentsApiDoc;

/// OpenAPI documentation for the dashboard overview
#[derive(OpenApi)]
#[openapi(
    paths(get_overview),
    components(schemas(Overview, ProjectCard, EngineerCard, EngineerStats)),
    tags((name = OVERVIEW_TAG, description = "Derived dashboard views"))
)]
pub struct OverviewApiDoc;

/// Reads `?id=`; a missing or blank value is a 400 naming the resource.
fn required_id(query: DeleteQuery, resource: Resource) -> Result<Uuid, AppError> {
    let raw = query
        .id
        .filter(|id| !id.trim().is_empty())
        .ok_or_else(|| AppError::MissingParameter(format!("{} ID is required", resource)))?;

    Ok(Uuid::parse_str(raw.trim())?)
}

/// Create the project router
///
/// Collection verbs live on `/`; membership routes read across collections
/// and share the dashboard service.
pub fn projects_router<P, E, A>(
    service: ProjectService<P, A>,
    dashboard: DashboardService<P, E, A>,
) -> Router
where
    P: ProjectRepository + 'static,
    E: EngineerRepository + 'static,
    A: AssignmentRepository + 'static,
{
    let records = Router::new()
        .route(
            "/",
            get(list_projects::<P, A>)
                .post(create_project::<P, A>)
                .put(update_project::<P, A>)
                .delete(delete_project::<P, A>)
                .options(preflight)
                .fallback(method_not_allowed),
        )
        .route(
            "/{id}",
            get(get_project::<P, A>).fallback(method_not_allowed),
        )
        .with_state(Arc::new(service));

    let membership = Router::new()
        .route(
            "/{id}/engineers",
            get(project_engineers::<P, E, A>)
                .put(assign_engineers::<P, E, A>)
                .fallback(method_not_allowed),
        )
        .with_state(Arc::new(dashboard));

    records.merge(membership)
}

/// Create the engineer router
pub fn engineers_router<P, E, A>(
    service: EngineerService<E, A>,
    dashboard: DashboardService<P, E, A>,
) -> Router
where
    P: ProjectRepository + 'static,
    E: EngineerRepository + 'static,
    A: AssignmentRepository + 'static,
{
    let records = Router::new()
        .route(
            "/",
            get(list_engineers::<E, A>)
                .post(create_engineer::<E, A>)
                .put(update_engineer::<E, A>)
                .delete(delete_engineer::<E, A>)
                .options(preflight)
                .fallback(method_not_allowed),
        )
        .route(
            "/stats",
            get(engineer_stats::<E, A>).fallback(method_not_allowed),
        )
        .route(
            "/{id}",
            get(get_engineer::<E, A>).fallback(method_not_allowed),
        )
        .with_state(Arc::new(service));

    let membership = Router::new()
        .route(
            "/{id}/projects",
            get(engineer_projects::<P, E, A>)
                .put(assign_projects::<P, E, A>)
                .fallback(method_not_allowed),
        )
        .with_state(Arc::new(dashboard));

    records.merge(membership)
}

/// Create the assignment router
pub fn assignments_router<A: AssignmentRepository + 'static>(
    service: AssignmentService<A>,
) -> Router {
    Router::new()
        .route(
            "/",
            get(list_assignments::<A>)
                .post(create_assignment::<A>)
                .delete(delete_assignment::<A>)
                .options(preflight)
                .fallback(method_not_allowed),
        )
        .with_state(Arc::new(service))
}

/// Create the overview router
pub fn overview_router<P, E, A>(dashboard: DashboardService<P, E, A>) -> Router
where
    P: ProjectRepository + 'static,
    E: EngineerRepository + 'static,
    A: AssignmentRepository + 'static,
{
    Router::new()
        .route("/", get(get_overview::<P, E, A>).fallback(method_not_allowed))
        .with_state(Arc::new(dashboard))
}

/// List projects
#[utoipa::path(
    get,
    path = "",
    tag = PROJECTS_TAG,
    params(ProjectQuery),
    responses(
        (status = 200, description = "All projects", body = Vec<Project>),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
async fn list_projects<P: ProjectRepository, A: AssignmentRepository>(
    State(service): State<Arc<ProjectService<P, A>>>,
    Query(query): Query<ProjectQuery>,
) -> StaffingResult<Json<Vec<Project>>> {
    let projects = match query.sort.as_deref() {
        Some("priority") => service.list_by_priority().await?,
        _ => service.list().await?,
    };
    Ok(Json(projects))
}

/// Create a new project
#[utoipa::path(
    post,
    path = "",
    tag = PROJECTS_TAG,
    request_body = CreateProject,
    responses(
        (status = 201, description = "Project created", body = Project),
        (status = 400, description = "Validation failed or malformed body", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
async fn create_project<P: ProjectRepository, A: AssignmentRepository>(
    State(service): State<Arc<ProjectService<P, A>>>,
    ValidatedJson(input): ValidatedJson<CreateProject>,
) -> StaffingResult<impl IntoResponse> {
    let project = service.create(input).await?;
    Ok((StatusCode::CREATED, Json(project)))
}

/// Replace every field of a project
#[utoipa::path(
    put,
    path = "",
    tag = PROJECTS_TAG,
    request_body = UpdateProject,
    responses(
        (status = 200, description = "Project updated", body = Project),
        (status = 400, description = "Missing id or invalid fields", body = ErrorResponse),
        (status = 404, description = "Project not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
async fn update_project<P: ProjectRepository, A: AssignmentRepository>(
    State(service): State<Arc<ProjectService<P, A>>>,
    ValidatedJson(input): ValidatedJson<UpdateProject>,
) -> StaffingResult<Json<Project>> {
    let project = service.update(input).await?;
    Ok(Json(project))
}

/// Delete a project and its assignments
#[utoipa::path(
    delete,
    path = "",
    tag = PROJECTS_TAG,
    params(DeleteQuery),
    responses(
        (status = 200, description = "Project deleted", body = Deleted),
        (status = 400, description = "Missing or malformed id", body = ErrorResponse),
        (status = 404, description = "Project not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
async fn delete_project<P: ProjectRepository, A: AssignmentRepository>(
    State(service): State<Arc<ProjectService<P, A>>>,
    Query(query): Query<DeleteQuery>,
) -> Result<Json<Deleted>, AppError> {
    let id = required_id(query, Resource::Project)?;
    service.delete(id).await?;
    Ok(Json(Deleted::new(id, Resource::Project)))
}

/// Get a project by ID
#[utoipa::path(
    get,
    path = "/{id}",
    tag = PROJECTS_TAG,
    params(("id" = Uuid, Path, description = "Project ID")),
    responses(
        (status = 200, description = "Project found", body = Project),
        (status = 400, description = "Invalid UUID", body = ErrorResponse),
        (status = 404, description = "Project not found", body = ErrorResponse)
    )
)]
async fn get_project<P: ProjectRepository, A: AssignmentRepository>(
    State(service): State<Arc<ProjectService<P, A>>>,
    UuidPath(id): UuidPath,
) -> StaffingResult<Json<Project>> {
    let project = service.get(id).await?;
    Ok(Json(project))
}

/// Engineers assigned to a project
#[utoipa::path(
    get,
    path = "/{id}/engineers",
    tag = PROJECTS_TAG,
    params(("id" = Uuid, Path, description = "Project ID")),
    responses(
        (status = 200, description = "Assigned engineers", body = Vec<Engineer>),
        (status = 404, description = "Project not found", body = ErrorResponse)
    )
)]
async fn project_engineers<P, E, A>(
    State(service): State<Arc<DashboardService<P, E, A>>>,
    UuidPath(id): UuidPath,
) -> StaffingResult<Json<Vec<Engineer>>>
where
    P: ProjectRepository,
    E: EngineerRepository,
    A: AssignmentRepository,
{
    let engineers = service.engineers_of_project(id).await?;
    Ok(Json(engineers))
}

/// Set the full list of engineers on a project
#[utoipa::path(
    put,
    path = "/{id}/engineers",
    tag = PROJECTS_TAG,
    params(("id" = Uuid, Path, description = "Project ID")),
    request_body = ProjectEngineers,
    responses(
        (status = 200, description = "Links removed and added", body = SyncOutcome),
        (status = 400, description = "Unknown engineer or malformed body", body = ErrorResponse),
        (status = 404, description = "Project not found", body = ErrorResponse)
    )
)]
async fn assign_engineers<P, E, A>(
    State(service): State<Arc<DashboardService<P, E, A>>>,
    UuidPath(id): UuidPath,
    ValidatedJson(input): ValidatedJson<ProjectEngineers>,
) -> StaffingResult<Json<SyncOutcome>>
where
    P: ProjectRepository,
    E: EngineerRepository,
    A: AssignmentRepository,
{
    let outcome = service.assign_engineers(id, &input.engineer_ids).await?;
    Ok(Json(outcome))
}

/// List engineers, optionally filtered by availability
#[utoipa::path(
    get,
    path = "",
    tag = ENGINEERS_TAG,
    params(EngineerQuery),
    responses(
        (status = 200, description = "Engineers", body = Vec<Engineer>),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
async fn list_engineers<E: EngineerRepository, A: AssignmentRepository>(
    State(service): State<Arc<EngineerService<E, A>>>,
    Query(query): Query<EngineerQuery>,
) -> StaffingResult<Json<Vec<Engineer>>> {
    let filter = EngineerFilter::parse_or_all(query.filter.as_deref());
    let engineers = service.list(filter).await?;
    Ok(Json(engineers))
}

/// Create a new engineer
#[utoipa::path(
    post,
    path = "",
    tag = ENGINEERS_TAG,
    request_body = CreateEngineer,
    responses(
        (status = 201, description = "Engineer created", body = Engineer),
        (status = 400, description = "Validation failed or malformed body", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
async fn create_engineer<E: EngineerRepository, A: AssignmentRepository>(
    State(service): State<Arc<EngineerService<E, A>>>,
    ValidatedJson(input): ValidatedJson<CreateEngineer>,
) -> StaffingResult<impl IntoResponse> {
    let engineer = service.create(input).await?;
    Ok((StatusCode::CREATED, Json(engineer)))
}

/// Replace every field of an engineer
#[utoipa::path(
    put,
    path = "",
    tag = ENGINEERS_TAG,
    request_body = UpdateEngineer,
    responses(
        (status = 200, description = "Engineer updated", body = Engineer),
        (status = 400, description = "Missing id or invalid fields", body = ErrorResponse),
        (status = 404, description = "Engineer not found", body = ErrorResponse)
    )
)]
async fn update_engineer<E: EngineerRepository, A: AssignmentRepository>(
    State(service): State<Arc<EngineerService<E, A>>>,
    ValidatedJson(input): ValidatedJson<UpdateEngineer>,
) -> StaffingResult<Json<Engineer>> {
    let engineer = service.update(input).await?;
    Ok(Json(engineer))
}

/// Delete an engineer and their assignments
///
/// Answers 200 even when no engineer has the given id.
#[utoipa::path(
    delete,
    path = "",
    tag = ENGINEERS_TAG,
    params(DeleteQuery),
    responses(
        (status = 200, description = "Engineer deleted", body = Deleted),
        (status = 400, description = "Missing or malformed id", body = ErrorResponse)
    )
)]
async fn delete_engineer<E: EngineerRepository, A: AssignmentRepository>(
    State(service): State<Arc<EngineerService<E, A>>>,
    Query(query): Query<DeleteQuery>,
) -> Result<Json<Deleted>, AppError> {
    let id = required_id(query, Resource::Engineer)?;
    service.delete(id).await?;
    Ok(Json(Deleted::new(id, Resource::Engineer)))
}

/// Headcount of assigned and available engineers
#[utoipa::path(
    get,
    path = "/stats",
    tag = ENGINEERS_TAG,
    responses((status = 200, description = "Engineer stats", body = EngineerStats))
)]
async fn engineer_stats<E: EngineerRepository, A: AssignmentRepository>(
    State(service): State<Arc<EngineerService<E, A>>>,
) -> StaffingResult<Json<EngineerStats>> {
    let stats = service.stats().await?;
    Ok(Json(stats))
}

/// Get an engineer by ID
#[utoipa::path(
    get,
    path = "/{id}",
    tag = ENGINEERS_TAG,
    params(("id" = Uuid, Path, description = "Engineer ID")),
    responses(
        (status = 200, description = "Engineer found", body = Engineer),
        (status = 404, description = "Engineer not found", body = ErrorResponse)
    )
)]
async fn get_engineer<E: EngineerRepository, A: AssignmentRepository>(
    State(service): State<Arc<EngineerService<E, A>>>,
    UuidPath(id): UuidPath,
) -> StaffingResult<Json<Engineer>> {
    let engineer = service.get(id).await?;
    Ok(Json(engineer))
}

/// Projects an engineer is assigned to
#[utoipa::path(
    get,
    path = "/{id}/projects",
    tag = ENGINEERS_TAG,
    params(("id" = Uuid, Path, description = "Engineer ID")),
    responses(
        (status = 200, description = "Assigned projects", body = Vec<Project>),
        (status = 404, description = "Engineer not found", body = ErrorResponse)
    )
)]
async fn engineer_projects<P, E, A>(
    State(service): State<Arc<DashboardService<P, E, A>>>,
    UuidPath(id): UuidPath,
) -> StaffingResult<Json<Vec<Project>>>
where
    P: ProjectRepository,
    E: EngineerRepository,
    A: AssignmentRepository,
{
    let projects = service.projects_of_engineer(id).await?;
    Ok(Json(projects))
}

/// Set the full list of projects for an engineer
#[utoipa::path(
    put,
    path = "/{id}/projects",
    tag = ENGINEERS_TAG,
    params(("id" = Uuid, Path, description = "Engineer ID")),
    request_body = EngineerProjects,
    responses(
        (status = 200, description = "Links removed and added", body = SyncOutcome),
        (status = 400, description = "Unknown project or malformed body", body = ErrorResponse),
        (status = 404, description = "Engineer not found", body = ErrorResponse)
    )
)]
async fn assign_projects<P, E, A>(
    State(service): State<Arc<DashboardService<P, E, A>>>,
    UuidPath(id): UuidPath,
    ValidatedJson(input): ValidatedJson<EngineerProjects>,
) -> StaffingResult<Json<SyncOutcome>>
where
    P: ProjectRepository,
    E: EngineerRepository,
    A: AssignmentRepository,
{
    let outcome = service.assign_projects(id, &input.project_ids).await?;
    Ok(Json(outcome))
}

/// List all assignments
#[utoipa::path(
    get,
    path = "",
    tag = ASSIGNMENTS_TAG,
    responses(
        (status = 200, description = "All assignments", body = Vec<Assignment>),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
async fn list_assignments<A: AssignmentRepository>(
    State(service): State<Arc<AssignmentService<A>>>,
) -> StaffingResult<Json<Vec<Assignment>>> {
    let assignments = service.list().await?;
    Ok(Json(assignments))
}

/// Link an engineer to a project
#[utoipa::path(
    post,
    path = "",
    tag = ASSIGNMENTS_TAG,
    request_body = CreateAssignment,
    responses(
        (status = 201, description = "Assignment created", body = Assignment),
        (status = 400, description = "Missing ids or unknown project/engineer", body = ErrorResponse)
    )
)]
async fn create_assignment<A: AssignmentRepository>(
    State(service): State<Arc<AssignmentService<A>>>,
    ValidatedJson(input): ValidatedJson<CreateAssignment>,
) -> StaffingResult<impl IntoResponse> {
    let assignment = service.create(input).await?;
    Ok((StatusCode::CREATED, Json(assignment)))
}

/// Remove one assignment
///
/// Answers 200 even when no assignment has the given id.
#[utoipa::path(
    delete,
    path = "",
    tag = ASSIGNMENTS_TAG,
    params(DeleteQuery),
    responses(
        (status = 200, description = "Assignment deleted", body = Deleted),
        (status = 400, description = "Missing or malformed id", body = ErrorResponse)
    )
)]
async fn delete_assignment<A: AssignmentRepository>(
    State(service): State<Arc<AssignmentService<A>>>,
    Query(query): Query<DeleteQuery>,
) -> Result<Json<Deleted>, AppError> {
    let id = required_id(query, Resource::Assignment)?;
    service.delete(id).await?;
    Ok(Json(Deleted::new(id, Resource::Assignment)))
}

/// Dashboard view: projects by priority, filtered engineers, stats
#[utoipa::path(
    get,
    path = "",
    tag = OVERVIEW_TAG,
    params(EngineerQuery),
    responses(
        (status = 200, description = "Dashboard overview", body = Overview),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
async fn get_overview<P, E, A>(
    State(service): State<Arc<DashboardService<P, E, A>>>,
    Query(query): Query<EngineerQuery>,
) -> StaffingResult<Json<Overview>>
where
    P: ProjectRepository,
    E: EngineerRepository,
    A: AssignmentRepository,
{
    let filter = EngineerFilter::parse_or_all(query.filter.as_deref());
    let overview = service.overview(filter).await?;
    Ok(Json(overview))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_required_id_rejects_missing_and_blank() {
        for id in [None, Some("  ".to_string())] {
            let err = required_id(DeleteQuery { id }, Resource::Engineer).unwrap_err();
            assert!(matches!(err, AppError::MissingParameter(m) if m == "Engineer ID is required"));
        }
    }

    #[test]
    fn test_required_id_rejects_malformed_uuid() {
        let err = required_id(
            DeleteQuery {
                id: Some("not-a-uuid".to_string()),
            },
            Resource::Project,
        )
        .unwrap_err();
        assert!(matches!(err, AppError::UuidError(_)));
    }

    #[test]
    fn test_openapi_documents_collection_paths() {
        let doc = ProjectsApiDoc::openapi();
        let json = serde_json::to_value(&doc).unwrap();
        assert!(json["paths"].get("/{id}/engineers").is_some());

        let doc = EngineersApiDoc::openapi();
        let json = serde_json::to_value(&doc).unwrap();
        assert!(json["paths"].get("/stats").is_some());
    }
}
