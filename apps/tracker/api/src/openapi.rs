use domain_staffing::handlers::{
    AssignmentsApiDoc, EngineersApiDoc, OverviewApiDoc, ProjectsApiDoc,
};
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    components(
        schemas(axum_helpers::ErrorResponse)
    ),
    info(
        title = "Tracker API",
        version = "0.1.0",
        description = "Projects, engineers and the assignments between them"
    ),
    servers(
        (url = "/api", description = "API base path")
    ),
    nest(
        (path = "/projects", api = ProjectsApiDoc),
        (path = "/engineers", api = EngineersApiDoc),
        (path = "/assignments", api = AssignmentsApiDoc),
        (path = "/overview", api = OverviewApiDoc)
    )
)]
pub struct ApiDoc;
