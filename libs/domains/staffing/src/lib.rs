//! Staffing Domain
//!
//! Projects, engineers and the many-to-many assignments between them.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐
//! │  Handlers   │  ← HTTP endpoints per collection + overview
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐     ┌──────────────────────────┐
//! │   Service   │ ──► │ reconcile · relations    │  ← pure engines
//! └──────┬──────┘     └──────────────────────────┘
//!        │
//! ┌──────▼──────┐
//! │ Repository  │  ← Data access (traits + in-memory / PostgreSQL)
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │   Models    │  ← Records, payloads, enums
//! └─────────────┘
//! ```
//!
//! # Usage
//!
//! ```rust,no_run
//! use domain_staffing::{
//!     AssignmentService, DashboardService, EngineerService, InMemoryStore, ProjectService,
//!     handlers,
//! };
//!
//! let store = InMemoryStore::new();
//! let links = AssignmentService::new(store.clone());
//! let projects = ProjectService::new(store.clone(), links.clone());
//! let engineers = EngineerService::new(store.clone(), links.clone());
//! let dashboard = DashboardService::new(projects.clone(), engineers.clone(), links.clone());
//!
//! let router = axum::Router::new()
//!     .nest("/projects", handlers::projects_router(projects, dashboard.clone()))
//!     .nest("/engineers", handlers::engineers_router(engineers, dashboard.clone()))
//!     .nest("/assignments", handlers::assignments_router(links))
//!     .nest("/overview", handlers::overview_router(dashboard));
//! ```

pub mod entity;
pub mod error;
pub mod handlers;
pub mod mirror;
pub mod models;
pub mod overview;
pub mod postgres;
pub mod reconcile;
pub mod relations;
pub mod repository;
pub mod seed;
pub mod service;

// Re-export commonly used types
pub use error::{Resource, StaffingError, StaffingResult};
pub use mirror::Mirror;
pub use models::{
    Assignment, CreateAssignment, CreateEngineer, CreateProject, Engineer, EngineerFilter,
    NewAssignment, Project, ProjectPriority, ProjectStatus, UpdateEngineer, UpdateProject,
};
pub use overview::Overview;
pub use postgres::{PgAssignmentRepository, PgEngineerRepository, PgProjectRepository};
pub use reconcile::{Anchor, Reconciliation, reconcile};
pub use relations::EngineerStats;
pub use repository::{AssignmentRepository, EngineerRepository, InMemoryStore, ProjectRepository};
pub use seed::seed_demo_data;
pub use service::{
    AssignmentService, DashboardService, EngineerService, ProjectService, SyncOutcome,
};
