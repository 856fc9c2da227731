//! PostgreSQL integration tests for the staffing repositories
//!
//! Each test starts its own container through `TestDatabase`, so they are
//! ignored by default. Run them with `cargo test -- --ignored` when Docker
//! is available.

use domain_staffing::models::{EngineerDraft, ProjectDraft};
use domain_staffing::*;
use test_utils::{TestDataBuilder, TestDatabase, assertions::assert_same_members};

fn project_draft(name: String, priority: ProjectPriority) -> ProjectDraft {
    ProjectDraft {
        name,
        status: ProjectStatus::OnHold,
        priority,
        description: Some("integration".to_string()),
    }
}

fn engineer_draft(name: String) -> EngineerDraft {
    EngineerDraft {
        name,
        role: "Site Reliability Engineer".to_string(),
    }
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_project_round_trip_keeps_enum_values() {
    let db = TestDatabase::new().await;
    let repo = PgProjectRepository::new(db.connection());
    let builder = TestDataBuilder::from_test_name("pg_project_round_trip");

    let created = repo
        .create(project_draft(builder.name("project", "portal"), ProjectPriority::P2))
        .await
        .unwrap();
    let fetched = repo.get_by_id(created.id).await.unwrap().unwrap();

    assert_eq!(fetched.status, ProjectStatus::OnHold);
    assert_eq!(fetched.priority, ProjectPriority::P2);
    assert_eq!(fetched.description.as_deref(), Some("integration"));

    let updated = repo
        .update(
            created.id,
            project_draft(builder.name("project", "renamed"), ProjectPriority::P1),
        )
        .await
        .unwrap()
        .unwrap();
    assert_eq!(updated.name, builder.name("project", "renamed"));
    assert!(updated.updated_at >= created.updated_at);

    assert!(repo.delete(created.id).await.unwrap());
    assert!(repo.get_by_id(created.id).await.unwrap().is_none());
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_dangling_assignment_is_a_validation_error() {
    let db = TestDatabase::new().await;
    let repo = PgAssignmentRepository::new(db.connection());
    let builder = TestDataBuilder::from_test_name("pg_dangling_assignment");

    let err = repo
        .create(NewAssignment {
            project_id: builder.id("missing-project"),
            engineer_id: builder.id("missing-engineer"),
        })
        .await
        .unwrap_err();

    assert!(matches!(err, StaffingError::Validation(_)));
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_sync_and_cascade_against_postgres() {
    let db = TestDatabase::new().await;
    let builder = TestDataBuilder::from_test_name("pg_sync_cascade");

    let links = AssignmentService::new(PgAssignmentRepository::new(db.connection()));
    let projects = ProjectService::new(PgProjectRepository::new(db.connection()), links.clone());
    let engineers = EngineerService::new(PgEngineerRepository::new(db.connection()), links.clone());
    let engineer_repo = PgEngineerRepository::new(db.connection());
    let project_repo = PgProjectRepository::new(db.connection());

    let project = project_repo
        .create(project_draft(builder.name("project", "gateway"), ProjectPriority::P1))
        .await
        .unwrap();
    let e1 = engineer_repo
        .create(engineer_draft(builder.name("engineer", "one")))
        .await
        .unwrap();
    let e2 = engineer_repo
        .create(engineer_draft(builder.name("engineer", "two")))
        .await
        .unwrap();

    let outcome = projects
        .assign_engineers(project.id, &[e1.id, e2.id])
        .await
        .unwrap();
    assert_eq!(outcome.added.len(), 2);

    let current = links.list_for(Anchor::Project(project.id)).await.unwrap();
    assert_same_members(
        current.iter().map(|l| l.engineer_id),
        vec![e1.id, e2.id],
        "project membership",
    );

    engineers.delete(e1.id).await.unwrap();
    let current = links.list_for(Anchor::Project(project.id)).await.unwrap();
    assert_eq!(current.len(), 1);
    assert_eq!(current[0].engineer_id, e2.id);

    projects.delete(project.id).await.unwrap();
    assert!(links.list().await.unwrap().is_empty());
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_seed_populates_postgres() {
    let db = TestDatabase::new().await;
    let projects = PgProjectRepository::new(db.connection());
    let engineers = PgEngineerRepository::new(db.connection());
    let assignments = PgAssignmentRepository::new(db.connection());

    seed_demo_data(&projects, &engineers, &assignments).await.unwrap();

    assert_eq!(projects.list().await.unwrap().len(), 10);
    assert_eq!(engineers.list().await.unwrap().len(), 20);
    assert_eq!(assignments.list().await.unwrap().len(), 23);
}
