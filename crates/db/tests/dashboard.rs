//! Dashboard aggregation: summary counters and relationship-tagged listings.

use atelier_core::requirements::Requirements;
use atelier_core::roles::Role;
use atelier_core::status::ProjectStatus;
use atelier_core::types::DbId;
use atelier_db::models::collaborator::AddCollaborator;
use atelier_db::models::project::CreateProject;
use atelier_db::models::project_request::SubmitProjectRequest;
use atelier_db::repositories::{
    CollaboratorRepo, DashboardRepo, ProjectRepo, ProjectRequestRepo,
};
use atelier_core::policy::CollaboratorRole;
use sqlx::PgPool;

async fn create_user(pool: &PgPool, external_id: &str, role: Role) -> DbId {
    let (id,): (DbId,) = sqlx::query_as(
        "INSERT INTO users (external_id, email, display_name, role_id) \
         VALUES ($1, $2, $3, $4) RETURNING id",
    )
    .bind(external_id)
    .bind(format!("{external_id}@example.com"))
    .bind(external_id)
    .bind(role.id())
    .fetch_one(pool)
    .await
    .unwrap();
    id
}

async fn submit_request(pool: &PgPool, client: DbId, title: &str) {
    ProjectRequestRepo::submit(
        pool,
        client,
        &SubmitProjectRequest {
            title: title.to_string(),
            description: "desc".to_string(),
            project_type: "website".to_string(),
            budget_cents: None,
            timeline: None,
            requirements: Requirements::default(),
        },
    )
    .await
    .unwrap();
}

async fn create_project(pool: &PgPool, client: DbId, title: &str) -> DbId {
    ProjectRepo::create(
        pool,
        &CreateProject {
            client_id: client,
            title: title.to_string(),
            description: "desc".to_string(),
            project_type: "website".to_string(),
            budget_cents: None,
            priority: None,
            tech_stack: vec![],
            start_date: None,
            estimated_completion_date: None,
            internal_notes: None,
            requirements: Requirements::default(),
        },
    )
    .await
    .unwrap()
    .id
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn summary_counts_owned_and_collaborated_distinctly(pool: PgPool) {
    let client = create_user(&pool, "client-1", Role::Client).await;
    let other = create_user(&pool, "client-2", Role::Client).await;
    let dev = create_user(&pool, "dev-1", Role::Developer).await;

    // Two requests of their own, one still requested, one moved to review.
    submit_request(&pool, client, "First ask").await;
    submit_request(&pool, client, "Second ask").await;
    let requests = ProjectRequestRepo::list_by_client(&pool, client).await.unwrap();
    ProjectRequestRepo::set_status(
        &pool,
        requests[0].id,
        atelier_core::status::RequestStatus::Requested,
        atelier_core::status::RequestStatus::InReview,
        dev,
    )
    .await
    .unwrap()
    .unwrap();

    // One owned project, active; one foreign project they collaborate on.
    let owned = create_project(&pool, client, "Owned").await;
    ProjectRepo::assign(&pool, owned, dev).await.unwrap().unwrap();

    let foreign = create_project(&pool, other, "Foreign").await;
    CollaboratorRepo::add(
        &pool,
        foreign,
        CollaboratorRole::Viewer,
        &AddCollaborator {
            user_id: client,
            role: None,
            can_view_files: None,
            can_upload_files: None,
            can_manage_domains: None,
        },
    )
    .await
    .unwrap();

    let summary = DashboardRepo::summary(&pool, client).await.unwrap();
    assert_eq!(summary.total_projects, 2);
    assert_eq!(summary.active_projects, 1);
    assert_eq!(summary.completed_projects, 0);
    assert_eq!(summary.total_requests, 2);
    assert_eq!(summary.pending_requests, 1);
    assert_eq!(summary.in_review_requests, 1);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn ownership_outranks_collaborator_grant(pool: PgPool) {
    let client = create_user(&pool, "client-1", Role::Client).await;
    let project = create_project(&pool, client, "Owned").await;

    // A self-grant must not produce a duplicate or demote the relationship.
    CollaboratorRepo::add(
        &pool,
        project,
        CollaboratorRole::Editor,
        &AddCollaborator {
            user_id: client,
            role: None,
            can_view_files: None,
            can_upload_files: None,
            can_manage_domains: None,
        },
    )
    .await
    .unwrap();

    let entries = DashboardRepo::owned_or_collaborated(&pool, client).await.unwrap();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].relationship, "client");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn collaborated_projects_carry_the_grant_role(pool: PgPool) {
    let owner = create_user(&pool, "client-1", Role::Client).await;
    let collaborator = create_user(&pool, "client-2", Role::Client).await;
    let project = create_project(&pool, owner, "Shared").await;

    CollaboratorRepo::add(
        &pool,
        project,
        CollaboratorRole::Editor,
        &AddCollaborator {
            user_id: collaborator,
            role: Some("editor".to_string()),
            can_view_files: None,
            can_upload_files: Some(true),
            can_manage_domains: None,
        },
    )
    .await
    .unwrap();

    let entries = DashboardRepo::owned_or_collaborated(&pool, collaborator)
        .await
        .unwrap();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].relationship, "editor");
    assert_eq!(entries[0].project.id, project);

    // The owner still sees it as theirs.
    let owner_entries = DashboardRepo::owned_or_collaborated(&pool, owner).await.unwrap();
    assert_eq!(owner_entries.len(), 1);
    assert_eq!(owner_entries[0].relationship, "client");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn completed_projects_count_separately_from_active(pool: PgPool) {
    let client = create_user(&pool, "client-1", Role::Client).await;
    let dev = create_user(&pool, "dev-1", Role::Developer).await;
    let project = create_project(&pool, client, "Done soon").await;
    ProjectRepo::assign(&pool, project, dev).await.unwrap().unwrap();

    for (from, to, pct) in [
        (ProjectStatus::InProgress, ProjectStatus::InTesting, 70),
        (ProjectStatus::InTesting, ProjectStatus::ReadyForLaunch, 90),
        (ProjectStatus::ReadyForLaunch, ProjectStatus::Completed, 100),
    ] {
        ProjectRepo::record_status_update(&pool, project, from, to, pct, "step", true, dev)
            .await
            .unwrap()
            .unwrap();
    }

    let summary = DashboardRepo::summary(&pool, client).await.unwrap();
    assert_eq!(summary.total_projects, 1);
    assert_eq!(summary.active_projects, 0);
    assert_eq!(summary.completed_projects, 1);
}
