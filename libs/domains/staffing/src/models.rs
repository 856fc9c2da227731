use chrono::{DateTime, Utc};
use sea_orm::sea_query::StringLen;
use sea_orm::{DeriveActiveEnum, EnumIter};
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use strum::{Display, EnumString};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::{Validate, ValidationError};

use crate::error::{StaffingError, StaffingResult};

const PROJECT_NAME_MESSAGE: &str = "Project name is required and must be a non-empty string";
const PROJECT_STATUS_MESSAGE: &str = "Project status is required and must be a string";
const PROJECT_STATUS_VALUES: &str = "Project status must be one of: Active, Planning, On Hold";
const PROJECT_PRIORITY_VALUES: &str =
    "Project priority must be one of: P1, P2, P3, Unprioritized";
const ENGINEER_NAME_MESSAGE: &str = "Engineer name is required";
const ENGINEER_ROLE_MESSAGE: &str = "Engineer role is required";

fn invalid(code: &'static str, message: &'static str) -> ValidationError {
    ValidationError::new(code).with_message(Cow::Borrowed(message))
}

fn validate_project_name(name: &str) -> Result<(), ValidationError> {
    if name.trim().is_empty() {
        return Err(invalid("blank", PROJECT_NAME_MESSAGE));
    }
    Ok(())
}

fn validate_project_status(status: &str) -> Result<(), ValidationError> {
    status
        .parse::<ProjectStatus>()
        .map(|_| ())
        .map_err(|_| invalid("unknown_status", PROJECT_STATUS_VALUES))
}

fn validate_project_priority(priority: &str) -> Result<(), ValidationError> {
    priority
        .parse::<ProjectPriority>()
        .map(|_| ())
        .map_err(|_| invalid("unknown_priority", PROJECT_PRIORITY_VALUES))
}

fn validate_engineer_name(name: &str) -> Result<(), ValidationError> {
    if name.trim().is_empty() {
        return Err(invalid("blank", ENGINEER_NAME_MESSAGE));
    }
    Ok(())
}

fn validate_engineer_role(role: &str) -> Result<(), ValidationError> {
    if role.trim().is_empty() {
        return Err(invalid("blank", ENGINEER_ROLE_MESSAGE));
    }
    Ok(())
}

/// Delivery status of a project
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    DeriveActiveEnum,
    EnumIter,
    ToSchema,
)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(50))")]
pub enum ProjectStatus {
    #[sea_orm(string_value = "Active")]
    Active,
    #[sea_orm(string_value = "Planning")]
    Planning,
    #[serde(rename = "On Hold")]
    #[strum(serialize = "On Hold")]
    #[sea_orm(string_value = "On Hold")]
    OnHold,
}

impl ProjectStatus {
    /// Lowercase hyphenated slug, e.g. `status-on-hold`.
    pub fn css_class(&self) -> String {
        format!("status-{}", self.to_string().to_lowercase().replace(' ', "-"))
    }
}

/// Scheduling priority of a project
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    DeriveActiveEnum,
    EnumIter,
    ToSchema,
)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(50))")]
pub enum ProjectPriority {
    #[sea_orm(string_value = "P1")]
    P1,
    #[sea_orm(string_value = "P2")]
    P2,
    #[sea_orm(string_value = "P3")]
    P3,
    #[default]
    #[sea_orm(string_value = "Unprioritized")]
    Unprioritized,
}

impl ProjectPriority {
    /// Sort rank: P1 first, unprioritized last.
    pub fn rank(&self) -> u8 {
        match self {
            Self::P1 => 1,
            Self::P2 => 2,
            Self::P3 => 3,
            Self::Unprioritized => 4,
        }
    }

    pub fn css_class(&self) -> String {
        format!("priority-{}", self.to_string().to_lowercase())
    }
}

/// Which engineers a listing should include
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Default,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    ToSchema,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum EngineerFilter {
    #[default]
    All,
    /// Engineers without any assignment
    Available,
    /// Engineers with at least one assignment
    Assigned,
}

impl EngineerFilter {
    /// Parses a query value; anything unrecognised means `All`.
    pub fn parse_or_all(value: Option<&str>) -> Self {
        value
            .and_then(|v| v.trim().parse().ok())
            .unwrap_or_default()
    }
}

/// A unit of work engineers can be assigned to
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    /// Unique identifier
    pub id: Uuid,
    /// Display name
    pub name: String,
    /// Current delivery status
    pub status: ProjectStatus,
    /// Scheduling priority
    pub priority: ProjectPriority,
    /// Free-form description
    pub description: Option<String>,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
    /// Last update timestamp
    pub updated_at: DateTime<Utc>,
}

impl Project {
    pub fn new(draft: ProjectDraft) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::now_v7(),
            name: draft.name,
            status: draft.status,
            priority: draft.priority,
            description: draft.description,
            created_at: now,
            updated_at: now,
        }
    }

    /// Full field replacement; `id` and `created_at` are kept.
    pub fn apply(&self, draft: ProjectDraft) -> Self {
        Self {
            id: self.id,
            name: draft.name,
            status: draft.status,
            priority: draft.priority,
            description: draft.description,
            created_at: self.created_at,
            updated_at: Utc::now(),
        }
    }
}

/// A person who can work on projects
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Engineer {
    pub id: Uuid,
    pub name: String,
    /// Job title, e.g. "Backend Engineer"
    pub role: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Engineer {
    pub fn new(draft: EngineerDraft) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::now_v7(),
            name: draft.name,
            role: draft.role,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn apply(&self, draft: EngineerDraft) -> Self {
        Self {
            id: self.id,
            name: draft.name,
            role: draft.role,
            created_at: self.created_at,
            updated_at: Utc::now(),
        }
    }
}

/// One project/engineer edge
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Assignment {
    pub id: Uuid,
    pub project_id: Uuid,
    pub engineer_id: Uuid,
    pub created_at: DateTime<Utc>,
}

impl Assignment {
    pub fn new(link: NewAssignment) -> Self {
        Self {
            id: Uuid::now_v7(),
            project_id: link.project_id,
            engineer_id: link.engineer_id,
            created_at: Utc::now(),
        }
    }
}

/// An edge that does not exist yet
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct NewAssignment {
    pub project_id: Uuid,
    pub engineer_id: Uuid,
}

/// Validated project fields, ready for the store
#[derive(Debug, Clone, PartialEq)]
pub struct ProjectDraft {
    pub name: String,
    pub status: ProjectStatus,
    pub priority: ProjectPriority,
    pub description: Option<String>,
}

impl ProjectDraft {
    fn build(
        name: Option<String>,
        status: Option<String>,
        priority: Option<String>,
        description: Option<String>,
    ) -> StaffingResult<Self> {
        let name = name
            .map(|n| n.trim().to_string())
            .filter(|n| !n.is_empty())
            .ok_or_else(|| StaffingError::validation(PROJECT_NAME_MESSAGE))?;

        let status = status
            .ok_or_else(|| StaffingError::validation(PROJECT_STATUS_MESSAGE))?
            .parse()
            .map_err(|_| StaffingError::validation(PROJECT_STATUS_VALUES))?;

        let priority = match priority {
            Some(p) => p
                .parse()
                .map_err(|_| StaffingError::validation(PROJECT_PRIORITY_VALUES))?,
            None => ProjectPriority::default(),
        };

        let description = description
            .map(|d| d.trim().to_string())
            .filter(|d| !d.is_empty());

        Ok(Self {
            name,
            status,
            priority,
            description,
        })
    }
}

/// Validated engineer fields, ready for the store
#[derive(Debug, Clone, PartialEq)]
pub struct EngineerDraft {
    pub name: String,
    pub role: String,
}

impl EngineerDraft {
    fn build(name: Option<String>, role: Option<String>) -> StaffingResult<Self> {
        let name = name
            .map(|n| n.trim().to_string())
            .filter(|n| !n.is_empty())
            .ok_or_else(|| StaffingError::validation(ENGINEER_NAME_MESSAGE))?;
        let role = role
            .map(|r| r.trim().to_string())
            .filter(|r| !r.is_empty())
            .ok_or_else(|| StaffingError::validation(ENGINEER_ROLE_MESSAGE))?;

        Ok(Self { name, role })
    }
}

/// Request body for `POST /projects`
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateProject {
    #[validate(
        required(message = "Project name is required and must be a non-empty string"),
        custom(function = "validate_project_name")
    )]
    pub name: Option<String>,
    /// One of "Active", "Planning", "On Hold"
    #[validate(
        required(message = "Project status is required and must be a string"),
        custom(function = "validate_project_status")
    )]
    pub status: Option<String>,
    /// One of "P1", "P2", "P3", "Unprioritized"; defaults to "Unprioritized"
    #[validate(custom(function = "validate_project_priority"))]
    pub priority: Option<String>,
    pub description: Option<String>,
    /// Engineers to assign once the project exists
    pub engineer_ids: Option<Vec<Uuid>>,
}

impl CreateProject {
    pub fn into_draft(self) -> StaffingResult<ProjectDraft> {
        self.validate()?;
        ProjectDraft::build(self.name, self.status, self.priority, self.description)
    }
}

/// Request body for `PUT /projects`
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProject {
    #[validate(required(message = "Project ID is required for update"))]
    pub id: Option<Uuid>,
    #[validate(
        required(message = "Project name is required and must be a non-empty string"),
        custom(function = "validate_project_name")
    )]
    pub name: Option<String>,
    #[validate(
        required(message = "Project status is required and must be a string"),
        custom(function = "validate_project_status")
    )]
    pub status: Option<String>,
    #[validate(custom(function = "validate_project_priority"))]
    pub priority: Option<String>,
    pub description: Option<String>,
    /// When present, the project's engineers become exactly this set
    pub engineer_ids: Option<Vec<Uuid>>,
}

impl UpdateProject {
    pub fn into_parts(self) -> StaffingResult<(Uuid, ProjectDraft)> {
        self.validate()?;
        let id = self
            .id
            .ok_or_else(|| StaffingError::validation("Project ID is required for update"))?;
        let draft = ProjectDraft::build(self.name, self.status, self.priority, self.description)?;
        Ok((id, draft))
    }
}

/// Request body for `POST /engineers`
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateEngineer {
    #[validate(
        required(message = "Engineer name is required"),
        custom(function = "validate_engineer_name")
    )]
    pub name: Option<String>,
    #[validate(
        required(message = "Engineer role is required"),
        custom(function = "validate_engineer_role")
    )]
    pub role: Option<String>,
    /// Projects to assign once the engineer exists
    pub project_ids: Option<Vec<Uuid>>,
}

impl CreateEngineer {
    pub fn into_draft(self) -> StaffingResult<EngineerDraft> {
        self.validate()?;
        EngineerDraft::build(self.name, self.role)
    }
}

/// Request body for `PUT /engineers`
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateEngineer {
    #[validate(required(message = "Engineer ID is required"))]
    pub id: Option<Uuid>,
    #[validate(
        required(message = "Engineer name is required"),
        custom(function = "validate_engineer_name")
    )]
    pub name: Option<String>,
    #[validate(
        required(message = "Engineer role is required"),
        custom(function = "validate_engineer_role")
    )]
    pub role: Option<String>,
    /// When present, the engineer's projects become exactly this set
    pub project_ids: Option<Vec<Uuid>>,
}

impl UpdateEngineer {
    pub fn into_parts(self) -> StaffingResult<(Uuid, EngineerDraft)> {
        self.validate()?;
        let id = self
            .id
            .ok_or_else(|| StaffingError::validation("Engineer ID is required"))?;
        Ok((id, EngineerDraft::build(self.name, self.role)?))
    }
}

/// Request body for `POST /assignments`
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateAssignment {
    #[validate(required(message = "Project ID is required"))]
    pub project_id: Option<Uuid>,
    #[validate(required(message = "Engineer ID is required"))]
    pub engineer_id: Option<Uuid>,
}

impl CreateAssignment {
    pub fn into_link(self) -> StaffingResult<NewAssignment> {
        self.validate()?;
        match (self.project_id, self.engineer_id) {
            (Some(project_id), Some(engineer_id)) => Ok(NewAssignment {
                project_id,
                engineer_id,
            }),
            _ => Err(StaffingError::validation(
                "Assignment requires both a project ID and an engineer ID",
            )),
        }
    }
}

/// Request body for `PUT /projects/{id}/engineers`
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProjectEngineers {
    /// Full membership after the edit
    pub engineer_ids: Vec<Uuid>,
}

/// Request body for `PUT /engineers/{id}/projects`
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EngineerProjects {
    /// Full membership after the edit
    pub project_ids: Vec<Uuid>,
}

/// `?id=` on collection deletes; parsed by the handler so a missing id is a 400
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct DeleteQuery {
    /// Record id (UUID)
    pub id: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ProjectQuery {
    /// `priority` returns projects P1 first
    pub sort: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct EngineerQuery {
    /// `all`, `available` or `assigned`; unknown values mean `all`
    pub filter: Option<String>,
}

/// Confirmation body for deletes
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Deleted {
    pub id: Uuid,
    pub message: String,
}

impl Deleted {
    pub fn new(id: Uuid, resource: crate::error::Resource) -> Self {
        Self {
            id,
            message: format!("{} deleted successfully", resource),
        }
    }
}
