// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Request and response types for the API layer.
//!
//! These DTOs are distinct from domain types and represent the API contract.
//! Dates cross the boundary as `YYYY-MM-DD` strings.

use serde::{Deserialize, Serialize};

/// Who is asking, and why. Every mutating request carries one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequestContext {
    /// The operator performing the action.
    pub actor_id: String,
    /// The cause or ticket identifier.
    pub cause_id: String,
    /// A human-readable reason.
    pub cause_description: String,
}

/// API request to create a scheduling window and generate its assignments.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateWindowRequest {
    /// Actor and cause.
    #[serde(flatten)]
    pub context: RequestContext,
    /// Display name.
    pub name: String,
    /// The site being scheduled.
    pub site_id: i64,
    /// The role being scheduled.
    pub role_id: i64,
    /// The pattern matrix to rotate through.
    pub matrix_id: i64,
    /// First scheduled day.
    pub start_date: String,
    /// Last scheduled day.
    pub end_date: String,
}

/// API response for a successful window creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateWindowResponse {
    /// The store-assigned window identifier.
    pub window_id: i64,
    /// Assignments written.
    pub assignments_created: usize,
    /// Employees who received at least one assignment.
    pub employees_scheduled: usize,
    /// A success message.
    pub message: String,
}

/// API request carrying only the actor and cause.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WindowCommandRequest {
    /// Actor and cause.
    #[serde(flatten)]
    pub context: RequestContext,
}

/// API response for a regeneration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegenerateWindowResponse {
    /// The window identifier.
    pub window_id: i64,
    /// Assignments written.
    pub assignments_created: usize,
    /// Assignments removed first.
    pub assignments_replaced: usize,
}

/// API request to extend a window past its current end.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtendWindowRequest {
    /// Actor and cause.
    #[serde(flatten)]
    pub context: RequestContext,
    /// First appended day; must follow the current end.
    pub extension_start: String,
    /// Last appended day.
    pub extension_end: String,
}

/// API response for an extension.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtendWindowResponse {
    /// The window identifier.
    pub window_id: i64,
    /// Assignments appended.
    pub assignments_created: usize,
    /// Employees who received at least one new assignment.
    pub employees_affected: usize,
    /// The window end date after extension.
    pub end_date: String,
}

/// One requested cell change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CellChangeRequest {
    /// Employee whose cell is edited.
    pub employee_id: i64,
    /// Day of the cell.
    pub date: String,
    /// The new shift code.
    pub code: String,
}

/// API request to overwrite cell codes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EditCellsRequest {
    /// Actor and cause.
    #[serde(flatten)]
    pub context: RequestContext,
    /// Changes applied in order.
    pub changes: Vec<CellChangeRequest>,
}

/// A cell addressed by employee and day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CellRefInfo {
    /// The employee.
    pub employee_id: i64,
    /// The day.
    pub date: String,
}

/// A change that was not applied.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RejectedEditInfo {
    /// The employee.
    pub employee_id: i64,
    /// The day.
    pub date: String,
    /// The code as submitted.
    pub code: String,
    /// Why it was rejected.
    pub reason: String,
}

/// API response for a cell edit batch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EditCellsResponse {
    /// Cells whose code changed.
    pub changed: usize,
    /// Cells that already held the requested code.
    pub unchanged: usize,
    /// Cells that do not exist in the window.
    pub missing: Vec<CellRefInfo>,
    /// Changes with an invalid code.
    pub rejected: Vec<RejectedEditInfo>,
}

/// API request to swap two employees' codes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SwapEmployeesRequest {
    /// Actor and cause.
    #[serde(flatten)]
    pub context: RequestContext,
    /// First employee.
    pub employee_a: i64,
    /// Second employee.
    pub employee_b: i64,
}

/// API response for a swap.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SwapEmployeesResponse {
    /// Shared dates on which codes were exchanged.
    pub exchanged: usize,
}

/// API response for a status change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WindowStatusResponse {
    /// The window identifier.
    pub window_id: i64,
    /// Whether the window is active afterwards.
    pub active: bool,
}

/// Window summary for listings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WindowInfo {
    /// The window identifier.
    pub window_id: i64,
    /// Display name.
    pub name: String,
    /// The scheduled site.
    pub site_id: i64,
    /// The scheduled role.
    pub role_id: i64,
    /// The pattern matrix.
    pub matrix_id: i64,
    /// First day.
    pub start_date: String,
    /// Last day.
    pub end_date: String,
    /// Who created the window.
    pub created_by: String,
    /// When the window was created.
    pub created_at: Option<String>,
    /// Soft-delete flag.
    pub active: bool,
}

/// API response for a window listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListWindowsResponse {
    /// Matching windows, newest start first.
    pub windows: Vec<WindowInfo>,
}

/// One entry in a window's audit timeline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditEventInfo {
    /// Store-assigned event ID.
    pub event_id: Option<i64>,
    /// The action name.
    pub action: String,
    /// Action details.
    pub details: Option<String>,
    /// The actor ID.
    pub actor_id: String,
    /// The actor type.
    pub actor_type: String,
    /// The cause ID.
    pub cause_id: String,
    /// The cause description.
    pub cause_description: String,
    /// State before the action.
    pub before: String,
    /// State after the action.
    pub after: String,
}

/// API response for a window's audit timeline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditTimelineResponse {
    /// The window identifier.
    pub window_id: i64,
    /// Events, oldest first.
    pub events: Vec<AuditEventInfo>,
}
