// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Audit timeline queries.

use diesel::prelude::*;
use diesel::SqliteConnection;
use rota_audit::{Action, Actor, AuditEvent, Cause, StateSnapshot};
use rota_domain::WindowId;

use crate::data_models::{ActionData, ActorData, AuditEventRow, CauseData, StateSnapshotData};
use crate::diesel_schema::audit_events;
use crate::error::PersistenceError;

fn event_from_row(row: AuditEventRow) -> Result<AuditEvent, PersistenceError> {
    let actor_data: ActorData = serde_json::from_str(&row.actor_json)?;
    let cause_data: CauseData = serde_json::from_str(&row.cause_json)?;
    let action_data: ActionData = serde_json::from_str(&row.action_json)?;
    let before_data: StateSnapshotData = serde_json::from_str(&row.before_snapshot_json)?;
    let after_data: StateSnapshotData = serde_json::from_str(&row.after_snapshot_json)?;

    if action_data.name != row.action_name {
        return Err(PersistenceError::ReconstructionError(format!(
            "event {} action '{}' does not match indexed name '{}'",
            row.event_id, action_data.name, row.action_name
        )));
    }

    let event: AuditEvent = AuditEvent::new(
        Actor::new(actor_data.id, actor_data.actor_type),
        Cause::new(cause_data.id, cause_data.description),
        Action::new(action_data.name, action_data.details),
        StateSnapshot::new(before_data.data),
        StateSnapshot::new(after_data.data),
    )
    .with_event_id(row.event_id);

    Ok(match row.window_id {
        Some(window_id) => event.for_window(WindowId::new(window_id)),
        None => event,
    })
}

/// Retrieves an audit event by ID.
///
/// # Errors
///
/// Returns `NotFound` if the event does not exist, or an error if it cannot
/// be deserialized.
pub fn get_audit_event(
    conn: &mut SqliteConnection,
    event_id: i64,
) -> Result<AuditEvent, PersistenceError> {
    let row: AuditEventRow = audit_events::table
        .filter(audit_events::event_id.eq(event_id))
        .select(AuditEventRow::as_select())
        .first(conn)
        .optional()?
        .ok_or_else(|| PersistenceError::NotFound(format!("Audit event {event_id}")))?;

    event_from_row(row)
}

/// Retrieves the audit timeline of a window, oldest first.
///
/// # Errors
///
/// Returns an error if the query fails or an event cannot be deserialized.
pub fn get_window_audit(
    conn: &mut SqliteConnection,
    window_id: WindowId,
) -> Result<Vec<AuditEvent>, PersistenceError> {
    let rows: Vec<AuditEventRow> = audit_events::table
        .filter(audit_events::window_id.eq(window_id.value()))
        .order(audit_events::event_id.asc())
        .select(AuditEventRow::as_select())
        .load(conn)?;

    rows.into_iter().map(event_from_row).collect()
}
