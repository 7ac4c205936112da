// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::Persistence;
use crate::tests::helpers::{
    create_stored_window, create_test_actor, create_test_cause, seed_directory,
};
use rota_audit::{AuditEvent, AuditSink, SchedulingEvent};
use rota_domain::EmployeeId;
use time::macros::date;

#[test]
fn test_audit_event_round_trip() {
    let mut persistence = Persistence::new_in_memory().unwrap();
    let seeded = seed_directory(&mut persistence, 1);
    let state = create_stored_window(
        &mut persistence,
        &seeded,
        date!(2026 - 03 - 01),
        date!(2026 - 03 - 02),
    );
    let window_id = state.window.id.unwrap();

    let event: AuditEvent = SchedulingEvent::CellEdited {
        employee_id: EmployeeId::new(1),
        date: date!(2026 - 03 - 02),
        old_code: String::from("B"),
        new_code: String::from("N"),
    }
    .into_audit_event(&create_test_actor(), &create_test_cause())
    .for_window(window_id);

    let event_id = persistence.persist_audit_event(&event).unwrap();
    let stored = persistence.get_audit_event(event_id).unwrap();

    assert_eq!(stored.event_id, Some(event_id));
    assert_eq!(stored.window_id, Some(window_id));
    assert_eq!(stored.actor, event.actor);
    assert_eq!(stored.cause, event.cause);
    assert_eq!(stored.action, event.action);
    assert_eq!(stored.before, event.before);
    assert_eq!(stored.after, event.after);
}

#[test]
fn test_window_audit_is_ordered_and_scoped() {
    let mut persistence = Persistence::new_in_memory().unwrap();
    let seeded = seed_directory(&mut persistence, 1);
    let first = create_stored_window(
        &mut persistence,
        &seeded,
        date!(2026 - 03 - 01),
        date!(2026 - 03 - 02),
    );
    let second = create_stored_window(
        &mut persistence,
        &seeded,
        date!(2026 - 04 - 01),
        date!(2026 - 04 - 02),
    );
    let first_id = first.window.id.unwrap();

    for event in [
        SchedulingEvent::WindowDeactivated,
        SchedulingEvent::WindowRestored,
    ] {
        let audit = event
            .into_audit_event(&create_test_actor(), &create_test_cause())
            .for_window(first_id);
        persistence.append(&audit).unwrap();
    }
    let other = SchedulingEvent::WindowDeactivated
        .into_audit_event(&create_test_actor(), &create_test_cause())
        .for_window(second.window.id.unwrap());
    persistence.append(&other).unwrap();

    let names: Vec<String> = persistence
        .get_window_audit(first_id)
        .unwrap()
        .into_iter()
        .map(|e| e.action.name)
        .collect();
    assert_eq!(names, vec!["WindowDeactivated", "WindowRestored"]);
}

#[test]
fn test_unbound_event_is_stored_without_window() {
    let mut persistence = Persistence::new_in_memory().unwrap();

    let event = SchedulingEvent::WindowDeactivated
        .into_audit_event(&create_test_actor(), &create_test_cause());
    let event_id = persistence.append(&event).unwrap();

    assert_eq!(persistence.get_audit_event(event_id).unwrap().window_id, None);
}
