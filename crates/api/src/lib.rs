// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API boundary for the Rota shift scheduler.
//!
//! Handlers translate request DTOs into core commands, persist the computed
//! transitions and dispatch their audit events. Domain and core errors never
//! cross this boundary untranslated.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(clippy::multiple_crate_versions)]

mod dates;
mod error;
mod grid;
mod handlers;
mod holidays;
mod request_response;

#[cfg(test)]
mod tests;

pub use dates::{DATE_FORMAT, format_date, parse_date_field};
pub use error::{
    ApiError, translate_core_error, translate_domain_error, translate_persistence_error,
};
pub use grid::{GridDay, GridRow, ScheduleGrid, build_grid, grid_to_csv};
pub use handlers::{
    create_window, deactivate_window, dispatch_audit, edit_cells, extend_window,
    get_schedule_grid, get_schedule_grid_csv, get_window_audit, list_windows, regenerate_window,
    restore_window, swap_employees,
};
pub use holidays::{HolidayCalendar, HolidayError, InMemoryHolidayCalendar};
pub use request_response::{
    AuditEventInfo, AuditTimelineResponse, CellChangeRequest, CellRefInfo, CreateWindowRequest,
    CreateWindowResponse, EditCellsRequest, EditCellsResponse, ExtendWindowRequest,
    ExtendWindowResponse, ListWindowsResponse, RegenerateWindowResponse, RejectedEditInfo,
    RequestContext, SwapEmployeesRequest, SwapEmployeesResponse, WindowCommandRequest, WindowInfo,
    WindowStatusResponse,
};
