// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Atomic application of a planned workflow outcome.
//!
//! One outcome is one transaction. Writes happen in a fixed order:
//!
//! 1. Ledger records of every removed source are deleted
//! 2. The request entity is inserted, updated or deleted
//! 3. Planned records are appended under the resolved source
//! 4. Balance counters are overwritten
//! 5. The audit event is inserted
//!
//! Any failure rolls the whole transition back.

use diesel::prelude::*;
use diesel::SqliteConnection;
use guardia::{EntityWrite, RecordOwner, WorkflowOutcome};
use guardia_domain::{AssignmentId, AssignmentSource, PlannedAssignment, Quantity, format_date};
use tracing::info;

use crate::backend::PersistenceBackend;
use crate::diesel_schema::{assignments, leave_requests, shift_change_requests, transfers};
use crate::error::PersistenceError;
use crate::mutations::audit::persist_audit_event;
use crate::mutations::directory::update_balances;

/// What a committed outcome wrote.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommitReceipt {
    /// Id of the request entity the outcome touched, if any.
    pub entity_id: Option<i64>,
    /// Ids of the appended ledger records, in append order.
    pub assignment_ids: Vec<AssignmentId>,
    /// Number of ledger records removed.
    pub removed: usize,
    /// Id of the persisted audit event.
    pub event_id: i64,
}

/// Applies a workflow outcome in a single transaction.
///
/// # Errors
///
/// Returns an error if any write fails; nothing is persisted in that case.
pub fn commit_outcome(
    conn: &mut SqliteConnection,
    outcome: &WorkflowOutcome,
) -> Result<CommitReceipt, PersistenceError> {
    conn.transaction::<_, PersistenceError, _>(|conn| {
        let mut removed: usize = 0;
        for source in &outcome.removals {
            removed += delete_records_for_source(conn, *source)?;
        }

        let entity_id: Option<i64> = write_entity(conn, &outcome.entity)?;

        let mut assignment_ids: Vec<AssignmentId> = Vec::with_capacity(outcome.appends.len());
        if !outcome.appends.is_empty() {
            let source: AssignmentSource = resolve_source(outcome, entity_id)?;
            for record in &outcome.appends {
                assignment_ids.push(insert_record(conn, record, source)?);
            }
        }

        if let Some(write) = &outcome.balances {
            update_balances(conn, write.employee_id, &write.balances)?;
        }

        let event_id: i64 = persist_audit_event(conn, &outcome.audit_event)?;

        info!(
            action = %outcome.audit_event.action.name,
            entity_id = ?entity_id,
            removed,
            appended = assignment_ids.len(),
            event_id,
            "Committed workflow outcome"
        );

        Ok(CommitReceipt {
            entity_id,
            assignment_ids,
            removed,
            event_id,
        })
    })
}

fn resolve_source(
    outcome: &WorkflowOutcome,
    entity_id: Option<i64>,
) -> Result<AssignmentSource, PersistenceError> {
    match outcome.owner {
        RecordOwner::Roster => Ok(AssignmentSource::Roster),
        RecordOwner::Requirement => Ok(AssignmentSource::Requirement),
        RecordOwner::Entity => entity_id
            .and_then(|id| outcome.entity.owning_source(id))
            .ok_or_else(|| {
                PersistenceError::InvalidOutcome(String::from(
                    "ledger records planned without an owning request",
                ))
            }),
    }
}

/// Deletes every ledger record owned by `source`.
fn delete_records_for_source(
    conn: &mut SqliteConnection,
    source: AssignmentSource,
) -> Result<usize, PersistenceError> {
    let deleted: usize = match source {
        AssignmentSource::Leave(id) => diesel::delete(
            assignments::table.filter(assignments::leave_request_id.eq(id.value())),
        )
        .execute(conn)?,
        AssignmentSource::ShiftChange(id) => diesel::delete(
            assignments::table.filter(assignments::shift_change_request_id.eq(id.value())),
        )
        .execute(conn)?,
        AssignmentSource::Transfer(id) => diesel::delete(
            assignments::table.filter(assignments::transfer_id.eq(id.value())),
        )
        .execute(conn)?,
        AssignmentSource::Roster | AssignmentSource::Requirement => {
            return Err(PersistenceError::InvalidOutcome(format!(
                "{} records have no owner to remove by",
                source.tag()
            )));
        }
    };
    Ok(deleted)
}

fn insert_record(
    conn: &mut SqliteConnection,
    record: &PlannedAssignment,
    source: AssignmentSource,
) -> Result<AssignmentId, PersistenceError> {
    let (leave_request_id, shift_change_request_id, transfer_id): (
        Option<i64>,
        Option<i64>,
        Option<i64>,
    ) = match source {
        AssignmentSource::Leave(id) => (Some(id.value()), None, None),
        AssignmentSource::ShiftChange(id) => (None, Some(id.value()), None),
        AssignmentSource::Transfer(id) => (None, None, Some(id.value())),
        AssignmentSource::Roster | AssignmentSource::Requirement => (None, None, None),
    };

    diesel::insert_into(assignments::table)
        .values((
            assignments::employee_id.eq(record.employee_id.value()),
            assignments::date.eq(format_date(record.date)?),
            assignments::shift.eq(record.shift.as_str()),
            assignments::origin_brigade_id.eq(record.origin_brigade_id.map(|id| id.value())),
            assignments::destination_brigade_id.eq(record.destination_brigade_id.value()),
            assignments::kind.eq(record.kind.as_str()),
            assignments::source.eq(source.tag()),
            assignments::leave_request_id.eq(leave_request_id),
            assignments::shift_change_request_id.eq(shift_change_request_id),
            assignments::transfer_id.eq(transfer_id),
        ))
        .execute(conn)?;
    Ok(AssignmentId::new(conn.get_last_insert_rowid()?))
}

/// Applies the entity write and returns the id of the entity it touched.
#[allow(clippy::too_many_lines)]
fn write_entity(
    conn: &mut SqliteConnection,
    entity: &EntityWrite,
) -> Result<Option<i64>, PersistenceError> {
    let affected: usize = match entity {
        EntityWrite::None => return Ok(None),
        EntityWrite::InsertLeave(details) => {
            diesel::insert_into(leave_requests::table)
                .values((
                    leave_requests::employee_id.eq(details.employee_id.value()),
                    leave_requests::leave_type.eq(details.leave_type.as_str()),
                    leave_requests::start_date.eq(format_date(details.start_date)?),
                    leave_requests::end_date.eq(format_date(details.end_date)?),
                    leave_requests::shift.eq(details.shift.map(|token| token.as_str())),
                    leave_requests::hours.eq(details.hours.map(Quantity::hundredths)),
                ))
                .execute(conn)?;
            return Ok(Some(conn.get_last_insert_rowid()?));
        }
        EntityWrite::UpdateLeaveState {
            leave_request_id,
            from,
            state,
        } => {
            let updated: usize = diesel::update(leave_requests::table)
                .filter(leave_requests::leave_request_id.eq(leave_request_id.value()))
                .filter(leave_requests::state.eq(from.as_str()))
                .set(leave_requests::state.eq(state.as_str()))
                .execute(conn)?;
            if updated == 0 {
                let current: Option<String> = leave_requests::table
                    .filter(leave_requests::leave_request_id.eq(leave_request_id.value()))
                    .select(leave_requests::state)
                    .first(conn)
                    .optional()?;
                if let Some(current) = current {
                    return Err(PersistenceError::StaleState(format!(
                        "leave request {leave_request_id} is {current}, expected {from}"
                    )));
                }
            }
            updated
        }
        EntityWrite::DeleteLeave(leave_request_id) => diesel::delete(
            leave_requests::table
                .filter(leave_requests::leave_request_id.eq(leave_request_id.value())),
        )
        .execute(conn)?,
        EntityWrite::InsertShiftChange(details) => {
            let secondary_date: Option<String> =
                details.secondary_date.map(format_date).transpose()?;
            diesel::insert_into(shift_change_requests::table)
                .values((
                    shift_change_requests::employee1_id.eq(details.employee1_id.value()),
                    shift_change_requests::employee2_id.eq(details.employee2_id.value()),
                    shift_change_requests::brigade1_id.eq(details.brigade1_id.value()),
                    shift_change_requests::brigade2_id.eq(details.brigade2_id.value()),
                    shift_change_requests::date.eq(format_date(details.date)?),
                    shift_change_requests::secondary_date.eq(secondary_date),
                    shift_change_requests::shift.eq(details.shift.as_str()),
                    shift_change_requests::reason.eq(&details.reason),
                ))
                .execute(conn)?;
            return Ok(Some(conn.get_last_insert_rowid()?));
        }
        EntityWrite::UpdateShiftChangeState {
            shift_change_request_id,
            from,
            state,
        } => {
            let updated: usize = diesel::update(shift_change_requests::table)
                .filter(
                    shift_change_requests::shift_change_request_id
                        .eq(shift_change_request_id.value()),
                )
                .filter(shift_change_requests::state.eq(from.as_str()))
                .set(shift_change_requests::state.eq(state.as_str()))
                .execute(conn)?;
            if updated == 0 {
                let current: Option<String> = shift_change_requests::table
                    .filter(
                        shift_change_requests::shift_change_request_id
                            .eq(shift_change_request_id.value()),
                    )
                    .select(shift_change_requests::state)
                    .first(conn)
                    .optional()?;
                if let Some(current) = current {
                    return Err(PersistenceError::StaleState(format!(
                        "shift change request {shift_change_request_id} is {current}, expected {from}"
                    )));
                }
            }
            updated
        }
        EntityWrite::DeleteShiftChange(shift_change_request_id) => diesel::delete(
            shift_change_requests::table.filter(
                shift_change_requests::shift_change_request_id
                    .eq(shift_change_request_id.value()),
            ),
        )
        .execute(conn)?,
        EntityWrite::InsertTransfer(details) => {
            diesel::insert_into(transfers::table)
                .values((
                    transfers::employee_id.eq(details.employee_id.value()),
                    transfers::origin_brigade_id.eq(details.origin_brigade_id.value()),
                    transfers::destination_brigade_id
                        .eq(details.destination_brigade_id.value()),
                    transfers::date.eq(format_date(details.date)?),
                    transfers::shift.eq(details.shift.as_str()),
                    transfers::hours.eq(details.hours.hundredths()),
                ))
                .execute(conn)?;
            return Ok(Some(conn.get_last_insert_rowid()?));
        }
        EntityWrite::UpdateTransfer(transfer) => diesel::update(transfers::table)
            .filter(transfers::transfer_id.eq(transfer.transfer_id.value()))
            .set((
                transfers::shift.eq(transfer.details.shift.as_str()),
                transfers::hours.eq(transfer.details.hours.hundredths()),
            ))
            .execute(conn)?,
        EntityWrite::DeleteTransfer(transfer_id) => diesel::delete(
            transfers::table.filter(transfers::transfer_id.eq(transfer_id.value())),
        )
        .execute(conn)?,
    };

    if affected == 0 {
        return Err(PersistenceError::NotFound(format!(
            "request entity {:?}",
            entity.existing_id()
        )));
    }
    Ok(entity.existing_id())
}
