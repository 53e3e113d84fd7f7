//! Shift-request approval workflow.
//!
//! The simpler approval track: requests are created `pending` and settle
//! terminally on `approved` or `rejected`. Approval applies the
//! type-specific side effect to the referenced shift; approving a swap is
//! recorded without reassigning the shift, which stays a manual follow-up.

use tracing::{info, warn};
use uuid::Uuid;

use crate::error::{EngineError, EngineResult};
use crate::models::{ProposedChange, RequestStatus, ShiftRequest};
use crate::store::{StaffDirectory, WorkforceStore};

/// Creates a pending shift request.
///
/// # Errors
///
/// - `StaffNotFound` if the staff id is unknown to the directory.
/// - `RecordNotFound` if the shift id is unknown.
pub fn submit_shift_request<D: StaffDirectory>(
    directory: &D,
    store: &mut WorkforceStore,
    staff_id: &str,
    shift_id: &str,
    proposed_change: ProposedChange,
) -> EngineResult<ShiftRequest> {
    if directory.staff_by_id(staff_id).is_none() {
        return Err(EngineError::StaffNotFound {
            staff_id: staff_id.to_string(),
        });
    }
    if store.shift(shift_id).is_none() {
        return Err(EngineError::RecordNotFound {
            record_id: shift_id.to_string(),
        });
    }

    let request = ShiftRequest {
        id: format!("req_{}", Uuid::new_v4()),
        staff_id: staff_id.to_string(),
        shift_id: shift_id.to_string(),
        proposed_change,
        request_status: RequestStatus::Pending,
    };

    info!(staff_id, shift_id, request_id = %request.id, "shift request submitted");
    Ok(store.upsert_shift_request(request))
}

/// Approves a pending shift request and applies its side effect.
///
/// - `time_change`: rewrites the shift's time window (and date).
/// - `day_off`: marks the shift as a day off.
/// - `swap`: no shift mutation; the approval is recorded only.
///
/// # Errors
///
/// - `RecordNotFound` if the request or its shift is unknown.
/// - `InvalidStateTransition` if the request is not `pending`.
/// - `InvalidTimeRange` if a proposed time window ends before it starts.
pub fn approve_shift_request(
    store: &mut WorkforceStore,
    request_id: &str,
) -> EngineResult<ShiftRequest> {
    let mut request = store
        .shift_request(request_id)
        .ok_or_else(|| EngineError::RecordNotFound {
            record_id: request_id.to_string(),
        })?;

    if request.request_status != RequestStatus::Pending {
        return Err(EngineError::InvalidStateTransition {
            id: request_id.to_string(),
            message: "request is not pending".to_string(),
        });
    }

    match &request.proposed_change {
        ProposedChange::TimeChange {
            start_time,
            end_time,
        } => {
            let mut shift =
                store
                    .shift(&request.shift_id)
                    .ok_or_else(|| EngineError::RecordNotFound {
                        record_id: request.shift_id.clone(),
                    })?;
            if end_time < start_time {
                return Err(EngineError::InvalidTimeRange {
                    message: format!(
                        "proposed end {} precedes proposed start {}",
                        end_time, start_time
                    ),
                });
            }
            shift.start_time = *start_time;
            shift.end_time = *end_time;
            shift.date = start_time.date();
            store.upsert_shift(shift);
            info!(request_id, shift_id = %request.shift_id, "shift times updated");
        }
        ProposedChange::DayOff => {
            let mut shift =
                store
                    .shift(&request.shift_id)
                    .ok_or_else(|| EngineError::RecordNotFound {
                        record_id: request.shift_id.clone(),
                    })?;
            shift.is_day_off = true;
            store.upsert_shift(shift);
            info!(request_id, shift_id = %request.shift_id, "shift marked as day off");
        }
        ProposedChange::Swap { target_staff_id } => {
            // Ownership is not reassigned here; the roster change is a
            // manual follow-up action.
            warn!(
                request_id,
                target_staff_id, "swap approved without shift reassignment"
            );
        }
    }

    request.request_status = RequestStatus::Approved;
    info!(request_id, "shift request approved");
    Ok(store.upsert_shift_request(request))
}

/// Rejects a pending shift request. No side effects.
///
/// # Errors
///
/// - `RecordNotFound` if the request id is unknown.
/// - `InvalidStateTransition` if the request is not `pending`.
pub fn reject_shift_request(
    store: &mut WorkforceStore,
    request_id: &str,
) -> EngineResult<ShiftRequest> {
    let mut request = store
        .shift_request(request_id)
        .ok_or_else(|| EngineError::RecordNotFound {
            record_id: request_id.to_string(),
        })?;

    if request.request_status != RequestStatus::Pending {
        return Err(EngineError::InvalidStateTransition {
            id: request_id.to_string(),
            message: "request is not pending".to_string(),
        });
    }

    request.request_status = RequestStatus::Rejected;
    info!(request_id, "shift request rejected");
    Ok(store.upsert_shift_request(request))
}
