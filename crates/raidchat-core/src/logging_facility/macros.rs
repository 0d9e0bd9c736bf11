//! Canonical lifecycle logging macros
//!
//! Every event carries `component` (the calling module), `op` and `event`.

/// Log the start of an operation
///
/// ```
/// # use raidchat_core::log_op_start;
/// log_op_start!("execute_command");
/// log_op_start!("execute_command", project_key = "PRJ");
/// ```
#[macro_export]
macro_rules! log_op_start {
    ($op:expr) => {
        tracing::info!(
            component = module_path!(),
            op = $op,
            event = $crate::types::schema::EVENT_START,
        );
    };
    ($op:expr, $($field:tt)*) => {
        tracing::info!(
            component = module_path!(),
            op = $op,
            event = $crate::types::schema::EVENT_START,
            $($field)*
        );
    };
}

/// Log the successful end of an operation
///
/// ```
/// # use raidchat_core::log_op_end;
/// log_op_end!("execute_command", duration_ms = 12);
/// ```
#[macro_export]
macro_rules! log_op_end {
    ($op:expr, duration_ms = $duration:expr) => {
        tracing::info!(
            component = module_path!(),
            op = $op,
            event = $crate::types::schema::EVENT_END,
            duration_ms = $duration,
        );
    };
    ($op:expr, duration_ms = $duration:expr, $($field:tt)*) => {
        tracing::info!(
            component = module_path!(),
            op = $op,
            event = $crate::types::schema::EVENT_END,
            duration_ms = $duration,
            $($field)*
        );
    };
}

/// Log an operation failure with its canonical kind and code
///
/// `$err` is anything convertible into `ExError`. Context set on the
/// `ExError` (project key, RAID id, field) is logged alongside.
///
/// ```
/// # use raidchat_core::{log_op_error, ChatError};
/// let err = ChatError::EmptyUpdate;
/// log_op_error!("execute_command", err, duration_ms = 3);
/// ```
#[macro_export]
macro_rules! log_op_error {
    ($op:expr, $err:expr, duration_ms = $duration:expr) => {{
        let ex_err: $crate::errors::ExError = $err.into();
        tracing::warn!(
            component = module_path!(),
            op = $op,
            event = $crate::types::schema::EVENT_END_ERROR,
            duration_ms = $duration,
            err.kind = ?ex_err.kind(),
            err.code = ex_err.code(),
            err.message = ex_err.message(),
            err.op = ex_err.op(),
            err.field = ex_err.field().map(|f| f.as_str()),
            project_key = ex_err.project_key(),
            raid_id = ex_err.raid_id(),
        );
    }};
    ($op:expr, $err:expr, duration_ms = $duration:expr, $($field:tt)*) => {{
        let ex_err: $crate::errors::ExError = $err.into();
        tracing::warn!(
            component = module_path!(),
            op = $op,
            event = $crate::types::schema::EVENT_END_ERROR,
            duration_ms = $duration,
            err.kind = ?ex_err.kind(),
            err.code = ex_err.code(),
            err.message = ex_err.message(),
            err.op = ex_err.op(),
            err.field = ex_err.field().map(|f| f.as_str()),
            project_key = ex_err.project_key(),
            raid_id = ex_err.raid_id(),
            $($field)*
        );
    }};
}
