//! Command orchestration helpers from UI actions to backend command queue.

use crossbeam_channel::{Sender, TrySendError};

use crate::backend_bridge::commands::BackendCommand;

pub const QUEUE_FULL_STATUS: &str = "UI command queue is full; please retry";
pub const QUEUE_DISCONNECTED_STATUS: &str =
    "Backend worker disconnected (possible startup/runtime failure); restart the app";

/// Returns whether the command reached the backend queue; on failure `status` explains why.
pub fn dispatch_backend_command(
    cmd_tx: &Sender<BackendCommand>,
    cmd: BackendCommand,
    status: &mut String,
) -> bool {
    let cmd_name = cmd.name();
    tracing::debug!(command = cmd_name, "queueing ui->backend command");

    match cmd_tx.try_send(cmd) {
        Ok(()) => {
            tracing::debug!(command = cmd_name, "queued ui->backend command");
            true
        }
        Err(TrySendError::Full(_)) => {
            *status = QUEUE_FULL_STATUS.to_string();
            tracing::warn!(command = cmd_name, "ui->backend command queue is full");
            false
        }
        Err(TrySendError::Disconnected(_)) => {
            *status = QUEUE_DISCONNECTED_STATUS.to_string();
            tracing::error!(command = cmd_name, "ui->backend command queue disconnected");
            false
        }
    }
}
