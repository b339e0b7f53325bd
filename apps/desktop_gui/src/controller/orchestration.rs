//! Command orchestration helpers from UI actions to backend command queue.

use crossbeam_channel::{Sender, TrySendError};

use crate::backend_bridge::commands::BackendCommand;

/// Queues every command in order; stops at the first one the queue refuses.
pub fn dispatch_backend_commands(
    cmd_tx: &Sender<BackendCommand>,
    cmds: impl IntoIterator<Item = BackendCommand>,
    status: &mut String,
) {
    for cmd in cmds {
        if !dispatch_backend_command(cmd_tx, cmd, status) {
            break;
        }
    }
}

pub fn dispatch_backend_command(
    cmd_tx: &Sender<BackendCommand>,
    cmd: BackendCommand,
    status: &mut String,
) -> bool {
    let cmd_name = cmd.name();
    match cmd_tx.try_send(cmd) {
        Ok(()) => {
            tracing::debug!(command = cmd_name, "queued ui->backend command");
            true
        }
        Err(TrySendError::Full(_)) => {
            *status = "UI command queue is full; please retry".to_string();
            false
        }
        Err(TrySendError::Disconnected(_)) => {
            *status =
                "Backend command processor disconnected (possible startup/runtime failure); restart the app"
                    .to_string();
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossbeam_channel::bounded;

    #[test]
    fn full_queue_reports_status_and_stops_dispatching() {
        let (tx, rx) = bounded(1);
        let mut status = String::new();

        dispatch_backend_commands(
            &tx,
            [BackendCommand::Logout, BackendCommand::Logout],
            &mut status,
        );

        assert_eq!(rx.len(), 1);
        assert!(status.contains("queue is full"));
    }

    #[test]
    fn disconnected_worker_is_reported() {
        let (tx, rx) = bounded(4);
        drop(rx);
        let mut status = String::new();

        assert!(!dispatch_backend_command(
            &tx,
            BackendCommand::Logout,
            &mut status
        ));
        assert!(status.contains("disconnected"));
    }
}
