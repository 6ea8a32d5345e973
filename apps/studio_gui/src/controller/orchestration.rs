//! Command orchestration helpers from UI actions to backend command queue.

use crossbeam_channel::{Sender, TrySendError};

use crate::backend_bridge::commands::BackendCommand;

pub fn dispatch_backend_command(
    cmd_tx: &Sender<BackendCommand>,
    cmd: BackendCommand,
    status: &mut String,
) {
    let cmd_name = cmd.name();
    match cmd_tx.try_send(cmd) {
        Ok(()) => tracing::debug!(command = cmd_name, "queued ui->backend command"),
        Err(TrySendError::Full(_)) => {
            *status = "UI command queue is full; please retry".to_string();
        }
        Err(TrySendError::Disconnected(_)) => {
            *status = "Backend worker stopped; restart the studio".to_string();
        }
    }
}

#[cfg(test)]
mod tests {
    use crossbeam_channel::bounded;
    use shared::domain::DesignId;

    use super::*;

    #[test]
    fn queued_commands_leave_status_alone() {
        let (tx, rx) = bounded(1);
        let mut status = String::from("ready");
        dispatch_backend_command(&tx, BackendCommand::Submit, &mut status);
        assert_eq!(status, "ready");
        assert!(matches!(rx.try_recv(), Ok(BackendCommand::Submit)));
    }

    #[test]
    fn full_queue_is_reported() {
        let (tx, _rx) = bounded(1);
        let mut status = String::new();
        dispatch_backend_command(&tx, BackendCommand::Submit, &mut status);
        dispatch_backend_command(
            &tx,
            BackendCommand::Export {
                design_id: DesignId::new(),
            },
            &mut status,
        );
        assert!(status.contains("full"), "{status}");
    }

    #[test]
    fn stopped_backend_is_reported() {
        let (tx, rx) = bounded(1);
        drop(rx);
        let mut status = String::new();
        dispatch_backend_command(&tx, BackendCommand::Submit, &mut status);
        assert!(status.contains("stopped"), "{status}");
    }
}
