//! Command orchestration helpers from UI actions to backend command queue.

use crossbeam_channel::{Sender, TrySendError};
use map_core::OfficeChange;

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
            *status =
                "Maps backend disconnected (possible startup/runtime failure); restart the app"
                    .to_string();
        }
    }
}

/// Cancels the running directions fetch only when the canvas stopped waiting for it.
pub fn cancel_after_office_change(change: &OfficeChange) -> Option<BackendCommand> {
    change
        .dropped_request
        .map(|_| BackendCommand::CancelDirections)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossbeam_channel::bounded;
    use map_core::{CanvasOptions, HouseGenerator, MapCanvas};
    use shared::domain::Coordinate;

    fn canvas(keep_route_on_office_change: bool) -> MapCanvas {
        MapCanvas::new(
            HouseGenerator::new(Some(3)),
            CanvasOptions {
                keep_route_on_office_change,
            },
        )
    }

    #[test]
    fn office_change_cancels_dropped_fetch() {
        let mut canvas = canvas(false);
        canvas.set_office(Coordinate::new(39.92, 32.85));
        canvas.click_house(Coordinate::new(39.95, 32.88));

        let change = canvas.set_office(Coordinate::new(41.01, 28.97));

        assert!(matches!(
            cancel_after_office_change(&change),
            Some(BackendCommand::CancelDirections)
        ));
    }

    #[test]
    fn kept_route_mode_lets_fetch_finish() {
        let mut canvas = canvas(true);
        canvas.set_office(Coordinate::new(39.92, 32.85));
        let pending = canvas.click_house(Coordinate::new(39.95, 32.88));

        let change = canvas.set_office(Coordinate::new(41.01, 28.97));

        assert!(cancel_after_office_change(&change).is_none());
        assert_eq!(canvas.awaiting_directions(), pending.map(|tagged| tagged.id));
    }

    #[test]
    fn queues_command_without_touching_status() {
        let (tx, rx) = bounded(1);
        let mut status = "idle".to_string();
        dispatch_backend_command(&tx, BackendCommand::CancelDirections, &mut status);
        assert_eq!(status, "idle");
        assert!(matches!(rx.try_recv(), Ok(BackendCommand::CancelDirections)));
    }

    #[test]
    fn full_queue_is_reported() {
        let (tx, _rx) = bounded(1);
        let mut status = String::new();
        dispatch_backend_command(&tx, BackendCommand::CancelDirections, &mut status);
        dispatch_backend_command(&tx, BackendCommand::CancelDirections, &mut status);
        assert!(status.contains("full"));
    }

    #[test]
    fn disconnected_backend_is_reported() {
        let (tx, rx) = bounded(1);
        drop(rx);
        let mut status = String::new();
        dispatch_backend_command(&tx, BackendCommand::CancelDirections, &mut status);
        assert!(status.contains("disconnected"));
    }
}
