use cgrmsd::engine::progress::{PairStatus, Progress, ProgressCallback};
use indicatif::{ProgressBar, ProgressState, ProgressStyle};
use std::sync::{Arc, Mutex};
use tracing::warn;

#[derive(Clone)]
pub struct CliProgressHandler {
    pb: Arc<Mutex<ProgressBar>>,
}

impl CliProgressHandler {
    pub fn new() -> Self {
        let pb = ProgressBar::new(0)
            .with_style(Self::bar_style())
            .with_message("Initializing...");
        pb.set_draw_target(indicatif::ProgressDrawTarget::stderr());
        pb.finish_and_clear();

        Self {
            pb: Arc::new(Mutex::new(pb)),
        }
    }

    pub fn get_callback(&self) -> ProgressCallback<'static> {
        let pb_clone = self.pb.clone();

        Box::new(move |progress: Progress| {
            let Ok(pb_guard) = pb_clone.lock() else {
                warn!("Progress bar mutex was poisoned. Cannot update progress.");
                return;
            };

            match progress {
                Progress::BatchStart { native, total } => {
                    pb_guard.reset();
                    pb_guard.set_length(total);
                    pb_guard.set_position(0);
                    pb_guard.set_style(Self::bar_style());
                    pb_guard.set_message(native);
                }
                Progress::PairFinished { identifier, status } => {
                    pb_guard.inc(1);
                    match status {
                        PairStatus::Scored => {}
                        PairStatus::Skipped => pb_guard.println(format!("  - skipped {identifier}")),
                        PairStatus::Failed => pb_guard.println(format!("  ✗ failed {identifier}")),
                    }
                }
                Progress::BatchFinish {
                    scored,
                    skipped,
                    failed,
                } => {
                    if pb_guard.position() < pb_guard.length().unwrap_or(0) {
                        pb_guard.set_position(pb_guard.length().unwrap_or(0));
                    }
                    pb_guard.finish_with_message(format!(
                        "✓ {scored} scored, {skipped} skipped, {failed} failed"
                    ));
                }
                Progress::Message(msg) => {
                    if !pb_guard.is_finished() {
                        pb_guard.println(format!("  {}", msg));
                    } else {
                        pb_guard.set_message(msg);
                    }
                }
            }
        })
    }

    fn bar_style() -> ProgressStyle {
        ProgressStyle::with_template("{msg:<20} [{bar:40.cyan/blue}] {pos}/{len} ({eta})")
            .expect("Failed to create bar style template")
            .with_key(
                "eta",
                |state: &ProgressState, w: &mut dyn std::fmt::Write| {
                    let _ = write!(w, "{:.1}s", state.eta().as_secs_f64());
                },
            )
            .progress_chars("##-")
    }
}

impl Default for CliProgressHandler {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    #[test]
    fn handler_initializes_in_a_clean_state() {
        let handler = CliProgressHandler::new();
        let pb = handler.pb.lock().unwrap();
        assert_eq!(pb.length(), Some(0));
        assert!(pb.is_finished());
    }

    #[test]
    fn callback_tracks_batch_progress() {
        let handler = CliProgressHandler::new();
        let callback = handler.get_callback();

        callback(Progress::BatchStart {
            native: "native.pdb".into(),
            total: 3,
        });
        {
            let pb = handler.pb.lock().unwrap();
            assert_eq!(pb.message(), "native.pdb");
            assert_eq!(pb.length(), Some(3));
            assert_eq!(pb.position(), 0);
            assert!(!pb.is_finished());
        }

        callback(Progress::PairFinished {
            identifier: "m1.pdb".into(),
            status: PairStatus::Scored,
        });
        callback(Progress::PairFinished {
            identifier: "m2.pdb".into(),
            status: PairStatus::Failed,
        });
        assert_eq!(handler.pb.lock().unwrap().position(), 2);

        callback(Progress::BatchFinish {
            scored: 1,
            skipped: 0,
            failed: 1,
        });
        let pb = handler.pb.lock().unwrap();
        assert!(pb.is_finished());
        assert_eq!(pb.position(), 3);
        assert_eq!(pb.message(), "✓ 1 scored, 0 skipped, 1 failed");
    }

    #[test]
    fn callback_is_thread_safe() {
        let handler = CliProgressHandler::new();
        let callback = handler.get_callback();

        thread::spawn(move || {
            callback(Progress::BatchStart {
                native: "native.pdb".into(),
                total: 1,
            });
            callback(Progress::PairFinished {
                identifier: "m1.pdb".into(),
                status: PairStatus::Skipped,
            });
            callback(Progress::BatchFinish {
                scored: 0,
                skipped: 1,
                failed: 0,
            });
        })
        .join()
        .unwrap();

        let pb = handler.pb.lock().unwrap();
        assert!(pb.is_finished());
        assert_eq!(pb.position(), 1);
    }
}
