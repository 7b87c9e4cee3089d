use indicatif::{ProgressBar, ProgressDrawTarget, ProgressState, ProgressStyle};
use ribosim::engine::progress::{Progress, ProgressCallback};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tracing::warn;

const SPINNER_TICK_MS: u64 = 80;

/// Renders engine progress events as an `indicatif` spinner and step bar on stderr.
#[derive(Clone)]
pub struct CliProgressHandler {
    pb: Arc<Mutex<ProgressBar>>,
}

impl CliProgressHandler {
    pub fn new() -> Self {
        Self::with_draw_target(ProgressDrawTarget::stderr())
    }

    /// A handler that tracks state without drawing anything.
    #[cfg(test)]
    pub fn hidden() -> Self {
        Self::with_draw_target(ProgressDrawTarget::hidden())
    }

    fn with_draw_target(target: ProgressDrawTarget) -> Self {
        let pb = ProgressBar::new(0)
            .with_style(Self::spinner_style())
            .with_message("Initializing...");
        pb.set_draw_target(target);
        pb.disable_steady_tick();
        pb.finish_and_clear();

        Self {
            pb: Arc::new(Mutex::new(pb)),
        }
    }

    pub fn get_callback(&self) -> ProgressCallback<'static> {
        let pb_clone = self.pb.clone();

        Box::new(move |progress: Progress| {
            let Ok(mut pb_guard) = pb_clone.lock() else {
                warn!("Progress bar mutex was poisoned. Cannot update progress.");
                return;
            };

            match progress {
                Progress::PhaseStart { name } => {
                    pb_guard.reset();
                    pb_guard.set_length(0);
                    pb_guard.set_style(Self::spinner_style());
                    pb_guard.enable_steady_tick(Duration::from_millis(SPINNER_TICK_MS));
                    pb_guard.set_message(name.to_string());
                }
                Progress::PhaseFinish => {
                    pb_guard.disable_steady_tick();
                    pb_guard.finish_with_message("✓ Done");
                }
                Progress::StepsStart { total } => {
                    pb_guard.disable_steady_tick();
                    pb_guard.reset();
                    pb_guard.set_length(total);
                    pb_guard.set_position(0);
                    pb_guard.set_style(Self::bar_style());
                }
                Progress::StepCompleted { entities, .. } => {
                    pb_guard.inc(1);
                    pb_guard.set_message(format!("{} entities", entities));
                }
                Progress::StepsFinish => {
                    let total = pb_guard.length().unwrap_or(0);
                    if pb_guard.position() < total {
                        pb_guard.set_position(total);
                    }
                    pb_guard.finish();
                }
                Progress::Aborted { step } => {
                    pb_guard.disable_steady_tick();
                    pb_guard.abandon_with_message(format!("✗ Aborted at step {}", step));
                }
            }
        })
    }

    fn spinner_style() -> ProgressStyle {
        ProgressStyle::with_template("{spinner:.green} {msg}")
            .expect("Failed to create spinner style template")
    }

    fn bar_style() -> ProgressStyle {
        ProgressStyle::with_template(
            "{msg:<14} [{bar:40.cyan/blue}] step {pos}/{len} ({rate})",
        )
        .expect("Failed to create bar style template")
        .with_key(
            "rate",
            |state: &ProgressState, w: &mut dyn std::fmt::Write| {
                let _ = write!(w, "{:.0} steps/s", state.per_sec());
            },
        )
        .progress_chars("##-")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    #[test]
    fn handler_initializes_in_a_clean_state() {
        let handler = CliProgressHandler::hidden();
        let pb = handler.pb.lock().unwrap();
        assert_eq!(pb.length(), Some(0));
        assert!(pb.is_finished());
    }

    #[test]
    fn callback_tracks_a_simulation_run() {
        let handler = CliProgressHandler::hidden();
        let callback = handler.get_callback();

        callback(Progress::PhaseStart { name: "Simulation" });
        {
            let pb = handler.pb.lock().unwrap();
            assert_eq!(pb.message(), "Simulation");
            assert!(!pb.is_finished());
        }

        callback(Progress::StepsStart { total: 50 });
        {
            let pb = handler.pb.lock().unwrap();
            assert_eq!(pb.length(), Some(50));
            assert_eq!(pb.position(), 0);
        }

        for step in 1..=3 {
            callback(Progress::StepCompleted {
                step,
                entities: 60 + step as usize,
            });
        }
        {
            let pb = handler.pb.lock().unwrap();
            assert_eq!(pb.position(), 3);
            assert_eq!(pb.message(), "63 entities");
        }

        callback(Progress::StepsFinish);
        {
            let pb = handler.pb.lock().unwrap();
            assert!(pb.is_finished());
            assert_eq!(pb.position(), 50);
        }

        callback(Progress::PhaseFinish);
        assert_eq!(handler.pb.lock().unwrap().message(), "✓ Done");
    }

    #[test]
    fn callback_is_thread_safe() {
        let handler = CliProgressHandler::hidden();
        let callback = handler.get_callback();

        thread::spawn(move || {
            callback(Progress::PhaseStart {
                name: "Thread Test",
            });
            callback(Progress::StepCompleted {
                step: 1,
                entities: 2,
            });
            callback(Progress::PhaseFinish);
        })
        .join()
        .unwrap();

        let pb = handler.pb.lock().unwrap();
        assert!(pb.is_finished());
        assert_eq!(pb.message(), "✓ Done");
    }

    #[test]
    fn abort_abandons_the_bar_with_a_message() {
        let handler = CliProgressHandler::hidden();
        let callback = handler.get_callback();

        callback(Progress::StepsStart { total: 10 });
        callback(Progress::StepCompleted {
            step: 1,
            entities: 5,
        });
        callback(Progress::Aborted { step: 2 });

        let pb = handler.pb.lock().unwrap();
        assert!(pb.is_finished());
        assert_eq!(pb.position(), 1);
        assert_eq!(pb.message(), "✗ Aborted at step 2");
    }
}
