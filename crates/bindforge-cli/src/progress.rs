use bindforge::engine::progress::{Progress, ProgressCallback};
use indicatif::{ProgressBar, ProgressStyle};
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

    pub fn callback(&self) -> ProgressCallback<'static> {
        let pb_clone = self.pb.clone();

        Box::new(move |progress: Progress| {
            let Ok(pb_guard) = pb_clone.lock() else {
                warn!("Progress bar mutex was poisoned. Cannot update progress.");
                return;
            };

            match progress {
                Progress::RunStart { quota } => {
                    pb_guard.reset();
                    pb_guard.set_length(u64::from(quota));
                    pb_guard.set_position(0);
                    pb_guard.set_style(Self::bar_style());
                    pb_guard.set_message("Accepted designs");
                }
                Progress::TrajectoryStart { name, length, seed } => {
                    pb_guard.set_message(format!("{} (l={}, s={})", name, length, seed));
                }
                Progress::TrajectoryFinish {
                    name,
                    accepted,
                    reason,
                    duration,
                } => {
                    if accepted {
                        pb_guard.inc(1);
                        pb_guard.println(format!(
                            "✓ {} accepted after {:.0}s",
                            name,
                            duration.as_secs_f64()
                        ));
                    } else {
                        let reason = reason.unwrap_or_else(|| "unspecified".to_string());
                        pb_guard.println(format!("✗ {} rejected: {}", name, reason));
                    }
                }
                Progress::DuplicateSkipped { name } => {
                    pb_guard.println(format!("  {} already exists, skipping", name));
                }
                Progress::RunFinish => {
                    pb_guard.finish_with_message("✓ Done");
                }
                Progress::Message(msg) => {
                    pb_guard.println(format!("  {}", msg));
                }
            }
        })
    }

    fn bar_style() -> ProgressStyle {
        ProgressStyle::with_template("{msg:<40} [{bar:30.cyan/blue}] {pos}/{len}")
            .expect("Failed to create bar style template")
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
    use std::time::Duration;

    #[test]
    fn handler_initializes_in_a_clean_state() {
        let handler = CliProgressHandler::new();
        let pb = handler.pb.lock().unwrap();
        assert_eq!(pb.length(), Some(0));
        assert!(pb.is_finished());
    }

    #[test]
    fn callback_tracks_accepted_designs() {
        let handler = CliProgressHandler::new();
        let callback = handler.callback();

        callback(Progress::RunStart { quota: 2 });
        {
            let pb = handler.pb.lock().unwrap();
            assert_eq!(pb.length(), Some(2));
            assert_eq!(pb.position(), 0);
        }

        callback(Progress::TrajectoryStart {
            name: "binder_l64_s1".to_string(),
            length: 64,
            seed: 1,
        });
        callback(Progress::TrajectoryFinish {
            name: "binder_l64_s1".to_string(),
            accepted: true,
            reason: None,
            duration: Duration::from_secs(3),
        });
        {
            let pb = handler.pb.lock().unwrap();
            assert_eq!(pb.position(), 1);
        }

        callback(Progress::TrajectoryFinish {
            name: "binder_l70_s2".to_string(),
            accepted: false,
            reason: Some("traj_contacts".to_string()),
            duration: Duration::from_secs(3),
        });
        {
            let pb = handler.pb.lock().unwrap();
            assert_eq!(pb.position(), 1, "rejections must not advance the bar");
        }

        callback(Progress::RunFinish);
        {
            let pb = handler.pb.lock().unwrap();
            assert!(pb.is_finished());
        }
    }

    #[test]
    fn callback_is_thread_safe() {
        let handler = CliProgressHandler::new();
        let callback = handler.callback();

        thread::spawn(move || {
            callback(Progress::RunStart { quota: 1 });
            callback(Progress::TrajectoryFinish {
                name: "binder_l64_s1".to_string(),
                accepted: true,
                reason: None,
                duration: Duration::from_secs(1),
            });
            callback(Progress::RunFinish);
        })
        .join()
        .unwrap();

        let pb = handler.pb.lock().unwrap();
        assert!(pb.is_finished());
        assert_eq!(pb.position(), 1);
    }
}
