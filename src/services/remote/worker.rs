//! Background thread for every call to the schedule authority.
//!
//! The interface thread hands jobs to the worker and polls for results each
//! frame, so neither start-up loading nor an override ever blocks drawing.
//! Override completions arrive in the order the backend answered them and are
//! applied as they come: the last one to resolve for an event wins.

use std::sync::mpsc::{self, Receiver, Sender};
use std::thread::{self, JoinHandle};

use super::{AuthorityError, OverrideRequest, OverrideResponse, ScheduleAuthority};
use crate::models::settings::AppConfig;
use crate::services::bootstrap::{load_initial, InitialData};
use crate::services::notice::{Notice, NoticeBoard};

/// A finished override call together with the request that produced it.
#[derive(Debug)]
pub struct OverrideCompletion {
    pub request: OverrideRequest,
    pub result: Result<OverrideResponse, AuthorityError>,
}

/// Start-up data and the notices raised while loading it.
#[derive(Debug)]
pub struct InitialLoad {
    pub data: InitialData,
    pub notices: Vec<Notice>,
}

enum Job {
    LoadInitial(AppConfig),
    Override(OverrideRequest),
}

/// Owns the authority on a named thread.
///
/// Dropping the worker closes its job channel. The thread is detached, not
/// joined: a call still in flight finishes in the background and its result is
/// discarded, so closing the window never waits on the network.
pub struct AuthorityWorker {
    jobs: Sender<Job>,
    completions: Receiver<OverrideCompletion>,
    loaded: Receiver<InitialLoad>,
    handle: Option<JoinHandle<()>>,
}

impl AuthorityWorker {
    /// Start a worker that owns `authority`. `notify` runs after every finished
    /// job, typically to wake the interface thread.
    pub fn spawn<A, F>(authority: A, notify: F) -> Self
    where
        A: ScheduleAuthority + Send + 'static,
        F: Fn() + Send + 'static,
    {
        let (job_tx, job_rx) = mpsc::channel::<Job>();
        let (done_tx, done_rx) = mpsc::channel();
        let (loaded_tx, loaded_rx) = mpsc::channel();

        let handle = thread::Builder::new()
            .name("schedule-authority".to_string())
            .spawn(move || {
                for job in job_rx {
                    let delivered = match job {
                        Job::LoadInitial(config) => {
                            let mut notices = NoticeBoard::new();
                            let data = load_initial(&authority, &config, &mut notices);
                            loaded_tx
                                .send(InitialLoad {
                                    data,
                                    notices: notices.drain(),
                                })
                                .is_ok()
                        }
                        Job::Override(request) => {
                            let result = authority.submit_override(&request);
                            done_tx.send(OverrideCompletion { request, result }).is_ok()
                        }
                    };
                    if !delivered {
                        break;
                    }
                    notify();
                }
                log::debug!("Schedule authority worker stopped");
            });

        let handle = match handle {
            Ok(handle) => Some(handle),
            Err(err) => {
                log::error!("Failed to start schedule authority worker: {}", err);
                None
            }
        };

        Self {
            jobs: job_tx,
            completions: done_rx,
            loaded: loaded_rx,
            handle,
        }
    }

    fn send(&self, job: Job) -> Result<(), AuthorityError> {
        if self.handle.is_none() {
            return Err(AuthorityError::Transport("schedule worker is not running".to_string()));
        }
        self.jobs
            .send(job)
            .map_err(|_| AuthorityError::Transport("schedule worker stopped".to_string()))
    }

    /// Queue the start-up fetches. The result is picked up with [`Self::poll_initial`].
    pub fn load_initial(&self, config: AppConfig) -> Result<(), AuthorityError> {
        self.send(Job::LoadInitial(config))
    }

    /// Queue an override. Fails only if the worker thread is gone.
    pub fn submit(&self, request: OverrideRequest) -> Result<(), AuthorityError> {
        self.send(Job::Override(request))
    }

    /// The start-up data, once it has arrived.
    pub fn poll_initial(&self) -> Option<InitialLoad> {
        self.loaded.try_recv().ok()
    }

    /// Drain every override completion that has arrived since the last call.
    pub fn poll(&self) -> Vec<OverrideCompletion> {
        self.completions.try_iter().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::event::ScheduleEvent;
    use crate::models::faculty::Faculty;
    use crate::models::room::RoomCategories;
    use crate::models::time_slot::TimeWindow;
    use crate::services::remote::DaysResponse;
    use crate::services::bootstrap::CONFIG_LOAD_FAILURE_MESSAGE;
    use crate::services::notice::NoticeLevel;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;
    use std::time::{Duration, Instant};

    struct EchoAuthority;

    impl ScheduleAuthority for EchoAuthority {
        fn fetch_rooms(&self) -> Result<RoomCategories, AuthorityError> {
            Ok(RoomCategories::default())
        }
        fn fetch_days(&self) -> Result<DaysResponse, AuthorityError> {
            Ok(DaysResponse::default())
        }
        fn fetch_time_window(&self) -> Result<TimeWindow, AuthorityError> {
            Ok(TimeWindow::default())
        }
        fn fetch_schedule(&self) -> Result<Vec<ScheduleEvent>, AuthorityError> {
            Ok(Vec::new())
        }
        fn fetch_faculty(&self) -> Result<Vec<Faculty>, AuthorityError> {
            Ok(Vec::new())
        }
        fn submit_override(&self, request: &OverrideRequest) -> Result<OverrideResponse, AuthorityError> {
            if request.new_room == "Nowhere" {
                return Err(AuthorityError::Transport("connection refused".into()));
            }
            Ok(OverrideResponse {
                status: "success".into(),
                event: None,
                detail: None,
            })
        }
    }

    fn request(id: &str, room: &str) -> OverrideRequest {
        OverrideRequest {
            schedule_id: id.into(),
            new_start: "09:00".into(),
            new_room: room.into(),
            new_day: Some("Monday".into()),
        }
    }

    fn wait_for(worker: &AuthorityWorker, count: usize) -> Vec<OverrideCompletion> {
        let mut done = Vec::new();
        for _ in 0..200 {
            done.extend(worker.poll());
            if done.len() >= count {
                break;
            }
            std::thread::sleep(Duration::from_millis(10));
        }
        done
    }

    #[test]
    fn test_completions_come_back_in_order() {
        let notified = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&notified);
        let worker = AuthorityWorker::spawn(EchoAuthority, move || {
            counter.fetch_add(1, Ordering::SeqCst);
        });

        worker.submit(request("1", "R101")).unwrap();
        worker.submit(request("2", "Nowhere")).unwrap();

        let done = wait_for(&worker, 2);
        assert_eq!(done.len(), 2);
        assert_eq!(done[0].request.schedule_id, "1");
        assert!(done[0].result.is_ok());
        assert!(matches!(done[1].result, Err(AuthorityError::Transport(_))));

        // The wake-up follows each delivery, so give the second one a moment.
        for _ in 0..200 {
            if notified.load(Ordering::SeqCst) == 2 {
                break;
            }
            std::thread::sleep(Duration::from_millis(10));
        }
        assert_eq!(notified.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_poll_is_empty_without_work() {
        let worker = AuthorityWorker::spawn(EchoAuthority, || {});
        assert!(worker.poll().is_empty());
    }

    /// Backend that hangs on its first call until `gate` is released or dropped.
    struct GatedAuthority {
        gate: mpsc::Receiver<()>,
    }

    impl ScheduleAuthority for GatedAuthority {
        fn fetch_rooms(&self) -> Result<RoomCategories, AuthorityError> {
            let _ = self.gate.recv();
            Err(AuthorityError::Transport("connection refused".into()))
        }
        fn fetch_days(&self) -> Result<DaysResponse, AuthorityError> {
            Err(AuthorityError::Transport("connection refused".into()))
        }
        fn fetch_time_window(&self) -> Result<TimeWindow, AuthorityError> {
            Err(AuthorityError::Transport("connection refused".into()))
        }
        fn fetch_schedule(&self) -> Result<Vec<ScheduleEvent>, AuthorityError> {
            Ok(Vec::new())
        }
        fn fetch_faculty(&self) -> Result<Vec<Faculty>, AuthorityError> {
            Ok(Vec::new())
        }
        fn submit_override(&self, _request: &OverrideRequest) -> Result<OverrideResponse, AuthorityError> {
            let _ = self.gate.recv();
            Err(AuthorityError::Transport("timed out".into()))
        }
    }

    #[test]
    fn test_initial_load_runs_off_the_calling_thread() {
        let (release, gate) = mpsc::channel();
        let worker = AuthorityWorker::spawn(GatedAuthority { gate }, || {});
        let config = AppConfig::default();

        worker.load_initial(config.clone()).unwrap();
        assert!(worker.poll_initial().is_none());

        release.send(()).unwrap();
        let mut loaded = None;
        for _ in 0..200 {
            loaded = worker.poll_initial();
            if loaded.is_some() {
                break;
            }
            std::thread::sleep(Duration::from_millis(10));
        }

        let loaded = loaded.expect("initial load should arrive");
        assert_eq!(loaded.data.grid.window, config.fallback_window());
        assert!(loaded.data.grid.days.is_empty());
        assert_eq!(loaded.notices.len(), 1);
        assert_eq!(loaded.notices[0].level, NoticeLevel::Error);
        assert_eq!(loaded.notices[0].message, CONFIG_LOAD_FAILURE_MESSAGE);
    }

    #[test]
    fn test_drop_does_not_wait_for_in_flight_call() {
        let (release, gate) = mpsc::channel::<()>();
        let worker = AuthorityWorker::spawn(GatedAuthority { gate }, || {});
        worker.submit(request("1", "R101")).unwrap();

        let started = Instant::now();
        drop(worker);
        assert!(started.elapsed() < Duration::from_secs(1));

        // Let the detached thread finish.
        drop(release);
    }
}
