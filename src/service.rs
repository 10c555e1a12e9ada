//! A background worker that keeps an estimator fed.
//!
//! [`BatteryTimeService`] polls an [`ObservationSource`] on its own thread,
//! turns each snapshot into an [`Observation`](crate::estimator::Observation)
//! and passes it to a shared [`ChargeTimeEstimator`]. Anything the estimator
//! produces goes to the listener the service was started with.

use std::{
    sync::{mpsc, Arc, Mutex, MutexGuard},
    thread::{self, JoinHandle},
    time::Duration,
};

use crate::{
    collection::{ObservationSource, Snapshot},
    estimator::{BatteryTimeListener, ChargeTimeEstimator, EstimatorEvent},
    reading::BatteryReading,
    utils::{
        cancellation_token::CancellationToken,
        error::{BatstatError, Result},
    },
};

/// Lets events be handed over to another thread. Events sent after the
/// receiver is gone are dropped.
impl BatteryTimeListener for mpsc::Sender<EstimatorEvent> {
    fn on_charging_estimate(&mut self, hours: u64, minutes: u64) {
        let _ = self.send(EstimatorEvent::ChargingEstimate { hours, minutes });
    }

    fn on_calculating_charging(&mut self) {
        let _ = self.send(EstimatorEvent::CalculatingCharging);
    }

    fn on_discharging_estimate(&mut self, days: u64, hours: u64, minutes: u64) {
        let _ = self.send(EstimatorEvent::DischargingEstimate {
            days,
            hours,
            minutes,
        });
    }

    fn on_calculating_discharging(&mut self) {
        let _ = self.send(EstimatorEvent::CalculatingDischarging);
    }

    fn on_full_battery(&mut self) {
        let _ = self.send(EstimatorEvent::FullBattery);
    }
}

/// An estimator that can be fed from more than one thread. The lock covers a
/// whole observation, since the histories and markers change together.
pub type SharedEstimator = Arc<Mutex<ChargeTimeEstimator>>;

/// Turn one snapshot into an observation and feed it to the estimator.
///
/// Fails if a previous holder of the lock panicked, e.g. a listener callback.
pub fn ingest<L: BatteryTimeListener + ?Sized>(
    estimator: &Mutex<ChargeTimeEstimator>, snapshot: Snapshot, listener: &mut L,
) -> Result<()> {
    let observation = BatteryReading::from(snapshot.extras).observation(snapshot.timestamp_millis);
    lock_estimator(estimator)?.observe(observation, listener);

    Ok(())
}

fn lock_estimator(
    estimator: &Mutex<ChargeTimeEstimator>,
) -> Result<MutexGuard<'_, ChargeTimeEstimator>> {
    estimator
        .lock()
        .map_err(|_| BatstatError::service("the estimator lock was poisoned"))
}

struct Worker {
    token: Arc<CancellationToken>,
    handle: JoinHandle<()>,
}

/// Runs the estimator in the background between [`BatteryTimeService::start`]
/// and [`BatteryTimeService::stop`].
pub struct BatteryTimeService {
    estimator: SharedEstimator,
    rate: Duration,
    worker: Option<Worker>,
}

impl BatteryTimeService {
    /// Create a stopped service. `rate` is how long to wait between polls of
    /// a paced source.
    pub fn new(estimator: ChargeTimeEstimator, rate: Duration) -> Self {
        Self {
            estimator: Arc::new(Mutex::new(estimator)),
            rate,
            worker: None,
        }
    }

    /// The estimator the service feeds.
    pub fn estimator(&self) -> SharedEstimator {
        self.estimator.clone()
    }

    /// Whether the worker is still polling. A worker whose source ran out is
    /// no longer running.
    pub fn is_running(&self) -> bool {
        self.worker
            .as_ref()
            .is_some_and(|worker| !worker.handle.is_finished())
    }

    /// Start polling. The source is built on the worker thread, as some
    /// platform handles can't be moved between threads; if building it fails,
    /// so does this.
    pub fn start<F, S, L>(&mut self, make_source: F, mut listener: L) -> Result<()>
    where
        F: FnOnce() -> Result<S> + Send + 'static,
        S: ObservationSource,
        L: BatteryTimeListener + Send + 'static,
    {
        if self.is_running() {
            return Err(BatstatError::service("the service is already running"));
        }

        // A previous worker may have finished on its own.
        self.join_worker()?;

        let token = Arc::new(CancellationToken::default());
        let (ready_sender, ready_receiver) = mpsc::channel();

        let handle = {
            let token = token.clone();
            let estimator = self.estimator.clone();
            let rate = self.rate;

            thread::spawn(move || {
                let mut source = match make_source() {
                    Ok(source) => {
                        let _ = ready_sender.send(Ok(()));
                        source
                    }
                    Err(err) => {
                        let _ = ready_sender.send(Err(err));
                        return;
                    }
                };

                log::debug!("battery time service started");
                poll_loop(&mut source, &estimator, &mut listener, &token, rate);
                log::debug!("battery time service stopped");
            })
        };

        let ready = ready_receiver
            .recv()
            .unwrap_or_else(|_| Err(BatstatError::service("the worker exited while starting")));

        self.worker = Some(Worker { token, handle });

        if let Err(err) = ready {
            self.join_worker()?;
            return Err(err);
        }

        Ok(())
    }

    /// Block until the worker ends on its own, e.g. when a replay runs out.
    /// The estimator keeps its state.
    pub fn wait(&mut self) -> Result<()> {
        self.join_worker()
    }

    /// Stop polling and reset the estimator. Stopping a stopped service does
    /// nothing.
    pub fn stop(&mut self) -> Result<()> {
        if let Some(worker) = &self.worker {
            worker.token.cancel();
        }

        self.join_worker()?;
        lock_estimator(&self.estimator)?.reset();

        Ok(())
    }

    fn join_worker(&mut self) -> Result<()> {
        if let Some(worker) = self.worker.take() {
            worker
                .handle
                .join()
                .map_err(|_| BatstatError::service("the worker thread panicked"))?;
        }

        Ok(())
    }
}

impl Drop for BatteryTimeService {
    fn drop(&mut self) {
        if let Some(worker) = self.worker.take() {
            worker.token.cancel();
            let _ = worker.handle.join();
        }
    }
}

fn poll_loop<S: ObservationSource, L: BatteryTimeListener>(
    source: &mut S, estimator: &Mutex<ChargeTimeEstimator>, listener: &mut L,
    token: &CancellationToken, rate: Duration,
) {
    loop {
        if token.is_cancelled() {
            break;
        }

        match source.next_snapshot() {
            Ok(Some(snapshot)) => {
                if let Err(err) = ingest(estimator, snapshot, listener) {
                    log::error!("stopping the battery time service: {err}");
                    break;
                }
            }
            Ok(None) => {
                log::debug!("source has no more snapshots");
                break;
            }
            Err(err) => log::error!("failed to collect a battery snapshot: {err}"),
        }

        if source.is_paced() && token.sleep_with_cancellation(rate) {
            break;
        }
    }
}
