use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

use crossbeam_channel::{unbounded, Receiver, Sender};

use crate::domain::model::{Grid, UnitError, UnitId, Verdict, GRID_SIZE, UNIT_COUNT};
use crate::validator::event::ValidationEvent;
use crate::validator::unit::check_unit;

/// Result of one unit check, sent back to the aggregation loop.
#[derive(Debug, Clone, Copy)]
struct UnitOutcome {
    unit: UnitId,
    result: Result<(), UnitError>,
}

/// What one coordinator run produced, verdict plus run counters.
#[derive(Debug, Clone)]
pub struct ValidationSummary {
    pub verdict: Verdict,
    pub units_checked: usize,
    pub workers: usize,
    pub elapsed: Duration,
}

/// Fans the 27 unit checks out over a fixed worker pool and reduces the
/// outcomes into a single verdict.
///
/// Workers only read the grid (shared behind `Arc`); every outcome travels
/// back over a channel, so aggregation needs no lock. The first invalid
/// outcome raises the abort flag, which workers consult between units,
/// never mid-unit.
pub struct Coordinator {
    workers: usize,
    abort_flag: Arc<AtomicBool>,
}

impl Coordinator {
    /// `workers == 0` means one per CPU. The pool is clamped to the unit
    /// count: more workers than units is pure overhead.
    pub fn new(workers: usize) -> Self {
        let resolved = if workers == 0 {
            num_cpus::get()
        } else {
            workers
        };

        Self {
            workers: resolved.clamp(1, UNIT_COUNT),
            abort_flag: Arc::new(AtomicBool::new(false)),
        }
    }

    pub fn workers(&self) -> usize {
        self.workers
    }

    pub fn is_aborted(&self) -> bool {
        self.abort_flag.load(Ordering::Relaxed)
    }

    /// Validates every unit of the grid and reduces to one verdict.
    /// Units are dispatched in canonical order (rows, columns, blocks),
    /// so a single-worker run reports the canonically first failing unit.
    pub fn run(&self, grid: Grid, event_tx: Sender<ValidationEvent>) -> ValidationSummary {
        let started = Instant::now();
        let grid = Arc::new(grid);

        let (task_tx, task_rx) = unbounded::<UnitId>();
        let (outcome_tx, outcome_rx) = unbounded::<UnitOutcome>();

        for unit in UnitId::all() {
            // cannot fail: task_rx is alive until after the loop
            let _ = task_tx.send(unit);
        }
        drop(task_tx);

        let mut handles = Vec::with_capacity(self.workers);
        for _ in 0..self.workers {
            let grid = Arc::clone(&grid);
            let task_rx = task_rx.clone();
            let outcome_tx = outcome_tx.clone();
            let abort = Arc::clone(&self.abort_flag);
            handles.push(thread::spawn(move || {
                worker_loop(&grid, &task_rx, &outcome_tx, &abort)
            }));
        }
        drop(task_rx);
        drop(outcome_tx);

        let summary = self.aggregate(&outcome_rx, &event_tx, started);

        for handle in handles {
            if handle.join().is_err() {
                tracing::warn!("validation worker panicked");
            }
        }

        let _ = event_tx.send(ValidationEvent::Finished(summary.verdict));
        summary
    }

    /// Single convergence point: receives outcomes until all workers are
    /// done, keeping the first invalid one as the verdict.
    fn aggregate(
        &self,
        outcome_rx: &Receiver<UnitOutcome>,
        event_tx: &Sender<ValidationEvent>,
        started: Instant,
    ) -> ValidationSummary {
        let mut verdict = Verdict::Valid;
        let mut units_checked = 0;
        let mut class_passed = [0usize; 3];

        for outcome in outcome_rx.iter() {
            units_checked += 1;
            let _ = event_tx.send(ValidationEvent::UnitChecked {
                unit: outcome.unit,
                ok: outcome.result.is_ok(),
            });

            match outcome.result {
                Ok(()) => {
                    let passed = &mut class_passed[outcome.unit.kind as usize];
                    *passed += 1;
                    if *passed == GRID_SIZE {
                        let _ = event_tx.send(ValidationEvent::ClassValidated(outcome.unit.kind));
                    }
                }
                Err(error) => {
                    if verdict.is_valid() {
                        verdict = Verdict::Invalid {
                            unit: outcome.unit,
                            error,
                        };
                        // cooperative cancellation of the remaining units
                        self.abort_flag.store(true, Ordering::Relaxed);
                    }
                }
            }
        }

        ValidationSummary {
            verdict,
            units_checked,
            workers: self.workers,
            elapsed: started.elapsed(),
        }
    }
}

fn worker_loop(
    grid: &Grid,
    task_rx: &Receiver<UnitId>,
    outcome_tx: &Sender<UnitOutcome>,
    abort: &AtomicBool,
) {
    // The abort flag is only consulted between units; a unit scan always
    // runs to its own verdict.
    while !abort.load(Ordering::Relaxed) {
        let unit = match task_rx.recv() {
            Ok(unit) => unit,
            Err(_) => break,
        };

        let values = grid.unit_values(unit);
        let result = check_unit(&values);

        if outcome_tx.send(UnitOutcome { unit, result }).is_err() {
            break;
        }
    }
}
