//! CSV event log: a [`SimObserver`] that writes one row per dispatch/motion
//! event, plus a final tally row, to two CSV files.
//!
//! Mirrors the teacher's `dt-output::csv::CsvWriter` shape (header row
//! written on `new`, one `OutputWriter`-style sink per backend, `finish` is
//! idempotent) adapted to this domain's event granularity.

use std::fs::File;
use std::path::Path;

use csv::Writer;

use tdsim_core::{QueryId, TaxiId};
use tdsim_sim::{SimObserver, SimTally};

use crate::error::{IoError, IoResult};

/// Writes `events.csv` (one row per dispatch/pickup/dropoff/cancellation)
/// and `tally.csv` (one row, written once, at the end of the run).
///
/// `SimObserver` methods have no return value, so write errors are stashed
/// internally rather than swallowed — check [`Self::take_error`] after
/// `sim.run()` returns, matching the teacher's `SimOutputObserver` idiom.
pub struct CsvEventLogger {
    events: Writer<File>,
    tally: Writer<File>,
    finished: bool,
    last_error: Option<IoError>,
}

impl CsvEventLogger {
    /// Create (or truncate) `events.csv`/`tally.csv` in `dir`, writing their
    /// header rows.
    pub fn new(dir: &Path) -> IoResult<Self> {
        let mut events = Writer::from_path(dir.join("events.csv"))?;
        events.write_record(["tick", "kind", "query_id", "taxi_id"])?;

        let mut tally = Writer::from_path(dir.join("tally.csv"))?;
        tally.write_record(["waiting", "riding", "completed", "cancelled"])?;

        Ok(Self { events, tally, finished: false, last_error: None })
    }

    /// Take the stored write error (if any) after `sim.run()` returns.
    /// Returns `None` if every write succeeded.
    pub fn take_error(&mut self) -> Option<IoError> {
        self.last_error.take()
    }

    fn row(&mut self, t: i64, kind: &str, query: QueryId, taxi: Option<TaxiId>) {
        let result = self.events.write_record([
            t.to_string(),
            kind.to_string(),
            query.0.to_string(),
            taxi.map(|t| t.0.to_string()).unwrap_or_default(),
        ]);
        self.store_err(result.map_err(IoError::from));
    }

    fn store_err(&mut self, result: IoResult<()>) {
        if let Err(e) = result {
            if self.last_error.is_none() {
                self.last_error = Some(e);
            }
        }
    }

    /// Flush both files. Idempotent — safe to call more than once.
    pub fn finish(&mut self) -> IoResult<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        self.events.flush()?;
        self.tally.flush()?;
        Ok(())
    }
}

impl SimObserver for CsvEventLogger {
    fn on_dispatched(&mut self, t: i64, query: QueryId, taxi: TaxiId) {
        self.row(t, "dispatched", query, Some(taxi));
    }

    fn on_dispatch_failed(&mut self, t: i64, query: QueryId) {
        self.row(t, "failed", query, None);
    }

    fn on_cancelled(&mut self, t: i64, query: QueryId) {
        self.row(t, "cancelled", query, None);
    }

    fn on_picked_up(&mut self, t: i64, taxi: TaxiId, query: QueryId) {
        self.row(t, "picked_up", query, Some(taxi));
    }

    fn on_pickup_cancelled(&mut self, t: i64, taxi: TaxiId, query: QueryId) {
        self.row(t, "pickup_cancelled", query, Some(taxi));
    }

    fn on_dropped_off(&mut self, t: i64, taxi: TaxiId, query: QueryId) {
        self.row(t, "dropped_off", query, Some(taxi));
    }

    fn on_sim_end(&mut self, tally: &SimTally) {
        let result = self
            .tally
            .write_record([tally.waiting.to_string(), tally.riding.to_string(), tally.completed.to_string(), tally.cancelled.to_string()])
            .map_err(IoError::from);
        self.store_err(result);
        let result = self.finish();
        self.store_err(result);
    }
}
