//! Diagnostic sinks for human inspection of decoded records.
//!
//! Decoding never logs ambiently; callers that want a verbose dump pass a
//! sink explicitly to the decode entry point. The default sink discards
//! everything.

use std::fmt;
use std::io;

/// Receives each decoded record during a decode pass.
///
/// Sinks are a debugging aid, not part of the functional contract; a sink
/// cannot fail the decode.
pub trait DiagnosticSink {
    /// Called once per decoded record, in file order.
    fn record(&mut self, kind: &'static str, record: &dyn fmt::Display);
}

/// A sink that discards everything (the default).
#[derive(Debug, Clone, Default)]
pub struct NoDiagnostics;

impl DiagnosticSink for NoDiagnostics {
    fn record(&mut self, _kind: &'static str, _record: &dyn fmt::Display) {}
}

/// A sink that writes each record's dump to any [`io::Write`].
///
/// Write failures are swallowed: diagnostics must never fail a decode.
#[derive(Debug)]
pub struct WriteDiagnostics<W> {
    out: W,
}

impl<W: io::Write> WriteDiagnostics<W> {
    /// Create a sink writing to `out`.
    pub fn new(out: W) -> Self {
        Self { out }
    }

    /// Consume the sink, returning the writer.
    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: io::Write> DiagnosticSink for WriteDiagnostics<W> {
    fn record(&mut self, kind: &'static str, record: &dyn fmt::Display) {
        let _ = writeln!(self.out, "=== {kind} ===");
        let _ = writeln!(self.out, "{record}");
    }
}
