//! Executor query tracing boundary.
//!
//! Tracing is optional, injected by the caller, and must not affect
//! execution semantics.

///
/// TracePhase
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum TracePhase {
    Filter,
    Order,
    Page,
}

///
/// QueryTraceEvent
///
/// Row count observed after one post-access phase.
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct QueryTraceEvent {
    pub phase: TracePhase,
    pub rows: usize,
}

///
/// QueryTraceSink
///

pub trait QueryTraceSink {
    fn on_event(&self, event: QueryTraceEvent);
}

pub(crate) fn emit(sink: Option<&dyn QueryTraceSink>, phase: TracePhase, rows: usize) {
    if let Some(sink) = sink {
        sink.on_event(QueryTraceEvent { phase, rows });
    }
}
