//! Event types and sinks for observing combination runs.
//!
//! This module defines [`CombineEvent`] and a few sinks to collect or forward
//! events while executing [`crate::combine::runner::combine`] or
//! [`crate::combine::runner::Combiner`].
use crate::geometry::Offset;

/// Describes events emitted during a combination run.
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq)]
pub enum CombineEvent {
    /// Emitted once the variant pool has been built.
    RunStarted {
        /// Number of corpus levels.
        corpus_size: usize,
        /// Number of rotated variants derived from the corpus.
        variant_pool: usize,
        /// Number of variants kept after shuffling.
        sampled: usize,
    },

    /// Emitted after a kept variant went through the explode pass.
    VariantPrepared {
        /// Position in the sampled order.
        index: usize,
        /// Name of the source level.
        name: String,
        /// Objects removed by explode.
        removed: usize,
        /// Objects left.
        remaining: usize,
        /// Offset the variant will be tried at.
        offset: Offset,
    },

    /// Emitted when a variant was merged into the accumulator.
    VariantPlaced {
        index: usize,
        name: String,
        offset: Offset,
        /// Objects appended to the accumulator.
        objects: usize,
    },

    /// Emitted when a variant shared a cell with the accumulator and was dropped.
    VariantRejected {
        index: usize,
        name: String,
        offset: Offset,
    },

    /// Emitted when the accumulator is final.
    RunFinished {
        placed: usize,
        rejected: usize,
        /// Objects in the finished level.
        objects: usize,
    },

    /// Non-fatal warning generated during a run.
    Warning {
        /// Context string (e.g. level name).
        context: String,
        /// Human-readable message.
        message: String,
    },
}

/// Discriminant of [`CombineEvent`], used by sinks to opt out of event kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CombineEventKind {
    RunStarted,
    VariantPrepared,
    VariantPlaced,
    VariantRejected,
    RunFinished,
    Warning,
}

impl CombineEvent {
    pub fn kind(&self) -> CombineEventKind {
        match self {
            CombineEvent::RunStarted { .. } => CombineEventKind::RunStarted,
            CombineEvent::VariantPrepared { .. } => CombineEventKind::VariantPrepared,
            CombineEvent::VariantPlaced { .. } => CombineEventKind::VariantPlaced,
            CombineEvent::VariantRejected { .. } => CombineEventKind::VariantRejected,
            CombineEvent::RunFinished { .. } => CombineEventKind::RunFinished,
            CombineEvent::Warning { .. } => CombineEventKind::Warning,
        }
    }
}

/// A generic event sink that accepts [`CombineEvent`]s.
pub trait EventSink {
    fn send(&mut self, event: CombineEvent);

    /// Whether events of `kind` should be built and sent at all.
    fn wants(&self, _kind: CombineEventKind) -> bool {
        true
    }

    fn send_many<I>(&mut self, events: I)
    where
        Self: Sized,
        I: IntoIterator<Item = CombineEvent>,
    {
        for e in events {
            self.send(e);
        }
    }
}

/// A no-op event sink.
impl EventSink for () {
    #[inline]
    fn send(&mut self, _event: CombineEvent) {}

    #[inline]
    fn wants(&self, _kind: CombineEventKind) -> bool {
        false
    }
}

/// An event sink that forwards to a user-provided closure.
pub struct FnSink<F>
where
    F: FnMut(CombineEvent),
{
    f: F,
}

impl<F> FnSink<F>
where
    F: FnMut(CombineEvent),
{
    pub fn new(f: F) -> Self {
        Self { f }
    }
}

impl<F> EventSink for FnSink<F>
where
    F: FnMut(CombineEvent),
{
    #[inline]
    fn send(&mut self, event: CombineEvent) {
        (self.f)(event);
    }
}

/// An event sink that collects all events in a `Vec`.
#[derive(Default)]
pub struct VecSink {
    events: Vec<CombineEvent>,
}

impl VecSink {
    pub fn new() -> Self {
        Self { events: Vec::new() }
    }

    pub fn into_inner(self) -> Vec<CombineEvent> {
        self.events
    }

    pub fn as_slice(&self) -> &[CombineEvent] {
        &self.events
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Collected events of one kind, in emission order.
    pub fn of_kind(&self, kind: CombineEventKind) -> impl Iterator<Item = &CombineEvent> {
        self.events.iter().filter(move |e| e.kind() == kind)
    }
}

impl EventSink for VecSink {
    #[inline]
    fn send(&mut self, event: CombineEvent) {
        self.events.push(event);
    }
}
