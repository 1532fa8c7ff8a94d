//! Compile tracing boundary.
//!
//! Tracing is optional, injected by the caller, and must not affect
//! descriptor scanning or pipeline compilation.

use crate::pipeline::PipelineFingerprint;

///
/// CompileTraceSink
///

pub trait CompileTraceSink: Send + Sync {
    fn on_event(&self, event: CompileTraceEvent);
}

///
/// SkipReason
/// Why the scan phase left an annotated field out of the table.
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum SkipReason {
    /// Neither `ref` nor an explicit `from` names a target.
    MissingTarget,
}

///
/// DropReason
/// Why the compile phase left a descriptor out of a pipeline.
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum DropReason {
    Excluded,
    Unresolvable,
}

///
/// CompileTraceEvent
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum CompileTraceEvent {
    Attached {
        entity: String,
        descriptors: usize,
    },
    FieldSkipped {
        entity: String,
        field: String,
        reason: SkipReason,
    },
    DescriptorDropped {
        entity: String,
        field: String,
        reason: DropReason,
    },
    Compiled {
        entity: String,
        fingerprint: PipelineFingerprint,
        stages: usize,
        allow_disk_use: bool,
    },
}
