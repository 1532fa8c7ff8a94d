//! Observability: compile-time tracing and sink abstractions.
//!
//! Core relation and pipeline logic never writes output directly.
//! All instrumentation flows through [`CompileTraceEvent`] and
//! [`CompileTraceSink`].

pub mod trace;

pub use trace::{CompileTraceEvent, CompileTraceSink, DropReason, SkipReason};
