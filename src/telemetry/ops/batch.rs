use tracing::Span;
use tracing::info_span;

use crate::telemetry::ctx::{OpMarker, PhaseSpan};

#[derive(Copy, Clone, Debug)]
pub struct Batch;

#[derive(Copy, Clone, Debug)]
pub enum Phase { ReadList, Resolve, WriteReport }

impl PhaseSpan for Phase {
    fn name(&self) -> &'static str { match self {
        Phase::ReadList => "read_list",
        Phase::Resolve => "resolve",
        Phase::WriteReport => "write_report",
    }}
    fn span(&self) -> Span { match self {
        Phase::ReadList => info_span!("read_list"),
        Phase::Resolve => info_span!("resolve"),
        Phase::WriteReport => info_span!("write_report"),
    }}
}

impl OpMarker for Batch {
    const NAME: &'static str = "batch";
    type Phase = Phase;
    fn root_span() -> Span { info_span!("batch") }
}
