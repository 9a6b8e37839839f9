use tracing::Span;
use tracing::info_span;

use crate::telemetry::ctx::{OpMarker, PhaseSpan};

#[derive(Copy, Clone, Debug)]
pub struct Jobs;

#[derive(Copy, Clone, Debug)]
pub enum Phase { List, Logs }

impl PhaseSpan for Phase {
    fn name(&self) -> &'static str { match self {
        Phase::List => "list",
        Phase::Logs => "logs",
    }}
    fn span(&self) -> Span { match self {
        Phase::List => info_span!("list"),
        Phase::Logs => info_span!("logs"),
    }}
}

impl OpMarker for Jobs {
    const NAME: &'static str = "jobs";
    type Phase = Phase;
    fn root_span() -> Span { info_span!("jobs") }
}
