use tracing::Span;
use tracing::info_span;

use crate::telemetry::ctx::{OpMarker, PhaseSpan};

#[derive(Copy, Clone, Debug)]
pub struct Import;

#[derive(Copy, Clone, Debug)]
pub enum Phase { Source, FetchListing, CollectLinks, FetchDetail, Extract, WriteFacility, FlushLogs }

impl PhaseSpan for Phase {
    fn name(&self) -> &'static str { match self {
        Phase::Source => "source",
        Phase::FetchListing => "fetch_listing",
        Phase::CollectLinks => "collect_links",
        Phase::FetchDetail => "fetch_detail",
        Phase::Extract => "extract",
        Phase::WriteFacility => "write_facility",
        Phase::FlushLogs => "flush_logs",
    }}
    fn span(&self) -> Span { match self {
        Phase::Source => info_span!("source"),
        Phase::FetchListing => info_span!("fetch_listing"),
        Phase::CollectLinks => info_span!("collect_links"),
        Phase::FetchDetail => info_span!("fetch_detail"),
        Phase::Extract => info_span!("extract"),
        Phase::WriteFacility => info_span!("write_facility"),
        Phase::FlushLogs => info_span!("flush_logs"),
    }}
}

impl OpMarker for Import {
    const NAME: &'static str = "import";
    type Phase = Phase;
    fn root_span() -> Span { info_span!("import") }
}
