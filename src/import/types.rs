use serde::Serialize;

// Plan envelope types
#[derive(Serialize)]
pub struct SourceSample { pub source_id: i32, pub url: String, pub name: Option<String> }

#[derive(Serialize)]
pub struct ImportPlan { pub sources: usize, pub mode: String, pub limit: usize, pub sample_sources: Vec<SourceSample> }

// Apply/result envelope types
#[derive(Serialize)]
pub struct SourceSummary { pub source_id: i32, pub written: usize, pub skipped: usize, pub errors: usize }

#[derive(Serialize)]
pub struct ImportTotals { pub pages: usize, pub written: usize, pub skipped: usize, pub warnings: usize, pub errors: usize }

#[derive(Serialize)]
pub struct ImportApply { pub job_id: String, pub status: String, pub totals: ImportTotals, pub per_source: Vec<SourceSummary> }
