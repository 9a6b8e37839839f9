pub mod config;
pub mod ctx;
pub mod emit;
pub mod ops;

use ctx::LogCtx;

// Factory helpers for the per-command logging contexts
pub fn import() -> LogCtx<ops::import::Import> { LogCtx { json: config::logs_are_json(), _marker: std::marker::PhantomData } }
pub fn source() -> LogCtx<ops::source::Source> { LogCtx { json: config::logs_are_json(), _marker: std::marker::PhantomData } }
pub fn jobs() -> LogCtx<ops::jobs::Jobs> { LogCtx { json: config::logs_are_json(), _marker: std::marker::PhantomData } }
pub fn init() -> LogCtx<ops::init::Init> { LogCtx { json: config::logs_are_json(), _marker: std::marker::PhantomData } }
