//! Collection counters, exposed so the CLI and tests can observe GC
//! behavior without instrumenting the evaluator itself.

#[derive(Debug, Clone, Default)]
pub struct GcStats {
    pub collections_run: u64,
    pub objects_freed: u64,
    pub bytes_freed: u64,
}
