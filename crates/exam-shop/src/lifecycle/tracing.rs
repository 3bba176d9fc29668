//! # Observability & Tracing
//!
//! [`setup_tracing`] installs the process-wide subscriber: compact lines, no module path,
//! levels from `RUST_LOG`.
//!
//! ```bash
//! RUST_LOG=info cargo run     # workflow milestones
//! RUST_LOG=debug cargo run    # request URLs, masked card codes, actor requests
//! ```
//!
//! The demo wraps each workflow in an `info_span!`, so nested calls print as
//! `browse_catalog:list_subjects: Subjects loaded count=4`. Card codes are only ever
//! logged masked and the admin password is never logged.
pub fn setup_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_target(false) // entity_type and span names carry the context
        .compact()
        .init();
}
