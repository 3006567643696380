pub mod backoff;
pub mod runtime;
pub mod server;
