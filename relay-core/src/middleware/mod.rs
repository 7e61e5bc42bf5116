pub mod tracing;

pub use self::tracing::{request_id_middleware, trace_layer, RequestSpan, REQUEST_ID_HEADER};
