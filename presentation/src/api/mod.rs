//! JSON request/response surface.
//!
//! One operation per phase. The caller holds the case between calls, so
//! every request carries `caseData` and every response returns the updated
//! case alongside `{success, verdict?, error?}`.

mod court;
mod dto;

pub use court::{CourtApi, TRANSPORT_FAILURE_MESSAGE};
pub use dto::{
    ApiError, ApiResponse, ArgumentRequest, CaseRequest, ConcludeRequest, RethinkRequest,
    SubmitRequest,
};
