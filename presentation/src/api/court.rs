//! Court API: the per-phase operations over [`DeliberationUseCase`].

use super::dto::{
    ApiResponse, ArgumentRequest, CaseRequest, ConcludeRequest, RethinkRequest, SubmitRequest,
};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::warn;
use tribunal_application::{DeliberateError, DeliberationUseCase};
use tribunal_domain::{CaseState, InterimVerdict};

/// What callers see when the whole fallback chain failed
pub const TRANSPORT_FAILURE_MESSAGE: &str = "Adjudicator temporarily unavailable";

pub struct CourtApi {
    deliberation: DeliberationUseCase,
}

impl CourtApi {
    pub fn new(deliberation: DeliberationUseCase) -> Self {
        Self { deliberation }
    }

    /// Dispatch a JSON payload by operation name.
    pub async fn handle(&self, operation: &str, payload: Value) -> ApiResponse {
        match operation {
            "submit" => match parse::<SubmitRequest>(payload) {
                Ok(req) => self.submit(req).await,
                Err(resp) => resp,
            },
            "generateInterimVerdict" => match parse::<CaseRequest>(payload) {
                Ok(req) => self.generate_interim_verdict(req).await,
                Err(resp) => resp,
            },
            "postArgument" => match parse::<ArgumentRequest>(payload) {
                Ok(req) => self.post_argument(req).await,
                Err(resp) => resp,
            },
            "rethink" => match parse::<RethinkRequest>(payload) {
                Ok(req) => self.rethink(req).await,
                Err(resp) => resp,
            },
            "conclude" => match parse::<ConcludeRequest>(payload) {
                Ok(req) => self.conclude(req).await,
                Err(resp) => resp,
            },
            other => ApiResponse::failure("unknown_operation", format!("Unknown operation: {}", other)),
        }
    }

    pub async fn submit(&self, req: SubmitRequest) -> ApiResponse {
        let submission = req.submission();
        let mut case = req.case_data;
        match self.deliberation.submit(&mut case, req.side, submission).await {
            Ok(outcome) => {
                let response = ApiResponse::ok(case);
                match outcome.interim {
                    Some(interim) => response.with_verdict(&interim),
                    None => response,
                }
            }
            Err(e) => error_response(e),
        }
    }

    pub async fn generate_interim_verdict(&self, req: CaseRequest) -> ApiResponse {
        let mut case = req.case_data;
        match self.deliberation.generate_interim_verdict(&mut case).await {
            Ok(verdict) => ApiResponse::ok(case).with_verdict(&verdict),
            Err(e) => error_response(e),
        }
    }

    pub async fn post_argument(&self, req: ArgumentRequest) -> ApiResponse {
        let mut case = req.case_data;
        if let Err(e) = adopt_current_verdict(&mut case, req.current_verdict) {
            return error_response(e);
        }
        match self
            .deliberation
            .post_argument(&mut case, req.side, &req.argument_text)
            .await
        {
            Ok(outcome) => ApiResponse::ok(case).with_reply(outcome.reply, outcome.remaining_rounds),
            Err(e) => error_response(e),
        }
    }

    pub async fn rethink(&self, req: RethinkRequest) -> ApiResponse {
        let mut case = req.case_data;
        if let Err(e) = adopt_current_verdict(&mut case, req.current_verdict) {
            return error_response(e);
        }
        match self.deliberation.rethink(&mut case).await {
            Ok(verdict) => ApiResponse::ok(case).with_verdict(&verdict),
            Err(e) => error_response(e),
        }
    }

    pub async fn conclude(&self, req: ConcludeRequest) -> ApiResponse {
        let mut case = req.case_data;
        match self.deliberation.conclude(&mut case).await {
            Ok(outcome) => ApiResponse::ok(case)
                .with_verdict(&outcome.verdict)
                .with_metadata(outcome.metadata),
            Err(e) => error_response(e),
        }
    }
}

fn parse<T: DeserializeOwned>(payload: Value) -> Result<T, ApiResponse> {
    serde_json::from_value(payload)
        .map_err(|e| ApiResponse::failure("validation_error", format!("Invalid request: {}", e)))
}

fn adopt_current_verdict(
    case: &mut CaseState,
    verdict: Option<InterimVerdict>,
) -> Result<(), DeliberateError> {
    if let Some(verdict) = verdict {
        case.set_interim_verdict(verdict)?;
    }
    Ok(())
}

fn error_response(e: DeliberateError) -> ApiResponse {
    if e.is_transport() {
        warn!("Adjudication unavailable: {}", e);
        ApiResponse::failure(e.code(), TRANSPORT_FAILURE_MESSAGE)
    } else {
        ApiResponse::failure(e.code(), e.to_string())
    }
}
