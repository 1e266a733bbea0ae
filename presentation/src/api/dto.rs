//! Request and response payloads

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tribunal_domain::{
    CaseState, CaseSubmission, FileRef, InterimVerdict, Side, VerdictMetadata,
};

/// `submit(side, primaryArgument, detailedEvidence?, responseToOtherSide?, files?)`
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitRequest {
    pub side: Side,
    pub primary_argument: String,
    #[serde(default)]
    pub detailed_evidence: Option<String>,
    #[serde(default)]
    pub response_to_other_side: Option<String>,
    #[serde(default)]
    pub files: Vec<FileRef>,
    #[serde(default)]
    pub case_data: CaseState,
}

impl SubmitRequest {
    pub fn submission(&self) -> CaseSubmission {
        let mut submission = CaseSubmission::new(self.primary_argument.clone())
            .with_files(self.files.clone());
        if let Some(evidence) = &self.detailed_evidence {
            submission = submission.with_evidence(evidence.clone());
        }
        if let Some(response) = &self.response_to_other_side {
            submission = submission.with_response(response.clone());
        }
        submission
    }
}

/// `generateInterimVerdict(caseData)`
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CaseRequest {
    pub case_data: CaseState,
}

/// `postArgument(side, argumentText, caseData, currentVerdict)`
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArgumentRequest {
    pub side: Side,
    pub argument_text: String,
    pub case_data: CaseState,
    /// Replaces the case's interim verdict before the round, when given
    #[serde(default)]
    pub current_verdict: Option<InterimVerdict>,
}

/// `rethink(caseData, currentVerdict)`; the turn history travels in
/// `caseData.turnsA` / `caseData.turnsB`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RethinkRequest {
    pub case_data: CaseState,
    #[serde(default)]
    pub current_verdict: Option<InterimVerdict>,
}

/// `conclude(caseData)`
pub type ConcludeRequest = CaseRequest;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiError {
    pub code: String,
    pub message: String,
}

/// `{success, verdict?, error?}` plus the updated case
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub verdict: Option<Value>,
    /// Judge reply to an argument round
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub remaining_rounds: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<VerdictMetadata>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub case_data: Option<CaseState>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ApiError>,
}

impl ApiResponse {
    pub fn ok(case_data: CaseState) -> Self {
        Self {
            success: true,
            verdict: None,
            response: None,
            remaining_rounds: None,
            metadata: None,
            case_data: Some(case_data),
            error: None,
        }
    }

    pub fn failure(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            success: false,
            verdict: None,
            response: None,
            remaining_rounds: None,
            metadata: None,
            case_data: None,
            error: Some(ApiError {
                code: code.into(),
                message: message.into(),
            }),
        }
    }

    pub fn with_verdict<T: Serialize>(mut self, verdict: &T) -> Self {
        self.verdict = serde_json::to_value(verdict).ok();
        self
    }

    pub fn with_metadata(mut self, metadata: VerdictMetadata) -> Self {
        self.metadata = Some(metadata);
        self
    }

    pub fn with_reply(mut self, reply: String, remaining_rounds: u32) -> Self {
        self.response = Some(reply);
        self.remaining_rounds = Some(remaining_rounds);
        self
    }
}
