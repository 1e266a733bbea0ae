//! Application layer for ai-tribunal
//!
//! This crate contains use cases, port definitions, and application configuration.
//! It depends only on the domain layer.

pub mod config;
pub mod ports;
pub mod use_cases;

// Re-export commonly used types
pub use config::{DeliberationParams, InvocationParams};
pub use ports::{
    conversation_logger::{ConversationEvent, ConversationLogger, NoConversationLogger},
    file_storage::{FileStorage, StorageError, StoredFile},
    llm_gateway::{GatewayError, LlmGateway},
    progress::{InvocationProgress, NoProgress},
};
pub use use_cases::deliberate::{
    ArgumentOutcome, ConcludeOutcome, DeliberateError, DeliberationUseCase, SubmitOutcome,
};
pub use use_cases::invoke::{Generation, InvocationError, ResilientInvoker};
pub use use_cases::upload_files::{PendingFile, UploadFilesUseCase};
