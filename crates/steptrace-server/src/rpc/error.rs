//! Errors raised while dispatching a JSON-RPC call, with their wire codes.

use steptrace_core::ServerError;

use super::types::{
    JsonRpcResponse, INTERNAL_ERROR, INVALID_PARAMS, METHOD_NOT_FOUND, NOT_FOUND,
};

#[derive(Debug, thiserror::Error)]
pub enum RpcError {
    /// A store operation targeted a key with no live trace.
    #[error(transparent)]
    Store(#[from] ServerError),

    #[error("Invalid params: {0}")]
    InvalidParams(String),

    #[error("Method not found: {0}")]
    MethodNotFound(String),

    /// A method result could not be encoded as JSON.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl RpcError {
    pub fn code(&self) -> i64 {
        match self {
            RpcError::Store(ServerError::NotFound(_)) => NOT_FOUND,
            RpcError::InvalidParams(_) => INVALID_PARAMS,
            RpcError::MethodNotFound(_) => METHOD_NOT_FOUND,
            RpcError::Internal(_) => INTERNAL_ERROR,
        }
    }

    pub fn to_response(&self, id: Option<serde_json::Value>) -> JsonRpcResponse {
        JsonRpcResponse::error(id, self.code(), self.to_string())
    }
}
