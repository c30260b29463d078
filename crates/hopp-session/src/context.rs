//! Explicit per-call session context.
//!
//! Passed to every component that needs call-scoped data instead of living
//! in an ambient global store, so unit tests can fabricate a context.

use hopp_proto::protocol::CallTokens;

/// Call-scoped context owned by one `CallSession`.
#[derive(Debug, Clone, Default)]
pub struct SessionContext {
    call_id: Option<String>,
    tokens: Option<CallTokens>,
}

impl SessionContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn call_id(&self) -> Option<&str> {
        self.call_id.as_deref()
    }

    /// Media token payload captured from `call_tokens`, if granted yet.
    pub fn tokens(&self) -> Option<&CallTokens> {
        self.tokens.as_ref()
    }

    /// Set by the host layer once a call is established.
    pub fn set_call_id(&mut self, call_id: String) {
        self.call_id = Some(call_id);
    }

    pub(crate) fn set_tokens(&mut self, tokens: CallTokens) {
        self.tokens = Some(tokens);
    }

    pub(crate) fn clear(&mut self) {
        self.call_id = None;
        self.tokens = None;
    }
}
