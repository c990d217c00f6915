//! Authorization-policy capability applied by the resource router before
//! dispatch. The SDK treats the policy as opaque; denials surface through
//! the generic error responder.

use crate::action::ActionRequest;
use crate::error::ActionError;
use async_trait::async_trait;

#[async_trait]
pub trait Policy: Send + Sync {
    async fn authorize(
        &self,
        resource: &str,
        action: &str,
        req: &ActionRequest,
    ) -> Result<(), ActionError>;
}

/// Default policy: every request is allowed.
pub struct AllowAll;

#[async_trait]
impl Policy for AllowAll {
    async fn authorize(
        &self,
        _resource: &str,
        _action: &str,
        _req: &ActionRequest,
    ) -> Result<(), ActionError> {
        Ok(())
    }
}
