//! RenderQrHandler - Query handler producing the PNG of a member's live token.

use std::sync::Arc;

use crate::domain::access::AccessError;
use crate::domain::foundation::{AuthenticatedUser, MemberId};
use crate::ports::QrRenderer;

use super::AccessTokenService;

#[derive(Debug, Clone)]
pub struct RenderQrQuery {
    pub actor: AuthenticatedUser,
    pub member_id: MemberId,
}

pub struct RenderQrHandler {
    tokens: AccessTokenService,
    renderer: Arc<dyn QrRenderer>,
}

impl RenderQrHandler {
    pub fn new(tokens: AccessTokenService, renderer: Arc<dyn QrRenderer>) -> Self {
        Self { tokens, renderer }
    }

    /// Returns PNG bytes encoding the live token.
    pub async fn handle(&self, query: RenderQrQuery) -> Result<Vec<u8>, AccessError> {
        if !query.actor.can_act_for(&query.member_id) {
            return Err(AccessError::Forbidden);
        }

        let token = self
            .tokens
            .current(&query.member_id)
            .await?
            .ok_or(AccessError::TokenNotIssued(query.member_id))?;

        self.renderer
            .render_png(token.token.as_str())
            .map_err(|e| AccessError::Render(e.message))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::InMemoryAccessTokenRepository;
    use crate::domain::foundation::{DomainError, Role, UserId};
    use std::sync::Mutex;

    /// Records the payloads it was asked to render.
    struct RecordingRenderer {
        payloads: Mutex<Vec<String>>,
    }

    impl QrRenderer for RecordingRenderer {
        fn render_png(&self, payload: &str) -> Result<Vec<u8>, DomainError> {
            self.payloads.lock().unwrap().push(payload.to_string());
            Ok(vec![0x89, b'P', b'N', b'G'])
        }
    }

    fn staff() -> AuthenticatedUser {
        AuthenticatedUser::new(UserId::new("desk").unwrap(), Role::Recepcion)
    }

    #[tokio::test]
    async fn renders_current_token() {
        let tokens = AccessTokenService::new(Arc::new(InMemoryAccessTokenRepository::new()));
        let member = MemberId::new();
        tokens.issue(member).await.unwrap();
        let rotated = tokens.rotate(member).await.unwrap();
        let renderer = Arc::new(RecordingRenderer {
            payloads: Mutex::new(Vec::new()),
        });
        let handler = RenderQrHandler::new(tokens, renderer.clone());

        let png = handler
            .handle(RenderQrQuery {
                actor: staff(),
                member_id: member,
            })
            .await
            .unwrap();

        assert_eq!(&png[..4], &[0x89, b'P', b'N', b'G']);
        assert_eq!(
            renderer.payloads.lock().unwrap().as_slice(),
            &[rotated.token.as_str().to_string()]
        );
    }

    #[tokio::test]
    async fn member_without_token_is_reported() {
        let tokens = AccessTokenService::new(Arc::new(InMemoryAccessTokenRepository::new()));
        let renderer = Arc::new(RecordingRenderer {
            payloads: Mutex::new(Vec::new()),
        });
        let handler = RenderQrHandler::new(tokens, renderer);
        let member = MemberId::new();

        let err = handler
            .handle(RenderQrQuery {
                actor: staff(),
                member_id: member,
            })
            .await
            .unwrap_err();
        assert_eq!(err, AccessError::TokenNotIssued(member));
    }
}
