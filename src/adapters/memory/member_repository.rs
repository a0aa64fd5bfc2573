//! In-memory member store.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::foundation::{DomainError, ErrorCode, MemberId};
use crate::domain::membership::Member;
use crate::ports::MemberRepository;

#[derive(Debug, Clone, Default)]
pub struct InMemoryMemberRepository {
    members: Arc<RwLock<HashMap<MemberId, Member>>>,
}

impl InMemoryMemberRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl MemberRepository for InMemoryMemberRepository {
    async fn save(&self, member: &Member) -> Result<(), DomainError> {
        let mut members = self.members.write().await;
        if members
            .values()
            .any(|m| m.documento == member.documento && m.id != member.id)
        {
            return Err(DomainError::new(
                ErrorCode::DocumentoTaken,
                "Documento already registered",
            )
            .with_detail("documento", member.documento.clone()));
        }
        members.insert(member.id, member.clone());
        Ok(())
    }

    async fn update(&self, member: &Member) -> Result<(), DomainError> {
        let mut members = self.members.write().await;
        match members.get_mut(&member.id) {
            Some(existing) => {
                *existing = member.clone();
                Ok(())
            }
            None => Err(DomainError::new(
                ErrorCode::MemberNotFound,
                format!("Member not found: {}", member.id),
            )
            .with_detail("member_id", member.id.to_string())),
        }
    }

    async fn delete(&self, id: &MemberId) -> Result<(), DomainError> {
        self.members.write().await.remove(id);
        Ok(())
    }

    async fn find_by_id(&self, id: &MemberId) -> Result<Option<Member>, DomainError> {
        Ok(self.members.read().await.get(id).cloned())
    }

    async fn find_by_documento(&self, documento: &str) -> Result<Option<Member>, DomainError> {
        Ok(self
            .members
            .read()
            .await
            .values()
            .find(|m| m.documento == documento)
            .cloned())
    }
}
