//! Member repository port.
//!
//! # Contract
//!
//! - `documento` is unique; `save` fails with `DocumentoTaken` (and a
//!   `documento` detail) when another member already has it
//! - Reads are never cached: callers always see the latest committed row

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, MemberId};
use crate::domain::membership::Member;

#[async_trait]
pub trait MemberRepository: Send + Sync {
    /// Save a new member.
    ///
    /// # Errors
    ///
    /// - `DocumentoTaken` if the documento is already registered
    /// - `DatabaseError` on persistence failure
    async fn save(&self, member: &Member) -> Result<(), DomainError>;

    /// Update an existing member.
    ///
    /// # Errors
    ///
    /// - `MemberNotFound` (with a `member_id` detail) if the member doesn't exist
    /// - `DatabaseError` on persistence failure
    async fn update(&self, member: &Member) -> Result<(), DomainError>;

    /// Removes a member that never became usable (registration rollback).
    /// Deleting an unknown id is not an error.
    async fn delete(&self, id: &MemberId) -> Result<(), DomainError>;

    async fn find_by_id(&self, id: &MemberId) -> Result<Option<Member>, DomainError>;

    /// Looks a member up by identity document (already trimmed).
    async fn find_by_documento(&self, documento: &str) -> Result<Option<Member>, DomainError>;
}
