//! Member service

use crate::error::HomeboxResult;
use crate::models::Member;
use crate::storage::Storage;

/// Service for household member management
pub struct MemberService<'a> {
    storage: &'a Storage,
}

impl<'a> MemberService<'a> {
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// All members in the order they were added
    pub fn list(&self) -> HomeboxResult<Vec<Member>> {
        self.storage.members().list()
    }

    /// Add a member; adding an existing name returns the existing row
    pub fn add(&self, name: &str) -> HomeboxResult<Member> {
        let name = Member::validate_name(name)?;
        let member = self.storage.members().insert_or_get(&name)?;
        tracing::info!(id = %member.id, name = %member.name, "Added member");
        Ok(member)
    }
}
