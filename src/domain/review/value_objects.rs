//! Review Context - Value Objects

use uuid::Uuid;

/// 审核请求唯一标识
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct VerifyBookRequestId(Uuid);

impl VerifyBookRequestId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for VerifyBookRequestId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for VerifyBookRequestId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
