use teloxide::types::ChatMemberStatus;

use crate::error::EngineError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UserRole {
    Owner,
    Admin,
    Member,
}

impl UserRole {
    /// Owner and admins pass the authorization guard and bypass censorship.
    pub fn is_privileged(self) -> bool {
        !matches!(self, UserRole::Member)
    }
}

/// Maps a live membership status to a role. The configured owner identity is
/// resolved before any membership query, so it never reaches this function.
pub fn role_from_status(status: ChatMemberStatus) -> UserRole {
    match status {
        ChatMemberStatus::Owner | ChatMemberStatus::Administrator => UserRole::Admin,
        _ => UserRole::Member,
    }
}

/// Whether a group-only command may run. The configured owner is allowed
/// everywhere, private chats included; everyone else needs a group.
pub fn group_command_allowed(in_group: bool, is_owner: bool) -> bool {
    in_group || is_owner
}

/// The single authorization guard every privileged handler goes through.
pub fn require_privileged(role: UserRole) -> Result<UserRole, EngineError> {
    if role.is_privileged() {
        Ok(role)
    } else {
        Err(EngineError::Authorization(
            "You must be an administrator or the bot owner to use this command.".to_string(),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn creator_and_admin_map_to_admin() {
        assert_eq!(role_from_status(ChatMemberStatus::Owner), UserRole::Admin);
        assert_eq!(
            role_from_status(ChatMemberStatus::Administrator),
            UserRole::Admin
        );
    }

    #[test]
    fn everyone_else_is_a_member() {
        for status in [
            ChatMemberStatus::Member,
            ChatMemberStatus::Restricted,
            ChatMemberStatus::Left,
            ChatMemberStatus::Banned,
        ] {
            assert_eq!(role_from_status(status), UserRole::Member);
        }
    }

    #[test]
    fn owner_passes_the_group_gate_from_a_private_chat() {
        assert!(group_command_allowed(false, true));
        assert!(group_command_allowed(true, false));
        assert!(group_command_allowed(true, true));
        assert!(!group_command_allowed(false, false));
    }

    #[test]
    fn guard_rejects_members_only() {
        assert!(require_privileged(UserRole::Owner).is_ok());
        assert!(require_privileged(UserRole::Admin).is_ok());
        assert!(matches!(
            require_privileged(UserRole::Member),
            Err(EngineError::Authorization(_))
        ));
    }
}
