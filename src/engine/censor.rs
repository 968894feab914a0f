use super::filters::first_match;
use super::roles::UserRole;

/// Outcome of running a message through the banned-word set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verdict {
    Allow,
    /// The message contains a banned word and must be deleted. Carries the
    /// word so the notification can name it.
    Delete(String),
}

/// Admins and the owner are exempt from censorship. For everyone else the
/// first banned word (lexicographic, same tie-break as filters) contained in
/// the case-folded text wins.
pub fn evaluate(role: UserRole, banned: &[String], message_text: &str) -> Verdict {
    if role.is_privileged() {
        return Verdict::Allow;
    }
    match first_match(banned.iter().map(String::as_str), message_text) {
        Some(word) => Verdict::Delete(word.to_string()),
        None => Verdict::Allow,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn banned() -> Vec<String> {
        vec!["spam".to_string()]
    }

    #[test]
    fn member_message_with_banned_substring_is_deleted() {
        assert_eq!(
            evaluate(UserRole::Member, &banned(), "get rich spamnow"),
            Verdict::Delete("spam".to_string())
        );
    }

    #[test]
    fn admins_and_owner_are_exempt() {
        assert_eq!(evaluate(UserRole::Admin, &banned(), "spamnow"), Verdict::Allow);
        assert_eq!(evaluate(UserRole::Owner, &banned(), "spamnow"), Verdict::Allow);
    }

    #[test]
    fn clean_message_is_allowed() {
        assert_eq!(
            evaluate(UserRole::Member, &banned(), "an honest message"),
            Verdict::Allow
        );
    }

    #[test]
    fn matching_is_case_folded() {
        assert_eq!(
            evaluate(UserRole::Member, &banned(), "SPAM TIME"),
            Verdict::Delete("spam".to_string())
        );
    }
}
