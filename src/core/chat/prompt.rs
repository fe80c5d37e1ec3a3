use super::messages::{ChatMessage, HistoryRole, HistoryTurn};

/// Fixed instruction placed at the head of every completion request.
pub const SYSTEM_PROMPT: &str = "You are a helpful assistant that helps users fill out information for making phone calls. \
Your role is to ask questions one by one to gather the necessary information. \
Be friendly and helpful. Keep responses concise and clear.";

/// Assemble the completion message list
///
/// `[system] + history (user/assistant turns, in order) + [user: message]`.
/// Turns with any other role are dropped.
pub fn build_messages(history: &[HistoryTurn], message: &str) -> Vec<ChatMessage> {
    let mut messages = Vec::with_capacity(history.len() + 2);
    messages.push(ChatMessage::system(SYSTEM_PROMPT));

    messages.extend(history.iter().filter_map(|turn| match turn.role {
        HistoryRole::User => Some(ChatMessage::user(turn.text.as_str())),
        HistoryRole::Assistant => Some(ChatMessage::assistant(turn.text.as_str())),
        HistoryRole::Other => None,
    }));

    messages.push(ChatMessage::user(message));
    messages
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::chat::ChatRole;

    #[test]
    fn test_empty_history_yields_system_and_user() {
        let messages = build_messages(&[], "Hi");

        assert_eq!(messages.len(), 2);
        assert_eq!(messages[0], ChatMessage::system(SYSTEM_PROMPT));
        assert_eq!(messages[1], ChatMessage::user("Hi"));
    }

    #[test]
    fn test_history_roles_are_preserved_in_order() {
        let history = vec![
            HistoryTurn::new(HistoryRole::Assistant, "What is your purpose?"),
            HistoryTurn::new(HistoryRole::User, "A reservation"),
            HistoryTurn::new(HistoryRole::Assistant, "For how many people?"),
        ];

        let messages = build_messages(&history, "Four");

        let roles: Vec<ChatRole> = messages.iter().map(|m| m.role).collect();
        assert_eq!(
            roles,
            vec![
                ChatRole::System,
                ChatRole::Assistant,
                ChatRole::User,
                ChatRole::Assistant,
                ChatRole::User,
            ]
        );
        assert_eq!(messages[2].content, "A reservation");
        assert_eq!(messages[4].content, "Four");
    }

    #[test]
    fn test_unknown_roles_are_skipped() {
        let history = vec![
            HistoryTurn::new(HistoryRole::User, "first"),
            HistoryTurn::new(HistoryRole::Other, "ignored"),
            HistoryTurn::new(HistoryRole::Assistant, "second"),
            HistoryTurn::new(HistoryRole::Other, "also ignored"),
        ];

        let messages = build_messages(&history, "third");

        let contents: Vec<&str> = messages.iter().map(|m| m.content.as_str()).collect();
        assert_eq!(contents, vec![SYSTEM_PROMPT, "first", "second", "third"]);
    }

    #[test]
    fn test_only_unknown_roles_behaves_like_empty_history() {
        let history = vec![HistoryTurn::new(HistoryRole::Other, "tool output")];
        assert_eq!(build_messages(&history, "Hi"), build_messages(&[], "Hi"));
    }
}
