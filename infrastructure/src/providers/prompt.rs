//! Flattening a message list into a single prompt string for
//! completion-style backends (Ollama generate, Hugging Face, Cohere).

use consortium_domain::{Message, Role};

fn speaker(role: Role) -> &'static str {
    match role {
        Role::System => "System",
        Role::User => "Human",
        Role::Assistant => "Assistant",
    }
}

/// Render messages as `Speaker: content` blocks ending in an open
/// `Assistant: ` turn.
pub(crate) fn flatten(messages: &[Message]) -> String {
    let mut prompt = String::new();
    for message in messages {
        prompt.push_str(speaker(message.role));
        prompt.push_str(": ");
        prompt.push_str(message.content.trim());
        prompt.push_str("\n\n");
    }
    prompt.push_str("Assistant: ");
    prompt
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flatten_orders_turns_and_opens_assistant() {
        let messages = vec![
            Message::system("You are a PM."),
            Message::user("Build a marketplace"),
            Message::assistant("  Plan first. "),
        ];
        assert_eq!(
            flatten(&messages),
            "System: You are a PM.\n\nHuman: Build a marketplace\n\nAssistant: Plan first.\n\nAssistant: "
        );
    }

    #[test]
    fn test_flatten_empty() {
        assert_eq!(flatten(&[]), "Assistant: ");
    }
}
