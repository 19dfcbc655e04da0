// ABOUTME: Intent routing between the die-rolling and prime-checking branches.
// ABOUTME: A message routes to the roll branch when its first text part mentions "roll".

use serde::{Deserialize, Serialize};

/// One part of a user message. Non-text parts carry no `text`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Part {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}

/// A user turn as delivered by the agent framework.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserContent {
    #[serde(default)]
    pub parts: Vec<Part>,
}

impl UserContent {
    pub fn from_text(text: impl Into<String>) -> Self {
        Self {
            parts: vec![Part {
                text: Some(text.into()),
            }],
        }
    }

    /// Text of the first part, if the first part is textual.
    pub fn first_text(&self) -> Option<&str> {
        self.parts.first().and_then(|part| part.text.as_deref())
    }
}

/// True when the message asks to roll. Only the first part is inspected.
pub fn is_roll_request(content: Option<&UserContent>) -> bool {
    content
        .and_then(UserContent::first_text)
        .is_some_and(|text| text.to_lowercase().contains("roll"))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Route {
    Roll,
    Prime,
}

impl Route {
    pub fn for_message(content: Option<&UserContent>) -> Self {
        if is_roll_request(content) {
            Route::Roll
        } else {
            Route::Prime
        }
    }

    pub fn agent_name(self) -> &'static str {
        match self {
            Route::Roll => "roll_agent",
            Route::Prime => "prime_agent",
        }
    }

    /// Tool the selected agent is expected to call.
    pub fn tool_name(self) -> &'static str {
        match self {
            Route::Roll => "roll_die",
            Route::Prime => "check_prime",
        }
    }
}

impl std::fmt::Display for Route {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Route::Roll => write!(f, "roll"),
            Route::Prime => write!(f, "prime"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn roll_is_case_insensitive() {
        let msg = UserContent::from_text("Please ROLL a 20-sided die");
        assert!(is_roll_request(Some(&msg)));
        assert_eq!(Route::for_message(Some(&msg)), Route::Roll);
    }

    #[test]
    fn other_text_routes_to_prime() {
        let msg = UserContent::from_text("Is 7 prime?");
        assert_eq!(Route::for_message(Some(&msg)), Route::Prime);
        assert_eq!(Route::Prime.agent_name(), "prime_agent");
        assert_eq!(Route::Prime.tool_name(), "check_prime");
    }

    #[test]
    fn missing_content_routes_to_prime() {
        assert!(!is_roll_request(None));
        assert!(!is_roll_request(Some(&UserContent::default())));

        let non_text_first = UserContent {
            parts: vec![
                Part { text: None },
                Part {
                    text: Some("roll".to_string()),
                },
            ],
        };
        assert_eq!(Route::for_message(Some(&non_text_first)), Route::Prime);
    }

    #[test]
    fn deserializes_framework_shape() {
        let msg: UserContent =
            serde_json::from_str(r#"{"parts":[{"text":"roll 2d6"},{"inline_data":{}}]}"#).unwrap();
        assert_eq!(msg.first_text(), Some("roll 2d6"));
        assert_eq!(Route::for_message(Some(&msg)).to_string(), "roll");
    }
}
