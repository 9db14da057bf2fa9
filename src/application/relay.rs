//! Transport-agnostic chat handling
//!
//! Turns inbound chat events into replies: `/help`, `/my` and `/pair`
//! commands, the pairing prompt for new users, and translated relays for
//! paired users. Outbound text is chunked to the transport's size limit and
//! never empty.

use crate::application::session::{TranslationSession, EMPTY_PLACEHOLDER};
use crate::domain::error::RelayError;
use crate::domain::model::{LanguagePair, SupportedLanguages};
use futures_util::future::join_all;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, info};

/// Pair suggestions offered as quick replies
const SUGGESTED_PAIRS: &[(&str, &str)] = &[
    ("zh", "en"),
    ("zh", "ja"),
    ("zh", "th"),
    ("zh", "ko"),
    ("zh", "vi"),
    ("en", "ja"),
];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatEvent {
    pub user_id: String,
    #[serde(flatten)]
    pub message: EventMessage,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum EventMessage {
    Text {
        text: String,
    },
    /// Stickers, images, joins... anything without text
    #[serde(other)]
    Other,
}

impl ChatEvent {
    pub fn text(user_id: &str, text: &str) -> Self {
        Self {
            user_id: user_id.to_string(),
            message: EventMessage::Text {
                text: text.to_string(),
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QuickReply {
    pub label: String,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Reply {
    pub user_id: String,
    pub messages: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub quick_replies: Vec<QuickReply>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Help,
    My,
    Pair { mine: String, friend: String },
    /// `/pair` with the wrong number of arguments
    PairUsage,
}

impl Command {
    pub fn parse(text: &str) -> Option<Self> {
        let text = text.trim();
        match text {
            "/help" => return Some(Command::Help),
            "/my" => return Some(Command::My),
            _ => {}
        }

        let mut parts = text.split_whitespace();
        let head = parts.next()?;
        if !head.eq_ignore_ascii_case("/pair") {
            return None;
        }

        let args: Vec<&str> = parts.collect();
        let is_word = |s: &str| s.chars().all(|c| c.is_ascii_alphanumeric() || c == '_');
        match args.as_slice() {
            [mine, friend] if is_word(mine) && is_word(friend) => Some(Command::Pair {
                mine: mine.to_lowercase(),
                friend: friend.to_lowercase(),
            }),
            _ => Some(Command::PairUsage),
        }
    }
}

fn language_name(code: &str) -> Option<&'static str> {
    Some(match code {
        "zh" => "Chinese",
        "en" => "English",
        "ja" => "Japanese",
        "th" => "Thai",
        "ko" => "Korean",
        "vi" => "Vietnamese",
        "fr" => "French",
        "de" => "German",
        "es" => "Spanish",
        "it" => "Italian",
        "pt" => "Portuguese",
        "ru" => "Russian",
        _ => return None,
    })
}

/// Split `text` into chunks of at most `max_chars` characters.
///
/// Never returns an empty list or an empty chunk.
pub fn chunk_message(text: &str, max_chars: usize) -> Vec<String> {
    if text.is_empty() {
        return vec![EMPTY_PLACEHOLDER.to_string()];
    }

    let max_chars = max_chars.max(1);
    let chars: Vec<char> = text.chars().collect();
    chars
        .chunks(max_chars)
        .map(|chunk| chunk.iter().collect())
        .collect()
}

pub struct Relay {
    session: Arc<TranslationSession>,
    supported: SupportedLanguages,
    max_message_chars: usize,
}

impl Relay {
    pub fn new(
        session: Arc<TranslationSession>,
        supported: SupportedLanguages,
        max_message_chars: usize,
    ) -> Self {
        Self {
            session,
            supported,
            max_message_chars,
        }
    }

    /// Handle every event concurrently; replies come back in input order.
    pub async fn handle_batch(&self, events: &[ChatEvent]) -> Vec<Option<Reply>> {
        join_all(events.iter().map(|event| self.handle(event))).await
    }

    /// `None` for events that get no reply (non-text messages).
    pub async fn handle(&self, event: &ChatEvent) -> Option<Reply> {
        let text = match &event.message {
            EventMessage::Text { text } => text.trim(),
            EventMessage::Other => {
                debug!("ignoring non-text event from {}", event.user_id);
                return None;
            }
        };
        let user_id = event.user_id.as_str();

        if let Some(command) = Command::parse(text) {
            return Some(self.run_command(user_id, command));
        }

        // Snapshot the pair once; a concurrent re-pair applies to the next message
        let pair = match self.session.pairs().get(user_id) {
            Some(pair) => pair,
            None => {
                return Some(self.reply(
                    user_id,
                    "First time here? Pick your language pair (you ↔ friend).\nFor example: `/pair zh en`",
                    true,
                ))
            }
        };

        let out = self.session.translate_for_user(&pair, text).await;
        Some(self.reply(user_id, &out, false))
    }

    fn run_command(&self, user_id: &str, command: Command) -> Reply {
        match command {
            Command::Help => self.reply(user_id, &self.help_text(), true),
            Command::My => {
                let msg = match self.session.pairs().get(user_id) {
                    Some(pair) => format!(
                        "Current language pair: you={}, friend={}",
                        pair.mine, pair.friend
                    ),
                    None => "No language pair yet. Send `/pair zh en` or pick one below."
                        .to_string(),
                };
                self.reply(user_id, &msg, true)
            }
            Command::PairUsage => {
                self.reply(user_id, "Usage: /pair <mine> <friend>, e.g. /pair zh en", true)
            }
            Command::Pair { mine, friend } => match self.pair(user_id, &mine, &friend) {
                Ok(pair) => self.reply(
                    user_id,
                    &format!(
                        "Language pair set: you={}, friend={}\nStart chatting!",
                        pair.mine, pair.friend
                    ),
                    false,
                ),
                Err(_) => self.reply(
                    user_id,
                    &format!(
                        "Unsupported language code. Supported: {}",
                        self.supported.joined()
                    ),
                    true,
                ),
            },
        }
    }

    /// Validate and store a pair for `user_id`
    pub fn pair(&self, user_id: &str, mine: &str, friend: &str) -> Result<LanguagePair, RelayError> {
        let pair = LanguagePair::parse(mine, friend, &self.supported)?;
        self.session.pairs().set(user_id, pair.clone());
        info!("{} paired {} <-> {}", user_id, pair.mine, pair.friend);
        Ok(pair)
    }

    pub fn help_text(&self) -> String {
        let names = self
            .supported
            .iter()
            .map(|code| match language_name(code.as_str()) {
                Some(name) => format!("{}={}", code, name),
                None => code.to_string(),
            })
            .collect::<Vec<_>>()
            .join(", ");

        [
            "🧭 How to use:".to_string(),
            "1) First pick your languages: tap a suggestion below or send `/pair zh en`".to_string(),
            format!("   - {}", names),
            "2) Then just chat; messages are translated both ways automatically.".to_string(),
            "3) Commands:".to_string(),
            "   /pair <mine> <friend>  e.g. /pair zh en".to_string(),
            "   /my  show your current language pair".to_string(),
            "   /help  show this help".to_string(),
        ]
        .join("\n")
    }

    pub fn quick_replies(&self) -> Vec<QuickReply> {
        SUGGESTED_PAIRS
            .iter()
            .filter(|(a, b)| {
                self.supported.contains(&(*a).into()) && self.supported.contains(&(*b).into())
            })
            .map(|(a, b)| {
                let label = match (language_name(a), language_name(b)) {
                    (Some(x), Some(y)) => format!("{} ↔ {}", x, y),
                    _ => format!("{} ↔ {}", a, b),
                };
                QuickReply {
                    label,
                    text: format!("/pair {} {}", a, b),
                }
            })
            .collect()
    }

    fn reply(&self, user_id: &str, text: &str, with_quick_replies: bool) -> Reply {
        Reply {
            user_id: user_id.to_string(),
            messages: chunk_message(text, self.max_message_chars),
            quick_replies: if with_quick_replies {
                self.quick_replies()
            } else {
                Vec::new()
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_commands() {
        assert_eq!(Command::parse("/help"), Some(Command::Help));
        assert_eq!(Command::parse(" /my "), Some(Command::My));
        assert_eq!(
            Command::parse("/PAIR ZH en"),
            Some(Command::Pair {
                mine: "zh".to_string(),
                friend: "en".to_string()
            })
        );
        assert_eq!(Command::parse("/pair zh"), Some(Command::PairUsage));
        assert_eq!(Command::parse("/pair zh-TW en"), Some(Command::PairUsage));
        assert_eq!(Command::parse("/pair 中文 en"), Some(Command::PairUsage));
        assert_eq!(Command::parse("/pair zé en"), Some(Command::PairUsage));
        assert_eq!(Command::parse("hello /help"), None);
        assert_eq!(Command::parse("/pairing"), None);
    }

    #[test]
    fn test_chunk_message() {
        assert_eq!(chunk_message("", 10), vec![EMPTY_PLACEHOLDER]);
        assert_eq!(chunk_message("abc", 10), vec!["abc"]);
        assert_eq!(chunk_message("你好世界呀", 2), vec!["你好", "世界", "呀"]);
    }

    #[test]
    fn test_event_json_shape() {
        let event: ChatEvent =
            serde_json::from_str(r#"{"user_id":"u1","type":"text","text":"hi"}"#).unwrap();
        assert_eq!(event, ChatEvent::text("u1", "hi"));

        let sticker: ChatEvent =
            serde_json::from_str(r#"{"user_id":"u1","type":"sticker"}"#).unwrap();
        assert_eq!(sticker.message, EventMessage::Other);
    }
}
