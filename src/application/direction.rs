use crate::domain::model::{LanguageCode, LanguagePair};
use serde::Serialize;

/// Which branch of the routing policy picked the target
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    /// Detected my language, translating to my friend's
    Outbound,
    /// Detected my friend's language, translating to mine
    Inbound,
    /// Detection was unknown or outside the pair; assumed to be mine.
    /// This is a policy default, not a detection success.
    AssumedOutbound,
}

pub fn resolve_direction(pair: &LanguagePair, detected: &LanguageCode) -> Direction {
    if *detected == pair.mine {
        Direction::Outbound
    } else if *detected == pair.friend {
        Direction::Inbound
    } else {
        Direction::AssumedOutbound
    }
}

/// Pick the translation target for a message in `detected` language.
///
/// Messages that cannot be classified are relayed toward `pair.friend`.
pub fn resolve_target(pair: &LanguagePair, detected: &LanguageCode) -> LanguageCode {
    match resolve_direction(pair, detected) {
        Direction::Outbound | Direction::AssumedOutbound => pair.friend.clone(),
        Direction::Inbound => pair.mine.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pair(mine: &str, friend: &str) -> LanguagePair {
        LanguagePair {
            mine: LanguageCode::new(mine),
            friend: LanguageCode::new(friend),
        }
    }

    #[test]
    fn test_mine_goes_to_friend() {
        let p = pair("zh", "en");
        assert_eq!(resolve_target(&p, &LanguageCode::new("zh")).as_str(), "en");
        assert_eq!(resolve_direction(&p, &LanguageCode::new("zh")), Direction::Outbound);
    }

    #[test]
    fn test_friend_comes_back_to_mine() {
        let p = pair("zh", "en");
        assert_eq!(resolve_target(&p, &LanguageCode::new("en")).as_str(), "zh");
        assert_eq!(resolve_direction(&p, &LanguageCode::new("en")), Direction::Inbound);
    }

    #[test]
    fn test_third_language_defaults_to_friend() {
        let p = pair("zh", "en");
        assert_eq!(resolve_target(&p, &LanguageCode::new("fr")).as_str(), "en");
        assert_eq!(
            resolve_direction(&p, &LanguageCode::new("fr")),
            Direction::AssumedOutbound
        );
    }

    #[test]
    fn test_unknown_defaults_to_friend() {
        let p = pair("ja", "th");
        assert_eq!(resolve_target(&p, &LanguageCode::auto()).as_str(), "th");
    }

    #[test]
    fn test_identical_pair_resolves_to_itself() {
        let p = pair("en", "en");
        assert_eq!(resolve_target(&p, &LanguageCode::new("en")).as_str(), "en");
    }
}
