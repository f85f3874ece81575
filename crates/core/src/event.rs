use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Kind of action that earns progression.
///
/// Names are trimmed and uppercased before matching. Unknown kinds keep that
/// normalized name in `Other` so they still flow through the award cycle
/// (with whatever XP, usually none, the config gives them).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum EventKind {
    PokemonCapture,
    DailyChallengeComplete,
    FirstDiscoveryPost,
    Other(String),
}

impl EventKind {
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::PokemonCapture => "POKEMON_CAPTURE",
            Self::DailyChallengeComplete => "DAILY_CHALLENGE_COMPLETE",
            Self::FirstDiscoveryPost => "FIRST_DISCOVERY_POST",
            Self::Other(s) => s,
        }
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EventKind {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::from(s.to_owned()))
    }
}

impl From<String> for EventKind {
    fn from(s: String) -> Self {
        let name = s.trim().to_ascii_uppercase();
        match name.as_str() {
            "POKEMON_CAPTURE" => Self::PokemonCapture,
            "DAILY_CHALLENGE_COMPLETE" => Self::DailyChallengeComplete,
            "FIRST_DISCOVERY_POST" => Self::FirstDiscoveryPost,
            _ => Self::Other(name),
        }
    }
}

impl From<EventKind> for String {
    fn from(kind: EventKind) -> Self {
        match kind {
            EventKind::Other(s) => s,
            known => known.as_str().to_owned(),
        }
    }
}

/// Optional details attached to an award event.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AwardContext {
    /// National dex id of the captured creature, for region badges.
    #[serde(default)]
    pub pokemon_id: Option<u32>,
}

impl AwardContext {
    #[must_use]
    pub fn with_pokemon(pokemon_id: u32) -> Self {
        Self { pokemon_id: Some(pokemon_id) }
    }
}

/// An external trigger applied to one user's progress.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AwardEvent {
    pub kind: EventKind,
    #[serde(default)]
    pub context: AwardContext,
}

impl AwardEvent {
    #[must_use]
    pub fn new(kind: EventKind) -> Self {
        Self { kind, context: AwardContext::default() }
    }

    #[must_use]
    pub fn capture(pokemon_id: u32) -> Self {
        Self { kind: EventKind::PokemonCapture, context: AwardContext::with_pokemon(pokemon_id) }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_known_kinds_case_insensitively() {
        assert_eq!("POKEMON_CAPTURE".parse::<EventKind>().unwrap(), EventKind::PokemonCapture);
        assert_eq!(
            " daily_challenge_complete ".parse::<EventKind>().unwrap(),
            EventKind::DailyChallengeComplete
        );
    }

    #[test]
    fn unknown_kind_is_preserved() {
        let kind: EventKind = "TRADE_COMPLETED".parse().unwrap();
        assert_eq!(kind, EventKind::Other("TRADE_COMPLETED".to_owned()));
        assert_eq!(kind.to_string(), "TRADE_COMPLETED");
    }

    #[test]
    fn unknown_kind_is_normalized() {
        let kind: EventKind = "  Raid_won ".parse().unwrap();
        assert_eq!(kind, EventKind::Other("RAID_WON".to_owned()));
        assert_eq!(kind, "RAID_WON".parse().unwrap());
        let from_json: EventKind = serde_json::from_str("\"raid_won\"").unwrap();
        assert_eq!(from_json, kind);
    }

    #[test]
    fn serializes_as_plain_string() {
        let json = serde_json::to_string(&EventKind::FirstDiscoveryPost).unwrap();
        assert_eq!(json, "\"FIRST_DISCOVERY_POST\"");
        let event: AwardEvent =
            serde_json::from_str(r#"{"kind":"POKEMON_CAPTURE","context":{"pokemonId":25}}"#)
                .unwrap();
        assert_eq!(event, AwardEvent::capture(25));
    }
}
