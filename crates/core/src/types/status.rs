//! Fixed enums shared across the wire format.
//!
//! Serde spellings match the persisted snapshot documents exactly
//! (`"priceLow"`, `"likeNew"`, ...), so these types round-trip snapshots
//! written by earlier clients.

use serde::{Deserialize, Serialize};

/// Catalog sort order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum SortMode {
    /// Newest listing first (descending creation time).
    #[default]
    #[serde(rename = "newest")]
    Newest,
    /// Cheapest first.
    #[serde(rename = "priceLow")]
    PriceLow,
    /// Most expensive first.
    #[serde(rename = "priceHigh")]
    PriceHigh,
}

impl std::fmt::Display for SortMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Newest => write!(f, "newest"),
            Self::PriceLow => write!(f, "priceLow"),
            Self::PriceHigh => write!(f, "priceHigh"),
        }
    }
}

impl std::str::FromStr for SortMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "newest" => Ok(Self::Newest),
            "priceLow" => Ok(Self::PriceLow),
            "priceHigh" => Ok(Self::PriceHigh),
            _ => Err(format!("invalid sort mode: {s}")),
        }
    }
}

/// Which top-level tab the client is showing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ActiveTab {
    #[default]
    Home,
    Messages,
    Profile,
}

impl std::fmt::Display for ActiveTab {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Home => write!(f, "home"),
            Self::Messages => write!(f, "messages"),
            Self::Profile => write!(f, "profile"),
        }
    }
}

impl std::str::FromStr for ActiveTab {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "home" => Ok(Self::Home),
            "messages" => Ok(Self::Messages),
            "profile" => Ok(Self::Profile),
            _ => Err(format!("invalid tab: {s}")),
        }
    }
}

/// The three negotiation primitives a buyer can send on a listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InteractionKind {
    /// Free-text message.
    Message,
    /// Cash offer.
    Offer,
    /// Barter (takas) offer referencing one of the sender's own listings.
    Exchange,
}

impl std::fmt::Display for InteractionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Message => write!(f, "message"),
            Self::Offer => write!(f, "offer"),
            Self::Exchange => write!(f, "exchange"),
        }
    }
}

impl std::str::FromStr for InteractionKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "message" => Ok(Self::Message),
            "offer" => Ok(Self::Offer),
            "exchange" | "takas" => Ok(Self::Exchange),
            _ => Err(format!("invalid interaction kind: {s}")),
        }
    }
}

/// Physical condition of a listed item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Condition {
    #[serde(rename = "new")]
    New,
    #[serde(rename = "likeNew")]
    LikeNew,
    #[default]
    #[serde(rename = "good")]
    Good,
    #[serde(rename = "fair")]
    Fair,
}

impl std::fmt::Display for Condition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::New => write!(f, "new"),
            Self::LikeNew => write!(f, "likeNew"),
            Self::Good => write!(f, "good"),
            Self::Fair => write!(f, "fair"),
        }
    }
}

impl std::str::FromStr for Condition {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "new" => Ok(Self::New),
            "likeNew" | "like-new" => Ok(Self::LikeNew),
            "good" => Ok(Self::Good),
            "fair" => Ok(Self::Fair),
            _ => Err(format!("invalid condition: {s}")),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_sort_mode_wire_spelling() {
        assert_eq!(serde_json::to_string(&SortMode::PriceLow).unwrap(), "\"priceLow\"");
        let mode: SortMode = serde_json::from_str("\"priceHigh\"").unwrap();
        assert_eq!(mode, SortMode::PriceHigh);
    }

    #[test]
    fn test_sort_mode_display_fromstr_roundtrip() {
        for mode in [SortMode::Newest, SortMode::PriceLow, SortMode::PriceHigh] {
            assert_eq!(mode.to_string().parse::<SortMode>().unwrap(), mode);
        }
    }

    #[test]
    fn test_active_tab_default() {
        assert_eq!(ActiveTab::default(), ActiveTab::Home);
    }

    #[test]
    fn test_interaction_kind_wire_spelling() {
        assert_eq!(
            serde_json::to_string(&InteractionKind::Exchange).unwrap(),
            "\"exchange\""
        );
        // "takas" is accepted on input for the legacy spelling
        assert_eq!(
            "takas".parse::<InteractionKind>().unwrap(),
            InteractionKind::Exchange
        );
    }

    #[test]
    fn test_condition_unknown_rejected() {
        assert!(serde_json::from_str::<Condition>("\"mint\"").is_err());
    }
}
