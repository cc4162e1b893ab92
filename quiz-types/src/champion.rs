use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use ts_rs::TS;

pub type ChampionId = String;

/// The part of a champion the guess matcher cares about
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct CatalogEntry {
    pub id: ChampionId,
    pub name: String,
}

impl CatalogEntry {
    pub fn new(id: impl Into<ChampionId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Champion {
    pub id: ChampionId,
    #[serde(default)]
    pub key: String,
    pub name: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub tags: Vec<Tag>,
    #[serde(default)]
    pub info: ChampionInfo,
    #[serde(default)]
    pub image: ChampionImage,
}

impl Champion {
    pub fn entry(&self) -> CatalogEntry {
        CatalogEntry::new(self.id.clone(), self.name.clone())
    }

    pub fn has_tag(&self, tag: Tag) -> bool {
        self.tags.contains(&tag)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ChampionInfo {
    pub attack: u8,
    pub defense: u8,
    pub magic: u8,
    pub difficulty: u8,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ChampionImage {
    pub loading: String,
    #[serde(default)]
    pub square: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum Tag {
    Assassin,
    Fighter,
    Mage,
    Marksman,
    Support,
    Tank,
}

impl Tag {
    pub const ALL: [Tag; 6] = [
        Tag::Assassin,
        Tag::Fighter,
        Tag::Mage,
        Tag::Marksman,
        Tag::Support,
        Tag::Tank,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Tag::Assassin => "Assassin",
            Tag::Fighter => "Fighter",
            Tag::Mage => "Mage",
            Tag::Marksman => "Marksman",
            Tag::Support => "Support",
            Tag::Tank => "Tank",
        }
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Tag {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Tag::ALL
            .into_iter()
            .find(|tag| tag.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("Unknown tag: {}", s))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tag_parsing_ignores_case() {
        assert_eq!("mage".parse::<Tag>(), Ok(Tag::Mage));
        assert_eq!(" TANK ".parse::<Tag>(), Ok(Tag::Tank));
        assert!("jungler".parse::<Tag>().is_err());
    }

    #[test]
    fn test_champion_deserializes_with_missing_optional_fields() {
        let json = r#"{"id":"Zed","name":"Zed","tags":["Assassin"]}"#;
        let champion: Champion = serde_json::from_str(json).unwrap();

        assert_eq!(champion.entry(), CatalogEntry::new("Zed", "Zed"));
        assert!(champion.has_tag(Tag::Assassin));
        assert_eq!(champion.info.difficulty, 0);
        assert!(champion.image.loading.is_empty());
    }
}
