use quiz_types::{Champion, ChampionId, Tag};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SortOption {
    #[default]
    Name,
    Difficulty,
    Favorites,
}

impl FromStr for SortOption {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "name" => Ok(SortOption::Name),
            "difficulty" => Ok(SortOption::Difficulty),
            "favorites" | "favourites" => Ok(SortOption::Favorites),
            other => Err(format!("Unknown sort option: {}", other)),
        }
    }
}

impl fmt::Display for SortOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SortOption::Name => f.write_str("name"),
            SortOption::Difficulty => f.write_str("difficulty"),
            SortOption::Favorites => f.write_str("favorites"),
        }
    }
}

/// Champion ids the player has bookmarked
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bookmarks {
    ids: BTreeSet<ChampionId>,
}

impl Bookmarks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Flip the bookmark for a champion, returning whether it is now bookmarked
    pub fn toggle(&mut self, id: &str) -> bool {
        if self.ids.remove(id) {
            false
        } else {
            self.ids.insert(id.to_string());
            true
        }
    }

    pub fn is_bookmarked(&self, id: &str) -> bool {
        self.ids.contains(id)
    }

    pub fn ids(&self) -> impl Iterator<Item = &ChampionId> {
        self.ids.iter()
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}

impl FromIterator<ChampionId> for Bookmarks {
    fn from_iter<I: IntoIterator<Item = ChampionId>>(iter: I) -> Self {
        Self {
            ids: iter.into_iter().collect(),
        }
    }
}

/// Search, tag filter and sort order for the champion browser
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CatalogQuery {
    pub search: Option<String>,
    pub tag: Option<Tag>,
    pub sort: SortOption,
}

impl CatalogQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_search(&mut self, search: &str) {
        let search = search.trim();
        self.search = if search.is_empty() {
            None
        } else {
            Some(search.to_string())
        };
    }

    /// Selecting the active tag again clears the filter
    pub fn toggle_tag(&mut self, tag: Tag) {
        self.tag = if self.tag == Some(tag) { None } else { Some(tag) };
    }

    pub fn set_sort(&mut self, sort: SortOption) {
        self.sort = sort;
    }

    pub fn apply<'a>(&self, champions: &'a [Champion], bookmarks: &Bookmarks) -> Vec<&'a Champion> {
        let search = self.search.as_ref().map(|s| s.to_lowercase());

        let mut visible: Vec<&Champion> = champions
            .iter()
            .filter(|champion| match &search {
                Some(search) => champion.name.to_lowercase().contains(search.as_str()),
                None => true,
            })
            .filter(|champion| self.tag.is_none_or(|tag| champion.has_tag(tag)))
            .collect();

        // All sorts are stable so ties keep catalog order
        match self.sort {
            SortOption::Name => visible.sort_by_cached_key(|champion| champion.name.to_lowercase()),
            SortOption::Difficulty => visible.sort_by_key(|champion| champion.info.difficulty),
            SortOption::Favorites => visible.sort_by_key(|champion| !bookmarks.is_bookmarked(&champion.id)),
        }

        visible
    }
}
