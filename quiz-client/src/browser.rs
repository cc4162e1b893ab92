use std::sync::Arc;

use crate::error::SessionError;
use quiz_core::{BookmarkStore, Bookmarks, CatalogQuery, SortOption};
use quiz_types::{Champion, Tag};

/// Champion list view state: search, tag filter, sort order and bookmarks
pub struct CatalogBrowser {
    champions: Vec<Champion>,
    bookmarks: Bookmarks,
    query: CatalogQuery,
    store: Arc<dyn BookmarkStore>,
}

impl CatalogBrowser {
    pub async fn load(champions: Vec<Champion>, store: Arc<dyn BookmarkStore>) -> Result<Self, SessionError> {
        let bookmarks = store
            .load_bookmarks()
            .await
            .map_err(SessionError::StorageUnavailable)?;

        Ok(Self {
            champions,
            bookmarks,
            query: CatalogQuery::new(),
            store,
        })
    }

    pub fn visible(&self) -> Vec<&Champion> {
        self.query.apply(&self.champions, &self.bookmarks)
    }

    pub fn query(&self) -> &CatalogQuery {
        &self.query
    }

    pub fn set_search(&mut self, search: &str) {
        self.query.set_search(search);
    }

    pub fn toggle_tag(&mut self, tag: Tag) {
        self.query.toggle_tag(tag);
    }

    pub fn set_sort(&mut self, sort: SortOption) {
        self.query.set_sort(sort);
    }

    pub fn is_bookmarked(&self, id: &str) -> bool {
        self.bookmarks.is_bookmarked(id)
    }

    /// Find a champion by id or by name, ignoring case
    pub fn find(&self, id_or_name: &str) -> Option<&Champion> {
        let needle = id_or_name.trim();
        self.champions.iter().find(|champion| {
            champion.id.eq_ignore_ascii_case(needle) || champion.name.eq_ignore_ascii_case(needle)
        })
    }

    /// Flip a champion's bookmark and store the new set, returning whether it is now bookmarked
    pub async fn toggle_bookmark(&mut self, id_or_name: &str) -> Result<bool, SessionError> {
        let id = self
            .find(id_or_name)
            .map(|champion| champion.id.clone())
            .ok_or_else(|| SessionError::UnknownChampion(id_or_name.to_string()))?;

        let mut updated = self.bookmarks.clone();
        let bookmarked = updated.toggle(&id);
        self.store
            .save_bookmarks(&updated)
            .await
            .map_err(SessionError::StorageUnavailable)?;

        self.bookmarks = updated;
        Ok(bookmarked)
    }
}
