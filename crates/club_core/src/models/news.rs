use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

use super::ids::ClubId;

/// Items kept in the feed; older ones fall off the end
pub const NEWS_FEED_CAPACITY: usize = 100;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum NewsCategory {
    Result,
    Transfer,
    Injury,
    Suspension,
    Season,
    Finance,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NewsItem {
    pub date: NaiveDate,
    pub category: NewsCategory,
    pub headline: String,
    /// Clubs the story is about
    #[serde(default)]
    pub clubs: Vec<ClubId>,
}

/// Newest-first, bounded news feed
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct NewsFeed {
    items: VecDeque<NewsItem>,
}

impl NewsFeed {
    pub fn push(&mut self, item: NewsItem) {
        self.items.push_front(item);
        self.items.truncate(NEWS_FEED_CAPACITY);
    }

    pub fn post(
        &mut self,
        date: NaiveDate,
        category: NewsCategory,
        headline: impl Into<String>,
        clubs: Vec<ClubId>,
    ) {
        self.push(NewsItem {
            date,
            category,
            headline: headline.into(),
            clubs,
        });
    }

    pub fn iter(&self) -> impl Iterator<Item = &NewsItem> {
        self.items.iter()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn about(&self, club: ClubId) -> impl Iterator<Item = &NewsItem> {
        self.items
            .iter()
            .filter(move |item| item.clubs.contains(&club))
    }
}
