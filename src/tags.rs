//! Defines [`TagFrequency`], the tag → post-count mapping behind the tag
//! sidebar, and [`SidebarTag`], one rendered sidebar entry.

use crate::post::PostSummary;
use serde::de::{Deserialize, Deserializer, MapAccess, Visitor};
use serde::ser::{Serialize, SerializeMap, Serializer};
use std::fmt;

/// Counts of posts per tag, kept in the order tags were first seen. Order
/// matters: it breaks ties when sorting by count.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TagFrequency(Vec<(String, usize)>);

impl TagFrequency {
    pub fn new() -> Self {
        TagFrequency(Vec::new())
    }

    /// Aggregates tag counts from a post listing. Tags are keyed by their
    /// slug so `Rust` and `rust` count together.
    pub fn from_posts(posts: &[PostSummary]) -> Self {
        let mut frequency = TagFrequency::new();
        for post in posts {
            for tag in &post.tags {
                frequency.increment(&slug::slugify(tag));
            }
        }
        frequency
    }

    /// Adds one to `tag`'s count, appending it if unseen.
    pub fn increment(&mut self, tag: &str) {
        match self.0.iter_mut().find(|(name, _)| name == tag) {
            Some((_, count)) => *count += 1,
            None => self.0.push((tag.to_owned(), 1)),
        }
    }

    /// Sets `tag`'s count, appending it if unseen.
    pub fn insert(&mut self, tag: &str, count: usize) {
        match self.0.iter_mut().find(|(name, _)| name == tag) {
            Some((_, c)) => *c = count,
            None => self.0.push((tag.to_owned(), count)),
        }
    }

    pub fn get(&self, tag: &str) -> Option<usize> {
        self.0.iter().find(|(name, _)| name == tag).map(|(_, c)| *c)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, usize)> {
        self.0.iter().map(|(name, count)| (name.as_str(), *count))
    }

    /// Returns the tags ordered by descending count. `sort_by` is stable, so
    /// equal counts keep their input order.
    pub fn sorted(&self) -> Vec<(&str, usize)> {
        let mut tags: Vec<(&str, usize)> = self.iter().collect();
        tags.sort_by(|a, b| b.1.cmp(&a.1));
        tags
    }

    /// Builds the sidebar entries. `current_path` is the path being viewed
    /// (e.g., `/tags/rust`); the entry whose slug is the text between the
    /// first and second `/tags/` is marked selected.
    pub fn sidebar(&self, current_path: &str) -> Vec<SidebarTag> {
        let selected = current_path.split("/tags/").nth(1);
        self.sorted()
            .into_iter()
            .map(|(name, count)| {
                let key = slug::slugify(name);
                SidebarTag {
                    name: name.to_owned(),
                    count,
                    selected: selected == Some(key.as_str()),
                    href: format!("/tags/{}", key),
                }
            })
            .collect()
    }
}

/// One entry in the tag sidebar.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize)]
pub struct SidebarTag {
    pub name: String,
    pub count: usize,

    /// The tag's listing page, e.g. `/tags/rust`.
    pub href: String,

    /// Whether the tag's listing is the page being viewed. Selected entries
    /// render as a heading rather than a link.
    pub selected: bool,
}

impl fmt::Display for SidebarTag {
    /// Formats the entry's label, e.g. `rust (3)`.
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.count)
    }
}

impl<'de> Deserialize<'de> for TagFrequency {
    /// Deserializes from a map, preserving the document's key order.
    fn deserialize<D>(deserializer: D) -> Result<TagFrequency, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct FrequencyVisitor;

        impl<'de> Visitor<'de> for FrequencyVisitor {
            type Value = TagFrequency;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                write!(f, "a map of tag names to counts")
            }

            fn visit_map<M>(self, mut access: M) -> Result<TagFrequency, M::Error>
            where
                M: MapAccess<'de>,
            {
                let mut frequency = TagFrequency::new();
                while let Some((tag, count)) = access.next_entry::<String, usize>()? {
                    frequency.insert(&tag, count);
                }
                Ok(frequency)
            }
        }

        deserializer.deserialize_map(FrequencyVisitor)
    }
}

impl Serialize for TagFrequency {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (tag, count) in &self.0 {
            map.serialize_entry(tag, count)?;
        }
        map.end()
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn frequency(entries: &[(&str, usize)]) -> TagFrequency {
        let mut f = TagFrequency::new();
        for (tag, count) in entries {
            f.insert(tag, *count);
        }
        f
    }

    fn names<'a>(sorted: &[(&'a str, usize)]) -> Vec<&'a str> {
        sorted.iter().map(|(name, _)| *name).collect()
    }

    #[test]
    fn test_sorted_ties_keep_input_order() {
        let f = frequency(&[("a", 2), ("b", 2), ("c", 1)]);
        assert_eq!(vec!["a", "b", "c"], names(&f.sorted()));
    }

    #[test]
    fn test_sorted_descending() {
        let f = frequency(&[("c", 1), ("b", 2), ("a", 2), ("d", 5)]);
        assert_eq!(vec!["d", "b", "a", "c"], names(&f.sorted()));
    }

    #[test]
    fn test_deserialize_preserves_order() -> Result<(), serde_json::Error> {
        let f: TagFrequency =
            serde_json::from_str(r#"{"zig": 1, "rust": 3, "go": 1, "c": 3}"#)?;
        assert_eq!(vec!["rust", "c", "zig", "go"], names(&f.sorted()));
        assert_eq!(
            r#"{"zig":1,"rust":3,"go":1,"c":3}"#,
            serde_json::to_string(&f)?
        );
        Ok(())
    }

    #[test]
    fn test_from_posts_counts_by_slug() {
        let post = |tags: &[&str]| PostSummary {
            path: String::from("blog/x"),
            title: String::from("x"),
            summary: String::new(),
            date: String::from("2024-01-01"),
            tags: tags.iter().map(|t| t.to_string()).collect(),
        };
        let f = TagFrequency::from_posts(&[
            post(&["Next JS", "rust"]),
            post(&["Rust"]),
            post(&[]),
        ]);
        assert_eq!(Some(1), f.get("next-js"));
        assert_eq!(Some(2), f.get("rust"));
        assert_eq!(vec!["rust", "next-js"], names(&f.sorted()));
    }

    #[test]
    fn test_sidebar_marks_current_tag() {
        let f = frequency(&[("go", 1), ("rust", 2)]);
        let sidebar = f.sidebar("/tags/go");
        assert_eq!(2, sidebar.len());
        assert_eq!("rust (2)", sidebar[0].to_string());
        assert_eq!("/tags/rust", sidebar[0].href);
        assert!(!sidebar[0].selected);
        assert!(sidebar[1].selected);
    }

    #[test]
    fn test_sidebar_selects_by_slug() -> Result<(), serde_json::Error> {
        let f: TagFrequency = serde_json::from_str(r#"{"Next JS": 2, "rust": 1}"#)?;
        let sidebar = f.sidebar("/tags/next-js");
        assert_eq!("/tags/next-js", sidebar[0].href);
        assert!(sidebar[0].selected);
        assert!(!sidebar[1].selected);
        Ok(())
    }

    #[test]
    fn test_sidebar_segment_is_not_normalized() {
        let f = frequency(&[("go", 1)]);
        assert!(!f.sidebar("/tags/go/").iter().any(|t| t.selected));
        assert!(f.sidebar("/tags/go/tags/rust").iter().all(|t| t.selected));
    }

    #[test]
    fn test_sidebar_outside_tag_pages() {
        let f = frequency(&[("go", 1)]);
        assert!(f.sidebar("/blog").iter().all(|t| !t.selected));
    }
}
