//! Render-ready views of screen state for a host UI.
//!
//! Nothing here touches state cells; hosts call these on the values they read
//! from a `StateHandle`.

use std::collections::HashSet;

use serde::Serialize;

use crate::types::{Breed, BreedSelection};

/// One line of the breed list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum BreedRow {
    /// A breed without sub-breeds; selecting it opens its images.
    Breed {
        name: String,
        selection: BreedSelection,
    },
    /// A breed with sub-breeds; selecting it toggles the section.
    SectionHeading { name: String, expanded: bool },
    /// Shown under an expanded heading.
    SubBreed {
        name: String,
        selection: BreedSelection,
    },
}

impl BreedRow {
    pub fn name(&self) -> &str {
        match self {
            BreedRow::Breed { name, .. }
            | BreedRow::SectionHeading { name, .. }
            | BreedRow::SubBreed { name, .. } => name,
        }
    }

    /// Where this row navigates, if anywhere.
    pub fn selection(&self) -> Option<&BreedSelection> {
        match self {
            BreedRow::Breed { selection, .. } | BreedRow::SubBreed { selection, .. } => {
                Some(selection)
            }
            BreedRow::SectionHeading { .. } => None,
        }
    }
}

/// Which section headings are open, keyed by breed display name.
/// Every section starts collapsed.
#[derive(Debug, Clone, Default)]
pub struct SectionToggles {
    open: HashSet<String>,
}

impl SectionToggles {
    pub fn is_expanded(&self, breed: &str) -> bool {
        self.open.contains(breed)
    }

    /// Flip one section and return its new state.
    pub fn toggle(&mut self, breed: &str) -> bool {
        if self.open.remove(breed) {
            false
        } else {
            self.open.insert(breed.to_string());
            true
        }
    }
}

/// Flatten `items` into list rows, in order.
pub fn breed_rows(items: &[Breed], toggles: &SectionToggles) -> Vec<BreedRow> {
    let mut rows = Vec::with_capacity(items.len());
    for breed in items {
        if !breed.has_sub_breeds() {
            rows.push(BreedRow::Breed {
                name: breed.name.clone(),
                selection: BreedSelection::breed(breed.name.to_lowercase()),
            });
            continue;
        }

        let expanded = toggles.is_expanded(&breed.name);
        rows.push(BreedRow::SectionHeading {
            name: breed.name.clone(),
            expanded,
        });
        if expanded {
            let key = breed.name.to_lowercase();
            rows.extend(breed.sub_breeds.iter().map(|sub| BreedRow::SubBreed {
                name: sub.clone(),
                selection: BreedSelection::sub_breed(key.clone(), sub.to_lowercase()),
            }));
        }
    }
    rows
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CachePolicy {
    Enabled,
    Disabled,
}

/// What the host's image loader is asked to fetch for one grid cell.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ImageRequest {
    pub url: String,
    pub memory_cache_key: String,
    pub disk_cache_key: String,
    pub memory_cache_policy: CachePolicy,
    pub disk_cache_policy: CachePolicy,
}

impl ImageRequest {
    /// Cached in memory and on disk under the URL itself.
    pub fn for_url(url: impl Into<String>) -> Self {
        let url = url.into();
        Self {
            memory_cache_key: url.clone(),
            disk_cache_key: url.clone(),
            url,
            memory_cache_policy: CachePolicy::Enabled,
            disk_cache_policy: CachePolicy::Enabled,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn items() -> Vec<Breed> {
        vec![
            Breed::new("Akita", vec![]),
            Breed::new("Hound", vec!["Afghan".to_string(), "Basset".to_string()]),
            Breed::new("Whippet", vec![]),
        ]
    }

    #[test]
    fn collapsed_sections_hide_sub_breeds() {
        let rows = breed_rows(&items(), &SectionToggles::default());
        assert_eq!(
            rows,
            vec![
                BreedRow::Breed {
                    name: "Akita".into(),
                    selection: BreedSelection::breed("akita"),
                },
                BreedRow::SectionHeading {
                    name: "Hound".into(),
                    expanded: false,
                },
                BreedRow::Breed {
                    name: "Whippet".into(),
                    selection: BreedSelection::breed("whippet"),
                },
            ]
        );
    }

    #[test]
    fn expanded_section_lists_sub_breeds_with_lowercase_params() {
        let mut toggles = SectionToggles::default();
        assert!(toggles.toggle("Hound"));

        let rows = breed_rows(&items(), &toggles);
        let names: Vec<&str> = rows.iter().map(BreedRow::name).collect();
        assert_eq!(names, ["Akita", "Hound", "Afghan", "Basset", "Whippet"]);
        assert_eq!(
            rows[2].selection(),
            Some(&BreedSelection::sub_breed("hound", "afghan"))
        );
        assert_eq!(rows[1].selection(), None);
        assert_eq!(rows[2].selection().map(BreedSelection::label).as_deref(), Some("Afghan Hound"));
    }

    #[test]
    fn toggle_twice_collapses() {
        let mut toggles = SectionToggles::default();
        assert!(toggles.toggle("Hound"));
        assert!(!toggles.toggle("Hound"));
        assert!(!toggles.is_expanded("Hound"));
    }

    #[test]
    fn empty_list_has_no_rows() {
        assert!(breed_rows(&[], &SectionToggles::default()).is_empty());
    }

    #[test]
    fn image_request_caches_under_url() {
        let request = ImageRequest::for_url("https://images.dog.ceo/breeds/akita/1.jpg");
        assert_eq!(request.memory_cache_key, request.url);
        assert_eq!(request.disk_cache_key, request.url);
        assert_eq!(request.memory_cache_policy, CachePolicy::Enabled);
        assert_eq!(request.disk_cache_policy, CachePolicy::Enabled);
    }

    #[test]
    fn rows_serialize_with_kind_tag() {
        let row = BreedRow::SectionHeading {
            name: "Hound".into(),
            expanded: true,
        };
        assert_eq!(
            serde_json::to_value(&row).unwrap(),
            serde_json::json!({"kind": "section_heading", "name": "Hound", "expanded": true})
        );
    }
}
