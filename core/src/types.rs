//! Wire DTOs and domain entities.
//!
//! # Design
//! The DTOs mirror the Dog API's JSON and are defined independently of the
//! mock-server crate; integration tests catch schema drift. Only the
//! `message` field is read. The breed map deserializes into `BreedListing`,
//! a list of pairs, so the upstream key order survives into the domain list.

use std::fmt;

use serde::de::{MapAccess, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::text::{capitalize_display, capitalize_first_letter};

/// Body of `GET /breeds/list/all`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AllBreedsDto {
    pub message: BreedListing,
}

/// The `{breed: [sub-breed]}` JSON object, in document order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BreedListing(pub Vec<(String, Vec<String>)>);

impl Serialize for BreedListing {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_map(self.0.iter().map(|(k, v)| (k, v)))
    }
}

impl<'de> Deserialize<'de> for BreedListing {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct ListingVisitor;

        impl<'de> Visitor<'de> for ListingVisitor {
            type Value = BreedListing;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a map of breed names to sub-breed lists")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Self::Value, A::Error> {
                let mut entries = Vec::with_capacity(map.size_hint().unwrap_or(0));
                while let Some(entry) = map.next_entry::<String, Vec<String>>()? {
                    entries.push(entry);
                }
                Ok(BreedListing(entries))
            }
        }

        deserializer.deserialize_map(ListingVisitor)
    }
}

impl<K: Into<String>> FromIterator<(K, Vec<String>)> for BreedListing {
    fn from_iter<I: IntoIterator<Item = (K, Vec<String>)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }
}

/// Body of both random-image endpoints.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct BreedImagesDto {
    pub message: Vec<String>,
}

/// A dog breed and its (possibly empty) sub-breeds, display-ready.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Breed {
    pub name: String,
    #[serde(default)]
    pub sub_breeds: Vec<String>,
}

impl Breed {
    pub fn new(name: impl Into<String>, sub_breeds: Vec<String>) -> Self {
        Self {
            name: name.into(),
            sub_breeds,
        }
    }

    pub fn has_sub_breeds(&self) -> bool {
        !self.sub_breeds.is_empty()
    }
}

/// Map the raw breed listing to domain entities, keeping input order.
pub fn breeds_from_listing(listing: BreedListing) -> Vec<Breed> {
    listing
        .0
        .into_iter()
        .map(|(key, subs)| Breed {
            name: capitalize_first_letter(&key),
            sub_breeds: subs.iter().map(|s| capitalize_first_letter(s)).collect(),
        })
        .collect()
}

impl From<AllBreedsDto> for Vec<Breed> {
    fn from(dto: AllBreedsDto) -> Self {
        breeds_from_listing(dto.message)
    }
}

/// Which images the detail screen shows. Values are API path parameters,
/// so they are expected in the API's own (lower) case.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct BreedSelection {
    pub breed: String,
    pub sub_breed: Option<String>,
}

impl BreedSelection {
    pub fn breed(breed: impl Into<String>) -> Self {
        Self {
            breed: breed.into(),
            sub_breed: None,
        }
    }

    pub fn sub_breed(breed: impl Into<String>, sub_breed: impl Into<String>) -> Self {
        Self {
            breed: breed.into(),
            sub_breed: Some(sub_breed.into()),
        }
    }

    /// Screen title: `"Beagle"`, or sub-breed first for `"Happy Beagle"`.
    pub fn label(&self) -> String {
        match &self.sub_breed {
            Some(sub) => format!("{} {}", capitalize_display(sub), capitalize_display(&self.breed)),
            None => capitalize_display(&self.breed),
        }
    }
}
