//! Media reference column mappings.
//!
//! Single-valued attachments persist as a `(url, key)` column pair;
//! multi-valued ones as a JSONB array of `{url, key}` objects.

use atelier_core::attachment::MediaRef;
use sea_orm::FromJsonQueryResult;
use serde::{Deserialize, Serialize};

/// JSONB-backed list of media references.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize, FromJsonQueryResult)]
pub struct MediaRefList(pub Vec<MediaRef>);

impl MediaRefList {
    /// Borrow the inner slice.
    #[must_use]
    pub fn as_slice(&self) -> &[MediaRef] {
        &self.0
    }

    /// Whether the list is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<Vec<MediaRef>> for MediaRefList {
    fn from(refs: Vec<MediaRef>) -> Self {
        Self(refs)
    }
}

/// Rebuild an optional reference from its column pair.
///
/// A row with only one half of the pair is treated as having no attachment;
/// nothing is derivable to delete, so it is silently "nothing".
#[must_use]
pub fn ref_from_columns(url: Option<String>, key: Option<String>) -> Option<MediaRef> {
    match (url, key) {
        (Some(url), Some(key)) => Some(MediaRef { url, key }),
        _ => None,
    }
}

/// Split an optional reference into its column pair.
#[must_use]
pub fn ref_into_columns(media: Option<MediaRef>) -> (Option<String>, Option<String>) {
    match media {
        Some(media) => (Some(media.url), Some(media.key)),
        None => (None, None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ref_from_columns_requires_both_halves() {
        assert!(ref_from_columns(None, None).is_none());
        assert!(ref_from_columns(Some("u".into()), None).is_none());
        assert!(ref_from_columns(None, Some("k".into())).is_none());

        let media = ref_from_columns(Some("u".into()), Some("k".into())).expect("full pair");
        assert_eq!(media.url, "u");
        assert_eq!(media.key, "k");
    }

    #[test]
    fn test_ref_into_columns_roundtrip() {
        let media = MediaRef::new("https://cdn/x.png", "Gallery/x.png");
        let (url, key) = ref_into_columns(Some(media.clone()));
        assert_eq!(ref_from_columns(url, key), Some(media));

        assert_eq!(ref_into_columns(None), (None, None));
    }
}
