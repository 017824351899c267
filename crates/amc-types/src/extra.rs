use crate::picture::Picture;

/// A supplementary sub-record attached to a movie (trailer, making-of,
/// bonus disc entry, ...). Extras have no identity of their own; their
/// position in [`MovieRecord::extras`] is the only ordering.
///
/// [`MovieRecord::extras`]: crate::MovieRecord::extras
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct ExtraRecord {
    pub checked: bool,
    pub tag: String,
    pub title: String,
    pub category: String,
    pub url: String,
    pub description: String,
    pub comments: String,
    pub created_by: String,
    pub picture: Option<Picture>,
}
