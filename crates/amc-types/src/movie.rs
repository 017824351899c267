use chrono::NaiveDate;

use crate::date::delphi_date;
use crate::extra::ExtraRecord;
use crate::field::CustomValues;
use crate::picture::Picture;

/// One catalog entry.
///
/// Fields a file's format version does not carry are left at their
/// zero/empty defaults. `number` identifies the movie to the user, but the
/// decoder does not enforce uniqueness; a damaged file can contain the same
/// number twice and consumers must cope.
///
/// Field groups, in wire order:
///
/// ```text
/// ┌──────────────────┬──────────────────────────────────────────────────┐
/// │ Group            │ Fields                                           │
/// ├──────────────────┼──────────────────────────────────────────────────┤
/// │ identity/scalars │ number, date_added, date_watched, user_rating,   │
/// │                  │ rating, year, length, video/audio bitrate, disks │
/// │                  │ color_tag, checked                               │
/// │ media/loan       │ media, media_type, source, borrower              │
/// │ credits          │ titles, director, producer, writer, composer     │
/// │ classification   │ country, category, certification, actors         │
/// │ notes            │ url, description, comments, file_path            │
/// │ technical        │ video/audio format, resolution, framerate,       │
/// │                  │ languages, subtitles, size                       │
/// │ attachments      │ picture, custom_values, extras                   │
/// └──────────────────┴──────────────────────────────────────────────────┘
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct MovieRecord {
    pub number: i32,
    /// Days since 1899-12-30; see [`date_added_civil`](Self::date_added_civil).
    pub date_added: i32,
    pub date_watched: i32,
    pub user_rating: i32,
    /// Rating on the 0-100 scale, or -1 when unrated.
    pub rating: i32,
    pub year: i32,
    /// Running time in minutes.
    pub length: i32,
    pub video_bitrate: i32,
    pub audio_bitrate: i32,
    pub disks: i32,
    /// Colour label index, always in `0..13`.
    pub color_tag: i32,
    pub checked: bool,

    pub media: String,
    pub media_type: String,
    pub source: String,
    pub borrower: String,

    pub original_title: String,
    pub translated_title: String,
    pub director: String,
    pub producer: String,
    pub writer: String,
    pub composer: String,

    pub country: String,
    pub category: String,
    pub certification: String,
    pub actors: String,

    pub url: String,
    pub description: String,
    pub comments: String,
    pub file_path: String,

    pub video_format: String,
    pub audio_format: String,
    pub resolution: String,
    pub framerate: String,
    pub languages: String,
    pub subtitles: String,
    /// Free-text size as entered by the user (e.g. "700 MB").
    pub size: String,

    pub picture: Option<Picture>,
    pub custom_values: CustomValues,
    pub extras: Vec<ExtraRecord>,
}

impl MovieRecord {
    /// Title for display and file naming: the original title, else the
    /// translated one, else `movie_<number>`.
    #[must_use]
    pub fn display_title(&self) -> String {
        if !self.original_title.is_empty() {
            self.original_title.clone()
        } else if !self.translated_title.is_empty() {
            self.translated_title.clone()
        } else {
            format!("movie_{}", self.number)
        }
    }

    #[must_use]
    pub fn date_added_civil(&self) -> Option<NaiveDate> {
        delphi_date(self.date_added)
    }

    #[must_use]
    pub fn date_watched_civil(&self) -> Option<NaiveDate> {
        delphi_date(self.date_watched)
    }

    /// Every present picture on this record and its extras, paired with
    /// the file name an extractor should use for it.
    ///
    /// Extras without a title are named `extra_<n>` by their 1-based
    /// position.
    #[must_use]
    pub fn picture_assets(&self) -> Vec<(String, &Picture)> {
        let title = self.display_title();
        let mut assets = Vec::new();

        if let Some(pic) = &self.picture {
            assets.push((pic.file_name(self.number, &title, "poster"), pic));
        }
        for (i, extra) in self.extras.iter().enumerate() {
            if let Some(pic) = &extra.picture {
                let suffix = if extra.title.is_empty() {
                    format!("extra_{}", i + 1)
                } else {
                    extra.title.clone()
                };
                assets.push((pic.file_name(self.number, &title, &suffix), pic));
            }
        }
        assets
    }
}
