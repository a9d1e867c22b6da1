use serde::{Deserialize, Serialize};

/// A track as Last.fm describes it in its JSON responses.
///
/// Only the fields needed to submit an update are modelled; the shape matches
/// the service's track objects so one can be deserialized straight from a
/// `user.getRecentTracks` reply and handed back in an update.
///
/// # Examples
///
/// ```rust
/// use lastfm_scrobble::Track;
///
/// let track: Track = serde_json::from_str(
///     r##"{"name": "Run To Your Grave", "artist": {"#text": "The Mae Shi"}}"##,
/// ).unwrap();
///
/// assert_eq!(track, Track::new("Run To Your Grave", "The Mae Shi"));
/// assert_eq!(track.artist_name(), "The Mae Shi");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Track {
    /// The track name/title
    pub name: String,
    /// The performing artist
    pub artist: TrackArtist,
    /// Album the track appears on, when the service reports one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub album: Option<TrackAlbum>,
    /// MusicBrainz track id, when the service knows it
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mbid: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TrackArtist {
    /// Artist display name
    #[serde(rename = "#text")]
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mbid: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TrackAlbum {
    #[serde(rename = "#text")]
    pub text: String,
}

impl Track {
    pub fn new(name: impl Into<String>, artist: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            artist: TrackArtist {
                text: artist.into(),
                mbid: None,
            },
            album: None,
            mbid: None,
        }
    }

    /// Builder-style setter for the album name.
    pub fn with_album(mut self, album: impl Into<String>) -> Self {
        self.album = Some(TrackAlbum { text: album.into() });
        self
    }

    pub fn artist_name(&self) -> &str {
        &self.artist.text
    }

    pub fn album_name(&self) -> Option<&str> {
        self.album.as_ref().map(|album| album.text.as_str())
    }
}
