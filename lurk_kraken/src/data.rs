//! Response shapes of the kraken api.
//!
//! Every type decodes leniently: missing fields fall back to their default,
//! and the fields kraken is known to send as `null` are either `Option`s or
//! pass through [`nullable`](crate::serde::nullable).
//!
//! Field names are renamed only when *deserializing* (`_id`, `_links`,
//! `_total`) so the templates see plain names.

use time::OffsetDateTime;

/// `GET users/{user}/follows/channels`
#[derive(Clone, Debug, Default, PartialEq, ::serde::Deserialize, ::serde::Serialize)]
#[serde(default)]
pub struct FollowedChannels {
    pub follows: Vec<Follow>,
    #[serde(rename(deserialize = "_total"))]
    pub total: u64,
    #[serde(rename(deserialize = "_links"))]
    pub links: PageLinks,
}

impl FollowedChannels {
    /// Names of the followed channels, in the order kraken listed them
    pub fn channel_names(&self) -> impl Iterator<Item = &str> + ExactSizeIterator + '_ {
        self.follows.iter().map(|follow| &*follow.channel.name)
    }
}

#[derive(Clone, Debug, Default, PartialEq, ::serde::Deserialize, ::serde::Serialize)]
#[serde(default)]
pub struct Follow {
    #[serde(with = "crate::serde::timestamp")]
    pub created_at: Option<OffsetDateTime>,
    #[serde(rename(deserialize = "_links"))]
    pub links: SelfLink,
    pub channel: FollowedChannel,
}

#[derive(Clone, Debug, Default, PartialEq, ::serde::Deserialize, ::serde::Serialize)]
#[serde(default)]
pub struct FollowedChannel {
    pub name: String,
}

/// A broadcaster along with its current [`Stream`].
///
/// `GET streams/{channel}` only fills in `stream` (and `_links`), while
/// `GET channels/{channel}` fills in everything but `stream`.
#[derive(Clone, Debug, Default, PartialEq, ::serde::Deserialize, ::serde::Serialize)]
#[serde(default)]
pub struct Channel {
    #[serde(deserialize_with = "crate::serde::nullable")]
    pub stream: Stream,
    #[serde(flatten)]
    pub info: ChannelInfo,
}

impl Channel {
    /// Whether the channel is broadcasting right now
    pub fn is_live(&self) -> bool {
        self.stream.is_live()
    }

    /// The name the channel is sorted by on the home page
    pub fn sort_name(&self) -> &str {
        &self.stream.channel.display_name
    }
}

/// Channel metadata. Kraken repeats this inside of every [`Stream`].
#[derive(Clone, Debug, Default, PartialEq, ::serde::Deserialize, ::serde::Serialize)]
#[serde(default)]
pub struct ChannelInfo {
    #[serde(deserialize_with = "crate::serde::nullable")]
    pub mature: bool,
    pub status: Option<String>,
    pub broadcaster_language: Option<String>,
    #[serde(deserialize_with = "crate::serde::nullable")]
    pub display_name: String,
    pub game: Option<String>,
    pub language: Option<String>,
    #[serde(rename(deserialize = "_id"), deserialize_with = "crate::serde::id")]
    pub id: u64,
    #[serde(deserialize_with = "crate::serde::nullable")]
    pub name: String,
    #[serde(with = "crate::serde::timestamp")]
    pub created_at: Option<OffsetDateTime>,
    #[serde(with = "crate::serde::timestamp")]
    pub updated_at: Option<OffsetDateTime>,
    pub delay: serde_json::Value,
    pub logo: Option<String>,
    pub banner: Option<String>,
    pub video_banner: Option<String>,
    pub background: Option<String>,
    pub profile_banner: Option<String>,
    pub profile_banner_background_color: Option<String>,
    #[serde(deserialize_with = "crate::serde::nullable")]
    pub partner: bool,
    #[serde(deserialize_with = "crate::serde::nullable")]
    pub url: String,
    #[serde(deserialize_with = "crate::serde::nullable")]
    pub views: u64,
    #[serde(deserialize_with = "crate::serde::nullable")]
    pub followers: u64,
    #[serde(rename(deserialize = "_links"))]
    pub links: ChannelLinks,
}

#[derive(Clone, Debug, Default, PartialEq, ::serde::Deserialize, ::serde::Serialize)]
#[serde(default)]
pub struct ChannelLinks {
    #[serde(rename = "self")]
    pub self_link: String,
    pub follows: String,
    pub commercial: String,
    pub stream_key: String,
    pub chat: String,
    pub features: String,
    pub subscriptions: String,
    pub editors: String,
    pub teams: String,
    pub videos: String,
}

/// A live session. Offline channels carry `Stream::default()`.
#[derive(Clone, Debug, Default, PartialEq, ::serde::Deserialize, ::serde::Serialize)]
#[serde(default)]
pub struct Stream {
    pub game: Option<String>,
    #[serde(deserialize_with = "crate::serde::nullable")]
    pub viewers: u64,
    #[serde(deserialize_with = "crate::serde::nullable")]
    pub average_fps: f64,
    #[serde(deserialize_with = "crate::serde::nullable")]
    pub delay: u64,
    #[serde(deserialize_with = "crate::serde::nullable")]
    pub video_height: u64,
    #[serde(deserialize_with = "crate::serde::nullable")]
    pub is_playlist: bool,
    #[serde(with = "crate::serde::timestamp")]
    pub created_at: Option<OffsetDateTime>,
    #[serde(rename(deserialize = "_id"), deserialize_with = "crate::serde::id")]
    pub id: u64,
    #[serde(deserialize_with = "crate::serde::nullable")]
    pub channel: ChannelInfo,
    #[serde(deserialize_with = "crate::serde::nullable")]
    pub preview: Preview,
    #[serde(rename(deserialize = "_links"))]
    pub links: SelfLink,
}

impl Stream {
    pub fn is_live(&self) -> bool {
        *self != Self::default()
    }
}

#[derive(Clone, Debug, Default, PartialEq, ::serde::Deserialize, ::serde::Serialize)]
#[serde(default)]
pub struct Preview {
    pub small: String,
    pub medium: String,
    pub large: String,
    pub template: String,
}

/// `GET streams?game={game}`
#[derive(Clone, Debug, Default, PartialEq, ::serde::Deserialize, ::serde::Serialize)]
#[serde(default)]
pub struct Streams {
    pub streams: Vec<Stream>,
    #[serde(rename(deserialize = "_total"))]
    pub total: u64,
    #[serde(rename(deserialize = "_links"))]
    pub links: StreamsLinks,
}

#[derive(Clone, Debug, Default, PartialEq, ::serde::Deserialize, ::serde::Serialize)]
#[serde(default)]
pub struct StreamsLinks {
    #[serde(rename = "self")]
    pub self_link: String,
    pub next: String,
    pub featured: String,
    pub summary: String,
    pub followed: String,
}

#[derive(Clone, Debug, Default, PartialEq, ::serde::Deserialize, ::serde::Serialize)]
#[serde(default)]
pub struct PageLinks {
    #[serde(rename = "self")]
    pub self_link: String,
    pub next: String,
}

#[derive(Clone, Debug, Default, PartialEq, ::serde::Deserialize, ::serde::Serialize)]
#[serde(default)]
pub struct SelfLink {
    #[serde(rename = "self")]
    pub self_link: String,
}
