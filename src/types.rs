use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Serialize, Serializer};

use crate::extract::Vocabulary;

// ============================================================================
// Vocabularies
// ============================================================================

/// `<podcast:medium>`: what kind of content the feed carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Medium {
    /// A podcast show. Assumed when no medium tag is present.
    Podcast,
    /// An album; each item is a song.
    Music,
    /// A dedicated video channel.
    Video,
    /// One cinematic item per feed.
    Film,
    /// One book per feed, items are chapters.
    Audiobook,
    /// Curated written articles, possibly with spoken versions.
    Newsletter,
    /// Informally written articles.
    Blog,
}

impl Vocabulary for Medium {
    const NAME: &'static str = "medium";
    const TERMS: &'static [(&'static str, Self)] = &[
        ("podcast", Medium::Podcast),
        ("music", Medium::Music),
        ("video", Medium::Video),
        ("film", Medium::Film),
        ("audiobook", Medium::Audiobook),
        ("newsletter", Medium::Newsletter),
        ("blog", Medium::Blog),
    ];
}

/// State of a `<podcast:liveItem>`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LiveStatus {
    Pending,
    Live,
    Ended,
}

impl Vocabulary for LiveStatus {
    const NAME: &'static str = "live status";
    const TERMS: &'static [(&'static str, Self)] = &[
        ("pending", LiveStatus::Pending),
        ("live", LiveStatus::Live),
        ("ended", LiveStatus::Ended),
    ];
}

// ============================================================================
// Timestamps
// ============================================================================

/// A parsed date attribute.
///
/// Unparseable input is kept as `Invalid` so that a single bad date never
/// aborts the surrounding record. Serializes as an RFC 3339 string, or
/// `null` when invalid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Timestamp {
    Valid(DateTime<Utc>),
    Invalid(String),
}

impl Timestamp {
    pub fn as_datetime(&self) -> Option<DateTime<Utc>> {
        match self {
            Timestamp::Valid(dt) => Some(*dt),
            Timestamp::Invalid(_) => None,
        }
    }

    pub fn is_valid(&self) -> bool {
        matches!(self, Timestamp::Valid(_))
    }
}

impl Serialize for Timestamp {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Timestamp::Valid(dt) => {
                serializer.serialize_str(&dt.to_rfc3339_opts(SecondsFormat::Millis, true))
            }
            Timestamp::Invalid(_) => serializer.serialize_none(),
        }
    }
}

// ============================================================================
// Value (payments)
// ============================================================================

/// One payee of a `<podcast:value>` block.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ValueRecipient {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom_key: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom_value: Option<String>,
    /// Slug of the receiving address type, e.g. `node`.
    #[serde(rename = "type")]
    pub recipient_type: String,
    pub address: String,
    /// Share weight. Finite and non-negative; shares need not sum to 100.
    pub split: f64,
    pub fee: bool,
}

/// Payment routing for a channel, item or live item.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Value {
    /// Service slug of the payment layer, e.g. `lightning`.
    #[serde(rename = "type")]
    pub value_type: String,
    /// Transport mechanism, e.g. `keysend`.
    pub method: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggested: Option<f64>,
    /// Never empty: the support check requires one valid recipient.
    pub recipients: Vec<ValueRecipient>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value_time_splits: Option<Vec<ValueTimeSplit>>,
}

/// Item another feed's value block should be paid to during a split.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RemoteItem {
    pub feed_guid: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub item_guid: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub medium: Option<Medium>,
}

/// Where the payments of a time split go.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum SplitTarget {
    RemoteItem {
        #[serde(rename = "remoteItem")]
        remote_item: RemoteItem,
    },
    Recipients {
        recipients: Vec<ValueRecipient>,
    },
}

/// `<podcast:valueTimeSplit>`: redirects value for a time range of the media.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ValueTimeSplit {
    /// Seconds from the start of the media.
    pub start_time: f64,
    /// Length of the split, in seconds.
    pub duration: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub remote_start_time: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub remote_percentage: Option<f64>,
    #[serde(flatten)]
    pub target: SplitTarget,
}

// ============================================================================
// Images
// ============================================================================

/// The classified form of one `srcset` component.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ImageDescriptor {
    Width { url: String, width: u32 },
    Density { url: String, density: f64 },
    Url { url: String },
}

impl ImageDescriptor {
    pub fn url(&self) -> &str {
        match self {
            ImageDescriptor::Width { url, .. }
            | ImageDescriptor::Density { url, .. }
            | ImageDescriptor::Url { url } => url,
        }
    }
}

/// One component of a `<podcast:images srcset="...">` attribute.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PodcastImage {
    /// The trimmed component exactly as written.
    pub raw: String,
    pub parsed: ImageDescriptor,
}

// ============================================================================
// People, chat, links
// ============================================================================

/// `<podcast:person>`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Person {
    pub name: String,
    pub role: String,
    pub group: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub img: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub href: Option<String>,
}

/// Chat room attached to an item or live item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "phase")]
pub enum Chat {
    /// Full `<podcast:chat>` tag (pending vocabulary).
    #[serde(rename = "pending", rename_all = "camelCase")]
    Pending {
        server: String,
        protocol: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        account_id: Option<String>,
        #[serde(skip_serializing_if = "Option::is_none")]
        space: Option<String>,
    },
    /// Bare `chat` attribute on a live item.
    #[serde(rename = "4")]
    Attribute { url: String },
}

/// `<podcast:contentLink>` of a live item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ContentLink {
    /// Empty when the element has no `href`.
    pub url: String,
    pub title: String,
}

// ============================================================================
// Items
// ============================================================================

/// `<enclosure>` of an item or live item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Enclosure {
    pub url: String,
    pub length: u64,
    #[serde(rename = "type")]
    pub mime_type: String,
}

/// `<podcast:liveItem>`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LiveItem {
    pub status: LiveStatus,
    pub start: Timestamp,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end: Option<Timestamp>,
    pub guid: String,
    pub title: String,
    pub enclosure: Enclosure,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub podcast_people: Option<Vec<Person>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub podcast_images: Option<Vec<PodcastImage>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub chat: Option<Chat>,
    pub content_links: Vec<ContentLink>,
}

/// A regular `<item>` of the channel.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Episode {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub guid: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enclosure: Option<Enclosure>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pub_date: Option<Timestamp>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub podcast_people: Option<Vec<Person>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub podcast_images: Option<Vec<PodcastImage>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub chat: Option<Chat>,
}

/// The podcast metadata of one `<channel>`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PodcastFeed {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub medium: Option<Medium>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub podcast_images: Option<Vec<PodcastImage>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub podcast_people: Option<Vec<Person>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub podcast_live_items: Option<Vec<LiveItem>>,
    pub items: Vec<Episode>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use serde_json::json;

    #[test]
    fn test_image_descriptor_serializes_flat() {
        let img = PodcastImage {
            raw: "a.jpg 600w".to_string(),
            parsed: ImageDescriptor::Width {
                url: "a.jpg".to_string(),
                width: 600,
            },
        };
        assert_eq!(
            serde_json::to_value(&img).unwrap(),
            json!({"raw": "a.jpg 600w", "parsed": {"url": "a.jpg", "width": 600}})
        );
    }

    #[test]
    fn test_chat_phase_discriminator() {
        let chat = Chat::Attribute {
            url: "https://chat.example".to_string(),
        };
        assert_eq!(
            serde_json::to_value(&chat).unwrap(),
            json!({"phase": "4", "url": "https://chat.example"})
        );

        let chat = Chat::Pending {
            server: "irc.zeronode.net".to_string(),
            protocol: "irc".to_string(),
            account_id: Some("@jsmith".to_string()),
            space: None,
        };
        assert_eq!(
            serde_json::to_value(&chat).unwrap(),
            json!({
                "phase": "pending",
                "server": "irc.zeronode.net",
                "protocol": "irc",
                "accountId": "@jsmith"
            })
        );
    }

    #[test]
    fn test_timestamp_serialization() {
        let valid = Timestamp::Valid(Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap());
        assert_eq!(
            serde_json::to_value(&valid).unwrap(),
            json!("2024-01-01T00:00:00.000Z")
        );
        let invalid = Timestamp::Invalid("yesterday".to_string());
        assert_eq!(serde_json::to_value(&invalid).unwrap(), json!(null));
    }

    #[test]
    fn test_value_time_split_flattens_target() {
        let split = ValueTimeSplit {
            start_time: 60.0,
            duration: 237.0,
            remote_start_time: None,
            remote_percentage: Some(100.0),
            target: SplitTarget::RemoteItem {
                remote_item: RemoteItem {
                    feed_guid: "feed".to_string(),
                    item_guid: None,
                    medium: Some(Medium::Music),
                },
            },
        };
        assert_eq!(
            serde_json::to_value(&split).unwrap(),
            json!({
                "startTime": 60.0,
                "duration": 237.0,
                "remotePercentage": 100.0,
                "type": "remoteItem",
                "remoteItem": {"feedGuid": "feed", "medium": "music"}
            })
        );
    }
}
