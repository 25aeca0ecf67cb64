//! Base RSS fields shared by `<item>`, `<podcast:liveItem>` and `<channel>`.

use crate::extract::pub_date_to_date;
use crate::node::{first_if_array, get_attribute, get_text, FeedNode};
use crate::types::{Enclosure, Timestamp};

/// Trimmed, non-empty text of the first element named by any of `tags`, tried in order.
fn first_text(node: &FeedNode, tags: &[&str]) -> Option<String> {
    tags.iter().find_map(|tag| {
        first_if_array(node.lookup(tag))
            .single()
            .map(get_text)
            .filter(|t| !t.is_empty())
            .map(str::to_string)
    })
}

pub fn get_guid(node: &FeedNode) -> Option<String> {
    first_text(node, &["guid"])
}

pub fn get_title(node: &FeedNode) -> Option<String> {
    first_text(node, &["title", "itunes:title"])
}

pub fn get_description(node: &FeedNode) -> Option<String> {
    first_text(node, &["description", "content:encoded", "itunes:summary"])
}

pub fn get_link(node: &FeedNode) -> Option<String> {
    first_text(node, &["link"])
}

pub fn get_author(node: &FeedNode) -> Option<String> {
    first_text(node, &["author", "itunes:author"])
}

/// Artwork URL: `<itunes:image href>` first, then `<image><url>`.
pub fn get_image(node: &FeedNode) -> Option<String> {
    first_if_array(node.lookup("itunes:image"))
        .single()
        .and_then(|n| get_attribute(n, "href"))
        .map(str::to_string)
        .or_else(|| {
            first_if_array(node.lookup("image"))
                .single()
                .and_then(|image| first_text(image, &["url"]))
        })
}

pub fn get_pub_date(node: &FeedNode) -> Option<Timestamp> {
    first_text(node, &["pubDate"]).map(|raw| pub_date_to_date(&raw))
}

/// Reads the first `<enclosure>`.
///
/// `url` is required. A missing or malformed `length` becomes 0; a missing
/// `type` is guessed from the URL's extension.
pub fn get_enclosure(node: &FeedNode) -> Option<Enclosure> {
    let enclosure = first_if_array(node.lookup("enclosure")).single()?;
    let url = get_attribute(enclosure, "url")?;
    let length = get_attribute(enclosure, "length")
        .and_then(|l| l.trim().parse::<u64>().ok())
        .unwrap_or(0);
    let mime_type = get_attribute(enclosure, "type")
        .map(str::to_string)
        .unwrap_or_else(|| guess_mime_type(url).to_string());

    Some(Enclosure {
        url: url.to_string(),
        length,
        mime_type,
    })
}

fn guess_mime_type(url: &str) -> &'static str {
    let path = url.split(['?', '#']).next().unwrap_or(url);
    let extension = path
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_ascii_lowercase())
        .unwrap_or_default();

    match extension.as_str() {
        "mp3" => "audio/mpeg",
        "m4a" => "audio/mp4",
        "aac" => "audio/aac",
        "ogg" | "oga" => "audio/ogg",
        "opus" => "audio/opus",
        "flac" => "audio/flac",
        "wav" => "audio/wav",
        "mp4" => "video/mp4",
        "m4v" => "video/x-m4v",
        "mov" => "video/quicktime",
        "webm" => "video/webm",
        "m3u8" => "application/x-mpegURL",
        _ => "application/octet-stream",
    }
}
