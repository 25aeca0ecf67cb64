use crate::types::{ImageDescriptor, PodcastImage};

/// Parses a `srcset`-style attribute into one image per non-empty component.
///
/// Components are comma separated and trimmed; empty components are skipped.
/// Output order follows input order, without sorting or deduplication.
///
/// # Examples
///
/// ```
/// use podtag::extract::parse_srcset;
/// use podtag::types::ImageDescriptor;
///
/// let images = parse_srcset("a.jpg 600w, b.jpg 2x, c.jpg");
/// assert_eq!(images.len(), 3);
/// assert_eq!(images[0].raw, "a.jpg 600w");
/// assert_eq!(
///     images[1].parsed,
///     ImageDescriptor::Density { url: "b.jpg".to_string(), density: 2.0 }
/// );
/// ```
pub fn parse_srcset(srcset: &str) -> Vec<PodcastImage> {
    srcset
        .split(',')
        .map(str::trim)
        .filter(|raw| !raw.is_empty())
        .map(|raw| PodcastImage {
            raw: raw.to_string(),
            parsed: parse_image_descriptor(raw),
        })
        .collect()
}

/// Classifies a single trimmed `srcset` component.
///
/// - `url` → [`ImageDescriptor::Url`]
/// - `url 600w` → [`ImageDescriptor::Width`]
/// - `url 1.5x` → [`ImageDescriptor::Density`]
/// - any other two-token form → `Url` of the first token, with a warning
/// - more than two tokens → `Url` carrying the whole component, with a warning
pub fn parse_image_descriptor(raw: &str) -> ImageDescriptor {
    let components: Vec<&str> = raw.split_whitespace().collect();
    match components.as_slice() {
        [url, descriptor] => classify(url, descriptor).unwrap_or_else(|| {
            tracing::warn!(url = %url, descriptor = %descriptor, "Unexpected image descriptor");
            ImageDescriptor::Url {
                url: (*url).to_string(),
            }
        }),
        [_, _, _, ..] => {
            tracing::warn!(raw = %raw, "Image descriptor has extra tokens, keeping it url-only");
            ImageDescriptor::Url {
                url: raw.to_string(),
            }
        }
        _ => ImageDescriptor::Url {
            url: raw.to_string(),
        },
    }
}

fn classify(url: &str, descriptor: &str) -> Option<ImageDescriptor> {
    if let Some(width) = descriptor.strip_suffix('w') {
        let width = width.parse::<u32>().ok()?;
        Some(ImageDescriptor::Width {
            url: url.to_string(),
            width,
        })
    } else if let Some(density) = descriptor.strip_suffix('x') {
        let density = density.parse::<f64>().ok().filter(|d| d.is_finite())?;
        Some(ImageDescriptor::Density {
            url: url.to_string(),
            density,
        })
    } else {
        None
    }
}
