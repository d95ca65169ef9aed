//! Media resolution: picking one displayable asset per post.
use crate::models::RawPost;

/// A single displayable media asset resolved for a post.
///
/// For videos, the candidate source URLs are kept alongside the
/// resolved display URL so the renderer can bootstrap an adaptive
/// player and still fall back to progressive download.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Media {
    Image {
        url: String,
    },
    Video {
        /// The resolved display URL, by precedence DASH > HLS > fallback.
        url: String,
        dash_url: Option<String>,
        hls_url: Option<String>,
        fallback_url: Option<String>,
    },
}

impl Media {
    /// Resolves the media asset to display for `post`, if any.
    ///
    /// The checks run in a fixed order and the first match wins:
    ///
    /// 1. A post hinted as `"image"` displays its direct URL. The hint
    ///    outranks the video flag; upstream data marks some posts with
    ///    both.
    /// 2. A post flagged `is_video` displays the first present
    ///    candidate among the DASH manifest, the HLS manifest, and the
    ///    progressive fallback. The manifests preserve synchronized
    ///    audio, which the fallback usually lacks.
    /// 3. Anything else has no displayable media.
    ///
    /// A video post whose metadata carries no candidate URL at all
    /// resolves to `None` rather than a sourceless video.
    pub fn resolve(post: &RawPost) -> Option<Self> {
        if post.post_hint.as_deref() == Some("image") {
            return post.url.clone().map(|url| Media::Image { url });
        }

        if post.is_video {
            let video = post.media.as_ref().and_then(|m| m.reddit_video.as_ref());
            let dash_url = video.and_then(|v| v.dash_url.clone());
            let hls_url = video.and_then(|v| v.hls_url.clone());
            let fallback_url = video.and_then(|v| v.fallback_url.clone());

            let url = dash_url
                .clone()
                .or_else(|| hls_url.clone())
                .or_else(|| fallback_url.clone())?;

            return Some(Media::Video {
                url,
                dash_url,
                hls_url,
                fallback_url,
            });
        }

        None
    }

    /// The resolved display URL.
    pub fn url(&self) -> &str {
        match self {
            Media::Image { url } | Media::Video { url, .. } => url,
        }
    }
}
