use std::str::FromStr;

use crate::analytics::AnalyticsEvent;
use crate::dom;
use crate::error::SetupError;
use crate::page::PageContext;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SharePlatform {
    Twitter,
    LinkedIn,
    Email,
}

impl FromStr for SharePlatform {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "twitter" => Ok(SharePlatform::Twitter),
            "linkedin" => Ok(SharePlatform::LinkedIn),
            "email" => Ok(SharePlatform::Email),
            _ => Err(()),
        }
    }
}

impl SharePlatform {
    pub fn as_str(self) -> &'static str {
        match self {
            SharePlatform::Twitter => "twitter",
            SharePlatform::LinkedIn => "linkedin",
            SharePlatform::Email => "email",
        }
    }

    /// Destination for sharing `page_url` titled `title`.
    pub fn share_url(self, page_url: &str, title: &str) -> String {
        let url = urlencoding::encode(page_url);
        let title = urlencoding::encode(title);
        match self {
            SharePlatform::Twitter => {
                format!("https://twitter.com/intent/tweet?url={}&text={}", url, title)
            }
            SharePlatform::LinkedIn => {
                format!("https://www.linkedin.com/sharing/share-offsite/?url={}", url)
            }
            SharePlatform::Email => format!("mailto:?subject={}&body={}", title, url),
        }
    }

    /// Web platforms get a popup; mail goes to the default handler.
    pub fn opens_popup(self) -> bool {
        !matches!(self, SharePlatform::Email)
    }
}

pub fn is_blog_post(path: &str, marker: &str) -> bool {
    path.contains(marker)
}

pub fn share_event(platform: SharePlatform, path: &str) -> AnalyticsEvent {
    AnalyticsEvent::new("share")
        .prop("method", platform.as_str())
        .prop("content_type", "blog_post")
        .prop("item_id", path)
}

fn share(ctx: &PageContext, platform: SharePlatform) -> Result<(), SetupError> {
    let url = platform.share_url(&ctx.href(), &ctx.document.title());
    if platform.opens_popup() {
        ctx.window
            .open_with_url_and_target_and_features(&url, "_blank", "width=600,height=400")?;
    } else {
        ctx.window.location().set_href(&url)?;
    }
    ctx.analytics.report(&share_event(platform, &ctx.path()));
    Ok(())
}

pub fn attach(ctx: &PageContext) -> Result<(), SetupError> {
    if is_blog_post(&ctx.path(), &ctx.config.blog_path_marker) {
        if let Some(cluster) = dom::query(&ctx.document, "#social-share") {
            dom::set_style(&cluster, "display", "flex");
        }
    }

    for button in dom::query_all(&ctx.document, ".social-share-btn") {
        let page = ctx.clone();
        let target = button.clone();
        dom::listen(&button, "click", move |_| {
            let Some(platform) = target
                .get_attribute("data-platform")
                .and_then(|p| p.parse::<SharePlatform>().ok())
            else {
                return;
            };
            if let Err(e) = share(&page, platform) {
                log::warn!("share via {} failed: {}", platform.as_str(), e);
            }
        })?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAGE: &str = "https://example.com/blog/rust-on-the-web?ref=nav";
    const TITLE: &str = "Rust & the Web";

    #[test]
    fn twitter_intent_encodes_url_and_title() {
        assert_eq!(
            SharePlatform::Twitter.share_url(PAGE, TITLE),
            "https://twitter.com/intent/tweet?url=https%3A%2F%2Fexample.com%2Fblog%2Frust-on-the-web%3Fref%3Dnav&text=Rust%20%26%20the%20Web"
        );
    }

    #[test]
    fn linkedin_only_carries_url() {
        assert_eq!(
            SharePlatform::LinkedIn.share_url("https://example.com/blog/a", TITLE),
            "https://www.linkedin.com/sharing/share-offsite/?url=https%3A%2F%2Fexample.com%2Fblog%2Fa"
        );
    }

    #[test]
    fn mailto_puts_title_in_subject() {
        assert_eq!(
            SharePlatform::Email.share_url("https://example.com/blog/a", "Hi"),
            "mailto:?subject=Hi&body=https%3A%2F%2Fexample.com%2Fblog%2Fa"
        );
        assert!(!SharePlatform::Email.opens_popup());
        assert!(SharePlatform::Twitter.opens_popup());
    }

    #[test]
    fn unknown_platform_is_rejected() {
        assert_eq!("linkedin".parse::<SharePlatform>(), Ok(SharePlatform::LinkedIn));
        assert!("myspace".parse::<SharePlatform>().is_err());
    }

    #[test]
    fn share_cluster_only_on_blog_posts() {
        assert!(is_blog_post("/blog/launch-week", "/blog/"));
        assert!(!is_blog_post("/blog", "/blog/"));
        assert!(!is_blog_post("/pricing", "/blog/"));
    }

    #[test]
    fn share_event_shape() {
        let event = share_event(SharePlatform::Email, "/blog/a");
        assert_eq!(event.action, "share");
        assert_eq!(event.props.get("method").map(String::as_str), Some("email"));
        assert_eq!(event.props.get("item_id").map(String::as_str), Some("/blog/a"));
    }
}
