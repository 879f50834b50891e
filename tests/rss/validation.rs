//! RSS Validation Tests
//!
//! Required fields are always checked; value rules only with content
//! validation. Collections stop at their first failing member.

use feedkit::rss::{RssChannel, RssEnclosure, RssImage, RssItem, RssTextInput};
use feedkit::{FeedDocument, FeedError, FormatConfig, SpecVersion, ValidationContext, VersionedElement};

fn field(err: &FeedError) -> Option<&str> {
    err.as_validation().and_then(|v| v.field.as_deref())
}

fn channel_with_items(items: Vec<RssItem>) -> RssChannel {
    let mut channel = RssChannel::new("News", "http://example.com/", "Daily news");
    channel.items = items;
    channel
}

#[test]
fn test_fail_fast_reports_first_invalid_item() {
    let mut fifth = RssItem::new("Five", "http://example.com/5");
    fifth.enclosure = Some(RssEnclosure {
        url: Some("http://example.com/5.mp3".into()),
        length: Some("not-a-number".into()),
        mime_type: Some("audio/mpeg".into()),
        ..Default::default()
    });

    let channel = channel_with_items(vec![
        RssItem::new("One", "http://example.com/1"),
        RssItem::default(),
        RssItem::new("Three", "http://example.com/3"),
        RssItem::new("Four", "http://example.com/4"),
        fifth,
    ]);

    let err = channel
        .validate(&ValidationContext::content(SpecVersion::Rss201))
        .unwrap_err();
    assert_eq!(err.as_validation().unwrap().element, "item");
    assert_eq!(field(&err), Some("title"));
}

#[test]
fn test_fifth_item_reported_once_second_is_fixed() {
    let mut fifth = RssItem::new("Five", "http://example.com/5");
    fifth.enclosure = Some(RssEnclosure {
        url: Some("http://example.com/5.mp3".into()),
        length: Some("not-a-number".into()),
        mime_type: Some("audio/mpeg".into()),
        ..Default::default()
    });
    let channel = channel_with_items(vec![
        RssItem::new("One", "http://example.com/1"),
        RssItem::new("Two", "http://example.com/2"),
        fifth,
    ]);

    let err = channel
        .validate(&ValidationContext::content(SpecVersion::Rss201))
        .unwrap_err();
    assert_eq!(err.as_validation().unwrap().element, "enclosure");
    assert_eq!(field(&err), Some("length"));

    // Numeric checks are content rules
    assert!(channel.validate(&ValidationContext::structure(SpecVersion::Rss201)).is_ok());
}

#[test]
fn test_091_length_ceilings() {
    let mut channel = RssChannel::new("x".repeat(100), "http://example.com/", "Daily news");
    channel.language = Some("en".into());
    channel.image = Some(RssImage::new("http://example.com/i.gif", "Logo", "http://example.com/"));
    let ctx = ValidationContext::content(SpecVersion::Rss091);
    assert!(channel.validate(&ctx).is_ok());

    channel.title = Some("x".repeat(101));
    assert_eq!(field(&channel.validate(&ctx).unwrap_err()), Some("title"));

    channel.title = Some("News".into());
    channel.rating = Some("r".repeat(501));
    assert_eq!(field(&channel.validate(&ctx).unwrap_err()), Some("rating"));
}

#[test]
fn test_link_schemes_per_version() {
    let mut channel = RssChannel::new("News", "https://example.com/", "Daily news");
    channel.language = Some("en".into());
    channel.image = Some(RssImage::new("http://example.com/i.gif", "Logo", "http://example.com/"));

    assert!(channel.validate(&ValidationContext::content(SpecVersion::Rss201)).is_ok());
    for version in [SpecVersion::Rss091, SpecVersion::Rss092] {
        let err = channel.validate(&ValidationContext::content(version)).unwrap_err();
        assert_eq!(field(&err), Some("link"), "{version}");
    }

    channel.link = Some("news:comp.lang.rust".into());
    assert!(channel.validate(&ValidationContext::content(SpecVersion::Rss201)).is_ok());
    channel.link = Some("gopher://example.com/".into());
    assert!(channel.validate(&ValidationContext::content(SpecVersion::Rss201)).is_err());
}

#[test]
fn test_image_dimensions() {
    let mut image = RssImage::new("http://example.com/i.gif", "Logo", "http://example.com/");
    image.width = Some("144".into());
    image.height = Some("400".into());
    let ctx = ValidationContext::content(SpecVersion::Rss201);
    assert!(image.validate(&ctx).is_ok());

    image.height = Some("401".into());
    assert_eq!(field(&image.validate(&ctx).unwrap_err()), Some("height"));
}

#[test]
fn test_text_input_required_fields() {
    let input = RssTextInput {
        title: Some("Search".into()),
        name: Some("q".into()),
        link: Some("http://example.com/search".into()),
        ..Default::default()
    };
    let err = input
        .validate(&ValidationContext::structure(SpecVersion::Rss092))
        .unwrap_err();
    assert_eq!(field(&err), Some("description"));
}

#[test]
fn test_validate_on_save() {
    let doc = FeedDocument::parse(r#"<rss version="2.0"><channel><title>Only a title</title></channel></rss>"#)
        .unwrap();

    // Invalid state is written as-is by default
    let xml = doc.save(&FormatConfig::rss()).unwrap();
    assert!(xml.contains("<title>Only a title</title>"));

    let err = doc.save(&FormatConfig::rss().validate_on_save(true)).unwrap_err();
    assert_eq!(field(&err), Some("link"));
}

#[test]
fn test_document_validate_flags() {
    let doc = FeedDocument::parse(
        r#"<rss version="0.92">
             <channel>
               <title>News</title>
               <link>https://example.com/</link>
               <description>Daily</description>
             </channel>
           </rss>"#,
    )
    .unwrap();
    assert!(doc.validate(false).is_ok());
    assert!(doc.validate(true).is_err());
}
