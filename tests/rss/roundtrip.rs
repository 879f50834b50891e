//! RSS Parse/Save Round-Trip Tests
//!
//! Unmapped content must survive parse → model → save untouched, and be
//! written after every mapped child.

use feedkit::rss::RssFeed;
use feedkit::{
    ContentMode, DUBLIN_CORE_NAMESPACE, Feed, FeedDocument, FormatConfig, SpecVersion,
    VersionedElement, XmlElement,
};

const ITUNES: &str = "http://www.itunes.com/dtds/podcast-1.0.dtd";

fn podcast() -> String {
    format!(
        r#"<?xml version="1.0" encoding="UTF-8"?>
<rss version="2.0" xmlns:dc="{DUBLIN_CORE_NAMESPACE}" xmlns:itunes="{ITUNES}">
  <channel>
    <title>Show</title>
    <link>http://example.com/show</link>
    <description>A show</description>
    <itunes:owner><itunes:name>Jane</itunes:name><itunes:email>jane@example.com</itunes:email></itunes:owner>
    <lastBuildDate>Sat, 07 Sep 2002 09:42:31 GMT</lastBuildDate>
    <item dc:identifier="ep-1">
      <dc:creator>Jane</dc:creator>
      <title>Episode 1</title>
      <guid isPermaLink="false">ep-1</guid>
      <enclosure url="http://example.com/1.mp3" length="1024" type="audio/mpeg"/>
      <itunes:duration>42:00</itunes:duration>
    </item>
  </channel>
</rss>"#
    )
}

fn rss_feed(doc: &FeedDocument) -> &RssFeed {
    match doc.feed() {
        Some(Feed::Rss(feed)) => feed,
        other => panic!("expected an RSS feed, got {other:?}"),
    }
}

#[test]
fn test_extensions_captured() {
    let doc = FeedDocument::parse(&podcast()).unwrap();
    let channel = rss_feed(&doc).channel.as_ref().unwrap();

    let owner = channel.extensions.find("owner", Some(ITUNES)).unwrap();
    assert_eq!(owner.prefix(), Some("itunes"));
    assert_eq!(owner.content_mode(), ContentMode::Xml);
    assert!(owner.value().contains("<itunes:name"));

    let item = &channel.items[0];
    let kinds: Vec<_> = item.extensions.iter().map(|n| n.local_name()).collect();
    assert_eq!(kinds, ["identifier", "creator", "duration"]);
    assert_eq!(item.extensions.find("creator", Some(DUBLIN_CORE_NAMESPACE)).unwrap().value(), "Jane");
}

#[test]
fn test_save_reparse_is_stable() {
    let doc = FeedDocument::parse(&podcast()).unwrap();
    let config = FormatConfig::rss()
        .declare("dc", DUBLIN_CORE_NAMESPACE)
        .declare("itunes", ITUNES);

    let first = doc.save(&config).unwrap();
    let reparsed = FeedDocument::parse(&first).unwrap();
    assert_eq!(reparsed, doc);
    assert_eq!(reparsed.save(&config).unwrap(), first);
}

#[test]
fn test_extensions_written_after_mapped_children() {
    let doc = FeedDocument::parse(&podcast()).unwrap();
    let xml = doc.save(&FormatConfig::rss()).unwrap();
    let root = XmlElement::parse(&xml).unwrap();
    let item = root.child("channel", None).unwrap().child("item", None).unwrap();

    let names: Vec<_> = item.child_elements().map(|c| c.qualified_name()).collect();
    assert_eq!(
        names,
        ["title", "enclosure", "guid", "dc:creator", "itunes:duration"]
    );
    assert_eq!(item.attribute("identifier", Some(DUBLIN_CORE_NAMESPACE)), Some("ep-1"));
}

#[test]
fn test_dates_written_in_canonical_form() {
    let doc = FeedDocument::parse(
        r#"<rss version="2.0"><channel>
             <title>T</title><link>http://e.com/</link><description>D</description>
             <pubDate>Sat, 7 Sep 02 09:42:31 EDT</pubDate>
           </channel></rss>"#,
    )
    .unwrap();
    let channel = rss_feed(&doc).channel.as_ref().unwrap();
    let date = channel.pub_date.unwrap();
    assert_eq!(date.to_rfc822(), "Sat, 07 Sep 2002 09:42:31 -0400");
    assert_eq!(date.instant().to_rfc3339(), "2002-09-07T13:42:31+00:00");

    let xml = channel.to_xml(SpecVersion::Rss201).unwrap().to_xml_string().unwrap();
    assert!(xml.contains("<pubDate>Sat, 07 Sep 2002 09:42:31 -0400</pubDate>"));
}

#[test]
fn test_model_edit_keeps_extensions() {
    let mut doc = FeedDocument::parse(&podcast()).unwrap();
    if let Some(Feed::Rss(feed)) = doc.feed_mut() {
        let channel = feed.channel.as_mut().unwrap();
        channel.title = Some("Renamed".into());
    }
    let xml = doc.save(&FormatConfig::rss()).unwrap();
    assert!(xml.contains("<title>Renamed</title>"));
    assert!(xml.contains("<itunes:duration"));
    assert!(xml.contains("42:00"));
}
