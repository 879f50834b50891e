//! Atom Syndication Format Tests
//!
//! References:
//! - RFC 4287 section 4.1.1 (atom:feed), 4.1.2 (atom:entry)
//! - RFC 4287 section 3.1 (text constructs), 3.3 (date constructs)

use chrono::{TimeZone, Utc};
use feedkit::atom::{AtomEntry, AtomFeed, AtomLink, AtomPerson, AtomText};
use feedkit::{
    ATOM_NAMESPACE, DateDialect, Feed, FeedDocument, FormatConfig, SpecVersion, TemporalValue,
    ValidationContext, VersionedElement, XmlElement,
};

const XHTML: &str = "http://www.w3.org/1999/xhtml";

fn document() -> String {
    format!(
        r#"<?xml version="1.0" encoding="utf-8"?>
<feed xmlns="{ATOM_NAMESPACE}" xmlns:media="http://search.yahoo.com/mrss/">
  <title type="text">dive into mark</title>
  <subtitle type="html">A &lt;em&gt;lot&lt;/em&gt; of effort went into making this effortless</subtitle>
  <updated>2005-07-31T12:29:29Z</updated>
  <id>tag:example.org,2003:3</id>
  <link rel="alternate" type="text/html" hreflang="en" href="http://example.org/"/>
  <link rel="self" type="application/atom+xml" href="http://example.org/feed.atom"/>
  <rights>Copyright (c) 2003, Mark Pilgrim</rights>
  <generator uri="http://www.example.com/" version="1.0">Example Toolkit</generator>
  <entry>
    <title>Atom draft-07 snapshot</title>
    <link rel="alternate" type="text/html" href="http://example.org/2005/04/02/atom"/>
    <link rel="enclosure" type="audio/mpeg" length="1337" href="http://example.org/audio/ph34r_my_podcast.mp3"/>
    <id>tag:example.org,2003:3.2397</id>
    <updated>2005-07-31T12:29:29Z</updated>
    <published>2003-12-13T08:29:29-04:00</published>
    <author>
      <name>Mark Pilgrim</name>
      <uri>http://example.org/</uri>
      <email>f8dy@example.com</email>
    </author>
    <contributor><name>Sam Ruby</name></contributor>
    <content type="xhtml" xml:lang="en"><div xmlns="{XHTML}"><p><i>[Update: The Atom draft is finished.]</i></p></div></content>
    <media:thumbnail url="http://example.org/thumb.jpg"/>
  </entry>
</feed>"#
    )
}

fn atom_feed(doc: &FeedDocument) -> &AtomFeed {
    match doc.feed() {
        Some(Feed::Atom(feed)) => feed,
        other => panic!("expected an Atom feed, got {other:?}"),
    }
}

fn updated() -> TemporalValue {
    TemporalValue::utc(Utc.with_ymd_and_hms(2005, 7, 31, 12, 29, 29).unwrap())
}

#[test]
fn test_parse_document() {
    let doc = FeedDocument::parse(&document()).unwrap();
    assert_eq!(doc.recognized_version(), Some(SpecVersion::Atom10));

    let feed = atom_feed(&doc);
    assert_eq!(feed.id.as_deref(), Some("tag:example.org,2003:3"));
    assert_eq!(feed.updated, Some(updated()));
    assert_eq!(
        feed.subtitle.as_ref().unwrap().value.as_deref(),
        Some("A <em>lot</em> of effort went into making this effortless")
    );
    assert_eq!(feed.links.len(), 2);
    assert_eq!(feed.links[1].relation(), "self");
    assert_eq!(
        feed.generator.as_ref().unwrap().value.as_deref(),
        Some("Example Toolkit")
    );

    let entry = &feed.entries[0];
    assert_eq!(entry.authors[0].email.as_deref(), Some("f8dy@example.com"));
    assert_eq!(entry.contributors[0].name.as_deref(), Some("Sam Ruby"));
    assert_eq!(entry.published.unwrap().offset().local_minus_utc(), -4 * 3600);
    assert_eq!(entry.links[1].length.as_deref(), Some("1337"));
    assert!(entry.extensions.find("thumbnail", Some("http://search.yahoo.com/mrss/")).is_some());

    doc.validate(true).unwrap();
}

#[test]
fn test_xhtml_content_kept_verbatim() {
    let doc = FeedDocument::parse(&document()).unwrap();
    let content = atom_feed(&doc).entries[0].content.as_ref().unwrap();
    assert!(content.is_xhtml());

    let markup = content.value.as_deref().unwrap();
    let div = XmlElement::parse(markup).unwrap();
    assert!(div.is("div", Some(XHTML)));
    assert_eq!(div.inner_text(), "[Update: The Atom draft is finished.]");

    // xml:lang is not mapped, so it travels as an extension attribute
    assert_eq!(content.extensions.len(), 1);
    assert_eq!(content.extensions.nodes()[0].local_name(), "lang");
}

#[test]
fn test_save_reparse_is_stable() {
    let doc = FeedDocument::parse(&document()).unwrap();
    let config = FormatConfig::atom()
        .declare("media", "http://search.yahoo.com/mrss/")
        .indent(2);

    let first = doc.save(&config).unwrap();
    let reparsed = FeedDocument::parse(&first).unwrap();
    assert_eq!(reparsed, doc);
    assert_eq!(reparsed.save(&config).unwrap(), first);
}

#[test]
fn test_dates_written_as_iso8601() {
    let doc = FeedDocument::parse(&document()).unwrap();
    let xml = doc.save(&FormatConfig::atom()).unwrap();
    assert!(xml.contains("<updated>2005-07-31T12:29:29Z</updated>"));
    assert!(xml.contains("<published>2003-12-13T08:29:29-04:00</published>"));
}

#[test]
fn test_entry_required_fields() {
    let ctx = ValidationContext::structure(SpecVersion::Atom10);
    for field in ["id", "title", "updated"] {
        let mut entry = AtomEntry::new("urn:entry", "Entry", updated());
        match field {
            "id" => entry.id = None,
            "title" => entry.title = None,
            _ => entry.updated = None,
        }
        let err = entry.validate(&ctx).unwrap_err();
        assert_eq!(err.as_validation().unwrap().field.as_deref(), Some(field));
    }
}

#[test]
fn test_entry_content_rules() {
    let ctx = ValidationContext::content(SpecVersion::Atom10);
    let mut entry = AtomEntry::new("urn:entry", "Entry", updated());
    entry.authors.push(AtomPerson::new("Jane"));

    let err = entry.validate(&ctx).unwrap_err();
    assert_eq!(err.as_validation().unwrap().field.as_deref(), Some("content"));

    // A link with no rel is an alternate link
    entry.links.push(AtomLink::new("http://example.org/entry"));
    entry.validate(&ctx).unwrap();

    entry.links = vec![AtomLink::with_rel("http://example.org/entry", "related")];
    entry.content = Some(AtomText {
        src: Some("http://example.org/body.html".into()),
        ..Default::default()
    });
    let err = entry.validate(&ctx).unwrap_err();
    assert_eq!(err.as_validation().unwrap().field.as_deref(), Some("summary"));
}

#[test]
fn test_text_type_vocabulary() {
    let ctx = ValidationContext::content(SpecVersion::Atom10);
    let mut text = AtomText::html("<b>bold</b>");
    text.validate(&ctx).unwrap();

    text.kind = Some("markdown".into());
    assert!(text.validate(&ctx).is_err());
    assert!(text.validate(&ValidationContext::structure(SpecVersion::Atom10)).is_ok());
}

#[test]
fn test_built_feed_saves() {
    let mut feed = AtomFeed::new("urn:uuid:60a76c80-d399-11d9-b93C-0003939e0af6", "Example Feed", updated());
    feed.authors.push(AtomPerson::new("John Doe"));
    feed.links.push(AtomLink::new("http://example.org/"));

    let mut entry = AtomEntry::new(
        "urn:uuid:1225c695-cfb8-4ebb-aaaa-80da344efa6a",
        "Atom-Powered Robots Run Amok",
        TemporalValue::parse("2003-12-13T18:30:02Z", DateDialect::Iso8601).unwrap(),
    );
    entry.links.push(AtomLink::new("http://example.org/2003/12/13/atom03"));
    entry.summary = Some(AtomText::text("Some text."));
    feed.entries.push(entry);

    let doc = FeedDocument::from_feed(Feed::Atom(feed), SpecVersion::Atom10).unwrap();
    let xml = doc.save(&FormatConfig::atom().validate_on_save(true)).unwrap();

    let root = XmlElement::parse(&xml).unwrap();
    assert!(root.is("feed", Some(ATOM_NAMESPACE)));
    let names: Vec<_> = root.child_elements().map(|c| c.local_name.as_str()).collect();
    assert_eq!(names, ["id", "title", "updated", "author", "link", "entry"]);
    assert!(xml.contains("<name>John Doe</name>"));
}

#[test]
fn test_atom_cannot_save_as_rss() {
    let doc = FeedDocument::parse(&document()).unwrap();
    assert!(doc.save_as(SpecVersion::Rss201, &FormatConfig::atom()).is_err());

    let feed = atom_feed(&doc);
    assert!(feed.to_xml(SpecVersion::Rdf10).unwrap_err().is_unsupported_version());
}
