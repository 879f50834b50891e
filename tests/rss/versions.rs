//! RSS Version Gating Tests
//!
//! Elements a version does not define must fail validation and
//! serialization with the unsupported-version error, no matter which
//! validation flags are set.

use feedkit::rss::{RssChannel, RssCloud, RssEnclosure, RssGuid, RssImage, RssItem, RssSource};
use feedkit::{
    ElementKind, FeedDocument, FeedError, FormatConfig, SpecVersion, UNSUPPORTED_VERSION_MESSAGE,
    ValidationContext, VersionedElement,
};

fn contexts(version: SpecVersion) -> [ValidationContext; 2] {
    [
        ValidationContext::structure(version),
        ValidationContext::content(version),
    ]
}

fn enclosure() -> RssEnclosure {
    RssEnclosure::new("http://example.com/show.mp3", 24986239, "audio/mpeg")
}

#[test]
fn test_enclosure_unsupported_in_091() {
    for ctx in contexts(SpecVersion::Rss091) {
        let err = enclosure().validate(&ctx).unwrap_err();
        assert!(err.is_unsupported_version());
        let validation = err.as_validation().unwrap();
        assert_eq!(validation.element, "enclosure");
        assert!(validation.message.starts_with(UNSUPPORTED_VERSION_MESSAGE));
    }
    assert!(enclosure().to_xml(SpecVersion::Rss091).unwrap_err().is_unsupported_version());
}

#[test]
fn test_enclosure_supported_in_092_and_201() {
    for version in [SpecVersion::Rss092, SpecVersion::Rss201] {
        for ctx in contexts(version) {
            assert!(enclosure().validate(&ctx).is_ok(), "{version}");
        }
        let xml = enclosure().to_xml(version).unwrap();
        assert_eq!(xml.attribute("length", None), Some("24986239"));
    }
}

#[test]
fn test_rss_elements_unsupported_in_other_formats() {
    for version in [SpecVersion::Rdf10, SpecVersion::Atom10] {
        let ctx = ValidationContext::structure(version);
        assert!(enclosure().validate(&ctx).unwrap_err().is_unsupported_version());
        assert!(
            RssImage::new("http://e.com/i.png", "I", "http://e.com/")
                .validate(&ctx)
                .unwrap_err()
                .is_unsupported_version()
        );
        assert!(RssChannel::default().to_xml(version).is_err());
    }
}

#[test]
fn test_element_kind_agrees_with_validation() {
    let guid = RssGuid::new("http://example.com/1");
    let source = RssSource {
        url: Some("http://example.com/rss".into()),
        ..Default::default()
    };
    let cloud = RssCloud {
        domain: Some("rpc.example.com".into()),
        port: Some("80".into()),
        path: Some("/RPC2".into()),
        register_procedure: Some("ping".into()),
        protocol: Some("xml-rpc".into()),
        ..Default::default()
    };

    for version in SpecVersion::ALL {
        let ctx = ValidationContext::structure(version);
        assert_eq!(
            guid.validate(&ctx).is_ok(),
            ElementKind::RssGuid.supported_in(version),
            "guid {version}"
        );
        assert_eq!(
            source.validate(&ctx).is_ok(),
            ElementKind::RssSource.supported_in(version),
            "source {version}"
        );
        assert_eq!(
            cloud.validate(&ctx).is_ok(),
            ElementKind::RssCloud.supported_in(version),
            "cloud {version}"
        );
    }
}

#[test]
fn test_item_with_enclosure_propagates_unsupported() {
    let mut item = RssItem::new("Episode", "http://example.com/1");
    item.enclosure = Some(enclosure());
    let err = item.to_xml(SpecVersion::Rss091).unwrap_err();
    assert_eq!(err.as_validation().unwrap().element, "enclosure");
}

#[test]
fn test_save_as_older_version() {
    let doc = FeedDocument::parse(
        r#"<rss version="2.0">
             <channel>
               <title>News</title>
               <link>http://example.com/</link>
               <description>Daily</description>
               <item>
                 <title>One</title>
                 <enclosure url="http://example.com/1.mp3" length="1" type="audio/mpeg"/>
               </item>
             </channel>
           </rss>"#,
    )
    .unwrap();

    let xml = doc.save_as(SpecVersion::Rss092, &FormatConfig::rss()).unwrap();
    assert!(xml.contains(r#"<rss version="0.92">"#));

    let err = doc.save_as(SpecVersion::Rss091, &FormatConfig::rss()).unwrap_err();
    assert!(err.is_unsupported_version());

    let err = doc.save_as(SpecVersion::Atom10, &FormatConfig::atom()).unwrap_err();
    assert!(matches!(err, FeedError::Configuration(_)));
}
