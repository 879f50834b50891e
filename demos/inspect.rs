//! Load a feed, report what it is, validate it and write it back out
//!
//! Run with: cargo run --example inspect -- path/to/feed.xml
//! Set RUST_LOG=feedkit=debug to see recognition and extension capture.

use feedkit::{Feed, FeedDocument, FormatConfig};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging
    tracing_subscriber::fmt::init();

    let path = std::env::args()
        .nth(1)
        .ok_or("usage: inspect <feed.xml>")?;
    let xml = std::fs::read_to_string(&path)?;

    let doc = FeedDocument::parse(&xml)?;
    let Some(version) = doc.recognized_version() else {
        return Err("no feed recognized".into());
    };
    println!("{path}: {version}");

    match doc.feed() {
        Some(Feed::Rss(feed)) => {
            let items = feed.channel.as_ref().map_or(0, |c| c.items.len());
            println!("  channel with {items} item(s)");
        }
        Some(Feed::Rdf(feed)) => println!("  {} item(s)", feed.items.len()),
        Some(Feed::Atom(feed)) => println!("  {} entry(ies)", feed.entries.len()),
        None => {}
    }

    // Required fields first, then value-level rules
    for (label, content) in [("structure", false), ("content", true)] {
        match doc.validate(content) {
            Ok(()) => println!("  {label}: ok"),
            Err(e) => println!("  {label}: {e}"),
        }
    }

    let config = FormatConfig::for_version(version).indent(2);
    println!("{}", doc.save(&config)?);
    Ok(())
}
