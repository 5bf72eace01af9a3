use sportsculture_config::SiteConfig;

use crate::error::*;
use crate::post::Post;

/// RSS channel for the blog, newest post first.
pub fn rss(base_url: &str, site: &SiteConfig, posts: &[Post]) -> String {
    let items: Vec<_> = posts.iter().map(|post| to_rss_item(base_url, post)).collect();
    let channel = rss::ChannelBuilder::default()
        .title(site.name.clone())
        .link(format!("{base_url}/"))
        .description(site.blog_title.clone())
        .items(items)
        .build();
    let rss = channel.to_string();
    log::trace!("RSS data: {rss}");
    rss
}

fn to_rss_item(base_url: &str, post: &Post) -> rss::Item {
    let link = format!("{base_url}{}", post.permalink);
    let guid = rss::GuidBuilder::default()
        .value(link.clone())
        .permalink(true)
        .build();
    let pub_date = post
        .published
        .map(|date| date.and_time(chrono::NaiveTime::MIN).and_utc().to_rfc2822());

    rss::ItemBuilder::default()
        .title(post.title.clone())
        .link(link)
        .guid(guid)
        .pub_date(pub_date)
        .description(post.description.clone())
        .build()
}

/// `urlset` with one entry per absolute URL.
pub fn sitemap<'u>(urls: impl IntoIterator<Item = &'u str>) -> Result<String> {
    let mut out = Vec::new();
    let writer = sitemap::writer::SiteMapWriter::new(&mut out);
    let mut urlset = writer
        .start_urlset()
        .map_err(|e| anyhow::format_err!("Failed to start sitemap: {e}"))?;
    for url in urls {
        let entry = sitemap::structs::UrlEntry::builder()
            .loc(url)
            .build()
            .map_err(|e| anyhow::format_err!("Invalid sitemap URL `{url}`: {e}"))?;
        urlset
            .url(entry)
            .map_err(|e| anyhow::format_err!("Failed to write sitemap: {e}"))?;
    }
    urlset
        .end()
        .map_err(|e| anyhow::format_err!("Failed to finish sitemap: {e}"))?;
    let sitemap = String::from_utf8(out)?;
    Ok(sitemap)
}

#[cfg(test)]
mod test {
    use std::path;

    use super::*;
    use crate::markdown::Markdown;

    fn post(name: &str, content: &str) -> Post {
        Post::parse(path::Path::new(name), content, &Markdown::new()).unwrap()
    }

    #[test]
    fn rss_channel_uses_site_config() {
        let site = SiteConfig::default();
        let posts = [post(
            "posts/2023-06-01-kickoff.md",
            "---\ndescription: First post\n---\nBody",
        )];
        let rss = rss("https://sportsculture.io", &site, &posts);
        assert!(rss.contains("<title>Sports Culture</title>"), "{rss}");
        assert!(
            rss.contains("<description>Making the world a better place through sports.</description>"),
            "{rss}"
        );
        assert!(
            rss.contains("<link>https://sportsculture.io/posts/kickoff</link>"),
            "{rss}"
        );
        assert!(rss.contains("<description>First post</description>"), "{rss}");
        assert!(rss.contains("Jun 2023 00:00:00"), "{rss}");
    }

    #[test]
    fn rss_item_without_date() {
        let site = SiteConfig::default();
        let posts = [post("posts/kickoff.md", "Body")];
        let rss = rss("https://sportsculture.io", &site, &posts);
        assert!(!rss.contains("<pubDate>"), "{rss}");
    }

    #[test]
    fn sitemap_lists_urls() {
        let sitemap = sitemap([
            "https://sportsculture.io/",
            "https://sportsculture.io/careers",
        ])
        .unwrap();
        assert!(sitemap.contains("<urlset"), "{sitemap}");
        assert!(
            sitemap.contains("<loc>https://sportsculture.io/careers</loc>"),
            "{sitemap}"
        );
    }
}
