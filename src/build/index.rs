//! Blog index assembly: ordering posts and rendering their summary cards.

use super::post::Post;
use super::template::{TemplateContext, substitute};

/// Fixed markup for one post in the index.
const CARD_TEMPLATE: &str = r#"<article class="blog-card">
  <div class="blog-card-meta">
    <time datetime="{{dateISO}}">{{date}}</time>
    <span class="blog-card-category">{{category}}</span>
  </div>
  <h2 class="blog-card-title"><a href="{{url}}">{{title}}</a></h2>
  <p class="blog-card-description">{{description}}</p>
  <a class="blog-card-link" href="{{url}}">Read more &rarr;</a>
</article>"#;

/// Order posts newest first by publish date.
///
/// The sort is stable: posts sharing a date keep their enumeration
/// (file-name) order.
pub fn sort_newest_first(posts: &[Post]) -> Vec<&Post> {
    let mut sorted: Vec<&Post> = posts.iter().collect();
    sorted.sort_by(|a, b| b.date.cmp(&a.date));
    sorted
}

/// Render the summary card for one post.
pub fn render_card(post: &Post) -> String {
    let mut ctx = TemplateContext::new();
    ctx.insert("dateISO", post.date_iso.as_str());
    ctx.insert("date", post.display_date());
    ctx.insert_optional("category", post.category.clone());
    ctx.insert("url", post.url.as_str());
    ctx.insert("title", post.title.as_str());
    ctx.insert_optional("description", post.description.clone());
    substitute(CARD_TEMPLATE, &ctx).output
}

/// Render every card, newest first, joined by newlines.
pub fn render_posts_list(posts: &[Post]) -> String {
    sort_newest_first(posts)
        .into_iter()
        .map(render_card)
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::build::front_matter::parse_front_matter;
    use crate::config::SiteConfig;
    use std::path::PathBuf;

    fn post(slug: &str, date: &str) -> Post {
        let content = format!(
            "---\nslug: {slug}\ntitle: Title {slug}\ndescription: About {slug}\ncategory: Guides\ndate: {date}\ntype: manual\n---\n"
        );
        Post::from_parsed(
            parse_front_matter(&content).unwrap(),
            PathBuf::from(format!("{slug}.md")),
            &SiteConfig::default(),
        )
        .unwrap()
    }

    #[test]
    fn test_sort_newest_first() {
        let posts = vec![
            post("a", "2025-01-01"),
            post("b", "2025-02-15"),
            post("c", "2025-01-20"),
        ];
        let dates: Vec<_> = sort_newest_first(&posts)
            .iter()
            .map(|p| p.date_iso.as_str())
            .collect();
        assert_eq!(dates, vec!["2025-02-15", "2025-01-20", "2025-01-01"]);
    }

    #[test]
    fn test_sort_ties_keep_enumeration_order() {
        let posts = vec![
            post("first", "2025-01-01"),
            post("second", "2025-01-01"),
            post("newer", "2025-03-01"),
        ];
        let slugs: Vec<_> = sort_newest_first(&posts)
            .iter()
            .map(|p| p.slug.as_str())
            .collect();
        assert_eq!(slugs, vec!["newer", "first", "second"]);
    }

    #[test]
    fn test_sort_compares_calendar_dates() {
        // RFC 3339 on a later day must sort above a plain earlier date
        let posts = vec![post("plain", "2025-01-05"), post("stamped", "2025-01-06T00:00:00Z")];
        let slugs: Vec<_> = sort_newest_first(&posts)
            .iter()
            .map(|p| p.slug.as_str())
            .collect();
        assert_eq!(slugs, vec!["stamped", "plain"]);
    }

    #[test]
    fn test_render_card() {
        let card = render_card(&post("hello", "2025-01-26"));
        assert!(card.contains(r#"<time datetime="2025-01-26">January 26, 2025</time>"#));
        assert!(card.contains(r#"<span class="blog-card-category">Guides</span>"#));
        assert!(card.contains(r#"<a href="/blog/posts/hello/">Title hello</a>"#));
        assert!(card.contains("About hello"));
        assert!(card.contains(r#"<a class="blog-card-link" href="/blog/posts/hello/">"#));
        assert!(!card.contains("{{"));
    }

    #[test]
    fn test_render_posts_list_joins_cards() {
        let posts = vec![post("old", "2024-12-31"), post("new", "2025-01-01")];
        let list = render_posts_list(&posts);
        assert_eq!(list.matches("<article").count(), 2);
        assert!(list.contains("</article>\n<article"));
        assert!(list.find("Title new").unwrap() < list.find("Title old").unwrap());
    }

    #[test]
    fn test_render_posts_list_empty() {
        assert_eq!(render_posts_list(&[]), "");
    }
}
