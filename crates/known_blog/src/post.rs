//! Blog posts and what to render for them.

use pulldown_cmark::{html, Options, Parser};
use serde::Serialize;

use crate::front_matter::FrontMatter;

/// Prefix of every post's document title.
pub const SITE_TITLE: &str = "Known Blog";

/// One parsed post file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlogPost {
    pub front_matter: FrontMatter,
    /// Markdown after the front matter block.
    pub body: String,
}

impl BlogPost {
    pub fn slug(&self) -> &str {
        &self.front_matter.slug
    }

    /// Renders the body to HTML and derives the page head.
    pub fn render(&self) -> RenderedPost {
        RenderedPost {
            slug: self.front_matter.slug.clone(),
            document_title: format!("{} | {}", SITE_TITLE, self.front_matter.title),
            description: self.front_matter.summary.clone(),
            title: self.front_matter.title.clone(),
            html: render_markdown(&self.body),
        }
    }
}

/// A post ready to serve.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderedPost {
    pub slug: String,
    /// Value for `<title>`.
    pub document_title: String,
    /// Value for `<meta name="description">`.
    pub description: String,
    /// Page heading.
    pub title: String,
    pub html: String,
}

/// Index entry for a post.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PostSummary {
    pub slug: String,
    pub title: String,
    pub summary: String,
}

impl From<&RenderedPost> for PostSummary {
    fn from(post: &RenderedPost) -> Self {
        Self {
            slug: post.slug.clone(),
            title: post.title.clone(),
            summary: post.description.clone(),
        }
    }
}

/// What to render for a requested slug.
///
/// `Loading` only occurs while the route set is still being built; it always
/// resolves to `Ready` or `NotFound` once the build finishes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum PostPage {
    Loading,
    Ready(RenderedPost),
    NotFound,
}

/// Renders Markdown to an HTML fragment with tables, footnotes,
/// strikethrough and task lists enabled.
pub fn render_markdown(markdown: &str) -> String {
    let mut options = Options::empty();
    options.insert(Options::ENABLE_TABLES);
    options.insert(Options::ENABLE_FOOTNOTES);
    options.insert(Options::ENABLE_STRIKETHROUGH);
    options.insert(Options::ENABLE_TASKLISTS);

    let parser = Parser::new_ext(markdown, options);
    let mut out = String::with_capacity(markdown.len() * 3 / 2);
    html::push_html(&mut out, parser);
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn post() -> BlogPost {
        BlogPost {
            front_matter: FrontMatter {
                slug: "hello".to_owned(),
                title: "Hello".to_owned(),
                summary: "First post".to_owned(),
            },
            body: "Some *emphasis*.\n".to_owned(),
        }
    }

    #[test]
    fn test_render_head_fields() {
        let rendered = post().render();
        assert_eq!(rendered.document_title, "Known Blog | Hello");
        assert_eq!(rendered.description, "First post");
        assert_eq!(rendered.title, "Hello");
        assert_eq!(rendered.html, "<p>Some <em>emphasis</em>.</p>\n");
    }

    #[test]
    fn test_render_markdown_tables() {
        let html = render_markdown("| a | b |\n|---|---|\n| 1 | 2 |\n");
        assert!(html.contains("<table>"));
        assert!(html.contains("<td>1</td>"));
    }

    #[test]
    fn test_post_page_serializes_state_tag() {
        let json = serde_json::to_value(PostPage::Loading).unwrap();
        assert_eq!(json["state"], "loading");

        let json = serde_json::to_value(PostPage::Ready(post().render())).unwrap();
        assert_eq!(json["state"], "ready");
        assert_eq!(json["documentTitle"], "Known Blog | Hello");
    }
}
