//! Placeholder blog posts.
//!
//! The blog has no real content yet; every visit generates a few lorem ipsum
//! posts from the session's seeded RNG.

use rand::Rng;

use crate::DisplayItem;

const WORDS: &[&str] = &[
    "lorem", "ipsum", "dolor", "sit", "amet", "consectetur", "adipiscing", "elit", "sed", "do",
    "eiusmod", "tempor", "incididunt", "ut", "labore", "et", "dolore", "magna", "aliqua", "enim",
    "ad", "minim", "veniam", "quis", "nostrud", "exercitation", "ullamco", "laboris", "nisi",
    "aliquip", "ex", "ea", "commodo", "consequat", "duis", "aute", "irure", "in",
    "reprehenderit", "voluptate", "velit", "esse", "cillum", "fugiat", "nulla", "pariatur",
    "excepteur", "sint", "occaecat", "cupidatat", "non", "proident", "sunt", "culpa", "qui",
    "officia", "deserunt", "mollit", "anim", "id", "est", "laborum",
];

/// A generated post.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlogPost {
    /// Post heading.
    pub title: String,
    /// One-sentence teaser.
    pub summary: String,
    /// Paragraphs separated by blank lines.
    pub body: String,
}

/// Generate between `min` and `max` posts (inclusive).
pub fn generate_posts(rng: &mut impl Rng, min: usize, max: usize) -> Vec<BlogPost> {
    let count = rng.gen_range(min..=max.max(min));
    (0..count).map(|_| generate_post(rng)).collect()
}

/// Lay posts out as one scrollable document.
pub fn render_document(posts: &[BlogPost]) -> String {
    posts
        .iter()
        .map(|post| format!("{}\n{}\n\n{}", post.title(), post.description(), post.detail()))
        .collect::<Vec<_>>()
        .join("\n\n\n")
}

fn generate_post(rng: &mut impl Rng) -> BlogPost {
    let title = capitalize(&words(rng, 2, 5));
    let summary = sentence(rng);
    let paragraphs = rng.gen_range(2..=4);
    let body = (0..paragraphs).map(|_| paragraph(rng)).collect::<Vec<_>>().join("\n\n");
    BlogPost { title, summary, body }
}

fn paragraph(rng: &mut impl Rng) -> String {
    let sentences = rng.gen_range(3..=6);
    (0..sentences).map(|_| sentence(rng)).collect::<Vec<_>>().join(" ")
}

fn sentence(rng: &mut impl Rng) -> String {
    format!("{}.", capitalize(&words(rng, 6, 14)))
}

fn words(rng: &mut impl Rng, min: usize, max: usize) -> String {
    let count = rng.gen_range(min..=max);
    (0..count).map(|_| WORDS[rng.gen_range(0..WORDS.len())]).collect::<Vec<_>>().join(" ")
}

fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    chars.next().map_or_else(String::new, |first| first.to_uppercase().chain(chars).collect())
}
