use pulldown_cmark as cmark;

#[derive(Debug, Clone, Default)]
pub struct Markdown {}

impl Markdown {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn parse(&self, content: &str) -> String {
        let mut buf = String::new();
        let options = cmark::Options::ENABLE_FOOTNOTES
            | cmark::Options::ENABLE_TABLES
            | cmark::Options::ENABLE_STRIKETHROUGH
            | cmark::Options::ENABLE_TASKLISTS;
        let parser = cmark::Parser::new_ext(content, options);
        cmark::html::push_html(&mut buf, parser);
        buf
    }
}
