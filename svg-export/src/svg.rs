// A thin Rust wrapper to handle SVG tags and render them to markup.

use std::{collections::BTreeMap, fmt::Write};

// ----------------------------------------------------------------------------
//
//
// Rust representation and rendering of SVG tags.
//
//
// ----------------------------------------------------------------------------

/// Attributes and style properties. Ordered, so output is deterministic.
pub type Params = BTreeMap<String, String>;

pub trait RenderTag: std::fmt::Debug {
    fn render(&self, buf: &mut String);
}

impl<T> RenderTag for Tag<T>
where
    T: Identifier + std::fmt::Debug,
{
    fn render(&self, buf: &mut String) {
        write!(buf, "<{}", self.kind.identifier()).expect(FAILED_STRING_WRITE);
        for (k, v) in self.parameters.iter() {
            write!(buf, " {k}=\"{}\"", escape(v)).expect(FAILED_STRING_WRITE);
        }
        if !self.style.is_empty() {
            let style: Vec<String> = self
                .style
                .iter()
                .map(|(k, v)| format!("{k}:{}", escape(v)))
                .collect();
            write!(buf, " style=\"{}\"", style.join(";")).expect(FAILED_STRING_WRITE);
        }
        if self.children.is_empty() {
            buf.push_str("/>");
            return;
        }
        buf.push('>');
        for c in self.children.iter() {
            c.render(buf);
        }
        write!(buf, "</{}>", self.kind.identifier()).expect(FAILED_STRING_WRITE);
    }
}

/// Character data inside a tag.
#[derive(Debug)]
pub struct Content(pub String);

impl RenderTag for Content {
    fn render(&self, buf: &mut String) {
        buf.push_str(&escape(&self.0));
    }
}

pub fn render(svg_tag: &Tag<Svg>) -> String {
    let mut raw_svg = String::new();
    svg_tag.render(&mut raw_svg);
    raw_svg
}

fn escape(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for chr in raw.chars() {
        match chr {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            c => escaped.push(c),
        }
    }
    escaped
}

#[derive(Debug)]
pub struct Tag<T>
where
    T: std::fmt::Debug,
{
    parameters: Params,
    style: Params,
    children: Vec<Box<dyn RenderTag>>,
    kind: T,
}

impl<T> Tag<T>
where
    T: std::fmt::Debug,
{
    fn with_kind(kind: T, parameters: &[(&str, String)], style: Option<Params>) -> Self {
        Self {
            parameters: parameters
                .iter()
                .map(|(k, v)| (k.to_string(), v.clone()))
                .collect(),
            style: style.unwrap_or_default(),
            children: Vec::new(),
            kind,
        }
    }

    pub fn add_child(&mut self, child: impl RenderTag + 'static) {
        self.children.push(Box::new(child));
    }

    pub fn add_children(&mut self, children: Vec<Box<dyn RenderTag>>) {
        self.children.extend(children);
    }

    pub fn set_attribute(&mut self, key: &str, value: &str) {
        self.parameters.insert(key.to_string(), value.to_string());
    }

    pub fn with_attribute(mut self, key: &str, value: &str) -> Self {
        self.set_attribute(key, value);
        self
    }
}

// ----------------------------------------------------------------------------
//
//
// Creation of `new` tags.
//
//
// ----------------------------------------------------------------------------

impl Tag<Svg> {
    pub fn new(width: u64, height: u64, style: Option<Params>) -> Self {
        Self::with_kind(
            Svg {},
            &[
                ("width", format!("{width}")),
                ("height", format!("{height}")),
                ("viewBox", format!("0 0 {width} {height}")),
                ("xmlns", "http://www.w3.org/2000/svg".to_string()),
            ],
            style,
        )
    }
}

impl Tag<Group> {
    pub fn new(dx: f64, dy: f64, style: Option<Params>) -> Self {
        Self::with_kind(
            Group {},
            &[("transform", format!("translate({dx},{dy})"))],
            style,
        )
    }
}

impl Tag<Circle> {
    pub fn new(cx: f64, cy: f64, r: f64, style: Option<Params>) -> Self {
        Self::with_kind(
            Circle {},
            &[
                ("cx", format!("{cx}")),
                ("cy", format!("{cy}")),
                ("r", format!("{r}")),
            ],
            style,
        )
    }
}

impl Tag<Title> {
    pub fn new(text: &str) -> Self {
        let mut res = Self::with_kind(Title {}, &[], None);
        res.add_child(Content(text.to_string()));
        res
    }
}

impl Tag<Text> {
    pub fn new(x: f64, y: f64, angle: f64, text: &str, style: Option<Params>) -> Self {
        let mut res = Self::with_kind(
            Text {},
            &[("transform", format!("translate({x},{y}) rotate({angle})"))],
            style,
        );
        res.add_child(Content(text.to_string()));
        res
    }
}

impl Tag<Line> {
    pub fn new(x1: f64, x2: f64, y1: f64, y2: f64, style: Option<Params>) -> Self {
        Self::with_kind(
            Line {},
            &[
                ("x1", format!("{x1}")),
                ("x2", format!("{x2}")),
                ("y1", format!("{y1}")),
                ("y2", format!("{y2}")),
                ("stroke", "black".to_string()),
            ],
            style,
        )
    }
}

// ----------------------------------------------------------------------------
//
//
// SVG tag kinds and their str representation (`identifier`)
//
//
// ----------------------------------------------------------------------------

#[derive(Debug)]
pub struct Svg {}
#[derive(Debug)]
pub struct Group {}
#[derive(Debug)]
pub struct Circle {}
#[derive(Debug)]
pub struct Title {}
#[derive(Debug)]
pub struct Text {}
#[derive(Debug)]
pub struct Line {}

pub trait Identifier {
    fn identifier(&self) -> &'static str;
}

impl Identifier for Svg {
    fn identifier(&self) -> &'static str {
        "svg"
    }
}

impl Identifier for Group {
    fn identifier(&self) -> &'static str {
        "g"
    }
}

impl Identifier for Circle {
    fn identifier(&self) -> &'static str {
        "circle"
    }
}

impl Identifier for Title {
    fn identifier(&self) -> &'static str {
        "title"
    }
}

impl Identifier for Text {
    fn identifier(&self) -> &'static str {
        "text"
    }
}

impl Identifier for Line {
    fn identifier(&self) -> &'static str {
        "line"
    }
}

const FAILED_STRING_WRITE: &str = "Failed to write into string.";

pub fn opts(items: &[(&str, &str)]) -> Option<Params> {
    Some(
        items
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect(),
    )
}
