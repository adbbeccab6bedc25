//! Rendering targets.
//!
//! The view and the theme cycler never touch a concrete screen. They write
//! through [`RenderTarget`], which a front-end implements (or wraps
//! [`MemoryTarget`], which simply records what was written).

use std::collections::{BTreeMap, HashMap, HashSet};
use std::fmt;

/// Global presentation properties a theme sets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum StyleProperty {
    BackgroundImage,
    PrimaryColor,
    HeadingBackgroundColor,
    HighlightBackgroundColor,
    ButtonBackgroundColor,
}

impl StyleProperty {
    pub const COLORS: [StyleProperty; 4] = [
        StyleProperty::PrimaryColor,
        StyleProperty::HeadingBackgroundColor,
        StyleProperty::HighlightBackgroundColor,
        StyleProperty::ButtonBackgroundColor,
    ];

    /// CSS-style name of the property.
    pub fn as_str(&self) -> &'static str {
        match self {
            StyleProperty::BackgroundImage => "background-image",
            StyleProperty::PrimaryColor => "--primary-color",
            StyleProperty::HeadingBackgroundColor => "--heading-bg-color",
            StyleProperty::HighlightBackgroundColor => "--highlight-bg-color",
            StyleProperty::ButtonBackgroundColor => "--button-bg-color",
        }
    }
}

impl fmt::Display for StyleProperty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Display regions whose children get replaced wholesale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Region {
    Comments,
    Fact,
    Auth,
    Notice,
}

/// Elements that can be shown or hidden.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Element {
    CommentForm,
    NameForm,
}

/// Local input state owned by the front-end.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InputField {
    Author,
    CommentText,
    DisplayName,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    TransientFetch,
    MalformedResponse,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Block {
    Comment { date: String, author: String, text: String },
    Placeholder(String),
    Text(String),
    Link { label: String, url: String },
    Notice { kind: NoticeKind, message: String },
}

impl Block {
    pub fn is_comment(&self) -> bool {
        matches!(self, Block::Comment { .. })
    }

    /// Whether any text carried by the block contains `needle`.
    pub fn contains(&self, needle: &str) -> bool {
        match self {
            Block::Comment { date, author, text } => {
                date.contains(needle) || author.contains(needle) || text.contains(needle)
            }
            Block::Placeholder(s) | Block::Text(s) => s.contains(needle),
            Block::Link { label, url } => label.contains(needle) || url.contains(needle),
            Block::Notice { message, .. } => message.contains(needle),
        }
    }
}

pub trait RenderTarget {
    fn set_style(&mut self, property: StyleProperty, value: &str);
    fn replace_children(&mut self, region: Region, blocks: Vec<Block>);
    fn set_visible(&mut self, element: Element, visible: bool);
    fn clear_input(&mut self, field: InputField);
}

/// Records everything written to it.
#[derive(Debug, Default, Clone)]
pub struct MemoryTarget {
    styles: BTreeMap<StyleProperty, String>,
    regions: HashMap<Region, Vec<Block>>,
    visible: HashSet<Element>,
    cleared: Vec<InputField>,
    style_writes: usize,
}

impl MemoryTarget {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn style(&self, property: StyleProperty) -> Option<&str> {
        self.styles.get(&property).map(String::as_str)
    }

    pub fn styles(&self) -> &BTreeMap<StyleProperty, String> {
        &self.styles
    }

    /// Total number of `set_style` calls seen so far.
    pub fn style_writes(&self) -> usize {
        self.style_writes
    }

    pub fn blocks(&self, region: Region) -> &[Block] {
        self.regions.get(&region).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn comment_blocks(&self) -> impl Iterator<Item = &Block> {
        self.blocks(Region::Comments).iter().filter(|b| b.is_comment())
    }

    pub fn notice(&self) -> Option<(NoticeKind, &str)> {
        self.blocks(Region::Notice).iter().find_map(|b| match b {
            Block::Notice { kind, message } => Some((*kind, message.as_str())),
            _ => None,
        })
    }

    pub fn is_visible(&self, element: Element) -> bool {
        self.visible.contains(&element)
    }

    /// Drains the record of cleared inputs.
    pub fn take_cleared(&mut self) -> Vec<InputField> {
        std::mem::take(&mut self.cleared)
    }
}

impl RenderTarget for MemoryTarget {
    fn set_style(&mut self, property: StyleProperty, value: &str) {
        self.style_writes += 1;
        self.styles.insert(property, value.to_string());
    }

    fn replace_children(&mut self, region: Region, blocks: Vec<Block>) {
        self.regions.insert(region, blocks);
    }

    fn set_visible(&mut self, element: Element, visible: bool) {
        if visible {
            self.visible.insert(element);
        } else {
            self.visible.remove(&element);
        }
    }

    fn clear_input(&mut self, field: InputField) {
        self.cleared.push(field);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn replace_children_overwrites_region() {
        let mut target = MemoryTarget::new();
        target.replace_children(Region::Comments, vec![Block::Text("a".into()), Block::Text("b".into())]);
        target.replace_children(Region::Comments, vec![Block::Placeholder("none".into())]);
        assert_eq!(target.blocks(Region::Comments), &[Block::Placeholder("none".into())]);
        assert!(target.blocks(Region::Fact).is_empty());
    }

    #[test]
    fn visibility_toggles() {
        let mut target = MemoryTarget::new();
        assert!(!target.is_visible(Element::CommentForm));
        target.set_visible(Element::CommentForm, true);
        assert!(target.is_visible(Element::CommentForm));
        target.set_visible(Element::CommentForm, false);
        assert!(!target.is_visible(Element::CommentForm));
    }

    #[test]
    fn notice_lookup() {
        let mut target = MemoryTarget::new();
        assert!(target.notice().is_none());
        target.replace_children(
            Region::Notice,
            vec![Block::Notice { kind: NoticeKind::TransientFetch, message: "offline".into() }],
        );
        assert_eq!(target.notice(), Some((NoticeKind::TransientFetch, "offline")));
    }
}
