//! In-memory document.

use crate::host::{Link, NodeId, Page, PageError};
use crate::style::StyleProperty;
use std::collections::BTreeMap;
use url::Url;

#[derive(Clone, Debug)]
struct Element {
    tag: String,
    id: Option<String>,
    classes: Vec<String>,
    href: Option<String>,
    target: Option<String>,
    parent: Option<NodeId>,
    detached: bool,
    inline: BTreeMap<StyleProperty, String>,
}

impl Element {
    fn new(tag: &str, parent: Option<NodeId>) -> Self {
        Self {
            tag: tag.to_ascii_lowercase(),
            id: None,
            classes: Vec::new(),
            href: None,
            target: None,
            parent,
            detached: false,
            inline: BTreeMap::new(),
        }
    }
}

/// A single class rule of the page stylesheet.
#[derive(Clone, Debug, PartialEq, Eq)]
struct ClassRule {
    class: String,
    property: StyleProperty,
    value: String,
}

/// Document tree with inline styles, a class-only stylesheet and a
/// navigation log.
///
/// Nodes are kept in creation order, which stands in for document order.
#[derive(Clone, Debug)]
pub struct VirtualPage {
    url: Url,
    elements: Vec<Element>,
    rules: Vec<ClassRule>,
    reject_styles: bool,
    style_writes: usize,
    navigations: Vec<String>,
}

/// Fluent handle returned by [`VirtualPage::append`].
pub struct ElementBuilder<'a> {
    page: &'a mut VirtualPage,
    node: NodeId,
}

impl ElementBuilder<'_> {
    pub fn attr_id(mut self, id: &str) -> Self {
        self.page.elements[self.node.0].id = Some(id.to_string());
        self
    }

    pub fn class(mut self, class: &str) -> Self {
        let classes = &mut self.page.elements[self.node.0].classes;
        if !classes.iter().any(|c| c == class) {
            classes.push(class.to_string());
        }
        self
    }

    pub fn href(mut self, href: &str) -> Self {
        self.page.elements[self.node.0].href = Some(href.to_string());
        self
    }

    pub fn target(mut self, target: &str) -> Self {
        self.page.elements[self.node.0].target = Some(target.to_string());
        self
    }

    pub fn node(self) -> NodeId {
        self.node
    }
}

impl VirtualPage {
    pub fn new(url: &str) -> Result<Self, url::ParseError> {
        Ok(Self::at(Url::parse(url)?))
    }

    /// An empty document (just `body`) loaded from `url`.
    pub fn at(url: Url) -> Self {
        Self {
            url,
            elements: vec![Element::new("body", None)],
            rules: Vec::new(),
            reject_styles: false,
            style_writes: 0,
            navigations: Vec::new(),
        }
    }

    pub fn url(&self) -> &Url {
        &self.url
    }

    pub fn body(&self) -> NodeId {
        NodeId(0)
    }

    pub fn append(&mut self, parent: NodeId, tag: &str) -> ElementBuilder<'_> {
        let node = NodeId(self.elements.len());
        self.elements.push(Element::new(tag, Some(parent)));
        ElementBuilder { page: self, node }
    }

    /// Remove `node` and its subtree from the document.
    pub fn detach(&mut self, node: NodeId) {
        if let Some(element) = self.elements.get_mut(node.0) {
            element.detached = true;
        }
    }

    /// Add a stylesheet rule `.class { property: value }`.
    pub fn add_rule(&mut self, class: &str, property: StyleProperty, value: &str) {
        self.rules.push(ClassRule {
            class: class.to_string(),
            property,
            value: value.to_string(),
        });
    }

    /// Make every following style write fail.
    pub fn reject_style_writes(&mut self, reject: bool) {
        self.reject_styles = reject;
    }

    pub fn inline_style(&self, node: NodeId, property: StyleProperty) -> Option<&str> {
        self.elements
            .get(node.0)?
            .inline
            .get(&property)
            .map(String::as_str)
    }

    /// Inline declaration if any, otherwise the last matching class rule.
    pub fn computed_style(&self, node: NodeId, property: StyleProperty) -> Option<&str> {
        if let Some(value) = self.inline_style(node, property) {
            return Some(value);
        }
        let element = self.elements.get(node.0)?;
        self.rules
            .iter()
            .rev()
            .find(|rule| rule.property == property && element.classes.contains(&rule.class))
            .map(|rule| rule.value.as_str())
    }

    pub fn has_class(&self, node: NodeId, class: &str) -> bool {
        self.elements
            .get(node.0)
            .is_some_and(|e| e.classes.iter().any(|c| c == class))
    }

    /// Every anchor in the document, in document order.
    pub fn links(&self) -> Vec<NodeId> {
        self.connected()
            .filter(|(_, element)| element.tag == "a")
            .map(|(node, _)| node)
            .collect()
    }

    /// Number of successful style writes so far.
    pub fn style_writes(&self) -> usize {
        self.style_writes
    }

    /// Destinations assigned to the location, in order.
    pub fn navigations(&self) -> &[String] {
        &self.navigations
    }

    fn is_connected(&self, node: NodeId) -> bool {
        let mut current = Some(node);
        while let Some(id) = current {
            match self.elements.get(id.0) {
                Some(element) if !element.detached => current = element.parent,
                _ => return false,
            }
        }
        true
    }

    fn connected(&self) -> impl Iterator<Item = (NodeId, &Element)> + '_ {
        self.elements
            .iter()
            .enumerate()
            .map(|(index, element)| (NodeId(index), element))
            .filter(|(node, _)| self.is_connected(*node))
    }

    fn live_element(&mut self, node: NodeId) -> Result<&mut Element, PageError> {
        if !self.is_connected(node) {
            return Err(PageError::NodeMissing(node));
        }
        self.elements
            .get_mut(node.0)
            .ok_or(PageError::NodeMissing(node))
    }

    fn resolve_link(&self, node: NodeId, element: &Element) -> Link {
        let raw = element.href.clone().unwrap_or_default();
        let mut link = Link {
            node: Some(node),
            target: element.target.clone().unwrap_or_default(),
            classes: element.classes.clone(),
            ..Link::default()
        };
        if raw.is_empty() {
            return link;
        }
        match self.url.join(&raw) {
            Ok(resolved) => {
                link.protocol = format!("{}:", resolved.scheme());
                link.pathname = resolved.path().to_string();
                link.hash = resolved
                    .fragment()
                    .filter(|fragment| !fragment.is_empty())
                    .map(|fragment| format!("#{fragment}"))
                    .unwrap_or_default();
                link.href = resolved.into();
            }
            Err(_) => link.href = raw,
        }
        link
    }
}

impl Page for VirtualPage {
    fn query_selector(&self, selector: &str) -> Option<NodeId> {
        let matches = |element: &Element| {
            if let Some(id) = selector.strip_prefix('#') {
                element.id.as_deref() == Some(id)
            } else if let Some(class) = selector.strip_prefix('.') {
                element.classes.iter().any(|c| c == class)
            } else {
                element.tag.eq_ignore_ascii_case(selector)
            }
        };
        self.connected()
            .find(|(_, element)| matches(*element))
            .map(|(node, _)| node)
    }

    fn query_all_by_class(&self, class: &str) -> Vec<NodeId> {
        self.connected()
            .filter(|(_, element)| element.classes.iter().any(|c| c == class))
            .map(|(node, _)| node)
            .collect()
    }

    fn closest_link(&self, target: NodeId) -> Option<Link> {
        let mut current = Some(target);
        while let Some(node) = current {
            let element = self.elements.get(node.0)?;
            if element.tag == "a" {
                return Some(self.resolve_link(node, element));
            }
            current = element.parent;
        }
        None
    }

    fn location_path(&self) -> String {
        self.url.path().to_string()
    }

    fn set_style(
        &mut self,
        node: NodeId,
        property: StyleProperty,
        value: &str,
    ) -> Result<(), PageError> {
        let reject = self.reject_styles;
        let element = self.live_element(node)?;
        if reject {
            return Err(PageError::StyleRejected {
                node,
                property: property.css_name(),
                reason: "styling disabled".to_string(),
            });
        }
        if value.is_empty() {
            element.inline.remove(&property);
        } else {
            element.inline.insert(property, value.to_string());
        }
        self.style_writes += 1;
        Ok(())
    }

    fn add_class(&mut self, node: NodeId, class: &str) -> Result<(), PageError> {
        let element = self.live_element(node)?;
        if !element.classes.iter().any(|c| c == class) {
            element.classes.push(class.to_string());
        }
        Ok(())
    }

    fn navigate(&mut self, destination: &str) {
        self.navigations.push(destination.to_string());
    }
}
