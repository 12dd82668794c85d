//! Required-element navigation over a parsed XML tree. Every node remembers
//! the element path it was reached by, so missing pieces can be named.

use std::borrow::Cow;
use std::str::FromStr;

use xmltree::Element;

#[remain::sorted]
#[derive(Debug, thiserror::Error)]
pub enum Err {
    #[error("Invalid number '{text}' in {path}")]
    InvalidNumber { path: String, text: String },
    #[error("Missing attribute '{attribute}' on {path}")]
    MissingAttribute { path: String, attribute: String },
    #[error("Missing required element {0}")]
    MissingElement(String),
    #[error("XML parse error: {0}")]
    ParseError(#[from] xmltree::ParseError),
}

/// Parses a document and returns its root, which must be a `COLLADA` element.
pub fn parse_document(text: &str) -> Result<Element, Err> {
    let root = Element::parse(text.as_bytes())?;
    if root.name != "COLLADA" {
        return Err(Err::MissingElement("COLLADA".to_string()));
    }
    Ok(root)
}

#[derive(Clone, Debug)]
pub struct Node<'a> {
    el: &'a Element,
    path: String,
}

impl<'a> Node<'a> {
    pub fn root(el: &'a Element) -> Self {
        Self { el, path: el.name.clone() }
    }

    fn descend(&self, el: &'a Element) -> Self {
        Self { el, path: format!("{}/{}", self.path, el.name) }
    }

    pub fn get_path(&self) -> &str {
        &self.path
    }

    pub fn get_name(&self) -> &'a str {
        &self.el.name
    }

    pub fn opt_child(&self, name: &str) -> Option<Node<'a>> {
        self.el.get_child(name).map(|el| self.descend(el))
    }

    pub fn child(&self, name: &str) -> Result<Node<'a>, Err> {
        self.opt_child(name)
            .ok_or_else(|| Err::MissingElement(format!("{}/{}", self.path, name)))
    }

    /// Follows a `/`-separated path of first-match children.
    pub fn find(&self, path: &str) -> Result<Node<'a>, Err> {
        path.split('/')
            .try_fold(self.clone(), |node, name| node.child(name))
    }

    pub fn opt_find(&self, path: &str) -> Option<Node<'a>> {
        path.split('/')
            .try_fold(self.clone(), |node, name| node.opt_child(name))
    }

    /// All child elements with the given name, in document order.
    pub fn children(&self, name: &'a str) -> impl Iterator<Item = Node<'a>> + '_ {
        self.elements().filter(move |n| n.get_name() == name)
    }

    pub fn elements(&self) -> impl Iterator<Item = Node<'a>> + '_ {
        self.el.children.iter()
            .filter_map(|n| n.as_element())
            .map(move |el| self.descend(el))
    }

    pub fn first_element(&self) -> Option<Node<'a>> {
        self.elements().next()
    }

    pub fn opt_attr(&self, name: &str) -> Option<&'a str> {
        self.el.attributes.get(name).map(String::as_str)
    }

    pub fn attr(&self, name: &str) -> Result<&'a str, Err> {
        self.opt_attr(name).ok_or_else(|| Err::MissingAttribute {
            path: self.path.clone(),
            attribute: name.to_string(),
        })
    }

    pub fn parse_attr<T: FromStr>(&self, name: &str) -> Result<T, Err> {
        let text = self.attr(name)?;
        self.parse_one(text)
    }

    pub fn opt_parse_attr<T: FromStr>(&self, name: &str) -> Result<Option<T>, Err> {
        self.opt_attr(name)
            .map(|text| self.parse_one(text))
            .transpose()
    }

    pub fn text(&self) -> Cow<'a, str> {
        self.el.get_text().unwrap_or(Cow::Borrowed(""))
    }

    /// Parses the whitespace separated text content.
    pub fn parse_list<T: FromStr>(&self) -> Result<Vec<T>, Err> {
        self.text()
            .split_whitespace()
            .map(|s| self.parse_one(s))
            .collect()
    }

    fn parse_one<T: FromStr>(&self, text: &str) -> Result<T, Err> {
        text.trim().parse::<T>().map_err(|_| Err::InvalidNumber {
            path: self.path.clone(),
            text: text.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DOC: &str = r#"<?xml version="1.0"?>
<COLLADA xmlns="http://www.collada.org/2005/11/COLLADASchema" version="1.4.1">
  <asset><up_axis>Z_UP</up_axis></asset>
  <list count="3">1 2.5
    -3</list>
  <list count="x"/>
</COLLADA>"#;

    #[test]
    fn navigation_and_missing_paths() {
        let root = parse_document(DOC).unwrap();
        let node = Node::root(&root);
        assert_eq!(node.find("asset/up_axis").unwrap().text(), "Z_UP");
        match node.find("asset/contributor/authoring_tool") {
            Err(Err::MissingElement(path)) => assert_eq!(path, "COLLADA/asset/contributor"),
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn numbers_and_attributes() {
        let root = parse_document(DOC).unwrap();
        let node = Node::root(&root);
        let lists = node.children("list").collect::<Vec<_>>();
        assert_eq!(lists.len(), 2);
        assert_eq!(lists[0].parse_list::<f32>().unwrap(), vec![1.0, 2.5, -3.0]);
        assert_eq!(lists[0].parse_attr::<usize>("count").unwrap(), 3);
        assert!(matches!(lists[1].parse_attr::<usize>("count"), Err(Err::InvalidNumber { .. })));
        assert!(matches!(lists[1].attr("stride"), Err(Err::MissingAttribute { .. })));
        assert!(lists[1].parse_list::<f32>().unwrap().is_empty());
    }

    #[test]
    fn root_must_be_collada() {
        assert!(matches!(parse_document("<scene/>"), Err(Err::MissingElement(_))));
    }
}
