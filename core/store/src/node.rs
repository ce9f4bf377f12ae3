//! The abstract input tree consumed by schema construction and ingestion.

/// A node of an already parsed document: a tag, named attributes, text
/// content and ordered child nodes.
///
/// Implemented by `itemtree_xml::XmlElement`; any other source of tagged,
/// attributed trees can implement it too.
pub trait AttributedNode {
    fn tag(&self) -> &str;

    /// Value of the first attribute called `name`.
    fn attribute(&self, name: &str) -> Option<&str>;

    /// Text content directly inside this node.
    fn text(&self) -> &str;

    /// Child nodes in document order.
    fn children(&self) -> impl Iterator<Item = &Self>;

    /// Child nodes whose tag equals `tag`, in document order.
    fn children_tagged<'a>(&'a self, tag: &'a str) -> impl Iterator<Item = &'a Self> {
        self.children().filter(move |child| child.tag() == tag)
    }
}
