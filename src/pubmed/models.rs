use super::document::XmlElement;

/// Identifiers returned by ESearch, in response order
pub type IdentifierList = Vec<String>;

/// Parsed EFetch response, one root per request batch
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ArticleDocument {
    roots: Vec<XmlElement>,
}

impl ArticleDocument {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_root(root: XmlElement) -> Self {
        Self { roots: vec![root] }
    }

    /// One root per fetched batch, in request order
    pub fn from_roots(roots: Vec<XmlElement>) -> Self {
        Self { roots }
    }

    pub(crate) fn push_root(&mut self, root: XmlElement) {
        self.roots.push(root);
    }

    pub fn roots(&self) -> &[XmlElement] {
        &self.roots
    }

    pub fn is_empty(&self) -> bool {
        self.roots.is_empty()
    }

    /// Elements named `name` below any root, batch by batch in document order
    pub fn find_all<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a XmlElement> + 'a {
        self.roots.iter().flat_map(move |root| root.find_all(name))
    }
}
