/// An anchor found on a section page that points at a downloadable file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceLink {
    pub name: String,
    pub href: String,
}
