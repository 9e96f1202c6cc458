/// Editor-assigned document version, monotonically increasing per document.
/// Doubles as the request token that orders checker responses.
#[derive(Clone, Copy, Default, Debug, Ord, PartialOrd, Eq, PartialEq)]
pub(crate) struct DocumentVersion(pub(crate) i32);

impl From<i32> for DocumentVersion {
    fn from(version: i32) -> Self {
        Self(version)
    }
}

impl std::fmt::Display for DocumentVersion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Clone, Debug)]
pub(crate) struct DocumentStorage {
    pub(crate) language_id: String,
    pub(crate) file_contents: String,
    pub(crate) version: DocumentVersion,
}
