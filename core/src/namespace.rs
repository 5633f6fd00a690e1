//! The canonical vocabulary namespace of one API Documentation.
//!
//! Every resource identifier produced for a document lives under a single
//! base of the form `<base>/<api-name>/<doc-name>?resource=`. A [`Namespace`]
//! is fixed once when the document is constructed and is passed explicitly
//! to every id-producing call, so independent builds never share state.

use url::Url;

use crate::error::{HydraError, Result};

/// Marker separating the vocabulary location from a local resource name.
pub const RESOURCE_MARKER: &str = "?resource=";

/// Sentinel encoding "no expected/returned body". Never rewritten.
pub const NULL_SENTINEL: &str = "null";

/// Canonical vocabulary namespace for one document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Namespace {
    base: String,
    api_root: String,
    doc_name: String,
}

impl Namespace {
    /// Builds the namespace `<urljoin(base_url, api_name)>/<doc_name>?resource=`.
    ///
    /// # Errors
    ///
    /// Returns [`HydraError::InvalidIri`] if `base_url` is not an absolute URL
    /// or `api_name` cannot be resolved against it.
    pub fn new(base_url: &str, api_name: &str, doc_name: &str) -> Result<Self> {
        let api_root = join_url(base_url, api_name)?;
        Ok(Self {
            base: format!("{api_root}/{doc_name}{RESOURCE_MARKER}"),
            api_root,
            doc_name: doc_name.to_owned(),
        })
    }

    /// The namespace base, ending in `?resource=`.
    #[must_use]
    pub fn base(&self) -> &str {
        &self.base
    }

    /// The serving root `<base>/<api-name>`, without a trailing slash.
    #[must_use]
    pub fn api_root(&self) -> &str {
        &self.api_root
    }

    /// The documentation name (e.g. `vocab`).
    #[must_use]
    pub fn doc_name(&self) -> &str {
        &self.doc_name
    }

    /// Places a local resource name under the namespace.
    #[must_use]
    pub fn resource(&self, local: &str) -> String {
        format!("{}{}", self.base, local)
    }

    /// The id reserved for the synthesized EntryPoint.
    #[must_use]
    pub fn entrypoint_id(&self) -> String {
        self.resource("EntryPoint")
    }

    /// Canonicalizes `id` into this namespace.
    ///
    /// - ids already under the namespace and the `"null"` sentinel are
    ///   returned unchanged;
    /// - ids carrying `?resource=` keep only the local name after the marker;
    /// - fragment ids on this document's own vocabulary location
    ///   (`.../<doc-name>#Name`) keep only the fragment;
    /// - anything else is foreign and returned unchanged.
    ///
    /// Applying it twice yields the same id as applying it once.
    #[must_use]
    pub fn check_namespace(&self, id: &str) -> String {
        if id == NULL_SENTINEL || id.starts_with(&self.base) {
            return id.to_owned();
        }
        if let Some((_, local)) = id.split_once(RESOURCE_MARKER) {
            return self.resource(local);
        }
        if let Some((location, fragment)) = id.rsplit_once('#') {
            let on_own_vocab = location.rsplit('/').next() == Some(self.doc_name.as_str());
            if on_own_vocab && !fragment.is_empty() {
                return self.resource(fragment);
            }
        }
        id.to_owned()
    }
}

/// Resolves `reference` against `base` the way a browser would and strips the
/// trailing slash.
///
/// # Errors
///
/// Returns [`HydraError::InvalidIri`] if either side fails to parse.
pub fn join_url(base: &str, reference: &str) -> Result<String> {
    let url = Url::parse(base).map_err(|source| HydraError::InvalidIri {
        iri: base.to_owned(),
        source,
    })?;
    let joined = url.join(reference).map_err(|source| HydraError::InvalidIri {
        iri: reference.to_owned(),
        source,
    })?;
    Ok(joined.as_str().trim_end_matches('/').to_owned())
}

/// Returns the local name of an id: the text after `?resource=`, `#` or the
/// last `/`.
#[must_use]
pub fn local_name(id: &str) -> &str {
    if let Some((_, local)) = id.split_once(RESOURCE_MARKER) {
        return local;
    }
    id.rsplit(|c| c == '#' || c == '/').next().unwrap_or(id)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hydrus() -> Namespace {
        Namespace::new("http://hydrus.com/", "test_api", "vocab").expect("valid base")
    }

    #[test]
    fn base_has_resource_marker() {
        let ns = hydrus();
        assert_eq!(ns.base(), "http://hydrus.com/test_api/vocab?resource=");
        assert_eq!(ns.api_root(), "http://hydrus.com/test_api");
        assert_eq!(
            ns.entrypoint_id(),
            "http://hydrus.com/test_api/vocab?resource=EntryPoint"
        );
    }

    #[test]
    fn base_without_trailing_slash() {
        let ns = Namespace::new("http://hydrus.com", "test_api", "vocab").expect("valid base");
        assert_eq!(ns.base(), "http://hydrus.com/test_api/vocab?resource=");
    }

    #[test]
    fn foreign_resource_marker_is_rewritten() {
        assert_eq!(
            hydrus().check_namespace("https://x.org/y?resource=Foo"),
            "http://hydrus.com/test_api/vocab?resource=Foo"
        );
    }

    #[test]
    fn own_vocab_fragment_is_rewritten() {
        assert_eq!(
            hydrus().check_namespace("http://localhost:8080/api/vocab#Drone"),
            "http://hydrus.com/test_api/vocab?resource=Drone"
        );
    }

    #[test]
    fn foreign_iris_are_untouched() {
        let ns = hydrus();
        for id in [
            "http://schema.org/Text",
            "http://www.w3.org/ns/hydra/core#Collection",
            "http://www.w3.org/1999/02/22-rdf-syntax-ns#type",
            "",
        ] {
            assert_eq!(ns.check_namespace(id), id);
        }
    }

    #[test]
    fn null_sentinel_passes_through() {
        assert_eq!(hydrus().check_namespace("null"), "null");
    }

    #[test]
    fn canonical_ids_are_stable() {
        let ns = hydrus();
        let once = ns.check_namespace("https://x.org/y?resource=Foo");
        assert_eq!(ns.check_namespace(&once), once);
    }

    #[test]
    fn invalid_base_is_rejected() {
        let err = Namespace::new("not a url", "api", "vocab");
        assert!(matches!(err, Err(HydraError::InvalidIri { .. })));
    }

    #[test]
    fn local_names() {
        assert_eq!(local_name("http://a/vocab?resource=Drone"), "Drone");
        assert_eq!(local_name("http://a/vocab#Drone"), "Drone");
        assert_eq!(local_name("http://a/vocab/Drone"), "Drone");
        assert_eq!(local_name("Drone"), "Drone");
    }
}
