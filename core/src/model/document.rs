//! The API Documentation: the root of the object model.

use serde_json::{json, Map, Value};

use super::class::HydraClass;
use super::collection::HydraCollection;
use super::context::Context;
use super::entrypoint::EntryPoint;
use super::iris::{HYDRA_COLLECTION, HYDRA_MEMBER, HYDRA_RESOURCE};
use super::property::HydraClassProp;
use super::status::HydraStatus;
use crate::error::Result;
use crate::namespace::{join_url, Namespace};

/// A class registered under its serving path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassEntry {
    /// Serving path.
    pub path: String,
    /// The class.
    pub class: HydraClass,
}

impl ClassEntry {
    /// The context served alongside instances of the class.
    #[must_use]
    pub fn context(&self) -> Context<'_> {
        Context::Class(&self.class)
    }
}

/// A collection registered under its serving path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CollectionEntry {
    /// Serving path.
    pub path: String,
    /// The collection.
    pub collection: HydraCollection,
}

impl CollectionEntry {
    /// The context served alongside the collection.
    #[must_use]
    pub fn context(&self) -> Context<'_> {
        Context::Collection(&self.collection)
    }
}

/// One API Documentation.
///
/// Classes and collections are keyed by path; registering under a path that
/// is already taken replaces the earlier entry in place.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiDoc {
    /// API name (the path segment under the base URL).
    pub api_name: String,
    /// Document title.
    pub title: String,
    /// Document description.
    pub description: String,
    /// Base URL the API is served under.
    pub base_url: String,
    /// Documentation name (e.g. `vocab`).
    pub doc_name: String,
    /// EntryPoint endpoint, relative to the base URL.
    pub entrypoint_endpoint: String,
    entrypoint_url: String,
    namespace: Namespace,
    context: Map<String, Value>,
    classes: Vec<ClassEntry>,
    collections: Vec<CollectionEntry>,
    other_classes: Vec<HydraClass>,
    possible_status: Vec<HydraStatus>,
    entrypoint: EntryPoint,
}

impl ApiDoc {
    /// Creates an empty document and fixes its namespace.
    ///
    /// # Errors
    ///
    /// Returns [`crate::HydraError::InvalidIri`] if `base_url` is not an
    /// absolute URL or the API name or entrypoint cannot be resolved against
    /// it.
    pub fn new(
        api_name: &str,
        title: &str,
        description: &str,
        entrypoint: &str,
        base_url: &str,
        doc_name: &str,
    ) -> Result<Self> {
        let namespace = Namespace::new(base_url, api_name, doc_name)?;
        let entrypoint_url = join_url(base_url, entrypoint)?;
        Ok(Self {
            api_name: api_name.to_owned(),
            title: title.to_owned(),
            description: description.to_owned(),
            base_url: base_url.to_owned(),
            doc_name: doc_name.to_owned(),
            entrypoint_endpoint: entrypoint.to_owned(),
            entrypoint_url,
            entrypoint: EntryPoint::new(&namespace),
            namespace,
            context: Map::new(),
            classes: Vec::new(),
            collections: Vec::new(),
            other_classes: Vec::new(),
            possible_status: Vec::new(),
        })
    }

    /// The canonical vocabulary namespace.
    #[must_use]
    pub fn namespace(&self) -> &Namespace {
        &self.namespace
    }

    /// The EntryPoint as of the last [`ApiDoc::gen_entrypoint`].
    #[must_use]
    pub fn entrypoint(&self) -> &EntryPoint {
        &self.entrypoint
    }

    /// Registered classes, in registration order.
    #[must_use]
    pub fn classes(&self) -> &[ClassEntry] {
        &self.classes
    }

    /// Registered collections, in registration order.
    #[must_use]
    pub fn collections(&self) -> &[CollectionEntry] {
        &self.collections
    }

    /// The base `Resource` and `Collection` classes, once added.
    #[must_use]
    pub fn other_classes(&self) -> &[HydraClass] {
        &self.other_classes
    }

    /// Document-level statuses.
    #[must_use]
    pub fn possible_status(&self) -> &[HydraStatus] {
        &self.possible_status
    }

    /// Looks up a class by path.
    #[must_use]
    pub fn class(&self, path: &str) -> Option<&HydraClass> {
        self.classes
            .iter()
            .find(|entry| entry.path == path)
            .map(|entry| &entry.class)
    }

    /// Looks up a collection by path.
    #[must_use]
    pub fn collection(&self, path: &str) -> Option<&HydraCollection> {
        self.collections
            .iter()
            .find(|entry| entry.path == path)
            .map(|entry| &entry.collection)
    }

    /// The document-wide context.
    #[must_use]
    pub fn context(&self) -> Context<'_> {
        Context::Global(Some(&self.context))
    }

    /// Adds an entry to the document-wide context.
    pub fn add_to_context(&mut self, key: impl Into<String>, value: Value) {
        self.context.insert(key.into(), value);
    }

    /// Registers a class under its path.
    pub fn add_supported_class(&mut self, class: HydraClass) {
        let path = class.path.clone();
        match self.classes.iter_mut().find(|entry| entry.path == path) {
            Some(entry) => entry.class = class,
            None => self.classes.push(ClassEntry { path, class }),
        }
    }

    /// Registers a collection under its path.
    pub fn add_supported_collection(&mut self, collection: HydraCollection) {
        let path = collection.path.clone();
        match self.collections.iter_mut().find(|entry| entry.path == path) {
            Some(entry) => entry.collection = collection,
            None => self.collections.push(CollectionEntry { path, collection }),
        }
    }

    /// Adds a document-level status.
    pub fn add_possible_status(&mut self, status: HydraStatus) {
        self.possible_status.push(status);
    }

    /// Adds the `hydra:Resource` base class.
    pub fn add_base_resource(&mut self) {
        if self.has_other_class(HYDRA_RESOURCE) {
            return;
        }
        self.other_classes
            .push(HydraClass::base(HYDRA_RESOURCE, "Resource"));
    }

    /// Adds the `hydra:Collection` base class with its `members` property.
    pub fn add_base_collection(&mut self) {
        if self.has_other_class(HYDRA_COLLECTION) {
            return;
        }
        let mut collection = HydraClass::base(HYDRA_COLLECTION, "Collection");
        collection.add_supported_prop(HydraClassProp::new(
            HYDRA_MEMBER,
            "members",
            false,
            false,
            false,
        ));
        self.other_classes.push(collection);
    }

    fn has_other_class(&self, id: &str) -> bool {
        self.other_classes.iter().any(|class| class.id == id)
    }

    /// Rebuilds the EntryPoint from the endpoint classes and collections
    /// currently registered.
    pub fn gen_entrypoint(&mut self) {
        let mut entrypoint = EntryPoint::new(&self.namespace);
        for entry in self.classes.iter().filter(|entry| entry.class.endpoint) {
            entrypoint.add_class(&entry.class);
        }
        for entry in self
            .collections
            .iter()
            .filter(|entry| entry.collection.endpoint)
        {
            entrypoint.add_collection(&entry.collection);
        }
        self.entrypoint = entrypoint;
    }

    /// Renders the canonical API Documentation.
    #[must_use]
    pub fn generate(&self) -> Value {
        let supported_class: Vec<Value> = self
            .classes
            .iter()
            .map(|entry| entry.class.generate())
            .chain(self.other_classes.iter().map(HydraClass::generate))
            .chain(self.collections.iter().map(|entry| entry.collection.generate()))
            .chain(std::iter::once(self.entrypoint.generate()))
            .collect();
        json!({
            "@context": self.context().generate(),
            "@id": format!("{}/{}", self.namespace.api_root(), self.doc_name),
            "@type": "ApiDocumentation",
            "title": self.title,
            "description": self.description,
            "entrypoint": self.entrypoint_url,
            "supportedClass": supported_class,
            "possibleStatus": self
                .possible_status
                .iter()
                .map(HydraStatus::generate)
                .collect::<Vec<_>>(),
        })
    }
}
