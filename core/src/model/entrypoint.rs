//! The synthesized EntryPoint class and its live rendering.

use serde_json::{json, Map, Value};

use super::class::HydraClass;
use super::collection::{encode_component, HydraCollection};
use super::context::Context;
use super::operation::{HydraOperation, Method, TypeRef};
use super::property::{HydraClassProp, HydraLink};
use crate::namespace::Namespace;

const ENTRYPOINT_TITLE: &str = "EntryPoint";
const ENTRYPOINT_DESCRIPTION: &str = "The main entry point or homepage of the API.";

/// The EntryPoint: a class whose link properties lead to every endpoint
/// class and collection of the document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryPoint {
    /// The synthesized class, id `<namespace>EntryPoint`.
    pub class: HydraClass,
    /// Serving root the live rendering rewrites link ids onto.
    pub url: String,
}

impl EntryPoint {
    /// Creates an EntryPoint with no links.
    pub fn new(namespace: &Namespace) -> Self {
        let id = namespace.entrypoint_id();
        let mut class = HydraClass::new(namespace, ENTRYPOINT_TITLE, ENTRYPOINT_DESCRIPTION)
            .with_id(id.clone());
        class.add_supported_op(
            HydraOperation::described(
                "_:entry_point",
                Method::Get,
                "The APIs main entry point.",
                TypeRef::Null,
                TypeRef::Null,
            )
            .with_type(id),
        );
        Self {
            class,
            url: namespace.api_root().to_owned(),
        }
    }

    fn link_id(&self, path: &str) -> String {
        format!("{}/{}", self.class.id, path)
    }

    /// Links an endpoint class. Its operations are relabelled by title.
    pub fn add_class(&mut self, class: &HydraClass) {
        let mut link = HydraLink {
            id: self.link_id(&class.path),
            title: class.title.clone(),
            description: class.description.clone().unwrap_or_default(),
            domain: self.class.id.clone(),
            range: class.id.clone(),
            manages: None,
            supported_operation: Vec::new(),
        };
        for op in &class.supported_operation {
            link.add_supported_op(op.for_entrypoint_class());
        }
        let prop = HydraClassProp::new(link, class.title.to_lowercase(), true, false, false)
            .with_description(format!("The {} Class", class.title));
        self.class.add_supported_prop(prop);
    }

    /// Links an endpoint collection, carrying its `manages` block.
    pub fn add_collection(&mut self, collection: &HydraCollection) {
        let description = format!("The {} collection", collection.name);
        let mut link = HydraLink {
            id: self.link_id(&encode_component(&collection.path)),
            title: collection.name.clone(),
            description: description.clone(),
            domain: self.class.id.clone(),
            range: collection.id.clone(),
            manages: Some(collection.manages.clone()),
            supported_operation: Vec::new(),
        };
        for op in &collection.supported_operation {
            link.add_supported_op(op.for_entrypoint_collection());
        }
        let prop = HydraClassProp::new(link, collection.name.to_lowercase(), true, false, false)
            .with_description(description);
        self.class.add_supported_prop(prop);
    }

    /// The context served alongside the live EntryPoint.
    #[must_use]
    pub fn context(&self) -> Context<'_> {
        Context::EntryPoint(self)
    }

    /// Iterates over the links in insertion order.
    pub fn links(&self) -> impl Iterator<Item = &HydraLink> {
        self.class
            .supported_property
            .iter()
            .filter_map(HydraClassProp::as_link)
    }

    /// Canonical class rendering.
    #[must_use]
    pub fn generate(&self) -> Value {
        self.class.generate()
    }

    /// The live EntryPoint object served at the API root. Link ids are moved
    /// from the vocabulary onto the serving root.
    #[must_use]
    pub fn get(&self) -> Value {
        let mut object = Map::new();
        object.insert(
            "@context".to_owned(),
            json!(format!("{}/contexts/EntryPoint.jsonld", self.url)),
        );
        object.insert("@id".to_owned(), json!(self.url));
        object.insert("@type".to_owned(), json!("EntryPoint"));

        let mut collections = Vec::new();
        for prop in &self.class.supported_property {
            let Some(link) = prop.as_link() else {
                continue;
            };
            let live_id = link.id.replacen(&self.class.id, &self.url, 1);
            match &link.manages {
                Some(manages) => collections.push(json!({
                    "@id": live_id,
                    "title": prop.title,
                    "@type": "Collection",
                    "supportedOperation": link
                        .supported_operation
                        .iter()
                        .map(HydraOperation::generate)
                        .collect::<Vec<_>>(),
                    "manages": manages.to_json(),
                })),
                None => {
                    object.insert(link.title.clone(), json!(live_id));
                }
            }
        }
        if !collections.is_empty() {
            object.insert("collections".to_owned(), Value::Array(collections));
        }
        Value::Object(object)
    }
}
