//! Builds an [`ApiDoc`] from a compact JSON-LD API Documentation.
//!
//! The compact document is expanded by an [`Expander`], the namespace is
//! fixed from the document's `@id` and `entrypoint` (or from
//! [`BuildOptions`]), and every supported class is classified as a plain
//! class or a collection, endpoint or not. Endpoints are the ranges of the
//! `hydra:Link` properties found on the supported classes.

mod literal;
mod nodes;

use std::collections::{HashMap, HashSet};

use percent_encoding::percent_decode_str;
use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, info, warn};
use url::Url;

use crate::error::{HydraError, Location, Result};
use crate::expand::{Expander, JsonLdExpander};
use crate::model::iris::{
    HYDRA_COLLECTION, HYDRA_ERROR, HYDRA_LINK, HYDRA_RESOURCE, RDFS_DOMAIN, RDFS_RANGE,
    RDFS_SUBCLASS_OF,
};
use crate::model::{
    ApiDoc, CollectionOps, HydraClass, HydraClassProp, HydraCollection, HydraLink,
    HydraOperation, HydraStatus, Manages, Method, PropertyValue, TypeRef,
};
use crate::namespace::{local_name, Namespace};

pub use literal::decode_literal;
use literal::decode_status_code;
use nodes::{hydra, text, Node};

const DEFAULT_TITLE: &str = "The default title";
const DEFAULT_DESCRIPTION: &str = "This is the default description";
const DEFAULT_DOC_NAME: &str = "vocab";
const ENTRYPOINT_MARKER: &str = "EntryPoint";

/// Overrides for the serving layout derived from the document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct BuildOptions {
    /// Base URL the API is served under, replacing the origin of the
    /// document `@id`.
    pub server_url: Option<String>,
    /// API name, replacing the path of the document `entrypoint`.
    pub api_name: Option<String>,
}

/// Builds a document using the default [`JsonLdExpander`].
///
/// # Errors
///
/// See [`build_with`].
pub fn build(document: &Value, options: &BuildOptions) -> Result<ApiDoc> {
    build_with(&JsonLdExpander::default(), document, options)
}

/// Builds a document using `expander` for JSON-LD expansion.
///
/// # Errors
///
/// - [`HydraError::MissingRequiredKey`] if the document or any class,
///   property, link, operation or status lacks a required key;
/// - [`HydraError::NoEntryPointFound`] if no supported class is an
///   EntryPoint;
/// - [`HydraError::InvalidLiteral`] and [`HydraError::UnsupportedMethod`] for
///   malformed values;
/// - [`HydraError::InvalidIri`] if the serving layout cannot be derived;
/// - any error returned by `expander`, unchanged.
pub fn build_with(
    expander: &dyn Expander,
    document: &Value,
    options: &BuildOptions,
) -> Result<ApiDoc> {
    for key in ["@context", "@id", "@type"] {
        if document.get(key).is_none() {
            return Err(HydraError::missing(Location::Doc, key));
        }
    }

    let expanded = expander.expand(document)?;
    let root = expanded
        .iter()
        .find(|node| node.is_object())
        .ok_or_else(|| HydraError::Expansion("expansion produced no node".to_owned()))?;
    let root = Node::new(root, Location::Doc)?;

    let id = root.require_id()?;
    let entrypoint = root.require_string(hydra!("entrypoint"))?;
    let title = root
        .string(hydra!("title"))
        .unwrap_or_else(|| DEFAULT_TITLE.to_owned());
    let description = root
        .string(hydra!("description"))
        .unwrap_or_else(|| DEFAULT_DESCRIPTION.to_owned());

    let layout = Layout::derive(id, &entrypoint, options)?;
    debug!(
        base_url = %layout.base_url,
        api_name = %layout.api_name,
        doc_name = %layout.doc_name,
        "serving layout"
    );
    let mut doc = ApiDoc::new(
        &layout.api_name,
        &title,
        &description,
        &layout.api_name,
        &layout.base_url,
        &layout.doc_name,
    )?;
    let ns = doc.namespace().clone();

    let classes: Vec<Node<'_>> = root
        .nodes(hydra!("supportedClass"), Location::Class)
        .collect();
    for class in &classes {
        class.require_id()?;
    }
    if !classes.iter().any(|class| is_entrypoint(*class)) {
        return Err(HydraError::NoEntryPointFound);
    }

    let endpoints = Endpoints::scan(&ns, &classes);

    let mut endpoint_classes = Vec::new();
    let mut plain_classes = Vec::new();
    let mut collections = Vec::new();
    for class in &classes {
        let source_id = class.require_id()?;
        if source_id == HYDRA_RESOURCE || source_id == HYDRA_COLLECTION {
            debug!(id = source_id, "skipping base class");
            continue;
        }
        if is_entrypoint(*class) {
            debug!(id = source_id, "reserving EntryPoint id");
            continue;
        }
        let id = ns.check_namespace(source_id);
        let endpoint = endpoints.contains(&id);
        let path = endpoints.path(&id);
        if class.has(hydra!("manages")) {
            if !endpoint {
                debug!(id = %id, "skipping collection not linked as an endpoint");
                continue;
            }
            let collection = create_collection(&ns, *class, &id)?
                .with_path(path)
                .with_endpoint(true);
            debug!(id = %collection.id, "collection");
            collections.push(collection);
        } else {
            let built = create_class(&ns, *class, &id)?
                .with_path(path)
                .with_endpoint(endpoint);
            debug!(id = %built.id, endpoint, "class");
            if endpoint {
                endpoint_classes.push(built);
            } else {
                plain_classes.push(built);
            }
        }
    }

    match document.get("@context") {
        Some(Value::Object(context)) => {
            for (key, value) in context {
                doc.add_to_context(key.clone(), value.clone());
            }
        }
        Some(Value::Array(contexts)) => {
            for context in contexts.iter().filter_map(Value::as_object) {
                for (key, value) in context {
                    doc.add_to_context(key.clone(), value.clone());
                }
            }
        }
        _ => warn!("document @context is not an object; no entries carried over"),
    }

    let class_count = endpoint_classes.len() + plain_classes.len();
    let collection_count = collections.len();
    for class in endpoint_classes.into_iter().chain(plain_classes) {
        doc.add_supported_class(class);
    }
    for collection in collections {
        doc.add_supported_collection(collection);
    }
    for status in root.nodes(hydra!("possibleStatus"), Location::Status) {
        doc.add_possible_status(create_status(&ns, status)?);
    }
    doc.add_base_resource();
    doc.add_base_collection();
    doc.gen_entrypoint();

    info!(
        namespace = ns.base(),
        classes = class_count,
        collections = collection_count,
        links = doc.entrypoint().links().count(),
        "built API Documentation"
    );
    Ok(doc)
}

/// Base URL, API name and documentation name of the served API.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Layout {
    base_url: String,
    api_name: String,
    doc_name: String,
}

impl Layout {
    /// `http://host/api/vocab` with entrypoint `http://host/api` serves API
    /// `api` from `http://host/` with documentation `vocab`.
    fn derive(id: &str, entrypoint: &str, options: &BuildOptions) -> Result<Self> {
        let doc_url = Url::parse(id).map_err(|source| HydraError::InvalidIri {
            iri: id.to_owned(),
            source,
        })?;
        let doc_name = doc_url
            .path_segments()
            .and_then(|segments| segments.rev().find(|s| !s.is_empty()))
            .unwrap_or(DEFAULT_DOC_NAME)
            .to_owned();
        let origin = doc_url.join("/").map_err(|source| HydraError::InvalidIri {
            iri: id.to_owned(),
            source,
        })?;
        let api_name = match Url::parse(entrypoint) {
            Ok(url) => url.path().trim_matches('/').to_owned(),
            Err(_) => entrypoint.trim_matches('/').to_owned(),
        };
        Ok(Self {
            base_url: options
                .server_url
                .clone()
                .unwrap_or_else(|| origin.to_string()),
            api_name: options.api_name.clone().unwrap_or(api_name),
            doc_name,
        })
    }
}

fn is_entrypoint(class: Node<'_>) -> bool {
    class.id().is_some_and(|id| id.contains(ENTRYPOINT_MARKER))
}

/// Canonical ranges of every Link property on the supported classes, with the
/// serving path of those linked from the EntryPoint.
#[derive(Debug, Default)]
struct Endpoints {
    ranges: HashSet<String>,
    paths: HashMap<String, String>,
}

impl Endpoints {
    fn scan(ns: &Namespace, classes: &[Node<'_>]) -> Self {
        let mut endpoints = Self::default();
        for class in classes {
            let on_entrypoint = is_entrypoint(*class);
            for prop in class.nodes(hydra!("supportedProperty"), Location::Property) {
                let links = prop
                    .nodes(hydra!("property"), Location::Link)
                    .filter(|link| link.has_type(HYDRA_LINK));
                for link in links {
                    let Some(range) = link.string(RDFS_RANGE) else {
                        continue;
                    };
                    let range = ns.check_namespace(&range);
                    if on_entrypoint {
                        if let Some(path) = link.id().and_then(entrypoint_path) {
                            endpoints.paths.insert(range.clone(), path);
                        }
                    }
                    endpoints.ranges.insert(range);
                }
            }
        }
        endpoints
    }

    fn contains(&self, id: &str) -> bool {
        self.ranges.contains(id)
    }

    /// The serving path of `id`; empty when the EntryPoint does not name one.
    fn path(&self, id: &str) -> &str {
        self.paths.get(id).map_or("", String::as_str)
    }
}

/// The path an EntryPoint link id serves, e.g. `drones` for
/// `.../vocab?resource=EntryPoint/drones`.
fn entrypoint_path(link_id: &str) -> Option<String> {
    let (_, path) = link_id.split_once("EntryPoint/")?;
    let path = percent_decode_str(path).decode_utf8().ok()?;
    (!path.is_empty()).then(|| path.into_owned())
}

fn create_class(ns: &Namespace, node: Node<'_>, id: &str) -> Result<HydraClass> {
    let title = node
        .string(hydra!("title"))
        .unwrap_or_else(|| local_name(id).to_owned());
    let description = node
        .string(hydra!("description"))
        .unwrap_or_else(|| DEFAULT_DESCRIPTION.to_owned());
    let mut class = HydraClass::new(ns, &title, description).with_id(id);
    if let Some(parent) = node.string(RDFS_SUBCLASS_OF) {
        class = class.with_parent(ns.check_namespace(&parent));
    }
    for prop in node.nodes(hydra!("supportedProperty"), Location::Property) {
        class.add_supported_prop(create_property(ns, prop)?);
    }
    for op in node.nodes(hydra!("supportedOperation"), Location::Operation) {
        class.add_supported_op(create_operation(ns, op)?);
    }
    Ok(class)
}

fn create_collection(ns: &Namespace, node: Node<'_>, id: &str) -> Result<HydraCollection> {
    let name = node
        .string(hydra!("title"))
        .unwrap_or_else(|| local_name(id).to_owned());
    let description = node
        .string(hydra!("description"))
        .unwrap_or_else(|| DEFAULT_DESCRIPTION.to_owned());
    let manages = node
        .node(hydra!("manages"), Location::Collection)
        .ok_or_else(|| HydraError::missing(node.location(), "manages"))?;
    let manages = Manages {
        property: manages.string(hydra!("property")).map(|p| ns.check_namespace(&p)),
        object: manages.string(hydra!("object")).map(|o| ns.check_namespace(&o)),
        subject: manages.string(hydra!("subject")).map(|s| ns.check_namespace(&s)),
    };

    let mut ops = CollectionOps::default();
    let mut listed = false;
    for op in node.nodes(hydra!("supportedOperation"), Location::Operation) {
        let method: Method = op.require_string(hydra!("method"))?.parse()?;
        listed = true;
        match method {
            Method::Get => ops.get = true,
            Method::Put => ops.post = true,
            Method::Post => ops.put = true,
            Method::Delete => ops.delete = true,
        }
    }
    if !listed {
        ops = CollectionOps::all();
    }

    Ok(HydraCollection::new(ns, &name, description, manages, ops).with_id(id))
}

fn create_property(ns: &Namespace, node: Node<'_>) -> Result<HydraClassProp> {
    let property = node.require(hydra!("property"))?;
    let title = node.require_string(hydra!("title"))?;
    let readable = flag(node, hydra!("readable"))?;
    let writeable = flag(node, hydra!("writeable"))?;
    let required = flag(node, hydra!("required"))?;

    let link = Node::new(property, Location::Link)
        .ok()
        .filter(|candidate| candidate.has_type(HYDRA_LINK));
    let value = match link {
        Some(link) => PropertyValue::Link(create_link(ns, link)?),
        None => {
            let iri = text(property)
                .ok_or_else(|| HydraError::missing(Location::Property, "property"))?;
            PropertyValue::Plain(ns.check_namespace(&iri))
        }
    };

    let mut prop = HydraClassProp::new(value, title, readable, writeable, required);
    if let Some(description) = node.string(hydra!("description")) {
        prop = prop.with_description(description);
    }
    Ok(prop)
}

/// Reads a required boolean-like flag. The `"null"` token reads as `false`.
/// A JSON `null` is dropped by expansion, so it counts as a missing key.
fn flag(node: Node<'_>, key: &str) -> Result<bool> {
    let value = node
        .first(key)
        .ok_or_else(|| HydraError::missing(node.location(), local_name(key)))?;
    Ok(decode_literal(value)?.unwrap_or(false))
}

fn create_link(ns: &Namespace, node: Node<'_>) -> Result<HydraLink> {
    let id = node.require_id()?;
    let title = node.require_string(hydra!("title"))?;
    let description = node.string(hydra!("description")).unwrap_or_default();
    let domain = node.require_string(RDFS_DOMAIN)?;
    let range = node.require_string(RDFS_RANGE)?;
    let mut link = HydraLink::new(
        ns,
        id,
        title,
        description,
        ns.check_namespace(&domain),
        ns.check_namespace(&range),
    );
    for op in node.nodes(hydra!("supportedOperation"), Location::Operation) {
        link.add_supported_op(create_operation(ns, op)?);
    }
    Ok(link)
}

fn create_operation(ns: &Namespace, node: Node<'_>) -> Result<HydraOperation> {
    let title = node.require_string(hydra!("title"))?;
    let method: Method = node.require_string(hydra!("method"))?.parse()?;
    let type_ref = |key: &str| {
        node.string(key)
            .map(|iri| TypeRef::from_iri(ns.check_namespace(&iri)))
            .unwrap_or_default()
    };
    let expects = type_ref(hydra!("expects"));
    let returns = type_ref(hydra!("returns"));
    let mut possible_status = Vec::new();
    for status in node.nodes(hydra!("possibleStatus"), Location::Status) {
        possible_status.push(create_status(ns, status)?);
    }
    Ok(HydraOperation::new(title, method, expects, returns)
        .with_headers(
            node.strings(hydra!("expectsHeader")),
            node.strings(hydra!("returnsHeader")),
        )
        .with_status(possible_status))
}

fn create_status(ns: &Namespace, node: Node<'_>) -> Result<HydraStatus> {
    let code = decode_status_code(node.require(hydra!("statusCode"))?)?;
    let description = node.require_string(hydra!("description"))?;
    let mut status = if node.has_type(HYDRA_ERROR) {
        HydraStatus::error(code, description)
    } else {
        HydraStatus::new(code, description)
    };
    if let Some(title) = node.string(hydra!("title")) {
        status = status.with_title(title);
    }
    if let Some(id) = node.id().filter(|id| !id.starts_with("_:")) {
        status = status.with_id(ns.check_namespace(id));
    }
    Ok(status)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn options() -> BuildOptions {
        BuildOptions::default()
    }

    #[test]
    fn layout_from_document() {
        let layout = Layout::derive(
            "http://localhost:8080/api/vocab",
            "http://localhost:8080/api",
            &options(),
        )
        .expect("layout");
        assert_eq!(
            layout,
            Layout {
                base_url: "http://localhost:8080/".to_owned(),
                api_name: "api".to_owned(),
                doc_name: "vocab".to_owned(),
            }
        );
    }

    #[test]
    fn layout_overrides() {
        let layout = Layout::derive(
            "http://localhost:8080/api/vocab",
            "http://localhost:8080/api",
            &BuildOptions {
                server_url: Some("http://hydrus.com/".to_owned()),
                api_name: Some("test_api".to_owned()),
            },
        )
        .expect("layout");
        assert_eq!(layout.base_url, "http://hydrus.com/");
        assert_eq!(layout.api_name, "test_api");
        assert_eq!(layout.doc_name, "vocab");
    }

    #[test]
    fn relative_document_id_is_rejected() {
        let err = Layout::derive("api/vocab", "api", &options());
        assert!(matches!(err, Err(HydraError::InvalidIri { .. })));
    }

    #[test]
    fn entrypoint_paths_are_decoded() {
        assert_eq!(
            entrypoint_path("http://a/vocab?resource=EntryPoint/drone%20logs").as_deref(),
            Some("drone logs")
        );
        assert_eq!(entrypoint_path("http://a/vocab?resource=EntryPoint/"), None);
        assert_eq!(entrypoint_path("http://a/vocab?resource=Drone"), None);
    }

    #[test]
    fn missing_document_keys() {
        for key in ["@context", "@id", "@type"] {
            let mut document = json!({
                "@context": {},
                "@id": "http://a/api/vocab",
                "@type": "ApiDocumentation"
            });
            if let Some(fields) = document.as_object_mut() {
                fields.remove(key);
            }
            let err = build(&document, &options()).expect_err("key is required");
            assert_eq!(
                err.to_string(),
                format!("The API Documentation must have [{key}]")
            );
        }
    }

    #[test]
    fn expander_errors_propagate_unchanged() {
        let failing = |_: &Value| -> Result<Vec<Value>> {
            Err(HydraError::Expansion("loader offline".to_owned()))
        };
        let document = json!({ "@context": {}, "@id": "http://a/api/vocab", "@type": "x" });
        let err = build_with(&failing, &document, &options()).expect_err("expansion fails");
        assert!(matches!(err, HydraError::Expansion(msg) if msg == "loader offline"));
    }
}
