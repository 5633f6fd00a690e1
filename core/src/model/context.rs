//! `@context` rendering, one variant per rendering scope.

use serde_json::{json, Map, Value};

use super::class::HydraClass;
use super::collection::HydraCollection;
use super::entrypoint::EntryPoint;
use super::iris::{HYDRA, HYDRA_MEMBER, SCHEMA_OBJECT};

/// The `@context` of one rendering scope.
#[derive(Debug, Clone, Copy)]
pub enum Context<'a> {
    /// The document-wide Hydra context, extended with the document's own
    /// entries (which win on conflicts).
    Global(Option<&'a Map<String, Value>>),
    /// The context served alongside instances of a class.
    Class(&'a HydraClass),
    /// The context served alongside a collection.
    Collection(&'a HydraCollection),
    /// The context served alongside the live EntryPoint.
    EntryPoint(&'a EntryPoint),
}

impl Context<'_> {
    /// Renders the context object.
    #[must_use]
    pub fn generate(&self) -> Value {
        match self {
            Context::Global(extra) => {
                let mut context = hydra_context();
                if let Some(extra) = extra {
                    for (key, value) in extra.iter() {
                        context.insert(key.clone(), value.clone());
                    }
                }
                Value::Object(context)
            }
            Context::Class(class) => {
                let mut context = Map::new();
                context.insert("hydra".to_owned(), json!(HYDRA));
                context.insert("members".to_owned(), json!(HYDRA_MEMBER));
                context.insert("object".to_owned(), json!(SCHEMA_OBJECT));
                context.insert(class.title.clone(), json!(class.id));
                for prop in &class.supported_property {
                    context.insert(prop.title.clone(), json!(prop.iri()));
                }
                Value::Object(context)
            }
            Context::Collection(collection) => json!({
                "hydra": HYDRA,
                "members": HYDRA_MEMBER,
                collection.name.as_str(): collection.id,
            }),
            Context::EntryPoint(entrypoint) => {
                let mut context = Map::new();
                context.insert("EntryPoint".to_owned(), json!(entrypoint.class.id));
                for link in entrypoint.links() {
                    context.insert(
                        link.title.clone(),
                        json!({ "@id": link.id, "@type": "@id" }),
                    );
                }
                Value::Object(context)
            }
        }
    }
}

fn id_term(id: &str) -> Value {
    json!({ "@id": id, "@type": "@id" })
}

/// The fixed Hydra term table every API Documentation is rendered against.
pub(crate) fn hydra_context() -> Map<String, Value> {
    let entries = [
        ("hydra", json!(HYDRA)),
        ("property", id_term("hydra:property")),
        ("supportedClass", json!("hydra:supportedClass")),
        ("supportedProperty", json!("hydra:supportedProperty")),
        ("supportedOperation", json!("hydra:supportedOperation")),
        ("label", json!("rdfs:label")),
        ("rdf", json!("http://www.w3.org/1999/02/22-rdf-syntax-ns#")),
        ("xsd", json!("https://www.w3.org/TR/xmlschema-2/#")),
        ("domain", id_term("rdfs:domain")),
        ("ApiDocumentation", json!("hydra:ApiDocumentation")),
        ("range", id_term("rdfs:range")),
        ("rdfs", json!("http://www.w3.org/2000/01/rdf-schema#")),
        ("title", json!("hydra:title")),
        ("expects", id_term("hydra:expects")),
        ("returns", id_term("hydra:returns")),
        ("entrypoint", id_term("hydra:entrypoint")),
        ("object", id_term("hydra:object")),
        ("subject", id_term("hydra:subject")),
        ("readable", json!("hydra:readable")),
        ("writeable", json!("hydra:writeable")),
        ("possibleStatus", json!("hydra:possibleStatus")),
        ("required", json!("hydra:required")),
        ("method", json!("hydra:method")),
        ("statusCode", json!("hydra:statusCode")),
        ("description", json!("hydra:description")),
        ("expectsHeader", json!("hydra:expectsHeader")),
        ("returnsHeader", json!("hydra:returnsHeader")),
        ("manages", json!("hydra:manages")),
        ("subClassOf", id_term("rdfs:subClassOf")),
        ("search", json!("hydra:search")),
    ];
    entries
        .into_iter()
        .map(|(key, value)| (key.to_owned(), value))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::collection::{CollectionOps, Manages};
    use crate::model::property::HydraClassProp;
    use crate::namespace::Namespace;

    fn hydrus() -> Namespace {
        Namespace::new("http://hydrus.com/", "test_api", "vocab").expect("valid base")
    }

    #[test]
    fn global_context_has_thirty_terms() {
        let context = Context::Global(None).generate();
        let map = context.as_object().expect("object");
        assert_eq!(map.len(), 30);
        assert_eq!(map["xsd"], "https://www.w3.org/TR/xmlschema-2/#");
        assert_eq!(map["search"], "hydra:search");
        assert_eq!(map["subClassOf"], json!({"@id": "rdfs:subClassOf", "@type": "@id"}));
        assert_eq!(map["returns"], json!({"@id": "hydra:returns", "@type": "@id"}));
    }

    #[test]
    fn document_entries_extend_and_override() {
        let mut extra = Map::new();
        extra.insert("vocab".to_owned(), json!("http://hydrus.com/test_api/vocab?resource="));
        extra.insert("title".to_owned(), json!("http://purl.org/dc/terms/title"));
        let context = Context::Global(Some(&extra)).generate();
        assert_eq!(context["vocab"], "http://hydrus.com/test_api/vocab?resource=");
        assert_eq!(context["title"], "http://purl.org/dc/terms/title");
        assert_eq!(context.as_object().map(Map::len), Some(31));
    }

    #[test]
    fn class_context() {
        let class = HydraClass::new(&hydrus(), "dummyClass", "A dummyClass for demo");
        assert_eq!(
            Context::Class(&class).generate(),
            json!({
                "hydra": "http://www.w3.org/ns/hydra/core#",
                "members": "http://www.w3.org/ns/hydra/core#member",
                "object": "http://schema.org/object",
                "dummyClass": "http://hydrus.com/test_api/vocab?resource=dummyClass"
            })
        );
    }

    #[test]
    fn class_context_lists_property_titles() {
        let mut class = HydraClass::new(&hydrus(), "Drone", "A drone");
        class.add_supported_prop(HydraClassProp::new("http://schema.org/name", "name", true, true, false));
        assert_eq!(Context::Class(&class).generate()["name"], "http://schema.org/name");
    }

    #[test]
    fn collection_context() {
        let collection = HydraCollection::new(
            &hydrus(),
            "dummyclasses",
            "This collection comprises of instances of dummyClass",
            Manages::default(),
            CollectionOps::default(),
        );
        assert_eq!(
            Context::Collection(&collection).generate(),
            json!({
                "hydra": "http://www.w3.org/ns/hydra/core#",
                "members": "http://www.w3.org/ns/hydra/core#member",
                "dummyclasses": "http://hydrus.com/test_api/vocab?resource=dummyclasses"
            })
        );
    }

    #[test]
    fn empty_entrypoint_context() {
        let entrypoint = EntryPoint::new(&hydrus());
        assert_eq!(
            Context::EntryPoint(&entrypoint).generate(),
            json!({ "EntryPoint": "http://hydrus.com/test_api/vocab?resource=EntryPoint" })
        );
    }
}
