//! JSON-LD expansion.
//!
//! The builder never interprets compact JSON-LD itself. It hands the compact
//! document to an [`Expander`] and consumes the expanded node array, where
//! every key is a full IRI and every value is an array of node objects,
//! `{"@id": ..}` references or `{"@value": ..}` literals.
//!
//! [`JsonLdExpander`] runs the JSON-LD 1.1 expansion algorithm of the
//! `json-ld` crate. Remote contexts are never fetched: they resolve only
//! from the preloaded set.

use std::collections::HashMap;

use futures::executor::block_on;
use iref::IriBuf;
use json_ld::syntax::{IntoJsonWithContext, Parse, Value as SyntaxValue};
use json_ld::{JsonLdProcessor, RemoteDocument};
use serde_json::{json, Value};
use tracing::trace;

use crate::error::{HydraError, Result};
use crate::model::context::hydra_context;
use crate::model::iris::HYDRA_CORE_CONTEXT;

/// Turns a compact JSON-LD document into its expanded node array.
pub trait Expander: Send + Sync {
    /// Expands `document`.
    ///
    /// # Errors
    ///
    /// Returns [`HydraError::Expansion`] if the document cannot be expanded.
    fn expand(&self, document: &Value) -> Result<Vec<Value>>;
}

impl<F> Expander for F
where
    F: Fn(&Value) -> Result<Vec<Value>> + Send + Sync,
{
    fn expand(&self, document: &Value) -> Result<Vec<Value>> {
        self(document)
    }
}

/// Expands documents with the `json-ld` processor.
///
/// Remote (string) contexts are served from an in-memory loader holding the
/// preloaded context documents. The Hydra core context injected into
/// rendered statuses is always preloaded. Any other remote context fails
/// expansion.
#[derive(Debug, Clone)]
pub struct JsonLdExpander {
    preloaded: HashMap<String, Value>,
}

impl Default for JsonLdExpander {
    fn default() -> Self {
        let mut core = hydra_context();
        core.insert("Status".to_owned(), json!("hydra:Status"));
        core.insert("Error".to_owned(), json!("hydra:Error"));
        let mut preloaded = HashMap::new();
        preloaded.insert(
            HYDRA_CORE_CONTEXT.to_owned(),
            json!({ "@context": Value::Object(core) }),
        );
        Self { preloaded }
    }
}

impl JsonLdExpander {
    /// Creates an expander with only the Hydra core context preloaded.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Preloads a remote context under its IRI. `context` is either a
    /// context document carrying `@context` or the context object itself.
    #[must_use]
    pub fn with_context(mut self, iri: impl Into<String>, context: Value) -> Self {
        let document = match context {
            Value::Object(document) if document.contains_key("@context") => {
                Value::Object(document)
            }
            other => json!({ "@context": other }),
        };
        self.preloaded.insert(iri.into(), document);
        self
    }

    fn loader(&self) -> Result<HashMap<IriBuf, RemoteDocument>> {
        let mut loader = HashMap::with_capacity(self.preloaded.len());
        for (iri, document) in &self.preloaded {
            let url = IriBuf::new(iri.clone())
                .map_err(|_| HydraError::Expansion(format!("invalid context IRI {iri}")))?;
            let document: RemoteDocument =
                RemoteDocument::new(Some(url.clone()), None, to_syntax(document)?);
            loader.insert(url, document);
        }
        Ok(loader)
    }
}

impl Expander for JsonLdExpander {
    fn expand(&self, document: &Value) -> Result<Vec<Value>> {
        if !(document.is_object() || document.is_array()) {
            return Err(HydraError::Expansion(
                "document must be a JSON object or array".to_owned(),
            ));
        }
        let mut loader = self.loader()?;
        let input: RemoteDocument = RemoteDocument::new(None, None, to_syntax(document)?);
        let expanded = block_on(input.expand(&mut loader))
            .map_err(|err| HydraError::Expansion(err.to_string()))?;

        let text = expanded.into_objects().into_json_with(&()).to_string();
        let nodes: Vec<Value> = serde_json::from_str(&text)
            .map_err(|err| HydraError::Expansion(format!("unreadable expansion: {err}")))?;
        trace!(nodes = nodes.len(), "expanded document");
        Ok(nodes)
    }
}

fn to_syntax(value: &Value) -> Result<SyntaxValue> {
    let (value, _) = SyntaxValue::parse_str(&value.to_string())
        .map_err(|err| HydraError::Expansion(format!("invalid JSON: {err}")))?;
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    const HYDRA: &str = "http://www.w3.org/ns/hydra/core#";
    const VOCAB: &str = "http://localhost:8080/api/vocab?resource=";

    fn expand(document: Value) -> Result<Vec<Value>> {
        JsonLdExpander::new().expand(&document)
    }

    #[test]
    fn prefixes_terms_and_coercion() {
        let nodes = expand(json!({
            "@context": {
                "hydra": HYDRA,
                "vocab": { "@id": VOCAB, "@prefix": true },
                "title": "hydra:title",
                "range": { "@id": "rdfs:range", "@type": "@id" },
                "rdfs": "http://www.w3.org/2000/01/rdf-schema#"
            },
            "@id": "vocab:Drone",
            "@type": "hydra:Class",
            "title": "Drone",
            "range": "vocab:State"
        }))
        .expect("expands");
        assert_eq!(
            nodes,
            vec![json!({
                "@id": "http://localhost:8080/api/vocab?resource=Drone",
                "@type": ["http://www.w3.org/ns/hydra/core#Class"],
                "http://www.w3.org/ns/hydra/core#title": [{ "@value": "Drone" }],
                "http://www.w3.org/2000/01/rdf-schema#range": [
                    { "@id": "http://localhost:8080/api/vocab?resource=State" }
                ]
            })]
        );
    }

    #[test]
    fn terms_ending_in_a_non_delimiter_are_not_prefixes() {
        let nodes = expand(json!({
            "@context": { "vocab": VOCAB },
            "@id": "vocab:Drone"
        }))
        .expect("expands");
        assert_eq!(nodes[0]["@id"], "vocab:Drone");
    }

    #[test]
    fn null_values_dropped_and_language_kept() {
        let nodes = expand(json!({
            "@context": {
                "hydra": HYDRA,
                "title": "hydra:title",
                "description": "hydra:description"
            },
            "@id": "http://a/x",
            "title": { "@value": "Drohne", "@language": "de" },
            "description": null
        }))
        .expect("expands");
        assert_eq!(
            nodes[0]["http://www.w3.org/ns/hydra/core#title"],
            json!([{ "@value": "Drohne", "@language": "de" }])
        );
        assert!(nodes[0]
            .get("http://www.w3.org/ns/hydra/core#description")
            .is_none());
    }

    #[test]
    fn unmapped_keys_are_dropped_and_empty_arrays_kept() {
        let nodes = expand(json!({
            "@context": { "hydra": HYDRA, "supportedProperty": "hydra:supportedProperty" },
            "@id": "http://a/x",
            "comment": "no mapping",
            "supportedProperty": []
        }))
        .expect("expands");
        assert_eq!(
            nodes[0],
            json!({
                "@id": "http://a/x",
                "http://www.w3.org/ns/hydra/core#supportedProperty": []
            })
        );
    }

    #[test]
    fn vocab_and_base() {
        let nodes = expand(json!({
            "@context": { "@vocab": "http://schema.org/", "@base": "http://a.org/api/" },
            "@id": "drones/1",
            "@type": "Drone",
            "name": "d1",
            "count": 3,
            "active": true
        }))
        .expect("expands");
        assert_eq!(nodes[0]["@id"], "http://a.org/api/drones/1");
        assert_eq!(nodes[0]["@type"], json!(["http://schema.org/Drone"]));
        assert_eq!(nodes[0]["http://schema.org/count"], json!([{ "@value": 3 }]));
        assert_eq!(nodes[0]["http://schema.org/active"], json!([{ "@value": true }]));
    }

    #[test]
    fn nested_nodes_and_scoped_context() {
        let nodes = expand(json!({
            "@context": [{ "hydra": HYDRA }, { "supportedClass": "hydra:supportedClass" }],
            "supportedClass": [{
                "@context": { "label": "http://www.w3.org/2000/01/rdf-schema#label" },
                "@id": "http://a/C",
                "label": "C"
            }]
        }))
        .expect("expands");
        let class = &nodes[0]["http://www.w3.org/ns/hydra/core#supportedClass"][0];
        assert_eq!(class["@id"], "http://a/C");
        assert_eq!(class["http://www.w3.org/2000/01/rdf-schema#label"], json!([{ "@value": "C" }]));
    }

    #[test]
    fn keyword_aliases() {
        let nodes = expand(json!({
            "@context": { "id": "@id", "type": "@type", "hydra": HYDRA },
            "id": "http://a/x",
            "type": "hydra:Link"
        }))
        .expect("expands");
        assert_eq!(nodes[0]["@id"], "http://a/x");
        assert_eq!(nodes[0]["@type"], json!(["http://www.w3.org/ns/hydra/core#Link"]));
    }

    #[test]
    fn remote_context_is_rejected() {
        let err = expand(json!({ "@context": "http://www.w3.org/ns/hydra/context.jsonld" }));
        assert!(matches!(err, Err(HydraError::Expansion(_))));
    }

    #[test]
    fn hydra_core_context_is_preloaded() {
        let nodes = expand(json!({
            "@context": HYDRA_CORE_CONTEXT,
            "@type": "Error",
            "statusCode": 404,
            "description": "Not found"
        }))
        .expect("expands");
        assert_eq!(nodes[0]["@type"], json!(["http://www.w3.org/ns/hydra/core#Error"]));
        assert_eq!(
            nodes[0]["http://www.w3.org/ns/hydra/core#statusCode"],
            json!([{ "@value": 404 }])
        );
    }

    #[test]
    fn registered_contexts_resolve() {
        let expander = JsonLdExpander::new().with_context(
            "http://a.org/context.jsonld",
            json!({ "name": "http://schema.org/name" }),
        );
        let nodes = expander
            .expand(&json!({ "@context": "http://a.org/context.jsonld", "name": "x" }))
            .expect("expands");
        assert_eq!(nodes[0]["http://schema.org/name"], json!([{ "@value": "x" }]));
    }

    #[test]
    fn cyclic_terms_are_rejected() {
        let err = expand(json!({ "@context": { "a": "b:x", "b": "a:y" }, "a": 1 }));
        assert!(matches!(err, Err(HydraError::Expansion(_))));
    }

    #[test]
    fn scalars_are_not_documents() {
        assert!(matches!(expand(json!("x")), Err(HydraError::Expansion(_))));
    }

    #[test]
    fn closures_are_expanders() {
        let fixed = |_: &Value| -> Result<Vec<Value>> { Ok(vec![json!({ "@id": "http://a/doc" })]) };
        let nodes = fixed.expand(&json!({})).expect("expands");
        assert_eq!(nodes[0]["@id"], "http://a/doc");
    }
}
