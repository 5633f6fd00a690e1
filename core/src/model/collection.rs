//! Collections: classes that manage members of another class.

use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use serde_json::{json, Map, Value};

use super::iris::{HYDRA_COLLECTION, HYDRA_MEMBER};
use super::operation::{HydraOperation, Method, TypeRef};
use super::property::HydraClassProp;
use super::status::HydraStatus;
use crate::namespace::Namespace;

/// Unreserved characters kept verbatim when a name becomes part of an id.
const ID_COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~');

/// Percent-encodes a name for use as the last component of an id.
pub(crate) fn encode_component(name: &str) -> String {
    utf8_percent_encode(name, ID_COMPONENT).to_string()
}

/// The `hydra:manages` block describing what a collection contains.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Manages {
    /// The relating property (usually `rdf:type`).
    pub property: Option<String>,
    /// The object of the relation (the member class).
    pub object: Option<String>,
    /// The subject of the relation.
    pub subject: Option<String>,
}

impl Manages {
    /// Renders the block, omitting absent members.
    #[must_use]
    pub fn to_json(&self) -> Value {
        let mut block = Map::new();
        for (key, value) in [
            ("property", &self.property),
            ("object", &self.object),
            ("subject", &self.subject),
        ] {
            if let Some(value) = value {
                block.insert(key.to_owned(), json!(value));
            }
        }
        Value::Object(block)
    }
}

/// Flags selecting which standard operations a collection exposes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CollectionOps {
    /// Retrieve the members.
    pub get: bool,
    /// Gates the PUT create operation.
    pub post: bool,
    /// Gates the POST update operation.
    pub put: bool,
    /// Delete a member.
    pub delete: bool,
}

impl CollectionOps {
    /// All four operations.
    #[must_use]
    pub fn all() -> Self {
        Self {
            get: true,
            post: true,
            put: true,
            delete: true,
        }
    }
}

/// A collection class.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HydraCollection {
    /// Collection name (its title).
    pub name: String,
    /// Canonical id.
    pub id: String,
    /// Serving path; defaults to the name.
    pub path: String,
    /// Description.
    pub description: String,
    /// What the collection contains.
    pub manages: Manages,
    /// Whether the collection is reachable from the EntryPoint.
    pub endpoint: bool,
    /// The synthesized `members` property.
    pub supported_property: Vec<HydraClassProp>,
    /// The standard operations selected at construction.
    pub supported_operation: Vec<HydraOperation>,
}

impl HydraCollection {
    /// Creates a collection with id `<namespace><encoded name>`.
    ///
    /// The `post` flag produces the PUT create operation and the `put` flag
    /// the POST update operation; consumers depend on this pairing.
    pub fn new(
        namespace: &Namespace,
        name: &str,
        description: impl Into<String>,
        manages: Manages,
        ops: CollectionOps,
    ) -> Self {
        let member = TypeRef::from(manages.object.clone());
        let mut supported_operation = Vec::new();

        if ops.get {
            supported_operation.push(HydraOperation::described(
                format!("_:{name}_retrieve"),
                Method::Get,
                format!("Retrieves all the members of {name}"),
                TypeRef::Null,
                member.clone(),
            ));
        }
        if ops.post {
            supported_operation.push(
                HydraOperation::described(
                    format!("_:{name}_create"),
                    Method::Put,
                    format!("Create new member in {name}"),
                    member.clone(),
                    member.clone(),
                )
                .with_status(vec![HydraStatus::new(
                    201,
                    format!("A new member in {name} created"),
                )]),
            );
        }
        if ops.put {
            supported_operation.push(
                HydraOperation::described(
                    format!("_:{name}_update"),
                    Method::Post,
                    format!("Update member of {name}"),
                    member.clone(),
                    member.clone(),
                )
                .with_status(vec![HydraStatus::new(
                    200,
                    format!("If the entity was updated from {name}."),
                )]),
            );
        }
        if ops.delete {
            supported_operation.push(
                HydraOperation::described(
                    format!("_:{name}_delete"),
                    Method::Delete,
                    format!("Delete member of {name}"),
                    member.clone(),
                    member,
                )
                .with_status(vec![HydraStatus::new(
                    200,
                    format!("If entity was deleted successfully from {name}."),
                )]),
            );
        }

        let members = HydraClassProp::new(HYDRA_MEMBER, "members", true, true, false)
            .with_description(format!("The members of {name}"));

        Self {
            name: name.to_owned(),
            id: namespace.resource(&encode_component(name)),
            path: name.to_owned(),
            description: description.into(),
            manages,
            endpoint: false,
            supported_property: vec![members],
            supported_operation,
        }
    }

    /// Replaces the id.
    #[must_use]
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }

    /// Replaces the path; an empty path keeps the name.
    #[must_use]
    pub fn with_path(mut self, path: &str) -> Self {
        if !path.is_empty() {
            self.path = path.to_owned();
        }
        self
    }

    /// Marks the collection as an endpoint (or not).
    #[must_use]
    pub fn with_endpoint(mut self, endpoint: bool) -> Self {
        self.endpoint = endpoint;
        self
    }

    /// Renders the collection.
    #[must_use]
    pub fn generate(&self) -> Value {
        json!({
            "@id": self.id,
            "@type": "Collection",
            "subClassOf": HYDRA_COLLECTION,
            "title": self.name,
            "description": self.description,
            "supportedOperation": self
                .supported_operation
                .iter()
                .map(HydraOperation::generate)
                .collect::<Vec<_>>(),
            "supportedProperty": self
                .supported_property
                .iter()
                .map(HydraClassProp::generate)
                .collect::<Vec<_>>(),
            "manages": self.manages.to_json(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DUMMY_CLASS: &str = "http://hydrus.com/test_api/vocab?resource=dummyClass";

    fn dummy_collection(ops: CollectionOps) -> HydraCollection {
        let ns = Namespace::new("http://hydrus.com/", "test_api", "vocab").expect("valid base");
        let manages = Manages {
            property: Some("rdf:type".to_owned()),
            object: Some(DUMMY_CLASS.to_owned()),
            subject: None,
        };
        HydraCollection::new(
            &ns,
            "dummyclasses",
            "This collection comprises of instances of dummyClass",
            manages,
            ops,
        )
    }

    fn op_ids(collection: &HydraCollection) -> Vec<&str> {
        collection
            .supported_operation
            .iter()
            .filter_map(|op| op.id.as_deref())
            .collect()
    }

    #[test]
    fn get_and_post_flags_yield_retrieve_and_put_create() {
        let collection = dummy_collection(CollectionOps {
            get: true,
            post: true,
            ..CollectionOps::default()
        });
        assert_eq!(op_ids(&collection), ["_:dummyclasses_retrieve", "_:dummyclasses_create"]);
        let create = &collection.supported_operation[1];
        assert_eq!(create.method, Method::Put);
        assert_eq!(create.action_type(), "http://schema.org/AddAction");
        assert_eq!(create.possible_status[0].code, 201);
    }

    #[test]
    fn put_flag_yields_post_update() {
        let collection = dummy_collection(CollectionOps {
            put: true,
            ..CollectionOps::default()
        });
        assert_eq!(op_ids(&collection), ["_:dummyclasses_update"]);
        assert_eq!(collection.supported_operation[0].method, Method::Post);
    }

    #[test]
    fn all_flags_in_fixed_order() {
        let collection = dummy_collection(CollectionOps::all());
        assert_eq!(
            op_ids(&collection),
            [
                "_:dummyclasses_retrieve",
                "_:dummyclasses_create",
                "_:dummyclasses_update",
                "_:dummyclasses_delete"
            ]
        );
    }

    #[test]
    fn collection_rendering() {
        let collection = dummy_collection(CollectionOps {
            get: true,
            ..CollectionOps::default()
        });
        assert_eq!(
            collection.generate(),
            json!({
                "@id": "http://hydrus.com/test_api/vocab?resource=dummyclasses",
                "@type": "Collection",
                "subClassOf": "http://www.w3.org/ns/hydra/core#Collection",
                "title": "dummyclasses",
                "description": "This collection comprises of instances of dummyClass",
                "supportedOperation": [{
                    "@id": "_:dummyclasses_retrieve",
                    "@type": "http://schema.org/FindAction",
                    "method": "GET",
                    "description": "Retrieves all the members of dummyclasses",
                    "expects": null,
                    "returns": DUMMY_CLASS,
                    "expectsHeader": [],
                    "returnsHeader": [],
                    "possibleStatus": []
                }],
                "supportedProperty": [{
                    "@type": "SupportedProperty",
                    "title": "members",
                    "required": false,
                    "readable": true,
                    "writeable": true,
                    "property": "http://www.w3.org/ns/hydra/core#member",
                    "description": "The members of dummyclasses"
                }],
                "manages": {
                    "property": "rdf:type",
                    "object": DUMMY_CLASS
                }
            })
        );
    }

    #[test]
    fn manages_omits_absent_members() {
        let manages = Manages {
            subject: Some(DUMMY_CLASS.to_owned()),
            ..Manages::default()
        };
        assert_eq!(manages.to_json(), json!({ "subject": DUMMY_CLASS }));
        assert_eq!(Manages::default().to_json(), json!({}));
    }

    #[test]
    fn names_are_percent_encoded_in_ids() {
        assert_eq!(encode_component("drone logs"), "drone%20logs");
        assert_eq!(encode_component("a-b_c.d~e"), "a-b_c.d~e");
    }
}
