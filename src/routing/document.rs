//! API description generation.
//!
//! Projects a registry onto a Swagger 2.0 document so clients can discover
//! every mounted endpoint. Paths are keyed relative to `basePath` (the
//! registry prefix) and tagged with their namespace name. The same types
//! deserialize a document fetched from a running server.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::routing::path;
use crate::routing::registry::ApiRegistry;

/// Swagger 2.0 document describing the API surface.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiDocument {
    pub swagger: String,
    pub base_path: String,
    pub info: Info,
    pub produces: Vec<String>,
    pub consumes: Vec<String>,
    pub tags: Vec<Tag>,
    /// Relative path → lowercase method → operation.
    pub paths: BTreeMap<String, BTreeMap<String, Operation>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Info {
    pub title: String,
    pub description: String,
    pub version: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tag {
    pub name: String,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Operation {
    pub tags: Vec<String>,
    pub summary: String,
    pub operation_id: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub parameters: Vec<Parameter>,
    pub responses: BTreeMap<String, ResponseDoc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Parameter {
    pub name: String,
    #[serde(rename = "in")]
    pub location: String,
    pub required: bool,
    #[serde(rename = "type")]
    pub kind: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResponseDoc {
    pub description: String,
}

impl ApiDocument {
    pub fn from_registry(registry: &ApiRegistry) -> Self {
        let mut tags = Vec::new();
        let mut paths: BTreeMap<String, BTreeMap<String, Operation>> = BTreeMap::new();

        for (mount, namespace) in registry.namespaces() {
            tags.push(Tag {
                name: namespace.name().to_string(),
                description: namespace.description().to_string(),
            });

            for endpoint in namespace.endpoints() {
                let relative = path::join(mount, &endpoint.path);
                let method = endpoint.method.as_str().to_ascii_lowercase();
                let operation = Operation {
                    tags: vec![namespace.name().to_string()],
                    summary: endpoint.summary.clone(),
                    operation_id: operation_id(&method, &relative),
                    parameters: path::params(&relative)
                        .into_iter()
                        .map(|name| Parameter {
                            name: name.to_string(),
                            location: "path".to_string(),
                            required: true,
                            kind: "string".to_string(),
                        })
                        .collect(),
                    responses: BTreeMap::from([(
                        "200".to_string(),
                        ResponseDoc {
                            description: "Success".to_string(),
                        },
                    )]),
                };
                paths.entry(relative).or_default().insert(method, operation);
            }
        }

        let base_path = match registry.prefix() {
            "" => "/".to_string(),
            prefix => prefix.to_string(),
        };

        Self {
            swagger: "2.0".to_string(),
            base_path,
            info: Info {
                title: registry.title().to_string(),
                description: registry.description().to_string(),
                version: registry.version().to_string(),
            },
            produces: vec!["application/json".to_string()],
            consumes: vec!["application/json".to_string()],
            tags,
            paths,
        }
    }

    /// Every documented route as `(METHOD, full path)`, sorted.
    pub fn routes(&self) -> Vec<(String, String)> {
        let base = self.base_path.trim_end_matches('/');
        let mut routes: Vec<(String, String)> = self
            .paths
            .iter()
            .flat_map(|(relative, operations)| {
                operations
                    .keys()
                    .map(move |method| (method.to_ascii_uppercase(), format!("{base}{relative}")))
            })
            .collect();
        routes.sort();
        routes
    }
}

// `get` + `/users/{user_id}` → `get_users_user_id`
fn operation_id(method: &str, relative: &str) -> String {
    let mut id = method.to_string();
    for segment in path::segments(relative) {
        id.push('_');
        id.push_str(segment.trim_matches(|c| c == '{' || c == '}' || c == '*'));
    }
    id
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::routing::Namespace;
    use axum::http::Method;

    async fn ok() -> &'static str {
        "ok"
    }

    fn document() -> ApiDocument {
        let users = Namespace::new("users", "User operations")
            .endpoint(Method::GET, "/", "List users", ok)
            .unwrap()
            .endpoint(Method::GET, "/{user_id}", "Fetch a user", ok)
            .unwrap();
        let auth = Namespace::new("auth", "Authentication")
            .endpoint(Method::POST, "/login", "Log in", ok)
            .unwrap();

        let mut registry = ApiRegistry::new("S", "D", "1.0", "/api/v1");
        registry.attach("/users", users).unwrap();
        registry.attach("/auth", auth).unwrap();
        registry.describe()
    }

    #[test]
    fn test_document_metadata() {
        let doc = document();
        assert_eq!(doc.swagger, "2.0");
        assert_eq!(doc.base_path, "/api/v1");
        assert_eq!(doc.info.title, "S");
        assert_eq!(doc.info.description, "D");
        assert_eq!(doc.info.version, "1.0");
        let tags: Vec<&str> = doc.tags.iter().map(|t| t.name.as_str()).collect();
        assert_eq!(tags, vec!["users", "auth"]);
    }

    #[test]
    fn test_document_paths_and_parameters() {
        let doc = document();
        let fetch = &doc.paths["/users/{user_id}"]["get"];
        assert_eq!(fetch.operation_id, "get_users_user_id");
        assert_eq!(fetch.tags, vec!["users".to_string()]);
        assert_eq!(fetch.parameters.len(), 1);
        assert_eq!(fetch.parameters[0].name, "user_id");

        let login = &doc.paths["/auth/login"]["post"];
        assert_eq!(login.summary, "Log in");
        assert!(login.parameters.is_empty());
    }

    #[test]
    fn test_document_serializes_swagger_keys() {
        let value = serde_json::to_value(document()).unwrap();
        assert_eq!(value["basePath"], "/api/v1");
        assert_eq!(value["paths"]["/users"]["get"]["operationId"], "get_users");
        assert_eq!(value["paths"]["/users/{user_id}"]["get"]["parameters"][0]["in"], "path");
        assert!(value["paths"]["/users"]["get"].get("parameters").is_none());
    }

    #[test]
    fn test_served_document_reads_back() {
        let json = serde_json::to_string(&document()).unwrap();
        let doc: ApiDocument = serde_json::from_str(&json).unwrap();
        assert_eq!(doc, document());
        assert!(doc.paths["/auth/login"]["post"].parameters.is_empty());
        assert_eq!(doc.routes().len(), 3);
    }

    #[test]
    fn test_routes_listing() {
        let routes = document().routes();
        assert_eq!(
            routes,
            vec![
                ("GET".to_string(), "/api/v1/users".to_string()),
                ("GET".to_string(), "/api/v1/users/{user_id}".to_string()),
                ("POST".to_string(), "/api/v1/auth/login".to_string()),
            ]
        );
    }
}
