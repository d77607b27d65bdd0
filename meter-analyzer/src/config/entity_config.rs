//! # Entity configuration
//!
//! Declarative form of an [EntityDescription], one variant per scope,
//! selected by the `scope` field:
//!
//! ```yaml
//! scope: process_relation
//! service_keys: [service]
//! instance_keys: [instance]
//! detect_point_key: side
//! source_process_id_key: client_process_id
//! dest_process_id_key: server_process_id
//! ```
//!
//! Key lists default to empty, `delimiter` to `"."` and `layer` to
//! `GENERAL`. Unknown fields are rejected at parse time, so a misspelled key
//! field cannot quietly leave its list empty. Validation runs before any
//! description is built.

use std::{collections::HashSet, sync::Arc};

use serde::Deserialize;

use crate::{
    entity_description::{
        EndpointEntityDescription, EndpointRelationEntityDescription, EntityDescription,
        InstanceEntityDescription, InstanceRelationEntityDescription, ProcessEntityDescription,
        ProcessRelationEntityDescription, ServiceEntityDescription,
        ServiceRelationEntityDescription,
    },
    error::{EntityConfigError, EntityConfigResult},
    scope::{Layer, ScopeType},
};

const DEFAULT_DELIMITER: &str = ".";

fn default_delimiter() -> String {
    DEFAULT_DELIMITER.to_string()
}

/// Configuration of a service entity.
#[derive(Clone, Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ServiceEntityConfig {
    #[serde(default)]
    pub service_keys: Vec<String>,
    #[serde(default)]
    pub layer: Layer,
    #[serde(default = "default_delimiter")]
    pub delimiter: String,
}

/// Configuration of a service instance entity.
#[derive(Clone, Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct InstanceEntityConfig {
    #[serde(default)]
    pub service_keys: Vec<String>,
    #[serde(default)]
    pub instance_keys: Vec<String>,
    #[serde(default)]
    pub layer: Layer,
    #[serde(default = "default_delimiter")]
    pub delimiter: String,
}

/// Configuration of an endpoint entity.
#[derive(Clone, Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EndpointEntityConfig {
    #[serde(default)]
    pub service_keys: Vec<String>,
    #[serde(default)]
    pub endpoint_keys: Vec<String>,
    #[serde(default)]
    pub layer: Layer,
    #[serde(default = "default_delimiter")]
    pub delimiter: String,
}

/// Configuration of a process entity.
#[derive(Clone, Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ProcessEntityConfig {
    #[serde(default)]
    pub service_keys: Vec<String>,
    #[serde(default)]
    pub instance_keys: Vec<String>,
    #[serde(default)]
    pub process_keys: Vec<String>,
    #[serde(default)]
    pub layer: Layer,
    #[serde(default = "default_delimiter")]
    pub delimiter: String,
}

/// Configuration of a service relation entity.
#[derive(Clone, Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ServiceRelationEntityConfig {
    #[serde(default)]
    pub source_service_keys: Vec<String>,
    #[serde(default)]
    pub dest_service_keys: Vec<String>,
    #[serde(default)]
    pub detect_point_key: String,
    pub component_id_key: Option<String>,
    #[serde(default)]
    pub layer: Layer,
    #[serde(default = "default_delimiter")]
    pub delimiter: String,
}

/// Configuration of a service instance relation entity.
#[derive(Clone, Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct InstanceRelationEntityConfig {
    #[serde(default)]
    pub source_service_keys: Vec<String>,
    #[serde(default)]
    pub source_instance_keys: Vec<String>,
    #[serde(default)]
    pub dest_service_keys: Vec<String>,
    #[serde(default)]
    pub dest_instance_keys: Vec<String>,
    #[serde(default)]
    pub detect_point_key: String,
    pub component_id_key: Option<String>,
    #[serde(default)]
    pub layer: Layer,
    #[serde(default = "default_delimiter")]
    pub delimiter: String,
}

/// Configuration of an endpoint relation entity.
#[derive(Clone, Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EndpointRelationEntityConfig {
    #[serde(default)]
    pub service_keys: Vec<String>,
    #[serde(default)]
    pub dest_service_keys: Vec<String>,
    #[serde(default)]
    pub endpoint_keys: Vec<String>,
    #[serde(default)]
    pub dest_endpoint_keys: Vec<String>,
    #[serde(default)]
    pub detect_point_key: String,
    pub component_id_key: Option<String>,
    #[serde(default)]
    pub layer: Layer,
    #[serde(default = "default_delimiter")]
    pub delimiter: String,
}

/// Configuration of a process relation entity.
///
/// Service and instance keys may be empty; the three single keys may not.
#[derive(Clone, Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ProcessRelationEntityConfig {
    #[serde(default)]
    pub service_keys: Vec<String>,
    #[serde(default)]
    pub instance_keys: Vec<String>,
    #[serde(default)]
    pub source_process_id_key: String,
    #[serde(default)]
    pub dest_process_id_key: String,
    #[serde(default)]
    pub detect_point_key: String,
    #[serde(default = "default_delimiter")]
    pub delimiter: String,
}

/// Entity configuration of one analyzer rule, tagged by `scope`.
#[derive(Clone, Debug, Deserialize)]
#[serde(tag = "scope", rename_all = "snake_case")]
pub enum EntityConfig {
    /// `scope: service`
    Service(ServiceEntityConfig),
    /// `scope: service_instance`
    ServiceInstance(InstanceEntityConfig),
    /// `scope: endpoint`
    Endpoint(EndpointEntityConfig),
    /// `scope: process`
    Process(ProcessEntityConfig),
    /// `scope: service_relation`
    ServiceRelation(ServiceRelationEntityConfig),
    /// `scope: service_instance_relation`
    ServiceInstanceRelation(InstanceRelationEntityConfig),
    /// `scope: endpoint_relation`
    EndpointRelation(EndpointRelationEntityConfig),
    /// `scope: process_relation`
    ProcessRelation(ProcessRelationEntityConfig),
}

impl EntityConfig {
    /// The scope this configuration declares.
    pub fn scope_type(&self) -> ScopeType {
        match self {
            EntityConfig::Service(_) => ScopeType::Service,
            EntityConfig::ServiceInstance(_) => ScopeType::ServiceInstance,
            EntityConfig::Endpoint(_) => ScopeType::Endpoint,
            EntityConfig::Process(_) => ScopeType::Process,
            EntityConfig::ServiceRelation(_) => ScopeType::ServiceRelation,
            EntityConfig::ServiceInstanceRelation(_) => ScopeType::ServiceInstanceRelation,
            EntityConfig::EndpointRelation(_) => ScopeType::EndpointRelation,
            EntityConfig::ProcessRelation(_) => ScopeType::ProcessRelation,
        }
    }

    /// Check that every key the scope needs is present and non-empty.
    pub fn validate(&self) -> EntityConfigResult<()> {
        let check = KeyCheck(self.scope_type());
        match self {
            EntityConfig::Service(c) => check.required_keys("service_keys", &c.service_keys),
            EntityConfig::ServiceInstance(c) => {
                check.required_keys("service_keys", &c.service_keys)?;
                check.required_keys("instance_keys", &c.instance_keys)
            }
            EntityConfig::Endpoint(c) => {
                check.required_keys("service_keys", &c.service_keys)?;
                check.required_keys("endpoint_keys", &c.endpoint_keys)
            }
            EntityConfig::Process(c) => {
                check.required_keys("service_keys", &c.service_keys)?;
                check.required_keys("instance_keys", &c.instance_keys)?;
                check.required_keys("process_keys", &c.process_keys)
            }
            EntityConfig::ServiceRelation(c) => {
                check.required_keys("source_service_keys", &c.source_service_keys)?;
                check.required_keys("dest_service_keys", &c.dest_service_keys)?;
                check.key("detect_point_key", &c.detect_point_key)?;
                check.optional_key("component_id_key", c.component_id_key.as_deref())
            }
            EntityConfig::ServiceInstanceRelation(c) => {
                check.required_keys("source_service_keys", &c.source_service_keys)?;
                check.required_keys("source_instance_keys", &c.source_instance_keys)?;
                check.required_keys("dest_service_keys", &c.dest_service_keys)?;
                check.required_keys("dest_instance_keys", &c.dest_instance_keys)?;
                check.key("detect_point_key", &c.detect_point_key)?;
                check.optional_key("component_id_key", c.component_id_key.as_deref())
            }
            EntityConfig::EndpointRelation(c) => {
                check.required_keys("service_keys", &c.service_keys)?;
                check.required_keys("dest_service_keys", &c.dest_service_keys)?;
                check.required_keys("endpoint_keys", &c.endpoint_keys)?;
                check.required_keys("dest_endpoint_keys", &c.dest_endpoint_keys)?;
                check.key("detect_point_key", &c.detect_point_key)?;
                check.optional_key("component_id_key", c.component_id_key.as_deref())
            }
            EntityConfig::ProcessRelation(c) => {
                check.keys("service_keys", &c.service_keys)?;
                check.keys("instance_keys", &c.instance_keys)?;
                check.key("detect_point_key", &c.detect_point_key)?;
                check.key("source_process_id_key", &c.source_process_id_key)?;
                check.key("dest_process_id_key", &c.dest_process_id_key)
            }
        }
    }

    /// Validate the configuration and build the description it declares.
    pub fn build(self) -> EntityConfigResult<Arc<dyn EntityDescription>> {
        self.validate()?;

        let description: Arc<dyn EntityDescription> = match self {
            EntityConfig::Service(c) => Arc::new(
                ServiceEntityDescription::new(c.service_keys, c.delimiter).with_layer(c.layer),
            ),
            EntityConfig::ServiceInstance(c) => Arc::new(
                InstanceEntityDescription::new(c.service_keys, c.instance_keys, c.delimiter)
                    .with_layer(c.layer),
            ),
            EntityConfig::Endpoint(c) => Arc::new(
                EndpointEntityDescription::new(c.service_keys, c.endpoint_keys, c.delimiter)
                    .with_layer(c.layer),
            ),
            EntityConfig::Process(c) => Arc::new(
                ProcessEntityDescription::new(
                    c.service_keys,
                    c.instance_keys,
                    c.process_keys,
                    c.delimiter,
                )
                .with_layer(c.layer),
            ),
            EntityConfig::ServiceRelation(c) => {
                let mut description = ServiceRelationEntityDescription::new(
                    c.source_service_keys,
                    c.dest_service_keys,
                    c.detect_point_key,
                    c.delimiter,
                )
                .with_layer(c.layer);
                if let Some(component_id_key) = c.component_id_key {
                    description = description.with_component_id_key(component_id_key);
                }
                Arc::new(description)
            }
            EntityConfig::ServiceInstanceRelation(c) => {
                let mut description = InstanceRelationEntityDescription::new(
                    c.source_service_keys,
                    c.source_instance_keys,
                    c.dest_service_keys,
                    c.dest_instance_keys,
                    c.detect_point_key,
                    c.delimiter,
                )
                .with_layer(c.layer);
                if let Some(component_id_key) = c.component_id_key {
                    description = description.with_component_id_key(component_id_key);
                }
                Arc::new(description)
            }
            EntityConfig::EndpointRelation(c) => {
                let mut description = EndpointRelationEntityDescription::new(
                    c.service_keys,
                    c.dest_service_keys,
                    c.endpoint_keys,
                    c.dest_endpoint_keys,
                    c.detect_point_key,
                    c.delimiter,
                )
                .with_layer(c.layer);
                if let Some(component_id_key) = c.component_id_key {
                    description = description.with_component_id_key(component_id_key);
                }
                Arc::new(description)
            }
            EntityConfig::ProcessRelation(c) => Arc::new(ProcessRelationEntityDescription::new(
                c.service_keys,
                c.instance_keys,
                c.source_process_id_key,
                c.dest_process_id_key,
                c.detect_point_key,
                c.delimiter,
            )),
        };

        warn_duplicate_label_keys(description.as_ref());
        Ok(description)
    }
}

struct KeyCheck(ScopeType);

impl KeyCheck {
    fn key(&self, field: &'static str, key: &str) -> EntityConfigResult<()> {
        if key.trim().is_empty() {
            return Err(EntityConfigError::MissingKey {
                scope: self.0,
                field,
            });
        }
        Ok(())
    }

    fn optional_key(&self, field: &'static str, key: Option<&str>) -> EntityConfigResult<()> {
        key.map_or(Ok(()), |key| self.key(field, key))
    }

    fn keys(&self, field: &'static str, keys: &[String]) -> EntityConfigResult<()> {
        match keys.iter().position(|key| key.trim().is_empty()) {
            Some(index) => Err(EntityConfigError::EmptyKeyName {
                scope: self.0,
                field,
                index,
            }),
            None => Ok(()),
        }
    }

    fn required_keys(&self, field: &'static str, keys: &[String]) -> EntityConfigResult<()> {
        if keys.is_empty() {
            return Err(EntityConfigError::EmptyKeyList {
                scope: self.0,
                field,
            });
        }
        self.keys(field, keys)
    }
}

// Duplicates are legal and kept; they usually point at a copy-paste slip.
fn warn_duplicate_label_keys(description: &dyn EntityDescription) {
    let mut seen = HashSet::new();
    for key in description.label_keys() {
        if !seen.insert(key) {
            analyzer_warn!(
                name: "EntityConfig.DuplicateLabelKey",
                scope = description.scope_type().as_str(),
                label_key = key,
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    fn parse(yaml: &str) -> EntityConfig {
        serde_yaml::from_str(yaml).unwrap()
    }

    #[rstest]
    #[case("scope: service\nservice_keys: [svc]", ScopeType::Service)]
    #[case(
        "scope: service_instance\nservice_keys: [svc]\ninstance_keys: [inst]",
        ScopeType::ServiceInstance
    )]
    #[case(
        "scope: endpoint\nservice_keys: [svc]\nendpoint_keys: [uri]",
        ScopeType::Endpoint
    )]
    #[case(
        "scope: process\nservice_keys: [svc]\ninstance_keys: [inst]\nprocess_keys: [pid]",
        ScopeType::Process
    )]
    #[case(
        "scope: service_relation\nsource_service_keys: [src]\ndest_service_keys: [dst]\ndetect_point_key: side",
        ScopeType::ServiceRelation
    )]
    #[case(
        "scope: service_instance_relation\nsource_service_keys: [a]\nsource_instance_keys: [b]\ndest_service_keys: [c]\ndest_instance_keys: [d]\ndetect_point_key: side",
        ScopeType::ServiceInstanceRelation
    )]
    #[case(
        "scope: endpoint_relation\nservice_keys: [a]\ndest_service_keys: [b]\nendpoint_keys: [c]\ndest_endpoint_keys: [d]\ndetect_point_key: side",
        ScopeType::EndpointRelation
    )]
    #[case(
        "scope: process_relation\ndetect_point_key: side\nsource_process_id_key: src\ndest_process_id_key: dst",
        ScopeType::ProcessRelation
    )]
    fn build_selects_variant_by_scope(#[case] yaml: &str, #[case] expected: ScopeType) {
        let config = parse(yaml);
        assert_eq!(config.scope_type(), expected);

        let description = config.build().unwrap();
        assert_eq!(description.scope_type(), expected);
        assert_eq!(description.delimiter(), DEFAULT_DELIMITER);
    }

    #[test]
    fn process_relation_builds_ordered_keys() {
        let config = parse(
            r#"
            scope: process_relation
            service_keys: [svc]
            instance_keys: [inst]
            detect_point_key: point
            source_process_id_key: src_pid
            dest_process_id_key: dst_pid
            delimiter: "|"
            "#,
        );

        let description = config.build().unwrap();
        assert_eq!(
            description.label_keys(),
            ["svc", "inst", "point", "src_pid", "dst_pid"]
        );
        assert_eq!(description.delimiter(), "|");
    }

    #[test]
    fn relation_component_id_key_is_appended() {
        let config = parse(
            r#"
            scope: service_relation
            source_service_keys: [client]
            dest_service_keys: [server]
            detect_point_key: side
            component_id_key: component
            layer: MESH
            "#,
        );

        let description = config.build().unwrap();
        assert_eq!(
            description.label_keys(),
            ["client", "server", "side", "component"]
        );
    }

    #[rstest]
    #[case("scope: process_relation\nsource_process_id_key: src\ndest_process_id_key: dst", "detect_point_key")]
    #[case("scope: process_relation\ndetect_point_key: side\ndest_process_id_key: dst", "source_process_id_key")]
    #[case("scope: process_relation\ndetect_point_key: side\nsource_process_id_key: src\ndest_process_id_key: ' '", "dest_process_id_key")]
    #[case("scope: service_relation\nsource_service_keys: [a]\ndest_service_keys: [b]\ndetect_point_key: side\ncomponent_id_key: ''", "component_id_key")]
    fn missing_single_key_is_rejected(#[case] yaml: &str, #[case] expected_field: &str) {
        let err = parse(yaml).build().unwrap_err();

        match err {
            EntityConfigError::MissingKey { field, .. } => assert_eq!(field, expected_field),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[rstest]
    #[case("scope: service", ScopeType::Service, "service_keys")]
    #[case("scope: service_instance\nservice_keys: [svc]", ScopeType::ServiceInstance, "instance_keys")]
    #[case("scope: endpoint\nservice_keys: [svc]", ScopeType::Endpoint, "endpoint_keys")]
    #[case(
        "scope: service_relation\nsource_service_keys: [a]\ndetect_point_key: side",
        ScopeType::ServiceRelation,
        "dest_service_keys"
    )]
    #[case(
        "scope: process\nservice_keys: [svc]\ninstance_keys: [inst]",
        ScopeType::Process,
        "process_keys"
    )]
    #[case(
        "scope: service_instance_relation\nsource_service_keys: [a]\nsource_instance_keys: [b]\ndest_service_keys: [c]\ndetect_point_key: side",
        ScopeType::ServiceInstanceRelation,
        "dest_instance_keys"
    )]
    #[case(
        "scope: endpoint_relation\nservice_keys: [a]\ndest_service_keys: [b]\ndetect_point_key: side",
        ScopeType::EndpointRelation,
        "endpoint_keys"
    )]
    fn empty_required_key_list_is_rejected(
        #[case] yaml: &str,
        #[case] expected_scope: ScopeType,
        #[case] expected_field: &str,
    ) {
        let err = parse(yaml).validate().unwrap_err();

        match err {
            EntityConfigError::EmptyKeyList { scope, field } => {
                assert_eq!(scope, expected_scope);
                assert_eq!(field, expected_field);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[rstest]
    #[case(
        "scope: process_relation\nservice_keys: [svc]\ninstance_key: [inst]\ndetect_point_key: point\nsource_process_id_key: src_pid\ndest_process_id_key: dst_pid",
        "instance_key"
    )]
    #[case(
        "scope: service_relation\nsource_service_keys: [a]\ndest_service_keys: [b]\ndetect_point_key: side\ncomponent_id: component",
        "component_id"
    )]
    #[case("scope: service\nservice_keys: [svc]\nlayers: MESH", "layers")]
    fn misspelled_field_is_a_parse_error(#[case] yaml: &str, #[case] unknown_field: &str) {
        let err: EntityConfigError = serde_yaml::from_str::<EntityConfig>(yaml)
            .unwrap_err()
            .into();

        assert!(matches!(err, EntityConfigError::Parse(_)));
        assert!(
            err.to_string().contains(unknown_field),
            "error does not name `{unknown_field}`: {err}"
        );
    }

    #[test]
    fn empty_key_name_is_rejected_with_position() {
        let config = parse(
            r#"
            scope: process_relation
            service_keys: [svc, ""]
            detect_point_key: side
            source_process_id_key: src
            dest_process_id_key: dst
            "#,
        );

        let err = config.validate().unwrap_err();
        assert!(matches!(
            err,
            EntityConfigError::EmptyKeyName {
                scope: ScopeType::ProcessRelation,
                field: "service_keys",
                index: 1,
            }
        ));
        assert_eq!(
            err.to_string(),
            "PROCESS_RELATION entity has an empty key name at `service_keys[1]`"
        );
    }

    #[test]
    fn duplicate_label_keys_are_kept() {
        let config = parse(
            r#"
            scope: service_instance
            service_keys: [host]
            instance_keys: [host]
            "#,
        );

        let description = config.build().unwrap();
        assert_eq!(description.label_keys(), ["host", "host"]);
    }

    #[test]
    fn unknown_scope_fails_to_parse() {
        let result: Result<EntityConfig, _> = serde_yaml::from_str("scope: galaxy");
        assert!(result.is_err());
    }
}
