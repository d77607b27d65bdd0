use crate::scope::{Layer, ScopeType};

use super::{collect_keys, EntityDescription};

/// Identifies a call relation between two services.
///
/// Label keys are the source service keys, the destination service keys,
/// the detect point key and, when set, the component id key.
#[derive(Clone, Debug, Hash, PartialEq, Eq)]
pub struct ServiceRelationEntityDescription {
    source_service_keys: Vec<String>,
    dest_service_keys: Vec<String>,
    detect_point_key: String,
    component_id_key: Option<String>,
    layer: Layer,
    delimiter: String,
}

impl ServiceRelationEntityDescription {
    /// Create a description in the [Layer::GENERAL] layer without a
    /// component id key.
    pub fn new(
        source_service_keys: impl IntoIterator<Item = impl Into<String>>,
        dest_service_keys: impl IntoIterator<Item = impl Into<String>>,
        detect_point_key: impl Into<String>,
        delimiter: impl Into<String>,
    ) -> Self {
        ServiceRelationEntityDescription {
            source_service_keys: collect_keys(source_service_keys),
            dest_service_keys: collect_keys(dest_service_keys),
            detect_point_key: detect_point_key.into(),
            component_id_key: None,
            layer: Layer::GENERAL,
            delimiter: delimiter.into(),
        }
    }

    /// Place the relation in the given layer.
    pub fn with_layer(mut self, layer: Layer) -> Self {
        self.layer = layer;
        self
    }

    /// Append the given key to the label keys as the relation's component id.
    pub fn with_component_id_key(mut self, component_id_key: impl Into<String>) -> Self {
        self.component_id_key = Some(component_id_key.into());
        self
    }

    /// Label keys identifying the calling service.
    pub fn source_service_keys(&self) -> &[String] {
        &self.source_service_keys
    }

    /// Label keys identifying the called service.
    pub fn dest_service_keys(&self) -> &[String] {
        &self.dest_service_keys
    }

    /// Label key holding the side (client or server) the relation was observed on.
    pub fn detect_point_key(&self) -> &str {
        &self.detect_point_key
    }

    /// Label key holding the component id, if configured.
    pub fn component_id_key(&self) -> Option<&str> {
        self.component_id_key.as_deref()
    }

    /// Layer of the relation.
    pub fn layer(&self) -> &Layer {
        &self.layer
    }
}

impl EntityDescription for ServiceRelationEntityDescription {
    fn scope_type(&self) -> ScopeType {
        ScopeType::ServiceRelation
    }

    fn label_keys(&self) -> Vec<&str> {
        self.source_service_keys
            .iter()
            .chain(&self.dest_service_keys)
            .map(String::as_str)
            .chain([self.detect_point_key.as_str()])
            .chain(self.component_id_key.as_deref())
            .collect()
    }

    fn delimiter(&self) -> &str {
        &self.delimiter
    }
}

/// Identifies a call relation between two service instances.
///
/// Label keys are the source service and instance keys, the destination
/// service and instance keys, the detect point key and, when set, the
/// component id key.
#[derive(Clone, Debug, Hash, PartialEq, Eq)]
pub struct InstanceRelationEntityDescription {
    source_service_keys: Vec<String>,
    source_instance_keys: Vec<String>,
    dest_service_keys: Vec<String>,
    dest_instance_keys: Vec<String>,
    detect_point_key: String,
    component_id_key: Option<String>,
    layer: Layer,
    delimiter: String,
}

impl InstanceRelationEntityDescription {
    /// Create a description in the [Layer::GENERAL] layer without a
    /// component id key.
    pub fn new(
        source_service_keys: impl IntoIterator<Item = impl Into<String>>,
        source_instance_keys: impl IntoIterator<Item = impl Into<String>>,
        dest_service_keys: impl IntoIterator<Item = impl Into<String>>,
        dest_instance_keys: impl IntoIterator<Item = impl Into<String>>,
        detect_point_key: impl Into<String>,
        delimiter: impl Into<String>,
    ) -> Self {
        InstanceRelationEntityDescription {
            source_service_keys: collect_keys(source_service_keys),
            source_instance_keys: collect_keys(source_instance_keys),
            dest_service_keys: collect_keys(dest_service_keys),
            dest_instance_keys: collect_keys(dest_instance_keys),
            detect_point_key: detect_point_key.into(),
            component_id_key: None,
            layer: Layer::GENERAL,
            delimiter: delimiter.into(),
        }
    }

    /// Place the relation in the given layer.
    pub fn with_layer(mut self, layer: Layer) -> Self {
        self.layer = layer;
        self
    }

    /// Append the given key to the label keys as the relation's component id.
    pub fn with_component_id_key(mut self, component_id_key: impl Into<String>) -> Self {
        self.component_id_key = Some(component_id_key.into());
        self
    }

    /// Source service keys.
    pub fn source_service_keys(&self) -> &[String] {
        &self.source_service_keys
    }

    /// Source instance keys.
    pub fn source_instance_keys(&self) -> &[String] {
        &self.source_instance_keys
    }

    /// Destination service keys.
    pub fn dest_service_keys(&self) -> &[String] {
        &self.dest_service_keys
    }

    /// Destination instance keys.
    pub fn dest_instance_keys(&self) -> &[String] {
        &self.dest_instance_keys
    }

    /// Detect point key.
    pub fn detect_point_key(&self) -> &str {
        &self.detect_point_key
    }

    /// Component id key, if configured.
    pub fn component_id_key(&self) -> Option<&str> {
        self.component_id_key.as_deref()
    }

    /// Layer of the relation.
    pub fn layer(&self) -> &Layer {
        &self.layer
    }
}

impl EntityDescription for InstanceRelationEntityDescription {
    fn scope_type(&self) -> ScopeType {
        ScopeType::ServiceInstanceRelation
    }

    fn label_keys(&self) -> Vec<&str> {
        self.source_service_keys
            .iter()
            .chain(&self.source_instance_keys)
            .chain(&self.dest_service_keys)
            .chain(&self.dest_instance_keys)
            .map(String::as_str)
            .chain([self.detect_point_key.as_str()])
            .chain(self.component_id_key.as_deref())
            .collect()
    }

    fn delimiter(&self) -> &str {
        &self.delimiter
    }
}

/// Identifies a call relation between two endpoints.
///
/// Label keys are the service keys, the destination service keys, the
/// endpoint keys, the destination endpoint keys, the detect point key and,
/// when set, the component id key. Both services come before both endpoints.
#[derive(Clone, Debug, Hash, PartialEq, Eq)]
pub struct EndpointRelationEntityDescription {
    service_keys: Vec<String>,
    dest_service_keys: Vec<String>,
    endpoint_keys: Vec<String>,
    dest_endpoint_keys: Vec<String>,
    detect_point_key: String,
    component_id_key: Option<String>,
    layer: Layer,
    delimiter: String,
}

impl EndpointRelationEntityDescription {
    /// Create a description in the [Layer::GENERAL] layer without a
    /// component id key.
    pub fn new(
        service_keys: impl IntoIterator<Item = impl Into<String>>,
        dest_service_keys: impl IntoIterator<Item = impl Into<String>>,
        endpoint_keys: impl IntoIterator<Item = impl Into<String>>,
        dest_endpoint_keys: impl IntoIterator<Item = impl Into<String>>,
        detect_point_key: impl Into<String>,
        delimiter: impl Into<String>,
    ) -> Self {
        EndpointRelationEntityDescription {
            service_keys: collect_keys(service_keys),
            dest_service_keys: collect_keys(dest_service_keys),
            endpoint_keys: collect_keys(endpoint_keys),
            dest_endpoint_keys: collect_keys(dest_endpoint_keys),
            detect_point_key: detect_point_key.into(),
            component_id_key: None,
            layer: Layer::GENERAL,
            delimiter: delimiter.into(),
        }
    }

    /// Place the relation in the given layer.
    pub fn with_layer(mut self, layer: Layer) -> Self {
        self.layer = layer;
        self
    }

    /// Append the given key to the label keys as the relation's component id.
    pub fn with_component_id_key(mut self, component_id_key: impl Into<String>) -> Self {
        self.component_id_key = Some(component_id_key.into());
        self
    }

    /// Source service keys.
    pub fn service_keys(&self) -> &[String] {
        &self.service_keys
    }

    /// Destination service keys.
    pub fn dest_service_keys(&self) -> &[String] {
        &self.dest_service_keys
    }

    /// Source endpoint keys.
    pub fn endpoint_keys(&self) -> &[String] {
        &self.endpoint_keys
    }

    /// Destination endpoint keys.
    pub fn dest_endpoint_keys(&self) -> &[String] {
        &self.dest_endpoint_keys
    }

    /// Detect point key.
    pub fn detect_point_key(&self) -> &str {
        &self.detect_point_key
    }

    /// Component id key, if configured.
    pub fn component_id_key(&self) -> Option<&str> {
        self.component_id_key.as_deref()
    }

    /// Layer of the relation.
    pub fn layer(&self) -> &Layer {
        &self.layer
    }
}

impl EntityDescription for EndpointRelationEntityDescription {
    fn scope_type(&self) -> ScopeType {
        ScopeType::EndpointRelation
    }

    fn label_keys(&self) -> Vec<&str> {
        self.service_keys
            .iter()
            .chain(&self.dest_service_keys)
            .chain(&self.endpoint_keys)
            .chain(&self.dest_endpoint_keys)
            .map(String::as_str)
            .chain([self.detect_point_key.as_str()])
            .chain(self.component_id_key.as_deref())
            .collect()
    }

    fn delimiter(&self) -> &str {
        &self.delimiter
    }
}

/// Identifies a network relation between two processes.
///
/// Label keys are the service keys, the instance keys, then the detect
/// point, source process id and destination process id keys. The three
/// single keys are always present, so the list is never empty.
///
/// # Example
///
/// ```
/// use meter_analyzer::{EntityDescription, ProcessRelationEntityDescription, ScopeType};
///
/// let description = ProcessRelationEntityDescription::new(
///     ["service"],
///     ["instance"],
///     "client_process_id",
///     "server_process_id",
///     "side",
///     ".",
/// );
///
/// assert_eq!(description.scope_type(), ScopeType::ProcessRelation);
/// assert_eq!(
///     description.label_keys(),
///     ["service", "instance", "side", "client_process_id", "server_process_id"]
/// );
/// ```
#[derive(Clone, Debug, Hash, PartialEq, Eq)]
pub struct ProcessRelationEntityDescription {
    service_keys: Vec<String>,
    instance_keys: Vec<String>,
    source_process_id_key: String,
    dest_process_id_key: String,
    detect_point_key: String,
    delimiter: String,
}

impl ProcessRelationEntityDescription {
    /// Create a process relation description.
    ///
    /// Service and instance keys may be empty. No argument is validated.
    pub fn new(
        service_keys: impl IntoIterator<Item = impl Into<String>>,
        instance_keys: impl IntoIterator<Item = impl Into<String>>,
        source_process_id_key: impl Into<String>,
        dest_process_id_key: impl Into<String>,
        detect_point_key: impl Into<String>,
        delimiter: impl Into<String>,
    ) -> Self {
        ProcessRelationEntityDescription {
            service_keys: collect_keys(service_keys),
            instance_keys: collect_keys(instance_keys),
            source_process_id_key: source_process_id_key.into(),
            dest_process_id_key: dest_process_id_key.into(),
            detect_point_key: detect_point_key.into(),
            delimiter: delimiter.into(),
        }
    }

    /// Label keys identifying the service both processes belong to.
    pub fn service_keys(&self) -> &[String] {
        &self.service_keys
    }

    /// Label keys identifying the instance both processes run in.
    pub fn instance_keys(&self) -> &[String] {
        &self.instance_keys
    }

    /// Label key holding the id of the process that initiated the relation.
    pub fn source_process_id_key(&self) -> &str {
        &self.source_process_id_key
    }

    /// Label key holding the id of the process that accepted the relation.
    pub fn dest_process_id_key(&self) -> &str {
        &self.dest_process_id_key
    }

    /// Label key holding the side the relation was observed on.
    pub fn detect_point_key(&self) -> &str {
        &self.detect_point_key
    }
}

impl EntityDescription for ProcessRelationEntityDescription {
    fn scope_type(&self) -> ScopeType {
        ScopeType::ProcessRelation
    }

    fn label_keys(&self) -> Vec<&str> {
        self.service_keys
            .iter()
            .chain(&self.instance_keys)
            .map(String::as_str)
            .chain([
                self.detect_point_key.as_str(),
                self.source_process_id_key.as_str(),
                self.dest_process_id_key.as_str(),
            ])
            .collect()
    }

    fn delimiter(&self) -> &str {
        &self.delimiter
    }
}
