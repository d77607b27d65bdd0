use crate::scope::{Layer, ScopeType};

use super::{collect_keys, EntityDescription};

/// Identifies a service by its service keys.
#[derive(Clone, Debug, Hash, PartialEq, Eq)]
pub struct ServiceEntityDescription {
    service_keys: Vec<String>,
    layer: Layer,
    delimiter: String,
}

impl ServiceEntityDescription {
    /// Create a description in the [Layer::GENERAL] layer.
    pub fn new(
        service_keys: impl IntoIterator<Item = impl Into<String>>,
        delimiter: impl Into<String>,
    ) -> Self {
        ServiceEntityDescription {
            service_keys: collect_keys(service_keys),
            layer: Layer::GENERAL,
            delimiter: delimiter.into(),
        }
    }

    /// Place the service in the given layer.
    pub fn with_layer(mut self, layer: Layer) -> Self {
        self.layer = layer;
        self
    }

    /// Label keys identifying the service.
    pub fn service_keys(&self) -> &[String] {
        &self.service_keys
    }

    /// Layer of the service.
    pub fn layer(&self) -> &Layer {
        &self.layer
    }
}

impl EntityDescription for ServiceEntityDescription {
    fn scope_type(&self) -> ScopeType {
        ScopeType::Service
    }

    fn label_keys(&self) -> Vec<&str> {
        self.service_keys.iter().map(String::as_str).collect()
    }

    fn delimiter(&self) -> &str {
        &self.delimiter
    }
}

/// Identifies a service instance by its service keys followed by its
/// instance keys.
#[derive(Clone, Debug, Hash, PartialEq, Eq)]
pub struct InstanceEntityDescription {
    service_keys: Vec<String>,
    instance_keys: Vec<String>,
    layer: Layer,
    delimiter: String,
}

impl InstanceEntityDescription {
    /// Create a description in the [Layer::GENERAL] layer.
    pub fn new(
        service_keys: impl IntoIterator<Item = impl Into<String>>,
        instance_keys: impl IntoIterator<Item = impl Into<String>>,
        delimiter: impl Into<String>,
    ) -> Self {
        InstanceEntityDescription {
            service_keys: collect_keys(service_keys),
            instance_keys: collect_keys(instance_keys),
            layer: Layer::GENERAL,
            delimiter: delimiter.into(),
        }
    }

    /// Place the instance in the given layer.
    pub fn with_layer(mut self, layer: Layer) -> Self {
        self.layer = layer;
        self
    }

    /// Label keys identifying the owning service.
    pub fn service_keys(&self) -> &[String] {
        &self.service_keys
    }

    /// Label keys identifying the instance within its service.
    pub fn instance_keys(&self) -> &[String] {
        &self.instance_keys
    }

    /// Layer of the instance.
    pub fn layer(&self) -> &Layer {
        &self.layer
    }
}

impl EntityDescription for InstanceEntityDescription {
    fn scope_type(&self) -> ScopeType {
        ScopeType::ServiceInstance
    }

    fn label_keys(&self) -> Vec<&str> {
        self.service_keys
            .iter()
            .chain(&self.instance_keys)
            .map(String::as_str)
            .collect()
    }

    fn delimiter(&self) -> &str {
        &self.delimiter
    }
}

/// Identifies an endpoint by its service keys followed by its endpoint keys.
#[derive(Clone, Debug, Hash, PartialEq, Eq)]
pub struct EndpointEntityDescription {
    service_keys: Vec<String>,
    endpoint_keys: Vec<String>,
    layer: Layer,
    delimiter: String,
}

impl EndpointEntityDescription {
    /// Create a description in the [Layer::GENERAL] layer.
    pub fn new(
        service_keys: impl IntoIterator<Item = impl Into<String>>,
        endpoint_keys: impl IntoIterator<Item = impl Into<String>>,
        delimiter: impl Into<String>,
    ) -> Self {
        EndpointEntityDescription {
            service_keys: collect_keys(service_keys),
            endpoint_keys: collect_keys(endpoint_keys),
            layer: Layer::GENERAL,
            delimiter: delimiter.into(),
        }
    }

    /// Place the endpoint in the given layer.
    pub fn with_layer(mut self, layer: Layer) -> Self {
        self.layer = layer;
        self
    }

    /// Label keys identifying the owning service.
    pub fn service_keys(&self) -> &[String] {
        &self.service_keys
    }

    /// Label keys identifying the endpoint within its service.
    pub fn endpoint_keys(&self) -> &[String] {
        &self.endpoint_keys
    }

    /// Layer of the endpoint.
    pub fn layer(&self) -> &Layer {
        &self.layer
    }
}

impl EntityDescription for EndpointEntityDescription {
    fn scope_type(&self) -> ScopeType {
        ScopeType::Endpoint
    }

    fn label_keys(&self) -> Vec<&str> {
        self.service_keys
            .iter()
            .chain(&self.endpoint_keys)
            .map(String::as_str)
            .collect()
    }

    fn delimiter(&self) -> &str {
        &self.delimiter
    }
}

/// Identifies a process by service, instance and process keys, in that order.
#[derive(Clone, Debug, Hash, PartialEq, Eq)]
pub struct ProcessEntityDescription {
    service_keys: Vec<String>,
    instance_keys: Vec<String>,
    process_keys: Vec<String>,
    layer: Layer,
    delimiter: String,
}

impl ProcessEntityDescription {
    /// Create a description in the [Layer::GENERAL] layer.
    pub fn new(
        service_keys: impl IntoIterator<Item = impl Into<String>>,
        instance_keys: impl IntoIterator<Item = impl Into<String>>,
        process_keys: impl IntoIterator<Item = impl Into<String>>,
        delimiter: impl Into<String>,
    ) -> Self {
        ProcessEntityDescription {
            service_keys: collect_keys(service_keys),
            instance_keys: collect_keys(instance_keys),
            process_keys: collect_keys(process_keys),
            layer: Layer::GENERAL,
            delimiter: delimiter.into(),
        }
    }

    /// Place the process in the given layer.
    pub fn with_layer(mut self, layer: Layer) -> Self {
        self.layer = layer;
        self
    }

    /// Service keys.
    pub fn service_keys(&self) -> &[String] {
        &self.service_keys
    }

    /// Instance keys.
    pub fn instance_keys(&self) -> &[String] {
        &self.instance_keys
    }

    /// Process keys.
    pub fn process_keys(&self) -> &[String] {
        &self.process_keys
    }

    /// Layer.
    pub fn layer(&self) -> &Layer {
        &self.layer
    }
}

impl EntityDescription for ProcessEntityDescription {
    fn scope_type(&self) -> ScopeType {
        ScopeType::Process
    }

    fn label_keys(&self) -> Vec<&str> {
        self.service_keys
            .iter()
            .chain(&self.instance_keys)
            .chain(&self.process_keys)
            .map(String::as_str)
            .collect()
    }

    fn delimiter(&self) -> &str {
        &self.delimiter
    }
}
