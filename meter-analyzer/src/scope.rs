use std::{borrow::Cow, fmt};

use serde::Deserialize;

/// The kind of monitored entity an analyzer rule attributes its metrics to.
#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq)]
pub enum ScopeType {
    /// A logical service.
    Service,
    /// One running instance of a service.
    ServiceInstance,
    /// An endpoint exposed by a service.
    Endpoint,
    /// An operating-system process belonging to an instance.
    Process,
    /// A call relation between two services.
    ServiceRelation,
    /// A call relation between two service instances.
    ServiceInstanceRelation,
    /// A call relation between two endpoints.
    EndpointRelation,
    /// A network relation between two processes.
    ProcessRelation,
}

impl ScopeType {
    /// Canonical upper-snake name of the scope.
    pub fn as_str(&self) -> &'static str {
        match self {
            ScopeType::Service => "SERVICE",
            ScopeType::ServiceInstance => "SERVICE_INSTANCE",
            ScopeType::Endpoint => "ENDPOINT",
            ScopeType::Process => "PROCESS",
            ScopeType::ServiceRelation => "SERVICE_RELATION",
            ScopeType::ServiceInstanceRelation => "SERVICE_INSTANCE_RELATION",
            ScopeType::EndpointRelation => "ENDPOINT_RELATION",
            ScopeType::ProcessRelation => "PROCESS_RELATION",
        }
    }

    /// Whether entities of this scope connect a source and a destination.
    pub fn is_relation(&self) -> bool {
        matches!(
            self,
            ScopeType::ServiceRelation
                | ScopeType::ServiceInstanceRelation
                | ScopeType::EndpointRelation
                | ScopeType::ProcessRelation
        )
    }
}

impl fmt::Display for ScopeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The technology layer an entity belongs to, e.g. `GENERAL` or `K8S`.
///
/// The name is carried through to the binder untouched.
#[derive(Clone, Debug, Hash, PartialEq, Eq, Deserialize)]
#[serde(transparent)]
pub struct Layer(Cow<'static, str>);

impl Layer {
    /// Layer used when a rule does not name one.
    pub const GENERAL: Layer = Layer(Cow::Borrowed("GENERAL"));

    /// Create a layer from its name.
    pub fn new(name: impl Into<Cow<'static, str>>) -> Self {
        Layer(name.into())
    }

    /// The layer name.
    pub fn as_str(&self) -> &str {
        self.0.as_ref()
    }
}

impl Default for Layer {
    fn default() -> Self {
        Layer::GENERAL
    }
}

impl fmt::Display for Layer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case(ScopeType::Service, "SERVICE", false)]
    #[case(ScopeType::ServiceInstance, "SERVICE_INSTANCE", false)]
    #[case(ScopeType::Endpoint, "ENDPOINT", false)]
    #[case(ScopeType::Process, "PROCESS", false)]
    #[case(ScopeType::ServiceRelation, "SERVICE_RELATION", true)]
    #[case(ScopeType::ServiceInstanceRelation, "SERVICE_INSTANCE_RELATION", true)]
    #[case(ScopeType::EndpointRelation, "ENDPOINT_RELATION", true)]
    #[case(ScopeType::ProcessRelation, "PROCESS_RELATION", true)]
    fn scope_type_names(
        #[case] scope: ScopeType,
        #[case] expected_name: &str,
        #[case] expected_relation: bool,
    ) {
        assert_eq!(scope.as_str(), expected_name);
        assert_eq!(scope.to_string(), expected_name);
        assert_eq!(scope.is_relation(), expected_relation);
    }

    #[test]
    fn layer_defaults_to_general() {
        assert_eq!(Layer::default(), Layer::GENERAL);
        assert_eq!(Layer::default().as_str(), "GENERAL");
        assert_eq!(Layer::new("K8S").to_string(), "K8S");
    }

    #[test]
    fn layer_deserializes_from_plain_string() {
        let layer: Layer = serde_yaml::from_str("MESH").unwrap();
        assert_eq!(layer, Layer::new("MESH"));
    }
}
