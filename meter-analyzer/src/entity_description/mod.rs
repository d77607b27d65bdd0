//! # Entity descriptions
//!
//! An [EntityDescription] tells the metric binder which label keys of a
//! sample identify an entity of a given [ScopeType], and in which order.
//!
//! The binder joins label values positionally to form the entity
//! identifier, so every variant composes its keys by a fixed concatenation:
//!
//! | Variant | `label_keys()` |
//! |---------|----------------|
//! | [ServiceEntityDescription] | service |
//! | [InstanceEntityDescription] | service, instance |
//! | [EndpointEntityDescription] | service, endpoint |
//! | [ProcessEntityDescription] | service, instance, process |
//! | [ServiceRelationEntityDescription] | source service, dest service, detect point, component? |
//! | [InstanceRelationEntityDescription] | source service, source instance, dest service, dest instance, detect point, component? |
//! | [EndpointRelationEntityDescription] | service, dest service, endpoint, dest endpoint, detect point, component? |
//! | [ProcessRelationEntityDescription] | service, instance, detect point, source process id, dest process id |
//!
//! Duplicate keys are kept as given.
//!
//! [ScopeType]: crate::ScopeType
mod entity;
mod relation;

use std::fmt::Debug;

use crate::scope::ScopeType;

pub use entity::{
    EndpointEntityDescription, InstanceEntityDescription, ProcessEntityDescription,
    ServiceEntityDescription,
};
pub use relation::{
    EndpointRelationEntityDescription, InstanceRelationEntityDescription,
    ProcessRelationEntityDescription, ServiceRelationEntityDescription,
};

/// The label-key contract of one entity scope.
///
/// Implementations are immutable once constructed and can be shared freely
/// between analyzer threads.
pub trait EntityDescription: Debug + Send + Sync {
    /// The scope this description identifies entities of.
    fn scope_type(&self) -> ScopeType;

    /// The ordered label keys a metric sample must carry values for.
    ///
    /// Every call builds a new vector owned by the caller.
    fn label_keys(&self) -> Vec<&str>;

    /// Separator the binder uses when joining multiple key values into one
    /// identifier segment.
    fn delimiter(&self) -> &str;
}

pub(crate) fn collect_keys(keys: impl IntoIterator<Item = impl Into<String>>) -> Vec<String> {
    keys.into_iter().map(Into::into).collect()
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;

    #[test]
    fn descriptions_dispatch_uniformly() {
        let descriptions: Vec<Box<dyn EntityDescription>> = vec![
            Box::new(ServiceEntityDescription::new(["svc"], ".")),
            Box::new(ProcessRelationEntityDescription::new(
                ["svc"],
                ["inst"],
                "src_pid",
                "dst_pid",
                "point",
                ".",
            )),
        ];

        let scopes: Vec<ScopeType> = descriptions.iter().map(|d| d.scope_type()).collect();
        assert_eq!(scopes, [ScopeType::Service, ScopeType::ProcessRelation]);
        assert_eq!(descriptions[0].label_keys(), ["svc"]);
        assert_eq!(
            descriptions[1].label_keys(),
            ["svc", "inst", "point", "src_pid", "dst_pid"]
        );
    }

    #[test]
    fn shared_description_reads_across_threads() {
        let description: Arc<dyn EntityDescription> = Arc::new(
            ProcessRelationEntityDescription::new(
                ["svc"],
                ["inst"],
                "src_pid",
                "dst_pid",
                "point",
                ".",
            ),
        );

        std::thread::scope(|s| {
            for _ in 0..4 {
                let description = Arc::clone(&description);
                s.spawn(move || {
                    for _ in 0..100 {
                        assert_eq!(
                            description.label_keys(),
                            ["svc", "inst", "point", "src_pid", "dst_pid"]
                        );
                    }
                });
            }
        });
    }
}
