//! # Meter analyzer entity descriptions
//!
//! Every meter analyzer rule attributes the samples it aggregates to one
//! monitored entity: a service, an instance, an endpoint, a process, or a
//! relation between two of them. This crate describes, for each scope,
//! which label keys of a sample identify the entity and in which order the
//! binder must read them.
//!
//! Descriptions are plain immutable values behind the [EntityDescription]
//! trait. They are built once while loading rules, either directly through
//! their constructors or from YAML through [config::EntityRulesConfig].
//!
//! ```
//! use meter_analyzer::config::EntityRulesConfig;
//! use meter_analyzer::ScopeType;
//!
//! let rules = EntityRulesConfig::from_yaml(
//!     r#"
//! rules:
//!   - name: process_relation_tcp
//!     entity:
//!       scope: process_relation
//!       service_keys: [service]
//!       instance_keys: [instance]
//!       detect_point_key: side
//!       source_process_id_key: client_process_id
//!       dest_process_id_key: server_process_id
//! "#,
//! )?
//! .build()?;
//!
//! assert_eq!(rules[0].scope_type(), ScopeType::ProcessRelation);
//! assert_eq!(
//!     rules[0].label_keys(),
//!     ["service", "instance", "side", "client_process_id", "server_process_id"]
//! );
//! # Ok::<(), meter_analyzer::error::EntityConfigError>(())
//! ```
#![warn(
    future_incompatible,
    missing_debug_implementations,
    nonstandard_style,
    rust_2018_idioms,
    unreachable_pub,
    unused
)]
#![cfg_attr(docsrs, feature(doc_cfg), deny(rustdoc::broken_intra_doc_links))]

#[macro_use]
mod internal_logging;

pub mod config;
pub mod entity_description;
pub mod error;
mod scope;

pub use entity_description::{
    EndpointEntityDescription, EndpointRelationEntityDescription, EntityDescription,
    InstanceEntityDescription, InstanceRelationEntityDescription, ProcessEntityDescription,
    ProcessRelationEntityDescription, ServiceEntityDescription,
    ServiceRelationEntityDescription,
};
pub use scope::{Layer, ScopeType};
