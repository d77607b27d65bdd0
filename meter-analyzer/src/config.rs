//! # Analyzer rule configuration
//!
//! Loads the entity part of analyzer rules from YAML and turns each rule
//! into a shared, immutable [EntityDescription].
//!
//! ```yaml
//! rules:
//!   - name: process_relation_tcp
//!     entity:
//!       scope: process_relation
//!       service_keys: [service]
//!       instance_keys: [instance]
//!       detect_point_key: side
//!       source_process_id_key: client_process_id
//!       dest_process_id_key: server_process_id
//! ```

pub mod entity_config;

use std::{collections::HashSet, path::Path, sync::Arc};

use serde::Deserialize;

use crate::{
    entity_description::EntityDescription,
    error::{EntityConfigError, EntityConfigResult},
    scope::ScopeType,
};

pub use entity_config::EntityConfig;

/// One analyzer rule as written in configuration.
#[derive(Clone, Debug, Deserialize)]
pub struct EntityRuleConfig {
    /// Unique name of the rule.
    pub name: String,
    /// Entity the rule attributes its metrics to.
    pub entity: EntityConfig,
}

/// A set of analyzer rules.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct EntityRulesConfig {
    /// Rules in declaration order.
    #[serde(default)]
    pub rules: Vec<EntityRuleConfig>,
}

impl EntityRulesConfig {
    /// Parses rules from a YAML string.
    pub fn from_yaml(yaml_str: &str) -> EntityConfigResult<Self> {
        let config: EntityRulesConfig = serde_yaml::from_str(yaml_str)?;
        Ok(config)
    }

    /// Parses rules from a YAML file.
    pub fn from_yaml_file(file_path: impl AsRef<Path>) -> EntityConfigResult<Self> {
        let yaml_str = std::fs::read_to_string(file_path)?;
        Self::from_yaml(&yaml_str)
    }

    /// Validates every rule and builds its entity description.
    ///
    /// Fails on the first invalid rule or on a repeated rule name.
    pub fn build(self) -> EntityConfigResult<Vec<EntityRule>> {
        let mut names = HashSet::new();
        let mut rules = Vec::with_capacity(self.rules.len());

        for rule in self.rules {
            if !names.insert(rule.name.clone()) {
                analyzer_warn!(name: "EntityRule.Invalid", rule = rule.name.as_str(), reason = "duplicate name");
                return Err(EntityConfigError::DuplicateRule(rule.name));
            }

            let scope = rule.entity.scope_type();
            let description = match rule.entity.build() {
                Ok(description) => description,
                Err(err) => {
                    analyzer_warn!(
                        name: "EntityRule.Invalid",
                        rule = rule.name.as_str(),
                        reason = err.to_string(),
                    );
                    return Err(err);
                }
            };

            analyzer_debug!(
                name: "EntityRule.Built",
                rule = rule.name.as_str(),
                scope = scope.as_str(),
                label_key_count = description.label_keys().len(),
            );
            rules.push(EntityRule::new(rule.name, description));
        }

        analyzer_debug!(name: "EntityRules.Loaded", rule_count = rules.len());
        Ok(rules)
    }
}

/// A named analyzer rule bound to the entity description it declared.
///
/// Cloning shares the description.
#[derive(Clone, Debug)]
pub struct EntityRule {
    name: String,
    description: Arc<dyn EntityDescription>,
}

impl EntityRule {
    /// Binds a rule name to a description.
    pub fn new(name: impl Into<String>, description: Arc<dyn EntityDescription>) -> Self {
        EntityRule {
            name: name.into(),
            description,
        }
    }

    /// Rule name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The rule's entity description.
    pub fn description(&self) -> &Arc<dyn EntityDescription> {
        &self.description
    }

    /// Shorthand for the description's scope.
    pub fn scope_type(&self) -> ScopeType {
        self.description.scope_type()
    }

    /// Shorthand for the description's label keys.
    pub fn label_keys(&self) -> Vec<&str> {
        self.description.label_keys()
    }
}
