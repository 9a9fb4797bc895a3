//! The `ProjectTemplate` aggregate root and its children.
//!
//! A template is deserialized once from the user's YAML/JSON file and is then
//! read-only for the rest of the run, apart from the solution name and
//! DbContext name which the orchestrator may back-fill while resolving the
//! solution context.
//!
//! Keys are PascalCase on the wire (`SolutionName`, `IsPrimaryKey`, ...).
//! Every section except `Entities` is optional so that the reduced
//! "entities only" file used by `add entities` parses into the same type.
//!
//! # Domain purity
//!
//! This module must not import `tracing`.

use serde::{Deserialize, Serialize};

use crate::domain::{
    error::DomainError,
    value_objects::{DbProvider, Endpoint, PolicyType, PropertyType},
};

/// Port used when the template does not name one.
pub const DEFAULT_PORT: u16 = 5000;

// ── Aggregate root ────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct ProjectTemplate {
    pub solution_name: String,
    pub db_context: Option<DbContextConfig>,
    pub entities: Vec<Entity>,
    pub authorization_settings: AuthorizationSettings,
    pub swagger_config: SwaggerConfig,
    pub bus: BusConfig,
    pub producers: Vec<Producer>,
    pub consumers: Vec<Consumer>,
    pub environments: Vec<Environment>,
    pub port: Option<u16>,
    pub add_jwt_authentication: bool,
}

impl ProjectTemplate {
    pub fn new(solution_name: impl Into<String>) -> Self {
        Self {
            solution_name: solution_name.into(),
            ..Self::default()
        }
    }

    pub fn with_db_context(mut self, db_context: DbContextConfig) -> Self {
        self.db_context = Some(db_context);
        self
    }

    pub fn with_entity(mut self, entity: Entity) -> Self {
        self.entities.push(entity);
        self
    }

    pub fn with_policy(mut self, policy: Policy) -> Self {
        self.authorization_settings.policies.push(policy);
        self
    }

    pub fn with_environment(mut self, environment: Environment) -> Self {
        self.environments.push(environment);
        self
    }

    /// The solution name doubles as the base name of every generated project.
    pub fn project_base_name(&self) -> &str {
        &self.solution_name
    }

    pub fn policies(&self) -> &[Policy] {
        &self.authorization_settings.policies
    }

    pub fn port(&self) -> u16 {
        self.port.unwrap_or(DEFAULT_PORT)
    }

    /// Name of the DbContext class, falling back to `{Solution}DbContext`.
    pub fn db_context_name(&self) -> String {
        self.db_context
            .as_ref()
            .map(|c| c.context_name.trim())
            .filter(|name| !name.is_empty())
            .map(str::to_string)
            .unwrap_or_else(|| format!("{}DbContext", self.solution_name.replace(['.', '-'], "")))
    }

    pub fn entity(&self, name: &str) -> Option<&Entity> {
        self.entities.iter().find(|e| e.name == name)
    }
}

// ── DbContext ─────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct DbContextConfig {
    pub context_name: String,
    pub database_name: String,
    /// Raw provider string; parsed by [`DbContextConfig::provider`] so an
    /// unknown value surfaces as `InvalidDbProvider` rather than a parse error.
    pub provider: String,
}

impl DbContextConfig {
    pub fn new(
        context_name: impl Into<String>,
        database_name: impl Into<String>,
        provider: impl Into<String>,
    ) -> Self {
        Self {
            context_name: context_name.into(),
            database_name: database_name.into(),
            provider: provider.into(),
        }
    }

    pub fn provider(&self) -> Result<DbProvider, DomainError> {
        self.provider.parse()
    }
}

// ── Entity ────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Entity {
    pub name: String,
    #[serde(default)]
    pub plural: Option<String>,
    #[serde(default)]
    pub properties: Vec<EntityProperty>,
}

impl Entity {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            plural: None,
            properties: Vec::new(),
        }
    }

    pub fn with_plural(mut self, plural: impl Into<String>) -> Self {
        self.plural = Some(plural.into());
        self
    }

    pub fn with_property(mut self, property: EntityProperty) -> Self {
        self.properties.push(property);
        self
    }

    /// Display/route name; `Name + "s"` when the template omits it.
    pub fn plural(&self) -> String {
        match self.plural.as_deref().map(str::trim) {
            Some(p) if !p.is_empty() => p.to_string(),
            _ => format!("{}s", self.name),
        }
    }

    pub fn primary_keys(&self) -> impl Iterator<Item = &EntityProperty> {
        self.properties.iter().filter(|p| p.is_primary_key)
    }

    /// The primary key of a validated entity.
    pub fn primary_key(&self) -> Option<&EntityProperty> {
        self.primary_keys().next()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct EntityProperty {
    pub name: String,
    #[serde(rename = "Type")]
    pub type_name: String,
    #[serde(default)]
    pub is_primary_key: bool,
    #[serde(default)]
    pub can_filter: bool,
    #[serde(default)]
    pub can_sort: bool,
    #[serde(default)]
    pub foreign_entity_name: Option<String>,
}

impl EntityProperty {
    pub fn new(name: impl Into<String>, type_name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            type_name: type_name.into(),
            is_primary_key: false,
            can_filter: false,
            can_sort: false,
            foreign_entity_name: None,
        }
    }

    pub fn primary_key(mut self) -> Self {
        self.is_primary_key = true;
        self
    }

    pub fn filterable(mut self, can_filter: bool) -> Self {
        self.can_filter = can_filter;
        self
    }

    pub fn sortable(mut self, can_sort: bool) -> Self {
        self.can_sort = can_sort;
        self
    }

    pub fn with_foreign_entity(mut self, foreign: impl Into<String>) -> Self {
        self.foreign_entity_name = Some(foreign.into());
        self
    }

    pub fn property_type(&self) -> Result<PropertyType, DomainError> {
        PropertyType::parse(&self.name, &self.type_name)
    }
}

// ── Authorization ─────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct AuthorizationSettings {
    pub policies: Vec<Policy>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Policy {
    pub name: String,
    pub policy_type: PolicyType,
    #[serde(default)]
    pub policy_value: Option<String>,
    #[serde(default)]
    pub endpoints: Vec<Endpoint>,
}

impl Policy {
    pub fn new(name: impl Into<String>, policy_type: PolicyType) -> Self {
        Self {
            name: name.into(),
            policy_type,
            policy_value: None,
            endpoints: Vec::new(),
        }
    }

    pub fn with_endpoints(mut self, endpoints: impl IntoIterator<Item = Endpoint>) -> Self {
        self.endpoints.extend(endpoints);
        self
    }

    /// Claim value checked by the policy; defaults to the policy name.
    pub fn value(&self) -> &str {
        self.policy_value.as_deref().unwrap_or(&self.name)
    }

    pub fn guards(&self, endpoint: Endpoint) -> bool {
        self.endpoints.contains(&endpoint)
    }
}

// ── Cross-cutting settings ────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct SwaggerConfig {
    pub add_swagger_comments: bool,
    pub title: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct BusConfig {
    pub add_bus: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Producer {
    pub producer_name: String,
    #[serde(default)]
    pub exchange_name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Consumer {
    pub consumer_name: String,
    #[serde(default)]
    pub queue_name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Environment {
    pub environment_name: String,
    #[serde(default)]
    pub connection_string: Option<String>,
}

impl Environment {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            environment_name: name.into(),
            connection_string: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plural_defaults_to_name_plus_s() {
        assert_eq!(Entity::new("Product").plural(), "Products");
        assert_eq!(Entity::new("Person").with_plural("People").plural(), "People");
        assert_eq!(Entity::new("Sheep").with_plural("  ").plural(), "Sheeps");
    }

    #[test]
    fn db_context_name_falls_back_to_solution() {
        let t = ProjectTemplate::new("Shop.Api");
        assert_eq!(t.db_context_name(), "ShopApiDbContext");

        let t = t.with_db_context(DbContextConfig::new("StoreContext", "Store", "SqlServer"));
        assert_eq!(t.db_context_name(), "StoreContext");
    }

    #[test]
    fn deserializes_pascal_case_json() {
        let json = r#"{
            "SolutionName": "Shop",
            "DbContext": { "ContextName": "ShopDbContext", "DatabaseName": "Shop", "Provider": "SqlServer" },
            "Entities": [{
                "Name": "Product",
                "Properties": [
                    { "Name": "ProductId", "Type": "int", "IsPrimaryKey": true },
                    { "Name": "Name", "Type": "string", "CanFilter": true }
                ]
            }],
            "AuthorizationSettings": {
                "Policies": [{ "Name": "CanRead", "PolicyType": "Scope", "Endpoints": ["GetList", "GetRecord"] }]
            },
            "Bus": { "AddBus": true },
            "Port": 5123
        }"#;
        let t: ProjectTemplate = serde_json::from_str(json).unwrap();

        assert_eq!(t.solution_name, "Shop");
        assert_eq!(t.port(), 5123);
        assert!(t.bus.add_bus);
        assert!(!t.add_jwt_authentication);
        let product = t.entity("Product").unwrap();
        assert_eq!(product.primary_key().unwrap().name, "ProductId");
        assert!(product.properties[1].can_filter);
        assert!(t.policies()[0].guards(Endpoint::GetRecord));
        assert!(!t.policies()[0].guards(Endpoint::DeleteRecord));
    }

    #[test]
    fn entities_only_document_parses() {
        let t: ProjectTemplate =
            serde_json::from_str(r#"{ "Entities": [{ "Name": "Vet" }] }"#).unwrap();
        assert!(t.solution_name.is_empty());
        assert!(t.db_context.is_none());
        assert_eq!(t.port(), DEFAULT_PORT);
        assert_eq!(t.entities.len(), 1);
    }

    #[test]
    fn policy_value_defaults_to_name() {
        let p = Policy::new("orders.read", PolicyType::Scope);
        assert_eq!(p.value(), "orders.read");
    }
}
