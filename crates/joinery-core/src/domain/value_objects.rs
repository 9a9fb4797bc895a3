//! Domain value objects: DbProvider, PolicyType, Endpoint, PropertyType, ArtifactKind.
//!
//! # Design
//!
//! These are pure value types with equality-by-value and no identity. Path
//! layout for each [`ArtifactKind`] lives in `artifacts.rs`; this file only
//! defines the types, their string representations, and their parsers.
//!
//! # Adding a New Artifact Kind
//!
//! 1. Add the enum variant and its `as_str` arm here
//! 2. Add an `ArtifactDef` entry in `artifacts.rs`
//! 3. Teach the renderer adapter how to render it

use crate::domain::error::DomainError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// ── DbProvider ───────────────────────────────────────────────────────────────

/// Database provider the generated infrastructure project targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DbProvider {
    SqlServer,
    Postgres,
    MySql,
    Sqlite,
}

impl DbProvider {
    pub const ALL: [DbProvider; 4] = [Self::SqlServer, Self::Postgres, Self::MySql, Self::Sqlite];

    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::SqlServer => "SqlServer",
            Self::Postgres => "Postgres",
            Self::MySql => "MySql",
            Self::Sqlite => "Sqlite",
        }
    }

    /// Name of the EF Core registration call for this provider.
    pub const fn use_method(&self) -> &'static str {
        match self {
            Self::SqlServer => "UseSqlServer",
            Self::Postgres => "UseNpgsql",
            Self::MySql => "UseMySql",
            Self::Sqlite => "UseSqlite",
        }
    }
}

impl fmt::Display for DbProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DbProvider {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "sqlserver" | "mssql" => Ok(Self::SqlServer),
            "postgres" | "postgresql" | "npgsql" => Ok(Self::Postgres),
            "mysql" => Ok(Self::MySql),
            "sqlite" => Ok(Self::Sqlite),
            _ => Err(DomainError::InvalidDbProvider {
                provider: s.to_string(),
            }),
        }
    }
}

// ── Authorization ────────────────────────────────────────────────────────────

/// How an authorization policy is evaluated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PolicyType {
    Scope,
    Role,
}

impl PolicyType {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Scope => "Scope",
            Self::Role => "Role",
        }
    }
}

impl fmt::Display for PolicyType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Controller endpoints a policy can guard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Endpoint {
    GetList,
    GetRecord,
    AddRecord,
    UpdateRecord,
    UpdatePartial,
    DeleteRecord,
}

impl Endpoint {
    pub const ALL: [Endpoint; 6] = [
        Self::GetList,
        Self::GetRecord,
        Self::AddRecord,
        Self::UpdateRecord,
        Self::UpdatePartial,
        Self::DeleteRecord,
    ];

    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::GetList => "GetList",
            Self::GetRecord => "GetRecord",
            Self::AddRecord => "AddRecord",
            Self::UpdateRecord => "UpdateRecord",
            Self::UpdatePartial => "UpdatePartial",
            Self::DeleteRecord => "DeleteRecord",
        }
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ── PropertyType ─────────────────────────────────────────────────────────────

/// Built-in scalar types a property can have.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Primitive {
    String,
    Int,
    Long,
    Short,
    Byte,
    Bool,
    Decimal,
    Double,
    Float,
    Char,
    Guid,
    DateTime,
    DateTimeOffset,
    DateOnly,
    TimeOnly,
    TimeSpan,
}

impl Primitive {
    /// Keyword used in generated code.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::String => "string",
            Self::Int => "int",
            Self::Long => "long",
            Self::Short => "short",
            Self::Byte => "byte",
            Self::Bool => "bool",
            Self::Decimal => "decimal",
            Self::Double => "double",
            Self::Float => "float",
            Self::Char => "char",
            Self::Guid => "Guid",
            Self::DateTime => "DateTime",
            Self::DateTimeOffset => "DateTimeOffset",
            Self::DateOnly => "DateOnly",
            Self::TimeOnly => "TimeOnly",
            Self::TimeSpan => "TimeSpan",
        }
    }

    fn parse(s: &str) -> Option<Self> {
        let p = match s.to_ascii_lowercase().as_str() {
            "string" => Self::String,
            "int" | "int32" => Self::Int,
            "long" | "int64" => Self::Long,
            "short" | "int16" => Self::Short,
            "byte" => Self::Byte,
            "bool" | "boolean" => Self::Bool,
            "decimal" => Self::Decimal,
            "double" => Self::Double,
            "float" | "single" => Self::Float,
            "char" => Self::Char,
            "guid" => Self::Guid,
            "datetime" => Self::DateTime,
            "datetimeoffset" => Self::DateTimeOffset,
            "dateonly" => Self::DateOnly,
            "timeonly" => Self::TimeOnly,
            "timespan" => Self::TimeSpan,
            _ => return None,
        };
        Some(p)
    }
}

/// Semantic type of an entity property.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PropertyType {
    Primitive(Primitive),
    Nullable(Primitive),
    /// Navigation to another entity; the string is that entity's name.
    ForeignKey(String),
}

impl PropertyType {
    /// Parse the raw `Type` string of the property called `property`.
    pub fn parse(property: &str, raw: &str) -> Result<Self, DomainError> {
        let invalid = || DomainError::InvalidPropertyType {
            property: property.to_string(),
            type_name: raw.to_string(),
        };

        let trimmed = raw.trim();
        if let Some(inner) = trimmed.strip_suffix('?') {
            return Primitive::parse(inner.trim())
                .map(Self::Nullable)
                .ok_or_else(invalid);
        }
        if let Some(p) = Primitive::parse(trimmed) {
            return Ok(Self::Primitive(p));
        }
        if crate::domain::entities::common::is_identifier(trimmed) {
            return Ok(Self::ForeignKey(trimmed.to_string()));
        }
        Err(invalid())
    }

    pub fn is_foreign_key(&self) -> bool {
        matches!(self, Self::ForeignKey(_))
    }
}

impl fmt::Display for PropertyType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Primitive(p) => f.write_str(p.as_str()),
            Self::Nullable(p) => write!(f, "{}?", p.as_str()),
            Self::ForeignKey(entity) => f.write_str(entity),
        }
    }
}

// ── ArtifactKind ─────────────────────────────────────────────────────────────

/// Every kind of file the engine knows how to place.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ArtifactKind {
    SolutionFile,
    Entity,
    DtoRead,
    DtoCreate,
    DtoUpdate,
    DtoReadParameters,
    Validator,
    Profile,
    Controller,
    ServiceRegistration,
    Fake,
    Seeder,
    DbContext,
    TestFixture,
    TestBase,
    ApiRoutes,
    HealthCheckTest,
    SwaggerRegistration,
    BusRegistration,
    Producer,
    Consumer,
    AppSettings,
}

impl ArtifactKind {
    /// Files generated once per entity, in build order.
    pub const PER_ENTITY: [ArtifactKind; 9] = [
        Self::Entity,
        Self::DtoRead,
        Self::DtoCreate,
        Self::DtoUpdate,
        Self::DtoReadParameters,
        Self::Validator,
        Self::Profile,
        Self::Controller,
        Self::Fake,
    ];

    pub const DTOS: [ArtifactKind; 4] = [
        Self::DtoRead,
        Self::DtoCreate,
        Self::DtoUpdate,
        Self::DtoReadParameters,
    ];

    /// Kinds whose files carry a property section that `add prop` extends.
    pub const fn carries_properties(&self) -> bool {
        matches!(
            self,
            Self::Entity | Self::DtoRead | Self::DtoCreate | Self::DtoUpdate
        )
    }

    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::SolutionFile => "solution-file",
            Self::Entity => "entity",
            Self::DtoRead => "dto-read",
            Self::DtoCreate => "dto-create",
            Self::DtoUpdate => "dto-update",
            Self::DtoReadParameters => "dto-read-parameters",
            Self::Validator => "validator",
            Self::Profile => "profile",
            Self::Controller => "controller",
            Self::ServiceRegistration => "service-registration",
            Self::Fake => "fake",
            Self::Seeder => "seeder",
            Self::DbContext => "db-context",
            Self::TestFixture => "test-fixture",
            Self::TestBase => "test-base",
            Self::ApiRoutes => "api-routes",
            Self::HealthCheckTest => "health-check-test",
            Self::SwaggerRegistration => "swagger-registration",
            Self::BusRegistration => "bus-registration",
            Self::Producer => "producer",
            Self::Consumer => "consumer",
            Self::AppSettings => "app-settings",
        }
    }
}

impl fmt::Display for ArtifactKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn provider_parses_aliases_case_insensitively() {
        assert_eq!("sqlserver".parse::<DbProvider>().unwrap(), DbProvider::SqlServer);
        assert_eq!("PostgreSQL".parse::<DbProvider>().unwrap(), DbProvider::Postgres);
        assert_eq!("SQLite".parse::<DbProvider>().unwrap(), DbProvider::Sqlite);
    }

    #[test]
    fn unknown_provider_is_invalid_db_provider() {
        assert!(matches!(
            "Oracle".parse::<DbProvider>(),
            Err(DomainError::InvalidDbProvider { provider }) if provider == "Oracle"
        ));
    }

    #[test]
    fn property_type_distinguishes_primitive_nullable_and_foreign() {
        assert_eq!(
            PropertyType::parse("Id", "int").unwrap(),
            PropertyType::Primitive(Primitive::Int)
        );
        assert_eq!(
            PropertyType::parse("When", "DateTime?").unwrap(),
            PropertyType::Nullable(Primitive::DateTime)
        );
        assert_eq!(
            PropertyType::parse("Product", "Product").unwrap(),
            PropertyType::ForeignKey("Product".into())
        );
    }

    #[test]
    fn nullable_foreign_key_is_rejected() {
        assert!(matches!(
            PropertyType::parse("Owner", "Person?"),
            Err(DomainError::InvalidPropertyType { .. })
        ));
    }

    #[test]
    fn garbage_type_is_rejected() {
        assert!(PropertyType::parse("X", "List<int>").is_err());
        assert!(PropertyType::parse("X", "").is_err());
    }

    #[test]
    fn property_type_display_round_trips_keyword() {
        assert_eq!(PropertyType::parse("X", "guid").unwrap().to_string(), "Guid");
        assert_eq!(PropertyType::parse("X", "int?").unwrap().to_string(), "int?");
    }

    #[test]
    fn only_entity_and_three_dtos_carry_properties() {
        let carrying: Vec<_> = ArtifactKind::PER_ENTITY
            .iter()
            .filter(|k| k.carries_properties())
            .collect();
        assert_eq!(carrying.len(), 4);
        assert!(!ArtifactKind::DtoReadParameters.carries_properties());
    }
}
