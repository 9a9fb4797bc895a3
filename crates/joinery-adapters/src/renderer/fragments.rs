//! Text spliced into existing files above their anchors.
//!
//! Fragments are returned without indentation; the modifier indents them
//! like the anchor line they land above.

use joinery_core::{
    application::ApplicationError,
    domain::{
        ArtifactKind, Entity, EntityProperty, Fragment, Policy, PolicyType, PropertyType,
        RenderModel, Subject,
    },
    error::JoineryResult,
};

pub(super) fn render(fragment: Fragment, model: &RenderModel) -> JoineryResult<String> {
    match fragment {
        Fragment::Property { target } => {
            let (_, property) = model.property().ok_or_else(|| missing(fragment, "a property"))?;
            property_block(target, property)
        }
        Fragment::DbSet => {
            let entity = entity(fragment, model)?;
            Ok(format!(
                "public DbSet<{}> {} {{ get; set; }}",
                entity.name,
                entity.plural()
            ))
        }
        Fragment::Seeder => {
            let entity = entity(fragment, model)?;
            let plural = entity.plural();
            Ok(format!(
                "if (!context.{plural}.Any())\n\
                 {{\n    context.{plural}.AddRange(new AutoFaker<{name}>().Generate(10));\n}}",
                name = entity.name
            ))
        }
        Fragment::DbContextRegistration => {
            let settings = &model.solution;
            let provider = settings
                .provider
                .ok_or_else(|| missing(fragment, "a database provider"))?;
            Ok(format!(
                "services.AddDbContext<{ctx}>(options =>\n    \
                 options.{method}(\n        \
                 configuration.GetConnectionString(\"{db}\"),\n        \
                 builder => builder.MigrationsAssembly(typeof({ctx}).Assembly.FullName)));",
                ctx = settings.db_context_name,
                method = provider.use_method(),
                db = settings.database_name,
            ))
        }
        Fragment::Policy => match &model.subject {
            Subject::Policy(policy) => Ok(policy_registration(policy)),
            _ => Err(missing(fragment, "a policy")),
        },
        Fragment::JwtAuth => Ok(concat!(
            "services.AddAuthentication(Microsoft.AspNetCore.Authentication.JwtBearer.JwtBearerDefaults.AuthenticationScheme)\n",
            "    .AddJwtBearer(options =>\n",
            "    {\n",
            "        options.Authority = configuration[\"JwtSettings:Authority\"];\n",
            "        options.Audience = configuration[\"JwtSettings:Audience\"];\n",
            "    });"
        )
        .to_string()),
    }
}

/// Declaration of one property as it appears in a file of kind `target`.
///
/// Navigation properties have no DTO representation, so DTO targets yield
/// an empty block for them. `foreign_entity_name` only contributes the
/// `[ForeignKey]` attribute naming the other half of the relationship.
pub(super) fn property_block(target: ArtifactKind, property: &EntityProperty) -> JoineryResult<String> {
    let property_type = property.property_type().map_err(|e| {
        ApplicationError::RenderingFailed {
            what: format!("property {}", property.name),
            reason: e.to_string(),
        }
    })?;

    let mut lines = Vec::new();
    if target == ArtifactKind::Entity {
        if property.is_primary_key {
            lines.push("[Key]".to_string());
            lines.push("[Required]".to_string());
        }
        if property.can_filter || property.can_sort {
            lines.push(format!(
                "[Sieve(CanFilter = {}, CanSort = {})]",
                property.can_filter, property.can_sort
            ));
        }
        if let Some(foreign) = &property.foreign_entity_name {
            lines.push(format!("[ForeignKey(\"{foreign}\")]"));
        }
    } else if property_type.is_foreign_key() {
        return Ok(String::new());
    }

    let modifier = match property_type {
        PropertyType::ForeignKey(_) => "public virtual",
        _ => "public",
    };
    lines.push(format!(
        "{modifier} {property_type} {} {{ get; set; }}",
        property.name
    ));

    Ok(lines.join("\n"))
}

fn policy_registration(policy: &Policy) -> String {
    let requirement = match policy.policy_type {
        PolicyType::Scope => format!("policy.RequireClaim(\"scope\", \"{}\")", policy.value()),
        PolicyType::Role => format!("policy.RequireRole(\"{}\")", policy.value()),
    };
    format!(
        "options.AddPolicy(\"{}\", policy => {requirement});",
        policy.name
    )
}

fn entity(fragment: Fragment, model: &RenderModel) -> JoineryResult<&Entity> {
    model.entity().ok_or_else(|| missing(fragment, "an entity"))
}

fn missing(fragment: Fragment, what: &str) -> joinery_core::error::JoineryError {
    ApplicationError::RenderingFailed {
        what: format!("{fragment} fragment"),
        reason: format!("model does not carry {what}"),
    }
    .into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use joinery_core::domain::{DbProvider, SolutionSettings};

    fn model(subject: Subject) -> RenderModel {
        RenderModel::new(
            SolutionSettings {
                solution_name: "Shop".into(),
                db_context_name: "ShopDbContext".into(),
                database_name: "Shop".into(),
                provider: Some(DbProvider::Postgres),
                ..SolutionSettings::default()
            },
            subject,
        )
    }

    #[test]
    fn property_for_entity_carries_sieve_attribute() {
        let p = EntityProperty::new("Name", "string").filterable(true);
        let block = property_block(ArtifactKind::Entity, &p).unwrap();
        assert_eq!(
            block,
            "[Sieve(CanFilter = true, CanSort = false)]\npublic string Name { get; set; }"
        );
    }

    #[test]
    fn property_for_dto_is_plain() {
        let p = EntityProperty::new("Sku", "string?").filterable(true);
        assert_eq!(
            property_block(ArtifactKind::DtoRead, &p).unwrap(),
            "public string? Sku { get; set; }"
        );
    }

    #[test]
    fn navigation_property_is_skipped_in_dtos() {
        let p = EntityProperty::new("Category", "Category");
        assert_eq!(property_block(ArtifactKind::DtoCreate, &p).unwrap(), "");
        assert_eq!(
            property_block(ArtifactKind::Entity, &p).unwrap(),
            "public virtual Category Category { get; set; }"
        );
    }

    #[test]
    fn foreign_key_name_decorates_the_navigation_property() {
        let p = EntityProperty::new("Product", "Product").with_foreign_entity("ProductId");
        assert_eq!(
            property_block(ArtifactKind::Entity, &p).unwrap(),
            "[ForeignKey(\"ProductId\")]\npublic virtual Product Product { get; set; }"
        );
        assert_eq!(property_block(ArtifactKind::DtoRead, &p).unwrap(), "");
    }

    #[test]
    fn db_context_registration_uses_provider_method() {
        let text = render(Fragment::DbContextRegistration, &model(Subject::Solution)).unwrap();
        assert!(text.starts_with("services.AddDbContext<ShopDbContext>"));
        assert!(text.contains("options.UseNpgsql("));
        assert!(text.contains("GetConnectionString(\"Shop\")"));
    }

    #[test]
    fn policy_registration_by_type() {
        let mut scope = Policy::new("CanReadProducts", PolicyType::Scope);
        scope.policy_value = Some("products.read".into());
        assert_eq!(
            render(Fragment::Policy, &model(Subject::Policy(scope))).unwrap(),
            "options.AddPolicy(\"CanReadProducts\", policy => policy.RequireClaim(\"scope\", \"products.read\"));"
        );

        let role = Policy::new("Admin", PolicyType::Role);
        assert!(render(Fragment::Policy, &model(Subject::Policy(role)))
            .unwrap()
            .contains("policy.RequireRole(\"Admin\")"));
    }

    #[test]
    fn fragment_without_its_subject_fails() {
        let err = render(Fragment::DbSet, &model(Subject::Solution)).unwrap_err();
        assert!(err.to_string().contains("entity"));
    }
}
