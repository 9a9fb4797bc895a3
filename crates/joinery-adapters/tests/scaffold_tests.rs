//! End-to-end scaffolding against a real directory.

use std::{
    collections::BTreeMap,
    fs,
    path::{Path, PathBuf},
};

use joinery_adapters::{CSharpRenderer, LocalFilesystem, TemplateLoader};
use joinery_core::prelude::*;
use joinery_core::domain::{Environment, Policy, PolicyType, Endpoint};
use tempfile::TempDir;
use walkdir::WalkDir;

fn service() -> ScaffoldService {
    ScaffoldService::new(Box::new(LocalFilesystem::new()), Box::new(CSharpRenderer::new()))
}

fn shop() -> ProjectTemplate {
    ProjectTemplate::new("Shop")
        .with_db_context(DbContextConfig::new("ShopDbContext", "Shop", "SqlServer"))
        .with_entity(
            Entity::new("Product")
                .with_property(EntityProperty::new("ProductId", "int").primary_key())
                .with_property(EntityProperty::new("Name", "string").filterable(true)),
        )
}

/// Every file under `root` with its bytes, keyed by path relative to `root`.
fn snapshot(root: &Path) -> BTreeMap<PathBuf, Vec<u8>> {
    WalkDir::new(root)
        .into_iter()
        .filter_map(Result::ok)
        .filter(|e| e.file_type().is_file())
        .map(|e| {
            let rel = e.path().strip_prefix(root).unwrap().to_path_buf();
            (rel, fs::read(e.path()).unwrap())
        })
        .collect()
}

fn changed(before: &BTreeMap<PathBuf, Vec<u8>>, after: &BTreeMap<PathBuf, Vec<u8>>) -> Vec<PathBuf> {
    after
        .iter()
        .filter(|(path, bytes)| before.get(*path) != Some(*bytes))
        .map(|(path, _)| path.clone())
        .collect()
}

fn read(root: &Path, rel: &str) -> String {
    fs::read_to_string(root.join(rel)).unwrap()
}

// ============================================================================
// new
// ============================================================================

#[test]
fn scaffold_writes_exactly_the_registered_files() {
    let out = TempDir::new().unwrap();
    let mut ctx = RunContext::new();

    let root = service().scaffold_solution(&shop(), out.path(), &mut ctx).unwrap();
    assert_eq!(root, out.path().join("Shop"));

    let on_disk = snapshot(&root);
    assert_eq!(on_disk.len(), ctx.created().len());
    for path in ctx.created().all() {
        assert!(on_disk.contains_key(path), "{} missing on disk", path.display());
    }

    for rel in [
        "Shop.sln",
        "src/Shop.Core/Entities/Product.cs",
        "src/Shop.Core/Dtos/Product/ProductDto.cs",
        "src/Shop.Core/Dtos/Product/ProductForCreationDto.cs",
        "src/Shop.Core/Dtos/Product/ProductForUpdateDto.cs",
        "src/Shop.Core/Dtos/Product/ProductParametersDto.cs",
        "src/Shop.Core/Validation/Product/ProductValidator.cs",
        "src/Shop.Core/Mappings/ProductProfile.cs",
        "src/Shop.WebApi/Controllers/v1/ProductController.cs",
        "src/Shop.Infrastructure/Contexts/ShopDbContext.cs",
        "src/Shop.Infrastructure/Seeders/DbSeeder.cs",
        "src/Shop.Infrastructure/ServiceRegistration.cs",
        "tests/Shop.Tests/Fakes/Product/FakeProduct.cs",
    ] {
        assert!(on_disk.contains_key(Path::new(rel)), "{rel} not generated");
    }
}

#[test]
fn scaffold_patches_shared_files_above_their_anchors() {
    let out = TempDir::new().unwrap();
    let root = service()
        .scaffold_solution(&shop(), out.path(), &mut RunContext::new())
        .unwrap();

    let context = read(&root, "src/Shop.Infrastructure/Contexts/ShopDbContext.cs");
    assert!(context.contains(
        "    public DbSet<Product> Products { get; set; }\n    // DbSets -- Do Not Delete\n"
    ));

    let seeder = read(&root, "src/Shop.Infrastructure/Seeders/DbSeeder.cs");
    assert!(seeder.contains("        if (!context.Products.Any())\n"));
    assert!(seeder.contains("AutoFaker<Product>"));

    let registration = read(&root, "src/Shop.Infrastructure/ServiceRegistration.cs");
    assert!(registration.contains("services.AddDbContext<ShopDbContext>(options =>"));
    assert!(registration.contains("options.UseSqlServer("));
    assert_eq!(registration.matches("// DbContext -- Do Not Delete").count(), 1);
}

#[test]
fn scaffold_with_policies_environments_and_auth() {
    let mut template = shop()
        .with_policy(
            Policy::new("CanReadProducts", PolicyType::Scope).with_endpoints([Endpoint::GetList]),
        )
        .with_environment(Environment::new("Development"));
    template.add_jwt_authentication = true;

    let out = TempDir::new().unwrap();
    let root = service()
        .scaffold_solution(&template, out.path(), &mut RunContext::new())
        .unwrap();

    let registration = read(&root, "src/Shop.Infrastructure/ServiceRegistration.cs");
    assert_eq!(registration.matches("options.AddPolicy(\"CanReadProducts\"").count(), 1);
    assert!(registration.contains(".AddJwtBearer(options =>"));

    let controller = read(&root, "src/Shop.WebApi/Controllers/v1/ProductController.cs");
    assert!(controller.contains("[Authorize(Policy = \"CanReadProducts\")]"));

    let settings: serde_json::Value =
        serde_json::from_str(&read(&root, "src/Shop.WebApi/appsettings.Development.json"))
            .unwrap();
    assert_eq!(settings["Urls"], "https://localhost:5000");
}

#[test]
fn second_scaffold_fails_and_leaves_files_unchanged() {
    let out = TempDir::new().unwrap();
    let root = service()
        .scaffold_solution(&shop(), out.path(), &mut RunContext::new())
        .unwrap();
    let before = snapshot(&root);

    let mut ctx = RunContext::new();
    let err = service()
        .scaffold_solution(&shop(), out.path(), &mut ctx)
        .unwrap_err();

    assert!(matches!(
        err,
        JoineryError::Application(ApplicationError::AlreadyExists { .. })
    ));
    assert!(ctx.created().is_empty());
    assert_eq!(snapshot(&root), before);
}

#[test]
fn invalid_template_creates_nothing() {
    let mut template = shop();
    template.entities[0].properties[0].is_primary_key = false;

    let out = TempDir::new().unwrap();
    let err = service()
        .scaffold_solution(&template, out.path(), &mut RunContext::new())
        .unwrap_err();

    assert!(err.is_pre_mutation());
    assert!(!out.path().join("Shop").exists());
}

#[test]
fn template_file_drives_a_scaffold() {
    let out = TempDir::new().unwrap();
    let path = out.path().join("shop.json");
    fs::write(
        &path,
        r#"{
            "SolutionName": "Shop",
            "DbContext": { "ContextName": "ShopDbContext", "DatabaseName": "Shop", "Provider": "Sqlite" },
            "Entities": [{ "Name": "Order", "Properties": [{ "Name": "OrderId", "Type": "Guid", "IsPrimaryKey": true }] }]
        }"#,
    )
    .unwrap();

    let template = TemplateLoader::new().load(&path).unwrap();
    let root = service()
        .scaffold_solution(&template, out.path(), &mut RunContext::new())
        .unwrap();

    let registration = read(&root, "src/Shop.Infrastructure/ServiceRegistration.cs");
    assert!(registration.contains("options.UseSqlite("));
    assert!(root.join("src/Shop.Core/Entities/Order.cs").exists());
}

// ============================================================================
// add entity / add prop
// ============================================================================

#[test]
fn add_entities_extends_an_existing_solution() {
    let out = TempDir::new().unwrap();
    let root = service()
        .scaffold_solution(&shop(), out.path(), &mut RunContext::new())
        .unwrap();

    let order = ProjectTemplate::new("").with_entity(
        Entity::new("Order").with_property(EntityProperty::new("OrderId", "int").primary_key()),
    );
    let mut ctx = RunContext::new();
    service().add_entities(&order, &root, &mut ctx).unwrap();

    assert!(ctx.created().contains(Path::new("src/Shop.Core/Entities/Order.cs")));
    let context = read(&root, "src/Shop.Infrastructure/Contexts/ShopDbContext.cs");
    assert!(context.contains("public DbSet<Product> Products { get; set; }"));
    assert!(context.contains("public DbSet<Order> Orders { get; set; }"));
}

#[test]
fn add_property_touches_only_entity_and_its_dtos() {
    let out = TempDir::new().unwrap();
    let root = service()
        .scaffold_solution(&shop(), out.path(), &mut RunContext::new())
        .unwrap();
    let before = snapshot(&root);

    let sku = EntityProperty::new("Sku", "string");
    let mut ctx = RunContext::new();
    service().add_property(&root, "Product", &sku, &mut ctx).unwrap();

    let after = snapshot(&root);
    assert_eq!(after.len(), before.len());
    assert_eq!(
        changed(&before, &after),
        [
            PathBuf::from("src/Shop.Core/Dtos/Product/ProductDto.cs"),
            PathBuf::from("src/Shop.Core/Dtos/Product/ProductForCreationDto.cs"),
            PathBuf::from("src/Shop.Core/Dtos/Product/ProductForUpdateDto.cs"),
            PathBuf::from("src/Shop.Core/Entities/Product.cs"),
        ]
    );
    assert!(read(&root, "src/Shop.Core/Entities/Product.cs").contains(
        "{ get; set; }\n\n    public string Sku { get; set; }\n\n    // Properties -- Do Not Delete\n"
    ));
    assert!(ctx.created().is_empty());

    // Running it again changes nothing.
    let mut again = RunContext::new();
    service().add_property(&root, "Product", &sku, &mut again).unwrap();
    assert_eq!(snapshot(&root), after);
    assert!(again.modified().is_empty());
    assert_eq!(again.skipped().len(), 4);
}

#[test]
fn add_property_cannot_redeclare_an_existing_name() {
    let out = TempDir::new().unwrap();
    let root = service()
        .scaffold_solution(&shop(), out.path(), &mut RunContext::new())
        .unwrap();
    let before = snapshot(&root);

    for property in [
        EntityProperty::new("ProductId", "Guid"),
        EntityProperty::new("Name", "string").sortable(true),
    ] {
        let err = service()
            .add_property(&root, "Product", &property, &mut RunContext::new())
            .unwrap_err();
        assert!(
            matches!(err, JoineryError::Domain(DomainError::DuplicateProperty { .. })),
            "{}: {err}",
            property.name
        );
    }

    assert_eq!(snapshot(&root), before);
    let entity = read(&root, "src/Shop.Core/Entities/Product.cs");
    assert_eq!(entity.matches(" ProductId { get; set; }").count(), 1);
    assert_eq!(entity.matches(" Name { get; set; }").count(), 1);
}

#[test]
fn add_property_outside_a_solution_is_rejected() {
    let dir = TempDir::new().unwrap();
    let err = service()
        .add_property(
            dir.path(),
            "Product",
            &EntityProperty::new("Sku", "string"),
            &mut RunContext::new(),
        )
        .unwrap_err();

    assert!(matches!(
        err,
        JoineryError::Application(ApplicationError::NotABoundedContextDirectory { .. })
    ));
}
