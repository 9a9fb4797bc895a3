//! Integration tests for the `joinery` binary.

use std::fs;
use std::path::PathBuf;

use assert_cmd::{Command, cargo};
use predicates::prelude::*;
use tempfile::TempDir;

const SHOP: &str = "\
SolutionName: Shop
DbContext:
  ContextName: ShopDbContext
  DatabaseName: Shop
  Provider: SqlServer
Entities:
  - Name: Product
    Properties:
      - Name: ProductId
        Type: int
        IsPrimaryKey: true
      - Name: Name
        Type: string
        CanFilter: true
";

const ORDER: &str = "\
Entities:
  - Name: Order
    Properties:
      - Name: OrderId
        Type: int
        IsPrimaryKey: true
";

/// Binary running inside `dir`, with config and env isolated from the host.
fn joinery(dir: &TempDir) -> Command {
    let mut cmd = cargo::cargo_bin_cmd!("joinery");
    cmd.current_dir(dir.path())
        .env("HOME", dir.path())
        .env("XDG_CONFIG_HOME", dir.path().join(".config"))
        .env_remove("RUST_LOG")
        .env_remove("NO_COLOR");
    cmd
}

fn write(dir: &TempDir, name: &str, contents: &str) {
    fs::write(dir.path().join(name), contents).unwrap();
}

/// Scaffold `out/Shop` from [`SHOP`].
fn scaffold_shop(dir: &TempDir) {
    write(dir, "shop.yaml", SHOP);
    joinery(dir)
        .args(["new", "shop.yaml", "-o", "out", "--yes"])
        .assert()
        .success();
}

fn entity_file(dir: &TempDir, name: &str) -> PathBuf {
    dir.path()
        .join("out/Shop/src/Shop.Core/Entities")
        .join(format!("{name}.cs"))
}

// ============================================================================
// help / version
// ============================================================================

#[test]
fn help_lists_subcommands() {
    let dir = TempDir::new().unwrap();
    joinery(&dir)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("new"))
        .stdout(predicate::str::contains("add"))
        .stdout(predicate::str::contains("completions"));
}

#[test]
fn version_flag() {
    let dir = TempDir::new().unwrap();
    joinery(&dir)
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn no_arguments_is_a_usage_error() {
    let dir = TempDir::new().unwrap();
    joinery(&dir).assert().code(2);
}

// ============================================================================
// new
// ============================================================================

#[test]
fn new_creates_the_solution() {
    let dir = TempDir::new().unwrap();
    write(&dir, "shop.yaml", SHOP);

    joinery(&dir)
        .args(["new", "shop.yaml", "-o", "out", "--yes"])
        .assert()
        .success()
        .stdout(predicate::str::contains("+ Shop.sln"))
        .stdout(predicate::str::contains("Solution 'Shop' created"));

    let root = dir.path().join("out/Shop");
    assert!(root.join("Shop.sln").is_file());
    assert!(root.join("src/Shop.Core/Entities/Product.cs").is_file());
    assert!(root.join("tests/Shop.Tests").is_dir());
}

#[test]
fn dry_run_writes_nothing() {
    let dir = TempDir::new().unwrap();
    write(&dir, "shop.yaml", SHOP);

    joinery(&dir)
        .args(["new", "shop.yaml", "-o", "out", "--dry-run"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Dry run"))
        .stdout(predicate::str::contains("Shop.sln"));

    assert!(!dir.path().join("out").exists());
}

#[test]
fn second_new_refuses_to_overwrite() {
    let dir = TempDir::new().unwrap();
    scaffold_shop(&dir);
    let sln = dir.path().join("out/Shop/Shop.sln");
    let before = fs::read_to_string(&sln).unwrap();

    joinery(&dir)
        .args(["new", "shop.yaml", "-o", "out", "--yes"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("already exists"));

    assert_eq!(fs::read_to_string(&sln).unwrap(), before);
}

#[test]
fn template_without_primary_key_is_rejected() {
    let dir = TempDir::new().unwrap();
    write(
        &dir,
        "shop.yaml",
        &SHOP.replace("        IsPrimaryKey: true\n", ""),
    );

    joinery(&dir)
        .args(["new", "shop.yaml", "-o", "out", "--yes"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("primary key"));

    assert!(!dir.path().join("out").exists());
}

#[test]
fn unknown_template_extension_is_rejected() {
    let dir = TempDir::new().unwrap();
    write(&dir, "shop.txt", SHOP);

    joinery(&dir)
        .args(["new", "shop.txt", "--yes"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("invalid template file"));
}

#[test]
fn json_output_is_a_manifest() {
    let dir = TempDir::new().unwrap();
    write(&dir, "shop.yaml", SHOP);

    let assert = joinery(&dir)
        .args(["--output-format", "json", "new", "shop.yaml", "-o", "out", "--yes"])
        .assert()
        .success();

    let manifest: serde_json::Value =
        serde_json::from_slice(&assert.get_output().stdout).unwrap();
    assert_eq!(manifest["command"], "new");
    assert_eq!(manifest["dry_run"], false);
    assert!(manifest["run_id"].is_string());
    assert!(
        manifest["created"]
            .as_array()
            .unwrap()
            .iter()
            .any(|p| p == "Shop.sln")
    );
}

// ============================================================================
// add
// ============================================================================

#[test]
fn add_prop_patches_the_entity_once() {
    let dir = TempDir::new().unwrap();
    scaffold_shop(&dir);

    let args = [
        "add", "prop", "-e", "Product", "-n", "Sku", "-t", "string", "--solution", "out/Shop",
    ];
    joinery(&dir)
        .args(args)
        .assert()
        .success()
        .stdout(predicate::str::contains("Added 'Sku' to 'Product'"));

    let entity = fs::read_to_string(entity_file(&dir, "Product")).unwrap();
    assert_eq!(entity.matches("public string Sku { get; set; }").count(), 1);

    joinery(&dir)
        .args(args)
        .assert()
        .success()
        .stdout(predicate::str::contains("nothing changed"));

    let again = fs::read_to_string(entity_file(&dir, "Product")).unwrap();
    assert_eq!(again, entity);
}

#[test]
fn add_prop_outside_a_solution_is_not_found() {
    let dir = TempDir::new().unwrap();

    joinery(&dir)
        .args(["add", "prop", "-e", "Product", "-n", "Sku", "-t", "string"])
        .assert()
        .code(3)
        .stderr(predicate::str::contains("not a bounded-context directory"));
}

#[test]
fn add_entities_creates_the_new_entity() {
    let dir = TempDir::new().unwrap();
    scaffold_shop(&dir);
    write(&dir, "order.yaml", ORDER);

    joinery(&dir)
        .args(["add", "entities", "order.yaml", "--solution", "out/Shop"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Added Order"));

    assert!(entity_file(&dir, "Order").is_file());
    let context = fs::read_to_string(
        dir.path()
            .join("out/Shop/src/Shop.Infrastructure/Contexts/ShopDbContext.cs"),
    )
    .unwrap();
    assert!(context.contains("DbSet<Order> Orders"));
}

// ============================================================================
// completions / config / init
// ============================================================================

#[test]
fn bash_completions_name_the_binary() {
    let dir = TempDir::new().unwrap();
    joinery(&dir)
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("joinery"));
}

#[test]
fn config_get_reads_defaults() {
    let dir = TempDir::new().unwrap();
    joinery(&dir)
        .args(["config", "get", "output.format"])
        .assert()
        .success()
        .stdout(predicate::str::contains("auto"));
}

#[test]
fn config_get_unknown_key_is_a_config_error() {
    let dir = TempDir::new().unwrap();
    joinery(&dir)
        .args(["config", "get", "nope"])
        .assert()
        .code(4);
}

#[test]
fn init_writes_the_config_file_it_is_pointed_at() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("joinery.toml");
    let path_arg = path.to_str().unwrap();

    joinery(&dir)
        .args(["--config", path_arg, "init"])
        .assert()
        .success();
    assert!(path.is_file());

    joinery(&dir)
        .args(["--config", path_arg, "config", "path"])
        .assert()
        .success()
        .stdout(predicate::str::contains("joinery.toml"));
}

#[test]
fn config_file_values_are_used() {
    let dir = TempDir::new().unwrap();
    write(&dir, "joinery.toml", "[output]\nformat = \"plain\"\n");

    joinery(&dir)
        .args(["--config", "joinery.toml", "config", "get", "output.format"])
        .assert()
        .success()
        .stdout(predicate::str::contains("plain"));
}

#[test]
fn missing_config_file_exits_with_config_code() {
    let dir = TempDir::new().unwrap();
    joinery(&dir)
        .args(["--config", "definitely-missing.toml", "config", "list"])
        .assert()
        .code(4);
}
