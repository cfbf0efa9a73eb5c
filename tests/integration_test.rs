use std::fs;
use std::path::Path;
use std::process::{Command, Output};

use tempfile::TempDir;

fn folio_cmd() -> Command {
    Command::new(env!("CARGO_BIN_EXE_folio"))
}

fn write(root: &Path, rel: &str, content: &str) {
    let path = root.join(rel);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, content).unwrap();
}

/// Content root with three dated articles and two ordered projects.
fn fixture() -> TempDir {
    let tmp = TempDir::new().unwrap();
    let root = tmp.path().join("content");

    write(
        &root,
        "articles/a.md",
        "---\nid: a\ntitle: First Post\ndate: 2024-01-01\ntags: [x, y]\n---\nHello from a.\n",
    );
    write(
        &root,
        "articles/b.md",
        "---\nid: b\ntitle: Second Post\ndate: 2024-02-01\ntags: [y, z]\nfeatured: true\n---\nHello from b.\n",
    );
    write(
        &root,
        "articles/c.md",
        "---\nid: c\ntitle: Third Post\ndate: 2024-03-01\ntags: [q]\n---\nHello from c.\n",
    );
    write(&root, "articles/broken.md", "this file has no frontmatter\n");

    write(
        &root,
        "projects/folio.md",
        "---\ntitle: Folio\norder: 2\ntechStack: [Rust, Axum]\n---\nContent engine.\n",
    );
    write(
        &root,
        "projects/site.mdx",
        "---\ntitle: Site\norder: 1\ntechStack: [TypeScript, Rust]\n---\nThe site.\n",
    );

    tmp
}

fn run(tmp: &TempDir, args: &[&str]) -> Output {
    folio_cmd()
        .current_dir(tmp.path())
        .arg("--content-dir")
        .arg(tmp.path().join("content"))
        .args(args)
        .output()
        .unwrap()
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).to_string()
}

fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).to_string()
}

#[test]
fn test_list_articles_newest_first() {
    let tmp = fixture();

    let output = run(&tmp, &["list", "articles"]);
    assert!(output.status.success());
    let out = stdout(&output);
    let c = out.find("Third Post").unwrap();
    let b = out.find("Second Post").unwrap();
    let a = out.find("First Post").unwrap();
    assert!(c < b && b < a);
    assert!(!out.contains("broken"));
}

#[test]
fn test_list_projects_by_order_as_json() {
    let tmp = fixture();

    let output = run(&tmp, &["list", "project", "--json"]);
    assert!(output.status.success());
    let items: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let slugs: Vec<_> = items
        .as_array()
        .unwrap()
        .iter()
        .map(|i| i["slug"].as_str().unwrap())
        .collect();
    assert_eq!(slugs, vec!["site", "folio"]);
    assert_eq!(items[0]["readingTime"], 1);
}

#[test]
fn test_list_featured_and_tag() {
    let tmp = fixture();

    let out = stdout(&run(&tmp, &["list", "blog", "--featured"]));
    assert!(out.contains("Second Post"));
    assert!(!out.contains("First Post"));

    let out = stdout(&run(&tmp, &["list", "blog", "--tag", "X"]));
    assert!(out.contains("First Post"));
    assert!(!out.contains("Third Post"));
}

#[test]
fn test_get_by_slug() {
    let tmp = fixture();

    let output = run(&tmp, &["get", "article", "b"]);
    assert!(output.status.success());
    let out = stdout(&output);
    assert!(out.contains("Title: Second Post"));
    assert!(out.contains("Reading time: 1 min"));
    assert!(out.contains("Hello from b."));

    let output = run(&tmp, &["get", "article", "b", "--json"]);
    assert!(stdout(&output).contains("\"title\": \"Second Post\""));
}

#[test]
fn test_get_missing_slug_fails() {
    let tmp = fixture();

    let output = run(&tmp, &["get", "article", "missing"]);
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("article not found: missing"));
}

#[test]
fn test_unknown_kind_fails() {
    let tmp = fixture();

    let output = run(&tmp, &["list", "recipes"]);
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Invalid content kind"));
}

#[test]
fn test_missing_content_dir_is_store_error() {
    let tmp = TempDir::new().unwrap();

    let output = run(&tmp, &["list", "articles"]);
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Content store unavailable"));
}

#[test]
fn test_nav() {
    let tmp = fixture();

    let out = stdout(&run(&tmp, &["nav", "article", "b"]));
    assert!(out.contains("Previous: c - Third Post"));
    assert!(out.contains("Next: a - First Post"));

    let out = stdout(&run(&tmp, &["nav", "article", "c"]));
    assert!(out.contains("Previous: (none)"));

    let output = run(&tmp, &["nav", "article", "missing"]);
    assert!(!output.status.success());
}

#[test]
fn test_related() {
    let tmp = fixture();

    let output = run(&tmp, &["related", "article", "a", "--limit", "1", "--json"]);
    assert!(output.status.success());
    let items: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(items.as_array().unwrap().len(), 1);
    assert_eq!(items[0]["slug"], "b");

    let out = stdout(&run(&tmp, &["related", "article", "c"]));
    assert!(out.contains("No related article items for c."));

    let out = stdout(&run(&tmp, &["related", "project", "folio"]));
    assert!(out.contains("site - Site"));
}

#[test]
fn test_sitemap_to_file() {
    let tmp = fixture();
    let target = tmp.path().join("public/sitemap.xml");

    let output = run(&tmp, &["sitemap", "--output", target.to_str().unwrap()]);
    assert!(output.status.success());

    let xml = fs::read_to_string(&target).unwrap();
    assert!(xml.contains("<loc>http://localhost:3000/about</loc>"));
    assert!(xml.contains("<loc>http://localhost:3000/blog/c</loc>"));
    assert!(xml.contains("<loc>http://localhost:3000/projects/site</loc>"));
    assert!(xml.contains("<lastmod>2024-03-01</lastmod>"));
}

#[test]
fn test_config_file_is_used() {
    let tmp = fixture();
    fs::write(
        tmp.path().join("folio.yaml"),
        "base_url: https://me.dev\nstatic_routes: [\"/\"]\n",
    )
    .unwrap();

    let out = stdout(&run(&tmp, &["sitemap"]));
    assert!(out.contains("<loc>https://me.dev/</loc>"));
    assert!(!out.contains("/about"));
}

#[test]
fn test_check_reports_duplicates() {
    let tmp = fixture();

    let output = run(&tmp, &["check"]);
    assert!(output.status.success());
    assert!(stdout(&output).contains("0 warning(s)"));

    write(
        &tmp.path().join("content"),
        "articles/copy.md",
        "---\nid: a\ndate: 2023-01-01\ntags: [x]\n---\n",
    );
    let output = run(&tmp, &["check", "--strict"]);
    assert_eq!(output.status.code(), Some(2));
    assert!(stdout(&output).contains("article slug 'a' is used by 2 items"));
    assert!(stderr(&output).contains("Content check failed: 1 warning(s)"));
}

#[test]
fn test_check_fails_on_missing_content_dir() {
    let tmp = TempDir::new().unwrap();

    let output = folio_cmd()
        .current_dir(tmp.path())
        .arg("--content-dir")
        .arg(tmp.path().join("does-not-exist"))
        .args(["check", "--strict"])
        .output()
        .unwrap();

    assert!(!output.status.success());
    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("Content store unavailable"));
}
