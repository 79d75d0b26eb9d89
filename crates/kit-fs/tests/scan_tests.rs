use kit_fs::checksum::compute_content_checksum;
use kit_fs::scan_directory;
use pretty_assertions::assert_eq;
use std::fs;
use tempfile::TempDir;

fn write(root: &std::path::Path, rel: &str, content: &str) {
    let path = root.join(rel);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, content).unwrap();
}

#[test]
fn identical_trees_scan_equal() {
    let a = TempDir::new().unwrap();
    let b = TempDir::new().unwrap();
    for root in [a.path(), b.path()] {
        write(root, "rules/one.md", "one");
        write(root, "rules/nested/two.md", "two");
    }

    assert_eq!(scan_directory(a.path()).unwrap(), scan_directory(b.path()).unwrap());
}

#[test]
fn single_byte_change_changes_only_that_entry() {
    let temp = TempDir::new().unwrap();
    write(temp.path(), "a.md", "alpha");
    write(temp.path(), "b.md", "beta");
    let before = scan_directory(temp.path()).unwrap();

    write(temp.path(), "b.md", "betA");
    let after = scan_directory(temp.path()).unwrap();

    assert_eq!(before["a.md"], after["a.md"]);
    assert_ne!(before["b.md"], after["b.md"]);
    assert_eq!(after["b.md"], compute_content_checksum("betA"));
}

#[test]
fn rescanning_unchanged_tree_is_deterministic() {
    let temp = TempDir::new().unwrap();
    write(temp.path(), "docs/x.md", "x");
    write(temp.path(), "commands/y.md", "y");

    let first = scan_directory(temp.path()).unwrap();
    let second = scan_directory(temp.path()).unwrap();

    assert_eq!(first, second);
    assert_eq!(first.len(), 2);
}

#[test]
fn mtime_only_change_is_invisible() {
    let temp = TempDir::new().unwrap();
    write(temp.path(), "rule.md", "same");
    let before = scan_directory(temp.path()).unwrap();

    std::thread::sleep(std::time::Duration::from_millis(20));
    write(temp.path(), "rule.md", "same");

    assert_eq!(before, scan_directory(temp.path()).unwrap());
}
