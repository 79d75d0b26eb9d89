//! Basic usage example for kit-content

use kit_content::{
    Frontmatter, PlaceholderValues, convert_to_package, parse_rule_meta, strip_description, substitute,
};

fn main() -> kit_content::Result<()> {
    let rule = r#"---
id: Code Review
alwaysApply: false
description: Reviews pull requests
owner: platform
---
# Code review

Keep notes under {{DOCS_DIR}}/review.md.
"#;

    let meta = parse_rule_meta(rule).expect("example rule has an id");
    println!("id={} always_apply={} type={}", meta.id, meta.always_apply, meta.rule_type);

    // Simple integrations drop the description field.
    let stripped = strip_description(rule)?;
    println!("Stripped:\n{stripped}");

    // The rich integration turns on-demand rules into skill packages.
    if let Some(package) = convert_to_package(rule) {
        println!("Package {}:\n{}", package.name, package.content);
    }

    let values = PlaceholderValues::for_layout(".cursor", ".mdc");
    let doc = Frontmatter::parse(rule)?;
    println!("Body with paths:\n{}", substitute(Some(&doc.body), &values));

    Ok(())
}
