use std::collections::BTreeMap;
use std::path::Path;

use anyhow::Result;
use software_dmv::config::{Config, ParameterValue};
use software_dmv::templates::{
  TemplateError, comment_style_for_file, format_header, format_with_comment_style, placeholder_names,
};

fn config_with(pairs: &[(&str, ParameterValue)]) -> Config {
  let mut config = Config::default();
  config.merge_parameters(pairs.iter().map(|(k, v)| (k.to_string(), v.clone())));
  config
}

#[test]
fn test_format_header_from_config() -> Result<()> {
  let config = config_with(&[
    ("year", ParameterValue::from("2024")),
    ("author", ParameterValue::from("Alice")),
  ]);

  let header = format_header("Copyright {{ year }} {{ author }}", Path::new("main.rs"), &config)?;
  assert_eq!(header, "Copyright 2024 Alice");

  Ok(())
}

#[test]
fn test_format_header_renders_non_string_values() -> Result<()> {
  let config = config_with(&[
    ("year", ParameterValue::Integer(2024)),
    ("version", ParameterValue::Float(2.5)),
    ("patented", ParameterValue::Boolean(false)),
  ]);

  let header = format_header(
    "{{year}} v{{version}} patented={{patented}}",
    Path::new("main.rs"),
    &config,
  )?;
  assert_eq!(header, "2024 v2.5 patented=false");

  Ok(())
}

#[test]
fn test_format_header_without_placeholders() -> Result<()> {
  let config = Config::default();
  let template = "This file is in the public domain.\n";

  assert_eq!(format_header(template, Path::new("main.rs"), &config)?, template);

  Ok(())
}

#[test]
fn test_format_header_missing_parameter_is_an_error() {
  let config = config_with(&[("year", ParameterValue::from("2024"))]);

  let result = format_header("Copyright {{ year }} {{ author }}", Path::new("main.rs"), &config);
  assert_eq!(
    result,
    Err(TemplateError::MissingParameter {
      name: "author".to_string()
    })
  );
}

#[test]
fn test_format_header_with_btree_map() -> Result<()> {
  let mut params = BTreeMap::new();
  params.insert("project".to_string(), "dmv".to_string());

  assert_eq!(
    format_header("{{project}}: see LICENSE", Path::new("README.md"), &params)?,
    "dmv: see LICENSE"
  );

  Ok(())
}

#[test]
fn test_placeholder_names() {
  assert_eq!(
    placeholder_names("Copyright {{ year }} {{ author }} ({{ year }})"),
    vec!["year", "author"]
  );
}

#[test]
fn test_commented_header_for_file_types() -> Result<()> {
  let config = config_with(&[("year", ParameterValue::from("2024"))]);
  let header = format_header("Copyright {{ year }}\nAll rights reserved.", Path::new("x"), &config)?;

  let rust = format_with_comment_style(&header, &comment_style_for_file(Path::new("lib.rs")));
  assert_eq!(rust, "// Copyright 2024\n// All rights reserved.\n");

  let python = format_with_comment_style(&header, &comment_style_for_file(Path::new("setup.py")));
  assert_eq!(python, "# Copyright 2024\n# All rights reserved.\n");

  let java = format_with_comment_style(&header, &comment_style_for_file(Path::new("Main.java")));
  assert_eq!(java, "/*\n * Copyright 2024\n * All rights reserved.\n */\n");

  let html = format_with_comment_style(&header, &comment_style_for_file(Path::new("index.html")));
  assert_eq!(html, "<!--\n Copyright 2024\n All rights reserved.\n-->\n");

  Ok(())
}
