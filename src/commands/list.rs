//! `tg list`: shows the templates found in the templates directory.

use std::io::{self, Write};

use colored::Colorize;

use crate::catalog::{filter_templates, find_templates, TemplateInfo};
use crate::cli::{ListArgs, ListFormat};
use crate::commands::Context;
use crate::config::Config;
use crate::error::{Error, Result};

const TABLE_PADDING: usize = 3;
const MAX_DESCRIPTION: usize = 40;

pub fn run(ctx: &Context, args: ListArgs) -> Result<()> {
    let config = Config::load(&ctx.config_path)?;
    let templates_dir = &config.templates_dir;

    if !templates_dir.exists() {
        println!(
            "{}",
            format!("Templates directory {} does not exist", templates_dir.display()).yellow()
        );
        println!("Run 'tg init' first to initialize the configuration");
        return Ok(());
    }

    let mut templates = find_templates(templates_dir)?;
    if let Some(filter) = &args.filter {
        templates = filter_templates(templates, filter);
    }

    let mut stdout = io::stdout().lock();
    if templates.is_empty() {
        match &args.filter {
            Some(filter) => println!("No templates found matching filter: {filter}"),
            None => {
                println!("No templates found.");
                println!();
                println!("Create a new template with:");
                println!("    tg new <template-name>");
            }
        }
        return Ok(());
    }

    let written = match args.format {
        ListFormat::List => write_list(&mut stdout, &templates, args.details),
        ListFormat::Table => write_table(&mut stdout, &templates, args.details),
        ListFormat::Json => write_json(&mut stdout, &templates),
    };
    written.map_err(|e| Error::io("<stdout>", e))
}

pub fn write_list<W: Write>(out: &mut W, templates: &[TemplateInfo], details: bool) -> io::Result<()> {
    writeln!(out, "{}", format!("Found {} template(s):", templates.len()).cyan())?;
    writeln!(out)?;

    for info in templates {
        write!(out, "  • {}", info.name.bold())?;
        if !info.version.is_empty() && info.version != "1.0.0" {
            write!(out, " (v{})", info.version)?;
        }
        writeln!(out)?;

        if details {
            if !info.description.is_empty() {
                writeln!(out, "    {}", info.description)?;
            }
            if !info.author.is_empty() && info.author != "Unknown" {
                writeln!(out, "    Author: {}", info.author)?;
            }
            writeln!(out, "    Variables: {}", info.variables)?;
            writeln!(out, "    Path: {}", info.path.display())?;
            writeln!(out)?;
        }
    }

    if !details {
        writeln!(out)?;
        writeln!(out, "Use 'tg list --details' for more information")?;
    }

    Ok(())
}

pub fn write_table<W: Write>(out: &mut W, templates: &[TemplateInfo], details: bool) -> io::Result<()> {
    let mut rows: Vec<[String; 5]> = vec![
        ["NAME", "VERSION", "AUTHOR", "VARIABLES", "DESCRIPTION"].map(String::from),
        ["----", "-------", "------", "---------", "-----------"].map(String::from),
    ];
    for info in templates {
        rows.push([
            info.name.clone(),
            info.version.clone(),
            info.author.clone(),
            info.variables.to_string(),
            shorten(&info.description, details),
        ]);
    }

    let mut widths = [0usize; 5];
    for row in &rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    for row in &rows {
        let mut line = String::new();
        for (i, cell) in row.iter().enumerate() {
            if i + 1 == row.len() {
                line.push_str(cell);
            } else {
                line.push_str(&format!("{:<width$}", cell, width = widths[i] + TABLE_PADDING));
            }
        }
        writeln!(out, "{}", line.trim_end())?;
    }

    Ok(())
}

pub fn write_json<W: Write>(out: &mut W, templates: &[TemplateInfo]) -> io::Result<()> {
    let document = serde_json::json!({ "templates": templates });
    serde_json::to_writer_pretty(&mut *out, &document)?;
    writeln!(out)
}

fn shorten(description: &str, details: bool) -> String {
    if details || description.chars().count() <= MAX_DESCRIPTION {
        return description.to_string();
    }
    let head: String = description.chars().take(MAX_DESCRIPTION - 3).collect();
    format!("{head}...")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn info(name: &str, description: &str) -> TemplateInfo {
        TemplateInfo {
            name: name.to_string(),
            version: "0.2.0".to_string(),
            author: "Ada".to_string(),
            description: description.to_string(),
            variables: 2,
            path: PathBuf::from(format!(".tg/{name}")),
        }
    }

    fn render<F: FnOnce(&mut Vec<u8>) -> io::Result<()>>(write: F) -> String {
        let mut out = Vec::new();
        write(&mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_table_aligns_columns_and_shortens_descriptions() {
        let long = "a".repeat(50);
        let templates = vec![info("web", "Web app"), info("cli-tool", &long)];
        let output = render(|out| write_table(out, &templates, false));
        let lines: Vec<&str> = output.lines().collect();

        assert_eq!(lines.len(), 4);
        assert!(lines[0].starts_with("NAME       VERSION"));
        assert!(lines[2].starts_with("web        0.2.0"));
        assert!(lines[3].ends_with(&format!("{}...", "a".repeat(37))));

        let detailed = render(|out| write_table(out, &templates, true));
        assert!(detailed.contains(&long));
    }

    #[test]
    fn test_json_lists_every_template() {
        let templates = vec![info("web", "Web app")];
        let output = render(|out| write_json(out, &templates));
        let parsed: serde_json::Value = serde_json::from_str(&output).unwrap();

        assert_eq!(parsed["templates"][0]["name"], "web");
        assert_eq!(parsed["templates"][0]["variables"], 2);
        assert_eq!(parsed["templates"][0]["path"], ".tg/web");
    }

    #[test]
    fn test_list_details() {
        let templates = vec![info("web", "Web app")];
        let short = render(|out| write_list(out, &templates, false));
        assert!(short.contains("web"));
        assert!(short.contains("(v0.2.0)"));
        assert!(!short.contains("Author"));

        let detailed = render(|out| write_list(out, &templates, true));
        assert!(detailed.contains("Author: Ada"));
        assert!(detailed.contains("Variables: 2"));
    }
}
