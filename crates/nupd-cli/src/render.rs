use std::{collections::BTreeMap, io::Write};

use nu_ansi_term::Color::{Blue, Cyan, Green, LightRed, Magenta, Yellow};
use nupd_manifest::{Channel, Component, FieldWarning, UpdateManifest};
use serde_json::json;
use tabled::{builder::Builder, settings::Style};

use crate::{
    error::{CliResult, ErrorContext},
    utils::{format_bytes, Colored},
};

fn sorted_components(manifest: &UpdateManifest) -> BTreeMap<&str, &Component> {
    manifest
        .components
        .iter()
        .map(|(name, c)| (name.as_str(), c))
        .collect()
}

fn release_date(component: &Component) -> String {
    component
        .release_date
        .map(|d| d.format("%Y-%m-%d").to_string())
        .unwrap_or_else(|| "-".to_string())
}

fn write_json<W: Write>(out: &mut W, value: &serde_json::Value) -> CliResult<()> {
    serde_json::to_writer_pretty(&mut *out, value)?;
    writeln!(out).with_context(|| "writing output".into())
}

pub fn inspect<W: Write>(out: &mut W, manifest: &UpdateManifest, as_json: bool) -> CliResult<()> {
    let components = sorted_components(manifest);

    if as_json {
        return write_json(
            out,
            &json!({
                "hosts": &manifest.hosts,
                "components": components,
            }),
        );
    }

    let hosts = Channel::ALL
        .iter()
        .map(|&c| format!("{c} {}", Colored(Cyan, manifest.hosts.channel(c).len())))
        .collect::<Vec<_>>()
        .join(", ");

    let mut builder = Builder::new();
    builder.push_record(["Component", "Version", "Build", "Date", "Platform", "Size"]);
    for (name, c) in &components {
        builder.push_record([
            Colored(Blue, name).to_string(),
            Colored(LightRed, &c.version).to_string(),
            c.build.to_string(),
            release_date(c),
            Colored(Green, &c.platform).to_string(),
            Colored(Magenta, format_bytes(c.size, 2)).to_string(),
        ]);
    }
    let table = builder.build().with(Style::rounded()).to_string();

    writeln!(
        out,
        "Hosts: {hosts}\n{table}\n{} components, {} total",
        Colored(Cyan, components.len()),
        Colored(Magenta, format_bytes(manifest.total_size(), 2))
    )
    .with_context(|| "writing output".into())
}

pub fn hosts<W: Write>(
    out: &mut W,
    manifest: &UpdateManifest,
    channel: Option<Channel>,
    as_json: bool,
) -> CliResult<()> {
    if as_json {
        let value = match channel {
            Some(c) => json!(manifest.hosts.channel(c)),
            None => json!(&manifest.hosts),
        };
        return write_json(out, &value);
    }

    let result = match channel {
        Some(c) => {
            manifest
                .hosts
                .channel(c)
                .iter()
                .try_for_each(|entry| writeln!(out, "{entry}"))
        }
        None => {
            Channel::ALL.iter().try_for_each(|&c| {
                writeln!(out, "[{}]", Colored(Yellow, c))?;
                manifest
                    .hosts
                    .channel(c)
                    .iter()
                    .try_for_each(|entry| writeln!(out, "  {entry}"))
            })
        }
    };

    result.with_context(|| "writing output".into())
}

pub fn component<W: Write>(
    out: &mut W,
    name: &str,
    component: &Component,
    as_json: bool,
) -> CliResult<()> {
    if as_json {
        return write_json(out, &json!(component));
    }

    let mut builder = Builder::new();
    let rows = [
        ("version", component.version.clone()),
        ("versionid", component.version_id.to_string()),
        ("build", component.build.to_string()),
        ("type", component.kind.clone()),
        ("category", component.category.clone()),
        ("level", component.level.to_string()),
        ("base", component.base.to_string()),
        ("date", release_date(component)),
        ("platform", component.platform.clone()),
        ("group", component.group.join(",")),
        ("buildregname", component.build_registry_name.clone()),
        ("file", component.file.clone()),
        (
            "size",
            format!("{} ({})", component.size, format_bytes(component.size, 2)),
        ),
    ];
    for (key, value) in rows {
        builder.push_record([Colored(Cyan, key).to_string(), value]);
    }
    let table = builder.build().with(Style::rounded()).to_string();

    writeln!(out, "[{}]\n{table}", Colored(Blue, name)).with_context(|| "writing output".into())
}

pub fn warnings<W: Write>(out: &mut W, warnings: &[FieldWarning], as_json: bool) -> CliResult<()> {
    if as_json {
        return write_json(out, &json!(warnings));
    }

    warnings
        .iter()
        .try_for_each(|w| writeln!(out, "{w}"))
        .with_context(|| "writing output".into())
}
