// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of caex-links and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! caex-links demo entrypoint.
//!
//! Loads a JSON tree scene, runs one layout pass and prints the resulting drawing as JSON.
//! Set `RUST_LOG=caex_links=debug` to see why links were skipped.

use std::error::Error;

use caex_links::model::{MemoryTree, TreeScene};
use caex_links::{Graph, LinkLayoutOptions};
use tracing_subscriber::EnvFilter;

fn print_usage(program: &str) {
    eprintln!(
        "Usage:\n  {program} <scene.json> [--no-clip] [--options <options.json>]\n\n--no-clip routes links between rows outside the viewport as well.\n--options loads layout options from a JSON file; missing fields keep their defaults.\n\nThe palette can be overridden with CAEX_LINKS_PALETTE=\"#rrggbb,#rrggbb,...\"."
    );
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
struct CliOptions {
    scene: Option<String>,
    no_clip: bool,
    options: Option<String>,
}

fn parse_options(mut args: impl Iterator<Item = String>) -> Result<CliOptions, ()> {
    let mut options = CliOptions::default();

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--no-clip" => {
                if options.no_clip {
                    return Err(());
                }
                options.no_clip = true;
            }
            "--options" => {
                if options.options.is_some() {
                    return Err(());
                }
                options.options = Some(args.next().ok_or(())?);
            }
            _ if arg.starts_with('-') => return Err(()),
            _ => {
                if options.scene.is_some() {
                    return Err(());
                }
                options.scene = Some(arg);
            }
        }
    }

    if options.scene.is_none() {
        return Err(());
    }
    Ok(options)
}

fn main() {
    let result = (|| -> Result<(), Box<dyn Error>> {
        let mut args = std::env::args();
        let program = args.next().unwrap_or_else(|| "caex-links".to_owned());

        let cli = match parse_options(args) {
            Ok(cli) => cli,
            Err(()) => {
                print_usage(&program);
                std::process::exit(2);
            }
        };

        tracing_subscriber::fmt()
            .with_env_filter(EnvFilter::from_default_env())
            .with_writer(std::io::stderr)
            .init();

        let scene = TreeScene::from_json_file(cli.scene.as_deref().unwrap_or_default())?;
        let mut tree = MemoryTree::from_scene(&scene)?;

        let mut graph = Graph::new();
        if let Some(path) = &cli.options {
            graph.set_options(LinkLayoutOptions::from_json_file(path)?);
        }
        let added = graph.add_scene_links(&scene.links);
        tree.apply_links_changed(&graph.take_notifications());
        tracing::info!(nodes = scene.nodes.len(), links = added, "scene loaded");

        let drawing = graph.layout_pass(&tree, !cli.no_clip);
        println!("{}", serde_json::to_string_pretty(&drawing)?);
        Ok(())
    })();

    if let Err(err) = result {
        eprintln!("{err}");
        std::process::exit(1);
    }
}
