//! CLI entry point for easynpc_script.
//! Usage: easynpc check npcs/ --items data/items.toml

use std::{
    env, fs,
    path::{Path, PathBuf},
    process,
};

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use easynpc_data::{ItemCatalog, SkillCatalog};
use easynpc_script::{ParseContext, ParsedNpc, load_item_catalog, load_skill_catalog, parse_script};
use log::{debug, info, warn};
use ron::ser::PrettyConfig;

#[derive(Parser)]
#[command(author, version, about = "Check easyNPC scripts and inspect their parsed form.")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Parse scripts (files or directories of `.npc` files) and report every error.
    Check {
        #[arg(required = true)]
        paths: Vec<PathBuf>,
        /// Fail on warnings too.
        #[arg(long)]
        deny_warnings: bool,
        #[command(flatten)]
        catalogs: CatalogArgs,
    },
    /// Print the parsed document of one script as RON.
    Dump {
        file: PathBuf,
        #[command(flatten)]
        catalogs: CatalogArgs,
    },
}

#[derive(Args)]
struct CatalogArgs {
    /// Item catalog (TOML). Defaults to `items.toml` in `$EASYNPC_DATA_DIR` or `data/`.
    #[arg(long)]
    items: Option<PathBuf>,
    /// Skill catalog (TOML). Defaults to `skills.toml` in `$EASYNPC_DATA_DIR` or `data/`.
    #[arg(long)]
    skills: Option<PathBuf>,
}

struct Catalogs {
    items: ItemCatalog,
    skills: SkillCatalog,
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    match cli.command {
        Command::Check {
            paths,
            deny_warnings,
            catalogs,
        } => {
            let catalogs = load_catalogs(&catalogs)?;
            let failed = run_check(&paths, deny_warnings, &catalogs)?;
            if failed {
                process::exit(1);
            }
        },
        Command::Dump { file, catalogs } => {
            let catalogs = load_catalogs(&catalogs)?;
            let doc = parse_file(&file, &catalogs)?;
            let ron = ron::ser::to_string_pretty(&doc, PrettyConfig::default())
                .with_context(|| format!("serializing parsed '{}'", file.display()))?;
            println!("{ron}");
            if doc.has_errors() {
                process::exit(1);
            }
        },
    }
    Ok(())
}

/// Returns true when any script had errors (or warnings, with `deny_warnings`).
fn run_check(paths: &[PathBuf], deny_warnings: bool, catalogs: &Catalogs) -> Result<bool> {
    let mut files = Vec::new();
    for path in paths {
        let md = fs::metadata(path).with_context(|| format!("stat '{}'", path.display()))?;
        if md.is_dir() {
            collect_npc_files_recursive(path, &mut files);
        } else {
            files.push(path.clone());
        }
    }
    if files.is_empty() {
        warn!("no .npc files found");
    }

    let mut errors = 0usize;
    let mut warnings = 0usize;
    for file in &files {
        let doc = parse_file(file, catalogs)?;
        for err in doc.errors() {
            if err.is_warning() {
                warnings += 1;
                eprintln!("{}:{} (warning)", file.display(), err);
            } else {
                errors += 1;
                eprintln!("{}:{}", file.display(), err);
            }
        }
    }
    eprintln!(
        "check: {} file(s), {} error(s), {} warning(s)",
        files.len(),
        errors,
        warnings
    );
    Ok(errors > 0 || (deny_warnings && warnings > 0))
}

fn parse_file(path: &Path, catalogs: &Catalogs) -> Result<ParsedNpc> {
    let source = fs::read_to_string(path).with_context(|| format!("reading '{}'", path.display()))?;
    let cx = ParseContext::new(&catalogs.items, &catalogs.skills);
    let doc = parse_script(&source, &cx);
    debug!(
        "{}: {} items, {} errors",
        path.display(),
        doc.data_entries().len(),
        doc.errors().len()
    );
    Ok(doc)
}

fn collect_npc_files_recursive(dir: &Path, out: &mut Vec<PathBuf>) {
    let Ok(entries) = fs::read_dir(dir) else {
        warn!("cannot read directory '{}'", dir.display());
        return;
    };
    let mut paths: Vec<PathBuf> = entries.flatten().map(|ent| ent.path()).collect();
    paths.sort();
    for path in paths {
        if path.is_dir() {
            collect_npc_files_recursive(&path, out);
        } else if path.extension().is_some_and(|ext| ext == "npc") {
            out.push(path);
        }
    }
}

fn load_catalogs(args: &CatalogArgs) -> Result<Catalogs> {
    let items = match catalog_path(args.items.as_deref(), "items.toml") {
        Some(path) => load_item_catalog(&path).with_context(|| format!("loading item catalog '{}'", path.display()))?,
        None => {
            warn!("no item catalog found; every item id will be reported as unknown");
            ItemCatalog::default()
        },
    };
    let skills = match catalog_path(args.skills.as_deref(), "skills.toml") {
        Some(path) => {
            load_skill_catalog(&path).with_context(|| format!("loading skill catalog '{}'", path.display()))?
        },
        None => {
            warn!("no skill catalog found; every skill name will be reported as unknown");
            SkillCatalog::default()
        },
    };
    Ok(Catalogs { items, skills })
}

/// An explicit path wins; otherwise look in `$EASYNPC_DATA_DIR`, then `data/`.
fn catalog_path(explicit: Option<&Path>, file_name: &str) -> Option<PathBuf> {
    if let Some(path) = explicit {
        return Some(path.to_path_buf());
    }
    let found = env::var_os("EASYNPC_DATA_DIR")
        .map(PathBuf::from)
        .into_iter()
        .chain([PathBuf::from("data")])
        .map(|dir| dir.join(file_name))
        .find(|candidate| candidate.is_file());
    if let Some(path) = &found {
        info!("using {}", path.display());
    }
    found
}
