//! Man page generator for chipinfo
//!
//! Writes `chipinfo.1` plus one `chipinfo-<command>.1` page per
//! subcommand.
//!
//! Usage: cargo run --bin gen-manpage -- [output-dir]

use clap::{Command, CommandFactory};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

#[path = "../cli.rs"]
mod cli;

/// Render `cmd` into `<dir>/<title>.1`
fn write_page(dir: &Path, title: &str, cmd: Command) -> io::Result<PathBuf> {
    let mut buffer = Vec::new();
    clap_mangen::Man::new(cmd).title(title).render(&mut buffer)?;

    let path = dir.join(format!("{}.1", title));
    fs::write(&path, buffer)?;
    Ok(path)
}

/// Write the main page and the subcommand pages, returning their paths
fn generate(dir: &Path) -> io::Result<Vec<PathBuf>> {
    fs::create_dir_all(dir)?;

    let cmd = cli::Cli::command();
    let mut pages = Vec::new();
    for sub in cmd.get_subcommands() {
        let title = format!("chipinfo-{}", sub.get_name());
        pages.push(write_page(dir, &title, sub.clone())?);
    }
    pages.insert(0, write_page(dir, "chipinfo", cmd)?);
    Ok(pages)
}

fn main() -> io::Result<()> {
    let output_dir = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("man"));

    for page in generate(&output_dir)? {
        println!("Wrote {}", page.display());
    }
    println!("\nView with: man -l {}", output_dir.join("chipinfo.1").display());

    Ok(())
}
