use std::fs;
use std::io;
use std::path::PathBuf;

use indicatif::{ProgressBar, ProgressStyle};
use serde::Serialize;

use nfcpack_core::batch::source::{FsFile, RawFile, collect_folder};
use nfcpack_core::domain::{BatchOrigin, BatchResult};
use nfcpack_core::error::Result;
use nfcpack_core::export::archive::{ArchiveOptions, build_archive};
use nfcpack_core::export::single::{export_each, write_to_dir};
use nfcpack_core::policy::CollisionPolicy;
use nfcpack_core::process_batch;

/// Either one folder (a folder selection) or a list of plain files.
fn gather(inputs: Vec<PathBuf>) -> Result<(Vec<Box<dyn RawFile>>, BatchOrigin)> {
    if inputs.len() == 1 && inputs[0].is_dir() {
        let files = collect_folder(&inputs[0])?;
        let boxed = files
            .into_iter()
            .map(|f| Box::new(f) as Box<dyn RawFile>)
            .collect();
        return Ok((boxed, BatchOrigin::Folder));
    }
    let mut out: Vec<Box<dyn RawFile>> = Vec::with_capacity(inputs.len());
    for p in inputs {
        if p.is_dir() {
            return Err(io::Error::other(format!(
                "pass one folder or individual files, not a mix: {}",
                p.display()
            ))
            .into());
        }
        out.push(Box::new(FsFile::flat(p)?));
    }
    Ok((out, BatchOrigin::Flat))
}

fn run_batch(files: Vec<Box<dyn RawFile>>, origin: BatchOrigin) -> BatchResult {
    let pb = ProgressBar::new(files.len() as u64);
    pb.set_style(
        ProgressStyle::with_template("processing [{bar:30}] {pos}/{len}")
            .unwrap_or_else(|_| ProgressStyle::default_bar()),
    );
    let batch = process_batch(files, origin, |done, _| pb.set_position(done as u64));
    pb.finish_and_clear();
    batch
}

#[derive(Serialize)]
struct RecordView<'a> {
    original_name: &'a str,
    original_path: &'a str,
    normalized_name: &'a str,
    normalized_path: &'a str,
    changed: bool,
    size: u64,
    available: bool,
}

pub fn handle_check(inputs: Vec<PathBuf>, json: bool) -> Result<()> {
    let (files, origin) = gather(inputs)?;
    let batch = run_batch(files, origin);

    if json {
        let views: Vec<RecordView<'_>> = batch
            .records
            .iter()
            .map(|r| RecordView {
                original_name: &r.original_name,
                original_path: &r.original_path,
                normalized_name: &r.normalized_name,
                normalized_path: &r.normalized_path,
                changed: r.changed,
                size: r.size,
                available: r.available,
            })
            .collect();
        let rendered = serde_json::to_string_pretty(&views).map_err(io::Error::other)?;
        println!("{rendered}");
        return Ok(());
    }

    for r in &batch.records {
        let marker = if !r.available {
            '!'
        } else if r.changed {
            '~'
        } else {
            '='
        };
        println!(
            "{} {} -> {}  {}",
            marker,
            r.original_path,
            r.normalized_path,
            format_size(r.size)
        );
    }
    println!(
        "{} files, {} renamed, {} unchanged, {} unavailable",
        batch.len(),
        batch.changed_count(),
        batch.len() - batch.changed_count() - batch.unavailable_count(),
        batch.unavailable_count()
    );
    Ok(())
}

pub fn handle_pack(
    dir: PathBuf,
    out: Option<PathBuf>,
    level: i64,
    per_file: bool,
    dest: Option<PathBuf>,
    collision: CollisionPolicy,
) -> Result<()> {
    println!("Processing folder: {}", dir.display());
    let files = collect_folder(&dir)?
        .into_iter()
        .map(|f| Box::new(f) as Box<dyn RawFile>)
        .collect();
    let batch = run_batch(files, BatchOrigin::Folder);
    if batch.is_empty() {
        println!("no files found");
        return Ok(());
    }

    if per_file {
        let set = export_each(&batch, collision)?;
        let dest = dest.unwrap_or_else(|| PathBuf::from("."));
        write_to_dir(&set, &dest)?;
        println!(
            "exported {} files to {}  ({} omitted)",
            set.entries.len(),
            dest.display(),
            set.omitted
        );
        return Ok(());
    }

    let opts = ArchiveOptions {
        level: Some(level),
        collision,
    };
    let archive = build_archive(&batch, Some(&opts))?;
    let out_path = out.unwrap_or_else(|| match dir.parent() {
        Some(p) if !p.as_os_str().is_empty() => p.join(&archive.file_name),
        _ => PathBuf::from(&archive.file_name),
    });
    fs::write(&out_path, &archive.bytes)?;
    println!(
        "{}  {} entries  {} omitted",
        out_path.display(),
        archive.entries,
        archive.omitted
    );
    Ok(())
}

pub fn handle_export(inputs: Vec<PathBuf>, dest: PathBuf, collision: CollisionPolicy) -> Result<()> {
    let mut files: Vec<Box<dyn RawFile>> = Vec::with_capacity(inputs.len());
    for p in inputs {
        files.push(Box::new(FsFile::flat(p)?));
    }
    let batch = run_batch(files, BatchOrigin::Flat);
    let set = export_each(&batch, collision)?;
    write_to_dir(&set, &dest)?;
    for e in &set.entries {
        println!("{}", dest.join(&e.file_name).display());
    }
    println!(
        "exported {} files  ({} omitted)",
        set.entries.len(),
        set.omitted
    );
    Ok(())
}

fn format_size(bytes: u64) -> String {
    if bytes == 0 {
        return "0 Bytes".to_owned();
    }
    const UNITS: [&str; 4] = ["Bytes", "KB", "MB", "GB"];
    let mut v = bytes as f64;
    let mut i = 0usize;
    while v >= 1024.0 && i < UNITS.len() - 1 {
        v /= 1024.0;
        i += 1;
    }
    let rounded = format!("{v:.2}");
    let trimmed = rounded.trim_end_matches('0').trim_end_matches('.');
    format!("{trimmed} {}", UNITS[i])
}
