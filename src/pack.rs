//! Packing orchestration - per-folder and batch atlas generation
//!
//! Both modes share the same primitives: scan a folder, decode its sprites
//! once, size the cell, composite, then write images and a manifest.
//!
//! Batch mode is two passes. The first pass produces an immutable
//! [`FolderSummary`] per folder; the global cell is derived from those
//! summaries, and the second pass composites every folder as one row.

use serde::Serialize;
use std::path::{Path, PathBuf};

use crate::atlas::{compose_grid, compose_row};
use crate::cell::CellGeometry;
use crate::config::loader::resolve_path;
use crate::config::{PackConfig, PackMode};
use crate::error::PackError;
use crate::manifest::{BatchManifest, FolderEntry, FolderManifest};
use crate::output::{folder_atlas_path, save_png, write_manifest};
use crate::scan::{folder_name, list_folders, scan_dir, FolderFilter, ScanOutcome};
use crate::sprite::{load_sprites, Sprite};

/// Decimal places kept for per-folder aspect ratios in the batch manifest
const BATCH_ASPECT_PLACES: i32 = 4;

/// Resolved settings for one packing run
#[derive(Debug, Clone)]
pub struct PackOptions {
    /// Directory whose subdirectories hold sprites
    pub root: PathBuf,
    /// Directory receiving atlases and the manifest
    pub out_dir: PathBuf,
    pub extension: String,
    pub include_hidden: bool,
    /// Abort on an undecodable sprite instead of skipping its folder
    pub strict: bool,
    pub manifest_name: String,
    pub atlas_name: String,
    pub pretty: bool,
    /// Compute everything but write nothing
    pub dry_run: bool,
}

impl PackOptions {
    /// Default options for packing `root` in place.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        let root = root.into();
        Self::from_config(&root, &PackConfig::default())
    }

    /// Options from a loaded config, with the output directory resolved against `root`.
    pub fn from_config(root: &Path, config: &PackConfig) -> Self {
        Self {
            root: root.to_path_buf(),
            out_dir: resolve_path(root, &config.output.dir),
            extension: config.pack.extension.clone(),
            include_hidden: config.pack.include_hidden,
            strict: config.pack.strict,
            manifest_name: config.output.manifest.clone(),
            atlas_name: config.output.atlas_name.clone(),
            pretty: config.output.pretty,
            dry_run: false,
        }
    }

    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    pub fn with_strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    pub fn manifest_path(&self) -> PathBuf {
        self.out_dir.join(&self.manifest_name)
    }

    pub fn batch_atlas_path(&self) -> PathBuf {
        self.out_dir.join(&self.atlas_name)
    }

    fn folder_filter(&self) -> FolderFilter {
        FolderFilter { include_hidden: self.include_hidden, exclude: Some(self.out_dir.clone()) }
    }
}

/// Sprites of one folder, decoded once, with that folder's own cell size
#[derive(Debug)]
pub struct FolderSummary {
    pub name: String,
    pub sprites: Vec<Sprite>,
    pub cell: CellGeometry,
}

impl FolderSummary {
    pub fn entry(&self) -> FolderEntry {
        FolderEntry::new(self.cell, self.sprites.len())
    }
}

/// Scan and decode one sprite folder.
///
/// A folder that is missing or unreadable counts as empty. A sprite that
/// fails to decode is an error.
pub fn load_folder(folder: &Path, extension: &str) -> Result<FolderSummary, PackError> {
    let name = folder_name(folder);
    let paths = match scan_dir(folder, extension) {
        ScanOutcome::Listed(paths) => paths,
        ScanOutcome::Missing => {
            log::debug!("Folder {} disappeared, treating as empty", folder.display());
            Vec::new()
        }
        ScanOutcome::Unreadable(e) => {
            log::warn!("Cannot list {}: {}, treating as empty", folder.display(), e);
            Vec::new()
        }
    };

    let sprites = load_sprites(&paths)?;
    let cell = CellGeometry::of_sprites(&sprites);
    log::debug!("{}: {} sprites, cell {}x{}", name, sprites.len(), cell.width, cell.height);

    Ok(FolderSummary { name, sprites, cell })
}

/// Manifest produced by either mode
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Manifest {
    Folders(FolderManifest),
    Batch(BatchManifest),
}

/// Something that was not packed, and why
#[derive(Debug, Clone, PartialEq)]
pub struct Skipped {
    pub name: String,
    pub reason: String,
}

/// Outcome of a packing run
#[derive(Debug)]
pub struct PackReport {
    pub manifest: Manifest,
    pub manifest_path: PathBuf,
    /// Atlas images written (or that would be written in a dry run)
    pub atlases: Vec<PathBuf>,
    pub skipped: Vec<Skipped>,
    pub folders: usize,
    pub sprites: usize,
    pub dry_run: bool,
}

impl PackReport {
    fn new(manifest: Manifest, options: &PackOptions) -> Self {
        Self {
            manifest,
            manifest_path: options.manifest_path(),
            atlases: Vec::new(),
            skipped: Vec::new(),
            folders: 0,
            sprites: 0,
            dry_run: options.dry_run,
        }
    }

    fn skip(&mut self, name: &str, reason: impl Into<String>) {
        let reason = reason.into();
        log::warn!("Skipping {}: {}", name, reason);
        self.skipped.push(Skipped { name: name.to_string(), reason });
    }

    /// One-line summary for the CLI
    pub fn summary(&self) -> String {
        let verb = if self.dry_run { "Would pack" } else { "Packed" };
        let mut line = format!(
            "{} {} sprite{} from {} folder{} into {} atlas{}",
            verb,
            self.sprites,
            plural(self.sprites),
            self.folders,
            plural(self.folders),
            self.atlases.len(),
            if self.atlases.len() == 1 { "" } else { "es" },
        );
        if !self.skipped.is_empty() {
            line.push_str(&format!(" ({} skipped)", self.skipped.len()));
        }
        line
    }
}

fn plural(n: usize) -> &'static str {
    if n == 1 {
        ""
    } else {
        "s"
    }
}

/// Load a folder, or record it as skipped when lenient.
fn load_or_skip(
    folder: &Path,
    options: &PackOptions,
    report: &mut PackReport,
) -> Result<Option<FolderSummary>, PackError> {
    match load_folder(folder, &options.extension) {
        Ok(summary) => Ok(Some(summary)),
        Err(e) if !options.strict => {
            report.skip(&folder_name(folder), e.to_string());
            Ok(None)
        }
        Err(e) => Err(e),
    }
}

/// Pack each subdirectory of the root into its own `<folder>.png`.
///
/// Every folder is laid out as a single row sized by its own largest sprite.
/// Folders without sprites get a manifest entry (with a `null` aspect ratio)
/// but no image. Failing to build or save one folder's atlas skips that
/// folder; the others are still packed.
pub fn pack_per_folder(options: &PackOptions) -> Result<PackReport, PackError> {
    let folders = list_folders(&options.root, &options.folder_filter())?;
    let mut manifest = FolderManifest::new();
    let mut report = PackReport::new(Manifest::Folders(FolderManifest::new()), options);

    for folder in &folders {
        log::info!("Processing {}", folder.display());
        let Some(summary) = load_or_skip(folder, options, &mut report)? else {
            continue;
        };

        if summary.cell.is_empty() {
            manifest.insert(summary.name.clone(), summary.entry());
            report.folders += 1;
            report.skip(&summary.name, "no sprites to pack");
            continue;
        }

        let atlas = match compose_row(summary.cell, &summary.sprites) {
            Ok(atlas) => atlas,
            Err(e) => {
                report.skip(&summary.name, e.to_string());
                continue;
            }
        };

        let path = folder_atlas_path(&options.out_dir, &summary.name);
        if !options.dry_run {
            if let Err(e) = save_png(atlas.image(), &path) {
                report.skip(&summary.name, format!("failed to write {}: {}", path.display(), e));
                continue;
            }
        }

        let (width, height) = atlas.dimensions();
        log::info!("{} -> {} ({}x{})", summary.name, path.display(), width, height);

        manifest.insert(summary.name.clone(), summary.entry());
        report.folders += 1;
        report.sprites += summary.sprites.len();
        report.atlases.push(path);
    }

    report.manifest = Manifest::Folders(manifest);
    finish(report, options)
}

/// Pack every subdirectory of the root into one shared atlas.
///
/// Row `y` holds folder `y`; column `x` holds that folder's sprite `x`. All
/// cells use the global maximum sprite size, and the grid is as wide as the
/// largest folder. Each manifest entry records the folder's own maximum.
pub fn pack_batch(options: &PackOptions) -> Result<PackReport, PackError> {
    let folders = list_folders(&options.root, &options.folder_filter())?;
    let empty = Manifest::Batch(BatchManifest::new(CellGeometry::default()));
    let mut report = PackReport::new(empty, options);

    // Pass 1: decode every folder once
    let mut summaries = Vec::with_capacity(folders.len());
    for folder in &folders {
        log::info!("Processing {}", folder.display());
        if let Some(summary) = load_or_skip(folder, options, &mut report)? {
            summaries.push(summary);
        }
    }

    let cell = CellGeometry::union(summaries.iter().map(|s| s.cell));
    let columns = summaries.iter().map(|s| s.sprites.len()).max().unwrap_or(0) as u32;

    let mut manifest = BatchManifest::new(cell);
    for summary in &summaries {
        let entry = summary.entry().rounded(BATCH_ASPECT_PLACES);
        manifest.metadata.insert(summary.name.clone(), entry);
    }
    report.folders = summaries.len();
    report.sprites = summaries.iter().map(|s| s.sprites.len()).sum();

    // Pass 2: composite with the shared cell
    if cell.is_empty() || columns == 0 {
        report.skip(&options.atlas_name, "no sprites to pack");
    } else {
        let rows: Vec<&[Sprite]> = summaries.iter().map(|s| s.sprites.as_slice()).collect();
        let atlas = compose_grid(cell, columns, &rows)?;
        let path = options.batch_atlas_path();

        if !options.dry_run {
            save_png(atlas.image(), &path)
                .map_err(|source| PackError::Output { path: path.clone(), source })?;
        }

        let (width, height) = atlas.dimensions();
        log::info!(
            "{} -> {} ({}x{}, {} columns x {} rows of {}x{})",
            options.root.display(),
            path.display(),
            width,
            height,
            columns,
            rows.len(),
            cell.width,
            cell.height
        );
        report.atlases.push(path);
    }

    report.manifest = Manifest::Batch(manifest);
    finish(report, options)
}

/// Pack using whichever mode is given.
pub fn pack(mode: PackMode, options: &PackOptions) -> Result<PackReport, PackError> {
    match mode {
        PackMode::Batch => pack_batch(options),
        PackMode::Folders => pack_per_folder(options),
    }
}

fn finish(report: PackReport, options: &PackOptions) -> Result<PackReport, PackError> {
    if !options.dry_run {
        write_manifest(&report.manifest, &report.manifest_path, options.pretty)
            .map_err(|source| PackError::Output { path: report.manifest_path.clone(), source })?;
        log::info!("Wrote {}", report.manifest_path.display());
    }
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgba, RgbaImage};
    use std::fs;
    use tempfile::TempDir;

    fn write_sprite(path: &Path, width: u32, height: u32, color: Rgba<u8>) {
        RgbaImage::from_pixel(width, height, color).save(path).expect("should write sprite");
    }

    fn make_folder(root: &Path, name: &str, sizes: &[(u32, u32)]) -> PathBuf {
        let dir = root.join(name);
        fs::create_dir_all(&dir).unwrap();
        for (i, (w, h)) in sizes.iter().enumerate() {
            write_sprite(&dir.join(format!("{}_{}.png", name, i)), *w, *h, Rgba([255, 0, 0, 255]));
        }
        dir
    }

    #[test]
    fn test_load_folder_single_decode_summary() {
        let temp = TempDir::new().unwrap();
        let dir = make_folder(temp.path(), "enemies", &[(32, 32), (32, 64), (16, 16)]);

        let summary = load_folder(&dir, ".png").unwrap();
        assert_eq!(summary.name, "enemies");
        assert_eq!(summary.sprites.len(), 3);
        assert_eq!(summary.cell, CellGeometry::new(32, 64));
        assert_eq!(
            summary.entry(),
            FolderEntry {
                max_width: 32,
                max_height: 64,
                total_sprites: 3,
                aspect_ratio: Some(0.5)
            }
        );
    }

    #[test]
    fn test_load_missing_folder_is_empty() {
        let temp = TempDir::new().unwrap();
        let summary = load_folder(&temp.path().join("gone"), ".png").unwrap();
        assert!(summary.sprites.is_empty());
        assert!(summary.cell.is_empty());
    }

    #[test]
    fn test_per_folder_scenario() {
        let temp = TempDir::new().unwrap();
        make_folder(temp.path(), "enemies", &[(32, 32), (32, 64), (16, 16)]);

        let report = pack_per_folder(&PackOptions::new(temp.path())).unwrap();

        let atlas = image::open(temp.path().join("enemies.png")).unwrap();
        assert_eq!((atlas.width(), atlas.height()), (96, 64));
        assert_eq!(report.atlases.len(), 1);
        match &report.manifest {
            Manifest::Folders(m) => {
                assert_eq!(m["enemies"], FolderEntry::new(CellGeometry::new(32, 64), 3));
            }
            other => panic!("unexpected manifest {:?}", other),
        }
        assert!(temp.path().join("data.json").exists());
    }

    #[test]
    fn test_per_folder_empty_folder_is_recorded_not_rendered() {
        let temp = TempDir::new().unwrap();
        make_folder(temp.path(), "empty", &[]);
        make_folder(temp.path(), "full", &[(4, 4)]);

        let report = pack_per_folder(&PackOptions::new(temp.path())).unwrap();

        assert!(!temp.path().join("empty.png").exists());
        assert!(temp.path().join("full.png").exists());
        assert_eq!(report.skipped.len(), 1);
        assert_eq!(report.skipped[0].name, "empty");

        let json: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(temp.path().join("data.json")).unwrap())
                .unwrap();
        assert_eq!(json["empty"]["total_sprites"], 0);
        assert!(json["empty"]["aspect_ratio"].is_null());
        assert_eq!(json["full"]["aspect_ratio"], 1.0);
    }

    #[test]
    fn test_batch_scenario() {
        let temp = TempDir::new().unwrap();
        make_folder(temp.path(), "a", &[(10, 20), (5, 5)]);
        make_folder(temp.path(), "b", &[(40, 10), (1, 1), (1, 1), (1, 1), (1, 1)]);

        let report = pack_batch(&PackOptions::new(temp.path())).unwrap();

        let atlas = image::open(temp.path().join("atlas.png")).unwrap();
        assert_eq!((atlas.width(), atlas.height()), (200, 40));
        assert_eq!(report.folders, 2);
        assert_eq!(report.sprites, 7);

        match &report.manifest {
            Manifest::Batch(m) => {
                assert_eq!(m.cell(), CellGeometry::new(40, 20));
                // Each folder keeps its own maximum, not the running global one
                assert_eq!(m.metadata["a"].cell(), CellGeometry::new(10, 20));
                assert_eq!(m.metadata["b"].cell(), CellGeometry::new(40, 10));
                assert_eq!(m.metadata["b"].total_sprites, 5);
                assert_eq!(m.metadata["b"].aspect_ratio, Some(4.0));
            }
            other => panic!("unexpected manifest {:?}", other),
        }
    }

    #[test]
    fn test_batch_lenient_skips_corrupt_folder() {
        let temp = TempDir::new().unwrap();
        make_folder(temp.path(), "good", &[(8, 8)]);
        let bad = make_folder(temp.path(), "bad", &[]);
        fs::write(bad.join("broken.png"), b"nope").unwrap();

        let strict = pack_batch(&PackOptions::new(temp.path()));
        assert!(matches!(strict, Err(PackError::Decode { .. })));

        let report = pack_batch(&PackOptions::new(temp.path()).with_strict(false)).unwrap();
        assert_eq!(report.folders, 1);
        assert_eq!(report.skipped[0].name, "bad");
        let atlas = image::open(temp.path().join("atlas.png")).unwrap();
        assert_eq!((atlas.width(), atlas.height()), (8, 8));
    }

    #[test]
    fn test_per_folder_lenient_skips_corrupt_folder() {
        let temp = TempDir::new().unwrap();
        make_folder(temp.path(), "good", &[(8, 4)]);
        let bad = make_folder(temp.path(), "bad", &[(8, 8)]);
        fs::write(bad.join("broken.png"), b"nope").unwrap();

        let report = pack_per_folder(&PackOptions::new(temp.path()).with_strict(false)).unwrap();

        assert_eq!(report.folders, 1);
        assert_eq!(report.skipped.len(), 1);
        assert_eq!(report.skipped[0].name, "bad");
        assert!(!temp.path().join("bad.png").exists());
        assert!(temp.path().join("good.png").exists());
        match &report.manifest {
            Manifest::Folders(m) => {
                assert!(!m.contains_key("bad"));
                assert_eq!(m["good"].total_sprites, 1);
            }
            other => panic!("unexpected manifest {:?}", other),
        }
    }

    #[test]
    fn test_per_folder_strict_aborts_on_corrupt_sprite() {
        let temp = TempDir::new().unwrap();
        make_folder(temp.path(), "good", &[(8, 4)]);
        let bad = make_folder(temp.path(), "bad", &[]);
        fs::write(bad.join("broken.png"), b"nope").unwrap();

        let result = pack_per_folder(&PackOptions::new(temp.path()));

        match result {
            Err(PackError::Decode { path, .. }) => assert_eq!(path, bad.join("broken.png")),
            other => panic!("expected decode error, got {:?}", other),
        }
        assert!(!temp.path().join("data.json").exists());
    }

    #[test]
    fn test_per_folder_write_failure_skips_only_that_folder() {
        let temp = TempDir::new().unwrap();
        make_folder(temp.path(), "a", &[(4, 4)]);
        make_folder(temp.path(), "b", &[(2, 2)]);
        let mut options = PackOptions::new(temp.path());
        options.out_dir = temp.path().join("build");
        // A directory where a.png should go makes that save fail
        fs::create_dir_all(options.out_dir.join("a.png")).unwrap();

        let report = pack_per_folder(&options).unwrap();

        assert_eq!(report.folders, 1);
        assert_eq!(report.skipped.len(), 1);
        assert_eq!(report.skipped[0].name, "a");
        assert!(report.skipped[0].reason.contains("a.png"));
        assert!(options.out_dir.join("a.png").is_dir());
        assert!(options.out_dir.join("b.png").is_file());

        let json: serde_json::Value = serde_json::from_str(
            &fs::read_to_string(options.out_dir.join("data.json")).unwrap(),
        )
        .unwrap();
        assert!(json.get("a").is_none());
        assert_eq!(json["b"]["total_sprites"], 1);
    }

    #[test]
    fn test_dry_run_writes_nothing() {
        let temp = TempDir::new().unwrap();
        make_folder(temp.path(), "a", &[(2, 2)]);

        let report = pack_batch(&PackOptions::new(temp.path()).with_dry_run(true)).unwrap();

        assert_eq!(report.atlases, vec![temp.path().join("atlas.png")]);
        assert!(!temp.path().join("atlas.png").exists());
        assert!(!temp.path().join("data.json").exists());
        assert!(report.summary().starts_with("Would pack 1 sprite from 1 folder into 1 atlas"));
    }

    #[test]
    fn test_batch_without_sprites_writes_manifest_only() {
        let temp = TempDir::new().unwrap();
        make_folder(temp.path(), "empty", &[]);

        let report = pack_batch(&PackOptions::new(temp.path())).unwrap();

        assert!(report.atlases.is_empty());
        assert!(!temp.path().join("atlas.png").exists());
        let json: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(temp.path().join("data.json")).unwrap())
                .unwrap();
        assert_eq!(json["max_width"], 0);
        assert!(json["metadata"]["empty"]["aspect_ratio"].is_null());
    }

    #[test]
    fn test_summary_pluralization() {
        let temp = TempDir::new().unwrap();
        make_folder(temp.path(), "a", &[(2, 2), (2, 2)]);
        make_folder(temp.path(), "b", &[(2, 2)]);

        let report = pack_per_folder(&PackOptions::new(temp.path())).unwrap();
        assert_eq!(report.summary(), "Packed 3 sprites from 2 folders into 2 atlases");
    }
}
