//! End-to-end recipe tests against a fixture site
//!
//! The fixture under `fixtures/site` is a small landing page with a hero
//! terminal mockup, a commands section and two locale files. The recipe
//! replaces the mockup, inserts a showcase section and nests the loose
//! locale sections under `home`.

use std::fs;
use std::path::{Path, PathBuf};

use pretty_assertions::assert_eq;
use serde_json::Value;
use splice_content::{GroupResolution, Miss, Outcome};
use splice_core::{Error, FileResult, Recipe, RunOptions, Runner, Step};
use splice_fs::NormalizedPath;
use tempfile::TempDir;

const HOME: &str = "client/src/pages/Home.jsx";
const EN: &str = "client/src/locales/en.json";
const ZH: &str = "client/src/locales/zh.json";

// =============================================================================
// Test Infrastructure
// =============================================================================

/// A private copy of the fixture site
struct Site {
    temp_dir: TempDir,
}

impl Site {
    fn new() -> Self {
        let temp_dir = TempDir::new().unwrap();
        copy_dir(&fixture_dir(), temp_dir.path());
        Self { temp_dir }
    }

    fn root(&self) -> NormalizedPath {
        NormalizedPath::new(self.temp_dir.path())
    }

    fn read(&self, file: &str) -> String {
        fs::read_to_string(self.temp_dir.path().join(file)).unwrap()
    }

    fn json(&self, file: &str) -> Value {
        serde_json::from_str(&self.read(file)).unwrap()
    }

    fn recipe(&self) -> Recipe {
        Recipe::load(&self.root().join("recipe.toml")).unwrap()
    }

    fn runner(&self) -> Runner {
        Runner::new(self.root())
    }

    fn snapshot(&self) -> Vec<String> {
        [HOME, EN, ZH].iter().map(|file| self.read(file)).collect()
    }
}

fn fixture_dir() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("fixtures/site")
}

fn copy_dir(from: &Path, to: &Path) {
    fs::create_dir_all(to).unwrap();
    for entry in fs::read_dir(from).unwrap() {
        let entry = entry.unwrap();
        let target = to.join(entry.file_name());
        if entry.file_type().unwrap().is_dir() {
            copy_dir(&entry.path(), &target);
        } else {
            fs::copy(entry.path(), target).unwrap();
        }
    }
}

fn keys(value: &Value) -> Vec<&str> {
    value
        .as_object()
        .unwrap()
        .keys()
        .map(String::as_str)
        .collect()
}

// =============================================================================
// Full recipe
// =============================================================================

#[test]
fn test_recipe_applies_every_edit() {
    let site = Site::new();

    let report = site.runner().run(&site.recipe()).unwrap();

    assert!(report.success);
    assert_eq!(report.files.len(), 4);
    assert!(report.files.iter().all(|file| file.is_applied()));

    let page = site.read(HOME);
    assert!(!page.contains("Animated Terminal Mockup"));
    assert!(!page.contains("<motion.div className=\"terminal\">"));
    assert!(page.contains(
        "            <div className=\"preview\">{t('home.hero.previewLabel')}</div>\n          </motion.div>\n        </div>\n      </section>\n"
    ));
    assert!(page.contains(
        "      </section>\n\n      {/* Common Commands Section */}\n"
    ));
    assert!(page.contains("界面展示"));
    let showcase = page.find("UI Showcase Section").unwrap();
    let commands = page.find("Common Commands Section").unwrap();
    assert!(showcase < commands);
}

#[test]
fn test_recipe_nests_locale_sections() {
    let site = Site::new();
    let before = site.json(EN);

    site.runner().run(&site.recipe()).unwrap();

    for file in [EN, ZH] {
        let locale = site.json(file);
        assert_eq!(keys(&locale), ["nav", "home", "footer"]);
        assert_eq!(
            keys(&locale["home"]),
            ["hero", "architecture", "plugins", "cta", "commands"]
        );
        assert_eq!(
            keys(&locale["home"]["commands"]),
            ["heading", "subheading", "items"]
        );
    }

    let after = site.json(EN);
    assert_eq!(after["home"]["architecture"], before["architecture"]);
    assert_eq!(after["home"]["commands"]["items"], before["home"]["items"]);

    let zh = site.read(ZH);
    assert!(zh.contains("\"button\": \"立即开始\""));
    assert!(zh.contains("© 2025"));
    assert!(zh.ends_with("}\n"));
}

#[test]
fn test_relocation_reports_grouping_per_file() {
    let site = Site::new();

    let report = site.runner().run(&site.recipe()).unwrap();

    let relocated: Vec<_> = report
        .files
        .iter()
        .filter_map(|file| match &file.result {
            FileResult::Relocated(relocation) => Some((file.file.as_str(), relocation)),
            FileResult::Spliced(_) => None,
        })
        .collect();
    assert_eq!(relocated.len(), 2);
    assert_eq!(relocated[0].0, EN);
    assert_eq!(relocated[1].0, ZH);
    for (_, relocation) in relocated {
        assert_eq!(relocation.moved.len(), 3);
        assert_eq!(relocation.group, Some(GroupResolution::Grouped));
    }
}

// =============================================================================
// Dry run
// =============================================================================

#[test]
fn test_dry_run_is_byte_identical_and_returns_diffs() {
    let site = Site::new();
    let before = site.snapshot();
    let runner = Runner::with_options(site.root(), RunOptions { dry_run: true });

    let report = runner.run(&site.recipe()).unwrap();

    assert!(report.success);
    assert_eq!(site.snapshot(), before);
    assert_eq!(report.files.len(), 4);
    for file in &report.files {
        let diff = file.diff.as_deref().unwrap();
        assert!(diff.starts_with(&format!("--- a/{}\n", file.file)));
    }
    let insert_diff = report.files[1].diff.as_deref().unwrap();
    assert!(insert_diff.contains("+      {/* UI Showcase Section */}\n"));
}

#[test]
fn test_dry_run_matches_real_run() {
    let dry = Site::new();
    let real = Site::new();

    let preview = Runner::with_options(dry.root(), RunOptions { dry_run: true })
        .run(&dry.recipe())
        .unwrap();
    let applied = real.runner().run(&real.recipe()).unwrap();

    let summaries = |report: &splice_core::RunReport| {
        report
            .files
            .iter()
            .map(|file| (file.summary.added, file.summary.removed))
            .collect::<Vec<_>>()
    };
    assert_eq!(summaries(&preview), summaries(&applied));
}

// =============================================================================
// Re-running
// =============================================================================

#[test]
fn test_second_run_stops_at_missing_anchor() {
    let site = Site::new();
    site.runner().run(&site.recipe()).unwrap();
    let after_first = site.snapshot();

    let report = site.runner().run(&site.recipe()).unwrap();

    assert!(!report.success);
    assert_eq!(report.files.len(), 1);
    assert_eq!(
        report.files[0].result,
        FileResult::Spliced(Outcome::NotApplied {
            reason: Miss::AnchorNotFound {
                anchor: "\"{/* Animated Terminal Mockup */}\"".into()
            }
        })
    );
    assert_eq!(site.snapshot(), after_first);
}

#[test]
fn test_rerunning_relocation_fails_on_moved_key() {
    let site = Site::new();
    let relocate_only = Recipe::new(
        site.recipe()
            .steps
            .into_iter()
            .filter(|step| matches!(step, Step::Relocate(_)))
            .collect(),
    );
    site.runner().run(&relocate_only).unwrap();

    let err = site.runner().run(&relocate_only).unwrap_err();

    match err {
        Error::Document { path, source } => {
            assert!(path.ends_with(EN));
            assert_eq!(source.to_string(), "Key not found: architecture");
        }
        other => panic!("expected Document error, got {:?}", other),
    }
}
