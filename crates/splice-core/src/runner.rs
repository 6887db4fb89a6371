//! Runs recipe steps against files
//!
//! Every step is whole-file read, in-memory transform, whole-file write.
//! A text step whose anchor or close is missing writes nothing and stops
//! the run. Relocation errors are fatal and returned as [`Error`].

use std::collections::HashMap;

use serde::Serialize;
use splice_content::{
    Anchor, DiffSummary, Outcome, RelocationPlan, RelocationReport, Spliced, TextDocument,
    insert_before_anchor, relocate_json, replace_bounded_block, split_fragment, unified_diff,
};
use splice_fs::{NormalizedPath, io};

use crate::recipe::{FragmentSource, InsertStep, RelocateStep, ReplaceStep, Step, fragment_source};
use crate::{Error, Recipe, Result};

/// Options controlling a run.
#[derive(Debug, Clone, Copy, Default)]
pub struct RunOptions {
    /// Compute changes and diffs without writing anything.
    pub dry_run: bool,
}

/// What happened to one file.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FileResult {
    Spliced(Outcome),
    Relocated(RelocationReport),
}

/// Report for one file touched by one step.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FileReport {
    /// 1-based step number
    pub step: usize,
    pub kind: &'static str,
    pub file: String,
    pub result: FileResult,
    pub summary: DiffSummary,
    /// Unified diff, filled in dry-run mode
    #[serde(skip_serializing_if = "Option::is_none")]
    pub diff: Option<String>,
}

impl FileReport {
    pub fn is_applied(&self) -> bool {
        match &self.result {
            FileResult::Spliced(outcome) => outcome.is_applied(),
            FileResult::Relocated(_) => true,
        }
    }
}

/// Report for a whole run.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RunReport {
    pub success: bool,
    pub dry_run: bool,
    pub files: Vec<FileReport>,
}

impl RunReport {
    /// The first report that was not applied, if any.
    pub fn first_miss(&self) -> Option<&FileReport> {
        self.files.iter().find(|report| !report.is_applied())
    }
}

/// Executes recipes relative to a root directory.
#[derive(Debug, Clone)]
pub struct Runner {
    root: NormalizedPath,
    options: RunOptions,
}

impl Runner {
    pub fn new(root: NormalizedPath) -> Self {
        Self::with_options(root, RunOptions::default())
    }

    pub fn with_options(root: NormalizedPath, options: RunOptions) -> Self {
        Self { root, options }
    }

    pub fn root(&self) -> &NormalizedPath {
        &self.root
    }

    /// Validate and run every step in order.
    ///
    /// Stops after the first file whose splice was not applied; the
    /// report then has `success == false`.
    pub fn run(&self, recipe: &Recipe) -> Result<RunReport> {
        recipe.validate()?;

        let mut files = FileSet::new(self.options.dry_run);
        let mut report = RunReport {
            success: true,
            dry_run: self.options.dry_run,
            files: Vec::new(),
        };

        for (idx, step) in recipe.steps.iter().enumerate() {
            let number = idx + 1;
            tracing::debug!(step = number, kind = step.kind(), "running step");
            let step_reports = match step {
                Step::Insert(insert) => vec![self.run_insert(number, insert, &mut files)?],
                Step::Replace(replace) => vec![self.run_replace(number, replace, &mut files)?],
                Step::Relocate(relocate) => self.run_relocate(number, relocate, &mut files)?,
            };

            let missed = step_reports.iter().any(|r| !r.is_applied());
            report.files.extend(step_reports);
            if missed {
                report.success = false;
                break;
            }
        }

        Ok(report)
    }

    fn run_insert(
        &self,
        step: usize,
        insert: &InsertStep,
        files: &mut FileSet,
    ) -> Result<FileReport> {
        let source = fragment_source(step, &insert.fragment, &insert.fragment_file)?;
        let fragment = self.load_fragment(source)?;
        let anchor = Anchor::new(insert.anchor.as_str());

        self.splice_file(step, "insert", &insert.file, files, |lines| {
            insert_before_anchor(lines, &anchor, &fragment)
        })
    }

    fn run_replace(
        &self,
        step: usize,
        replace: &ReplaceStep,
        files: &mut FileSet,
    ) -> Result<FileReport> {
        let source = fragment_source(step, &replace.fragment, &replace.fragment_file)?;
        let fragment = self.load_fragment(source)?;
        let anchor = Anchor::new(replace.anchor.as_str());
        let strategy = replace.strategy();

        self.splice_file(step, "replace", &replace.file, files, |lines| {
            replace_bounded_block(lines, &anchor, &replace.close, &fragment, &strategy)
        })
    }

    fn run_relocate(
        &self,
        step: usize,
        relocate: &RelocateStep,
        files: &mut FileSet,
    ) -> Result<Vec<FileReport>> {
        let plan = relocate.plan();
        relocate
            .files
            .iter()
            .map(|file| self.relocate_file(step, file, &plan, files))
            .collect()
    }

    fn relocate_file(
        &self,
        step: usize,
        file: &str,
        plan: &RelocationPlan,
        files: &mut FileSet,
    ) -> Result<FileReport> {
        let path = self.resolve(file);
        let source = files.read(&path)?;
        let (rendered, relocation) = relocate_json(&source, plan).map_err(|err| Error::Document {
            path: path.to_string(),
            source: err,
        })?;

        // A relocation that moved nothing leaves the file's formatting alone.
        let rendered = if relocation.changed() {
            files.write(&path, &rendered)?;
            rendered
        } else {
            source.clone()
        };
        tracing::info!(
            file = %path,
            moved = relocation.moved.len(),
            group = ?relocation.group,
            "relocated keys"
        );

        let result = FileResult::Relocated(relocation);
        Ok(self.file_report(step, "relocate", file, result, &source, &rendered))
    }

    fn splice_file<F>(
        &self,
        step: usize,
        kind: &'static str,
        file: &str,
        files: &mut FileSet,
        splice: F,
    ) -> Result<FileReport>
    where
        F: FnOnce(&[String]) -> Spliced,
    {
        let path = self.resolve(file);
        let source = files.read(&path)?;
        let document = TextDocument::parse(&source);
        let Spliced { lines, outcome } = splice(document.lines());

        let rendered = if outcome.is_applied() {
            document.with_lines(lines).render()
        } else {
            tracing::warn!(file = %path, %outcome, "file left unchanged");
            source.clone()
        };

        if rendered != source {
            files.write(&path, &rendered)?;
            tracing::info!(file = %path, %outcome, "spliced file");
        }

        let result = FileResult::Spliced(outcome);
        Ok(self.file_report(step, kind, file, result, &source, &rendered))
    }

    fn file_report(
        &self,
        step: usize,
        kind: &'static str,
        file: &str,
        result: FileResult,
        old: &str,
        new: &str,
    ) -> FileReport {
        FileReport {
            step,
            kind,
            file: file.to_string(),
            result,
            summary: DiffSummary::compute(old, new),
            diff: self.options.dry_run.then(|| unified_diff(old, new, file)),
        }
    }

    fn load_fragment(&self, source: FragmentSource<'_>) -> Result<Vec<String>> {
        let text = match source {
            FragmentSource::Inline(text) => text.to_string(),
            FragmentSource::File(file) => io::read_text(&self.resolve(file))?,
        };
        Ok(split_fragment(&text))
    }

    fn resolve(&self, file: &str) -> NormalizedPath {
        NormalizedPath::new(file).resolve_against(&self.root)
    }
}

/// Reads through to disk; in dry-run mode, writes are kept in memory so
/// later steps see earlier results.
struct FileSet {
    dry_run: bool,
    staged: HashMap<NormalizedPath, String>,
}

impl FileSet {
    fn new(dry_run: bool) -> Self {
        Self {
            dry_run,
            staged: HashMap::new(),
        }
    }

    fn read(&self, path: &NormalizedPath) -> Result<String> {
        match self.staged.get(path) {
            Some(content) => Ok(content.clone()),
            None => Ok(io::read_text(path)?),
        }
    }

    fn write(&mut self, path: &NormalizedPath, content: &str) -> Result<()> {
        if self.dry_run {
            self.staged.insert(path.clone(), content.to_string());
        } else {
            io::write_text(path, content)?;
        }
        Ok(())
    }
}
