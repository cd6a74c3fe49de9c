//! Apply executor
//!
//! Performs the filesystem mutation for every planned destination. Failures
//! are isolated per destination: each one lands in the report and the rest
//! of the plan is still attempted.

use std::path::Path;

use tpd_fs::{FileSystem, WriteOptions};

use crate::observe::{Event, Observer};
use crate::plan::{ActionPlan, Category, PlanEntry};
use crate::report::Report;

pub struct Executor<'a> {
    fs: &'a dyn FileSystem,
    observer: &'a dyn Observer,
}

impl<'a> Executor<'a> {
    pub fn new(fs: &'a dyn FileSystem, observer: &'a dyn Observer) -> Self {
        Self { fs, observer }
    }

    /// Apply every category in plan order.
    pub fn apply(&self, plan: &ActionPlan) -> Report {
        let mut report = Report::new();

        for (category, entries) in plan.iter() {
            for entry in entries {
                let outcome = match category {
                    Category::Reject => {
                        report.record_success(category, &entry.destination);
                        continue;
                    }
                    Category::Ignore => continue,
                    Category::Delete => self.delete(entry),
                    Category::Create => self.create(entry),
                    Category::Update => self.write(entry),
                };
                self.record(&mut report, category, &entry.destination, outcome);
            }
        }

        report
    }

    fn delete(&self, entry: &PlanEntry) -> Result<(), String> {
        self.fs
            .remove_file(&entry.destination)
            .map_err(|e| e.reason())
    }

    /// Ensure the parent chain exists, then write.
    ///
    /// A failed directory creation skips the write.
    fn create(&self, entry: &PlanEntry) -> Result<(), String> {
        if let Some(parent) = entry.destination.parent() {
            self.fs.create_dir_all(parent).map_err(|e| e.reason())?;
        }
        self.write(entry)
    }

    fn write(&self, entry: &PlanEntry) -> Result<(), String> {
        let intent = &entry.intent;
        let content = intent
            .content()
            .ok_or_else(|| "intent has no content to write".to_string())?;

        let options = WriteOptions::parse(intent.encoding.as_deref(), intent.mode.as_deref())
            .map_err(|e| e.reason())?;
        let bytes = options.encoding.encode(content).map_err(|e| e.reason())?;

        tracing::debug!(
            destination = ?entry.destination,
            encoding = %options.encoding,
            mode = ?options.mode.map(|m| format!("{m:o}")),
            "Writing file"
        );

        self.fs
            .write_file(&entry.destination, &bytes, options.mode)
            .map_err(|e| e.reason())
    }

    fn record(&self, report: &mut Report, category: Category, destination: &Path, outcome: Result<(), String>) {
        match outcome {
            Ok(()) => {
                self.observer.observe(&Event::Applied { category, destination });
                report.record_success(category, destination);
            }
            Err(message) => {
                self.observer.observe(&Event::Failed {
                    category,
                    destination,
                    message: &message,
                });
                report.record_failure(category, destination, message);
            }
        }
    }
}
