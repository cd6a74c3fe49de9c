//! Standard intent sets.
//!
//! All three target the same layout: `existingDir/text.txt` (parent created
//! by [`prepare`]), `deep/folder/multiple/levels/text.txt` (parents missing,
//! base dir is the root) and `nonExistent/file1.txt` (base dir missing).

use tpd_core::Intent;

use crate::TestRoot;

/// Create the directories the fixtures expect to exist.
pub fn prepare(root: &TestRoot) {
    root.mkdir("existingDir");
}

/// Writes `test` to every fixture destination.
pub fn create_files() -> Vec<Intent> {
    vec![
        Intent::write("existingDir", "text.txt", "test").with_template("test.txt"),
        Intent::write(".", "deep/folder/multiple/levels/text.txt", "test").with_template("test.txt"),
        Intent::write("nonExistent", "file1.txt", "test").with_template("test.txt"),
    ]
}

/// Same destinations as [`create_files`] with new content.
pub fn update_files() -> Vec<Intent> {
    vec![
        Intent::write("existingDir", "text.txt", "test123").with_template("test.txt"),
        Intent::write(".", "deep/folder/multiple/levels/text.txt", "test123").with_template("test.txt"),
        Intent::write("nonExistent", "file1.txt", "test123").with_template("test.txt"),
    ]
}

/// Deletes `existingDir/text.txt` and a file that never existed.
pub fn delete_files() -> Vec<Intent> {
    vec![
        Intent::delete("existingDir", "text.txt"),
        Intent::delete("existingDir", "never-created.txt"),
    ]
}
