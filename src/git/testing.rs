//! Fixture repositories for unit tests

use git2::{Oid, Repository, RepositoryInitOptions, Signature};
use std::fs;
use std::path::Path;
use tempfile::TempDir;

/// Create an empty repository whose initial branch is `main`
pub fn init_repo() -> (TempDir, Repository) {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");

    let mut opts = RepositoryInitOptions::new();
    opts.initial_head("main");
    let repo = Repository::init_opts(dir.path(), &opts).expect("Failed to init repo");

    (dir, repo)
}

/// Write (`Some`) or delete (`None`) files in the work tree and commit the
/// result on top of HEAD.
pub fn commit_files(repo: &Repository, files: &[(&str, Option<&str>)], message: &str) -> Oid {
    let root = repo.workdir().expect("fixture repo has a work tree").to_path_buf();
    let mut index = repo.index().expect("Failed to open index");

    for (path, content) in files {
        let full = root.join(path);
        match content {
            Some(content) => {
                if let Some(parent) = full.parent() {
                    fs::create_dir_all(parent).expect("Failed to create dir");
                }
                fs::write(&full, content).expect("Failed to write file");
                index.add_path(Path::new(path)).expect("Failed to stage file");
            }
            None => {
                fs::remove_file(&full).expect("Failed to remove file");
                index.remove_path(Path::new(path)).expect("Failed to unstage file");
            }
        }
    }
    index.write().expect("Failed to write index");

    let tree_id = index.write_tree().expect("Failed to write tree");
    let tree = repo.find_tree(tree_id).expect("Failed to find tree");
    let sig = Signature::now("Test", "test@example.com").expect("Failed to build signature");

    let parent = repo.head().ok().and_then(|h| h.peel_to_commit().ok());
    let parents: Vec<&git2::Commit> = parent.iter().collect();

    repo.commit(Some("HEAD"), &sig, &sig, message, &tree, &parents)
        .expect("Failed to commit")
}
