use assert_cmd::Command;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Environment that makes git commits work without user configuration.
const GIT_ENV: &[(&str, &str)] = &[
    ("GIT_AUTHOR_NAME", "shipkit tests"),
    ("GIT_AUTHOR_EMAIL", "tests@example.com"),
    ("GIT_COMMITTER_NAME", "shipkit tests"),
    ("GIT_COMMITTER_EMAIL", "tests@example.com"),
    ("GIT_CONFIG_GLOBAL", "/dev/null"),
    ("GIT_CONFIG_NOSYSTEM", "1"),
];

/// shipkit binary with colors off and a deterministic git identity.
#[allow(dead_code)]
pub fn shipkit() -> Command {
    let mut cmd = Command::cargo_bin("shipkit").unwrap();
    cmd.env("NO_COLOR", "1").env_remove("RUST_LOG");
    for (key, value) in GIT_ENV {
        cmd.env(key, value);
    }
    cmd
}

/// Run git in `dir`, panicking on failure, and return its stdout.
#[allow(dead_code)]
pub fn git(dir: &Path, args: &[&str]) -> String {
    let output = std::process::Command::new("git")
        .args(args)
        .current_dir(dir)
        .envs(GIT_ENV.iter().copied())
        .output()
        .unwrap();
    assert!(
        output.status.success(),
        "git {:?} failed: {}",
        args,
        String::from_utf8_lossy(&output.stderr)
    );
    String::from_utf8_lossy(&output.stdout).to_string()
}

/// A working repository with one initial commit and a bare `origin`.
#[allow(dead_code)]
pub struct SiteRepo {
    _root: TempDir,
    pub work: PathBuf,
    pub remote: PathBuf,
}

#[allow(dead_code)]
impl SiteRepo {
    pub fn new() -> Self {
        Self::build(true)
    }

    /// Same as [`SiteRepo::new`] but with no `origin` configured.
    pub fn without_remote() -> Self {
        Self::build(false)
    }

    fn build(with_remote: bool) -> Self {
        let root = TempDir::new().unwrap();
        let work = root.path().join("work");
        let remote = root.path().join("remote.git");
        fs::create_dir(&work).unwrap();
        fs::create_dir(&remote).unwrap();

        git(&remote, &["init", "--bare", "--quiet"]);
        git(&work, &["init", "--quiet"]);
        fs::write(work.join("README.md"), "site\n").unwrap();
        git(&work, &["add", "README.md"]);
        git(&work, &["commit", "--quiet", "-m", "Initial commit"]);
        if with_remote {
            git(&work, &["remote", "add", "origin", &remote.display().to_string()]);
        }

        Self {
            _root: root,
            work,
            remote,
        }
    }

    pub fn write(&self, name: &str, content: &str) {
        fs::write(self.work.join(name), content).unwrap();
    }

    pub fn commit_count(&self) -> usize {
        git(&self.work, &["rev-list", "--count", "HEAD"])
            .trim()
            .parse()
            .unwrap()
    }

    pub fn remote_main(&self) -> String {
        git(&self.remote, &["rev-parse", "main"]).trim().to_string()
    }

    pub fn head(&self) -> String {
        git(&self.work, &["rev-parse", "HEAD"]).trim().to_string()
    }
}

/// Write an executable shell script.
#[cfg(unix)]
#[allow(dead_code)]
pub fn write_script(path: &Path, body: &str) {
    use std::os::unix::fs::PermissionsExt;

    fs::write(path, format!("#!/bin/sh\n{body}\n")).unwrap();
    fs::set_permissions(path, fs::Permissions::from_mode(0o755)).unwrap();
}
