use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;
use tempfile::TempDir;

/// TestHarness provides an isolated commands directory per test.
/// The temporary directory is cleaned up on drop.
pub struct TestHarness {
    pub dir: TempDir,
    pub commands_dir: PathBuf,
    pub stratum_binary: PathBuf,
}

impl TestHarness {
    pub fn new() -> Self {
        let dir = TempDir::new().expect("Failed to create temp dir");
        let commands_dir = dir.path().join(".claude/commands");
        fs::create_dir_all(&commands_dir).expect("Failed to create commands dir");
        TestHarness {
            dir,
            commands_dir,
            stratum_binary: PathBuf::from(env!("CARGO_BIN_EXE_stratum")),
        }
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Executes the stratum binary with the given arguments in the
    /// harness directory.
    pub fn run(&self, args: &[&str]) -> std::io::Result<std::process::Output> {
        Command::new(&self.stratum_binary)
            .args(args)
            .current_dir(self.path())
            .output()
    }

    /// Write a command file declaring the given dependencies.
    pub fn write_command(&self, name: &str, deps: &[&str]) -> PathBuf {
        let content = if deps.is_empty() {
            format!("---\ndescription: test command\n---\n\n# {}\n", name)
        } else {
            format!(
                "---\ndescription: test command\ndependent-commands: {}\n---\n\n# {}\n",
                deps.join(", "),
                name
            )
        };
        self.write_raw(name, &content)
    }

    /// Write a command file with arbitrary content.
    pub fn write_raw(&self, name: &str, content: &str) -> PathBuf {
        let path = self.commands_dir.join(format!("{}.md", name));
        fs::write(&path, content).expect("Failed to write command file");
        path
    }
}
