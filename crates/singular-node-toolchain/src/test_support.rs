//! Fixtures shared by the unit tests of this crate.

use singular_node_core::Layout;
use std::path::PathBuf;

pub(crate) fn linux_layout(base: impl Into<PathBuf>) -> Layout {
    Layout::resolve(base, "Linux").unwrap()
}

#[cfg(unix)]
pub(crate) use fake_node::FakeNode;

#[cfg(unix)]
mod fake_node {
    use super::linux_layout;
    use singular_node_core::Layout;
    use std::os::unix::fs::PermissionsExt;
    use std::path::{Path, PathBuf};
    use std::sync::{Mutex, MutexGuard};

    /// Writing an executable while another thread forks can make the exec
    /// fail with ETXTBSY, so tests that spawn the fake engine run one at a
    /// time.
    static PROCESS_LOCK: Mutex<()> = Mutex::new(());

    /// A shell script installed as `<base>/node/bin/node` that records its
    /// arguments, physical working directory, `PATH` and full environment.
    pub(crate) struct FakeNode {
        dir: tempfile::TempDir,
        _guard: MutexGuard<'static, ()>,
    }

    impl FakeNode {
        pub(crate) fn install(exit_code: i32) -> Self {
            let guard = PROCESS_LOCK.lock().unwrap_or_else(|e| e.into_inner());
            let dir = tempfile::tempdir().unwrap();
            let layout = linux_layout(dir.path());
            let record = dir.path().join("record");
            std::fs::create_dir_all(&record).unwrap();
            std::fs::create_dir_all(layout.node_bin_dir()).unwrap();

            let script = format!(
                "#!/bin/sh\n\
                 printf '%s\\n' \"$@\" > '{r}/argv'\n\
                 pwd -P > '{r}/cwd'\n\
                 printf '%s\\n' \"$PATH\" > '{r}/path'\n\
                 env > '{r}/env'\n\
                 exit {code}\n",
                r = record.display(),
                code = exit_code
            );
            let node = layout.node_executable();
            std::fs::write(&node, script).unwrap();
            std::fs::set_permissions(&node, std::fs::Permissions::from_mode(0o755)).unwrap();

            Self { dir, _guard: guard }
        }

        pub(crate) fn layout(&self) -> Layout {
            linux_layout(self.dir.path())
        }

        pub(crate) fn base_dir(&self) -> &Path {
            self.dir.path()
        }

        fn read(&self, name: &str) -> String {
            std::fs::read_to_string(self.dir.path().join("record").join(name)).unwrap()
        }

        pub(crate) fn was_invoked(&self) -> bool {
            self.dir.path().join("record").join("argv").exists()
        }

        pub(crate) fn recorded_args(&self) -> Vec<String> {
            self.read("argv").lines().map(String::from).collect()
        }

        pub(crate) fn recorded_cwd(&self) -> PathBuf {
            PathBuf::from(self.read("cwd").trim_end())
        }

        pub(crate) fn recorded_path(&self) -> String {
            self.read("path").trim_end().to_string()
        }

        /// Value of `key` in the environment the fake engine was started with.
        pub(crate) fn recorded_env(&self, key: &str) -> Option<String> {
            let prefix = format!("{}=", key);
            self.read("env")
                .lines()
                .find_map(|line| line.strip_prefix(&prefix).map(String::from))
        }
    }
}
