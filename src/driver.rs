//! Benchmark driver: runs the external compiler on a corpus and captures what
//! it prints.
//!
//! The compiler is a black box. It is invoked as
//! `<executable> compile <corpus> --timings`, its stdout and stderr are
//! collected as text, and its exit status is recorded. Nothing here parses
//! or judges that output; timing numbers, if any, come from the compiler.
//!
//! Launch problems (missing file, not executable, spawn failure) surface as
//! [`HarnessError::Launch`]. A non-zero exit status is *not* an error: the
//! captured output is returned as usual.

use std::ffi::OsString;
use std::io;
use std::path::{Path, PathBuf};
use std::process::{Command, ExitStatus, Output, Stdio};
use std::thread;
use std::time::Duration;

use crossbeam_channel::RecvTimeoutError;

use crate::config::{COMPILE_SUBCOMMAND, DEFAULT_COMPILER_NAME, TIMINGS_FLAG};
use crate::error::{HarnessError, Result};

/// How long to wait for a killed compiler to be reaped after a timeout.
const REAP_GRACE: Duration = Duration::from_secs(5);

// ── Path resolution ──────────────────────────────────────────────────────────

/// Directory containing the running harness executable.
///
/// Used as the default anchor so the harness behaves the same from any
/// working directory.
pub fn default_anchor() -> io::Result<PathBuf> {
    let exe = std::env::current_exe()?;
    exe.parent().map(Path::to_path_buf).ok_or_else(|| {
        io::Error::new(
            io::ErrorKind::NotFound,
            "harness executable has no parent directory",
        )
    })
}

/// Resolve `path` against `base` unless it is already absolute.
pub fn resolve_against(base: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        base.join(path)
    }
}

/// `<base>/../startasm`: the compiler sits one level above the harness.
pub fn default_compiler_path(base: &Path) -> PathBuf {
    base.join("..").join(DEFAULT_COMPILER_NAME)
}

/// The fixed argument vector: `compile <corpus> --timings`.
pub fn compile_args(corpus: &Path) -> Vec<OsString> {
    vec![
        OsString::from(COMPILE_SUBCOMMAND),
        corpus.as_os_str().to_owned(),
        OsString::from(TIMINGS_FLAG),
    ]
}

// ── Captured result ──────────────────────────────────────────────────────────

/// Everything the compiler produced, relayed untouched.
#[derive(Debug, Clone)]
pub struct BenchOutput {
    pub stdout: String,
    pub stderr: String,
    pub status: ExitStatus,
}

impl BenchOutput {
    fn from_output(output: Output) -> Self {
        BenchOutput {
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
            status: output.status,
        }
    }

    pub fn success(&self) -> bool {
        self.status.success()
    }

    /// Exit code, or `None` if the process was terminated by a signal.
    pub fn code(&self) -> Option<i32> {
        self.status.code()
    }
}

// ── Invocation ───────────────────────────────────────────────────────────────

/// One planned compiler call. Built right before the run, consumed by it.
#[derive(Debug, Clone)]
pub struct Invocation {
    executable: PathBuf,
    args: Vec<OsString>,
    working_dir: Option<PathBuf>,
    timeout: Option<Duration>,
}

impl Invocation {
    /// Arbitrary argument vector; see [`Invocation::compile`] for the usual one.
    pub fn new(executable: impl Into<PathBuf>, args: Vec<OsString>) -> Self {
        Invocation {
            executable: executable.into(),
            args,
            working_dir: None,
            timeout: None,
        }
    }

    /// `<executable> compile <corpus> --timings`.
    pub fn compile(executable: impl Into<PathBuf>, corpus: &Path) -> Self {
        Self::new(executable, compile_args(corpus))
    }

    /// Run the child with `dir` as its working directory.
    pub fn current_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.working_dir = Some(dir.into());
        self
    }

    /// Kill the child if it has not exited after `limit`. `None` waits forever.
    pub fn timeout(mut self, limit: Option<Duration>) -> Self {
        self.timeout = limit;
        self
    }

    pub fn executable(&self) -> &Path {
        &self.executable
    }

    pub fn args(&self) -> &[OsString] {
        &self.args
    }

    /// Spawn, block until exit (or timeout), and capture output.
    pub fn run(&self) -> Result<BenchOutput> {
        check_launchable(&self.executable).map_err(|source| self.launch_error(source))?;

        let mut cmd = Command::new(&self.executable);
        cmd.args(&self.args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());
        if let Some(dir) = &self.working_dir {
            cmd.current_dir(dir);
        }

        let child = cmd.spawn().map_err(|source| self.launch_error(source))?;

        let output = match self.timeout {
            None => child
                .wait_with_output()
                .map_err(|source| self.launch_error(source))?,
            Some(limit) => self.wait_with_timeout(child, limit)?,
        };
        Ok(BenchOutput::from_output(output))
    }

    fn wait_with_timeout(&self, child: std::process::Child, limit: Duration) -> Result<Output> {
        let pid = child.id();
        let (tx, rx) = crossbeam_channel::bounded(1);
        thread::spawn(move || {
            let _ = tx.send(child.wait_with_output());
        });

        match rx.recv_timeout(limit) {
            Ok(result) => result.map_err(|source| self.launch_error(source)),
            Err(RecvTimeoutError::Timeout) => {
                if kill_child(pid) {
                    let _ = rx.recv_timeout(REAP_GRACE);
                }
                Err(HarnessError::Timeout {
                    path: self.executable.clone(),
                    after: limit,
                })
            }
            Err(RecvTimeoutError::Disconnected) => Err(self.launch_error(io::Error::new(
                io::ErrorKind::Other,
                "compiler wait thread exited without a result",
            ))),
        }
    }

    fn launch_error(&self, source: io::Error) -> HarnessError {
        HarnessError::Launch {
            path: self.executable.clone(),
            source,
        }
    }
}

/// Run `executable` with `args` against nothing but the current directory.
///
/// Shorthand for `Invocation::new(executable, args).run()`.
pub fn run(executable: &Path, args: Vec<OsString>) -> Result<BenchOutput> {
    Invocation::new(executable, args).run()
}

// ── Platform helpers ─────────────────────────────────────────────────────────

/// Fail early with a precise reason instead of a bare spawn error.
fn check_launchable(executable: &Path) -> io::Result<()> {
    let meta = std::fs::metadata(executable)?;
    if !meta.is_file() {
        return Err(io::Error::new(
            io::ErrorKind::InvalidInput,
            "not a regular file",
        ));
    }
    #[cfg(unix)]
    {
        use nix::unistd::{access, AccessFlags};
        access(executable, AccessFlags::X_OK).map_err(io::Error::from)?;
    }
    Ok(())
}

/// Returns `true` if the kill signal was delivered.
#[cfg(unix)]
fn kill_child(pid: u32) -> bool {
    use nix::sys::signal::{kill, Signal};
    use nix::unistd::Pid;

    match i32::try_from(pid) {
        Ok(raw) => kill(Pid::from_raw(raw), Signal::SIGKILL).is_ok(),
        Err(_) => false,
    }
}

#[cfg(not(unix))]
fn kill_child(_pid: u32) -> bool {
    false
}
