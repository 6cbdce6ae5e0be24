/// Terminal state of one supervised bridge invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessOutcome {
    /// Only meaningful when the process exited on its own; `None` after a timeout or a signal.
    pub exit_code: Option<i32>,
    pub stdout: String,
    pub stderr: String,
    pub timed_out: bool,
}

impl ProcessOutcome {
    pub fn exited(exit_code: Option<i32>, stdout: String, stderr: String) -> Self {
        Self {
            exit_code,
            stdout,
            stderr,
            timed_out: false,
        }
    }

    pub fn timed_out(stdout: String, stderr: String) -> Self {
        Self {
            exit_code: None,
            stdout,
            stderr,
            timed_out: true,
        }
    }

    pub fn exit_completed(&self) -> bool {
        !self.timed_out
    }
}
