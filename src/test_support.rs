use crate::error::{OrcaError, Result};
use crate::install::CommandExecutor;
use std::cell::RefCell;

/// Executor that records every call instead of spawning anything.
#[derive(Default)]
pub(crate) struct RecordingExecutor {
    calls: RefCell<Vec<(String, Vec<String>)>>,
    output: Vec<u8>,
    fail: bool,
}

impl RecordingExecutor {
    pub(crate) fn with_output(output: &[u8]) -> Self {
        Self {
            output: output.to_vec(),
            ..Default::default()
        }
    }

    pub(crate) fn failing() -> Self {
        Self {
            fail: true,
            ..Default::default()
        }
    }

    pub(crate) fn calls(&self) -> Vec<(String, Vec<String>)> {
        self.calls.borrow().clone()
    }

    /// The `-c` script of each recorded call.
    pub(crate) fn scripts(&self) -> Vec<String> {
        self.calls
            .borrow()
            .iter()
            .filter_map(|(_, args)| {
                let pos = args.iter().position(|a| a == "-c")?;
                args.get(pos + 1).cloned()
            })
            .collect()
    }
}

impl CommandExecutor for RecordingExecutor {
    fn execute(&self, program: &str, args: &[String]) -> Result<Vec<u8>> {
        self.calls
            .borrow_mut()
            .push((program.to_string(), args.to_vec()));
        if self.fail {
            return Err(OrcaError::Install(format!("{} exited with status 1", program)));
        }
        Ok(self.output.clone())
    }
}
