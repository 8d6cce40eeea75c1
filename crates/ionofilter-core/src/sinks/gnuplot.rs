use std::fmt::Write as _;
use std::io::Write;
use std::process::{Command, Stdio};

use super::{ChannelComparison, PlotSink, SinkError};

/// Builds a gnuplot script that overlays the filtered series on the raw one,
/// with both series passed inline.
pub fn gnuplot_script(comparison: &ChannelComparison) -> String {
    let title = comparison.label.replace('\'', "''");
    let mut script = String::new();
    // Writing into a String cannot fail.
    let _ = writeln!(script, "set title '{title}'");
    let _ = writeln!(
        script,
        "plot '-' u 1:2 t 'unfiltered' w lp lt 0, '' u 1:2 t 'filtered' w lines lt 2"
    );
    for (index, raw, _) in comparison.points() {
        let _ = writeln!(script, "{index} {raw}");
    }
    script.push_str("e\n");
    for (index, _, filtered) in comparison.points() {
        let _ = writeln!(script, "{index} {filtered}");
    }
    script.push_str("e\n");
    script
}

/// Pipes each comparison to its own gnuplot process.
#[derive(Debug, Clone)]
pub struct GnuplotSink {
    program: String,
    args: Vec<String>,
}

impl Default for GnuplotSink {
    fn default() -> Self {
        Self {
            program: "gnuplot".to_string(),
            args: vec!["-persistent".to_string()],
        }
    }
}

impl GnuplotSink {
    pub fn new(program: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            program: program.into(),
            args,
        }
    }
}

impl PlotSink for GnuplotSink {
    fn name(&self) -> &'static str {
        "gnuplot"
    }

    fn render(&mut self, comparison: &ChannelComparison) -> Result<(), SinkError> {
        let mut child = Command::new(&self.program)
            .args(&self.args)
            .stdin(Stdio::piped())
            .spawn()
            .map_err(|err| SinkError::Process(format!("failed to launch {}: {err}", self.program)))?;

        let written = match child.stdin.take() {
            Some(mut stdin) => stdin
                .write_all(gnuplot_script(comparison).as_bytes())
                .and_then(|()| stdin.flush()),
            None => Ok(()),
        };

        // Reap the child even when the pipe broke mid-script.
        let status = child.wait()?;
        if !status.success() {
            return Err(SinkError::Process(format!(
                "{} exited with {status} while plotting {}",
                self.program, comparison.label
            )));
        }
        written?;
        Ok(())
    }
}
