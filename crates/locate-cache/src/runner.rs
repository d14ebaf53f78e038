//! Spawning the external index tool and streaming its output.

use std::io::{ErrorKind, Read};
use std::path::PathBuf;
use std::process::{Child, Command, Stdio};

use crate::config::{LocateConfig, RecordDelimiter};
use crate::error::{LocateError, Result};
use crate::query::LocateQuery;

/// Initial record buffer capacity; doubled whenever a record outgrows it.
pub const RECORD_BUFFER_INITIAL_CAPACITY: usize = 4096;

const READ_CHUNK_SIZE: usize = 64 * 1024;

/// How to invoke the index tool.
#[derive(Debug, Clone)]
pub struct LocateCommand {
    pub program: PathBuf,
    pub delimiter: RecordDelimiter,
    pub limit: usize,
}

impl LocateCommand {
    pub fn from_config(config: &LocateConfig) -> Self {
        Self {
            program: config.program.clone(),
            delimiter: config.delimiter,
            limit: config.limit,
        }
    }

    /// Command-line arguments for one lookup, program name excluded.
    pub fn args(&self, query: &LocateQuery) -> Vec<String> {
        let mut args = Vec::with_capacity(8);
        if self.delimiter == RecordDelimiter::Nul {
            args.push("-0".to_string());
        }
        if query.base_name_only {
            args.push("-b".to_string());
        }
        if query.ignore_case {
            args.push("-i".to_string());
        }
        args.push("-l".to_string());
        args.push(self.limit.to_string());
        args.push("--".to_string());
        args.push(query.pattern.clone());
        args
    }
}

/// Runs one lookup, handing every record to `sink` as it arrives.
///
/// Returns [`LocateError::ToolFailed`] when the tool exits non-zero or is
/// killed, and `Spawn`/`Io` errors for OS-level failures. The child is always
/// reaped before returning.
pub fn run_locate(
    command: &LocateCommand,
    query: &LocateQuery,
    sink: &mut dyn FnMut(&[u8]),
) -> Result<()> {
    let mut child = Command::new(&command.program)
        .args(command.args(query))
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::inherit())
        .spawn()
        .map_err(|source| LocateError::Spawn {
            program: command.program.clone(),
            source,
        })?;

    let read_result = drain_stdout(&mut child, command.delimiter, sink);
    if read_result.is_err() {
        // Unblock a writer stuck on a pipe nobody reads anymore.
        let _ = child.kill();
    }
    let status = child.wait()?;
    read_result?;

    if !status.success() {
        return Err(LocateError::ToolFailed(status));
    }
    Ok(())
}

fn drain_stdout(
    child: &mut Child,
    delimiter: RecordDelimiter,
    sink: &mut dyn FnMut(&[u8]),
) -> Result<()> {
    let Some(mut stdout) = child.stdout.take() else {
        return Err(LocateError::Io(std::io::Error::new(
            ErrorKind::BrokenPipe,
            "child stdout was not captured",
        )));
    };

    let mut splitter = RecordSplitter::new(delimiter.byte());
    let mut chunk = vec![0u8; READ_CHUNK_SIZE];
    loop {
        let read = match stdout.read(&mut chunk) {
            Ok(0) => break,
            Ok(read) => read,
            Err(error) if error.kind() == ErrorKind::Interrupted => continue,
            Err(error) => return Err(error.into()),
        };
        splitter.feed(&chunk[..read], sink);
    }
    splitter.finish(sink);
    Ok(())
}

/// Splits a byte stream into delimiter-terminated records.
#[derive(Debug)]
pub struct RecordSplitter {
    delimiter: u8,
    record: Vec<u8>,
}

impl RecordSplitter {
    pub fn new(delimiter: u8) -> Self {
        Self {
            delimiter,
            record: Vec::with_capacity(RECORD_BUFFER_INITIAL_CAPACITY),
        }
    }

    /// Emits every record completed by `bytes`; a partial tail is buffered.
    pub fn feed(&mut self, mut bytes: &[u8], sink: &mut dyn FnMut(&[u8])) {
        while let Some(end) = memchr::memchr(self.delimiter, bytes) {
            if self.record.is_empty() {
                sink(&bytes[..end]);
            } else {
                self.append(&bytes[..end]);
                sink(&self.record);
                self.record.clear();
            }
            bytes = &bytes[end + 1..];
        }
        self.append(bytes);
    }

    /// Emits a trailing record that was not terminated before EOF.
    pub fn finish(&mut self, sink: &mut dyn FnMut(&[u8])) {
        if !self.record.is_empty() {
            sink(&self.record);
            self.record.clear();
        }
    }

    pub fn capacity(&self) -> usize {
        self.record.capacity()
    }

    fn append(&mut self, bytes: &[u8]) {
        let needed = self.record.len() + bytes.len();
        if needed > self.record.capacity() {
            let mut capacity = self.record.capacity().max(RECORD_BUFFER_INITIAL_CAPACITY);
            while capacity < needed {
                capacity *= 2;
            }
            self.record.reserve_exact(capacity - self.record.len());
        }
        self.record.extend_from_slice(bytes);
    }
}
