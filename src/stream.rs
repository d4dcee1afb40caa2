//! Line-by-line reading of agent output into a session.

use crate::config::VisualizerConfig;
use crate::error::{Error, Result};
use crate::session::{SessionStats, VisualizerSession};
use std::io::{BufRead, BufReader, ErrorKind, Read, Write};

/// Reads newline-delimited agent output and feeds it to a session.
pub struct StreamReader<R: Read> {
    reader: BufReader<R>,
}

impl<R: Read> StreamReader<R> {
    /// Creates a new stream reader.
    pub fn new(reader: R) -> Self {
        Self {
            reader: BufReader::new(reader),
        }
    }

    /// Reads until EOF, handing each line to `session` in arrival order.
    ///
    /// Invalid UTF-8 is replaced rather than ending the stream.
    ///
    /// # Errors
    ///
    /// Returns an error if reading the source or writing the sink fails.
    pub fn read_to_session<W: Write>(mut self, session: &mut VisualizerSession<W>) -> Result<()> {
        let mut buf = Vec::new();
        loop {
            buf.clear();
            match self.reader.read_until(b'\n', &mut buf) {
                Ok(0) => return Ok(()),
                Ok(_) => {
                    let line = String::from_utf8_lossy(&buf);
                    session.process_line(&line)?;
                }
                Err(e) if e.kind() == ErrorKind::Interrupted => {}
                Err(e) => return Err(Error::read(e)),
            }
        }
    }
}

/// Visualizes a whole stream: reads `input` to EOF, writes to `output`, then
/// closes the session.
///
/// The closing summary is emitted even when reading fails part way.
///
/// # Errors
///
/// Returns the first read or write error encountered.
pub fn visualize<R: Read, W: Write>(
    input: R,
    output: W,
    config: VisualizerConfig,
) -> Result<SessionStats> {
    let mut session = VisualizerSession::new(output, config);
    let read = StreamReader::new(input).read_to_session(&mut session);
    let finished = session.finish();
    read?;
    finished
}
