use std::io::{ErrorKind, Write};

/// Command output sink that goes quiet once the reader hangs up
///
/// `gitlet log | head -1` closes the pipe early. Later writes are dropped
/// instead of failing the command, so its repository changes still persist.
pub struct PipeWriter<W> {
    inner: W,
    closed: bool,
}

impl<W: Write> PipeWriter<W> {
    pub fn new(inner: W) -> Self {
        PipeWriter {
            inner,
            closed: false,
        }
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }

    fn on_broken_pipe<T>(&mut self, result: std::io::Result<T>, fallback: T) -> std::io::Result<T> {
        match result {
            Err(err) if err.kind() == ErrorKind::BrokenPipe => {
                tracing::debug!("output closed by reader");
                self.closed = true;
                Ok(fallback)
            }
            other => other,
        }
    }
}

impl<W: Write> Write for PipeWriter<W> {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        if self.closed {
            return Ok(buf.len());
        }

        let result = self.inner.write(buf);
        self.on_broken_pipe(result, buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        if self.closed {
            return Ok(());
        }

        let result = self.inner.flush();
        self.on_broken_pipe(result, ())
    }
}
