use tracing::debug;

/// Collects inbound bytes into newline-terminated lines.
///
/// A line that fills the buffer before its terminator arrives is discarded;
/// accumulation restarts with the next byte. The terminator is not part of
/// the returned line.
#[derive(Debug)]
pub struct LineAssembler {
    buf: Vec<u8>,
    max_len: usize,
    overflows: u64,
}

impl LineAssembler {
    /// Assembler for lines shorter than `max_len` bytes.
    pub fn new(max_len: usize) -> Self {
        Self {
            buf: Vec::with_capacity(max_len),
            max_len,
            overflows: 0,
        }
    }

    /// Add one byte, returning the line it completes.
    pub fn push(&mut self, byte: u8) -> Option<Vec<u8>> {
        if byte == b'\n' {
            return Some(std::mem::replace(
                &mut self.buf,
                Vec::with_capacity(self.max_len),
            ));
        }

        self.buf.push(byte);
        if self.buf.len() >= self.max_len {
            debug!(len = self.buf.len(), "command line overflow; discarded");
            self.buf.clear();
            self.overflows += 1;
        }
        None
    }

    /// Bytes held for the line in progress.
    pub fn pending(&self) -> usize {
        self.buf.len()
    }

    /// Lines discarded for exceeding the buffer.
    pub fn overflows(&self) -> u64 {
        self.overflows
    }
}
