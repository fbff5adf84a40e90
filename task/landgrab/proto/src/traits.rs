use std::{
    borrow::Cow,
    io::{self, BufRead, Write},
};

use crate::Action;

////////////////////////////////////////////////////////////////////////////////

pub const MAX_RECORD_LEN: usize = 64 * 1024;

#[derive(Debug, thiserror::Error)]
pub enum RecordError {
    #[error("failed to read record: {0}")]
    Io(#[from] io::Error),

    #[error("record too large: {len} bytes exceeds maximum of {max} bytes")]
    TooLarge { len: usize, max: usize },
}

pub trait RecordRead {
    /// Reads one line into `buf`, returning `None` at the end of the stream.
    ///
    /// Lines longer than `max_len` bytes are consumed but not stored.
    fn read_record<'b>(
        &mut self,
        buf: &'b mut Vec<u8>,
        max_len: usize,
    ) -> Result<Option<Cow<'b, str>>, RecordError>;
}

pub trait ActionWrite {
    fn write_action(&mut self, action: &Action) -> io::Result<()>;
}

////////////////////////////////////////////////////////////////////////////////

impl<T: BufRead> RecordRead for T {
    fn read_record<'b>(
        &mut self,
        buf: &'b mut Vec<u8>,
        max_len: usize,
    ) -> Result<Option<Cow<'b, str>>, RecordError> {
        buf.clear();

        let mut len = 0;
        let mut seen_any = false;

        loop {
            let available = match self.fill_buf() {
                Ok(available) => available,
                Err(err) if err.kind() == io::ErrorKind::Interrupted => continue,
                Err(err) => return Err(err.into()),
            };
            if available.is_empty() {
                break;
            }
            seen_any = true;

            let (chunk_len, terminated) = match available.iter().position(|&b| b == b'\n') {
                Some(index) => (index, true),
                None => (available.len(), false),
            };

            len += chunk_len;
            if len <= max_len {
                buf.extend_from_slice(&available[..chunk_len]);
            }

            self.consume(chunk_len + usize::from(terminated));
            if terminated {
                break;
            }
        }

        if !seen_any {
            return Ok(None);
        }

        if len > max_len {
            buf.clear();
            return Err(RecordError::TooLarge { len, max: max_len });
        }

        if buf.last() == Some(&b'\r') {
            buf.pop();
        }

        let buf: &'b Vec<u8> = buf;
        Ok(Some(String::from_utf8_lossy(buf)))
    }
}

impl<T: Write> ActionWrite for T {
    fn write_action(&mut self, action: &Action) -> io::Result<()> {
        self.write_all(action.as_str().as_bytes())?;
        self.write_all(b"\n")?;
        self.flush()
    }
}

////////////////////////////////////////////////////////////////////////////////
