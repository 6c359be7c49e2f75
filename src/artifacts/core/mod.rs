//! Console plumbing shared by the commands
//!
//! - `output`: colour scheme for command output
//! - [`PagerWriter`]: lets `log` write into the pager like any other writer

pub mod output;

use derive_new::new;
use minus::Pager;
use std::io::{self, Write};

/// `Write` adapter over a [`Pager`] buffer
///
/// Text is pushed into the pager as it is written; nothing is shown until the
/// caller hands the pager to `minus::page_all`. Writes must be valid UTF-8.
#[derive(new)]
pub struct PagerWriter {
    pager: Pager,
}

impl Write for PagerWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let text = std::str::from_utf8(buf)
            .map_err(|err| io::Error::new(io::ErrorKind::InvalidData, err))?;
        self.pager.push_str(text).map_err(io::Error::other)?;

        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}
