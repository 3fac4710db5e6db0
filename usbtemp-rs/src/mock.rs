use std::{collections::VecDeque, io};

use crate::Transport;

/// Port that answers each write with the next scripted reply.
///
/// Reads block forever once the received bytes run out, like a silent line.
pub(crate) struct ScriptedPort {
    replies: VecDeque<Vec<u8>>,
    chunk: usize,
    pub rx: VecDeque<u8>,
    pub writes: Vec<Vec<u8>>,
    pub bauds: Vec<u32>,
    pub discards: usize,
    /// Reads fail as if the device was unplugged.
    pub unplugged: bool,
}

impl ScriptedPort {
    pub fn new(replies: impl IntoIterator<Item = Vec<u8>>) -> Self {
        Self {
            replies: replies.into_iter().collect(),
            chunk: usize::MAX,
            rx: VecDeque::new(),
            writes: Vec::new(),
            bauds: Vec::new(),
            discards: 0,
            unplugged: false,
        }
    }

    /// Deliver at most `chunk` bytes per read.
    pub fn with_chunk(mut self, chunk: usize) -> Self {
        self.chunk = chunk;
        self
    }
}

impl Transport for ScriptedPort {
    type Error = io::Error;

    async fn set_baud_rate(&mut self, baud_rate: u32) -> io::Result<()> {
        self.bauds.push(baud_rate);
        Ok(())
    }

    async fn discard_input(&mut self) -> io::Result<()> {
        self.rx.clear();
        self.discards += 1;
        Ok(())
    }

    async fn write_all(&mut self, bytes: &[u8]) -> io::Result<()> {
        self.writes.push(bytes.to_vec());
        if let Some(reply) = self.replies.pop_front() {
            self.rx.extend(reply);
        }
        Ok(())
    }

    async fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        if self.unplugged {
            return Err(io::ErrorKind::UnexpectedEof.into());
        }
        if self.rx.is_empty() {
            core::future::pending::<()>().await;
        }
        let n = buf.len().min(self.chunk).min(self.rx.len());
        for (slot, byte) in buf.iter_mut().zip(self.rx.drain(..n)) {
            *slot = byte;
        }
        Ok(n)
    }
}
