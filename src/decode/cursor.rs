use crate::{BdecodeError, BdecodeResult};

/// 解析用的字节游标，贯穿每一次 decode 调用。
///
/// 每一步解析成功后, 游标必须正好前进它消费掉的字节数（包括 ':'、'i'、'e'
/// 这类分隔符）；解析失败后游标状态不再可靠，调用方必须立即丢弃它。
#[derive(Debug, Clone)]
pub struct ByteCursor<'a> {
    buffer: &'a [u8],
    pos: usize,
}

impl<'a> ByteCursor<'a> {
    pub fn new(buffer: &'a [u8]) -> Self {
        Self { buffer, pos: 0 }
    }

    /// 当前在 buffer 中的偏移位置
    pub fn pos(&self) -> usize {
        self.pos
    }

    /// buffer 中尚未消费的字节数
    pub fn remaining(&self) -> usize {
        self.buffer.len() - self.pos
    }

    /// 查看下一个字节，不前进
    pub fn peek(&self) -> Option<u8> {
        self.buffer.get(self.pos).copied()
    }

    /// 前进 n 个字节。越过剩余长度是调用方的 bug 。
    pub fn advance(&mut self, n: usize) {
        assert!(n <= self.remaining());
        self.pos += n;
    }

    /// 消费并返回接下来的 n 个字节
    pub fn take(&mut self, n: usize) -> BdecodeResult<&'a [u8]> {
        if n > self.remaining() {
            return Err(BdecodeError::UnexpectedEof(self.pos));
        }

        let bytes = &self.buffer[self.pos..self.pos + n];
        self.pos += n;
        Ok(bytes)
    }

    /// 返回从 start 到当前位置之间的原始字节
    pub(crate) fn span(&self, start: usize) -> &'a [u8] {
        &self.buffer[start..self.pos]
    }
}
